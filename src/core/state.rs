use crate::core::Gate;
use crate::core::channels::QuantumChannel;
use crate::core::errors::{ChannelError, StateError};
use crate::core::observables::Observable;
use crate::core::utils::{dagger, find_duplicate, trace};
use ndarray::Array2;
use num_complex::Complex64;

/// Mixed state of a qubit register, stored as a density matrix.
#[derive(Clone, Debug)]
pub struct QuantumState {
    pub density_matrix: Array2<Complex64>,
    pub num_qubits: usize,
}

impl QuantumState {
    /// Creates a new quantum state initialized to |0...0>.
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1 << num_qubits;
        let mut density_matrix = Array2::<Complex64>::zeros((dim, dim));
        density_matrix[[0, 0]] = Complex64::new(1.0, 0.0);

        Self {
            density_matrix,
            num_qubits,
        }
    }

    /// Applies an operator already expanded to the whole register
    fn apply_operator(&mut self, u: &Array2<Complex64>) -> Result<(), StateError> {
        let (rows, cols) = u.dim();
        let dim = 1 << self.num_qubits;

        if rows != dim || cols != dim {
            return Err(StateError::DimensionMismatch {
                expected: dim,
                got_rows: rows,
                got_cols: cols,
            });
        }

        let temp = u.dot(&self.density_matrix);
        self.density_matrix = temp.dot(&dagger(u));

        Ok(())
    }

    /// Checks if a given index is within the system QuantumState's range
    fn validate_qubit_index(&self, index: usize) -> Result<(), StateError> {
        if index >= self.num_qubits {
            return Err(StateError::IndexOutOfBounds {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Applies non controlled quantum gate
    pub fn apply(&mut self, gate: &Gate, target_qubits: &[usize]) -> Result<(), StateError> {
        self.apply_controlled(gate, target_qubits, None)
    }

    /// Applies generic quantum gate
    pub fn apply_controlled(
        &mut self,
        gate: &Gate,
        target_qubits: &[usize],
        control_qubits: Option<&[usize]>,
    ) -> Result<(), StateError> {
        if gate.num_qubits != target_qubits.len() {
            return Err(StateError::DimensionMismatch {
                expected: gate.num_qubits,
                got_rows: target_qubits.len(),
                got_cols: 0,
            });
        }

        for &q in target_qubits {
            self.validate_qubit_index(q)?;
        }

        let controls = control_qubits.unwrap_or(&[]);
        for &q in controls {
            self.validate_qubit_index(q)?;
        }

        let full_gate_operator = Gate::expand_gate(self.num_qubits, gate, target_qubits, controls)?;

        self.apply_operator(&full_gate_operator.matrix)
    }

    /// Apply QuantumChannel to QuantumState
    pub fn apply_channel(
        &mut self,
        channel: &QuantumChannel,
        target_qubits: &[usize],
    ) -> Result<(), StateError> {
        for &q in target_qubits {
            self.validate_qubit_index(q)?;
        }

        if let Some(dup) = find_duplicate(target_qubits) {
            return Err(StateError::ChannelError(ChannelError::DuplicateQubit(dup)));
        }

        let ops = channel.get_expanded_operators(self.num_qubits, target_qubits)?;

        let dim = self.density_matrix.nrows();
        let mut new_rho = Array2::<Complex64>::zeros((dim, dim));

        // rho' = sum_k K rho K†
        for k in ops {
            let temp = k.dot(&self.density_matrix);
            new_rho = new_rho + temp.dot(&dagger(&k));
        }

        self.density_matrix = new_rho;

        Ok(())
    }

    /// Expectation value Tr(rho O) of a Pauli-string observable.
    pub fn expectation(&self, observable: &Observable) -> Result<f64, StateError> {
        for w in observable.wires() {
            self.validate_qubit_index(w)?;
        }

        let full = observable.expanded(self.num_qubits)?;
        Ok(trace(&self.density_matrix.dot(&full)).re)
    }

    /// Trace of the density matrix; 1 for every valid state.
    pub fn trace(&self) -> f64 {
        trace(&self.density_matrix).re
    }
}
