use crate::core::errors::MeasurementError;
use crate::core::gates::Gate;
use crate::core::utils;
use ndarray::Array2;
use num_complex::Complex64;
use std::fmt;

/// Single-qubit Pauli operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    pub fn matrix(self) -> Array2<Complex64> {
        match self {
            Pauli::I => Gate::i().matrix,
            Pauli::X => Gate::x().matrix,
            Pauli::Y => Gate::y().matrix,
            Pauli::Z => Gate::z().matrix,
        }
    }
}

/// Tensor product of Pauli operators, each on its own qubit.
///
/// Every Pauli string squares to the identity, so its eigenvalues are ±1.
#[derive(Clone, Debug, PartialEq)]
pub struct Observable {
    factors: Vec<(Pauli, usize)>,
}

impl Observable {
    pub fn pauli(pauli: Pauli, wire: usize) -> Self {
        Self {
            factors: vec![(pauli, wire)],
        }
    }

    pub fn x(wire: usize) -> Self {
        Self::pauli(Pauli::X, wire)
    }

    pub fn y(wire: usize) -> Self {
        Self::pauli(Pauli::Y, wire)
    }

    pub fn z(wire: usize) -> Self {
        Self::pauli(Pauli::Z, wire)
    }

    /// Tensor product `self ⊗ other`.
    pub fn tensor(mut self, other: Observable) -> Self {
        self.factors.extend(other.factors);
        self
    }

    pub fn factors(&self) -> &[(Pauli, usize)] {
        &self.factors
    }

    pub fn wires(&self) -> Vec<usize> {
        self.factors.iter().map(|&(_, w)| w).collect()
    }

    /// Local matrix of the observable; bit `i` of its index is `wires()[i]`.
    pub fn local_matrix(&self) -> Result<Array2<Complex64>, MeasurementError> {
        if self.factors.is_empty() {
            return Err(MeasurementError::EmptyObservable);
        }
        if let Some(dup) = utils::find_duplicate(&self.wires()) {
            return Err(MeasurementError::DuplicateQubit(dup));
        }

        // Kronecker puts its first factor on the most significant bit
        let matrix = self
            .factors
            .iter()
            .rev()
            .map(|&(p, _)| p.matrix())
            .reduce(|acc, m| utils::kronecker_product(&acc, &m))
            .ok_or(MeasurementError::EmptyObservable)?;

        Ok(matrix)
    }

    /// Expands the observable to the whole register.
    pub fn expanded(&self, num_total_qubits: usize) -> Result<Array2<Complex64>, MeasurementError> {
        let local = self.local_matrix()?;
        Ok(utils::expand_operator(
            num_total_qubits,
            &local,
            &self.wires(),
            &[],
        ))
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .factors
            .iter()
            .map(|(p, w)| format!("{p:?}{w}"))
            .collect();
        write!(f, "{}", parts.join("@"))
    }
}

/// Terminal measurement of a circuit: an observable and its reduction.
#[derive(Clone, Debug, PartialEq)]
pub enum Measurement {
    /// Expectation value ⟨O⟩.
    Expectation(Observable),
    /// Variance ⟨O²⟩ - ⟨O⟩².
    Variance(Observable),
}

impl Measurement {
    pub fn observable(&self) -> &Observable {
        match self {
            Measurement::Expectation(obs) | Measurement::Variance(obs) => obs,
        }
    }
}
