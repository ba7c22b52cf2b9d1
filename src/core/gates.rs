use crate::core::errors::GateError;
use crate::core::utils;
use ndarray::{Array2, arr2};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Represents a quantum gate.
///
/// A gate is defined by its unitary matrix and the number of qubits it acts on.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
    /// The number of qubits the gate acts on.
    pub num_qubits: usize,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Arguments
    ///
    /// * `matrix` - A square, unitary `Array2<Complex64>`.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not square.
    /// - The matrix dimensions are not a power of 2.
    /// - The matrix is not unitary.
    pub fn new(matrix: Array2<Complex64>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }

        if !rows.is_power_of_two() {
            return Err(GateError::InvalidDimensions);
        }

        if !Self::check_unitary(&matrix) {
            return Err(GateError::NonUnitary);
        }

        Ok(Self::fixed(matrix))
    }

    /// Wraps a matrix known to be unitary, skipping validation.
    fn fixed(matrix: Array2<Complex64>) -> Self {
        let num_qubits = matrix.nrows().trailing_zeros() as usize;
        Self { matrix, num_qubits }
    }

    /// Checks if a given matrix is unitary
    fn check_unitary(matrix: &Array2<Complex64>) -> bool {
        let (rows, _) = matrix.dim();
        let eye = Array2::<Complex64>::eye(rows);

        let product = matrix.dot(&utils::dagger(matrix));

        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (*a - *b).norm() < 1e-6)
    }

    /// Returns the conjugate transpose of this gate, its inverse.
    pub fn adjoint(&self) -> Gate {
        Gate {
            matrix: utils::dagger(&self.matrix),
            num_qubits: self.num_qubits,
        }
    }

    /// Expands a gate to act on a larger system of qubits.
    ///
    /// This function creates a new gate that acts on `num_total_qubits` by applying the original `gate`
    /// to the specified `targets` and `controls` (if any), and Identity on the rest.
    ///
    /// # Errors
    ///
    /// Returns `GateError` if:
    /// - Duplicate indices are found in `targets` or `controls`.
    /// - A qubit is used as both control and target.
    pub fn expand_gate(
        num_total_qubits: usize,
        gate: &Gate,
        targets: &[usize],
        controls: &[usize],
    ) -> Result<Gate, GateError> {
        if let Some(dup) = utils::find_duplicate(targets) {
            return Err(GateError::DuplicateQubit(dup));
        }

        if let Some(dup) = utils::find_duplicate(controls) {
            return Err(GateError::DuplicateQubit(dup));
        }

        for &c in controls {
            if targets.contains(&c) {
                return Err(GateError::ControlTargetOverlap(c));
            }
        }

        Ok(Gate {
            matrix: utils::expand_operator(num_total_qubits, &gate.matrix, targets, controls),
            num_qubits: num_total_qubits,
        })
    }

    // --- Standard Gates ---

    /// Creates an Identity gate.
    pub fn i() -> Gate {
        Gate::fixed(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ]))
    }

    /// Creates a Pauli-X gate (NOT gate).
    pub fn x() -> Gate {
        Gate::fixed(arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ]))
    }

    /// Creates a Pauli-Y gate.
    pub fn y() -> Gate {
        Gate::fixed(arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
            [Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)],
        ]))
    }

    /// Creates a Pauli-Z gate.
    pub fn z() -> Gate {
        Gate::fixed(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)],
        ]))
    }

    /// Creates a Hadamard gate.
    pub fn h() -> Gate {
        let factor = 1.0 / 2.0_f64.sqrt();
        Gate::fixed(arr2(&[
            [Complex64::new(factor, 0.0), Complex64::new(factor, 0.0)],
            [Complex64::new(factor, 0.0), Complex64::new(-factor, 0.0)],
        ]))
    }

    /// Creates an S gate (Phase gate, Z^1/2).
    pub fn s() -> Gate {
        Gate::fixed(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0)],
        ]))
    }

    /// Creates a T gate (Z^1/4).
    pub fn t_gate() -> Gate {
        let angle = PI / 4.0;
        Gate::fixed(arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [
                Complex64::new(0.0, 0.0),
                Complex64::new(angle.cos(), angle.sin()),
            ],
        ]))
    }

    /// Creates a square-root-of-X gate (X^1/2).
    pub fn sx() -> Gate {
        Gate::fixed(arr2(&[
            [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
            [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
        ]))
    }

    /// Rotation about the X axis: exp(-i θ X / 2).
    pub fn rx(theta: f64) -> Gate {
        let (s, c) = (theta / 2.0).sin_cos();
        Gate::fixed(arr2(&[
            [Complex64::new(c, 0.0), Complex64::new(0.0, -s)],
            [Complex64::new(0.0, -s), Complex64::new(c, 0.0)],
        ]))
    }

    /// Rotation about the Y axis: exp(-i θ Y / 2).
    pub fn ry(theta: f64) -> Gate {
        let (s, c) = (theta / 2.0).sin_cos();
        Gate::fixed(arr2(&[
            [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
            [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
        ]))
    }

    /// Rotation about the Z axis: exp(-i θ Z / 2).
    pub fn rz(theta: f64) -> Gate {
        let half = theta / 2.0;
        Gate::fixed(arr2(&[
            [Complex64::from_polar(1.0, -half), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::from_polar(1.0, half)],
        ]))
    }

    /// Creates a CNOT (Controlled-NOT) gate. Local qubit 0 is the control.
    pub fn cnot() -> Gate {
        Gate::fixed(utils::expand_operator(2, &Gate::x().matrix, &[1], &[0]))
    }

    /// Creates a controlled-Z gate.
    pub fn cz() -> Gate {
        Gate::fixed(utils::expand_operator(2, &Gate::z().matrix, &[1], &[0]))
    }

    /// Creates a SWAP gate.
    pub fn swap() -> Gate {
        let mut matrix = Array2::<Complex64>::zeros((4, 4));
        for (row, col) in [(0, 0), (1, 2), (2, 1), (3, 3)] {
            matrix[[row, col]] = Complex64::new(1.0, 0.0);
        }
        Gate::fixed(matrix)
    }
}
