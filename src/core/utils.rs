//! Utility functions for quantum operations.
//!
//! This module contains helper functions for:
//! - Matrix operations (Kronecker product, trace, conjugate transpose).
//! - Operator expansion to larger systems.
//! - Completeness checks for channels.
//! - Bit manipulation for state indices.

use ndarray::{Array2, Axis};
use num_complex::Complex64;

/// Computes the Kronecker (Tensor) product of two matrices.
///
/// If `A` is an $m \times n$ matrix and `B` is a $p \times q$ matrix,
/// the result is an $mp \times nq$ matrix.
pub fn kronecker_product(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (m, n) = a.dim();
    let (p, q) = b.dim();

    // A as (m, 1, n, 1), B as (1, p, 1, q)
    let a_expanded = a.view().insert_axis(Axis(1)).insert_axis(Axis(3));
    let b_expanded = b.view().insert_axis(Axis(0)).insert_axis(Axis(2));

    // Broadcast multiply -> (m, p, n, q), owned and contiguous
    let tensor_product = &a_expanded * &b_expanded;

    let mut out = Array2::<Complex64>::zeros((m * p, n * q));
    for ((i, k, j, l), v) in tensor_product.indexed_iter() {
        out[[i * p + k, j * q + l]] = *v;
    }
    out
}

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace(matrix: &Array2<Complex64>) -> Complex64 {
    matrix.diag().sum()
}

/// Conjugate transpose of a matrix.
pub fn dagger(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().mapv(|c| c.conj())
}

/// Generates the full operator matrix ($2^N \times 2^N$) for the whole system.
///
/// It expands a local operator acting on `targets` (and controlled by `controls`)
/// to an operator on the full system of `num_total_qubits`. Local bit `i` of the
/// operator's index maps to qubit `targets[i]`.
pub fn expand_operator(
    num_total_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    controls: &[usize],
) -> Array2<Complex64> {
    let dim = 1 << num_total_qubits;
    let mut full_matrix = Array2::<Complex64>::zeros((dim, dim));

    let mut control_mask = 0usize;
    for &c in controls {
        control_mask |= 1 << c;
    }
    let mut target_mask = 0usize;
    for &t in targets {
        target_mask |= 1 << t;
    }
    // Bits outside the targets are left untouched
    let passive_mask = !target_mask;

    for col_idx in 0..dim {
        // Basis state with some control at 0: identity
        if (col_idx & control_mask) != control_mask {
            full_matrix[[col_idx, col_idx]] = Complex64::new(1.0, 0.0);
            continue;
        }

        let small_col = extract_bits(col_idx, targets);
        for small_row in 0..matrix.nrows() {
            let val = matrix[[small_row, small_col]];
            if val.norm_sqr() < f64::EPSILON {
                continue;
            }
            let new_target_bits = deposit_bits(small_row, targets);
            let row_idx = (col_idx & passive_mask) | new_target_bits;
            full_matrix[[row_idx, col_idx]] = val;
        }
    }
    full_matrix
}

/// Extracs the bits in positions `indices` of the sequence `value`
fn extract_bits(value: usize, indices: &[usize]) -> usize {
    let mut result = 0;
    for (i, &pos) in indices.iter().enumerate() {
        if (value >> pos) & 1 == 1 {
            result |= 1 << i;
        }
    }
    result
}

/// Scatters bits from `compact_value` into the positions specified by `indices`.
fn deposit_bits(compact_value: usize, indices: &[usize]) -> usize {
    let mut result = 0;
    for (i, &pos) in indices.iter().enumerate() {
        if (compact_value >> i) & 1 == 1 {
            result |= 1 << pos;
        }
    }
    result
}

/// Find duplicate in a slice of usize
pub fn find_duplicate(indices: &[usize]) -> Option<usize> {
    let mut seen = std::collections::HashSet::new();
    indices.iter().find(|&&idx| !seen.insert(idx)).copied()
}

/// Checks completeness relation for Kraus operators.
///
/// Verifies if $\sum K_k^\dagger K_k = I$.
pub fn check_completeness(ops: &[Array2<Complex64>], dim: usize) -> bool {
    let eye = Array2::<Complex64>::eye(dim);
    let sum = ops
        .iter()
        .fold(Array2::<Complex64>::zeros((dim, dim)), |acc, op| {
            acc + dagger(op).dot(op)
        });
    sum.iter()
        .zip(eye.iter())
        .all(|(a, b)| (a - b).norm() < 1e-9)
}
