//! Global unitary folding.
//!
//! A circuit `U` is replaced by `U (U† U)^n` followed by a partial fold of its
//! last `r` operations, where `s - 1 = 2n + r`. Gates are inverted through
//! their adjoint; channels are replayed unchanged in both directions so that
//! every replay adds another dose of physical noise.

use crate::circuit::operation::Operation;
use crate::circuit::trace::CircuitTrace;
use crate::core::errors::FoldError;
use tracing::debug;

/// Largest operation count a folded trace may allocate.
const MAX_OPERATIONS: usize = isize::MAX as usize / std::mem::size_of::<Operation>();

/// How a scale factor splits into whole folds and a trailing partial fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoldPlan {
    /// Number of complete `U† U` pairs appended.
    pub full_folds: usize,
    /// Number of trailing operations folded once more.
    pub tail: usize,
}

impl FoldPlan {
    /// Splits `scale_factor - 1` into `2n + r`.
    ///
    /// A fractional remainder is rounded to the nearest whole operation count.
    /// Factors whose fold count does not fit in `usize` are rejected.
    pub fn new(scale_factor: f64) -> Result<Self, FoldError> {
        if !scale_factor.is_finite() || scale_factor < 1.0 {
            return Err(FoldError::InvalidScaleFactor(scale_factor));
        }

        let excess = scale_factor - 1.0;
        let full_folds = (excess / 2.0).floor();
        if full_folds >= usize::MAX as f64 {
            return Err(FoldError::ScaleFactorTooLarge(scale_factor));
        }
        let remainder = excess - 2.0 * full_folds;

        Ok(Self {
            full_folds: full_folds as usize,
            tail: remainder.round() as usize,
        })
    }

    /// Length of the folded sequence for a trace of `len` operations, or
    /// `None` if it overflows `usize`.
    pub fn folded_len(&self, len: usize) -> Option<usize> {
        let replays = self.full_folds.checked_mul(2)?.checked_mul(len)?;
        let tail = self.tail.min(len).checked_mul(2)?;
        len.checked_add(replays)?.checked_add(tail)
    }
}

/// Folds `trace` so that its noise is amplified by roughly `scale_factor`.
///
/// The measurement is carried over untouched. `scale_factor == 1` returns a
/// copy of the trace, and so does any valid factor on an empty trace.
///
/// # Errors
///
/// - `InvalidScaleFactor` if `scale_factor` is below 1 or not finite.
/// - `ScaleFactorTooLarge` if the folded sequence cannot be held in memory.
pub fn fold(trace: &CircuitTrace, scale_factor: f64) -> Result<CircuitTrace, FoldError> {
    let original = trace.operations();
    let plan = FoldPlan::new(scale_factor);
    if original.is_empty() && !matches!(plan, Err(FoldError::InvalidScaleFactor(_))) {
        return Ok(trace.clone());
    }
    let plan = plan?;

    let capacity = plan
        .folded_len(original.len())
        .filter(|&n| n <= MAX_OPERATIONS)
        .ok_or(FoldError::ScaleFactorTooLarge(scale_factor))?;
    let mut ops = Vec::with_capacity(capacity);
    ops.extend_from_slice(original);

    for _ in 0..plan.full_folds {
        ops.extend(reversed_adjoint(original));
        ops.extend_from_slice(original);
    }

    let tail = plan.tail.min(original.len());
    if tail > 0 {
        let last_layers = &original[original.len() - tail..];
        ops.extend(reversed_adjoint(last_layers));
        ops.extend_from_slice(last_layers);
    }

    debug!(
        scale_factor,
        full_folds = plan.full_folds,
        tail,
        original_len = original.len(),
        folded_len = ops.len(),
        "folded circuit"
    );

    Ok(trace.with_operations(ops))
}

/// Operations in reverse order, gates replaced by their adjoints.
fn reversed_adjoint(ops: &[Operation]) -> impl Iterator<Item = Operation> + '_ {
    ops.iter()
        .rev()
        .map(|op| op.adjoint().unwrap_or_else(|| op.clone()))
}
