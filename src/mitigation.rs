//! End-to-end zero-noise extrapolation: fold, execute, extrapolate.

use crate::circuit::{CircuitTrace, Executor, fold};
use crate::core::errors::{FoldError, ZneError};
use crate::extrapolation::Extrapolation;
use crate::records::{Record, make_record};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration for a zero-noise extrapolation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZneConfig {
    /// Scale factors to sample, each >= 1.
    pub scale_factors: Vec<f64>,
    /// Model used to reach the zero-noise limit.
    pub extrapolation: Extrapolation,
}

impl Default for ZneConfig {
    fn default() -> Self {
        Self {
            scale_factors: vec![1.0, 2.0, 3.0],
            extrapolation: Extrapolation::Richardson,
        }
    }
}

impl ZneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale_factors(mut self, factors: Vec<f64>) -> Self {
        self.scale_factors = factors;
        self
    }

    pub fn with_extrapolation(mut self, method: Extrapolation) -> Self {
        self.extrapolation = method;
        self
    }

    /// Checks that at least one factor is given and that every factor is a
    /// finite number >= 1.
    pub fn validate(&self) -> Result<(), ZneError> {
        if self.scale_factors.is_empty() {
            return Err(ZneError::InvalidConfig(
                "at least one scale factor is required".to_string(),
            ));
        }
        if let Some(&bad) = self
            .scale_factors
            .iter()
            .find(|s| !s.is_finite() || **s < 1.0)
        {
            return Err(FoldError::InvalidScaleFactor(bad).into());
        }
        Ok(())
    }
}

/// A measured value at one scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub scale_factor: f64,
    pub value: f64,
}

/// Outcome of [`mitigate_with_zne`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZneResult {
    pub method: Extrapolation,
    pub samples: Vec<Sample>,
    /// Extrapolated zero-noise value.
    pub value: f64,
}

impl ZneResult {
    /// Noisy value at scale factor 1, if it was sampled.
    pub fn unmitigated(&self) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.scale_factor == 1.0)
            .map(|s| s.value)
    }

    /// Summarizes the run as a record; the scale factor is the largest one sampled.
    /// The method is labelled by its display form, so polynomial orders stay apart.
    pub fn to_record(&self, noise_strength: f64) -> Record {
        let max_scale = self
            .samples
            .iter()
            .map(|s| s.scale_factor)
            .fold(1.0, f64::max);
        make_record(&self.method.to_string(), noise_strength, max_scale, self.value)
    }
}

/// Folds `trace` at every configured scale factor, runs each folded circuit
/// on `executor` and extrapolates the results to zero noise.
///
/// The first failure aborts the run; nothing is retried or defaulted.
pub fn mitigate_with_zne<E: Executor + ?Sized>(
    executor: &mut E,
    trace: &CircuitTrace,
    config: &ZneConfig,
) -> Result<ZneResult, ZneError> {
    config.validate()?;

    let mut samples = Vec::with_capacity(config.scale_factors.len());
    for &scale_factor in &config.scale_factors {
        let folded = fold(trace, scale_factor)?;
        let value = folded
            .run(executor)
            .map_err(|e| ZneError::ExecutorFailure(Box::new(e)))?;
        debug!(scale_factor, value, ops = folded.len(), "sampled folded circuit");
        samples.push(Sample {
            scale_factor,
            value,
        });
    }

    let x: Vec<f64> = samples.iter().map(|s| s.scale_factor).collect();
    let y: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let value = config.extrapolation.extrapolate(&x, &y)?;

    info!(
        method = %config.extrapolation,
        samples = samples.len(),
        value,
        "zero-noise extrapolation complete"
    );

    Ok(ZneResult {
        method: config.extrapolation,
        samples,
        value,
    })
}
