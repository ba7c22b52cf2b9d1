//! Zero-noise extrapolation for noisy quantum circuits.
//!
//! A circuit is recorded once into a [`CircuitTrace`], folded at several
//! scale factors to amplify its noise, executed on an [`Executor`] and the
//! resulting expectation values are extrapolated back to the zero-noise
//! limit.

mod circuit;
mod core;
pub mod extrapolation;
pub mod library;
pub mod mitigation;
pub mod records;
mod simulator;

pub use crate::circuit::{
    ChannelOp, CircuitBuilder, CircuitTrace, Executor, FoldPlan, GateKind, GateOp, Operation,
    execute, fold,
};
pub use crate::core::{
    Gate, Measurement, Observable, Pauli, QuantumChannel, QuantumState, errors, utils,
};
pub use crate::extrapolation::{
    Extrapolation, exponential_extrapolation, linear_extrapolation, polynomial_extrapolation,
    richardson_extrapolation,
};
pub use crate::mitigation::{Sample, ZneConfig, ZneResult, mitigate_with_zne};
pub use crate::records::{Record, RecordTable, make_record};
pub use crate::simulator::DensityMatrixExecutor;
