use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions")]
    InvalidDimensions,

    #[error("Qubit {0} cannot be both control and target")]
    ControlTargetOverlap(usize),

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("Observable acts on no qubits")]
    EmptyObservable,

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Dimension mismatch")]
    DimensionMismatch {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Qubit index out of bounds")]
    IndexOutOfBounds { index: usize, num_qubits: usize },

    #[error("Measurement error: {0}")]
    MeasurementError(#[from] MeasurementError),

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),

    #[error("Channel error: {0}")]
    ChannelError(#[from] ChannelError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Channel must have at least one Kraus operator")]
    Empty,

    #[error("Kraus operators do not sum to Identity (Trace preserving relation failed)")]
    NotComplete,

    #[error("Invalid operator dimensions: Matrices must be square and 2^n")]
    InvalidDimensions,

    #[error("Dimension mismatch: All Kraus operators must have the same size")]
    OperatorSizeMismatch,

    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error("Circuit recorded no measurement")]
    MissingMeasurement,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FoldError {
    #[error("Invalid scale factor: {0}. Must be a finite number >= 1.0")]
    InvalidScaleFactor(f64),

    #[error("Scale factor {0} folds the circuit beyond addressable length")]
    ScaleFactorTooLarge(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtrapolationError {
    #[error("Sample count mismatch: {x} scale factors but {y} values")]
    LengthMismatch { x: usize, y: usize },

    #[error("Underdetermined fit: order {order} needs more than {order} distinct samples, got {distinct}")]
    UnderdeterminedFit { order: usize, distinct: usize },

    #[error("Cannot take the logarithm of non-positive value {0}")]
    NonPositiveValue(f64),

    #[error("Sample {0} is not a finite number")]
    NonFiniteSample(f64),

    #[error("Least-squares solve failed: {0}")]
    SolveFailed(&'static str),
}

/// Errors raised by the full fold-execute-extrapolate pipeline.
#[derive(Error, Debug)]
pub enum ZneError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Folding error: {0}")]
    Fold(#[from] FoldError),

    #[error("Extrapolation error: {0}")]
    Extrapolation(#[from] ExtrapolationError),

    #[error("Executor failure: {0}")]
    ExecutorFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}
