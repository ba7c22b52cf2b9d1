use crate::circuit::operation::Operation;
use crate::circuit::trace::CircuitTrace;
use crate::core::Measurement;

/// A backend that can replay circuit operations on a fixed-size register.
///
/// Implementations may be noisy. One instance must not be shared between
/// concurrent executions.
pub trait Executor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the register to its initial state.
    fn reset(&mut self);

    /// Applies one operation to the register.
    fn apply(&mut self, op: &Operation) -> Result<(), Self::Error>;

    /// Evaluates a measurement on the current register.
    fn measure(&mut self, measurement: &Measurement) -> Result<f64, Self::Error>;
}

/// Rebuilds a circuit from `operations` on `executor` and evaluates `measurement`.
///
/// Every call is a fresh execution; backend errors are returned as-is.
pub fn execute<E: Executor + ?Sized>(
    executor: &mut E,
    operations: &[Operation],
    measurement: &Measurement,
) -> Result<f64, E::Error> {
    executor.reset();
    for op in operations {
        executor.apply(op)?;
    }
    executor.measure(measurement)
}

impl CircuitTrace {
    /// Executes the trace using its first measurement.
    pub fn run<E: Executor + ?Sized>(&self, executor: &mut E) -> Result<f64, E::Error> {
        execute(executor, self.operations(), self.measurement())
    }
}
