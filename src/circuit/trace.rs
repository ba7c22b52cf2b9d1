use crate::circuit::operation::{ChannelOp, GateKind, GateOp, Operation};
use crate::core::errors::TraceError;
use crate::core::{Gate, Measurement, Observable, QuantumChannel};

/// Records operations and measurements while a circuit procedure runs.
///
/// Methods return `&mut Self` so calls can be chained:
///
/// ```
/// use qzne::{CircuitTrace, Observable};
///
/// let trace = CircuitTrace::record(|c| {
///     c.h(0).cnot(0, 1);
///     c.expval(Observable::z(0).tensor(Observable::z(1)));
/// })
/// .unwrap();
/// assert_eq!(trace.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    operations: Vec<Operation>,
    measurements: Vec<Measurement>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, op: impl Into<Operation>) -> &mut Self {
        self.operations.push(op.into());
        self
    }

    pub fn gate(&mut self, kind: GateKind, wires: &[usize]) -> &mut Self {
        self.apply(GateOp::new(kind, wires))
    }

    /// Appends the adjoint of `op`.
    pub fn adjoint(&mut self, op: GateOp) -> &mut Self {
        self.apply(op.adjoint())
    }

    pub fn h(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::H, &[wire])
    }

    pub fn x(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::X, &[wire])
    }

    pub fn y(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::Y, &[wire])
    }

    pub fn z(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::Z, &[wire])
    }

    pub fn s(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::S, &[wire])
    }

    pub fn t(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::T, &[wire])
    }

    pub fn sx(&mut self, wire: usize) -> &mut Self {
        self.gate(GateKind::SX, &[wire])
    }

    pub fn rx(&mut self, wire: usize, theta: f64) -> &mut Self {
        self.gate(GateKind::RX(theta), &[wire])
    }

    pub fn ry(&mut self, wire: usize, theta: f64) -> &mut Self {
        self.gate(GateKind::RY(theta), &[wire])
    }

    pub fn rz(&mut self, wire: usize, theta: f64) -> &mut Self {
        self.gate(GateKind::RZ(theta), &[wire])
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> &mut Self {
        self.gate(GateKind::CNOT, &[control, target])
    }

    pub fn cz(&mut self, a: usize, b: usize) -> &mut Self {
        self.gate(GateKind::CZ, &[a, b])
    }

    pub fn swap(&mut self, a: usize, b: usize) -> &mut Self {
        self.gate(GateKind::SWAP, &[a, b])
    }

    pub fn unitary(&mut self, gate: Gate, wires: &[usize]) -> &mut Self {
        self.gate(GateKind::Unitary(gate), wires)
    }

    pub fn channel(&mut self, channel: &QuantumChannel, wires: &[usize]) -> &mut Self {
        self.apply(ChannelOp::new(channel.clone(), wires))
    }

    pub fn measure(&mut self, measurement: Measurement) -> &mut Self {
        self.measurements.push(measurement);
        self
    }

    pub fn expval(&mut self, observable: Observable) -> &mut Self {
        self.measure(Measurement::Expectation(observable))
    }

    pub fn var(&mut self, observable: Observable) -> &mut Self {
        self.measure(Measurement::Variance(observable))
    }

    pub fn finish(self) -> Result<CircuitTrace, TraceError> {
        CircuitTrace::new(self.operations, self.measurements)
    }
}

/// Immutable record of a circuit: its operations and terminal measurements.
#[derive(Clone, Debug, PartialEq)]
pub struct CircuitTrace {
    operations: Vec<Operation>,
    measurements: Vec<Measurement>,
}

impl CircuitTrace {
    pub fn new(
        operations: Vec<Operation>,
        measurements: Vec<Measurement>,
    ) -> Result<Self, TraceError> {
        if measurements.is_empty() {
            return Err(TraceError::MissingMeasurement);
        }
        Ok(Self {
            operations,
            measurements,
        })
    }

    /// Runs a circuit procedure once against a fresh builder and captures
    /// what it recorded.
    pub fn record<F>(build: F) -> Result<Self, TraceError>
    where
        F: FnOnce(&mut CircuitBuilder),
    {
        let mut builder = CircuitBuilder::new();
        build(&mut builder);
        builder.finish()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The measurement used on execution. Later measurements are kept but ignored.
    pub fn measurement(&self) -> &Measurement {
        &self.measurements[0]
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of channel operations in the trace.
    pub fn channel_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_channel()).count()
    }

    /// Smallest register that holds every wire the trace touches.
    pub fn num_wires(&self) -> usize {
        let op_wires = self.operations.iter().flat_map(|op| op.wires().iter());
        let obs_wires = self
            .measurements
            .iter()
            .flat_map(|m| m.observable().wires());
        op_wires
            .copied()
            .chain(obs_wires)
            .max()
            .map_or(0, |w| w + 1)
    }

    /// Same measurements, new operation sequence.
    pub(crate) fn with_operations(&self, operations: Vec<Operation>) -> Self {
        Self {
            operations,
            measurements: self.measurements.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_captures_operations_in_order() {
        let trace = CircuitTrace::record(|c| {
            c.h(0).cnot(0, 1).rz(1, 0.25);
            c.expval(Observable::z(1));
        })
        .unwrap();

        let names: Vec<&str> = trace.operations().iter().map(|op| op.name()).collect();
        assert_eq!(names, vec!["Hadamard", "CNOT", "RZ"]);
        assert_eq!(trace.num_wires(), 2);
    }

    #[test]
    fn missing_measurement_is_an_error() {
        let res = CircuitTrace::record(|c| {
            c.h(0);
        });
        assert_eq!(res, Err(TraceError::MissingMeasurement));
    }

    #[test]
    fn first_measurement_wins() {
        let trace = CircuitTrace::record(|c| {
            c.x(0);
            c.expval(Observable::z(0)).var(Observable::x(0));
        })
        .unwrap();
        assert_eq!(trace.measurements().len(), 2);
        assert_eq!(trace.measurement(), &Measurement::Expectation(Observable::z(0)));
    }

    #[test]
    fn counts_channels() {
        let depol = QuantumChannel::depolarizing(0.1).unwrap();
        let trace = CircuitTrace::record(|c| {
            c.h(0).channel(&depol, &[0]).channel(&depol, &[3]);
            c.expval(Observable::z(0));
        })
        .unwrap();
        assert_eq!(trace.channel_count(), 2);
        assert_eq!(trace.num_wires(), 4);
    }
}
