use crate::core::{Gate, QuantumChannel};
use std::fmt;

/// Unitary gate kinds understood by the circuit layer.
#[derive(Clone, Debug, PartialEq)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    T,
    SX,
    RX(f64),
    RY(f64),
    RZ(f64),
    CNOT,
    CZ,
    SWAP,
    Unitary(Gate),
}

impl GateKind {
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "Hadamard",
            GateKind::X => "PauliX",
            GateKind::Y => "PauliY",
            GateKind::Z => "PauliZ",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::SX => "SX",
            GateKind::RX(_) => "RX",
            GateKind::RY(_) => "RY",
            GateKind::RZ(_) => "RZ",
            GateKind::CNOT => "CNOT",
            GateKind::CZ => "CZ",
            GateKind::SWAP => "SWAP",
            GateKind::Unitary(_) => "QubitUnitary",
        }
    }

    /// Rotation angle, for parametrized kinds.
    pub fn parameter(&self) -> Option<f64> {
        match self {
            GateKind::RX(theta) | GateKind::RY(theta) | GateKind::RZ(theta) => Some(*theta),
            _ => None,
        }
    }

    fn gate(&self) -> Gate {
        match self {
            GateKind::H => Gate::h(),
            GateKind::X => Gate::x(),
            GateKind::Y => Gate::y(),
            GateKind::Z => Gate::z(),
            GateKind::S => Gate::s(),
            GateKind::T => Gate::t_gate(),
            GateKind::SX => Gate::sx(),
            GateKind::RX(theta) => Gate::rx(*theta),
            GateKind::RY(theta) => Gate::ry(*theta),
            GateKind::RZ(theta) => Gate::rz(*theta),
            GateKind::CNOT => Gate::cnot(),
            GateKind::CZ => Gate::cz(),
            GateKind::SWAP => Gate::swap(),
            GateKind::Unitary(gate) => gate.clone(),
        }
    }
}

/// A unitary gate placed on wires, possibly wrapped in an adjoint marker.
#[derive(Clone, Debug, PartialEq)]
pub struct GateOp {
    kind: GateKind,
    wires: Vec<usize>,
    adjoint: bool,
}

impl GateOp {
    pub fn new(kind: GateKind, wires: &[usize]) -> Self {
        Self {
            kind,
            wires: wires.to_vec(),
            adjoint: false,
        }
    }

    pub fn sx(wire: usize) -> Self {
        Self::new(GateKind::SX, &[wire])
    }

    pub fn cnot(control: usize, target: usize) -> Self {
        Self::new(GateKind::CNOT, &[control, target])
    }

    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    pub fn wires(&self) -> &[usize] {
        &self.wires
    }

    pub fn is_adjoint(&self) -> bool {
        self.adjoint
    }

    /// Adjoint of this gate; applying the adjoint twice gives back the original.
    pub fn adjoint(&self) -> GateOp {
        GateOp {
            kind: self.kind.clone(),
            wires: self.wires.clone(),
            adjoint: !self.adjoint,
        }
    }

    /// Matrix acting on `wires()`, with the adjoint marker resolved.
    pub fn gate(&self) -> Gate {
        let gate = self.kind.gate();
        if self.adjoint { gate.adjoint() } else { gate }
    }
}

/// A noise channel placed on wires.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelOp {
    channel: QuantumChannel,
    wires: Vec<usize>,
}

impl ChannelOp {
    pub fn new(channel: QuantumChannel, wires: &[usize]) -> Self {
        Self {
            channel,
            wires: wires.to_vec(),
        }
    }

    pub fn channel(&self) -> &QuantumChannel {
        &self.channel
    }

    pub fn wires(&self) -> &[usize] {
        &self.wires
    }
}

/// One step of a circuit: either a reversible gate or an irreversible channel.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Gate(GateOp),
    Channel(ChannelOp),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Gate(op) => op.kind().name(),
            Operation::Channel(_) => "QubitChannel",
        }
    }

    pub fn wires(&self) -> &[usize] {
        match self {
            Operation::Gate(op) => op.wires(),
            Operation::Channel(op) => op.wires(),
        }
    }

    pub fn is_reversible(&self) -> bool {
        matches!(self, Operation::Gate(_))
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, Operation::Channel(_))
    }

    /// True when the operation carries an adjoint marker. Channels never do.
    pub fn is_adjoint(&self) -> bool {
        match self {
            Operation::Gate(op) => op.is_adjoint(),
            Operation::Channel(_) => false,
        }
    }

    /// The inverse operation, or `None` for channels.
    pub fn adjoint(&self) -> Option<Operation> {
        match self {
            Operation::Gate(op) => Some(Operation::Gate(op.adjoint())),
            Operation::Channel(_) => None,
        }
    }
}

impl From<GateOp> for Operation {
    fn from(op: GateOp) -> Self {
        Operation::Gate(op)
    }
}

impl From<ChannelOp> for Operation {
    fn from(op: ChannelOp) -> Self {
        Operation::Channel(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = match self {
            Operation::Gate(op) => op
                .kind()
                .parameter()
                .map(|theta| format!("({theta})"))
                .unwrap_or_default(),
            Operation::Channel(_) => String::new(),
        };
        let wires: Vec<String> = self.wires().iter().map(|w| w.to_string()).collect();
        write!(f, "{}{}", self.name(), params)?;
        if self.is_adjoint() {
            write!(f, "†")?;
        }
        write!(f, "[{}]", wires.join(","))
    }
}
