//! Ready-made two-qubit circuits, all measured on ⟨Z₀Z₁⟩.

use crate::circuit::{CircuitBuilder, GateOp};
use crate::core::{Observable, QuantumChannel};
use std::f64::consts::FRAC_PI_2;

fn zz() -> Observable {
    Observable::z(0).tensor(Observable::z(1))
}

/// Bell-state preparation: H on wire 0, then CNOT(0, 1).
pub fn bell_state(c: &mut CircuitBuilder) {
    c.h(0).cnot(0, 1);
    c.expval(zz());
}

/// Bell-state preparation followed by `channel` on both wires.
pub fn noisy_bell_state(channel: &QuantumChannel) -> impl Fn(&mut CircuitBuilder) + '_ {
    move |c| {
        c.h(0)
            .cnot(0, 1)
            .channel(channel, &[0])
            .channel(channel, &[1]);
        c.expval(zz());
    }
}

/// Two-qubit Hamiltonian ansatz built from RY, SX and CZ layers.
pub fn hamiltonian_ansatz(c: &mut CircuitBuilder) {
    c.ry(0, -FRAC_PI_2)
        .adjoint(GateOp::sx(1))
        .adjoint(GateOp::sx(0))
        .ry(1, -FRAC_PI_2)
        .ry(0, FRAC_PI_2)
        .cz(0, 1)
        .adjoint(GateOp::sx(0))
        .ry(1, FRAC_PI_2)
        .ry(0, -FRAC_PI_2)
        .sx(1)
        .sx(0)
        .ry(1, -FRAC_PI_2)
        .ry(0, 0.0)
        .cz(0, 1)
        .rx(0, 0.0)
        .ry(1, FRAC_PI_2);
    c.expval(zz());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitTrace;

    #[test]
    fn library_circuits_record() {
        let bell = CircuitTrace::record(bell_state).unwrap();
        assert_eq!(bell.len(), 2);

        let ansatz = CircuitTrace::record(hamiltonian_ansatz).unwrap();
        assert_eq!(ansatz.len(), 16);
        assert_eq!(ansatz.operations().iter().filter(|op| op.is_adjoint()).count(), 3);

        let depol = QuantumChannel::depolarizing(0.1).unwrap();
        let noisy = CircuitTrace::record(noisy_bell_state(&depol)).unwrap();
        assert_eq!(noisy.len(), 4);
        assert_eq!(noisy.channel_count(), 2);
    }
}
