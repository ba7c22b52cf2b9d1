//! Folding properties: identity, length law, channel handling, validation.

use qzne::errors::FoldError;
use qzne::library::{bell_state, hamiltonian_ansatz, noisy_bell_state};
use qzne::{CircuitTrace, FoldPlan, Observable, QuantumChannel, fold};

fn noisy_trace() -> CircuitTrace {
    let depol = QuantumChannel::depolarizing(0.1).unwrap();
    CircuitTrace::record(noisy_bell_state(&depol)).unwrap()
}

// ---------------------------------------------------------------------------
// Identity and validation
// ---------------------------------------------------------------------------

#[test]
fn fold_by_one_is_identity() {
    for trace in [
        CircuitTrace::record(bell_state).unwrap(),
        CircuitTrace::record(hamiltonian_ansatz).unwrap(),
        noisy_trace(),
    ] {
        assert_eq!(fold(&trace, 1.0).unwrap(), trace);
    }
}

#[test]
fn scale_factor_below_one_is_rejected() {
    let trace = CircuitTrace::record(bell_state).unwrap();
    assert_eq!(fold(&trace, 0.5), Err(FoldError::InvalidScaleFactor(0.5)));
    assert_eq!(fold(&trace, -1.0), Err(FoldError::InvalidScaleFactor(-1.0)));
}

#[test]
fn oversized_scale_factor_is_an_error() {
    let trace = noisy_trace();
    assert_eq!(fold(&trace, 1e30), Err(FoldError::ScaleFactorTooLarge(1e30)));

    let empty = CircuitTrace::record(|c| {
        c.expval(Observable::z(0));
    })
    .unwrap();
    assert_eq!(fold(&empty, 1e30).unwrap(), empty);
}

#[test]
fn measurement_is_never_changed() {
    let trace = noisy_trace();
    for s in [1.0, 2.0, 3.0, 4.5, 7.0] {
        let folded = fold(&trace, s).unwrap();
        assert_eq!(folded.measurements(), trace.measurements());
    }
}

// ---------------------------------------------------------------------------
// Length law
// ---------------------------------------------------------------------------

#[test]
fn integer_scale_factors_follow_length_law() {
    let trace = CircuitTrace::record(hamiltonian_ansatz).unwrap();
    let n_ops = trace.len();

    for s in 1..=9usize {
        let (n, r) = ((s - 1) / 2, (s - 1) % 2);
        let folded = fold(&trace, s as f64).unwrap();
        assert_eq!(folded.len(), n_ops + 2 * n * n_ops + 2 * r, "scale factor {s}");
        assert_eq!(
            FoldPlan::new(s as f64).unwrap().folded_len(n_ops),
            Some(folded.len())
        );
    }
}

#[test]
fn folded_prefix_is_original_circuit() {
    let trace = CircuitTrace::record(hamiltonian_ansatz).unwrap();
    let folded = fold(&trace, 5.0).unwrap();
    assert_eq!(&folded.operations()[..trace.len()], trace.operations());
    // U†U pairs end with a forward copy
    assert_eq!(&folded.operations()[folded.len() - trace.len()..], trace.operations());
}

// ---------------------------------------------------------------------------
// Channel handling
// ---------------------------------------------------------------------------

#[test]
fn channels_are_replayed_not_inverted() {
    let trace = noisy_trace();
    let per_replay = trace.channel_count();

    for s in [1usize, 3, 5, 7] {
        let replays = s;
        let folded = fold(&trace, s as f64).unwrap();
        assert_eq!(folded.channel_count(), per_replay * replays);
        assert!(
            folded
                .operations()
                .iter()
                .filter(|op| op.is_channel())
                .all(|op| !op.is_adjoint())
        );
    }
}

#[test]
fn reverse_pass_adjoints_only_gates() {
    let trace = noisy_trace();
    let folded = fold(&trace, 3.0).unwrap();
    let reverse = &folded.operations()[trace.len()..2 * trace.len()];

    let rendered: Vec<String> = reverse.iter().map(|op| op.to_string()).collect();
    assert_eq!(
        rendered,
        vec!["QubitChannel[1]", "QubitChannel[0]", "CNOT†[0,1]", "Hadamard†[0]"]
    );
}

#[test]
fn partial_fold_of_channel_tail_repeats_the_channel() {
    let trace = noisy_trace();
    let folded = fold(&trace, 2.0).unwrap();
    let tail: Vec<String> = folded.operations()[trace.len()..]
        .iter()
        .map(|op| op.to_string())
        .collect();
    assert_eq!(tail, vec!["QubitChannel[1]", "QubitChannel[1]"]);
    assert_eq!(folded.channel_count(), 4);
}

#[test]
fn adjoint_count_grows_with_full_folds() {
    let trace = CircuitTrace::record(|c| {
        c.h(0).cnot(0, 1).rz(1, 0.3);
        c.expval(Observable::z(1));
    })
    .unwrap();
    let folded = fold(&trace, 5.0).unwrap();
    let adjoints = folded.operations().iter().filter(|op| op.is_adjoint()).count();
    assert_eq!(adjoints, 2 * trace.len());
}
