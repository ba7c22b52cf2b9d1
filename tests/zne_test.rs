//! End-to-end behaviour: simulated expectation values, folding on a noisy
//! backend and zero-noise recovery.

use approx::assert_abs_diff_eq;
use qzne::errors::{FoldError, StateError, ZneError};
use qzne::library::{bell_state, hamiltonian_ansatz, noisy_bell_state};
use qzne::{
    CircuitTrace, DensityMatrixExecutor, Extrapolation, QuantumChannel, RecordTable, ZneConfig,
    exponential_extrapolation, fold, linear_extrapolation, make_record, mitigate_with_zne,
};

fn run_noisy_bell(p: f64, scale_factor: f64) -> f64 {
    let depol = QuantumChannel::depolarizing(p).unwrap();
    let trace = CircuitTrace::record(noisy_bell_state(&depol)).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);
    fold(&trace, scale_factor).unwrap().run(&mut dev).unwrap()
}

/// Per-channel shrink factor of a Z expectation under depolarizing noise.
fn lambda(p: f64) -> f64 {
    1.0 - 4.0 * p / 3.0
}

// ---------------------------------------------------------------------------
// Noisy Bell state
// ---------------------------------------------------------------------------

#[test]
fn noisy_bell_state_expectations() {
    let cases = [
        (0.0, 1.0),
        (0.001, 0.997335),
        (0.01, 0.973511),
        (0.1, 0.751111),
        (0.2, 0.537778),
    ];
    for (p, expected) in cases {
        assert_abs_diff_eq!(run_noisy_bell(p, 1.0), expected, epsilon = 1e-5);
    }
    assert_abs_diff_eq!(run_noisy_bell(0.0, 1.0), 1.0, epsilon = 1e-12);
}

#[test]
fn folding_noiseless_circuit_preserves_expectation() {
    let trace = CircuitTrace::record(bell_state).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);
    let reference = trace.run(&mut dev).unwrap();
    for s in [2.0, 3.0, 5.0] {
        let folded = fold(&trace, s).unwrap().run(&mut dev).unwrap();
        assert_abs_diff_eq!(folded, reference, epsilon = 1e-10);
    }
}

#[test]
fn folding_ansatz_preserves_expectation() {
    let trace = CircuitTrace::record(hamiltonian_ansatz).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);
    let reference = trace.run(&mut dev).unwrap();
    for s in [2.0, 3.0, 4.0] {
        let folded = fold(&trace, s).unwrap().run(&mut dev).unwrap();
        assert_abs_diff_eq!(folded, reference, epsilon = 1e-10);
    }
}

#[test]
fn folding_amplifies_depolarizing_noise() {
    // Each fold replays both channels once more in each direction
    let p = 0.1;
    for s in [1.0, 2.0, 3.0, 5.0] {
        let expected = lambda(p).powf(2.0 * s);
        assert_abs_diff_eq!(run_noisy_bell(p, s), expected, epsilon = 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Extrapolation on known curves
// ---------------------------------------------------------------------------

#[test]
fn linear_recovers_ground_truth_at_odd_factors() {
    let (a, b) = (0.83, -0.041);
    let x = [1.0, 3.0, 5.0];
    let y: Vec<f64> = x.iter().map(|v| a + b * v).collect();
    assert_abs_diff_eq!(linear_extrapolation(&x, &y).unwrap(), a, epsilon = 1e-9);
}

#[test]
fn exponential_recovers_ground_truth() {
    let (amp, rate): (f64, f64) = (0.95, 0.4);
    let x = [1.0, 2.0, 4.0];
    let y: Vec<f64> = x.iter().map(|v| amp * (-rate * v).exp()).collect();
    assert_abs_diff_eq!(exponential_extrapolation(&x, &y).unwrap(), amp, epsilon = 1e-6);
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn exponential_zne_recovers_noiseless_bell_value() {
    let depol = QuantumChannel::depolarizing(0.1).unwrap();
    let trace = CircuitTrace::record(noisy_bell_state(&depol)).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);
    let config = ZneConfig::new()
        .with_scale_factors(vec![1.0, 2.0, 3.0])
        .with_extrapolation(Extrapolation::Exponential);

    let result = mitigate_with_zne(&mut dev, &trace, &config).unwrap();
    assert_eq!(result.samples.len(), 3);
    assert_abs_diff_eq!(result.unmitigated().unwrap(), 0.751111, epsilon = 1e-5);
    assert_abs_diff_eq!(result.value, 1.0, epsilon = 1e-6);
}

#[test]
fn mitigation_improves_on_raw_value() {
    let depol = QuantumChannel::depolarizing(0.05).unwrap();
    let trace = CircuitTrace::record(noisy_bell_state(&depol)).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);

    for method in [
        Extrapolation::Linear,
        Extrapolation::Polynomial(2),
        Extrapolation::Richardson,
    ] {
        let config = ZneConfig::new()
            .with_scale_factors(vec![1.0, 2.0, 3.0])
            .with_extrapolation(method);
        let result = mitigate_with_zne(&mut dev, &trace, &config).unwrap();
        let raw = result.unmitigated().unwrap();
        assert!(
            (1.0 - result.value).abs() < (1.0 - raw).abs(),
            "{method} did not improve on {raw}"
        );
    }
}

#[test]
fn records_tabulate_methods_and_noise_levels() {
    let mut table = RecordTable::new();
    for p in [0.05, 0.1] {
        let depol = QuantumChannel::depolarizing(p).unwrap();
        let trace = CircuitTrace::record(noisy_bell_state(&depol)).unwrap();
        let mut dev = DensityMatrixExecutor::new(2);
        for method in [Extrapolation::Linear, Extrapolation::Exponential] {
            let config = ZneConfig::new().with_extrapolation(method);
            let result = mitigate_with_zne(&mut dev, &trace, &config).unwrap();
            table.push(result.to_record(p));
        }
        table.push(make_record("unmitigated", p, 1.0, run_noisy_bell(p, 1.0)));
    }

    assert_eq!(table.len(), 6);
    assert_eq!(table.by_method("exponential").count(), 2);
    assert!(table.by_noise_strength(0.1).all(|r| r.scale_factor() >= 1.0));
    assert!(table.to_json().unwrap().contains("\"noise_strength\": 0.05"));
}

#[test]
fn executor_failure_aborts_pipeline() {
    let trace = CircuitTrace::record(bell_state).unwrap();
    let mut dev = DensityMatrixExecutor::new(1);
    let err = mitigate_with_zne(&mut dev, &trace, &ZneConfig::default()).unwrap_err();

    match err {
        ZneError::ExecutorFailure(source) => {
            let state_err = source.downcast_ref::<StateError>().unwrap();
            assert_eq!(
                *state_err,
                StateError::IndexOutOfBounds {
                    index: 1,
                    num_qubits: 1
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_scale_factor_aborts_pipeline() {
    let trace = CircuitTrace::record(bell_state).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);
    let config = ZneConfig::new().with_scale_factors(vec![1.0, 0.5]);
    assert!(matches!(
        mitigate_with_zne(&mut dev, &trace, &config),
        Err(ZneError::Fold(FoldError::InvalidScaleFactor(s))) if s == 0.5
    ));

    let empty = ZneConfig::new().with_scale_factors(vec![]);
    assert!(matches!(
        mitigate_with_zne(&mut dev, &trace, &empty),
        Err(ZneError::InvalidConfig(_))
    ));
}

#[test]
fn underdetermined_fit_aborts_pipeline() {
    let trace = CircuitTrace::record(bell_state).unwrap();
    let mut dev = DensityMatrixExecutor::new(2);
    let config = ZneConfig::new()
        .with_scale_factors(vec![1.0, 3.0])
        .with_extrapolation(Extrapolation::Polynomial(2));
    assert!(matches!(
        mitigate_with_zne(&mut dev, &trace, &config),
        Err(ZneError::Extrapolation(_))
    ));
}
