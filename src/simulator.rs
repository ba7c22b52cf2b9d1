use crate::circuit::{Executor, Operation};
use crate::core::errors::StateError;
use crate::core::{Measurement, QuantumState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mixed-state executor backed by a full density matrix.
///
/// Gates act as `ρ → UρU†` and channels as `ρ → Σ KρK†`, so noise channels
/// recorded in a circuit are simulated exactly. With `with_shots` the
/// expectation is estimated from sampled ±1 outcomes instead of computed
/// analytically.
#[derive(Debug, Clone)]
pub struct DensityMatrixExecutor {
    state: QuantumState,
    shots: Option<usize>,
    rng: StdRng,
}

impl DensityMatrixExecutor {
    /// Creates an analytic executor over `num_qubits` wires.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            state: QuantumState::new(num_qubits),
            shots: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Estimate measurements from `shots` samples.
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Seeds the sampler for reproducible shot noise.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits
    }

    pub fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Averages `shots` outcomes of a ±1-valued observable with mean `mean`.
    fn sample_mean(&mut self, mean: f64, shots: usize) -> f64 {
        if shots == 0 {
            return mean;
        }
        let p_plus = ((1.0 + mean) / 2.0).clamp(0.0, 1.0);
        let plus = (0..shots).filter(|_| self.rng.random_bool(p_plus)).count();
        (2.0 * plus as f64 - shots as f64) / shots as f64
    }
}

impl Executor for DensityMatrixExecutor {
    type Error = StateError;

    fn reset(&mut self) {
        self.state = QuantumState::new(self.state.num_qubits);
    }

    fn apply(&mut self, op: &Operation) -> Result<(), StateError> {
        match op {
            Operation::Gate(gate_op) => self.state.apply(&gate_op.gate(), gate_op.wires()),
            Operation::Channel(channel_op) => self
                .state
                .apply_channel(channel_op.channel(), channel_op.wires()),
        }
    }

    fn measure(&mut self, measurement: &Measurement) -> Result<f64, StateError> {
        let exact = self.state.expectation(measurement.observable())?;
        let mean = match self.shots {
            Some(shots) => self.sample_mean(exact, shots),
            None => exact,
        };

        Ok(match measurement {
            Measurement::Expectation(_) => mean,
            // Pauli strings square to the identity
            Measurement::Variance(_) => 1.0 - mean * mean,
        })
    }
}
