mod channels;
pub mod errors;
mod gates;
mod observables;
mod state;
pub mod utils;

pub use channels::QuantumChannel;
pub use gates::Gate;
pub use observables::{Measurement, Observable, Pauli};
pub use state::QuantumState;
