//! Circuit representation, folding and reconstruction.

mod execute;
mod fold;
mod operation;
mod trace;

pub use execute::{Executor, execute};
pub use fold::{FoldPlan, fold};
pub use operation::{ChannelOp, GateKind, GateOp, Operation};
pub use trace::{CircuitBuilder, CircuitTrace};
