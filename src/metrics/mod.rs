pub mod network;
pub mod sampler;

pub use network::{CounterSource, NetworkMetrics};
pub use sampler::{compute, CounterSnapshot, InterfaceCounterSample};
