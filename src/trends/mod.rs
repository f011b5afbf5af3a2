pub mod types;

pub use types::{direction, TrendDirection};
