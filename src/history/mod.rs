pub mod buffer;
pub mod export;

pub use buffer::{RollingHistory, DEFAULT_CAPACITY};
pub use export::{export_history, export_to_csv, export_to_json};
