pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod history;
pub mod metrics;
pub mod monitor;
pub mod render;
pub mod select;
pub mod trends;
pub mod tui;

pub use config::Config;
pub use engine::{InterfaceState, InterfaceView, TelemetryEngine};
pub use error::{Error, Result};
pub use format::format_bytes;
pub use history::RollingHistory;
pub use render::{Graph, GraphRenderer};
