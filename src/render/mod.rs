pub mod console;
pub mod graph;

pub use console::{ConsoleReport, ConsoleSink};
pub use graph::{render, Graph, GraphRenderer, Plot};
