use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Counter source error: {0}")]
    Source(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("Engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, Error>;
