//! Error types for matbench

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Matbench error types
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration input was non-numeric or out of range
    #[error("Invalid configuration: {0}\nMatrix size and run count must be positive integers.")]
    InvalidConfig(String),

    /// Matrix Market file was malformed
    #[error("Matrix Market parse error: {0}")]
    MatrixMarket(String),

    /// IO error (results directory, CSV table, or matrix file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
