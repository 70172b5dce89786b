use std::fmt;

/// Result type for agdiff-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
///
/// Comparison and classification are total; only analyzer setup can fail.
#[derive(Debug)]
pub enum Error {
    /// Analyzer configuration is unusable
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
