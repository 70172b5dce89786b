//! Seam to the external reasoning service.
//!
//! The engine only ever talks to a [`ReasoningClient`]; concrete transports
//! (subprocess, HTTP) live in the runtime crate and test stubs live in
//! agdiff-testing.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Execution context handed to every reasoning call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningContext {
    pub working_directory: PathBuf,
    pub model: String,
    pub timeout: Duration,
}

impl ReasoningContext {
    pub fn new(working_directory: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            working_directory: working_directory.into(),
            model: model.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Synchronous, fallible access to an external reasoning service.
pub trait ReasoningClient {
    /// Submit a prompt and return the service's free-text reply.
    fn submit(
        &self,
        prompt: &str,
        context: &ReasoningContext,
    ) -> std::result::Result<String, ReasoningError>;
}

impl<T: ReasoningClient + ?Sized> ReasoningClient for &T {
    fn submit(
        &self,
        prompt: &str,
        context: &ReasoningContext,
    ) -> std::result::Result<String, ReasoningError> {
        (**self).submit(prompt, context)
    }
}

impl<T: ReasoningClient + ?Sized> ReasoningClient for Box<T> {
    fn submit(
        &self,
        prompt: &str,
        context: &ReasoningContext,
    ) -> std::result::Result<String, ReasoningError> {
        (**self).submit(prompt, context)
    }
}

/// Failures of the external reasoning call
#[derive(Debug)]
pub enum ReasoningError {
    /// Service could not be reached or is not configured
    Unavailable(String),

    /// Call exceeded the context timeout
    Timeout(Duration),

    /// Transport-level failure while talking to the service
    Transport(String),

    /// Service answered with a failure status
    Status { code: i32, message: String },

    /// Service answered successfully but with no text
    EmptyReply,

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for ReasoningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasoningError::Unavailable(msg) => write!(f, "Reasoning service unavailable: {}", msg),
            ReasoningError::Timeout(timeout) => {
                write!(f, "Reasoning call timed out after {}s", timeout.as_secs())
            }
            ReasoningError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ReasoningError::Status { code, message } => {
                write!(f, "Reasoning service failed with status {}: {}", code, message)
            }
            ReasoningError::EmptyReply => write!(f, "Reasoning service returned an empty reply"),
            ReasoningError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ReasoningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReasoningError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReasoningError {
    fn from(err: std::io::Error) -> Self {
        ReasoningError::Io(err)
    }
}
