//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Failures outside the catalog itself: talking to the terminal.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Reading menu input or writing output failed
    #[error("terminal I/O failed: {context}")]
    Terminal {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn terminal(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Terminal {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
