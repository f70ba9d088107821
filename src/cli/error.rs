//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) => match e {
                InfraError::Terminal { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::SourceUnavailable { .. } => crate::exitcode::NOINPUT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Domain(DomainError::EmptyCatalog { .. }) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::Domain(DomainError::CourseNotFound(_)) => {
                        crate::exitcode::NOT_FOUND
                    }
                },
            },
        }
    }
}
