//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Reasons a single catalog record is rejected during a load.
///
/// These never abort a batch: the loader skips the offending record,
/// records a [`Diagnostic`](crate::domain::Diagnostic) and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid format (missing course number or name)")]
    MalformedRecord,

    #[error("course number is empty{}", name_hint(.name))]
    EmptyIdentifier { name: Option<String> },

    #[error("course name is empty (course number: {id})")]
    EmptyName { id: String },

    #[error("course {id} has invalid prerequisite: {missing}")]
    UnresolvedPrerequisite { id: String, missing: String },
}

fn name_hint(name: &Option<String>) -> String {
    match name {
        Some(n) => format!(" (course name: {})", n),
        None => String::new(),
    }
}

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no valid courses loaded ({rejected} records rejected)")]
    EmptyCatalog { rejected: usize },

    #[error("course {0} not found")]
    CourseNotFound(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
