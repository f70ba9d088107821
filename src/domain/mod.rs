//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod index;
pub mod loader;
pub mod record;

pub use entities::{canonicalize, Course};
pub use error::{DomainError, DomainResult, RecordError};
pub use index::{CourseIndex, InOrderIter};
pub use loader::{parse_candidate, CatalogLoader, Diagnostic, LoadOutcome};
pub use record::{parse_records, split_fields, RawRecord};
