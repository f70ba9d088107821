//! Domain entities: core data structures

use std::fmt;

/// A course in the catalog.
///
/// Constructed once by the loader from a validated record and then handed
/// by value to the index, which owns it from that point on. Fields are
/// read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: String,
    name: String,
    prerequisites: Vec<String>,
}

impl Course {
    /// Create a course, canonicalizing the identifier and every prerequisite.
    ///
    /// The name is kept verbatim.
    pub fn new<I, S>(id: &str, name: impl Into<String>, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: canonicalize(id),
            name: name.into(),
            prerequisites: prerequisites
                .into_iter()
                .map(|p| canonicalize(p.as_ref()))
                .collect(),
        }
    }

    /// Canonical (uppercase) course number, e.g. `CSCI101`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, exactly as it appeared in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical prerequisite course numbers, in source order.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.id, self.name)
    }
}

/// Case-fold a course number to its canonical uppercase form.
///
/// Used for storage and for every comparison against stored identifiers.
pub fn canonicalize(id: &str) -> String {
    id.to_uppercase()
}
