//! Two-phase catalog loader.
//!
//! Phase one parses every raw record into a staging batch without looking
//! at other records. Phase two checks each candidate's prerequisites against
//! the whole staging batch and inserts the survivors into a fresh index.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info, instrument};

use crate::domain::entities::{canonicalize, Course};
use crate::domain::error::RecordError;
use crate::domain::index::CourseIndex;
use crate::domain::record::RawRecord;

/// A rejected record: where it was and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub reason: RecordError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Result of one load attempt.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Freshly built index holding every accepted course
    pub index: CourseIndex,
    /// Number of courses inserted
    pub loaded: usize,
    /// Rejections, in input order
    pub diagnostics: Vec<Diagnostic>,
}

/// Parsed record waiting for prerequisite validation.
#[derive(Debug)]
struct Candidate {
    /// Position in the input sequence
    ordinal: usize,
    line: usize,
    course: Course,
}

/// Builds a [`CourseIndex`] from unvalidated records.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    staging: Vec<Candidate>,
    /// Rejections keyed by input position, from both phases
    diagnostics: Vec<(usize, Diagnostic)>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both phases over `records` and return a new index.
    ///
    /// Never fails: bad records are skipped and reported in the outcome.
    #[instrument(level = "debug", skip_all)]
    pub fn load<I>(&mut self, records: I) -> LoadOutcome
    where
        I: IntoIterator<Item = RawRecord>,
    {
        // Reset state for a fresh load
        self.staging.clear();
        self.diagnostics.clear();

        for (ordinal, record) in records.into_iter().enumerate() {
            self.stage(ordinal, record);
        }
        debug!("parse phase: {} candidates staged", self.staging.len());

        let (index, loaded) = self.validate();
        debug!("validation phase: {} courses inserted", loaded);

        // Input order
        let mut rejections = std::mem::take(&mut self.diagnostics);
        rejections.sort_by_key(|(ordinal, _)| *ordinal);
        let diagnostics: Vec<Diagnostic> = rejections.into_iter().map(|(_, d)| d).collect();
        info!(
            loaded,
            rejected = diagnostics.len(),
            "catalog load finished"
        );

        LoadOutcome {
            index,
            loaded,
            diagnostics,
        }
    }

    /// Parse phase: structural checks on a single record.
    fn stage(&mut self, ordinal: usize, record: RawRecord) {
        match parse_candidate(&record) {
            Ok(course) => self.staging.push(Candidate {
                ordinal,
                line: record.line,
                course,
            }),
            Err(reason) => self.reject(ordinal, record.line, reason),
        }
    }

    /// Validation phase: every prerequisite must name some staged course.
    fn validate(&mut self) -> (CourseIndex, usize) {
        let known: HashSet<String> = self
            .staging
            .iter()
            .map(|c| c.course.id().to_string())
            .collect();

        let mut index = CourseIndex::new();
        let mut loaded = 0;

        for candidate in std::mem::take(&mut self.staging) {
            let missing = candidate
                .course
                .prerequisites()
                .iter()
                .find(|p| !known.contains(p.as_str()))
                .cloned();

            match missing {
                Some(missing) => {
                    let id = candidate.course.id().to_string();
                    self.reject(
                        candidate.ordinal,
                        candidate.line,
                        RecordError::UnresolvedPrerequisite { id, missing },
                    );
                }
                None => {
                    index.insert(candidate.course);
                    loaded += 1;
                }
            }
        }

        (index, loaded)
    }

    fn reject(&mut self, ordinal: usize, line: usize, reason: RecordError) {
        debug!("line {} skipped: {}", line, reason);
        self.diagnostics.push((ordinal, Diagnostic { line, reason }));
    }
}

/// Turn one raw record into a course, or say why it cannot be one.
///
/// Identifiers and prerequisites are canonicalized; empty prerequisite
/// fields are dropped.
pub fn parse_candidate(record: &RawRecord) -> Result<Course, RecordError> {
    let fields = &record.fields;
    if fields.len() < 2 {
        return Err(RecordError::MalformedRecord);
    }

    let (id, name) = (fields[0].as_str(), fields[1].as_str());
    if id.is_empty() {
        return Err(RecordError::EmptyIdentifier {
            name: (!name.is_empty()).then(|| name.to_string()),
        });
    }
    if name.is_empty() {
        return Err(RecordError::EmptyName {
            id: canonicalize(id),
        });
    }

    let prerequisites = fields[2..].iter().filter(|p| !p.is_empty());
    Ok(Course::new(id, name, prerequisites))
}
