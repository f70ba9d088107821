//! Course catalog service
//!
//! Owns the live course index and decides, per load, whether the freshly
//! built index replaces it.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    parse_records, CatalogLoader, Course, CourseIndex, Diagnostic, DomainError, DomainResult,
    RawRecord,
};
use crate::infrastructure::traits::FileSystem;

/// Summary of one load attempt, as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Whether the new index replaced the live one
    pub accepted: bool,
    /// Number of courses inserted into the new index
    pub loaded: usize,
    /// Rejected records, in input order
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn rejected(&self) -> usize {
        self.diagnostics.len()
    }

    /// Turn an empty load into an error for callers that need data.
    pub fn ensure_loaded(&self) -> DomainResult<()> {
        if self.accepted {
            Ok(())
        } else {
            Err(DomainError::EmptyCatalog {
                rejected: self.rejected(),
            })
        }
    }
}

/// Service for loading and querying the course catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    delimiter: char,
    loader: CatalogLoader,
    live: Option<CourseIndex>,
}

impl CatalogService {
    /// Create a new catalog service with nothing loaded.
    pub fn new(fs: Arc<dyn FileSystem>, delimiter: char) -> Self {
        Self {
            fs,
            delimiter,
            loader: CatalogLoader::new(),
            live: None,
        }
    }

    /// Build a new index from `records` and make it live if it is non-empty.
    ///
    /// An empty result leaves the previous index, and its size, untouched.
    #[instrument(level = "debug", skip_all)]
    pub fn load_batch<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let outcome = self.loader.load(records);
        let accepted = !outcome.index.is_empty();

        if accepted {
            debug!(depth = outcome.index.depth(), "swapping in new index");
            self.live = Some(outcome.index);
        } else {
            info!("load produced no courses, previous index kept");
        }

        LoadReport {
            accepted,
            loaded: outcome.loaded,
            diagnostics: outcome.diagnostics,
        }
    }

    /// Read a catalog file and load it as one batch.
    ///
    /// A file that cannot be read is reported as an error and the live index
    /// stays as it was.
    #[instrument(level = "debug", skip(self))]
    pub fn load_file(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        info!("loading catalog {}", path.display());
        if !self.fs.is_file(path) {
            return Err(ApplicationError::SourceUnavailable {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such catalog file"),
            });
        }
        let content = self.fs.read_to_string(path).source_context(path)?;
        let records = parse_records(&content, self.delimiter);
        debug!("read {} records", records.len());
        Ok(self.load_batch(records))
    }

    /// Find a course by number, ignoring case.
    pub fn lookup(&self, id: &str) -> Option<&Course> {
        self.live.as_ref()?.search(id)
    }

    /// All courses as `(id, name)`, ascending by id.
    pub fn list_all(&self) -> Vec<(&str, &str)> {
        self.live
            .iter()
            .flat_map(|index| index.iter())
            .map(|c| (c.id(), c.name()))
            .collect()
    }

    /// Number of courses in the live index.
    pub fn size(&self) -> usize {
        self.live.as_ref().map_or(0, CourseIndex::len)
    }

    pub fn is_loaded(&self) -> bool {
        self.live.is_some()
    }

    /// The live index, if a load has succeeded.
    pub fn index(&self) -> Option<&CourseIndex> {
        self.live.as_ref()
    }
}
