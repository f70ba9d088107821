//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::CatalogService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// A catalog service with nothing loaded, using the configured delimiter.
    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.fs), self.settings.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::*;

    struct OneFile;

    impl FileSystem for OneFile {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            Ok("CS101|Intro\nCS201|Data Structures|cs101\n".to_string())
        }

        fn is_file(&self, _path: &Path) -> bool {
            true
        }
    }

    #[test]
    fn given_configured_delimiter_when_building_catalog_service_then_uses_it() {
        // Arrange
        let settings = Settings {
            delimiter: '|',
            ..Settings::default()
        };
        let container = ServiceContainer::with_deps(settings, Arc::new(OneFile));

        // Act
        let mut service = container.catalog_service();
        let report = service.load_file(Path::new("any.csv")).unwrap();

        // Assert
        assert_eq!(report.loaded, 2);
        assert_eq!(service.lookup("cs201").unwrap().prerequisites(), ["CS101"]);
    }
}
