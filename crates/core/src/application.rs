use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{AppEnvironment, Preload, RcFile};
use crate::foundation::traits::{FrameworkComponent, Service};

/// Package-level identity of the running application
#[derive(Debug, Clone, PartialEq)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub framework_version: String,
}

impl AppMetadata {
    /// Derive metadata from the descriptor, with stock fallbacks
    pub fn from_rc(rc: &RcFile) -> Self {
        Self {
            name: rc.name.clone().unwrap_or_else(|| "pyra-app".to_string()),
            version: rc.version.clone().unwrap_or_else(|| "0.0.0".to_string()),
            framework_version: crate::VERSION.to_string(),
        }
    }
}

/// The application model
///
/// Root path, runtime environment, descriptor and package metadata.
/// Read-only once constructed; the bootstrapper shares it as
/// `Arc<Application>` and binds it into the container before any provider
/// registers, so providers can resolve it from the registration phase on.
#[derive(Debug, Clone)]
pub struct Application {
    root: PathBuf,
    environment: AppEnvironment,
    rc: RcFile,
    metadata: AppMetadata,
}

impl Application {
    /// Create a new application model
    pub fn new(
        root: PathBuf,
        environment: AppEnvironment,
        rc: RcFile,
        metadata: AppMetadata,
    ) -> Self {
        Self {
            root,
            environment,
            rc,
            metadata,
        }
    }

    /// The project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The runtime environment the launcher declared
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// The loaded application descriptor
    pub fn rc(&self) -> &RcFile {
        &self.rc
    }

    /// Package metadata
    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    /// Autoload aliases from the descriptor
    pub fn aliases(&self) -> &BTreeMap<String, PathBuf> {
        &self.rc.aliases
    }

    /// Preload entries from the descriptor
    pub fn preloads(&self) -> &[Preload] {
        &self.rc.preloads
    }

    /// Provider names activated for this application, in descriptor order.
    ///
    /// Empty entries are skipped; console providers are appended only on
    /// request.
    pub fn provider_names(&self, include_console: bool) -> Vec<String> {
        let base = self.rc.providers.iter();
        let console = self
            .rc
            .console_providers
            .iter()
            .filter(|_| include_console);

        base.chain(console)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect()
    }
}

impl FrameworkComponent for Application {}
impl Service for Application {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rc_with_providers() -> RcFile {
        RcFile {
            providers: vec![
                "database".to_string(),
                String::new(),
                "cache".to_string(),
            ],
            console_providers: vec!["migrations".to_string(), "  ".to_string()],
            ..RcFile::default()
        }
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = AppMetadata::from_rc(&RcFile::default());
        assert_eq!(metadata.name, "pyra-app");
        assert_eq!(metadata.version, "0.0.0");
        assert_eq!(metadata.framework_version, crate::VERSION);
    }

    #[test]
    fn test_metadata_from_descriptor() {
        let rc = RcFile {
            name: Some("blog".to_string()),
            version: Some("2.0.0".to_string()),
            ..RcFile::default()
        };
        let metadata = AppMetadata::from_rc(&rc);
        assert_eq!(metadata.name, "blog");
        assert_eq!(metadata.version, "2.0.0");
    }

    #[test]
    fn test_provider_names_skip_empty() {
        let rc = rc_with_providers();
        let app = Application::new(
            PathBuf::from("/srv/app"),
            AppEnvironment::Web,
            rc.clone(),
            AppMetadata::from_rc(&rc),
        );

        assert_eq!(app.provider_names(false), vec!["database", "cache"]);
    }

    #[test]
    fn test_provider_names_include_console() {
        let rc = rc_with_providers();
        let app = Application::new(
            PathBuf::from("/srv/app"),
            AppEnvironment::Console,
            rc.clone(),
            AppMetadata::from_rc(&rc),
        );

        assert_eq!(
            app.provider_names(true),
            vec!["database", "cache", "migrations"]
        );
    }
}
