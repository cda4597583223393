use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::environment::AppEnvironment;
use crate::config::validation::ConfigError;

/// Name of the application descriptor expected at the project root
pub const RC_FILE_NAME: &str = ".pyrarc.json";

/// The root application descriptor
///
/// Declares which providers activate (and in what order), the autoload
/// aliases, and the preload files to run during startup. Every field is
/// optional; an empty descriptor is a valid application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RcFile {
    /// Application name, defaults to "pyra-app"
    pub name: Option<String>,
    /// Application version, defaults to "0.0.0"
    pub version: Option<String>,
    /// Providers activated in every environment, in activation order
    pub providers: Vec<String>,
    /// Providers additionally activated for the console surface
    pub console_providers: Vec<String>,
    /// Autoload namespace -> directory, relative to the project root
    pub aliases: BTreeMap<String, PathBuf>,
    /// Files loaded during startup
    pub preloads: Vec<Preload>,
}

impl RcFile {
    /// Load the descriptor from the application root.
    ///
    /// A missing file is reported as [`ConfigError::MissingRcFile`]; any
    /// other read or parse failure propagates as-is.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(RC_FILE_NAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingRcFile)
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

/// A file loaded during startup, optionally gated by environment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPreload")]
pub struct Preload {
    /// Path relative to the project root
    pub file: PathBuf,
    /// Environments the file runs in; empty means all of them
    pub environment: Vec<AppEnvironment>,
    /// Whether a missing file is tolerated
    pub optional: bool,
}

impl Preload {
    /// Create an unconditional, required preload entry
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            environment: Vec::new(),
            optional: false,
        }
    }

    /// Restrict the entry to the given environments
    pub fn with_environments(mut self, environment: Vec<AppEnvironment>) -> Self {
        self.environment = environment;
        self
    }

    /// Mark the entry as optional
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Whether this entry runs under `environment`.
    ///
    /// Entries without tags always run, and an `Unknown` runtime runs
    /// every entry.
    pub fn runs_in(&self, environment: AppEnvironment) -> bool {
        if self.environment.is_empty() || environment == AppEnvironment::Unknown {
            return true;
        }
        self.environment.contains(&environment)
    }
}

/// Accepts both the bare-string and the object form of a preload entry
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPreload {
    File(PathBuf),
    Entry {
        file: PathBuf,
        #[serde(default)]
        environment: Vec<AppEnvironment>,
        #[serde(default)]
        optional: bool,
    },
}

impl From<RawPreload> for Preload {
    fn from(raw: RawPreload) -> Self {
        match raw {
            RawPreload::File(file) => Preload::new(file),
            RawPreload::Entry {
                file,
                environment,
                optional,
            } => Preload {
                file,
                environment,
                optional,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_descriptor() {
        let rc: RcFile = serde_json::from_str("{}").unwrap();
        assert_eq!(rc, RcFile::default());
        assert!(rc.providers.is_empty());
        assert!(rc.preloads.is_empty());
    }

    #[test]
    fn test_full_descriptor() {
        let rc: RcFile = serde_json::from_str(
            r#"{
                "name": "blog",
                "version": "1.2.3",
                "providers": ["database", "cache"],
                "console_providers": ["migrations"],
                "aliases": { "App": "src", "Contracts": "contracts" },
                "preloads": [
                    "start/kernel.lua",
                    { "file": "start/routes.lua", "environment": ["web"] },
                    { "file": "start/events.lua", "optional": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(rc.name.as_deref(), Some("blog"));
        assert_eq!(rc.providers, vec!["database", "cache"]);
        assert_eq!(rc.console_providers, vec!["migrations"]);
        assert_eq!(rc.aliases.get("App"), Some(&PathBuf::from("src")));

        assert_eq!(rc.preloads.len(), 3);
        assert_eq!(rc.preloads[0], Preload::new("start/kernel.lua"));
        assert_eq!(
            rc.preloads[1],
            Preload::new("start/routes.lua").with_environments(vec![AppEnvironment::Web])
        );
        assert_eq!(
            rc.preloads[2],
            Preload::new("start/events.lua").with_optional(true)
        );
    }

    #[test]
    fn test_preload_environment_filtering() {
        let untagged = Preload::new("start/kernel.lua");
        assert!(untagged.runs_in(AppEnvironment::Web));
        assert!(untagged.runs_in(AppEnvironment::Console));
        assert!(untagged.runs_in(AppEnvironment::Unknown));

        let web_only =
            Preload::new("start/routes.lua").with_environments(vec![AppEnvironment::Web]);
        assert!(web_only.runs_in(AppEnvironment::Web));
        assert!(!web_only.runs_in(AppEnvironment::Console));
        assert!(!web_only.runs_in(AppEnvironment::Test));

        // An undeclared runtime environment runs everything
        assert!(web_only.runs_in(AppEnvironment::Unknown));
    }

    #[test]
    fn test_descriptor_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RcFile::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRcFile));
        assert_eq!(
            err.to_string(),
            "Make sure the project root has \".pyrarc.json\""
        );
    }

    #[test]
    fn test_descriptor_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RC_FILE_NAME), "{ not json").unwrap();
        let err = RcFile::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_descriptor_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(RC_FILE_NAME),
            r#"{ "providers": ["database"] }"#,
        )
        .unwrap();
        let rc = RcFile::load(dir.path()).unwrap();
        assert_eq!(rc.providers, vec!["database"]);
    }
}
