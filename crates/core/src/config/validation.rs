use std::path::PathBuf;

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application descriptor is absent from the project root. This is
    /// the one user-facing fatal error of the bootstrap sequence.
    #[error("Make sure the project root has \".pyrarc.json\"")]
    MissingRcFile,

    #[error("Preload file not found: {}", .path.display())]
    PreloadNotFound { path: PathBuf },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Check if the error marks an absent preload file
    pub fn is_preload_not_found(&self) -> bool {
        matches!(self, Self::PreloadNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rcfile_message() {
        assert_eq!(
            ConfigError::MissingRcFile.to_string(),
            "Make sure the project root has \".pyrarc.json\""
        );
    }

    #[test]
    fn test_preload_not_found_message() {
        let err = ConfigError::PreloadNotFound {
            path: PathBuf::from("/srv/app/start/routes.lua"),
        };
        assert_eq!(
            err.to_string(),
            "Preload file not found: /srv/app/start/routes.lua"
        );
        assert!(err.is_preload_not_found());
    }
}
