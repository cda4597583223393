use thiserror::Error;

use crate::config::ConfigError;
use crate::providers::ProviderError;

/// Core error type for the pyra framework
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Service not found: {service_type}")]
    ServiceNotFound { service_type: String },

    #[error("Lock error on resource: {resource}")]
    LockError { resource: String },

    #[error("Lifecycle error during '{operation}': {message}")]
    Lifecycle { operation: String, message: String },
}

impl CoreError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new service not found error
    pub fn service_not_found(service_type: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            service_type: service_type.into(),
        }
    }

    /// Create a new lifecycle error
    pub fn lifecycle(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lifecycle {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Check if the error is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if the error is a lifecycle error
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Lifecycle { .. })
    }

    /// Check if the error is a service error
    pub fn is_service(&self) -> bool {
        matches!(self, Self::ServiceNotFound { .. })
    }
}
