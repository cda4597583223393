use async_trait::async_trait;

use crate::application::Application;
use crate::container::{Container, ContainerBuilder};
use crate::errors::CoreError;

/// Provider error type
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown provider: {name}")]
    UnknownProvider { name: String },

    #[error("Circular dependency detected in provider: {provider}")]
    CircularDependency { provider: String },

    #[error("Missing dependency '{dependency}' for provider '{provider}'")]
    MissingDependency {
        provider: String,
        dependency: String,
    },

    #[error("Provider registration failed: {message}")]
    RegistrationFailed { message: String },

    #[error("Provider boot failed: {message}")]
    BootFailed { message: String },

    #[error("Provider hook failed: {message}")]
    HookFailed { message: String },

    #[error("Container error: {0}")]
    Container(#[source] Box<CoreError>),
}

impl From<CoreError> for ProviderError {
    fn from(error: CoreError) -> Self {
        ProviderError::Container(Box::new(error))
    }
}

/// Service provider trait for registering services and managing lifecycle
///
/// A provider contributes container bindings during the registration phase
/// and can take part in the boot, ready and shutdown phases of the
/// application. Ready and shutdown participation is declared through the
/// capability flags so the bootstrapper only tracks providers that care.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// Provider name for identification and dependency resolution
    fn name(&self) -> &'static str;

    /// Register services in the container builder
    /// This is called during the registration phase
    fn register(&self, builder: ContainerBuilder) -> Result<ContainerBuilder, ProviderError>;

    /// Boot the provider after the container is built
    async fn boot(
        &self,
        application: &Application,
        container: &Container,
    ) -> Result<(), ProviderError> {
        let _ = (application, container);
        Ok(())
    }

    /// Provider dependencies (other providers that must be registered first)
    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }

    /// Whether this provider takes part in the ready phase
    fn has_ready_hook(&self) -> bool {
        false
    }

    /// Whether this provider takes part in the shutdown phase
    fn has_shutdown_hook(&self) -> bool {
        false
    }

    /// Ready hook, run concurrently with the other providers' ready hooks
    /// once the application has booted
    async fn ready(
        &self,
        application: &Application,
        container: &Container,
    ) -> Result<(), ProviderError> {
        let _ = (application, container);
        Ok(())
    }

    /// Shutdown hook, run concurrently with the other providers' shutdown
    /// hooks when the application terminates
    async fn shutdown(
        &self,
        application: &Application,
        container: &Container,
    ) -> Result<(), ProviderError> {
        let _ = (application, container);
        Ok(())
    }

    /// Provider version for compatibility checking
    fn version(&self) -> Option<&'static str> {
        None
    }

    /// Provider description
    fn description(&self) -> Option<&'static str> {
        None
    }
}

/// Provider metadata for introspection
#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub has_ready_hook: bool,
    pub has_shutdown_hook: bool,
}

impl ProviderMetadata {
    /// Create metadata from a provider
    pub fn from_provider<P: ServiceProvider + ?Sized>(provider: &P) -> Self {
        Self {
            name: provider.name().to_string(),
            version: provider.version().map(|v| v.to_string()),
            description: provider.description().map(|d| d.to_string()),
            dependencies: provider
                .dependencies()
                .iter()
                .map(|d| d.to_string())
                .collect(),
            has_ready_hook: provider.has_ready_hook(),
            has_shutdown_hook: provider.has_shutdown_hook(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CacheProvider;

    impl ServiceProvider for CacheProvider {
        fn name(&self) -> &'static str {
            "cache"
        }

        fn register(
            &self,
            builder: ContainerBuilder,
        ) -> Result<ContainerBuilder, ProviderError> {
            Ok(builder)
        }

        fn dependencies(&self) -> Vec<&'static str> {
            vec!["database"]
        }

        fn has_shutdown_hook(&self) -> bool {
            true
        }

        fn version(&self) -> Option<&'static str> {
            Some("1.0.0")
        }
    }

    #[test]
    fn test_provider_metadata() {
        let metadata = ProviderMetadata::from_provider(&CacheProvider);

        assert_eq!(metadata.name, "cache");
        assert_eq!(metadata.version, Some("1.0.0".to_string()));
        assert_eq!(metadata.description, None);
        assert_eq!(metadata.dependencies, vec!["database"]);
        assert!(!metadata.has_ready_hook);
        assert!(metadata.has_shutdown_hook);
    }
}
