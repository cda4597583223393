pub mod application;
pub mod bootstrap;
pub mod config;
pub mod container;
pub mod errors;
pub mod foundation;
pub mod providers;

// Re-export key types for convenience (specific exports to avoid ambiguity)
pub use application::{AppMetadata, Application};
pub use bootstrap::{Bootstrapper, FsPreloadHandler, PreloadHandler};
pub use config::{AppEnvironment, ConfigError, Preload, RcFile, RC_FILE_NAME};
pub use container::{Container, ContainerBuilder, ServiceRegistry, ServiceScope};
pub use errors::CoreError;
pub use foundation::{FrameworkComponent, LifecycleState, Service};
pub use providers::{ProviderError, ProviderMetadata, ProviderRegistry, ServiceProvider};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "pyra.rs";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}

/// Get framework name
pub fn name() -> &'static str {
    FRAMEWORK_NAME
}
