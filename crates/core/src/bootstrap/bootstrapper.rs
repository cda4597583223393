use std::path::PathBuf;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::application::{AppMetadata, Application};
use crate::bootstrap::preloads::{FsPreloadHandler, PreloadHandler};
use crate::config::{AppEnvironment, ConfigError, RcFile};
use crate::container::{Container, ContainerBuilder};
use crate::errors::CoreError;
use crate::foundation::lifecycle::LifecycleState;
use crate::providers::{ProviderMetadata, ProviderRegistry, ServiceProvider};

/// Sequences the startup of an application
///
/// Phases run in a fixed order: `setup`, `register_providers`,
/// `register_aliases`, `register_preloads`, `boot_providers`,
/// `execute_ready_hooks`, and, on termination, `execute_shutdown_hooks`.
/// Each phase must complete before the next begins; only the ready and
/// shutdown hooks fan out concurrently, awaited as a single batch per
/// phase.
pub struct Bootstrapper {
    app_root: PathBuf,
    environment: AppEnvironment,
    providers: ProviderRegistry,
    preload_handler: Box<dyn PreloadHandler>,
    state: LifecycleState,
    application: Option<Arc<Application>>,
    builder: Option<ContainerBuilder>,
    container: Option<Arc<Container>>,
    activated: Vec<Arc<dyn ServiceProvider>>,
    providers_with_ready_hook: Vec<Arc<dyn ServiceProvider>>,
    providers_with_shutdown_hook: Vec<Arc<dyn ServiceProvider>>,
}

impl Bootstrapper {
    /// Create a new bootstrapper for the given project root and runtime
    /// environment
    pub fn new(app_root: impl Into<PathBuf>, environment: AppEnvironment) -> Self {
        Self {
            app_root: app_root.into(),
            environment,
            providers: ProviderRegistry::new(),
            preload_handler: Box::new(FsPreloadHandler),
            state: LifecycleState::Created,
            application: None,
            builder: None,
            container: None,
            activated: Vec::new(),
            providers_with_ready_hook: Vec::new(),
            providers_with_shutdown_hook: Vec::new(),
        }
    }

    /// Replace the preload handler
    pub fn with_preload_handler(mut self, handler: Box<dyn PreloadHandler>) -> Self {
        self.preload_handler = handler;
        self
    }

    /// Add a provider implementation to the catalog. Whether it activates
    /// is up to the application descriptor.
    pub fn add_provider<P: ServiceProvider + 'static>(&mut self, provider: P) {
        self.providers.register(provider);
    }

    /// The provider catalog
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The application model, once `setup` has run
    pub fn application(&self) -> Option<&Arc<Application>> {
        self.application.as_ref()
    }

    /// The built container, once `boot_providers` has run
    pub fn container(&self) -> Option<&Arc<Container>> {
        self.container.as_ref()
    }

    /// Set up the container builder and the application model
    ///
    /// Loads the descriptor from the project root (a missing file is the
    /// user-facing fatal error) and binds the application into the builder
    /// so it resolves from the container before any provider registers.
    pub fn setup(&mut self) -> Result<Arc<Application>, CoreError> {
        self.expect_state(&[LifecycleState::Created], "setup")?;

        let rc = RcFile::load(&self.app_root)?;
        let metadata = AppMetadata::from_rc(&rc);
        let application = Arc::new(Application::new(
            self.app_root.clone(),
            self.environment,
            rc,
            metadata,
        ));

        let builder = ContainerBuilder::new().add_instance(application.clone())?;

        self.application = Some(application.clone());
        self.builder = Some(builder);
        self.state = LifecycleState::SetUp;

        Ok(application)
    }

    /// Register the providers the descriptor activates
    ///
    /// Console providers join in only when `include_console` is set. Each
    /// activated provider contributes its bindings to the builder; the ones
    /// declaring ready/shutdown hooks are remembered for the hook phases.
    pub fn register_providers(
        &mut self,
        include_console: bool,
    ) -> Result<Vec<ProviderMetadata>, CoreError> {
        self.expect_state(&[LifecycleState::SetUp], "register_providers")?;

        let application = self.current_application("register_providers")?;
        let names = application.provider_names(include_console);
        let activation = self.providers.activation_order(&names)?;

        let mut builder = self.take_builder("register_providers")?;
        let mut registered = Vec::with_capacity(activation.len());

        for provider in &activation {
            tracing::info!("registering provider: {}", provider.name());
            builder = provider.register(builder)?;

            if provider.has_ready_hook() {
                self.providers_with_ready_hook.push(provider.clone());
            }
            if provider.has_shutdown_hook() {
                self.providers_with_shutdown_hook.push(provider.clone());
            }
            registered.push(ProviderMetadata::from_provider(provider.as_ref()));
        }

        self.builder = Some(builder);
        self.activated = activation;
        self.state = LifecycleState::Registered;

        Ok(registered)
    }

    /// Register the descriptor's autoload aliases on the container
    pub fn register_aliases(&mut self) -> Result<(), CoreError> {
        self.expect_state(&[LifecycleState::Registered], "register_aliases")?;

        let application = self.current_application("register_aliases")?;
        let mut builder = self.take_builder("register_aliases")?;

        for (alias, to_path) in application.aliases() {
            tracing::trace!("registering {} under {} alias", to_path.display(), alias);
            builder = builder.add_namespace(alias.clone(), application.root().join(to_path));
        }

        self.builder = Some(builder);
        Ok(())
    }

    /// Run the descriptor's preload entries
    ///
    /// Entries are filtered by the runtime environment: untagged entries
    /// always run, and an `Unknown` environment runs everything. A missing
    /// file fails the phase unless the entry is optional.
    pub fn register_preloads(&mut self) -> Result<(), CoreError> {
        self.expect_state(&[LifecycleState::Registered], "register_preloads")?;

        let application = self.current_application("register_preloads")?;

        for preload in application.preloads() {
            if !preload.runs_in(self.environment) {
                continue;
            }

            tracing::trace!("preloading {} file", preload.file.display());
            let path = application.root().join(&preload.file);

            match self.preload_handler.load(&path, preload) {
                Ok(()) => {}
                Err(CoreError::Config(ConfigError::PreloadNotFound { .. }))
                    if preload.optional =>
                {
                    tracing::trace!("skipping optional preload {}", preload.file.display());
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Build the container and boot the activated providers in activation
    /// order
    pub async fn boot_providers(&mut self) -> Result<(), CoreError> {
        self.expect_state(&[LifecycleState::Registered], "boot_providers")?;

        let application = self.current_application("boot_providers")?;
        let builder = self.take_builder("boot_providers")?;
        let container = Arc::new(builder.build()?);

        tracing::trace!("booting providers");
        for provider in &self.activated {
            tracing::info!("booting provider: {}", provider.name());
            provider.boot(&application, &container).await?;
        }

        self.container = Some(container);
        self.state = LifecycleState::Booted;

        Ok(())
    }

    /// Execute the ready hooks on the providers
    ///
    /// Hooks run concurrently and are awaited together; the first failure
    /// propagates. The hook collection is cleared afterwards, so a second
    /// call is a no-op.
    pub async fn execute_ready_hooks(&mut self) -> Result<(), CoreError> {
        self.expect_state(
            &[LifecycleState::Booted, LifecycleState::Running],
            "execute_ready_hooks",
        )?;

        let application = self.current_application("execute_ready_hooks")?;
        let container = self.current_container("execute_ready_hooks")?;

        tracing::trace!("executing ready hooks");
        try_join_all(
            self.providers_with_ready_hook
                .iter()
                .map(|provider| provider.ready(&application, &container)),
        )
        .await?;

        self.providers_with_ready_hook.clear();
        self.state = LifecycleState::Running;

        Ok(())
    }

    /// Execute the shutdown hooks on the providers
    ///
    /// Same contract as the ready hooks: concurrent fan-out, first failure
    /// propagates, collection cleared on success.
    pub async fn execute_shutdown_hooks(&mut self) -> Result<(), CoreError> {
        self.expect_state(
            &[
                LifecycleState::Booted,
                LifecycleState::Running,
                LifecycleState::Stopped,
            ],
            "execute_shutdown_hooks",
        )?;

        let application = self.current_application("execute_shutdown_hooks")?;
        let container = self.current_container("execute_shutdown_hooks")?;

        tracing::trace!("executing shutdown hooks");
        try_join_all(
            self.providers_with_shutdown_hook
                .iter()
                .map(|provider| provider.shutdown(&application, &container)),
        )
        .await?;

        self.providers_with_shutdown_hook.clear();
        self.state = LifecycleState::Stopped;

        Ok(())
    }

    /// Wait for the termination signal, then run the shutdown hooks
    pub async fn terminate_on_signal(&mut self) -> Result<(), CoreError> {
        tokio::signal::ctrl_c().await?;
        tracing::info!("termination signal received");
        self.execute_shutdown_hooks().await
    }

    /// Run every startup phase in order, through the ready hooks
    pub async fn start(&mut self, include_console: bool) -> Result<Arc<Application>, CoreError> {
        let application = self.setup()?;
        self.register_providers(include_console)?;
        self.register_aliases()?;
        self.register_preloads()?;
        self.boot_providers().await?;
        self.execute_ready_hooks().await?;
        Ok(application)
    }

    fn expect_state(
        &self,
        expected: &[LifecycleState],
        operation: &str,
    ) -> Result<(), CoreError> {
        if expected.contains(&self.state) {
            return Ok(());
        }
        Err(CoreError::lifecycle(
            operation,
            format!("invalid lifecycle state '{}'", self.state),
        ))
    }

    fn current_application(&self, operation: &str) -> Result<Arc<Application>, CoreError> {
        self.application
            .clone()
            .ok_or_else(|| CoreError::lifecycle(operation, "application has not been set up"))
    }

    fn current_container(&self, operation: &str) -> Result<Arc<Container>, CoreError> {
        self.container
            .clone()
            .ok_or_else(|| CoreError::lifecycle(operation, "container has not been built"))
    }

    fn take_builder(&mut self, operation: &str) -> Result<ContainerBuilder, CoreError> {
        self.builder
            .take()
            .ok_or_else(|| CoreError::lifecycle(operation, "container builder is gone"))
    }
}

impl std::fmt::Debug for Bootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrapper")
            .field("app_root", &self.app_root)
            .field("environment", &self.environment)
            .field("state", &self.state)
            .field("provider_count", &self.providers.provider_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_descriptor_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut bootstrapper = Bootstrapper::new(dir.path(), AppEnvironment::Web);

        let err = bootstrapper.setup().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Make sure the project root has \".pyrarc.json\""
        );
        assert_eq!(bootstrapper.state(), LifecycleState::Created);
    }

    #[test]
    fn test_phases_out_of_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut bootstrapper = Bootstrapper::new(dir.path(), AppEnvironment::Web);

        let err = bootstrapper.register_providers(false).unwrap_err();
        assert!(err.is_lifecycle());

        let err = bootstrapper.register_aliases().unwrap_err();
        assert!(err.is_lifecycle());
    }

    #[tokio::test]
    async fn test_setup_binds_application() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::RC_FILE_NAME),
            r#"{ "name": "blog" }"#,
        )
        .unwrap();

        let mut bootstrapper = Bootstrapper::new(dir.path(), AppEnvironment::Web);
        let application = bootstrapper.setup().unwrap();
        assert_eq!(application.metadata().name, "blog");
        assert_eq!(bootstrapper.state(), LifecycleState::SetUp);

        bootstrapper.register_providers(false).unwrap();
        bootstrapper.register_aliases().unwrap();
        bootstrapper.register_preloads().unwrap();
        bootstrapper.boot_providers().await.unwrap();

        let container = bootstrapper.container().unwrap();
        let resolved = container.resolve::<Application>().unwrap();
        assert!(Arc::ptr_eq(&application, &resolved));
    }
}
