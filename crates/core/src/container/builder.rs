use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::container::container::Container;
use crate::container::registry::ServiceRegistry;
use crate::errors::CoreError;
use crate::foundation::traits::Service;

/// Builder for constructing containers with services
///
/// The builder is the only mutable surface of the container: bindings and
/// autoload namespaces accumulate here, then [`build`](Self::build) freezes
/// them into a read-only [`Container`].
pub struct ContainerBuilder {
    registry: ServiceRegistry,
    namespaces: BTreeMap<String, PathBuf>,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            registry: ServiceRegistry::new(),
            namespaces: BTreeMap::new(),
        }
    }

    /// Add a singleton service
    pub fn add_singleton<T>(mut self, service: T) -> Result<Self, CoreError>
    where
        T: Service,
    {
        self.registry.register_singleton(service)?;
        Ok(self)
    }

    /// Add an already-shared instance as a singleton
    pub fn add_instance<T>(mut self, instance: Arc<T>) -> Result<Self, CoreError>
    where
        T: Service,
    {
        self.registry.register_instance(instance)?;
        Ok(self)
    }

    /// Add a transient service with factory
    pub fn add_transient<T>(
        mut self,
        factory: Box<dyn Fn() -> T + Send + Sync>,
    ) -> Result<Self, CoreError>
    where
        T: Service,
    {
        self.registry.register_transient(factory)?;
        Ok(self)
    }

    /// Register an autoload namespace: `alias` resolves to `path`
    pub fn add_namespace(mut self, alias: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.namespaces.insert(alias.into(), path.into());
        self
    }

    /// Number of services registered so far
    pub fn service_count(&self) -> usize {
        self.registry.service_count()
    }

    /// Build the container
    pub fn build(self) -> Result<Container, CoreError> {
        let container = Container::from_parts(self.registry, self.namespaces);
        container.validate()?;
        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
