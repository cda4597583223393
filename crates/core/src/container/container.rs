use std::any::TypeId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::container::builder::ContainerBuilder;
use crate::container::registry::ServiceRegistry;
use crate::errors::CoreError;
use crate::foundation::traits::Service;

/// Main dependency injection container
///
/// Built once from a [`ContainerBuilder`] and read-only afterwards: the
/// bootstrap sequence writes bindings during the registration phases and
/// everything after boot only resolves.
pub struct Container {
    registry: ServiceRegistry,
    namespaces: BTreeMap<String, PathBuf>,
}

impl Container {
    pub(crate) fn from_parts(
        registry: ServiceRegistry,
        namespaces: BTreeMap<String, PathBuf>,
    ) -> Self {
        Self {
            registry,
            namespaces,
        }
    }

    /// Start building a new container
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Resolve a service from the container
    pub fn resolve<T>(&self) -> Result<Arc<T>, CoreError>
    where
        T: Service,
    {
        self.registry.resolve::<T>()
    }

    /// Try to resolve a service, returning None if not found
    pub fn try_resolve<T>(&self) -> Option<Arc<T>>
    where
        T: Service,
    {
        self.registry.try_resolve::<T>()
    }

    /// Check if a service is registered
    pub fn contains<T>(&self) -> bool
    where
        T: Service,
    {
        self.registry.contains::<T>()
    }

    /// Look up the directory an autoload alias points at
    pub fn namespace(&self, alias: &str) -> Option<&Path> {
        self.namespaces.get(alias).map(PathBuf::as_path)
    }

    /// All registered autoload namespaces
    pub fn namespaces(&self) -> &BTreeMap<String, PathBuf> {
        &self.namespaces
    }

    /// Check if the container is properly configured
    pub fn validate(&self) -> Result<(), CoreError> {
        self.registry.validate()
    }

    /// Get the number of registered services
    pub fn service_count(&self) -> usize {
        self.registry.service_count()
    }

    /// Get a list of all registered service types
    pub fn registered_services(&self) -> Vec<TypeId> {
        self.registry.registered_services()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("service_count", &self.service_count())
            .field("namespace_count", &self.namespaces.len())
            .finish()
    }
}
