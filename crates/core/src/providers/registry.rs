use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::providers::provider::{ProviderError, ProviderMetadata, ServiceProvider};

/// Provider catalog and activation planner
///
/// The launcher registers every provider implementation it links in; the
/// application descriptor then decides which of them activate, and in what
/// order, by name. Activation order additionally honors the dependencies
/// each provider declares.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ServiceProvider>>,
    by_name: HashMap<String, usize>,
}

impl ProviderRegistry {
    /// Create a new provider registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Add a provider implementation to the catalog.
    /// Registering a name again replaces the earlier entry.
    pub fn register<P: ServiceProvider + 'static>(&mut self, provider: P) {
        self.register_arc(Arc::new(provider));
    }

    /// Add an already-shared provider to the catalog
    pub fn register_arc(&mut self, provider: Arc<dyn ServiceProvider>) {
        let name = provider.name().to_string();
        match self.by_name.get(&name) {
            Some(&index) => self.providers[index] = provider,
            None => {
                self.by_name.insert(name, self.providers.len());
                self.providers.push(provider);
            }
        }
    }

    /// Check if a provider name is in the catalog
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the number of catalogued providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Get a catalogued provider by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ServiceProvider>> {
        self.by_name
            .get(name)
            .map(|&index| self.providers[index].clone())
    }

    /// Get provider metadata by name
    pub fn metadata(&self, name: &str) -> Option<ProviderMetadata> {
        self.get(name)
            .map(|provider| ProviderMetadata::from_provider(provider.as_ref()))
    }

    /// Resolve descriptor names against the catalog and order the selection
    /// by declared dependencies.
    ///
    /// Duplicate names keep their first position. A name absent from the
    /// catalog, a dependency outside the selection, and a dependency cycle
    /// are all errors.
    pub fn activation_order(
        &self,
        names: &[String],
    ) -> Result<Vec<Arc<dyn ServiceProvider>>, ProviderError> {
        let mut selected: Vec<Arc<dyn ServiceProvider>> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for name in names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let provider = self
                .get(name)
                .ok_or_else(|| ProviderError::UnknownProvider { name: name.clone() })?;
            selected.push(provider);
        }

        Self::topological_sort(selected)
    }

    /// Perform topological sort considering dependencies
    fn topological_sort(
        selected: Vec<Arc<dyn ServiceProvider>>,
    ) -> Result<Vec<Arc<dyn ServiceProvider>>, ProviderError> {
        let name_to_index: HashMap<&str, usize> = selected
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name(), i))
            .collect();

        let provider_count = selected.len();
        let mut visited = vec![false; provider_count];
        let mut temp_mark = vec![false; provider_count];
        let mut order = Vec::with_capacity(provider_count);

        for index in 0..provider_count {
            if !visited[index] {
                Self::visit_provider(
                    &selected,
                    index,
                    &name_to_index,
                    &mut visited,
                    &mut temp_mark,
                    &mut order,
                )?;
            }
        }

        Ok(order.into_iter().map(|i| selected[i].clone()).collect())
    }

    /// Visit provider for dependency resolution
    fn visit_provider(
        providers: &[Arc<dyn ServiceProvider>],
        index: usize,
        name_to_index: &HashMap<&str, usize>,
        visited: &mut Vec<bool>,
        temp_mark: &mut Vec<bool>,
        result: &mut Vec<usize>,
    ) -> Result<(), ProviderError> {
        if temp_mark[index] {
            return Err(ProviderError::CircularDependency {
                provider: providers[index].name().to_string(),
            });
        }

        if visited[index] {
            return Ok(());
        }

        temp_mark[index] = true;

        // Visit all dependencies first
        for dep_name in providers[index].dependencies() {
            if let Some(&dep_index) = name_to_index.get(dep_name) {
                Self::visit_provider(
                    providers,
                    dep_index,
                    name_to_index,
                    visited,
                    temp_mark,
                    result,
                )?;
            } else {
                return Err(ProviderError::MissingDependency {
                    provider: providers[index].name().to_string(),
                    dependency: dep_name.to_string(),
                });
            }
        }

        temp_mark[index] = false;
        visited[index] = true;
        result.push(index);

        Ok(())
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
