//! In-memory model registry.

use personas_core::ModelInfo;
use personas_interface::ModelRegistry;
use std::collections::HashMap;

/// A fixed table of known models, usually built from configuration.
///
/// # Examples
///
/// ```
/// use personas_chain::InMemoryModelRegistry;
/// use personas_core::ModelInfo;
/// use personas_interface::ModelRegistry;
///
/// let registry = InMemoryModelRegistry::new().with_model(ModelInfo::new("small", 3000));
/// assert_eq!(*registry.resolve("small").unwrap().context_tokens(), 3000);
/// assert!(registry.resolve("large").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryModelRegistry {
    models: HashMap<String, ModelInfo>,
}

impl InMemoryModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a model.
    pub fn with_model(mut self, model: ModelInfo) -> Self {
        self.register(model);
        self
    }

    /// Add or replace a model.
    pub fn register(&mut self, model: ModelInfo) {
        self.models.insert(model.id().clone(), model);
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no models are registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Registered models, sorted by identifier.
    pub fn models(&self) -> Vec<&ModelInfo> {
        let mut models: Vec<_> = self.models.values().collect();
        models.sort_by(|a, b| a.id().cmp(b.id()));
        models
    }
}

impl FromIterator<ModelInfo> for InMemoryModelRegistry {
    fn from_iter<I: IntoIterator<Item = ModelInfo>>(iter: I) -> Self {
        let mut registry = Self::new();
        for model in iter {
            registry.register(model);
        }
        registry
    }
}

impl ModelRegistry for InMemoryModelRegistry {
    fn resolve(&self, model_id: &str) -> Option<ModelInfo> {
        self.models.get(model_id).cloned()
    }
}
