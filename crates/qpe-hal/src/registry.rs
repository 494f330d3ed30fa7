//! Backend registry for creating backends by name.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

/// Factory function type for registered backends.
type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Central registry mapping backend names (and aliases) to factories.
pub struct BackendRegistry {
    factories: FxHashMap<String, Factory>,
    aliases: FxHashMap<String, String>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
            aliases: FxHashMap::default(),
        }
    }

    /// Register a backend type under `name`.
    pub fn register<B>(&mut self, name: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        let name = name.into();
        debug!("Registering backend: {}", name);
        self.factories.insert(
            name,
            Box::new(|config| {
                let backend = B::from_config(config)?;
                Ok(Box::new(backend))
            }),
        );
    }

    /// Register a backend factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering factory backend: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Make `alias` resolve to the registered backend `target`.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Create a backend by name or alias.
    ///
    /// The configuration's `name` is replaced with the canonical backend name.
    pub fn create(&self, name: &str, mut config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        let canonical = self.resolve(name);
        let factory = self.factories.get(canonical).ok_or_else(|| {
            HalError::BackendUnavailable(format!(
                "No backend registered with name '{name}'. Available: {}",
                self.available_backends().join(", ")
            ))
        })?;
        config.name = canonical.to_string();
        factory(config)
    }

    /// List registered backend names (aliases excluded), sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a backend is available by name or alias.
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(self.resolve(name))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
