//! Tool registry - stable ids bound to constructors at startup
//!
//! Manifests refer to tools by id (`tool = "ping"`). Nothing is loaded from
//! disk as code; a manifest can only pick one of the registered constructors
//! or name an external program.

use crate::descriptor::Tool;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds a tool from the manifest's `[options]` table
pub type ToolConstructor =
    Arc<dyn Fn(&toml::Table) -> anyhow::Result<Arc<dyn Tool>> + Send + Sync>;

#[derive(Clone, Default)]
pub struct ToolRegistry {
    constructors: BTreeMap<String, ToolConstructor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor; a later registration under the same id wins
    pub fn register<F>(&mut self, id: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&toml::Table) -> anyhow::Result<Arc<dyn Tool>> + Send + Sync + 'static,
    {
        let id = id.into();
        tracing::debug!(tool = %id, "registered tool constructor");
        self.constructors.insert(id, Arc::new(constructor));
        self
    }

    pub fn get(&self, id: &str) -> Option<&ToolConstructor> {
        self.constructors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
