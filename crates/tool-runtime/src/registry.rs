//! Name-keyed tool registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::tool::{Tool, ToolDefinition};

/// Holds every registered tool together with its definition, keyed by
/// tool name. The definition is captured once at registration, and the
/// ordered map keeps listing output stable across runs.
pub struct ToolRegistry {
    entries: BTreeMap<String, Entry>,
}

struct Entry {
    definition: ToolDefinition,
    tool: Arc<dyn Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a tool under its definition name. Names are unique;
    /// a second registration under the same name is rejected.
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<(), RegistryError> {
        let definition = tool.definition();
        if self.entries.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateName(definition.name));
        }
        self.entries.insert(
            definition.name.clone(),
            Entry {
                definition,
                tool: Arc::new(tool),
            },
        );
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.entries.get(name).map(|entry| Arc::clone(&entry.tool))
    }

    /// All registered definitions, in name order.
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.entries
            .values()
            .map(|entry| entry.definition.clone())
            .collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool with name '{0}' is already registered")]
    DuplicateName(String),
}
