//! Identifier-to-name map used during text rendering
//!
//! Names in a project archive live outside the code section, so the
//! renderer is handed a map from entity ids to user-facing names. Lookups
//! never fail: an id without a mapped name falls back to the name stored
//! in the entity record, and an empty stored name falls back to a
//! deterministic generated name derived from the id's tag and sequence.

use indexmap::IndexMap;

use crate::types::id::EplId;

/// Map from entity identifiers to user-facing names.
///
/// Insertion-ordered so that diagnostic dumps are deterministic.
#[derive(Debug, Clone, Default)]
pub struct IdToNameMap {
    names: IndexMap<EplId, String>,
}

impl IdToNameMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            names: IndexMap::new(),
        }
    }

    /// Number of mapped names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Insert or replace the name for an id.
    pub fn insert(&mut self, id: EplId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    /// Look up the mapped name for an id, if any.
    pub fn get(&self, id: EplId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Resolve a name for rendering.
    ///
    /// Priority: mapped name, then the `stored` name carried by the entity
    /// record, then a generated `{tag}_{sequence}` name.
    pub fn resolve(&self, id: EplId, stored: &str) -> String {
        if let Some(name) = self.get(id) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        if !stored.is_empty() {
            return stored.to_string();
        }
        format!("{}_{}", id.tag_name(), id.sequence())
    }
}
