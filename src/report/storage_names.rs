//! Storage display names for the storages seen in a report

use iconik::Client;
use std::collections::HashMap;

/// storage_id -> display name, for the storages a report touches.
#[derive(Debug, Clone, Default)]
pub struct StorageNames {
    names: HashMap<String, String>,
}

impl StorageNames {
    /// Look up each storage once. Failed lookups are logged and left
    /// unresolved.
    pub fn resolve<'a, I>(client: &Client, storage_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names = HashMap::new();
        for storage_id in storage_ids {
            if names.contains_key(storage_id) {
                continue;
            }
            match client.storage_name(storage_id) {
                Ok(name) => {
                    names.insert(storage_id.to_string(), name);
                }
                Err(e) => {
                    log::warn!("Could not resolve storage {}: {}", storage_id, e);
                }
            }
        }
        Self { names }
    }

    /// Resolved name, falling back to the raw ID.
    pub fn display_name<'a>(&'a self, storage_id: &'a str) -> &'a str {
        self.names
            .get(storage_id)
            .map_or(storage_id, String::as_str)
    }

    pub fn is_resolved(&self, storage_id: &str) -> bool {
        self.names.contains_key(storage_id)
    }

    #[cfg(test)]
    pub fn insert(&mut self, storage_id: &str, name: &str) {
        self.names.insert(storage_id.to_string(), name.to_string());
    }
}
