//! Read-only view of external preference storage.
//!
//! The list never writes preferences; it only re-reads them on
//! [`SettingsList::refresh`](crate::list::SettingsList::refresh).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::{ItemKind, ItemValue};
use crate::list::SettingsList;

/// Lookup of stored preference values by key.
pub trait PreferenceSource {
    fn get(&self, key: &str) -> Option<ItemValue>;
}

/// In-memory preference map, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryPreferences {
    values: BTreeMap<String, ItemValue>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `key: value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is not such an object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`MemoryPreferences::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Current values of every keyed item in `list`.
    ///
    /// Selectors are recorded by entry value when one resolves, so the
    /// result can be fed back into a refresh.
    pub fn capture(list: &SettingsList) -> Self {
        let resources = list.resources();
        let values = list
            .items()
            .iter()
            .filter_map(|item| {
                let key = item.key()?;
                let value = match item.kind() {
                    ItemKind::Selector { .. } => item
                        .selected_entry_value(resources)
                        .map(ItemValue::Text)
                        .or_else(|| item.value())?,
                    _ => item.value()?,
                };
                Some((key.to_string(), value))
            })
            .collect();
        Self { values }
    }

    pub fn set(&mut self, key: impl Into<String>, value: ItemValue) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<ItemValue> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceSource for MemoryPreferences {
    fn get(&self, key: &str) -> Option<ItemValue> {
        self.values.get(key).cloned()
    }
}

impl<K: Into<String>> FromIterator<(K, ItemValue)> for MemoryPreferences {
    fn from_iter<I: IntoIterator<Item = (K, ItemValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
