//! Lazily-resolved display text and the resource lookup seam.
//!
//! Item titles, descriptions and selector labels are stored unresolved and
//! looked up against a [`ResourceProvider`] only when the host renders them.
//! [`Catalog`] is the bundled provider: a JSON string table with one section
//! per locale and a default locale used as fallback.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Source of localized strings and string arrays.
pub trait ResourceProvider {
    /// Look up a single string.
    fn string(&self, key: &str) -> Option<String>;

    /// Look up a string array (selector labels and values).
    fn string_array(&self, key: &str) -> Option<Vec<String>>;
}

impl<R: ResourceProvider + ?Sized> ResourceProvider for Box<R> {
    fn string(&self, key: &str) -> Option<String> {
        (**self).string(key)
    }

    fn string_array(&self, key: &str) -> Option<Vec<String>> {
        (**self).string_array(key)
    }
}

/// Provider with no resources; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceProvider for NoResources {
    fn string(&self, _key: &str) -> Option<String> {
        None
    }

    fn string_array(&self, _key: &str) -> Option<Vec<String>> {
        None
    }
}

/// Text that is resolved against a [`ResourceProvider`] on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayText {
    #[default]
    Empty,
    /// Text used as-is.
    Literal(String),
    /// Key into the resource provider's string table.
    Resource(String),
}

impl DisplayText {
    /// Parse the notation used in screen definitions: a leading `@` names a
    /// resource key, anything else is literal text.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Empty
        } else if let Some(key) = raw.strip_prefix('@') {
            Self::Resource(key.to_string())
        } else {
            Self::Literal(raw.to_string())
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn resource(key: impl Into<String>) -> Self {
        Self::Resource(key.into())
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Resolve to a displayable string. A missing resource resolves to empty
    /// text rather than failing.
    pub fn resolve(&self, resources: &dyn ResourceProvider) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Literal(text) => text.clone(),
            Self::Resource(key) => resources.string(key).unwrap_or_else(|| {
                tracing::debug!(key = %key, "missing string resource");
                String::new()
            }),
        }
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Literal(text) => f.write_str(text),
            Self::Resource(key) => write!(f, "@{key}"),
        }
    }
}

/// A list of strings that is either given inline or looked up by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TextArray {
    #[default]
    Empty,
    Literal(Vec<String>),
    Resource(String),
}

impl TextArray {
    /// Resolve the array. A missing resource degrades to an empty list.
    pub fn resolve(&self, resources: &dyn ResourceProvider) -> Vec<String> {
        match self {
            Self::Empty => Vec::new(),
            Self::Literal(items) => items.clone(),
            Self::Resource(key) => resources.string_array(key).unwrap_or_else(|| {
                tracing::debug!(key = %key, "missing array resource, using empty list");
                Vec::new()
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Table {
    #[serde(default)]
    strings: HashMap<String, String>,
    #[serde(default)]
    arrays: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    default: String,
    locales: HashMap<String, Table>,
}

/// Locale-aware string catalog.
///
/// ```json
/// {
///   "default": "en",
///   "locales": {
///     "en": { "strings": { "theme": "Theme" }, "arrays": { "themes": ["Light", "Dark"] } },
///     "de": { "strings": { "theme": "Design" } }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    primary: Table,
    fallback: Option<Table>,
}

impl Catalog {
    /// Parse a catalog and select `locale`.
    ///
    /// Selection tries the exact tag, then its language part (`de-AT` falls
    /// back to `de`), then the file's default locale. Lookups that miss in the
    /// selected locale retry in the default locale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is not a valid catalog.
    pub fn from_json(json: &str, locale: &str) -> Result<Self> {
        let mut file: CatalogFile = serde_json::from_str(json)?;
        let default_table = file.locales.get(&file.default).cloned();
        if default_table.is_none() {
            tracing::warn!(default = %file.default, "catalog default locale has no table");
        }

        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        let (selected, primary) = if let Some(table) = file.locales.remove(locale) {
            (locale.to_string(), table)
        } else if let Some(table) = file.locales.remove(language) {
            (language.to_string(), table)
        } else {
            tracing::debug!(locale, default = %file.default, "locale not in catalog, using default");
            (file.default.clone(), default_table.clone().unwrap_or_default())
        };

        let fallback = if selected == file.default {
            None
        } else {
            default_table
        };

        Ok(Self {
            locale: selected,
            primary,
            fallback,
        })
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Json`]
    /// if it is malformed.
    pub fn load(path: &Path, locale: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, locale)
    }

    /// The locale actually selected after fallback.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl ResourceProvider for Catalog {
    fn string(&self, key: &str) -> Option<String> {
        self.primary
            .strings
            .get(key)
            .or_else(|| self.fallback.as_ref()?.strings.get(key))
            .cloned()
    }

    fn string_array(&self, key: &str) -> Option<Vec<String>> {
        self.primary
            .arrays
            .get(key)
            .or_else(|| self.fallback.as_ref()?.arrays.get(key))
            .cloned()
    }
}
