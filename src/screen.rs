//! Screen definitions.
//!
//! A screen is described in JSON and built into a [`SettingsList`] when the
//! screen is opened:
//!
//! ```json
//! {
//!   "title": "@settings",
//!   "items": [
//!     { "kind": "section", "title": "@general" },
//!     { "kind": "toggle", "key": "wifi", "title": "Wi-Fi", "value": true },
//!     { "kind": "input", "key": "name", "title": "Name", "value": "pi", "rule": { "max_chars": 16 } },
//!     { "kind": "selector", "key": "theme", "title": "Theme", "entries": "@themes", "entry_values": "@theme_values" },
//!     { "kind": "blank" }
//!   ]
//! }
//! ```
//!
//! Text fields use the [`DisplayText::parse`] notation. Array fields take
//! either an inline list or a resource key.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::item::{InputRule, ItemId, SettingsItem};
use crate::list::SettingsList;
use crate::text::{DisplayText, ResourceProvider, TextArray};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct Common {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_true")]
    enabled: bool,
    /// Ask the user before editing (interpreted by the host).
    #[serde(default)]
    confirm: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ArrayDef {
    Key(String),
    Items(Vec<String>),
}

impl ArrayDef {
    fn into_text_array(self) -> TextArray {
        match self {
            Self::Key(key) => TextArray::Resource(key.trim_start_matches('@').to_string()),
            Self::Items(items) if items.is_empty() => TextArray::Empty,
            Self::Items(items) => TextArray::Literal(items),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RuleDef {
    Any,
    NonEmpty,
    MaxChars(usize),
    Pattern(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ItemDef {
    Blank,
    Section {
        #[serde(flatten)]
        common: Common,
    },
    Toggle {
        #[serde(flatten)]
        common: Common,
        #[serde(default)]
        value: bool,
    },
    Input {
        #[serde(flatten)]
        common: Common,
        #[serde(default)]
        value: String,
        #[serde(default)]
        rule: Option<RuleDef>,
    },
    Selector {
        #[serde(flatten)]
        common: Common,
        #[serde(default)]
        value: usize,
        entries: ArrayDef,
        entry_values: ArrayDef,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct ScreenDef {
    #[serde(default)]
    title: String,
    items: Vec<ItemDef>,
}

/// A built settings screen.
#[derive(Debug, Default)]
pub struct Screen {
    pub title: DisplayText,
    pub list: SettingsList,
    confirm: HashSet<ItemId>,
}

impl Screen {
    /// Build a screen from its JSON definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for a malformed definition and
    /// [`Error::InvalidPattern`] for an input rule that does not compile.
    pub fn from_json(json: &str, resources: impl ResourceProvider + 'static) -> Result<Self> {
        let ScreenDef { title, items } = serde_json::from_str(json)?;
        let mut list = SettingsList::new(resources);
        let mut confirm = HashSet::new();

        for def in items {
            let (item, needs_confirm) = build_item(def)?;
            let id = list.push(item);
            if needs_confirm {
                confirm.insert(id);
            }
        }
        tracing::debug!(items = list.len(), "screen built");

        Ok(Self {
            title: DisplayText::parse(&title),
            list,
            confirm,
        })
    }

    /// Read and build a screen definition file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`Screen::from_json`].
    pub fn load(path: &Path, resources: impl ResourceProvider + 'static) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, resources)
    }

    /// The title resolved against the list's resources.
    pub fn resolve_title(&self) -> String {
        self.title.resolve(self.list.resources())
    }

    /// Whether the host should ask before editing this item.
    pub fn needs_confirmation(&self, id: ItemId) -> bool {
        self.confirm.contains(&id)
    }
}

fn build_item(def: ItemDef) -> Result<(SettingsItem, bool)> {
    let (item, common) = match def {
        ItemDef::Blank => return Ok((SettingsItem::blank(), false)),
        ItemDef::Section { common } => (
            SettingsItem::section(DisplayText::parse(&common.title)),
            common,
        ),
        ItemDef::Toggle { common, value } => (
            SettingsItem::toggle(DisplayText::parse(&common.title), value),
            common,
        ),
        ItemDef::Input {
            common,
            value,
            rule,
        } => {
            let rule = match rule {
                None | Some(RuleDef::NonEmpty) => InputRule::NonEmpty,
                Some(RuleDef::Any) => InputRule::Any,
                Some(RuleDef::MaxChars(max)) => InputRule::MaxChars(max),
                Some(RuleDef::Pattern(pattern)) => InputRule::pattern(&pattern)?,
            };
            (
                SettingsItem::input(DisplayText::parse(&common.title), value).with_rule(rule),
                common,
            )
        }
        ItemDef::Selector {
            common,
            value,
            entries,
            entry_values,
        } => {
            if let (ArrayDef::Items(labels), ArrayDef::Items(values)) = (&entries, &entry_values)
                && labels.len() != values.len()
            {
                tracing::warn!(
                    title = %common.title,
                    entries = labels.len(),
                    values = values.len(),
                    "selector arrays differ in length, extra entries are hidden"
                );
            }
            (
                SettingsItem::selector(
                    DisplayText::parse(&common.title),
                    value,
                    entries.into_text_array(),
                    entry_values.into_text_array(),
                ),
                common,
            )
        }
    };

    let mut item = item
        .with_description(DisplayText::parse(&common.description))
        .with_enabled(common.enabled);
    if let Some(key) = common.key {
        item = item.with_key(key);
    }
    if let Some(icon) = common.icon {
        item = item.with_icon(icon);
    }
    Ok((item, common.confirm))
}
