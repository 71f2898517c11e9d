//! Error type for the settings list library.
//!
//! The interaction protocol itself never fails: rejected edits are silently
//! refused. These variants cover misuse of the API and loading failures.

use std::path::PathBuf;

use crate::item::ItemId;

/// Errors returned by [`SettingsList`](crate::list::SettingsList) operations
/// and by the catalog/screen loaders.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no item at index {0}")]
    NoSuchItem(usize),

    #[error("continuation for item {0} is no longer pending")]
    StaleContinuation(ItemId),

    #[error("no editor surface is open")]
    NoOpenSurface,

    #[error("the open surface is not a choice list")]
    NotAChoice,

    #[error("choice {index} is out of range ({len} entries)")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("invalid input pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
