// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. item::ItemKind)
    clippy::module_name_repetitions
)]

//! # Prefpane
//!
//! Data-bound settings lists: toggles, text inputs, single-choice selectors,
//! section headers and blank spacers, plus a terminal host to edit them.
//!
//! Editable items follow one interaction protocol. A press asks the hosting
//! screen for permission through [`host::Host::on_item_pressed`]; the host
//! proceeds right away or keeps the [`host::Continuation`] to resume later.
//! Toggles then flip, inputs and selectors open an editor surface, and every
//! committed edit is reported exactly once through
//! [`host::Host::on_item_changed`].
//!
//! ## Architecture
//!
//! The terminal host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: State transitions, driving the settings list
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`item`]: Settings items and their kinds
//! - [`list`]: The item container and interaction state machine
//! - [`host`]: Contract with the screen hosting a list
//! - [`editor`]: Text-entry and choice surfaces
//! - [`observe`]: Field change notifications
//! - [`text`]: Display text and resource lookup
//! - [`screen`]: JSON screen definitions
//! - [`prefs`]: Preference sources for refresh
//! - [`app`]: Terminal host event loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod host;
pub mod item;
pub mod list;
pub mod observe;
pub mod prefs;
pub mod screen;
pub mod text;
pub mod ui;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::host::{AlwaysProceed, Continuation, Host, SurfaceId};
    pub use crate::item::{InputRule, ItemId, ItemKind, ItemValue, SettingsItem};
    pub use crate::list::{ConfirmOutcome, PressOutcome, SettingsList};
    pub use crate::observe::{Field, FieldChanged};
    pub use crate::prefs::{MemoryPreferences, PreferenceSource};
    pub use crate::screen::Screen;
    pub use crate::text::{Catalog, DisplayText, ResourceProvider, TextArray};
}
