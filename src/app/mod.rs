//! Terminal host for a settings screen.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions, including the host side of the
//!   settings list protocol
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{CHROME_ROWS, Model, Prompt, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::screen::Screen;

/// Main application struct that owns the screen until the loop starts.
pub struct App {
    screen: Screen,
    confirm_enabled: bool,
    prefs_path: Option<PathBuf>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application editing `screen`.
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            confirm_enabled: true,
            prefs_path: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Ask before editing items flagged `confirm`.
    pub const fn with_confirm(mut self, enabled: bool) -> Self {
        self.confirm_enabled = enabled;
        self
    }

    /// Preference file loaded at start and on reload.
    pub fn with_prefs_path(mut self, path: Option<PathBuf>) -> Self {
        self.prefs_path = path;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    fn into_model(self, size: (u16, u16)) -> Model {
        let mut model = Model::new(self.screen, size)
            .with_confirm(self.confirm_enabled)
            .with_prefs_path(self.prefs_path);
        model.config_global_path = self.config_global_path;
        model.config_local_path = self.config_local_path;
        model
    }
}

#[cfg(test)]
mod tests;
