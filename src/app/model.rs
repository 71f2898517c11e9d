use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::host::{Continuation, SurfaceId};
use crate::screen::Screen;
use crate::ui::viewport::Viewport;

/// How long a toast stays in the status row.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Rows taken by the title bar, the description line and the status bar.
pub const CHROME_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// A press waiting for the user to answer "are you sure?".
#[derive(Debug)]
pub struct Prompt {
    pub question: String,
    pub(super) continuation: Continuation,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    /// The settings screen being edited
    pub screen: Screen,
    /// Index of the highlighted row
    pub selected: usize,
    /// Scroll window over the rows
    pub viewport: Viewport,
    /// Surface id reported to the list for every press
    pub surface: SurfaceId,
    /// Whether items flagged `confirm` ask before editing
    pub confirm_enabled: bool,
    /// Pending confirmation prompt
    pub prompt: Option<Prompt>,
    /// Preference file re-read on reload
    pub prefs_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Number of edits committed this session
    pub committed: usize,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model for `screen` in a terminal of `size` (width, height).
    pub fn new(screen: Screen, size: (u16, u16)) -> Self {
        let rows = screen.list.len();
        let mut model = Self {
            screen,
            viewport: Viewport::new(size.1.saturating_sub(CHROME_ROWS), rows),
            surface: SurfaceId(1),
            confirm_enabled: true,
            ..Self::default()
        };
        model.selected = model.first_selectable().unwrap_or(0);
        model
    }

    pub const fn with_confirm(mut self, enabled: bool) -> Self {
        self.confirm_enabled = enabled;
        self
    }

    pub fn with_prefs_path(mut self, path: Option<PathBuf>) -> Self {
        self.prefs_path = path;
        self
    }

    pub fn into_screen(self) -> Screen {
        self.screen
    }

    /// Rows the cursor may rest on: everything except sections and blanks.
    pub(super) fn is_selectable(&self, index: usize) -> bool {
        self.screen
            .list
            .get(index)
            .is_some_and(|item| item.is_editable())
    }

    pub(super) fn first_selectable(&self) -> Option<usize> {
        (0..self.screen.list.len()).find(|&i| self.is_selectable(i))
    }

    pub(super) fn last_selectable(&self) -> Option<usize> {
        (0..self.screen.list.len())
            .rev()
            .find(|&i| self.is_selectable(i))
    }

    pub(super) fn next_selectable(&self) -> Option<usize> {
        (self.selected + 1..self.screen.list.len()).find(|&i| self.is_selectable(i))
    }

    pub(super) fn prev_selectable(&self) -> Option<usize> {
        (0..self.selected).rev().find(|&i| self.is_selectable(i))
    }

    /// Move the cursor and scroll it into view.
    ///
    /// Section headers right above the cursor are kept on screen too.
    pub(super) fn select(&mut self, index: usize) {
        self.selected = index;
        let mut top = index;
        while top > 0
            && self
                .screen
                .list
                .get(top - 1)
                .is_some_and(|item| !item.is_editable())
        {
            top -= 1;
        }
        self.viewport.ensure_visible(top);
        self.viewport.ensure_visible(index);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// Drop the toast once it has expired. Returns true if one was removed.
    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
