//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll window over the settings rows
//! - [`style`]: Colors for rows, popups and bars

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::visible_columns;
pub use render::{render, row_line, split_screen};

/// Columns before each item's title.
pub const ROW_LEFT_PADDING: u16 = 2;
