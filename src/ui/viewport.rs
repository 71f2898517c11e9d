//! Scroll window over the settings rows.

use std::ops::Range;

/// The visible slice of the list.
///
/// Rows map one-to-one onto list items, so the viewport only tracks the
/// window height, the first visible row and the row count.
///
/// # Example
///
/// ```
/// use prefpane::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(5, 20);
/// vp.ensure_visible(7);
/// assert_eq!(vp.visible_range(), 3..8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_rows: usize,
}

impl Viewport {
    pub const fn new(height: u16, total_rows: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_rows,
        }
    }

    /// First visible row.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Rows currently on screen, clamped to the list.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_rows);
        let end = (self.offset + self.height as usize).min(self.total_rows);
        start..end
    }

    /// Scroll the least amount needed to bring `row` on screen.
    pub fn ensure_visible(&mut self, row: usize) {
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + height {
            self.offset = row + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Change the window height, keeping the offset valid.
    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height as usize)
    }
}
