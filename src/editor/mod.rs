//! Editor surfaces opened by editable items.
//!
//! A surface is a dialog with a title, an optional body and positive and
//! negative actions, holding either a single-line text entry or a
//! single-choice list. Surfaces are plain state; the host renders them and
//! routes keys into them.

mod buffer;

pub use buffer::{Direction, EntryBuffer};

/// Dialog chrome shared by every editor surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub body: Option<String>,
    /// Label of the confirming action, `None` when choosing commits directly.
    pub positive: Option<String>,
    pub negative: String,
}

/// Single-choice list with a highlighted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceList {
    entries: Vec<String>,
    highlighted: usize,
}

impl ChoiceList {
    /// Create a list highlighting `current` (clamped into range).
    pub fn new(entries: Vec<String>, current: usize) -> Self {
        let highlighted = current.min(entries.len().saturating_sub(1));
        Self {
            entries,
            highlighted,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub const fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < self.entries.len() {
            self.highlighted += 1;
        }
    }

    pub const fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Content of an open surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceBody {
    TextEntry(EntryBuffer),
    Choice(ChoiceList),
}

/// An editor surface opened for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub dialog: Dialog,
    pub body: SurfaceBody,
}

impl Editor {
    pub const fn text_entry(&self) -> Option<&EntryBuffer> {
        match &self.body {
            SurfaceBody::TextEntry(buffer) => Some(buffer),
            SurfaceBody::Choice(_) => None,
        }
    }

    pub const fn text_entry_mut(&mut self) -> Option<&mut EntryBuffer> {
        match &mut self.body {
            SurfaceBody::TextEntry(buffer) => Some(buffer),
            SurfaceBody::Choice(_) => None,
        }
    }

    pub const fn choice(&self) -> Option<&ChoiceList> {
        match &self.body {
            SurfaceBody::Choice(list) => Some(list),
            SurfaceBody::TextEntry(_) => None,
        }
    }

    pub const fn choice_mut(&mut self) -> Option<&mut ChoiceList> {
        match &mut self.body {
            SurfaceBody::Choice(list) => Some(list),
            SurfaceBody::TextEntry(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_highlight_is_clamped() {
        let mut list = ChoiceList::new(vec!["a".into(), "b".into()], 9);
        assert_eq!(list.highlighted(), 1);
        list.highlight_next();
        assert_eq!(list.highlighted(), 1);
        list.highlight_prev();
        list.highlight_prev();
        assert_eq!(list.highlighted(), 0);
    }
}
