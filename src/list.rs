//! The settings list and its editable-item interaction protocol.
//!
//! A press moves an editable item from idle to pending: the item records the
//! surface it was pressed on and the host is asked, through
//! [`Host::on_item_pressed`], whether to proceed. Resuming the returned
//! [`Continuation`] either commits right away (toggles) or opens an editor
//! surface (inputs and selectors) that is later confirmed, chosen from or
//! cancelled. Every committed edit notifies [`Host::on_item_changed`]
//! exactly once; rejected and cancelled edits notify nothing.

use std::fmt;

use crate::editor::{ChoiceList, Dialog, Editor, EntryBuffer, SurfaceBody};
use crate::error::{Error, Result};
use crate::host::{Continuation, Host, SurfaceId};
use crate::item::{InputRule, ItemId, ItemKind, ItemValue, PendingEdit, SettingsItem};
use crate::prefs::PreferenceSource;
use crate::text::{NoResources, ResourceProvider};

/// What a press (or a resumed continuation) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Nothing happened: layout item, disabled item, empty selector, or
    /// another surface is already open.
    Ignored,
    /// The host kept or dropped the continuation.
    Deferred,
    /// The value was committed without a surface.
    Committed,
    /// An editor surface is now open.
    SurfaceOpened,
}

/// Result of the positive action on an open surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The value was committed and the surface dismissed.
    Committed,
    /// The staged input was invalid; the surface stays open.
    Rejected,
}

/// The editor surface currently shown for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSurface {
    index: usize,
    surface: SurfaceId,
    editor: Editor,
}

impl OpenSurface {
    /// Index of the item being edited.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub const fn editor(&self) -> &Editor {
        &self.editor
    }
}

/// Ordered settings items plus the editor surface, if one is open.
pub struct SettingsList {
    items: Vec<SettingsItem>,
    resources: Box<dyn ResourceProvider>,
    open: Option<OpenSurface>,
    next_id: u32,
    generation: u64,
}

impl fmt::Debug for SettingsList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsList")
            .field("items", &self.items.len())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl Default for SettingsList {
    fn default() -> Self {
        Self::new(NoResources)
    }
}

impl SettingsList {
    /// Create an empty list resolving text against `resources`.
    pub fn new(resources: impl ResourceProvider + 'static) -> Self {
        Self {
            items: Vec::new(),
            resources: Box::new(resources),
            open: None,
            next_id: 1,
            generation: 0,
        }
    }

    /// Append an item, assigning it a fresh id.
    pub fn push(&mut self, mut item: SettingsItem) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        item.set_id(id);
        self.items.push(item);
        id
    }

    pub fn items(&self) -> &[SettingsItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&SettingsItem> {
        self.items.get(index)
    }

    /// Mutable access for subscribing listeners or toggling `enabled`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SettingsItem> {
        self.items.get_mut(index)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn resources(&self) -> &dyn ResourceProvider {
        self.resources.as_ref()
    }

    pub const fn surface(&self) -> Option<&OpenSurface> {
        self.open.as_ref()
    }

    /// The open editor, for routing keystrokes into it.
    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.open.as_mut().map(|open| &mut open.editor)
    }

    pub const fn is_surface_open(&self) -> bool {
        self.open.is_some()
    }

    /// Press the item at `index` on `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchItem`] if `index` is out of range.
    pub fn press(
        &mut self,
        index: usize,
        surface: SurfaceId,
        host: &mut dyn Host,
    ) -> Result<PressOutcome> {
        let item = self.items.get(index).ok_or(Error::NoSuchItem(index))?;
        if self.open.is_some() {
            tracing::debug!(item = %item.id(), "press ignored, a surface is already open");
            return Ok(PressOutcome::Ignored);
        }
        if !item.is_enabled() {
            tracing::debug!(item = %item.id(), "press ignored, item disabled");
            return Ok(PressOutcome::Ignored);
        }
        match item.kind() {
            ItemKind::Blank | ItemKind::Section => return Ok(PressOutcome::Ignored),
            ItemKind::Selector { .. } if !self.has_choices(item) => {
                tracing::debug!(item = %item.id(), "press ignored, selector has no choices");
                return Ok(PressOutcome::Ignored);
            }
            _ => {}
        }

        self.generation += 1;
        let generation = self.generation;
        let item = &mut self.items[index];
        if let Some(slot) = item.pending_slot() {
            *slot = Some(PendingEdit {
                surface,
                generation,
            });
        }
        let continuation = Continuation {
            index,
            item: item.id(),
            generation,
        };

        match host.on_item_pressed(surface, &self.items[index], continuation) {
            Some(continuation) => self.resume(continuation, host),
            None => Ok(PressOutcome::Deferred),
        }
    }

    /// A switch widget reported `checked`. Runs the press flow only when the
    /// state actually differs from the toggle's value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchItem`] if `index` is out of range.
    pub fn on_toggle(
        &mut self,
        index: usize,
        checked: bool,
        surface: SurfaceId,
        host: &mut dyn Host,
    ) -> Result<PressOutcome> {
        let item = self.items.get(index).ok_or(Error::NoSuchItem(index))?;
        match item.kind() {
            ItemKind::Toggle(value) if *value.get() != checked => {
                self.press(index, surface, host)
            }
            _ => Ok(PressOutcome::Ignored),
        }
    }

    /// Proceed with a press the host deferred.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleContinuation`] if the item was pressed again,
    /// its edit was cancelled, or it no longer exists.
    pub fn resume(
        &mut self,
        continuation: Continuation,
        host: &mut dyn Host,
    ) -> Result<PressOutcome> {
        let Continuation {
            index,
            item: id,
            generation,
        } = continuation;
        let item = self
            .items
            .get(index)
            .filter(|item| item.id() == id)
            .ok_or(Error::StaleContinuation(id))?;
        let pending = item
            .pending()
            .filter(|pending| pending.generation == generation)
            .ok_or(Error::StaleContinuation(id))?;
        if !item.is_enabled() || self.open.is_some() {
            tracing::debug!(
                item = %id,
                enabled = item.is_enabled(),
                "resume ignored, edit dropped"
            );
            self.items[index].take_pending();
            return Ok(PressOutcome::Ignored);
        }

        let resources = self.resources.as_ref();
        let editor = match item.kind() {
            ItemKind::Blank | ItemKind::Section => return Err(Error::StaleContinuation(id)),
            ItemKind::Toggle(value) => {
                let flipped = !*value.get();
                self.commit(index, ItemValue::Bool(flipped), host);
                return Ok(PressOutcome::Committed);
            }
            ItemKind::Input { value, rule } => {
                let mut buffer = EntryBuffer::from_text(value.get());
                if let InputRule::MaxChars(max) = rule {
                    buffer = buffer.with_max_chars(*max);
                }
                let body = item.resolve_description(resources);
                Editor {
                    dialog: Dialog {
                        title: item.resolve_title(resources),
                        body: (!body.is_empty()).then_some(body),
                        positive: Some(action_label(resources, "dialog.ok", "OK")),
                        negative: action_label(resources, "dialog.cancel", "Cancel"),
                    },
                    body: SurfaceBody::TextEntry(buffer),
                }
            }
            ItemKind::Selector { value, .. } => {
                // Arrays are resolved lazily and may have gone empty since the press.
                if !self.has_choices(item) {
                    self.items[index].take_pending();
                    return Ok(PressOutcome::Ignored);
                }
                let (entries, _) = item.selector_arrays(resources).unwrap_or_default();
                Editor {
                    dialog: Dialog {
                        title: item.resolve_title(resources),
                        body: None,
                        positive: None,
                        negative: action_label(resources, "dialog.cancel", "Cancel"),
                    },
                    body: SurfaceBody::Choice(ChoiceList::new(entries, *value.get())),
                }
            }
        };

        tracing::debug!(item = %id, surface = %pending.surface, "editor surface opened");
        self.open = Some(OpenSurface {
            index,
            surface: pending.surface,
            editor,
        });
        Ok(PressOutcome::SurfaceOpened)
    }

    /// Give up on a deferred press without opening anything.
    pub fn abandon(&mut self, continuation: Continuation) {
        if let Some(item) = self.items.get_mut(continuation.index)
            && item.id() == continuation.item
            && item
                .pending()
                .is_some_and(|pending| pending.generation == continuation.generation)
        {
            item.take_pending();
        }
    }

    /// Positive action on the open surface.
    ///
    /// For a text entry the staged text is checked against the item's
    /// [`InputRule`]; an invalid result keeps the surface open. For a choice
    /// list the highlighted entry is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSurface`] if nothing is open.
    pub fn confirm(&mut self, host: &mut dyn Host) -> Result<ConfirmOutcome> {
        let open = self.open.as_ref().ok_or(Error::NoOpenSurface)?;
        let index = open.index;
        let accepted = match &open.editor.body {
            SurfaceBody::TextEntry(buffer) => match self.items[index].kind() {
                ItemKind::Input { rule, .. } => rule.accept(buffer.text()),
                _ => None,
            },
            SurfaceBody::Choice(list) => {
                let highlighted = list.highlighted();
                return self.choose(highlighted, host);
            }
        };

        let Some(result) = accepted else {
            tracing::debug!(item = %self.items[index].id(), "input rejected, surface kept open");
            return Ok(ConfirmOutcome::Rejected);
        };
        self.open = None;
        self.commit(index, ItemValue::Text(result), host);
        Ok(ConfirmOutcome::Committed)
    }

    /// Choose entry `choice` on the open choice list, committing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSurface`], [`Error::NotAChoice`] if a text
    /// entry is open, or [`Error::ChoiceOutOfRange`].
    pub fn choose(&mut self, choice: usize, host: &mut dyn Host) -> Result<ConfirmOutcome> {
        let open = self.open.as_ref().ok_or(Error::NoOpenSurface)?;
        let list = open.editor.choice().ok_or(Error::NotAChoice)?;
        if choice >= list.len() {
            return Err(Error::ChoiceOutOfRange {
                index: choice,
                len: list.len(),
            });
        }
        let index = open.index;
        self.open = None;
        self.commit(index, ItemValue::Index(choice), host);
        Ok(ConfirmOutcome::Committed)
    }

    /// Negative action: dismiss the open surface and discard the edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOpenSurface`] if nothing is open.
    pub fn cancel(&mut self) -> Result<()> {
        let open = self.open.take().ok_or(Error::NoOpenSurface)?;
        if let Some(item) = self.items.get_mut(open.index) {
            item.take_pending();
            tracing::debug!(item = %item.id(), "edit cancelled");
        }
        Ok(())
    }

    /// Set a value from outside the press flow (no host notification).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchItem`], or [`Error::ChoiceOutOfRange`] when a
    /// selector index falls outside its entries.
    pub fn set_value(&mut self, index: usize, value: ItemValue) -> Result<bool> {
        let item = self.items.get(index).ok_or(Error::NoSuchItem(index))?;
        if let ItemValue::Index(choice) = value
            && let Some((entries, _)) = item.selector_arrays(self.resources.as_ref())
            && choice >= entries.len()
        {
            return Err(Error::ChoiceOutOfRange {
                index: choice,
                len: entries.len(),
            });
        }
        Ok(self.items[index].set_value(value))
    }

    /// Re-read keyed items from `source`.
    ///
    /// Selectors accept either a stored index or a stored entry value.
    /// Values that do not fit are skipped. Returns how many items changed.
    /// Host change notifications never fire from a refresh.
    pub fn refresh(&mut self, source: &dyn PreferenceSource) -> usize {
        let resources = self.resources.as_ref();
        let mut changed = 0;
        for item in &mut self.items {
            let Some(stored) = item.key().and_then(|key| source.get(key)) else {
                continue;
            };
            let value = match (item.selector_arrays(resources), stored) {
                (Some((_, values)), ItemValue::Text(stored)) => {
                    match values.iter().position(|v| *v == stored) {
                        Some(choice) => ItemValue::Index(choice),
                        None => {
                            tracing::debug!(item = %item.id(), stored = %stored, "stored entry value not in selector");
                            continue;
                        }
                    }
                }
                (Some((entries, _)), ItemValue::Index(choice)) if choice >= entries.len() => {
                    tracing::debug!(item = %item.id(), choice, "stored index out of range");
                    continue;
                }
                (_, stored) => stored,
            };
            if item.set_value(value) {
                changed += 1;
            }
        }
        tracing::debug!(changed, "settings refreshed");
        changed
    }

    fn has_choices(&self, item: &SettingsItem) -> bool {
        item.has_choices(self.resources.as_ref())
    }

    fn commit(&mut self, index: usize, value: ItemValue, host: &mut dyn Host) {
        let item = &mut self.items[index];
        // Cleared before notifying so a re-entrant press cannot notify twice.
        let pending = item.take_pending();
        item.set_value(value);
        tracing::debug!(item = %item.id(), value = ?item.value(), "value committed");
        if let Some(pending) = pending {
            host.on_item_changed(pending.surface, item);
        }
    }
}

fn action_label(resources: &dyn ResourceProvider, key: &str, fallback: &str) -> String {
    resources
        .string(key)
        .unwrap_or_else(|| fallback.to_string())
}
