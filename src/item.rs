//! Settings list items.
//!
//! [`SettingsItem`] carries the attributes every list row has (icon, title,
//! description, enabled flag) and an [`ItemKind`] holding the fields of one
//! variant. The editable kinds store their value in a [`Value`] together
//! with the pending-edit slot used while a press awaits confirmation.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::SurfaceId;
use crate::observe::{ChangeRegistry, Field, FieldChanged, SubscriptionId};
use crate::text::{DisplayText, ResourceProvider, TextArray};

/// Stable identity of an item within its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rendering template an item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Item,
    Section,
}

/// A value carried by an editable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Bool(bool),
    Index(usize),
    Text(String),
}

/// Decides whether text staged in the entry surface is a valid result.
#[derive(Debug, Clone, Default)]
pub enum InputRule {
    /// Any text, including empty.
    Any,
    /// Anything that is not empty or whitespace only.
    #[default]
    NonEmpty,
    /// Non-empty and at most this many characters.
    MaxChars(usize),
    /// The whole text must match the pattern.
    Pattern(Regex),
}

impl InputRule {
    /// Build a [`InputRule::Pattern`] anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `pattern` does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Self::Pattern)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// The committed result for `staged`, or `None` if it is rejected.
    pub fn accept(&self, staged: &str) -> Option<String> {
        let ok = match self {
            Self::Any => true,
            Self::NonEmpty => !staged.trim().is_empty(),
            Self::MaxChars(max) => !staged.trim().is_empty() && staged.chars().count() <= *max,
            Self::Pattern(re) => re.is_match(staged),
        };
        ok.then(|| staged.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingEdit {
    pub(crate) surface: SurfaceId,
    pub(crate) generation: u64,
}

/// Current value of an editable item plus its pending-edit slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value<T> {
    value: T,
    pending: Option<PendingEdit>,
}

impl<T> Value<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            pending: None,
        }
    }

    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Whether a press is waiting for confirmation.
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Variant-specific fields of an item.
#[derive(Debug, Clone)]
pub enum ItemKind {
    /// Empty spacer row.
    Blank,
    /// Section header.
    Section,
    /// On/off switch, flipped directly on press.
    Toggle(Value<bool>),
    /// Free text, edited in a text-entry surface.
    Input { value: Value<String>, rule: InputRule },
    /// Index into parallel label/value arrays.
    Selector {
        value: Value<usize>,
        entries: TextArray,
        entry_values: TextArray,
    },
}

/// One row of a settings list.
pub struct SettingsItem {
    id: ItemId,
    key: Option<String>,
    icon: Option<String>,
    title: DisplayText,
    description: DisplayText,
    enabled: bool,
    kind: ItemKind,
    changes: ChangeRegistry,
}

impl fmt::Debug for SettingsItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsItem")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("title", &self.title)
            .field("enabled", &self.enabled)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl SettingsItem {
    fn with_kind(title: DisplayText, kind: ItemKind) -> Self {
        Self {
            id: ItemId::default(),
            key: None,
            icon: None,
            title,
            description: DisplayText::Empty,
            enabled: true,
            kind,
            changes: ChangeRegistry::new(),
        }
    }

    pub fn blank() -> Self {
        Self::with_kind(DisplayText::Empty, ItemKind::Blank)
    }

    pub fn section(title: DisplayText) -> Self {
        Self::with_kind(title, ItemKind::Section)
    }

    pub fn toggle(title: DisplayText, value: bool) -> Self {
        Self::with_kind(title, ItemKind::Toggle(Value::new(value)))
    }

    pub fn input(title: DisplayText, value: impl Into<String>) -> Self {
        Self::with_kind(
            title,
            ItemKind::Input {
                value: Value::new(value.into()),
                rule: InputRule::default(),
            },
        )
    }

    pub fn selector(
        title: DisplayText,
        value: usize,
        entries: TextArray,
        entry_values: TextArray,
    ) -> Self {
        Self::with_kind(
            title,
            ItemKind::Selector {
                value: Value::new(value),
                entries,
                entry_values,
            },
        )
    }

    /// Preference key read by [`SettingsList::refresh`](crate::list::SettingsList::refresh).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_description(mut self, description: DisplayText) -> Self {
        self.description = description;
        self
    }

    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the validation rule of an input item. Other kinds ignore it.
    pub fn with_rule(mut self, new_rule: InputRule) -> Self {
        if let ItemKind::Input { rule, .. } = &mut self.kind {
            *rule = new_rule;
        }
        self
    }

    pub(crate) const fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    pub const fn id(&self) -> ItemId {
        self.id
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub const fn title(&self) -> &DisplayText {
        &self.title
    }

    pub const fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub const fn layout_kind(&self) -> LayoutKind {
        match self.kind {
            ItemKind::Section => LayoutKind::Section,
            _ => LayoutKind::Item,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the item, notifying listeners on change.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.changes.emit(self.id, &[Field::Enabled]);
        }
    }

    /// Whether the item holds a value the user can edit.
    pub const fn is_editable(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Toggle(_) | ItemKind::Input { .. } | ItemKind::Selector { .. }
        )
    }

    /// Whether the row renders a switch widget.
    pub const fn shows_switch(&self) -> bool {
        matches!(self.kind, ItemKind::Toggle(_))
    }

    pub const fn is_checked(&self) -> bool {
        match &self.kind {
            ItemKind::Toggle(v) => v.value,
            _ => false,
        }
    }

    /// Current value, `None` for layout-only kinds.
    pub fn value(&self) -> Option<ItemValue> {
        match &self.kind {
            ItemKind::Blank | ItemKind::Section => None,
            ItemKind::Toggle(v) => Some(ItemValue::Bool(v.value)),
            ItemKind::Input { value, .. } => Some(ItemValue::Text(value.value.clone())),
            ItemKind::Selector { value, .. } => Some(ItemValue::Index(value.value)),
        }
    }

    /// Write a new value, notifying listeners of `Value`, `Description` and
    /// `Checked` when it differs from the current one.
    ///
    /// Returns whether the value changed. A value of the wrong shape for the
    /// item's kind is ignored.
    pub fn set_value(&mut self, new: ItemValue) -> bool {
        let changed = match (&mut self.kind, new) {
            (ItemKind::Toggle(v), ItemValue::Bool(b)) => replace_if_changed(&mut v.value, b),
            (ItemKind::Input { value, .. }, ItemValue::Text(s)) => {
                replace_if_changed(&mut value.value, s)
            }
            (ItemKind::Selector { value, .. }, ItemValue::Index(i)) => {
                replace_if_changed(&mut value.value, i)
            }
            (_, other) => {
                tracing::debug!(item = %self.id, value = ?other, "value does not fit item kind");
                false
            }
        };
        if changed {
            self.changes
                .emit(self.id, &[Field::Value, Field::Description, Field::Checked]);
        }
        changed
    }

    /// Resolved title text.
    pub fn resolve_title(&self, resources: &dyn ResourceProvider) -> String {
        self.title.resolve(resources)
    }

    /// Resolved description. A selector describes itself with the label of
    /// its current entry, or empty text when the index is out of range.
    pub fn resolve_description(&self, resources: &dyn ResourceProvider) -> String {
        match &self.kind {
            ItemKind::Selector { value, entries, .. } => entries
                .resolve(resources)
                .into_iter()
                .nth(value.value)
                .unwrap_or_default(),
            _ => self.description.resolve(resources),
        }
    }

    /// Short value label shown at the end of the row.
    pub fn value_label(&self, resources: &dyn ResourceProvider) -> Option<String> {
        match &self.kind {
            ItemKind::Blank | ItemKind::Section | ItemKind::Toggle(_) => None,
            ItemKind::Input { value, .. } => Some(value.value.clone()),
            ItemKind::Selector { .. } => Some(self.resolve_description(resources)),
        }
    }

    /// Resolved `(entries, entry_values)` of a selector.
    ///
    /// Both arrays are cut to their common length, so every index into
    /// one is valid in the other.
    pub fn selector_arrays(
        &self,
        resources: &dyn ResourceProvider,
    ) -> Option<(Vec<String>, Vec<String>)> {
        let ItemKind::Selector {
            entries,
            entry_values,
            ..
        } = &self.kind
        else {
            return None;
        };
        let mut entries = entries.resolve(resources);
        let mut values = entry_values.resolve(resources);
        if entries.len() != values.len() {
            tracing::debug!(
                item = %self.id,
                entries = entries.len(),
                values = values.len(),
                "selector arrays differ in length"
            );
            let common = entries.len().min(values.len());
            entries.truncate(common);
            values.truncate(common);
        }
        Some((entries, values))
    }

    /// Whether a selector has entries to choose from. Other kinds never do.
    pub fn has_choices(&self, resources: &dyn ResourceProvider) -> bool {
        self.selector_arrays(resources)
            .is_some_and(|(entries, values)| !entries.is_empty() && !values.is_empty())
    }

    /// Value string of the selected entry.
    pub fn selected_entry_value(&self, resources: &dyn ResourceProvider) -> Option<String> {
        match &self.kind {
            ItemKind::Selector {
                value,
                entry_values,
                ..
            } => entry_values.resolve(resources).into_iter().nth(value.value),
            _ => None,
        }
    }

    /// Register a field-change listener.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FieldChanged) + 'static,
    ) -> SubscriptionId {
        self.changes.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    pub(crate) fn pending_slot(&mut self) -> Option<&mut Option<PendingEdit>> {
        match &mut self.kind {
            ItemKind::Blank | ItemKind::Section => None,
            ItemKind::Toggle(v) => Some(&mut v.pending),
            ItemKind::Input { value, .. } => Some(&mut value.pending),
            ItemKind::Selector { value, .. } => Some(&mut value.pending),
        }
    }

    pub(crate) fn pending(&self) -> Option<PendingEdit> {
        match &self.kind {
            ItemKind::Blank | ItemKind::Section => None,
            ItemKind::Toggle(v) => v.pending,
            ItemKind::Input { value, .. } => value.pending,
            ItemKind::Selector { value, .. } => value.pending,
        }
    }

    /// Whether a press on this item is waiting for the host or an editor.
    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingEdit> {
        self.pending_slot().and_then(Option::take)
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, new: T) -> bool {
    if *slot == new {
        false
    } else {
        *slot = new;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::text::NoResources;

    fn themes() -> SettingsItem {
        SettingsItem::selector(
            DisplayText::literal("Theme"),
            1,
            TextArray::Literal(vec!["Light".into(), "Dark".into()]),
            TextArray::Literal(vec!["light".into(), "dark".into()]),
        )
    }

    #[test]
    fn test_layout_kinds() {
        assert_eq!(
            SettingsItem::section(DisplayText::literal("General")).layout_kind(),
            LayoutKind::Section
        );
        assert_eq!(SettingsItem::blank().layout_kind(), LayoutKind::Item);
        assert_eq!(themes().layout_kind(), LayoutKind::Item);
    }

    #[test]
    fn test_set_value_emits_bound_fields_once_per_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut item = SettingsItem::toggle(DisplayText::literal("Wifi"), false);
        {
            let seen = Rc::clone(&seen);
            item.subscribe(move |e| seen.borrow_mut().push(e.field));
        }

        assert!(item.set_value(ItemValue::Bool(true)));
        assert!(!item.set_value(ItemValue::Bool(true)));

        assert_eq!(
            *seen.borrow(),
            vec![Field::Value, Field::Description, Field::Checked]
        );
        assert!(item.is_checked());
    }

    #[test]
    fn test_set_value_ignores_wrong_shape() {
        let mut item = SettingsItem::input(DisplayText::literal("Name"), "old");
        assert!(!item.set_value(ItemValue::Bool(true)));
        assert_eq!(item.value(), Some(ItemValue::Text("old".into())));
    }

    #[test]
    fn test_set_enabled_notifies_only_on_change() {
        let count = Rc::new(RefCell::new(0));
        let mut item = SettingsItem::blank();
        {
            let count = Rc::clone(&count);
            item.subscribe(move |e| {
                assert_eq!(e.field, Field::Enabled);
                *count.borrow_mut() += 1;
            });
        }
        item.set_enabled(true);
        item.set_enabled(false);
        item.set_enabled(false);
        assert_eq!(*count.borrow(), 1);
        assert!(!item.is_enabled());
    }

    #[test]
    fn test_selector_description_follows_value() {
        let mut item = themes();
        assert_eq!(item.resolve_description(&NoResources), "Dark");
        assert_eq!(item.selected_entry_value(&NoResources).as_deref(), Some("dark"));
        item.set_value(ItemValue::Index(5));
        assert_eq!(item.resolve_description(&NoResources), "");
    }

    #[test]
    fn test_input_rules() {
        assert_eq!(InputRule::NonEmpty.accept("  "), None);
        assert_eq!(InputRule::NonEmpty.accept("x").as_deref(), Some("x"));
        assert_eq!(InputRule::Any.accept("").as_deref(), Some(""));
        assert_eq!(InputRule::MaxChars(3).accept("abcd"), None);
        let port = InputRule::pattern(r"\d{1,5}").unwrap();
        assert_eq!(port.accept("8080").as_deref(), Some("8080"));
        assert_eq!(port.accept("80a"), None);
        assert!(matches!(
            InputRule::pattern("("),
            Err(Error::InvalidPattern { .. })
        ));
    }
}
