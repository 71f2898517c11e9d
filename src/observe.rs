//! Field change notification.
//!
//! Every mutable item field goes through a setter that compares the old and
//! new value and, when they differ, emits a [`FieldChanged`] event to the
//! listeners registered on the item's [`ChangeRegistry`].

use std::fmt;

use crate::item::ItemId;

/// Observable fields of a settings item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Enabled,
    Value,
    Description,
    Checked,
}

/// A field of `item` changed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChanged {
    pub item: ItemId,
    pub field: Field,
}

/// Handle returned by [`ChangeRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FieldChanged)>;

/// Listener list owned by a single item.
#[derive(Default)]
pub struct ChangeRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ChangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FieldChanged) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn emit(&mut self, item: ItemId, fields: &[Field]) {
        for &field in fields {
            let event = FieldChanged { item, field };
            for (_, listener) in &mut self.listeners {
                listener(&event);
            }
        }
    }
}

impl fmt::Debug for ChangeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeRegistry")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
