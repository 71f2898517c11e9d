//! Contract between the settings list and the screen hosting it.

use std::fmt;

use crate::item::{ItemId, SettingsItem};

/// The on-screen view an item is rendered into, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// One-shot permission to proceed with a deferred edit.
///
/// Handed to [`Host::on_item_pressed`]. Return it to proceed immediately, or
/// keep it and pass it to
/// [`SettingsList::resume`](crate::list::SettingsList::resume) later. A
/// continuation is bound to the press that created it; pressing the item
/// again or cancelling the edit makes it stale.
#[must_use = "dropping a continuation skips the edit"]
#[derive(Debug, PartialEq, Eq)]
pub struct Continuation {
    pub(crate) index: usize,
    pub(crate) item: ItemId,
    pub(crate) generation: u64,
}

impl Continuation {
    /// The item this continuation resumes.
    pub const fn item(&self) -> ItemId {
        self.item
    }
}

/// Callbacks implemented by the screen hosting a settings list.
pub trait Host {
    /// An editable item was pressed.
    ///
    /// Return `Some(continuation)` to open the item's editor now. Return
    /// `None` to skip the edit, or after storing the continuation to resume
    /// it later (for example once a confirmation prompt is answered).
    fn on_item_pressed(
        &mut self,
        surface: SurfaceId,
        item: &SettingsItem,
        continuation: Continuation,
    ) -> Option<Continuation>;

    /// A value edit started by a press was committed.
    fn on_item_changed(&mut self, surface: SurfaceId, item: &SettingsItem);
}

/// Host that proceeds with every press and ignores change notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysProceed;

impl Host for AlwaysProceed {
    fn on_item_pressed(
        &mut self,
        _surface: SurfaceId,
        _item: &SettingsItem,
        continuation: Continuation,
    ) -> Option<Continuation> {
        Some(continuation)
    }

    fn on_item_changed(&mut self, _surface: SurfaceId, _item: &SettingsItem) {}
}
