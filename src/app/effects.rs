use crate::app::{App, Message, Model, ToastLevel};
use crate::prefs::MemoryPreferences;

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::ReloadPreferences) {
            Self::reload_preferences(model, true);
        }
    }

    /// Re-read the preference file into the list.
    ///
    /// A refresh never reports changes to the host, so the only feedback is
    /// the toast. `announce` controls whether a successful reload shows one.
    pub(super) fn reload_preferences(model: &mut Model, announce: bool) {
        let Some(path) = model.prefs_path.clone() else {
            if announce {
                model.show_toast(ToastLevel::Warning, "No preference file (use --prefs)");
            }
            return;
        };
        match MemoryPreferences::load(&path) {
            Ok(prefs) => {
                let changed = model.screen.list.refresh(&prefs);
                tracing::info!(path = %path.display(), changed, "preferences reloaded");
                if announce {
                    let noun = if changed == 1 { "value" } else { "values" };
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Reloaded, {changed} {noun} changed"),
                    );
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "preference reload failed");
                model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
            }
        }
    }
}
