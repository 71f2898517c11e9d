use crate::app::Model;
use crate::app::model::{Prompt, ToastLevel};
use crate::editor::{Direction, EntryBuffer};
use crate::host::{Continuation, Host, SurfaceId};
use crate::item::{ItemId, SettingsItem};
use crate::list::{ConfirmOutcome, PressOutcome};
use crate::text::ResourceProvider;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Move to the next selectable row
    SelectNext,
    /// Move to the previous selectable row
    SelectPrev,
    /// Move to the first selectable row
    SelectFirst,
    /// Move to the last selectable row
    SelectLast,

    // Items
    /// Press the highlighted item
    Press,
    /// Answer yes to the confirmation prompt
    PromptAccept,
    /// Answer no to the confirmation prompt
    PromptDecline,

    // Editor surface
    /// Positive action (commit text, choose highlighted entry)
    Confirm,
    /// Negative action (dismiss without committing)
    Cancel,
    /// Insert a character at the entry cursor
    EntryInsertChar(char),
    /// Insert pasted text at the entry cursor
    EntryPaste(String),
    /// Delete character before cursor (Backspace)
    EntryDeleteBack,
    /// Delete character at cursor (Delete)
    EntryDeleteForward,
    /// Move the entry cursor
    EntryMoveCursor(Direction),
    /// Move cursor to beginning of entry (Home)
    EntryMoveHome,
    /// Move cursor to end of entry (End)
    EntryMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EntryMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EntryMoveWordRight,
    /// Clear the entry (Ctrl+U)
    EntryClear,
    /// Highlight the next choice
    ChoiceNext,
    /// Highlight the previous choice
    ChoicePrev,
    /// Choose the entry at this index
    Choose(usize),

    // Preferences
    /// Re-read the preference file
    ReloadPreferences,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File I/O is left to the event loop's side-effect pass.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Navigation
        Message::SelectNext => {
            if let Some(next) = model.next_selectable() {
                model.select(next);
            }
        }
        Message::SelectPrev => {
            if let Some(prev) = model.prev_selectable() {
                model.select(prev);
            }
        }
        Message::SelectFirst => {
            if let Some(first) = model.first_selectable() {
                model.select(first);
            }
        }
        Message::SelectLast => {
            if let Some(last) = model.last_selectable() {
                model.select(last);
            }
        }

        // Items
        Message::Press => press_selected(&mut model),
        Message::PromptAccept => {
            if let Some(prompt) = model.prompt.take() {
                let mut host = ScreenHost::new(false);
                if let Err(err) = model.screen.list.resume(prompt.continuation, &mut host) {
                    model.show_toast(ToastLevel::Error, err.to_string());
                }
                apply_host(&mut model, host);
            }
        }
        Message::PromptDecline => {
            if let Some(prompt) = model.prompt.take() {
                model.screen.list.abandon(prompt.continuation);
            }
        }

        // Editor surface
        Message::Confirm => {
            let mut host = ScreenHost::new(false);
            match model.screen.list.confirm(&mut host) {
                Ok(ConfirmOutcome::Rejected) => {
                    model.show_toast(ToastLevel::Warning, "Value not accepted");
                }
                Ok(ConfirmOutcome::Committed) => {}
                Err(err) => tracing::debug!(%err, "confirm ignored"),
            }
            apply_host(&mut model, host);
        }
        Message::Cancel => {
            if let Err(err) = model.screen.list.cancel() {
                tracing::debug!(%err, "cancel ignored");
            }
        }
        Message::Choose(choice) => {
            let mut host = ScreenHost::new(false);
            if let Err(err) = model.screen.list.choose(choice, &mut host) {
                tracing::debug!(%err, "choice ignored");
            }
            apply_host(&mut model, host);
        }
        Message::ChoiceNext => {
            if let Some(choices) = model
                .screen
                .list
                .editor_mut()
                .and_then(|editor| editor.choice_mut())
            {
                choices.highlight_next();
            }
        }
        Message::ChoicePrev => {
            if let Some(choices) = model
                .screen
                .list
                .editor_mut()
                .and_then(|editor| editor.choice_mut())
            {
                choices.highlight_prev();
            }
        }
        Message::EntryInsertChar(ch) => {
            edit_entry(&mut model, |buffer| {
                buffer.insert_char(ch);
            });
        }
        Message::EntryPaste(text) => {
            edit_entry(&mut model, |buffer| buffer.insert_str(&text));
        }
        Message::EntryDeleteBack => {
            edit_entry(&mut model, |buffer| {
                buffer.delete_back();
            });
        }
        Message::EntryDeleteForward => {
            edit_entry(&mut model, |buffer| {
                buffer.delete_forward();
            });
        }
        Message::EntryMoveCursor(direction) => {
            edit_entry(&mut model, |buffer| buffer.move_cursor(direction));
        }
        Message::EntryMoveHome => edit_entry(&mut model, EntryBuffer::move_home),
        Message::EntryMoveEnd => edit_entry(&mut model, EntryBuffer::move_end),
        Message::EntryMoveWordLeft => edit_entry(&mut model, EntryBuffer::move_word_left),
        Message::EntryMoveWordRight => edit_entry(&mut model, EntryBuffer::move_word_right),
        Message::EntryClear => edit_entry(&mut model, EntryBuffer::clear),

        // ReloadPreferences: handled in effects (reads the preference file)
        Message::ReloadPreferences => {}

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(_width, height) => {
            model
                .viewport
                .resize(height.saturating_sub(super::model::CHROME_ROWS));
            let selected = model.selected;
            model.select(selected);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

fn press_selected(model: &mut Model) {
    let index = model.selected;
    let Some(item) = model.screen.list.get(index) else {
        return;
    };
    let gate = model.confirm_enabled && model.screen.needs_confirmation(item.id());
    let mut host = ScreenHost::new(gate);
    match model.screen.list.press(index, model.surface, &mut host) {
        Ok(PressOutcome::Ignored) => {
            if let Some(item) = model.screen.list.get(index) {
                let resources = model.screen.list.resources();
                let title = item.resolve_title(resources);
                if !item.is_enabled() {
                    model.show_toast(ToastLevel::Info, format!("{title} is disabled"));
                } else if item.selector_arrays(resources).is_some()
                    && !item.has_choices(resources)
                {
                    model.show_toast(
                        ToastLevel::Warning,
                        format!("{title}: nothing to choose from"),
                    );
                }
            }
        }
        Ok(_) => {}
        Err(err) => model.show_toast(ToastLevel::Error, err.to_string()),
    }
    apply_host(model, host);
}

fn edit_entry(model: &mut Model, edit: impl FnOnce(&mut EntryBuffer)) {
    if let Some(buffer) = model
        .screen
        .list
        .editor_mut()
        .and_then(|editor| editor.text_entry_mut())
    {
        edit(buffer);
    }
}

/// Fold what the host saw during one list call back into the model.
fn apply_host(model: &mut Model, host: ScreenHost) {
    if let Some(continuation) = host.deferred {
        let title = model
            .screen
            .list
            .position(continuation.item())
            .and_then(|index| model.screen.list.get(index))
            .map(|item| item.resolve_title(model.screen.list.resources()))
            .unwrap_or_default();
        model.prompt = Some(Prompt {
            question: format!("Change {title}?"),
            continuation,
        });
    }
    for id in host.changed {
        model.committed += 1;
        let list = &model.screen.list;
        let Some(item) = list.position(id).and_then(|index| list.get(index)) else {
            continue;
        };
        let message = change_message(item, list.resources());
        model.show_toast(ToastLevel::Info, message);
    }
}

fn change_message(item: &SettingsItem, resources: &dyn ResourceProvider) -> String {
    let title = item.resolve_title(resources);
    if item.shows_switch() {
        let state = if item.is_checked() { "on" } else { "off" };
        return format!("{title} turned {state}");
    }
    match item.value_label(resources) {
        Some(label) => format!("{title} set to {label}"),
        None => format!("{title} changed"),
    }
}

/// The terminal screen's side of the host contract.
///
/// Gated presses are held back until the user answers the prompt; every
/// change is recorded for the status toast.
#[derive(Debug, Default)]
struct ScreenHost {
    gate: bool,
    deferred: Option<Continuation>,
    changed: Vec<ItemId>,
}

impl ScreenHost {
    fn new(gate: bool) -> Self {
        Self {
            gate,
            ..Self::default()
        }
    }
}

impl Host for ScreenHost {
    fn on_item_pressed(
        &mut self,
        surface: SurfaceId,
        item: &SettingsItem,
        continuation: Continuation,
    ) -> Option<Continuation> {
        if self.gate {
            tracing::debug!(%surface, item = %item.id(), "press held for confirmation");
            self.deferred = Some(continuation);
            return None;
        }
        Some(continuation)
    }

    fn on_item_changed(&mut self, surface: SurfaceId, item: &SettingsItem) {
        tracing::info!(
            %surface,
            item = %item.id(),
            key = item.key(),
            value = ?item.value(),
            "setting changed"
        );
        self.changed.push(item.id());
    }
}
