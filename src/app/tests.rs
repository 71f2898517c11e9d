use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use crate::item::ItemValue;
use crate::screen::Screen;
use crate::text::Catalog;

use super::{App, Message, Model, ToastLevel, update};

const WIFI: usize = 1;
const AIRPLANE: usize = 2;
const HOSTNAME: usize = 3;
const SSH_PORT: usize = 4;
const THEME: usize = 7;
const REGION: usize = 9;
const BLUETOOTH: usize = 10;

fn demo_screen() -> Screen {
    let catalog = Catalog::from_json(include_str!("../../demos/catalog.json"), "en").unwrap();
    Screen::from_json(include_str!("../../demos/screen.json"), catalog).unwrap()
}

fn create_test_model() -> Model {
    Model::new(demo_screen(), (80, 24))
}

fn model_at(index: usize) -> Model {
    let mut model = create_test_model();
    model.selected = index;
    model
}

fn value_at(model: &Model, index: usize) -> Option<ItemValue> {
    model.screen.list.get(index).and_then(|item| item.value())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(model: Model, text: &str) -> Model {
    text.chars()
        .fold(model, |model, ch| update(model, Message::EntryInsertChar(ch)))
}

#[test]
fn test_selection_starts_on_first_editable_row() {
    let model = create_test_model();
    assert_eq!(model.selected, WIFI);
}

#[test]
fn test_select_next_skips_blank_and_section_rows() {
    let model = model_at(SSH_PORT);
    let model = update(model, Message::SelectNext);
    assert_eq!(model.selected, THEME);
    let model = update(model, Message::SelectPrev);
    assert_eq!(model.selected, SSH_PORT);
}

#[test]
fn test_select_first_and_last() {
    let model = model_at(THEME);
    let model = update(model, Message::SelectLast);
    assert_eq!(model.selected, BLUETOOTH);
    let model = update(model, Message::SelectNext);
    assert_eq!(model.selected, BLUETOOTH, "no row past the last one");
    let model = update(model, Message::SelectFirst);
    assert_eq!(model.selected, WIFI);
}

#[test]
fn test_press_toggle_flips_and_reports_change() {
    let model = update(model_at(WIFI), Message::Press);
    assert_eq!(value_at(&model, WIFI), Some(ItemValue::Bool(false)));
    assert_eq!(model.committed, 1);
    assert_eq!(
        model.active_toast(),
        Some(("Wi-Fi turned off", ToastLevel::Info))
    );
    assert!(!model.screen.list.is_surface_open());
}

#[test]
fn test_confirm_item_waits_for_prompt() {
    let model = update(model_at(AIRPLANE), Message::Press);
    assert_eq!(value_at(&model, AIRPLANE), Some(ItemValue::Bool(false)));
    assert_eq!(model.committed, 0);
    let prompt = model.prompt.as_ref().unwrap();
    assert_eq!(prompt.question, "Change Airplane mode?");

    let model = update(model, Message::PromptAccept);
    assert!(model.prompt.is_none());
    assert_eq!(value_at(&model, AIRPLANE), Some(ItemValue::Bool(true)));
    assert_eq!(model.committed, 1);
}

#[test]
fn test_declined_prompt_abandons_the_edit() {
    let model = update(model_at(AIRPLANE), Message::Press);
    let model = update(model, Message::PromptDecline);
    assert!(model.prompt.is_none());
    assert_eq!(value_at(&model, AIRPLANE), Some(ItemValue::Bool(false)));
    assert!(!model.screen.list.get(AIRPLANE).unwrap().is_pending());
    assert_eq!(model.committed, 0);
}

#[test]
fn test_no_confirm_skips_prompt() {
    let model = model_at(AIRPLANE).with_confirm(false);
    let model = update(model, Message::Press);
    assert!(model.prompt.is_none());
    assert_eq!(value_at(&model, AIRPLANE), Some(ItemValue::Bool(true)));
}

#[test]
fn test_input_edit_commits_on_confirm() {
    let model = update(model_at(HOSTNAME), Message::Press);
    let entry = model
        .screen
        .list
        .surface()
        .and_then(|open| open.editor().text_entry())
        .unwrap();
    assert_eq!(entry.text(), "raspberrypi");

    let model = type_text(model, "-2");
    let model = update(model, Message::Confirm);
    assert!(!model.screen.list.is_surface_open());
    assert_eq!(
        value_at(&model, HOSTNAME),
        Some(ItemValue::Text("raspberrypi-2".into()))
    );
    assert_eq!(model.committed, 1);
    assert_eq!(
        model.active_toast(),
        Some(("Device name set to raspberrypi-2", ToastLevel::Info))
    );
}

#[test]
fn test_invalid_input_keeps_surface_open() {
    let model = update(model_at(SSH_PORT), Message::Press);
    let model = update(model, Message::EntryClear);
    let model = type_text(model, "ssh");
    let model = update(model, Message::Confirm);

    assert!(model.screen.list.is_surface_open());
    assert_eq!(value_at(&model, SSH_PORT), Some(ItemValue::Text("22".into())));
    assert_eq!(model.committed, 0);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );

    let model = update(model, Message::Cancel);
    assert!(!model.screen.list.is_surface_open());
    assert_eq!(value_at(&model, SSH_PORT), Some(ItemValue::Text("22".into())));
    assert_eq!(model.committed, 0);
}

#[test]
fn test_entry_editing_messages_move_cursor_and_delete() {
    let model = update(model_at(SSH_PORT), Message::Press);
    let model = update(model, Message::EntryMoveHome);
    let model = update(model, Message::EntryInsertChar('8'));
    let model = update(model, Message::EntryMoveEnd);
    let model = update(model, Message::EntryDeleteBack);
    let model = update(model, Message::EntryPaste("00".into()));
    let model = update(model, Message::Confirm);
    assert_eq!(
        value_at(&model, SSH_PORT),
        Some(ItemValue::Text("8200".into()))
    );
}

#[test]
fn test_selector_choice_commits_highlighted_entry() {
    let model = update(model_at(THEME), Message::Press);
    let choices = model
        .screen
        .list
        .surface()
        .and_then(|open| open.editor().choice())
        .unwrap();
    assert_eq!(choices.highlighted(), 2);
    assert_eq!(choices.entries()[0], "Light");

    let model = update(model, Message::ChoicePrev);
    let model = update(model, Message::Confirm);
    assert!(!model.screen.list.is_surface_open());
    assert_eq!(value_at(&model, THEME), Some(ItemValue::Index(1)));
    assert_eq!(
        model.active_toast(),
        Some(("Theme set to Dark", ToastLevel::Info))
    );
}

#[test]
fn test_selector_choose_by_number() {
    let model = update(model_at(THEME), Message::Press);
    let model = update(model, Message::Choose(0));
    assert_eq!(value_at(&model, THEME), Some(ItemValue::Index(0)));
    assert_eq!(model.committed, 1);
}

#[test]
fn test_empty_selector_press_warns_without_opening() {
    let model = update(model_at(REGION), Message::Press);
    assert!(!model.screen.list.is_surface_open());
    assert_eq!(model.committed, 0);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
    assert!(message.contains("nothing to choose from"), "{message}");
}

#[test]
fn test_disabled_item_press_is_ignored() {
    let model = update(model_at(BLUETOOTH), Message::Press);
    assert_eq!(value_at(&model, BLUETOOTH), Some(ItemValue::Bool(false)));
    assert_eq!(
        model.active_toast(),
        Some(("Bluetooth is disabled", ToastLevel::Info))
    );
}

#[test]
fn test_reload_preferences_refreshes_without_counting_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, include_str!("../../demos/prefs.json")).unwrap();

    let mut model = create_test_model().with_prefs_path(Some(path));
    let msg = Message::ReloadPreferences;
    model = update(model, msg.clone());
    App::handle_message_side_effects(&mut model, &msg);

    assert_eq!(value_at(&model, WIFI), Some(ItemValue::Bool(false)));
    assert_eq!(
        value_at(&model, HOSTNAME),
        Some(ItemValue::Text("kitchen-pi".into()))
    );
    assert_eq!(value_at(&model, THEME), Some(ItemValue::Index(1)));
    assert_eq!(value_at(&model, THEME + 1), Some(ItemValue::Index(2)));
    assert_eq!(model.committed, 0);
    assert_eq!(
        model.active_toast(),
        Some(("Reloaded, 4 values changed", ToastLevel::Info))
    );
}

#[test]
fn test_reload_without_prefs_file_warns() {
    let mut model = create_test_model();
    App::handle_message_side_effects(&mut model, &Message::ReloadPreferences);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );
}

#[test]
fn test_reload_with_bad_file_reports_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "not json").unwrap();

    let mut model = create_test_model().with_prefs_path(Some(path));
    App::handle_message_side_effects(&mut model, &Message::ReloadPreferences);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Error)
    );
}

#[test]
fn test_resize_keeps_selection_visible() {
    let model = model_at(WIFI);
    let model = update(model, Message::Resize(80, 6));
    assert_eq!(model.viewport.height(), 3);
    let model = update(model, Message::SelectLast);
    assert!(model.viewport.visible_range().contains(&BLUETOOTH));
}

#[test]
fn test_select_keeps_section_header_in_view() {
    let model = update(create_test_model(), Message::Resize(80, 7));
    let model = update(model, Message::SelectLast);
    let model = update(model, Message::SelectFirst);
    assert_eq!(model.viewport.offset(), 0, "Network header stays visible");
}

#[test]
fn test_help_toggles() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_keys_in_list_mode() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::SelectNext)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Up), &model),
        Some(Message::SelectPrev)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char(' ')), &model),
        Some(Message::Press)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('r')), &model),
        Some(Message::ReloadPreferences)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::Quit)
    );
}

#[test]
fn test_keys_in_text_entry_are_typed() {
    let model = update(model_at(HOSTNAME), Message::Press);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::EntryInsertChar('q'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::Confirm)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::Cancel)
    );
    assert_eq!(
        App::handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL), &model),
        Some(Message::EntryMoveWordLeft)
    );
    assert_eq!(
        App::handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &model),
        Some(Message::Quit)
    );
}

#[test]
fn test_paste_only_reaches_text_entry() {
    let paste = Event::Paste("abc".into());
    let model = create_test_model();
    assert_eq!(App::handle_event(&paste, &model), None);

    let model = update(model_at(HOSTNAME), Message::Press);
    assert_eq!(
        App::handle_event(&paste, &model),
        Some(Message::EntryPaste("abc".into()))
    );
}

#[test]
fn test_multiline_paste_keeps_entry_open() {
    let model = update(model_at(HOSTNAME), Message::Press);
    let model = update(model, Message::EntryPaste("kitchen\nrm -rf".into()));

    let open = model.screen.list.surface().unwrap();
    let text = open.editor().text_entry().unwrap().text();
    assert_eq!(text, "raspberrypikitchen");
    assert_eq!(model.committed, 0);
    assert_eq!(
        value_at(&model, HOSTNAME),
        Some(ItemValue::Text("raspberrypi".into()))
    );
}

#[test]
fn test_number_keys_choose_within_range() {
    let model = update(model_at(THEME), Message::Press);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('2')), &model),
        Some(Message::Choose(1))
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('9')), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::ChoiceNext)
    );
}

#[test]
fn test_prompt_keys() {
    let model = update(model_at(AIRPLANE), Message::Press);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('y')), &model),
        Some(Message::PromptAccept)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::PromptDecline)
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('j')), &model), None);
}

#[test]
fn test_any_key_closes_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_app_builders_reach_the_model() {
    let model = App::new(demo_screen())
        .with_confirm(false)
        .with_prefs_path(Some("prefs.json".into()))
        .with_config_paths(Some("global".into()), None)
        .into_model((80, 24));
    assert!(!model.confirm_enabled);
    assert_eq!(model.prefs_path, Some(PathBuf::from("prefs.json")));
    assert_eq!(model.config_global_path, Some(PathBuf::from("global")));
    assert_eq!(model.selected, WIFI);
}
