use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::{Direction, SurfaceBody};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Paste(text) => model
                .screen
                .list
                .surface()
                .and_then(|open| open.editor().text_entry())
                .map(|_| Message::EntryPaste(text.clone())),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.prompt.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::PromptAccept),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::PromptDecline),
                _ => None,
            };
        }

        if let Some(open) = model.screen.list.surface() {
            return match &open.editor().body {
                SurfaceBody::TextEntry(_) => Self::handle_entry_key(key),
                SurfaceBody::Choice(choices) => match key.code {
                    KeyCode::Char('j') | KeyCode::Down => Some(Message::ChoiceNext),
                    KeyCode::Char('k') | KeyCode::Up => Some(Message::ChoicePrev),
                    KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Confirm),
                    KeyCode::Esc | KeyCode::Char('q') => Some(Message::Cancel),
                    KeyCode::Char(c @ '1'..='9') => {
                        let choice = (c as usize) - ('1' as usize);
                        (choice < choices.len()).then_some(Message::Choose(choice))
                    }
                    _ => None,
                },
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Message::SelectNext),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Message::SelectPrev),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::SelectFirst),
            KeyCode::Char('G') | KeyCode::End => Some(Message::SelectLast),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Press),
            KeyCode::Char('r') => Some(Message::ReloadPreferences),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    fn handle_entry_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => Some(Message::Confirm),
            KeyCode::Esc => Some(Message::Cancel),
            KeyCode::Backspace => Some(Message::EntryDeleteBack),
            KeyCode::Delete => Some(Message::EntryDeleteForward),
            KeyCode::Left if ctrl => Some(Message::EntryMoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::EntryMoveWordRight),
            KeyCode::Left => Some(Message::EntryMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EntryMoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::EntryMoveHome),
            KeyCode::End => Some(Message::EntryMoveEnd),
            KeyCode::Char('a') if ctrl => Some(Message::EntryMoveHome),
            KeyCode::Char('e') if ctrl => Some(Message::EntryMoveEnd),
            KeyCode::Char('u') if ctrl => Some(Message::EntryClear),
            KeyCode::Char(c)
                if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::EntryInsertChar(c))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
