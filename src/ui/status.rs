use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::style;

/// Description of the highlighted item, under the list.
pub fn render_description_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let list = &model.screen.list;
    let Some(item) = list.get(model.selected) else {
        return;
    };
    let description = item.resolve_description(list.resources());
    let text = match (item.icon(), description.is_empty()) {
        (Some(icon), false) => format!(" [{icon}] {description}"),
        (Some(icon), true) => format!(" [{icon}]"),
        (None, _) => format!(" {description}"),
    };
    frame.render_widget(
        Paragraph::new(text).style(style::description_style()),
        area,
    );
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let list = &model.screen.list;
    let position = if list.is_empty() {
        "empty".to_string()
    } else {
        format!("{}/{}", model.selected + 1, list.len())
    };
    let changed = match model.committed {
        0 => String::new(),
        1 => "  [1 change]".to_string(),
        n => format!("  [{n} changes]"),
    };
    let confirm = if model.confirm_enabled {
        ""
    } else {
        "  [no confirm]"
    };

    let status = format!(" {position}{changed}{confirm}  ?:help");
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
