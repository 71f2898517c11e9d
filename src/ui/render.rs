use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::item::{ItemKind, LayoutKind, SettingsItem};
use crate::text::ResourceProvider;

use super::{ROW_LEFT_PADDING, overlays, status, style};

/// Split the terminal into title bar, list, description line and status bar.
pub fn split_screen(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let chunks = split_screen(area);

    render_title_bar(model, frame, chunks[0]);
    render_list(model, frame, chunks[1]);
    status::render_description_bar(model, frame, chunks[2]);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, chunks[3]);
    } else {
        status::render_status_bar(model, frame, chunks[3]);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.prompt.is_some() {
        overlays::render_prompt_overlay(model, frame, area);
    } else if model.screen.list.is_surface_open() {
        overlays::render_editor_overlay(model, frame, area);
    }
}

fn render_title_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let title = model.screen.resolve_title();
    let title = if title.is_empty() {
        "Settings".to_string()
    } else {
        title
    };
    let bar = Paragraph::new(format!(" {title}")).style(style::title_bar_style());
    frame.render_widget(bar, area);
}

fn render_list(model: &Model, frame: &mut Frame, area: Rect) {
    let list = &model.screen.list;
    let resources = list.resources();
    let width = area.width as usize;

    let lines: Vec<Line> = model
        .viewport
        .visible_range()
        .filter_map(|index| {
            let item = list.get(index)?;
            Some(row_line(item, resources, width, index == model.selected))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// One row of the list, drawn with the item's layout template.
pub fn row_line(
    item: &SettingsItem,
    resources: &dyn ResourceProvider,
    width: usize,
    selected: bool,
) -> Line<'static> {
    let title = item.resolve_title(resources);
    match item.layout_kind() {
        LayoutKind::Section => Line::styled(format!(" {title}"), style::section_style()),
        LayoutKind::Item => item_row(item, resources, title, width, selected),
    }
}

/// Title on the left, switch or value on the right.
fn item_row(
    item: &SettingsItem,
    resources: &dyn ResourceProvider,
    title: String,
    width: usize,
    selected: bool,
) -> Line<'static> {
    let pad = " ".repeat(ROW_LEFT_PADDING as usize);
    let empty_selector =
        matches!(item.kind(), ItemKind::Selector { .. }) && !item.has_choices(resources);

    let (trailing, trailing_style) = match item.kind() {
        ItemKind::Blank | ItemKind::Section => return Line::raw(""),
        ItemKind::Toggle(_) => {
            let checked = item.is_checked();
            let switch = if checked { "[x]" } else { "[ ]" };
            (switch.to_string(), style::switch_style(checked))
        }
        ItemKind::Selector { .. } if empty_selector => {
            ("(no choices)".to_string(), style::inactive_style())
        }
        ItemKind::Input { .. } | ItemKind::Selector { .. } => (
            item.value_label(resources).unwrap_or_default(),
            style::value_style(),
        ),
    };

    let used = pad.width() + title.width() + trailing.width() + 1;
    let gap = " ".repeat(width.saturating_sub(used).max(1));
    let inactive = !item.is_enabled() || empty_selector;

    let mut line = Line::from(vec![
        Span::raw(pad),
        Span::raw(title),
        Span::raw(gap),
        Span::styled(trailing, trailing_style),
        Span::raw(" "),
    ]);
    if inactive {
        line = line.patch_style(style::inactive_style());
    }
    if selected {
        line = line.patch_style(style::selected_row_style());
    }
    line
}
