use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::editor::{ChoiceList, Editor, EntryBuffer, SurfaceBody};

use super::style;

/// Popup for the open editor surface of the list.
pub fn render_editor_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(open) = model.screen.list.surface() else {
        return;
    };
    let editor = open.editor();
    let body_rows = editor.dialog.body.as_ref().map_or(0, |_| 2);
    let content_rows = match &editor.body {
        SurfaceBody::TextEntry(_) => 1,
        #[allow(clippy::cast_possible_truncation)]
        SurfaceBody::Choice(choices) => choices.len().min(u16::MAX as usize) as u16,
    };
    // border(2) + padding(2) + body + content + blank + footer
    let popup_height = (content_rows + body_rows + 6).min(area.height.saturating_sub(2).max(6));
    let popup_width = area.width.saturating_sub(16).clamp(24.min(area.width), 60);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title(editor.dialog.title.clone())
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(style::popup_style());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    if inner.height < 3 || inner.width == 0 {
        return;
    }

    let mut y = inner.y + 1;
    if let Some(body) = &editor.dialog.body {
        let body_area = Rect::new(inner.x, y, inner.width, 1);
        frame.render_widget(
            Paragraph::new(body.clone())
                .style(style::description_style())
                .wrap(Wrap { trim: true }),
            body_area,
        );
        y += 2;
    }

    let footer_y = inner.y + inner.height.saturating_sub(1);
    let content_height = footer_y.saturating_sub(y + 1);
    let content_area = Rect::new(inner.x, y, inner.width, content_height.max(1));
    match &editor.body {
        SurfaceBody::TextEntry(buffer) => render_entry_field(buffer, frame, content_area),
        SurfaceBody::Choice(choices) => render_choices(choices, frame, content_area),
    }

    let footer_area = Rect::new(inner.x, footer_y, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled(footer_hint(editor), style::hint_style())),
        footer_area,
    );
}

fn footer_hint(editor: &Editor) -> String {
    let negative = &editor.dialog.negative;
    match (&editor.body, &editor.dialog.positive) {
        (SurfaceBody::TextEntry(_), Some(positive)) => {
            format!("Enter {positive} \u{2502} Esc {negative}")
        }
        (SurfaceBody::Choice(_), _) => format!("1-9/Enter choose \u{2502} Esc {negative}"),
        (SurfaceBody::TextEntry(_), None) => format!("Esc {negative}"),
    }
}

fn render_entry_field(buffer: &EntryBuffer, frame: &mut Frame, area: Rect) {
    let field_width = area.width as usize;
    if field_width == 0 {
        return;
    }
    let cursor_col = buffer.cursor_column();
    let skip = (cursor_col + 1).saturating_sub(field_width);
    let visible = visible_columns(buffer.text(), skip, field_width);

    let field = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().add_modifier(Modifier::UNDERLINED)),
        field,
    );
    #[allow(clippy::cast_possible_truncation)]
    let x = area.x + (cursor_col - skip).min(field_width - 1) as u16;
    frame.set_cursor_position((x, area.y));
}

/// The part of `text` between display columns `skip` and `skip + width`.
pub fn visible_columns(text: &str, skip: usize, width: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if col >= skip && col + w <= skip + width {
            out.push(ch);
        }
        col += w;
        if col >= skip + width {
            break;
        }
    }
    out
}

fn render_choices(choices: &ChoiceList, frame: &mut Frame, area: Rect) {
    let rows = area.height as usize;
    let highlighted = choices.highlighted();
    let start = (highlighted + 1).saturating_sub(rows);

    let lines: Vec<Line> = choices
        .entries()
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(idx, label)| {
            let marker = if idx == highlighted { "(*)" } else { "( )" };
            let number = if idx < 9 {
                format!("{}: ", idx + 1)
            } else {
                "   ".to_string()
            };
            let line = Line::from(vec![
                Span::styled(number, style::choice_number_style()),
                Span::raw(format!("{marker} {label}")),
            ]);
            if idx == highlighted {
                line.patch_style(style::selected_row_style())
            } else {
                line
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// "Are you sure?" popup for a press held by the host.
pub fn render_prompt_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = model.prompt.as_ref() else {
        return;
    };
    let popup_width = area.width.saturating_sub(16).clamp(24.min(area.width), 50);
    let popup = centered_popup_rect(popup_width, 7, area);

    let lines = vec![
        Line::styled(
            prompt.question.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("y/Enter yes \u{2502} n/Esc no", style::hint_style()),
    ];
    let block = Block::default()
        .title("Confirm")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style::popup_style());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let prefs = model
        .prefs_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = style::section_style();
    let lines = vec![
        Line::styled("List", section_style),
        Line::raw("  j/k or Up/Down      Move"),
        Line::raw("  g / G               First / last"),
        Line::raw("  Enter / Space       Edit or toggle"),
        Line::raw("  r                   Reload preferences"),
        Line::raw(""),
        Line::styled("Editing", section_style),
        Line::raw("  Enter               Confirm"),
        Line::raw("  Esc                 Cancel"),
        Line::raw("  1-9                 Choose entry"),
        Line::raw("  Ctrl-u              Clear text"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  q / Ctrl-c          Quit"),
        Line::raw("  ? / F1              Toggle help"),
        Line::raw(""),
        Line::styled("Files", section_style),
        Line::raw(format!("  Preferences: {prefs}")),
        Line::raw(format!("  Global config: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style::popup_style());
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_columns_skips_and_truncates() {
        assert_eq!(visible_columns("hello world", 0, 5), "hello");
        assert_eq!(visible_columns("hello world", 6, 5), "world");
    }

    #[test]
    fn test_visible_columns_drops_split_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(visible_columns("日本語", 1, 4), "本");
    }

    #[test]
    fn test_centered_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_popup_rect(40, 4, area);
        assert_eq!(popup, Rect::new(0, 3, 20, 4));
    }
}
