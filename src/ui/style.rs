//! Colors and text styles for the settings screen.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

pub fn title_bar_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn section_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_row_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Rows that cannot be edited right now: disabled items and selectors with
/// nothing to choose from.
pub fn inactive_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::DIM)
}

pub fn value_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn switch_style(checked: bool) -> Style {
    if checked {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Indexed(245))
    }
}

pub fn description_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::ITALIC)
}

pub fn popup_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn choice_number_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_switch_is_distinct_from_unchecked() {
        assert_ne!(switch_style(true), switch_style(false));
    }

    #[test]
    fn test_inactive_rows_are_dimmed() {
        assert!(inactive_style().add_modifier.contains(Modifier::DIM));
    }
}
