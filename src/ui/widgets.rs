//! Header, footer and block helpers for trek.
//!
//! The header shows the current path, the footer the prompt, notices, key hints and the
//! entry count.

use crate::app::{AppState, Mode};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ACCENT: Color = Color::Cyan;
pub const DIRECTORY: Color = Color::Blue;
pub const MUTED: Color = Color::DarkGray;
pub const SELECTION: Color = Color::Rgb(50, 54, 62);
pub const ERROR: Color = Color::Red;

const KEY_HINTS: &str = "j/k move  l open  h back  L fwd  / search  f filter  . hidden  ~ home  q quit";

pub fn pane_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title.to_string())
}

/// Draws the path header: the current directory, the hidden marker and the active filter.
pub fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(
        shorten_home_path(app.nav().current_dir()),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if app.nav().show_hidden() {
        spans.push(Span::styled(" (hidden: on)", Style::default().fg(MUTED)));
    }
    if !app.nav().filter().is_all() && app.mode() != Mode::Filtering {
        spans.push(Span::styled(
            format!("  filter: {}", app.nav().filter()),
            Style::default().fg(MUTED),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws the footer: prompt, notice or key hints on the left, entry count on the right.
pub fn draw_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let right = status_text(app);
    let right_width = (right.width() as u16 + 1).min(area.width);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);
    let (left_area, right_area) = (cols[0], cols[1]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(right, Style::default().fg(MUTED))))
            .alignment(Alignment::Right),
        right_area,
    );

    if app.actions().is_input_mode() {
        draw_prompt(frame, app, left_area);
        return;
    }

    let line = match app.notice() {
        Some(notice) => {
            let color = if notice.is_error() { ERROR } else { ACCENT };
            Line::from(Span::styled(notice.text().to_string(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(MUTED))),
    };
    frame.render_widget(Paragraph::new(line), left_area);
}

/// Draws the search or filter prompt and places the terminal cursor in it.
fn draw_prompt(frame: &mut Frame, app: &AppState, area: Rect) {
    let prompt = app.mode().prompt();
    let prompt_width = prompt.width();
    let visible_width = (area.width as usize).saturating_sub(prompt_width + 1);
    let (visible, cursor_offset) = input_field_view(
        app.actions().input_buffer(),
        app.actions().input_cursor_pos(),
        visible_width,
    );

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(visible.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let x = area.x + (prompt_width + cursor_offset).min(area.width as usize) as u16;
    frame.set_cursor_position(Position::new(x, area.y));
}

/// Right side of the footer: the notice while a prompt is open, then "selected/total".
/// A trailing '+' marks a capped listing or an incomplete search.
fn status_text(app: &AppState) -> String {
    let mut parts = Vec::new();
    if app.actions().is_input_mode()
        && let Some(notice) = app.notice()
    {
        parts.push(notice.text().to_string());
    }

    let total = app.visible_entries().len();
    let capped = match app.mode() {
        Mode::Searching => total > 0 && !app.search().exhausted(),
        _ => app.nav().listing().truncated(),
    };
    let idx = app.visible_selected().map(|i| i + 1).unwrap_or(0);
    parts.push(format!("{}/{}{}", idx, total, if capped { "+" } else { "" }));
    parts.join(" | ")
}

/// Helper function to calculate cursor offset for cursor moving.
/// Handles horizontal truncation, variable width with unicode_width and clamps cursor to buffer.
fn input_field_view(input_text: &str, cursor_pos: usize, visible_width: usize) -> (&str, usize) {
    let cursor_pos = cursor_pos.min(input_text.len());
    if input_text.width() <= visible_width {
        return (input_text, input_text[..cursor_pos].width());
    }

    let mut current_w = 0;
    let mut start = 0;
    for (idx, ch) in input_text.char_indices().rev() {
        current_w += ch.width().unwrap_or(0);
        if current_w > visible_width {
            start = idx + ch.len_utf8();
            break;
        }
    }

    let cursor_offset = if cursor_pos < start {
        0
    } else {
        input_text[start..cursor_pos].width()
    };
    (&input_text[start..], cursor_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_view_fits_short_text() {
        assert_eq!(input_field_view("abc", 2, 10), ("abc", 2));
        assert_eq!(input_field_view("abc", 99, 10), ("abc", 3));
    }

    #[test]
    fn input_view_scrolls_to_the_end() {
        let (visible, offset) = input_field_view("abcdefghij", 10, 4);
        assert_eq!(visible, "ghij");
        assert_eq!(offset, 4);

        let (visible, offset) = input_field_view("ab🦀🦀", "ab🦀🦀".len(), 4);
        assert_eq!(visible, "🦀🦀");
        assert_eq!(offset, 4);
    }
}
