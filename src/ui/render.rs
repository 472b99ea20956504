//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helpers that split the screen into header, list, preview and footer.
//!
//! This module should stay "pure rendering": it reads state and produces widgets, without
//! owning trek core logic.

use crate::app::AppState;
use crate::ui::{panes, widgets};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Percentage of the body width given to the file list when the preview is shown.
const LIST_RATIO: u16 = 50;

/// Render function which renders the entire terminal UI for trek on each frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let (header, body, footer) = screen_areas(frame.area());

    widgets::draw_header(frame, app, header);

    let chunks = layout_chunks(body, app);
    if let Some(&list_area) = chunks.first() {
        panes::draw_main(frame, app, list_area);
    }
    if let Some(&preview_area) = chunks.get(1) {
        panes::draw_preview(frame, app, preview_area);
    }

    widgets::draw_footer(frame, app, footer);
}

/// Splits the screen into a one-line header, the body and a one-line footer.
pub fn screen_areas(size: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);
    (rows[0], rows[1], rows[2])
}

/// Returns the rectangular areas of the list pane and, when enabled, the preview pane.
pub fn layout_chunks(size: Rect, app: &AppState) -> Vec<Rect> {
    let constraints = if app.config().preview().enabled() {
        vec![
            Constraint::Percentage(LIST_RATIO),
            Constraint::Percentage(100 - LIST_RATIO),
        ]
    } else {
        vec![Constraint::Percentage(100)]
    };

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(size)
        .to_vec()
}
