//! UI pane drawing module for trek.
//!
//! This module provides the drawers for the file list and the preview pane.
//! Used internally by ui::render

use crate::app::{AppState, Mode};
use crate::core::{Entry, EntryKind, fit_with_ellipsis, format_file_size};
use crate::ui::widgets::{self, ACCENT, DIRECTORY, MUTED, SELECTION};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use std::path::Path;

const HIGHLIGHT_SYMBOL: &str = "> ";
const SIZE_COLUMN: usize = 9;

/// Draws the main file list pane: the directory listing, or the search results.
pub fn draw_main(frame: &mut Frame, app: &AppState, area: Rect) {
    let title = match app.mode() {
        Mode::Searching => " Search ",
        _ => " Files ",
    };
    let block = widgets::pane_block(title);
    let entries = app.visible_entries();

    if entries.is_empty() {
        let placeholder = empty_placeholder(app);
        let line = Line::from(Span::styled(placeholder, Style::default().fg(MUTED)));
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    // borders and the highlight symbol
    let row_width = (area.width as usize).saturating_sub(2 + HIGHLIGHT_SYMBOL.len());
    let search_root = match app.mode() {
        Mode::Searching => app.search().root(),
        _ => None,
    };

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| make_entry_row(entry, search_root, row_width))
        .collect();

    let mut state = ListState::default();
    state.select(app.visible_selected());

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(SELECTION).add_modifier(Modifier::BOLD))
            .highlight_symbol(HIGHLIGHT_SYMBOL),
        area,
        &mut state,
    );
}

/// Draws the preview pane with the description delivered by the preview worker.
pub fn draw_preview(frame: &mut Frame, app: &AppState, area: Rect) {
    let Some(desc) = app.preview().description() else {
        let text = if app.preview().is_loading() {
            "Loading..."
        } else {
            ""
        };
        let line = Line::from(Span::styled(text, Style::default().fg(MUTED)));
        frame.render_widget(
            Paragraph::new(line).block(widgets::pane_block(" Preview ")),
            area,
        );
        return;
    };

    let mut lines = Vec::with_capacity(desc.fields.len() + desc.lines.len() + 2);
    lines.push(Line::from(Span::styled(
        desc.kind_label.clone(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    for (label, value) in &desc.fields {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(MUTED)),
            Span::raw(value.clone()),
        ]));
    }
    if !desc.lines.is_empty() {
        lines.push(Line::default());
        lines.extend(desc.lines.iter().map(|l| Line::raw(l.clone())));
    }

    let title = format!(" {} ", desc.title);
    frame.render_widget(
        Paragraph::new(lines)
            .block(widgets::pane_block(&title))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn empty_placeholder(app: &AppState) -> &'static str {
    match app.mode() {
        Mode::Searching if app.search().in_flight() => "[Searching...]",
        Mode::Searching if app.search().last_query().is_empty() => "[Type to search]",
        Mode::Searching => "[No matches]",
        _ if !app.nav().filter().is_all() => "[No results for this filter]",
        _ if app.nav().listing().error().is_some() => "[Unreadable]",
        _ => "[Empty]",
    }
}

/// Builds one list row: the name (relative to `root` for search results) and, for files, the
/// size in a right-aligned column.
fn make_entry_row<'a>(entry: &Entry, root: Option<&Path>, width: usize) -> ListItem<'a> {
    let mut name = match root.and_then(|r| entry.path().strip_prefix(r).ok()) {
        Some(rel) => rel.display().to_string(),
        None => entry.name().to_string(),
    };
    if entry.is_dir() {
        name.push('/');
    }

    let style = match entry.kind() {
        EntryKind::Directory => Style::default().fg(DIRECTORY).add_modifier(Modifier::BOLD),
        EntryKind::BrokenSymlink => Style::default().fg(MUTED).add_modifier(Modifier::CROSSED_OUT),
        EntryKind::File => Style::default(),
    };

    let line = if entry.is_dir() || width <= SIZE_COLUMN + 1 {
        Line::from(Span::styled(fit_with_ellipsis(&name, width), style))
    } else {
        let size = format_file_size(entry.size(), false);
        Line::from(vec![
            Span::styled(fit_with_ellipsis(&name, width - SIZE_COLUMN - 1), style),
            Span::raw(" "),
            Span::styled(
                format!("{:>width$}", size, width = SIZE_COLUMN),
                Style::default().fg(MUTED),
            ),
        ])
    };
    ListItem::new(line)
}
