//! Display formatting for trek.
//!
//! Sizes, modification times, and the fixed-width text fitting used by the list and
//! preview panes.

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::UnicodeWidthChar;

use std::time::SystemTime;

/// Formats the file size into a human-readable string.
/// # Returns
/// A string representing the formatted file size or "-" for directories/unknown sizes.
pub fn format_file_size(size: Option<u64>, is_dir: bool) -> String {
    match size {
        Some(sz) if !is_dir => format_size(sz, DECIMAL),
        _ => "-".to_string(),
    }
}

/// Formats the file modification time into a human-readable string.
/// # Returns
/// A string representing the formatted modification time or "-" if unknown.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Fits `line` into exactly `width` terminal columns.
///
/// Control characters are dropped, tabs expand to 4-column stops, wide characters that
/// would overflow are cut, and short lines are padded with spaces.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}

/// Like [sanitize_to_exact_width] but marks cut text with a trailing '…'.
pub fn fit_with_ellipsis(line: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let full: usize = line.chars().map(|c| c.width().unwrap_or(0)).sum();
    if full <= width {
        return sanitize_to_exact_width(line, width);
    }
    let mut cut = sanitize_to_exact_width(line, width - 1)
        .trim_end()
        .to_string();
    cut.push('…');
    sanitize_to_exact_width(&cut, width)
}
