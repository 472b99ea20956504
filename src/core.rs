//! Core runtime logic for trek.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory reading under the hidden-file, sort and capacity policy.
//! - [history]: back/forward navigation stacks.
//! - [filter]: extension, category and name filters.
//! - [search]: bounded breadth-first search with cancellation.
//! - [preview]: preview providers for the right-hand pane.
//! - [worker]: background threads for search and preview.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//!
//! Most callers will import [DirReader], [Entry] and [CoreError] from this module.

pub mod error;
pub mod filter;
pub mod fm;
pub mod formatter;
pub mod history;
pub mod preview;
pub mod search;
pub mod terminal;
pub mod worker;

pub use error::{CoreError, CoreResult};
pub use filter::{Category, FilterMatcher, FilterSpec};
pub use fm::{DirReader, DirectoryListing, Entry, EntryKind};
pub use formatter::{fit_with_ellipsis, format_file_size, format_file_time, sanitize_to_exact_width};
pub use history::NavHistory;
pub use preview::{PreviewDescription, PreviewKind, PreviewOptions, PreviewRegistry};
pub use search::{Search, SearchOptions, SearchResult, search};
