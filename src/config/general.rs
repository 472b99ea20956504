//! The general configuration settings for trek.
//!
//! This module defines the [General] struct for deserializing the `[general]` table of
//! trek.toml and the [InternalGeneral] struct used at runtime, with every limit clamped
//! into a safe range.

use crate::core::fm::DEFAULT_DIR_CAPACITY;
use crate::core::search::{DEFAULT_MAX_RESULTS, DEFAULT_MAX_VISITED_DIRS, SearchOptions};
use crate::utils::clamp_setting;

use serde::Deserialize;

use std::time::Duration;

pub const DEFAULT_SEARCH_MIN_CHARS: usize = 2;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    max_entries: usize,
    max_search_results: usize,
    max_visited_dirs: usize,
    search_min_chars: usize,
    search_debounce_ms: u64,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            max_entries: DEFAULT_DIR_CAPACITY,
            max_search_results: DEFAULT_MAX_RESULTS,
            max_visited_dirs: DEFAULT_MAX_VISITED_DIRS,
            search_min_chars: DEFAULT_SEARCH_MIN_CHARS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalGeneral {
    show_hidden: bool,
    max_entries: usize,
    max_search_results: usize,
    max_visited_dirs: usize,
    search_min_chars: usize,
    search_debounce: Duration,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let debounce_ms =
            clamp_setting("search_debounce_ms", g.search_debounce_ms as usize, 0, 5000);
        Self {
            show_hidden: g.show_hidden,
            max_entries: clamp_setting("max_entries", g.max_entries, 10, 100_000),
            max_search_results: clamp_setting(
                "max_search_results",
                g.max_search_results,
                1,
                100_000,
            ),
            max_visited_dirs: clamp_setting("max_visited_dirs", g.max_visited_dirs, 1, 1_000_000),
            search_min_chars: clamp_setting("search_min_chars", g.search_min_chars, 1, 32),
            search_debounce: Duration::from_millis(debounce_ms as u64),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[inline]
    pub fn max_search_results(&self) -> usize {
        self.max_search_results
    }

    #[inline]
    pub fn max_visited_dirs(&self) -> usize {
        self.max_visited_dirs
    }

    #[inline]
    pub fn search_min_chars(&self) -> usize {
        self.search_min_chars
    }

    #[inline]
    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    /// Search limits for a search run with the given hidden-file policy.
    pub fn search_options(&self, show_hidden: bool) -> SearchOptions {
        SearchOptions {
            max_results: self.max_search_results,
            max_visited_dirs: self.max_visited_dirs,
            show_hidden,
            dir_capacity: self.max_entries,
        }
    }
}
