//! State of the recursive search prompt.
//!
//! Tracks the results of the latest search, the selection inside them, the debounce of the
//! query and the cancel token of the search in flight.

use crate::core::{Entry, SearchResult};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct SearchState {
    results: Vec<Entry>,
    root: Option<PathBuf>,
    selected: usize,
    exhausted: bool,
    request_id: u64,
    debounce: Option<Instant>,
    last_query: String,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchState {
    // Getters / Accessors

    pub fn results(&self) -> &[Entry] {
        &self.results
    }

    /// Directory the shown results were searched from.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.results.get(self.selected)
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// True while a search is running in the background.
    pub fn in_flight(&self) -> bool {
        self.cancel.is_some()
    }

    // Selection

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.results.is_empty() {
            return false;
        }
        let target = self
            .selected
            .saturating_add_signed(delta)
            .min(self.results.len() - 1);
        let moved = target != self.selected;
        self.selected = target;
        moved
    }

    pub fn jump_top(&mut self) -> bool {
        let moved = self.selected != 0;
        self.selected = 0;
        moved
    }

    pub fn jump_bottom(&mut self) -> bool {
        let last = self.results.len().saturating_sub(1);
        let moved = self.selected != last;
        self.selected = last;
        moved
    }

    // Requests

    pub fn set_debounce(&mut self, delay: Duration) {
        self.debounce = Some(Instant::now() + delay);
    }

    pub fn has_debounce(&self) -> bool {
        self.debounce.is_some()
    }

    /// Returns the query once the debounce expired and the query differs from the last one.
    pub fn take_query(&mut self, current_query: &str) -> Option<String> {
        let until = self.debounce?;
        if Instant::now() < until {
            return None;
        }
        self.debounce = None;
        if current_query == self.last_query {
            return None;
        }
        Some(current_query.to_string())
    }

    /// Starts a new request for `query`, cancelling the one in flight.
    /// Returns the new request id and its cancel token.
    pub fn begin(&mut self, query: &str) -> (u64, Arc<AtomicBool>) {
        self.cancel_current();
        self.debounce = None;
        self.last_query.clear();
        self.last_query.push_str(query);

        let token = Arc::new(AtomicBool::new(false));
        self.cancel = Some(Arc::clone(&token));
        (self.request_id, token)
    }

    /// Stores a finished search. Returns `false` when it answers an outdated request.
    pub fn apply(&mut self, root: PathBuf, result: SearchResult, request_id: u64) -> bool {
        if request_id != self.request_id {
            return false;
        }
        self.cancel = None;
        self.exhausted = result.exhausted();
        self.results = result.matches().to_vec();
        self.root = Some(root);
        self.selected = 0;
        true
    }

    /// Cancels the search in flight and retires its id, so a response that is already
    /// queued can no longer be applied.
    pub fn cancel_current(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.store(true, Ordering::Release);
        }
        self.request_id = self.request_id.wrapping_add(1);
    }

    /// Drops results and the query and retires the current request id.
    pub fn reset(&mut self) {
        self.cancel_current();
        self.results.clear();
        self.root = None;
        self.selected = 0;
        self.exhausted = false;
        self.debounce = None;
        self.last_query.clear();
    }
}
