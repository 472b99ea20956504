//! State of the preview pane in trek.
//!
//! Holds the latest [PreviewDescription] delivered by the preview worker, the debounce that
//! keeps fast scrolling from flooding the worker, and request tracking so stale previews are
//! never shown.

use crate::core::PreviewDescription;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const PREVIEW_DEBOUNCE: Duration = Duration::from_millis(75);

/// State and helpers for managing the preview pane.
pub struct PreviewState {
    description: Option<PreviewDescription>,
    current_path: Option<PathBuf>,
    request_id: u64,
    pending: bool,
    last_input_time: Instant,
    cancel: Option<Arc<AtomicBool>>,
}

impl PreviewState {
    // Getters/ Accessors

    pub fn description(&self) -> Option<&PreviewDescription> {
        self.description.as_ref()
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// True while the requested preview has not arrived yet.
    pub fn is_loading(&self) -> bool {
        self.current_path.is_some() && self.description.is_none()
    }

    // Setters / mutators

    /// Marks the preview as pending and updates the last input time.
    ///
    /// The selection moved away from the previewed entry, so the request in flight is
    /// cancelled and its id retired together with the shown description.
    pub fn mark_pending(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.store(true, Ordering::Release);
        }
        self.request_id = self.request_id.wrapping_add(1);
        self.description = None;
        self.pending = true;
        self.last_input_time = Instant::now();
    }

    pub fn should_trigger(&self) -> bool {
        self.pending && self.last_input_time.elapsed() > PREVIEW_DEBOUNCE
    }

    /// Prepares a new preview request for the given path.
    /// Cancels the previous request and returns the new id with its cancel token.
    pub fn prepare_new_request(&mut self, path: PathBuf) -> (u64, Arc<AtomicBool>) {
        if let Some(token) = self.cancel.take() {
            token.store(true, Ordering::Release);
        }
        self.request_id = self.request_id.wrapping_add(1);
        if self.current_path.as_ref() != Some(&path) {
            self.description = None;
        }
        self.current_path = Some(path);
        self.pending = false;

        let token = Arc::new(AtomicBool::new(false));
        self.cancel = Some(Arc::clone(&token));
        (self.request_id, token)
    }

    /// Applies a worker description if both the request id and the path still match.
    pub fn update(
        &mut self,
        path: &Path,
        description: PreviewDescription,
        request_id: u64,
    ) -> bool {
        if request_id != self.request_id || self.current_path.as_deref() != Some(path) {
            return false;
        }
        self.cancel = None;
        self.description = Some(description);
        true
    }

    /// Clears the preview state
    pub fn clear(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.store(true, Ordering::Release);
        }
        self.description = None;
        self.current_path = None;
        self.pending = false;
    }
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            description: None,
            current_path: None,
            request_id: 0,
            pending: false,
            last_input_time: Instant::now(),
            cancel: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_or_foreign_previews_are_dropped() {
        let mut state = PreviewState::default();
        let (first, first_token) = state.prepare_new_request(PathBuf::from("/a"));
        let (second, _) = state.prepare_new_request(PathBuf::from("/b"));
        assert!(first_token.load(Ordering::Acquire));

        assert!(!state.update(Path::new("/a"), PreviewDescription::default(), first));
        assert!(!state.update(Path::new("/a"), PreviewDescription::default(), second));
        assert!(state.is_loading());

        assert!(state.update(Path::new("/b"), PreviewDescription::default(), second));
        assert!(state.description().is_some());
        assert!(!state.is_loading());
    }

    #[test]
    fn moving_away_drops_the_request_in_flight() {
        let mut state = PreviewState::default();
        let (id, _) = state.prepare_new_request(PathBuf::from("/a"));
        assert!(state.update(Path::new("/a"), PreviewDescription::default(), id));

        let (id, token) = state.prepare_new_request(PathBuf::from("/a"));
        state.mark_pending();
        assert!(token.load(Ordering::Acquire));
        assert!(state.description().is_none());
        assert!(!state.update(Path::new("/a"), PreviewDescription::default(), id));
        assert!(state.description().is_none());
    }

    #[test]
    fn pending_waits_for_debounce() {
        let mut state = PreviewState::default();
        assert!(!state.should_trigger());
        state.mark_pending();
        assert!(!state.should_trigger());
        std::thread::sleep(PREVIEW_DEBOUNCE + Duration::from_millis(20));
        assert!(state.should_trigger());
    }
}
