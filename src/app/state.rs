//! Application State and main controller module for trek.
//!
//! This module defines the overall [AppState] struct, which holds all major application
//! information and passes it to the UI and terminal functions:
//! - Configuration (loaded from the config file)
//! - Navigation, search and preview state
//! - Action context for the search and filter prompts
//! - Communication with worker threads via crossbeam_channel
//! - Notice handling
//!
//! The operations themselves (enter, back, submit query, ...) live in the handlers module.

use crate::app::actions::{ActionContext, Mode};
use crate::app::keymap::Keymap;
use crate::app::{NavState, PreviewState, SearchState};
use crate::config::Config;
use crate::core::worker::{WorkerResponse, WorkerTask, Workers};
use crate::core::{CoreError, CoreResult, Entry, SearchResult};

use crossterm::event::KeyEvent;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub(crate) const INFO_NOTICE: Duration = Duration::from_secs(3);
pub(crate) const ERROR_NOTICE: Duration = Duration::from_secs(5);

/// Enumeration for each individual keypress result processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
}

/// A timed status message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    text: String,
    is_error: bool,
}

impl Notice {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

/// Main struct which holds the central application state of trek.
///
/// Includes:
/// - References to the configuration and the keymap
/// - Navigation, prompt, search and preview state
/// - crossbeam channels for communication with background worker threads
/// - The current notice and its expiry
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) nav: NavState,
    pub(super) actions: ActionContext,
    pub(super) search: SearchState,
    pub(super) preview: PreviewState,

    pub(super) workers: Workers,

    pub(super) notice: Option<Notice>,
    pub(super) notification_time: Option<Instant>,
    pub(super) should_quit: bool,
}

impl<'a> AppState<'a> {
    /// Opens the process working directory.
    pub fn new(config: &'a Config) -> CoreResult<Self> {
        let current_dir =
            std::env::current_dir().map_err(|e| CoreError::from_io(&e, Path::new(".")))?;
        Self::from_dir(config, &current_dir)
    }

    /// Opens `initial_path`. Fails when it cannot be listed.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> CoreResult<Self> {
        let general = config.general();
        let nav = NavState::open(initial_path, general.show_hidden(), general.max_entries())?;

        let mut app = Self {
            config,
            keymap: Keymap::fixed(),
            nav,
            actions: ActionContext::default(),
            search: SearchState::default(),
            preview: PreviewState::default(),
            workers: Workers::spawn(),
            notice: None,
            notification_time: None,
            should_quit: false,
        };

        app.request_preview();
        Ok(app)
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn actions(&self) -> &ActionContext {
        &self.actions
    }

    #[inline]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[inline]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.actions.mode()
    }

    #[inline]
    pub fn query(&self) -> &str {
        self.actions.input_buffer()
    }

    #[inline]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // Entry functions

    /// The entries shown in the list: search results while searching, else the listing.
    pub fn visible_entries(&self) -> &[Entry] {
        match self.mode() {
            Mode::Searching => self.search.results(),
            _ => self.nav.entries(),
        }
    }

    pub fn visible_selected(&self) -> Option<usize> {
        if self.visible_entries().is_empty() {
            None
        } else {
            match self.mode() {
                Mode::Searching => Some(self.search.selected_idx()),
                _ => Some(self.nav.selected_idx()),
            }
        }
    }

    pub fn selected_visible_entry(&self) -> Option<&Entry> {
        self.visible_selected()
            .and_then(|idx| self.visible_entries().get(idx))
    }

    /// The heart of the app: updates state and handles worker messages.
    ///
    /// Is used by the main event loop. Returns `true` when something changed and the
    /// screen needs a redraw.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if let Some(expiry) = self.notification_time
            && Instant::now() >= expiry
        {
            self.notification_time = None;
            self.notice = None;
            changed = true;
        }

        if self.preview.should_trigger() {
            self.request_preview();
            changed = true;
        }

        // Search handling with debounce
        if self.mode() == Mode::Searching
            && let Some(query) = self.search.take_query(self.actions.input_buffer())
        {
            if query.chars().count() < self.config.general().search_min_chars() {
                self.search.reset();
                self.request_preview();
            } else {
                self.request_search(query);
            }
            changed = true;
        }

        // Process worker responses
        while let Ok(response) = self.workers.response_rx().try_recv() {
            match response {
                WorkerResponse::SearchFinished {
                    root,
                    query,
                    result,
                    request_id,
                } => {
                    if self.mode() != Mode::Searching || root != self.nav.current_dir() {
                        continue;
                    }
                    let summary = self.search_summary(&result);
                    if self.search.apply(root, result, request_id) {
                        log::debug!("search #{request_id} for {:?}: {}", query, summary);
                        self.push_notice(summary, INFO_NOTICE, false);
                        self.request_preview();
                        changed = true;
                    }
                }
                WorkerResponse::PreviewLoaded {
                    path,
                    description,
                    request_id,
                } => {
                    if self.preview.update(&path, description, request_id) {
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    /// Central key handler.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if self.actions.is_input_mode() {
            return self.handle_input_mode(key);
        }

        match self.keymap.lookup(key) {
            Some(action) => self.dispatch(action),
            None => KeypressResult::Continue,
        }
    }

    // Worker requests functions for search and preview

    /// Requests a preview for the selected visible entry, or clears the pane.
    pub(crate) fn request_preview(&mut self) {
        if !self.config.preview().enabled() {
            self.preview.clear();
            return;
        }
        let Some(entry) = self.selected_visible_entry() else {
            self.preview.clear();
            return;
        };

        let path = entry.path().to_path_buf();
        let kind = entry.kind();
        let (request_id, cancel) = self.preview.prepare_new_request(path.clone());
        let _ = self.workers.preview_tx().send(WorkerTask::Preview {
            path,
            kind,
            options: self.config.preview().options(self.nav.show_hidden()),
            cancel,
            request_id,
        });
    }

    /// Cancels the search in flight and starts a new one rooted at the current directory.
    pub(crate) fn request_search(&mut self, query: String) {
        let (request_id, cancel) = self.search.begin(&query);
        let root: PathBuf = self.nav.current_dir().to_path_buf();
        let options = self.config.general().search_options(self.nav.show_hidden());

        let _ = self.workers.search_tx().send(WorkerTask::Search {
            root,
            query,
            options,
            cancel,
            request_id,
        });
    }

    fn search_summary(&self, result: &SearchResult) -> String {
        if result.exhausted() {
            match result.len() {
                0 => "no matches".to_string(),
                1 => "1 match".to_string(),
                n => format!("{n} matches"),
            }
        } else if result.len() >= self.config.general().max_search_results() {
            format!("search truncated at {} matches", result.len())
        } else {
            format!(
                "search stopped after visiting {} directories",
                result.visited_dirs()
            )
        }
    }

    // Notices

    /// Shows a notice that lasts for the specified duration.
    pub(crate) fn push_notice(&mut self, text: String, duration: Duration, is_error: bool) {
        self.notification_time = Some(Instant::now() + duration);
        self.notice = Some(Notice { text, is_error });
    }

    /// Shows an error as a notice. Boundary conditions are informational.
    pub(crate) fn show_error(&mut self, err: &CoreError) {
        if err.is_informational() {
            log::debug!("{err}");
            self.push_notice(err.to_string(), INFO_NOTICE, false);
        } else {
            log::warn!("{err}");
            self.push_notice(err.to_string(), ERROR_NOTICE, true);
        }
    }
}
