//! Action handler methods for trek.
//!
//! This module implements the [AppState] operations behind every [Action], plus the key
//! handling of the search and filter prompts.
//!
//! Every operation reads before it commits: a failing read leaves navigation, history and
//! selection exactly as they were, and the error is shown as a notice by [AppState::dispatch].

use crate::app::actions::Mode;
use crate::app::keymap::Action;
use crate::app::nav::not_enterable;
use crate::app::state::{AppState, KeypressResult};
use crate::core::{CoreError, CoreResult, EntryKind, FilterMatcher, FilterSpec};
use crate::utils::get_home;

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Runs `action` and turns a failure into a notice.
    pub fn dispatch(&mut self, action: Action) -> KeypressResult {
        if let Err(e) = self.apply(action) {
            self.show_error(&e);
        }
        if self.should_quit {
            KeypressResult::Quit
        } else {
            KeypressResult::Consumed
        }
    }

    /// Runs `action`, returning its error instead of showing it.
    pub fn apply(&mut self, action: Action) -> CoreResult<()> {
        match action {
            Action::MoveSelection(delta) => self.move_selection(delta),
            Action::JumpTop => self.jump_top(),
            Action::JumpBottom => self.jump_bottom(),
            Action::Enter => return self.enter(),
            Action::Back => return self.back(),
            Action::Forward => return self.forward(),
            Action::ToggleHidden => return self.toggle_hidden(),
            Action::JumpHome => return self.jump_home(),
            Action::StartSearch => self.start_search(),
            Action::StartFilter => return self.start_filter(),
            Action::Cancel => return self.cancel(),
            Action::Quit => self.quit(),
        }
        Ok(())
    }

    /// Handles key events while the search or filter prompt is open.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            Esc => self.dispatch(Action::Cancel),
            Enter => self.dispatch(Action::Enter),
            Up => self.dispatch(Action::MoveSelection(-1)),
            Down => self.dispatch(Action::MoveSelection(1)),

            Left => {
                self.actions.action_move_cursor_left();
                KeypressResult::Consumed
            }
            Right => {
                self.actions.action_move_cursor_right();
                KeypressResult::Consumed
            }
            Home => {
                self.actions.action_cursor_home();
                KeypressResult::Consumed
            }
            End => {
                self.actions.action_cursor_end();
                KeypressResult::Consumed
            }

            Backspace => {
                if self.actions.input_buffer().is_empty() {
                    return self.dispatch(Action::Back);
                }
                if self.actions.action_backspace_at_cursor() {
                    self.query_changed();
                }
                KeypressResult::Consumed
            }

            Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dispatch(Action::Quit)
            }
            Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.actions.action_insert_at_cursor(c);
                self.query_changed();
                KeypressResult::Consumed
            }

            _ => KeypressResult::Consumed,
        }
    }

    // Selection

    pub fn move_selection(&mut self, delta: isize) {
        let moved = match self.mode() {
            Mode::Searching => self.search.move_selection(delta),
            _ => self.nav.move_selection(delta),
        };
        if moved {
            self.preview.mark_pending();
        }
    }

    pub fn jump_top(&mut self) {
        let moved = match self.mode() {
            Mode::Searching => self.search.jump_top(),
            _ => self.nav.jump_top(),
        };
        if moved {
            self.preview.mark_pending();
        }
    }

    pub fn jump_bottom(&mut self) {
        let moved = match self.mode() {
            Mode::Searching => self.search.jump_bottom(),
            _ => self.nav.jump_bottom(),
        };
        if moved {
            self.preview.mark_pending();
        }
    }

    // Navigation

    /// Opens the selected entry.
    ///
    /// A directory is entered, a file only gets previewed. While searching, a file result
    /// opens its parent directory with the file focused, and search mode ends.
    pub fn enter(&mut self) -> CoreResult<()> {
        if self.mode() == Mode::Searching {
            return self.enter_search_result();
        }

        let Some(entry) = self.nav.selected_entry().cloned() else {
            return Ok(());
        };
        match entry.kind() {
            EntryKind::Directory => {
                self.nav.enter_dir(entry.path().to_path_buf())?;
                self.finish_navigation();
            }
            EntryKind::File => self.request_preview(),
            EntryKind::BrokenSymlink => return Err(not_enterable(&entry)),
        }
        Ok(())
    }

    fn enter_search_result(&mut self) -> CoreResult<()> {
        if self.search.results().is_empty() {
            let query = self.actions.input_buffer().to_string();
            return self.submit_query(&query);
        }
        let Some(entry) = self.search.selected_entry().cloned() else {
            return Ok(());
        };

        match entry.kind() {
            EntryKind::Directory => self.nav.enter_dir(entry.path().to_path_buf())?,
            EntryKind::File | EntryKind::BrokenSymlink => {
                let parent = entry
                    .path()
                    .parent()
                    .ok_or_else(CoreError::no_parent)?
                    .to_path_buf();
                self.nav.enter_dir(parent)?;
                self.nav.focus(entry.name());
            }
        }
        self.finish_navigation();
        Ok(())
    }

    /// Goes back in history. Inside a prompt it cancels the prompt instead.
    pub fn back(&mut self) -> CoreResult<()> {
        if self.actions.is_input_mode() {
            return self.cancel();
        }
        self.nav.back()?;
        self.finish_navigation();
        Ok(())
    }

    pub fn forward(&mut self) -> CoreResult<()> {
        self.nav.forward()?;
        self.finish_navigation();
        Ok(())
    }

    /// Flips the hidden-file policy. A search in progress is rerun with the new policy.
    pub fn toggle_hidden(&mut self) -> CoreResult<()> {
        self.nav.toggle_hidden()?;
        log::debug!("show_hidden = {}", self.nav.show_hidden());

        if self.mode() == Mode::Searching && !self.search.last_query().is_empty() {
            let query = self.search.last_query().to_string();
            self.request_search(query);
        }
        self.request_preview();
        Ok(())
    }

    pub fn jump_home(&mut self) -> CoreResult<()> {
        let home = get_home().ok_or_else(|| CoreError::NotFound(PathBuf::from("~")))?;
        if home == self.nav.current_dir() {
            return Ok(());
        }
        self.nav.enter_dir(home)?;
        self.finish_navigation();
        Ok(())
    }

    // Prompts

    pub fn start_search(&mut self) {
        self.search.reset();
        self.actions.enter_mode(Mode::Searching);
        self.request_preview();
    }

    /// Opens the filter prompt with an empty filter.
    pub fn start_filter(&mut self) -> CoreResult<()> {
        self.search.reset();
        self.nav.clear_filter()?;
        self.actions.enter_mode(Mode::Filtering);
        Ok(())
    }

    /// Applies `text` as the query of the open prompt.
    ///
    /// Filtering re-reads the current directory through the parsed filter. Searching starts
    /// a new background search right away, cancelling the one in flight.
    pub fn submit_query(&mut self, text: &str) -> CoreResult<()> {
        if self.actions.input_buffer() != text {
            self.actions.set_input_buffer(text);
        }

        match self.mode() {
            Mode::Browsing => {}
            Mode::Filtering => {
                let spec = FilterSpec::parse(text);
                self.nav.set_filter(FilterMatcher::compile(spec.as_ref()))?;
                self.preview.mark_pending();
            }
            Mode::Searching => {
                if text.is_empty() {
                    self.search.reset();
                    self.request_preview();
                } else {
                    self.request_search(text.to_string());
                }
            }
        }
        Ok(())
    }

    /// Drops search results and the filter, returning to browsing.
    pub fn cancel(&mut self) -> CoreResult<()> {
        self.search.reset();
        self.actions.exit_mode();
        let cleared = self.nav.clear_filter();
        self.request_preview();
        cleared
    }

    pub fn quit(&mut self) {
        self.search.reset();
        self.preview.clear();
        self.should_quit = true;
    }

    // Helpers

    fn query_changed(&mut self) {
        match self.mode() {
            Mode::Filtering => {
                let query = self.actions.input_buffer().to_string();
                if let Err(e) = self.submit_query(&query) {
                    self.show_error(&e);
                }
            }
            Mode::Searching => {
                let delay = self.config.general().search_debounce();
                self.search.set_debounce(delay);
            }
            Mode::Browsing => {}
        }
    }

    /// Navigation clears the filter, so an open prompt has nothing left to edit.
    fn finish_navigation(&mut self) {
        if self.actions.is_input_mode() {
            self.search.reset();
            self.actions.exit_mode();
        }
        self.request_preview();
    }
}
