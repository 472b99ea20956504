//! Navigation state and file list logic for trek.
//!
//! [NavState] owns the navigation history, the listing of the current directory, the active
//! filter and the selection. Every operation reads the target directory first and commits
//! only after the read succeeded, so a failed move leaves the state untouched.

use crate::core::{
    CoreError, CoreResult, DirReader, DirectoryListing, Entry, FilterMatcher, NavHistory,
};

use std::fs;
use std::path::{Path, PathBuf};

/// Holds the navigation, selection and file list state.
#[derive(Debug)]
pub struct NavState {
    history: NavHistory,
    reader: DirReader,
    listing: DirectoryListing,
    filter: FilterMatcher,
    selected: usize,
}

impl NavState {
    /// Opens `path` as the start directory.
    ///
    /// Relative paths are resolved against the working directory so entries and history
    /// always hold absolute paths.
    pub fn open(path: &Path, show_hidden: bool, capacity: usize) -> CoreResult<Self> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            fs::canonicalize(path).map_err(|e| CoreError::from_io(&e, path))?
        };
        let reader = DirReader::new(show_hidden, capacity);
        let listing = reader.read(&path).into_result()?;
        log::debug!("opened {} ({} entries)", path.display(), listing.len());
        Ok(Self {
            history: NavHistory::new(path),
            reader,
            listing,
            filter: FilterMatcher::All,
            selected: 0,
        })
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        self.history.current()
    }

    #[inline]
    pub fn history(&self) -> &NavHistory {
        &self.history
    }

    #[inline]
    pub fn listing(&self) -> &DirectoryListing {
        &self.listing
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.listing.entries()
    }

    #[inline]
    pub fn filter(&self) -> &FilterMatcher {
        &self.filter
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.reader.show_hidden()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.reader.capacity()
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.listing.entries().get(self.selected)
    }

    // Selection

    /// Moves the selection by `delta`, clamped to the listing. Returns `true` if it moved.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.listing.len();
        if len == 0 {
            return false;
        }
        let target = self
            .selected
            .saturating_add_signed(delta)
            .min(len - 1);
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
        let last = self.listing.len().saturating_sub(1);
        let moved = self.selected != last;
        self.selected = last;
        moved
    }

    /// Selects the entry called `name`. Returns `false` when it is not listed.
    pub fn focus(&mut self, name: &str) -> bool {
        match self.listing.position_of(name) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    // Navigation functions

    /// Moves into `path`, pushing it onto the history. Clears the active filter.
    pub fn enter_dir(&mut self, path: PathBuf) -> CoreResult<()> {
        let listing = self.reader.read(&path).into_result()?;
        self.history.push(path);
        self.filter = FilterMatcher::All;
        self.set_listing(listing, None);
        Ok(())
    }

    /// Moves back in history, or to the parent when the back stack is empty.
    ///
    /// The directory that was left gets focused if it is listed in the target.
    pub fn back(&mut self) -> CoreResult<()> {
        let target = self.history.back_target()?;
        let listing = self.reader.read(&target).into_result()?;
        let left = file_name(self.current_dir());
        self.history.back()?;
        self.filter = FilterMatcher::All;
        self.set_listing(listing, left.as_deref());
        Ok(())
    }

    pub fn forward(&mut self) -> CoreResult<()> {
        let target = self.history.forward_target()?;
        let listing = self.reader.read(&target).into_result()?;
        self.history.forward()?;
        self.filter = FilterMatcher::All;
        self.set_listing(listing, None);
        Ok(())
    }

    /// Re-reads the current directory with the hidden-file policy flipped.
    /// The selected entry stays selected when it is still listed.
    pub fn toggle_hidden(&mut self) -> CoreResult<()> {
        let reader = DirReader::new(!self.reader.show_hidden(), self.reader.capacity());
        let listing = self.read_current(&reader, &self.filter)?;
        self.reader = reader;
        let keep = self.selected_entry().map(|e| e.name().to_string());
        self.set_listing(listing, keep.as_deref());
        Ok(())
    }

    /// Applies `filter` to the current directory. The predicate runs before the capacity cap.
    pub fn set_filter(&mut self, filter: FilterMatcher) -> CoreResult<()> {
        if filter == self.filter {
            return Ok(());
        }
        let listing = self.read_current(&self.reader, &filter)?;
        self.filter = filter;
        let keep = self.selected_entry().map(|e| e.name().to_string());
        self.set_listing(listing, keep.as_deref());
        Ok(())
    }

    pub fn clear_filter(&mut self) -> CoreResult<()> {
        self.set_filter(FilterMatcher::All)
    }

    /// Re-reads the current directory, keeping the selection by name.
    pub fn reload(&mut self) -> CoreResult<()> {
        let listing = self.read_current(&self.reader, &self.filter)?;
        let keep = self.selected_entry().map(|e| e.name().to_string());
        self.set_listing(listing, keep.as_deref());
        Ok(())
    }

    fn read_current(
        &self,
        reader: &DirReader,
        filter: &FilterMatcher,
    ) -> CoreResult<DirectoryListing> {
        reader
            .read_filtered(self.current_dir(), |e| filter.matches(e))
            .into_result()
    }

    fn set_listing(&mut self, listing: DirectoryListing, focus: Option<&str>) {
        let previous = self.selected;
        self.listing = listing;
        self.selected = 0;
        let focused = focus.is_some_and(|name| self.focus(name));
        if !focused && focus.is_some() {
            self.selected = previous.min(self.listing.len().saturating_sub(1));
        }
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Error for entering an entry that cannot be entered.
pub(crate) fn not_enterable(entry: &Entry) -> CoreError {
    if entry.is_broken_symlink() {
        CoreError::NotFound(entry.path().to_path_buf())
    } else {
        CoreError::NotADirectory(entry.path().to_path_buf())
    }
}
