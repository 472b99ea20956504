//! Bounded breadth-first search over the directory tree.
//!
//! [search] returns a lazy [Search] iterator. Directories are expanded from a FIFO queue
//! seeded with the root: every child of an expanded directory gets its match check, and
//! child directories are queued behind it. Matches closer to the root therefore always come
//! before deeper ones.
//!
//! A search stops when:
//! - `max_results` matches were emitted (more may exist),
//! - the queue runs empty (the tree is exhausted),
//! - `max_visited_dirs` directories were expanded,
//! - the cancel token is set. The token is checked between two directory expansions.
//!
//! Symlinked directories are followed, but each real path is expanded at most once per
//! search, so symlink cycles terminate.

use crate::core::fm::{DEFAULT_DIR_CAPACITY, DirReader, Entry};

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEFAULT_MAX_RESULTS: usize = 150;
pub const DEFAULT_MAX_VISITED_DIRS: usize = 5000;

/// Limits and policy of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_results: usize,
    pub max_visited_dirs: usize,
    pub show_hidden: bool,
    pub dir_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_visited_dirs: DEFAULT_MAX_VISITED_DIRS,
            show_hidden: false,
            dir_capacity: DEFAULT_DIR_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Exhausted,
    ResultCap,
    DirCap,
    Cancelled,
}

/// Final outcome of a search, in BFS discovery order.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    matches: Vec<Entry>,
    exhausted: bool,
    cancelled: bool,
    visited_dirs: usize,
}

impl SearchResult {
    #[inline]
    pub fn matches(&self) -> &[Entry] {
        &self.matches
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// True when the whole tree was walked, so no further matches exist.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    #[inline]
    pub fn visited_dirs(&self) -> usize {
        self.visited_dirs
    }
}

/// Lazy breadth-first search. See the module docs.
pub struct Search<P> {
    predicate: P,
    reader: DirReader,
    max_results: usize,
    max_visited_dirs: usize,
    queue: VecDeque<PathBuf>,
    pending: VecDeque<Entry>,
    expanded: HashSet<PathBuf>,
    emitted: usize,
    visited: usize,
    stop: Option<Stop>,
    cancel: Arc<AtomicBool>,
}

/// Starts a breadth-first search below `root`.
///
/// Nothing touches the filesystem until the first call to `next`.
pub fn search<P>(
    root: &Path,
    predicate: P,
    options: SearchOptions,
    cancel: Arc<AtomicBool>,
) -> Search<P>
where
    P: FnMut(&Entry) -> bool,
{
    let mut queue = VecDeque::with_capacity(64);
    queue.push_back(root.to_path_buf());
    Search {
        predicate,
        reader: DirReader::new(options.show_hidden, options.dir_capacity),
        max_results: options.max_results,
        max_visited_dirs: options.max_visited_dirs,
        queue,
        pending: VecDeque::new(),
        expanded: HashSet::new(),
        emitted: 0,
        visited: 0,
        stop: None,
        cancel,
    }
}

impl<P> Search<P>
where
    P: FnMut(&Entry) -> bool,
{
    /// Number of directories expanded so far, including unreadable ones.
    pub fn visited_dirs(&self) -> usize {
        self.visited
    }

    /// Runs the search to its end and collects the matches.
    pub fn into_result(mut self) -> SearchResult {
        let matches: Vec<Entry> = self.by_ref().collect();
        let stop = self.stop.unwrap_or(Stop::Exhausted);
        log::debug!(
            "search finished: {} matches, {} dirs, stop={:?}",
            matches.len(),
            self.visited,
            stop
        );
        SearchResult {
            matches,
            exhausted: stop == Stop::Exhausted,
            cancelled: stop == Stop::Cancelled,
            visited_dirs: self.visited,
        }
    }

    /// Expands the next queued directory. Returns `false` once the search has stopped.
    fn expand_next(&mut self) -> bool {
        if self.cancel.load(Ordering::Relaxed) {
            self.stop = Some(Stop::Cancelled);
            return false;
        }

        loop {
            let Some(dir) = self.queue.pop_front() else {
                self.stop = Some(Stop::Exhausted);
                return false;
            };

            // An unresolvable path is still expanded once; the read reports the failure.
            let real = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if self.expanded.contains(&real) {
                continue;
            }

            if self.visited >= self.max_visited_dirs {
                self.stop = Some(Stop::DirCap);
                return false;
            }
            self.expanded.insert(real);
            self.visited += 1;

            let listing = self.reader.read(&dir);
            if let Some(err) = listing.error() {
                log::debug!("search skipped unreadable dir: {}", err);
            }
            for child in listing.entries() {
                if (self.predicate)(child) {
                    self.pending.push_back(child.clone());
                }
                if child.is_dir() {
                    self.queue.push_back(child.path().to_path_buf());
                }
            }
            return true;
        }
    }
}

impl<P> Iterator for Search<P>
where
    P: FnMut(&Entry) -> bool,
{
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            if self.emitted >= self.max_results {
                match self.stop {
                    Some(Stop::Exhausted) if self.pending.is_empty() => {}
                    Some(Stop::Cancelled) => {}
                    _ => self.stop = Some(Stop::ResultCap),
                }
                return None;
            }
            if let Some(entry) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(entry);
            }
            if self.stop.is_some() || !self.expand_next() {
                return None;
            }
        }
    }
}
