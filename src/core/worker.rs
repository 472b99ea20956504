//! Worker threads for trek.
//!
//! Searches and previews run on dedicated background threads so the event loop never blocks
//! on the filesystem. Requests [WorkerTask] come in from the AppState via channels, and
//! results [WorkerResponse] go back the same way.
//!
//! Both workers coalesce their queue: when several tasks are waiting only the latest one is
//! processed. Every task carries a request id which the app compares against its latest
//! request, so stale responses are dropped on arrival.
//!
//! # Caution:
//! This module is a protocol boundary. Adding or editing variants or fields requires matching
//! changes in the app state response handling.

use crate::core::filter::FilterMatcher;
use crate::core::fm::EntryKind;
use crate::core::preview::{PreviewDescription, PreviewOptions, PreviewRegistry};
use crate::core::search::{SearchOptions, SearchResult, search};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Channels to the worker threads.
pub struct Workers {
    search_tx: Sender<WorkerTask>,
    preview_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Spawns the search and the preview worker.
    pub fn spawn() -> Self {
        let (search_tx, search_rx) = unbounded::<WorkerTask>();
        let (preview_tx, preview_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_search_worker(search_rx, res_tx.clone());
        start_preview_worker(preview_rx, res_tx);

        Self {
            search_tx,
            preview_tx,
            response_rx,
        }
    }

    pub fn search_tx(&self) -> &Sender<WorkerTask> {
        &self.search_tx
    }

    pub fn preview_tx(&self) -> &Sender<WorkerTask> {
        &self.preview_tx
    }

    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the workers.
#[derive(Debug)]
pub enum WorkerTask {
    Search {
        root: PathBuf,
        query: String,
        options: SearchOptions,
        cancel: Arc<AtomicBool>,
        request_id: u64,
    },
    Preview {
        path: PathBuf,
        kind: EntryKind,
        options: PreviewOptions,
        cancel: Arc<AtomicBool>,
        request_id: u64,
    },
}

/// Responses sent from the workers back to the main thread.
#[derive(Debug)]
pub enum WorkerResponse {
    SearchFinished {
        root: PathBuf,
        query: String,
        result: SearchResult,
        request_id: u64,
    },
    PreviewLoaded {
        path: PathBuf,
        description: PreviewDescription,
        request_id: u64,
    },
}

/// Starts the search worker.
///
/// A cancelled search sends nothing back.
fn start_search_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::Search {
                mut root,
                mut query,
                mut options,
                mut cancel,
                mut request_id,
            } = task
            else {
                continue;
            };

            // Coalesce queued searches, only the latest one runs
            while let Ok(next) = task_rx.try_recv() {
                if let WorkerTask::Search {
                    root: r,
                    query: q,
                    options: o,
                    cancel: c,
                    request_id: id,
                } = next
                {
                    root = r;
                    query = q;
                    options = o;
                    cancel = c;
                    request_id = id;
                }
            }

            if cancel.load(Ordering::Acquire) {
                continue;
            }

            log::debug!("search #{request_id} for {:?} in {}", query, root.display());
            let matcher = FilterMatcher::name_contains(&query);
            let result = search(
                &root,
                |e| matcher.matches(e),
                options,
                Arc::clone(&cancel),
            )
            .into_result();

            if result.cancelled() || cancel.load(Ordering::Acquire) {
                continue;
            }

            let _ = res_tx.send(WorkerResponse::SearchFinished {
                root,
                query,
                result,
                request_id,
            });
        }
    });
}

/// Starts the preview worker.
fn start_preview_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::Preview {
                mut path,
                mut kind,
                mut options,
                mut cancel,
                mut request_id,
            } = task
            else {
                continue;
            };

            while let Ok(next) = task_rx.try_recv() {
                if let WorkerTask::Preview {
                    path: p,
                    kind: k,
                    options: o,
                    cancel: c,
                    request_id: id,
                } = next
                {
                    path = p;
                    kind = k;
                    options = o;
                    cancel = c;
                    request_id = id;
                }
            }

            if cancel.load(Ordering::Acquire) {
                continue;
            }
            let description = PreviewRegistry::new(options).describe(&path, kind);
            if cancel.load(Ordering::Acquire) {
                continue;
            }

            let _ = res_tx.send(WorkerResponse::PreviewLoaded {
                path,
                description,
                request_id,
            });
        }
    });
}
