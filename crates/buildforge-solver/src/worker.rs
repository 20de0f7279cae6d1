//! Message-passing wrapper running searches on a dedicated thread.
//!
//! Requests go in through [`SearchWorker::send`]; events come back on an
//! unbounded channel. Each run produces zero or more
//! [`WorkerEvent::Progress`] events followed by exactly one
//! [`WorkerEvent::Result`] or [`WorkerEvent::Error`].
//!
//! Cancellation is applied out-of-band: [`WorkerRequest::Cancel`] raises the
//! run's flag immediately, so it takes effect while that run is searching.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::error::{Result, SearchError};
use crate::event::SearchProgress;
use crate::optimize::{optimize, RankedBuild, SearchRequest};

/// Message sent to the worker.
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    Run {
        request_id: u64,
        request: SearchRequest,
    },
    Cancel {
        request_id: u64,
    },
}

/// Message emitted by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Progress {
        request_id: u64,
        progress: SearchProgress,
    },
    Result {
        request_id: u64,
        builds: Vec<RankedBuild>,
    },
    Error {
        request_id: u64,
        cancelled: bool,
        message: String,
    },
}

impl WorkerEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            WorkerEvent::Progress { request_id, .. }
            | WorkerEvent::Result { request_id, .. }
            | WorkerEvent::Error { request_id, .. } => *request_id,
        }
    }

    /// True for the last event of a run.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WorkerEvent::Progress { .. })
    }
}

type CancelFlags = Arc<Mutex<HashMap<u64, Arc<AtomicBool>>>>;

fn lock(flags: &CancelFlags) -> MutexGuard<'_, HashMap<u64, Arc<AtomicBool>>> {
    flags.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a background search thread.
///
/// Dropping the handle cancels any running search, closes the queue and
/// joins the thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use buildforge_core::domain::{BuildTarget, Catalog};
/// use buildforge_solver::{Constraints, SearchRequest, SearchWorker, WorkerEvent};
///
/// let (worker, mut events) = SearchWorker::spawn().unwrap();
/// let request = SearchRequest::new(
///     Arc::new(Catalog::default()),
///     BuildTarget::Equipment,
///     Constraints::new(50),
/// );
/// worker.run(1, request).unwrap();
///
/// let event = events.blocking_recv().unwrap();
/// assert_eq!(event, WorkerEvent::Result { request_id: 1, builds: vec![] });
/// ```
pub struct SearchWorker {
    sender: Option<UnboundedSender<WorkerRequest>>,
    flags: CancelFlags,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    /// Starts the worker thread.
    pub fn spawn() -> io::Result<(Self, UnboundedReceiver<WorkerEvent>)> {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let flags: CancelFlags = Arc::default();

        let thread_flags = Arc::clone(&flags);
        let handle = std::thread::Builder::new()
            .name("buildforge-worker".into())
            .spawn(move || worker_loop(request_rx, event_tx, thread_flags))?;

        let worker = Self {
            sender: Some(request_tx),
            flags,
            handle: Some(handle),
        };
        Ok((worker, event_rx))
    }

    /// Queues a request. `Run` registers its cancellation flag before it is
    /// queued; `Cancel` raises that flag without queueing anything.
    pub fn send(&self, message: WorkerRequest) -> Result<()> {
        match message {
            WorkerRequest::Cancel { request_id } => {
                if let Some(flag) = lock(&self.flags).get(&request_id) {
                    flag.store(true, Ordering::Relaxed);
                    debug!(event = "cancel_requested", request_id = request_id);
                }
                Ok(())
            }
            run @ WorkerRequest::Run { request_id, .. } => {
                lock(&self.flags)
                    .entry(request_id)
                    .or_insert_with(|| Arc::new(AtomicBool::new(false)));
                let sender = self
                    .sender
                    .as_ref()
                    .ok_or_else(|| SearchError::Internal("worker stopped".into()))?;
                sender.send(run).map_err(|_| {
                    lock(&self.flags).remove(&request_id);
                    SearchError::Internal("worker stopped".into())
                })
            }
        }
    }

    pub fn run(&self, request_id: u64, request: SearchRequest) -> Result<()> {
        self.send(WorkerRequest::Run {
            request_id,
            request,
        })
    }

    pub fn cancel(&self, request_id: u64) -> Result<()> {
        self.send(WorkerRequest::Cancel { request_id })
    }

    /// Number of queued or running requests.
    pub fn pending(&self) -> usize {
        lock(&self.flags).len()
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        for flag in lock(&self.flags).values() {
            flag.store(true, Ordering::Relaxed);
        }
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker")
            .field("pending", &self.pending())
            .field("running", &self.handle.is_some())
            .finish()
    }
}

fn worker_loop(
    mut requests: UnboundedReceiver<WorkerRequest>,
    events: UnboundedSender<WorkerEvent>,
    flags: CancelFlags,
) {
    info!(event = "worker_start");
    while let Some(message) = requests.blocking_recv() {
        let WorkerRequest::Run {
            request_id,
            request,
        } = message
        else {
            continue;
        };

        let flag = Arc::clone(
            lock(&flags)
                .entry(request_id)
                .or_insert_with(|| Arc::new(AtomicBool::new(false))),
        );
        let progress_events = events.clone();
        let mut listener = |progress: &SearchProgress| {
            let _ = progress_events.send(WorkerEvent::Progress {
                request_id,
                progress: progress.clone(),
            });
        };

        let outcome = optimize(&request, Some(flag.as_ref()), &mut listener);
        lock(&flags).remove(&request_id);

        let event = match outcome {
            Ok(builds) => WorkerEvent::Result { request_id, builds },
            Err(err) => WorkerEvent::Error {
                request_id,
                cancelled: err.is_cancelled(),
                message: err.to_string(),
            },
        };
        if events.send(event).is_err() {
            break;
        }
    }
    info!(event = "worker_end");
}
