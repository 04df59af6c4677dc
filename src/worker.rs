//! Worker context for off-thread jobs.
//!
//! Fetches and image loads run here. Jobs never touch store state; they
//! send their result back over a channel and the rendering context applies
//! it.

use std::sync::{Mutex, PoisonError};
use std::thread;
use tracing::warn;

/// A unit of off-thread work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs somewhere other than the caller's stack frame.
pub trait Worker: Send + Sync {
    fn spawn(&self, job: Job);
}

/// One OS thread per job.
#[derive(Debug, Clone)]
pub struct ThreadWorker {
    name: String,
}

impl ThreadWorker {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ThreadWorker {
    fn default() -> Self {
        Self::new("revfeed-worker")
    }
}

impl Worker for ThreadWorker {
    fn spawn(&self, job: Job) {
        // Builder::spawn consumes the closure even on failure, so the job
        // is shared through a slot and run inline if the thread never
        // takes it.
        let slot = std::sync::Arc::new(Mutex::new(Some(job)));
        let thread_slot = std::sync::Arc::clone(&slot);
        let spawned = thread::Builder::new().name(self.name.clone()).spawn(move || {
            let job = thread_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(job) = job {
                job();
            }
        });

        if let Err(error) = spawned {
            warn!(worker = %self.name, error = %error, "Thread spawn failed, running job inline");
            let job = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(job) = job {
                job();
            }
        }
    }
}

/// Queues jobs until [`QueuedWorker::run_all`] is called.
///
/// Deterministic stand-in for [`ThreadWorker`]: headless drivers and tests
/// decide exactly when the "network" answers.
#[derive(Default)]
pub struct QueuedWorker {
    jobs: Mutex<Vec<Job>>,
}

impl QueuedWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs waiting to run.
    pub fn pending(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Run queued jobs in submission order, including any they enqueue.
    ///
    /// Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let batch = std::mem::take(&mut *self.jobs.lock().unwrap_or_else(PoisonError::into_inner));
            if batch.is_empty() {
                return ran;
            }
            for job in batch {
                job();
                ran += 1;
            }
        }
    }
}

impl Worker for QueuedWorker {
    fn spawn(&self, job: Job) {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(job);
    }
}

impl std::fmt::Debug for QueuedWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedWorker")
            .field("pending", &self.pending())
            .finish()
    }
}
