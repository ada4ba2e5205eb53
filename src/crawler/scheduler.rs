//! Frontier queue and pending-work accounting
//!
//! This module handles:
//! - The bounded frontier shared by every worker
//! - Counting outstanding work so the engine can tell when a crawl is done
//!
//! Work is counted with `WorkTicket`s. A ticket is taken before a job enters the
//! frontier and travels with the job; it is released when the job is dropped,
//! which the worker does only after every child link has been handled. A child's
//! ticket therefore always exists before its parent's is released, and the count
//! can only reach zero when nothing is queued, in flight, or about to be queued.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, Notify};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct PendingInner {
    count: AtomicUsize,
    idle: Notify,
}

/// Counter of outstanding frontier entries and in-flight jobs
#[derive(Debug, Clone, Default)]
pub struct PendingWork {
    inner: Arc<PendingInner>,
}

impl PendingWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one unit of work
    ///
    /// The work stays outstanding until the returned ticket is dropped.
    pub fn acquire(&self) -> WorkTicket {
        self.inner.count.fetch_add(1, Ordering::SeqCst);
        WorkTicket {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of tickets currently alive
    pub fn outstanding(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }

    /// Waits until no ticket is alive
    ///
    /// Returns immediately if the count is already zero.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            // Register before checking so a release between the check and the
            // await still wakes us.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// One unit of outstanding work; released on drop
///
/// Tickets cannot be cloned, so every increment is matched by exactly one
/// decrement and the count never goes negative.
#[derive(Debug)]
pub struct WorkTicket {
    inner: Arc<PendingInner>,
}

impl Drop for WorkTicket {
    fn drop(&mut self) {
        if self.inner.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

/// A frontier entry: a URL waiting to be fetched, plus its work ticket
#[derive(Debug)]
pub struct Job {
    url: String,
    _ticket: WorkTicket,
}

impl Job {
    pub fn new(url: impl Into<String>, ticket: WorkTicket) -> Self {
        Self {
            url: url.into(),
            _ticket: ticket,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Bounded multi-consumer job queue
///
/// `push` blocks while the queue is full and `pop` blocks while it is empty;
/// both give up as soon as the cancellation token fires.
#[derive(Debug)]
pub struct Frontier {
    tx: mpsc::Sender<Job>,
    rx: Mutex<mpsc::Receiver<Job>>,
}

impl Frontier {
    /// Creates a frontier holding at most `capacity` queued jobs
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Configuration validation rejects that value.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Enqueues a job, waiting for space if the queue is full
    ///
    /// Returns false if cancellation fired first. The job is dropped in that
    /// case, which releases its ticket.
    pub async fn push(&self, cancel: &CancellationToken, job: Job) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            sent = self.tx.send(job) => sent.is_ok(),
        }
    }

    /// Takes the next job, waiting if the queue is empty
    ///
    /// Returns None once cancellation fires.
    pub async fn pop(&self, cancel: &CancellationToken) -> Option<Job> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            job = async { self.rx.lock().await.recv().await } => job,
        }
    }

    /// Number of jobs currently queued
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
