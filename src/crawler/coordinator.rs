//! Crawler coordinator - the crawl engine
//!
//! This module runs one crawl session from a seed URL:
//! - Registering the seed and fixing the scope boundary
//! - Running a fixed pool of workers over the shared frontier
//! - Publishing every fetched resource on the result stream
//! - Detecting completion and draining on cancellation
//!
//! A session moves through `Idle -> Running -> Draining -> Closed`. The result
//! stream closes when the session reaches `Closed`.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::resource::{Resource, ResourceStatus};
use crate::crawler::scheduler::{Frontier, Job, PendingWork};
use crate::state::{EngineState, VisitedRegistry};
use crate::url::{canonicalize, in_scope, parse_seed, scope_of};
use crate::{HuntsmanError, Result, UrlError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// How a crawl session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every reachable in-scope URL was fetched
    Completed,

    /// The session was stopped or its parent token was cancelled
    Cancelled,
}

/// Receiving half of the result stream
///
/// Yields resources in completion order and returns None once the engine
/// has reached `Closed`.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<Resource>,
}

impl ResultStream {
    /// Waits for the next resource
    pub async fn recv(&mut self) -> Option<Resource> {
        self.rx.recv().await
    }

    /// Drains the stream until it closes
    pub async fn collect(mut self) -> Vec<Resource> {
        let mut resources = Vec::new();
        while let Some(resource) = self.rx.recv().await {
            resources.push(resource);
        }
        resources
    }
}

/// Main crawl engine
///
/// One `Coordinator` runs at most one session. The visited registry belongs
/// to the coordinator and lives as long as it does.
pub struct Coordinator {
    fetcher: Arc<dyn Fetcher>,
    concurrency: usize,
    frontier_capacity: usize,
    shutdown: CancellationToken,
    state: Mutex<EngineState>,
    visited: Arc<VisitedRegistry>,
    results_tx: Mutex<Option<mpsc::Sender<Resource>>>,
    results_rx: Mutex<Option<mpsc::Receiver<Resource>>>,
}

/// State shared by the workers of one session
struct Session {
    fetcher: Arc<dyn Fetcher>,
    frontier: Frontier,
    pending: PendingWork,
    visited: Arc<VisitedRegistry>,
    scope: String,
    results: mpsc::Sender<Resource>,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates an idle engine
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The resource collector used for every URL
    /// * `config` - Worker count and queue capacities
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &CrawlerConfig) -> Self {
        let (results_tx, results_rx) = mpsc::channel(config.results_capacity.max(1));

        Self {
            fetcher,
            concurrency: config.concurrency.max(1),
            frontier_capacity: config.frontier_capacity.max(1),
            shutdown: CancellationToken::new(),
            state: Mutex::new(EngineState::Idle),
            visited: Arc::new(VisitedRegistry::new()),
            results_tx: Mutex::new(Some(results_tx)),
            results_rx: Mutex::new(Some(results_rx)),
        }
    }

    /// Takes the result stream
    ///
    /// Returns None if it was already taken.
    pub fn results(&self) -> Option<ResultStream> {
        lock(&self.results_rx).take().map(|rx| ResultStream { rx })
    }

    /// Requests a graceful stop
    ///
    /// Idempotent, and safe to call before or during `start`.
    pub fn stop(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::info!("Stop requested");
        }
        self.shutdown.cancel();
    }

    pub fn state(&self) -> EngineState {
        *lock(&self.state)
    }

    /// The set of URLs claimed so far
    pub fn visited(&self) -> &VisitedRegistry {
        &self.visited
    }

    /// Runs a crawl session and waits for it to close
    ///
    /// # Arguments
    ///
    /// * `parent` - Cancelling this token stops the session like `stop` does
    /// * `seed` - The start URL; its host becomes the scope boundary
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The session reached `Closed`
    /// * `Err(HuntsmanError::InvalidSeed)` - The seed did not parse; the engine stays `Idle`
    /// * `Err(HuntsmanError::AlreadyStarted)` - The engine has already run
    pub async fn start(&self, parent: &CancellationToken, seed: &str) -> Result<CrawlOutcome> {
        let (seed_url, scope, results) = {
            let mut state = lock(&self.state);
            if *state != EngineState::Idle {
                return Err(HuntsmanError::AlreadyStarted(*state));
            }

            let seed_url = parse_seed(seed).map_err(|source| HuntsmanError::InvalidSeed {
                url: seed.to_string(),
                source,
            })?;
            let scope = scope_of(&seed_url).ok_or_else(|| HuntsmanError::InvalidSeed {
                url: seed.to_string(),
                source: UrlError::MissingHost,
            })?;
            let results = lock(&self.results_tx)
                .take()
                .ok_or(HuntsmanError::AlreadyStarted(*state))?;

            *state = EngineState::Running;
            (seed_url, scope, results)
        };

        tracing::info!(
            "Starting crawl of {} with {} workers (scope: {})",
            seed_url,
            self.concurrency,
            scope
        );

        let session = Arc::new(Session {
            fetcher: Arc::clone(&self.fetcher),
            frontier: Frontier::new(self.frontier_capacity),
            pending: PendingWork::new(),
            visited: Arc::clone(&self.visited),
            scope,
            results,
            cancel: self.shutdown.child_token(),
        });

        // Cancelling the parent cancels the session from here on.
        if parent.is_cancelled() {
            session.cancel.cancel();
        }
        let parent_link = {
            let parent = parent.clone();
            let cancel = session.cancel.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = parent.cancelled() => cancel.cancel(),
                    _ = cancel.cancelled() => {}
                }
            })
        };

        let seed_str = seed_url.to_string();
        self.visited.visit(&seed_str);
        let ticket = session.pending.acquire();
        if !session.frontier.push(&session.cancel, Job::new(seed_str, ticket)).await {
            tracing::debug!("Seed not queued: session already cancelled");
        }

        let mut workers = JoinSet::new();
        for id in 0..self.concurrency {
            workers.spawn(run_worker(id, Arc::clone(&session)));
        }

        let outcome = tokio::select! {
            biased;
            _ = session.cancel.cancelled() => CrawlOutcome::Cancelled,
            _ = session.pending.wait_idle() => CrawlOutcome::Completed,
        };

        self.transition(EngineState::Draining);
        session.cancel.cancel();

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Worker task failed: {}", e);
            }
        }
        if let Err(e) = parent_link.await {
            tracing::error!("Cancellation link task failed: {}", e);
        }

        // The session held the last sender; dropping it closes the stream.
        drop(session);
        self.transition(EngineState::Closed);

        tracing::info!(
            "Crawl {} after visiting {} URLs",
            match outcome {
                CrawlOutcome::Completed => "completed",
                CrawlOutcome::Cancelled => "cancelled",
            },
            self.visited.len()
        );

        Ok(outcome)
    }

    fn transition(&self, next: EngineState) {
        let mut state = lock(&self.state);
        if state.can_transition_to(next) {
            tracing::debug!("Engine state {} -> {}", *state, next);
            *state = next;
        } else {
            tracing::warn!("Ignoring engine state change {} -> {}", *state, next);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_worker(id: usize, session: Arc<Session>) {
    tracing::trace!("Worker {} started", id);

    while let Some(job) = session.frontier.pop(&session.cancel).await {
        session.process(&job).await;
        // Dropping the job releases its ticket, after every child has its own.
    }

    tracing::trace!("Worker {} stopped", id);
}

impl Session {
    /// Fetches one URL, publishes the result, and queues its in-scope links
    async fn process(&self, job: &Job) {
        let url = job.url();
        tracing::debug!("Fetching {}", url);

        let resource = match self.fetcher.fetch(&self.cancel, url).await {
            Ok(resource) => resource,
            Err(failure) if failure.is_cancelled() => return,
            Err(failure) => {
                tracing::warn!("Failed to fetch {}: {}", url, failure);
                failure
                    .partial
                    .unwrap_or_else(|| Resource::failed(url, ResourceStatus::Error))
            }
        };

        let links = resource.links.clone();

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return,
            sent = self.results.send(resource) => {
                if sent.is_err() {
                    tracing::trace!("Result stream dropped; discarding {}", url);
                }
            }
        }

        for link in &links {
            let link_url = match canonicalize(link) {
                Ok(link_url) => link_url,
                Err(e) => {
                    tracing::trace!("Skipping malformed link {}: {}", link, e);
                    continue;
                }
            };

            if !in_scope(&link_url, &self.scope) {
                tracing::trace!("Out of scope: {}", link_url);
                continue;
            }

            let link_str = link_url.to_string();
            if !self.visited.visit(&link_str) {
                continue;
            }

            let ticket = self.pending.acquire();
            tracing::debug!("Queued {}", link_str);
            if !self.frontier.push(&self.cancel, Job::new(link_str, ticket)).await {
                return;
            }
        }
    }
}
