//! Generation-tagged estimation runs

use std::fmt::Display;
use std::future::Future;

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn, Instrument};

use crate::spans;

/// Published estimation state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EstimationState<T> {
    /// Nothing requested yet, or the last run was invalidated
    #[default]
    Idle,
    /// A run is in flight; any previous value is no longer current
    Loading,
    Ready(T),
    /// The latest run failed; no value is current
    Failed(String),
}

impl<T> EstimationState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, EstimationState::Loading)
    }

    /// The current value, if the latest run succeeded
    pub fn value(&self) -> Option<&T> {
        match self {
            EstimationState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EstimationState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimationOutcome<T, E> {
    /// Published as [`EstimationState::Ready`]
    Applied(T),
    /// Published as [`EstimationState::Failed`]
    Failed(E),
    /// A newer run for the same key started first; nothing was published
    Superseded,
}

/// Serializes estimation results into one published state
///
/// Every [`run`](Self::run) takes the next coordinator-wide generation before
/// it starts and only publishes if no other run started before it completed.
/// The check and the publish happen under one lock, so a stale run can never
/// overwrite a newer result, whatever key either run was started with.
///
/// The key names the caller's request (for example
/// [`SwapIntent::estimation_key`](crate::SwapIntent::estimation_key)) in logs
/// and spans. Runs with different keys still compete for the same state.
#[derive(Debug)]
pub struct EstimationCoordinator<T> {
    generation: Mutex<u64>,
    state: watch::Sender<EstimationState<T>>,
}

impl<T> Default for EstimationCoordinator<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EstimationCoordinator<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(EstimationState::Idle);
        Self {
            generation: Mutex::new(0),
            state,
        }
    }

    /// Receive every published state change
    pub fn subscribe(&self) -> watch::Receiver<EstimationState<T>> {
        self.state.subscribe()
    }

    /// Snapshot of the published state
    pub fn current(&self) -> EstimationState<T> {
        self.state.borrow().clone()
    }

    /// Run `estimate` as the newest estimation
    ///
    /// Publishes [`EstimationState::Loading`] immediately. On completion the
    /// result is published only if no newer run has started, under any key;
    /// a failure replaces any previous value.
    pub async fn run<F, Fut, E>(&self, key: &str, estimate: F) -> EstimationOutcome<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let generation = self.begin().await;

        async move {
            let result = estimate().await;

            let latest = self.generation.lock().await;
            if *latest != generation {
                debug!(key, generation, latest = *latest, "Discarding superseded estimation");
                return EstimationOutcome::Superseded;
            }

            match result {
                Ok(value) => {
                    self.state.send_replace(EstimationState::Ready(value.clone()));
                    EstimationOutcome::Applied(value)
                }
                Err(e) => {
                    warn!(key, error = %e, "Estimation failed");
                    self.state.send_replace(EstimationState::Failed(e.to_string()));
                    EstimationOutcome::Failed(e)
                }
            }
        }
        .instrument(spans::coordinated_estimation(key, generation))
        .await
    }

    /// Drop any in-flight run and publish [`EstimationState::Idle`]
    pub async fn invalidate(&self) {
        let mut generation = self.generation.lock().await;
        *generation += 1;
        self.state.send_replace(EstimationState::Idle);
    }

    async fn begin(&self) -> u64 {
        let mut generation = self.generation.lock().await;
        *generation += 1;
        self.state.send_replace(EstimationState::Loading);
        *generation
    }
}
