//! Live re-estimation plumbing
//!
//! Estimates are recomputed as a user edits an intent. Two pieces keep that
//! cheap and consistent:
//!
//! - [`Debouncer`] coalesces bursts of input into one run after a quiet
//!   window, with a ceiling so continuous input still makes progress.
//! - [`EstimationCoordinator`] tags each run with a generation and publishes
//!   results on a `watch` channel. A run that finishes after a newer run
//!   started is discarded, even when the newer run carries another key.
//!
//! ```rust,ignore
//! use relayswap::estimation::{Debouncer, EstimationCoordinator};
//! use std::sync::Arc;
//!
//! let coordinator = Arc::new(EstimationCoordinator::new());
//! let mut state = coordinator.subscribe();
//!
//! let quiet = config.swap.estimation_debounce;
//! let max_wait = Some(config.swap.estimation_max_wait);
//! let (debouncer, _task) = Debouncer::spawn(quiet, max_wait, {
//!     let coordinator = coordinator.clone();
//!     let orchestrator = orchestrator.clone();
//!     move |request: SwapRequest| {
//!         let coordinator = coordinator.clone();
//!         let orchestrator = orchestrator.clone();
//!         async move {
//!             let key = request.intent.estimation_key();
//!             coordinator.run(&key, || orchestrator.estimate(&request)).await;
//!         }
//!     }
//! });
//! ```

mod coordinator;
mod debounce;

pub use coordinator::{EstimationCoordinator, EstimationOutcome, EstimationState};
pub use debounce::Debouncer;
