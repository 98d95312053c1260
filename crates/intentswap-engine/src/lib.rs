//! # intentswap-engine
//!
//! The async shell around the synchronous matching core: a shared,
//! lock-protected ledger plus the background scheduler that runs one
//! matching pass per fixed interval.
//!
//! ## Concurrency model
//!
//! The whole venue state lives in one [`LedgerStore`] behind an async
//! mutex. API-style writers (intent submission, deposits) take the lock
//! briefly; the scheduler takes it for the duration of a pass, so no
//! reader ever observes a half-applied fill. Passes never overlap — the
//! scheduler is a single task that finishes one pass before awaiting
//! the next tick.

pub mod scheduler;

use std::sync::Arc;

use intentswap_ledger::LedgerStore;
use tokio::sync::Mutex;

pub use scheduler::{Scheduler, SchedulerHandle};

/// The venue's shared state handle.
pub type SharedLedger = Arc<Mutex<LedgerStore>>;

/// Wrap a store for sharing between the scheduler and API-style callers.
#[must_use]
pub fn shared(store: LedgerStore) -> SharedLedger {
    Arc::new(Mutex::new(store))
}
