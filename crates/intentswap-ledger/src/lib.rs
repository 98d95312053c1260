//! # intentswap-ledger
//!
//! **The Ledger Store**: user balances, house pool reserves, the
//! append-only transaction log, and the insertion-ordered intent queue.
//! The single source of truth for venue state, mutated only through
//! atomic operations.
//!
//! ## Architecture
//!
//! The ledger sits between the API layer and the matching pass:
//! 1. **IntentQueue**: insertion-ordered intent collection, stable scan order
//! 2. **SupplyTracker**: expected per-asset supply from external mints
//! 3. **LedgerStore**: balances + pool + transactions + the two composed
//!    atomic swap executions (`execute_pool_swap`, `execute_peer_swap`)
//!
//! ## State Flow
//!
//! ```text
//! API → LedgerStore.submit_intent() → IntentQueue
//! Pass → LedgerStore.execute_{pool,peer}_swap() → balances + pool + tx log
//! ```
//!
//! Every composed execution checks **all** preconditions before mutating
//! anything, so no reader ever observes one leg of a transfer without
//! the other.

pub mod queue;
pub mod store;
pub mod supply;

pub use queue::IntentQueue;
pub use store::LedgerStore;
pub use supply::SupplyTracker;
