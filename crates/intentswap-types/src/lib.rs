//! # intentswap-types
//!
//! Shared types, errors, and configuration for the **intentswap** matching
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`IntentId`], [`UserId`], [`TxId`], [`PassId`], [`AssetPair`]
//! - **Intent model**: [`Intent`], [`IntentAction`], [`IntentStatus`], [`IntentConditions`]
//! - **Transaction model**: [`Transaction`]
//! - **Configuration**: [`EngineConfig`], [`RateTable`]
//! - **Errors**: [`VenueError`] with `IS_ERR_` prefix codes
//! - **Constants**: system-wide defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod intent;
pub mod transaction;

// Re-export all primary types at crate root for ergonomic imports:
//   use intentswap_types::{Intent, IntentStatus, Transaction, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use intent::*;
pub use transaction::*;

// Constants are accessed via `intentswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
