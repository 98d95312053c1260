//! # intentswap-matchcore
//!
//! The matching pass: the pure engine core that walks the pending
//! intent queue and fills intents against peers and the house pool.
//!
//! ## Architecture
//!
//! 1. **conditions**: expiry and min-receive evaluation
//! 2. **peer**: offsetting 1:1 fills between complementary intents
//! 3. **pool**: fixed-rate fills against house reserves
//! 4. **pass**: the orchestrator — snapshot, scan, strategy precedence,
//!    terminal failure handling, conservation check
//!
//! Everything here is synchronous and takes `now` as a parameter; the
//! scheduling and locking live in `intentswap-engine`.

pub mod conditions;
pub mod pass;
pub mod peer;
pub mod pool;

pub use pass::{PassReport, run_pass};
pub use peer::{PeerFill, find_counterparty, match_against_peers};
pub use pool::try_pool_match;
