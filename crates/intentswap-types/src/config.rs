//! Configuration types for the intentswap engine.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Asset, constants};

/// Fixed-rate table for pool matching: ordered pair → positive rate.
///
/// An intent swapping `from→to` at rate `r` receives `amount * r`.
/// Pairs absent from the table are not pool-matchable. Stored as a
/// nested `from → to → rate` map so it serializes as plain JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<Asset, HashMap<Asset, Decimal>>,
}

impl RateTable {
    /// Create an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate for an ordered pair. Non-positive rates are ignored.
    pub fn set_rate(&mut self, from: &str, to: &str, rate: Decimal) {
        if rate > Decimal::ZERO {
            self.rates
                .entry(from.to_string())
                .or_default()
                .insert(to.to_string(), rate);
        }
    }

    /// Look up the rate for an ordered pair.
    #[must_use]
    pub fn rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates.get(from).and_then(|tos| tos.get(to)).copied()
    }

    /// Whether the ordered pair has a configured rate.
    #[must_use]
    pub fn supports(&self, from: &str, to: &str) -> bool {
        self.rate(from, to).is_some()
    }

    /// The demo venue's rate table: ETH→XAN at 5, XAN→ETH at 0.2.
    #[must_use]
    pub fn demo() -> Self {
        let mut table = Self::new();
        table.set_rate(
            constants::DEMO_BASE_ASSET,
            constants::DEMO_QUOTE_ASSET,
            Decimal::new(5, 0),
        );
        table.set_rate(
            constants::DEMO_QUOTE_ASSET,
            constants::DEMO_BASE_ASSET,
            Decimal::new(2, 1), // 0.2
        );
        table
    }
}

/// Engine configuration: pass timing and strategy selection.
///
/// Both strategies run in a fixed precedence when enabled (peer first,
/// pool as fallback); the toggles exist so a deployment can run either
/// variant alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Matching pass period in milliseconds.
    pub pass_interval_ms: u64,
    /// Attempt offsetting swaps between complementary pending intents.
    pub peer_matching: bool,
    /// Attempt fixed-rate fills against the house pool.
    pub pool_matching: bool,
    /// The fixed-rate table for pool matching.
    pub rates: RateTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pass_interval_ms: constants::DEFAULT_PASS_INTERVAL_MS,
            peer_matching: true,
            pool_matching: true,
            rates: RateTable::demo(),
        }
    }
}

impl EngineConfig {
    /// Pool-only configuration (the original venue's behavior).
    #[must_use]
    pub fn pool_only(rates: RateTable) -> Self {
        Self {
            peer_matching: false,
            pool_matching: true,
            rates,
            ..Self::default()
        }
    }

    /// Peer-only configuration: no house pool involvement.
    #[must_use]
    pub fn peer_only() -> Self {
        Self {
            peer_matching: true,
            pool_matching: false,
            rates: RateTable::new(),
            ..Self::default()
        }
    }
}
