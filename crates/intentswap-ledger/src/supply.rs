//! Conservation invariant tracker.
//!
//! Invariant checked after every matching pass:
//! ```text
//! ∀ asset: Σ user balances + pool reserve == Σ external mints
//! ```
//!
//! Matching moves value between users and the pool but never creates or
//! destroys it; only external deposits (faucet, pool seeding) change the
//! expected total. A violation means the engine minted or burned value,
//! which is the one bug this venue must never have.

use std::collections::HashMap;

use intentswap_types::{Asset, Result, VenueError};
use rust_decimal::Decimal;

/// Tracks per-asset expected supply and validates conservation.
#[derive(Debug, Default)]
pub struct SupplyTracker {
    /// Total externally minted per asset since process start.
    minted: HashMap<Asset, Decimal>,
}

impl SupplyTracker {
    /// Create a new tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an external mint (user deposit or pool seed).
    pub fn record_mint(&mut self, asset: &str, amount: Decimal) {
        *self
            .minted
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Expected total supply for an asset.
    #[must_use]
    pub fn expected_supply(&self, asset: &str) -> Decimal {
        self.minted.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    /// Verify that the actual supply (Σ user balances + pool reserve)
    /// matches the expected supply for an asset.
    ///
    /// # Errors
    /// Returns [`VenueError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, asset: &str, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply(asset);
        if actual_supply != expected {
            return Err(VenueError::SupplyInvariantViolation {
                reason: format!(
                    "Asset {asset}: actual supply {actual_supply} != expected {expected}"
                ),
            });
        }
        Ok(())
    }

    /// All assets with recorded mints.
    #[must_use]
    pub fn tracked_assets(&self) -> Vec<Asset> {
        self.minted.keys().cloned().collect()
    }
}
