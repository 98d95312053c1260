//! The matching pass: one full scan of the pending intent queue.
//!
//! The snapshot of pending ids is taken once at pass start; within each
//! phase, intents are visited in queue insertion order. Three phases:
//!
//! 1. **expiry**: any intent whose deadline has passed is expired and
//!    never offered to a matcher
//! 2. **peer**: offsetting 1:1 fills between complementary intents,
//!    with mid-phase amount updates carrying into later pairs
//! 3. **pool**: fixed-rate fill of whatever amount remains pending
//!
//! Pool-phase failures are terminal except `BelowMinReceive`, which
//! leaves the intent pending for the next pass. A problem with one
//! intent never aborts the pass; the error is recorded and the scan
//! moves on. The supply conservation invariant is verified for every
//! tracked asset after the scan.

use chrono::{DateTime, Utc};
use intentswap_ledger::LedgerStore;
use intentswap_types::{EngineConfig, Intent, PassId, TxId, VenueError};

use crate::{conditions, peer, pool};

/// Counters for one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub pass: PassId,
    /// Pending intents in the start-of-pass snapshot.
    pub scanned: usize,
    /// Executed peer fills (transactions, not intents).
    pub peer_fills: usize,
    /// Executed pool fills.
    pub pool_fills: usize,
    pub expired: usize,
    pub failed: usize,
    /// Intents still pending after the pass.
    pub retained: usize,
    /// Intents whose processing hit an unexpected error (left pending).
    pub errors: usize,
    /// Conservation verified for all tracked assets.
    pub supply_ok: bool,
}

impl PassReport {
    /// Total executed fills of both kinds.
    #[must_use]
    pub fn total_fills(&self) -> usize {
        self.peer_fills + self.pool_fills
    }
}

/// Run one matching pass over the store.
pub fn run_pass(
    store: &mut LedgerStore,
    config: &EngineConfig,
    pass: PassId,
    now: DateTime<Utc>,
) -> PassReport {
    let snapshot = store.pending_intent_ids();
    let mut report = PassReport {
        pass,
        scanned: snapshot.len(),
        supply_ok: true,
        ..Default::default()
    };
    let mut fill_seq: u64 = 0;

    // Phase 1: expiry beats matching.
    for &id in &snapshot {
        let Some(intent) = store.intent(id) else {
            continue;
        };
        if intent.is_pending() && conditions::is_expired(intent, now) {
            match store.expire_intent(id) {
                Ok(()) => report.expired += 1,
                Err(err) => {
                    tracing::error!(intent = %id, error = %err, "Expiry transition failed");
                    report.errors += 1;
                }
            }
        }
    }

    // Phase 2: peer fills across the eligible subset. Intents consumed
    // as counterparties earlier in the phase are skipped when reached.
    if config.peer_matching {
        for &id in &snapshot {
            if store.intent(id).is_some_and(Intent::is_pending) {
                let fills = peer::match_against_peers(store, id, pass, &mut fill_seq, now);
                report.peer_fills += fills.len();
            }
        }
    }

    // Phase 3: pool fills for whatever remains pending.
    if config.pool_matching {
        for &id in &snapshot {
            let Some(intent) = store.intent(id) else {
                continue;
            };
            if !intent.is_pending() {
                continue;
            }

            let maker = intent.maker;
            if !store.user_exists(maker) {
                let err = VenueError::MakerNotFound(maker);
                if store.fail_intent(id, &err.match_note()).is_ok() {
                    report.failed += 1;
                } else {
                    report.errors += 1;
                }
                continue;
            }

            let tx_id = TxId::deterministic(pass.0, fill_seq);
            match pool::try_pool_match(store, id, &config.rates, tx_id, now) {
                Ok(_) => {
                    fill_seq += 1;
                    report.pool_fills += 1;
                }
                Err(err) if err.is_terminal_match_failure() => {
                    if store.fail_intent(id, &err.match_note()).is_ok() {
                        report.failed += 1;
                    } else {
                        report.errors += 1;
                    }
                }
                Err(VenueError::BelowMinReceive { computed, min_receive }) => {
                    tracing::trace!(
                        intent = %id,
                        %computed,
                        %min_receive,
                        "Below min receive, retrying next pass"
                    );
                }
                Err(err) => {
                    tracing::error!(intent = %id, error = %err, "Match attempt errored");
                    report.errors += 1;
                }
            }
        }
    }

    report.retained = store.pending_intent_ids().len();

    for asset in store.tracked_assets() {
        if let Err(err) = store.verify_supply(&asset) {
            tracing::error!(%asset, error = %err, "Supply invariant violated");
            report.supply_ok = false;
        }
    }

    tracing::debug!(
        pass = %pass,
        scanned = report.scanned,
        peer_fills = report.peer_fills,
        pool_fills = report.pool_fills,
        expired = report.expired,
        failed = report.failed,
        retained = report.retained,
        supply_ok = report.supply_ok,
        "Pass complete"
    );
    report
}
