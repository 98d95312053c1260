//! Peer matching: offsetting 1:1 swaps between complementary intents.
//!
//! For a scanned intent `a`, candidates are the pending intents queued
//! *after* it, taken in insertion order, so every pair is considered
//! exactly once per pass and the earlier intent drives the match. A
//! candidate must ask for the exact inverse pair, belong to a different
//! maker, be unexpired, clear both sides' min-receive thresholds at the
//! fill size, and both makers must hold their send leg. Candidates that
//! fail any of these are skipped, never failed — peer matching is
//! opportunistic.
//!
//! One scanned intent can fill against several counterparties in a
//! single pass: after a partial fill the remaining amount is matched
//! against the next candidate until the intent fulfills or candidates
//! run out.

use chrono::{DateTime, Utc};
use intentswap_ledger::LedgerStore;
use intentswap_types::{IntentId, PassId, TxId};
use rust_decimal::Decimal;

use crate::conditions;

/// One executed peer fill.
#[derive(Debug, Clone, Copy)]
pub struct PeerFill {
    pub tx_id: TxId,
    /// The counterparty intent that offset the scanned one.
    pub counterparty: IntentId,
    /// 1:1 matched amount.
    pub amount: Decimal,
}

/// Find the earliest eligible counterparty for `a_id` among pending
/// intents queued after it. Returns `None` when no pair is currently
/// executable.
#[must_use]
pub fn find_counterparty(
    store: &LedgerStore,
    a_id: IntentId,
    now: DateTime<Utc>,
) -> Option<IntentId> {
    let a = store.intent(a_id)?;
    if !a.is_pending() {
        return None;
    }
    store
        .intents()
        .iter()
        .filter(|b| b.sequence > a.sequence && b.is_pending())
        .filter(|b| b.maker != a.maker && a.complements(b))
        .filter(|b| !conditions::is_expired(b, now))
        .find(|b| {
            let matchable = a.amount.min(b.amount);
            conditions::check_min_receive(a, matchable).is_ok()
                && conditions::check_min_receive(b, matchable).is_ok()
                && store.balance(a.maker, &a.from_asset) >= matchable
                && store.balance(b.maker, &b.from_asset) >= matchable
        })
        .map(|b| b.id)
}

/// Run the peer phase for one scanned intent: fill against successive
/// counterparties until it fulfills or no eligible candidate remains.
///
/// `fill_seq` is the pass-wide fill counter used to derive deterministic
/// transaction ids; it advances once per executed fill.
pub fn match_against_peers(
    store: &mut LedgerStore,
    a_id: IntentId,
    pass: PassId,
    fill_seq: &mut u64,
    now: DateTime<Utc>,
) -> Vec<PeerFill> {
    let mut fills = Vec::new();
    while let Some(b_id) = find_counterparty(store, a_id, now) {
        let tx_id = TxId::deterministic(pass.0, *fill_seq);
        match store.execute_peer_swap(a_id, b_id, tx_id, now) {
            Ok(amount) => {
                *fill_seq += 1;
                fills.push(PeerFill {
                    tx_id,
                    counterparty: b_id,
                    amount,
                });
            }
            Err(err) => {
                // Candidates are pre-filtered, so this is unexpected;
                // leave both intents pending for the next pass.
                tracing::warn!(a = %a_id, b = %b_id, error = %err, "Peer fill rejected");
                break;
            }
        }
    }
    fills
}

#[cfg(test)]
mod tests {
    use super::*;
    use intentswap_types::{IntentConditions, IntentStatus, UserId};

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn two_user_store() -> (LedgerStore, UserId, UserId) {
        let mut store = LedgerStore::new();
        let alice = store.register_user();
        let bob = store.register_user();
        store.deposit(alice, "ETH", dec(100)).unwrap();
        store.deposit(bob, "XAN", dec(100)).unwrap();
        (store, alice, bob)
    }

    #[test]
    fn earliest_candidate_wins() {
        let (mut store, alice, bob) = two_user_store();
        let carol = store.register_user();
        store.deposit(carol, "XAN", dec(100)).unwrap();

        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();
        let b = store
            .submit_intent(bob, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();
        let _c = store
            .submit_intent(carol, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();

        assert_eq!(find_counterparty(&store, a, Utc::now()), Some(b));
    }

    #[test]
    fn only_later_queued_intents_are_candidates() {
        let (mut store, alice, bob) = two_user_store();
        let b = store
            .submit_intent(bob, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();
        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();

        // a was queued after b, so a finds nothing; b finds a.
        assert_eq!(find_counterparty(&store, a, Utc::now()), None);
        assert_eq!(find_counterparty(&store, b, Utc::now()), Some(a));
    }

    #[test]
    fn same_maker_pairs_are_skipped() {
        let mut store = LedgerStore::new();
        let alice = store.register_user();
        store.deposit(alice, "ETH", dec(100)).unwrap();
        store.deposit(alice, "XAN", dec(100)).unwrap();

        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();
        let _b = store
            .submit_intent(alice, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();

        assert_eq!(find_counterparty(&store, a, Utc::now()), None);
    }

    #[test]
    fn min_receive_on_either_side_blocks_the_pair() {
        let (mut store, alice, bob) = two_user_store();
        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();
        let strict = IntentConditions {
            min_receive: Some(dec(20)), // matchable is only 10
            ..Default::default()
        };
        let _b = store
            .submit_intent(bob, "XAN", "ETH", dec(10), strict)
            .unwrap();

        assert_eq!(find_counterparty(&store, a, Utc::now()), None);
    }

    #[test]
    fn one_intent_fills_against_multiple_counterparties() {
        let (mut store, alice, bob) = two_user_store();
        let carol = store.register_user();
        store.deposit(carol, "XAN", dec(100)).unwrap();

        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();
        let b = store
            .submit_intent(bob, "XAN", "ETH", dec(4), IntentConditions::none())
            .unwrap();
        let c = store
            .submit_intent(carol, "XAN", "ETH", dec(6), IntentConditions::none())
            .unwrap();

        let mut fill_seq = 0;
        let fills = match_against_peers(&mut store, a, PassId(1), &mut fill_seq, Utc::now());

        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].counterparty, b);
        assert_eq!(fills[0].amount, dec(4));
        assert_eq!(fills[1].counterparty, c);
        assert_eq!(fills[1].amount, dec(6));
        assert_eq!(fill_seq, 2);

        assert_eq!(store.intent(a).unwrap().status, IntentStatus::Fulfilled);
        assert_eq!(store.intent(b).unwrap().status, IntentStatus::Fulfilled);
        assert_eq!(store.intent(c).unwrap().status, IntentStatus::Fulfilled);
        assert_eq!(store.transactions().len(), 2);

        store.verify_supply("ETH").unwrap();
        store.verify_supply("XAN").unwrap();
    }

    #[test]
    fn underfunded_candidate_is_skipped_for_the_next() {
        let (mut store, alice, bob) = two_user_store();
        let carol = store.register_user();
        store.deposit(carol, "XAN", dec(100)).unwrap();

        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();
        let b = store
            .submit_intent(bob, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();
        let c = store
            .submit_intent(carol, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();

        // Bob's XAN disappears after submission
        store.debit(bob, "XAN", dec(95)).unwrap();

        assert_eq!(find_counterparty(&store, a, Utc::now()), Some(c));
        assert!(store.intent(b).unwrap().is_pending());
    }

    #[test]
    fn deterministic_tx_ids_per_pass() {
        let (mut store, alice, bob) = two_user_store();
        let a = store
            .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap();
        let _b = store
            .submit_intent(bob, "XAN", "ETH", dec(10), IntentConditions::none())
            .unwrap();

        let mut fill_seq = 0;
        let fills = match_against_peers(&mut store, a, PassId(3), &mut fill_seq, Utc::now());
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].tx_id, TxId::deterministic(3, 0));
    }
}
