//! Scheduler behavior and a randomized conservation storm.

use chrono::Utc;
use intentswap_engine::{Scheduler, shared};
use intentswap_ledger::LedgerStore;
use intentswap_matchcore::run_pass;
use intentswap_types::{
    EngineConfig, IntentConditions, IntentStatus, PassId, UserId,
};
use rust_decimal::Decimal;
use tokio::time::Duration;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

fn demo_store() -> (LedgerStore, UserId, UserId) {
    let mut store = LedgerStore::new();
    let alice = store.register_user();
    let bob = store.register_user();
    store.deposit(alice, "ETH", dec(100)).unwrap();
    store.deposit(bob, "XAN", dec(100)).unwrap();
    store.seed_pool("ETH", dec(1000)).unwrap();
    store.seed_pool("XAN", dec(1000)).unwrap();
    (store, alice, bob)
}

fn fast_config() -> EngineConfig {
    EngineConfig {
        pass_interval_ms: 100,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn scheduler_matches_in_background() {
    let (mut store, alice, bob) = demo_store();
    let a = store
        .submit_intent(alice, "ETH", "XAN", dec(10), IntentConditions::none())
        .unwrap();
    let b = store
        .submit_intent(bob, "XAN", "ETH", dec(10), IntentConditions::none())
        .unwrap();

    let ledger = shared(store);
    let mut handle = Scheduler::new(ledger.clone(), fast_config()).spawn();

    let report = handle.next_report().await;
    assert_eq!(report.pass, PassId(1));
    assert_eq!(report.peer_fills, 1);
    assert!(report.supply_ok);

    {
        let store = ledger.lock().await;
        assert_eq!(store.intent(a).unwrap().status, IntentStatus::Fulfilled);
        assert_eq!(store.intent(b).unwrap().status, IntentStatus::Fulfilled);
    }
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn passes_advance_one_interval_at_a_time() {
    let (store, _, _) = demo_store();
    let ledger = shared(store);
    let mut handle = Scheduler::new(ledger, fast_config()).spawn();

    let first = handle.next_report().await;
    let second = handle.next_report().await;
    let third = handle.next_report().await;
    assert_eq!(first.pass.next(), second.pass);
    assert_eq!(second.pass.next(), third.pass);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn intents_submitted_between_passes_get_picked_up() {
    let (store, _, _) = demo_store();
    let ledger = shared(store);
    let mut handle = Scheduler::new(ledger.clone(), fast_config()).spawn();

    // Let a pass run against the empty queue first
    let report = handle.next_report().await;
    assert_eq!(report.scanned, 0);

    let id = {
        let mut store = ledger.lock().await;
        let carol = store.register_user();
        store.deposit(carol, "ETH", dec(20)).unwrap();
        store
            .submit_intent(carol, "ETH", "XAN", dec(10), IntentConditions::none())
            .unwrap()
    };

    // The next pass should pool-fill it
    let mut fulfilled = false;
    for _ in 0..3 {
        handle.next_report().await;
        let store = ledger.lock().await;
        if store.intent(id).unwrap().status == IntentStatus::Fulfilled {
            fulfilled = true;
            break;
        }
    }
    assert!(fulfilled);
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_loop() {
    let (store, alice, _) = demo_store();
    let ledger = shared(store);
    let mut handle = Scheduler::new(ledger.clone(), fast_config()).spawn();

    handle.next_report().await;
    handle.shutdown().await;

    // Submitted after shutdown: nobody left to match it
    let id = {
        let mut store = ledger.lock().await;
        store
            .submit_intent(alice, "ETH", "XAN", dec(5), IntentConditions::none())
            .unwrap()
    };
    tokio::time::sleep(Duration::from_millis(500)).await;

    let store = ledger.lock().await;
    assert!(store.intent(id).unwrap().is_pending());
}

/// Randomized storm: many users, random intents over many passes, with
/// the conservation invariant checked after every pass.
#[test]
fn random_storm_conserves_supply() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0xD1CE);
    let mut store = LedgerStore::new();
    let config = EngineConfig::default();

    let users: Vec<UserId> = (0..6).map(|_| store.register_user()).collect();
    for user in &users {
        store.deposit(*user, "ETH", dec(rng.gen_range(10..200))).unwrap();
        store.deposit(*user, "XAN", dec(rng.gen_range(10..200))).unwrap();
    }
    store.seed_pool("ETH", dec(500)).unwrap();
    store.seed_pool("XAN", dec(500)).unwrap();

    let mut pass = PassId(0);
    for _ in 0..20 {
        for _ in 0..4 {
            let user = users[rng.gen_range(0..users.len())];
            let (from, to) = if rng.gen_bool(0.5) {
                ("ETH", "XAN")
            } else {
                ("XAN", "ETH")
            };
            let amount = dec(rng.gen_range(1..15));
            let conditions = if rng.gen_bool(0.2) {
                IntentConditions {
                    min_receive: Some(dec(rng.gen_range(1..30))),
                    ..Default::default()
                }
            } else {
                IntentConditions::none()
            };
            // Underfunded submissions are rejected at the door; fine.
            let _ = store.submit_intent(user, from, to, amount, conditions);
        }

        pass = pass.next();
        let report = run_pass(&mut store, &config, pass, Utc::now());
        assert!(report.supply_ok, "conservation broke on {pass:?}");

        for asset in ["ETH", "XAN"] {
            store.verify_supply(asset).unwrap();
            assert!(store.pool_reserve(asset) >= Decimal::ZERO);
            for user in &users {
                assert!(store.balance(*user, asset) >= Decimal::ZERO);
            }
        }
        for intent in store.intents() {
            if intent.is_pending() {
                assert!(intent.amount > Decimal::ZERO);
            } else if intent.status == IntentStatus::Fulfilled {
                assert!(!intent.tx_refs.is_empty());
            }
        }
    }
}
