//! Demo venue: two funded users, a stocked house pool, a handful of
//! intents with different fates, and the scheduler matching them in the
//! background for a few seconds.
//!
//! Run with `RUST_LOG=debug` to watch individual passes.

use chrono::{Duration as ChronoDuration, Utc};
use intentswap_engine::{Scheduler, shared};
use intentswap_ledger::LedgerStore;
use intentswap_types::{EngineConfig, IntentConditions, constants};
use rust_decimal::Decimal;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let eth = constants::DEMO_BASE_ASSET;
    let xan = constants::DEMO_QUOTE_ASSET;
    let dec = |n: i64| Decimal::new(n, 0);

    let mut store = LedgerStore::new();
    let alice = store.register_user();
    let bob = store.register_user();
    store.deposit(alice, eth, dec(100))?;
    store.deposit(alice, xan, dec(50))?;
    store.deposit(bob, eth, dec(50))?;
    store.deposit(bob, xan, dec(100))?;
    store.seed_pool(eth, dec(1000))?;
    store.seed_pool(xan, dec(1000))?;

    // Partially offset by bob's complement, remainder pool-filled
    store.submit_intent(alice, eth, xan, dec(10), IntentConditions::none())?;
    store.submit_intent(bob, xan, eth, dec(25), IntentConditions::none())?;
    // No configured rate: fails terminally on the first pass
    store.submit_intent(alice, eth, "BTC", dec(1), IntentConditions::none())?;
    // Expires before the scheduler ever sees it
    store.submit_intent(
        bob,
        xan,
        eth,
        dec(5),
        IntentConditions {
            expiry: Some(Utc::now() - ChronoDuration::seconds(1)),
            ..Default::default()
        },
    )?;
    // Threshold the demo rates can never satisfy: retained every pass
    store.submit_intent(
        alice,
        eth,
        xan,
        dec(2),
        IntentConditions {
            min_receive: Some(dec(100)),
            ..Default::default()
        },
    )?;

    let ledger = shared(store);
    let config = EngineConfig {
        pass_interval_ms: 500,
        ..Default::default()
    };
    let handle = Scheduler::new(ledger.clone(), config).spawn();

    tokio::time::sleep(Duration::from_secs(3)).await;
    handle.shutdown().await;

    let store = ledger.lock().await;
    println!("--- intents ---");
    println!("{}", serde_json::to_string_pretty(store.intents())?);
    println!("--- transactions ---");
    println!("{}", serde_json::to_string_pretty(store.transactions())?);
    println!("--- balances ---");
    for (name, user) in [("alice", alice), ("bob", bob)] {
        println!(
            "{name}: {} {eth}, {} {xan}",
            store.balance(user, eth),
            store.balance(user, xan)
        );
    }
    println!(
        "pool: {} {eth}, {} {xan}",
        store.pool_reserve(eth),
        store.pool_reserve(xan)
    );
    for asset in store.tracked_assets() {
        store.verify_supply(&asset)?;
        println!("supply conserved for {asset}: {}", store.total_supply(&asset));
    }
    Ok(())
}
