//! Pool matching: fixed-rate fills against the house reserves.
//!
//! A pool fill always takes the intent's entire remaining amount; the
//! maker receives `amount * rate` of the target asset out of the pool
//! and the pool absorbs the sent asset. Checks run in a fixed order so
//! the failure note an intent ends up with is deterministic:
//! maker, rate, maker funds, pool liquidity, then min receive.

use chrono::{DateTime, Utc};
use intentswap_ledger::LedgerStore;
use intentswap_types::{IntentId, RateTable, Result, TxId, VenueError, constants};
use rust_decimal::Decimal;

use crate::conditions;

/// Attempt a fixed-rate pool fill of a pending intent's full remaining
/// amount. Returns the received amount on success.
///
/// # Errors
/// - `IntentNotFound` / `IntentNotPending`
/// - `MakerNotFound`, `UnsupportedPair`, `InsufficientFunds`,
///   `InsufficientLiquidity` — terminal for the intent
/// - `BelowMinReceive` — non-terminal, the intent stays pending
pub fn try_pool_match(
    store: &mut LedgerStore,
    intent_id: IntentId,
    rates: &RateTable,
    tx_id: TxId,
    now: DateTime<Utc>,
) -> Result<Decimal> {
    let intent = store
        .intent(intent_id)
        .ok_or(VenueError::IntentNotFound(intent_id))?;
    if !intent.is_pending() {
        return Err(VenueError::IntentNotPending(intent_id));
    }

    let maker = intent.maker;
    let pair = intent.pair();
    let amount = intent.amount;

    if !store.user_exists(maker) {
        return Err(VenueError::MakerNotFound(maker));
    }

    let rate = rates
        .rate(&pair.from, &pair.to)
        .ok_or_else(|| VenueError::UnsupportedPair(pair.clone()))?;
    let received = (amount * rate).round_dp(constants::AMOUNT_PRECISION);

    let available = store.balance(maker, &pair.from);
    if available < amount {
        return Err(VenueError::InsufficientFunds {
            needed: amount,
            available,
        });
    }

    let reserve = store.pool_reserve(&pair.to);
    if reserve < received {
        return Err(VenueError::InsufficientLiquidity {
            needed: received,
            available: reserve,
        });
    }

    // Last in the check order: a short fall here keeps the intent alive.
    let intent = store
        .intent(intent_id)
        .ok_or(VenueError::IntentNotFound(intent_id))?;
    conditions::check_min_receive(intent, received)?;

    store.execute_pool_swap(intent_id, received, tx_id, now)?;
    Ok(received)
}
