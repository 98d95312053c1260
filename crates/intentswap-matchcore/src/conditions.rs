//! Condition evaluation for match attempts.
//!
//! Two conditions exist: a hard expiry deadline and a per-attempt
//! minimum receive threshold. Expiry takes precedence over everything —
//! an expired intent is never offered to either strategy. The
//! min-receive check runs per attempt, because the amount an intent
//! would receive differs between a fixed-rate pool fill and a 1:1 peer
//! fill.

use chrono::{DateTime, Utc};
use intentswap_types::{Intent, Result, VenueError};
use rust_decimal::Decimal;

/// Whether the intent's expiry deadline has passed.
#[must_use]
pub fn is_expired(intent: &Intent, now: DateTime<Utc>) -> bool {
    intent.conditions.expiry.is_some_and(|deadline| now > deadline)
}

/// Check the min-receive threshold against a computed receive amount.
///
/// # Errors
/// Returns [`VenueError::BelowMinReceive`] (non-terminal) if the
/// computed amount falls short.
pub fn check_min_receive(intent: &Intent, computed: Decimal) -> Result<()> {
    let min_receive = intent.conditions.min_receive_or_zero();
    if computed < min_receive {
        return Err(VenueError::BelowMinReceive {
            computed,
            min_receive,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn no_expiry_never_expires() {
        let intent = Intent::dummy_swap("ETH", "XAN", dec(10));
        assert!(!is_expired(&intent, Utc::now() + Duration::days(365)));
    }

    #[test]
    fn expiry_is_a_strict_deadline() {
        let deadline = Utc::now();
        let mut intent = Intent::dummy_swap("ETH", "XAN", dec(10));
        intent.conditions.expiry = Some(deadline);
        // Exactly at the deadline is still live
        assert!(!is_expired(&intent, deadline));
        assert!(is_expired(&intent, deadline + Duration::milliseconds(1)));
    }

    #[test]
    fn min_receive_boundary() {
        let mut intent = Intent::dummy_swap("ETH", "XAN", dec(10));
        intent.conditions.min_receive = Some(dec(50));
        // Exactly meeting the threshold passes
        assert!(check_min_receive(&intent, dec(50)).is_ok());
        let err = check_min_receive(&intent, dec(49)).unwrap_err();
        assert!(matches!(err, VenueError::BelowMinReceive { .. }));
    }

    #[test]
    fn absent_min_receive_always_passes() {
        let intent = Intent::dummy_swap("ETH", "XAN", dec(10));
        assert!(check_min_receive(&intent, Decimal::ZERO).is_ok());
    }
}
