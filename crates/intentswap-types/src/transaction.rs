//! Transaction types produced by the intentswap matching engine.
//!
//! A [`Transaction`] is the immutable record of one balance-conserving
//! transfer event: a pool fill, a peer fill, or a direct token transfer.
//! Once appended to the ledger's log it is never modified.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Asset, IntentId, TxId, UserId};

/// An immutable transfer record.
///
/// Pool fills carry no counterparty (the house pool is the other side);
/// peer fills carry the other maker. Direct transfers (faucet-adjacent
/// demo traffic) have `from_asset == to_asset` and no originating
/// intents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    /// The user who initiated the swap or transfer.
    pub maker: UserId,
    /// The other user, for peer matches and transfers. `None` for pool
    /// matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<UserId>,
    pub from_asset: Asset,
    pub to_asset: Asset,
    /// Amount the maker gave up (in `from_asset`).
    pub amount_sent: Decimal,
    /// Amount the maker received (in `to_asset`).
    pub amount_received: Decimal,
    /// The intent(s) this fill originated from: one for pool matches,
    /// two for peer matches, empty for direct transfers.
    pub intents: Vec<IntentId>,
    pub executed_at: DateTime<Utc>,
}

impl Transaction {
    /// Whether this records a peer match (two makers, two intents).
    #[must_use]
    pub fn is_peer_swap(&self) -> bool {
        self.counterparty.is_some() && self.intents.len() == 2
    }

    /// Whether this records a fill against the house pool.
    #[must_use]
    pub fn is_pool_swap(&self) -> bool {
        self.counterparty.is_none() && !self.intents.is_empty()
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tx[{}] {} {}→{} sent {} recv {}",
            self.id,
            self.maker,
            self.from_asset,
            self.to_asset,
            self.amount_sent,
            self.amount_received,
        )
    }
}
