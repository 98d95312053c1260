//! Intent types for the intentswap matching engine.
//!
//! An [`Intent`] is a user's request to swap a quantity of one asset for
//! another, subject to optional conditions. Intents are created `pending`
//! by the API layer and thereafter mutated only by the matching engine:
//! `amount` decreases on partial fills, and `status` transitions one-way
//! into a terminal state (`fulfilled`, `expired`, or `failed`). Intents
//! are never deleted, only transitioned.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Asset, AssetPair, IntentId, TxId, UserId};

/// What the intent asks the venue to do. Only swaps exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentAction {
    Swap,
}

impl std::fmt::Display for IntentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Swap => write!(f, "swap"),
        }
    }
}

/// Lifecycle status of an intent.
///
/// `Pending` may persist across many passes; the other three are terminal
/// and once reached the intent is never reprocessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentStatus {
    Pending,
    Fulfilled,
    Expired,
    Failed,
}

impl IntentStatus {
    /// Whether this status is terminal (never reprocessed).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Fulfilled => write!(f, "fulfilled"),
            Self::Expired => write!(f, "expired"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Optional conditions attached to an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentConditions {
    /// Hard deadline: once current time exceeds this, the intent expires
    /// before any matching attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    /// Minimum acceptable receive amount for a single match attempt.
    /// Evaluated per attempt since the received amount differs between
    /// pool and peer strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_receive: Option<Decimal>,
}

impl IntentConditions {
    /// No conditions at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// The effective minimum-receive threshold (zero when absent).
    #[must_use]
    pub fn min_receive_or_zero(&self) -> Decimal {
        self.min_receive.unwrap_or(Decimal::ZERO)
    }
}

/// A user's swap intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    /// The user who created this intent.
    pub maker: UserId,
    pub action: IntentAction,
    pub from_asset: Asset,
    pub to_asset: Asset,
    /// Remaining unmatched amount. Strictly positive while pending.
    pub amount: Decimal,
    pub conditions: IntentConditions,
    pub status: IntentStatus,
    /// Human-readable reason, set when the intent expires or fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Set when the intent reaches terminal success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
    /// Transactions produced as this intent was partially or fully filled.
    pub tx_refs: Vec<TxId>,
    /// Queue insertion order, assigned by the ledger. Scan order is
    /// stable by this sequence.
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
}

impl Intent {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == IntentStatus::Pending
    }

    /// The ordered swap pair this intent asks for.
    #[must_use]
    pub fn pair(&self) -> AssetPair {
        AssetPair::new(self.from_asset.clone(), self.to_asset.clone())
    }

    /// Whether `other` asks for the exact complementary pair (peer-match
    /// candidate).
    #[must_use]
    pub fn complements(&self, other: &Intent) -> bool {
        self.from_asset == other.to_asset && self.to_asset == other.from_asset
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Intent {
    pub fn dummy_swap(from: &str, to: &str, amount: Decimal) -> Self {
        Self::dummy_swap_for_maker(UserId::new(), from, to, amount)
    }

    pub fn dummy_swap_for_maker(maker: UserId, from: &str, to: &str, amount: Decimal) -> Self {
        Self {
            id: IntentId::new(),
            maker,
            action: IntentAction::Swap,
            from_asset: from.to_string(),
            to_asset: to.to_string(),
            amount,
            conditions: IntentConditions::none(),
            status: IntentStatus::Pending,
            note: None,
            executed_at: None,
            tx_refs: Vec::new(),
            sequence: 0,
            created_at: Utc::now(),
        }
    }
}
