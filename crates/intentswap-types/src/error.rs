//! Error types for the intentswap matching engine.
//!
//! All errors use the `IS_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Intent errors
//! - 2xx: Balance / pool errors
//! - 3xx: Matching errors
//! - 9xx: General / internal errors
//!
//! Matching errors split into *terminal* kinds (the intent fails or
//! expires and is never reprocessed) and *non-terminal* kinds (the
//! intent stays pending and is retried next pass); see
//! [`VenueError::is_terminal_match_failure`].

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AssetPair, IntentId, UserId};

/// Central error enum for all intentswap operations.
#[derive(Debug, Error)]
pub enum VenueError {
    // =================================================================
    // Intent Errors (1xx)
    // =================================================================
    /// The requested intent was not found in the queue.
    #[error("IS_ERR_100: Intent not found: {0}")]
    IntentNotFound(IntentId),

    /// The intent failed validation (non-positive amount, bad fields).
    #[error("IS_ERR_101: Invalid intent: {reason}")]
    InvalidIntent { reason: String },

    /// The intent is already in a terminal state and cannot be mutated.
    #[error("IS_ERR_102: Intent no longer pending: {0}")]
    IntentNotPending(IntentId),

    /// The intent's maker does not exist in the user registry.
    #[error("IS_ERR_103: Maker not found: {0}")]
    MakerNotFound(UserId),

    // =================================================================
    // Balance / Pool Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the operation.
    #[error("IS_ERR_200: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    /// A balance operation would produce a negative value.
    #[error("IS_ERR_201: Balance underflow")]
    BalanceUnderflow,

    /// The house pool cannot cover the receive side of a fill.
    #[error("IS_ERR_202: Pool liquidity insufficient: need {needed}, reserve {available}")]
    InsufficientLiquidity { needed: Decimal, available: Decimal },

    /// Conservation invariant violated — critical safety alert.
    #[error("IS_ERR_203: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// A mint or transfer amount must be strictly positive.
    #[error("IS_ERR_204: Invalid amount: {0}")]
    InvalidAmount(Decimal),

    // =================================================================
    // Matching Errors (3xx)
    // =================================================================
    /// No rate is configured for this ordered pair.
    #[error("IS_ERR_300: Unsupported pair: {0}")]
    UnsupportedPair(AssetPair),

    /// The computed receive amount is below the intent's threshold.
    /// Non-terminal: the intent stays pending and is retried.
    #[error("IS_ERR_301: Below min receive: computed {computed} < min {min_receive}")]
    BelowMinReceive {
        computed: Decimal,
        min_receive: Decimal,
    },

    /// The intent's expiry passed before it could match.
    #[error("IS_ERR_302: Intent expired before match")]
    ExpiredIntent,

    /// The two intents of a peer execution are not a complementary pair.
    #[error("IS_ERR_303: Intents are not a complementary pair")]
    NotComplementary,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("IS_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, VenueError>;

impl VenueError {
    /// Whether this error, raised during a match attempt, puts the
    /// intent into a terminal `failed`/`expired` state. Non-terminal
    /// kinds leave it pending for retry next pass.
    #[must_use]
    pub fn is_terminal_match_failure(&self) -> bool {
        matches!(
            self,
            Self::MakerNotFound(_)
                | Self::UnsupportedPair(_)
                | Self::InsufficientFunds { .. }
                | Self::InsufficientLiquidity { .. }
                | Self::ExpiredIntent
        )
    }

    /// The human-readable note recorded on the intent when this error
    /// is terminal. The strings are part of the venue's API surface.
    #[must_use]
    pub fn match_note(&self) -> String {
        match self {
            Self::MakerNotFound(_) => "Maker not found".to_string(),
            Self::UnsupportedPair(_) => "Unsupported pair".to_string(),
            Self::InsufficientFunds { .. } => "Insufficient funds".to_string(),
            Self::InsufficientLiquidity { .. } => "Pool liquidity insufficient".to_string(),
            Self::ExpiredIntent => "Expired before match".to_string(),
            other => other.to_string(),
        }
    }
}
