//! Globally unique identifiers used throughout intentswap.
//!
//! All entity IDs use UUIDv7 for time-ordered lexicographic sorting.
//! `TxId` additionally supports deterministic derivation from the pass
//! that produced it, so re-running the same pass over the same queue
//! yields the same transaction ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Unique identifier for a user (intent maker) of the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// IntentId
// ---------------------------------------------------------------------------

/// Globally unique intent identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct IntentId(pub Uuid);

impl IntentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Extract the embedded timestamp (milliseconds since UNIX epoch) from UUIDv7.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        let bytes = self.0.as_bytes();
        u64::from_be_bytes([
            0, 0, bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5],
        ])
    }
}

impl Default for IntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TxId
// ---------------------------------------------------------------------------

/// Globally unique transaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxId(pub Uuid);

impl TxId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Deterministic `TxId` from pass ID and fill sequence.
    ///
    /// The same fill within the same matching pass always gets the same
    /// id, which keeps the transaction log reproducible in tests.
    #[must_use]
    pub fn deterministic(pass: u64, fill_sequence: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"intentswap:tx_id:v1:");
        hasher.update(pass.to_le_bytes());
        hasher.update(fill_sequence.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PassId
// ---------------------------------------------------------------------------

/// Monotonically increasing identifier for a matching pass.
///
/// The scheduler bumps this once per pass; transaction ids derive from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PassId(pub u64);

impl PassId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pass:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Asset / AssetPair
// ---------------------------------------------------------------------------

/// Type alias for asset symbols (e.g., "ETH", "XAN").
pub type Asset = String;

/// An ordered swap pair: the asset given up and the asset requested.
///
/// Ordering matters: `ETH→XAN` and `XAN→ETH` are distinct pairs with
/// independent rates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetPair {
    pub from: Asset,
    pub to: Asset,
}

impl AssetPair {
    #[must_use]
    pub fn new(from: impl Into<Asset>, to: impl Into<Asset>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The reversed pair (`to→from`).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    /// Whether `other` is the exact complementary pair of `self`.
    #[must_use]
    pub fn complements(&self, other: &Self) -> bool {
        self.from == other.to && self.to == other.from
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_id_uniqueness() {
        let a = IntentId::new();
        let b = IntentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn intent_id_ordering() {
        let a = IntentId::new();
        let b = IntentId::new();
        assert!(a < b);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn intent_id_timestamp_extraction() {
        let before = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let id = IntentId::new();
        let after = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let ts = id.timestamp_ms();
        assert!(
            ts >= before && ts <= after,
            "ts={ts}, before={before}, after={after}"
        );
    }

    #[test]
    fn tx_id_deterministic() {
        let a = TxId::deterministic(7, 0);
        let b = TxId::deterministic(7, 0);
        assert_eq!(a, b);
        let c = TxId::deterministic(7, 1);
        assert_ne!(a, c);
        let d = TxId::deterministic(8, 0);
        assert_ne!(a, d);
    }

    #[test]
    fn pass_id_next() {
        let p = PassId(5);
        assert_eq!(p.next(), PassId(6));
    }

    #[test]
    fn asset_pair_complements() {
        let eth_xan = AssetPair::new("ETH", "XAN");
        let xan_eth = AssetPair::new("XAN", "ETH");
        assert!(eth_xan.complements(&xan_eth));
        assert!(xan_eth.complements(&eth_xan));
        assert!(!eth_xan.complements(&eth_xan));
        assert_eq!(eth_xan.inverse(), xan_eth);
    }

    #[test]
    fn serde_roundtrips() {
        let iid = IntentId::new();
        let json = serde_json::to_string(&iid).unwrap();
        let back: IntentId = serde_json::from_str(&json).unwrap();
        assert_eq!(iid, back);

        let txid = TxId::deterministic(1, 2);
        let json = serde_json::to_string(&txid).unwrap();
        let back: TxId = serde_json::from_str(&json).unwrap();
        assert_eq!(txid, back);
    }
}
