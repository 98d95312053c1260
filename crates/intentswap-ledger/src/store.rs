//! The Ledger Store — single source of truth for venue state.
//!
//! Owns user balances, house pool reserves, the append-only transaction
//! log, and the intent queue. The API layer writes through
//! [`LedgerStore::submit_intent`] and the deposit/transfer demo
//! operations; the matching pass writes through the composed atomic
//! executions and the status transitions. Nothing else mutates state.
//!
//! Both [`execute_pool_swap`](LedgerStore::execute_pool_swap) and
//! [`execute_peer_swap`](LedgerStore::execute_peer_swap) validate every
//! precondition before touching a balance, so a failed execution leaves
//! the store byte-for-byte unchanged and a successful one is applied as
//! one unit together with its transaction record.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use intentswap_types::{
    Asset, Intent, IntentAction, IntentConditions, IntentId, IntentStatus, Result, Transaction,
    TxId, UserId, VenueError,
};
use rust_decimal::Decimal;

use crate::queue::IntentQueue;
use crate::supply::SupplyTracker;

/// Process-lifetime venue state. No persistence, by design.
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// Registered users.
    users: HashSet<UserId>,
    /// Per-(user, asset) balances. Unknown entries read as zero.
    balances: HashMap<(UserId, Asset), Decimal>,
    /// House pool reserves per asset.
    pool: HashMap<Asset, Decimal>,
    /// Append-only transaction log.
    txs: Vec<Transaction>,
    /// The intent queue.
    queue: IntentQueue,
    /// Conservation tracking.
    supply: SupplyTracker,
}

impl LedgerStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =====================================================================
    // Users and balances
    // =====================================================================

    /// Register a new user and return their id.
    pub fn register_user(&mut self) -> UserId {
        let user = UserId::new();
        self.users.insert(user);
        user
    }

    /// Whether a user exists in the registry.
    #[must_use]
    pub fn user_exists(&self, user: UserId) -> bool {
        self.users.contains(&user)
    }

    /// Balance of `asset` held by `user`. Unknown entries read as zero.
    #[must_use]
    pub fn balance(&self, user: UserId, asset: &str) -> Decimal {
        self.balances
            .get(&(user, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// External mint into a user's balance (faucet top-up). Registers
    /// the user if they are new, and raises the expected supply.
    ///
    /// # Errors
    /// Returns `InvalidAmount` for a non-positive amount.
    pub fn deposit(&mut self, user: UserId, asset: &str, amount: Decimal) -> Result<()> {
        Self::ensure_positive(amount)?;
        self.users.insert(user);
        *self.balance_mut(user, asset) += amount;
        self.supply.record_mint(asset, amount);
        Ok(())
    }

    /// Reduce a user's balance.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` if the balance is short; the balance
    /// is unchanged in that case.
    pub fn debit(&mut self, user: UserId, asset: &str, amount: Decimal) -> Result<()> {
        let entry = self.balance_mut(user, asset);
        if *entry < amount {
            let available = *entry;
            return Err(VenueError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        *entry -= amount;
        Ok(())
    }

    /// Increase a user's balance.
    pub fn credit(&mut self, user: UserId, asset: &str, amount: Decimal) {
        *self.balance_mut(user, asset) += amount;
    }

    /// Direct token send between two users (demo traffic, no intent).
    /// Appends a same-asset transaction record.
    ///
    /// # Errors
    /// - `InvalidAmount` for a non-positive amount
    /// - `MakerNotFound` if either user is unregistered
    /// - `InsufficientFunds` if the sender is short
    pub fn transfer(
        &mut self,
        from: UserId,
        to: UserId,
        asset: &str,
        amount: Decimal,
    ) -> Result<TxId> {
        Self::ensure_positive(amount)?;
        if !self.user_exists(from) {
            return Err(VenueError::MakerNotFound(from));
        }
        if !self.user_exists(to) {
            return Err(VenueError::MakerNotFound(to));
        }
        self.debit(from, asset, amount)?;
        self.credit(to, asset, amount);

        let tx = Transaction {
            id: TxId::new(),
            maker: from,
            counterparty: Some(to),
            from_asset: asset.to_string(),
            to_asset: asset.to_string(),
            amount_sent: amount,
            amount_received: amount,
            intents: Vec::new(),
            executed_at: Utc::now(),
        };
        let id = tx.id;
        self.txs.push(tx);
        Ok(id)
    }

    // Negative amounts invert debit/credit and can drive balances below
    // zero, so every external-mint or transfer entry point rejects them.
    fn ensure_positive(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(VenueError::InvalidAmount(amount));
        }
        Ok(())
    }

    fn balance_mut(&mut self, user: UserId, asset: &str) -> &mut Decimal {
        self.balances
            .entry((user, asset.to_string()))
            .or_insert(Decimal::ZERO)
    }

    // =====================================================================
    // Pool reserves
    // =====================================================================

    /// The pool's reserve of `asset`. Unknown assets read as zero.
    #[must_use]
    pub fn pool_reserve(&self, asset: &str) -> Decimal {
        self.pool.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    /// External mint into the pool (reserve seeding).
    ///
    /// # Errors
    /// Returns `InvalidAmount` for a non-positive amount.
    pub fn seed_pool(&mut self, asset: &str, amount: Decimal) -> Result<()> {
        Self::ensure_positive(amount)?;
        *self
            .pool
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO) += amount;
        self.supply.record_mint(asset, amount);
        Ok(())
    }

    fn pool_put(&mut self, asset: &str, amount: Decimal) {
        *self
            .pool
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    fn pool_take(&mut self, asset: &str, amount: Decimal) -> Result<()> {
        let entry = self
            .pool
            .entry(asset.to_string())
            .or_insert(Decimal::ZERO);
        if *entry < amount {
            let available = *entry;
            return Err(VenueError::InsufficientLiquidity {
                needed: amount,
                available,
            });
        }
        *entry -= amount;
        Ok(())
    }

    // =====================================================================
    // Transactions
    // =====================================================================

    /// The append-only transaction log.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.txs
    }

    // =====================================================================
    // Intents
    // =====================================================================

    /// Create a pending swap intent (API-layer entry point).
    ///
    /// Validates what the venue's front door always validated: the maker
    /// exists, the amount is positive, the pair is two distinct assets,
    /// and the maker currently holds at least `amount` of `from_asset`.
    ///
    /// # Errors
    /// `MakerNotFound`, `InvalidIntent`, or `InsufficientFunds`.
    pub fn submit_intent(
        &mut self,
        maker: UserId,
        from_asset: &str,
        to_asset: &str,
        amount: Decimal,
        conditions: IntentConditions,
    ) -> Result<IntentId> {
        if !self.user_exists(maker) {
            return Err(VenueError::MakerNotFound(maker));
        }
        if amount <= Decimal::ZERO {
            return Err(VenueError::InvalidIntent {
                reason: format!("amount must be positive, got {amount}"),
            });
        }
        if from_asset == to_asset {
            return Err(VenueError::InvalidIntent {
                reason: format!("cannot swap {from_asset} for itself"),
            });
        }
        let available = self.balance(maker, from_asset);
        if available < amount {
            return Err(VenueError::InsufficientFunds {
                needed: amount,
                available,
            });
        }

        let intent = Intent {
            id: IntentId::new(),
            maker,
            action: IntentAction::Swap,
            from_asset: from_asset.to_string(),
            to_asset: to_asset.to_string(),
            amount,
            conditions,
            status: IntentStatus::Pending,
            note: None,
            executed_at: None,
            tx_refs: Vec::new(),
            sequence: 0, // assigned by the queue
            created_at: Utc::now(),
        };
        Ok(self.queue.push(intent))
    }

    /// Push a pre-built intent without API-layer validation.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn push_intent_unchecked(&mut self, intent: Intent) -> IntentId {
        self.queue.push(intent)
    }

    /// Look up an intent by id.
    #[must_use]
    pub fn intent(&self, id: IntentId) -> Option<&Intent> {
        self.queue.get(id)
    }

    /// All intents in insertion order (any status).
    #[must_use]
    pub fn intents(&self) -> &[Intent] {
        self.queue.all()
    }

    /// Ids of pending intents, stable by insertion order.
    #[must_use]
    pub fn pending_intent_ids(&self) -> Vec<IntentId> {
        self.queue.pending_ids()
    }

    /// Transition a pending intent to `expired`.
    ///
    /// # Errors
    /// `IntentNotFound`, or `IntentNotPending` if already terminal.
    pub fn expire_intent(&mut self, id: IntentId) -> Result<()> {
        let intent = self.queue.get_mut(id)?;
        if !intent.is_pending() {
            return Err(VenueError::IntentNotPending(id));
        }
        intent.status = IntentStatus::Expired;
        intent.note = Some(VenueError::ExpiredIntent.match_note());
        tracing::debug!(intent = %id, "Intent expired");
        Ok(())
    }

    /// Transition a pending intent to `failed` with a note.
    ///
    /// # Errors
    /// `IntentNotFound`, or `IntentNotPending` if already terminal.
    pub fn fail_intent(&mut self, id: IntentId, note: &str) -> Result<()> {
        let intent = self.queue.get_mut(id)?;
        if !intent.is_pending() {
            return Err(VenueError::IntentNotPending(id));
        }
        intent.status = IntentStatus::Failed;
        intent.note = Some(note.to_string());
        tracing::debug!(intent = %id, note, "Intent failed");
        Ok(())
    }

    // =====================================================================
    // Atomic swap executions
    // =====================================================================

    /// Execute a fixed-rate fill of a pending intent against the pool.
    ///
    /// All preconditions are checked before any mutation. On success:
    /// maker gives `amount` of `from_asset`, receives `received` of
    /// `to_asset`; the pool takes the opposite side; the intent is
    /// fulfilled; exactly one counterparty-less transaction is appended.
    ///
    /// # Errors
    /// - `IntentNotFound` / `IntentNotPending`
    /// - `InsufficientFunds` if the maker cannot cover the send side
    /// - `InsufficientLiquidity` if the pool cannot cover the receive side
    pub fn execute_pool_swap(
        &mut self,
        intent_id: IntentId,
        received: Decimal,
        tx_id: TxId,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let intent = self
            .queue
            .get(intent_id)
            .ok_or(VenueError::IntentNotFound(intent_id))?;
        if !intent.is_pending() {
            return Err(VenueError::IntentNotPending(intent_id));
        }
        let maker = intent.maker;
        let from = intent.from_asset.clone();
        let to = intent.to_asset.clone();
        let amount = intent.amount;

        // Check both legs before mutating either.
        let available = self.balance(maker, &from);
        if available < amount {
            return Err(VenueError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        let reserve = self.pool_reserve(&to);
        if reserve < received {
            return Err(VenueError::InsufficientLiquidity {
                needed: received,
                available: reserve,
            });
        }

        self.debit(maker, &from, amount)?;
        self.credit(maker, &to, received);
        self.pool_put(&from, amount);
        self.pool_take(&to, received)?;

        let intent = self.queue.get_mut(intent_id)?;
        intent.amount = Decimal::ZERO;
        intent.status = IntentStatus::Fulfilled;
        intent.executed_at = Some(now);
        intent.tx_refs.push(tx_id);

        self.txs.push(Transaction {
            id: tx_id,
            maker,
            counterparty: None,
            from_asset: from.clone(),
            to_asset: to.clone(),
            amount_sent: amount,
            amount_received: received,
            intents: vec![intent_id],
            executed_at: now,
        });

        tracing::debug!(
            intent = %intent_id,
            maker = %maker,
            pair = %format!("{from}→{to}"),
            sent = %amount,
            received = %received,
            "Pool swap executed"
        );
        Ok(())
    }

    /// Execute an offsetting 1:1 swap between two complementary pending
    /// intents. The fill size is `min(a.amount, b.amount)`; any side
    /// whose remaining amount reaches exactly zero is fulfilled, the
    /// other stays pending with the reduced amount. Exactly one pair
    /// transaction is appended. Returns the matched amount.
    ///
    /// # Errors
    /// - `IntentNotFound` / `IntentNotPending`
    /// - `NotComplementary` if the pairs don't offset
    /// - `InsufficientFunds` if either maker cannot cover their leg
    pub fn execute_peer_swap(
        &mut self,
        a_id: IntentId,
        b_id: IntentId,
        tx_id: TxId,
        now: DateTime<Utc>,
    ) -> Result<Decimal> {
        if a_id == b_id {
            return Err(VenueError::NotComplementary);
        }
        let a = self
            .queue
            .get(a_id)
            .ok_or(VenueError::IntentNotFound(a_id))?;
        let b = self
            .queue
            .get(b_id)
            .ok_or(VenueError::IntentNotFound(b_id))?;
        if !a.is_pending() {
            return Err(VenueError::IntentNotPending(a_id));
        }
        if !b.is_pending() {
            return Err(VenueError::IntentNotPending(b_id));
        }
        if !a.complements(b) {
            return Err(VenueError::NotComplementary);
        }

        let (a_maker, a_from, a_to) = (a.maker, a.from_asset.clone(), a.to_asset.clone());
        let b_maker = b.maker;
        let matchable = a.amount.min(b.amount);

        // Check both makers before mutating either. b's send asset is
        // a's receive asset, so one pair of symbols covers both legs.
        let a_available = self.balance(a_maker, &a_from);
        if a_available < matchable {
            return Err(VenueError::InsufficientFunds {
                needed: matchable,
                available: a_available,
            });
        }
        let b_available = self.balance(b_maker, &a_to);
        if b_available < matchable {
            return Err(VenueError::InsufficientFunds {
                needed: matchable,
                available: b_available,
            });
        }

        self.debit(a_maker, &a_from, matchable)?;
        self.credit(a_maker, &a_to, matchable);
        self.debit(b_maker, &a_to, matchable)?;
        self.credit(b_maker, &a_from, matchable);

        for id in [a_id, b_id] {
            let intent = self.queue.get_mut(id)?;
            intent.amount -= matchable;
            intent.tx_refs.push(tx_id);
            if intent.amount.is_zero() {
                intent.status = IntentStatus::Fulfilled;
                intent.executed_at = Some(now);
            }
        }

        self.txs.push(Transaction {
            id: tx_id,
            maker: a_maker,
            counterparty: Some(b_maker),
            from_asset: a_from.clone(),
            to_asset: a_to.clone(),
            amount_sent: matchable,
            amount_received: matchable,
            intents: vec![a_id, b_id],
            executed_at: now,
        });

        tracing::debug!(
            a = %a_id,
            b = %b_id,
            pair = %format!("{a_from}⇄{a_to}"),
            matched = %matchable,
            "Peer swap executed"
        );
        Ok(matchable)
    }

    // =====================================================================
    // Conservation
    // =====================================================================

    /// Actual total supply of an asset: Σ user balances + pool reserve.
    #[must_use]
    pub fn total_supply(&self, asset: &str) -> Decimal {
        let user_total: Decimal = self
            .balances
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, amount)| *amount)
            .sum();
        user_total + self.pool_reserve(asset)
    }

    /// Verify the conservation invariant for one asset.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` if actual ≠ expected.
    pub fn verify_supply(&self, asset: &str) -> Result<()> {
        self.supply.verify(asset, self.total_supply(asset))
    }

    /// Assets with externally minted supply (candidates for verification).
    #[must_use]
    pub fn tracked_assets(&self) -> Vec<Asset> {
        self.supply.tracked_assets()
    }
}
