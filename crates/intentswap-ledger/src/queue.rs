//! Intent queue: the ordered collection of swap intents.
//!
//! Intents are kept in insertion order and never removed — they only
//! transition status. The matching pass scans pending intents in the
//! order they arrived, which keeps pass results deterministic for a
//! given queue state.

use intentswap_types::{Intent, IntentId, Result, VenueError};

/// Insertion-ordered intent collection.
///
/// Assigns each pushed intent its queue sequence number. Lookups by id
/// are linear; the queue is process-lifetime state for a toy venue, not
/// an index-optimized book.
#[derive(Debug, Default)]
pub struct IntentQueue {
    /// Intents in arrival order.
    intents: Vec<Intent>,
    /// Next sequence number to assign.
    next_sequence: u64,
}

impl IntentQueue {
    /// Create a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an intent, assigning its insertion sequence. Returns the id.
    pub fn push(&mut self, mut intent: Intent) -> IntentId {
        intent.sequence = self.next_sequence;
        self.next_sequence += 1;
        let id = intent.id;
        self.intents.push(intent);
        id
    }

    /// Look up an intent by id.
    #[must_use]
    pub fn get(&self, id: IntentId) -> Option<&Intent> {
        self.intents.iter().find(|i| i.id == id)
    }

    /// Mutable lookup by id.
    ///
    /// # Errors
    /// Returns `IntentNotFound` if the id is unknown.
    pub fn get_mut(&mut self, id: IntentId) -> Result<&mut Intent> {
        self.intents
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(VenueError::IntentNotFound(id))
    }

    /// Ids of all pending intents, stable by insertion order.
    #[must_use]
    pub fn pending_ids(&self) -> Vec<IntentId> {
        self.intents
            .iter()
            .filter(|i| i.is_pending())
            .map(|i| i.id)
            .collect()
    }

    /// All intents in insertion order (any status).
    #[must_use]
    pub fn all(&self) -> &[Intent] {
        &self.intents
    }

    /// Number of intents ever enqueued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the queue has never seen an intent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
