//! Claim event records and the event registry.
//!
//! The registry exclusively owns all [`ClaimEvent`] records and the per-kind
//! active indices. Other components refer to events only by `(kind, id)` as
//! an opaque foreign key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{AssetRef, EventId, EventKind, TokenTypeId};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// A Simple claim event: one token type, entitlement capped by custody balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleEvent {
    /// Unique identifier within the Simple kind
    pub id: EventId,
    /// Whether the event is currently claimable
    pub active: bool,
    /// Underlying multitoken asset
    pub asset: AssetRef,
    /// The single token type claims are paid in
    pub token_type: TokenTypeId,
}

/// A Random claim event: a pool of token types, entitlement satisfied by a
/// pseudo-random allocation across the pool.
///
/// `token_types` is fixed at creation and never mutated; its length defines
/// the distribution vector's dimensionality for the event's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomEvent {
    /// Unique identifier within the Random kind
    pub id: EventId,
    /// Whether the event is currently claimable
    pub active: bool,
    /// Underlying multitoken asset
    pub asset: AssetRef,
    /// Ordered pool of token types (length >= 1, repeats permitted)
    pub token_types: Vec<TokenTypeId>,
}

/// A claim event of either kind, dispatched by pattern match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// Simple event payload
    Simple(SimpleEvent),
    /// Random event payload
    Random(RandomEvent),
}

impl ClaimEvent {
    /// Get the event id
    pub fn id(&self) -> EventId {
        match self {
            ClaimEvent::Simple(ev) => ev.id,
            ClaimEvent::Random(ev) => ev.id,
        }
    }

    /// Get the event kind
    pub fn kind(&self) -> EventKind {
        match self {
            ClaimEvent::Simple(_) => EventKind::Simple,
            ClaimEvent::Random(_) => EventKind::Random,
        }
    }

    /// Whether the event is currently active
    pub fn is_active(&self) -> bool {
        match self {
            ClaimEvent::Simple(ev) => ev.active,
            ClaimEvent::Random(ev) => ev.active,
        }
    }

    /// Get the underlying asset reference
    pub fn asset(&self) -> &AssetRef {
        match self {
            ClaimEvent::Simple(ev) => &ev.asset,
            ClaimEvent::Random(ev) => &ev.asset,
        }
    }

    /// Serialize the record to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACTIVE INDEX
// ═══════════════════════════════════════════════════════════════════════════════

/// Unordered index of currently active event ids with O(1) removal.
///
/// Removal swaps the removed entry with the last entry and drops the last
/// slot; order is not preserved, not guaranteed, and not relied upon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ActiveIndex {
    ids: Vec<EventId>,
    positions: HashMap<EventId, usize>,
}

impl ActiveIndex {
    fn insert(&mut self, id: EventId) {
        if self.positions.contains_key(&id) {
            return;
        }
        self.positions.insert(id, self.ids.len());
        self.ids.push(id);
    }

    fn remove(&mut self, id: EventId) -> bool {
        let Some(pos) = self.positions.remove(&id) else {
            return false;
        };
        self.ids.swap_remove(pos);
        if let Some(&moved) = self.ids.get(pos) {
            self.positions.insert(moved, pos);
        }
        true
    }

    fn contains(&self, id: EventId) -> bool {
        self.positions.contains_key(&id)
    }

    fn snapshot(&self) -> Vec<EventId> {
        self.ids.clone()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Registry of all claim events, with per-kind id counters and active indices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRegistry {
    /// All Simple events by id
    simple: HashMap<EventId, SimpleEvent>,
    /// All Random events by id
    random: HashMap<EventId, RandomEvent>,
    /// Next Simple id (monotonic, starts at 0, never reused)
    next_simple: u64,
    /// Next Random id (monotonic, starts at 0, never reused)
    next_random: u64,
    /// Active index for Simple events
    active_simple: ActiveIndex,
    /// Active index for Random events
    active_random: ActiveIndex,
}

impl EventRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new Simple event.
    ///
    /// Deliberately permissive: neither the asset reference nor the token
    /// type is validated, since custody may be empty at creation time.
    pub fn create_simple(&mut self, asset: AssetRef, token_type: TokenTypeId) -> EventId {
        let id = EventId::new(self.next_simple);
        self.next_simple += 1;

        self.simple.insert(
            id,
            SimpleEvent {
                id,
                active: true,
                asset,
                token_type,
            },
        );
        self.active_simple.insert(id);
        id
    }

    /// Register a new Random event.
    ///
    /// Fails if the token pool is empty; the pool's length fixes the
    /// distribution dimensionality for the event's lifetime.
    pub fn create_random(
        &mut self,
        asset: AssetRef,
        token_types: Vec<TokenTypeId>,
    ) -> Result<EventId> {
        if token_types.is_empty() {
            return Err(Error::EmptyTokenPool);
        }

        let id = EventId::new(self.next_random);
        self.next_random += 1;

        self.random.insert(
            id,
            RandomEvent {
                id,
                active: true,
                asset,
                token_types,
            },
        );
        self.active_random.insert(id);
        Ok(id)
    }

    /// Disable an event and remove it from its active index.
    ///
    /// Fails with [`Error::EventNotFound`] if the id is not currently in the
    /// active index, which covers both "already disabled" and "never
    /// existed".
    pub fn disable(&mut self, kind: EventKind, id: EventId) -> Result<()> {
        let index = self.active_index_mut(kind);
        if !index.remove(id) {
            return Err(Error::EventNotFound { kind, id });
        }

        match kind {
            EventKind::Simple => {
                if let Some(ev) = self.simple.get_mut(&id) {
                    ev.active = false;
                }
            }
            EventKind::Random => {
                if let Some(ev) = self.random.get_mut(&id) {
                    ev.active = false;
                }
            }
        }
        Ok(())
    }

    /// Snapshot of the active event ids for a kind (unordered)
    pub fn list_active(&self, kind: EventKind) -> Vec<EventId> {
        self.active_index(kind).snapshot()
    }

    /// Whether an event is currently active
    pub fn is_active(&self, kind: EventKind, id: EventId) -> bool {
        self.active_index(kind).contains(id)
    }

    /// Look up an event record by kind and id
    pub fn get(&self, kind: EventKind, id: EventId) -> Option<ClaimEvent> {
        match kind {
            EventKind::Simple => self.simple.get(&id).cloned().map(ClaimEvent::Simple),
            EventKind::Random => self.random.get(&id).cloned().map(ClaimEvent::Random),
        }
    }

    /// Look up a Simple event record
    pub fn simple(&self, id: EventId) -> Option<&SimpleEvent> {
        self.simple.get(&id)
    }

    /// Look up a Random event record
    pub fn random(&self, id: EventId) -> Option<&RandomEvent> {
        self.random.get(&id)
    }

    /// Total number of events ever registered for a kind
    pub fn total_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Simple => self.simple.len(),
            EventKind::Random => self.random.len(),
        }
    }

    /// Number of currently active events for a kind
    pub fn active_count(&self, kind: EventKind) -> usize {
        self.active_index(kind).len()
    }

    fn active_index(&self, kind: EventKind) -> &ActiveIndex {
        match kind {
            EventKind::Simple => &self.active_simple,
            EventKind::Random => &self.active_random,
        }
    }

    fn active_index_mut(&mut self, kind: EventKind) -> &mut ActiveIndex {
        match kind {
            EventKind::Simple => &mut self.active_simple,
            EventKind::Random => &mut self.active_random,
        }
    }
}
