//! Protocol events for state change notifications.
//!
//! Events are emitted for every significant state change, enabling
//! embedders to index activity and react accordingly.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::types::{AssetRef, EventId, EventKind, TokenTypeId, WalletId};

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// All protocol event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    /// A Simple claim event was registered
    SimpleEventCreated(SimpleEventCreated),
    /// A Random claim event was registered
    RandomEventCreated(RandomEventCreated),
    /// A claim event was disabled
    EventDisabled(EventDisabled),
    /// One wallet's entitlement was set or overwritten
    EntitlementSet(EntitlementSet),
    /// A batch of entitlements was set
    EntitlementBatchSet(EntitlementBatchSet),
    /// A Simple claim paid out
    SimpleClaimed(SimpleClaimed),
    /// A Random claim paid out
    RandomClaimed(RandomClaimed),
    /// The protocol was paused
    Paused,
    /// The protocol was unpaused
    Unpaused,
    /// A sender was added to the deposit whitelist
    DepositorAllowed(DepositorAllowed),
    /// A sender was removed from the deposit whitelist
    DepositorRevoked(DepositorRevoked),
}

impl ProtocolEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SimpleEventCreated(_) => "SimpleEventCreated",
            Self::RandomEventCreated(_) => "RandomEventCreated",
            Self::EventDisabled(_) => "EventDisabled",
            Self::EntitlementSet(_) => "EntitlementSet",
            Self::EntitlementBatchSet(_) => "EntitlementBatchSet",
            Self::SimpleClaimed(_) => "SimpleClaimed",
            Self::RandomClaimed(_) => "RandomClaimed",
            Self::Paused => "Paused",
            Self::Unpaused => "Unpaused",
            Self::DepositorAllowed(_) => "DepositorAllowed",
            Self::DepositorRevoked(_) => "DepositorRevoked",
        }
    }

    /// Compute a stable hash of the event payload
    pub fn hash(&self) -> [u8; 32] {
        let data = bincode::serialize(self).unwrap_or_default();
        Sha256::digest(data).into()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT PAYLOADS
// ═══════════════════════════════════════════════════════════════════════════════

/// Emitted when a Simple claim event is registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleEventCreated {
    /// New event id
    pub id: EventId,
    /// Underlying asset
    pub asset: AssetRef,
    /// Token type claims are paid in
    pub token_type: TokenTypeId,
}

/// Emitted when a Random claim event is registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomEventCreated {
    /// New event id
    pub id: EventId,
    /// Underlying asset
    pub asset: AssetRef,
    /// Ordered token pool
    pub token_types: Vec<TokenTypeId>,
}

/// Emitted when a claim event is disabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDisabled {
    /// Event kind
    pub kind: EventKind,
    /// Disabled event id
    pub id: EventId,
}

/// Emitted when one wallet's entitlement is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementSet {
    /// Event kind
    pub kind: EventKind,
    /// Event id
    pub id: EventId,
    /// Entitled wallet
    pub wallet: WalletId,
    /// New remaining claimable amount (overwrite, not additive)
    pub amount: u64,
}

/// Emitted when a batch of entitlements is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementBatchSet {
    /// Event kind
    pub kind: EventKind,
    /// Event id
    pub id: EventId,
    /// Number of wallets in the batch
    pub count: usize,
    /// Sum of all amounts in the batch
    pub total: u64,
}

/// Emitted when a Simple claim pays out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleClaimed {
    /// Event id
    pub id: EventId,
    /// Claiming wallet
    pub wallet: WalletId,
    /// Token type paid
    pub token_type: TokenTypeId,
    /// Units transferred
    pub amount: u64,
}

/// Emitted when a Random claim pays out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomClaimed {
    /// Event id
    pub id: EventId,
    /// Claiming wallet
    pub wallet: WalletId,
    /// Total units transferred across the pool
    pub amount: u64,
    /// Per-pool allocation, index-aligned with the event's token pool
    pub allocation: Vec<u64>,
}

/// Emitted when a sender is whitelisted for deposits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositorAllowed {
    /// Whitelisted sender
    pub wallet: WalletId,
}

/// Emitted when a sender is removed from the deposit whitelist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositorRevoked {
    /// Removed sender
    pub wallet: WalletId,
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT LOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered log of emitted protocol events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<ProtocolEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn emit(&mut self, event: ProtocolEvent) {
        self.events.push(event);
    }

    /// Iterate over logged events in emission order
    pub fn iter(&self) -> impl Iterator<Item = &ProtocolEvent> {
        self.events.iter()
    }

    /// Take all logged events, leaving the log empty
    pub fn drain(&mut self) -> Vec<ProtocolEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of logged events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard all logged events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let event = ProtocolEvent::EventDisabled(EventDisabled {
            kind: EventKind::Simple,
            id: EventId::new(3),
        });
        assert_eq!(event.event_type(), "EventDisabled");
        assert_eq!(ProtocolEvent::Paused.event_type(), "Paused");
    }

    #[test]
    fn test_event_hash_is_stable() {
        let event = ProtocolEvent::SimpleClaimed(SimpleClaimed {
            id: EventId::new(1),
            wallet: WalletId::new("alice"),
            token_type: TokenTypeId::new("10000001"),
            amount: 7,
        });
        assert_eq!(event.hash(), event.hash());
    }

    #[test]
    fn test_log_drain_empties() {
        let mut log = EventLog::new();
        log.emit(ProtocolEvent::Paused);
        log.emit(ProtocolEvent::Unpaused);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serializes_to_json() {
        let event = ProtocolEvent::RandomClaimed(RandomClaimed {
            id: EventId::new(0),
            wallet: WalletId::new("alice"),
            amount: 43,
            allocation: vec![21, 4, 5, 13],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RandomClaimed"));
        assert!(json.contains("43"));
    }
}
