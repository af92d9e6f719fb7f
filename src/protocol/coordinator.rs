//! Protocol coordinator - the exposed operation surface.
//!
//! [`ClaimProtocol`] owns the event registry and entitlement ledger, and
//! orchestrates every administrative mutation and claim against the injected
//! authorization and custody collaborators. Each operation runs to
//! completion on a `&mut` receiver; there is no interleaving within an
//! operation and no partial effect on failure.

use crate::auth::{Role, RoleAuthority};
use crate::core::config::ProtocolConfig;
use crate::core::entitlement::EntitlementLedger;
use crate::core::event::{ClaimEvent, EventRegistry};
use crate::core::types::{AssetRef, EventId, EventKind, TokenTypeId, WalletId};
use crate::custody::{CustodyAsset, DepositGate};
use crate::distribution;
use crate::error::{Error, Result};
use crate::protocol::events::*;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// CLAIM PROTOCOL
// ═══════════════════════════════════════════════════════════════════════════════

/// The claimdrop protocol: event lifecycle, entitlement bookkeeping, and
/// claim execution against external custody.
pub struct ClaimProtocol<C: CustodyAsset, A: RoleAuthority> {
    /// Event records and active indices
    registry: EventRegistry,
    /// Remaining claimable amounts per (event, wallet)
    ledger: EntitlementLedger,
    /// Deposit whitelist
    gate: DepositGate,
    /// Custody collaborator (balance lookup, transfer execution)
    custody: C,
    /// Authorization collaborator
    authority: A,
    /// Protocol configuration
    config: ProtocolConfig,
    /// Events emitted by executed operations
    event_log: EventLog,
}

impl<C: CustodyAsset, A: RoleAuthority> ClaimProtocol<C, A> {
    /// Create a protocol instance over the given collaborators
    pub fn new(custody: C, authority: A, config: ProtocolConfig) -> Result<Self> {
        if !config.validate() {
            return Err(Error::InvalidParameter {
                name: "config".into(),
                reason: "custody wallet must be set and batch limit positive".into(),
            });
        }

        Ok(Self {
            registry: EventRegistry::new(),
            ledger: EntitlementLedger::new(),
            gate: DepositGate::new(),
            custody,
            authority,
            config,
            event_log: EventLog::new(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PAUSE CONTROL
    // ═══════════════════════════════════════════════════════════════════════════

    /// Pause the protocol; mutations and claims are rejected until unpaused
    pub fn pause(&mut self, caller: &WalletId) -> Result<()> {
        self.authority.require_role(caller, Role::Pauser)?;
        if !self.config.paused {
            self.config.paused = true;
            self.event_log.emit(ProtocolEvent::Paused);
            tracing::info!("protocol paused by {}", caller);
        }
        Ok(())
    }

    /// Unpause the protocol
    pub fn unpause(&mut self, caller: &WalletId) -> Result<()> {
        self.authority.require_role(caller, Role::Pauser)?;
        if self.config.paused {
            self.config.paused = false;
            self.event_log.emit(ProtocolEvent::Unpaused);
            tracing::info!("protocol unpaused by {}", caller);
        }
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<()> {
        if self.config.paused {
            return Err(Error::ProtocolPaused);
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EVENT LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Register a Simple claim event
    pub fn create_simple_event(
        &mut self,
        caller: &WalletId,
        asset: AssetRef,
        token_type: TokenTypeId,
    ) -> Result<EventId> {
        self.authority.require_role(caller, Role::Manager)?;
        self.ensure_not_paused()?;

        let id = self.registry.create_simple(asset.clone(), token_type.clone());
        self.event_log
            .emit(ProtocolEvent::SimpleEventCreated(SimpleEventCreated {
                id,
                asset,
                token_type,
            }));
        tracing::info!("simple event {} created", id);
        Ok(id)
    }

    /// Register a Random claim event over a pool of token types
    pub fn create_random_event(
        &mut self,
        caller: &WalletId,
        asset: AssetRef,
        token_types: Vec<TokenTypeId>,
    ) -> Result<EventId> {
        self.authority.require_role(caller, Role::Manager)?;
        self.ensure_not_paused()?;

        let id = self
            .registry
            .create_random(asset.clone(), token_types.clone())?;
        self.event_log
            .emit(ProtocolEvent::RandomEventCreated(RandomEventCreated {
                id,
                asset,
                token_types,
            }));
        tracing::info!("random event {} created", id);
        Ok(id)
    }

    /// Disable an active event
    pub fn disable_event(&mut self, caller: &WalletId, kind: EventKind, id: EventId) -> Result<()> {
        self.authority.require_role(caller, Role::Manager)?;
        self.ensure_not_paused()?;

        self.registry.disable(kind, id)?;
        self.event_log
            .emit(ProtocolEvent::EventDisabled(EventDisabled { kind, id }));
        tracing::info!("{} event {} disabled", kind, id);
        Ok(())
    }

    /// Snapshot of the active event ids for a kind
    pub fn list_active_events(&self, kind: EventKind) -> Vec<EventId> {
        self.registry.list_active(kind)
    }

    /// Look up an event record
    pub fn event(&self, kind: EventKind, id: EventId) -> Option<ClaimEvent> {
        self.registry.get(kind, id)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ENTITLEMENTS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Set one wallet's entitlement under an active event
    pub fn set_entitlement(
        &mut self,
        caller: &WalletId,
        kind: EventKind,
        id: EventId,
        wallet: WalletId,
        amount: u64,
    ) -> Result<()> {
        self.authority.require_role(caller, Role::Manager)?;
        self.ensure_not_paused()?;
        self.ensure_active(kind, id)?;

        self.ledger.set(kind, id, wallet.clone(), amount)?;
        self.event_log
            .emit(ProtocolEvent::EntitlementSet(EntitlementSet {
                kind,
                id,
                wallet,
                amount,
            }));
        Ok(())
    }

    /// Set entitlements for several wallets under an active event.
    ///
    /// The whole batch is validated before any entry lands; a failing batch
    /// leaves the ledger untouched.
    pub fn set_entitlement_batch(
        &mut self,
        caller: &WalletId,
        kind: EventKind,
        id: EventId,
        wallets: &[WalletId],
        amounts: &[u64],
    ) -> Result<()> {
        self.authority.require_role(caller, Role::Manager)?;
        self.ensure_not_paused()?;
        self.ensure_active(kind, id)?;

        if wallets.len() > self.config.max_batch_size {
            return Err(Error::InvalidParameter {
                name: "batch".into(),
                reason: format!(
                    "{} entries exceed the limit of {}",
                    wallets.len(),
                    self.config.max_batch_size
                ),
            });
        }

        self.ledger.set_batch(kind, id, wallets, amounts)?;
        self.event_log
            .emit(ProtocolEvent::EntitlementBatchSet(EntitlementBatchSet {
                kind,
                id,
                count: wallets.len(),
                total: amounts.iter().sum(),
            }));
        Ok(())
    }

    /// Remaining entitlement for a wallet under an event (0 means none)
    pub fn entitlement(&self, kind: EventKind, id: EventId, wallet: &WalletId) -> u64 {
        self.ledger.get(kind, id, wallet)
    }

    fn ensure_active(&self, kind: EventKind, id: EventId) -> Result<()> {
        if !self.registry.is_active(kind, id) {
            return Err(Error::EventNotActive { kind, id });
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CLAIMS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Claim whatever the caller is still entitled to under an event.
    ///
    /// Returns the amount actually transferred, which is capped by what
    /// custody has on hand. The ledger decrement always commits before the
    /// custody transfer is invoked, so a re-entrant transfer path can never
    /// spend the same entitlement twice.
    pub fn claim(&mut self, caller: &WalletId, kind: EventKind, id: EventId) -> Result<u64> {
        self.ensure_not_paused()?;

        let event = self
            .registry
            .get(kind, id)
            .filter(ClaimEvent::is_active)
            .ok_or(Error::EventNotActive { kind, id })?;

        let entitlement = self.ledger.get(kind, id, caller);
        if entitlement == 0 {
            return Err(Error::NothingToClaim {
                kind,
                id,
                wallet: caller.to_string(),
            });
        }

        match event {
            ClaimEvent::Simple(ev) => {
                let available =
                    self.custody
                        .balance_of(&ev.asset, &self.config.custody_wallet, &ev.token_type);
                if available == 0 {
                    return Err(Error::CustodyEmpty {
                        token_type: ev.token_type.to_string(),
                    });
                }

                let claimable = entitlement.min(available);

                // Ledger write strictly precedes the external transfer
                self.ledger.consume(kind, id, caller, claimable)?;
                self.custody.transfer(
                    &ev.asset,
                    &self.config.custody_wallet,
                    caller,
                    &ev.token_type,
                    claimable,
                    &self.config.transfer_memo,
                )?;

                self.event_log
                    .emit(ProtocolEvent::SimpleClaimed(SimpleClaimed {
                        id,
                        wallet: caller.clone(),
                        token_type: ev.token_type,
                        amount: claimable,
                    }));
                tracing::info!("simple event {} paid {} to {}", id, claimable, caller);
                Ok(claimable)
            }
            ClaimEvent::Random(ev) => {
                let balances: Vec<u64> = ev
                    .token_types
                    .iter()
                    .map(|t| {
                        self.custody
                            .balance_of(&ev.asset, &self.config.custody_wallet, t)
                    })
                    .collect();

                let allocation = distribution::distribute(&balances, entitlement);
                let claimed: u64 = allocation.iter().sum();
                if claimed > entitlement {
                    tracing::warn!(
                        "distribution for event {} allocated {} against entitlement {}",
                        id,
                        claimed,
                        entitlement
                    );
                    return Err(Error::InvariantViolation(format!(
                        "distribution allocated {} over entitlement {}",
                        claimed, entitlement
                    )));
                }

                // Ledger write strictly precedes the external transfer
                self.ledger.consume(kind, id, caller, claimed)?;
                self.custody.batch_transfer(
                    &ev.asset,
                    &self.config.custody_wallet,
                    caller,
                    &ev.token_types,
                    &allocation,
                    &self.config.transfer_memo,
                )?;

                self.event_log
                    .emit(ProtocolEvent::RandomClaimed(RandomClaimed {
                        id,
                        wallet: caller.clone(),
                        amount: claimed,
                        allocation,
                    }));
                tracing::info!("random event {} paid {} to {}", id, claimed, caller);
                Ok(claimed)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DEPOSIT WHITELIST
    // ═══════════════════════════════════════════════════════════════════════════

    /// Permit a sender to deposit into custody
    pub fn allow_depositor(&mut self, caller: &WalletId, wallet: WalletId) -> Result<()> {
        self.authority.require_role(caller, Role::Administrator)?;
        self.gate.allow(wallet.clone());
        self.event_log
            .emit(ProtocolEvent::DepositorAllowed(DepositorAllowed { wallet }));
        Ok(())
    }

    /// Remove a sender's permission to deposit
    pub fn revoke_depositor(&mut self, caller: &WalletId, wallet: &WalletId) -> Result<()> {
        self.authority.require_role(caller, Role::Administrator)?;
        self.gate.revoke(wallet);
        self.event_log
            .emit(ProtocolEvent::DepositorRevoked(DepositorRevoked {
                wallet: wallet.clone(),
            }));
        Ok(())
    }

    /// Whether a sender is currently permitted to deposit
    pub fn is_whitelisted(&self, wallet: &WalletId) -> bool {
        self.gate.is_whitelisted(wallet)
    }

    /// The deposit gate, for custody implementations that enforce it
    pub fn deposit_gate(&self) -> &DepositGate {
        &self.gate
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Protocol configuration
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// The custody collaborator
    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Mutable access to the custody collaborator (funding in tests/bootstrap)
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    /// Events emitted so far
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Take all emitted events, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<ProtocolEvent> {
        self.event_log.drain()
    }

    /// Aggregate statistics over registry and ledger
    pub fn statistics(&self) -> ProtocolStatistics {
        ProtocolStatistics {
            simple_events: self.registry.total_count(EventKind::Simple) as u64,
            active_simple_events: self.registry.active_count(EventKind::Simple) as u64,
            random_events: self.registry.total_count(EventKind::Random) as u64,
            active_random_events: self.registry.active_count(EventKind::Random) as u64,
            entitlement_entries: self.ledger.entry_count() as u64,
            whitelisted_depositors: self.gate.len() as u64,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════

/// Aggregate protocol statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolStatistics {
    /// Simple events ever registered
    pub simple_events: u64,
    /// Simple events currently active
    pub active_simple_events: u64,
    /// Random events ever registered
    pub random_events: u64,
    /// Random events currently active
    pub active_random_events: u64,
    /// Non-zero entitlement entries
    pub entitlement_entries: u64,
    /// Wallets on the deposit whitelist
    pub whitelisted_depositors: u64,
}
