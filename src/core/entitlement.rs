//! The entitlement ledger.
//!
//! Tracks, per event and wallet, the remaining amount that wallet may still
//! claim. The ledger exclusively owns the entitlement map; events are
//! referenced only by `(kind, id)`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{EventId, EventKind, WalletId};
use crate::error::{Error, Result};

/// Map key: one wallet's entitlement under one event
type EntitlementKey = (EventKind, EventId, WalletId);

// ═══════════════════════════════════════════════════════════════════════════════
// ENTITLEMENT LEDGER
// ═══════════════════════════════════════════════════════════════════════════════

/// Ledger of remaining claimable amounts per (event, wallet).
///
/// Entitlements are created or overwritten by an authority, decremented only
/// by successful claims, never negative, and never expire: an entitlement
/// may stay non-zero indefinitely if custody capacity never arrives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitlementLedger {
    entitlements: HashMap<EntitlementKey, u64>,
}

impl EntitlementLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one wallet's entitlement, overwriting any prior value.
    ///
    /// The caller must have already confirmed the event is active. A zero
    /// amount is rejected; revoking an entitlement is not a ledger
    /// operation.
    pub fn set(
        &mut self,
        kind: EventKind,
        event: EventId,
        wallet: WalletId,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }
        self.entitlements.insert((kind, event, wallet), amount);
        Ok(())
    }

    /// Set entitlements for several wallets in one call.
    ///
    /// The whole batch is validated before any entry is applied, so a
    /// failing batch leaves the ledger untouched.
    pub fn set_batch(
        &mut self,
        kind: EventKind,
        event: EventId,
        wallets: &[WalletId],
        amounts: &[u64],
    ) -> Result<()> {
        if wallets.len() != amounts.len() {
            return Err(Error::BatchLengthMismatch {
                expected: wallets.len(),
                got: amounts.len(),
            });
        }
        if wallets.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if amounts.contains(&0) {
            return Err(Error::ZeroAmount);
        }

        for (wallet, amount) in wallets.iter().zip(amounts) {
            self.entitlements
                .insert((kind, event, wallet.clone()), *amount);
        }
        Ok(())
    }

    /// Remaining entitlement for a wallet under an event (0 means none)
    pub fn get(&self, kind: EventKind, event: EventId, wallet: &WalletId) -> u64 {
        self.entitlements
            .get(&(kind, event, wallet.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Decrement a wallet's entitlement by the amount actually allocated.
    ///
    /// The caller guarantees `amount` does not exceed the current value;
    /// exceeding it is a programming error surfaced as the critical
    /// [`Error::InvariantViolation`], never a silent wraparound.
    pub fn consume(
        &mut self,
        kind: EventKind,
        event: EventId,
        wallet: &WalletId,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let key = (kind, event, wallet.clone());
        let current = self.entitlements.get(&key).copied().unwrap_or(0);
        let remaining = current.checked_sub(amount).ok_or_else(|| {
            Error::InvariantViolation(format!(
                "consuming {} from entitlement of {} for wallet {} under {} event {}",
                amount, current, wallet, kind, event
            ))
        })?;

        if remaining == 0 {
            self.entitlements.remove(&key);
        } else {
            self.entitlements.insert(key, remaining);
        }
        Ok(())
    }

    /// Number of non-zero entitlement entries in the ledger
    pub fn entry_count(&self) -> usize {
        self.entitlements.len()
    }
}
