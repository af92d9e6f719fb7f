//! Custody collaborator interfaces.
//!
//! The protocol never holds tokens itself: balances live with an external
//! multitoken asset, consumed through the [`CustodyAsset`] trait. Incoming
//! deposits pass through the [`DepositGate`] whitelist. [`InMemoryCustody`]
//! is the reference implementation used in tests and single-process
//! deployments.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::types::{AssetRef, TokenTypeId, WalletId};
use crate::error::{Error, Result};

pub mod memory;

pub use memory::InMemoryCustody;

// ═══════════════════════════════════════════════════════════════════════════════
// CUSTODY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Balance lookup and transfer execution for a fungible multitoken asset.
///
/// Transfers may fail (insufficient balance, receiver rejects); any such
/// failure aborts the whole claim unit of work.
pub trait CustodyAsset {
    /// Units of `token_type` the holder currently has on hand
    fn balance_of(&self, asset: &AssetRef, holder: &WalletId, token_type: &TokenTypeId) -> u64;

    /// Transfer units of one token type between wallets
    fn transfer(
        &mut self,
        asset: &AssetRef,
        from: &WalletId,
        to: &WalletId,
        token_type: &TokenTypeId,
        amount: u64,
        memo: &str,
    ) -> Result<()>;

    /// Transfer several token types between the same two wallets at once.
    ///
    /// All-or-nothing: either every row lands or none does.
    fn batch_transfer(
        &mut self,
        asset: &AssetRef,
        from: &WalletId,
        to: &WalletId,
        token_types: &[TokenTypeId],
        amounts: &[u64],
        memo: &str,
    ) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEPOSIT GATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Whitelist of wallets permitted to deposit into custody.
///
/// Mutations are administrator-only; the coordinator enforces the role
/// before touching the gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositGate {
    whitelist: HashSet<WalletId>,
}

impl DepositGate {
    /// Create an empty gate (all deposits rejected)
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit a sender to deposit
    pub fn allow(&mut self, sender: WalletId) {
        self.whitelist.insert(sender);
    }

    /// Remove a sender's permission; returns whether it was present
    pub fn revoke(&mut self, sender: &WalletId) -> bool {
        self.whitelist.remove(sender)
    }

    /// Whether a sender is currently permitted to deposit
    pub fn is_whitelisted(&self, sender: &WalletId) -> bool {
        self.whitelist.contains(sender)
    }

    /// Require that a sender is permitted to deposit
    pub fn check(&self, sender: &WalletId) -> Result<()> {
        if self.is_whitelisted(sender) {
            Ok(())
        } else {
            Err(Error::DepositorNotWhitelisted(sender.to_string()))
        }
    }

    /// Number of whitelisted senders
    pub fn len(&self) -> usize {
        self.whitelist.len()
    }

    /// Whether the whitelist is empty
    pub fn is_empty(&self) -> bool {
        self.whitelist.is_empty()
    }
}
