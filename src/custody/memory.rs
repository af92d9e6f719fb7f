//! In-memory custody implementation (for testing and single-process use).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{AssetRef, TokenTypeId, WalletId};
use crate::custody::{CustodyAsset, DepositGate};
use crate::error::{Error, Result};

/// Balance key: one wallet's holding of one token type of one asset
type BalanceKey = (AssetRef, WalletId, TokenTypeId);

// ═══════════════════════════════════════════════════════════════════════════════
// IN-MEMORY CUSTODY
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory multitoken balances with all-or-nothing transfers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCustody {
    balances: HashMap<BalanceKey, u64>,
}

impl InMemoryCustody {
    /// Create an empty custody store
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint units directly into a wallet (test and bootstrap helper)
    pub fn fund(
        &mut self,
        asset: &AssetRef,
        holder: &WalletId,
        token_type: &TokenTypeId,
        amount: u64,
    ) {
        *self
            .balances
            .entry((asset.clone(), holder.clone(), token_type.clone()))
            .or_insert(0) += amount;
    }

    /// Accept an incoming transfer into custody, subject to the deposit gate.
    ///
    /// A sender that is not whitelisted aborts the transfer before any
    /// balance moves.
    pub fn deposit(
        &mut self,
        gate: &DepositGate,
        asset: &AssetRef,
        sender: &WalletId,
        custody_wallet: &WalletId,
        token_type: &TokenTypeId,
        amount: u64,
    ) -> Result<()> {
        gate.check(sender)?;
        self.debit(asset, sender, token_type, amount)?;
        self.credit(asset, custody_wallet, token_type, amount)?;
        Ok(())
    }

    fn debit(
        &mut self,
        asset: &AssetRef,
        holder: &WalletId,
        token_type: &TokenTypeId,
        amount: u64,
    ) -> Result<()> {
        let key = (asset.clone(), holder.clone(), token_type.clone());
        let balance = self.balances.get(&key).copied().unwrap_or(0);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(Error::InsufficientCustodyBalance {
                token_type: token_type.to_string(),
                required: amount,
                available: balance,
            })?;

        if remaining == 0 {
            self.balances.remove(&key);
        } else {
            self.balances.insert(key, remaining);
        }
        Ok(())
    }

    fn credit(
        &mut self,
        asset: &AssetRef,
        holder: &WalletId,
        token_type: &TokenTypeId,
        amount: u64,
    ) -> Result<()> {
        let key = (asset.clone(), holder.clone(), token_type.clone());
        let balance = self.balances.get(&key).copied().unwrap_or(0);
        let updated = balance.checked_add(amount).ok_or_else(|| Error::Overflow {
            operation: format!("credit {} of {}", amount, token_type),
        })?;
        self.balances.insert(key, updated);
        Ok(())
    }
}

impl CustodyAsset for InMemoryCustody {
    fn balance_of(&self, asset: &AssetRef, holder: &WalletId, token_type: &TokenTypeId) -> u64 {
        self.balances
            .get(&(asset.clone(), holder.clone(), token_type.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: &AssetRef,
        from: &WalletId,
        to: &WalletId,
        token_type: &TokenTypeId,
        amount: u64,
        _memo: &str,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        self.debit(asset, from, token_type, amount)?;
        self.credit(asset, to, token_type, amount)?;
        Ok(())
    }

    fn batch_transfer(
        &mut self,
        asset: &AssetRef,
        from: &WalletId,
        to: &WalletId,
        token_types: &[TokenTypeId],
        amounts: &[u64],
        memo: &str,
    ) -> Result<()> {
        if token_types.len() != amounts.len() {
            return Err(Error::BatchLengthMismatch {
                expected: token_types.len(),
                got: amounts.len(),
            });
        }

        // Validate every debit against a scratch view first so a failing
        // row cannot leave the batch half-applied. Repeated token types
        // must be checked cumulatively.
        let mut required: HashMap<&TokenTypeId, u64> = HashMap::new();
        for (token_type, amount) in token_types.iter().zip(amounts) {
            *required.entry(token_type).or_insert(0) += amount;
        }
        for (token_type, total) in &required {
            let available = self.balance_of(asset, from, token_type);
            if *total > available {
                return Err(Error::InsufficientCustodyBalance {
                    token_type: token_type.to_string(),
                    required: *total,
                    available,
                });
            }
        }

        for (token_type, amount) in token_types.iter().zip(amounts) {
            self.transfer(asset, from, to, token_type, *amount, memo)?;
        }
        Ok(())
    }
}
