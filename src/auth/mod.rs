//! Role-based authorization.
//!
//! The protocol consumes authorization through the [`RoleAuthority`] trait;
//! how roles are granted is the embedder's concern. [`RoleTable`] is the
//! in-memory implementation used in tests and single-process deployments.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::types::WalletId;
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// ROLES
// ═══════════════════════════════════════════════════════════════════════════════

/// Capabilities recognized by the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May mutate the deposit whitelist
    Administrator,
    /// May pause and unpause the protocol
    Pauser,
    /// May create/disable events and set entitlements
    Manager,
}

impl Role {
    /// Get the role as a lowercase string tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Pauser => "pauser",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUTHORITY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Authorization collaborator injected into the protocol coordinator
pub trait RoleAuthority {
    /// Whether the caller holds the given role
    fn has_role(&self, caller: &WalletId, role: Role) -> bool;

    /// Require that the caller holds the given role
    fn require_role(&self, caller: &WalletId, role: Role) -> Result<()> {
        if self.has_role(caller, role) {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "{} lacks the {} role",
                caller, role
            )))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ROLE TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory role grants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleTable {
    grants: HashMap<WalletId, HashSet<Role>>,
}

impl RoleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a role to a wallet
    pub fn grant(&mut self, wallet: WalletId, role: Role) {
        self.grants.entry(wallet).or_default().insert(role);
    }

    /// Revoke a role from a wallet; returns whether it was held
    pub fn revoke(&mut self, wallet: &WalletId, role: Role) -> bool {
        match self.grants.get_mut(wallet) {
            Some(roles) => roles.remove(&role),
            None => false,
        }
    }

    /// Grant all roles to a wallet (single-operator deployments, tests)
    pub fn grant_all(&mut self, wallet: WalletId) {
        for role in [Role::Administrator, Role::Pauser, Role::Manager] {
            self.grant(wallet.clone(), role);
        }
    }
}

impl RoleAuthority for RoleTable {
    fn has_role(&self, caller: &WalletId, role: Role) -> bool {
        self.grants
            .get(caller)
            .map(|roles| roles.contains(&role))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_require() {
        let mut table = RoleTable::new();
        let alice = WalletId::new("alice");
        table.grant(alice.clone(), Role::Manager);

        assert!(table.require_role(&alice, Role::Manager).is_ok());
        let err = table.require_role(&alice, Role::Pauser).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_revoke() {
        let mut table = RoleTable::new();
        let alice = WalletId::new("alice");
        table.grant(alice.clone(), Role::Pauser);

        assert!(table.revoke(&alice, Role::Pauser));
        assert!(!table.revoke(&alice, Role::Pauser));
        assert!(!table.has_role(&alice, Role::Pauser));
    }

    #[test]
    fn test_unknown_wallet_has_no_roles() {
        let table = RoleTable::new();
        assert!(!table.has_role(&WalletId::new("nobody"), Role::Administrator));
    }
}
