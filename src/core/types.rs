//! Core identifier types for the claimdrop protocol.
//!
//! Strongly-typed newtypes prevent mixing wallets, token types, asset
//! references, and event ids in call sites that take several of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Opaque claim event identifier.
///
/// Ids are unique per (kind, registry): each kind keeps its own monotonic
/// counter starting at 0, and ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(u64);

impl EventId {
    /// Create an event id from its raw counter value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT KIND
// ═══════════════════════════════════════════════════════════════════════════════

/// The two claim event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// One token type; entitlement capped by on-hand balance
    Simple,
    /// A pool of token types; entitlement satisfied by a pseudo-random
    /// allocation across the pool
    Random,
}

impl EventKind {
    /// Get the kind as a lowercase string tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Simple => "simple",
            EventKind::Random => "random",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    /// Parse a kind tag from its wire form.
    ///
    /// A tag that is neither `simple` nor `random` is an integration error
    /// surfaced as [`Error::InvalidClaimType`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(EventKind::Simple),
            "random" => Ok(EventKind::Random),
            other => Err(Error::InvalidClaimType(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WALLET ID
// ═══════════════════════════════════════════════════════════════════════════════

/// A wallet address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WalletId(String);

impl WalletId {
    /// Create a wallet id
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletId {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TOKEN TYPE ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of one fungible token type within a multitoken asset.
///
/// Deliberately permissive: event creation performs no validation on token
/// types, since custody may be empty or the type may be minted later.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenTypeId(String);

impl TokenTypeId {
    /// Create a token type id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ASSET REF
// ═══════════════════════════════════════════════════════════════════════════════

/// Reference to the underlying multitoken asset a claim event draws from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetRef(String);

impl AssetRef {
    /// Create an asset reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_display() {
        assert_eq!(EventId::new(7).to_string(), "#7");
        assert_eq!(EventId::new(7).value(), 7);
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!("simple".parse::<EventKind>().unwrap(), EventKind::Simple);
        assert_eq!("Random".parse::<EventKind>().unwrap(), EventKind::Random);
    }

    #[test]
    fn test_kind_invalid_tag() {
        let err = "gacha".parse::<EventKind>().unwrap_err();
        assert_eq!(err, Error::InvalidClaimType("gacha".into()));
    }

    #[test]
    fn test_wallet_id_from_str() {
        let wallet: WalletId = "link1xyz".into();
        assert_eq!(wallet.as_str(), "link1xyz");
    }
}
