//! # claimdrop
//!
//! Custody-backed claim events with randomized distribution of fungible
//! multitoken units.
//!
//! A controlling authority registers claim events that entitle specific
//! wallets to withdraw a bounded quantity of multitoken units held in
//! custody; entitled parties redeem their allowance exactly once per unit.
//!
//! ## Architecture
//!
//! - **Core**: identifier types, configuration, the event registry, and the
//!   entitlement ledger
//! - **Distribution**: the pure multi-pool allocation engine behind Random
//!   claims
//! - **Custody**: the external-asset interface, deposit whitelist, and an
//!   in-memory reference implementation
//! - **Auth**: role-based authorization consumed through a trait
//! - **Protocol**: the coordinator tying it all together, plus structured
//!   events for every state change
//!
//! ## Example
//!
//! ```rust,ignore
//! use claimdrop::prelude::*;
//!
//! let mut protocol = ClaimProtocol::new(custody, roles, ProtocolConfig::default())?;
//!
//! let id = protocol.create_simple_event(&manager, asset, token_type)?;
//! protocol.set_entitlement(&manager, EventKind::Simple, id, wallet.clone(), 50)?;
//!
//! // The wallet claims whatever custody can cover, at most once per unit
//! let claimed = protocol.claim(&wallet, EventKind::Simple, id)?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod auth;
pub mod core;
pub mod custody;
pub mod distribution;
pub mod error;
pub mod protocol;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auth::{Role, RoleAuthority, RoleTable};
    pub use crate::core::{
        config::ProtocolConfig,
        entitlement::EntitlementLedger,
        event::{ClaimEvent, EventRegistry, RandomEvent, SimpleEvent},
        types::{AssetRef, EventId, EventKind, TokenTypeId, WalletId},
    };
    pub use crate::custody::{CustodyAsset, DepositGate, InMemoryCustody};
    pub use crate::distribution::{distribute, distribute_with};
    pub use crate::error::{Error, Result};
    pub use crate::protocol::{ClaimProtocol, EventLog, ProtocolEvent};
}

/// Protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol name
pub const PROTOCOL_NAME: &str = "claimdrop";
