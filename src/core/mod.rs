//! Core protocol state: identifier types, configuration, the event
//! registry, and the entitlement ledger.

pub mod config;
pub mod entitlement;
pub mod event;
pub mod types;
