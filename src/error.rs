//! Error types for the claimdrop protocol.
//!
//! This module defines all error types used throughout the protocol,
//! providing clear and actionable error messages. Every failure is a
//! whole-unit-of-work abort: no partial state survives an error.

use thiserror::Error;

use crate::core::types::{EventId, EventKind};

/// Result type alias for claimdrop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the claimdrop protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════════
    // Registry Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Event id is not present in the active index (unknown or already disabled)
    #[error("{kind} event {id} not found in the active index")]
    EventNotFound {
        /// Event kind
        kind: EventKind,
        /// Event identifier
        id: EventId,
    },

    /// Random event created with an empty token-type pool
    #[error("random event requires at least one token type")]
    EmptyTokenPool,

    // ═══════════════════════════════════════════════════════════════════
    // Entitlement Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Entitlement amount is zero
    #[error("entitlement amount cannot be zero")]
    ZeroAmount,

    /// Batch entitlement call carried no entries
    #[error("entitlement batch cannot be empty")]
    EmptyBatch,

    /// Batch wallet and amount sequences differ in length
    #[error("batch length mismatch: {expected} wallets, {got} amounts")]
    BatchLengthMismatch {
        /// Number of wallets provided
        expected: usize,
        /// Number of amounts provided
        got: usize,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Claim Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Event is unknown or disabled
    #[error("{kind} event {id} is not active")]
    EventNotActive {
        /// Event kind
        kind: EventKind,
        /// Event identifier
        id: EventId,
    },

    /// Wallet has no remaining entitlement for this event
    #[error("wallet {wallet} has nothing to claim from {kind} event {id}")]
    NothingToClaim {
        /// Event kind
        kind: EventKind,
        /// Event identifier
        id: EventId,
        /// Claiming wallet
        wallet: String,
    },

    /// Simple claim found zero custody balance; caller may retry once funded
    #[error("custody holds no units of token type {token_type}")]
    CustodyEmpty {
        /// Token type that was queried
        token_type: String,
    },

    /// Malformed event kind tag; integration error, never expected from a correct caller
    #[error("invalid claim type: {0}")]
    InvalidClaimType(String),

    // ═══════════════════════════════════════════════════════════════════
    // Authorization Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Caller lacks the required role
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Incoming transfer rejected: sender is not on the deposit whitelist
    #[error("depositor {0} is not whitelisted")]
    DepositorNotWhitelisted(String),

    // ═══════════════════════════════════════════════════════════════════
    // Custody Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Custody transfer would overdraw the holder's balance
    #[error("insufficient custody balance of {token_type}: required {required}, available {available}")]
    InsufficientCustodyBalance {
        /// Token type being transferred
        token_type: String,
        /// Amount the transfer requires
        required: u64,
        /// Amount actually on hand
        available: u64,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Protocol Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Protocol is paused
    #[error("protocol is paused")]
    ProtocolPaused,

    /// Invalid input parameter
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invariant violation detected (fatal defect, never a user error)
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    // ═══════════════════════════════════════════════════════════════════
    // Serialization Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("deserialization error: {0}")]
    Deserialization(String),

    // ═══════════════════════════════════════════════════════════════════
    // Internal Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Arithmetic overflow
    #[error("arithmetic overflow in {operation}")]
    Overflow {
        /// Operation that overflowed
        operation: String,
    },
}

impl Error {
    /// Returns true if this error is recoverable by retrying later
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CustodyEmpty { .. } | Error::InsufficientCustodyBalance { .. }
        )
    }

    /// Returns true if this is a critical error requiring immediate attention
    pub fn is_critical(&self) -> bool {
        matches!(self, Error::InvariantViolation(_) | Error::Overflow { .. })
    }

    /// Returns the error code for external systems
    pub fn code(&self) -> u32 {
        match self {
            // Registry errors: 1xxx
            Error::EventNotFound { .. } => 1001,
            Error::EmptyTokenPool => 1002,

            // Entitlement errors: 2xxx
            Error::ZeroAmount => 2001,
            Error::EmptyBatch => 2002,
            Error::BatchLengthMismatch { .. } => 2003,

            // Claim errors: 3xxx
            Error::EventNotActive { .. } => 3001,
            Error::NothingToClaim { .. } => 3002,
            Error::CustodyEmpty { .. } => 3003,
            Error::InvalidClaimType(_) => 3004,

            // Authorization errors: 4xxx
            Error::Unauthorized(_) => 4001,
            Error::DepositorNotWhitelisted(_) => 4002,

            // Custody errors: 5xxx
            Error::InsufficientCustodyBalance { .. } => 5001,

            // Protocol errors: 6xxx
            Error::ProtocolPaused => 6001,
            Error::InvalidParameter { .. } => 6002,
            Error::InvariantViolation(_) => 6003,

            // Serialization errors: 7xxx
            Error::Serialization(_) => 7001,
            Error::Deserialization(_) => 7002,

            // Internal errors: 9xxx
            Error::Overflow { .. } => 9001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_unique() {
        // Ensure all error codes are unique
        let codes = vec![
            Error::EventNotFound {
                kind: EventKind::Simple,
                id: EventId::new(0),
            }
            .code(),
            Error::EmptyTokenPool.code(),
            Error::ZeroAmount.code(),
            Error::EmptyBatch.code(),
            Error::BatchLengthMismatch { expected: 1, got: 2 }.code(),
            Error::EventNotActive {
                kind: EventKind::Random,
                id: EventId::new(0),
            }
            .code(),
            Error::NothingToClaim {
                kind: EventKind::Simple,
                id: EventId::new(0),
                wallet: "".into(),
            }
            .code(),
            Error::CustodyEmpty { token_type: "".into() }.code(),
            Error::InvalidClaimType("".into()).code(),
            Error::Unauthorized("".into()).code(),
            Error::DepositorNotWhitelisted("".into()).code(),
            Error::InsufficientCustodyBalance {
                token_type: "".into(),
                required: 0,
                available: 0,
            }
            .code(),
            Error::ProtocolPaused.code(),
            Error::InvalidParameter {
                name: "".into(),
                reason: "".into(),
            }
            .code(),
            Error::InvariantViolation("".into()).code(),
            Error::Serialization("".into()).code(),
            Error::Deserialization("".into()).code(),
            Error::Overflow { operation: "".into() }.code(),
        ];

        let mut unique_codes = codes.clone();
        unique_codes.sort();
        unique_codes.dedup();

        assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");
    }

    #[test]
    fn test_error_display() {
        let err = Error::InsufficientCustodyBalance {
            token_type: "10000001".into(),
            required: 1000,
            available: 500,
        };
        assert!(err.to_string().contains("1000"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::CustodyEmpty { token_type: "t".into() }.is_recoverable());
        assert!(!Error::ZeroAmount.is_recoverable());
    }

    #[test]
    fn test_is_critical() {
        assert!(Error::InvariantViolation("test".into()).is_critical());
        assert!(Error::Overflow { operation: "test".into() }.is_critical());
        assert!(!Error::ProtocolPaused.is_critical());
    }
}
