//! Protocol configuration.
//!
//! Configuration is constructed once at startup and handed to the protocol
//! coordinator; nothing here is ambient or global.

use serde::{Deserialize, Serialize};

use crate::core::types::WalletId;

/// Default memo attached to custody transfers
pub const DEFAULT_TRANSFER_MEMO: &str = "claimdrop distribution";

/// Default upper bound on batch entitlement entries per call
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

// ═══════════════════════════════════════════════════════════════════════════════
// PROTOCOL CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Configuration for a claimdrop protocol instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Wallet holding the custodied units claims are paid from
    pub custody_wallet: WalletId,

    /// Memo attached to outgoing custody transfers
    pub transfer_memo: String,

    /// Maximum number of entries accepted in one batch entitlement call
    pub max_batch_size: usize,

    /// Whether the protocol is paused (mutations and claims rejected)
    pub paused: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            custody_wallet: WalletId::new("custody"),
            transfer_memo: DEFAULT_TRANSFER_MEMO.to_string(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            paused: false,
        }
    }
}

impl ProtocolConfig {
    /// Create a configuration with the given custody wallet
    pub fn new(custody_wallet: WalletId) -> Self {
        Self {
            custody_wallet,
            ..Self::default()
        }
    }

    /// Override the transfer memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.transfer_memo = memo.into();
        self
    }

    /// Override the batch size limit (for testing)
    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max;
        self
    }

    /// Validate that the configuration is consistent
    pub fn validate(&self) -> bool {
        !self.custody_wallet.as_str().is_empty() && self.max_batch_size > 0
    }
}
