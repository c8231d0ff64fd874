use thiserror::Error;

use crate::amount::Amount;

/// A 32-byte account identifier.
pub type Address = [u8; 32];

/// The null address; never a valid transfer or withdrawal destination.
pub const ZERO_ADDRESS: Address = [0u8; 32];

/// Errors that can occur during ledger mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("insufficient staked balance: need {needed}, have {available}")]
    InsufficientStake { needed: Amount, available: Amount },

    #[error("arithmetic overflow")]
    Overflow,
}
