use serde::{Deserialize, Serialize};
use thiserror::Error;

use amber_ledger::{Amount, LedgerError};
use amber_rewards::RewardError;

/// Errors that can occur during staking operations.
///
/// Every variant is a precondition violation scoped to one rejected
/// operation; the engine never applies a partial mutation before failing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("stake below the minimum: minimum {minimum}, got {got}")]
    BelowMinimumStake { minimum: Amount, got: Amount },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("insufficient staked balance: need {needed}, have {available}")]
    InsufficientStake { needed: Amount, available: Amount },

    #[error("no active stake for this account")]
    NoStakeFound,

    #[error("staking operations are paused")]
    Paused,

    #[error("operation requires the ledger to be paused")]
    NotPaused,

    #[error("reward rate too high: maximum {max_bps} bps, got {got_bps} bps")]
    RateTooHigh { max_bps: u64, got_bps: u64 },

    #[error("minimum stake must be greater than zero")]
    InvalidMinimum,

    #[error("caller is not the ledger owner")]
    Unauthorized,

    #[error("destination is the zero address")]
    InvalidAddress,

    #[error("arithmetic overflow")]
    Overflow,
}

impl From<LedgerError> for StakingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { needed, available } => {
                StakingError::InsufficientBalance { needed, available }
            }
            LedgerError::InsufficientStake { needed, available } => {
                StakingError::InsufficientStake { needed, available }
            }
            LedgerError::Overflow => StakingError::Overflow,
        }
    }
}

impl From<RewardError> for StakingError {
    fn from(err: RewardError) -> Self {
        match err {
            RewardError::Overflow => StakingError::Overflow,
        }
    }
}

/// Per-account staking view: current stake, unsettled reward, and the
/// accrual clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInfo {
    pub staked: Amount,
    pub pending_reward: Amount,
    pub staked_since: u64,
}

/// Ledger-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_supply: Amount,
    pub total_staked: Amount,
    pub reward_rate_bps: u64,
    pub minimum_stake: Amount,
}
