use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::types::LedgerError;

/// Per-account record: liquid balance, staked balance, and the accrual clock.
///
/// Records are created lazily on first use and never deleted; a fully
/// drained account persists as an all-zero entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountRecord {
    /// Unstaked balance, available for transfers and new stakes.
    pub balance: Amount,
    /// Balance currently locked in staking.
    pub staked: Amount,
    /// Unix timestamp (seconds) of the last accrual reset. 0 = never staked.
    pub staked_since: u64,
}

impl AccountRecord {
    /// Create a new record holding the given liquid balance.
    pub fn new(balance: Amount) -> Self {
        Self {
            balance,
            staked: Amount::ZERO,
            staked_since: 0,
        }
    }

    /// Add `amount` to the liquid balance. Fails on overflow.
    pub fn credit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Subtract `amount` from the liquid balance. Fails if insufficient.
    pub fn debit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Move `amount` from the liquid balance into the staked balance.
    pub fn move_to_stake(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        let staked = self.staked.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        self.staked = staked;
        Ok(())
    }

    /// Move `amount` from the staked balance back into the liquid balance.
    pub fn move_from_stake(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if self.staked < amount {
            return Err(LedgerError::InsufficientStake {
                needed: amount,
                available: self.staked,
            });
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.staked = self
            .staked
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balance = balance;
        Ok(())
    }

    /// Set the accrual clock. 0 clears it (no active stake basis).
    pub fn reset_stake_clock(&mut self, timestamp: u64) {
        self.staked_since = timestamp;
    }
}
