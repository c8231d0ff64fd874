use tracing::info;

use amber_ledger::{Address, Amount, ZERO_ADDRESS};
use amber_rewards::MAX_REWARD_RATE_BPS;

use crate::engine::StakingEngine;
use crate::events::LedgerEvent;
use crate::types::StakingError;

/// Owner-gated administrative controls.
///
/// Authorization is an explicit capability check (caller identity against
/// the stored owner identity) performed before any parameter mutation.
impl StakingEngine {
    /// Update the annual reward rate. Capped at 2_000 bps (20%).
    pub fn set_reward_rate(
        &mut self,
        caller: Address,
        new_bps: u64,
    ) -> Result<(), StakingError> {
        self.ensure_owner(&caller)?;
        if new_bps > MAX_REWARD_RATE_BPS {
            return Err(StakingError::RateTooHigh {
                max_bps: MAX_REWARD_RATE_BPS,
                got_bps: new_bps,
            });
        }

        let old_bps = self.params.reward_rate_bps;
        self.params.reward_rate_bps = new_bps;
        info!(old_bps, new_bps, "reward rate updated");
        self.events.push(LedgerEvent::RewardRateUpdated { old_bps, new_bps });
        Ok(())
    }

    /// Update the minimum stake. Must be greater than zero.
    pub fn set_minimum_stake(
        &mut self,
        caller: Address,
        new_minimum: Amount,
    ) -> Result<(), StakingError> {
        self.ensure_owner(&caller)?;
        if new_minimum.is_zero() {
            return Err(StakingError::InvalidMinimum);
        }

        let old = self.params.minimum_stake;
        self.params.minimum_stake = new_minimum;
        info!(old = %old, new = %new_minimum, "minimum stake updated");
        self.events.push(LedgerEvent::MinimumStakeUpdated {
            old,
            new: new_minimum,
        });
        Ok(())
    }

    /// Halt stake/unstake/claim. Fails if already paused.
    pub fn pause(&mut self, caller: Address) -> Result<(), StakingError> {
        self.ensure_owner(&caller)?;
        if self.paused {
            return Err(StakingError::Paused);
        }
        self.paused = true;
        info!("staking paused");
        self.events.push(LedgerEvent::Paused);
        Ok(())
    }

    /// Resume stake/unstake/claim. Fails if not paused.
    pub fn unpause(&mut self, caller: Address) -> Result<(), StakingError> {
        self.ensure_owner(&caller)?;
        if !self.paused {
            return Err(StakingError::NotPaused);
        }
        self.paused = false;
        info!("staking unpaused");
        self.events.push(LedgerEvent::Unpaused);
        Ok(())
    }

    /// Move vault-held funds to `to` while paused. An operational safety
    /// valve over the ledger-held reserve, not part of any staker's
    /// accounting.
    pub fn emergency_withdraw(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), StakingError> {
        self.ensure_owner(&caller)?;
        if !self.paused {
            return Err(StakingError::NotPaused);
        }
        if to == ZERO_ADDRESS {
            return Err(StakingError::InvalidAddress);
        }
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }

        self.ledger.withdraw_vault(&to, amount)?;

        info!(to = %hex::encode(to), amount = %amount, "emergency withdrawal");
        self.events.push(LedgerEvent::EmergencyWithdrawal { to, amount });
        Ok(())
    }
}
