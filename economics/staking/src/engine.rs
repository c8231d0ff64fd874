use serde::{Deserialize, Serialize};
use tracing::debug;

use amber_ledger::{Address, Amount, Ledger, ZERO_ADDRESS};
use amber_rewards::accrued_reward;

use crate::events::LedgerEvent;
use crate::params::StakingParams;
use crate::types::{LedgerStats, StakingError, StakingInfo};

/// The staking state machine.
///
/// Owns the account ledger and the global parameters, and orchestrates
/// stake, unstake, claim, and transfer as atomic operations: every
/// precondition is validated (and every fallible computation performed)
/// before the first state mutation, so a rejected operation is a no-op.
///
/// Callers supply `now` in seconds from a monotonic wall clock; the engine
/// holds no clock of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingEngine {
    pub(crate) ledger: Ledger,
    pub(crate) params: StakingParams,
    pub(crate) owner: Address,
    pub(crate) paused: bool,
    pub(crate) total_staked: Amount,
    pub(crate) events: Vec<LedgerEvent>,
}

impl StakingEngine {
    /// Create an engine with an empty ledger and default parameters.
    pub fn new(owner: Address) -> Self {
        Self::with_ledger(owner, StakingParams::default(), Ledger::new())
    }

    /// Create an engine over a pre-seeded ledger (genesis initialization).
    pub fn with_ledger(owner: Address, params: StakingParams, ledger: Ledger) -> Self {
        let total_staked = ledger.staked_total();
        Self {
            ledger,
            params,
            owner,
            paused: false,
            total_staked,
            events: Vec::new(),
        }
    }

    /// Lock `amount` of the account's liquid balance into staking.
    ///
    /// If the account already has an active stake, its pending reward is
    /// settled to the liquid balance first and the accrual clock restarts,
    /// so the new stake folds into a fresh basis without losing anything.
    pub fn stake(
        &mut self,
        account: Address,
        amount: Amount,
        now: u64,
    ) -> Result<(), StakingError> {
        self.ensure_not_paused()?;
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }
        if amount < self.params.minimum_stake {
            return Err(StakingError::BelowMinimumStake {
                minimum: self.params.minimum_stake,
                got: amount,
            });
        }

        let record = self.ledger.account(&account).cloned().unwrap_or_default();
        if record.balance < amount {
            return Err(StakingError::InsufficientBalance {
                needed: amount,
                available: record.balance,
            });
        }

        let settled = accrued_reward(
            record.staked,
            record.staked_since,
            now,
            self.params.reward_rate_bps,
        )?;
        let new_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        if !settled.is_zero() {
            self.ledger.mint_to(&account, settled)?;
        }
        let entry = self.ledger.get_or_create_account(&account);
        entry.move_to_stake(amount)?;
        entry.reset_stake_clock(now);
        self.total_staked = new_total;

        debug!(
            account = %hex::encode(account),
            amount = %amount,
            settled = %settled,
            "stake"
        );
        self.events.push(LedgerEvent::Staked {
            account,
            amount,
            timestamp: now,
        });
        Ok(())
    }

    /// Release `amount` of the account's staked balance, settling the
    /// pending reward up to `now` first. Returns the settled reward.
    ///
    /// If a remainder stays staked the accrual clock restarts on it;
    /// otherwise the clock clears to 0.
    pub fn unstake(
        &mut self,
        account: Address,
        amount: Amount,
        now: u64,
    ) -> Result<Amount, StakingError> {
        self.ensure_not_paused()?;
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }

        let record = self.ledger.account(&account).cloned().unwrap_or_default();
        if record.staked < amount {
            return Err(StakingError::InsufficientStake {
                needed: amount,
                available: record.staked,
            });
        }

        let reward = accrued_reward(
            record.staked,
            record.staked_since,
            now,
            self.params.reward_rate_bps,
        )?;
        let new_total = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::Overflow)?;

        if !reward.is_zero() {
            self.ledger.mint_to(&account, reward)?;
        }
        let entry = self.ledger.get_or_create_account(&account);
        entry.move_from_stake(amount)?;
        let clock = if entry.staked.is_zero() { 0 } else { now };
        entry.reset_stake_clock(clock);
        self.total_staked = new_total;

        debug!(
            account = %hex::encode(account),
            amount = %amount,
            reward = %reward,
            "unstake"
        );
        self.events.push(LedgerEvent::Unstaked {
            account,
            amount,
            reward,
        });
        Ok(reward)
    }

    /// Settle the pending reward to the liquid balance without touching the
    /// stake, and restart the accrual clock. Returns the settled reward.
    ///
    /// Claiming twice at the same `now` settles zero the second time.
    pub fn claim_rewards(&mut self, account: Address, now: u64) -> Result<Amount, StakingError> {
        self.ensure_not_paused()?;

        let record = self.ledger.account(&account).cloned().unwrap_or_default();
        if record.staked.is_zero() {
            return Err(StakingError::NoStakeFound);
        }

        let reward = accrued_reward(
            record.staked,
            record.staked_since,
            now,
            self.params.reward_rate_bps,
        )?;

        if !reward.is_zero() {
            self.ledger.mint_to(&account, reward)?;
        }
        self.ledger
            .get_or_create_account(&account)
            .reset_stake_clock(now);

        debug!(account = %hex::encode(account), reward = %reward, "claim");
        self.events.push(LedgerEvent::RewardsClaimed { account, reward });
        Ok(reward)
    }

    /// Move liquid balance between accounts. Not blocked by pause; only
    /// staking operations are.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), StakingError> {
        if amount.is_zero() {
            return Err(StakingError::InvalidAmount);
        }
        if to == ZERO_ADDRESS {
            return Err(StakingError::InvalidAddress);
        }

        self.ledger.transfer(&from, &to, amount)?;

        debug!(
            from = %hex::encode(from),
            to = %hex::encode(to),
            amount = %amount,
            "transfer"
        );
        self.events.push(LedgerEvent::Transferred { from, to, amount });
        Ok(())
    }

    /// Reward accrued but not yet settled, computed at query time.
    /// Read-only; works while paused.
    pub fn pending_rewards(&self, account: &Address, now: u64) -> Result<Amount, StakingError> {
        let record = self.ledger.account(account).cloned().unwrap_or_default();
        Ok(accrued_reward(
            record.staked,
            record.staked_since,
            now,
            self.params.reward_rate_bps,
        )?)
    }

    /// Staked amount, pending reward, and accrual clock for one account.
    pub fn staking_info(&self, account: &Address, now: u64) -> Result<StakingInfo, StakingError> {
        let record = self.ledger.account(account).cloned().unwrap_or_default();
        let pending_reward = accrued_reward(
            record.staked,
            record.staked_since,
            now,
            self.params.reward_rate_bps,
        )?;
        Ok(StakingInfo {
            staked: record.staked,
            pending_reward,
            staked_since: record.staked_since,
        })
    }

    /// Ledger-wide statistics.
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total_supply: self.ledger.total_supply(),
            total_staked: self.total_staked,
            reward_rate_bps: self.params.reward_rate_bps,
            minimum_stake: self.params.minimum_stake,
        }
    }

    /// Liquid balance of an account (zero for unknown accounts).
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger
            .account(account)
            .map(|a| a.balance)
            .unwrap_or(Amount::ZERO)
    }

    /// Incrementally maintained sum of all staked balances.
    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    /// Read access to the underlying ledger (audits, conservation checks).
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The ordered event log since creation (or the last drain).
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take the accumulated events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn ensure_not_paused(&self) -> Result<(), StakingError> {
        if self.paused {
            return Err(StakingError::Paused);
        }
        Ok(())
    }

    pub(crate) fn ensure_owner(&self, caller: &Address) -> Result<(), StakingError> {
        if *caller != self.owner {
            return Err(StakingError::Unauthorized);
        }
        Ok(())
    }
}
