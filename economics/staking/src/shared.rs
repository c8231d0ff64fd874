use std::sync::Arc;

use parking_lot::RwLock;

use amber_ledger::{Address, Amount};

use crate::engine::StakingEngine;
use crate::events::LedgerEvent;
use crate::types::{LedgerStats, StakingError, StakingInfo};

/// A cloneable handle sharing one engine across threads.
///
/// Each mutating operation holds the exclusive writer lock for its full
/// duration; readers run concurrently against a consistent snapshot and
/// never observe a half-applied mutation.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<StakingEngine>>,
}

impl SharedEngine {
    pub fn new(engine: StakingEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn stake(&self, account: Address, amount: Amount, now: u64) -> Result<(), StakingError> {
        self.inner.write().stake(account, amount, now)
    }

    pub fn unstake(
        &self,
        account: Address,
        amount: Amount,
        now: u64,
    ) -> Result<Amount, StakingError> {
        self.inner.write().unstake(account, amount, now)
    }

    pub fn claim_rewards(&self, account: Address, now: u64) -> Result<Amount, StakingError> {
        self.inner.write().claim_rewards(account, now)
    }

    pub fn transfer(&self, from: Address, to: Address, amount: Amount) -> Result<(), StakingError> {
        self.inner.write().transfer(from, to, amount)
    }

    pub fn pending_rewards(&self, account: &Address, now: u64) -> Result<Amount, StakingError> {
        self.inner.read().pending_rewards(account, now)
    }

    pub fn staking_info(&self, account: &Address, now: u64) -> Result<StakingInfo, StakingError> {
        self.inner.read().staking_info(account, now)
    }

    pub fn stats(&self) -> LedgerStats {
        self.inner.read().stats()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.inner.read().balance_of(account)
    }

    pub fn drain_events(&self) -> Vec<LedgerEvent> {
        self.inner.write().drain_events()
    }

    /// Run a closure against a read snapshot of the engine.
    pub fn with_read<R>(&self, f: impl FnOnce(&StakingEngine) -> R) -> R {
        f(&self.inner.read())
    }
}
