use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::accounts::AccountRecord;
use crate::amount::Amount;
use crate::types::{Address, LedgerError};

/// The keyed account store.
///
/// Owns every balance mutation. `vault` is the balance held by the ledger
/// itself rather than any account (the emergency-withdrawal reserve);
/// `total_supply` is maintained incrementally and grows only through
/// minting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    accounts: HashMap<Address, AccountRecord>,
    vault: Amount,
    total_supply: Amount,
}

impl Ledger {
    /// Create a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an account.
    pub fn account(&self, address: &Address) -> Option<&AccountRecord> {
        self.accounts.get(address)
    }

    /// Look up an account mutably.
    pub fn account_mut(&mut self, address: &Address) -> Option<&mut AccountRecord> {
        self.accounts.get_mut(address)
    }

    /// Get an existing account or create a zero-initialized one.
    /// Entries persist for the lifetime of the ledger, even at zero.
    pub fn get_or_create_account(&mut self, address: &Address) -> &mut AccountRecord {
        self.accounts.entry(*address).or_default()
    }

    /// Mint `amount` into an account's liquid balance, growing the supply.
    pub fn mint_to(&mut self, address: &Address, amount: Amount) -> Result<(), LedgerError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.get_or_create_account(address).credit(amount)?;
        self.total_supply = new_supply;
        trace!(amount = %amount, "minted to account");
        Ok(())
    }

    /// Mint `amount` into the vault, growing the supply.
    pub fn mint_vault(&mut self, amount: Amount) -> Result<(), LedgerError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.vault = self.vault.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.total_supply = new_supply;
        Ok(())
    }

    /// Move `amount` out of the vault into an account's liquid balance.
    /// Supply is unchanged.
    pub fn withdraw_vault(&mut self, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        if self.vault < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: self.vault,
            });
        }
        let remaining = self.vault.checked_sub(amount).ok_or(LedgerError::Overflow)?;
        self.get_or_create_account(to).credit(amount)?;
        self.vault = remaining;
        trace!(amount = %amount, "vault withdrawal");
        Ok(())
    }

    /// Move `amount` between two accounts' liquid balances.
    ///
    /// The sender's balance is checked before anything mutates; a
    /// self-transfer that passes the check is a no-op.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }

        let available = self
            .accounts
            .get(from)
            .map(|a| a.balance)
            .unwrap_or(Amount::ZERO);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }

        if from == to {
            return Ok(());
        }

        // The sender exists: its balance covered a nonzero amount.
        let sender = self.accounts.get_mut(from).unwrap();
        sender.debit(amount)?;
        self.get_or_create_account(to).credit(amount)?;
        Ok(())
    }

    /// Number of account entries (zero-balance entries included).
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Total token supply across accounts, stakes, and the vault.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// The ledger-held vault balance.
    pub fn vault_balance(&self) -> Amount {
        self.vault
    }

    /// Sum of all accounts' staked balances, computed by full scan.
    /// Bounded by `total_supply`, so the sum cannot overflow.
    pub fn staked_total(&self) -> Amount {
        Amount::from_units(self.accounts.values().map(|r| r.staked.units()).sum())
    }

    /// Iterate over all account entries.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &AccountRecord)> {
        self.accounts.iter()
    }

    /// Verify `sum(balance) + sum(staked) + vault == total_supply`.
    pub fn conservation_holds(&self) -> bool {
        let mut sum = self.vault;
        for record in self.accounts.values() {
            sum = match sum
                .checked_add(record.balance)
                .and_then(|s| s.checked_add(record.staked))
            {
                Some(s) => s,
                None => return false,
            };
        }
        sum == self.total_supply
    }
}
