use chrono::{DateTime, Utc};

use amber_ledger::{Address, Amount, ZERO_ADDRESS};
use amber_staking::StakingParams;

use crate::config::GenesisConfig;
use crate::types::{GenesisAccount, GenesisError};

/// Builder for constructing a `GenesisConfig` step by step.
pub struct GenesisBuilder {
    ledger_id: String,
    genesis_time: DateTime<Utc>,
    owner: Address,
    params: StakingParams,
    accounts: Vec<GenesisAccount>,
    vault_balance: Amount,
}

impl GenesisBuilder {
    /// Start building a genesis config with the given ledger ID.
    pub fn new(ledger_id: impl Into<String>) -> Self {
        Self {
            ledger_id: ledger_id.into(),
            genesis_time: Utc::now(),
            owner: ZERO_ADDRESS,
            params: StakingParams::default(),
            accounts: Vec::new(),
            vault_balance: Amount::ZERO,
        }
    }

    /// Set the genesis timestamp.
    pub fn with_genesis_time(mut self, time: DateTime<Utc>) -> Self {
        self.genesis_time = time;
        self
    }

    /// Set the administrative owner.
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    /// Set the staking parameters.
    pub fn with_params(mut self, params: StakingParams) -> Self {
        self.params = params;
        self
    }

    /// Add an account with an initial balance.
    pub fn with_account(mut self, address: Address, balance: Amount) -> Self {
        self.accounts.push(GenesisAccount { address, balance });
        self
    }

    /// Set the ledger-held vault reserve.
    pub fn with_vault_balance(mut self, balance: Amount) -> Self {
        self.vault_balance = balance;
        self
    }

    /// Build the final genesis configuration.
    /// Validates all invariants before returning.
    pub fn build(self) -> Result<GenesisConfig, GenesisError> {
        let mut config = GenesisConfig {
            ledger_id: self.ledger_id,
            genesis_time: self.genesis_time,
            owner: self.owner,
            params: self.params,
            accounts: self.accounts,
            vault_balance: self.vault_balance,
            genesis_hash: [0u8; 32],
        };

        config.validate()?;
        config.genesis_hash = config.compute_genesis_hash();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address(n: u8) -> Address {
        let mut a = [0u8; 32];
        a[0] = n;
        a
    }

    #[test]
    fn builder_basic() {
        let config = GenesisBuilder::new("test-ledger")
            .with_owner(test_address(9))
            .with_account(test_address(1), Amount::from_tokens(1_000))
            .build()
            .unwrap();

        assert_eq!(config.ledger_id, "test-ledger");
        assert_eq!(config.owner, test_address(9));
        assert_eq!(config.accounts.len(), 1);
        assert_ne!(config.genesis_hash, [0u8; 32]);
    }

    #[test]
    fn builder_no_owner_fails() {
        let result = GenesisBuilder::new("no-owner")
            .with_account(test_address(1), Amount::from_tokens(1))
            .build();
        assert!(matches!(result, Err(GenesisError::ZeroOwner)));
    }

    #[test]
    fn builder_no_accounts_fails() {
        let result = GenesisBuilder::new("empty")
            .with_owner(test_address(9))
            .build();
        assert!(matches!(result, Err(GenesisError::NoAccounts)));
    }

    #[test]
    fn builder_with_custom_params() {
        let params = StakingParams {
            reward_rate_bps: 1_500,
            minimum_stake: Amount::from_tokens(25),
        };
        let config = GenesisBuilder::new("custom")
            .with_owner(test_address(9))
            .with_params(params.clone())
            .with_account(test_address(1), Amount::from_tokens(100))
            .build()
            .unwrap();

        assert_eq!(config.params, params);
    }

    #[test]
    fn builder_with_genesis_time() {
        let fixed_time = DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let config = GenesisBuilder::new("timed")
            .with_owner(test_address(9))
            .with_genesis_time(fixed_time)
            .with_account(test_address(1), Amount::from_tokens(1))
            .build()
            .unwrap();

        assert_eq!(config.genesis_time, fixed_time);
    }

    #[test]
    fn builder_validates_on_build() {
        let result = GenesisBuilder::new("bad-rate")
            .with_owner(test_address(9))
            .with_params(StakingParams {
                reward_rate_bps: 5_000,
                minimum_stake: Amount::from_tokens(10),
            })
            .with_account(test_address(1), Amount::from_tokens(1))
            .build();
        assert!(matches!(result, Err(GenesisError::RewardRateTooHigh(5_000))));
    }

    #[test]
    fn builder_vault_reaches_engine() {
        let config = GenesisBuilder::new("vaulted")
            .with_owner(test_address(9))
            .with_account(test_address(1), Amount::from_tokens(100))
            .with_vault_balance(Amount::from_tokens(50))
            .build()
            .unwrap();

        let engine = config.initialize().unwrap();
        assert_eq!(engine.ledger().vault_balance(), Amount::from_tokens(50));
    }

    #[test]
    fn builder_hash_computed_on_build() {
        let config = GenesisBuilder::new("hashed")
            .with_owner(test_address(9))
            .with_account(test_address(1), Amount::from_tokens(1))
            .build()
            .unwrap();

        assert_eq!(config.genesis_hash, config.compute_genesis_hash());
    }
}
