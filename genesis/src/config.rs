use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::info;

use amber_ledger::{Address, Amount, Ledger, ZERO_ADDRESS};
use amber_rewards::MAX_REWARD_RATE_BPS;
use amber_staking::{StakingEngine, StakingParams};

use crate::types::{hex_serde, GenesisAccount, GenesisError};

/// The full genesis configuration for an Amber ledger.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenesisConfig {
    /// Human-readable ledger identifier.
    pub ledger_id: String,
    /// Timestamp when the ledger starts.
    pub genesis_time: DateTime<Utc>,
    /// The address authorized for administrative operations.
    #[serde(with = "hex_serde")]
    pub owner: Address,
    /// Initial staking parameters.
    pub params: StakingParams,
    /// Initial account balances.
    pub accounts: Vec<GenesisAccount>,
    /// Reserve held by the ledger itself (emergency-withdrawal funds).
    pub vault_balance: Amount,
    /// Hash of the canonical genesis (computed, not stored from file).
    #[serde(with = "hex_bytes")]
    pub genesis_hash: [u8; 32],
}

impl GenesisConfig {
    /// Load a genesis config from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GenesisError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: GenesisConfig = serde_json::from_str(&contents)?;
        config.genesis_hash = config.compute_genesis_hash();
        Ok(config)
    }

    /// Save the genesis config to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenesisError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate all invariants of the genesis configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        if self.owner == ZERO_ADDRESS {
            return Err(GenesisError::ZeroOwner);
        }

        if self.accounts.is_empty() {
            return Err(GenesisError::NoAccounts);
        }

        let mut seen = HashSet::new();
        for (i, account) in self.accounts.iter().enumerate() {
            if account.address == ZERO_ADDRESS {
                return Err(GenesisError::ZeroAddressAccount { index: i });
            }
            if !seen.insert(account.address) {
                return Err(GenesisError::DuplicateAccount(i));
            }
        }

        if self.params.reward_rate_bps > MAX_REWARD_RATE_BPS {
            return Err(GenesisError::RewardRateTooHigh(self.params.reward_rate_bps));
        }
        if self.params.minimum_stake.is_zero() {
            return Err(GenesisError::ZeroMinimumStake);
        }

        Ok(())
    }

    /// Build a seeded staking engine from this configuration.
    ///
    /// Mints every initial balance and the vault reserve, so the resulting
    /// supply equals the configured totals exactly.
    pub fn initialize(&self) -> Result<StakingEngine, GenesisError> {
        self.validate()?;

        let mut ledger = Ledger::new();
        for account in &self.accounts {
            ledger
                .mint_to(&account.address, account.balance)
                .map_err(|_| GenesisError::SupplyOverflow)?;
        }
        ledger
            .mint_vault(self.vault_balance)
            .map_err(|_| GenesisError::SupplyOverflow)?;

        info!(
            ledger_id = %self.ledger_id,
            accounts = self.accounts.len(),
            supply = %ledger.total_supply(),
            "genesis initialized"
        );
        Ok(StakingEngine::with_ledger(
            self.owner,
            self.params.clone(),
            ledger,
        ))
    }

    /// Compute a SHA-256 hash of the canonical JSON representation.
    /// This provides a unique fingerprint for the genesis state.
    pub fn compute_genesis_hash(&self) -> [u8; 32] {
        // Canonical representation excludes the hash field itself.
        let canonical = CanonicalGenesis {
            ledger_id: &self.ledger_id,
            genesis_time: &self.genesis_time,
            owner: &self.owner,
            params: &self.params,
            accounts: &self.accounts,
            vault_balance: &self.vault_balance,
        };
        let json = serde_json::to_string(&canonical).expect("genesis serialization should not fail");
        let digest = Sha256::digest(json.as_bytes());
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        hash
    }

    /// Create a default development configuration: a funded owner, three
    /// user accounts, and a vault reserve.
    pub fn default_devnet() -> Self {
        let owner = devnet_address(9);
        let mut accounts = vec![GenesisAccount {
            address: owner,
            balance: Amount::from_tokens(1_000_000),
        }];
        accounts.extend((1..=3).map(|i| GenesisAccount {
            address: devnet_address(i),
            balance: Amount::from_tokens(1_000),
        }));

        let mut config = GenesisConfig {
            ledger_id: "amber-devnet-1".to_string(),
            genesis_time: Utc::now(),
            owner,
            params: StakingParams::default(),
            accounts,
            vault_balance: Amount::from_tokens(10_000),
            genesis_hash: [0u8; 32],
        };
        config.genesis_hash = config.compute_genesis_hash();
        config
    }
}

fn devnet_address(n: u8) -> Address {
    let mut address = [0u8; 32];
    address[0] = n;
    address
}

/// Internal type for canonical hashing (excludes genesis_hash field).
#[derive(serde::Serialize)]
struct CanonicalGenesis<'a> {
    ledger_id: &'a str,
    genesis_time: &'a DateTime<Utc>,
    #[serde(with = "hex_serde")]
    owner: &'a Address,
    params: &'a StakingParams,
    accounts: &'a [GenesisAccount],
    vault_balance: &'a Amount,
}

/// Helper module for serializing [u8; 32] as hex in the top-level genesis hash.
mod hex_bytes {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn default_devnet_is_valid() {
        let config = GenesisConfig::default_devnet();
        config.validate().unwrap();
        assert_eq!(config.ledger_id, "amber-devnet-1");
        assert_eq!(config.accounts.len(), 4);
        assert_ne!(config.genesis_hash, [0u8; 32]);
    }

    #[test]
    fn genesis_hash_is_deterministic() {
        let mut c1 = GenesisConfig::default_devnet();
        let mut c2 = c1.clone();
        let fixed_time = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        c1.genesis_time = fixed_time;
        c2.genesis_time = fixed_time;

        assert_eq!(c1.compute_genesis_hash(), c2.compute_genesis_hash());
        assert_ne!(c1.compute_genesis_hash(), [0u8; 32]);
    }

    #[test]
    fn genesis_hash_changes_with_data() {
        let c1 = GenesisConfig::default_devnet();
        let mut c2 = c1.clone();
        c2.ledger_id = "different-ledger".to_string();
        assert_ne!(c1.compute_genesis_hash(), c2.compute_genesis_hash());
    }

    #[test]
    fn validate_zero_owner_fails() {
        let mut config = GenesisConfig::default_devnet();
        config.owner = ZERO_ADDRESS;
        assert!(matches!(config.validate(), Err(GenesisError::ZeroOwner)));
    }

    #[test]
    fn validate_no_accounts_fails() {
        let mut config = GenesisConfig::default_devnet();
        config.accounts.clear();
        assert!(matches!(config.validate(), Err(GenesisError::NoAccounts)));
    }

    #[test]
    fn validate_duplicate_account_fails() {
        let mut config = GenesisConfig::default_devnet();
        let first = config.accounts[0].address;
        config.accounts[1].address = first;
        assert!(matches!(
            config.validate(),
            Err(GenesisError::DuplicateAccount(1))
        ));
    }

    #[test]
    fn validate_zero_address_account_fails() {
        let mut config = GenesisConfig::default_devnet();
        config.accounts[2].address = ZERO_ADDRESS;
        assert!(matches!(
            config.validate(),
            Err(GenesisError::ZeroAddressAccount { index: 2 })
        ));
    }

    #[test]
    fn validate_rate_above_cap_fails() {
        let mut config = GenesisConfig::default_devnet();
        config.params.reward_rate_bps = 2001;
        assert!(matches!(
            config.validate(),
            Err(GenesisError::RewardRateTooHigh(2001))
        ));
    }

    #[test]
    fn validate_zero_minimum_fails() {
        let mut config = GenesisConfig::default_devnet();
        config.params.minimum_stake = Amount::ZERO;
        assert!(matches!(
            config.validate(),
            Err(GenesisError::ZeroMinimumStake)
        ));
    }

    #[test]
    fn initialize_seeds_engine() {
        let config = GenesisConfig::default_devnet();
        let engine = config.initialize().unwrap();

        assert_eq!(engine.owner(), config.owner);
        assert_eq!(
            engine.balance_of(&config.accounts[0].address),
            Amount::from_tokens(1_000_000)
        );
        assert_eq!(engine.ledger().vault_balance(), Amount::from_tokens(10_000));
        assert_eq!(
            engine.stats().total_supply,
            Amount::from_tokens(1_000_000 + 3 * 1_000 + 10_000)
        );
        assert!(engine.ledger().conservation_holds());
    }

    #[test]
    fn initialized_engine_accepts_operations() {
        let config = GenesisConfig::default_devnet();
        let mut engine = config.initialize().unwrap();
        let user = config.accounts[1].address;

        engine.stake(user, Amount::from_tokens(100), 1_700_000_000).unwrap();
        assert_eq!(engine.total_staked(), Amount::from_tokens(100));
    }

    #[test]
    fn serde_roundtrip() {
        let config = GenesisConfig::default_devnet();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: GenesisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.ledger_id, back.ledger_id);
        assert_eq!(config.owner, back.owner);
        assert_eq!(config.accounts.len(), back.accounts.len());
        assert_eq!(config.genesis_hash, back.genesis_hash);
    }

    #[test]
    fn file_roundtrip() {
        let config = GenesisConfig::default_devnet();
        let dir = env::temp_dir().join(format!("amber_genesis_test_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("genesis.json");

        config.to_file(&path).unwrap();
        let loaded = GenesisConfig::from_file(&path).unwrap();

        assert_eq!(config.ledger_id, loaded.ledger_id);
        assert_eq!(config.accounts.len(), loaded.accounts.len());
        assert_eq!(config.compute_genesis_hash(), loaded.compute_genesis_hash());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
