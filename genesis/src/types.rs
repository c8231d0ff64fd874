use serde::{Deserialize, Serialize};
use thiserror::Error;

use amber_ledger::{Address, Amount};

/// An account entry in the genesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisAccount {
    /// The account's address (32 bytes, hex-encoded in JSON).
    #[serde(with = "hex_serde")]
    pub address: Address,
    /// Initial liquid balance.
    pub balance: Amount,
}

/// Errors that can occur loading or validating a genesis configuration.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("genesis file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid genesis JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("owner must not be the zero address")]
    ZeroOwner,

    #[error("genesis must fund at least one account")]
    NoAccounts,

    #[error("duplicate account at index {0}")]
    DuplicateAccount(usize),

    #[error("account at index {index} is the zero address")]
    ZeroAddressAccount { index: usize },

    #[error("reward rate {0} bps exceeds the 2000 bps cap")]
    RewardRateTooHigh(u64),

    #[error("minimum stake must be greater than zero")]
    ZeroMinimumStake,

    #[error("initial balances overflow the supply")]
    SupplyOverflow,
}

/// Serialize a 32-byte address as a hex string in JSON.
pub(crate) mod hex_serde {
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
