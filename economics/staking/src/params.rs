use serde::{Deserialize, Serialize};

use amber_ledger::Amount;

/// Global staking parameters, owner-mutable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Annual reward rate in basis points (500 = 5%). Capped at 2_000.
    pub reward_rate_bps: u64,
    /// Smallest stake the engine accepts. Always greater than zero.
    pub minimum_stake: Amount,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            reward_rate_bps: 500,
            minimum_stake: Amount::from_tokens(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = StakingParams::default();
        assert_eq!(params.reward_rate_bps, 500);
        assert_eq!(params.minimum_stake, Amount::from_tokens(10));
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = StakingParams {
            reward_rate_bps: 1000,
            minimum_stake: Amount::from_tokens(20),
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: StakingParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
