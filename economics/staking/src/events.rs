use serde::{Deserialize, Serialize};

use amber_ledger::{Address, Amount};

/// A domain event appended to the engine's ordered log after each
/// successful operation.
///
/// Events are an outbound notification channel for external observers;
/// they never drive control flow inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    Staked {
        account: Address,
        amount: Amount,
        timestamp: u64,
    },
    Unstaked {
        account: Address,
        amount: Amount,
        reward: Amount,
    },
    RewardsClaimed {
        account: Address,
        reward: Amount,
    },
    Transferred {
        from: Address,
        to: Address,
        amount: Amount,
    },
    RewardRateUpdated {
        old_bps: u64,
        new_bps: u64,
    },
    MinimumStakeUpdated {
        old: Amount,
        new: Amount,
    },
    Paused,
    Unpaused,
    EmergencyWithdrawal {
        to: Address,
        amount: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = LedgerEvent::Staked {
            account: [7u8; 32],
            amount: Amount::from_tokens(100),
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
