pub mod accrual;
pub mod types;

pub use accrual::{accrued_reward, BPS_DENOMINATOR, MAX_REWARD_RATE_BPS, SECONDS_PER_YEAR};
pub use types::RewardError;
