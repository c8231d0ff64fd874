use amber_ledger::Amount;

use crate::types::RewardError;

/// Basis points in one whole (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds in a (non-leap) year, the annualization period for reward rates.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;

/// Hard cap on the annual reward rate: 2_000 bps = 20%.
pub const MAX_REWARD_RATE_BPS: u64 = 2_000;

/// Reward accrued by a staked amount between `staked_since` and `now`.
///
/// Formula: floor(staked * rate_bps * elapsed / (10_000 * SECONDS_PER_YEAR)).
///
/// All arithmetic is integer math in the base-unit domain; the division
/// floors, so repeated settlement can never over-issue. Deterministic for
/// identical inputs: the same value is returned whether it is shown as an
/// estimate or settled for real.
///
/// A `staked_since` of 0 means "never staked" and accrues nothing; a `now`
/// before `staked_since` reads as zero elapsed time.
pub fn accrued_reward(
    staked: Amount,
    staked_since: u64,
    now: u64,
    rate_bps: u64,
) -> Result<Amount, RewardError> {
    if staked.is_zero() || staked_since == 0 {
        return Ok(Amount::ZERO);
    }

    let elapsed = now.saturating_sub(staked_since);
    if elapsed == 0 || rate_bps == 0 {
        return Ok(Amount::ZERO);
    }

    let numerator = staked
        .units()
        .checked_mul(rate_bps as u128)
        .and_then(|n| n.checked_mul(elapsed as u128))
        .ok_or(RewardError::Overflow)?;
    let denominator = BPS_DENOMINATOR as u128 * SECONDS_PER_YEAR as u128;

    Ok(Amount::from_units(numerator / denominator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use amber_ledger::UNITS_PER_TOKEN;

    const RATE_5_PERCENT: u64 = 500;

    #[test]
    fn test_zero_stake() {
        let reward =
            accrued_reward(Amount::ZERO, 1, 1 + SECONDS_PER_YEAR, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::ZERO);
    }

    #[test]
    fn test_never_staked() {
        let reward =
            accrued_reward(Amount::from_tokens(100), 0, SECONDS_PER_YEAR, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::ZERO);
    }

    #[test]
    fn test_zero_elapsed() {
        let reward =
            accrued_reward(Amount::from_tokens(100), 1000, 1000, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::ZERO);
    }

    #[test]
    fn test_zero_rate() {
        let reward =
            accrued_reward(Amount::from_tokens(100), 1, 1 + SECONDS_PER_YEAR, 0).unwrap();
        assert_eq!(reward, Amount::ZERO);
    }

    #[test]
    fn test_full_year_at_5_percent() {
        // 100 tokens at 5% over exactly one year = 5 tokens, exactly.
        let reward =
            accrued_reward(Amount::from_tokens(100), 1, 1 + SECONDS_PER_YEAR, RATE_5_PERCENT)
                .unwrap();
        assert_eq!(reward, Amount::from_tokens(5));
    }

    #[test]
    fn test_half_year_truncates() {
        // 100 tokens * 500 bps * (SECONDS_PER_YEAR / 2) / (10_000 * SECONDS_PER_YEAR)
        // = 2.5 tokens exactly (the year is even).
        let half = SECONDS_PER_YEAR / 2;
        let reward =
            accrued_reward(Amount::from_tokens(100), 1, 1 + half, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::from_units(5 * UNITS_PER_TOKEN / 2));
    }

    #[test]
    fn test_thirty_days() {
        // 50 tokens * 500 bps * 30 days: floor division in base units.
        let thirty_days: u64 = 30 * 24 * 3600;
        let reward =
            accrued_reward(Amount::from_tokens(50), 1, 1 + thirty_days, RATE_5_PERCENT).unwrap();
        let expected = 50 * UNITS_PER_TOKEN * 500 * thirty_days as u128
            / (BPS_DENOMINATOR as u128 * SECONDS_PER_YEAR as u128);
        assert_eq!(reward, Amount::from_units(expected));
        // Spot-check: 50 * 0.05 * 30/365 tokens, floored at the 18th decimal.
        assert_eq!(expected, 205_479_452_054_794_520);
    }

    #[test]
    fn test_floors_never_rounds_up() {
        // 1 base unit staked for 1 second accrues nothing.
        let reward = accrued_reward(Amount::from_units(1), 1, 2, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::ZERO);

        // Just under the first payable unit still floors to zero.
        let one_unit_threshold = BPS_DENOMINATOR as u128 * SECONDS_PER_YEAR as u128 / 500;
        let reward =
            accrued_reward(Amount::from_units(one_unit_threshold - 1), 1, 2, RATE_5_PERCENT)
                .unwrap();
        assert_eq!(reward, Amount::ZERO);
        let reward =
            accrued_reward(Amount::from_units(one_unit_threshold), 1, 2, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::from_units(1));
    }

    #[test]
    fn test_multi_year_elapsed() {
        // 10 years at 20%: 1_000 tokens -> 2_000 tokens of reward.
        let reward = accrued_reward(
            Amount::from_tokens(1_000),
            1,
            1 + 10 * SECONDS_PER_YEAR,
            MAX_REWARD_RATE_BPS,
        )
        .unwrap();
        assert_eq!(reward, Amount::from_tokens(2_000));
    }

    #[test]
    fn test_large_stake_no_overflow() {
        // A billion tokens at the rate cap for a year stays inside u128.
        let reward = accrued_reward(
            Amount::from_tokens(1_000_000_000),
            1,
            1 + SECONDS_PER_YEAR,
            MAX_REWARD_RATE_BPS,
        )
        .unwrap();
        assert_eq!(reward, Amount::from_tokens(200_000_000));
    }

    #[test]
    fn test_unrepresentable_input_overflows() {
        let err = accrued_reward(
            Amount::from_units(u128::MAX),
            1,
            1 + SECONDS_PER_YEAR,
            MAX_REWARD_RATE_BPS,
        )
        .unwrap_err();
        assert_eq!(err, RewardError::Overflow);
    }

    #[test]
    fn test_clock_regression_reads_as_zero() {
        let reward = accrued_reward(Amount::from_tokens(100), 1000, 500, RATE_5_PERCENT).unwrap();
        assert_eq!(reward, Amount::ZERO);
    }

    #[test]
    fn test_monotonic_in_elapsed_time() {
        let staked = Amount::from_tokens(777);
        let mut last = Amount::ZERO;
        for days in [1u64, 7, 30, 90, 365, 730] {
            let reward =
                accrued_reward(staked, 1, 1 + days * 86_400, RATE_5_PERCENT).unwrap();
            assert!(reward >= last);
            last = reward;
        }
    }
}
