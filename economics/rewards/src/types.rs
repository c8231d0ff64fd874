use thiserror::Error;

/// Errors from reward accrual.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RewardError {
    #[error("arithmetic overflow computing reward")]
    Overflow,
}
