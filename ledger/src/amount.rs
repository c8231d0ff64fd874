use serde::{Deserialize, Serialize};

/// Number of decimal places carried by a token amount.
pub const DECIMALS: u32 = 18;

/// Base units per whole token (10^18).
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// A token quantity in base units (10^-18 of a whole token).
///
/// All arithmetic is exact integer arithmetic; there is no floating-point
/// path anywhere. Operations that could overflow return `None` and are
/// surfaced by callers as overflow errors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// An amount from raw base units.
    pub const fn from_units(units: u128) -> Self {
        Amount(units)
    }

    /// An amount from whole tokens.
    pub const fn from_tokens(tokens: u64) -> Self {
        Amount(tokens as u128 * UNITS_PER_TOKEN)
    }

    /// The raw base-unit value.
    pub const fn units(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }
}

impl std::fmt::Display for Amount {
    /// Renders as whole tokens with trailing zeros trimmed, e.g. "12.5".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / UNITS_PER_TOKEN;
        let frac = self.0 % UNITS_PER_TOKEN;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let frac = format!("{frac:018}");
            write!(f, "{whole}.{}", frac.trim_end_matches('0'))
        }
    }
}
