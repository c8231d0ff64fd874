pub mod accounts;
pub mod amount;
pub mod store;
pub mod types;

pub use accounts::AccountRecord;
pub use amount::{Amount, DECIMALS, UNITS_PER_TOKEN};
pub use store::Ledger;
pub use types::*;
