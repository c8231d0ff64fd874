pub mod admin;
pub mod engine;
pub mod events;
pub mod params;
pub mod shared;
pub mod types;

pub use engine::StakingEngine;
pub use events::LedgerEvent;
pub use params::StakingParams;
pub use shared::SharedEngine;
pub use types::*;
