//! Lender profiles, market configuration and table loading

mod data;
pub mod loader;

pub use data::{LenderConfig, LenderId, LenderProfile, LimitBreach, DEFAULT_REFERENCE_INDEX};
pub use loader::{load_lender_config, load_lenders, load_lenders_from_reader};
