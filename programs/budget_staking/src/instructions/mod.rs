//! Instruction handlers for the Budget Staking program.
//!
//! Each handler validates its accounts, then delegates to the staking engine.

pub mod admin;
pub mod claim_reward;
pub mod initialize;
pub mod stake;
pub mod treasury;
pub mod unstake;
pub mod vault;
pub mod views;

pub use admin::*;
pub use claim_reward::*;
pub use initialize::*;
pub use stake::*;
pub use treasury::*;
pub use unstake::*;
pub use views::*;
