//! State structures for the Budget Staking program.
//!
//! `StakePool` is the single ledger aggregate every operation runs against;
//! `UserStake` holds one participant's position.

pub mod stake_pool;
pub mod user_stake;

pub use stake_pool::*;
pub use user_stake::*;
