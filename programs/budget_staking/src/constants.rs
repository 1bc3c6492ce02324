//! Program constants for the Budget Staking program.
//!
//! This module defines all constant values used throughout the staking program,
//! including PDA seeds, program duration, fee caps, parameter bounds and the
//! fixed-point scale used by reward accounting.

/// Seed for deriving the stake pool PDA
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";

/// Seed for deriving user stake account PDAs
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Seed for deriving the pool vault PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Length of a reward program in seconds (365 days)
pub const PROGRAM_DURATION: i64 = 365 * SECONDS_PER_DAY;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Maximum staking or unstaking fee (10% = 1000 basis points)
pub const MAX_FEE_BPS: u16 = 1_000;

/// Scale factor of the reward-per-unit accumulator (10^18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Base units per whole token (9 decimals)
pub const TOKEN_UNIT: u64 = 1_000_000_000;

/// Lowest value the minimum stake may be configured to (1 token)
pub const MIN_MINIMUM_STAKE: u64 = TOKEN_UNIT;

/// Highest value the minimum stake may be configured to (1M tokens)
pub const MAX_MINIMUM_STAKE: u64 = 1_000_000 * TOKEN_UNIT;

/// Smallest reward budget a program may run with (1,000 tokens)
pub const MIN_REWARD_BUDGET: u64 = 1_000 * TOKEN_UNIT;

/// Largest reward budget a program may run with (1B tokens)
pub const MAX_REWARD_BUDGET: u64 = 1_000_000_000 * TOKEN_UNIT;

/// Default reward budget (100,000 tokens)
pub const DEFAULT_REWARD_BUDGET: u64 = 100_000 * TOKEN_UNIT;

/// Default minimum stake (100 tokens)
pub const DEFAULT_MINIMUM_STAKE: u64 = 100 * TOKEN_UNIT;

/// Default staking fee (1% = 100 basis points)
pub const DEFAULT_STAKING_FEE_BPS: u16 = 100;

/// Default unstaking fee (1% = 100 basis points)
pub const DEFAULT_UNSTAKING_FEE_BPS: u16 = 100;
