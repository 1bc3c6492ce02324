//! Read-only projections of the ledger.

use anchor_lang::prelude::*;

use super::{AssetLedger, StakingEngine};
use crate::clock::{days_remaining, TimeSource};
use crate::constants::BASIS_POINTS_DENOMINATOR;
use crate::error::StakingError;
use crate::rewards::{pending_reward, reward_per_unit, reward_rate};
use crate::state::{StakePool, StakePosition};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub principal: u64,
    /// Includes reward accrued since the last checkpoint.
    pub pending_reward: u64,
    pub total_claimed: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolInfo {
    pub active: bool,
    pub staking_enabled: bool,
    pub start_time: i64,
    pub end_time: i64,
    pub days_remaining: u64,

    pub total_reward_budget: u64,
    pub reward_rate: u64,
    pub reward_per_unit: u128,
    pub apy_bps: u64,

    pub minimum_stake: u64,
    pub staking_fee_bps: u16,
    pub unstaking_fee_bps: u16,

    pub total_staked: u64,
    pub staker_count: u64,
    pub pool_balance: u64,

    pub reward_deposits: u64,
    pub total_rewards_claimed: u64,
    pub fees_collected: u64,
    pub owner_withdrawals: u64,
    pub available_reward_funds: u64,
    pub available_owner_funds: u64,
}

/// Budget over stake in basis points; 0 with no stake or no running program.
pub fn apy_bps(pool: &StakePool) -> Result<u64> {
    let total_staked = pool.rewards.total_staked;
    if !pool.program.active || total_staked == 0 {
        return Ok(0);
    }

    let apy = (pool.program.total_reward_budget as u128)
        .checked_mul(BASIS_POINTS_DENOMINATOR as u128)
        .ok_or(StakingError::MathOverflow)?
        / total_staked as u128;

    Ok(u64::try_from(apy).unwrap_or(u64::MAX))
}

/// Position snapshot with reward projected to `now`.
pub fn user_info(pool: &StakePool, position: &StakePosition, now: i64) -> Result<UserInfo> {
    Ok(UserInfo {
        principal: position.principal,
        pending_reward: pending_reward(pool, position, now)?,
        total_claimed: position.total_claimed,
    })
}

/// Pool snapshot at `now`; `vault_balance` is the pooled token balance.
pub fn pool_info(pool: &StakePool, vault_balance: u64, now: i64) -> Result<PoolInfo> {
    let program = &pool.program;
    let funds = &pool.funds;

    Ok(PoolInfo {
        active: program.active,
        staking_enabled: program.staking_enabled,
        start_time: program.start_time,
        end_time: program.end_time,
        days_remaining: days_remaining(program, now),

        total_reward_budget: program.total_reward_budget,
        reward_rate: reward_rate(program),
        reward_per_unit: reward_per_unit(pool, now)?,
        apy_bps: apy_bps(pool)?,

        minimum_stake: program.minimum_stake,
        staking_fee_bps: program.staking_fee_bps,
        unstaking_fee_bps: program.unstaking_fee_bps,

        total_staked: pool.rewards.total_staked,
        staker_count: pool.staker_count,
        pool_balance: vault_balance,

        reward_deposits: funds.reward_deposits,
        total_rewards_claimed: funds.rewards_claimed,
        fees_collected: funds.fees_collected,
        owner_withdrawals: funds.owner_withdrawals,
        available_reward_funds: funds.available_reward_funds(),
        available_owner_funds: funds.available_owner_funds()?,
    })
}

impl<'a, T: TimeSource> StakingEngine<'a, T> {
    pub fn user_info(&self, position: &StakePosition) -> Result<UserInfo> {
        user_info(self.pool(), position, self.clock.unix_timestamp()?)
    }

    pub fn pool_info<L: AssetLedger>(&self, ledger: &L) -> Result<PoolInfo> {
        pool_info(self.pool(), ledger.balance()?, self.clock.unix_timestamp()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_REWARD_BUDGET, SECONDS_PER_DAY, TOKEN_UNIT};
    use crate::state::ProgramConfig;

    fn pool(active: bool, total_staked: u64) -> StakePool {
        let mut pool = StakePool::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            ProgramConfig {
                active,
                total_reward_budget: DEFAULT_REWARD_BUDGET,
                ..ProgramConfig::default()
            },
            0,
        );
        pool.rewards.total_staked = total_staked;
        pool
    }

    #[test]
    fn test_apy_estimate() {
        assert_eq!(apy_bps(&pool(true, 9_900 * TOKEN_UNIT)).unwrap(), 101_010);
        assert_eq!(apy_bps(&pool(true, 0)).unwrap(), 0);
        assert_eq!(apy_bps(&pool(false, 9_900 * TOKEN_UNIT)).unwrap(), 0);
    }

    #[test]
    fn test_apy_saturates_for_dust_stake() {
        let mut pool = pool(true, 1);
        pool.program.total_reward_budget = u64::MAX;
        assert_eq!(apy_bps(&pool).unwrap(), u64::MAX);
    }

    #[test]
    fn test_queries_read_shared_pool() {
        let mut pool = pool(true, 9_900 * TOKEN_UNIT);
        pool.program.end_time = 100 * SECONDS_PER_DAY;
        pool.funds.reward_deposits = DEFAULT_REWARD_BUDGET;
        let position = StakePosition {
            principal: 9_900 * TOKEN_UNIT,
            ..StakePosition::default()
        };
        let shared = &pool;

        let info = pool_info(shared, 12_345, SECONDS_PER_DAY).unwrap();
        assert_eq!(info.pool_balance, 12_345);
        assert_eq!(info.days_remaining, 99);
        assert_eq!(info.available_reward_funds, DEFAULT_REWARD_BUDGET);
        assert!(info.reward_per_unit > 0);

        let user = user_info(shared, &position, SECONDS_PER_DAY).unwrap();
        assert_eq!(user.principal, 9_900 * TOKEN_UNIT);
        assert!(user.pending_reward > 0);
        assert_eq!(shared.rewards.reward_per_unit_stored, 0);
    }
}
