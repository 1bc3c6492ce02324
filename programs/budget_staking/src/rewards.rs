//! Reward-per-unit-stake accumulator.
//!
//! The pool keeps one global counter, `reward_per_unit_stored`, that grows by
//! `elapsed * rate * PRECISION / total_staked` while the program runs. A
//! position earns `principal * (stored - paid) / PRECISION` between two of its
//! checkpoints, so accrual is exact regardless of how calls from different
//! users interleave.
//!
//! The global checkpoint must run before the user checkpoint at every call
//! site; [`checkpoint`] is the only way user operations touch this module.

use anchor_lang::prelude::*;

use crate::clock::last_applicable_time;
use crate::constants::{PRECISION, PROGRAM_DURATION};
use crate::error::StakingError;
use crate::math::{mul_div, to_u64};
use crate::state::{ProgramConfig, StakePool, StakePosition};

/// Tokens emitted per second across all stakers.
///
/// Recomputed from the live budget on every call.
pub fn reward_rate(program: &ProgramConfig) -> u64 {
    program.total_reward_budget / PROGRAM_DURATION as u64
}

/// Value the global accumulator would hold after a checkpoint at `now`.
pub fn reward_per_unit(pool: &StakePool, now: i64) -> Result<u128> {
    let rewards = &pool.rewards;
    if rewards.total_staked == 0 || !pool.program.active {
        return Ok(rewards.reward_per_unit_stored);
    }

    let elapsed = last_applicable_time(&pool.program, rewards, now)
        .saturating_sub(rewards.last_update_time);
    if elapsed <= 0 {
        return Ok(rewards.reward_per_unit_stored);
    }

    let emitted = (elapsed as u128)
        .checked_mul(reward_rate(&pool.program) as u128)
        .ok_or(StakingError::MathOverflow)?;
    let increment = mul_div(emitted, PRECISION, rewards.total_staked as u128)?;

    Ok(rewards
        .reward_per_unit_stored
        .checked_add(increment)
        .ok_or(StakingError::MathOverflow)?)
}

/// Folds elapsed time into the global accumulator.
///
/// Calling it twice at the same instant leaves the second call without effect.
pub fn update_global(pool: &mut StakePool, now: i64) -> Result<()> {
    let stored = reward_per_unit(pool, now)?;
    let applicable = last_applicable_time(&pool.program, &pool.rewards, now);

    pool.rewards.reward_per_unit_stored = stored;
    pool.rewards.last_update_time = pool.rewards.last_update_time.max(applicable);

    Ok(())
}

/// Reward earned by `principal` while the accumulator moved from `paid` to `stored`.
pub fn earned(principal: u64, stored: u128, paid: u128) -> Result<u64> {
    let delta = stored.saturating_sub(paid);
    if principal == 0 || delta == 0 {
        return Ok(0);
    }
    to_u64(mul_div(principal as u128, delta, PRECISION)?)
}

/// Moves reward earned since the position's last checkpoint into `pending_reward`.
///
/// The paid marker is snapped even for an empty position, so stake added
/// later never collects reward from before it existed.
pub fn update_user(pool: &StakePool, position: &mut StakePosition) -> Result<()> {
    let stored = pool.rewards.reward_per_unit_stored;
    let accrued = earned(position.principal, stored, position.reward_per_unit_paid)?;

    position.pending_reward = position
        .pending_reward
        .checked_add(accrued)
        .ok_or(StakingError::MathOverflow)?;
    position.reward_per_unit_paid = stored;

    Ok(())
}

/// Global checkpoint followed by the position's checkpoint.
pub fn checkpoint(pool: &mut StakePool, position: &mut StakePosition, now: i64) -> Result<()> {
    update_global(pool, now)?;
    update_user(pool, position)
}

/// Pending reward a checkpoint at `now` would leave on the position, without
/// mutating anything.
pub fn pending_reward(pool: &StakePool, position: &StakePosition, now: i64) -> Result<u64> {
    let stored = reward_per_unit(pool, now)?;
    let accrued = earned(position.principal, stored, position.reward_per_unit_paid)?;

    Ok(position
        .pending_reward
        .checked_add(accrued)
        .ok_or(StakingError::MathOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SECONDS_PER_DAY, TOKEN_UNIT};

    const START: i64 = 1_700_000_000;
    const BUDGET: u64 = 100_000 * TOKEN_UNIT;

    fn running_pool(total_staked: u64) -> StakePool {
        let mut pool = StakePool::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            ProgramConfig {
                active: true,
                staking_enabled: true,
                start_time: START,
                end_time: START + PROGRAM_DURATION,
                total_reward_budget: BUDGET,
                ..ProgramConfig::default()
            },
            START,
        );
        pool.rewards.total_staked = total_staked;
        pool
    }

    #[test]
    fn test_rate_floors() {
        let pool = running_pool(0);
        assert_eq!(reward_rate(&pool.program), 3_170_979);
    }

    #[test]
    fn test_no_accrual_without_stake() {
        let mut pool = running_pool(0);
        update_global(&mut pool, START + SECONDS_PER_DAY).unwrap();
        assert_eq!(pool.rewards.reward_per_unit_stored, 0);
        assert_eq!(pool.rewards.last_update_time, START + SECONDS_PER_DAY);
    }

    #[test]
    fn test_no_accrual_while_inactive() {
        let mut pool = running_pool(1_000 * TOKEN_UNIT);
        pool.program.active = false;
        update_global(&mut pool, START + SECONDS_PER_DAY).unwrap();
        assert_eq!(pool.rewards.reward_per_unit_stored, 0);
        assert_eq!(pool.rewards.last_update_time, START);
    }

    #[test]
    fn test_global_checkpoint_is_idempotent() {
        let mut pool = running_pool(1_000 * TOKEN_UNIT);
        let now = START + 3_600;

        update_global(&mut pool, now).unwrap();
        let first = pool.rewards;
        assert!(first.reward_per_unit_stored > 0);

        update_global(&mut pool, now).unwrap();
        assert_eq!(pool.rewards, first);
    }

    #[test]
    fn test_accrual_stops_at_end_time() {
        let mut at_end = running_pool(1_000 * TOKEN_UNIT);
        let mut after_end = running_pool(1_000 * TOKEN_UNIT);

        update_global(&mut at_end, START + PROGRAM_DURATION).unwrap();
        update_global(&mut after_end, START + PROGRAM_DURATION + 30 * SECONDS_PER_DAY).unwrap();

        assert_eq!(
            at_end.rewards.reward_per_unit_stored,
            after_end.rewards.reward_per_unit_stored
        );
        assert_eq!(after_end.rewards.last_update_time, START + PROGRAM_DURATION);
    }

    #[test]
    fn test_user_checkpoint_snaps_empty_position() {
        let mut pool = running_pool(1_000 * TOKEN_UNIT);
        let mut late = StakePosition::default();

        checkpoint(&mut pool, &mut late, START + 10 * SECONDS_PER_DAY).unwrap();

        assert_eq!(late.pending_reward, 0);
        assert_eq!(late.reward_per_unit_paid, pool.rewards.reward_per_unit_stored);
    }

    #[test]
    fn test_projection_matches_checkpoint() {
        let mut pool = running_pool(5_000 * TOKEN_UNIT);
        let mut position = StakePosition {
            principal: 2_000 * TOKEN_UNIT,
            ..StakePosition::default()
        };
        let now = START + 7 * SECONDS_PER_DAY + 123;

        let projected = pending_reward(&pool, &position, now).unwrap();
        checkpoint(&mut pool, &mut position, now).unwrap();

        assert!(projected > 0);
        assert_eq!(projected, position.pending_reward);
    }

    #[test]
    fn test_sole_staker_earns_emitted_reward() {
        let principal = 9_900 * TOKEN_UNIT;
        let mut pool = running_pool(principal);
        let mut position = StakePosition {
            principal,
            ..StakePosition::default()
        };
        let elapsed = 30 * SECONDS_PER_DAY;

        checkpoint(&mut pool, &mut position, START + elapsed).unwrap();

        let emitted = elapsed as u64 * reward_rate(&pool.program);
        assert!(position.pending_reward <= emitted);
        assert!(emitted - position.pending_reward <= 1);
    }
}
