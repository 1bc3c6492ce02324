//! Read-only query handlers.
//!
//! Results are returned through Anchor return data; nothing is written.

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::clock::{SysvarClock, TimeSource};
use crate::constants::*;
use crate::engine::{pool_info, user_info, PoolInfo, UserInfo};
use crate::error::StakingError;
use crate::state::{StakePool, UserStake};

/// Accounts required for pool queries.
#[derive(Accounts)]
pub struct ViewPool<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = pool_vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    pub pool_vault: Account<'info, TokenAccount>,
}

/// Accounts required for position queries.
#[derive(Accounts)]
pub struct ViewUser<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user_stake.owner.as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.stake_pool == stake_pool.key()
    )]
    pub user_stake: Account<'info, UserStake>,
}

pub fn pool_info_handler(ctx: Context<ViewPool>) -> Result<PoolInfo> {
    let now = SysvarClock.unix_timestamp()?;
    pool_info(&ctx.accounts.stake_pool, ctx.accounts.pool_vault.amount, now)
}

pub fn user_info_handler(ctx: Context<ViewUser>) -> Result<UserInfo> {
    let now = SysvarClock.unix_timestamp()?;
    user_info(&ctx.accounts.stake_pool, &ctx.accounts.user_stake.position, now)
}
