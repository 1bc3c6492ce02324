//! Unstake instruction handler.
//!
//! Handles withdrawing staked tokens from the pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::clock::SysvarClock;
use crate::constants::*;
use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::instructions::vault::TokenVault;
use crate::state::{StakePool, UserStake};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The user unstaking tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = pool_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// User's stake account.
    #[account(
        mut,
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ StakingError::Unauthorized,
        constraint = user_stake.stake_pool == stake_pool.key()
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for receiving unstaked tokens.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ StakingError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's vault.
    #[account(mut)]
    pub pool_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Unstake tokens from the pool.
///
/// Available whether or not staking is paused or the program has ended; the
/// unstaking fee stays in the vault as collected fees.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
/// * `amount` - Principal to remove from the position
///
/// A rejected token transfer aborts the transaction with the SPL token
/// program's error rather than `TransferFailed`; no state is written.
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let user = ctx.accounts.user.key();
    let mut vault = TokenVault::new(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.pool_vault.to_account_info(),
        ctx.accounts.stake_pool.to_account_info(),
        ctx.accounts.stake_pool.staking_mint,
        ctx.accounts.stake_pool.bump,
        ctx.accounts.user_token_account.to_account_info(),
        ctx.accounts.user.to_account_info(),
    );
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);
    let receipt = engine.unstake(
        &mut vault,
        &user,
        &mut ctx.accounts.user_stake.position,
        amount,
    )?;

    let position = &ctx.accounts.user_stake.position;
    msg!(
        "Unstaked {} tokens (fee {}, returned {})",
        receipt.amount,
        receipt.fee,
        receipt.net_return
    );
    msg!("Remaining staked: {}", position.principal);
    msg!("Pending rewards: {}", position.pending_reward);

    Ok(())
}
