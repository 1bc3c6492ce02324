//! Stake instruction handler.
//!
//! Handles staking tokens into the pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::clock::SysvarClock;
use crate::constants::*;
use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::instructions::vault::TokenVault;
use crate::state::{StakePool, UserStake};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user staking tokens.
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

    /// User's stake account (created if first time staking).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for the staking token.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ StakingError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's vault.
    #[account(mut)]
    pub pool_vault: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Stake tokens into the pool.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Gross amount of tokens to stake; the staking fee is taken from it
///
/// A rejected token transfer aborts the transaction with the SPL token
/// program's error rather than `TransferFailed`; no state is written.
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let user = ctx.accounts.user.key();
    let pool_key = ctx.accounts.stake_pool.key();

    // If first time staking, bind the stake account to its owner
    let user_stake = &mut ctx.accounts.user_stake;
    if !user_stake.is_initialized() {
        user_stake.owner = user;
        user_stake.stake_pool = pool_key;
        user_stake.bump = ctx.bumps.user_stake;
    }
    require_keys_eq!(user_stake.owner, user, StakingError::Unauthorized);

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
    let receipt = engine.stake(
        &mut vault,
        &user,
        &mut ctx.accounts.user_stake.position,
        amount,
    )?;

    msg!(
        "Staked {} tokens (fee {}, credited {})",
        receipt.amount,
        receipt.fee,
        receipt.credited
    );
    msg!(
        "Total staked by user: {}",
        ctx.accounts.user_stake.position.principal
    );
    msg!("Pool total staked: {}", engine.pool().rewards.total_staked);

    Ok(())
}
