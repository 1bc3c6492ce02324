/// Initialize instruction handler.
///
/// Creates and configures a new staking pool with security validations.
///
/// ## Security Guarantees
/// - The single pool vault is a PDA owned by the stake pool
/// - Mint address is locked to pool state permanently
/// - All parameters validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::engine::{validate_fees, validate_minimum_stake, validate_reward_budget};
use crate::error::StakingError;
use crate::state::{ProgramConfig, StakePool};

/// Accounts required for pool initialization.
///
/// ## Security Notes
/// - `pool_vault` is a PDA with `stake_pool` as token authority
/// - Seeds ensure the vault cannot be swapped or replaced
/// - Mint is validated and locked to pool state
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will control the pool.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The stake pool account to be created.
    /// SECURITY: PDA derived from STAKE_POOL_SEED + mint ensures uniqueness per token.
    #[account(
        init,
        payer = authority,
        space = StakePool::LEN,
        seeds = [STAKE_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The mint for the staking token.
    pub staking_mint: Account<'info, Mint>,

    /// The vault holding principal, reward deposits and fees.
    /// SECURITY:
    /// - PDA derived from POOL_VAULT_SEED + stake_pool
    /// - Authority set to stake_pool PDA (cannot be changed)
    /// - Mint validated to match staking_mint
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new staking pool.
///
/// The pool starts inactive with staking enabled; the reward program is
/// launched later by `start_program` once the budget is deposited.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `reward_budget` - Rewards distributed over the program duration
/// * `minimum_stake` - Smallest accepted stake
/// * `staking_fee_bps` - Entry fee (basis points)
/// * `unstaking_fee_bps` - Exit fee (basis points)
///
/// # Returns
/// Result indicating success or error
pub fn handler(
    ctx: Context<Initialize>,
    reward_budget: u64,
    minimum_stake: u64,
    staking_fee_bps: u16,
    unstaking_fee_bps: u16,
) -> Result<()> {
    // === INPUT VALIDATION ===

    validate_reward_budget(reward_budget)?;
    validate_minimum_stake(minimum_stake)?;
    validate_fees(staking_fee_bps, unstaking_fee_bps)?;

    require!(
        ctx.accounts.pool_vault.owner == ctx.accounts.stake_pool.key(),
        StakingError::InvalidVaultOwner
    );
    require!(
        ctx.accounts.pool_vault.mint == ctx.accounts.staking_mint.key(),
        StakingError::InvalidTokenAccountMint
    );

    // === STATE INITIALIZATION ===

    let clock = Clock::get()?;
    let program = ProgramConfig {
        staking_enabled: true,
        total_reward_budget: reward_budget,
        minimum_stake,
        staking_fee_bps,
        unstaking_fee_bps,
        ..ProgramConfig::default()
    };

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.set_inner(StakePool::new(
        ctx.accounts.authority.key(),
        ctx.accounts.staking_mint.key(),
        ctx.accounts.pool_vault.key(),
        program,
        clock.unix_timestamp,
    ));
    stake_pool.bump = ctx.bumps.stake_pool;
    stake_pool.vault_bump = ctx.bumps.pool_vault;

    msg!("Budget Staking Pool initialized successfully");
    msg!("Admin: {}", ctx.accounts.authority.key());
    msg!("Mint: {}", ctx.accounts.staking_mint.key());
    msg!("Reward budget: {}", reward_budget);
    msg!("Minimum stake: {}", minimum_stake);
    msg!(
        "Fees - Stake: {}bp, Unstake: {}bp",
        staking_fee_bps,
        unstaking_fee_bps
    );

    Ok(())
}
