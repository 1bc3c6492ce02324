/// Treasury instruction handlers.
///
/// Handles reward deposits and owner withdrawals against the pool vault.
///
/// ## Security Guarantees
/// - Only pool.authority can move owner funds
/// - Vault validation ensures correct PDA
/// - Mint validation prevents wrong token deposits
/// - Withdrawals never touch principal or reserved rewards
/// - A rejected token transfer aborts the transaction with the SPL token
///   program's error rather than `TransferFailed`

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::clock::SysvarClock;
use crate::constants::*;
use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::instructions::vault::TokenVault;
use crate::state::StakePool;

/// Accounts required for moving owner funds in or out of the vault.
///
/// ## Security Notes
/// - Authority must match pool.authority
/// - Vault must match the pool's vault and be owned by the pool PDA
/// - Authority token account must be for the pool mint
#[derive(Accounts)]
pub struct OwnerTreasury<'info> {
    /// The pool authority.
    #[account(
        mut,
        constraint = authority.key() == stake_pool.authority @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The stake pool.
    /// SECURITY: PDA + has_one validations.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = authority @ StakingError::Unauthorized,
        has_one = pool_vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// Authority's token account.
    /// SECURITY: Mint and owner validation.
    #[account(
        mut,
        constraint = authority_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = authority_token_account.owner == authority.key() @ StakingError::Unauthorized
    )]
    pub authority_token_account: Account<'info, TokenAccount>,

    /// Pool's vault.
    /// SECURITY: Must match pool's stored vault + owner validation.
    #[account(
        mut,
        constraint = pool_vault.owner == stake_pool.key() @ StakingError::InvalidVaultOwner,
        constraint = pool_vault.mint == staking_mint.key() @ StakingError::InvalidTokenAccountMint
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> OwnerTreasury<'info> {
    fn token_vault(&self) -> TokenVault<'info> {
        TokenVault::new(
            self.token_program.to_account_info(),
            self.pool_vault.to_account_info(),
            self.stake_pool.to_account_info(),
            self.stake_pool.staking_mint,
            self.stake_pool.bump,
            self.authority_token_account.to_account_info(),
            self.authority.to_account_info(),
        )
    }
}

/// Deposit exactly one full program budget of rewards.
pub fn deposit_full_year_handler(ctx: Context<OwnerTreasury>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut vault = ctx.accounts.token_vault();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    let amount = engine.deposit_full_year(&mut vault, &authority)?;

    msg!("Reward deposit: {}", amount);
    msg!(
        "Available reward funds: {}",
        engine.pool().funds.available_reward_funds()
    );
    msg!("Funder: {}", authority);

    Ok(())
}

/// Deposit extra rewards, growing the budget by the same amount.
pub fn add_rewards_handler(ctx: Context<OwnerTreasury>, amount: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut vault = ctx.accounts.token_vault();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    engine.add_rewards(&mut vault, &authority, amount)?;

    msg!("Rewards added: {}", amount);
    msg!("New reward budget: {}", engine.pool().program.total_reward_budget);
    msg!("Funder: {}", authority);

    Ok(())
}

/// Withdraw every collected fee to the authority.
pub fn withdraw_fees_handler(ctx: Context<OwnerTreasury>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut vault = ctx.accounts.token_vault();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    let amount = engine.withdraw_fees(&mut vault, &authority)?;

    msg!("Fees withdrawn: {}", amount);
    msg!("Total owner withdrawals: {}", engine.pool().funds.owner_withdrawals);
    msg!("Admin: {}", authority);

    Ok(())
}

/// Withdraw fees and unreserved reward deposits.
///
/// # Security
/// - Only pool.authority can call this
/// - Bounded by fees + deposits not yet claimed; principal is never touched
/// - Reward deposits withdrawn reduce the budget in lockstep
pub fn emergency_withdraw_handler(ctx: Context<OwnerTreasury>, amount: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut vault = ctx.accounts.token_vault();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    let draw = engine.emergency_withdraw(&mut vault, &authority, amount)?;

    msg!(
        "Emergency withdrawal: {} (fees {}, rewards {})",
        amount,
        draw.from_fees,
        draw.from_rewards
    );
    msg!("Remaining reward budget: {}", engine.pool().program.total_reward_budget);
    msg!("Admin: {}", authority);

    Ok(())
}
