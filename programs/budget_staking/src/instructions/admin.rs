/// Admin instruction handlers.
///
/// Handles program lifecycle and parameter changes for the staking pool.
///
/// ## Security Guarantees
/// - All admin functions require signer == pool.authority
/// - PDA validation ensures correct pool
/// - Parameter bounds checking
/// - Expired programs may be ended by anyone

use anchor_lang::prelude::*;

use crate::clock::SysvarClock;
use crate::constants::*;
use crate::engine::StakingEngine;
use crate::error::StakingError;
use crate::state::StakePool;

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority must match stake_pool.authority (has_one constraint)
/// - Pool PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    /// SECURITY: Must be signer AND match pool.authority.
    #[account(
        mut,
        constraint = authority.key() == stake_pool.authority @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The stake pool to modify.
    /// SECURITY: PDA validation + has_one authority.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = authority @ StakingError::Unauthorized
    )]
    pub stake_pool: Account<'info, StakePool>,
}

/// Accounts required for ending the reward program.
///
/// The caller is checked by the engine: the authority may end the program at
/// any time, anyone else only after it has expired.
#[derive(Accounts)]
pub struct EndProgram<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,
}

/// Start the reward program.
///
/// # Security
/// - Only pool.authority can call this
/// - Deposited rewards must cover the full budget
/// - Budget and duration are frozen from here on
pub fn start_program_handler(ctx: Context<AdminControl>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);
    engine.start_program(&authority)?;

    let program = engine.pool().program;
    msg!(
        "Reward program started: {} -> {}",
        program.start_time,
        program.end_time
    );
    msg!("Reward budget: {}", program.total_reward_budget);
    msg!("Admin: {}", authority);

    Ok(())
}

/// End the reward program.
///
/// Accrual up to now is checkpointed, then staking closes for good. Unstaking
/// and claiming remain available.
pub fn end_program_handler(ctx: Context<EndProgram>) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);
    engine.end_program(&caller)?;

    msg!(
        "Reward program ended, reward per unit: {}",
        engine.pool().rewards.reward_per_unit_stored
    );
    msg!("Caller: {}", caller);

    Ok(())
}

/// Pause new stakes.
///
/// # Security
/// - Only pool.authority can call this
/// - Unstaking and claiming remain available (user funds not locked)
pub fn pause_handler(ctx: Context<AdminControl>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);
    engine.pause(&authority)?;

    msg!("Staking PAUSED");
    msg!("Admin: {}", authority);

    Ok(())
}

/// Resume new stakes. Requires an active program.
pub fn resume_handler(ctx: Context<AdminControl>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);
    engine.resume(&authority)?;

    msg!("Staking RESUMED");
    msg!("Admin: {}", authority);

    Ok(())
}

/// Set staking and unstaking fees.
///
/// # Security
/// - Only pool.authority can call this
/// - Each fee capped at MAX_FEE_BPS (10%)
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `staking_fee_bps` - New entry fee (basis points)
/// * `unstaking_fee_bps` - New exit fee (basis points)
pub fn set_fees_handler(
    ctx: Context<AdminControl>,
    staking_fee_bps: u16,
    unstaking_fee_bps: u16,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    let old = engine.pool().program;
    engine.set_fees(&authority, staking_fee_bps, unstaking_fee_bps)?;

    msg!(
        "Fees updated - Old: Stake={}bp, Unstake={}bp",
        old.staking_fee_bps,
        old.unstaking_fee_bps
    );
    msg!(
        "New fees - Stake={}bp, Unstake={}bp",
        staking_fee_bps,
        unstaking_fee_bps
    );
    msg!("Admin: {}", authority);

    Ok(())
}

/// Set the minimum stake.
///
/// # Security
/// - Only pool.authority can call this
/// - Value bounded by MIN_MINIMUM_STAKE..=MAX_MINIMUM_STAKE
pub fn set_minimum_stake_handler(ctx: Context<AdminControl>, minimum_stake: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    let old_minimum = engine.pool().program.minimum_stake;
    engine.set_minimum_stake(&authority, minimum_stake)?;

    msg!("Minimum stake updated: {} -> {}", old_minimum, minimum_stake);
    msg!("Admin: {}", authority);

    Ok(())
}

/// Set the reward budget before launch.
///
/// # Security
/// - Only pool.authority can call this
/// - Frozen once the program is active
/// - Value bounded by MIN_REWARD_BUDGET..=MAX_REWARD_BUDGET
pub fn set_reward_budget_handler(ctx: Context<AdminControl>, reward_budget: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);

    let old_budget = engine.pool().program.total_reward_budget;
    engine.set_reward_budget(&authority, reward_budget)?;

    msg!("Reward budget updated: {} -> {}", old_budget, reward_budget);
    msg!(
        "Reward rate: {} per second over {} seconds",
        reward_budget / PROGRAM_DURATION as u64,
        PROGRAM_DURATION
    );
    msg!("Admin: {}", authority);

    Ok(())
}

/// Transfer admin authority to a new address.
///
/// # Security
/// - Only current authority can call this
/// - New authority must be a valid pubkey (non-zero)
pub fn transfer_authority_handler(
    ctx: Context<AdminControl>,
    new_authority: Pubkey,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let mut engine = StakingEngine::new(&mut ctx.accounts.stake_pool, SysvarClock);
    engine.transfer_authority(&authority, new_authority)?;

    msg!("Authority transferred: {} -> {}", authority, new_authority);

    Ok(())
}
