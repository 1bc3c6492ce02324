//! # Budget Staking Program
//!
//! A single-token staking program that spreads a fixed reward budget over a
//! one-year program, pro-rata to each staker's share of the pool.
//!
//! ## Features
//! - Per-second reward accrual through a global reward-per-unit accumulator
//! - Staking and unstaking fees collected for the owner
//! - Reward deposits tracked separately from principal and fees
//! - Unstaking always open, even while paused or after the program ends
//! - Owner withdrawals that never touch principal or reserved rewards
//! - Reentrancy guard and all-or-nothing state updates

use anchor_lang::prelude::*;

declare_id!("2YXgHp1xnS7QZ61cYAGsY7ZwjqCW826Wpveh6C8DSNg8");

pub mod clock;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod funds;
pub mod instructions;
pub mod math;
pub mod rewards;
pub mod state;

use engine::{PoolInfo, UserInfo};
use instructions::*;

#[program]
pub mod budget_staking {
    use super::*;

    /// Initializes the staking pool with the given parameters.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `reward_budget` - Total rewards distributed over the program year
    /// * `minimum_stake` - Smallest accepted stake amount
    /// * `staking_fee_bps` - Entry fee (in basis points, e.g., 100 = 1%)
    /// * `unstaking_fee_bps` - Exit fee (in basis points)
    ///
    /// # Errors
    /// Returns an error if any parameter is outside its bounds.
    pub fn initialize(
        ctx: Context<Initialize>,
        reward_budget: u64,
        minimum_stake: u64,
        staking_fee_bps: u16,
        unstaking_fee_bps: u16,
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            reward_budget,
            minimum_stake,
            staking_fee_bps,
            unstaking_fee_bps,
        )
    }

    /// Stakes tokens into the pool, net of the staking fee.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero or below the minimum stake
    /// - The program is not running
    /// - Staking is paused
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstakes principal, returning it less the unstaking fee.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero or exceeds the staked balance
    /// - The vault cannot cover the return without touching reserves
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, amount)
    }

    /// Claims accumulated rewards without unstaking.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No rewards are pending
    /// - Deposited reward funds cannot cover the claim
    pub fn claim_reward(ctx: Context<ClaimReward>) -> Result<()> {
        instructions::claim_reward::handler(ctx)
    }

    /// Admin function to start the one-year reward program.
    ///
    /// # Errors
    /// Returns an error if the program already ran or rewards are underfunded.
    pub fn start_program(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::start_program_handler(ctx)
    }

    /// Ends the reward program. Anyone may call this once it has expired.
    pub fn end_program(ctx: Context<EndProgram>) -> Result<()> {
        instructions::admin::end_program_handler(ctx)
    }

    /// Admin function to pause new stakes.
    pub fn pause(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::pause_handler(ctx)
    }

    /// Admin function to re-enable staking on a running program.
    pub fn resume(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::resume_handler(ctx)
    }

    /// Admin function to set staking and unstaking fees.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - Either fee exceeds the maximum
    pub fn set_fees(
        ctx: Context<AdminControl>,
        staking_fee_bps: u16,
        unstaking_fee_bps: u16,
    ) -> Result<()> {
        instructions::admin::set_fees_handler(ctx, staking_fee_bps, unstaking_fee_bps)
    }

    /// Admin function to set the minimum stake.
    pub fn set_minimum_stake(ctx: Context<AdminControl>, minimum_stake: u64) -> Result<()> {
        instructions::admin::set_minimum_stake_handler(ctx, minimum_stake)
    }

    /// Admin function to set the reward budget before the program starts.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - The program is already running
    /// - Budget is outside its bounds
    pub fn set_reward_budget(ctx: Context<AdminControl>, reward_budget: u64) -> Result<()> {
        instructions::admin::set_reward_budget_handler(ctx, reward_budget)
    }

    /// Admin function to transfer authority to a new address.
    pub fn transfer_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }

    /// Deposits exactly one reward budget into the vault.
    pub fn deposit_full_year(ctx: Context<OwnerTreasury>) -> Result<()> {
        instructions::treasury::deposit_full_year_handler(ctx)
    }

    /// Deposits extra rewards and grows the budget by the same amount.
    pub fn add_rewards(ctx: Context<OwnerTreasury>, amount: u64) -> Result<()> {
        instructions::treasury::add_rewards_handler(ctx, amount)
    }

    /// Withdraws every collected fee to the admin.
    pub fn withdraw_fees(ctx: Context<OwnerTreasury>) -> Result<()> {
        instructions::treasury::withdraw_fees_handler(ctx)
    }

    /// Withdraws owner funds, fees first, then unreserved reward deposits.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - Amount is zero or exceeds the owner's available funds
    pub fn emergency_withdraw(ctx: Context<OwnerTreasury>, amount: u64) -> Result<()> {
        instructions::treasury::emergency_withdraw_handler(ctx, amount)
    }

    /// Returns a snapshot of the pool, rewards and funds.
    pub fn get_pool_info(ctx: Context<ViewPool>) -> Result<PoolInfo> {
        instructions::views::pool_info_handler(ctx)
    }

    /// Returns a staker's principal, pending reward and claimed total.
    pub fn get_user_info(ctx: Context<ViewUser>) -> Result<UserInfo> {
        instructions::views::user_info_handler(ctx)
    }
}
