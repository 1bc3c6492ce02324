//! Authority-gated program lifecycle, parameter and treasury operations.

use anchor_lang::prelude::*;

use super::{require_owner, AssetLedger, StakingEngine};
use crate::clock::{is_expired, TimeSource};
use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::funds::EmergencyDraw;
use crate::rewards::update_global;

/// Rejects fee rates above the 10% cap.
pub fn validate_fees(staking_fee_bps: u16, unstaking_fee_bps: u16) -> Result<()> {
    require_gte!(MAX_FEE_BPS, staking_fee_bps, StakingError::FeeTooHigh);
    require_gte!(MAX_FEE_BPS, unstaking_fee_bps, StakingError::FeeTooHigh);
    Ok(())
}

pub fn validate_minimum_stake(minimum_stake: u64) -> Result<()> {
    require!(
        (MIN_MINIMUM_STAKE..=MAX_MINIMUM_STAKE).contains(&minimum_stake),
        StakingError::OutOfBounds
    );
    Ok(())
}

pub fn validate_reward_budget(reward_budget: u64) -> Result<()> {
    require!(
        (MIN_REWARD_BUDGET..=MAX_REWARD_BUDGET).contains(&reward_budget),
        StakingError::OutOfBounds
    );
    Ok(())
}

impl<'a, T: TimeSource> StakingEngine<'a, T> {
    /// Launches the reward program once deposits cover the whole budget.
    pub fn start_program(&mut self, caller: &Pubkey) -> Result<()> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;
            require!(!pool.program.active, StakingError::AlreadyActive);
            require!(!pool.program.ended, StakingError::ProgramEnded);
            require_gte!(
                pool.funds.available_reward_funds(),
                pool.program.total_reward_budget,
                StakingError::UnderfundedProgram
            );

            pool.program.active = true;
            pool.program.start_time = now;
            pool.program.end_time = now
                .checked_add(PROGRAM_DURATION)
                .ok_or(StakingError::MathOverflow)?;
            pool.rewards.last_update_time = now;

            emit!(ProgramStartedEvent {
                authority: *caller,
                reward_budget: pool.program.total_reward_budget,
                start_time: pool.program.start_time,
                end_time: pool.program.end_time,
            });
            Ok(())
        })
    }

    /// Closes the program for good.
    ///
    /// The authority may end it early; once `end_time` has passed anyone may.
    /// Accrual up to the closing instant is checkpointed first.
    pub fn end_program(&mut self, caller: &Pubkey) -> Result<()> {
        self.guarded(|pool, now| {
            require!(pool.program.active, StakingError::NotActive);
            if !is_expired(&pool.program, now) {
                require_owner(pool, caller)?;
            }

            update_global(pool, now)?;
            pool.program.active = false;
            pool.program.ended = true;
            pool.program.staking_enabled = false;

            emit!(ProgramEndedEvent {
                caller: *caller,
                reward_per_unit: pool.rewards.reward_per_unit_stored,
                timestamp: now,
            });
            Ok(())
        })
    }

    pub fn pause(&mut self, caller: &Pubkey) -> Result<()> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;
            pool.program.staking_enabled = false;

            emit!(StakingToggledEvent {
                enabled: false,
                timestamp: now,
            });
            Ok(())
        })
    }

    pub fn resume(&mut self, caller: &Pubkey) -> Result<()> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;
            require!(pool.program.active, StakingError::NotActive);
            pool.program.staking_enabled = true;

            emit!(StakingToggledEvent {
                enabled: true,
                timestamp: now,
            });
            Ok(())
        })
    }

    pub fn set_fees(
        &mut self,
        caller: &Pubkey,
        staking_fee_bps: u16,
        unstaking_fee_bps: u16,
    ) -> Result<()> {
        self.guarded(|pool, _| {
            require_owner(pool, caller)?;
            validate_fees(staking_fee_bps, unstaking_fee_bps)?;

            pool.program.staking_fee_bps = staking_fee_bps;
            pool.program.unstaking_fee_bps = unstaking_fee_bps;

            emit!(FeesUpdatedEvent {
                staking_fee_bps,
                unstaking_fee_bps,
            });
            Ok(())
        })
    }

    pub fn set_minimum_stake(&mut self, caller: &Pubkey, minimum_stake: u64) -> Result<()> {
        self.guarded(|pool, _| {
            require_owner(pool, caller)?;
            validate_minimum_stake(minimum_stake)?;

            let old_minimum = pool.program.minimum_stake;
            pool.program.minimum_stake = minimum_stake;

            emit!(MinimumStakeUpdatedEvent {
                old_minimum,
                new_minimum: minimum_stake,
            });
            Ok(())
        })
    }

    /// Budget is frozen once the program starts.
    pub fn set_reward_budget(&mut self, caller: &Pubkey, reward_budget: u64) -> Result<()> {
        self.guarded(|pool, _| {
            require_owner(pool, caller)?;
            require!(!pool.program.active, StakingError::ProgramActive);
            validate_reward_budget(reward_budget)?;

            let old_budget = pool.program.total_reward_budget;
            pool.program.total_reward_budget = reward_budget;

            emit!(RewardBudgetUpdatedEvent {
                old_budget,
                new_budget: reward_budget,
            });
            Ok(())
        })
    }

    pub fn transfer_authority(&mut self, caller: &Pubkey, new_authority: Pubkey) -> Result<()> {
        self.guarded(|pool, _| {
            require_owner(pool, caller)?;
            require!(
                new_authority != Pubkey::default(),
                StakingError::InvalidAuthority
            );

            let old_authority = pool.authority;
            pool.authority = new_authority;

            emit!(AuthorityTransferredEvent {
                old_authority,
                new_authority,
            });
            Ok(())
        })
    }

    /// Deposits exactly the configured budget. Returns the amount deposited.
    pub fn deposit_full_year<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Pubkey,
    ) -> Result<u64> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;
            let amount = pool.program.total_reward_budget;
            require!(amount > 0, StakingError::AmountZero);

            pool.funds.record_deposit(amount)?;
            ledger.transfer_in(caller, amount)?;

            emit!(RewardsDepositedEvent {
                funder: *caller,
                amount,
                reward_budget: pool.program.total_reward_budget,
                timestamp: now,
            });
            Ok(amount)
        })
    }

    /// Tops up deposits and grows the budget by the same amount.
    ///
    /// Accrual up to now is checkpointed at the old rate before the budget
    /// changes.
    pub fn add_rewards<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;
            require!(amount > 0, StakingError::AmountZero);

            update_global(pool, now)?;
            pool.funds.record_deposit(amount)?;
            pool.program.total_reward_budget = pool
                .program
                .total_reward_budget
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;
            ledger.transfer_in(caller, amount)?;

            emit!(RewardsDepositedEvent {
                funder: *caller,
                amount,
                reward_budget: pool.program.total_reward_budget,
                timestamp: now,
            });
            Ok(())
        })
    }

    /// Sends every collected fee to the authority. Returns the amount sent.
    pub fn withdraw_fees<L: AssetLedger>(&mut self, ledger: &mut L, caller: &Pubkey) -> Result<u64> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;

            let amount = pool.funds.withdraw_fees()?;
            ledger.transfer_out(caller, amount)?;

            emit!(FeesWithdrawnEvent {
                authority: *caller,
                amount,
                timestamp: now,
            });
            Ok(amount)
        })
    }

    /// Pulls fees, then unreserved reward deposits, back to the authority.
    ///
    /// Whatever comes out of deposits also comes off the budget, which lowers
    /// the emission rate from this instant on.
    pub fn emergency_withdraw<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Pubkey,
        amount: u64,
    ) -> Result<EmergencyDraw> {
        self.guarded(|pool, now| {
            require_owner(pool, caller)?;
            require!(amount > 0, StakingError::AmountZero);

            update_global(pool, now)?;
            let draw = pool
                .funds
                .emergency_withdraw(amount, &mut pool.program.total_reward_budget)?;
            ledger.transfer_out(caller, amount)?;

            emit!(EmergencyWithdrawEvent {
                authority: *caller,
                amount,
                from_fees: draw.from_fees,
                from_rewards: draw.from_rewards,
                reward_budget: pool.program.total_reward_budget,
                timestamp: now,
            });
            Ok(draw)
        })
    }
}
