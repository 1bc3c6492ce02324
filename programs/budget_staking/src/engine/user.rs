//! Staker operations: entry, exit and reward claims.

use anchor_lang::prelude::*;

use super::{AssetLedger, StakingEngine};
use crate::clock::{is_expired, TimeSource};
use crate::error::StakingError;
use crate::events::{ClaimEvent, StakeEvent, UnstakeEvent};
use crate::math::bps_of;
use crate::rewards::checkpoint;
use crate::state::StakePosition;

/// Outcome of a stake: `fee + credited == amount`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakeReceipt {
    pub amount: u64,
    pub fee: u64,
    pub credited: u64,
}

/// Outcome of an unstake: `fee + net_return == amount`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnstakeReceipt {
    pub amount: u64,
    pub fee: u64,
    pub net_return: u64,
}

impl<'a, T: TimeSource> StakingEngine<'a, T> {
    /// Locks `amount` from `user`, crediting it net of the staking fee.
    pub fn stake<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        user: &Pubkey,
        position: &mut StakePosition,
        amount: u64,
    ) -> Result<StakeReceipt> {
        let mut working = *position;
        let receipt = self.guarded(|pool, now| {
            require!(amount > 0, StakingError::AmountZero);
            require!(
                pool.program.active && !is_expired(&pool.program, now),
                StakingError::ProgramNotActive
            );
            require!(pool.program.staking_enabled, StakingError::StakingDisabled);
            require_gte!(amount, pool.program.minimum_stake, StakingError::BelowMinimum);

            checkpoint(pool, &mut working, now)?;

            let fee = bps_of(amount, pool.program.staking_fee_bps)?;
            let credited = amount - fee;

            if working.principal == 0 {
                pool.staker_count = pool
                    .staker_count
                    .checked_add(1)
                    .ok_or(StakingError::MathOverflow)?;
            }
            working.principal = working
                .principal
                .checked_add(credited)
                .ok_or(StakingError::MathOverflow)?;
            pool.rewards.total_staked = pool
                .rewards
                .total_staked
                .checked_add(credited)
                .ok_or(StakingError::MathOverflow)?;
            pool.funds.record_fee_collected(fee)?;

            ledger.transfer_in(user, amount)?;

            emit!(StakeEvent {
                user: *user,
                amount,
                fee,
                principal: working.principal,
                timestamp: now,
            });
            Ok(StakeReceipt {
                amount,
                fee,
                credited,
            })
        })?;

        *position = working;
        Ok(receipt)
    }

    /// Returns `amount` of principal to `user`, less the unstaking fee.
    ///
    /// Exit stays open when staking is paused and after the program ends.
    pub fn unstake<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        user: &Pubkey,
        position: &mut StakePosition,
        amount: u64,
    ) -> Result<UnstakeReceipt> {
        let mut working = *position;
        let receipt = self.guarded(|pool, now| {
            require!(amount > 0, StakingError::AmountZero);
            require_gte!(working.principal, amount, StakingError::InsufficientStake);

            checkpoint(pool, &mut working, now)?;

            let fee = bps_of(amount, pool.program.unstaking_fee_bps)?;
            let net_return = amount - fee;
            pool.funds
                .check_unstake_liquidity(ledger.balance()?, net_return)?;

            working.principal -= amount;
            if working.principal == 0 {
                pool.staker_count = pool.staker_count.saturating_sub(1);
            }
            pool.rewards.total_staked = pool
                .rewards
                .total_staked
                .checked_sub(amount)
                .ok_or(StakingError::MathOverflow)?;
            pool.funds.record_fee_collected(fee)?;

            ledger.transfer_out(user, net_return)?;

            emit!(UnstakeEvent {
                user: *user,
                amount,
                fee,
                net_return,
                timestamp: now,
            });
            Ok(UnstakeReceipt {
                amount,
                fee,
                net_return,
            })
        })?;

        *position = working;
        Ok(receipt)
    }

    /// Pays out everything the position has accrued. Returns the amount paid.
    pub fn claim_reward<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        user: &Pubkey,
        position: &mut StakePosition,
    ) -> Result<u64> {
        let mut working = *position;
        let amount = self.guarded(|pool, now| {
            checkpoint(pool, &mut working, now)?;

            let amount = working.pending_reward;
            require_gt!(amount, 0, StakingError::NothingToClaim);
            pool.funds.record_claim(amount)?;

            working.pending_reward = 0;
            working.total_claimed = working
                .total_claimed
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;

            ledger.transfer_out(user, amount)?;

            emit!(ClaimEvent {
                user: *user,
                amount,
                total_claimed: working.total_claimed,
                timestamp: now,
            });
            Ok(amount)
        })?;

        *position = working;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::state::{ProgramConfig, StakePool};

    const NOW: i64 = 1_700_000_000;

    /// Vault that tracks its balance and can be told to reject transfers.
    #[derive(Default)]
    struct Vault {
        balance: u64,
        reject: bool,
    }

    impl AssetLedger for Vault {
        fn transfer_in(&mut self, _from: &Pubkey, amount: u64) -> Result<()> {
            require!(!self.reject, StakingError::TransferFailed);
            self.balance += amount;
            Ok(())
        }

        fn transfer_out(&mut self, _to: &Pubkey, amount: u64) -> Result<()> {
            require!(!self.reject, StakingError::TransferFailed);
            require_gte!(self.balance, amount, StakingError::TransferFailed);
            self.balance -= amount;
            Ok(())
        }

        fn balance(&self) -> Result<u64> {
            Ok(self.balance)
        }
    }

    /// Funded, running pool with the default parameters.
    fn running_pool(vault: &mut Vault) -> StakePool {
        let mut pool = StakePool::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            ProgramConfig {
                active: true,
                staking_enabled: true,
                start_time: NOW,
                end_time: NOW + PROGRAM_DURATION,
                total_reward_budget: DEFAULT_REWARD_BUDGET,
                minimum_stake: DEFAULT_MINIMUM_STAKE,
                staking_fee_bps: DEFAULT_STAKING_FEE_BPS,
                unstaking_fee_bps: DEFAULT_UNSTAKING_FEE_BPS,
                ..ProgramConfig::default()
            },
            NOW,
        );
        pool.funds.reward_deposits = DEFAULT_REWARD_BUDGET;
        vault.balance = DEFAULT_REWARD_BUDGET;
        pool
    }

    #[test]
    fn test_stake_takes_fee() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();

        let receipt = StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();

        assert_eq!(receipt.fee, 10 * TOKEN_UNIT);
        assert_eq!(receipt.credited, 990 * TOKEN_UNIT);
        assert_eq!(position.principal, 990 * TOKEN_UNIT);
        assert_eq!(pool.rewards.total_staked, 990 * TOKEN_UNIT);
        assert_eq!(pool.funds.fees_collected, 10 * TOKEN_UNIT);
        assert_eq!(pool.staker_count, 1);
        assert_eq!(vault.balance, DEFAULT_REWARD_BUDGET + 1_000 * TOKEN_UNIT);
    }

    #[test]
    fn test_stake_rejections() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();

        let mut engine = StakingEngine::new(&mut pool, NOW);
        assert_eq!(
            engine.stake(&mut vault, &user, &mut position, 0).unwrap_err(),
            StakingError::AmountZero.into()
        );
        assert_eq!(
            engine
                .stake(&mut vault, &user, &mut position, DEFAULT_MINIMUM_STAKE - 1)
                .unwrap_err(),
            StakingError::BelowMinimum.into()
        );

        pool.program.staking_enabled = false;
        assert_eq!(
            StakingEngine::new(&mut pool, NOW)
                .stake(&mut vault, &user, &mut position, DEFAULT_MINIMUM_STAKE)
                .unwrap_err(),
            StakingError::StakingDisabled.into()
        );

        pool.program.staking_enabled = true;
        assert_eq!(
            StakingEngine::new(&mut pool, NOW + PROGRAM_DURATION)
                .stake(&mut vault, &user, &mut position, DEFAULT_MINIMUM_STAKE)
                .unwrap_err(),
            StakingError::ProgramNotActive.into()
        );
        assert_eq!(position, StakePosition::default());
    }

    #[test]
    fn test_failed_transfer_leaves_no_trace() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let before = pool.clone();
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();

        vault.reject = true;
        let result = StakingEngine::new(&mut pool, NOW + 60).stake(
            &mut vault,
            &user,
            &mut position,
            DEFAULT_MINIMUM_STAKE,
        );

        assert_eq!(result.unwrap_err(), StakingError::TransferFailed.into());
        assert_eq!(position, StakePosition::default());
        assert_eq!(pool.rewards, before.rewards);
        assert_eq!(pool.funds, before.funds);
        assert_eq!(pool.staker_count, 0);
        assert!(!pool.reentrancy_lock);
    }

    #[test]
    fn test_unstake_returns_net() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();
        StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();

        let mut engine = StakingEngine::new(&mut pool, NOW + 10);
        assert_eq!(
            engine
                .unstake(&mut vault, &user, &mut position, 991 * TOKEN_UNIT)
                .unwrap_err(),
            StakingError::InsufficientStake.into()
        );
        let receipt = engine
            .unstake(&mut vault, &user, &mut position, 990 * TOKEN_UNIT)
            .unwrap();

        assert_eq!(receipt.fee, 99 * TOKEN_UNIT / 10);
        assert_eq!(receipt.net_return, 990 * TOKEN_UNIT - 99 * TOKEN_UNIT / 10);
        assert_eq!(position.principal, 0);
        assert!(position.pending_reward > 0);
        assert_eq!(pool.rewards.total_staked, 0);
        assert_eq!(pool.staker_count, 0);
        assert_eq!(pool.funds.fees_collected, 10 * TOKEN_UNIT + 99 * TOKEN_UNIT / 10);
    }

    #[test]
    fn test_unstake_rejects_zero() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();
        StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();
        let before = position;

        assert_eq!(
            StakingEngine::new(&mut pool, NOW + 10)
                .unstake(&mut vault, &user, &mut position, 0)
                .unwrap_err(),
            StakingError::AmountZero.into()
        );
        assert_eq!(position, before);
        assert_eq!(pool.rewards.total_staked, 990 * TOKEN_UNIT);
        assert_eq!(pool.rewards.last_update_time, NOW);
    }

    #[test]
    fn test_unstake_protects_reserves() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();
        StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();

        // principal leaked out of the vault behind the ledger's back
        vault.balance -= 500 * TOKEN_UNIT;

        assert_eq!(
            StakingEngine::new(&mut pool, NOW + 10)
                .unstake(&mut vault, &user, &mut position, 990 * TOKEN_UNIT)
                .unwrap_err(),
            StakingError::InsufficientLiquidity.into()
        );
        assert_eq!(position.principal, 990 * TOKEN_UNIT);
        assert_eq!(position.pending_reward, 0);
    }

    #[test]
    fn test_unstake_allowed_while_paused() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();
        StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();

        pool.program.staking_enabled = false;
        StakingEngine::new(&mut pool, NOW + 10)
            .unstake(&mut vault, &user, &mut position, 100 * TOKEN_UNIT)
            .unwrap();
        assert_eq!(position.principal, 890 * TOKEN_UNIT);
    }

    #[test]
    fn test_claim_pays_pending() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();
        StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();

        let expected = StakingEngine::new(&mut pool, NOW + SECONDS_PER_DAY)
            .user_info(&position)
            .unwrap()
            .pending_reward;
        let paid = StakingEngine::new(&mut pool, NOW + SECONDS_PER_DAY)
            .claim_reward(&mut vault, &user, &mut position)
            .unwrap();

        assert!(paid > 0);
        assert_eq!(paid, expected);
        assert_eq!(position.pending_reward, 0);
        assert_eq!(position.total_claimed, paid);
        assert_eq!(pool.funds.rewards_claimed, paid);

        assert_eq!(
            StakingEngine::new(&mut pool, NOW + SECONDS_PER_DAY)
                .claim_reward(&mut vault, &user, &mut position)
                .unwrap_err(),
            StakingError::NothingToClaim.into()
        );
    }

    #[test]
    fn test_claim_bounded_by_deposits() {
        let mut vault = Vault::default();
        let mut pool = running_pool(&mut vault);
        let user = Pubkey::new_unique();
        let mut position = StakePosition::default();
        StakingEngine::new(&mut pool, NOW)
            .stake(&mut vault, &user, &mut position, 1_000 * TOKEN_UNIT)
            .unwrap();

        pool.funds.rewards_claimed = DEFAULT_REWARD_BUDGET;

        assert_eq!(
            StakingEngine::new(&mut pool, NOW + SECONDS_PER_DAY)
                .claim_reward(&mut vault, &user, &mut position)
                .unwrap_err(),
            StakingError::InsufficientRewardFunds.into()
        );
        assert_eq!(position.pending_reward, 0);
        assert_eq!(pool.rewards.last_update_time, NOW);
    }
}
