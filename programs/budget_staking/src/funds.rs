//! Funds bookkeeping and solvency bounds.
//!
//! Principal, reward deposits and fees share one vault. The partition is
//! purely logical, so every outflow is bounded here before tokens move.

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::state::FundsLedger;

/// How an emergency withdrawal was sourced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmergencyDraw {
    pub from_fees: u64,
    pub from_rewards: u64,
}

impl FundsLedger {
    /// Deposited rewards not yet paid out.
    pub fn available_reward_funds(&self) -> u64 {
        self.reward_deposits.saturating_sub(self.rewards_claimed)
    }

    pub fn available_owner_funds(&self) -> Result<u64> {
        Ok(self
            .fees_collected
            .checked_add(self.available_reward_funds())
            .ok_or(StakingError::MathOverflow)?)
    }

    /// Vault balance reserved for rewards and fees.
    pub fn reserved(&self) -> Result<u64> {
        self.available_owner_funds()
    }

    /// Part of `vault_balance` that principal withdrawals may draw on.
    pub fn available_for_unstake(&self, vault_balance: u64) -> Result<u64> {
        Ok(vault_balance.saturating_sub(self.reserved()?))
    }

    pub fn check_unstake_liquidity(&self, vault_balance: u64, net_return: u64) -> Result<()> {
        let available = self.available_for_unstake(vault_balance)?;
        require_gte!(available, net_return, StakingError::InsufficientLiquidity);
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64) -> Result<()> {
        self.reward_deposits = self
            .reward_deposits
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn record_fee_collected(&mut self, amount: u64) -> Result<()> {
        self.fees_collected = self
            .fees_collected
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        require_gte!(
            self.available_reward_funds(),
            amount,
            StakingError::InsufficientRewardFunds
        );
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    /// Moves the whole fee balance to the owner and returns it.
    pub fn withdraw_fees(&mut self) -> Result<u64> {
        let amount = self.fees_collected;
        require_gt!(amount, 0, StakingError::NothingToWithdraw);

        self.owner_withdrawals = self
            .owner_withdrawals
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.fees_collected = 0;

        Ok(amount)
    }

    /// Releases `amount` to the owner, fees first, then unreserved reward
    /// deposits. `reward_budget` shrinks by whatever is taken from deposits.
    pub fn emergency_withdraw(
        &mut self,
        amount: u64,
        reward_budget: &mut u64,
    ) -> Result<EmergencyDraw> {
        require_gte!(
            self.available_owner_funds()?,
            amount,
            StakingError::InsufficientOwnerFunds
        );

        let from_fees = amount.min(self.fees_collected);
        let from_rewards = amount - from_fees;

        self.fees_collected -= from_fees;
        self.reward_deposits = self
            .reward_deposits
            .checked_sub(from_rewards)
            .ok_or(StakingError::MathOverflow)?;
        *reward_budget = reward_budget.saturating_sub(from_rewards);
        self.owner_withdrawals = self
            .owner_withdrawals
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(EmergencyDraw {
            from_fees,
            from_rewards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(deposits: u64, claimed: u64, fees: u64) -> FundsLedger {
        FundsLedger {
            reward_deposits: deposits,
            rewards_claimed: claimed,
            fees_collected: fees,
            owner_withdrawals: 0,
        }
    }

    #[test]
    fn test_available_funds() {
        let funds = funded(1_000, 400, 50);
        assert_eq!(funds.available_reward_funds(), 600);
        assert_eq!(funds.available_owner_funds().unwrap(), 650);

        // over-claimed ledgers clamp at zero
        assert_eq!(funded(100, 150, 0).available_reward_funds(), 0);
    }

    #[test]
    fn test_record_claim_bounded_by_deposits() {
        let mut funds = funded(1_000, 0, 0);
        funds.record_claim(600).unwrap();
        assert_eq!(
            funds.record_claim(401).unwrap_err(),
            StakingError::InsufficientRewardFunds.into()
        );
        assert_eq!(funds.rewards_claimed, 600);
        funds.record_claim(400).unwrap();
        assert_eq!(funds.available_reward_funds(), 0);
    }

    #[test]
    fn test_withdraw_fees() {
        let mut funds = funded(0, 0, 75);
        assert_eq!(funds.withdraw_fees().unwrap(), 75);
        assert_eq!(funds.fees_collected, 0);
        assert_eq!(funds.owner_withdrawals, 75);
        assert_eq!(
            funds.withdraw_fees().unwrap_err(),
            StakingError::NothingToWithdraw.into()
        );
    }

    #[test]
    fn test_emergency_withdraw_draws_fees_first() {
        let mut funds = funded(1_000, 200, 100);
        let mut budget = 1_000;

        let draw = funds.emergency_withdraw(150, &mut budget).unwrap();

        assert_eq!(draw, EmergencyDraw { from_fees: 100, from_rewards: 50 });
        assert_eq!(funds.fees_collected, 0);
        assert_eq!(funds.reward_deposits, 950);
        assert_eq!(budget, 950);
        assert_eq!(funds.owner_withdrawals, 150);
    }

    #[test]
    fn test_emergency_withdraw_bounded_by_owner_funds() {
        let mut funds = funded(1_000, 200, 100);
        let mut budget = 1_000;

        assert_eq!(
            funds.emergency_withdraw(901, &mut budget).unwrap_err(),
            StakingError::InsufficientOwnerFunds.into()
        );
        assert_eq!(funds, funded(1_000, 200, 100));

        funds.emergency_withdraw(900, &mut budget).unwrap();
        assert_eq!(funds.fees_collected, 0);
        assert_eq!(funds.available_reward_funds(), 0);
    }

    #[test]
    fn test_unstake_liquidity_protects_reserves() {
        let funds = funded(1_000, 0, 100);
        // 5_000 principal + 1_000 rewards + 100 fees
        let balance = 6_100;

        assert_eq!(funds.available_for_unstake(balance).unwrap(), 5_000);
        funds.check_unstake_liquidity(balance, 5_000).unwrap();
        assert_eq!(
            funds.check_unstake_liquidity(balance, 5_001).unwrap_err(),
            StakingError::InsufficientLiquidity.into()
        );
    }
}
