use anchor_lang::prelude::*;

// Program lifecycle
#[event]
pub struct ProgramStartedEvent {
    pub authority: Pubkey,
    pub reward_budget: u64,
    pub start_time: i64,
    pub end_time: i64,
}

#[event]
pub struct ProgramEndedEvent {
    pub caller: Pubkey,
    pub reward_per_unit: u128,
    pub timestamp: i64,
}

#[event]
pub struct StakingToggledEvent {
    pub enabled: bool,
    pub timestamp: i64,
}

// Parameters
#[event]
pub struct FeesUpdatedEvent {
    pub staking_fee_bps: u16,
    pub unstaking_fee_bps: u16,
}

#[event]
pub struct MinimumStakeUpdatedEvent {
    pub old_minimum: u64,
    pub new_minimum: u64,
}

#[event]
pub struct RewardBudgetUpdatedEvent {
    pub old_budget: u64,
    pub new_budget: u64,
}

#[event]
pub struct AuthorityTransferredEvent {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

// Owner funds
#[event]
pub struct RewardsDepositedEvent {
    pub funder: Pubkey,
    pub amount: u64,
    pub reward_budget: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesWithdrawnEvent {
    pub authority: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct EmergencyWithdrawEvent {
    pub authority: Pubkey,
    pub amount: u64,
    pub from_fees: u64,
    pub from_rewards: u64,
    pub reward_budget: u64,
    pub timestamp: i64,
}

// Stakers
#[event]
pub struct StakeEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub principal: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub net_return: u64,
    pub timestamp: i64,
}

#[event]
pub struct ClaimEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
    pub timestamp: i64,
}
