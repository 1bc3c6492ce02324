use anchor_lang::prelude::*;

/// Reward program schedule, budget and entry parameters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgramConfig {
    pub active: bool,
    /// Set once the program has been ended; a pool runs at most one program.
    pub ended: bool,
    pub staking_enabled: bool,

    pub start_time: i64,
    pub end_time: i64,

    pub total_reward_budget: u64,
    pub minimum_stake: u64,

    pub staking_fee_bps: u16,
    pub unstaking_fee_bps: u16,
}

impl ProgramConfig {
    pub const LEN: usize = 3 + (8 * 2) + (8 * 2) + (2 * 2);
}

/// Global reward-per-unit checkpoint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardLedger {
    /// Scaled by `PRECISION`; never decreases.
    pub reward_per_unit_stored: u128,
    pub last_update_time: i64,
    pub total_staked: u64,
}

impl RewardLedger {
    pub const LEN: usize = 16 + 8 + 8;
}

/// Bookkeeping over the reward, fee and owner partitions of the pooled vault.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FundsLedger {
    pub reward_deposits: u64,
    pub rewards_claimed: u64,
    pub fees_collected: u64,
    pub owner_withdrawals: u64,
}

impl FundsLedger {
    pub const LEN: usize = 8 * 4;
}

#[account]
#[derive(Debug, Default)]
pub struct StakePool {
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    pub pool_vault: Pubkey,

    pub program: ProgramConfig,
    pub rewards: RewardLedger,
    pub funds: FundsLedger,

    pub staker_count: u64,
    pub reentrancy_lock: bool,

    pub created_at: i64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl StakePool {
    pub const LEN: usize = 8
        + (32 * 3)
        + ProgramConfig::LEN
        + RewardLedger::LEN
        + FundsLedger::LEN
        + 8
        + 1
        + 8
        + 2;

    /// Fresh, inactive pool with zeroed ledgers.
    pub fn new(
        authority: Pubkey,
        staking_mint: Pubkey,
        pool_vault: Pubkey,
        program: ProgramConfig,
        now: i64,
    ) -> Self {
        Self {
            authority,
            staking_mint,
            pool_vault,
            program,
            rewards: RewardLedger {
                reward_per_unit_stored: 0,
                last_update_time: now,
                total_staked: 0,
            },
            funds: FundsLedger::default(),
            staker_count: 0,
            reentrancy_lock: false,
            created_at: now,
            vault_bump: 0,
            bump: 0,
        }
    }
}
