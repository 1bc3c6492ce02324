use anchor_lang::prelude::*;

/// A participant's staked principal and reward checkpoint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakePosition {
    pub principal: u64,
    pub reward_per_unit_paid: u128,
    pub pending_reward: u64,
    pub total_claimed: u64,
}

impl StakePosition {
    pub const LEN: usize = 8 + 16 + 8 + 8;
}

#[account]
#[derive(Debug, Default)]
pub struct UserStake {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,

    pub position: StakePosition,

    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 32 + StakePosition::LEN + 1;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }
}
