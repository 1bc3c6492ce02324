//! Staking engine.
//!
//! Orchestrates every operation against a single `StakePool` ledger:
//! reentrancy guard, reward checkpoints, fee math and solvency checks, then
//! the asset movement. The engine only talks to the outside world through the
//! [`AssetLedger`], [`Authority`] and [`TimeSource`] seams, so the same code
//! runs inside instruction handlers and in host-side tests.

use anchor_lang::prelude::*;

use crate::clock::TimeSource;
use crate::error::StakingError;
use crate::state::StakePool;

mod admin;
mod user;
mod views;

pub use admin::{validate_fees, validate_minimum_stake, validate_reward_budget};
pub use user::{StakeReceipt, UnstakeReceipt};
pub use views::{pool_info, user_info, PoolInfo, UserInfo};

/// Moves the staked asset between the pool vault and a party.
///
/// A failed transfer must leave balances untouched.
pub trait AssetLedger {
    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> Result<()>;
    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
    /// Tokens currently held by the pool vault.
    fn balance(&self) -> Result<u64>;
}

impl<L: AssetLedger + ?Sized> AssetLedger for &mut L {
    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        (**self).transfer_in(from, amount)
    }

    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        (**self).transfer_out(to, amount)
    }

    fn balance(&self) -> Result<u64> {
        (**self).balance()
    }
}

/// Gate for admin operations.
pub trait Authority {
    fn is_owner(&self, caller: &Pubkey) -> bool;
}

impl Authority for StakePool {
    fn is_owner(&self, caller: &Pubkey) -> bool {
        self.authority == *caller
    }
}

pub struct StakingEngine<'a, T: TimeSource> {
    pool: &'a mut StakePool,
    clock: T,
}

impl<'a, T: TimeSource> StakingEngine<'a, T> {
    pub fn new(pool: &'a mut StakePool, clock: T) -> Self {
        Self { pool, clock }
    }

    pub fn pool(&self) -> &StakePool {
        &*self.pool
    }

    /// Runs a mutating operation under the pool's reentrancy lock.
    ///
    /// The operation works on a copy of the pool that replaces the live one
    /// only when it returns `Ok`; the lock is released on every path.
    ///
    /// The lock only lives in memory for the duration of the call and is
    /// never persisted before a token CPI, so on-chain it rejects nested
    /// entry through the same engine only. Cross-instruction reentrancy is
    /// ruled out by the runtime's account locking and the `&mut` borrow.
    fn guarded<R>(&mut self, op: impl FnOnce(&mut StakePool, i64) -> Result<R>) -> Result<R> {
        require!(!self.pool.reentrancy_lock, StakingError::ReentrantCall);
        let now = self.clock.unix_timestamp()?;

        self.pool.reentrancy_lock = true;
        let mut working = self.pool.clone();
        let outcome = op(&mut working, now);
        self.pool.reentrancy_lock = false;

        let value = outcome?;
        working.reentrancy_lock = false;
        *self.pool = working;

        Ok(value)
    }
}

pub(crate) fn require_owner(pool: &StakePool, caller: &Pubkey) -> Result<()> {
    require!(pool.is_owner(caller), StakingError::Unauthorized);
    Ok(())
}
