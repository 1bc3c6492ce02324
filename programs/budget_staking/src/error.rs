//! Error types for the Budget Staking program.
//!
//! This module defines all custom error codes that can be returned by the program.
//! Every failure leaves pool and position state untouched.
//!
//! ## Error Groups
//! - Authorization
//! - Input validation
//! - Program state conflicts
//! - Insolvency
//! - Collaborator failures
//! - Math/overflow
//! - Account validation

use anchor_lang::prelude::*;

/// Custom error codes for the Budget Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Authorization Errors ==========

    /// Caller is not the pool authority.
    #[msg("Unauthorized: caller is not the pool authority")]
    Unauthorized,

    /// A mutating operation was entered while another is in flight.
    #[msg("Reentrant call rejected: another operation is in progress")]
    ReentrantCall,

    // ========== Input Validation Errors ==========

    /// Cannot stake, unstake or move a zero amount.
    #[msg("Amount must be greater than zero")]
    AmountZero,

    /// Parameter lies outside its configured bounds.
    #[msg("Value is outside the allowed bounds")]
    OutOfBounds,

    /// Fee exceeds the 10% cap.
    #[msg("Fee exceeds maximum allowed value of 1000 basis points (10%)")]
    FeeTooHigh,

    /// Stake amount is below the pool minimum.
    #[msg("Stake amount is below the minimum stake")]
    BelowMinimum,

    /// New authority is the default (all-zero) key.
    #[msg("Invalid authority: the default key cannot own the pool")]
    InvalidAuthority,

    // ========== Program State Errors ==========

    /// Program has already been started.
    #[msg("Reward program is already active")]
    AlreadyActive,

    /// Operation requires an active program.
    #[msg("Reward program is not active")]
    NotActive,

    /// Parameter is frozen while the program runs.
    #[msg("Cannot change this parameter while the program is active")]
    ProgramActive,

    /// Staking has been paused by the authority.
    #[msg("Staking is currently disabled")]
    StakingDisabled,

    /// Program has not started or has already expired.
    #[msg("Reward program is not active or has expired")]
    ProgramNotActive,

    /// A program can only run once per pool.
    #[msg("Reward program has already ended")]
    ProgramEnded,

    // ========== Insolvency Errors ==========

    /// User does not have enough principal for the operation.
    #[msg("Insufficient staked balance for this operation")]
    InsufficientStake,

    /// Principal withdrawal would dip into reward or fee reserves.
    #[msg("Insufficient liquidity: withdrawal would consume reserved funds")]
    InsufficientLiquidity,

    /// Deposited rewards cannot cover the payout.
    #[msg("Insufficient reward funds for this payout")]
    InsufficientRewardFunds,

    /// Owner asked for more than fees plus unreserved rewards.
    #[msg("Insufficient owner funds for this withdrawal")]
    InsufficientOwnerFunds,

    /// Reward deposits do not cover the program budget.
    #[msg("Reward deposits do not cover the reward budget")]
    UnderfundedProgram,

    /// No fees to withdraw.
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    /// No rewards to claim.
    #[msg("No rewards available to claim")]
    NothingToClaim,

    // ========== Collaborator Errors ==========

    /// The asset ledger rejected a transfer.
    #[msg("Asset transfer failed")]
    TransferFailed,

    // ========== Math/Overflow Errors ==========

    /// Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// Division by zero attempted.
    #[msg("Division by zero attempted")]
    DivisionByZero,

    /// Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,

    // ========== Account Validation Errors ==========

    /// The provided mint does not match the pool's staking token.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// The provided vault does not match the pool's vault.
    #[msg("Pool vault address mismatch")]
    VaultMismatch,

    /// Vault owner is not the stake pool PDA.
    #[msg("Vault owner must be the stake pool PDA")]
    InvalidVaultOwner,

    /// Token account mint does not match expected mint.
    #[msg("Token account mint does not match pool staking mint")]
    InvalidTokenAccountMint,
}
