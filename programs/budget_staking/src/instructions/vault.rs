/// SPL token implementation of the engine's asset ledger.
///
/// ## Security Guarantees
/// - Inbound transfers are signed by the counterparty itself
/// - Outbound transfers are signed by the stake pool PDA
/// - Transfers only ever involve the single counterparty the handler validated

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::*;
use crate::engine::AssetLedger;
use crate::error::StakingError;

/// Moves tokens between the pool vault and one validated counterparty.
///
/// A rejected SPL transfer aborts the whole transaction with the token
/// program's error; `StakingError::TransferFailed` is never produced here.
pub struct TokenVault<'info> {
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    stake_pool: AccountInfo<'info>,
    staking_mint: Pubkey,
    pool_bump: u8,

    /// The counterparty's token account.
    counterparty: AccountInfo<'info>,
    /// Signer owning `counterparty`.
    counterparty_owner: AccountInfo<'info>,
}

impl<'info> TokenVault<'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        vault: AccountInfo<'info>,
        stake_pool: AccountInfo<'info>,
        staking_mint: Pubkey,
        pool_bump: u8,
        counterparty: AccountInfo<'info>,
        counterparty_owner: AccountInfo<'info>,
    ) -> Self {
        Self {
            token_program,
            vault,
            stake_pool,
            staking_mint,
            pool_bump,
            counterparty,
            counterparty_owner,
        }
    }

    fn require_counterparty(&self, party: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *party,
            self.counterparty_owner.key(),
            StakingError::Unauthorized
        );
        Ok(())
    }
}

impl<'info> AssetLedger for TokenVault<'info> {
    fn transfer_in(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        self.require_counterparty(from)?;

        let cpi_accounts = Transfer {
            from: self.counterparty.clone(),
            to: self.vault.clone(),
            authority: self.counterparty_owner.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.clone(), cpi_accounts);
        token::transfer(cpi_ctx, amount)
    }

    fn transfer_out(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        self.require_counterparty(to)?;

        let bump = [self.pool_bump];
        let seeds: &[&[u8]] = &[STAKE_POOL_SEED, self.staking_mint.as_ref(), &bump];
        let signer_seeds = &[seeds];

        let cpi_accounts = Transfer {
            from: self.vault.clone(),
            to: self.counterparty.clone(),
            authority: self.stake_pool.clone(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, amount)
    }

    fn balance(&self) -> Result<u64> {
        token::accessor::amount(&self.vault)
    }
}
