use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::Token2022,
    token_interface::{Mint, TokenAccount},
};

use crate::constants::{TOKEN_RECORD_SEED, VIRTUAL_LIQUIDITY_SEED};
use crate::launch::{check_transfer, thaw_if_frozen};
use crate::state::{TokenRecord, VirtualLiquidity};

/// Unlocks a token account of a curve mint so it can receive tokens.
///
/// Anyone may call it for any account. Accounts owned by the pair stay
/// frozen until the curve has launched.
#[derive(Accounts)]
pub struct ThawTokenAccount<'info> {
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [TOKEN_RECORD_SEED, mint.key().as_ref()],
        bump = token_record.bump,
    )]
    pub token_record: Account<'info, TokenRecord>,

    #[account(
        seeds = [VIRTUAL_LIQUIDITY_SEED, mint.key().as_ref()],
        bump = virtual_liquidity.bump,
    )]
    pub virtual_liquidity: Account<'info, VirtualLiquidity>,

    #[account(mut, token::mint = mint)]
    pub token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Program<'info, Token2022>,
}

impl<'info> ThawTokenAccount<'info> {
    pub fn thaw_token_account(&self) -> Result<()> {
        check_transfer(&self.token_record, &self.virtual_liquidity, &self.token_account.owner)?;

        let mint_key = self.mint.key();
        let curve_bump = [self.virtual_liquidity.bump];
        let curve_seeds: &[&[u8]] = &[VIRTUAL_LIQUIDITY_SEED, mint_key.as_ref(), &curve_bump];
        thaw_if_frozen(
            &self.token_program.to_account_info(),
            &self.token_account.to_account_info(),
            &self.mint.to_account_info(),
            &self.virtual_liquidity.to_account_info(),
            curve_seeds,
        )?;

        msg!("Thawed {} (owner {})", self.token_account.key(), self.token_account.owner);
        Ok(())
    }
}
