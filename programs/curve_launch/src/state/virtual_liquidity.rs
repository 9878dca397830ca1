use anchor_lang::prelude::*;

use crate::curve::{apply_fee, invariant, sol_out_for_token, token_out_for_sol};
use crate::errors::CurveError;
use crate::state::GlobalConfig;

/// Per-token virtual market.
///
/// `reserve1` only counts lamports actually raised; the configured
/// `min_virtual_lp` floor is added on top whenever the curve prices a trade.
/// Once `launched` flips the account is inert: every trade path rejects it.
#[account]
#[derive(InitSpace)]
pub struct VirtualLiquidity {
    pub mint: Pubkey,
    /// Tokens held by the curve
    pub reserve0: u64,
    /// Lamports raised, without the virtual floor
    pub reserve1: u64,
    /// reserve0 * (reserve1 + min_virtual_lp) as of the last update
    pub k: u128,
    pub launched: bool,
    pub bump: u8,
    pub sol_vault_bump: u8,
}

/// What a buy costs and yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyOutcome {
    pub fee: u64,
    pub net_sol_in: u64,
    pub tokens_out: u64,
}

/// What a sell pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SellOutcome {
    pub gross_sol_out: u64,
    pub fee: u64,
    pub net_sol_out: u64,
}

impl VirtualLiquidity {
    pub fn initialize(
        &mut self,
        config: &GlobalConfig,
        mint: Pubkey,
        token_supply: u64,
        bump: u8,
        sol_vault_bump: u8,
    ) -> Result<()> {
        require!(token_supply > 0, CurveError::InvalidAmount);

        self.mint = mint;
        self.reserve0 = token_supply;
        self.reserve1 = 0;
        self.k = invariant(token_supply, 0, config.min_virtual_lp)?;
        self.launched = false;
        self.bump = bump;
        self.sol_vault_bump = sol_vault_bump;
        Ok(())
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.launched, CurveError::AlreadyLaunched);
        Ok(())
    }

    /// Tokens out for a SOL amount that already had its fee removed.
    pub fn quote_tokens_out(&self, config: &GlobalConfig, net_sol_in: u64) -> Result<u64> {
        self.ensure_active()?;
        let tokens_out = token_out_for_sol(net_sol_in, self.reserve0, self.reserve1, config.min_virtual_lp)?;
        require!(tokens_out > 0, CurveError::InvalidAmount);
        Ok(tokens_out)
    }

    /// Gross SOL out for `token_in` tokens, before the sell fee.
    pub fn quote_sol_out(&self, config: &GlobalConfig, token_in: u64) -> Result<u64> {
        self.ensure_active()?;
        let gross = sol_out_for_token(token_in, self.reserve0, self.reserve1, config.min_virtual_lp)?;
        require!(gross > 0, CurveError::InvalidAmount);
        require!(gross <= self.reserve1, CurveError::InsufficientReserves);
        Ok(gross)
    }

    /// Applies a buy of `sol_in` lamports charged at `fee_bps`.
    ///
    /// Trades use the buy fee; the creation buy passes the listing fee instead.
    pub fn buy(
        &mut self,
        config: &GlobalConfig,
        sol_in: u64,
        fee_bps: u16,
        min_tokens_out: u64,
    ) -> Result<BuyOutcome> {
        require!(sol_in > 0, CurveError::InvalidAmount);
        self.ensure_active()?;

        let split = apply_fee(sol_in, fee_bps)?;
        let tokens_out = self.quote_tokens_out(config, split.net)?;
        require!(tokens_out >= min_tokens_out, CurveError::SlippageExceeded);

        let reserve0 = self
            .reserve0
            .checked_sub(tokens_out)
            .ok_or(CurveError::InsufficientReserves)?;
        let reserve1 = self
            .reserve1
            .checked_add(split.net)
            .ok_or(CurveError::ArithmeticOverflow)?;
        self.commit(reserve0, reserve1, config.min_virtual_lp)?;

        Ok(BuyOutcome {
            fee: split.fee,
            net_sol_in: split.net,
            tokens_out,
        })
    }

    /// Applies a sell of `token_in` tokens. The slippage bound is on the net payout.
    pub fn sell(
        &mut self,
        config: &GlobalConfig,
        token_in: u64,
        min_sol_out: u64,
    ) -> Result<SellOutcome> {
        require!(token_in > 0, CurveError::InvalidAmount);
        self.ensure_active()?;

        let gross = self.quote_sol_out(config, token_in)?;
        let split = apply_fee(gross, config.sell_fee_bps)?;
        require!(split.net >= min_sol_out, CurveError::SlippageExceeded);

        let reserve0 = self
            .reserve0
            .checked_add(token_in)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let reserve1 = self
            .reserve1
            .checked_sub(gross)
            .ok_or(CurveError::InsufficientReserves)?;
        self.commit(reserve0, reserve1, config.min_virtual_lp)?;

        Ok(SellOutcome {
            gross_sol_out: gross,
            fee: split.fee,
            net_sol_out: split.net,
        })
    }

    /// Flips the pool into its terminal state. Can only happen once.
    pub fn mark_launched(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.launched = true;
        Ok(())
    }

    /// Removes what the AMM actually took during migration.
    pub fn settle_migration(&mut self, tokens_used: u64, sol_used: u64) -> Result<()> {
        require!(self.launched, CurveError::InvalidConfig);
        self.reserve0 = self
            .reserve0
            .checked_sub(tokens_used)
            .ok_or(CurveError::InsufficientReserves)?;
        self.reserve1 = self
            .reserve1
            .checked_sub(sol_used)
            .ok_or(CurveError::InsufficientReserves)?;
        Ok(())
    }

    fn commit(&mut self, reserve0: u64, reserve1: u64, min_virtual_lp: u64) -> Result<()> {
        let k = invariant(reserve0, reserve1, min_virtual_lp)?;
        require!(k >= self.k, CurveError::InvariantViolated);

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.k = k;
        Ok(())
    }
}
