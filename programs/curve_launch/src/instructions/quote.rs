use anchor_lang::prelude::*;

use crate::constants::{GLOBAL_CONFIG_SEED, VIRTUAL_LIQUIDITY_SEED};
use crate::state::{GlobalConfig, VirtualLiquidity};

/// Read-only pricing against a curve's current reserves.
#[derive(Accounts)]
pub struct Quote<'info> {
    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        seeds = [VIRTUAL_LIQUIDITY_SEED, virtual_liquidity.mint.as_ref()],
        bump = virtual_liquidity.bump,
    )]
    pub virtual_liquidity: Account<'info, VirtualLiquidity>,
}

impl<'info> Quote<'info> {
    /// Tokens a buy would return for `net_sol_in`, the amount left after the fee.
    pub fn get_token_amount_out(&self, net_sol_in: u64) -> Result<u64> {
        self.virtual_liquidity
            .quote_tokens_out(&self.global_config, net_sol_in)
    }

    /// Gross lamports a sell of `token_in` releases, before the sell fee.
    pub fn get_sol_amount_out(&self, token_in: u64) -> Result<u64> {
        self.virtual_liquidity
            .quote_sol_out(&self.global_config, token_in)
    }
}
