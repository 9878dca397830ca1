/*
   ______                        __                           __
  / ____/_  ________   _____    / /   ____ ___  ______  _____/ /_
 / /   / / / / ___/ | / / _ \  / /   / __ `/ / / / __ \/ ___/ __ \
/ /___/ /_/ / /   | |/ /  __/ / /___/ /_/ / /_/ / / / / /__/ / / /
\____/\__,_/_/    |___/\___/ /_____/\__,_/\__,_/_/ /_/\___/_/ /_/

  Bonding curve launches that graduate into a real AMM pool.

  Price                                    launch cap
    ^                                          :
    |                                        / : ===> AMM pair
    |                                     /    :
    |                                 /        :
    |                           _ /            :
    |                   _ _ - -                :
    |  _ _ _ _ _ - - - -                       :
    +----------------------------------------------> SOL raised

  - every token starts with its full supply inside a virtual x*y=k market
  - token accounts start frozen; the pair's stay frozen until launch
  - the SOL side is lifted by a virtual floor, so the first buy has a price
  - once the oracle-valued market cap crosses the cap, reserves move into
    the AMM pair in the same transaction and the LP tokens are burned
*/

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod launch;
pub mod state;

use instructions::*;
use state::InitProtocolParams;

declare_id!("EWa9CtJnC7gXVRmGCTfm8Wnpbsn5AsuzrqsCkeTyFNfs");

#[program]
pub mod curve_launch {
    use super::*;

    pub fn init_protocol(ctx: Context<InitProtocol>, params: InitProtocolParams) -> Result<()> {
        ctx.accounts.init_protocol(params, ctx.bumps)
    }

    pub fn set_fee_to(ctx: Context<SetFeeTo>, fee_to: Pubkey) -> Result<()> {
        ctx.accounts.set_fee_to(fee_to)
    }

    pub fn set_buy_fee_bps(ctx: Context<UpdateConfig>, bps: u16) -> Result<()> {
        ctx.accounts.set_buy_fee_bps(bps)
    }

    pub fn set_sell_fee_bps(ctx: Context<UpdateConfig>, bps: u16) -> Result<()> {
        ctx.accounts.set_sell_fee_bps(bps)
    }

    pub fn set_listing_fee_bps(ctx: Context<UpdateConfig>, bps: u16) -> Result<()> {
        ctx.accounts.set_listing_fee_bps(bps)
    }

    pub fn transfer_ownership(ctx: Context<UpdateConfig>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_ownership(new_owner)
    }

    pub fn create_token<'info>(
        ctx: Context<'_, '_, 'info, 'info, CreateToken<'info>>,
        name: String,
        symbol: String,
        uri: String,
        max_wallet: u64,
        sol_amount: u64,
        min_token_out: u64,
    ) -> Result<()> {
        ctx.accounts.create_token(
            name,
            symbol,
            uri,
            max_wallet,
            sol_amount,
            min_token_out,
            ctx.bumps,
            ctx.remaining_accounts,
        )
    }

    pub fn buy_token<'info>(
        ctx: Context<'_, '_, 'info, 'info, TradeToken<'info>>,
        sol_amount: u64,
        min_token_out: u64,
    ) -> Result<()> {
        ctx.accounts.buy_token(sol_amount, min_token_out, ctx.remaining_accounts)
    }

    pub fn sell_token<'info>(
        ctx: Context<'_, '_, 'info, 'info, TradeToken<'info>>,
        token_amount: u64,
        min_sol_out: u64,
    ) -> Result<()> {
        ctx.accounts.sell_token(token_amount, min_sol_out, ctx.remaining_accounts)
    }

    pub fn get_token_amount_out(ctx: Context<Quote>, net_sol_in: u64) -> Result<u64> {
        ctx.accounts.get_token_amount_out(net_sol_in)
    }

    pub fn get_sol_amount_out(ctx: Context<Quote>, token_in: u64) -> Result<u64> {
        ctx.accounts.get_sol_amount_out(token_in)
    }

    pub fn thaw_token_account(ctx: Context<ThawTokenAccount>) -> Result<()> {
        ctx.accounts.thaw_token_account()
    }
}
