use anchor_lang::prelude::*;

use crate::constants::MAX_FEE_BPS;
use crate::curve::{validate_address_update, validate_fee_update};
use crate::errors::CurveError;

/// How a pool is valued when checking the launch threshold.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum LaunchValuation {
    /// Spot price of the curve times total supply
    #[default]
    FullyDiluted,
    /// Only the lamports raised so far
    RaisedReserve,
}

#[account]
#[derive(InitSpace)]
pub struct GlobalConfig {
    pub owner: Pubkey,
    pub fee_to: Pubkey,
    pub buy_fee_bps: u16,
    pub sell_fee_bps: u16,
    pub listing_fee_bps: u16,
    /// Lamport floor added to every pool's SOL reserve when pricing
    pub min_virtual_lp: u64,
    /// Launch threshold in oracle quote units, 9 decimals
    pub launch_market_cap: u64,
    pub valuation: LaunchValuation,
    pub oracle_program: Pubkey,
    pub price_feed: Pubkey,
    /// Seconds after which a price is considered stale
    pub max_price_age: i64,
    /// AMM program (router)
    pub amm_program: Pubkey,
    /// AMM factory / config account pairs are created under
    pub amm_factory: Pubkey,
    pub token_count: u64,
    pub bump: u8,
}

/// Arguments of `init_protocol`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitProtocolParams {
    pub fee_to: Pubkey,
    pub buy_fee_bps: u16,
    pub sell_fee_bps: u16,
    pub listing_fee_bps: u16,
    pub min_virtual_lp: u64,
    pub launch_market_cap: u64,
    pub valuation: LaunchValuation,
    pub oracle_program: Pubkey,
    pub price_feed: Pubkey,
    pub max_price_age: i64,
    pub amm_program: Pubkey,
    pub amm_factory: Pubkey,
}

impl InitProtocolParams {
    /// Static checks only. That `fee_to` can receive small fees is checked
    /// against the live account, see [`check_fee_recipient`].
    pub fn validate(&self) -> Result<()> {
        require!(self.fee_to != Pubkey::default(), CurveError::ZeroAddress);
        require!(
            self.buy_fee_bps <= MAX_FEE_BPS
                && self.sell_fee_bps <= MAX_FEE_BPS
                && self.listing_fee_bps <= MAX_FEE_BPS,
            CurveError::FeeTooHigh
        );
        require!(self.min_virtual_lp > 0, CurveError::InvalidConfig);
        require!(self.launch_market_cap > 0, CurveError::InvalidConfig);
        require!(self.max_price_age > 0, CurveError::InvalidConfig);
        for key in [&self.oracle_program, &self.price_feed, &self.amm_program, &self.amm_factory] {
            require!(*key != Pubkey::default(), CurveError::ZeroAddress);
        }
        Ok(())
    }
}

/// Fees are plain lamport transfers, and an unfunded system account cannot
/// receive less than the rent-exempt minimum. The recipient must already
/// hold at least that much.
pub fn check_fee_recipient(lamports: u64, rent: &Rent) -> Result<()> {
    require!(rent.is_exempt(lamports, 0), CurveError::InvalidFeeRecipient);
    Ok(())
}

impl GlobalConfig {
    pub fn new(owner: Pubkey, params: InitProtocolParams, bump: u8) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            owner,
            fee_to: params.fee_to,
            buy_fee_bps: params.buy_fee_bps,
            sell_fee_bps: params.sell_fee_bps,
            listing_fee_bps: params.listing_fee_bps,
            min_virtual_lp: params.min_virtual_lp,
            launch_market_cap: params.launch_market_cap,
            valuation: params.valuation,
            oracle_program: params.oracle_program,
            price_feed: params.price_feed,
            max_price_age: params.max_price_age,
            amm_program: params.amm_program,
            amm_factory: params.amm_factory,
            token_count: 0,
            bump,
        })
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, CurveError::Unauthorized);
        Ok(())
    }

    // Setters return the value they replaced so the caller can emit it.

    pub fn set_buy_fee_bps(&mut self, bps: u16) -> Result<u16> {
        validate_fee_update(self.buy_fee_bps, bps)?;
        Ok(std::mem::replace(&mut self.buy_fee_bps, bps))
    }

    pub fn set_sell_fee_bps(&mut self, bps: u16) -> Result<u16> {
        validate_fee_update(self.sell_fee_bps, bps)?;
        Ok(std::mem::replace(&mut self.sell_fee_bps, bps))
    }

    pub fn set_listing_fee_bps(&mut self, bps: u16) -> Result<u16> {
        validate_fee_update(self.listing_fee_bps, bps)?;
        Ok(std::mem::replace(&mut self.listing_fee_bps, bps))
    }

    pub fn set_fee_to(&mut self, fee_to: Pubkey) -> Result<Pubkey> {
        validate_address_update(&self.fee_to, &fee_to)?;
        Ok(std::mem::replace(&mut self.fee_to, fee_to))
    }

    pub fn set_owner(&mut self, owner: Pubkey) -> Result<Pubkey> {
        validate_address_update(&self.owner, &owner)?;
        Ok(std::mem::replace(&mut self.owner, owner))
    }
}
