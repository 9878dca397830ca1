use anchor_lang::prelude::*;

use crate::constants::GLOBAL_CONFIG_SEED;
use crate::errors::CurveError;
use crate::state::{check_fee_recipient, GlobalConfig, InitProtocolParams};

#[derive(Accounts)]
#[instruction(params: InitProtocolParams)]
pub struct InitProtocol<'info> {
    /// Becomes the protocol owner
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + GlobalConfig::INIT_SPACE,
        seeds = [GLOBAL_CONFIG_SEED],
        bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// CHECK: only its balance is read
    #[account(address = params.fee_to @ CurveError::InvalidFeeRecipient)]
    pub fee_to: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitProtocol<'info> {
    pub fn init_protocol(&mut self, params: InitProtocolParams, bumps: InitProtocolBumps) -> Result<()> {
        let config = GlobalConfig::new(self.payer.key(), params, bumps.global_config)?;
        check_fee_recipient(self.fee_to.lamports(), &Rent::get()?)?;

        msg!(
            "Protocol initialized: owner {}, fee_to {}, fees {}/{}/{} bps",
            config.owner,
            config.fee_to,
            config.buy_fee_bps,
            config.sell_fee_bps,
            config.listing_fee_bps
        );

        self.global_config.set_inner(config);
        Ok(())
    }
}
