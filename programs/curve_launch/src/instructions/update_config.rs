use anchor_lang::prelude::*;

use crate::constants::GLOBAL_CONFIG_SEED;
use crate::errors::CurveError;
use crate::events::{
    BuyFeeBpsUpdated, FeeToUpdated, ListingFeeBpsUpdated, OwnershipTransferred, SellFeeBpsUpdated,
};
use crate::state::{check_fee_recipient, GlobalConfig};

/// Owner-only mutation of the protocol parameters.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

/// `set_fee_to` also loads the new recipient to check it can take fees.
#[derive(Accounts)]
#[instruction(fee_to: Pubkey)]
pub struct SetFeeTo<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// CHECK: only its balance is read
    #[account(address = fee_to @ CurveError::InvalidFeeRecipient)]
    pub new_fee_to: UncheckedAccount<'info>,
}

impl<'info> SetFeeTo<'info> {
    pub fn set_fee_to(&mut self, fee_to: Pubkey) -> Result<()> {
        self.global_config.ensure_owner(&self.owner.key())?;
        let old_fee_to = self.global_config.set_fee_to(fee_to)?;
        check_fee_recipient(self.new_fee_to.lamports(), &Rent::get()?)?;

        msg!("fee_to: {} -> {}", old_fee_to, fee_to);
        emit!(FeeToUpdated {
            old_fee_to,
            new_fee_to: fee_to,
        });
        Ok(())
    }
}

impl<'info> UpdateConfig<'info> {
    pub fn set_buy_fee_bps(&mut self, bps: u16) -> Result<()> {
        self.global_config.ensure_owner(&self.owner.key())?;
        let old_bps = self.global_config.set_buy_fee_bps(bps)?;

        msg!("buy fee: {} -> {} bps", old_bps, bps);
        emit!(BuyFeeBpsUpdated { old_bps, new_bps: bps });
        Ok(())
    }

    pub fn set_sell_fee_bps(&mut self, bps: u16) -> Result<()> {
        self.global_config.ensure_owner(&self.owner.key())?;
        let old_bps = self.global_config.set_sell_fee_bps(bps)?;

        msg!("sell fee: {} -> {} bps", old_bps, bps);
        emit!(SellFeeBpsUpdated { old_bps, new_bps: bps });
        Ok(())
    }

    pub fn set_listing_fee_bps(&mut self, bps: u16) -> Result<()> {
        self.global_config.ensure_owner(&self.owner.key())?;
        let old_bps = self.global_config.set_listing_fee_bps(bps)?;

        msg!("listing fee: {} -> {} bps", old_bps, bps);
        emit!(ListingFeeBpsUpdated { old_bps, new_bps: bps });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<()> {
        self.global_config.ensure_owner(&self.owner.key())?;
        let previous_owner = self.global_config.set_owner(new_owner)?;

        msg!("Ownership transferred: {} -> {}", previous_owner, new_owner);
        emit!(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }
}
