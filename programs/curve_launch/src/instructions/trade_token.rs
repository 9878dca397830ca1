use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_2022::Token2022,
    token_interface::{transfer_checked, Mint, TokenAccount, TransferChecked},
};

use crate::constants::{GLOBAL_CONFIG_SEED, SOL_VAULT_SEED, TOKEN_RECORD_SEED, VIRTUAL_LIQUIDITY_SEED};
use crate::errors::CurveError;
use crate::events::{TokensBought, TokensSold};
use crate::launch::{check_max_wallet, evaluate_launch, thaw_if_frozen, CurveAccounts, LaunchContext};
use crate::state::{GlobalConfig, TokenRecord, VirtualLiquidity};

/// Buy and sell share one account layout. Migration accounts, when the
/// trade may cross the launch cap, follow as remaining accounts.
///
/// A buyer's token account starts frozen and is thawed by the buy itself.
#[derive(Accounts)]
pub struct TradeToken<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        seeds = [TOKEN_RECORD_SEED, mint.key().as_ref()],
        bump = token_record.bump,
    )]
    pub token_record: Box<Account<'info, TokenRecord>>,

    #[account(
        mut,
        seeds = [VIRTUAL_LIQUIDITY_SEED, mint.key().as_ref()],
        bump = virtual_liquidity.bump,
    )]
    pub virtual_liquidity: Account<'info, VirtualLiquidity>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, virtual_liquidity.key().as_ref()],
        bump = virtual_liquidity.sol_vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = virtual_liquidity,
        associated_token::token_program = token_program,
    )]
    pub curve_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: only receives lamports; pinned to the configured recipient
    #[account(mut, address = global_config.fee_to @ CurveError::InvalidFeeRecipient)]
    pub fee_to: UncheckedAccount<'info>,

    /// CHECK: owner and layout are validated when the price is read
    #[account(address = global_config.price_feed)]
    pub price_feed: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> TradeToken<'info> {
    pub fn buy_token(
        &mut self,
        sol_amount: u64,
        min_token_out: u64,
        remaining_accounts: &'info [AccountInfo<'info>],
    ) -> Result<()> {
        let outcome = self.virtual_liquidity.buy(
            &self.global_config,
            sol_amount,
            self.global_config.buy_fee_bps,
            min_token_out,
        )?;
        check_max_wallet(
            self.token_record.max_wallet,
            self.trader_token_account.amount,
            outcome.tokens_out,
        )?;

        let system_program = self.system_program.to_account_info();
        let trader = self.trader.to_account_info();
        transfer_lamports(&system_program, &trader, &self.sol_vault.to_account_info(), outcome.net_sol_in, &[])?;
        transfer_lamports(&system_program, &trader, &self.fee_to.to_account_info(), outcome.fee, &[])?;

        let mint_key = self.mint.key();
        let curve_bump = [self.virtual_liquidity.bump];
        let curve_seeds: &[&[u8]] = &[VIRTUAL_LIQUIDITY_SEED, mint_key.as_ref(), &curve_bump];
        thaw_if_frozen(
            &self.token_program.to_account_info(),
            &self.trader_token_account.to_account_info(),
            &self.mint.to_account_info(),
            &self.virtual_liquidity.to_account_info(),
            curve_seeds,
        )?;
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_token_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.trader_token_account.to_account_info(),
                    authority: self.virtual_liquidity.to_account_info(),
                },
                &[curve_seeds],
            ),
            outcome.tokens_out,
            self.mint.decimals,
        )?;

        msg!(
            "Bought {} tokens for {} lamports (fee {})",
            outcome.tokens_out,
            sol_amount,
            outcome.fee
        );
        emit!(TokensBought {
            token: mint_key,
            buyer: self.trader.key(),
            sol_in: sol_amount,
            fee: outcome.fee,
            tokens_out: outcome.tokens_out,
            reserve0: self.virtual_liquidity.reserve0,
            reserve1: self.virtual_liquidity.reserve1,
        });

        self.evaluate_launch(remaining_accounts)
    }

    pub fn sell_token(
        &mut self,
        token_amount: u64,
        min_sol_out: u64,
        remaining_accounts: &'info [AccountInfo<'info>],
    ) -> Result<()> {
        let outcome = self
            .virtual_liquidity
            .sell(&self.global_config, token_amount, min_sol_out)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_token_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.curve_token_account.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            token_amount,
            self.mint.decimals,
        )?;

        let curve_key = self.virtual_liquidity.key();
        let vault_bump = [self.virtual_liquidity.sol_vault_bump];
        let vault_seeds: &[&[u8]] = &[SOL_VAULT_SEED, curve_key.as_ref(), &vault_bump];
        let system_program = self.system_program.to_account_info();
        let sol_vault = self.sol_vault.to_account_info();
        transfer_lamports(
            &system_program,
            &sol_vault,
            &self.trader.to_account_info(),
            outcome.net_sol_out,
            &[vault_seeds],
        )?;
        transfer_lamports(
            &system_program,
            &sol_vault,
            &self.fee_to.to_account_info(),
            outcome.fee,
            &[vault_seeds],
        )?;

        msg!(
            "Sold {} tokens for {} lamports (fee {})",
            token_amount,
            outcome.net_sol_out,
            outcome.fee
        );
        emit!(TokensSold {
            token: self.mint.key(),
            seller: self.trader.key(),
            tokens_in: token_amount,
            gross_sol_out: outcome.gross_sol_out,
            fee: outcome.fee,
            reserve0: self.virtual_liquidity.reserve0,
            reserve1: self.virtual_liquidity.reserve1,
        });

        self.evaluate_launch(remaining_accounts)
    }

    fn evaluate_launch(&mut self, remaining_accounts: &'info [AccountInfo<'info>]) -> Result<()> {
        let price_feed = self.price_feed.to_account_info();
        let launch = LaunchContext {
            config: &self.global_config,
            record: &self.token_record,
            price_feed: &price_feed,
            curve: CurveAccounts {
                mint: self.mint.to_account_info(),
                curve_token_account: self.curve_token_account.to_account_info(),
                sol_vault: self.sol_vault.to_account_info(),
                payer: self.trader.to_account_info(),
                token_program: self.token_program.to_account_info(),
                system_program: self.system_program.to_account_info(),
            },
            remaining_accounts,
        };

        evaluate_launch(launch, &mut self.virtual_liquidity)
    }
}

/// System transfer that skips zero amounts. Pass seeds when `from` is a PDA.
pub(crate) fn transfer_lamports<'info>(
    system_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    transfer(
        CpiContext::new_with_signer(
            system_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}
