use anchor_lang::prelude::*;
use anchor_lang::system_program::{create_account, CreateAccount};
use anchor_spl::{
    associated_token::{self, get_associated_token_address_with_program_id, AssociatedToken, Create},
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
        Metadata as Metaplex,
    },
    token::spl_token::native_mint,
    token_2022::{
        self, initialize_mint2,
        spl_token_2022::{instruction::AuthorityType, state::AccountState},
        InitializeMint2, Token2022,
    },
    token_2022_extensions::{default_account_state_initialize, DefaultAccountStateInitialize},
    token_interface::{mint_to, set_authority, transfer_checked, MintTo, SetAuthority, TransferChecked},
};

use crate::constants::{
    GLOBAL_CONFIG_SEED, SOL_VAULT_SEED, TOKEN_DECIMALS, TOKEN_RECORD_SEED, TOKEN_TOTAL_SUPPLY,
    VIRTUAL_LIQUIDITY_SEED,
};
use crate::errors::CurveError;
use crate::events::{TokenCreated, TokensBought};
use crate::instructions::transfer_lamports;
use crate::launch::{
    amm::pair_address, check_max_wallet, curve_mint_len, evaluate_launch, thaw_if_frozen, CurveAccounts,
    LaunchContext,
};
use crate::state::{validate_metadata, GlobalConfig, TokenRecord, VirtualLiquidity};

/// # CreateToken
///
/// Creates a mint whose whole supply sits in the curve, registers it and
/// optionally performs the creator's first buy at the listing fee.
///
/// The mint is a Token-2022 mint whose accounts start frozen. The curve PDA
/// keeps the freeze authority for good and is the mint authority only long
/// enough to mint the supply and sign the metadata.
#[derive(Accounts)]
pub struct CreateToken<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// Fresh keypair, created as a mint in the handler
    #[account(mut)]
    pub mint: Signer<'info>,

    #[account(
        init,
        payer = creator,
        space = 8 + TokenRecord::INIT_SPACE,
        seeds = [TOKEN_RECORD_SEED, mint.key().as_ref()],
        bump,
    )]
    pub token_record: Box<Account<'info, TokenRecord>>,

    #[account(
        init,
        payer = creator,
        space = 8 + VirtualLiquidity::INIT_SPACE,
        seeds = [VIRTUAL_LIQUIDITY_SEED, mint.key().as_ref()],
        bump,
    )]
    pub virtual_liquidity: Box<Account<'info, VirtualLiquidity>>,

    /// Holds the lamports raised by the curve
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, virtual_liquidity.key().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    /// CHECK: ATA of the curve, created once the mint exists
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(
            &virtual_liquidity.key(),
            &mint.key(),
            &token_2022::ID,
        ),
    )]
    pub curve_token_account: UncheckedAccount<'info>,

    /// CHECK: ATA of the creator, created only for the creator buy
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(&creator.key(), &mint.key(), &token_2022::ID),
    )]
    pub creator_token_account: UncheckedAccount<'info>,

    /// CHECK: address derived from the metadata program
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata_account: UncheckedAccount<'info>,

    /// CHECK: only receives lamports; pinned to the configured recipient
    #[account(mut, address = global_config.fee_to @ CurveError::InvalidFeeRecipient)]
    pub fee_to: UncheckedAccount<'info>,

    /// CHECK: owner and layout are validated when the price is read
    #[account(address = global_config.price_feed)]
    pub price_feed: UncheckedAccount<'info>,

    pub token_metadata_program: Program<'info, Metaplex>,
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> CreateToken<'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn create_token(
        &mut self,
        name: String,
        symbol: String,
        uri: String,
        max_wallet: u64,
        sol_amount: u64,
        min_token_out: u64,
        bumps: CreateTokenBumps,
        remaining_accounts: &'info [AccountInfo<'info>],
    ) -> Result<()> {
        validate_metadata(&name, &symbol, &uri)?;

        let mint_key = self.mint.key();
        let curve_bump = [bumps.virtual_liquidity];
        let curve_seeds: &[&[u8]] = &[VIRTUAL_LIQUIDITY_SEED, mint_key.as_ref(), &curve_bump];

        self.create_mint()?;
        self.create_token_account(&self.curve_token_account, &self.virtual_liquidity.to_account_info())?;
        thaw_if_frozen(
            &self.token_program.to_account_info(),
            &self.curve_token_account.to_account_info(),
            &self.mint.to_account_info(),
            &self.virtual_liquidity.to_account_info(),
            curve_seeds,
        )?;

        self.create_metadata(name.clone(), symbol.clone(), uri, curve_seeds)?;
        self.mint_supply(curve_seeds)?;

        self.virtual_liquidity.initialize(
            &self.global_config,
            mint_key,
            TOKEN_TOTAL_SUPPLY,
            bumps.virtual_liquidity,
            bumps.sol_vault,
        )?;
        self.token_record.set_inner(TokenRecord {
            mint: mint_key,
            creator: self.creator.key(),
            total_supply: TOKEN_TOTAL_SUPPLY,
            max_wallet,
            created_at: Clock::get()?.unix_timestamp,
            pair: pair_address(
                &self.global_config.amm_program,
                &self.global_config.amm_factory,
                &mint_key,
                &native_mint::ID,
            ),
            name: name.clone(),
            symbol: symbol.clone(),
            bump: bumps.token_record,
        });
        self.global_config.token_count = self
            .global_config
            .token_count
            .checked_add(1)
            .ok_or(CurveError::ArithmeticOverflow)?;

        self.fund_sol_vault()?;

        msg!("Created token {} ({})", mint_key, symbol);
        emit!(TokenCreated {
            token: mint_key,
            owner: self.creator.key(),
            supply: TOKEN_TOTAL_SUPPLY,
            name,
            symbol,
            max_wallet,
        });

        if sol_amount > 0 {
            self.initial_buy(sol_amount, min_token_out, curve_seeds)?;
            self.evaluate_launch(remaining_accounts)?;
        }

        Ok(())
    }

    /// Allocates the mint with its default account state set to frozen.
    /// Mint and freeze authority both start with the curve PDA.
    fn create_mint(&self) -> Result<()> {
        let space = curve_mint_len()?;
        let token_program = self.token_program.to_account_info();
        let mint = self.mint.to_account_info();

        create_account(
            CpiContext::new(
                self.system_program.to_account_info(),
                CreateAccount {
                    from: self.creator.to_account_info(),
                    to: mint.clone(),
                },
            ),
            Rent::get()?.minimum_balance(space),
            space as u64,
            &token_2022::ID,
        )?;

        default_account_state_initialize(
            CpiContext::new(
                token_program.clone(),
                DefaultAccountStateInitialize {
                    token_program_id: token_program.clone(),
                    mint: mint.clone(),
                },
            ),
            &AccountState::Frozen,
        )?;

        let curve = self.virtual_liquidity.key();
        initialize_mint2(
            CpiContext::new(token_program, InitializeMint2 { mint }),
            TOKEN_DECIMALS,
            &curve,
            Some(&curve),
        )
    }

    fn create_token_account(&self, account: &UncheckedAccount<'info>, authority: &AccountInfo<'info>) -> Result<()> {
        associated_token::create(CpiContext::new(
            self.associated_token_program.to_account_info(),
            Create {
                payer: self.creator.to_account_info(),
                associated_token: account.to_account_info(),
                authority: authority.clone(),
                mint: self.mint.to_account_info(),
                system_program: self.system_program.to_account_info(),
                token_program: self.token_program.to_account_info(),
            },
        ))
    }

    fn create_metadata(&self, name: String, symbol: String, uri: String, curve_seeds: &[&[u8]]) -> Result<()> {
        create_metadata_accounts_v3(
            CpiContext::new_with_signer(
                self.token_metadata_program.to_account_info(),
                CreateMetadataAccountsV3 {
                    metadata: self.metadata_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    mint_authority: self.virtual_liquidity.to_account_info(),
                    update_authority: self.virtual_liquidity.to_account_info(),
                    payer: self.creator.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
                &[curve_seeds],
            ),
            DataV2 {
                name,
                symbol,
                uri,
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            },
            false, // immutable
            true,  // update authority signs
            None,
        )
    }

    /// Mints the fixed supply to the curve and drops the mint authority.
    fn mint_supply(&self, curve_seeds: &[&[u8]]) -> Result<()> {
        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.curve_token_account.to_account_info(),
                    authority: self.virtual_liquidity.to_account_info(),
                },
                &[curve_seeds],
            ),
            TOKEN_TOTAL_SUPPLY,
        )?;

        set_authority(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                SetAuthority {
                    current_authority: self.virtual_liquidity.to_account_info(),
                    account_or_mint: self.mint.to_account_info(),
                },
                &[curve_seeds],
            ),
            AuthorityType::MintTokens,
            None,
        )
    }

    /// Tops the vault up to the rent-exempt minimum, which never counts as raised.
    fn fund_sol_vault(&self) -> Result<()> {
        let minimum = Rent::get()?.minimum_balance(0);
        let shortfall = minimum.saturating_sub(self.sol_vault.lamports());

        transfer_lamports(
            &self.system_program.to_account_info(),
            &self.creator.to_account_info(),
            &self.sol_vault.to_account_info(),
            shortfall,
            &[],
        )
    }

    /// Creator's buy. The listing fee is the only fee charged on it.
    fn initial_buy(&mut self, sol_amount: u64, min_token_out: u64, curve_seeds: &[&[u8]]) -> Result<()> {
        let outcome = self.virtual_liquidity.buy(
            &self.global_config,
            sol_amount,
            self.global_config.listing_fee_bps,
            min_token_out,
        )?;
        // the mint is new, so the creator holds nothing yet
        check_max_wallet(self.token_record.max_wallet, 0, outcome.tokens_out)?;

        self.create_token_account(&self.creator_token_account, &self.creator.to_account_info())?;
        thaw_if_frozen(
            &self.token_program.to_account_info(),
            &self.creator_token_account.to_account_info(),
            &self.mint.to_account_info(),
            &self.virtual_liquidity.to_account_info(),
            curve_seeds,
        )?;

        let system_program = self.system_program.to_account_info();
        let creator = self.creator.to_account_info();
        transfer_lamports(&system_program, &creator, &self.sol_vault.to_account_info(), outcome.net_sol_in, &[])?;
        transfer_lamports(&system_program, &creator, &self.fee_to.to_account_info(), outcome.fee, &[])?;

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.curve_token_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.creator_token_account.to_account_info(),
                    authority: self.virtual_liquidity.to_account_info(),
                },
                &[curve_seeds],
            ),
            outcome.tokens_out,
            TOKEN_DECIMALS,
        )?;

        msg!(
            "Creator bought {} tokens for {} lamports (listing fee {})",
            outcome.tokens_out,
            sol_amount,
            outcome.fee
        );
        emit!(TokensBought {
            token: self.mint.key(),
            buyer: self.creator.key(),
            sol_in: sol_amount,
            fee: outcome.fee,
            tokens_out: outcome.tokens_out,
            reserve0: self.virtual_liquidity.reserve0,
            reserve1: self.virtual_liquidity.reserve1,
        });
        Ok(())
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
                payer: self.creator.to_account_info(),
                token_program: self.token_program.to_account_info(),
                system_program: self.system_program.to_account_info(),
            },
            remaining_accounts,
        };

        evaluate_launch(launch, &mut self.virtual_liquidity)
    }
}
