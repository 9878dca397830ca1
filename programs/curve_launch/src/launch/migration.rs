//! One-shot migration of a curve into the external AMM pair.
//!
//! The accounts the AMM needs travel as remaining accounts of the trade that
//! crosses the launch threshold, in this order:
//!
//! ```text
//!   0 amm program          6 curve lp account  (ATA of the curve PDA)
//!   1 amm factory          7 curve wsol account (ATA of the curve PDA)
//!   2 pair                 8 wsol mint
//!   3 pair token vault     9 associated token program
//!   4 pair wsol vault     10 token program (classic, for WSOL and LP)
//!   5 lp mint
//! ```
//!
//! The curve token itself lives under Token-2022.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::{get_return_data, invoke, invoke_signed};
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::associated_token::{self, get_associated_token_address, Create};
use anchor_spl::token::{self, spl_token, Burn, SyncNative};

use crate::constants::{SOL_VAULT_SEED, VIRTUAL_LIQUIDITY_SEED};
use crate::errors::CurveError;
use crate::launch::amm::{
    add_liquidity_ix, create_pair_ix, AddLiquidityArgs, AddLiquidityKeys, AddLiquidityReturn, CreatePairKeys,
    PairOrder, PairSide,
};
use crate::launch::guard::thaw_if_frozen;
use crate::state::{GlobalConfig, TokenRecord, VirtualLiquidity};

pub const MIGRATION_ACCOUNTS_LEN: usize = 11;

pub struct MigrationAccounts<'info> {
    pub amm_program: AccountInfo<'info>,
    pub amm_factory: AccountInfo<'info>,
    pub pair: AccountInfo<'info>,
    pub pair_token_vault: AccountInfo<'info>,
    pub pair_wsol_vault: AccountInfo<'info>,
    pub lp_mint: AccountInfo<'info>,
    pub curve_lp_account: AccountInfo<'info>,
    pub curve_wsol_account: AccountInfo<'info>,
    pub wsol_mint: AccountInfo<'info>,
    pub associated_token_program: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

impl<'info> MigrationAccounts<'info> {
    pub fn parse(
        remaining: &[AccountInfo<'info>],
        config: &GlobalConfig,
        record: &TokenRecord,
        curve: &Pubkey,
    ) -> Result<Self> {
        let [amm_program, amm_factory, pair, pair_token_vault, pair_wsol_vault, lp_mint, curve_lp_account, curve_wsol_account, wsol_mint, associated_token_program, token_program, ..] =
            remaining
        else {
            return err!(CurveError::MigrationAccountsMissing);
        };

        let accounts = Self {
            amm_program: amm_program.clone(),
            amm_factory: amm_factory.clone(),
            pair: pair.clone(),
            pair_token_vault: pair_token_vault.clone(),
            pair_wsol_vault: pair_wsol_vault.clone(),
            lp_mint: lp_mint.clone(),
            curve_lp_account: curve_lp_account.clone(),
            curve_wsol_account: curve_wsol_account.clone(),
            wsol_mint: wsol_mint.clone(),
            associated_token_program: associated_token_program.clone(),
            token_program: token_program.clone(),
        };

        require!(accounts.amm_program.executable, CurveError::InvalidMigrationAccount);
        validate_migration_keys(&accounts.keys(), config, record, curve)?;
        Ok(accounts)
    }

    fn keys(&self) -> [Pubkey; MIGRATION_ACCOUNTS_LEN] {
        [
            self.amm_program.key(),
            self.amm_factory.key(),
            self.pair.key(),
            self.pair_token_vault.key(),
            self.pair_wsol_vault.key(),
            self.lp_mint.key(),
            self.curve_lp_account.key(),
            self.curve_wsol_account.key(),
            self.wsol_mint.key(),
            self.associated_token_program.key(),
            self.token_program.key(),
        ]
    }
}

/// Checks every key this program can derive. Vaults and the LP mint belong
/// to the AMM, which validates them against the pair itself.
pub fn validate_migration_keys(
    keys: &[Pubkey; MIGRATION_ACCOUNTS_LEN],
    config: &GlobalConfig,
    record: &TokenRecord,
    curve: &Pubkey,
) -> Result<()> {
    let [amm_program, amm_factory, pair, _, _, lp_mint, curve_lp_account, curve_wsol_account, wsol_mint, associated_token_program, token_program] =
        keys;
    let wsol = spl_token::native_mint::ID;

    let expected = [
        (amm_program, config.amm_program),
        (amm_factory, config.amm_factory),
        (pair, record.pair),
        (wsol_mint, wsol),
        (curve_wsol_account, get_associated_token_address(curve, &wsol)),
        (curve_lp_account, get_associated_token_address(curve, lp_mint)),
        (associated_token_program, associated_token::ID),
        (token_program, token::ID),
    ];
    for (actual, wanted) in expected {
        require_keys_eq!(*actual, wanted, CurveError::InvalidMigrationAccount);
    }
    Ok(())
}

/// Program-side accounts a migration moves value out of.
pub struct CurveAccounts<'info> {
    pub mint: AccountInfo<'info>,
    pub curve_token_account: AccountInfo<'info>,
    pub sol_vault: AccountInfo<'info>,
    pub payer: AccountInfo<'info>,
    /// Token-2022, owner of the curve mint
    pub token_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigrationResult {
    pub token_amount: u64,
    pub sol_amount: u64,
    pub liquidity_burned: u64,
}

/// The curve's deposit into the pair, arranged in pair order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deposit {
    pub order: PairOrder,
    pub a: PairSide,
    pub b: PairSide,
    pub args: AddLiquidityArgs,
}

impl Deposit {
    pub fn new(token: PairSide, sol: PairSide, token_amount: u64, sol_amount: u64) -> Self {
        let order = PairOrder::new(token.mint, sol.mint);
        let (a, b) = order.to_pair(token, sol);
        let (amount_a, amount_b) = order.to_pair(token_amount, sol_amount);

        Self {
            order,
            a,
            b,
            args: AddLiquidityArgs {
                amount_a,
                amount_b,
                min_a: 0,
                min_b: 0,
            },
        }
    }

    /// What the AMM took, as (tokens, lamports).
    pub fn used(&self, added: &AddLiquidityReturn) -> (u64, u64) {
        self.order.from_pair(added.used_a, added.used_b)
    }
}

pub fn migrate<'info>(
    pool: &mut Account<'info, VirtualLiquidity>,
    curve: &CurveAccounts<'info>,
    amm: &MigrationAccounts<'info>,
) -> Result<MigrationResult> {
    pool.mark_launched()?;
    pool.exit(&crate::ID)?;

    let token_amount = pool.reserve0;
    let sol_amount = pool.reserve1;
    let mint_key = pool.mint;
    let curve_key = pool.key();
    let curve_info = pool.to_account_info();

    let curve_bump = [pool.bump];
    let curve_seeds: &[&[u8]] = &[VIRTUAL_LIQUIDITY_SEED, mint_key.as_ref(), &curve_bump];
    let vault_bump = [pool.sol_vault_bump];
    let vault_seeds: &[&[u8]] = &[SOL_VAULT_SEED, curve_key.as_ref(), &vault_bump];

    let deposit = Deposit::new(
        PairSide {
            mint: mint_key,
            vault: amm.pair_token_vault.key(),
            provider: curve.curve_token_account.key(),
            token_program: curve.token_program.key(),
        },
        PairSide {
            mint: amm.wsol_mint.key(),
            vault: amm.pair_wsol_vault.key(),
            provider: amm.curve_wsol_account.key(),
            token_program: amm.token_program.key(),
        },
        token_amount,
        sol_amount,
    );

    if amm.pair.data_is_empty() {
        msg!("Creating pair {}", amm.pair.key());
        let ix = create_pair_ix(
            amm.amm_program.key(),
            &CreatePairKeys {
                factory: amm.amm_factory.key(),
                pair: amm.pair.key(),
                a: deposit.a,
                b: deposit.b,
                lp_mint: amm.lp_mint.key(),
                payer: curve.payer.key(),
                lp_token_program: amm.token_program.key(),
                system_program: curve.system_program.key(),
            },
        );
        invoke(
            &ix,
            &[
                amm.amm_factory.clone(),
                amm.pair.clone(),
                curve.mint.clone(),
                amm.wsol_mint.clone(),
                amm.pair_token_vault.clone(),
                amm.pair_wsol_vault.clone(),
                amm.lp_mint.clone(),
                curve.payer.clone(),
                curve.token_program.clone(),
                amm.token_program.clone(),
                curve.system_program.clone(),
                amm.amm_program.clone(),
            ],
        )?;
    }

    // the vault was created frozen like every account of the mint
    thaw_if_frozen(
        &curve.token_program,
        &amm.pair_token_vault,
        &curve.mint,
        &curve_info,
        curve_seeds,
    )?;

    for (account, mint) in [(&amm.curve_wsol_account, &amm.wsol_mint), (&amm.curve_lp_account, &amm.lp_mint)] {
        associated_token::create_idempotent(CpiContext::new(
            amm.associated_token_program.clone(),
            Create {
                payer: curve.payer.clone(),
                associated_token: account.clone(),
                authority: curve_info.clone(),
                mint: mint.clone(),
                system_program: curve.system_program.clone(),
                token_program: amm.token_program.clone(),
            },
        ))?;
    }

    // wrap the raised lamports; the vault keeps its rent-exempt minimum
    system_program::transfer(
        CpiContext::new_with_signer(
            curve.system_program.clone(),
            Transfer {
                from: curve.sol_vault.clone(),
                to: amm.curve_wsol_account.clone(),
            },
            &[vault_seeds],
        ),
        sol_amount,
    )?;
    token::sync_native(CpiContext::new(
        amm.token_program.clone(),
        SyncNative {
            account: amm.curve_wsol_account.clone(),
        },
    ))?;

    let ix = add_liquidity_ix(
        amm.amm_program.key(),
        &AddLiquidityKeys {
            pair: amm.pair.key(),
            a: deposit.a,
            b: deposit.b,
            lp_mint: amm.lp_mint.key(),
            provider_lp: amm.curve_lp_account.key(),
            provider_authority: curve_key,
            lp_token_program: amm.token_program.key(),
        },
        deposit.args,
    )?;
    invoke_signed(
        &ix,
        &[
            amm.pair.clone(),
            amm.pair_token_vault.clone(),
            amm.pair_wsol_vault.clone(),
            curve.mint.clone(),
            amm.wsol_mint.clone(),
            amm.lp_mint.clone(),
            curve.curve_token_account.clone(),
            amm.curve_wsol_account.clone(),
            amm.curve_lp_account.clone(),
            curve_info.clone(),
            curve.token_program.clone(),
            amm.token_program.clone(),
            amm.amm_program.clone(),
        ],
        &[curve_seeds],
    )?;

    let added = AddLiquidityReturn::decode(amm.amm_program.key, get_return_data())?;
    let (tokens_used, sol_used) = deposit.used(&added);
    msg!(
        "Added liquidity: {} tokens, {} lamports, {} LP",
        tokens_used,
        sol_used,
        added.liquidity
    );

    if added.liquidity > 0 {
        token::burn(
            CpiContext::new_with_signer(
                amm.token_program.clone(),
                Burn {
                    mint: amm.lp_mint.clone(),
                    from: amm.curve_lp_account.clone(),
                    authority: curve_info.clone(),
                },
                &[curve_seeds],
            ),
            added.liquidity,
        )?;
    }

    pool.settle_migration(tokens_used, sol_used)?;

    Ok(MigrationResult {
        token_amount: tokens_used,
        sol_amount: sol_used,
        liquidity_burned: added.liquidity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_TOTAL_SUPPLY;
    use crate::state::global_config::tests::{config, SOL};

    fn record(config: &GlobalConfig) -> TokenRecord {
        let mint = Pubkey::new_unique();
        TokenRecord {
            mint,
            creator: Pubkey::new_unique(),
            total_supply: TOKEN_TOTAL_SUPPLY,
            max_wallet: 0,
            created_at: 0,
            pair: crate::launch::amm::pair_address(
                &config.amm_program,
                &config.amm_factory,
                &mint,
                &spl_token::native_mint::ID,
            ),
            name: "TOKEN1".to_string(),
            symbol: "SYMBOL".to_string(),
            bump: 255,
        }
    }

    fn good_keys(config: &GlobalConfig, record: &TokenRecord, curve: &Pubkey) -> [Pubkey; MIGRATION_ACCOUNTS_LEN] {
        let lp_mint = Pubkey::new_unique();
        let wsol = spl_token::native_mint::ID;
        [
            config.amm_program,
            config.amm_factory,
            record.pair,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            lp_mint,
            get_associated_token_address(curve, &lp_mint),
            get_associated_token_address(curve, &wsol),
            wsol,
            associated_token::ID,
            token::ID,
        ]
    }

    #[test]
    fn test_expected_keys_pass() {
        let config = config();
        let record = record(&config);
        let curve = Pubkey::new_unique();

        assert!(validate_migration_keys(&good_keys(&config, &record, &curve), &config, &record, &curve).is_ok());
    }

    #[test]
    fn test_each_derived_key_is_checked() {
        let config = config();
        let record = record(&config);
        let curve = Pubkey::new_unique();
        let invalid: anchor_lang::error::Error = CurveError::InvalidMigrationAccount.into();

        for index in [0usize, 1, 2, 6, 7, 8, 9, 10] {
            let mut keys = good_keys(&config, &record, &curve);
            keys[index] = Pubkey::new_unique();
            assert_eq!(
                validate_migration_keys(&keys, &config, &record, &curve).unwrap_err(),
                invalid,
                "account {} accepted",
                index
            );
        }

        // LP account of some other owner
        let mut keys = good_keys(&config, &record, &curve);
        keys[6] = get_associated_token_address(&Pubkey::new_unique(), &keys[5]);
        assert!(validate_migration_keys(&keys, &config, &record, &curve).is_err());
    }

    #[test]
    fn test_short_account_list_is_missing() {
        let config = config();
        let record = record(&config);

        let missing: anchor_lang::error::Error = CurveError::MigrationAccountsMissing.into();
        let result = MigrationAccounts::parse(&[], &config, &record, &Pubkey::new_unique());
        assert_eq!(result.err().unwrap(), missing);
    }

    fn side(mint: Pubkey) -> PairSide {
        PairSide {
            mint,
            vault: Pubkey::new_unique(),
            provider: Pubkey::new_unique(),
            token_program: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_deposit_keeps_sides_together_when_token_sorts_first() {
        let token = side(Pubkey::new_from_array([0; 32]));
        let sol = side(spl_token::native_mint::ID);
        let deposit = Deposit::new(token, sol, 700, 30);

        assert!(deposit.order.token_is_a);
        assert_eq!((deposit.a, deposit.b), (token, sol));
        assert_eq!((deposit.args.amount_a, deposit.args.amount_b), (700, 30));

        let added = AddLiquidityReturn { used_a: 700, used_b: 30, liquidity: 144 };
        assert_eq!(deposit.used(&added), (700, 30));
    }

    #[test]
    fn test_deposit_keeps_sides_together_when_wsol_sorts_first() {
        let token = side(Pubkey::new_from_array([255; 32]));
        let sol = side(spl_token::native_mint::ID);
        let deposit = Deposit::new(token, sol, 700, 30);

        assert!(!deposit.order.token_is_a);
        // vault, provider and token program travel with their mint
        assert_eq!(deposit.a, sol);
        assert_eq!(deposit.b, token);
        assert_eq!((deposit.args.amount_a, deposit.args.amount_b), (30, 700));

        let added = AddLiquidityReturn { used_a: 30, used_b: 700, liquidity: 144 };
        assert_eq!(deposit.used(&added), (700, 30));
    }

    #[test]
    fn test_partial_fill_leaves_the_rest_on_the_curve() {
        let config = config();
        let mut pool = VirtualLiquidity {
            mint: Pubkey::new_from_array([255; 32]),
            reserve0: 0,
            reserve1: 0,
            k: 0,
            launched: false,
            bump: 0,
            sol_vault_bump: 0,
        };
        pool.initialize(&config, pool.mint, TOKEN_TOTAL_SUPPLY, 254, 253).unwrap();
        pool.buy(&config, 5 * SOL, config.buy_fee_bps, 0).unwrap();
        pool.mark_launched().unwrap();
        let (reserve0, reserve1) = (pool.reserve0, pool.reserve1);

        let deposit = Deposit::new(side(pool.mint), side(spl_token::native_mint::ID), reserve0, reserve1);
        // wsol is side a: the AMM took all the SOL and a bit less than all tokens
        let added = AddLiquidityReturn {
            used_a: reserve1,
            used_b: reserve0 - 1_000,
            liquidity: 1,
        };
        let (tokens_used, sol_used) = deposit.used(&added);
        pool.settle_migration(tokens_used, sol_used).unwrap();

        assert_eq!((pool.reserve0, pool.reserve1), (1_000, 0));
    }
}
