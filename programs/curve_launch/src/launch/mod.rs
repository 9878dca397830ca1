pub mod amm;
pub mod controller;
pub mod guard;
pub mod migration;
pub mod oracle;

pub use controller::*;
pub use guard::*;
pub use migration::{CurveAccounts, MigrationAccounts, MigrationResult};
pub use oracle::*;

use anchor_lang::prelude::*;

use crate::events::{OracleUnavailable, TokenLaunched};
use crate::state::{GlobalConfig, TokenRecord, VirtualLiquidity};

/// Everything a trade hands over for the post-trade launch check.
pub struct LaunchContext<'a, 'info> {
    pub config: &'a GlobalConfig,
    pub record: &'a TokenRecord,
    pub price_feed: &'a AccountInfo<'info>,
    pub curve: CurveAccounts<'info>,
    pub remaining_accounts: &'a [AccountInfo<'info>],
}

/// Values the pool and migrates it if the launch cap is reached.
///
/// A missing or stale price never blocks the trade that triggered the check;
/// a failing migration always does.
pub fn evaluate_launch<'info>(
    ctx: LaunchContext<'_, 'info>,
    pool: &mut Account<'info, VirtualLiquidity>,
) -> Result<()> {
    if pool.launched {
        return Ok(());
    }

    let now = Clock::get()?.unix_timestamp;
    let reading = read_latest_price(
        ctx.price_feed,
        &ctx.config.oracle_program,
        now,
        ctx.config.max_price_age,
    );

    match launch_decision(ctx.config, pool, ctx.record.total_supply, reading)? {
        LaunchDecision::OracleUnavailable => {
            msg!("Oracle unavailable, launch check skipped");
            emit!(OracleUnavailable {
                token: pool.mint,
                price_feed: ctx.price_feed.key(),
            });
        }
        LaunchDecision::Pending { market_value } => {
            msg!(
                "Market value {} below launch cap {}",
                market_value,
                ctx.config.launch_market_cap
            );
        }
        LaunchDecision::Reached { market_value } => {
            msg!("Launch cap reached at market value {}", market_value);
            let amm = MigrationAccounts::parse(
                ctx.remaining_accounts,
                ctx.config,
                ctx.record,
                &pool.key(),
            )?;
            let migrated = migration::migrate(pool, &ctx.curve, &amm)?;

            emit!(TokenLaunched {
                token: pool.mint,
                pair: ctx.record.pair,
                token_amount: migrated.token_amount,
                sol_amount: migrated.sol_amount,
                liquidity_burned: migrated.liquidity_burned,
                market_value,
            });
        }
    }

    Ok(())
}
