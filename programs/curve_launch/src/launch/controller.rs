//! Launch threshold evaluation.
//!
//! After every trade on an active curve the pool is valued in the oracle's
//! quote currency and compared with `launch_market_cap`. The comparison is
//! pure so the instruction layer only has to act on the returned decision.

use anchor_lang::prelude::*;

use crate::curve::virtual_sol_reserve;
use crate::errors::CurveError;
use crate::launch::oracle::OraclePrice;
use crate::state::{GlobalConfig, LaunchValuation, VirtualLiquidity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchDecision {
    /// Below the threshold, keep trading on the curve
    Pending { market_value: u128 },
    /// Threshold crossed, migrate now
    Reached { market_value: u128 },
    /// Price could not be read; never migrate on missing data
    OracleUnavailable,
}

/// Lamport value of the pool under the configured valuation.
pub fn native_value(config: &GlobalConfig, pool: &VirtualLiquidity, total_supply: u64) -> Result<u128> {
    match config.valuation {
        LaunchValuation::FullyDiluted => {
            require!(pool.reserve0 > 0, CurveError::InsufficientReserves);
            // spot price (reserve1 + floor) / reserve0, times total supply
            Ok(virtual_sol_reserve(pool.reserve1, config.min_virtual_lp)?
                .checked_mul(total_supply as u128)
                .ok_or(CurveError::ArithmeticOverflow)?
                / pool.reserve0 as u128)
        }
        LaunchValuation::RaisedReserve => Ok(pool.reserve1 as u128),
    }
}

/// Pool value in quote units, 9 decimals.
pub fn market_value(
    config: &GlobalConfig,
    pool: &VirtualLiquidity,
    total_supply: u64,
    price: &OraclePrice,
) -> Result<u128> {
    let scale = 10u128
        .checked_pow(price.decimals as u32)
        .ok_or(CurveError::ArithmeticOverflow)?;
    // `read_latest_price` only returns positive prices
    let quote = native_value(config, pool, total_supply)?
        .checked_mul(price.price as u128)
        .ok_or(CurveError::ArithmeticOverflow)?;

    Ok(quote / scale)
}

pub fn launch_decision(
    config: &GlobalConfig,
    pool: &VirtualLiquidity,
    total_supply: u64,
    reading: Result<OraclePrice>,
) -> Result<LaunchDecision> {
    let price = match reading {
        Ok(price) => price,
        Err(_) => return Ok(LaunchDecision::OracleUnavailable),
    };

    let market_value = market_value(config, pool, total_supply, &price)?;
    if market_value >= config.launch_market_cap as u128 {
        Ok(LaunchDecision::Reached { market_value })
    } else {
        Ok(LaunchDecision::Pending { market_value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_TOTAL_SUPPLY;
    use crate::state::global_config::tests::{config, SOL};

    // $150 with 7 decimals
    const SOL_USD: OraclePrice = OraclePrice { price: 150_0000000, decimals: 7, publish_time: 0 };

    fn pool(config: &GlobalConfig) -> VirtualLiquidity {
        let mut pool = VirtualLiquidity {
            mint: Pubkey::default(),
            reserve0: 0,
            reserve1: 0,
            k: 0,
            launched: false,
            bump: 0,
            sol_vault_bump: 0,
        };
        pool.initialize(config, Pubkey::new_unique(), TOKEN_TOTAL_SUPPLY, 0, 0).unwrap();
        pool
    }

    #[test]
    fn test_fresh_curve_is_worth_the_floor() {
        let config = config();
        let pool = pool(&config);

        // spot price times supply equals the 1 SOL floor
        assert_eq!(native_value(&config, &pool, TOKEN_TOTAL_SUPPLY).unwrap(), SOL as u128);
        assert_eq!(
            market_value(&config, &pool, TOKEN_TOTAL_SUPPLY, &SOL_USD).unwrap(),
            150 * SOL as u128
        );
    }

    #[test]
    fn test_threshold_is_crossed_by_buying() {
        let config = config();
        let mut pool = pool(&config);

        pool.buy(&config, 10 * SOL, config.buy_fee_bps, 0).unwrap();
        let decision = launch_decision(&config, &pool, TOKEN_TOTAL_SUPPLY, Ok(SOL_USD)).unwrap();
        assert!(matches!(decision, LaunchDecision::Pending { .. }));

        pool.buy(&config, 15 * SOL, config.buy_fee_bps, 0).unwrap();
        match launch_decision(&config, &pool, TOKEN_TOTAL_SUPPLY, Ok(SOL_USD)).unwrap() {
            LaunchDecision::Reached { market_value } => {
                assert!(market_value >= config.launch_market_cap as u128)
            }
            other => panic!("expected launch, got {:?}", other),
        }
    }

    #[test]
    fn test_raised_reserve_valuation() {
        let mut config = config();
        config.valuation = LaunchValuation::RaisedReserve;
        config.launch_market_cap = 3_000 * SOL;
        let mut pool = pool(&config);

        pool.buy(&config, 20 * SOL, config.buy_fee_bps, 0).unwrap();
        assert_eq!(native_value(&config, &pool, TOKEN_TOTAL_SUPPLY).unwrap(), 18 * SOL as u128);
        assert_eq!(
            launch_decision(&config, &pool, TOKEN_TOTAL_SUPPLY, Ok(SOL_USD)).unwrap(),
            LaunchDecision::Pending { market_value: 2_700 * SOL as u128 }
        );

        pool.buy(&config, 5 * SOL, config.buy_fee_bps, 0).unwrap();
        assert_eq!(
            launch_decision(&config, &pool, TOKEN_TOTAL_SUPPLY, Ok(SOL_USD)).unwrap(),
            LaunchDecision::Reached { market_value: 3_375 * SOL as u128 }
        );
    }

    #[test]
    fn test_missing_price_never_launches() {
        let mut config = config();
        config.launch_market_cap = 1;
        let pool = pool(&config);

        let decision = launch_decision(
            &config,
            &pool,
            TOKEN_TOTAL_SUPPLY,
            Err(CurveError::OracleUnavailable.into()),
        )
        .unwrap();
        assert_eq!(decision, LaunchDecision::OracleUnavailable);
    }
}
