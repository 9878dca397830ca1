//! Constant-product quoting on virtual reserves.
//!
//! The curve prices with the same formula as a constant-product AMM but
//! without a fee baked into it; fees are taken separately (see `fees`).
//!
//! ```text
//!   (reserve_in + amount_in) * (reserve_out - amount_out) >= reserve_in * reserve_out
//!
//!   amount_out = floor(amount_in * reserve_out / (reserve_in + amount_in))
//! ```
//!
//! Flooring the output keeps every rounding error on the pool's side, so
//! the product of the reserves can only grow.

use anchor_lang::prelude::*;

use crate::errors::CurveError;

pub fn amount_out(amount_in: u64, reserve_in: u128, reserve_out: u128) -> Result<u64> {
    require!(amount_in > 0, CurveError::InvalidAmount);
    require!(reserve_in > 0 && reserve_out > 0, CurveError::InvalidAmount);

    let amount_in = amount_in as u128;
    let numerator = amount_in
        .checked_mul(reserve_out)
        .ok_or(CurveError::ArithmeticOverflow)?;
    let denominator = reserve_in
        .checked_add(amount_in)
        .ok_or(CurveError::ArithmeticOverflow)?;

    u64::try_from(numerator / denominator).map_err(|_| error!(CurveError::ArithmeticOverflow))
}

/// Effective SOL-side reserve: raised lamports plus the virtual floor.
pub fn virtual_sol_reserve(reserve1: u64, min_virtual_lp: u64) -> Result<u128> {
    (reserve1 as u128)
        .checked_add(min_virtual_lp as u128)
        .ok_or(error!(CurveError::ArithmeticOverflow))
}

/// `k = reserve0 * (reserve1 + min_virtual_lp)`
pub fn invariant(reserve0: u64, reserve1: u64, min_virtual_lp: u64) -> Result<u128> {
    virtual_sol_reserve(reserve1, min_virtual_lp)?
        .checked_mul(reserve0 as u128)
        .ok_or(error!(CurveError::ArithmeticOverflow))
}

/// Tokens received for `net_sol_in` lamports (fee already removed).
pub fn token_out_for_sol(net_sol_in: u64, reserve0: u64, reserve1: u64, min_virtual_lp: u64) -> Result<u64> {
    amount_out(
        net_sol_in,
        virtual_sol_reserve(reserve1, min_virtual_lp)?,
        reserve0 as u128,
    )
}

/// Gross lamports released for `token_in` tokens (before the sell fee).
pub fn sol_out_for_token(token_in: u64, reserve0: u64, reserve1: u64, min_virtual_lp: u64) -> Result<u64> {
    amount_out(
        token_in,
        reserve0 as u128,
        virtual_sol_reserve(reserve1, min_virtual_lp)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_TOTAL_SUPPLY;

    const SOL: u64 = 1_000_000_000;

    #[test]
    fn test_amount_out_matches_formula() {
        assert_eq!(amount_out(100, 1_000, 1_000).unwrap(), 90); // 100_000 / 1_100 = 90.9
        assert_eq!(amount_out(1, 1, 1).unwrap(), 0);
        assert_eq!(amount_out(10, 10, 1_000).unwrap(), 500);
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        let invalid: anchor_lang::error::Error = CurveError::InvalidAmount.into();
        assert_eq!(amount_out(0, 1_000, 1_000).unwrap_err(), invalid);
        assert_eq!(amount_out(10, 0, 1_000).unwrap_err(), invalid);
        assert_eq!(amount_out(10, 1_000, 0).unwrap_err(), invalid);
    }

    #[test]
    fn test_first_buy_against_fresh_curve() {
        // 0.9 SOL against supply with a 1 SOL floor
        let out = token_out_for_sol(9 * SOL / 10, TOKEN_TOTAL_SUPPLY, 0, SOL).unwrap();
        let expected = (9 * SOL / 10) as u128 * TOKEN_TOTAL_SUPPLY as u128 / (SOL + 9 * SOL / 10) as u128;
        assert_eq!(out as u128, expected);
        assert_eq!(out, 473_684_210_526_315_789);
    }

    #[test]
    fn test_product_never_decreases() {
        let min_vlp = SOL;
        let mut reserve0 = TOKEN_TOTAL_SUPPLY;
        let mut reserve1 = 0u64;

        for sol_in in [1u64, 7, SOL / 3, 2 * SOL + 1, 13 * SOL] {
            let k_before = invariant(reserve0, reserve1, min_vlp).unwrap();
            let out = token_out_for_sol(sol_in, reserve0, reserve1, min_vlp).unwrap();
            reserve0 -= out;
            reserve1 += sol_in;
            assert!(invariant(reserve0, reserve1, min_vlp).unwrap() >= k_before);
        }

        for token_in in [1u64, 999_999, TOKEN_TOTAL_SUPPLY / 100] {
            let k_before = invariant(reserve0, reserve1, min_vlp).unwrap();
            let out = sol_out_for_token(token_in, reserve0, reserve1, min_vlp).unwrap();
            reserve0 += token_in;
            reserve1 -= out;
            assert!(invariant(reserve0, reserve1, min_vlp).unwrap() >= k_before);
        }
    }

    #[test]
    fn test_selling_everything_back_never_drains_below_floor() {
        let min_vlp = SOL;
        let bought = token_out_for_sol(5 * SOL, TOKEN_TOTAL_SUPPLY, 0, min_vlp).unwrap();
        let reserve0 = TOKEN_TOTAL_SUPPLY - bought;

        let gross = sol_out_for_token(bought, reserve0, 5 * SOL, min_vlp).unwrap();
        assert!(gross <= 5 * SOL);
    }
}
