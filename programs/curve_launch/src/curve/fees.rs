//! Fee rules shared by every trade path.
//!
//! Fees are plain basis-point cuts taken from the lamport side of a trade:
//! from the incoming SOL on a buy, from the gross SOL payout on a sell.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, MAX_FEE_BPS};
use crate::errors::CurveError;

/// Result of charging a fee on an amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub net: u64,
    pub fee: u64,
}

/// `fee = floor(amount * bps / 10000)`, `net = amount - fee`.
pub fn apply_fee(amount: u64, bps: u16) -> Result<FeeSplit> {
    let fee = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(CurveError::ArithmeticOverflow)?
        / BPS_DENOMINATOR as u128;
    let fee = u64::try_from(fee).map_err(|_| CurveError::ArithmeticOverflow)?;
    let net = amount.checked_sub(fee).ok_or(CurveError::ArithmeticOverflow)?;

    Ok(FeeSplit { net, fee })
}

/// Validates a fee parameter change against the cap and the current value.
pub fn validate_fee_update(current: u16, new: u16) -> Result<()> {
    require!(new <= MAX_FEE_BPS, CurveError::FeeTooHigh);
    require!(new != current, CurveError::RedundantUpdate);
    Ok(())
}

/// Validates a recipient change: non-null and actually different.
pub fn validate_address_update(current: &Pubkey, new: &Pubkey) -> Result<()> {
    require!(*new != Pubkey::default(), CurveError::ZeroAddress);
    require!(new != current, CurveError::RedundantUpdate);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(expected: CurveError) -> anchor_lang::error::Error {
        expected.into()
    }

    #[test]
    fn test_fee_is_floored() {
        assert_eq!(apply_fee(1_000_000_000, 1000).unwrap(), FeeSplit { net: 900_000_000, fee: 100_000_000 });
        // 9999 * 1000 / 10000 = 999.9
        assert_eq!(apply_fee(9_999, 1000).unwrap(), FeeSplit { net: 9_000, fee: 999 });
        assert_eq!(apply_fee(9, 1000).unwrap(), FeeSplit { net: 9, fee: 0 });
    }

    #[test]
    fn test_zero_bps_charges_nothing() {
        assert_eq!(apply_fee(123_456, 0).unwrap(), FeeSplit { net: 123_456, fee: 0 });
    }

    #[test]
    fn test_fee_on_max_amount_does_not_overflow() {
        let split = apply_fee(u64::MAX, MAX_FEE_BPS).unwrap();
        assert_eq!(split.fee, u64::MAX / 10);
        assert_eq!(split.net + split.fee, u64::MAX);
    }

    #[test]
    fn test_fee_update_rules() {
        assert!(validate_fee_update(1000, 123).is_ok());
        assert!(validate_fee_update(0, MAX_FEE_BPS).is_ok());
        assert_eq!(validate_fee_update(1000, 1001).unwrap_err(), err(CurveError::FeeTooHigh));
        assert_eq!(validate_fee_update(1000, 1000).unwrap_err(), err(CurveError::RedundantUpdate));
    }

    #[test]
    fn test_fee_too_high_wins_over_redundant() {
        // a value above the cap can never be current, but the cap is checked first anyway
        assert_eq!(validate_fee_update(2000, 2000).unwrap_err(), err(CurveError::FeeTooHigh));
    }

    #[test]
    fn test_address_update_rules() {
        let current = Pubkey::new_unique();
        let next = Pubkey::new_unique();

        assert!(validate_address_update(&current, &next).is_ok());
        assert_eq!(
            validate_address_update(&current, &Pubkey::default()).unwrap_err(),
            err(CurveError::ZeroAddress)
        );
        assert_eq!(
            validate_address_update(&current, &current).unwrap_err(),
            err(CurveError::RedundantUpdate)
        );
    }
}
