//! Price feed reader.
//!
//! The feed is an account owned by the configured oracle program. After an
//! 8 byte account discriminator it holds a borsh encoded [`OraclePrice`].
//! Anything unexpected about the feed is reported as `OracleUnavailable`.

use anchor_lang::prelude::*;

use crate::constants::MAX_ORACLE_DECIMALS;
use crate::errors::CurveError;

pub const PRICE_FEED_DISCRIMINATOR_LEN: usize = 8;

/// Latest answer of the feed: `price / 10^decimals` quote units per SOL.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OraclePrice {
    pub price: i64,
    pub decimals: u8,
    pub publish_time: i64,
}

impl OraclePrice {
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut payload = data
            .get(PRICE_FEED_DISCRIMINATOR_LEN..)
            .ok_or(CurveError::OracleUnavailable)?;
        OraclePrice::deserialize(&mut payload).map_err(|_| error!(CurveError::OracleUnavailable))
    }

    /// Rejects non-positive, over-precise or stale answers.
    pub fn validate(&self, now: i64, max_age: i64) -> Result<()> {
        require!(self.price > 0, CurveError::OracleUnavailable);
        require!(self.decimals <= MAX_ORACLE_DECIMALS, CurveError::OracleUnavailable);
        require!(
            now.saturating_sub(self.publish_time) <= max_age,
            CurveError::OracleUnavailable
        );
        Ok(())
    }
}

pub fn read_latest_price(
    feed: &AccountInfo,
    oracle_program: &Pubkey,
    now: i64,
    max_age: i64,
) -> Result<OraclePrice> {
    require_keys_eq!(*feed.owner, *oracle_program, CurveError::OracleUnavailable);

    let data = feed
        .try_borrow_data()
        .map_err(|_| error!(CurveError::OracleUnavailable))?;
    let price = OraclePrice::decode(&data)?;
    price.validate(now, max_age)?;

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(price: &OraclePrice) -> Vec<u8> {
        let mut data = vec![7u8; PRICE_FEED_DISCRIMINATOR_LEN];
        price.serialize(&mut data).unwrap();
        data
    }

    fn unavailable() -> anchor_lang::error::Error {
        CurveError::OracleUnavailable.into()
    }

    #[test]
    fn test_decode_feed_payload() {
        let price = OraclePrice { price: 3_000_0000000, decimals: 7, publish_time: 1_700_000_000 };
        let mut data = encode(&price);
        data.extend_from_slice(&[0u8; 16]); // trailing padding is ignored

        assert_eq!(OraclePrice::decode(&data).unwrap(), price);
    }

    #[test]
    fn test_decode_rejects_short_data() {
        assert_eq!(OraclePrice::decode(&[0u8; 4]).unwrap_err(), unavailable());
        assert_eq!(OraclePrice::decode(&[0u8; 12]).unwrap_err(), unavailable());
    }

    #[test]
    fn test_validate_staleness_and_sign() {
        let now = 1_700_000_100;
        let fresh = OraclePrice { price: 150_0000000, decimals: 7, publish_time: now - 60 };
        assert!(fresh.validate(now, 60).is_ok());
        assert_eq!(fresh.validate(now, 59).unwrap_err(), unavailable());

        let negative = OraclePrice { price: -1, ..fresh };
        assert_eq!(negative.validate(now, 60).unwrap_err(), unavailable());

        let zero = OraclePrice { price: 0, ..fresh };
        assert_eq!(zero.validate(now, 60).unwrap_err(), unavailable());

        let too_precise = OraclePrice { decimals: 19, ..fresh };
        assert_eq!(too_precise.validate(now, 60).unwrap_err(), unavailable());
    }

    #[test]
    fn test_read_checks_feed_owner() {
        let key = Pubkey::new_unique();
        let oracle_program = Pubkey::new_unique();
        let now = 1_700_000_000;
        let mut lamports = 0u64;
        let mut data = encode(&OraclePrice { price: 2_000_0000000, decimals: 7, publish_time: now });

        let feed = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &oracle_program, false, 0);
        assert_eq!(read_latest_price(&feed, &oracle_program, now, 60).unwrap().price, 2_000_0000000);

        let other_program = Pubkey::new_unique();
        assert_eq!(
            read_latest_price(&feed, &other_program, now, 60).unwrap_err(),
            unavailable()
        );
    }
}
