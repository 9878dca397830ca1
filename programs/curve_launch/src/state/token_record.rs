use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, MAX_SYMBOL_LEN, MAX_URI_LEN};
use crate::errors::CurveError;

/// Immutable facts about a launched token.
#[account]
#[derive(InitSpace)]
pub struct TokenRecord {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub total_supply: u64,
    /// 0 = unlimited
    pub max_wallet: u64,
    pub created_at: i64,
    /// AMM pair the curve graduates into
    pub pair: Pubkey,
    #[max_len(32)]
    pub name: String,
    #[max_len(10)]
    pub symbol: String,
    pub bump: u8,
}

pub fn validate_metadata(name: &str, symbol: &str, uri: &str) -> Result<()> {
    require!(!name.trim().is_empty() && name.len() <= MAX_NAME_LEN, CurveError::InvalidName);
    require!(!symbol.trim().is_empty() && symbol.len() <= MAX_SYMBOL_LEN, CurveError::InvalidSymbol);
    require!(uri.len() <= MAX_URI_LEN, CurveError::InvalidConfig);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_validation() {
        assert!(validate_metadata("TOKEN1", "SYMBOL", "").is_ok());
        assert!(validate_metadata(&"n".repeat(32), &"s".repeat(10), "https://x").is_ok());

        let invalid_name: anchor_lang::error::Error = CurveError::InvalidName.into();
        let invalid_symbol: anchor_lang::error::Error = CurveError::InvalidSymbol.into();
        assert_eq!(validate_metadata("", "SYMBOL", "").unwrap_err(), invalid_name);
        assert_eq!(validate_metadata("  ", "SYMBOL", "").unwrap_err(), invalid_name);
        assert_eq!(validate_metadata(&"n".repeat(33), "SYMBOL", "").unwrap_err(), invalid_name);
        assert_eq!(validate_metadata("TOKEN1", "", "").unwrap_err(), invalid_symbol);
        assert_eq!(validate_metadata("TOKEN1", &"s".repeat(11), "").unwrap_err(), invalid_symbol);
    }
}
