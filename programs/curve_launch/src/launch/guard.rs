//! Transfer lock of curve tokens.
//!
//! Curve mints are Token-2022 mints whose new token accounts start frozen,
//! with the curve PDA as freeze authority. An account can only receive
//! tokens once this program has thawed it, and accounts owned by the pair
//! are not thawed before launch. Migration thaws the pair vault itself.

use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{extension::ExtensionType, state::Mint as SplMint};
use anchor_spl::token_interface::{thaw_account, ThawAccount, TokenAccount};

use crate::errors::CurveError;
use crate::state::{TokenRecord, VirtualLiquidity};

/// Fails if a wallet already holding `balance` would end above `max_wallet`.
/// A zero `max_wallet` disables the limit.
pub fn check_max_wallet(max_wallet: u64, balance: u64, amount: u64) -> Result<()> {
    if max_wallet == 0 {
        return Ok(());
    }
    let after = balance
        .checked_add(amount)
        .ok_or(CurveError::ArithmeticOverflow)?;
    require!(after <= max_wallet, CurveError::MaxWalletExceeded);
    Ok(())
}

/// Whether a token account owned by `destination_owner` may start receiving
/// tokens. The pair cannot be seeded before migration, otherwise someone
/// could open the pool at an arbitrary price.
pub fn check_transfer(record: &TokenRecord, pool: &VirtualLiquidity, destination_owner: &Pubkey) -> Result<()> {
    if *destination_owner == record.pair {
        require!(pool.launched, CurveError::TransferBeforeLaunch);
    }
    Ok(())
}

/// Size of a curve mint: the base mint plus its default account state.
pub fn curve_mint_len() -> Result<usize> {
    Ok(ExtensionType::try_calculate_account_len::<SplMint>(&[
        ExtensionType::DefaultAccountState,
    ])?)
}

/// Reads the frozen flag of a classic or Token-2022 token account.
pub fn is_frozen(data: &[u8]) -> Result<bool> {
    let account = TokenAccount::try_deserialize(&mut &data[..])?;
    Ok(account.is_frozen())
}

/// Thaws `account` with the curve's freeze authority. No-op when it is
/// already usable.
pub fn thaw_if_frozen<'info>(
    token_program: &AccountInfo<'info>,
    account: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    curve: &AccountInfo<'info>,
    curve_seeds: &[&[u8]],
) -> Result<()> {
    let frozen = is_frozen(&account.try_borrow_data()?)?;
    if !frozen {
        return Ok(());
    }

    thaw_account(CpiContext::new_with_signer(
        token_program.clone(),
        ThawAccount {
            account: account.clone(),
            mint: mint.clone(),
            authority: curve.clone(),
        },
        &[curve_seeds],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOKEN_TOTAL_SUPPLY;
    use anchor_lang::solana_program::program_pack::Pack;
    use anchor_spl::token_2022::spl_token_2022::state::{Account as SplAccount, AccountState};

    fn err(expected: CurveError) -> anchor_lang::error::Error {
        expected.into()
    }

    fn record(max_wallet: u64) -> TokenRecord {
        TokenRecord {
            mint: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
            total_supply: TOKEN_TOTAL_SUPPLY,
            max_wallet,
            created_at: 0,
            pair: Pubkey::new_unique(),
            name: "TOKEN1".to_string(),
            symbol: "SYMBOL".to_string(),
            bump: 255,
        }
    }

    fn pool(launched: bool) -> VirtualLiquidity {
        VirtualLiquidity {
            mint: Pubkey::default(),
            reserve0: TOKEN_TOTAL_SUPPLY,
            reserve1: 0,
            k: 0,
            launched,
            bump: 0,
            sol_vault_bump: 0,
        }
    }

    fn token_account(owner: Pubkey, state: AccountState) -> Vec<u8> {
        let account = SplAccount {
            mint: Pubkey::new_unique(),
            owner,
            amount: 0,
            state,
            ..SplAccount::default()
        };
        let mut data = vec![0u8; SplAccount::LEN];
        SplAccount::pack(account, &mut data).unwrap();
        data
    }

    #[test]
    fn test_pair_is_locked_until_launch() {
        let record = record(0);

        assert_eq!(
            check_transfer(&record, &pool(false), &record.pair).unwrap_err(),
            err(CurveError::TransferBeforeLaunch)
        );
        assert!(check_transfer(&record, &pool(true), &record.pair).is_ok());
    }

    #[test]
    fn test_wallets_are_never_locked() {
        let record = record(1_000);
        let wallet = Pubkey::new_unique();

        assert!(check_transfer(&record, &pool(false), &wallet).is_ok());
        assert!(check_transfer(&record, &pool(true), &wallet).is_ok());
    }

    #[test]
    fn test_frozen_flag_is_read_from_account_data() {
        let owner = Pubkey::new_unique();

        assert!(is_frozen(&token_account(owner, AccountState::Frozen)).unwrap());
        assert!(!is_frozen(&token_account(owner, AccountState::Initialized)).unwrap());
        assert!(is_frozen(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_mint_has_room_for_default_state() {
        assert!(curve_mint_len().unwrap() > SplAccount::LEN);
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        assert!(check_max_wallet(0, u64::MAX - 1, 1).is_ok());
        assert!(check_max_wallet(10, 5, 5).is_ok());
        assert_eq!(
            check_max_wallet(10, 5, 6).unwrap_err(),
            err(CurveError::MaxWalletExceeded)
        );
        assert_eq!(
            check_max_wallet(10, u64::MAX, 1).unwrap_err(),
            err(CurveError::ArithmeticOverflow)
        );
    }
}
