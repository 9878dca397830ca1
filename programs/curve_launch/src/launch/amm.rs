//! Instruction encoding for the external constant-product AMM.
//!
//! The AMM is an Anchor program: instruction data is the 8 byte
//! `sha256("global:<name>")` prefix followed by borsh arguments, and
//! `add_liquidity` answers through return data.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use crate::constants::PAIR_SEED;
use crate::errors::CurveError;

pub fn sighash(name: &str) -> [u8; 8] {
    let preimage = format!("global:{}", name);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Orders two mints the way the factory does.
pub fn sort_mints(mint_a: Pubkey, mint_b: Pubkey) -> (Pubkey, Pubkey) {
    if mint_a < mint_b {
        (mint_a, mint_b)
    } else {
        (mint_b, mint_a)
    }
}

/// Pair account the factory creates for two mints, independent of order.
pub fn pair_address(amm_program: &Pubkey, factory: &Pubkey, mint_a: &Pubkey, mint_b: &Pubkey) -> Pubkey {
    let (first, second) = sort_mints(*mint_a, *mint_b);
    Pubkey::find_program_address(
        &[PAIR_SEED, factory.as_ref(), first.as_ref(), second.as_ref()],
        amm_program,
    )
    .0
}

/// Where the curve token sits in its (token, WSOL) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairOrder {
    pub token_is_a: bool,
}

impl PairOrder {
    pub fn new(mint: Pubkey, wsol: Pubkey) -> Self {
        let (first, _) = sort_mints(mint, wsol);
        Self { token_is_a: first == mint }
    }

    /// (token side, sol side) -> (a, b)
    pub fn to_pair<T>(self, token_side: T, sol_side: T) -> (T, T) {
        if self.token_is_a {
            (token_side, sol_side)
        } else {
            (sol_side, token_side)
        }
    }

    /// (a, b) -> (token side, sol side)
    pub fn from_pair<T>(self, a: T, b: T) -> (T, T) {
        self.to_pair(a, b)
    }
}

/// Accounts of one side of the pair. The two sides may live under
/// different token programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairSide {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub provider: Pubkey,
    pub token_program: Pubkey,
}

pub struct CreatePairKeys {
    pub factory: Pubkey,
    pub pair: Pubkey,
    pub a: PairSide,
    pub b: PairSide,
    pub lp_mint: Pubkey,
    pub payer: Pubkey,
    pub lp_token_program: Pubkey,
    pub system_program: Pubkey,
}

pub fn create_pair_ix(amm_program: Pubkey, keys: &CreatePairKeys) -> Instruction {
    Instruction {
        program_id: amm_program,
        accounts: vec![
            AccountMeta::new_readonly(keys.factory, false),
            AccountMeta::new(keys.pair, false),
            AccountMeta::new_readonly(keys.a.mint, false),
            AccountMeta::new_readonly(keys.b.mint, false),
            AccountMeta::new(keys.a.vault, false),
            AccountMeta::new(keys.b.vault, false),
            AccountMeta::new(keys.lp_mint, false),
            AccountMeta::new(keys.payer, true),
            AccountMeta::new_readonly(keys.a.token_program, false),
            AccountMeta::new_readonly(keys.b.token_program, false),
            AccountMeta::new_readonly(keys.lp_token_program, false),
            AccountMeta::new_readonly(keys.system_program, false),
        ],
        data: sighash("create_pair").to_vec(),
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquidityArgs {
    pub amount_a: u64,
    pub amount_b: u64,
    pub min_a: u64,
    pub min_b: u64,
}

pub struct AddLiquidityKeys {
    pub pair: Pubkey,
    pub a: PairSide,
    pub b: PairSide,
    pub lp_mint: Pubkey,
    pub provider_lp: Pubkey,
    pub provider_authority: Pubkey,
    pub lp_token_program: Pubkey,
}

pub fn add_liquidity_ix(amm_program: Pubkey, keys: &AddLiquidityKeys, args: AddLiquidityArgs) -> Result<Instruction> {
    let mut data = sighash("add_liquidity").to_vec();
    args.serialize(&mut data)
        .map_err(|_| error!(anchor_lang::error::ErrorCode::InstructionDidNotSerialize))?;

    Ok(Instruction {
        program_id: amm_program,
        accounts: vec![
            AccountMeta::new(keys.pair, false),
            AccountMeta::new(keys.a.vault, false),
            AccountMeta::new(keys.b.vault, false),
            AccountMeta::new_readonly(keys.a.mint, false),
            AccountMeta::new_readonly(keys.b.mint, false),
            AccountMeta::new(keys.lp_mint, false),
            AccountMeta::new(keys.a.provider, false),
            AccountMeta::new(keys.b.provider, false),
            AccountMeta::new(keys.provider_lp, false),
            AccountMeta::new_readonly(keys.provider_authority, true),
            AccountMeta::new_readonly(keys.a.token_program, false),
            AccountMeta::new_readonly(keys.b.token_program, false),
            AccountMeta::new_readonly(keys.lp_token_program, false),
        ],
        data,
    })
}

/// `(used_a, used_b, liquidity)` as returned by `add_liquidity`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquidityReturn {
    pub used_a: u64,
    pub used_b: u64,
    pub liquidity: u64,
}

impl AddLiquidityReturn {
    /// Decodes return data, which must have been set by `amm_program`.
    pub fn decode(amm_program: &Pubkey, return_data: Option<(Pubkey, Vec<u8>)>) -> Result<Self> {
        let (program_id, data) = return_data.ok_or(CurveError::AmmReturnDataMissing)?;
        require_keys_eq!(program_id, *amm_program, CurveError::AmmReturnDataMissing);
        Self::deserialize(&mut data.as_slice()).map_err(|_| error!(CurveError::AmmReturnDataMissing))
    }
}
