use anchor_lang::prelude::*;

#[constant]
pub const GLOBAL_CONFIG_SEED: &[u8] = b"global_config";
#[constant]
pub const TOKEN_RECORD_SEED: &[u8] = b"token_record";
#[constant]
pub const VIRTUAL_LIQUIDITY_SEED: &[u8] = b"virtual_liquidity";
#[constant]
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";

/// Seed prefix the AMM uses for its pair accounts.
pub const PAIR_SEED: &[u8] = b"pair";

/// Launched tokens use the same precision as lamports.
pub const TOKEN_DECIMALS: u8 = 9;

/// 1 billion tokens with 9 decimals.
pub const TOKEN_TOTAL_SUPPLY: u64 = 1_000_000_000 * 1_000_000_000;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound for every configurable fee (10%)
pub const MAX_FEE_BPS: u16 = 1_000;

/// Oracle prices with more decimals than this are rejected.
pub const MAX_ORACLE_DECIMALS: u8 = 18;

// Metaplex limits
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
pub const MAX_URI_LEN: usize = 200;
