use anchor_lang::prelude::*;

/// Emitted once per `create_token`.
#[event]
pub struct TokenCreated {
    pub token: Pubkey,
    pub owner: Pubkey,
    pub supply: u64,
    pub name: String,
    pub symbol: String,
    pub max_wallet: u64,
}

#[event]
pub struct TokensBought {
    pub token: Pubkey,
    pub buyer: Pubkey,
    pub sol_in: u64,
    pub fee: u64,
    pub tokens_out: u64,
    pub reserve0: u64,
    pub reserve1: u64,
}

#[event]
pub struct TokensSold {
    pub token: Pubkey,
    pub seller: Pubkey,
    pub tokens_in: u64,
    pub gross_sol_out: u64,
    pub fee: u64,
    pub reserve0: u64,
    pub reserve1: u64,
}

#[event]
pub struct FeeToUpdated {
    pub old_fee_to: Pubkey,
    pub new_fee_to: Pubkey,
}

#[event]
pub struct BuyFeeBpsUpdated {
    pub old_bps: u16,
    pub new_bps: u16,
}

#[event]
pub struct SellFeeBpsUpdated {
    pub old_bps: u16,
    pub new_bps: u16,
}

#[event]
pub struct ListingFeeBpsUpdated {
    pub old_bps: u16,
    pub new_bps: u16,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

/// Emitted when a curve graduates into the external AMM pair.
#[event]
pub struct TokenLaunched {
    pub token: Pubkey,
    pub pair: Pubkey,
    /// Reserves handed to the AMM
    pub token_amount: u64,
    pub sol_amount: u64,
    /// LP tokens minted by the AMM and burned by the curve
    pub liquidity_burned: u64,
    /// Value in oracle quote units that triggered the launch
    pub market_value: u128,
}

/// The launch check was skipped because the price feed could not be read.
#[event]
pub struct OracleUnavailable {
    pub token: Pubkey,
    pub price_feed: Pubkey,
}
