use anchor_lang::prelude::*;

#[error_code]
pub enum CurveError {
    #[msg("Caller is not the protocol owner")]
    Unauthorized,
    #[msg("Amount must be greater than 0")]
    InvalidAmount,
    #[msg("Slippage")]
    SlippageExceeded,
    #[msg("Fee cannot exceed 1000 bps")]
    FeeTooHigh,
    #[msg("Redundant update: value is already set")]
    RedundantUpdate,
    #[msg("Address cannot be the zero address")]
    ZeroAddress,
    #[msg("Token already launched")]
    AlreadyLaunched,
    #[msg("Can't send tokens to pair before launch")]
    TransferBeforeLaunch,
    #[msg("Price oracle unavailable")]
    OracleUnavailable,
    #[msg("Token name is empty or too long")]
    InvalidName,
    #[msg("Token symbol is empty or too long")]
    InvalidSymbol,
    #[msg("Max wallet exceeded")]
    MaxWalletExceeded,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Insufficient curve reserves")]
    InsufficientReserves,
    #[msg("Constant product invariant violated")]
    InvariantViolated,
    #[msg("Fee recipient does not match the configured fee_to")]
    InvalidFeeRecipient,
    #[msg("Invalid protocol configuration")]
    InvalidConfig,
    #[msg("Launch threshold reached but migration accounts were not supplied")]
    MigrationAccountsMissing,
    #[msg("Migration account does not match the expected address")]
    InvalidMigrationAccount,
    #[msg("AMM did not return liquidity data")]
    AmmReturnDataMissing,
}
