pub mod create_token;
pub mod init_protocol;
pub mod quote;
pub mod thaw_token_account;
pub mod trade_token;
pub mod update_config;

pub use create_token::*;
pub use init_protocol::*;
pub use quote::*;
pub use thaw_token_account::*;
pub use trade_token::*;
pub use update_config::*;
