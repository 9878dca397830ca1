pub mod global_config;
pub mod token_record;
pub mod virtual_liquidity;

pub use global_config::*;
pub use token_record::*;
pub use virtual_liquidity::*;
