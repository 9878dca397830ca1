pub mod fees;
pub mod math;

pub use fees::*;
pub use math::*;
