//! 거래소 커넥터.

pub mod buda;
pub mod signing;
