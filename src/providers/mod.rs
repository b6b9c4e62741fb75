pub mod blockchain_info;
pub mod util;

pub use blockchain_info::BlockchainTickerSource;
