//! Command interpretation and conversion core

pub mod channel;
pub mod command;
pub mod config;
pub mod conversion;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use channel::Channel;
pub use command::{Command, ParsedCommand, parse};
pub use config::{AppConfig, CommandConfig};
pub use dispatch::{ConversionKind, ConversionResult, Dispatcher, Reply, evaluate};
pub use error::CommandError;
pub use rates::{PriceQuote, RateSnapshot, RateSource};
