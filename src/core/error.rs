//! User-facing command failures.
//!
//! Every variant is recoverable: the reply formatter renders each one as
//! text for the sender, nothing here is propagated to the transport.
use thiserror::Error;

use crate::core::command::Command;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Wrong number of arguments for the command.
    #[error("Malformed command: {command}")]
    MalformedCommand { command: Command },

    /// The amount token did not parse as a finite number.
    #[error("Invalid amount '{token}' for {command}")]
    InvalidAmount { command: Command, token: String },

    /// Currency code absent from the rate snapshot.
    #[error("Unsupported currency: {currency}")]
    UnsupportedCurrency { currency: String },

    /// Rate source fetch failed or timed out.
    #[error("Rate source unavailable")]
    SourceUnavailable,

    /// The quoted price cannot be used for conversion.
    #[error("Conversion failed for {currency} in {command}")]
    ConversionError { command: Command, currency: String },

    /// Anything unexpected while handling a message.
    #[error("Internal error")]
    Internal,
}
