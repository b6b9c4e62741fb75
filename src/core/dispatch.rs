//! Validates command arguments and runs them against a rate snapshot.
use crate::core::command::{Command, ParsedCommand};
use crate::core::config::CommandConfig;
use crate::core::conversion::{self, LookupError};
use crate::core::error::CommandError;
use crate::core::rates::{RateSnapshot, RateSource};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// Price of one BTC.
    Price,
    FiatToBtc,
    BtcToFiat,
}

/// Outcome of a price or conversion command.
///
/// `spot_price` is the marked-up fiat figure: the unit price for
/// [`ConversionKind::Price`], the fiat side of the conversion otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub kind: ConversionKind,
    pub currency: String,
    pub btc_amount: Option<f64>,
    pub fiat_amount: Option<f64>,
    pub base_price: Option<f64>,
    pub spot_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Empty message; ask the sender for a command.
    Prompt,
    Currencies(Vec<String>),
    Conversion(ConversionResult),
    Help,
    About,
    Unknown { raw_body: String },
    Error(CommandError),
}

/// Answers a parsed command from an already fetched snapshot.
pub fn evaluate(parsed: &ParsedCommand, snapshot: &RateSnapshot, config: &CommandConfig) -> Reply {
    let command = parsed.command();
    let result = match command {
        Command::Empty => Ok(Reply::Prompt),
        Command::Help => Ok(Reply::Help),
        Command::About => Ok(Reply::About),
        Command::Unknown => Ok(Reply::Unknown {
            raw_body: parsed.raw_body.clone(),
        }),
        Command::ListCurrencies => Ok(Reply::Currencies(snapshot.currencies())),
        Command::BtcPrice => btc_price(&parsed.args, snapshot, config),
        Command::CurrencyConvert | Command::BtcConvert => {
            convert(command, &parsed.args, snapshot, config)
        }
    };

    result.unwrap_or_else(Reply::Error)
}

fn btc_price(
    args: &[String],
    snapshot: &RateSnapshot,
    config: &CommandConfig,
) -> Result<Reply, CommandError> {
    let [currency] = args else {
        return Err(CommandError::MalformedCommand {
            command: Command::BtcPrice,
        });
    };
    let currency = currency.to_uppercase();
    let price = conversion::usable_price_of(snapshot, &currency)
        .map_err(|e| lookup_error(Command::BtcPrice, e))?;

    Ok(Reply::Conversion(ConversionResult {
        kind: ConversionKind::Price,
        spot_price: marked_up(Command::BtcPrice, &currency, price, config)?,
        currency,
        btc_amount: None,
        fiat_amount: None,
        base_price: Some(price),
    }))
}

fn convert(
    command: Command,
    args: &[String],
    snapshot: &RateSnapshot,
    config: &CommandConfig,
) -> Result<Reply, CommandError> {
    let [amount, currency] = args else {
        return Err(CommandError::MalformedCommand { command });
    };
    let amount = parse_amount(amount).ok_or_else(|| CommandError::InvalidAmount {
        command,
        token: amount.clone(),
    })?;
    let currency = currency.to_uppercase();
    let price = conversion::price_of(snapshot, &currency).map_err(|e| lookup_error(command, e))?;

    let (kind, btc_amount, fiat_amount) = if command == Command::CurrencyConvert {
        let btc = conversion::to_btc(snapshot, &currency, amount)
            .map_err(|e| lookup_error(command, e))?;
        (ConversionKind::FiatToBtc, btc, amount)
    } else {
        let fiat = conversion::to_fiat(snapshot, &currency, amount)
            .map_err(|e| lookup_error(command, e))?;
        (ConversionKind::BtcToFiat, amount, fiat)
    };

    Ok(Reply::Conversion(ConversionResult {
        kind,
        spot_price: marked_up(command, &currency, fiat_amount, config)?,
        currency,
        btc_amount: Some(btc_amount),
        fiat_amount: Some(fiat_amount),
        base_price: Some(price),
    }))
}

fn marked_up(
    command: Command,
    currency: &str,
    fiat_amount: f64,
    config: &CommandConfig,
) -> Result<f64, CommandError> {
    let spot = conversion::spot_price(fiat_amount, config.markup_percent);
    if spot.is_finite() {
        Ok(spot)
    } else {
        debug!(currency, fiat_amount, "Spot price overflowed");
        Err(CommandError::ConversionError {
            command,
            currency: currency.to_string(),
        })
    }
}

fn parse_amount(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lookup_error(command: Command, err: LookupError) -> CommandError {
    match err {
        LookupError::NotFound(currency) => CommandError::UnsupportedCurrency { currency },
        LookupError::UnusablePrice { currency, price } => {
            debug!(%currency, price, "Rejecting unusable price");
            CommandError::ConversionError { command, currency }
        }
    }
}

/// Answers commands, fetching one snapshot per call for commands that need
/// price data. Holds no mutable state, so it can serve concurrent requests.
pub struct Dispatcher<'a> {
    source: &'a dyn RateSource,
    config: &'a CommandConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(source: &'a dyn RateSource, config: &'a CommandConfig) -> Self {
        Dispatcher { source, config }
    }

    pub async fn dispatch(&self, parsed: &ParsedCommand) -> Reply {
        let command = parsed.command();
        debug!(%command, args = ?parsed.args, "Dispatching command");

        if !command.needs_rates() {
            return evaluate(parsed, &RateSnapshot::default(), self.config);
        }

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                debug!(
                    currencies = snapshot.len(),
                    fetched_at = ?snapshot.fetched_at(),
                    "Fetched rate snapshot"
                );
                evaluate(parsed, &snapshot, self.config)
            }
            Err(e) => {
                error!(error = %e, "Ticker fetch failed");
                Reply::Error(CommandError::SourceUnavailable)
            }
        }
    }
}
