//! Plain text replies for SMS.
use super::{PROJECT_URL, ReplyStyle, btc, fiat, usage};
use crate::core::{Command, CommandError, ConversionResult};

pub struct PlainStyle;

impl PlainStyle {
    fn spot_line(result: &ConversionResult, markup_percent: f64) -> String {
        format!(
            "Spot price (with {markup_percent}% markup): {} {}",
            fiat(result.spot_price),
            result.currency
        )
    }
}

impl ReplyStyle for PlainStyle {
    fn prompt(&self) -> String {
        "Please send a command. Text $help for list of commands.".to_string()
    }

    fn currencies(&self, codes: &[String]) -> String {
        format!("Supported currencies: {}", codes.join(", "))
    }

    fn price(&self, result: &ConversionResult, markup_percent: f64) -> String {
        format!(
            "1 BTC = {} {}\n{}",
            fiat(result.base_price.unwrap_or_default()),
            result.currency,
            Self::spot_line(result, markup_percent)
        )
    }

    fn fiat_to_btc(&self, result: &ConversionResult, markup_percent: f64) -> String {
        format!(
            "{} {} = {} BTC\n{}",
            fiat(result.fiat_amount.unwrap_or_default()),
            result.currency,
            btc(result.btc_amount.unwrap_or_default()),
            Self::spot_line(result, markup_percent)
        )
    }

    fn btc_to_fiat(&self, result: &ConversionResult, markup_percent: f64) -> String {
        format!(
            "{} BTC = {} {}\n{}",
            btc(result.btc_amount.unwrap_or_default()),
            fiat(result.fiat_amount.unwrap_or_default()),
            result.currency,
            Self::spot_line(result, markup_percent)
        )
    }

    fn help(&self) -> String {
        format!(
            "List of valid commands:
-> $listcurrencies - Lists currencies currently supported by symbol
-> $btcprice - Lists Bitcoin price in requested currency - ie $btcprice usd
-> $currencyconvert - Converts specified currency amount to Bitcoin - ie $currencyconvert 100.00 eur
-> $btcconvert - Converts specified amount of bitcoin to chosen currency - ie $btcconvert .17 usd
-> $help - Returns a list of valid commands
-> $about - Returns information about author and application
-> For further assistance visit {PROJECT_URL}"
        )
    }

    fn about(&self) -> String {
        format!(
            "A majority of the global population is unbanked and lack access to global financial instruments.
This same large global unbanked population does indeed usually have access to cell service and SMS messaging.
The hope is to provide access to the Bitcoin economy through SMS messaging.

The project source code can be located at {PROJECT_URL}.
Please feel free to critique, contribute, or both.

Author: Richard Vincent
rich@richardvincent.com
@rkvincent

ref: https://en.wikipedia.org/wiki/Unbanked"
        )
    }

    fn unknown(&self, _raw_body: &str) -> String {
        format!("Unknown command. {}", self.help())
    }

    fn error(&self, error: &CommandError) -> String {
        match error {
            CommandError::MalformedCommand { command } => match usage(*command) {
                Some((_, example)) if *command == Command::BtcPrice => format!(
                    "Please properly form command. ie {example}. Text $help for more info"
                ),
                Some((_, example)) => format!("Please properly form command. ie {example}"),
                None => "Please properly form command. Text $help for more info".to_string(),
            },
            CommandError::InvalidAmount { command, .. } => match usage(*command) {
                Some((_, example)) => {
                    format!("Invalid amount. Please use a number. ie {example}")
                }
                None => "Invalid amount. Please use a number.".to_string(),
            },
            CommandError::UnsupportedCurrency { currency } => format!(
                "Unsupported currency {currency}. Text $listcurrencies for supported options."
            ),
            CommandError::SourceUnavailable => {
                "Sorry, unable to fetch Bitcoin prices at this time. Please try again later."
                    .to_string()
            }
            CommandError::ConversionError { command, .. } => {
                if *command == Command::BtcConvert {
                    "Error converting Bitcoin. Please try again.".to_string()
                } else {
                    "Error converting currency. Please try again.".to_string()
                }
            }
            CommandError::Internal => {
                "An error occurred processing your request. Please try again later.".to_string()
            }
        }
    }
}
