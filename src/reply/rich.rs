//! Decorated replies for WhatsApp: bold markers and currency emoji.
use super::{PROJECT_URL, ReplyStyle, btc, fiat, usage};
use crate::core::{Command, CommandError, ConversionResult};

const DEFAULT_EMOJI: &str = "💵";
const CURRENCIES_PER_LINE: usize = 6;

const CURRENCY_EMOJI: &[(&str, &str)] = &[
    ("USD", "🇺🇸"),
    ("EUR", "🇪🇺"),
    ("GBP", "🇬🇧"),
    ("JPY", "🇯🇵"),
    ("CNY", "🇨🇳"),
    ("AUD", "🇦🇺"),
    ("CAD", "🇨🇦"),
    ("CHF", "🇨🇭"),
    ("INR", "🇮🇳"),
    ("BRL", "🇧🇷"),
    ("MXN", "🇲🇽"),
    ("KRW", "🇰🇷"),
    ("RUB", "🇷🇺"),
    ("SGD", "🇸🇬"),
    ("HKD", "🇭🇰"),
    ("SEK", "🇸🇪"),
    ("NOK", "🇳🇴"),
    ("DKK", "🇩🇰"),
    ("NZD", "🇳🇿"),
    ("ZAR", "🇿🇦"),
];

pub fn currency_emoji(currency: &str) -> &'static str {
    CURRENCY_EMOJI
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(currency))
        .map_or(DEFAULT_EMOJI, |(_, emoji)| *emoji)
}

pub struct RichStyle;

impl RichStyle {
    fn spot_block(spot: &str, markup_percent: f64) -> String {
        format!("💰 Spot price (with {markup_percent}% markup):\n{spot}")
    }
}

impl ReplyStyle for RichStyle {
    fn prompt(&self) -> String {
        "👋 *Welcome to SMSBtc!*\n\nPlease send a command. Type *$help* for list of commands."
            .to_string()
    }

    fn currencies(&self, codes: &[String]) -> String {
        let lines: Vec<String> = codes
            .chunks(CURRENCIES_PER_LINE)
            .map(|chunk| chunk.join(", "))
            .collect();
        format!("*Supported Currencies* 💱\n\n{}", lines.join("\n"))
    }

    fn price(&self, result: &ConversionResult, markup_percent: f64) -> String {
        let currency = &result.currency;
        let spot = format!("*{} {currency}*", fiat(result.spot_price));
        format!(
            "*Bitcoin Price* ₿ {}\n\n1 BTC = *{} {currency}*\n\n{}",
            currency_emoji(currency),
            fiat(result.base_price.unwrap_or_default()),
            Self::spot_block(&spot, markup_percent)
        )
    }

    fn fiat_to_btc(&self, result: &ConversionResult, markup_percent: f64) -> String {
        let currency = &result.currency;
        let spot = format!("{} {currency}", fiat(result.spot_price));
        format!(
            "*Currency Conversion* {} → ₿\n\n{} {currency} = *{} BTC*\n\n{}",
            currency_emoji(currency),
            fiat(result.fiat_amount.unwrap_or_default()),
            btc(result.btc_amount.unwrap_or_default()),
            Self::spot_block(&spot, markup_percent)
        )
    }

    fn btc_to_fiat(&self, result: &ConversionResult, markup_percent: f64) -> String {
        let currency = &result.currency;
        let spot = format!("{} {currency}", fiat(result.spot_price));
        format!(
            "*Bitcoin Conversion* ₿ → {}\n\n{} BTC = *{} {currency}*\n\n{}",
            currency_emoji(currency),
            btc(result.btc_amount.unwrap_or_default()),
            fiat(result.fiat_amount.unwrap_or_default()),
            Self::spot_block(&spot, markup_percent)
        )
    }

    fn help(&self) -> String {
        format!(
            "*SMSBtc Commands* 📱

💰 *$listcurrencies* - View all supported currencies

📊 *$btcprice* <currency>
   Example: $btcprice usd

💱 *$currencyconvert* <amount> <currency>
   Example: $currencyconvert 100 eur

₿ *$btcconvert* <btc_amount> <currency>
   Example: $btcconvert 0.01 usd

❓ *$help* - Show this help message

ℹ️ *$about* - About this service

🔗 {PROJECT_URL}"
        )
    }

    fn about(&self) -> String {
        format!(
            "*About SMSBtc* 🌍

A large portion of the global population is unbanked and lacks access to global financial instruments. 🏦

This service provides access to Bitcoin information through simple messaging - no smartphone or app required! 📲

*Mission:* Financial inclusion through accessible technology 💡

*Source:* {PROJECT_URL}
Contributions welcome! 🙌

*Author:* Richard Vincent
📧 rich@richardvincent.com
🐦 @rkvincent

📚 https://en.wikipedia.org/wiki/Unbanked"
        )
    }

    fn unknown(&self, raw_body: &str) -> String {
        format!("❌ *Unknown Command*\n\n_{raw_body}_\n\n{}", self.help())
    }

    fn error(&self, error: &CommandError) -> String {
        match error {
            CommandError::MalformedCommand { command } => match usage(*command) {
                Some((args, example)) => format!(
                    "❌ *Invalid Format*\n\nUsage: *{command}* {args}\nExample: {example}"
                ),
                None => "❌ *Invalid Format*\n\nType *$help* for list of commands.".to_string(),
            },
            CommandError::InvalidAmount { command, .. } => match usage(*command) {
                Some((_, example)) => format!(
                    "❌ *Invalid Amount*\n\nPlease enter a valid number.\nExample: {example}"
                ),
                None => "❌ *Invalid Amount*\n\nPlease enter a valid number.".to_string(),
            },
            CommandError::UnsupportedCurrency { currency } => format!(
                "❌ *Unsupported Currency*\n\n{currency} is not supported.\nType *$listcurrencies* to see all options."
            ),
            CommandError::SourceUnavailable => "⚠️ *Service Temporarily Unavailable*\n\nUnable to fetch Bitcoin prices right now. Please try again in a few moments.".to_string(),
            CommandError::ConversionError { command, currency } => {
                let what = if *command == Command::BtcConvert {
                    "Bitcoin"
                } else {
                    currency.as_str()
                };
                format!("❌ *Conversion Failed*\n\nUnable to convert {what} right now. Please try again.")
            }
            CommandError::Internal => {
                "⚠️ *Error*\n\nSomething went wrong. Please try again later.".to_string()
            }
        }
    }
}
