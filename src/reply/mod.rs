//! Renders dispatcher replies as message text.
//!
//! Each channel style is a [`ReplyStyle`]; the styles only add presentation
//! and never recompute a number produced by the dispatcher.

pub mod plain;
pub mod rich;

use crate::core::{
    Channel, Command, CommandConfig, CommandError, ConversionKind, ConversionResult, Reply,
};

pub use plain::PlainStyle;
pub use rich::RichStyle;

pub const PROJECT_URL: &str = "https://github.com/richvincent/smsbtc";

pub trait ReplyStyle {
    fn prompt(&self) -> String;
    fn currencies(&self, codes: &[String]) -> String;
    fn price(&self, result: &ConversionResult, markup_percent: f64) -> String;
    fn fiat_to_btc(&self, result: &ConversionResult, markup_percent: f64) -> String;
    fn btc_to_fiat(&self, result: &ConversionResult, markup_percent: f64) -> String;
    fn help(&self) -> String;
    fn about(&self) -> String;
    fn unknown(&self, raw_body: &str) -> String;
    fn error(&self, error: &CommandError) -> String;
}

/// Picks the decorated style only for rich channels with formatting enabled.
pub fn style_for(channel: Channel, config: &CommandConfig) -> &'static dyn ReplyStyle {
    match channel {
        Channel::Rich if config.rich_formatting => &RichStyle,
        _ => &PlainStyle,
    }
}

pub fn format(reply: &Reply, channel: Channel, config: &CommandConfig) -> String {
    render(style_for(channel, config), reply, config)
}

pub fn render(style: &dyn ReplyStyle, reply: &Reply, config: &CommandConfig) -> String {
    match reply {
        Reply::Prompt => style.prompt(),
        Reply::Currencies(codes) => style.currencies(codes),
        Reply::Conversion(result) => match result.kind {
            ConversionKind::Price => style.price(result, config.markup_percent),
            ConversionKind::FiatToBtc => style.fiat_to_btc(result, config.markup_percent),
            ConversionKind::BtcToFiat => style.btc_to_fiat(result, config.markup_percent),
        },
        Reply::Help => style.help(),
        Reply::About => style.about(),
        Reply::Unknown { raw_body } => style.unknown(raw_body),
        Reply::Error(error) => style.error(error),
    }
}

/// Fiat amount with two decimals and comma thousands separators.
pub fn fiat(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push('.');
    grouped.push_str(frac_part);
    grouped
}

/// BTC amount with eight decimals.
pub fn btc(value: f64) -> String {
    format!("{value:.8}")
}

/// Usage line arguments and an example invocation.
pub(crate) fn usage(command: Command) -> Option<(&'static str, &'static str)> {
    match command {
        Command::BtcPrice => Some(("<currency>", "$btcprice usd")),
        Command::CurrencyConvert => Some(("<amount> <currency>", "$currencyconvert 100 usd")),
        Command::BtcConvert => Some(("<btc_amount> <currency>", "$btcconvert .17 usd")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_reply() -> Reply {
        Reply::Conversion(ConversionResult {
            kind: ConversionKind::Price,
            currency: "USD".to_string(),
            btc_amount: None,
            fiat_amount: None,
            base_price: Some(50000.0),
            spot_price: 56250.0,
        })
    }

    #[test]
    fn test_fiat_formatting() {
        assert_eq!(fiat(56250.0), "56,250.00");
        assert_eq!(fiat(0.0), "0.00");
        assert_eq!(fiat(999.999), "1,000.00");
        assert_eq!(fiat(1234567.891), "1,234,567.89");
        assert_eq!(fiat(100.0), "100.00");
        assert_eq!(fiat(-1500.5), "-1,500.50");
    }

    #[test]
    fn test_btc_formatting() {
        assert_eq!(btc(0.002), "0.00200000");
        assert_eq!(btc(1.0), "1.00000000");
        assert_eq!(btc(0.000000014), "0.00000001");
    }

    #[test]
    fn test_style_selection() {
        let enabled = CommandConfig {
            markup_percent: 12.5,
            rich_formatting: true,
        };
        let disabled = CommandConfig {
            rich_formatting: false,
            ..enabled
        };

        let rich = format(&Reply::Prompt, Channel::Rich, &enabled);
        assert!(rich.contains("*Welcome to SMSBtc!*"));

        let plain = format(&Reply::Prompt, Channel::Sms, &enabled);
        assert_eq!(plain, "Please send a command. Text $help for list of commands.");

        assert_eq!(format(&Reply::Prompt, Channel::Rich, &disabled), plain);
    }

    #[test]
    fn test_decoration_keeps_numbers() {
        let config = CommandConfig {
            markup_percent: 12.5,
            rich_formatting: true,
        };
        let reply = price_reply();

        let plain = format(&reply, Channel::Sms, &config);
        let rich = format(&reply, Channel::Rich, &config);
        for text in [&plain, &rich] {
            assert!(text.contains("50,000.00 USD"), "{text}");
            assert!(text.contains("56,250.00 USD"), "{text}");
            assert!(text.contains("12.5% markup"), "{text}");
        }
    }

    #[test]
    fn test_format_does_not_mutate_reply() {
        let config = CommandConfig::default();
        let reply = price_reply();
        let before = reply.clone();
        let _ = format(&reply, Channel::Rich, &config);
        assert_eq!(reply, before);
    }
}
