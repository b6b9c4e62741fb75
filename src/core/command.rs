//! Tokenizing raw message text into a command

use std::fmt::Display;

/// The closed set of commands understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ListCurrencies,
    BtcPrice,
    CurrencyConvert,
    BtcConvert,
    Help,
    About,
    Unknown,
    Empty,
}

impl Command {
    /// Maps a lowercased verb to its command.
    pub fn from_verb(verb: &str) -> Self {
        match verb {
            "$listcurrencies" => Command::ListCurrencies,
            "$btcprice" => Command::BtcPrice,
            "$currencyconvert" => Command::CurrencyConvert,
            "$btcconvert" => Command::BtcConvert,
            "$help" => Command::Help,
            "$about" => Command::About,
            _ => Command::Unknown,
        }
    }

    /// Whether answering this command requires a rate snapshot.
    pub fn needs_rates(&self) -> bool {
        matches!(
            self,
            Command::ListCurrencies
                | Command::BtcPrice
                | Command::CurrencyConvert
                | Command::BtcConvert
        )
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Command::ListCurrencies => "$listcurrencies",
                Command::BtcPrice => "$btcprice",
                Command::CurrencyConvert => "$currencyconvert",
                Command::BtcConvert => "$btcconvert",
                Command::Help => "$help",
                Command::About => "$about",
                Command::Unknown => "unknown",
                Command::Empty => "empty",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased first token, `None` when the message had no tokens.
    pub verb: Option<String>,
    /// Remaining tokens with their case preserved.
    pub args: Vec<String>,
    pub raw_body: String,
}

impl ParsedCommand {
    pub fn command(&self) -> Command {
        self.verb
            .as_deref()
            .map_or(Command::Empty, Command::from_verb)
    }
}

/// Splits a message on whitespace runs. Never fails.
pub fn parse(raw_body: &str) -> ParsedCommand {
    let trimmed = raw_body.trim();
    let mut tokens = trimmed.split_whitespace();

    ParsedCommand {
        verb: tokens.next().map(str::to_lowercase),
        args: tokens.map(str::to_string).collect(),
        raw_body: trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verb_and_args() {
        let parsed = parse("  $BtcPrice   usd  ");
        assert_eq!(parsed.verb.as_deref(), Some("$btcprice"));
        assert_eq!(parsed.args, vec!["usd"]);
        assert_eq!(parsed.raw_body, "$BtcPrice   usd");
        assert_eq!(parsed.command(), Command::BtcPrice);
    }

    #[test]
    fn test_parse_preserves_argument_case() {
        let parsed = parse("$currencyconvert 100.50 EuR");
        assert_eq!(parsed.args, vec!["100.50", "EuR"]);
        assert_eq!(parsed.command(), Command::CurrencyConvert);
    }

    #[test]
    fn test_parse_empty_body() {
        for body in ["", "   ", "\n\t "] {
            let parsed = parse(body);
            assert!(parsed.verb.is_none());
            assert!(parsed.args.is_empty());
            assert_eq!(parsed.command(), Command::Empty);
        }
    }

    #[test]
    fn test_parse_mixed_whitespace() {
        let parsed = parse("$btcconvert\t0.5\n\nusd");
        assert_eq!(parsed.args, vec!["0.5", "usd"]);
        assert_eq!(parsed.command(), Command::BtcConvert);
    }

    #[test]
    fn test_unknown_verbs() {
        assert_eq!(parse("hello there").command(), Command::Unknown);
        assert_eq!(parse("btcprice usd").command(), Command::Unknown);
        assert_eq!(parse("$HELP").command(), Command::Help);
        assert_eq!(parse("$About").command(), Command::About);
        assert_eq!(parse("$LISTCURRENCIES").command(), Command::ListCurrencies);
    }

    #[test]
    fn test_needs_rates() {
        assert!(Command::BtcPrice.needs_rates());
        assert!(Command::ListCurrencies.needs_rates());
        assert!(!Command::Help.needs_rates());
        assert!(!Command::About.needs_rates());
        assert!(!Command::Unknown.needs_rates());
        assert!(!Command::Empty.needs_rates());
    }
}
