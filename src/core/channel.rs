use std::fmt::Display;

const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Messaging style of the sender. Affects rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Rich,
}

impl Channel {
    /// Classifies a provider sender address such as `whatsapp:+15551234567`.
    pub fn from_sender(sender: &str) -> Self {
        if sender.trim_start().starts_with(WHATSAPP_PREFIX) {
            Channel::Rich
        } else {
            Channel::Sms
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Channel::Sms => "sms",
                Channel::Rich => "whatsapp",
            }
        )
    }
}
