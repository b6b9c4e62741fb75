//! TwiML reply envelope expected by the messaging webhook.
use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Wraps `text` in a single `<Message>` response document.
pub fn message(text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>{}</Message></Response>"#,
        escape(text)
    )
}

pub fn message_response(text: &str) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        message(text),
    )
        .into_response()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            // Not representable in an XML 1.0 document.
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {
                escaped.push(char::REPLACEMENT_CHARACTER)
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
