//! Textual input events
//!
//! One event per line: `<parameterName> <value>` or `<parameterName>=<value>`.
//! The value is `true`, `false`, a number, or `null`/absent. Anything else is
//! passed through as NaN so the filter gate rejects it as a type mismatch.

use filter_pipeline::RawValue;

#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub name: String,
    pub value: Option<RawValue>,
}

pub fn parse_line(line: &str) -> Option<InputEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line
        .split(|c: char| c == '=' || c.is_whitespace())
        .filter(|s| !s.is_empty());

    let name = tokens.next()?.to_string();
    let value = tokens.next().and_then(parse_value);

    if let Some(rest) = tokens.next() {
        log::debug!("ignore trailing input after `{name}`: {rest}");
    }

    Some(InputEvent { name, value })
}

fn parse_value(token: &str) -> Option<RawValue> {
    match token {
        "null" => None,
        "true" => Some(RawValue::Bool(true)),
        "false" => Some(RawValue::Bool(false)),
        _ => Some(RawValue::Number(token.parse::<f64>().unwrap_or(f64::NAN))),
    }
}
