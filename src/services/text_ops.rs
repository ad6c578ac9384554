use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ModelError, Result};

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random lowercase base-36 token of `len` characters.
///
/// Used for ids of synthesized documents, steps, questions, options and assets.
pub fn random_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Trim the text and decode HTML entities (`&amp;`, `&quot;`, `&#39;`, ...).
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text.trim()).into_owned()
}

/// Render a logic-less template (`{{var}}`, `{{#flag}}...{{/flag}}`) against `data`.
pub fn render_template<T: Serialize>(template: &str, data: &T) -> Result<String> {
    let compiled =
        mustache::compile_str(template).map_err(|e| ModelError::Template(e.to_string()))?;
    let mut out = Vec::new();
    compiled
        .render(&mut out, data)
        .map_err(|e| ModelError::Template(e.to_string()))?;
    String::from_utf8(out).map_err(|e| ModelError::Template(e.to_string()))
}

/// Coerce an arbitrary JSON value into a number.
///
/// Numbers pass through, numeric strings are parsed (blank strings are 0),
/// booleans map to 0/1. Everything else, including unparsable strings, is 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    if n.is_finite() { n } else { 0.0 }
}

/// Coerce an arbitrary JSON value into a string. Absent and null become empty.
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
