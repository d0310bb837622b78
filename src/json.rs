//! Typed view of a parsed tree through `serde_json`.
//!
//! The parser keeps literals and numbers as text. Hosts that want typed
//! values convert here: `true`/`false`/`null` become their JSON
//! counterparts, other barewords become strings, and numbers become
//! `serde_json::Number` where representable.

use serde_json::{Number, Value as JsonValue};

use crate::value::Value;

impl Value {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::String(text) => JsonValue::String(text.clone()),
            Value::Literal(text) => coerce_literal(text),
            Value::Number(text) => coerce_number(text),
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

fn coerce_literal(text: &str) -> JsonValue {
    match text {
        "true" => JsonValue::Bool(true),
        "false" => JsonValue::Bool(false),
        "null" => JsonValue::Null,
        other => JsonValue::String(other.to_string()),
    }
}

fn coerce_number(text: &str) -> JsonValue {
    match text.parse::<Number>() {
        Ok(number) => JsonValue::Number(number),
        Err(_) => JsonValue::String(text.to_string()),
    }
}
