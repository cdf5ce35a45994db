//! Lenient readers for backend fields whose JSON type drifts between
//! endpoints (numbers as strings, switches as `"ON"`/`1`/`true`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a number from a JSON number or a numeric string.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Reads a switch state from a bool, `0`/`1` or `"ON"`/`"OFF"`.
pub fn switch_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" | "yes" => Some(true),
            "off" | "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_number(deserializer).map(|v| v.unwrap_or(0.0))
}

pub fn opt_switch<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(switch_from_value))
}

pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    opt_switch(deserializer).map(|v| v.unwrap_or(false))
}

/// Reads a string, accepting numbers and booleans as their text form.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_number")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "opt_switch")]
        light: Option<bool>,
        #[serde(default, deserialize_with = "bool_or_false")]
        verified: bool,
    }

    #[test]
    fn test_numbers_as_strings() {
        let p: Sample = serde_json::from_value(json!({"price": "1250.50"})).unwrap();
        assert_eq!(p.price, Some(1250.5));
        let p: Sample = serde_json::from_value(json!({"price": 99})).unwrap();
        assert_eq!(p.price, Some(99.0));
        let p: Sample = serde_json::from_value(json!({"price": "n/a"})).unwrap();
        assert_eq!(p.price, None);
        let p: Sample = serde_json::from_value(json!({"price": null})).unwrap();
        assert_eq!(p.price, None);
    }

    #[test]
    fn test_switch_forms() {
        for (raw, expected) in [
            (json!("ON"), Some(true)),
            (json!("off"), Some(false)),
            (json!(1), Some(true)),
            (json!(0), Some(false)),
            (json!(true), Some(true)),
            (json!("dim"), None),
        ] {
            let p: Sample = serde_json::from_value(json!({ "light": raw })).unwrap();
            assert_eq!(p.light, expected);
        }
        let p: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(!p.verified);
    }
}
