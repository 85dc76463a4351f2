//! Lenient deserializers for loosely-typed legacy fields
//!
//! The legacy store was written by a schema-less client: roll numbers
//! appear as numbers or strings, amounts occasionally as strings.
//! These helpers accept either shape and fall back to a default
//! instead of failing the whole snapshot decode.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// i64 from a JSON number, numeric string, or anything else -> 0.
pub fn i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}

/// f64 from a JSON number, numeric string, or anything else -> 0.0.
pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// String from string or number; null -> empty.
pub fn string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::i64_lenient")]
        roll: i64,
        #[serde(default, deserialize_with = "super::f64_lenient")]
        due: f64,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let r: Row = serde_json::from_str(r#"{"roll": "17", "due": 250.5}"#).unwrap();
        assert_eq!(r.roll, 17);
        assert_eq!(r.due, 250.5);

        let r: Row = serde_json::from_str(r#"{"roll": 17, "due": "abc"}"#).unwrap();
        assert_eq!(r.roll, 17);
        assert_eq!(r.due, 0.0);
    }

    #[test]
    fn missing_fields_default() {
        let r: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(r.roll, 0);
        assert_eq!(r.due, 0.0);
    }
}
