//! Lenient scalar decoding and presence rules shared by request bodies.
//!
//! Dashboard forms submit every value as a string, so numeric and boolean
//! fields accept either their JSON type or a string spelling of it. An empty
//! string decodes to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

use crate::error::{AppError, AppResult};

fn blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if blank(&value) {
        return Ok(None);
    }
    let parsed = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| i32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, got {value}")))
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if blank(&value) {
        return Ok(None);
    }
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))
}

pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if blank(&value) {
        return Ok(None);
    }
    let parsed = match &value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a boolean, got {value}")))
}

/// Non-empty rule for text: present and not blank.
pub fn filled(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Non-empty rule for identifiers: present and not zero.
pub fn nonzero(value: Option<i32>) -> Option<i32> {
    value.filter(|id| *id != 0)
}

pub fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{field} must be a date (YYYY-MM-DD).")))
}

pub fn ensure_not_negative(field: &str, value: f64) -> AppResult<f64> {
    if value < 0.0 {
        return Err(AppError::BadRequest(format!("{field} cannot be negative.")));
    }
    Ok(value)
}

/// A supplied text field on an update must not be blanked out.
pub fn replacement(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    match value {
        Some(s) if s.trim().is_empty() => {
            Err(AppError::BadRequest(format!("{field} cannot be empty.")))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_i32")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "opt_bool")]
        flag: Option<bool>,
    }

    fn probe(json: &str) -> Result<Probe, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn accepts_form_strings() {
        let p = probe(r#"{"id": "7", "price": "12.50", "flag": "on"}"#).unwrap();
        assert_eq!(p.id, Some(7));
        assert_eq!(p.price, Some(12.5));
        assert_eq!(p.flag, Some(true));
    }

    #[test]
    fn accepts_native_json_types() {
        let p = probe(r#"{"id": 3, "price": 4, "flag": 0}"#).unwrap();
        assert_eq!(p.id, Some(3));
        assert_eq!(p.price, Some(4.0));
        assert_eq!(p.flag, Some(false));
    }

    #[test]
    fn blank_and_missing_values_are_none() {
        let p = probe(r#"{"id": "", "flag": null}"#).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.price, None);
        assert_eq!(p.flag, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(probe(r#"{"id": "abc"}"#).is_err());
        assert!(probe(r#"{"id": 1.5}"#).is_err());
        assert!(probe(r#"{"flag": 2}"#).is_err());
        assert!(probe(r#"{"price": [1]}"#).is_err());
    }

    #[test]
    fn presence_rules() {
        assert_eq!(filled(Some("  ".into())), None);
        assert_eq!(filled(Some("x".into())), Some("x".into()));
        assert_eq!(nonzero(Some(0)), None);
        assert_eq!(nonzero(Some(4)), Some(4));
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("ExpiryDate", "2027-01-31").is_ok());
        assert!(parse_date("ExpiryDate", "31/01/2027").is_err());
    }
}
