//! Lenient number/string helpers for fields the backend stores loosely.
//!
//! The backend keeps every number as a double, so integer fields may arrive
//! as `30.0`. Catalog years show up both as `2023` and `"2023-2024"`.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::{Number, Value};

fn number_to_i64(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Optional integer that also accepts integral floats.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|n| {
            number_to_i64(&n)
                .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", n)))
        })
        .transpose()
}

/// Optional string that also accepts a bare number.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// `null` is treated the same as a missing list.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_i64")]
        credits: Option<i64>,
        #[serde(default, deserialize_with = "opt_string_or_number")]
        year: Option<String>,
        #[serde(default, deserialize_with = "null_as_empty")]
        items: Vec<String>,
    }

    #[test]
    fn test_opt_i64_accepts_integral_floats() {
        let p: Probe = serde_json::from_str(r#"{"credits": 30.0}"#).unwrap();
        assert_eq!(p.credits, Some(30));
        let p: Probe = serde_json::from_str(r#"{"credits": 12}"#).unwrap();
        assert_eq!(p.credits, Some(12));
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.credits, None);
    }

    #[test]
    fn test_opt_i64_rejects_fractions() {
        assert!(serde_json::from_str::<Probe>(r#"{"credits": 3.5}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"credits": "3"}"#).is_err());
    }

    #[test]
    fn test_string_or_number() {
        let p: Probe = serde_json::from_str(r#"{"year": 2023}"#).unwrap();
        assert_eq!(p.year.as_deref(), Some("2023"));
        let p: Probe = serde_json::from_str(r#"{"year": "2023-2024"}"#).unwrap();
        assert_eq!(p.year.as_deref(), Some("2023-2024"));
        assert!(serde_json::from_str::<Probe>(r#"{"year": [1]}"#).is_err());
    }

    #[test]
    fn test_null_list() {
        let p: Probe = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(p.items.is_empty());
    }
}
