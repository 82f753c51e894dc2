//! Field deserializers for loosely shaped movie documents.
//!
//! Movie documents come from third-party exports (TMDB dumps, `mongoexport`, hand-written
//! seeds), so the same field can show up with different JSON shapes. Each helper here accepts
//! every shape we have seen for a field and maps anything else to "absent" rather than failing
//! the whole document.

use chrono::{DateTime, NaiveDate};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Accepts a plain string id, a numeric id, or a Mongo extended-JSON `{"$oid": "..."}`.
pub fn object_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) if !id.trim().is_empty() => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        Value::Object(map) => match map.get("$oid") {
            Some(Value::String(id)) => Ok(id.clone()),
            _ => Err(D::Error::custom("expected `$oid` to hold a string")),
        },
        other => Err(D::Error::custom(format!("invalid movie id: {other}"))),
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_value(&Value::deserialize(deserializer)?))
}

pub fn integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_value(&Value::deserialize(deserializer)?)
        .filter(|value| value.fract() == 0.0)
        .filter(|value| *value >= f64::from(i32::MIN) && *value <= f64::from(i32::MAX))
        .map(|value| value as i32))
}

/// A list of names, given either as a JSON array or as a single comma-joined string.
///
/// Array entries may also be TMDB-style objects (`{"id": 18, "name": "Drama"}`), in which case
/// the `name` is taken.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(joined) => split_joined(&joined),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_owned),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(date_value(&Value::deserialize(deserializer)?))
}

#[must_use]
pub fn split_joined(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::Object(map) => extended_number(map),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

/// `mongoexport` canonical mode wraps numbers as `{"$numberInt": "120"}` and friends.
fn extended_number(map: &Map<String, Value>) -> Option<f64> {
    ["$numberDouble", "$numberInt", "$numberLong", "$numberDecimal"]
        .iter()
        .find_map(|key| map.get(*key))
        .and_then(Value::as_str)
        .and_then(|text| text.parse::<f64>().ok())
}

fn date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date(text),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        Value::Object(map) => match map.get("$date")? {
            Value::Object(inner) => extended_number(inner)
                .and_then(|millis| DateTime::from_timestamp_millis(millis as i64))
                .map(|dt| dt.date_naive()),
            inner => date_value(inner),
        },
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            text.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
