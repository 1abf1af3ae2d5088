//! Lenient readers for loosely typed field values.
//!
//! Every reader returns `None` for null, empty or mistyped input; callers
//! decide on the fallback.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

/// Suffix the record store appends to a key for its display form.
pub const FORMATTED_SUFFIX: &str = "@OData.Community.Display.V1.FormattedValue";

pub type Entity = Map<String, Value>;

pub fn string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn decimal(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// RFC 3339 timestamps, or bare dates taken as midnight UTC.
pub fn date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = match value? {
        Value::String(s) if !s.trim().is_empty() => s.trim(),
        _ => return None,
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(day) => day.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc()),
        Err(error) => {
            tracing::debug!("Ignoring unparseable date {text:?}: {error}");
            None
        }
    }
}

/// Id of a lookup, given either as a bare id or as an entity reference object.
pub fn lookup_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(reference) => string(reference.get("id")),
        other => string(Some(other)),
    }
}

pub fn formatted<'a>(entity: &'a Entity, key: &str) -> Option<&'a str> {
    entity
        .get(&format!("{key}{FORMATTED_SUFFIX}"))
        .and_then(Value::as_str)
}

/// First eight characters of an id, behind a prefix such as `INS-`.
pub fn short_code(prefix: &str, id: &str) -> String {
    format!("{prefix}{}", id.chars().take(8).collect::<String>())
}
