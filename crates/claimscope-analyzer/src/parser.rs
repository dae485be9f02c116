//! Parse LLM output into typed stage outputs

use crate::error::AnalyzerError;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a model response into the stage's output struct
pub fn parse_structured<T: DeserializeOwned>(response: &str) -> Result<T, AnalyzerError> {
    let value = extract_json(response)?;
    serde_json::from_value(value).map_err(|e| AnalyzerError::InvalidFormat(e.to_string()))
}

/// Locate the JSON object in a response
///
/// Models wrap JSON in markdown fences or surround it with prose, and the
/// prose may contain braces of its own. Decoding starts at each `{` in turn;
/// the first complete object wins and anything after it is ignored.
fn extract_json(response: &str) -> Result<Value, AnalyzerError> {
    let mut first_error = None;

    for (start, _) in response.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&response[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(value @ Value::Object(_))) => return Ok(value),
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            _ => {}
        }
    }

    Err(match first_error {
        Some(e) => AnalyzerError::InvalidFormat(format!("JSON parse error: {}", e)),
        None => AnalyzerError::InvalidFormat(format!(
            "No JSON object found in response ({} chars)",
            response.len()
        )),
    })
}

/// Accept an integer written as a number, an integral float or a string
///
/// `"8"`, `8`, `8.0` and `"8/10"` all decode to 8. Range is not checked.
pub(crate) fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    integer_from_value(&value).ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", value)))
}

fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let head = s.trim().split('/').next().unwrap_or_default().trim();
            head.parse::<i64>().ok().or_else(|| {
                head.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// Accept a list of strings, or a single string as a one-item list
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s]),
        Value::Null => Ok(Vec::new()),
        other => Err(D::Error::custom(format!("expected a list of strings, got {}", other))),
    }
}
