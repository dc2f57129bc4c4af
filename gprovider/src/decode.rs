//! Defensive decoding of raw prediction values.
//!
//! Providers sometimes return structured results encoded as strings, so every
//! decoder accepts both the native JSON shape and its string form.

use serde_json::Value;

use crate::PredictionError;

/// First usable prediction, treating `null` as no result.
pub(crate) fn first_prediction(results: Vec<Value>) -> Option<Value> {
    results.into_iter().next().filter(|value| !value.is_null())
}

pub fn decode_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn decode_vector(value: &Value) -> Result<Vec<f32>, PredictionError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                item.as_f64().map(|number| number as f32).ok_or_else(|| {
                    PredictionError::decode(format!(
                        "embedding component {position} is not a number: {item}"
                    ))
                })
            })
            .collect(),
        Value::String(encoded) => {
            let parsed = serde_json::from_str::<Value>(encoded.trim()).map_err(|error| {
                PredictionError::decode(format!("embedding string is not a JSON array: {error}"))
            })?;
            if parsed.is_string() {
                return Err(PredictionError::decode("embedding is a doubly encoded string"));
            }
            decode_vector(&parsed)
        }
        Value::Object(fields) => match fields.get("embedding") {
            Some(inner) => decode_vector(inner),
            None => Err(PredictionError::decode("embedding object has no 'embedding' field")),
        },
        other => Err(PredictionError::decode(format!(
            "unsupported embedding value: {other}"
        ))),
    }
}

pub fn decode_score(value: &Value) -> Result<f64, PredictionError> {
    let score = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(encoded) => encoded.trim().parse::<f64>().ok(),
        _ => None,
    };

    match score {
        Some(score) if !score.is_nan() => Ok(score),
        _ => Err(PredictionError::decode(format!(
            "relevance score is not a number: {value}"
        ))),
    }
}

pub(crate) fn truncate_for_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut truncated = text.chars().take(limit).collect::<String>();
    truncated.push_str("...");
    truncated
}
