//! Deserialization helpers for fields the backend encodes inconsistently.
//!
//! Money fields (`balance`, prices, bet values) arrive either as JSON numbers
//! or as decimal strings depending on the serializer behind the endpoint, so
//! they are accepted in both forms.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

/// Deserialize an `f64` from either a JSON number or a decimal string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Deserialize an `Option<f64>`, treating `null` as `None` and accepting
/// string-encoded numbers.
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => {
            s.trim().parse::<f64>().map(Some).map_err(serde::de::Error::custom)
        },
    }
}
