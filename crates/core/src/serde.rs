//! Serde helper functions for request deserialization.
//!
//! Callers of the JSON routes tend to send empty strings for fields they
//! don't care about; these helpers treat those as absent.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a query flag: only `true` (any case) turns it on.
///
/// Any other value, including a typo, reads as `false`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.is_some_and(|s| s.trim().eq_ignore_ascii_case("true")))
}
