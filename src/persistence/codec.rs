//! Turning [`Value`]s into stored text and back.
//!
//! Stored cells hold canonical JSON, so the distinctions between null,
//! booleans, numbers, strings, sequences and mappings survive a round trip.
//! Raw values skip the serializer entirely and values the serializer
//! rejects are stored as their display text instead.

use std::fmt::Write;

use log::trace;

use super::error::{DocStoreError, Result};
use super::value::Value;

pub fn encode_strict(value: &Value) -> Result<String> {
    //! Serialize `value` without any fallback.
    //!
    //! [`Value::Raw`] text is returned unchanged. A value that contains an
    //! [`Value::Opaque`] anywhere fails with [`DocStoreError::Unencodable`].

    match value {
        Value::Raw(text) => Ok(text.clone()),
        other => serde_json::to_string(other)
            .map_err(|error| DocStoreError::Unencodable(error.to_string())),
    }
}

pub fn encode(value: &Value) -> Result<String> {
    //! Serialize `value`, falling back to its display text.
    //!
    //! The fallback is lossy: reading the cell back yields a string, not the
    //! original value. It only fails when the display text itself cannot be
    //! produced.

    match encode_strict(value) {
        Ok(text) => Ok(text),
        Err(_) => {
            let mut text = String::new();
            write!(text, "{}", value).map_err(|_| {
                DocStoreError::Unencodable(
                    "value has neither a canonical serialization nor a text form".to_string(),
                )
            })?;
            trace!("storing value as raw text: {}", text);
            Ok(text)
        }
    }
}

pub fn decode(text: &str) -> Value {
    //! Parse stored text back into a [`Value`].
    //!
    //! Text that is not valid JSON was stored raw, and is returned unchanged
    //! as a string.

    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Value::from(json),
        Err(_) => Value::String(text.to_string()),
    }
}
