//! Decoding response bodies into models.
//!
//! Every response model implements [`ResponseModel`]. The default
//! [`from_body`](ResponseModel::from_body) requires a JSON object and then
//! fills the model field-by-field; the lenient field helpers guarantee that
//! an object never fails to decode, so the only parse errors are "not
//! JSON", "not an object", and "empty".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::ModelError;

/// A typed record produced by decoding one endpoint's response body.
///
/// ## Trait bounds
///
/// - `DeserializeOwned` → the model owns its data, so the body buffer can
///   be dropped right after decoding.
/// - `Default` → the zero value every absent field falls back to.
/// - `Send + 'static` → the model is handed to a callback that may run on
///   any runtime worker.
pub trait ResponseModel: DeserializeOwned + Default + Send + 'static {
    /// Whether an empty success body means "the default model" rather than
    /// a parse failure. Set by models for endpoints that answer `204`.
    const ALLOWS_EMPTY_BODY: bool = false;

    /// Decodes a success body into this model.
    ///
    /// # Errors
    /// Returns a [`ModelError`] if the body is empty (and empty is not
    /// allowed), not JSON, or not a JSON object.
    fn from_body(body: &[u8]) -> Result<Self, ModelError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return if Self::ALLOWS_EMPTY_BODY {
                Ok(Self::default())
            } else {
                Err(ModelError::EmptyBody)
            };
        }
        decode(body)
    }
}

/// Parses `body` as a JSON object and fills `T` from it.
///
/// # Errors
/// [`ModelError::Decode`] for malformed JSON, [`ModelError::NotAnObject`]
/// for arrays, strings, numbers, booleans, and `null`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ModelError> {
    let value: Value = serde_json::from_slice(body).map_err(ModelError::Decode)?;
    let kind = match &value {
        Value::Object(_) => None,
        Value::Null => Some("null"),
        Value::Bool(_) => Some("a boolean"),
        Value::Number(_) => Some("a number"),
        Value::String(_) => Some("a string"),
        Value::Array(_) => Some("an array"),
    };
    if let Some(kind) = kind {
        return Err(ModelError::NotAnObject(kind));
    }
    T::deserialize(value).map_err(ModelError::Decode)
}

// ---------------------------------------------------------------------------
// Acknowledgement
// ---------------------------------------------------------------------------

/// Response of endpoints whose only job is to say "done" (deletions, stops).
///
/// Edgegap answers some of these with `204 No Content` and others with a
/// small JSON object carrying a `message`; both decode to this model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acknowledgement {
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
}

impl ResponseModel for Acknowledgement {
    const ALLOWS_EMPTY_BODY: bool = true;
}
