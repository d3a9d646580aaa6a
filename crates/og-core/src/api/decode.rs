//! Metadata payload decoding.
//!
//! The metadata canister replies with JSON text. Failures come back as a
//! successful reply holding `{"error": {"code": "...", "message": "..."}}`,
//! which is surfaced as a remote call error before any typed parse.

use crate::error::{DecodeError, Error, RemoteCallError};
use serde::de::DeserializeOwned;
use serde_json::Value;

const UNKNOWN_CODE: &str = "UNKNOWN";

/// Strictly decode a JSON payload returned by `method`.
pub fn decode_payload<T: DeserializeOwned>(method: &str, payload: &str) -> Result<T, Error> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| DecodeError::json(method, err))?;

    if let Some(err) = service_error(&value) {
        return Err(err.into());
    }

    serde_json::from_value(value).map_err(|err| DecodeError::json(method, err).into())
}

/// Recognise the error envelope: an object whose only key is `error`.
/// A bare string (or any other value) under `error` becomes the message.
fn service_error(value: &Value) -> Option<RemoteCallError> {
    let error = value
        .as_object()
        .filter(|obj| obj.len() == 1)
        .and_then(|obj| obj.get("error"))?;

    let (code, message) = match error {
        Value::Object(body) => {
            let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
            (field("code"), field("message").unwrap_or_default())
        }
        Value::String(message) => (None, message.clone()),
        Value::Null => (None, String::new()),
        other => (None, other.to_string()),
    };

    Some(RemoteCallError::Service {
        code: code.unwrap_or_else(|| UNKNOWN_CODE.to_string()),
        message,
    })
}

///
/// TESTS
///
