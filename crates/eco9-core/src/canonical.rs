use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::errors::{Error, Result};

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// JSON bytes with object keys sorted recursively.
pub fn stable_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let raw = serde_json::to_value(value)?;
    let normalized = normalize_json_value(raw);
    Ok(serde_json::to_vec(&normalized)?)
}

pub fn stable_json_hash_hex<T: Serialize>(value: &T) -> Result<String> {
    let bytes = stable_json_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

pub fn encode_cursor_payload<T: Serialize>(payload: &T) -> Result<String> {
    let bytes = stable_json_bytes(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

pub fn decode_cursor_payload<T: DeserializeOwned>(token: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| Error::DecodeCursor(format!("base64: {e}")))?;
    serde_json::from_slice::<T>(&bytes).map_err(|e| Error::DecodeCursor(format!("json: {e}")))
}

fn normalize_json_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(k, v)| (k, normalize_json_value(v)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json_value).collect()),
        other => other,
    }
}
