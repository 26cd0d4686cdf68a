use eco9_core::canonical::{decode_cursor_payload, encode_cursor_payload, stable_json_hash_hex};
use eco9_core::ActivityId;
use eco9_model::ActivityQuery;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreErrorCode};

const CURSOR_VERSION: &str = "v1";
const MAX_CURSOR_TOKEN_LEN: usize = 512;

/// Keyset position: the listing resumes strictly after `after_id`.
///
/// `query_hash` binds the token to the filter it was issued for, so a cursor
/// cannot be replayed against a different user or category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CursorPayload {
    cursor_version: String,
    after_id: u64,
    query_hash: String,
}

#[derive(Serialize)]
struct QueryFilter<'a> {
    user: Option<&'a str>,
    category: Option<&'a str>,
}

fn query_hash(query: &ActivityQuery) -> Result<String, StoreError> {
    let filter = QueryFilter {
        user: query.user.as_ref().map(|u| u.as_str()),
        category: query.category.as_ref().map(|c| c.as_str()),
    };
    stable_json_hash_hex(&filter).map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))
}

pub(crate) fn encode(query: &ActivityQuery, last: ActivityId) -> Result<String, StoreError> {
    let payload = CursorPayload {
        cursor_version: CURSOR_VERSION.to_string(),
        after_id: last.get(),
        query_hash: query_hash(query)?,
    };
    encode_cursor_payload(&payload).map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))
}

/// Id after which the page starts; `0` when the query carries no cursor.
pub(crate) fn start_after(query: &ActivityQuery) -> Result<u64, StoreError> {
    let Some(token) = query.cursor.as_deref() else {
        return Ok(0);
    };
    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(invalid("cursor exceeds max length"));
    }
    let payload: CursorPayload = decode_cursor_payload(token).map_err(|e| invalid(&e.to_string()))?;
    if payload.cursor_version != CURSOR_VERSION {
        return Err(invalid("cursor version unsupported"));
    }
    if payload.query_hash != query_hash(query)? {
        return Err(invalid("cursor was issued for a different filter"));
    }
    Ok(payload.after_id)
}

fn invalid(message: &str) -> StoreError {
    StoreError::new(StoreErrorCode::Validation, message)
}
