//! Response envelopes returned by the Qore API.

use crate::error::{QoreError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// List envelope: `{ "nodes": [...], "totalCount": ... }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub nodes: Vec<T>,
    #[serde(default)]
    pub total_count: Option<Value>,
}

/// Creation envelope: `{ "id": "..." }`.
#[derive(Debug, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| QoreError::Decode(e.to_string()))
}

pub fn nodes<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    Ok(decode::<ListResponse<T>>(value)?.nodes)
}

pub fn created_id(value: Value) -> Result<String> {
    Ok(decode::<CreatedResponse>(value)?.id)
}
