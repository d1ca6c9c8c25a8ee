//! Key-value batches and the provenance envelope wrapped around each entry.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::TxId;

/// One element of a `saveKV` batch.
///
/// A missing or `null` member reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvEntry {
    #[serde(deserialize_with = "null_as_empty")]
    pub key: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl KvEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Persisted wrapper for an ad hoc value.
///
/// Fields serialize in key order (`id`, `trxnId`, `value`), the same bytes a
/// sorted string map produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEnvelope {
    /// Logical key, duplicated for retrieval convenience.
    pub id: String,
    #[serde(rename = "trxnId")]
    pub tx_id: String,
    pub value: String,
}

impl KvEnvelope {
    /// Wrap an entry with the shared transaction id of its batch.
    pub fn wrap(entry: &KvEntry, tx_id: &TxId) -> Self {
        Self {
            id: entry.key.clone(),
            tx_id: tx_id.to_string(),
            value: entry.value.clone(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::malformed("envelope", e))
    }
}

/// Parse a `saveKV` payload into its entries.
///
/// The payload must be a JSON array of objects with string members. An
/// empty array parses fine here; see [`crate::validate_batch`].
pub fn parse_batch(payload: &str) -> Result<Vec<KvEntry>, CoreError> {
    serde_json::from_str(payload).map_err(|e| CoreError::malformed("key/value list", e))
}
