//! Strong type definitions for the CarTrack contract.
//!
//! Transaction metadata handed to the contract by the ledger is wrapped in
//! newtypes so that a transaction id can't be confused with a record key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque transaction identifier assigned by the ledger to one invocation.
///
/// Ledger-supplied ids are taken verbatim. Locally created transactions derive
/// their id from a nonce and the creator's certificate, see [`TxId::derive`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Wrap a ledger-supplied transaction id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a transaction id as `hex(blake3(nonce || creator))`.
    pub fn derive(nonce: &[u8], creator: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(nonce);
        hasher.update(creator);
        Self(hex::encode(hasher.finalize().as_bytes()))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TxId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TxId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Transaction time as recorded by the ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxTimestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second part. Carried for display only; normalization ignores it.
    pub nanos: i32,
}

impl TxTimestamp {
    /// Create a timestamp from seconds and nanos.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Create a timestamp with whole-second resolution.
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }
}

/// Protobuf text form, e.g. `seconds:1700000000 nanos:12`.
///
/// Zero-valued fields are omitted, so the epoch renders as an empty string.
impl fmt::Display for TxTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.seconds, self.nanos) {
            (0, 0) => Ok(()),
            (s, 0) => write!(f, "seconds:{}", s),
            (0, n) => write!(f, "nanos:{}", n),
            (s, n) => write!(f, "seconds:{} nanos:{}", s, n),
        }
    }
}
