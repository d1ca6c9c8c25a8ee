//! Ledger traits: the abstract interfaces the contract runs against.
//!
//! [`StateStore`] is the world state (durable key/value pairs). [`Ledger`] is
//! what one contract invocation sees: the world state plus the metadata of
//! the transaction being executed.

use async_trait::async_trait;
use bytes::Bytes;
use cartrack_core::{TxId, TxTimestamp};

use crate::error::{LedgerError, Result};

/// The world state: async interface for key/value persistence.
///
/// All methods are async to support both blocking (SQLite) and remote
/// backends. For SQLite, `spawn_blocking` is used internally.
///
/// # Design Notes
///
/// - **Overwrite semantics**: `put_state` replaces any prior value at the key.
/// - **Empty keys**: rejected with [`LedgerError::InvalidKey`].
/// - **Absence**: `get_state` returns `Ok(None)` for a key never written.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value at `key`.
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write `value` at `key`, replacing any prior value.
    async fn put_state(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the value at `key`. Removing an absent key is not an error.
    async fn delete_state(&self, key: &str) -> Result<()>;

    /// All keys currently holding a value, in ascending order.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// The ledger as seen by a single contract invocation.
///
/// State access is async; transaction metadata is fixed for the lifetime of
/// the invocation and is read synchronously.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Read the value at `key` from the world state.
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write `value` at `key` in the world state.
    async fn put_state(&self, key: &str, value: &[u8]) -> Result<()>;

    /// The transaction id of the current invocation.
    fn tx_id(&self) -> &TxId;

    /// The transaction time of the current invocation.
    fn tx_timestamp(&self) -> Result<TxTimestamp>;

    /// The submitting client's X.509 certificate (PEM or DER).
    fn caller_certificate(&self) -> Result<Vec<u8>>;
}

/// Reject keys the world state can't hold.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(LedgerError::InvalidKey("key must not be an empty string".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("ABC123").is_ok());
        assert!(validate_key(" ").is_ok());
        assert!(matches!(validate_key(""), Err(LedgerError::InvalidKey(_))));
    }
}
