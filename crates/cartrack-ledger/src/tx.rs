//! Transaction context and the per-invocation ledger stub.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cartrack_core::{TxId, TxTimestamp};

use crate::error::{LedgerError, Result};
use crate::traits::{Ledger, StateStore};

/// Length of the random nonce mixed into derived transaction ids.
pub const NONCE_LEN: usize = 24;

/// Metadata of the transaction a contract invocation runs in.
#[derive(Debug, Clone)]
pub struct TxContext {
    tx_id: TxId,
    timestamp: Option<TxTimestamp>,
    creator: Option<Vec<u8>>,
}

impl TxContext {
    /// Start a new transaction submitted by `creator`.
    ///
    /// The id is derived from a fresh random nonce and the creator bytes; the
    /// timestamp is the current wall-clock time.
    pub fn new(creator: Option<Vec<u8>>) -> Self {
        let nonce: [u8; NONCE_LEN] = rand::random();
        let tx_id = TxId::derive(&nonce, creator.as_deref().unwrap_or_default());
        Self {
            tx_id,
            timestamp: now(),
            creator,
        }
    }

    /// A context with a fixed id and no timestamp or creator.
    pub fn with_id(tx_id: impl Into<TxId>) -> Self {
        Self {
            tx_id: tx_id.into(),
            timestamp: None,
            creator: None,
        }
    }

    /// Set the transaction timestamp.
    pub fn timestamp(mut self, timestamp: TxTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the creator certificate.
    pub fn creator(mut self, certificate: impl Into<Vec<u8>>) -> Self {
        self.creator = Some(certificate.into());
        self
    }

    pub fn tx_id(&self) -> &TxId {
        &self.tx_id
    }
}

/// A [`Ledger`] assembled from a world state and a transaction context.
pub struct TxStub<S: StateStore> {
    store: Arc<S>,
    ctx: TxContext,
}

impl<S: StateStore> TxStub<S> {
    pub fn new(store: Arc<S>, ctx: TxContext) -> Self {
        Self { store, ctx }
    }

    /// The underlying world state.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn context(&self) -> &TxContext {
        &self.ctx
    }
}

#[async_trait]
impl<S: StateStore> Ledger for TxStub<S> {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        self.store.get_state(key).await
    }

    async fn put_state(&self, key: &str, value: &[u8]) -> Result<()> {
        self.store.put_state(key, value).await
    }

    fn tx_id(&self) -> &TxId {
        &self.ctx.tx_id
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp> {
        self.ctx.timestamp.ok_or(LedgerError::MissingTimestamp)
    }

    fn caller_certificate(&self) -> Result<Vec<u8>> {
        self.ctx.creator.clone().ok_or(LedgerError::MissingCreator)
    }
}

/// Current wall-clock time, or `None` if the clock is before the epoch.
fn now() -> Option<TxTimestamp> {
    use std::time::{SystemTime, UNIX_EPOCH};
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let seconds = i64::try_from(elapsed.as_secs()).ok()?;
    Some(TxTimestamp::new(seconds, elapsed.subsec_nanos() as i32))
}
