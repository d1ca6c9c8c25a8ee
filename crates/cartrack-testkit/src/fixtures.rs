//! Test fixtures and helpers.
//!
//! Common setup code for contract tests: a recording world state, caller
//! certificates, and identity providers that fail on demand.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rcgen::{CertificateParams, DistinguishedName, DnType, DnValue, KeyPair};

use cartrack::{Contract, ContractConfig, IdentityError, IdentityProvider};
use cartrack_core::TxTimestamp;
use cartrack_ledger::{LedgerError, MemoryStore, Result, StateStore, TxContext, TxStub};

/// Transaction time used by fixture ledgers: 2023-11-14T22:13:20Z.
pub const FIXED_SECONDS: i64 = 1_700_000_000;

/// Normalized form of [`FIXED_SECONDS`].
pub const FIXED_TIMESTAMP: &str = "2023.11.14.22.13.20.000";

/// A single attempted write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutAttempt {
    pub key: String,
    pub value: Bytes,
}

/// World state wrapper that records every attempted put.
///
/// Puts to keys registered with [`RecordingStore::fail_on`] are recorded and
/// then rejected without reaching the inner store.
pub struct RecordingStore<S = MemoryStore> {
    inner: S,
    attempts: Mutex<Vec<PutAttempt>>,
    fail_keys: Mutex<HashSet<String>>,
}

impl<S: StateStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            attempts: Mutex::new(Vec::new()),
            fail_keys: Mutex::new(HashSet::new()),
        }
    }

    /// Reject future puts to `key`.
    pub fn fail_on(&self, key: impl Into<String>) {
        self.fail_keys
            .lock()
            .expect("fail set lock poisoned")
            .insert(key.into());
    }

    /// Every put attempted so far, in order.
    pub fn attempts(&self) -> Vec<PutAttempt> {
        self.attempts.lock().expect("attempt log lock poisoned").clone()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl Default for RecordingStore<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

#[async_trait]
impl<S: StateStore> StateStore for RecordingStore<S> {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        self.inner.get_state(key).await
    }

    async fn put_state(&self, key: &str, value: &[u8]) -> Result<()> {
        let poisoned = |e: String| LedgerError::Unavailable(format!("lock poisoned: {}", e));
        self.attempts
            .lock()
            .map_err(|e| poisoned(e.to_string()))?
            .push(PutAttempt {
                key: key.to_string(),
                value: Bytes::copy_from_slice(value),
            });
        let refused = self
            .fail_keys
            .lock()
            .map_err(|e| poisoned(e.to_string()))?
            .contains(key);
        if refused {
            return Err(LedgerError::Unavailable(format!("write to {} refused", key)));
        }
        self.inner.put_state(key, value).await
    }

    async fn delete_state(&self, key: &str) -> Result<()> {
        self.inner.delete_state(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys().await
    }
}

/// Identity provider that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingIdentity;

impl IdentityProvider for FailingIdentity {
    fn resolve_caller_identity(&self) -> std::result::Result<String, IdentityError> {
        Err(IdentityError::Other("no identity for this caller".into()))
    }
}

/// Build a self-signed PEM certificate, optionally with a subject common name.
pub fn certificate_pem(common_name: Option<&str>) -> std::result::Result<String, rcgen::Error> {
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::OrganizationName, DnValue::Utf8String("org1.example.com".into()));
    if let Some(cn) = common_name {
        params
            .distinguished_name
            .push(DnType::CommonName, DnValue::Utf8String(cn.into()));
    }
    let key = KeyPair::generate()?;
    Ok(params.self_signed(&key)?.pem())
}

/// A contract plus a shared recording world state.
pub struct TestFixture {
    pub contract: Contract,
    pub store: Arc<RecordingStore>,
}

impl TestFixture {
    /// Default contract over an empty in-memory world state.
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    pub fn with_config(config: ContractConfig) -> Self {
        Self {
            contract: Contract::new(config),
            store: Arc::new(RecordingStore::default()),
        }
    }

    /// A ledger for transaction `tx_id` at [`FIXED_SECONDS`], no creator.
    pub fn ledger(&self, tx_id: &str) -> TxStub<RecordingStore> {
        TxStub::new(Arc::clone(&self.store), Self::context(tx_id))
    }

    /// A ledger whose transaction was submitted with `certificate`.
    pub fn ledger_with_creator(
        &self,
        tx_id: &str,
        certificate: impl Into<Vec<u8>>,
    ) -> TxStub<RecordingStore> {
        TxStub::new(Arc::clone(&self.store), Self::context(tx_id).creator(certificate))
    }

    /// A ledger whose transaction carries no timestamp.
    pub fn ledger_without_timestamp(&self, tx_id: &str) -> TxStub<RecordingStore> {
        TxStub::new(Arc::clone(&self.store), TxContext::with_id(tx_id))
    }

    fn context(tx_id: &str) -> TxContext {
        TxContext::with_id(tx_id).timestamp(TxTimestamp::from_seconds(FIXED_SECONDS))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
