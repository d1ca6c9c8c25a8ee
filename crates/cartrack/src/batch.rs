//! Key/value batches: the `saveKV` operation.
//!
//! Batches are best-effort. Every entry is attempted in order; a failed write
//! is logged and recorded in the [`BatchReport`] but does not stop the
//! remaining entries. The count reported to the caller is the number of
//! entries attempted.

use cartrack_core::{parse_batch, validate_batch, KvEnvelope, TxId};
use cartrack_ledger::Ledger;
use tracing::{info, warn};

use crate::contract::{require_arg, Contract};
use crate::error::{ContractError, Result};
use crate::response::Action;

/// What happened to one entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub key: String,
    /// `None` if the envelope was persisted, otherwise the failure message.
    pub error: Option<String>,
}

impl EntryOutcome {
    pub fn persisted(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a `saveKV` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Transaction id shared by every envelope in the batch.
    pub tx_id: TxId,
    /// One outcome per entry, in input order.
    pub outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    /// Number of entries attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of entries the ledger accepted.
    pub fn persisted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.persisted()).count()
    }

    /// Entries the ledger rejected.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| !o.persisted())
    }

    /// The caller-facing success message.
    pub fn message(&self) -> String {
        format!("{} records saved", self.attempted())
    }
}

impl Contract {
    /// Wrap each entry in a [`KvEnvelope`] and write it under its key.
    pub async fn save_kv<L: Ledger + ?Sized>(&self, ledger: &L, args: &[String]) -> Result<BatchReport> {
        let payload = require_arg(Action::SaveKv, args)?;
        let entries = parse_batch(payload).map_err(ContractError::MalformedInput)?;
        validate_batch(&entries)?;

        let tx_id = ledger.tx_id().clone();
        let mut outcomes = Vec::with_capacity(entries.len());

        for entry in &entries {
            let written = match KvEnvelope::wrap(entry, &tx_id).to_json() {
                Ok(bytes) => ledger
                    .put_state(&entry.key, &bytes)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            if let Err(reason) = &written {
                warn!(key = %entry.key, %tx_id, error = %reason, "batch entry not persisted");
            }
            outcomes.push(EntryOutcome {
                key: entry.key.clone(),
                error: written.err(),
            });
        }

        let report = BatchReport { tx_id, outcomes };
        info!(
            tx_id = %report.tx_id,
            attempted = report.attempted(),
            persisted = report.persisted(),
            "key/value batch saved"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cartrack_core::{KvEnvelope, ValidationError};
    use cartrack_ledger::{MemoryStore, StateStore, TxContext, TxStub};

    use super::*;

    fn ledger() -> TxStub<MemoryStore> {
        TxStub::new(Arc::new(MemoryStore::new()), TxContext::with_id("tx-7"))
    }

    #[tokio::test]
    async fn test_save_kv_wraps_each_entry() {
        let contract = Contract::default();
        let ledger = ledger();

        let report = contract
            .save_kv(
                &ledger,
                &[r#"[{"key":"a","value":"1"},{"key":"b","value":"2"}]"#.to_string()],
            )
            .await
            .unwrap();

        assert_eq!(report.message(), "2 records saved");
        assert_eq!(report.persisted(), 2);

        let stored = ledger.store().get_state("b").await.unwrap().unwrap();
        assert_eq!(&stored[..], br#"{"id":"b","trxnId":"tx-7","value":"2"}"#);
    }

    #[tokio::test]
    async fn test_save_kv_null_value_stored_empty() {
        let contract = Contract::default();
        let ledger = ledger();

        let report = contract
            .save_kv(&ledger, &[r#"[{"key":"k","value":null}]"#.to_string()])
            .await
            .unwrap();

        assert_eq!(report.persisted(), 1);
        let stored = ledger.store().get_state("k").await.unwrap().unwrap();
        assert_eq!(&stored[..], br#"{"id":"k","trxnId":"tx-7","value":""}"#);
    }

    #[tokio::test]
    async fn test_save_kv_is_best_effort() {
        let contract = Contract::default();
        let ledger = ledger();

        // The empty key is rejected by the world state; the rest still land.
        let report = contract
            .save_kv(
                &ledger,
                &[r#"[{"key":"a","value":"1"},{"key":"","value":"x"},{"key":"c","value":"3"}]"#.to_string()],
            )
            .await
            .unwrap();

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.persisted(), 2);
        assert_eq!(report.message(), "3 records saved");
        assert_eq!(report.failures().map(|o| o.key.as_str()).collect::<Vec<_>>(), vec![""]);
        assert_eq!(ledger.store().keys().await.unwrap(), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_save_kv_later_entry_wins() {
        let contract = Contract::default();
        let ledger = ledger();

        contract
            .save_kv(
                &ledger,
                &[r#"[{"key":"k","value":"first"},{"key":"k","value":"second"}]"#.to_string()],
            )
            .await
            .unwrap();

        let stored = ledger.store().get_state("k").await.unwrap().unwrap();
        assert_eq!(KvEnvelope::from_json(&stored).unwrap().value, "second");
    }

    #[tokio::test]
    async fn test_save_kv_rejections() {
        let contract = Contract::default();
        let ledger = ledger();

        assert!(matches!(
            contract.save_kv(&ledger, &[]).await,
            Err(ContractError::Arity { .. })
        ));
        assert!(matches!(
            contract.save_kv(&ledger, &["{}".to_string()]).await,
            Err(ContractError::MalformedInput(_))
        ));
        assert!(matches!(
            contract.save_kv(&ledger, &["[]".to_string()]).await,
            Err(ContractError::Validation(ValidationError::EmptyBatch))
        ));
        assert!(ledger.store().is_empty());
    }
}
