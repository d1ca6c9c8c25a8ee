//! Vehicle registration: the `createCarEntry` operation.

use bytes::Bytes;
use cartrack_core::{normalize_timestamp, validate_record, RecordStamp, ValidationError, VehicleRecord};
use cartrack_ledger::Ledger;
use tracing::info;

use crate::contract::{require_arg, Contract};
use crate::error::{ContractError, Result};
use crate::identity::IdentityProvider;
use crate::response::Action;

impl Contract {
    /// Validate, stamp and persist a vehicle record under its chassis number.
    ///
    /// Checks run in order: arity, payload shape, caller identity, chassis
    /// number, then (if enabled) duplicate chassis. Nothing is written unless
    /// every check passes. Returns the record exactly as stored.
    pub async fn create_car_entry<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        identity: &dyn IdentityProvider,
        args: &[String],
    ) -> Result<Bytes> {
        let payload = require_arg(Action::CreateCarEntry, args)?;
        let mut record = VehicleRecord::from_json(payload).map_err(ContractError::MalformedInput)?;

        let manufacturer = identity.resolve_caller_identity()?;
        validate_record(&record)?;

        if self.config().reject_duplicate_chassis {
            self.ensure_unregistered(ledger, record.key()).await?;
        }

        let tx_id = ledger.tx_id();
        record.stamp(RecordStamp {
            identity: &manufacturer,
            object_type: &self.config().object_type,
            status: &self.config().initial_status,
            tx_id,
            timestamp: normalize_timestamp(ledger.tx_timestamp()),
        });

        let bytes = record.to_json().map_err(ContractError::Encoding)?;
        ledger
            .put_state(record.key(), &bytes)
            .await
            .map_err(|source| ContractError::Persistence {
                key: record.key().to_string(),
                source,
            })?;

        info!(
            key = record.key(),
            %tx_id,
            manufacturer = %manufacturer,
            "car entry created"
        );
        Ok(Bytes::from(bytes))
    }

    async fn ensure_unregistered<L: Ledger + ?Sized>(&self, ledger: &L, key: &str) -> Result<()> {
        let existing = ledger
            .get_state(key)
            .await
            .map_err(|source| ContractError::Persistence {
                key: key.to_string(),
                source,
            })?;

        match existing {
            Some(_) => Err(ValidationError::DuplicateChassisNumber(key.to_string()).into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cartrack_core::TxTimestamp;
    use cartrack_ledger::{LedgerError, MemoryStore, StateStore, TxContext, TxStub};

    use super::*;
    use crate::config::ContractConfig;
    use crate::identity::{IdentityError, StaticIdentity};

    struct NoIdentity;

    impl IdentityProvider for NoIdentity {
        fn resolve_caller_identity(&self) -> std::result::Result<String, IdentityError> {
            Err(IdentityError::CertificateUnavailable(LedgerError::MissingCreator))
        }
    }

    fn ledger() -> TxStub<MemoryStore> {
        let ctx = TxContext::with_id("tx-42").timestamp(TxTimestamp::from_seconds(1_700_000_000));
        TxStub::new(Arc::new(MemoryStore::new()), ctx)
    }

    fn args(payload: &str) -> Vec<String> {
        vec![payload.to_string()]
    }

    #[tokio::test]
    async fn test_create_overrides_attribution() {
        let contract = Contract::default();
        let ledger = ledger();

        let payload = contract
            .create_car_entry(
                &ledger,
                &StaticIdentity::new("Alice"),
                &args(r#"{"chasisNumber":"ABC123","manufacturer":"Spoofed","color":"red"}"#),
            )
            .await
            .unwrap();

        let record: VehicleRecord = serde_json::from_slice(&payload).unwrap();
        assert_eq!(record.chassis_number, "ABC123");
        assert_eq!(record.manufacturer, "Alice");
        assert_eq!(record.updated_by, "Alice");
        assert_eq!(record.status, "NEW");
        assert_eq!(record.object_type, "car");
        assert_eq!(record.color, "red");
        assert_eq!(record.tx_id, "tx-42");
        assert_eq!(record.updated_at, "2023.11.14.22.13.20.000");

        let stored = ledger.store().get_state("ABC123").await.unwrap().unwrap();
        assert_eq!(stored, payload);
    }

    #[tokio::test]
    async fn test_create_without_timestamp_uses_sentinel() {
        let contract = Contract::default();
        let ledger = TxStub::new(Arc::new(MemoryStore::new()), TxContext::with_id("tx-1"));

        let payload = contract
            .create_car_entry(&ledger, &StaticIdentity::new("Alice"), &args(r#"{"chasisNumber":"X1"}"#))
            .await
            .unwrap();

        let record: VehicleRecord = serde_json::from_slice(&payload).unwrap();
        assert_eq!(record.updated_at, "0000.00.00.00.00.000");
    }

    #[tokio::test]
    async fn test_create_accepts_null_and_recased_members() {
        let contract = Contract::default();
        let ledger = ledger();

        let payload = contract
            .create_car_entry(
                &ledger,
                &StaticIdentity::new("Alice"),
                &args(r#"{"ChasisNumber":"B7","color":null,"Model":"Civic"}"#),
            )
            .await
            .unwrap();

        let record: VehicleRecord = serde_json::from_slice(&payload).unwrap();
        assert_eq!(record.chassis_number, "B7");
        assert_eq!(record.color, "");
        assert_eq!(record.model, "Civic");
        assert!(ledger.store().get_state("B7").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_arity() {
        let contract = Contract::default();
        let err = contract
            .create_car_entry(&ledger(), &StaticIdentity::new("Alice"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::Arity { .. }));
    }

    #[tokio::test]
    async fn test_create_malformed_payload() {
        let contract = Contract::default();
        let ledger = ledger();
        let err = contract
            .create_car_entry(&ledger, &StaticIdentity::new("Alice"), &args("{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::MalformedInput(_)));
        assert!(ledger.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_blank_chassis_writes_nothing() {
        let contract = Contract::default();
        let ledger = ledger();
        let err = contract
            .create_car_entry(&ledger, &StaticIdentity::new("Alice"), &args(r#"{"chasisNumber":"   "}"#))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::Validation(ValidationError::BlankChassisNumber)
        ));
        assert!(ledger.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_identity_failure_writes_nothing() {
        let contract = Contract::default();
        let ledger = ledger();
        let err = contract
            .create_car_entry(&ledger, &NoIdentity, &args(r#"{"chasisNumber":"ABC123"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::IdentityUnavailable(_)));
        assert!(ledger.store().is_empty());
    }

    #[tokio::test]
    async fn test_identity_checked_before_chassis() {
        let contract = Contract::default();
        let err = contract
            .create_car_entry(&ledger(), &NoIdentity, &args(r#"{"chasisNumber":""}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::IdentityUnavailable(_)));
    }

    #[tokio::test]
    async fn test_second_create_overwrites_by_default() {
        let contract = Contract::default();
        let ledger = ledger();

        contract
            .create_car_entry(&ledger, &StaticIdentity::new("Alice"), &args(r#"{"chasisNumber":"ABC123","color":"red"}"#))
            .await
            .unwrap();
        contract
            .create_car_entry(&ledger, &StaticIdentity::new("Bob"), &args(r#"{"chasisNumber":"ABC123","color":"blue"}"#))
            .await
            .unwrap();

        let stored = ledger.store().get_state("ABC123").await.unwrap().unwrap();
        let record: VehicleRecord = serde_json::from_slice(&stored).unwrap();
        assert_eq!(record.manufacturer, "Bob");
        assert_eq!(record.color, "blue");
    }

    #[tokio::test]
    async fn test_duplicate_rejected_when_enabled() {
        let contract = Contract::new(ContractConfig {
            reject_duplicate_chassis: true,
            ..Default::default()
        });
        let ledger = ledger();
        let payload = args(r#"{"chasisNumber":"ABC123"}"#);

        contract
            .create_car_entry(&ledger, &StaticIdentity::new("Alice"), &payload)
            .await
            .unwrap();
        let err = contract
            .create_car_entry(&ledger, &StaticIdentity::new("Bob"), &payload)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContractError::Validation(ValidationError::DuplicateChassisNumber(ref key)) if key == "ABC123"
        ));
    }

    #[tokio::test]
    async fn test_chassis_key_is_not_trimmed() {
        let contract = Contract::default();
        let ledger = ledger();

        contract
            .create_car_entry(&ledger, &StaticIdentity::new("Alice"), &args(r#"{"chasisNumber":" ABC123 "}"#))
            .await
            .unwrap();

        assert!(ledger.store().get_state(" ABC123 ").await.unwrap().is_some());
        assert!(ledger.store().get_state("ABC123").await.unwrap().is_none());
    }
}
