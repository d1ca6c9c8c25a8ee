//! # CarTrack
//!
//! A ledger contract for vehicle registration and ad hoc key/value storage
//! with provenance.
//!
//! ## Overview
//!
//! The contract is a request dispatcher over four actions:
//!
//! - **`probe`**: liveness check reporting the raw transaction timestamp
//! - **`createCarEntry`**: validate a vehicle record, attribute it to the
//!   caller, stamp it and store it under its chassis number
//! - **`saveKV`**: store a batch of key/value pairs, each wrapped with the
//!   transaction id (best-effort)
//! - **`query`**: read one key; absence is an empty success
//!
//! The contract owns no storage and keeps no state between invocations. It
//! runs against an injected [`Ledger`](cartrack_ledger::Ledger) and resolves
//! callers through an [`IdentityProvider`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cartrack::{Contract, Request, StaticIdentity};
//! use cartrack::ledger::{MemoryStore, TxContext, TxStub};
//!
//! async fn example() {
//!     let contract = Contract::default();
//!     let store = Arc::new(MemoryStore::new());
//!     let ledger = TxStub::new(store, TxContext::new(None));
//!
//!     let request = Request::new("createCarEntry", [r#"{"chasisNumber":"ABC123"}"#]);
//!     let response = contract
//!         .invoke_with_identity(&ledger, &StaticIdentity::new("Alice"), &request)
//!         .await;
//!     assert!(response.is_ok());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `cartrack::core` - Records, envelopes, timestamp normalization
//! - `cartrack::ledger` - Ledger traits and backends

pub mod batch;
pub mod config;
pub mod contract;
pub mod error;
pub mod identity;
pub mod record;
pub mod response;

// Re-export component crates
pub use cartrack_core as core;
pub use cartrack_ledger as ledger;

pub use batch::{BatchReport, EntryOutcome};
pub use config::ContractConfig;
pub use contract::{Contract, PROBE_STATUS};
pub use error::{ContractError, ErrorKind, Result};
pub use identity::{
    subject_common_name, CertificateIdentity, IdentityError, IdentityProvider, StaticIdentity,
    UNKNOWN_IDENTITY,
};
pub use response::{Action, Request, Response, ERROR, OK};

pub use cartrack_core::{KvEntry, KvEnvelope, TxId, TxTimestamp, VehicleRecord};
