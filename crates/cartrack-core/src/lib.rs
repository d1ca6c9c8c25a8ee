//! # CarTrack Core
//!
//! Pure primitives for the CarTrack contract: vehicle records, key/value
//! envelopes, transaction metadata and timestamp normalization.
//!
//! This crate contains no I/O and no ledger access. Everything here is a
//! function of its inputs.
//!
//! ## Key Types
//!
//! - [`VehicleRecord`] - The domain entity, keyed by chassis number
//! - [`KvEntry`] / [`KvEnvelope`] - Batch input and its persisted wrapper
//! - [`TxId`] / [`TxTimestamp`] - Transaction metadata supplied by the ledger
//!
//! ## Timestamps
//!
//! Update times are normalized to `YYYY.MM.DD.hh.mm.ss.000` (UTC). When the
//! ledger can't supply a time, the fixed [`SENTINEL_TIMESTAMP`] is used.

pub mod envelope;
pub mod error;
pub mod record;
pub mod timestamp;
pub mod types;
pub mod validation;

pub use envelope::{parse_batch, KvEntry, KvEnvelope};
pub use error::{CoreError, ValidationError};
pub use record::{RecordStamp, VehicleRecord, OBJECT_TYPE_CAR, STATUS_NEW};
pub use timestamp::{format_seconds, normalize as normalize_timestamp, SENTINEL_TIMESTAMP};
pub use types::{TxId, TxTimestamp};
pub use validation::{validate_batch, validate_record};
