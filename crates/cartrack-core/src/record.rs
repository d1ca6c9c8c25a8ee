//! Vehicle records: the canonical domain entity of the contract.
//!
//! A record is keyed by its chassis number. Attribution fields
//! (`manufacturer`, `updBy`) and lifecycle fields (`objType`, `status`,
//! `trxnId`, `ts`) are never taken from the client; they are overwritten by
//! [`VehicleRecord::stamp`] before the record is persisted.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::TxId;

/// Object-type tag written into every vehicle record.
pub const OBJECT_TYPE_CAR: &str = "car";

/// Lifecycle status assigned at creation.
pub const STATUS_NEW: &str = "NEW";

/// A vehicle entry as stored on the ledger.
///
/// Every field is a string on the wire. On input, member names match
/// case-insensitively and a later member overrides an earlier one. Missing and
/// `null` fields read as empty strings; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleRecord {
    #[serde(rename = "objType")]
    pub object_type: String,
    #[serde(rename = "chasisNumber")]
    pub chassis_number: String,
    pub manufacturer: String,
    #[serde(rename = "makeYear")]
    pub year: String,
    pub model: String,
    pub color: String,
    #[serde(rename = "licNumber")]
    pub license_number: String,
    pub status: String,
    pub dealer: String,
    #[serde(rename = "owner")]
    pub owner_name: String,
    #[serde(rename = "ts")]
    pub updated_at: String,
    #[serde(rename = "trxnId")]
    pub tx_id: String,
    #[serde(rename = "updBy")]
    pub updated_by: String,
}

impl VehicleRecord {
    /// Wire member names, in serialized order.
    const FIELDS: &'static [&'static str] = &[
        "objType",
        "chasisNumber",
        "manufacturer",
        "makeYear",
        "model",
        "color",
        "licNumber",
        "status",
        "dealer",
        "owner",
        "ts",
        "trxnId",
        "updBy",
    ];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        let field = match name.to_lowercase().as_str() {
            "objtype" => &mut self.object_type,
            "chasisnumber" => &mut self.chassis_number,
            "manufacturer" => &mut self.manufacturer,
            "makeyear" => &mut self.year,
            "model" => &mut self.model,
            "color" => &mut self.color,
            "licnumber" => &mut self.license_number,
            "status" => &mut self.status,
            "dealer" => &mut self.dealer,
            "owner" => &mut self.owner_name,
            "ts" => &mut self.updated_at,
            "trxnid" => &mut self.tx_id,
            "updby" => &mut self.updated_by,
            _ => return None,
        };
        Some(field)
    }
}

impl<'de> Deserialize<'de> for VehicleRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = VehicleRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a vehicle record object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<VehicleRecord, A::Error> {
                let mut record = VehicleRecord::default();
                while let Some(name) = map.next_key::<String>()? {
                    match record.field_mut(&name) {
                        Some(field) => {
                            *field = map.next_value::<Option<String>>()?.unwrap_or_default();
                        }
                        None => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_struct("VehicleRecord", VehicleRecord::FIELDS, RecordVisitor)
    }
}

/// Writer-controlled values applied to a record at creation.
#[derive(Debug, Clone)]
pub struct RecordStamp<'a> {
    /// Resolved caller identity; becomes both manufacturer and updated-by.
    pub identity: &'a str,
    pub object_type: &'a str,
    pub status: &'a str,
    pub tx_id: &'a TxId,
    /// Normalized transaction timestamp.
    pub timestamp: String,
}

impl VehicleRecord {
    /// Parse a client payload.
    pub fn from_json(payload: &str) -> Result<Self, CoreError> {
        serde_json::from_str(payload).map_err(|e| CoreError::malformed("vehicle record", e))
    }

    /// Serialize the record in wire field order.
    pub fn to_json(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The ledger key for this record: the chassis number as supplied.
    pub fn key(&self) -> &str {
        &self.chassis_number
    }

    /// Overwrite attribution and lifecycle fields.
    pub fn stamp(&mut self, stamp: RecordStamp<'_>) {
        self.manufacturer = stamp.identity.to_string();
        self.updated_by = stamp.identity.to_string();
        self.object_type = stamp.object_type.to_string();
        self.status = stamp.status.to_string();
        self.tx_id = stamp.tx_id.to_string();
        self.updated_at = stamp.timestamp;
    }
}
