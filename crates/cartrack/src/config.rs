//! Contract configuration.

use cartrack_core::{OBJECT_TYPE_CAR, STATUS_NEW};
use serde::{Deserialize, Serialize};

use crate::identity::UNKNOWN_IDENTITY;

/// Configuration for the contract.
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Object-type tag written into vehicle records.
    pub object_type: String,
    /// Status assigned to a freshly created vehicle record.
    pub initial_status: String,
    /// Identity used when the caller's certificate carries no common name.
    pub unknown_identity: String,
    /// Refuse `createCarEntry` when the chassis number is already stored.
    ///
    /// Off by default: a second create silently replaces the first.
    pub reject_duplicate_chassis: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            object_type: OBJECT_TYPE_CAR.to_string(),
            initial_status: STATUS_NEW.to_string(),
            unknown_identity: UNKNOWN_IDENTITY.to_string(),
            reject_duplicate_chassis: false,
        }
    }
}

impl ContractConfig {
    /// Parse a configuration document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContractConfig::default();
        assert_eq!(config.object_type, "car");
        assert_eq!(config.initial_status, "NEW");
        assert_eq!(config.unknown_identity, "Unknown.");
        assert!(!config.reject_duplicate_chassis);
    }

    #[test]
    fn test_partial_document() {
        let config = ContractConfig::from_json(r#"{"reject_duplicate_chassis":true}"#).unwrap();
        assert!(config.reject_duplicate_chassis);
        assert_eq!(config.object_type, "car");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(ContractConfig::from_json("{}").unwrap(), ContractConfig::default());
    }
}
