//! Payload validation: semantic checks applied after parsing.

use crate::envelope::KvEntry;
use crate::error::ValidationError;
use crate::record::VehicleRecord;

/// Validate a vehicle record before it is stamped and written.
///
/// The chassis number is the ledger key, so it must be non-blank once
/// surrounding whitespace is trimmed. The key itself is not rewritten.
pub fn validate_record(record: &VehicleRecord) -> Result<(), ValidationError> {
    if record.chassis_number.trim().is_empty() {
        return Err(ValidationError::BlankChassisNumber);
    }
    Ok(())
}

/// Validate a key/value batch. Only emptiness is checked; per-entry keys are
/// left to the ledger.
pub fn validate_batch(entries: &[KvEntry]) -> Result<(), ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record_with_chassis(chassis: &str) -> VehicleRecord {
        VehicleRecord {
            chassis_number: chassis.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(validate_record(&record_with_chassis("ABC123")).is_ok());
        assert!(validate_record(&record_with_chassis("  ABC123 ")).is_ok());
    }

    #[test]
    fn test_blank_chassis() {
        for chassis in ["", " ", "\t\n", "\u{3000}"] {
            assert_eq!(
                validate_record(&record_with_chassis(chassis)),
                Err(ValidationError::BlankChassisNumber),
                "chassis {:?} should be rejected",
                chassis
            );
        }
    }

    #[test]
    fn test_batch() {
        assert_eq!(validate_batch(&[]), Err(ValidationError::EmptyBatch));
        assert!(validate_batch(&[KvEntry::new("", "")]).is_ok());
    }

    proptest! {
        #[test]
        fn whitespace_only_chassis_is_rejected(ws in "[ \t\r\n]{0,16}") {
            prop_assert_eq!(
                validate_record(&record_with_chassis(&ws)),
                Err(ValidationError::BlankChassisNumber)
            );
        }

        #[test]
        fn chassis_with_visible_char_is_accepted(
            pad in "[ \t]{0,4}",
            body in "[A-Z0-9]{1,17}",
        ) {
            let chassis = format!("{pad}{body}{pad}");
            prop_assert!(validate_record(&record_with_chassis(&chassis)).is_ok());
        }
    }
}
