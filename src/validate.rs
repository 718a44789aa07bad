//! Validation engine.
//!
//! Runs against a [`Record`] before anything is composed. Each check returns
//! the first violation it finds; callers abort construction on any error.

use crate::error::{AchError, Result};
use crate::record::Record;
use crate::transaction;

/// Every required field carries a non-empty value.
pub fn validate_required_fields(record: &Record) -> Result<()> {
    for (spec, value) in record.fields() {
        if spec.required && value.is_empty() {
            return Err(AchError::MissingRequiredField {
                record: record.name(),
                field: spec.name,
            });
        }
    }
    Ok(())
}

/// No rendered value is wider than its field.
pub fn validate_lengths(record: &Record) -> Result<()> {
    for (spec, value) in record.fields() {
        let actual = value.rendered_as(spec.kind).chars().count();
        if actual > spec.width {
            return Err(AchError::InvalidLength {
                record: record.name(),
                field: spec.name,
                width: spec.width,
                actual,
            });
        }
    }
    Ok(())
}

/// Every non-blank field's rendered value matches its kind.
///
/// Empty optional fields are skipped; they render as pure padding.
pub fn validate_data_types(record: &Record) -> Result<()> {
    for (spec, value) in record.fields() {
        if spec.blank || (value.is_empty() && !spec.required) {
            continue;
        }
        if !spec.kind.accepts(&value.rendered_as(spec.kind)) {
            return Err(AchError::InvalidDataType {
                record: record.name(),
                field: spec.name,
                expected: spec.kind.describe(),
            });
        }
    }
    Ok(())
}

/// Required fields, then lengths, then data types.
pub fn validate_record(record: &Record) -> Result<()> {
    validate_required_fields(record)?;
    validate_lengths(record)?;
    validate_data_types(record)
}

pub fn validate_transaction_code(code: &str) -> Result<()> {
    if transaction::is_recognized(code) {
        Ok(())
    } else {
        Err(AchError::InvalidTransactionCode(code.to_string()))
    }
}

pub fn validate_service_class_code(code: &str) -> Result<()> {
    if transaction::SERVICE_CLASS_CODES.contains(&code) {
        Ok(())
    } else {
        Err(AchError::InvalidServiceClassCode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::layout::{BATCH_CONTROL, ENTRY_DETAIL};

    fn entry_record() -> Record {
        let mut r = Record::new(&ENTRY_DETAIL).unwrap();
        r.set("transaction_code", "22");
        r.set("receiving_dfi", "03130142");
        r.set("check_digit", "2");
        r.set("dfi_account", "12345678");
        r.set("amount", Amount::from_cents(1000));
        r.set("individual_name", "JANE DOE");
        r
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate_record(&entry_record()).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let mut r = entry_record();
        r.set("individual_name", "");
        assert!(matches!(
            validate_required_fields(&r),
            Err(AchError::MissingRequiredField {
                field: "individual_name",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_counter_is_present() {
        let mut r = Record::new(&BATCH_CONTROL).unwrap();
        r.set("service_class_code", "200");
        r.set("originating_dfi", "03130142");
        assert!(validate_record(&r).is_ok());
    }

    #[test]
    fn test_invalid_length() {
        let mut r = entry_record();
        r.set("dfi_account", "123456789012345678");
        assert!(matches!(
            validate_lengths(&r),
            Err(AchError::InvalidLength {
                field: "dfi_account",
                width: 17,
                actual: 18,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_data_type() {
        let mut r = entry_record();
        r.set("receiving_dfi", "0313014A");
        assert!(matches!(
            validate_data_types(&r),
            Err(AchError::InvalidDataType {
                field: "receiving_dfi",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut r = entry_record();
        r.set("amount", Amount::from_cents(-500));
        assert!(matches!(
            validate_data_types(&r),
            Err(AchError::InvalidDataType { field: "amount", .. })
        ));
    }

    #[test]
    fn test_empty_optional_numeric_passes() {
        let r = entry_record();
        assert_eq!(r.text("trace_number"), "");
        assert!(validate_data_types(&r).is_ok());
    }

    #[test]
    fn test_codes() {
        assert!(validate_transaction_code("22").is_ok());
        assert!(validate_transaction_code("27").is_ok());
        assert!(matches!(
            validate_transaction_code("99"),
            Err(AchError::InvalidTransactionCode(_))
        ));
        assert!(validate_service_class_code("225").is_ok());
        assert!(matches!(
            validate_service_class_code("201"),
            Err(AchError::InvalidServiceClassCode(_))
        ));
    }
}
