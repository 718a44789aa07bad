//! Batches: an ordered run of entries framed by header and control records.

use crate::amount::Amount;
use crate::checksum::{compute_check_digit, validate_routing_number, EntryHash};
use crate::dates::format_date;
use crate::entry::Entry;
use crate::error::{AchError, Result};
use crate::field::{truncate, FieldOverrides, FieldValue};
use crate::layout::{BatchVariant, EntryVariant, IatAddendaType, LINE_TERMINATOR};
use crate::record::Record;
use crate::transaction::{self, TotalsPolicy, TotalsWarning, TxClass};
use crate::validate;
use chrono::NaiveDate;
use log::warn;

/// High-level values for a new batch.
///
/// `header` and `control` hold raw overrides applied before the high-level
/// values. For IAT batches the IAT-only header fields (currency codes,
/// foreign exchange indicators, originator identification) go in `header`.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// `200`, `220`, `225` or `280`.
    pub service_class_code: String,
    /// Truncated to 16 characters.
    pub company_name: String,
    pub company_discretionary_data: Option<String>,
    pub company_identification: String,
    /// `PPD`, `CCD`, `WEB`, ... `ADV` and `IAT` select their own layouts.
    pub standard_entry_class_code: String,
    /// Truncated to 10 characters.
    pub company_entry_description: String,
    pub company_descriptive_date: Option<String>,
    pub effective_entry_date: Option<NaiveDate>,
    /// First 8 digits of the originating bank's routing number.
    pub originating_dfi: String,
    pub message_authentication_code: Option<String>,
    pub totals_policy: TotalsPolicy,
    pub header: FieldOverrides,
    pub control: FieldOverrides,
}

/// An ordered collection of entries.
///
/// # Invariants
///
/// - `control.service_class_code == header.service_class_code`
/// - `control.addenda_count` is the number of entry and addenda lines
/// - `control.total_debit`/`total_credit` are the sums of entry amounts by
///   transaction code class
/// - `control.entry_hash` is the sum of receiving DFI prefixes mod 10^10
#[derive(Debug, Clone)]
pub struct Batch {
    variant: BatchVariant,
    header: Record,
    control: Record,
    entries: Vec<Entry>,
    policy: TotalsPolicy,
    warnings: Vec<TotalsWarning>,
}

impl Batch {
    pub fn new(options: BatchOptions) -> Result<Self> {
        let variant = BatchVariant::from_sec_code(&options.standard_entry_class_code);
        let mut header = Record::new(variant.header_layout())?;
        let mut control = Record::new(variant.control_layout())?;
        header.apply_overrides(&options.header);
        control.apply_overrides(&options.control);

        for (name, value) in [
            ("service_class_code", Some(&options.service_class_code)),
            ("company_discretionary_data", options.company_discretionary_data.as_ref()),
            ("company_identification", Some(&options.company_identification)),
            ("standard_entry_class_code", Some(&options.standard_entry_class_code)),
        ] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                header.set(name, value.trim());
            }
        }

        // Validated before slicing down to the 8-digit prefix.
        let originating_dfi = compute_check_digit(options.originating_dfi.trim());
        validate_routing_number(&originating_dfi)?;

        set_truncated(&mut header, "company_name", &options.company_name);
        set_truncated(&mut header, "company_entry_description", &options.company_entry_description);
        if let Some(date) = &options.company_descriptive_date {
            set_truncated(&mut header, "company_descriptive_date", date);
        }
        if let Some(date) = options.effective_entry_date {
            header.set("effective_entry_date", format_date(date));
        }
        header.set("originating_dfi", truncate(&originating_dfi, 8));

        control.set("service_class_code", header.text("service_class_code"));
        if variant != BatchVariant::Adv {
            let company_id = match variant {
                BatchVariant::Iat => header.text("originator_identification"),
                _ => header.text("company_identification"),
            };
            control.set("company_identification", company_id);
            control.set(
                "message_authentication_code",
                options.message_authentication_code.clone().unwrap_or_default(),
            );
        }
        control.set("originating_dfi", header.text("originating_dfi"));

        let batch = Batch {
            variant,
            header,
            control,
            entries: Vec::new(),
            policy: options.totals_policy,
            warnings: Vec::new(),
        };
        batch.validate()?;
        Ok(batch)
    }

    fn validate(&self) -> Result<()> {
        validate::validate_required_fields(&self.header)?;
        validate::validate_service_class_code(&self.header.text("service_class_code"))?;
        validate::validate_lengths(&self.header)?;
        validate::validate_data_types(&self.header)?;
        validate::validate_record(&self.control)
    }

    /// Appends an entry and recomputes the control totals.
    ///
    /// The entry's layout must match the batch's (standard, ADV, IAT), and an
    /// IAT entry must already carry addenda 10 through 16. Under
    /// [`TotalsPolicy::Strict`] an entry with an unbucketed transaction code
    /// is refused; under the permissive default it is kept, left out of the
    /// debit and credit totals, and reported through [`Batch::warnings`].
    /// A refused entry leaves the batch unchanged.
    pub fn add_entry(&mut self, entry: Entry) -> Result<()> {
        let expected = self.variant.entry_variant();
        if entry.variant() != expected {
            return Err(AchError::IncompatibleEntry {
                batch: self.variant.name(),
                entry: entry.variant().name(),
            });
        }
        if expected == EntryVariant::Iat {
            if let Some(missing) = IatAddendaType::MANDATORY
                .iter()
                .find(|kind| !entry.has_iat_addenda(**kind))
            {
                return Err(AchError::MissingIatAddenda {
                    type_code: missing.type_code(),
                });
            }
        }
        if self.policy == TotalsPolicy::Strict {
            validate::validate_transaction_code(&entry.transaction_code())?;
        }
        // Checked up front so a failure cannot leave a half-updated batch.
        entry.receiving_dfi()?;
        entry.amount()?;

        let count = self.control.get("addenda_count").and_then(FieldValue::as_u64).unwrap_or(0);
        self.control.set("addenda_count", count + entry.record_count() as u64);
        self.entries.push(entry);

        self.recompute_totals()
    }

    /// Rescans every entry for hash and debit/credit totals.
    fn recompute_totals(&mut self) -> Result<()> {
        let mut entry_hash = EntryHash::new();
        let mut total_debit = Amount::ZERO;
        let mut total_credit = Amount::ZERO;
        let mut warnings = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            entry_hash.add(entry.receiving_dfi()?);

            let code = entry.transaction_code();
            match transaction::classify(&code) {
                Some(TxClass::Credit) => total_credit += entry.amount()?,
                Some(TxClass::Debit) => total_debit += entry.amount()?,
                None => {
                    warn!(
                        "Batch {}: entry {} has unrecognized transaction code {:?}, left out of totals",
                        self.header.text("batch_number"),
                        index,
                        code
                    );
                    warnings.push(TotalsWarning {
                        entry_index: index,
                        transaction_code: code,
                    });
                }
            }
        }

        self.control.set("total_credit", total_credit);
        self.control.set("total_debit", total_debit);
        self.control.set("entry_hash", entry_hash.value());
        self.warnings = warnings;
        Ok(())
    }

    pub fn variant(&self) -> BatchVariant {
        self.variant
    }

    pub fn header(&self) -> &Record {
        &self.header
    }

    pub fn control(&self) -> &Record {
        &self.control
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose amounts were left out of the totals.
    pub fn warnings(&self) -> &[TotalsWarning] {
        &self.warnings
    }

    pub fn total_debit(&self) -> Amount {
        self.control
            .get("total_debit")
            .and_then(FieldValue::as_amount)
            .unwrap_or(Amount::ZERO)
    }

    pub fn total_credit(&self) -> Amount {
        self.control
            .get("total_credit")
            .and_then(FieldValue::as_amount)
            .unwrap_or(Amount::ZERO)
    }

    pub(crate) fn set_batch_number(&mut self, number: u64) {
        self.header.set("batch_number", number);
        self.control.set("batch_number", number);
    }

    /// Header value if the header has the field, otherwise control value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.header.get(name).or_else(|| self.control.get(name))
    }

    /// Sets the field on the header and on the control, wherever it exists.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        let in_header = self.header.set(name, value.clone());
        let in_control = self.control.set(name, value);
        in_header || in_control
    }

    /// Header, every entry with its addenda, then control.
    pub fn render_lines(&self) -> Result<Vec<String>> {
        let mut lines = vec![self.header.render()?];
        for entry in &self.entries {
            lines.extend(entry.render_lines()?);
        }
        lines.push(self.control.render()?);
        Ok(lines)
    }

    /// The batch as text, every line CRLF-terminated.
    pub fn generate_string(&self) -> Result<String> {
        let mut out = String::new();
        for line in self.render_lines()? {
            out.push_str(&line);
            out.push_str(LINE_TERMINATOR);
        }
        Ok(out)
    }
}

fn set_truncated(record: &mut Record, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if let Some(width) = record.spec(name).map(|s| s.width) {
        record.set(name, truncate(value, width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addenda::{Addenda, AddendaOptions};
    use crate::entry::EntryOptions;
    use crate::layout::RECORD_WIDTH;
    use std::str::FromStr;

    fn batch_options() -> BatchOptions {
        BatchOptions {
            service_class_code: "200".to_string(),
            company_name: "ACME CORP".to_string(),
            company_identification: "1234567890".to_string(),
            standard_entry_class_code: "PPD".to_string(),
            company_entry_description: "PAYROLL".to_string(),
            effective_entry_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            originating_dfi: "03130142".to_string(),
            ..Default::default()
        }
    }

    fn entry(code: &str, routing: &str, amount: &str) -> Entry {
        Entry::new(EntryOptions {
            transaction_code: code.to_string(),
            receiving_dfi: routing.to_string(),
            dfi_account: "987654321".to_string(),
            amount: Amount::from_str(amount).unwrap(),
            individual_name: Some("JOHN SMITH".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_credit_and_debit_totals() {
        let mut batch = Batch::new(batch_options()).unwrap();
        batch.add_entry(entry("22", "03130142", "1000")).unwrap();
        batch.add_entry(entry("27", "03130142", "500")).unwrap();

        assert_eq!(batch.total_credit().to_string(), "1000.00");
        assert_eq!(batch.total_debit().to_string(), "500.00");
        assert_eq!(batch.get("addenda_count"), Some(&FieldValue::Number(2)));
        assert_eq!(
            batch.control().get("entry_hash"),
            Some(&FieldValue::Number(6_260_284))
        );
        assert!(batch.warnings().is_empty());
    }

    #[test]
    fn test_amount_set_as_number_matches_control_total() {
        let mut e = entry("22", "03130142", "0");
        e.set("amount", 1000u64);
        let mut batch = Batch::new(batch_options()).unwrap();
        batch.add_entry(e).unwrap();

        let lines = batch.render_lines().unwrap();
        assert_eq!(&lines[1][29..39], "0000100000");
        assert_eq!(batch.total_credit().to_string(), "1000.00");
        assert_eq!(batch.control().text("total_credit"), "100000");
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let mut e = entry("22", "03130142", "0");
        e.set("amount", 1u64 << 62);
        let mut batch = Batch::new(batch_options()).unwrap();

        let err = batch.add_entry(e).unwrap_err();
        assert!(matches!(err, AchError::InvalidAmount(_)));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_addenda_count_includes_addenda() {
        let mut batch = Batch::new(batch_options()).unwrap();
        let mut e = entry("22", "03130142", "10");
        e.add_addenda(Addenda::new(AddendaOptions::default()).unwrap());
        batch.add_entry(e).unwrap();
        batch.add_entry(entry("22", "03130142", "10")).unwrap();
        assert_eq!(batch.get("addenda_count"), Some(&FieldValue::Number(3)));
    }

    #[test]
    fn test_control_mirrors_header() {
        let batch = Batch::new(batch_options()).unwrap();
        assert_eq!(batch.control().text("service_class_code"), "200");
        assert_eq!(batch.control().text("company_identification"), "1234567890");
        assert_eq!(batch.control().text("originating_dfi"), "03130142");
        assert_eq!(batch.header().text("effective_entry_date"), "261020");
    }

    #[test]
    fn test_invalid_service_class_code() {
        let result = Batch::new(BatchOptions {
            service_class_code: "201".to_string(),
            ..batch_options()
        });
        assert!(matches!(result, Err(AchError::InvalidServiceClassCode(_))));
    }

    #[test]
    fn test_missing_originating_dfi() {
        let result = Batch::new(BatchOptions {
            originating_dfi: String::new(),
            ..batch_options()
        });
        assert!(matches!(result, Err(AchError::InvalidRoutingNumber(_))));
    }

    #[test]
    fn test_missing_effective_date() {
        let result = Batch::new(BatchOptions {
            effective_entry_date: None,
            ..batch_options()
        });
        assert!(matches!(
            result,
            Err(AchError::MissingRequiredField {
                field: "effective_entry_date",
                ..
            })
        ));
    }

    #[test]
    fn test_unrecognized_code_permissive() {
        let mut batch = Batch::new(batch_options()).unwrap();
        let mut odd = entry("22", "03130142", "75");
        odd.set("transaction_code", "99");
        batch.add_entry(entry("22", "03130142", "10")).unwrap();
        batch.add_entry(odd).unwrap();

        assert_eq!(batch.entries().len(), 2);
        assert_eq!(batch.total_credit().to_string(), "10.00");
        assert_eq!(
            batch.warnings(),
            &[TotalsWarning {
                entry_index: 1,
                transaction_code: "99".to_string()
            }]
        );
    }

    #[test]
    fn test_unrecognized_code_strict() {
        let mut batch = Batch::new(BatchOptions {
            totals_policy: TotalsPolicy::Strict,
            ..batch_options()
        })
        .unwrap();
        let mut odd = entry("22", "03130142", "75");
        odd.set("transaction_code", "99");

        assert!(matches!(
            batch.add_entry(odd),
            Err(AchError::InvalidTransactionCode(_))
        ));
        assert!(batch.is_empty());
        assert_eq!(batch.get("addenda_count"), Some(&FieldValue::from("0")));
    }

    #[test]
    fn test_adv_control_layout() {
        let batch = Batch::new(BatchOptions {
            service_class_code: "280".to_string(),
            standard_entry_class_code: "ADV".to_string(),
            ..batch_options()
        })
        .unwrap();
        let control = batch.control();
        assert!(!control.has("company_identification"));
        assert!(!control.has("message_authentication_code"));
        assert!(!control.has("reserved"));
        assert_eq!(control.spec("total_debit").unwrap().width, 20);
        assert_eq!(control.spec("originating_dfi").unwrap().position, 8);
        assert_eq!(control.spec("batch_number").unwrap().position, 9);
        assert_eq!(control.render().unwrap().len(), RECORD_WIDTH);
    }

    #[test]
    fn test_rejects_mismatched_entry_variant() {
        let mut batch = Batch::new(BatchOptions {
            service_class_code: "280".to_string(),
            standard_entry_class_code: "ADV".to_string(),
            ..batch_options()
        })
        .unwrap();
        assert!(matches!(
            batch.add_entry(entry("22", "03130142", "1")),
            Err(AchError::IncompatibleEntry {
                batch: "ADV",
                entry: "standard"
            })
        ));
    }

    #[test]
    fn test_set_writes_header_and_control() {
        let mut batch = Batch::new(batch_options()).unwrap();
        assert!(batch.set("batch_number", 7u64));
        assert_eq!(batch.header().get("batch_number"), Some(&FieldValue::Number(7)));
        assert_eq!(batch.control().get("batch_number"), Some(&FieldValue::Number(7)));
        assert!(!batch.set("no_such_field", "x"));
    }

    #[test]
    fn test_generate_string() {
        let mut batch = Batch::new(batch_options()).unwrap();
        batch.add_entry(entry("22", "03130142", "1000")).unwrap();
        let text = batch.generate_string().unwrap();
        let lines: Vec<&str> = text.split_terminator("\r\n").collect();

        assert_eq!(lines.len(), 3);
        assert!(text.ends_with("\r\n"));
        assert!(lines.iter().all(|l| l.len() == RECORD_WIDTH));
        assert!(lines[0].starts_with("5200ACME CORP"));
        assert!(lines[1].starts_with("622031301422"));
        assert_eq!(
            &lines[2][..44],
            concat!("8200", "000001", "0003130142", "000000000000", "000000100000")
        );
    }
}
