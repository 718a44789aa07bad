//! Entry detail records and their addenda.

use crate::addenda::Addenda;
use crate::amount::Amount;
use crate::checksum::{compute_check_digit, validate_routing_number};
use crate::error::{AchError, Result};
use crate::field::{truncate, FieldOverrides, FieldValue};
use crate::layout::{AddendaVariant, EntryVariant, IatAddendaType, LINE_TERMINATOR};
use crate::record::Record;
use crate::validate;

/// High-level values for a new entry.
///
/// `fields` holds raw overrides and is applied first, so the high-level
/// values win where both name the same field.
#[derive(Debug, Clone, Default)]
pub struct EntryOptions {
    pub transaction_code: String,
    /// 8 digits (check digit computed) or 9 digits (check digit verified).
    pub receiving_dfi: String,
    /// Truncated to the account field's width.
    pub dfi_account: String,
    pub amount: Amount,
    pub id_number: Option<String>,
    /// Truncated to 22 characters.
    pub individual_name: Option<String>,
    pub discretionary_data: Option<String>,
    /// Left empty, the file's generation pass assigns one.
    pub trace_number: Option<String>,
    pub fields: FieldOverrides,
}

/// One transaction plus its ordered addenda.
///
/// Built and validated in one step; afterwards only addenda can be attached.
/// The trace number and back-references are finalized by the owning file.
#[derive(Debug, Clone)]
pub struct Entry {
    variant: EntryVariant,
    record: Record,
    addendas: Vec<Addenda>,
}

impl Entry {
    /// Standard (PPD, CCD, WEB, ...) entry.
    pub fn new(options: EntryOptions) -> Result<Self> {
        Self::with_variant(EntryVariant::Standard, options)
    }

    /// Automated accounting advice entry.
    pub fn adv(options: EntryOptions) -> Result<Self> {
        Self::with_variant(EntryVariant::Adv, options)
    }

    /// International ACH transaction entry. Needs addenda 10 through 16
    /// before it can join a batch.
    pub fn iat(options: EntryOptions) -> Result<Self> {
        Self::with_variant(EntryVariant::Iat, options)
    }

    pub fn with_variant(variant: EntryVariant, options: EntryOptions) -> Result<Self> {
        let mut record = Record::new(variant.layout())?;
        record.apply_overrides(&options.fields);

        if !options.transaction_code.is_empty() {
            record.set("transaction_code", options.transaction_code.trim());
        }

        if !options.receiving_dfi.is_empty() {
            let mut routing: Vec<char> = compute_check_digit(options.receiving_dfi.trim())
                .chars()
                .collect();
            let check = routing.pop().map(String::from).unwrap_or_default();
            record.set("receiving_dfi", routing.into_iter().collect::<String>());
            record.set("check_digit", check);
        }

        if !options.dfi_account.is_empty() {
            set_truncated(&mut record, "dfi_account", &options.dfi_account);
        }

        record.set("amount", options.amount);

        if let Some(id) = &options.id_number {
            record.set("id_number", id.as_str());
        }
        if let Some(name) = &options.individual_name {
            set_truncated(&mut record, "individual_name", name);
        }
        if let Some(data) = &options.discretionary_data {
            record.set("discretionary_data", data.as_str());
        }
        if let Some(trace) = &options.trace_number {
            record.set("trace_number", trace.as_str());
        }

        let entry = Entry {
            variant,
            record,
            addendas: Vec::new(),
        };
        entry.validate()?;
        Ok(entry)
    }

    fn validate(&self) -> Result<()> {
        validate::validate_required_fields(&self.record)?;
        validate::validate_transaction_code(&self.transaction_code())?;
        validate_routing_number(&format!(
            "{}{}",
            self.record.text("receiving_dfi"),
            self.record.text("check_digit")
        ))?;
        validate::validate_lengths(&self.record)?;
        validate::validate_data_types(&self.record)
    }

    /// Attaches an addenda, flagging this entry as having addenda.
    ///
    /// The addenda gets the next sequence number and, if this entry already
    /// has a trace number, its entry detail sequence number. Otherwise that
    /// back-reference is filled by the file's generation pass.
    pub fn add_addenda(&mut self, mut addenda: Addenda) {
        self.record.set("addenda_id", "1");

        let sequence = match (self.variant, addenda.variant()) {
            // IAT 17 and 18 records are numbered within their own type.
            (EntryVariant::Iat, kind) => {
                self.addendas.iter().filter(|a| a.variant() == kind).count() + 1
            }
            _ => self.addendas.len() + 1,
        };
        addenda.set("addenda_sequence_number", sequence);

        if let Some(trace) = self.trace_number() {
            addenda.link_trace_number(&trace);
        }

        self.addendas.push(addenda);
        if self.variant == EntryVariant::Iat {
            self.record.set("number_of_addenda", self.addendas.len());
        }
    }

    /// Attaches a return addenda, copying this entry's trace number onto it.
    pub fn add_return_addenda(&mut self, mut addenda: Addenda) {
        self.record.set("addenda_id", "1");
        if let Some(trace) = self.trace_number() {
            addenda.set("trace_number", trace);
        }
        self.addendas.push(addenda);
    }

    /// Physical lines this entry occupies: itself plus its addenda.
    pub fn record_count(&self) -> usize {
        1 + self.addendas.len()
    }

    pub fn variant(&self) -> EntryVariant {
        self.variant
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn addendas(&self) -> &[Addenda] {
        &self.addendas
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.record.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        self.record.set(name, value)
    }

    pub fn transaction_code(&self) -> String {
        self.record.text("transaction_code")
    }

    pub fn amount(&self) -> Result<Amount> {
        let value = self.record.get("amount");
        value.and_then(FieldValue::as_amount).ok_or_else(|| {
            AchError::InvalidAmount(value.map(FieldValue::rendered).unwrap_or_default())
        })
    }

    /// The 8-digit receiving DFI prefix as a number, for entry hashing.
    pub fn receiving_dfi(&self) -> Result<u64> {
        self.record
            .get("receiving_dfi")
            .and_then(FieldValue::as_u64)
            .ok_or(AchError::InvalidDataType {
                record: self.record.name(),
                field: "receiving_dfi",
                expected: "numeric",
            })
    }

    /// The trace number, if this layout has one and it has been set.
    pub fn trace_number(&self) -> Option<String> {
        if !self.variant.carries_trace_number() {
            return None;
        }
        Some(self.record.text("trace_number")).filter(|t| !t.is_empty())
    }

    pub fn has_iat_addenda(&self, kind: IatAddendaType) -> bool {
        self.addendas
            .iter()
            .any(|a| a.variant() == AddendaVariant::Iat(kind))
    }

    pub(crate) fn assign_trace_number(&mut self, trace: String) {
        self.record.set("trace_number", trace);
    }

    /// Pushes this entry's trace number (or `fallback` when it has none)
    /// into every addenda back-reference.
    pub(crate) fn link_addendas(&mut self, fallback: &str) {
        let trace = self.trace_number().unwrap_or_else(|| fallback.to_string());
        for addenda in &mut self.addendas {
            addenda.link_trace_number(&trace);
        }
    }

    /// Fills an ADV entry's sequence number within its batch if unset.
    pub(crate) fn assign_batch_sequence(&mut self, sequence: usize) {
        let unset = self
            .record
            .get("sequence_number_within_batch")
            .is_some_and(FieldValue::is_empty);
        if unset {
            self.record.set("sequence_number_within_batch", sequence);
        }
    }

    /// The entry line followed by one line per addenda.
    pub fn render_lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.record_count());
        lines.push(self.record.render()?);
        for addenda in &self.addendas {
            lines.push(addenda.render()?);
        }
        Ok(lines)
    }

    pub fn generate_string(&self) -> Result<String> {
        Ok(self.render_lines()?.join(LINE_TERMINATOR))
    }
}

fn set_truncated(record: &mut Record, name: &str, value: &str) {
    if let Some(width) = record.spec(name).map(|s| s.width) {
        record.set(name, truncate(value, width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addenda::{AddendaOptions, ReturnAddendaOptions};
    use crate::layout::RECORD_WIDTH;
    use std::str::FromStr;

    fn options() -> EntryOptions {
        EntryOptions {
            transaction_code: "22".to_string(),
            receiving_dfi: "03130142".to_string(),
            dfi_account: "12345678".to_string(),
            amount: Amount::from_str("1000").unwrap(),
            id_number: Some("EMP001".to_string()),
            individual_name: Some("JANE DOE".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_digit_split() {
        let entry = Entry::new(options()).unwrap();
        assert_eq!(entry.get("receiving_dfi"), Some(&FieldValue::from("03130142")));
        assert_eq!(entry.get("check_digit"), Some(&FieldValue::from("2")));
        assert_eq!(entry.receiving_dfi().unwrap(), 3_130_142);
    }

    #[test]
    fn test_nine_digit_routing_verified() {
        let ok = Entry::new(EntryOptions {
            receiving_dfi: "031301422".to_string(),
            ..options()
        });
        assert!(ok.is_ok());

        let bad = Entry::new(EntryOptions {
            receiving_dfi: "031301421".to_string(),
            ..options()
        });
        assert!(matches!(bad, Err(AchError::InvalidRoutingNumber(_))));
    }

    #[test]
    fn test_rejects_unknown_transaction_code() {
        let result = Entry::new(EntryOptions {
            transaction_code: "99".to_string(),
            ..options()
        });
        assert!(matches!(result, Err(AchError::InvalidTransactionCode(_))));
    }

    #[test]
    fn test_rejects_missing_name() {
        let result = Entry::new(EntryOptions {
            individual_name: None,
            ..options()
        });
        assert!(matches!(
            result,
            Err(AchError::MissingRequiredField {
                field: "individual_name",
                ..
            })
        ));
    }

    #[test]
    fn test_long_values_truncated() {
        let entry = Entry::new(EntryOptions {
            dfi_account: "1234567890123456789012".to_string(),
            individual_name: Some("A VERY LONG RECEIVER NAME THAT OVERFLOWS".to_string()),
            ..options()
        })
        .unwrap();
        assert_eq!(entry.record().text("dfi_account").len(), 17);
        assert_eq!(entry.record().text("individual_name").len(), 22);
    }

    #[test]
    fn test_render_layout() {
        let entry = Entry::new(EntryOptions {
            trace_number: Some("031301420000001".to_string()),
            ..options()
        })
        .unwrap();
        let line = entry.generate_string().unwrap();
        assert_eq!(line.len(), RECORD_WIDTH);
        assert_eq!(&line[..12], "622031301422");
        assert_eq!(&line[12..29], "12345678         ");
        assert_eq!(&line[29..39], "0000100000");
        assert_eq!(&line[78..79], "0");
        assert_eq!(&line[79..], "031301420000001");
    }

    #[test]
    fn test_add_addenda_numbers_and_flags() {
        let mut entry = Entry::new(options()).unwrap();
        entry.add_addenda(Addenda::new(AddendaOptions::default()).unwrap());
        entry.add_addenda(Addenda::new(AddendaOptions::default()).unwrap());

        assert_eq!(entry.get("addenda_id"), Some(&FieldValue::from("1")));
        assert_eq!(entry.record_count(), 3);
        assert_eq!(
            entry.addendas()[1].get("addenda_sequence_number"),
            Some(&FieldValue::Number(2))
        );
        // No trace number yet: back-reference left for generation.
        assert_eq!(
            entry.addendas()[0].get("entry_detail_sequence_number"),
            Some(&FieldValue::from(""))
        );
    }

    #[test]
    fn test_add_addenda_with_known_trace() {
        let mut entry = Entry::new(EntryOptions {
            trace_number: Some("031301420000042".to_string()),
            ..options()
        })
        .unwrap();
        entry.add_addenda(Addenda::new(AddendaOptions::default()).unwrap());
        assert_eq!(
            entry.addendas()[0].get("entry_detail_sequence_number"),
            Some(&FieldValue::from("0000042"))
        );
    }

    #[test]
    fn test_add_return_addenda_copies_trace() {
        let mut entry = Entry::new(EntryOptions {
            transaction_code: "21".to_string(),
            trace_number: Some("031301420000007".to_string()),
            ..options()
        })
        .unwrap();
        let addenda = Addenda::returned(ReturnAddendaOptions {
            return_reason_code: "R03".to_string(),
            original_entry_trace_number: "091000010000003".to_string(),
            original_receiving_dfi: "03130142".to_string(),
            ..Default::default()
        })
        .unwrap();
        entry.add_return_addenda(addenda);

        assert_eq!(
            entry.addendas()[0].get("trace_number"),
            Some(&FieldValue::from("031301420000007"))
        );
        assert_eq!(entry.get("addenda_id"), Some(&FieldValue::from("1")));
    }

    #[test]
    fn test_adv_entry_has_no_trace_number() {
        let mut fields = FieldOverrides::new();
        fields.insert("advice_routing_number".to_string(), "031301422".into());
        fields.insert("ach_operator_routing_number".to_string(), "03130142".into());
        fields.insert("julian_date_created".to_string(), "292".into());
        let mut entry = Entry::adv(EntryOptions {
            transaction_code: "81".to_string(),
            fields,
            ..options()
        })
        .unwrap();
        assert_eq!(entry.trace_number(), None);

        entry.assign_batch_sequence(3);
        assert_eq!(
            entry.get("sequence_number_within_batch"),
            Some(&FieldValue::Number(3))
        );
        let line = entry.generate_string().unwrap();
        assert_eq!(line.len(), RECORD_WIDTH);
        assert!(line.ends_with("031301422920003"));
    }
}
