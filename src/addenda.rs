//! Addenda records: continuation lines attached to an entry.

use crate::dates::format_date;
use crate::error::Result;
use crate::field::{truncate, FieldOverrides, FieldValue};
use crate::layout::{AddendaVariant, IatAddendaType};
use crate::record::Record;
use crate::validate;
use chrono::NaiveDate;

/// Options for a standard (`05`) addenda.
#[derive(Debug, Clone, Default)]
pub struct AddendaOptions {
    /// Truncated to 80 characters.
    pub payment_related_information: Option<String>,
    pub fields: FieldOverrides,
}

/// Options for a return (`99`) addenda.
#[derive(Debug, Clone, Default)]
pub struct ReturnAddendaOptions {
    /// `R01`, `R02`, ...
    pub return_reason_code: String,
    pub original_entry_trace_number: String,
    pub date_of_death: Option<NaiveDate>,
    pub original_receiving_dfi: String,
    /// Truncated to 44 characters.
    pub addenda_information: Option<String>,
    pub fields: FieldOverrides,
}

/// One addenda record.
///
/// Back-references to the owning entry (`entry_detail_sequence_number`,
/// `trace_number`) are plain copies, filled either when the addenda is
/// attached or by the file's generation pass.
#[derive(Debug, Clone)]
pub struct Addenda {
    variant: AddendaVariant,
    record: Record,
}

impl Addenda {
    /// Standard payment-related-information addenda.
    pub fn new(options: AddendaOptions) -> Result<Self> {
        let mut addenda = Self::blank(AddendaVariant::Standard)?;
        addenda.record.apply_overrides(&options.fields);

        if let Some(info) = &options.payment_related_information {
            addenda.set_truncated("payment_related_information", info);
        }

        addenda.validate()?;
        Ok(addenda)
    }

    /// Return addenda carrying the reason an entry was sent back.
    pub fn returned(options: ReturnAddendaOptions) -> Result<Self> {
        let mut addenda = Self::blank(AddendaVariant::Return)?;
        addenda.record.apply_overrides(&options.fields);

        if !options.return_reason_code.is_empty() {
            addenda.set("return_reason_code", options.return_reason_code.as_str());
        }
        if !options.original_entry_trace_number.is_empty() {
            addenda.set(
                "original_entry_trace_number",
                options.original_entry_trace_number.as_str(),
            );
        }
        if let Some(date) = options.date_of_death {
            addenda.set("date_of_death", format_date(date));
        }
        if !options.original_receiving_dfi.is_empty() {
            addenda.set_truncated("original_receiving_dfi", &options.original_receiving_dfi);
        }
        if let Some(info) = &options.addenda_information {
            addenda.set_truncated("addenda_information", info);
        }

        addenda.validate()?;
        Ok(addenda)
    }

    /// One of the IAT addenda records, populated from raw field overrides.
    pub fn iat(kind: IatAddendaType, fields: FieldOverrides) -> Result<Self> {
        let mut addenda = Self::blank(AddendaVariant::Iat(kind))?;
        addenda.record.apply_overrides(&fields);
        addenda.validate()?;
        Ok(addenda)
    }

    fn blank(variant: AddendaVariant) -> Result<Self> {
        Ok(Addenda {
            variant,
            record: Record::new(variant.layout())?,
        })
    }

    fn set_truncated(&mut self, name: &str, value: &str) {
        if let Some(width) = self.record.spec(name).map(|s| s.width) {
            self.record.set(name, truncate(value, width));
        }
    }

    fn validate(&self) -> Result<()> {
        validate::validate_record(&self.record)
    }

    pub fn variant(&self) -> AddendaVariant {
        self.variant
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.record.get(name)
    }

    /// Sets a field if this addenda's layout has it.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        self.record.set(name, value)
    }

    /// Copies the owning entry's trace number into whichever back-reference
    /// fields this layout carries. `entry_detail_sequence_number` takes the
    /// trace number's rightmost digits.
    pub(crate) fn link_trace_number(&mut self, trace: &str) {
        if self.record.has("trace_number") {
            self.record.set("trace_number", trace);
        }
        if let Some(width) = self
            .record
            .spec("entry_detail_sequence_number")
            .map(|s| s.width)
        {
            let skip = trace.chars().count().saturating_sub(width);
            let tail: String = trace.chars().skip(skip).collect();
            self.record.set("entry_detail_sequence_number", tail);
        }
    }

    pub fn render(&self) -> Result<String> {
        self.record.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AchError;
    use crate::layout::RECORD_WIDTH;

    fn iat_fields(pairs: &[(&str, &str)]) -> FieldOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_standard_addenda_renders() {
        let addenda = Addenda::new(AddendaOptions {
            payment_related_information: Some("INVOICE 1234".to_string()),
            ..Default::default()
        })
        .unwrap();

        let line = addenda.render().unwrap();
        assert_eq!(line.len(), RECORD_WIDTH);
        assert!(line.starts_with("705INVOICE 1234"));
        assert!(line.ends_with("00010000000"));
    }

    #[test]
    fn test_payment_information_truncated() {
        let long = "X".repeat(120);
        let addenda = Addenda::new(AddendaOptions {
            payment_related_information: Some(long),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            addenda.get("payment_related_information"),
            Some(&FieldValue::from("X".repeat(80)))
        );
    }

    #[test]
    fn test_return_addenda_requires_reason() {
        let result = Addenda::returned(ReturnAddendaOptions {
            original_entry_trace_number: "031301420000001".to_string(),
            original_receiving_dfi: "03130142".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(AchError::MissingRequiredField {
                field: "return_reason_code",
                ..
            })
        ));
    }

    #[test]
    fn test_return_addenda_fields() {
        let addenda = Addenda::returned(ReturnAddendaOptions {
            return_reason_code: "R01".to_string(),
            original_entry_trace_number: "031301420000001".to_string(),
            date_of_death: None,
            original_receiving_dfi: "03130142".to_string(),
            addenda_information: Some("INSUFFICIENT FUNDS".to_string()),
            ..Default::default()
        })
        .unwrap();

        let line = addenda.render().unwrap();
        assert_eq!(line.len(), RECORD_WIDTH);
        assert_eq!(&line[..21], "799R01031301420000001");
        assert_eq!(&line[21..27], "      ");
        assert_eq!(&line[27..35], "03130142");
    }

    #[test]
    fn test_link_trace_number() {
        let mut addenda = Addenda::new(AddendaOptions::default()).unwrap();
        addenda.link_trace_number("031301420001234");
        assert_eq!(
            addenda.get("entry_detail_sequence_number"),
            Some(&FieldValue::from("0001234"))
        );
        assert!(addenda.get("trace_number").is_none());
    }

    #[test]
    fn test_iat_addenda_requires_its_fields() {
        let err = Addenda::iat(IatAddendaType::OriginatorAddress, FieldOverrides::new());
        assert!(matches!(
            err,
            Err(AchError::MissingRequiredField {
                field: "originator_name",
                ..
            })
        ));

        let ok = Addenda::iat(
            IatAddendaType::OriginatorAddress,
            iat_fields(&[
                ("originator_name", "ACME CORP"),
                ("originator_street_address", "1 MAIN ST"),
            ]),
        )
        .unwrap();
        assert!(ok.render().unwrap().starts_with("711ACME CORP"));
    }
}
