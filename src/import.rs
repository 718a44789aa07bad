//! CSV payment import.
//!
//! Turns a flat CSV of payments into an [`AchFile`]. Consecutive rows that
//! share the batch columns (company, SEC code, description, originating DFI,
//! effective date) form one batch. Rows that fail to parse or validate are
//! logged at warn level, reported back in [`ImportReport::skipped`], and do
//! not stop the import.

use crate::addenda::{Addenda, AddendaOptions};
use crate::amount::Amount;
use crate::batch::{Batch, BatchOptions};
use crate::checksum::compute_check_digit;
use crate::dates::compute_business_day;
use crate::entry::{Entry, EntryOptions};
use crate::error::{AchError, Result};
use crate::field::{FieldOverrides, FieldValue};
use crate::file::{AchFile, FileOptions};
use crate::layout::BatchVariant;
use crate::transaction::{self, TotalsPolicy, TxClass};
use chrono::{Datelike, Local, NaiveDate};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::io::Read;

/// One payment as read from CSV.
///
/// Optional columns may be left empty.
#[derive(Debug, Deserialize)]
pub struct PaymentRow {
    pub company_name: String,
    pub company_id: String,
    /// Standard entry class code: `PPD`, `CCD`, `WEB`, `ADV`, ...
    pub sec_code: String,
    pub description: String,
    pub originating_dfi: String,
    /// `YYYY-MM-DD`; empty means the next business day.
    pub effective_date: Option<String>,
    pub transaction_code: String,
    pub routing_number: String,
    pub account_number: String,
    /// Dollars, e.g. `1250.00`.
    pub amount: Amount,
    pub id_number: Option<String>,
    pub name: String,
    /// Payment related information for a single `05` addenda.
    pub addenda: Option<String>,
}

/// The columns that decide which batch a row lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BatchKey {
    company_name: String,
    company_id: String,
    sec_code: String,
    description: String,
    originating_dfi: String,
    effective_date: NaiveDate,
}

impl BatchKey {
    fn options(&self, service_class_code: &str, policy: TotalsPolicy) -> BatchOptions {
        BatchOptions {
            service_class_code: service_class_code.to_string(),
            company_name: self.company_name.clone(),
            company_identification: self.company_id.clone(),
            standard_entry_class_code: self.sec_code.clone(),
            company_entry_description: self.description.clone(),
            effective_entry_date: Some(self.effective_date),
            originating_dfi: self.originating_dfi.clone(),
            totals_policy: policy,
            ..Default::default()
        }
    }
}

impl PaymentRow {
    /// Validates the row and builds its entry.
    fn parse(&self, default_effective_date: NaiveDate) -> Result<(BatchKey, Entry)> {
        let sec_code = self.sec_code.trim().to_uppercase();
        let variant = BatchVariant::from_sec_code(&sec_code);
        if variant == BatchVariant::Iat {
            return Err(AchError::UnsupportedSecCode(sec_code));
        }

        let effective_date = match non_empty(&self.effective_date) {
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| AchError::InvalidDate(text.to_string()))?,
            None => default_effective_date,
        };

        let mut options = EntryOptions {
            transaction_code: self.transaction_code.clone(),
            receiving_dfi: self.routing_number.clone(),
            dfi_account: self.account_number.clone(),
            amount: self.amount,
            id_number: non_empty(&self.id_number).map(str::to_string),
            individual_name: Some(self.name.clone()),
            ..Default::default()
        };

        let mut entry = if variant == BatchVariant::Adv {
            options.fields = adv_fields(self, effective_date);
            Entry::adv(options)?
        } else {
            Entry::new(options)?
        };

        if let Some(info) = non_empty(&self.addenda) {
            entry.add_addenda(Addenda::new(AddendaOptions {
                payment_related_information: Some(info.to_string()),
                ..Default::default()
            })?);
        }

        let key = BatchKey {
            company_name: self.company_name.clone(),
            company_id: self.company_id.clone(),
            sec_code,
            description: self.description.clone(),
            originating_dfi: self.originating_dfi.clone(),
            effective_date,
        };
        Ok((key, entry))
    }
}

/// ADV-only entry fields derived from the row.
fn adv_fields(row: &PaymentRow, effective_date: NaiveDate) -> FieldOverrides {
    let mut fields = FieldOverrides::new();
    fields.insert(
        "advice_routing_number".to_string(),
        FieldValue::from(compute_check_digit(row.routing_number.trim())),
    );
    let operator: String = row.originating_dfi.trim().chars().take(8).collect();
    fields.insert("ach_operator_routing_number".to_string(), operator.into());
    fields.insert(
        "julian_date_created".to_string(),
        format!("{:03}", effective_date.ordinal()).into(),
    );
    fields
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Service class code for a batch: `280` for advices, `220` when every
/// entry is a credit, `225` when every entry is a debit, `200` otherwise.
pub fn derive_service_class_code<I, S>(sec_code: &str, codes: I) -> &'static str
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if BatchVariant::from_sec_code(sec_code) == BatchVariant::Adv {
        return "280";
    }
    let mut credits = false;
    let mut debits = false;
    for code in codes {
        match transaction::classify(code.as_ref()) {
            Some(TxClass::Credit) => credits = true,
            Some(TxClass::Debit) => debits = true,
            None => {
                credits = true;
                debits = true;
            }
        }
    }
    match (credits, debits) {
        (true, false) => "220",
        (false, true) => "225",
        _ => "200",
    }
}

/// A row left out of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the CSV, counting the header row
    pub row: usize,
    pub message: String,
}

/// Outcome of an import: the assembled file plus every row that was left out.
#[derive(Debug)]
pub struct ImportReport {
    pub file: AchFile,
    pub skipped: Vec<SkippedRow>,
}

/// Rows read so far for the batch being assembled.
struct PendingBatch {
    key: BatchKey,
    entries: Vec<(usize, Entry)>,
}

/// Reads payments from `reader` and assembles them into a new file.
///
/// The file is not finalized; call [`AchFile::generate_file`] on the result.
pub fn build_file<R: Read>(
    options: FileOptions,
    policy: TotalsPolicy,
    reader: R,
) -> Result<ImportReport> {
    let mut file = AchFile::new(options)?;
    let mut skipped = Vec::new();
    let default_effective_date = compute_business_day(1, Local::now().date_naive());

    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut pending: Option<PendingBatch> = None;

    for (row_idx, result) in csv_reader.deserialize::<PaymentRow>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let parsed = result
            .map_err(AchError::from)
            .and_then(|row| row.parse(default_effective_date));
        let (key, entry) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                skip(&mut skipped, row_num, &e);
                continue;
            }
        };

        match pending.as_mut() {
            Some(batch) if batch.key == key => batch.entries.push((row_num, entry)),
            _ => {
                if let Some(done) = pending.take() {
                    flush(&mut file, done, policy, &mut skipped);
                }
                pending = Some(PendingBatch {
                    key,
                    entries: vec![(row_num, entry)],
                });
            }
        }
    }

    if let Some(done) = pending.take() {
        flush(&mut file, done, policy, &mut skipped);
    }

    debug!(
        "Imported {} batches, skipped {} rows",
        file.batches().len(),
        skipped.len()
    );
    Ok(ImportReport { file, skipped })
}

/// Builds the pending batch and adds it to the file.
///
/// A batch header that fails validation takes all of its rows with it.
fn flush(
    file: &mut AchFile,
    pending: PendingBatch,
    policy: TotalsPolicy,
    skipped: &mut Vec<SkippedRow>,
) {
    let service_class_code = derive_service_class_code(
        &pending.key.sec_code,
        pending.entries.iter().map(|(_, e)| e.transaction_code()),
    );

    let mut batch = match Batch::new(pending.key.options(service_class_code, policy)) {
        Ok(batch) => batch,
        Err(e) => {
            for (row, _) in &pending.entries {
                skip(skipped, *row, &e);
            }
            return;
        }
    };

    for (row, entry) in pending.entries {
        if let Err(e) = batch.add_entry(entry) {
            skip(skipped, row, &e);
        }
    }

    if !batch.is_empty() {
        file.add_batch(batch);
    }
}

fn skip(skipped: &mut Vec<SkippedRow>, row: usize, error: &AchError) {
    warn!("Row {}: {}", row, error);
    skipped.push(SkippedRow {
        row,
        message: error.to_string(),
    });
}
