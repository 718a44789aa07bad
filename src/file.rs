//! The ACH file: header, batches, control and block padding.
//!
//! Building a file is two-phase. Assemble the hierarchy with
//! [`AchFile::add_batch`], [`Batch::add_entry`] and [`Entry::add_addenda`];
//! none of those steps touch cross-references. Then call
//! [`AchFile::finalize`] (or [`AchFile::generate_file`], which finalizes and
//! renders) to assign trace numbers, back-fill addenda references and roll up
//! the file control totals.
//!
//! [`Entry::add_addenda`]: crate::entry::Entry::add_addenda

use crate::amount::Amount;
use crate::batch::Batch;
use crate::checksum::{block_count, compute_check_digit, EntryHash, BLOCKING_FACTOR};
use crate::dates::{format_date, format_time};
use crate::error::Result;
use crate::field::{truncate, FieldOverrides, FieldValue};
use crate::layout::{EntryVariant, FileVariant, FILE_HEADER, LINE_TERMINATOR, RECORD_WIDTH};
use crate::record::Record;
use crate::validate;
use chrono::{Local, NaiveDate, NaiveTime};
use log::{debug, warn};
use std::collections::HashSet;
use std::io::Write;

/// Filler character for block padding lines.
const PADDING_CHAR: char = '9';

/// High-level values for a new file.
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    /// Receiving point routing number; an 8-digit value gets its check digit.
    pub immediate_destination: String,
    /// Sending point routing number or company identifier. Its first eight
    /// characters prefix every generated trace number.
    pub immediate_origin: String,
    /// Defaults to today.
    pub file_creation_date: Option<NaiveDate>,
    /// Defaults to now.
    pub file_creation_time: Option<NaiveTime>,
    pub file_id_modifier: Option<String>,
    pub immediate_destination_name: Option<String>,
    pub immediate_origin_name: Option<String>,
    pub reference_code: Option<String>,
    /// `ADV` selects the wide-total control layout.
    pub standard_entry_class_code: Option<String>,
    /// Number given to the first batch added.
    pub batch_sequence_number: u64,
    pub header: FieldOverrides,
    pub control: FieldOverrides,
}

/// A complete ACH file.
#[derive(Debug, Clone)]
pub struct AchFile {
    variant: FileVariant,
    header: Record,
    control: Record,
    batches: Vec<Batch>,
    batch_sequence_number: u64,
}

impl AchFile {
    pub fn new(options: FileOptions) -> Result<Self> {
        let variant = options
            .standard_entry_class_code
            .as_deref()
            .map(FileVariant::from_sec_code)
            .unwrap_or_default();

        let mut header = Record::new(&FILE_HEADER)?;
        let mut control = Record::new(variant.control_layout())?;
        header.apply_overrides(&options.header);
        control.apply_overrides(&options.control);

        let destination = options.immediate_destination.trim();
        if !destination.is_empty() {
            header.set("immediate_destination", compute_check_digit(destination));
        }
        let origin = options.immediate_origin.trim();
        if !origin.is_empty() {
            header.set("immediate_origin", origin);
        }

        let now = Local::now();
        match options.file_creation_date {
            Some(date) => {
                header.set("file_creation_date", format_date(date));
            }
            None if header.get("file_creation_date").is_some_and(FieldValue::is_empty) => {
                header.set("file_creation_date", format_date(now.date_naive()));
            }
            None => {}
        }
        match options.file_creation_time {
            Some(time) => {
                header.set("file_creation_time", format_time(time));
            }
            None if header.get("file_creation_time").is_some_and(FieldValue::is_empty) => {
                header.set("file_creation_time", format_time(now.time()));
            }
            None => {}
        }

        if let Some(modifier) = &options.file_id_modifier {
            header.set("file_id_modifier", modifier.trim());
        }
        for (name, value) in [
            ("immediate_destination_name", &options.immediate_destination_name),
            ("immediate_origin_name", &options.immediate_origin_name),
            ("reference_code", &options.reference_code),
        ] {
            if let (Some(value), Some(spec)) = (value, header.spec(name)) {
                header.set(name, truncate(value, spec.width));
            }
        }

        let file = AchFile {
            variant,
            header,
            control,
            batches: Vec::new(),
            batch_sequence_number: options.batch_sequence_number,
        };
        validate::validate_record(&file.header)?;
        validate::validate_record(&file.control)?;
        Ok(file)
    }

    /// Appends a batch, numbering its header and control records.
    pub fn add_batch(&mut self, mut batch: Batch) {
        batch.set_batch_number(self.batch_sequence_number);
        self.batch_sequence_number += 1;
        self.batches.push(batch);
    }

    pub fn variant(&self) -> FileVariant {
        self.variant
    }

    pub fn header(&self) -> &Record {
        &self.header
    }

    pub fn control(&self) -> &Record {
        &self.control
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
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

    /// First eight characters of the immediate origin.
    fn trace_prefix(&self) -> String {
        truncate(&self.header.text("immediate_origin"), 8)
    }

    /// Walks every batch and entry once, in insertion order.
    ///
    /// Entries without a trace number get `prefix + counter`, where the
    /// counter is the number of entries walked before this one across the
    /// whole file. Addenda back-references are refreshed from the owning
    /// entry, ADV entries get their sequence within the batch, and the file
    /// control is recomputed from scratch. Returns the physical line count
    /// before block padding.
    ///
    /// Running it again on an unchanged hierarchy changes nothing.
    ///
    /// Preset trace numbers are never rewritten, so a preset value that
    /// happens to equal a generated one leaves the file with a duplicate.
    /// That case is logged at warn level.
    pub fn finalize(&mut self) -> Result<usize> {
        let prefix = self.trace_prefix();
        let preset: HashSet<String> = self
            .batches
            .iter()
            .flat_map(|b| b.entries())
            .filter_map(|e| e.trace_number())
            .collect();

        let mut rows = 2;
        let mut walked = 0usize;
        let mut batch_count = 0u64;
        let mut addenda_count = 0usize;
        let mut entry_hash = EntryHash::new();
        let mut total_debit = Amount::ZERO;
        let mut total_credit = Amount::ZERO;

        for batch in &mut self.batches {
            total_debit += batch.total_debit();
            total_credit += batch.total_credit();

            for (index, entry) in batch.entries_mut().iter_mut().enumerate() {
                let generated = format!("{}{:07}", prefix, walked);
                if entry.variant().carries_trace_number() && entry.trace_number().is_none() {
                    if preset.contains(&generated) {
                        warn!("Generated trace number {} duplicates a preset one", generated);
                    }
                    debug!("Assigning trace number {}", generated);
                    entry.assign_trace_number(generated.clone());
                }
                entry.link_addendas(&generated);
                if entry.variant() == EntryVariant::Adv {
                    entry.assign_batch_sequence(index + 1);
                }

                entry_hash.add(entry.receiving_dfi()?);
                addenda_count += entry.record_count();
                rows += entry.record_count();
                walked += 1;
            }

            if !batch.is_empty() {
                batch_count += 1;
                rows += 2;
            }
        }

        let blocks = block_count(rows);
        self.control.set("batch_count", batch_count);
        self.control.set("block_count", blocks);
        self.control.set("addenda_count", addenda_count);
        self.control.set("entry_hash", entry_hash.value());
        self.control.set("total_debit", total_debit);
        self.control.set("total_credit", total_credit);

        debug!(
            "Finalized file: {} batches, {} entries, {} rows, {} blocks",
            batch_count, walked, rows, blocks
        );
        Ok(rows)
    }

    /// Every physical line in output order, block padding included.
    ///
    /// Renders the hierarchy as it stands; call [`AchFile::finalize`] first
    /// so sequence numbers and totals are current.
    pub fn render_lines(&self) -> Result<Vec<String>> {
        let mut lines = vec![self.header.render()?];
        for batch in self.batches.iter().filter(|b| !b.is_empty()) {
            lines.extend(batch.render_lines()?);
        }
        lines.push(self.control.render()?);

        let filler: String = std::iter::repeat(PADDING_CHAR).take(RECORD_WIDTH).collect();
        while lines.len() % BLOCKING_FACTOR != 0 {
            lines.push(filler.clone());
        }
        Ok(lines)
    }

    /// The file as text, lines separated by CRLF.
    pub fn render(&self) -> Result<String> {
        Ok(self.render_lines()?.join(LINE_TERMINATOR))
    }

    /// Finalizes, then renders.
    pub fn generate_file(&mut self) -> Result<String> {
        self.finalize()?;
        self.render()
    }

    /// Finalizes and writes the rendered file to `writer`.
    pub fn write_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        let text = self.generate_file()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
