//! # ACH File
//!
//! Builds NACHA ACH batch payment files: a file of batches of entries, each
//! entry optionally carrying addenda, rendered as 94-column fixed-width
//! records with CRLF line endings and padded to 10-line blocks.
//!
//! ## Design Principles
//!
//! - **Schema tables**: every record kind is an immutable [`layout`] table;
//!   ADV and IAT records are separate layout variants
//! - **Eager validation**: entries, batches and files are validated when
//!   constructed and never handed back half-built
//! - **Two-phase generation**: assemble first, then [`AchFile::finalize`]
//!   assigns trace numbers and rolls up control totals in one pass
//! - **Fixed-point money**: amounts are [`Amount`]s held at 2 decimal places
//!
//! ## Example
//!
//! ```no_run
//! use ach_file::{AchFile, Amount, Batch, BatchOptions, Entry, EntryOptions, FileOptions};
//! use std::str::FromStr;
//!
//! let mut file = AchFile::new(FileOptions {
//!     immediate_destination: "03130142".to_string(),
//!     immediate_origin: "031301422".to_string(),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let mut batch = Batch::new(BatchOptions {
//!     service_class_code: "220".to_string(),
//!     company_name: "ACME CORP".to_string(),
//!     company_identification: "1234567890".to_string(),
//!     standard_entry_class_code: "PPD".to_string(),
//!     company_entry_description: "PAYROLL".to_string(),
//!     effective_entry_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 20),
//!     originating_dfi: "03130142".to_string(),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! batch
//!     .add_entry(
//!         Entry::new(EntryOptions {
//!             transaction_code: "22".to_string(),
//!             receiving_dfi: "03130142".to_string(),
//!             dfi_account: "12345678".to_string(),
//!             amount: Amount::from_str("1000").unwrap(),
//!             individual_name: Some("JANE DOE".to_string()),
//!             ..Default::default()
//!         })
//!         .unwrap(),
//!     )
//!     .unwrap();
//!
//! file.add_batch(batch);
//! print!("{}", file.generate_file().unwrap());
//! ```

pub mod addenda;
pub mod amount;
pub mod batch;
pub mod checksum;
pub mod config;
pub mod dates;
pub mod entry;
pub mod error;
pub mod field;
pub mod file;
pub mod import;
pub mod layout;
pub mod record;
pub mod transaction;
pub mod validate;

pub use addenda::{Addenda, AddendaOptions, ReturnAddendaOptions};
pub use amount::Amount;
pub use batch::{Batch, BatchOptions};
pub use config::Settings;
pub use entry::{Entry, EntryOptions};
pub use error::{AchError, Result};
pub use field::{FieldKind, FieldOverrides, FieldSpec, FieldValue};
pub use file::{AchFile, FileOptions};
pub use import::{build_file, ImportReport, PaymentRow, SkippedRow};
pub use layout::{AddendaVariant, BatchVariant, EntryVariant, FileVariant, IatAddendaType};
pub use record::Record;
pub use transaction::{TotalsPolicy, TotalsWarning};
