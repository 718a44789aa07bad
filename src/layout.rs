//! Static record layouts.
//!
//! One immutable table per record variant. Records are value-copied out of
//! these tables; nothing here is ever mutated, and a variant (standard, ADV,
//! IAT) is a different table rather than a patched one.

use crate::error::{AchError, Result};
use crate::field::FieldSpec;

/// Every NACHA record is exactly this many characters wide.
pub const RECORD_WIDTH: usize = 94;

/// Lines are CRLF-terminated.
pub const LINE_TERMINATOR: &str = "\r\n";

/// An ordered-by-position set of field specs describing one kind of line.
#[derive(Debug)]
pub struct RecordLayout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    /// Returns field indices sorted by position.
    ///
    /// Fails unless positions are exactly `1..=N` and widths add up to
    /// [`RECORD_WIDTH`]; a sparse or duplicated position set is a schema
    /// error, not something to render around.
    pub fn position_order(&self) -> Result<Vec<usize>> {
        let mut order: Vec<usize> = (0..self.fields.len()).collect();
        order.sort_by_key(|&i| self.fields[i].position);

        for (expected, &idx) in (1..).zip(order.iter()) {
            let spec = &self.fields[idx];
            if spec.position != expected {
                return Err(AchError::InvalidLayout {
                    record: self.name,
                    message: format!(
                        "field `{}` sits at position {}, expected {}",
                        spec.name, spec.position, expected
                    ),
                });
            }
            if spec.width == 0 {
                return Err(AchError::InvalidLayout {
                    record: self.name,
                    message: format!("field `{}` has zero width", spec.name),
                });
            }
        }

        let width = self.width();
        if width != RECORD_WIDTH {
            return Err(AchError::InvalidLayout {
                record: self.name,
                message: format!("fields total {} columns, expected {}", width, RECORD_WIDTH),
            });
        }

        Ok(order)
    }

    /// Sum of all field widths.
    pub fn width(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    pub fn spec(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// File control layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileVariant {
    #[default]
    Standard,
    /// Automated accounting advices: 20-column totals.
    Adv,
}

impl FileVariant {
    pub fn from_sec_code(code: &str) -> Self {
        match code.trim() {
            "ADV" => FileVariant::Adv,
            _ => FileVariant::Standard,
        }
    }

    pub fn control_layout(self) -> &'static RecordLayout {
        match self {
            FileVariant::Standard => &FILE_CONTROL,
            FileVariant::Adv => &FILE_CONTROL_ADV,
        }
    }
}

/// Batch header/control layout selector, chosen by standard entry class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchVariant {
    #[default]
    Standard,
    Adv,
    Iat,
}

impl BatchVariant {
    pub fn from_sec_code(code: &str) -> Self {
        match code.trim() {
            "ADV" => BatchVariant::Adv,
            "IAT" => BatchVariant::Iat,
            _ => BatchVariant::Standard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BatchVariant::Standard => "standard",
            BatchVariant::Adv => "ADV",
            BatchVariant::Iat => "IAT",
        }
    }

    pub fn header_layout(self) -> &'static RecordLayout {
        match self {
            BatchVariant::Standard | BatchVariant::Adv => &BATCH_HEADER,
            BatchVariant::Iat => &BATCH_HEADER_IAT,
        }
    }

    pub fn control_layout(self) -> &'static RecordLayout {
        match self {
            BatchVariant::Standard | BatchVariant::Iat => &BATCH_CONTROL,
            BatchVariant::Adv => &BATCH_CONTROL_ADV,
        }
    }

    /// The entry layout a batch of this variant accepts.
    pub fn entry_variant(self) -> EntryVariant {
        match self {
            BatchVariant::Standard => EntryVariant::Standard,
            BatchVariant::Adv => EntryVariant::Adv,
            BatchVariant::Iat => EntryVariant::Iat,
        }
    }
}

/// Entry detail layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryVariant {
    #[default]
    Standard,
    Adv,
    Iat,
}

impl EntryVariant {
    pub fn name(self) -> &'static str {
        match self {
            EntryVariant::Standard => "standard",
            EntryVariant::Adv => "ADV",
            EntryVariant::Iat => "IAT",
        }
    }

    pub fn layout(self) -> &'static RecordLayout {
        match self {
            EntryVariant::Standard => &ENTRY_DETAIL,
            EntryVariant::Adv => &ENTRY_DETAIL_ADV,
            EntryVariant::Iat => &ENTRY_DETAIL_IAT,
        }
    }

    /// ADV entries are identified by their sequence number within the batch
    /// and never receive a trace number.
    pub fn carries_trace_number(self) -> bool {
        !matches!(self, EntryVariant::Adv)
    }
}

/// The nine addenda records an IAT entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IatAddendaType {
    /// 10: transaction type, foreign payment amount, receiver name
    Payment,
    /// 11: originator name and street address
    OriginatorAddress,
    /// 12: originator city, state, country, postal code
    OriginatorLocation,
    /// 13: originating DFI
    OriginatingDfi,
    /// 14: receiving DFI
    ReceivingDfi,
    /// 15: receiver identification and street address
    ReceiverAddress,
    /// 16: receiver city, state, country, postal code
    ReceiverLocation,
    /// 17: free-form remittance information (up to two)
    Remittance,
    /// 18: foreign correspondent bank (up to five)
    ForeignCorrespondentBank,
}

impl IatAddendaType {
    /// Types 10 through 16, which every IAT entry must carry.
    pub const MANDATORY: [IatAddendaType; 7] = [
        IatAddendaType::Payment,
        IatAddendaType::OriginatorAddress,
        IatAddendaType::OriginatorLocation,
        IatAddendaType::OriginatingDfi,
        IatAddendaType::ReceivingDfi,
        IatAddendaType::ReceiverAddress,
        IatAddendaType::ReceiverLocation,
    ];

    pub fn type_code(self) -> &'static str {
        match self {
            IatAddendaType::Payment => "10",
            IatAddendaType::OriginatorAddress => "11",
            IatAddendaType::OriginatorLocation => "12",
            IatAddendaType::OriginatingDfi => "13",
            IatAddendaType::ReceivingDfi => "14",
            IatAddendaType::ReceiverAddress => "15",
            IatAddendaType::ReceiverLocation => "16",
            IatAddendaType::Remittance => "17",
            IatAddendaType::ForeignCorrespondentBank => "18",
        }
    }

    pub fn layout(self) -> &'static RecordLayout {
        match self {
            IatAddendaType::Payment => &IAT_ADDENDA_10,
            IatAddendaType::OriginatorAddress => &IAT_ADDENDA_11,
            IatAddendaType::OriginatorLocation => &IAT_ADDENDA_12,
            IatAddendaType::OriginatingDfi => &IAT_ADDENDA_13,
            IatAddendaType::ReceivingDfi => &IAT_ADDENDA_14,
            IatAddendaType::ReceiverAddress => &IAT_ADDENDA_15,
            IatAddendaType::ReceiverLocation => &IAT_ADDENDA_16,
            IatAddendaType::Remittance => &IAT_ADDENDA_17,
            IatAddendaType::ForeignCorrespondentBank => &IAT_ADDENDA_18,
        }
    }
}

/// Addenda layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddendaVariant {
    /// 05: payment related information
    Standard,
    /// 99: return reason
    Return,
    Iat(IatAddendaType),
}

impl AddendaVariant {
    pub fn layout(self) -> &'static RecordLayout {
        match self {
            AddendaVariant::Standard => &ADDENDA_STANDARD,
            AddendaVariant::Return => &ADDENDA_RETURN,
            AddendaVariant::Iat(kind) => kind.layout(),
        }
    }
}

/// Every layout in this module, for startup checks and tests.
pub fn all_layouts() -> [&'static RecordLayout; 21] {
    [
        &FILE_HEADER,
        &FILE_CONTROL,
        &FILE_CONTROL_ADV,
        &BATCH_HEADER,
        &BATCH_HEADER_IAT,
        &BATCH_CONTROL,
        &BATCH_CONTROL_ADV,
        &ENTRY_DETAIL,
        &ENTRY_DETAIL_ADV,
        &ENTRY_DETAIL_IAT,
        &ADDENDA_STANDARD,
        &ADDENDA_RETURN,
        &IAT_ADDENDA_10,
        &IAT_ADDENDA_11,
        &IAT_ADDENDA_12,
        &IAT_ADDENDA_13,
        &IAT_ADDENDA_14,
        &IAT_ADDENDA_15,
        &IAT_ADDENDA_16,
        &IAT_ADDENDA_17,
        &IAT_ADDENDA_18,
    ]
}

// ---- file ----

pub static FILE_HEADER: RecordLayout = RecordLayout {
    name: "file header",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("1"),
        FieldSpec::numeric("priority_code", 2, 2).required().preset("01"),
        FieldSpec::routing("immediate_destination", 10, 3).required().padded(' '),
        FieldSpec::routing("immediate_origin", 10, 4).required().padded(' '),
        FieldSpec::numeric("file_creation_date", 6, 5).required(),
        FieldSpec::numeric("file_creation_time", 4, 6),
        FieldSpec::alpha("file_id_modifier", 1, 7).required().preset("A"),
        FieldSpec::numeric("record_size", 3, 8).required().preset("094"),
        FieldSpec::numeric("blocking_factor", 2, 9).required().preset("10"),
        FieldSpec::numeric("format_code", 1, 10).required().preset("1"),
        FieldSpec::alpha("immediate_destination_name", 23, 11),
        FieldSpec::alpha("immediate_origin_name", 23, 12),
        FieldSpec::alpha("reference_code", 8, 13),
    ],
};

pub static FILE_CONTROL: RecordLayout = RecordLayout {
    name: "file control",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("9"),
        FieldSpec::numeric("batch_count", 6, 2).required().preset("0"),
        FieldSpec::numeric("block_count", 6, 3).required().preset("0"),
        FieldSpec::numeric("addenda_count", 8, 4).required().preset("0"),
        FieldSpec::numeric("entry_hash", 10, 5).required().preset("0"),
        FieldSpec::amount("total_debit", 12, 6).required(),
        FieldSpec::amount("total_credit", 12, 7).required(),
        FieldSpec::alpha("reserved", 39, 8).blank(),
    ],
};

pub static FILE_CONTROL_ADV: RecordLayout = RecordLayout {
    name: "file control (ADV)",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("9"),
        FieldSpec::numeric("batch_count", 6, 2).required().preset("0"),
        FieldSpec::numeric("block_count", 6, 3).required().preset("0"),
        FieldSpec::numeric("addenda_count", 8, 4).required().preset("0"),
        FieldSpec::numeric("entry_hash", 10, 5).required().preset("0"),
        FieldSpec::amount("total_debit", 20, 6).required(),
        FieldSpec::amount("total_credit", 20, 7).required(),
        FieldSpec::alpha("reserved", 23, 8).blank(),
    ],
};

// ---- batch ----

pub static BATCH_HEADER: RecordLayout = RecordLayout {
    name: "batch header",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("5"),
        FieldSpec::numeric("service_class_code", 3, 2).required(),
        FieldSpec::alpha("company_name", 16, 3).required(),
        FieldSpec::alpha("company_discretionary_data", 20, 4),
        FieldSpec::alpha("company_identification", 10, 5).required(),
        FieldSpec::alpha("standard_entry_class_code", 3, 6).required(),
        FieldSpec::alpha("company_entry_description", 10, 7).required(),
        FieldSpec::alpha("company_descriptive_date", 6, 8),
        FieldSpec::numeric("effective_entry_date", 6, 9).required(),
        FieldSpec::alpha("settlement_date", 3, 10).blank(),
        FieldSpec::numeric("originator_status_code", 1, 11).required().preset("1"),
        FieldSpec::numeric("originating_dfi", 8, 12).required(),
        FieldSpec::numeric("batch_number", 7, 13).preset("0"),
    ],
};

pub static BATCH_HEADER_IAT: RecordLayout = RecordLayout {
    name: "batch header (IAT)",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("5"),
        FieldSpec::numeric("service_class_code", 3, 2).required(),
        FieldSpec::alpha("iat_indicator", 16, 3).blank(),
        FieldSpec::alpha("foreign_exchange_indicator", 2, 4).required(),
        FieldSpec::numeric("foreign_exchange_reference_indicator", 1, 5).required(),
        FieldSpec::alpha("foreign_exchange_reference", 15, 6),
        FieldSpec::alpha("iso_destination_country_code", 2, 7).required(),
        FieldSpec::alpha("originator_identification", 10, 8).required(),
        FieldSpec::alpha("standard_entry_class_code", 3, 9).required().preset("IAT"),
        FieldSpec::alpha("company_entry_description", 10, 10).required(),
        FieldSpec::alpha("iso_originating_currency_code", 3, 11).required().preset("USD"),
        FieldSpec::alpha("iso_destination_currency_code", 3, 12).required(),
        FieldSpec::numeric("effective_entry_date", 6, 13).required(),
        FieldSpec::alpha("settlement_date", 3, 14).blank(),
        FieldSpec::numeric("originator_status_code", 1, 15).required().preset("1"),
        FieldSpec::numeric("originating_dfi", 8, 16).required(),
        FieldSpec::numeric("batch_number", 7, 17).preset("0"),
    ],
};

pub static BATCH_CONTROL: RecordLayout = RecordLayout {
    name: "batch control",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("8"),
        FieldSpec::numeric("service_class_code", 3, 2).required(),
        // Counts entry + addenda records, not just addenda.
        FieldSpec::numeric("addenda_count", 6, 3).required().preset("0"),
        FieldSpec::numeric("entry_hash", 10, 4).required().preset("0"),
        FieldSpec::amount("total_debit", 12, 5).required(),
        FieldSpec::amount("total_credit", 12, 6).required(),
        FieldSpec::alpha("company_identification", 10, 7),
        FieldSpec::alpha("message_authentication_code", 19, 8),
        FieldSpec::alpha("reserved", 6, 9).blank(),
        FieldSpec::numeric("originating_dfi", 8, 10).required(),
        FieldSpec::numeric("batch_number", 7, 11).preset("0"),
    ],
};

pub static BATCH_CONTROL_ADV: RecordLayout = RecordLayout {
    name: "batch control (ADV)",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("8"),
        FieldSpec::numeric("service_class_code", 3, 2).required(),
        FieldSpec::numeric("addenda_count", 6, 3).required().preset("0"),
        FieldSpec::numeric("entry_hash", 10, 4).required().preset("0"),
        FieldSpec::amount("total_debit", 20, 5).required(),
        FieldSpec::amount("total_credit", 20, 6).required(),
        FieldSpec::alpha("ach_operator_data", 19, 7).blank(),
        FieldSpec::numeric("originating_dfi", 8, 8).required(),
        FieldSpec::numeric("batch_number", 7, 9).preset("0"),
    ],
};

// ---- entry detail ----

pub static ENTRY_DETAIL: RecordLayout = RecordLayout {
    name: "entry detail",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("6"),
        FieldSpec::numeric("transaction_code", 2, 2).required(),
        FieldSpec::numeric("receiving_dfi", 8, 3).required(),
        FieldSpec::numeric("check_digit", 1, 4).required(),
        FieldSpec::alpha("dfi_account", 17, 5).required(),
        FieldSpec::amount("amount", 10, 6).required(),
        FieldSpec::alpha("id_number", 15, 7),
        FieldSpec::alpha("individual_name", 22, 8).required(),
        FieldSpec::alpha("discretionary_data", 2, 9),
        FieldSpec::numeric("addenda_id", 1, 10).required().preset("0"),
        FieldSpec::numeric("trace_number", 15, 11),
    ],
};

pub static ENTRY_DETAIL_ADV: RecordLayout = RecordLayout {
    name: "entry detail (ADV)",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("6"),
        FieldSpec::numeric("transaction_code", 2, 2).required(),
        FieldSpec::numeric("receiving_dfi", 8, 3).required(),
        FieldSpec::numeric("check_digit", 1, 4).required(),
        FieldSpec::alpha("dfi_account", 15, 5).required(),
        FieldSpec::amount("amount", 12, 6).required(),
        FieldSpec::numeric("advice_routing_number", 9, 7).required(),
        FieldSpec::alpha("file_identification", 5, 8),
        FieldSpec::alpha("ach_operator_data", 1, 9),
        FieldSpec::alpha("individual_name", 22, 10).required(),
        FieldSpec::alpha("discretionary_data", 2, 11),
        FieldSpec::numeric("addenda_id", 1, 12).required().preset("0"),
        FieldSpec::numeric("ach_operator_routing_number", 8, 13).required(),
        FieldSpec::numeric("julian_date_created", 3, 14).required(),
        FieldSpec::numeric("sequence_number_within_batch", 4, 15),
    ],
};

pub static ENTRY_DETAIL_IAT: RecordLayout = RecordLayout {
    name: "entry detail (IAT)",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("6"),
        FieldSpec::numeric("transaction_code", 2, 2).required(),
        FieldSpec::numeric("receiving_dfi", 8, 3).required(),
        FieldSpec::numeric("check_digit", 1, 4).required(),
        FieldSpec::numeric("number_of_addenda", 4, 5).required().preset("0"),
        FieldSpec::alpha("reserved", 13, 6).blank(),
        FieldSpec::amount("amount", 10, 7).required(),
        FieldSpec::alpha("dfi_account", 35, 8).required(),
        FieldSpec::alpha("reserved_2", 2, 9).blank(),
        FieldSpec::alpha("gateway_ofac_indicator", 1, 10),
        FieldSpec::alpha("secondary_ofac_indicator", 1, 11),
        FieldSpec::numeric("addenda_id", 1, 12).required().preset("1"),
        FieldSpec::numeric("trace_number", 15, 13),
    ],
};

// ---- addenda ----

pub static ADDENDA_STANDARD: RecordLayout = RecordLayout {
    name: "addenda",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("05"),
        FieldSpec::alpha("payment_related_information", 80, 3),
        FieldSpec::numeric("addenda_sequence_number", 4, 4).preset("1"),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 5),
    ],
};

pub static ADDENDA_RETURN: RecordLayout = RecordLayout {
    name: "return addenda",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("99"),
        FieldSpec::alpha("return_reason_code", 3, 3).required(),
        FieldSpec::numeric("original_entry_trace_number", 15, 4).required(),
        FieldSpec::alpha("date_of_death", 6, 5),
        FieldSpec::numeric("original_receiving_dfi", 8, 6).required(),
        FieldSpec::alpha("addenda_information", 44, 7),
        FieldSpec::numeric("trace_number", 15, 8),
    ],
};

pub static IAT_ADDENDA_10: RecordLayout = RecordLayout {
    name: "IAT addenda 10",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("10"),
        FieldSpec::alpha("transaction_type_code", 3, 3).required(),
        FieldSpec::amount("foreign_payment_amount", 18, 4).required(),
        FieldSpec::alpha("foreign_trace_number", 22, 5),
        FieldSpec::alpha("receiving_company_name", 35, 6).required(),
        FieldSpec::alpha("reserved", 6, 7).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 8),
    ],
};

pub static IAT_ADDENDA_11: RecordLayout = RecordLayout {
    name: "IAT addenda 11",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("11"),
        FieldSpec::alpha("originator_name", 35, 3).required(),
        FieldSpec::alpha("originator_street_address", 35, 4).required(),
        FieldSpec::alpha("reserved", 14, 5).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 6),
    ],
};

pub static IAT_ADDENDA_12: RecordLayout = RecordLayout {
    name: "IAT addenda 12",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("12"),
        FieldSpec::alpha("originator_city_state_province", 35, 3).required(),
        FieldSpec::alpha("originator_country_postal_code", 35, 4).required(),
        FieldSpec::alpha("reserved", 14, 5).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 6),
    ],
};

pub static IAT_ADDENDA_13: RecordLayout = RecordLayout {
    name: "IAT addenda 13",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("13"),
        FieldSpec::alpha("originating_dfi_name", 35, 3).required(),
        FieldSpec::alpha("originating_dfi_id_qualifier", 2, 4).required(),
        FieldSpec::alpha("originating_dfi_identification", 34, 5).required(),
        FieldSpec::alpha("originating_dfi_branch_country_code", 3, 6).required(),
        FieldSpec::alpha("reserved", 10, 7).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 8),
    ],
};

pub static IAT_ADDENDA_14: RecordLayout = RecordLayout {
    name: "IAT addenda 14",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("14"),
        FieldSpec::alpha("receiving_dfi_name", 35, 3).required(),
        FieldSpec::alpha("receiving_dfi_id_qualifier", 2, 4).required(),
        FieldSpec::alpha("receiving_dfi_identification", 34, 5).required(),
        FieldSpec::alpha("receiving_dfi_branch_country_code", 3, 6).required(),
        FieldSpec::alpha("reserved", 10, 7).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 8),
    ],
};

pub static IAT_ADDENDA_15: RecordLayout = RecordLayout {
    name: "IAT addenda 15",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("15"),
        FieldSpec::alpha("receiver_identification_number", 15, 3),
        FieldSpec::alpha("receiver_street_address", 35, 4).required(),
        FieldSpec::alpha("reserved", 34, 5).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 6),
    ],
};

pub static IAT_ADDENDA_16: RecordLayout = RecordLayout {
    name: "IAT addenda 16",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("16"),
        FieldSpec::alpha("receiver_city_state_province", 35, 3).required(),
        FieldSpec::alpha("receiver_country_postal_code", 35, 4).required(),
        FieldSpec::alpha("reserved", 14, 5).blank(),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 6),
    ],
};

pub static IAT_ADDENDA_17: RecordLayout = RecordLayout {
    name: "IAT addenda 17",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("17"),
        FieldSpec::alpha("payment_related_information", 80, 3),
        FieldSpec::numeric("addenda_sequence_number", 4, 4).preset("1"),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 5),
    ],
};

pub static IAT_ADDENDA_18: RecordLayout = RecordLayout {
    name: "IAT addenda 18",
    fields: &[
        FieldSpec::numeric("record_type_code", 1, 1).required().preset("7"),
        FieldSpec::numeric("addenda_type_code", 2, 2).required().preset("18"),
        FieldSpec::alpha("foreign_correspondent_bank_name", 35, 3).required(),
        FieldSpec::alpha("foreign_correspondent_bank_id_qualifier", 2, 4).required(),
        FieldSpec::alpha("foreign_correspondent_bank_identification", 34, 5).required(),
        FieldSpec::alpha("foreign_correspondent_bank_branch_country_code", 3, 6).required(),
        FieldSpec::alpha("reserved", 6, 7).blank(),
        FieldSpec::numeric("addenda_sequence_number", 4, 8).preset("1"),
        FieldSpec::numeric("entry_detail_sequence_number", 7, 9),
    ],
};
