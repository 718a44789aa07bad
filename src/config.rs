//! File-level settings read from `ACH_*` environment variables.

use crate::error::{AchError, Result};
use crate::file::FileOptions;
use crate::transaction::TotalsPolicy;
use chrono::{NaiveDate, NaiveTime};
use std::env;

pub const IMMEDIATE_DESTINATION: &str = "ACH_IMMEDIATE_DESTINATION";
pub const IMMEDIATE_ORIGIN: &str = "ACH_IMMEDIATE_ORIGIN";
pub const IMMEDIATE_DESTINATION_NAME: &str = "ACH_IMMEDIATE_DESTINATION_NAME";
pub const IMMEDIATE_ORIGIN_NAME: &str = "ACH_IMMEDIATE_ORIGIN_NAME";
pub const REFERENCE_CODE: &str = "ACH_REFERENCE_CODE";
pub const FILE_ID_MODIFIER: &str = "ACH_FILE_ID_MODIFIER";
pub const FILE_CREATION_DATE: &str = "ACH_FILE_CREATION_DATE";
pub const FILE_CREATION_TIME: &str = "ACH_FILE_CREATION_TIME";
pub const BATCH_SEQUENCE_START: &str = "ACH_BATCH_SEQUENCE_START";
pub const STRICT_TOTALS: &str = "ACH_STRICT_TOTALS";

/// Settings for one CLI run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub immediate_destination: String,
    pub immediate_origin: String,
    pub immediate_destination_name: Option<String>,
    pub immediate_origin_name: Option<String>,
    pub reference_code: Option<String>,
    pub file_id_modifier: Option<String>,
    /// `YYYY-MM-DD`
    pub file_creation_date: Option<NaiveDate>,
    /// `HH:MM`
    pub file_creation_time: Option<NaiveTime>,
    pub batch_sequence_start: u64,
    pub totals_policy: TotalsPolicy,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value or
    /// `None` when it is unset. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(AchError::MissingSetting(name));

        let file_creation_date = get(FILE_CREATION_DATE)
            .map(|v| {
                NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|_| AchError::InvalidSetting {
                    name: FILE_CREATION_DATE,
                    value: v,
                })
            })
            .transpose()?;

        let file_creation_time = get(FILE_CREATION_TIME)
            .map(|v| {
                NaiveTime::parse_from_str(&v, "%H:%M").map_err(|_| AchError::InvalidSetting {
                    name: FILE_CREATION_TIME,
                    value: v,
                })
            })
            .transpose()?;

        let batch_sequence_start = match get(BATCH_SEQUENCE_START) {
            Some(v) => v.parse().map_err(|_| AchError::InvalidSetting {
                name: BATCH_SEQUENCE_START,
                value: v,
            })?,
            None => 0,
        };

        let totals_policy = match get(STRICT_TOTALS) {
            None => TotalsPolicy::default(),
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => TotalsPolicy::Strict,
                "0" | "false" | "no" => TotalsPolicy::Permissive,
                _ => {
                    return Err(AchError::InvalidSetting {
                        name: STRICT_TOTALS,
                        value: v,
                    })
                }
            },
        };

        Ok(Settings {
            immediate_destination: required(IMMEDIATE_DESTINATION)?,
            immediate_origin: required(IMMEDIATE_ORIGIN)?,
            immediate_destination_name: get(IMMEDIATE_DESTINATION_NAME),
            immediate_origin_name: get(IMMEDIATE_ORIGIN_NAME),
            reference_code: get(REFERENCE_CODE),
            file_id_modifier: get(FILE_ID_MODIFIER),
            file_creation_date,
            file_creation_time,
            batch_sequence_start,
            totals_policy,
        })
    }

    pub fn file_options(&self) -> FileOptions {
        FileOptions {
            immediate_destination: self.immediate_destination.clone(),
            immediate_origin: self.immediate_origin.clone(),
            file_creation_date: self.file_creation_date,
            file_creation_time: self.file_creation_time,
            file_id_modifier: self.file_id_modifier.clone(),
            immediate_destination_name: self.immediate_destination_name.clone(),
            immediate_origin_name: self.immediate_origin_name.clone(),
            reference_code: self.reference_code.clone(),
            batch_sequence_number: self.batch_sequence_start,
            ..Default::default()
        }
    }
}
