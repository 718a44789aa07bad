//! Transaction and service class codes.
//!
//! Every entry's amount is bucketed into its batch's debit or credit total
//! by transaction code. What happens to a code in neither bucket is decided
//! by [`TotalsPolicy`].

/// Codes whose amounts count toward credit totals.
pub const CREDIT_CODES: &[&str] = &[
    "21", "22", "23", "24", "31", "32", "33", "34", "41", "42", "43", "44", "51", "52", "53",
    "54", "81", "83", "85", "87",
];

/// Codes whose amounts count toward debit totals.
pub const DEBIT_CODES: &[&str] = &[
    "26", "27", "28", "29", "36", "37", "38", "39", "46", "47", "48", "49", "55", "56", "82",
    "84", "86", "88",
];

/// 200 mixed, 220 credits only, 225 debits only, 280 automated accounting advices.
pub const SERVICE_CLASS_CODES: &[&str] = &["200", "220", "225", "280"];

/// Which control total an entry's amount lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxClass {
    Credit,
    Debit,
}

/// Buckets a transaction code, or `None` if it is in neither set.
pub fn classify(code: &str) -> Option<TxClass> {
    if CREDIT_CODES.contains(&code) {
        Some(TxClass::Credit)
    } else if DEBIT_CODES.contains(&code) {
        Some(TxClass::Debit)
    } else {
        None
    }
}

pub fn is_recognized(code: &str) -> bool {
    classify(code).is_some()
}

/// How a batch treats an entry whose code is in neither bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalsPolicy {
    /// Leave the amount out of both totals and record a [`TotalsWarning`].
    #[default]
    Permissive,
    /// Refuse the entry with `InvalidTransactionCode`.
    Strict,
}

/// An entry whose amount was left out of its batch's totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsWarning {
    /// Index of the entry within its batch
    pub entry_index: usize,
    pub transaction_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("22"), Some(TxClass::Credit));
        assert_eq!(classify("27"), Some(TxClass::Debit));
        assert_eq!(classify("81"), Some(TxClass::Credit));
        assert_eq!(classify("82"), Some(TxClass::Debit));
        assert_eq!(classify("99"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_buckets_are_disjoint() {
        for code in CREDIT_CODES {
            assert!(!DEBIT_CODES.contains(code), "{} is in both sets", code);
        }
    }

    #[test]
    fn test_default_policy_is_permissive() {
        assert_eq!(TotalsPolicy::default(), TotalsPolicy::Permissive);
    }
}
