//! Typed, fixed-width field slots.
//!
//! A [`FieldSpec`] is immutable schema data: name, width, 1-based position and
//! a [`FieldKind`] that decides how the value is justified, padded and
//! validated. The live value of a field is a [`FieldValue`].

use crate::amount::Amount;
use std::collections::BTreeMap;
use std::fmt;

/// Raw per-field overrides keyed by field name. Unknown names are ignored.
pub type FieldOverrides = BTreeMap<String, FieldValue>;

/// How a field is rendered and which characters it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Printable ASCII, left-justified and space-padded.
    Alphanumeric,
    /// Digits, right-justified and padded with the field's padding char.
    Numeric,
    /// Dollar amount rendered as whole cents, right-justified.
    Amount,
    /// Routing/identification number, right-justified.
    Routing,
}

impl FieldKind {
    /// Human description used in `InvalidDataType` errors.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Alphanumeric => "printable ASCII",
            FieldKind::Numeric => "numeric",
            FieldKind::Amount => "a non-negative amount",
            FieldKind::Routing => "a numeric routing number",
        }
    }

    /// Whether the rendered value is left-justified.
    pub fn is_left_justified(&self) -> bool {
        matches!(self, FieldKind::Alphanumeric)
    }

    /// Checks a rendered value against this kind's character class.
    pub fn accepts(&self, rendered: &str) -> bool {
        match self {
            FieldKind::Alphanumeric => rendered.chars().all(|c| (' '..='~').contains(&c)),
            FieldKind::Numeric | FieldKind::Amount | FieldKind::Routing => {
                !rendered.is_empty() && rendered.chars().all(|c| c.is_ascii_digit())
            }
        }
    }
}

/// Static description of one field inside a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
    /// 1-based, unique within its record.
    pub position: usize,
    pub kind: FieldKind,
    pub required: bool,
    /// Always rendered left-justified with spaces and exempt from type checks.
    pub blank: bool,
    pub padding: char,
    /// Value copied into every freshly constructed record.
    pub preset: &'static str,
}

impl FieldSpec {
    const fn new(name: &'static str, width: usize, position: usize, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            width,
            position,
            kind,
            required: false,
            blank: false,
            padding: '0',
            preset: "",
        }
    }

    pub const fn alpha(name: &'static str, width: usize, position: usize) -> Self {
        Self::new(name, width, position, FieldKind::Alphanumeric)
    }

    pub const fn numeric(name: &'static str, width: usize, position: usize) -> Self {
        Self::new(name, width, position, FieldKind::Numeric)
    }

    pub const fn amount(name: &'static str, width: usize, position: usize) -> Self {
        Self::new(name, width, position, FieldKind::Amount)
    }

    pub const fn routing(name: &'static str, width: usize, position: usize) -> Self {
        Self::new(name, width, position, FieldKind::Routing)
    }

    pub const fn required(self) -> Self {
        FieldSpec {
            required: true,
            ..self
        }
    }

    pub const fn blank(self) -> Self {
        FieldSpec {
            blank: true,
            ..self
        }
    }

    pub const fn padded(self, padding: char) -> Self {
        FieldSpec { padding, ..self }
    }

    pub const fn preset(self, preset: &'static str) -> Self {
        FieldSpec { preset, ..self }
    }

    /// The value a new record starts with.
    pub fn initial_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Amount => FieldValue::Money(Amount::ZERO),
            _ => FieldValue::Text(self.preset.to_string()),
        }
    }
}

/// The current value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    Money(Amount),
}

impl FieldValue {
    /// Only empty text counts as "no value"; zero numbers are values.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    /// The unpadded string this value contributes to a line.
    pub fn rendered(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Money(a) => a.to_cents(),
        }
    }

    /// The unpadded string this value contributes to a field of `kind`.
    ///
    /// Amount fields always carry whole cents, and a bare number or digit
    /// text set on one counts as dollars, the same reading
    /// [`FieldValue::as_amount`] gives it.
    pub fn rendered_as(&self, kind: FieldKind) -> String {
        match (kind, self) {
            (FieldKind::Amount, FieldValue::Number(n)) => format!("{}00", n),
            (FieldKind::Amount, FieldValue::Text(s)) => s
                .parse::<Amount>()
                .map(|a| a.to_cents())
                .unwrap_or_else(|_| s.clone()),
            _ => self.rendered(),
        }
    }

    /// Numeric view of the value; digit-only text parses too.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Money(_) => None,
        }
    }

    pub fn as_amount(&self) -> Option<Amount> {
        match self {
            FieldValue::Money(a) => Some(*a),
            FieldValue::Number(n) => i64::try_from(*n)
                .ok()?
                .checked_mul(100)
                .map(Amount::from_cents),
            FieldValue::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Number(value as u64)
    }
}

impl From<Amount> for FieldValue {
    fn from(value: Amount) -> Self {
        FieldValue::Money(value)
    }
}

/// Cuts `value` to at most `width` characters.
pub fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_accepts() {
        assert!(FieldKind::Alphanumeric.accepts("ACME CORP #1"));
        assert!(FieldKind::Alphanumeric.accepts(""));
        assert!(!FieldKind::Alphanumeric.accepts("caf\u{e9}"));
        assert!(FieldKind::Numeric.accepts("0042"));
        assert!(!FieldKind::Numeric.accepts("4 2"));
        assert!(!FieldKind::Amount.accepts("-100"));
    }

    #[test]
    fn test_builder_flags() {
        let spec = FieldSpec::routing("immediate_destination", 10, 3)
            .required()
            .padded(' ');
        assert!(spec.required);
        assert!(!spec.blank);
        assert_eq!(spec.padding, ' ');
        assert_eq!(spec.kind, FieldKind::Routing);
    }

    #[test]
    fn test_initial_values() {
        let code = FieldSpec::numeric("record_type_code", 1, 1).preset("6");
        assert_eq!(code.initial_value(), FieldValue::from("6"));

        let amount = FieldSpec::amount("amount", 10, 6);
        assert_eq!(amount.initial_value(), FieldValue::Money(Amount::ZERO));
    }

    #[test]
    fn test_value_views() {
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::Number(0).is_empty());
        assert_eq!(FieldValue::from("0012").as_u64(), Some(12));
        assert_eq!(
            FieldValue::from(Amount::from_str("12.34").unwrap()).rendered(),
            "1234"
        );
    }

    #[test]
    fn test_bare_numbers_in_amount_fields_are_dollars() {
        let value = FieldValue::Number(1000);
        assert_eq!(value.rendered_as(FieldKind::Amount), "100000");
        assert_eq!(value.rendered_as(FieldKind::Numeric), "1000");
        assert_eq!(value.as_amount().unwrap().to_cents(), "100000");

        let text = FieldValue::from("12.5");
        assert_eq!(text.rendered_as(FieldKind::Amount), "1250");
        assert_eq!(text.as_amount().unwrap().to_cents(), "1250");
    }

    #[test]
    fn test_oversized_number_is_not_an_amount() {
        assert_eq!(FieldValue::Number(1 << 62).as_amount(), None);
        assert_eq!(FieldValue::Number(u64::MAX).as_amount(), None);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("ABCDEFGH", 3), "ABC");
        assert_eq!(truncate("AB", 5), "AB");
    }
}
