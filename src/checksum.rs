//! Routing-number check digits, entry hashes and block arithmetic.

use crate::error::{AchError, Result};

/// Lines per physical block.
pub const BLOCKING_FACTOR: usize = 10;

/// Entry hash fields are 10 digits wide.
pub const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;

/// Weighted-sum check digit over the first eight digits of a routing number.
fn check_digit(digits: &[u32]) -> u32 {
    (7 * (digits[0] + digits[3] + digits[6])
        + 3 * (digits[1] + digits[4] + digits[7])
        + 9 * (digits[2] + digits[5]))
        % 10
}

fn digits_of(routing: &str) -> Option<Vec<u32>> {
    routing.chars().map(|c| c.to_digit(10)).collect()
}

/// Appends the check digit to an 8-digit routing number.
///
/// Anything that is not exactly eight digits, including an already complete
/// 9-digit number, is returned unchanged.
///
/// ```
/// use ach_file::checksum::compute_check_digit;
///
/// assert_eq!(compute_check_digit("03130142"), "031301422");
/// assert_eq!(compute_check_digit("031301422"), "031301422");
/// ```
pub fn compute_check_digit(routing: &str) -> String {
    match digits_of(routing) {
        Some(digits) if digits.len() == 8 => format!("{}{}", routing, check_digit(&digits)),
        _ => routing.to_string(),
    }
}

/// Verifies that a 9-digit routing number ends in its own check digit.
pub fn validate_routing_number(routing: &str) -> Result<()> {
    match digits_of(routing) {
        Some(digits) if digits.len() == 9 && check_digit(&digits[..8]) == digits[8] => Ok(()),
        _ => Err(AchError::InvalidRoutingNumber(routing.to_string())),
    }
}

/// Running sum of receiving DFI routing prefixes.
///
/// Only the rightmost 10 digits survive into a control record, so the sum
/// is kept reduced modulo 10^10; the result is the same as truncating the
/// full decimal sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryHash(u64);

impl EntryHash {
    pub fn new() -> Self {
        EntryHash(0)
    }

    pub fn add(&mut self, receiving_dfi: u64) {
        self.0 = (self.0 + receiving_dfi % ENTRY_HASH_MODULUS) % ENTRY_HASH_MODULUS;
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromIterator<u64> for EntryHash {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut hash = EntryHash::new();
        for dfi in iter {
            hash.add(dfi);
        }
        hash
    }
}

/// Smallest multiple of `multiple` that is `>= value`.
pub fn next_multiple(value: usize, multiple: usize) -> usize {
    match value % multiple {
        0 => value,
        rem => value + (multiple - rem),
    }
}

/// Number of 10-line blocks needed for `rows` physical lines.
pub fn block_count(rows: usize) -> usize {
    next_multiple(rows, BLOCKING_FACTOR) / BLOCKING_FACTOR
}
