//! Lot identifier value object
//!
//! A lot id is the leading part of an image filename: digits optionally
//! followed by letters ("6", "6a", "101B"). Ordering is numeric-first so that
//! "9" < "10" < "10a" < "10b" < "11", with ids lacking a numeric prefix
//! sorted after every numeric one.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Identifier of one auction lot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotId(String);

impl LotId {
    /// Wrap a raw lot identifier (case is preserved)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as written in the filename
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into (numeric prefix, remainder). The prefix may be empty.
    fn split_numeric(&self) -> (&str, &str) {
        let end = self
            .0
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.0.len());
        self.0.split_at(end)
    }
}

/// Compare two digit strings by numeric value without parsing
///
/// Lot numbers can be arbitrarily long, so compare on the significant digits.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for LotId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_num, a_rest) = self.split_numeric();
        let (b_num, b_rest) = other.split_numeric();

        match (a_num.is_empty(), b_num.is_empty()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => self.0.cmp(&other.0),
            (false, false) => cmp_digits(a_num, b_num)
                .then_with(|| a_rest.cmp(b_rest))
                // "6" and "06" are distinct ids; keep Ord consistent with Eq
                .then_with(|| self.0.cmp(&other.0)),
        }
    }
}

impl PartialOrd for LotId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for LotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Sort lot identifiers into review order and drop duplicates
pub fn order_lot_ids<I>(ids: I) -> Vec<LotId>
where
    I: IntoIterator<Item = LotId>,
{
    let mut ids: Vec<LotId> = ids.into_iter().collect();
    ids.sort();
    ids.dedup();
    ids
}
