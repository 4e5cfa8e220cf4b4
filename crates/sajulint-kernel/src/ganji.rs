//! The sexagenary key space: 60 stem-branch compounds in cycle order.
//!
//! The key space is closed and fixed. Every record lookup, iteration, and
//! report listing follows the cycle order, so downstream output stays
//! deterministic regardless of how records were harvested.

use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Heavenly stems, cycle order.
pub const STEMS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// Earthly branches, cycle order.
pub const BRANCHES: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

/// Compounds in one full cycle.
pub const CYCLE_LEN: usize = 60;

/// One of the 60 stem-branch compounds.
///
/// Backed by the cycle index so `Ord` and iteration follow the canonical
/// enumeration (甲子, 乙丑, … 癸亥) rather than any lexicographic accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ganji(u8);

impl Ganji {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CYCLE_LEN).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn stem(self) -> char {
        STEMS[self.index() % STEMS.len()]
    }

    pub fn branch(self) -> char {
        BRANCHES[self.index() % BRANCHES.len()]
    }

    /// Parse a two-character compound. Only cycle members are accepted:
    /// 甲丑 pairs valid alphabet characters but is not in the cycle
    /// (stem and branch indices must share parity).
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let stem = chars.next()?;
        let branch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let stem_idx = STEMS.iter().position(|c| *c == stem)?;
        let branch_idx = BRANCHES.iter().position(|c| *c == branch)?;
        (0..CYCLE_LEN)
            .find(|i| i % STEMS.len() == stem_idx && i % BRANCHES.len() == branch_idx)
            .map(|i| Self(i as u8))
    }

    /// The canonical 60-element enumeration.
    pub fn cycle() -> impl Iterator<Item = Ganji> {
        (0..CYCLE_LEN as u8).map(Ganji)
    }
}

impl fmt::Display for Ganji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

impl Serialize for Ganji {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ganji {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ganji::parse(&token)
            .ok_or_else(|| DeError::custom(format!("not a sexagenary compound: {token:?}")))
    }
}
