//! The ten heavenly stems (天干).
//!
//! Stems pair off by element (甲乙 Wood, 丙丁 Fire, ...) with the even
//! member yang and the odd member yin.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};
use crate::error::BaseError;

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All ten stems in cycle order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// 0-based index (甲 = 0 .. 癸 = 9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem from a raw index; wraps modulo 10.
    pub const fn from_index(i: u8) -> Self {
        ALL_STEMS[(i % 10) as usize]
    }

    /// Stem from a signed cycle position; wraps in both directions.
    pub fn from_cycle(i: i64) -> Self {
        ALL_STEMS[i.rem_euclid(10) as usize]
    }

    /// Chinese character.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self as usize]
    }

    /// Element carried by the stem.
    pub const fn element(self) -> Element {
        Element::from_index(self.index() / 2)
    }

    /// Yin/yang polarity.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_parity(self.index())
    }

    /// True for the five yang stems.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// The stem `n` steps further along the cycle (negative steps go back).
    pub fn offset(self, n: i64) -> Self {
        Self::from_cycle(i64::from(self.index()) + n)
    }
}

impl FromStr for Stem {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEM_NAMES
            .iter()
            .position(|n| *n == s.trim())
            .map(|i| ALL_STEMS[i])
            .ok_or_else(|| BaseError::UnknownName {
                kind: "stem",
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
