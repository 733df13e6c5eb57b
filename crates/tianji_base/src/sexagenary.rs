//! The sexagenary (六十甲子) cycle.
//!
//! Stems and branches advance together, so position `k` pairs stem `k mod 10`
//! with branch `k mod 12`. Only same-parity pairs occur: 60 of the 120 naive
//! combinations. Index 0 = 甲子.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::BaseError;
use crate::nayin::{Nayin, nayin_for_index};
use crate::stem::Stem;

/// Offset from the Julian day number to the day's cycle index
/// (JDN 2451545, 2000-01-01, is 戊午 = 54).
pub const DAY_CYCLE_JDN_OFFSET: i64 = 49;

/// A validated position in the 60-term cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sexagenary(u8);

impl Sexagenary {
    /// 甲子, the start of the cycle.
    pub const JIA_ZI: Self = Self(0);

    /// Construct from a raw index in 0..60.
    pub fn new(index: u8) -> Result<Self, BaseError> {
        if index < 60 {
            Ok(Self(index))
        } else {
            Err(BaseError::InvalidIndex {
                kind: "sexagenary",
                value: i64::from(index),
            })
        }
    }

    /// Position from any signed integer; wraps.
    pub fn from_cycle(i: i64) -> Self {
        Self(i.rem_euclid(60) as u8)
    }

    /// Pair a stem with a branch. Fails when their parities differ.
    pub fn from_parts(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        let s = i64::from(stem.index());
        let b = i64::from(branch.index());
        if s % 2 != b % 2 {
            return Err(BaseError::InvalidPair {
                stem: stem.name(),
                branch: branch.name(),
            });
        }
        // k ≡ s (mod 10), k ≡ b (mod 12)
        Ok(Self::from_cycle(6 * s - 5 * b))
    }

    /// Year pillar for a sexagenary year number (1984 = 甲子).
    pub fn for_year(year: i32) -> Self {
        Self::from_cycle(i64::from(year) - 4)
    }

    /// Day pillar for a Julian day number.
    pub fn for_day_number(jdn: i64) -> Self {
        Self::from_cycle(jdn + DAY_CYCLE_JDN_OFFSET)
    }

    /// Raw index in 0..60.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Stem component.
    pub const fn stem(self) -> Stem {
        Stem::from_index(self.0 % 10)
    }

    /// Branch component.
    pub const fn branch(self) -> Branch {
        Branch::from_index(self.0 % 12)
    }

    /// Nayin label.
    pub const fn nayin(self) -> Nayin {
        nayin_for_index(self.0)
    }

    /// Position `n` steps along the cycle (negative steps go back).
    pub fn offset(self, n: i64) -> Self {
        Self::from_cycle(i64::from(self.0) + n)
    }

    /// Two-character name, e.g. `甲子`.
    pub fn name(self) -> String {
        format!("{}{}", self.stem().name(), self.branch().name())
    }
}

impl TryFrom<u8> for Sexagenary {
    type Error = BaseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sexagenary> for u8 {
    fn from(value: Sexagenary) -> Self {
        value.0
    }
}

impl FromStr for Sexagenary {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BaseError::UnknownName {
                kind: "sexagenary",
                name: s.to_string(),
            });
        };
        let stem: Stem = a.to_string().parse()?;
        let branch: Branch = b.to_string().parse()?;
        Self::from_parts(stem, branch)
    }
}

impl std::fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::ALL_BRANCHES;
    use crate::stem::ALL_STEMS;

    #[test]
    fn exactly_sixty_valid_pairs() {
        let mut valid = 0;
        for s in ALL_STEMS {
            for b in ALL_BRANCHES {
                if let Ok(x) = Sexagenary::from_parts(s, b) {
                    assert_eq!(x.stem(), s);
                    assert_eq!(x.branch(), b);
                    valid += 1;
                }
            }
        }
        assert_eq!(valid, 60);
    }

    #[test]
    fn parity_holds_for_every_index() {
        for i in 0..60 {
            let x = Sexagenary::new(i).unwrap();
            assert_eq!(x.stem().index() % 2, x.branch().index() % 2);
        }
        assert!(Sexagenary::new(60).is_err());
    }

    #[test]
    fn known_years() {
        assert_eq!(Sexagenary::for_year(1984).name(), "甲子");
        assert_eq!(Sexagenary::for_year(2024).name(), "甲辰");
        assert_eq!(Sexagenary::for_year(1900).name(), "庚子");
        assert_eq!(Sexagenary::for_year(2000).name(), "庚辰");
    }

    #[test]
    fn day_epoch() {
        assert_eq!(Sexagenary::for_day_number(2_451_545).name(), "戊午");
        assert_eq!(Sexagenary::for_day_number(2_451_546).name(), "己未");
    }

    #[test]
    fn offset_wraps() {
        assert_eq!(Sexagenary::JIA_ZI.offset(-1).name(), "癸亥");
        assert_eq!(Sexagenary::JIA_ZI.offset(61).name(), "乙丑");
    }

    #[test]
    fn parse_pairs() {
        assert_eq!("甲辰".parse::<Sexagenary>().unwrap().index(), 40);
        assert!(matches!(
            "甲丑".parse::<Sexagenary>(),
            Err(BaseError::InvalidPair { .. })
        ));
        assert!("甲".parse::<Sexagenary>().is_err());
    }
}
