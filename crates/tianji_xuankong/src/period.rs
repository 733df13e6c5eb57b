//! The nine 20-year periods (三元九运).
//!
//! Period 1 began in 1864; the cycle of nine repeats every 180 years on
//! fixed calendar-year boundaries.

use serde::{Deserialize, Serialize};

use crate::error::XuankongError;

/// First year of a period-1 era.
pub const PERIOD_EPOCH_YEAR: i32 = 1864;

/// Years per period.
pub const YEARS_PER_PERIOD: i32 = 20;

/// A validated period number in 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

const PERIOD_NAMES: [&str; 9] = [
    "一运", "二运", "三运", "四运", "五运", "六运", "七运", "八运", "九运",
];

impl Period {
    pub fn new(n: u8) -> Result<Self, XuankongError> {
        if (1..=9).contains(&n) {
            Ok(Self(n))
        } else {
            Err(XuankongError::invalid("period", format!("{n} is outside 1..=9")))
        }
    }

    /// Period governing a calendar year.
    pub fn for_year(year: i32) -> Self {
        let offset = (year - PERIOD_EPOCH_YEAR).rem_euclid(9 * YEARS_PER_PERIOD);
        Self((offset / YEARS_PER_PERIOD) as u8 + 1)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn name(self) -> &'static str {
        PERIOD_NAMES[(self.0 - 1) as usize]
    }

    /// First and last calendar year of the period containing `year`.
    pub fn year_range(year: i32) -> (i32, i32) {
        let start = year - (year - PERIOD_EPOCH_YEAR).rem_euclid(YEARS_PER_PERIOD);
        (start, start + YEARS_PER_PERIOD - 1)
    }
}

impl TryFrom<u8> for Period {
    type Error = XuankongError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Period> for u8 {
    fn from(p: Period) -> Self {
        p.0
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_periods() {
        assert_eq!(Period::for_year(1864).number(), 1);
        assert_eq!(Period::for_year(1883).number(), 1);
        assert_eq!(Period::for_year(1884).number(), 2);
        assert_eq!(Period::for_year(2003).number(), 7);
        assert_eq!(Period::for_year(2004).number(), 8);
        assert_eq!(Period::for_year(2023).number(), 8);
        assert_eq!(Period::for_year(2024).number(), 9);
        assert_eq!(Period::for_year(2043).number(), 9);
        assert_eq!(Period::for_year(2044).number(), 1);
    }

    #[test]
    fn repeats_every_180_years() {
        for y in [1700, 1850, 1999, 2100] {
            assert_eq!(Period::for_year(y), Period::for_year(y + 180));
        }
        assert_eq!(Period::for_year(1863).number(), 9);
    }

    #[test]
    fn year_ranges() {
        assert_eq!(Period::year_range(2010), (2004, 2023));
        assert_eq!(Period::year_range(2024), (2024, 2043));
        assert_eq!(Period::year_range(1850), (1844, 1863));
    }

    #[test]
    fn validation() {
        assert!(Period::new(0).is_err());
        assert!(Period::new(10).is_err());
        assert_eq!(Period::new(8).unwrap().name(), "八运");
    }
}
