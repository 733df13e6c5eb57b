//! Chart configuration.

use serde::{Deserialize, Serialize};

use crate::error::BaziError;

/// Maximum number of luck pillars a chart may request.
pub const MAX_LUCK_PILLARS: u8 = 12;

/// Default number of luck pillars.
pub const DEFAULT_LUCK_PILLARS: u8 = 8;

/// How the 23:00–01:00 子 hour is split across the midnight day change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiHourPolicy {
    /// 23:00 already belongs to the next day, for both day and hour pillars.
    #[default]
    RollOver,
    /// Day pillar stays on the calendar date; the hour stem is keyed by the
    /// next day's stem (晚子时).
    SplitLateZi,
}

/// Where the year pillar changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearBoundary {
    /// First day of the first lunar month.
    #[default]
    LunarNewYear,
    /// The 立春 solar term (315° solar longitude).
    LiChun,
}

/// Named weighting table for the element tally and ten-god counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingPolicy {
    /// Each visible stem 1, each hidden stem 1.
    #[default]
    Standard,
    /// Four visible stems and the four branch main elements, 1 each.
    Surface,
    /// Visible stems 3; hidden stems 3 / 2 / 1 by main, middle, residual qi.
    QiGraded,
}

/// Which pillar the luck-pillar sequence steps from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckAnchor {
    #[default]
    Year,
    Month,
}

/// Options for one chart computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaziConfig {
    pub zi_hour: ZiHourPolicy,
    pub year_boundary: YearBoundary,
    pub weighting: WeightingPolicy,
    /// Reckon day and hour pillars in local apparent solar time.
    pub use_true_solar_time: bool,
    /// Births this close to a jie crossing are flagged as month-boundary cases.
    pub month_boundary_window_minutes: u32,
    pub luck_pillar_count: u8,
    pub luck_anchor: LuckAnchor,
    pub include_luck_pillars: bool,
    pub include_balance: bool,
    pub include_interpretation: bool,
}

impl Default for BaziConfig {
    fn default() -> Self {
        Self {
            zi_hour: ZiHourPolicy::default(),
            year_boundary: YearBoundary::default(),
            weighting: WeightingPolicy::default(),
            use_true_solar_time: true,
            month_boundary_window_minutes: 120,
            luck_pillar_count: DEFAULT_LUCK_PILLARS,
            luck_anchor: LuckAnchor::default(),
            include_luck_pillars: true,
            include_balance: true,
            include_interpretation: false,
        }
    }
}

impl BaziConfig {
    /// Reject values no chart can be computed with.
    pub fn validate(&self) -> Result<(), BaziError> {
        if self.luck_pillar_count == 0 || self.luck_pillar_count > MAX_LUCK_PILLARS {
            return Err(BaziError::invalid(
                "luck_pillar_count",
                format!("must be within 1..={MAX_LUCK_PILLARS}"),
            ));
        }
        if self.month_boundary_window_minutes > 7 * 24 * 60 {
            return Err(BaziError::invalid(
                "month_boundary_window_minutes",
                "must not exceed one week",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = BaziConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.zi_hour, ZiHourPolicy::RollOver);
        assert_eq!(c.year_boundary, YearBoundary::LunarNewYear);
        assert_eq!(c.luck_pillar_count, 8);
    }

    #[test]
    fn luck_count_bounds() {
        let mut c = BaziConfig::default();
        c.luck_pillar_count = 0;
        assert!(c.validate().is_err());
        c.luck_pillar_count = 13;
        assert!(c.validate().is_err());
        c.luck_pillar_count = 12;
        assert!(c.validate().is_ok());
    }
}
