//! Luck pillars (大运).
//!
//! Direction: forward for a yang-year male or yin-year female, reverse
//! otherwise. The start age comes from the time between birth and the
//! adjacent jie in the travel direction, at 3 days to one year of age
//! (1 day = 4 months, 2 hours = 10 days). Each decade steps the anchor
//! pillar one place along the 60-term cycle.

use chrono::Datelike;
use serde::Serialize;
use tianji_base::Stem;

use crate::config::{BaziConfig, LuckAnchor};
use crate::error::BaziError;
use crate::input::Gender;
use crate::pillars::{FourPillars, Pillar};
use crate::resolver::ResolvedBirth;

/// Days of birth-to-jie distance that count as one year of age.
pub const DAYS_PER_LUCK_YEAR: f64 = 3.0;

/// Years covered by one luck pillar.
pub const YEARS_PER_LUCK_PILLAR: u32 = 10;

/// Direction of travel through the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckDirection {
    Forward,
    Reverse,
}

impl LuckDirection {
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "顺行",
            Self::Reverse => "逆行",
        }
    }
}

/// Luck direction from gender and year-stem polarity.
pub fn luck_direction(gender: Gender, year_stem: Stem) -> LuckDirection {
    match (gender, year_stem.is_yang()) {
        (Gender::Male, true) | (Gender::Female, false) => LuckDirection::Forward,
        _ => LuckDirection::Reverse,
    }
}

/// Start age (起运) derived from a birth-to-jie distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StartAge {
    /// Distance to the jie, in days.
    pub distance_days: f64,
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// Whole-year age the first luck pillar starts at (nearest, at least 1).
    pub rounded_years: u32,
}

/// Convert a birth-to-jie distance into a start age.
pub fn start_age_from_days(distance_days: f64) -> StartAge {
    let d = distance_days.max(0.0);
    let exact_years = d / DAYS_PER_LUCK_YEAR;
    let years = exact_years.floor();
    // One day of distance is four months of age; one month is 30 days.
    let month_part = (d - years * DAYS_PER_LUCK_YEAR) * 4.0;
    let months = month_part.floor();
    let mut days = ((month_part - months) * 30.0).round() as u32;
    let mut months = months as u32;
    if days >= 30 {
        days -= 30;
        months += 1;
    }
    let mut years = years as u32;
    if months >= 12 {
        months -= 12;
        years += 1;
    }
    StartAge {
        distance_days: (d * 10_000.0).round() / 10_000.0,
        years,
        months,
        days,
        rounded_years: (exact_years.round() as u32).max(1),
    }
}

/// One decade of the luck sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LuckPillar {
    /// 1-based sequence index.
    pub index: u8,
    /// Age in whole years, inclusive.
    pub start_age: u32,
    /// Age in whole years, inclusive.
    pub end_age: u32,
    pub start_year: i32,
    pub end_year: i32,
    pub pillar: Pillar,
}

/// The ordered luck-pillar sequence of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuckPillars {
    pub direction: LuckDirection,
    pub anchor: LuckAnchor,
    pub start_age: StartAge,
    pub pillars: Vec<LuckPillar>,
}

impl LuckPillars {
    /// Luck pillar governing an age; `None` before the first decade or after
    /// the last.
    pub fn at_age(&self, age: u32) -> Option<&LuckPillar> {
        let idx = self.pillars.partition_point(|p| p.end_age < age);
        self.pillars.get(idx).filter(|p| p.start_age <= age)
    }

    /// Luck pillar governing a calendar year.
    pub fn at_year(&self, year: i32) -> Option<&LuckPillar> {
        let idx = self.pillars.partition_point(|p| p.end_year < year);
        self.pillars.get(idx).filter(|p| p.start_year <= year)
    }
}

/// Build the luck-pillar sequence for a chart.
pub fn luck_pillars(
    pillars: &FourPillars,
    birth: &ResolvedBirth,
    gender: Gender,
    config: &BaziConfig,
) -> Result<LuckPillars, BaziError> {
    if config.luck_pillar_count == 0 {
        return Err(BaziError::invalid("luck_pillar_count", "must be at least 1"));
    }
    let direction = luck_direction(gender, pillars.year.stem);
    let distance_days = match direction {
        LuckDirection::Forward => birth.jie.days_until_end(&birth.utc),
        LuckDirection::Reverse => birth.jie.days_since_start(&birth.utc),
    };
    let start_age = start_age_from_days(distance_days);
    let anchor = match config.luck_anchor {
        LuckAnchor::Year => pillars.year.cycle,
        LuckAnchor::Month => pillars.month.cycle,
    };
    let birth_year = birth.solar_date.year();

    let mut out = Vec::with_capacity(usize::from(config.luck_pillar_count));
    let mut age = start_age.rounded_years;
    for i in 1..=config.luck_pillar_count {
        let cycle = anchor.offset(direction.step() * i64::from(i));
        let end_age = age + YEARS_PER_LUCK_PILLAR - 1;
        let start_year = birth_year + age as i32;
        out.push(LuckPillar {
            index: i,
            start_age: age,
            end_age,
            start_year,
            end_year: start_year + (YEARS_PER_LUCK_PILLAR - 1) as i32,
            pillar: Pillar::new(cycle),
        });
        age = end_age + 1;
    }

    tracing::debug!(
        direction = direction.name(),
        start_age = start_age.rounded_years,
        count = out.len(),
        "luck pillars"
    );

    Ok(LuckPillars {
        direction,
        anchor: config.luck_anchor,
        start_age,
        pillars: out,
    })
}
