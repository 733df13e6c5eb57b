//! The four pillars (四柱).
//!
//! - Year: sexagenary year number `(year - 4) mod 60`, changing at the
//!   configured year boundary.
//! - Month: branch from the jie month (立春 opens 寅); stem by the five-tigers
//!   rule keyed by the solar year's stem.
//! - Day: Julian day number modulo 60.
//! - Hour: two-hour branch; stem by the five-rats rule keyed by the day stem.

use chrono::{NaiveDate, TimeDelta, Timelike};
use serde::Serialize;
use tianji_base::{Branch, Nayin, Sexagenary, Stem};
use tianji_time::julian_day_number;

use crate::boundary::DayBoundary;
use crate::config::{BaziConfig, ZiHourPolicy};
use crate::error::BaziError;
use crate::resolver::ResolvedBirth;

/// One stem-branch pillar with its derived labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pillar {
    pub cycle: Sexagenary,
    pub name: String,
    pub stem: Stem,
    pub branch: Branch,
    pub hidden_stems: Vec<Stem>,
    pub nayin: Nayin,
}

impl Pillar {
    pub fn new(cycle: Sexagenary) -> Self {
        Self {
            cycle,
            name: cycle.name(),
            stem: cycle.stem(),
            branch: cycle.branch(),
            hidden_stems: cycle.branch().hidden_stems().to_vec(),
            nayin: cycle.nayin(),
        }
    }
}

/// Position of a pillar within the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

/// All positions, year first.
pub const ALL_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "年柱",
            Self::Month => "月柱",
            Self::Day => "日柱",
            Self::Hour => "时柱",
        }
    }
}

/// The four pillars of a birth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub day_boundary: DayBoundary,
}

impl FourPillars {
    /// The day stem (日主).
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub fn get(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    /// Pillars paired with their positions, year first.
    pub fn iter(&self) -> impl Iterator<Item = (PillarPosition, &Pillar)> {
        ALL_POSITIONS.into_iter().map(move |p| (p, self.get(p)))
    }

    /// `甲辰 己巳 戊午 己未` style summary.
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(_, p)| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// First month stem (寅月) for a year stem: 甲己→丙, 乙庚→戊, 丙辛→庚, 丁壬→壬, 戊癸→甲.
pub fn first_month_stem(year_stem: Stem) -> Stem {
    Stem::from_index(((year_stem.index() % 5) * 2 + 2) % 10)
}

/// Month pillar for a solar month index (0 = 寅月).
pub fn month_pillar(year_stem: Stem, month_index: u8) -> Result<Sexagenary, BaziError> {
    let stem = first_month_stem(year_stem).offset(i64::from(month_index));
    let branch = Branch::Yin.offset(i64::from(month_index));
    Ok(Sexagenary::from_parts(stem, branch)?)
}

/// 子-hour stem for a day stem: 甲己→甲, 乙庚→丙, 丙辛→戊, 丁壬→庚, 戊癸→壬.
pub fn first_hour_stem(day_stem: Stem) -> Stem {
    Stem::from_index((day_stem.index() % 5) * 2)
}

/// Hour pillar for a branch, keyed by the day stem.
pub fn hour_pillar(day_stem: Stem, branch: Branch) -> Result<Sexagenary, BaziError> {
    let stem = first_hour_stem(day_stem).offset(i64::from(branch.index()));
    Ok(Sexagenary::from_parts(stem, branch)?)
}

/// Day pillar for a civil date.
pub fn day_pillar(date: NaiveDate) -> Sexagenary {
    Sexagenary::for_day_number(julian_day_number(date))
}

/// Compute the four pillars from a resolved birth.
pub fn four_pillars(birth: &ResolvedBirth, config: &BaziConfig) -> Result<FourPillars, BaziError> {
    let year = Sexagenary::for_year(birth.pillar_year(config.year_boundary)?);
    let solar_year_stem = Sexagenary::for_year(birth.solar_year()).stem();
    let month = month_pillar(solar_year_stem, birth.jie.month_index)?;

    let reckoning = birth.reckoning;
    let late_zi = reckoning.hour() == 23;
    let date = reckoning.date();
    let next_day = date + TimeDelta::days(1);
    let hour_key_day = day_pillar(if late_zi { next_day } else { date });
    let (day, day_boundary) = match (late_zi, config.zi_hour) {
        (false, _) => (day_pillar(date), DayBoundary::None),
        (true, ZiHourPolicy::RollOver) => (hour_key_day, DayBoundary::RolledOver),
        (true, ZiHourPolicy::SplitLateZi) => (day_pillar(date), DayBoundary::LateZiSplit),
    };
    let hour = hour_pillar(hour_key_day.stem(), Branch::from_hour(reckoning.hour()))?;

    tracing::debug!(
        year = %year,
        month = %month,
        day = %day,
        hour = %hour,
        pillar_date = %date,
        "four pillars"
    );

    Ok(FourPillars {
        year: Pillar::new(year),
        month: Pillar::new(month),
        day: Pillar::new(day),
        hour: Pillar::new(hour),
        day_boundary,
    })
}
