//! Birth-moment resolution: civil time → UTC, true solar time, the
//! enclosing solar term and jie month, and boundary annotations.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use tianji_time::{
    JieSpan, LunarDate, SolarTimeCorrection, TermSpan, jie_span_at, resolve_local_instant,
    solar_to_lunar, term_span_at, true_solar_time,
};

use crate::boundary::{BoundaryMarkers, UncertaintyLevel};
use crate::config::{BaziConfig, YearBoundary};
use crate::error::BaziError;
use crate::input::BirthInput;

/// Latitude beyond which the birth is treated as polar.
pub const POLAR_LATITUDE: f64 = 66.5;

/// Distance from a coordinate range bound that counts as extreme.
pub const COORDINATE_EDGE_DEG: f64 = 0.01;

/// Births this close to an hour-branch change are flagged.
pub const HOUR_BOUNDARY_MINUTES: i64 = 10;

/// Solar-time corrections larger than this are flagged.
pub const LARGE_CORRECTION_MINUTES: f64 = 120.0;

/// Everything the pillar calculator needs about one birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBirth {
    /// Gregorian civil date.
    pub solar_date: NaiveDate,
    /// Lunar date of the civil date, when inside the lunar table.
    pub lunar_date: Option<LunarDate>,
    /// Civil wall-clock time.
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
    /// Time the day and hour pillars are reckoned in.
    pub reckoning: NaiveDateTime,
    pub solar_time: Option<SolarTimeCorrectionView>,
    /// Solar month (jie to jie).
    pub jie: JieSpan,
    /// 15° solar term.
    pub term: TermSpan,
    pub markers: BoundaryMarkers,
}

/// Serializable view of a true-solar-time correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarTimeCorrectionView {
    pub longitude_minutes: f64,
    pub equation_of_time_minutes: f64,
    pub apparent_solar: NaiveDateTime,
}

impl From<SolarTimeCorrection> for SolarTimeCorrectionView {
    fn from(c: SolarTimeCorrection) -> Self {
        Self {
            longitude_minutes: c.longitude_minutes,
            equation_of_time_minutes: c.equation_of_time_minutes,
            apparent_solar: c.apparent_solar,
        }
    }
}

impl ResolvedBirth {
    /// Solar year (立春 to 立春) the birth falls in.
    pub fn solar_year(&self) -> i32 {
        // 小寒 opens the last solar month in January of the following year.
        let opening_year = self.jie.start.year();
        if self.jie.month_index == 11 {
            opening_year - 1
        } else {
            opening_year
        }
    }

    /// Year number whose sexagenary pair is the year pillar.
    pub fn pillar_year(&self, boundary: YearBoundary) -> Result<i32, BaziError> {
        match boundary {
            YearBoundary::LiChun => Ok(self.solar_year()),
            YearBoundary::LunarNewYear => self.lunar_date.map(|l| l.year).ok_or_else(|| {
                BaziError::Calculation {
                    code: "E_LUNAR_RANGE",
                    message: format!(
                        "{} lies outside the lunar table; use the 立春 year boundary",
                        self.solar_date
                    ),
                }
            }),
        }
    }
}

/// Minutes from `t` to the nearest hour-branch change (odd hours).
fn minutes_to_hour_boundary(t: &NaiveDateTime) -> i64 {
    let m = i64::from(t.hour()) * 60 + i64::from(t.minute());
    let into = (m + 60) % 120;
    into.min(120 - into)
}

fn annotate_coordinates(markers: &mut BoundaryMarkers, longitude: f64, latitude: f64) {
    if latitude.abs() > POLAR_LATITUDE {
        markers.raise(
            UncertaintyLevel::High,
            format!("polar latitude {latitude:.2}°: solar day length is irregular"),
        );
    }
    if 90.0 - latitude.abs() < COORDINATE_EDGE_DEG || 180.0 - longitude.abs() < COORDINATE_EDGE_DEG {
        markers.raise(
            UncertaintyLevel::High,
            "coordinates at the edge of the valid range",
        );
    }
}

/// Resolve a validated birth into instants, spans and markers.
pub fn resolve(input: &BirthInput, config: &BaziConfig) -> Result<ResolvedBirth, BaziError> {
    let solar_date = input.solar_date()?;
    let local = solar_date.and_time(input.time);
    let pinned = resolve_local_instant(local, &input.zone)?;
    let utc = pinned.utc;

    let mut markers = BoundaryMarkers::default();
    if pinned.ambiguous {
        markers.raise(
            UncertaintyLevel::Medium,
            format!("{local} occurs twice in {}; the earlier instant was used", input.zone),
        );
    }

    let (reckoning, solar_time) = if config.use_true_solar_time {
        let correction = true_solar_time(&utc, input.longitude);
        markers.true_solar_time_used = true;
        let shift = (correction.apparent_solar - local).num_seconds() as f64 / 60.0;
        if shift.abs() > LARGE_CORRECTION_MINUTES {
            markers.raise(
                UncertaintyLevel::Medium,
                format!("true solar time differs from civil time by {shift:.0} minutes"),
            );
        }
        if correction.apparent_solar.date() != local.date() {
            markers.note("true solar time falls on a different calendar date");
        }
        (correction.apparent_solar, Some(correction.into()))
    } else {
        (local, None)
    };

    let jie = jie_span_at(&utc)?;
    let term = term_span_at(&utc)?;

    let window_days = f64::from(config.month_boundary_window_minutes) / 1440.0;
    let since = jie.days_since_start(&utc);
    let until = jie.days_until_end(&utc);
    if since.min(until) < window_days {
        markers.is_month_boundary = true;
        let (name, minutes) = if since < until {
            (jie.opening.name(), since * 1440.0)
        } else {
            (jie.closing.name(), until * 1440.0)
        };
        markers.raise(
            UncertaintyLevel::Medium,
            format!("birth is {minutes:.0} minutes from {name}"),
        );
    }

    let to_hour_change = minutes_to_hour_boundary(&reckoning);
    if to_hour_change < HOUR_BOUNDARY_MINUTES {
        markers.raise(
            UncertaintyLevel::Medium,
            format!("birth is {to_hour_change} minutes from an hour-branch change"),
        );
    }

    if reckoning.hour() == 23 {
        markers.is_day_boundary = true;
    }

    annotate_coordinates(&mut markers, input.longitude, input.latitude);

    let lunar_date = match solar_to_lunar(solar_date) {
        Ok(l) => Some(l),
        Err(e) if config.year_boundary == YearBoundary::LiChun => {
            markers.note(format!("no lunar date: {e}"));
            None
        }
        Err(e) => return Err(e.into()),
    };

    if markers.uncertainty_level == UncertaintyLevel::High {
        tracing::warn!(
            date = %solar_date,
            notes = ?markers.notes,
            "high uncertainty birth"
        );
    }

    Ok(ResolvedBirth {
        solar_date,
        lunar_date,
        local,
        utc,
        reckoning,
        solar_time,
        jie,
        term,
        markers,
    })
}
