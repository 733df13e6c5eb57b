//! Apparent solar longitude, equation of time, and true solar time.
//!
//! Low-precision solar theory (Meeus, *Astronomical Algorithms*, ch. 25/28):
//! accurate to about 0.01° in longitude, i.e. roughly a quarter of an hour
//! in solar-term instants, which is well inside the uncertainty band the
//! pillar resolver reports.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::error::TimeError;
use crate::julian::{J2000_JD, jd_from_utc, jd_ut_to_tt};

/// Mean days for the Sun to advance one degree of longitude.
pub const MEAN_DAYS_PER_DEGREE: f64 = 365.242_19 / 360.0;

/// Convergence tolerance for longitude crossings, in degrees (~0.1 s).
const LONGITUDE_TOLERANCE_DEG: f64 = 1e-6;

/// Iteration cap for longitude crossings.
const MAX_ITERATIONS: u32 = 32;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an angle to [-180, 180) degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_360(deg + 180.0);
    r - 180.0
}

fn centuries_since_j2000(jd_tt: f64) -> f64 {
    (jd_tt - J2000_JD) / 36_525.0
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees, [0, 360).
pub fn sun_apparent_longitude(jd_tt: f64) -> f64 {
    let t = centuries_since_j2000(jd_tt);
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_360(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// Equation of time in minutes (apparent minus mean solar time).
pub fn equation_of_time_minutes(jd_tt: f64) -> f64 {
    let t = centuries_since_j2000(jd_tt);
    let eps = (23.439_291 - 0.013_004_2 * t).to_radians();
    let l0 = normalize_360(280.466_46 + 36_000.769_83 * t).to_radians();
    let m = (357.529_11 + 35_999.050_29 * t).to_radians();
    let e = 0.016_708_634 - 0.000_042_037 * t;
    let y = (eps / 2.0).tan().powi(2);
    let eq = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    eq.to_degrees() * 4.0
}

/// Local apparent solar time at a longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTimeCorrection {
    /// Longitude term (4 minutes per degree east of Greenwich).
    pub longitude_minutes: f64,
    /// Equation-of-time term.
    pub equation_of_time_minutes: f64,
    /// Resulting apparent solar wall-clock time.
    pub apparent_solar: NaiveDateTime,
}

impl SolarTimeCorrection {
    /// Total shift from UTC in minutes.
    pub fn total_minutes(&self) -> f64 {
        self.longitude_minutes + self.equation_of_time_minutes
    }
}

/// Convert a UTC instant to local apparent (true) solar time.
pub fn true_solar_time(utc: &DateTime<Utc>, longitude_deg: f64) -> SolarTimeCorrection {
    let jd_tt = jd_ut_to_tt(jd_from_utc(utc));
    let longitude_minutes = longitude_deg * 4.0;
    let equation_of_time_minutes = equation_of_time_minutes(jd_tt);
    let shift_ms = ((longitude_minutes + equation_of_time_minutes) * 60_000.0).round() as i64;
    SolarTimeCorrection {
        longitude_minutes,
        equation_of_time_minutes,
        apparent_solar: utc.naive_utc() + TimeDelta::milliseconds(shift_ms),
    }
}

/// Find the UT Julian Date at which the Sun's apparent longitude reaches
/// `target_deg`, starting from a guess within a few weeks of the answer.
pub fn find_longitude_crossing(jd_guess_ut: f64, target_deg: f64) -> Result<f64, TimeError> {
    let mut jd = jd_guess_ut;
    for _ in 0..MAX_ITERATIONS {
        let lon = sun_apparent_longitude(jd_ut_to_tt(jd));
        let diff = normalize_pm180(target_deg - lon);
        if diff.abs() < LONGITUDE_TOLERANCE_DEG {
            return Ok(jd);
        }
        jd += diff * MEAN_DAYS_PER_DEGREE;
    }
    Err(TimeError::NoConvergence("solar longitude crossing"))
}
