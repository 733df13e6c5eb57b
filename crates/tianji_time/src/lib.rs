//! Calendar resolution for the tianji engine.
//!
//! This crate provides:
//! - Civil date/time parsing and local → UTC resolution (IANA or fixed offsets)
//! - Julian Date conversions and the ΔT correction
//! - Apparent solar longitude, equation of time, and true solar time
//! - The 24 solar terms and jie-to-jie solar months
//! - Lunisolar ↔ Gregorian conversion for 1900 – 2100
//!
//! Everything here is pure and allocation-light; no data files are loaded.

pub mod civil;
pub mod error;
pub mod julian;
pub mod lunar;
pub mod solar;
pub mod solar_term;

pub use civil::{LocalInstant, ZoneSpec, parse_date, parse_time, resolve_local_instant};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, delta_t_seconds, jd_from_utc, jd_ut_to_tt, julian_day_number,
    utc_from_jd,
};
pub use lunar::{
    LUNAR_MAX_YEAR, LUNAR_MIN_YEAR, LunarDate, leap_month, lunar_new_year, lunar_to_solar,
    parse_lunar_date, solar_to_lunar,
};
pub use solar::{
    SolarTimeCorrection, equation_of_time_minutes, find_longitude_crossing, normalize_360,
    normalize_pm180, sun_apparent_longitude, true_solar_time,
};
pub use solar_term::{
    ALL_SOLAR_TERMS, JieSpan, SolarTerm, TermSpan, jie_span_at, term_instant, term_span_at,
};
