//! Canonical request encoding and content hashing.
//!
//! A canonical string fixes every input's spelling (date and time formats,
//! coordinate precision, enum names, timezone name) and ends with a
//! fingerprint of the configuration. Its SHA-256 is the cache key and the
//! report's content hash.
//!
//! Numeric inputs are normalized to key precision before hashing, and the
//! engine computes from the normalized values, so a cache hit always equals
//! a fresh computation.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tianji_bazi::{BaziConfig, BirthDate, BirthInput, CalendarKind, Gender};
use tianji_xuankong::XuankongConfig;

use crate::error::EngineError;

/// Fixed decimals for coordinates.
pub const COORDINATE_DECIMALS: usize = 4;

/// Fixed decimals for facing degrees.
pub const FACING_DECIMALS: usize = 2;

/// Fixed decimals for heading quality.
pub const QUALITY_DECIMALS: usize = 2;

/// Lower-case hex SHA-256 of `s`.
pub fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `value` rounded to `decimals` places; `-0` folds to `0`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale + 0.0
}

/// Facing wrapped into [0, 360) at key precision.
pub fn normalize_facing(degrees: f64) -> f64 {
    round_to(degrees.rem_euclid(360.0), FACING_DECIMALS).rem_euclid(360.0)
}

/// `input` with its coordinates at key precision.
pub fn normalize_birth(input: BirthInput) -> BirthInput {
    BirthInput {
        longitude: round_to(input.longitude, COORDINATE_DECIMALS),
        latitude: round_to(input.latitude, COORDINATE_DECIMALS),
        ..input
    }
}

/// Stable JSON of a configuration value.
pub fn config_fingerprint<T: Serialize>(config: &T) -> Result<String, EngineError> {
    Ok(serde_json::to_string(config)?)
}

fn gender_name(g: Gender) -> &'static str {
    match g {
        Gender::Male => "male",
        Gender::Female => "female",
    }
}

fn calendar_name(c: CalendarKind) -> &'static str {
    match c {
        CalendarKind::Solar => "solar",
        CalendarKind::Lunar => "lunar",
    }
}

fn date_key(date: &BirthDate) -> String {
    match date {
        BirthDate::Solar(d) => d.format("%Y-%m-%d").to_string(),
        BirthDate::Lunar(l) => format!(
            "{:04}-{:02}-{:02}{}",
            l.year,
            l.month,
            l.day,
            if l.is_leap_month { "L" } else { "" }
        ),
    }
}

/// Canonical encoding of a validated birth input.
pub fn canonical_bazi(input: &BirthInput, config: &BaziConfig) -> Result<String, EngineError> {
    Ok(format!(
        "bazi|{date}|{time}|{zone}|{lon:.prec$}|{lat:.prec$}|{gender}|{calendar}|{config}",
        date = date_key(&input.date),
        time = input.time.format("%H:%M:%S"),
        zone = input.zone.canonical_name(),
        lon = input.longitude,
        lat = input.latitude,
        prec = COORDINATE_DECIMALS,
        gender = gender_name(input.gender),
        calendar = calendar_name(input.calendar()),
        config = config_fingerprint(config)?,
    ))
}

/// Canonical encoding of a plate request. `heading_quality` is present only
/// for heading-derived facings.
pub fn canonical_xuankong(
    build_date: chrono::NaiveDate,
    facing_degrees: f64,
    heading_quality: Option<f64>,
    config: &XuankongConfig,
) -> Result<String, EngineError> {
    let quality = heading_quality
        .map(|q| format!("{q:.prec$}", prec = QUALITY_DECIMALS))
        .unwrap_or_else(|| "-".to_string());
    Ok(format!(
        "xuankong|{date}|{facing:.prec$}|{quality}|{config}",
        date = build_date.format("%Y-%m-%d"),
        facing = facing_degrees.rem_euclid(360.0),
        prec = FACING_DECIMALS,
        config = config_fingerprint(config)?,
    ))
}
