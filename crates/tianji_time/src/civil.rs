//! Civil date/time parsing and local → UTC resolution.
//!
//! Timezones are accepted either as IANA identifiers (`Asia/Shanghai`) or as
//! fixed offsets (`+08:00`, `-0530`, `UTC+8`, `UTC`). Daylight-saving
//! ambiguities resolve to the earlier instant and are reported on the
//! result; times inside a DST gap are rejected.

use std::fmt::{Display, Formatter};

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use chrono_tz::Tz;

use crate::error::TimeError;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| TimeError::InvalidDate(s.into()))
}

/// Parse a `HH:MM` or `HH:MM:SS` time.
pub fn parse_time(s: &str) -> Result<NaiveTime, TimeError> {
    let t = s.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .map_err(|_| TimeError::InvalidTime(s.into()))
}

/// A parsed timezone specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneSpec {
    /// IANA zone with DST rules.
    Named(Tz),
    /// Fixed UTC offset.
    Fixed(FixedOffset),
}

impl ZoneSpec {
    /// Parse an IANA identifier or a fixed offset.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("utc") || t.eq_ignore_ascii_case("gmt") || t == "Z" {
            return FixedOffset::east_opt(0)
                .map(Self::Fixed)
                .ok_or_else(|| TimeError::UnknownTimezone(s.into()));
        }
        if let Some(offset) = parse_fixed_offset(t) {
            return Ok(Self::Fixed(offset));
        }
        t.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| TimeError::UnknownTimezone(s.into()))
    }

    /// Canonical spelling used in cache keys and reports.
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Named(tz) => tz.name().to_string(),
            Self::Fixed(off) => format_offset(off.local_minus_utc()),
        }
    }
}

impl Display for ZoneSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let body = s
        .strip_prefix("UTC")
        .or_else(|| s.strip_prefix("GMT"))
        .unwrap_or(s);
    let (sign, rest) = match body.as_bytes().first()? {
        b'+' => (1, &body[1..]),
        b'-' => (-1, &body[1..]),
        _ => return None,
    };
    let (h, m) = if let Some((h, m)) = rest.split_once(':') {
        (h, m)
    } else if rest.len() == 4 {
        rest.split_at(2)
    } else {
        (rest, "0")
    };
    let h: i32 = h.parse().ok()?;
    let m: i32 = m.parse().ok()?;
    if !(0..=14).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    FixedOffset::east_opt(sign * (h * 3600 + m * 60))
}

/// Format an offset in seconds as `+HH:MM`.
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}

/// A local civil time pinned to a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalInstant {
    /// Wall-clock time as given.
    pub local: NaiveDateTime,
    /// Corresponding UTC instant.
    pub utc: DateTime<Utc>,
    /// UTC offset in effect, seconds east of Greenwich.
    pub offset_seconds: i32,
    /// Whether the wall-clock time occurred twice (DST fall-back).
    pub ambiguous: bool,
}

impl LocalInstant {
    /// Longitude of the zone's standard meridian implied by the offset.
    pub fn zone_meridian_deg(&self) -> f64 {
        f64::from(self.offset_seconds) / 240.0
    }
}

/// Pin a wall-clock time in `zone` to a UTC instant.
pub fn resolve_local_instant(
    local: NaiveDateTime,
    zone: &ZoneSpec,
) -> Result<LocalInstant, TimeError> {
    match zone {
        ZoneSpec::Named(tz) => pin(local, tz.from_local_datetime(&local)),
        ZoneSpec::Fixed(off) => pin(local, off.from_local_datetime(&local)),
    }
}

fn pin<Z: TimeZone>(
    local: NaiveDateTime,
    result: LocalResult<DateTime<Z>>,
) -> Result<LocalInstant, TimeError> {
    let (dt, ambiguous) = match result {
        LocalResult::Single(dt) => (dt, false),
        LocalResult::Ambiguous(earliest, _) => (earliest, true),
        LocalResult::None => return Err(TimeError::NonexistentLocalTime(local.to_string())),
    };
    let offset_seconds = dt.offset().fix().local_minus_utc();
    Ok(LocalInstant {
        local,
        utc: dt.with_timezone(&Utc),
        offset_seconds,
        ambiguous,
    })
}
