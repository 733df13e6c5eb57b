//! The 24 solar terms (节气) and their enclosing intervals.
//!
//! Terms sit at 15° steps of apparent solar longitude. Index 0 is 立春 at
//! 315°. The twelve even-indexed terms are the month-opening "jie" (节);
//! month pillars change only at jie crossings.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::error::TimeError;
use crate::julian::{jd_from_utc, jd_ut_to_tt, utc_from_jd};
use crate::solar::{
    MEAN_DAYS_PER_DEGREE, find_longitude_crossing, normalize_360, sun_apparent_longitude,
};

/// Solar longitude of 立春, the first term of the solar year.
pub const LICHUN_LONGITUDE: f64 = 315.0;

/// Approximate solar longitude at 00:00 UTC on 1 January.
const JAN1_LONGITUDE: f64 = 280.0;

/// The 24 solar terms, starting from 立春.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum SolarTerm {
    LiChun,
    YuShui,
    JingZhe,
    ChunFen,
    QingMing,
    GuYu,
    LiXia,
    XiaoMan,
    MangZhong,
    XiaZhi,
    XiaoShu,
    DaShu,
    LiQiu,
    ChuShu,
    BaiLu,
    QiuFen,
    HanLu,
    ShuangJiang,
    LiDong,
    XiaoXue,
    DaXue,
    DongZhi,
    XiaoHan,
    DaHan,
}

/// All 24 solar terms in order (index 0 = 立春).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::LiChun,
    SolarTerm::YuShui,
    SolarTerm::JingZhe,
    SolarTerm::ChunFen,
    SolarTerm::QingMing,
    SolarTerm::GuYu,
    SolarTerm::LiXia,
    SolarTerm::XiaoMan,
    SolarTerm::MangZhong,
    SolarTerm::XiaZhi,
    SolarTerm::XiaoShu,
    SolarTerm::DaShu,
    SolarTerm::LiQiu,
    SolarTerm::ChuShu,
    SolarTerm::BaiLu,
    SolarTerm::QiuFen,
    SolarTerm::HanLu,
    SolarTerm::ShuangJiang,
    SolarTerm::LiDong,
    SolarTerm::XiaoXue,
    SolarTerm::DaXue,
    SolarTerm::DongZhi,
    SolarTerm::XiaoHan,
    SolarTerm::DaHan,
];

const SOLAR_TERM_NAMES: [&str; 24] = [
    "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑",
    "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒",
];

impl SolarTerm {
    /// 0-based index (立春 = 0 .. 大寒 = 23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Term from a raw index; wraps modulo 24.
    pub fn from_index(i: u8) -> Self {
        ALL_SOLAR_TERMS[(i % 24) as usize]
    }

    /// Chinese name.
    pub fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self.index() as usize]
    }

    /// Apparent solar longitude at which the term begins.
    pub fn longitude(self) -> f64 {
        normalize_360(LICHUN_LONGITUDE + 15.0 * f64::from(self.index()))
    }

    /// Whether this is a month-opening term (节) rather than a mid-month one (气).
    pub fn is_jie(self) -> bool {
        self.index() % 2 == 0
    }

    /// The term in effect at a given solar longitude.
    pub fn from_longitude(lon_deg: f64) -> Self {
        let offset = normalize_360(lon_deg - LICHUN_LONGITUDE);
        Self::from_index(((offset / 15.0).floor() as u8).min(23))
    }
}

/// A solar-term interval bounded by two UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermSpan {
    /// Term in effect during the span.
    pub term: SolarTerm,
    /// Instant the term began.
    pub start: DateTime<Utc>,
    /// Instant the following term begins.
    pub end: DateTime<Utc>,
}

/// A solar month: the interval between two consecutive jie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JieSpan {
    /// 0-based solar month (0 = 寅月 opened by 立春 .. 11 = 丑月 opened by 小寒).
    pub month_index: u8,
    /// Jie that opened the month.
    pub opening: SolarTerm,
    /// Jie that closes the month.
    pub closing: SolarTerm,
    /// Instant of the opening jie.
    pub start: DateTime<Utc>,
    /// Instant of the closing jie.
    pub end: DateTime<Utc>,
}

impl JieSpan {
    /// Days elapsed since the opening jie.
    pub fn days_since_start(&self, utc: &DateTime<Utc>) -> f64 {
        (*utc - self.start).num_milliseconds() as f64 / 86_400_000.0
    }

    /// Days remaining until the closing jie.
    pub fn days_until_end(&self, utc: &DateTime<Utc>) -> f64 {
        (self.end - *utc).num_milliseconds() as f64 / 86_400_000.0
    }
}

fn crossing_utc(jd_guess: f64, target: f64) -> Result<DateTime<Utc>, TimeError> {
    let jd = find_longitude_crossing(jd_guess, target)?;
    utc_from_jd(jd).ok_or(TimeError::NoConvergence("solar term outside representable range"))
}

/// Bracket `utc` by the two crossings `step_deg` apart that enclose it.
///
/// Returns `(bucket, start, end)` where `bucket` counts `step_deg` steps from
/// 立春.
fn bracket(
    utc: &DateTime<Utc>,
    step_deg: f64,
) -> Result<(u8, DateTime<Utc>, DateTime<Utc>), TimeError> {
    let jd = jd_from_utc(utc);
    let lon = sun_apparent_longitude(jd_ut_to_tt(jd));
    let offset = normalize_360(lon - LICHUN_LONGITUDE);
    let buckets = (360.0 / step_deg) as u8;
    let bucket = ((offset / step_deg).floor() as u8).min(buckets - 1);
    let start_lon = LICHUN_LONGITUDE + step_deg * f64::from(bucket);
    let guess = jd - (offset - step_deg * f64::from(bucket)) * MEAN_DAYS_PER_DEGREE;
    let start = crossing_utc(guess, start_lon)?;
    let end = crossing_utc(guess + step_deg * MEAN_DAYS_PER_DEGREE, start_lon + step_deg)?;
    Ok((bucket, start, end))
}

/// The 15° solar-term interval containing `utc`.
pub fn term_span_at(utc: &DateTime<Utc>) -> Result<TermSpan, TimeError> {
    let (bucket, start, end) = bracket(utc, 15.0)?;
    Ok(TermSpan {
        term: SolarTerm::from_index(bucket),
        start,
        end,
    })
}

/// The solar month (jie to jie) containing `utc`.
pub fn jie_span_at(utc: &DateTime<Utc>) -> Result<JieSpan, TimeError> {
    let (month_index, start, end) = bracket(utc, 30.0)?;
    Ok(JieSpan {
        month_index,
        opening: SolarTerm::from_index(month_index * 2),
        closing: SolarTerm::from_index(month_index * 2 + 2),
        start,
        end,
    })
}

/// Instant of `term` within Gregorian year `year`.
pub fn term_instant(year: i32, term: SolarTerm) -> Result<DateTime<Utc>, TimeError> {
    let jan1 = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or(TimeError::NoConvergence("year outside representable range"))?;
    let days = normalize_360(term.longitude() - JAN1_LONGITUDE) * MEAN_DAYS_PER_DEGREE;
    let found = crossing_utc(jd_from_utc(&jan1) + days, term.longitude())?;
    if found.year() != year {
        return Err(TimeError::NoConvergence("solar term fell outside the requested year"));
    }
    Ok(found)
}
