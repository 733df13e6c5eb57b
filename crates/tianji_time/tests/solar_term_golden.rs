//! Golden-value tests for solar-term instants and lunar conversion.
//!
//! Reference instants are from the Purple Mountain Observatory almanac
//! (Beijing time, converted to UTC). The low-precision solar theory is
//! expected to land within 30 minutes.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tianji_time::{
    LunarDate, SolarTerm, jie_span_at, lunar_to_solar, solar_to_lunar, term_instant,
};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn assert_close(actual: DateTime<Utc>, expected: DateTime<Utc>, label: &str) {
    let minutes = (actual - expected).num_seconds() as f64 / 60.0;
    assert!(
        minutes.abs() < 30.0,
        "{label}: expected {expected}, got {actual} ({minutes:.1} min)"
    );
}

/// 1990 立春: 1990-02-04 10:14 CST.
#[test]
fn lichun_1990() {
    let t = term_instant(1990, SolarTerm::LiChun).unwrap();
    assert_close(t, utc(1990, 2, 4, 2, 14), "立春 1990");
}

/// 2023 冬至: 2023-12-22 11:27 CST.
#[test]
fn dongzhi_2023() {
    let t = term_instant(2023, SolarTerm::DongZhi).unwrap();
    assert_close(t, utc(2023, 12, 22, 3, 27), "冬至 2023");
}

/// 2024 夏至: 2024-06-21 04:51 CST.
#[test]
fn xiazhi_2024() {
    let t = term_instant(2024, SolarTerm::XiaZhi).unwrap();
    assert_close(t, utc(2024, 6, 20, 20, 51), "夏至 2024");
}

/// 2024 清明: 2024-04-04 15:02 CST.
#[test]
fn qingming_2024() {
    let t = term_instant(2024, SolarTerm::QingMing).unwrap();
    assert_close(t, utc(2024, 4, 4, 7, 2), "清明 2024");
}

/// The solar months of a year tile it without gaps.
#[test]
fn jie_spans_are_contiguous() {
    let mut cursor = utc(2024, 2, 10, 0, 0);
    let mut prev_end: Option<DateTime<Utc>> = None;
    for _ in 0..12 {
        let span = jie_span_at(&cursor).unwrap();
        if let Some(end) = prev_end {
            let gap = (span.start - end).num_seconds().abs();
            assert!(gap < 2, "gap of {gap}s between solar months");
        }
        prev_end = Some(span.end);
        cursor = span.end + chrono::TimeDelta::days(1);
    }
}

#[test]
fn jie_span_right_after_lichun() {
    let span = jie_span_at(&utc(2024, 2, 4, 12, 0)).unwrap();
    assert_eq!(span.month_index, 0);
    assert_eq!(span.opening, SolarTerm::LiChun);
}

#[test]
fn jie_span_right_before_lichun() {
    let span = jie_span_at(&utc(2024, 2, 4, 4, 0)).unwrap();
    assert_eq!(span.month_index, 11);
    assert_eq!(span.closing, SolarTerm::LiChun);
}

#[test]
fn lunar_round_trip_over_a_decade() {
    let mut d = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    while d < end {
        let lunar = solar_to_lunar(d).unwrap();
        assert_eq!(lunar_to_solar(&lunar).unwrap(), d, "round trip of {d}");
        d += chrono::TimeDelta::days(7);
    }
}

#[test]
fn mid_autumn_2024() {
    let d = lunar_to_solar(&LunarDate::new(2024, 8, 15, false)).unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 9, 17).unwrap());
}
