//! Chinese lunisolar calendar conversion (1900 – 2100).
//!
//! Each year is packed in one `u32`:
//! - bits 0..4: leap month number (0 = no leap month)
//! - bits 4..16: month lengths, bit `0x8000 >> (m - 1)` set = month `m` has 30 days
//! - bit 16: the leap month has 30 days
//!
//! Lunar 1900-01-01 falls on Gregorian 1900-01-31.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::TimeError;

/// First lunar year covered by the table.
pub const LUNAR_MIN_YEAR: i32 = 1900;

/// Last lunar year covered by the table.
pub const LUNAR_MAX_YEAR: i32 = 2100;

#[rustfmt::skip]
const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

const DAY_TENS: [&str; 4] = ["初", "十", "廿", "三"];

const DAY_UNITS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// A date in the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    /// Lunar year (the Gregorian year in which its first month begins).
    pub year: i32,
    /// Month 1..=12.
    pub month: u8,
    /// Day 1..=30.
    pub day: u8,
    /// Whether this is the intercalary (闰) repetition of `month`.
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u8, day: u8, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    /// Chinese label, e.g. `闰二月初五`.
    pub fn label(&self) -> String {
        let leap = if self.is_leap_month { "闰" } else { "" };
        let month = MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize];
        format!("{leap}{month}月{}", day_label(self.day))
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}年{}", self.year, self.label())
    }
}

fn day_label(day: u8) -> String {
    match day {
        10 => "初十".to_string(),
        20 => "二十".to_string(),
        30 => "三十".to_string(),
        d => format!("{}{}", DAY_TENS[(d / 10) as usize % 4], DAY_UNITS[(d % 10) as usize]),
    }
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 31).unwrap_or_default()
}

fn info(year: i32) -> u32 {
    LUNAR_INFO[(year - LUNAR_MIN_YEAR) as usize]
}

/// Table readers below index `LUNAR_INFO` directly; callers check the year first.
fn leap_of(year: i32) -> u8 {
    (info(year) & 0xf) as u8
}

/// Leap month of a lunar year (0 when none).
pub fn leap_month(year: i32) -> Result<u8, TimeError> {
    check_year(year)?;
    Ok(leap_of(year))
}

fn leap_month_days(year: i32) -> u32 {
    if leap_of(year) == 0 {
        0
    } else if info(year) & 0x10000 != 0 {
        30
    } else {
        29
    }
}

/// Days in regular month `month` of a lunar year.
fn month_days(year: i32, month: u8) -> u32 {
    if info(year) & (0x10000 >> month) != 0 { 30 } else { 29 }
}

/// Total days in a lunar year, including any leap month.
fn year_days(year: i32) -> u32 {
    (1..=12).map(|m| month_days(year, m)).sum::<u32>() + leap_month_days(year)
}

fn check_year(year: i32) -> Result<(), TimeError> {
    if (LUNAR_MIN_YEAR..=LUNAR_MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(TimeError::LunarOutOfRange(format!("lunar year {year}")))
    }
}

/// Convert a Gregorian date to the lunisolar calendar.
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, TimeError> {
    let mut offset = (date - base_date()).num_days();
    if offset < 0 || date.year() > LUNAR_MAX_YEAR {
        return Err(TimeError::LunarOutOfRange(date.to_string()));
    }

    let mut year = LUNAR_MIN_YEAR;
    while year <= LUNAR_MAX_YEAR && offset >= i64::from(year_days(year)) {
        offset -= i64::from(year_days(year));
        year += 1;
    }
    check_year(year)?;

    let leap = leap_of(year);
    let mut month = 1u8;
    let mut is_leap = false;
    loop {
        let days = if is_leap {
            leap_month_days(year)
        } else {
            month_days(year, month)
        };
        if offset < i64::from(days) {
            break;
        }
        offset -= i64::from(days);
        if leap == month && !is_leap {
            is_leap = true;
        } else {
            is_leap = false;
            month += 1;
        }
        if month > 12 {
            return Err(TimeError::LunarOutOfRange(date.to_string()));
        }
    }

    Ok(LunarDate {
        year,
        month,
        day: offset as u8 + 1,
        is_leap_month: is_leap,
    })
}

/// Convert a lunisolar date to the Gregorian calendar.
pub fn lunar_to_solar(lunar: &LunarDate) -> Result<NaiveDate, TimeError> {
    check_year(lunar.year)?;
    if !(1..=12).contains(&lunar.month) {
        return Err(TimeError::InvalidLunarDate(format!(
            "month {} out of 1..=12",
            lunar.month
        )));
    }
    let leap = leap_of(lunar.year);
    if lunar.is_leap_month && leap != lunar.month {
        return Err(TimeError::InvalidLunarDate(format!(
            "lunar year {} has no leap month {}",
            lunar.year, lunar.month
        )));
    }
    let days_in_month = if lunar.is_leap_month {
        leap_month_days(lunar.year)
    } else {
        month_days(lunar.year, lunar.month)
    };
    if lunar.day == 0 || u32::from(lunar.day) > days_in_month {
        return Err(TimeError::InvalidLunarDate(format!(
            "day {} out of 1..={days_in_month} in {}",
            lunar.day, lunar
        )));
    }

    let mut offset: i64 = (LUNAR_MIN_YEAR..lunar.year)
        .map(|y| i64::from(year_days(y)))
        .sum();
    for m in 1..lunar.month {
        offset += i64::from(month_days(lunar.year, m));
        if leap == m {
            offset += i64::from(leap_month_days(lunar.year));
        }
    }
    if lunar.is_leap_month {
        offset += i64::from(month_days(lunar.year, lunar.month));
    }
    offset += i64::from(lunar.day) - 1;

    base_date()
        .checked_add_signed(chrono::TimeDelta::days(offset))
        .ok_or_else(|| TimeError::LunarOutOfRange(lunar.to_string()))
}

/// Parse a `YYYY-MM-DD` lunar date. Day 30 is accepted in any month here;
/// whether the month actually has 30 days is checked on conversion.
pub fn parse_lunar_date(s: &str, is_leap_month: bool) -> Result<LunarDate, TimeError> {
    let bad = || TimeError::InvalidLunarDate(format!("'{s}': expected YYYY-MM-DD"));
    let mut parts = s.trim().splitn(3, '-');
    let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
    let month: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
    let day: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
    if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return Err(bad());
    }
    Ok(LunarDate::new(year, month, day, is_leap_month))
}

/// Gregorian date of Chinese New Year (正月初一) for a lunar year.
pub fn lunar_new_year(year: i32) -> Result<NaiveDate, TimeError> {
    lunar_to_solar(&LunarDate::new(year, 1, 1, false))
}
