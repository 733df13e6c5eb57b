//! Validated birth input.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tianji_time::{LunarDate, ZoneSpec, lunar_to_solar, parse_date, parse_lunar_date, parse_time};

use crate::error::BaziError;

/// Gender, which selects the luck-pillar direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "男" => Ok(Self::Male),
            "female" | "f" | "女" => Ok(Self::Female),
            other => Err(BaziError::invalid(
                "gender",
                format!("'{other}' is not one of male, female"),
            )),
        }
    }
}

/// Calendar the birth date is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    #[default]
    Solar,
    Lunar,
}

impl std::str::FromStr for CalendarKind {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solar" | "gregorian" => Ok(Self::Solar),
            "lunar" => Ok(Self::Lunar),
            other => Err(BaziError::invalid(
                "calendar",
                format!("'{other}' is not one of solar, lunar"),
            )),
        }
    }
}

/// Birth date as given by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthDate {
    Solar(NaiveDate),
    Lunar(LunarDate),
}

/// A fully validated birth moment and place.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthInput {
    pub date: BirthDate,
    pub time: NaiveTime,
    pub zone: ZoneSpec,
    /// Degrees east, [-180, 180].
    pub longitude: f64,
    /// Degrees north, [-90, 90].
    pub latitude: f64,
    pub gender: Gender,
}

/// Unparsed birth fields.
#[derive(Debug, Clone, Copy)]
pub struct RawBirth<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub timezone: &'a str,
    pub longitude: f64,
    pub latitude: f64,
    pub gender: Gender,
    pub calendar: CalendarKind,
    /// Only meaningful for lunar dates.
    pub leap_month: bool,
}

pub(crate) fn check_coordinate(field: &'static str, value: f64, bound: f64) -> Result<(), BaziError> {
    if !value.is_finite() || value.abs() > bound {
        return Err(BaziError::invalid(
            field,
            format!("{value} is outside [-{bound}, {bound}]"),
        ));
    }
    Ok(())
}

impl BirthInput {
    /// Validate every field before any computation runs.
    pub fn parse(raw: &RawBirth<'_>) -> Result<Self, BaziError> {
        let date = match raw.calendar {
            CalendarKind::Solar => {
                if raw.leap_month {
                    return Err(BaziError::invalid(
                        "leap_month",
                        "only valid with the lunar calendar",
                    ));
                }
                BirthDate::Solar(parse_date(raw.date)?)
            }
            CalendarKind::Lunar => {
                let lunar = parse_lunar_date(raw.date, raw.leap_month)?;
                // Surface impossible lunar dates as validation errors now.
                lunar_to_solar(&lunar)?;
                BirthDate::Lunar(lunar)
            }
        };
        let time = parse_time(raw.time)?;
        let zone = ZoneSpec::parse(raw.timezone)?;
        check_coordinate("longitude", raw.longitude, 180.0)?;
        check_coordinate("latitude", raw.latitude, 90.0)?;

        Ok(Self {
            date,
            time,
            zone,
            longitude: raw.longitude,
            latitude: raw.latitude,
            gender: raw.gender,
        })
    }

    /// Gregorian civil date of birth.
    pub fn solar_date(&self) -> Result<NaiveDate, BaziError> {
        match &self.date {
            BirthDate::Solar(d) => Ok(*d),
            BirthDate::Lunar(l) => Ok(lunar_to_solar(l)?),
        }
    }

    /// Local civil wall-clock time of birth.
    pub fn local_datetime(&self) -> Result<NaiveDateTime, BaziError> {
        Ok(self.solar_date()?.and_time(self.time))
    }

    /// Calendar the date was supplied in.
    pub fn calendar(&self) -> CalendarKind {
        match self.date {
            BirthDate::Solar(_) => CalendarKind::Solar,
            BirthDate::Lunar(_) => CalendarKind::Lunar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<'a>(date: &'a str, time: &'a str, tz: &'a str) -> RawBirth<'a> {
        RawBirth {
            date,
            time,
            timezone: tz,
            longitude: 116.4,
            latitude: 39.9,
            gender: Gender::Male,
            calendar: CalendarKind::Solar,
            leap_month: false,
        }
    }

    #[test]
    fn parses_valid_input() {
        let b = BirthInput::parse(&raw("1990-05-15", "14:30", "Asia/Shanghai")).unwrap();
        assert_eq!(b.solar_date().unwrap(), NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        assert_eq!(b.calendar(), CalendarKind::Solar);
    }

    #[test]
    fn rejects_bad_fields_with_names() {
        let e = BirthInput::parse(&raw("1990-13-15", "14:30", "Asia/Shanghai")).unwrap_err();
        assert_eq!(e.field(), Some("birth_date"));
        let e = BirthInput::parse(&raw("1990-05-15", "25:00", "Asia/Shanghai")).unwrap_err();
        assert_eq!(e.field(), Some("birth_time"));
        let e = BirthInput::parse(&raw("1990-05-15", "14:30", "Nowhere/City")).unwrap_err();
        assert_eq!(e.field(), Some("timezone"));

        let mut r = raw("1990-05-15", "14:30", "+08:00");
        r.longitude = 181.0;
        assert_eq!(BirthInput::parse(&r).unwrap_err().field(), Some("longitude"));
        r.longitude = 100.0;
        r.latitude = f64::NAN;
        assert_eq!(BirthInput::parse(&r).unwrap_err().field(), Some("latitude"));
    }

    #[test]
    fn lunar_input_converts() {
        let mut r = raw("2024-01-01", "08:00", "Asia/Shanghai");
        r.calendar = CalendarKind::Lunar;
        let b = BirthInput::parse(&r).unwrap();
        assert_eq!(b.solar_date().unwrap(), NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }

    #[test]
    fn impossible_leap_month_is_rejected() {
        // 2024 has no leap month.
        let mut r = raw("2024-03-01", "08:00", "Asia/Shanghai");
        r.calendar = CalendarKind::Lunar;
        r.leap_month = true;
        let e = BirthInput::parse(&r).unwrap_err();
        assert!(e.is_validation());
    }

    #[test]
    fn gender_and_calendar_parse() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("x".parse::<Gender>().is_err());
        assert_eq!("lunar".parse::<CalendarKind>().unwrap(), CalendarKind::Lunar);
    }
}
