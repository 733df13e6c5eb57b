//! Request types accepted by the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tianji_bazi::{BaziConfig, BirthInput, CalendarKind, Gender, RawBirth};
use tianji_time::parse_date;
use tianji_xuankong::{HeadingMeasurement, XuankongConfig};

use crate::error::EngineError;

/// A BaZi chart request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaziRequest {
    /// `YYYY-MM-DD`, solar or lunar per `calendar`.
    pub birth_date: String,
    /// `HH:MM[:SS]`
    pub birth_time: String,
    /// IANA name or fixed offset.
    pub timezone: String,
    pub longitude: f64,
    pub latitude: f64,
    pub gender: Gender,
    #[serde(default)]
    pub calendar: CalendarKind,
    #[serde(default)]
    pub leap_month: bool,
    /// Overrides the engine's `[bazi]` section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BaziConfig>,
}

impl BaziRequest {
    /// Validate into a birth input.
    pub fn to_input(&self) -> Result<BirthInput, EngineError> {
        Ok(BirthInput::parse(&RawBirth {
            date: &self.birth_date,
            time: &self.birth_time,
            timezone: &self.timezone,
            longitude: self.longitude,
            latitude: self.latitude,
            gender: self.gender,
            calendar: self.calendar,
            leap_month: self.leap_month,
        })?)
    }
}

/// How the facing of a building was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// True-north degrees.
    Degrees(f64),
    /// Magnetic compass reading.
    Heading(HeadingMeasurement),
}

/// A Xuankong plate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XuankongRequest {
    /// Completion (move-in) date `YYYY-MM-DD`.
    pub build_date: String,
    pub facing: Facing,
    /// Overrides the engine's `[xuankong]` section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<XuankongConfig>,
}

impl XuankongRequest {
    pub fn new(build_date: impl Into<String>, facing_degrees: f64) -> Self {
        Self {
            build_date: build_date.into(),
            facing: Facing::Degrees(facing_degrees),
            config: None,
        }
    }

    pub fn parse_build_date(&self) -> Result<NaiveDate, EngineError> {
        parse_date(&self.build_date).map_err(|e| EngineError::Validation {
            field: "build_date",
            reason: e.to_string(),
        })
    }
}
