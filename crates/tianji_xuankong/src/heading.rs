//! Compass heading input from an external heading provider.

use serde::{Deserialize, Serialize};

use crate::error::XuankongError;

/// A magnetic compass reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingMeasurement {
    /// Magnetic facing in degrees.
    pub facing_degrees: f64,
    /// Local magnetic declination, east positive.
    pub declination_degrees: f64,
    /// Provider confidence in [0, 1].
    pub quality: f64,
}

impl HeadingMeasurement {
    pub fn validate(&self) -> Result<(), XuankongError> {
        if !self.facing_degrees.is_finite() {
            return Err(XuankongError::invalid("facing_degrees", "must be a finite number"));
        }
        if !self.declination_degrees.is_finite() || self.declination_degrees.abs() > 180.0 {
            return Err(XuankongError::invalid(
                "declination_degrees",
                "must be within [-180, 180]",
            ));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(XuankongError::invalid("quality", "must be within [0, 1]"));
        }
        Ok(())
    }

    /// True facing in [0, 360).
    pub fn true_facing(&self) -> f64 {
        (self.facing_degrees + self.declination_degrees).rem_euclid(360.0)
    }

    pub fn is_low_confidence(&self, min_quality: f64) -> bool {
        self.quality < min_quality
    }
}
