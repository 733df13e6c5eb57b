//! Plate configuration.

use serde::{Deserialize, Serialize};

use crate::error::XuankongError;
use crate::mountain::MAX_TOLERANCE_DEG;

/// Which combination table palace evaluation uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationProfile {
    #[default]
    Classic,
    /// Halved bonuses, penalties weighted 1.5×.
    Conservative,
}

/// Options for one plate computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XuankongConfig {
    /// Degrees from a sector boundary that count as 兼向.
    pub tolerance_degrees: f64,
    pub replace_on_combined_direction: bool,
    pub replace_on_fuyin: bool,
    /// Re-fly both layers when the facing palace's mountain and facing stars sum to 10.
    pub replace_on_facing_he_shi: bool,
    pub profile: EvaluationProfile,
    /// Heading quality below this adds a low-confidence audit entry.
    pub min_heading_quality: f64,
}

impl Default for XuankongConfig {
    fn default() -> Self {
        Self {
            tolerance_degrees: 3.0,
            replace_on_combined_direction: false,
            replace_on_fuyin: false,
            replace_on_facing_he_shi: false,
            profile: EvaluationProfile::default(),
            min_heading_quality: 0.5,
        }
    }
}

impl XuankongConfig {
    pub fn validate(&self) -> Result<(), XuankongError> {
        if !(0.0..=MAX_TOLERANCE_DEG).contains(&self.tolerance_degrees) {
            return Err(XuankongError::invalid(
                "tolerance_degrees",
                format!("{} is outside [0, {MAX_TOLERANCE_DEG}]", self.tolerance_degrees),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_heading_quality) {
            return Err(XuankongError::invalid(
                "min_heading_quality",
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}
