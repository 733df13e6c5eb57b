//! Xuankong flying-star (玄空飞星) plates.
//!
//! This crate provides:
//! - The nine 20-year periods and the 24-mountain compass
//! - Plate construction with combined-direction and 伏吟 replacement rules
//! - Pattern (格局) detection and the 文昌/财 positions
//! - Per-palace scoring under selectable profiles
//!
//! All tables are constant data; every computation is pure.

pub mod chart;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod geju;
pub mod heading;
pub mod mountain;
pub mod palace;
pub mod period;
pub mod plate;
pub mod positions;
pub mod replacement;

pub use chart::{XuankongChart, compute_chart, compute_chart_from_heading};
pub use config::{EvaluationProfile, XuankongConfig};
pub use error::XuankongError;
pub use evaluation::{
    CLASSIC_COMBINATIONS, CONSERVATIVE_COMBINATIONS, Combination, PalaceEvaluation, STAR_BASE,
    Timeliness, evaluate_plate,
};
pub use geju::{ALL_GEJU, GejuKind, GejuMatch, GejuResult, detect_geju};
pub use heading::HeadingMeasurement;
pub use mountain::{ALL_MOUNTAINS, FacingResolution, Mountain, YuanLong, resolve_facing};
pub use palace::{ALL_PALACES, Flight, fly};
pub use period::Period;
pub use plate::{PalaceStars, StarLayer, XuankongPlate, build_plate};
pub use positions::{Position, caiwei, wenchang};
pub use replacement::replacement_star;
