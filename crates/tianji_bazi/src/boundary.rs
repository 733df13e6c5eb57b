//! Non-fatal annotations for births near a pillar boundary.

use serde::{Deserialize, Serialize};

/// How far a chart could shift under small errors in the birth data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// How the 子 hour touched the day pillar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    /// Birth outside 23:00–24:00; the calendar date is the pillar date.
    #[default]
    None,
    /// 23:00–24:00 birth counted as the next day.
    RolledOver,
    /// 23:00–24:00 birth kept on the calendar date (晚子时).
    LateZiSplit,
}

impl DayBoundary {
    /// Label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "无",
            Self::RolledOver => "子时换日",
            Self::LateZiSplit => "晚子时",
        }
    }
}

/// Boundary flags and notes attached to every chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryMarkers {
    pub is_day_boundary: bool,
    pub is_month_boundary: bool,
    pub true_solar_time_used: bool,
    pub uncertainty_level: UncertaintyLevel,
    pub notes: Vec<String>,
}

impl BoundaryMarkers {
    /// Raise the uncertainty level (never lowers it) and record why.
    pub fn raise(&mut self, level: UncertaintyLevel, note: impl Into<String>) {
        self.uncertainty_level = self.uncertainty_level.max(level);
        self.notes.push(note.into());
    }

    /// Record a note without touching the level.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}
