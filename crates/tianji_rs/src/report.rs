//! Serializable reports returned by the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tianji_bazi::{
    BaziChart, BoundaryMarkers, DayMasterStrength, ElementBalance, ElementTally, FourPillars,
    Interpretation, LuckPillars, TenGodProfile,
};
use tianji_xuankong::{GejuResult, PalaceEvaluation, Period, XuankongChart, XuankongPlate};

/// Version of the computation rules. Bumped whenever a table or algorithm
/// change can alter output for the same input.
pub const ALGORITHM_VERSION: &str = "1.0.0";

/// Version of the report layout.
pub const SCHEMA_VERSION: &str = "1";

/// Provenance carried by every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    pub algorithm_version: &'static str,
    pub schema_version: &'static str,
    /// SHA-256 of the canonical request.
    pub content_hash: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportMeta {
    pub fn new(content_hash: String) -> Self {
        Self {
            algorithm_version: ALGORITHM_VERSION,
            schema_version: SCHEMA_VERSION,
            content_hash,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaziReport {
    pub pillars: FourPillars,
    pub elements: ElementTally,
    pub ten_gods: TenGodProfile,
    pub strength: DayMasterStrength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luck_pillars: Option<LuckPillars>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<ElementBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Interpretation>,
    pub true_solar_time_used: bool,
    /// Local apparent solar time the day and hour pillars were reckoned in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_solar_time: Option<NaiveDateTime>,
    pub day_boundary: &'static str,
    pub solar_term: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunar_date: Option<String>,
    pub markers: BoundaryMarkers,
    #[serde(flatten)]
    pub meta: ReportMeta,
}

impl BaziReport {
    pub fn from_chart(chart: BaziChart, content_hash: String) -> Self {
        let true_solar_time = chart.birth.solar_time.map(|s| s.apparent_solar);
        Self {
            pillars: chart.pillars,
            elements: chart.elements,
            ten_gods: chart.ten_gods,
            strength: chart.strength,
            luck_pillars: chart.luck,
            balance: chart.balance,
            interpretation: chart.interpretation,
            true_solar_time_used: chart.markers.true_solar_time_used,
            true_solar_time,
            day_boundary: chart.day_boundary,
            solar_term: chart.solar_term,
            lunar_date: chart.lunar_date,
            markers: chart.markers,
            meta: ReportMeta::new(content_hash),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XuankongReport {
    pub period: Period,
    pub period_name: &'static str,
    pub facing_label: String,
    pub plate: XuankongPlate,
    pub evaluations: BTreeMap<u8, PalaceEvaluation>,
    pub geju: GejuResult,
    /// 文昌位
    pub study_position: String,
    /// 财位
    pub wealth_position: String,
    pub rules_applied: Vec<String>,
    #[serde(flatten)]
    pub meta: ReportMeta,
}

impl XuankongReport {
    pub fn from_chart(chart: XuankongChart, content_hash: String) -> Self {
        Self {
            period: chart.period,
            period_name: chart.period_name,
            facing_label: chart.facing_label,
            plate: chart.plate,
            evaluations: chart.evaluations,
            geju: chart.geju,
            study_position: chart.study_position.label,
            wealth_position: chart.wealth_position.label,
            rules_applied: chart.rules_applied,
            meta: ReportMeta::new(content_hash),
        }
    }
}
