//! Full Xuankong chart: plate, patterns, positions and evaluations.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::XuankongConfig;
use crate::error::XuankongError;
use crate::evaluation::{PalaceEvaluation, evaluate_plate};
use crate::geju::{GejuResult, detect_geju};
use crate::heading::HeadingMeasurement;
use crate::mountain::resolve_facing;
use crate::period::Period;
use crate::plate::{XuankongPlate, build_plate};
use crate::positions::{Position, caiwei, wenchang};
use crate::replacement::RULE_LOW_CONFIDENCE;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XuankongChart {
    pub period: Period,
    pub period_name: &'static str,
    /// `子山午向` style label.
    pub facing_label: String,
    pub plate: XuankongPlate,
    pub geju: GejuResult,
    /// Keys 1..=9.
    pub evaluations: BTreeMap<u8, PalaceEvaluation>,
    pub study_position: Position,
    pub wealth_position: Position,
    pub rules_applied: Vec<String>,
}

/// Compute the chart for a building completed on `build_date` facing
/// `facing_degrees` (true north).
pub fn compute_chart(
    build_date: NaiveDate,
    facing_degrees: f64,
    config: &XuankongConfig,
) -> Result<XuankongChart, XuankongError> {
    config.validate()?;
    let period = Period::for_year(build_date.year());
    let facing = resolve_facing(facing_degrees, config.tolerance_degrees)?;
    let plate = build_plate(period, facing, config);
    let geju = detect_geju(&plate);
    let evaluations = evaluate_plate(&plate, &geju, config.profile);

    tracing::debug!(
        period = period.number(),
        facing = %facing.label(),
        patterns = ?geju.types,
        rules = ?plate.rules_applied,
        "computed xuankong chart"
    );

    Ok(XuankongChart {
        period,
        period_name: period.name(),
        facing_label: facing.label(),
        rules_applied: plate.rules_applied.clone(),
        study_position: wenchang(period),
        wealth_position: caiwei(period),
        plate,
        geju,
        evaluations,
    })
}

/// Compute the chart from a magnetic heading measurement.
pub fn compute_chart_from_heading(
    build_date: NaiveDate,
    heading: &HeadingMeasurement,
    config: &XuankongConfig,
) -> Result<XuankongChart, XuankongError> {
    heading.validate()?;
    let mut chart = compute_chart(build_date, heading.true_facing(), config)?;
    if heading.is_low_confidence(config.min_heading_quality) {
        tracing::warn!(
            quality = heading.quality,
            min = config.min_heading_quality,
            "low-confidence heading"
        );
        chart.rules_applied.push(RULE_LOW_CONFIDENCE.to_string());
        chart.plate.rules_applied.push(RULE_LOW_CONFIDENCE.to_string());
    }
    Ok(chart)
}
