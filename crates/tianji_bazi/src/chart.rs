//! Whole-chart orchestration: resolve, compute pillars, then run the
//! independent analyses.

use serde::Serialize;

use crate::analysis::{
    DayMasterStrength, ElementBalance, ElementTally, TenGodProfile, day_master_strength,
    element_balance, tally_elements, ten_god_profile,
};
use crate::boundary::BoundaryMarkers;
use crate::config::BaziConfig;
use crate::dayun::{LuckPillars, luck_pillars};
use crate::error::BaziError;
use crate::input::BirthInput;
use crate::interpretation::{Interpretation, interpret};
use crate::pillars::{FourPillars, four_pillars};
use crate::resolver::{ResolvedBirth, resolve};

/// A complete four-pillar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaziChart {
    pub pillars: FourPillars,
    pub elements: ElementTally,
    pub ten_gods: TenGodProfile,
    pub strength: DayMasterStrength,
    pub balance: Option<ElementBalance>,
    pub luck: Option<LuckPillars>,
    pub interpretation: Option<Interpretation>,
    /// Name of the solar term in effect at birth.
    pub solar_term: &'static str,
    /// Label describing how the 子 hour touched the day pillar.
    pub day_boundary: &'static str,
    /// Chinese lunar date of the civil birth date, when available.
    pub lunar_date: Option<String>,
    pub markers: BoundaryMarkers,
    pub birth: ResolvedBirth,
}

/// Compute a full chart. Either every requested part is produced or an
/// error is returned.
pub fn compute_chart(input: &BirthInput, config: &BaziConfig) -> Result<BaziChart, BaziError> {
    config.validate()?;
    let birth = resolve(input, config)?;
    let pillars = four_pillars(&birth, config)?;

    let elements = tally_elements(&pillars, config.weighting);
    let ten_gods = ten_god_profile(&pillars, config.weighting);
    let strength = day_master_strength(&pillars, &elements);
    let balance = config
        .include_balance
        .then(|| element_balance(&pillars, &elements, &strength));
    let luck = if config.include_luck_pillars {
        Some(luck_pillars(&pillars, &birth, input.gender, config)?)
    } else {
        None
    };
    let interpretation = config
        .include_interpretation
        .then(|| interpret(&ten_gods, &strength));

    tracing::debug!(
        pillars = %pillars.summary(),
        strength = strength.level.name(),
        uncertainty = ?birth.markers.uncertainty_level,
        "chart computed"
    );

    Ok(BaziChart {
        solar_term: birth.term.term.name(),
        day_boundary: pillars.day_boundary.label(),
        lunar_date: birth.lunar_date.map(|l| l.to_string()),
        markers: birth.markers.clone(),
        pillars,
        elements,
        ten_gods,
        strength,
        balance,
        luck,
        interpretation,
        birth,
    })
}
