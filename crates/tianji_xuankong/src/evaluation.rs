//! Per-palace scoring.
//!
//! A palace score sums three parts: weighted star values (base value plus
//! timeliness against the period), the mountain/facing pair from the
//! profile's combination table, and ±2 for every fired pattern touching the
//! palace.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::EvaluationProfile;
use crate::geju::GejuResult;
use crate::palace::{self, ALL_PALACES};
use crate::period::Period;
use crate::plate::{PalaceStars, XuankongPlate};

/// Intrinsic value of stars 1..=9.
pub const STAR_BASE: [f64; 9] = [2.0, -2.0, -1.0, 1.0, -3.0, 2.0, -1.0, 3.0, 2.0];

pub const MOUNTAIN_WEIGHT: f64 = 1.0;
pub const FACING_WEIGHT: f64 = 1.2;
pub const PERIOD_WEIGHT: f64 = 0.5;

/// Score shift per fired pattern touching a palace.
pub const GEJU_EFFECT: f64 = 2.0;

/// A star's standing relative to the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum Timeliness {
    Prosperous,
    Growing,
    Approaching,
    Retreating,
    Declining,
}

impl Timeliness {
    /// Classify `star` against `period` on the 1..=9 cycle.
    pub fn of(star: u8, period: Period) -> Self {
        match (i16::from(star) - i16::from(period.number())).rem_euclid(9) {
            0 => Self::Prosperous,
            1 => Self::Growing,
            2 => Self::Approaching,
            8 => Self::Retreating,
            _ => Self::Declining,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Prosperous => "当旺",
            Self::Growing | Self::Approaching => "生气",
            Self::Retreating => "退气",
            Self::Declining => "衰死",
        }
    }

    pub const fn value(self) -> f64 {
        match self {
            Self::Prosperous => 3.0,
            Self::Growing => 2.0,
            Self::Approaching => 1.0,
            Self::Retreating => 0.0,
            Self::Declining => -1.0,
        }
    }
}

/// A scored mountain/facing star pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combination {
    /// Smaller star first.
    pub stars: (u8, u8),
    pub name: &'static str,
    pub value: f64,
}

const fn combo(a: u8, b: u8, name: &'static str, value: f64) -> Combination {
    Combination {
        stars: (a, b),
        name,
        value,
    }
}

pub const CLASSIC_COMBINATIONS: [Combination; 10] = [
    combo(1, 4, "文昌", 2.0),
    combo(1, 6, "金水相生", 1.5),
    combo(6, 8, "富贵", 2.0),
    combo(8, 9, "喜庆", 1.5),
    combo(2, 5, "病灾", -3.0),
    combo(2, 3, "斗牛煞", -2.0),
    combo(6, 7, "交剑煞", -2.0),
    combo(7, 9, "火灾", -2.0),
    combo(3, 7, "穿心煞", -1.5),
    combo(5, 9, "五九火毒", -1.5),
];

/// Bonuses halved, penalties ×1.5.
pub const CONSERVATIVE_COMBINATIONS: [Combination; 10] = [
    combo(1, 4, "文昌", 1.0),
    combo(1, 6, "金水相生", 0.75),
    combo(6, 8, "富贵", 1.0),
    combo(8, 9, "喜庆", 0.75),
    combo(2, 5, "病灾", -4.5),
    combo(2, 3, "斗牛煞", -3.0),
    combo(6, 7, "交剑煞", -3.0),
    combo(7, 9, "火灾", -3.0),
    combo(3, 7, "穿心煞", -2.25),
    combo(5, 9, "五九火毒", -2.25),
];

impl EvaluationProfile {
    pub fn combinations(self) -> &'static [Combination] {
        match self {
            Self::Classic => &CLASSIC_COMBINATIONS,
            Self::Conservative => &CONSERVATIVE_COMBINATIONS,
        }
    }

    /// Table entry for an unordered star pair.
    pub fn combination(self, a: u8, b: u8) -> Option<&'static Combination> {
        let key = (a.min(b), a.max(b));
        self.combinations().iter().find(|c| c.stars == key)
    }
}

/// Score and annotations for one palace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PalaceEvaluation {
    pub palace: u8,
    pub label: String,
    pub stars: PalaceStars,
    pub score: f64,
    pub tags: Vec<String>,
    pub reasons: Vec<String>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn star_term(star: u8, period: Period, weight: f64, layer: &str, reasons: &mut Vec<String>) -> f64 {
    let t = Timeliness::of(star, period);
    let value = (STAR_BASE[usize::from(star - 1)] + t.value()) * weight;
    reasons.push(format!("{layer}{star}{}({value:+.2})", t.name()));
    value
}

fn evaluate_palace(
    stars: PalaceStars,
    period: Period,
    geju: &GejuResult,
    profile: EvaluationProfile,
) -> PalaceEvaluation {
    let mut reasons = Vec::new();
    let mut tags = BTreeSet::new();

    let mut score = star_term(stars.mountain, period, MOUNTAIN_WEIGHT, "山星", &mut reasons)
        + star_term(stars.facing, period, FACING_WEIGHT, "向星", &mut reasons)
        + star_term(stars.period, period, PERIOD_WEIGHT, "运星", &mut reasons);

    if let Some(c) = profile.combination(stars.mountain, stars.facing) {
        score += c.value;
        tags.insert(c.name.to_string());
        reasons.push(format!("{}-{}{}({:+.2})", c.stars.0, c.stars.1, c.name, c.value));
    }

    for m in geju.matches.iter().filter(|m| m.palaces.contains(&stars.palace)) {
        let effect = if m.favorable { GEJU_EFFECT } else { -GEJU_EFFECT };
        score += effect;
        tags.insert(m.name.to_string());
        reasons.push(format!("格局{}({effect:+.2})", m.name));
    }

    if stars.mountain == period.number() {
        tags.insert("旺丁".to_string());
    }
    if stars.facing == period.number() {
        tags.insert("旺财".to_string());
    }
    if [stars.mountain, stars.facing, stars.period].contains(&5) {
        tags.insert("五黄".to_string());
    }

    PalaceEvaluation {
        palace: stars.palace,
        label: palace::label(stars.palace),
        stars,
        score: round2(score),
        tags: tags.into_iter().collect(),
        reasons,
    }
}

/// Evaluate all nine palaces. The map always holds keys 1..=9.
pub fn evaluate_plate(
    plate: &XuankongPlate,
    geju: &GejuResult,
    profile: EvaluationProfile,
) -> BTreeMap<u8, PalaceEvaluation> {
    ALL_PALACES
        .iter()
        .map(|p| {
            let stars = plate.palaces[usize::from(p - 1)];
            (*p, evaluate_palace(stars, plate.period, geju, profile))
        })
        .collect()
}
