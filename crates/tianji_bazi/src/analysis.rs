//! Five-element tally, ten-god profile, day-master strength and the
//! favorable/unfavorable element summary.
//!
//! Every count is produced from one weighted stem list, built once per
//! [`WeightingPolicy`]:
//!
//! | policy     | visible stem | main qi | middle qi | residual qi |
//! |------------|--------------|---------|-----------|-------------|
//! | `Standard` | 1            | 1       | 1         | 1           |
//! | `Surface`  | 1            | 1       | 0         | 0           |
//! | `QiGraded` | 3            | 3       | 2         | 1           |
//!
//! Under `Surface` each branch contributes its main element only.

use std::collections::BTreeMap;

use serde::Serialize;
use tianji_base::{
    ALL_ELEMENTS, ALL_TEN_GOD_FAMILIES, ALL_TEN_GODS, Element, ElementRelation, QiRank, Stem,
    TenGod, TenGodFamily,
};

use crate::config::WeightingPolicy;
use crate::pillars::{FourPillars, PillarPosition};

/// Support ratio below which the day master is weak.
pub const WEAK_THRESHOLD: f64 = 0.40;

/// Support ratio above which the day master is strong.
pub const STRONG_THRESHOLD: f64 = 0.55;

/// Month command (月令) adjustment when the month supports the day master.
pub const MONTH_SUPPORT_BONUS: f64 = 0.10;

/// Month command adjustment when the month drains or opposes it.
pub const MONTH_OPPOSE_PENALTY: f64 = 0.05;

/// Where a counted stem sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StemSource {
    Visible,
    Hidden(QiRank),
}

/// A stem with the weight the active policy gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightedStem {
    pub position: PillarPosition,
    pub source: StemSource,
    pub stem: Stem,
    pub weight: u32,
}

const fn weight_for(policy: WeightingPolicy, source: StemSource) -> u32 {
    match (policy, source) {
        (WeightingPolicy::Standard, _) => 1,
        (WeightingPolicy::Surface, StemSource::Visible) => 1,
        (WeightingPolicy::Surface, StemSource::Hidden(QiRank::Main)) => 1,
        (WeightingPolicy::Surface, StemSource::Hidden(_)) => 0,
        (WeightingPolicy::QiGraded, StemSource::Visible) => 3,
        (WeightingPolicy::QiGraded, StemSource::Hidden(QiRank::Main)) => 3,
        (WeightingPolicy::QiGraded, StemSource::Hidden(QiRank::Middle)) => 2,
        (WeightingPolicy::QiGraded, StemSource::Hidden(QiRank::Residual)) => 1,
    }
}

/// Every stem of the chart with its weight; zero-weight entries are dropped.
pub fn weighted_stems(pillars: &FourPillars, policy: WeightingPolicy) -> Vec<WeightedStem> {
    let mut out = Vec::with_capacity(16);
    for (position, pillar) in pillars.iter() {
        let visible = StemSource::Visible;
        out.push(WeightedStem {
            position,
            source: visible,
            stem: pillar.stem,
            weight: weight_for(policy, visible),
        });
        for (stem, rank) in pillar.branch.ranked_hidden_stems() {
            let source = StemSource::Hidden(rank);
            let weight = weight_for(policy, source);
            if weight > 0 {
                out.push(WeightedStem {
                    position,
                    source,
                    stem,
                    weight,
                });
            }
        }
    }
    out
}

/// Weighted element counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementTally {
    pub policy: WeightingPolicy,
    pub counts: BTreeMap<Element, u32>,
    /// Sum of all weights; equals the sum of `counts`.
    pub total: u32,
    /// Elements with the highest count.
    pub dominant: Vec<Element>,
    /// Elements with a zero count.
    pub lacking: Vec<Element>,
}

impl ElementTally {
    pub fn count(&self, element: Element) -> u32 {
        self.counts.get(&element).copied().unwrap_or(0)
    }
}

/// Tally elements across visible and hidden stems.
pub fn tally_elements(pillars: &FourPillars, policy: WeightingPolicy) -> ElementTally {
    let mut counts: BTreeMap<Element, u32> = ALL_ELEMENTS.iter().map(|e| (*e, 0)).collect();
    for ws in weighted_stems(pillars, policy) {
        *counts.entry(ws.stem.element()).or_insert(0) += ws.weight;
    }
    let total = counts.values().sum();
    let max = counts.values().copied().max().unwrap_or(0);
    let dominant = counts
        .iter()
        .filter(|(_, c)| **c == max && max > 0)
        .map(|(e, _)| *e)
        .collect();
    let lacking = counts
        .iter()
        .filter(|(_, c)| **c == 0)
        .map(|(e, _)| *e)
        .collect();
    ElementTally {
        policy,
        counts,
        total,
        dominant,
        lacking,
    }
}

/// One labelled stem in the ten-god profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenGodEntry {
    pub position: PillarPosition,
    pub source: StemSource,
    pub stem: Stem,
    pub god: TenGod,
    pub weight: u32,
}

/// Ten-god labels relative to the day master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenGodProfile {
    pub day_master: Stem,
    pub entries: Vec<TenGodEntry>,
    /// Weighted count per category; all ten are present.
    pub counts: BTreeMap<TenGod, u32>,
    /// Sum of the weights of every labelled stem.
    pub stems_analyzed: u32,
}

impl TenGodProfile {
    /// Weighted count per family.
    pub fn family_counts(&self) -> BTreeMap<TenGodFamily, u32> {
        let mut out: BTreeMap<TenGodFamily, u32> =
            ALL_TEN_GOD_FAMILIES.iter().map(|f| (*f, 0)).collect();
        for (god, count) in &self.counts {
            *out.entry(god.family()).or_insert(0) += count;
        }
        out
    }

    /// Family with the largest weighted count; ties go to table order.
    pub fn dominant_family(&self) -> TenGodFamily {
        let counts = self.family_counts();
        let mut best = TenGodFamily::Companion;
        let mut best_count = 0;
        for family in ALL_TEN_GOD_FAMILIES {
            let c = counts.get(&family).copied().unwrap_or(0);
            if c > best_count {
                best = family;
                best_count = c;
            }
        }
        best
    }
}

/// Label every stem except the day master itself.
pub fn ten_god_profile(pillars: &FourPillars, policy: WeightingPolicy) -> TenGodProfile {
    let dm = pillars.day_master();
    let mut counts: BTreeMap<TenGod, u32> = ALL_TEN_GODS.iter().map(|g| (*g, 0)).collect();
    let mut entries = Vec::with_capacity(16);
    let mut stems_analyzed = 0;
    for ws in weighted_stems(pillars, policy) {
        if ws.position == PillarPosition::Day && ws.source == StemSource::Visible {
            continue;
        }
        let god = TenGod::between(dm, ws.stem);
        *counts.entry(god).or_insert(0) += ws.weight;
        stems_analyzed += ws.weight;
        entries.push(TenGodEntry {
            position: ws.position,
            source: ws.source,
            stem: ws.stem,
            god,
            weight: ws.weight,
        });
    }
    TenGodProfile {
        day_master: dm,
        entries,
        counts,
        stems_analyzed,
    }
}

/// Day-master strength class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Weak,
    Balanced,
    Strong,
}

impl StrengthLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Weak => "身弱",
            Self::Balanced => "中和",
            Self::Strong => "身强",
        }
    }
}

/// Day-master strength with the numbers behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayMasterStrength {
    pub level: StrengthLevel,
    /// Weight of same and resource elements over the tally total.
    pub support_ratio: f64,
    /// Month-command adjustment applied to the ratio.
    pub month_adjustment: f64,
    /// Ratio after adjustment, clamped to [0, 1].
    pub score: f64,
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Classify the day master from the tally and the month branch.
pub fn day_master_strength(pillars: &FourPillars, tally: &ElementTally) -> DayMasterStrength {
    let dm = pillars.day_master().element();
    let support = tally.count(dm) + tally.count(dm.generated_by());
    let support_ratio = if tally.total == 0 {
        0.0
    } else {
        f64::from(support) / f64::from(tally.total)
    };
    let month_element = pillars.month.branch.main_stem().element();
    let month_adjustment = match dm.relation_to(month_element) {
        ElementRelation::Same | ElementRelation::GeneratedBy => MONTH_SUPPORT_BONUS,
        _ => -MONTH_OPPOSE_PENALTY,
    };
    let score = (support_ratio + month_adjustment).clamp(0.0, 1.0);
    let level = if score < WEAK_THRESHOLD {
        StrengthLevel::Weak
    } else if score > STRONG_THRESHOLD {
        StrengthLevel::Strong
    } else {
        StrengthLevel::Balanced
    };
    DayMasterStrength {
        level,
        support_ratio: round4(support_ratio),
        month_adjustment,
        score: round4(score),
    }
}

/// Favorable (喜用) and unfavorable (忌) elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementBalance {
    pub favorable: Vec<Element>,
    pub unfavorable: Vec<Element>,
}

/// Summarize which elements help the chart.
///
/// A strong day master wants output, wealth and officer; a weak one wants
/// resource and companions; a balanced chart wants what it lacks.
pub fn element_balance(
    pillars: &FourPillars,
    tally: &ElementTally,
    strength: &DayMasterStrength,
) -> ElementBalance {
    let dm = pillars.day_master().element();
    let drain = vec![dm.generates(), dm.controls(), dm.controlled_by()];
    let support = vec![dm, dm.generated_by()];
    let (favorable, unfavorable) = match strength.level {
        StrengthLevel::Strong => (drain, support),
        StrengthLevel::Weak => (support, drain),
        StrengthLevel::Balanced => {
            let favorable = if tally.lacking.is_empty() {
                vec![dm.generates()]
            } else {
                tally.lacking.clone()
            };
            let unfavorable = tally
                .dominant
                .iter()
                .copied()
                .filter(|e| !favorable.contains(e))
                .collect();
            (favorable, unfavorable)
        }
    };
    ElementBalance {
        favorable,
        unfavorable,
    }
}
