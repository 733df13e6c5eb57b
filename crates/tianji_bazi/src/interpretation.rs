//! Per-life-domain reading text from fixed templates.
//!
//! Text is selected by the day-master strength and the dominant ten-god
//! family; nothing here is computed beyond that lookup.

use serde::Serialize;
use tianji_base::TenGodFamily;

use crate::analysis::{DayMasterStrength, StrengthLevel, TenGodProfile};

/// Reading for the four life domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub dominant_family: TenGodFamily,
    pub career: String,
    pub wealth: String,
    pub relationships: String,
    pub health: String,
}

const CAREER: [&str; 5] = [
    "比劫旺：宜合伙、团队协作，自主创业需防同辈分利。",
    "食伤旺：才艺与表达突出，适合创作、技术、教学类工作。",
    "财星旺：经营意识强，适合商贸、财务、资源调度类岗位。",
    "官杀旺：重规矩与责任，适合管理、公职、纪律性强的行业。",
    "印星旺：学习与积累见长，适合研究、文教、咨询类工作。",
];

const WEALTH: [&str; 5] = [
    "比劫夺财，理财宜保守，避免借贷担保。",
    "食伤生财，凭技艺与口碑获利。",
    "财星显露，正偏财皆有来源，需量力而行。",
    "官杀护财，收入多来自职位与薪俸。",
    "印星护身，财来较缓，宜长期稳健积累。",
];

const RELATIONSHIPS: [&str; 5] = [
    "个性独立，伴侣相处宜多沟通、少争强。",
    "感情表达丰富，注意言辞分寸。",
    "重视现实条件，感情务实。",
    "责任心强，关系中易承担压力。",
    "重精神契合，易得长辈或伴侣扶持。",
];

const HEALTH_BY_STRENGTH: [&str; 3] = [
    "日主偏弱，注意作息与体力透支，宜循序调养。",
    "日主中和，体质较平稳，保持规律即可。",
    "日主偏强，注意情绪与火气，宜适度运动疏泄。",
];

const STRENGTH_PREFIX: [&str; 3] = ["身弱者宜借力而行。", "", "身强者可主动进取。"];

const fn strength_slot(level: StrengthLevel) -> usize {
    match level {
        StrengthLevel::Weak => 0,
        StrengthLevel::Balanced => 1,
        StrengthLevel::Strong => 2,
    }
}

const fn family_slot(family: TenGodFamily) -> usize {
    match family {
        TenGodFamily::Companion => 0,
        TenGodFamily::Output => 1,
        TenGodFamily::Wealth => 2,
        TenGodFamily::Officer => 3,
        TenGodFamily::Resource => 4,
    }
}

/// Build the reading for a chart.
pub fn interpret(profile: &TenGodProfile, strength: &DayMasterStrength) -> Interpretation {
    let family = profile.dominant_family();
    let f = family_slot(family);
    let s = strength_slot(strength.level);
    Interpretation {
        dominant_family: family,
        career: format!("{}{}", STRENGTH_PREFIX[s], CAREER[f]),
        wealth: WEALTH[f].to_string(),
        relationships: RELATIONSHIPS[f].to_string(),
        health: HEALTH_BY_STRENGTH[s].to_string(),
    }
}
