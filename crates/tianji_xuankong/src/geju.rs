//! Pattern (格局) detection.
//!
//! Every pattern is a predicate over the plate. All predicates run; every
//! one that fires is reported together with the palaces it concerns.

use serde::Serialize;

use crate::palace::{ALL_PALACES, Flight, fly};
use crate::plate::XuankongPlate;

/// The recognised patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[allow(missing_docs)]
pub enum GejuKind {
    WangShanWangXiang,
    ShangShanXiaShui,
    ShuangXingHuiXiang,
    ShuangXingHuiZuo,
    QuanJuHeShi,
    FuMuSanBan,
    LianZhuSanBan,
    FuYin,
    FanYin,
}

/// All patterns in evaluation order.
pub const ALL_GEJU: [GejuKind; 9] = [
    GejuKind::WangShanWangXiang,
    GejuKind::ShangShanXiaShui,
    GejuKind::ShuangXingHuiXiang,
    GejuKind::ShuangXingHuiZuo,
    GejuKind::QuanJuHeShi,
    GejuKind::FuMuSanBan,
    GejuKind::LianZhuSanBan,
    GejuKind::FuYin,
    GejuKind::FanYin,
];

struct GejuInfo {
    name: &'static str,
    favorable: bool,
    description: &'static str,
}

const GEJU_TABLE: [GejuInfo; 9] = [
    GejuInfo {
        name: "旺山旺向",
        favorable: true,
        description: "山星当令到坐，向星当令到向，丁财两旺",
    },
    GejuInfo {
        name: "上山下水",
        favorable: false,
        description: "山星当令到向，向星当令到坐，损丁破财",
    },
    GejuInfo {
        name: "双星会向",
        favorable: true,
        description: "山向当令双星同到向首，利财，宜向方见山见水",
    },
    GejuInfo {
        name: "双星会坐",
        favorable: false,
        description: "山向当令双星同到坐山，向方失令，财运受阻",
    },
    GejuInfo {
        name: "全局合十",
        favorable: true,
        description: "九宫山星或向星与运星合十，气运通达",
    },
    GejuInfo {
        name: "父母三般卦",
        favorable: true,
        description: "九宫运山向三星同属一四七、二五八或三六九",
    },
    GejuInfo {
        name: "连珠三般卦",
        favorable: true,
        description: "九宫运山向三星连珠相续",
    },
    GejuInfo {
        name: "伏吟",
        favorable: false,
        description: "星曜各回本宫，主停滞反复",
    },
    GejuInfo {
        name: "反吟",
        favorable: false,
        description: "星曜各居对宫，主冲突动荡",
    },
];

impl GejuKind {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        GEJU_TABLE[self.index() as usize].name
    }

    pub fn is_favorable(self) -> bool {
        GEJU_TABLE[self.index() as usize].favorable
    }

    pub fn description(self) -> &'static str {
        GEJU_TABLE[self.index() as usize].description
    }

    /// Palaces the pattern touches, or `None` when it does not fire.
    pub fn detect(self, plate: &XuankongPlate) -> Option<Vec<u8>> {
        let p = plate.period.number();
        let f = plate.facing_palace();
        let s = plate.sitting_palace();
        let star = |palace: u8| plate.palaces[usize::from(palace - 1)];
        let fired = match self {
            Self::WangShanWangXiang => star(s).mountain == p && star(f).facing == p,
            Self::ShangShanXiaShui => star(f).mountain == p && star(s).facing == p,
            Self::ShuangXingHuiXiang => star(f).mountain == p && star(f).facing == p,
            Self::ShuangXingHuiZuo => star(s).mountain == p && star(s).facing == p,
            Self::QuanJuHeShi => {
                plate.palaces.iter().all(|x| x.mountain + x.period == 10)
                    || plate.palaces.iter().all(|x| x.facing + x.period == 10)
            }
            Self::FuMuSanBan => plate
                .palaces
                .iter()
                .all(|x| x.mountain % 3 == x.period % 3 && x.facing % 3 == x.period % 3),
            Self::LianZhuSanBan => plate
                .palaces
                .iter()
                .all(|x| is_consecutive([x.period, x.mountain, x.facing])),
            Self::FuYin => is_layer(plate, Flight::Forward),
            Self::FanYin => is_layer(plate, Flight::Reverse),
        };
        if !fired {
            return None;
        }
        Some(match self {
            Self::WangShanWangXiang | Self::ShangShanXiaShui => {
                let mut v = vec![s, f];
                v.sort_unstable();
                v
            }
            Self::ShuangXingHuiXiang => vec![f],
            Self::ShuangXingHuiZuo => vec![s],
            _ => ALL_PALACES.to_vec(),
        })
    }
}

/// Either star layer equals 5 flown in `flight`.
fn is_layer(plate: &XuankongPlate, flight: Flight) -> bool {
    let target = fly(5, flight);
    plate.mountain_stars() == target || plate.facing_stars() == target
}

/// Three distinct stars forming a run on the 1..=9 cycle (9 wraps to 1).
fn is_consecutive(stars: [u8; 3]) -> bool {
    let mut s = stars.map(|x| x - 1);
    s.sort_unstable();
    let [a, b, c] = s;
    if a == b || b == c {
        return false;
    }
    // One of the three rotations must read x, x+1, x+2 (mod 9).
    [(a, b, c), (b, c, a), (c, a, b)]
        .iter()
        .any(|&(x, y, z)| (x + 1) % 9 == y && (y + 1) % 9 == z)
}

/// One fired pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GejuMatch {
    pub kind: GejuKind,
    pub name: &'static str,
    pub favorable: bool,
    pub palaces: Vec<u8>,
}

/// All fired patterns and the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GejuResult {
    /// Names of the fired patterns.
    pub types: Vec<&'static str>,
    pub descriptions: Vec<&'static str>,
    pub matches: Vec<GejuMatch>,
    /// More favorable than unfavorable patterns fired.
    pub favorable: bool,
}

impl GejuResult {
    pub fn contains(&self, kind: GejuKind) -> bool {
        self.matches.iter().any(|m| m.kind == kind)
    }

    pub fn favorable_count(&self) -> usize {
        self.matches.iter().filter(|m| m.favorable).count()
    }

    pub fn unfavorable_count(&self) -> usize {
        self.matches.len() - self.favorable_count()
    }
}

/// Run every predicate over `plate`.
pub fn detect_geju(plate: &XuankongPlate) -> GejuResult {
    let matches: Vec<GejuMatch> = ALL_GEJU
        .iter()
        .filter_map(|kind| {
            kind.detect(plate).map(|palaces| GejuMatch {
                kind: *kind,
                name: kind.name(),
                favorable: kind.is_favorable(),
                palaces,
            })
        })
        .collect();
    let favorable_count = matches.iter().filter(|m| m.favorable).count();
    let favorable = favorable_count > matches.len() - favorable_count;
    tracing::debug!(
        fired = matches.len(),
        favorable_count,
        favorable,
        "geju detection"
    );
    GejuResult {
        types: matches.iter().map(|m| m.name).collect(),
        descriptions: matches.iter().map(|m| m.kind.description()).collect(),
        matches,
        favorable,
    }
}
