//! The 24 mountains (二十四山) and facing resolution.
//!
//! Sectors are 15° wide and centred on 子 = 0°, so 子 spans [352.5°, 7.5°).
//! Each non-centre palace holds three consecutive mountains (地元, 天元,
//! 人元); palaces 1, 3, 7, 9 read yang-yin-yin and palaces 2, 4, 6, 8 read
//! yin-yang-yang.

use serde::{Deserialize, Serialize};

use crate::error::XuankongError;
use crate::palace;

/// Width of one mountain sector in degrees.
pub const SECTOR_DEG: f64 = 15.0;

/// Largest accepted 兼向 tolerance: half a sector.
pub const MAX_TOLERANCE_DEG: f64 = SECTOR_DEG / 2.0;

/// The 24 mountains, clockwise from 子.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Mountain {
    Zi,
    Gui,
    Chou,
    Gen,
    Yin,
    Jia,
    Mao,
    Yi,
    Chen,
    Xun,
    Si,
    Bing,
    Wu,
    Ding,
    Wei,
    Kun,
    Shen,
    Geng,
    You,
    Xin,
    Xu,
    Qian,
    Hai,
    Ren,
}

/// All 24 mountains clockwise from 子.
pub const ALL_MOUNTAINS: [Mountain; 24] = [
    Mountain::Zi,
    Mountain::Gui,
    Mountain::Chou,
    Mountain::Gen,
    Mountain::Yin,
    Mountain::Jia,
    Mountain::Mao,
    Mountain::Yi,
    Mountain::Chen,
    Mountain::Xun,
    Mountain::Si,
    Mountain::Bing,
    Mountain::Wu,
    Mountain::Ding,
    Mountain::Wei,
    Mountain::Kun,
    Mountain::Shen,
    Mountain::Geng,
    Mountain::You,
    Mountain::Xin,
    Mountain::Xu,
    Mountain::Qian,
    Mountain::Hai,
    Mountain::Ren,
];

const MOUNTAIN_NAMES: [&str; 24] = [
    "子", "癸", "丑", "艮", "寅", "甲", "卯", "乙", "辰", "巽", "巳", "丙", "午", "丁", "未", "坤",
    "申", "庚", "酉", "辛", "戌", "乾", "亥", "壬",
];

/// Palace of each three-mountain group, starting with 壬子癸.
const GROUP_PALACE: [u8; 8] = [1, 8, 3, 4, 9, 2, 7, 6];

/// Position of a mountain inside its palace (元龙).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YuanLong {
    /// 地元龙
    Earth,
    /// 天元龙
    Heaven,
    /// 人元龙
    Human,
}

impl YuanLong {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Earth => "地元",
            Self::Heaven => "天元",
            Self::Human => "人元",
        }
    }
}

const ALL_YUAN_LONG: [YuanLong; 3] = [YuanLong::Earth, YuanLong::Heaven, YuanLong::Human];

impl Mountain {
    /// 0-based index clockwise from 子.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(i: u8) -> Self {
        ALL_MOUNTAINS[(i % 24) as usize]
    }

    pub const fn name(self) -> &'static str {
        MOUNTAIN_NAMES[self as usize]
    }

    /// Mountain containing a compass degree.
    pub fn from_degree(deg: f64) -> Self {
        let shifted = (deg + SECTOR_DEG / 2.0).rem_euclid(360.0);
        Self::from_index(((shifted / SECTOR_DEG).floor() as u8).min(23))
    }

    /// Centre of the sector in degrees.
    pub fn center_deg(self) -> f64 {
        f64::from(self.index()) * SECTOR_DEG
    }

    const fn group(self) -> u8 {
        ((self.index() + 1) % 24) / 3
    }

    /// Luoshu palace the mountain lies in.
    pub const fn palace(self) -> u8 {
        GROUP_PALACE[self.group() as usize]
    }

    pub const fn yuan_long(self) -> YuanLong {
        ALL_YUAN_LONG[((self.index() + 1) % 3) as usize]
    }

    /// Yang mountains fly forward.
    pub const fn is_yang(self) -> bool {
        let first_is_yang = matches!(self.palace(), 1 | 3 | 7 | 9);
        match self.yuan_long() {
            YuanLong::Earth => first_is_yang,
            YuanLong::Heaven | YuanLong::Human => !first_is_yang,
        }
    }

    pub const fn flight(self) -> palace::Flight {
        if self.is_yang() {
            palace::Flight::Forward
        } else {
            palace::Flight::Reverse
        }
    }

    /// The mountain directly across the compass.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 12)
    }

    /// Mountain at `position` inside a non-centre palace.
    pub fn in_palace(palace: u8, position: YuanLong) -> Option<Self> {
        let group = GROUP_PALACE.iter().position(|p| *p == palace)? as u8;
        Some(Self::from_index(group * 3 + position.index() + 23))
    }
}

impl std::fmt::Display for Mountain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A facing degree resolved to its mountain pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FacingResolution {
    /// Facing degree, normalized to [0, 360).
    pub degree: f64,
    /// 向: the mountain faced.
    pub facing: Mountain,
    /// 坐: the mountain behind.
    pub sitting: Mountain,
    /// Signed distance from the facing sector centre.
    pub offset_deg: f64,
    /// Neighbouring facing mountain when within tolerance of a boundary (兼向).
    pub combined_with: Option<Mountain>,
}

impl FacingResolution {
    pub fn is_combined(&self) -> bool {
        self.combined_with.is_some()
    }

    /// `子山午向` style label, with `兼丁` appended for combined facings.
    pub fn label(&self) -> String {
        let mut s = format!("{}山{}向", self.sitting, self.facing);
        if let Some(n) = self.combined_with {
            s.push('兼');
            s.push_str(n.name());
        }
        s
    }
}

/// Resolve a facing degree. Degrees within `tolerance_deg` of a sector
/// boundary are combined-direction cases and record the neighbour.
pub fn resolve_facing(degree: f64, tolerance_deg: f64) -> Result<FacingResolution, XuankongError> {
    if !degree.is_finite() {
        return Err(XuankongError::invalid("facing_degrees", "must be a finite number"));
    }
    if !(0.0..=MAX_TOLERANCE_DEG).contains(&tolerance_deg) {
        return Err(XuankongError::invalid(
            "tolerance_degrees",
            format!("{tolerance_deg} is outside [0, {MAX_TOLERANCE_DEG}]"),
        ));
    }
    let degree = degree.rem_euclid(360.0);
    let facing = Mountain::from_degree(degree);
    let mut offset_deg = degree - facing.center_deg();
    if offset_deg > 180.0 {
        offset_deg -= 360.0;
    }
    let to_boundary = MAX_TOLERANCE_DEG - offset_deg.abs();
    let combined_with = (to_boundary <= tolerance_deg).then(|| {
        if offset_deg >= 0.0 {
            Mountain::from_index(facing.index() + 1)
        } else {
            Mountain::from_index(facing.index() + 23)
        }
    });
    Ok(FacingResolution {
        degree,
        facing,
        sitting: facing.opposite(),
        offset_deg,
        combined_with,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_mountains() {
        assert_eq!(Mountain::from_degree(0.0), Mountain::Zi);
        assert_eq!(Mountain::from_degree(359.0), Mountain::Zi);
        assert_eq!(Mountain::from_degree(90.0), Mountain::Mao);
        assert_eq!(Mountain::from_degree(180.0), Mountain::Wu);
        assert_eq!(Mountain::from_degree(225.0), Mountain::Kun);
        assert_eq!(Mountain::from_degree(270.0), Mountain::You);
        assert_eq!(Mountain::from_degree(352.5), Mountain::Zi);
        assert_eq!(Mountain::from_degree(352.4), Mountain::Ren);
    }

    #[test]
    fn palaces_and_positions() {
        assert_eq!(Mountain::Ren.palace(), 1);
        assert_eq!(Mountain::Zi.palace(), 1);
        assert_eq!(Mountain::Gui.palace(), 1);
        assert_eq!(Mountain::Gen.palace(), 8);
        assert_eq!(Mountain::Kun.palace(), 2);
        assert_eq!(Mountain::Qian.palace(), 6);
        assert_eq!(Mountain::Ren.yuan_long(), YuanLong::Earth);
        assert_eq!(Mountain::Zi.yuan_long(), YuanLong::Heaven);
        assert_eq!(Mountain::Gui.yuan_long(), YuanLong::Human);
        for m in ALL_MOUNTAINS {
            assert_eq!(m.yuan_long(), m.opposite().yuan_long(), "{m}");
            assert_eq!(Mountain::in_palace(m.palace(), m.yuan_long()), Some(m));
        }
        assert_eq!(Mountain::in_palace(5, YuanLong::Heaven), None);
    }

    #[test]
    fn polarity() {
        let yang: Vec<&str> = ALL_MOUNTAINS
            .iter()
            .filter(|m| m.is_yang())
            .map(|m| m.name())
            .collect();
        assert_eq!(
            yang,
            vec!["艮", "寅", "甲", "巽", "巳", "丙", "坤", "申", "庚", "乾", "亥", "壬"]
        );
    }

    #[test]
    fn centre_facing_is_not_combined() {
        let r = resolve_facing(180.0, 3.0).unwrap();
        assert_eq!(r.facing, Mountain::Wu);
        assert_eq!(r.sitting, Mountain::Zi);
        assert!(!r.is_combined());
        assert_eq!(r.label(), "子山午向");
    }

    #[test]
    fn boundary_facing_is_combined() {
        let r = resolve_facing(187.5, 3.0).unwrap();
        assert_eq!(r.facing, Mountain::Ding);
        assert_eq!(r.combined_with, Some(Mountain::Wu));
        let r = resolve_facing(185.0, 3.0).unwrap();
        assert_eq!(r.facing, Mountain::Wu);
        assert_eq!(r.combined_with, Some(Mountain::Ding));
        let r = resolve_facing(4.0, 3.0).unwrap();
        assert!(!r.is_combined());
        let r = resolve_facing(355.0, 3.0).unwrap();
        assert_eq!(r.facing, Mountain::Zi);
        assert_eq!(r.combined_with, Some(Mountain::Ren));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(resolve_facing(f64::NAN, 3.0).is_err());
        assert!(resolve_facing(10.0, 8.0).is_err());
        assert_eq!(resolve_facing(-90.0, 3.0).unwrap().facing, Mountain::You);
    }
}
