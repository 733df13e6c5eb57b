//! Replacement stars (替卦) and the predicates that trigger them.
//!
//! Each predicate is a plain boolean function over plate state; the plate
//! builder composes them and records every rule that fires.

use crate::mountain::{FacingResolution, Mountain};
use crate::palace::{CENTER, Flight};

/// Audit label: facing within tolerance of a sector boundary.
pub const RULE_COMBINED_DIRECTION: &str = "兼向";
/// Audit label: a layer's centre star was replaced because of 兼向.
pub const RULE_REPLACEMENT: &str = "替卦";
/// Audit label: a 伏吟 layer was re-flown with its replacement star.
pub const RULE_FUYIN_REPLACEMENT: &str = "伏吟替卦";
/// Audit label: both layers were re-flown because the facing palace's
/// mountain and facing stars sum to 10.
pub const RULE_HE_SHI_REPLACEMENT: &str = "合十替卦";
/// Audit label: star 5 entered the centre of a star layer.
pub const RULE_FIVE_CENTER: &str = "五黄入中";
/// Audit label: heading measurement below the configured quality.
pub const RULE_LOW_CONFIDENCE: &str = "低置信度朝向";

/// Replacement star (替星) per mountain, indexed clockwise from 子.
///
/// 1: 子 癸 甲 申 · 2: 壬 卯 乙 未 坤 · 6: 乾 亥 辰 巽 巳 戌 ·
/// 7: 酉 辛 丑 艮 丙 · 9: 寅 午 庚 丁
const REPLACEMENT_STARS: [u8; 24] = [
    1, 1, 7, 7, 9, 1, 2, 2, 6, 6, 6, 7, 9, 9, 2, 2, 1, 9, 7, 7, 6, 6, 6, 2,
];

/// 替星 of a mountain.
pub const fn replacement_star(mountain: Mountain) -> u8 {
    REPLACEMENT_STARS[mountain.index() as usize]
}

/// The facing straddles two sectors.
pub fn is_combined_direction(facing: &FacingResolution) -> bool {
    facing.is_combined()
}

/// A layer is 伏吟 when 5 enters the centre and flies forward: every star
/// lands on its home palace.
pub fn is_fuyin_layer(center: u8, flight: Flight) -> bool {
    center == CENTER && flight == Flight::Forward
}

/// Star 5 entered the centre of a mountain or facing layer.
pub fn is_five_center(center: u8) -> bool {
    center == CENTER
}

/// Mountain and facing stars of one palace sum to 10 (合十).
pub fn is_he_shi_pair(mountain_star: u8, facing_star: u8) -> bool {
    mountain_star + facing_star == 10
}

/// Whether the combined-direction substitution should run.
pub fn should_replace_combined(facing: &FacingResolution, enabled: bool) -> bool {
    enabled && is_combined_direction(facing)
}

/// Whether a 伏吟 layer should be re-flown.
pub fn should_replace_fuyin(center: u8, flight: Flight, enabled: bool) -> bool {
    enabled && is_fuyin_layer(center, flight)
}

/// Whether a 合十 pair at the facing palace should re-fly both layers.
pub fn should_replace_he_shi(mountain_star: u8, facing_star: u8, enabled: bool) -> bool {
    enabled && is_he_shi_pair(mountain_star, facing_star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mountain::ALL_MOUNTAINS;

    #[test]
    fn table_matches_groups() {
        let group = |star: u8| -> Vec<&str> {
            ALL_MOUNTAINS
                .iter()
                .filter(|m| replacement_star(**m) == star)
                .map(|m| m.name())
                .collect()
        };
        assert_eq!(group(1), vec!["子", "癸", "甲", "申"]);
        assert_eq!(group(2), vec!["卯", "乙", "未", "坤", "壬"]);
        assert_eq!(group(6), vec!["辰", "巽", "巳", "戌", "乾", "亥"]);
        assert_eq!(group(7), vec!["丑", "艮", "丙", "酉", "辛"]);
        assert_eq!(group(9), vec!["寅", "午", "丁", "庚"]);
        for star in [3, 4, 5, 8] {
            assert!(group(star).is_empty());
        }
    }

    #[test]
    fn fuyin_predicate() {
        assert!(is_fuyin_layer(5, Flight::Forward));
        assert!(!is_fuyin_layer(5, Flight::Reverse));
        assert!(!is_fuyin_layer(4, Flight::Forward));
        assert!(!should_replace_fuyin(5, Flight::Forward, false));
    }

    #[test]
    fn he_shi_pair_predicate() {
        assert!(is_he_shi_pair(8, 2));
        assert!(is_he_shi_pair(5, 5));
        assert!(!is_he_shi_pair(8, 8));
        assert!(!should_replace_he_shi(8, 2, false));
        assert!(should_replace_he_shi(1, 9, true));
    }
}
