//! Flying-star plate construction.
//!
//! A plate carries three layers over the nine palaces: the period chart
//! (运盘), the mountain stars (山星) flown from the sitting palace's period
//! star, and the facing stars (向星) flown from the facing palace's period
//! star.

use serde::Serialize;

use crate::config::XuankongConfig;
use crate::mountain::{FacingResolution, Mountain};
use crate::palace::{ALL_PALACES, CENTER, Flight, fly};
use crate::period::Period;
use crate::replacement::{
    RULE_COMBINED_DIRECTION, RULE_FIVE_CENTER, RULE_FUYIN_REPLACEMENT, RULE_HE_SHI_REPLACEMENT,
    RULE_REPLACEMENT, is_five_center, replacement_star, should_replace_combined,
    should_replace_fuyin, should_replace_he_shi,
};

/// The three stars sitting in one palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PalaceStars {
    pub palace: u8,
    /// 山星
    pub mountain: u8,
    /// 向星
    pub facing: u8,
    /// 运星
    pub period: u8,
}

/// How a mountain or facing layer was flown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarLayer {
    /// Palace the layer was taken from.
    pub origin_palace: u8,
    /// Period star found at the origin palace.
    pub origin_star: u8,
    /// Mountain whose polarity decided the flight.
    pub lookup_mountain: Mountain,
    /// Star placed in the centre after any replacement.
    pub center: u8,
    pub flight: Flight,
    /// The centre star is a 替星.
    pub replaced: bool,
}

impl StarLayer {
    /// Stars of this layer, index `p - 1` for palace `p`.
    pub fn stars(&self) -> [u8; 9] {
        fly(self.center, self.flight)
    }
}

/// A complete flying-star plate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XuankongPlate {
    pub period: Period,
    pub facing: FacingResolution,
    pub mountain_layer: StarLayer,
    pub facing_layer: StarLayer,
    /// Palaces 1..=9 in order.
    pub palaces: [PalaceStars; 9],
    /// Audit trail of every rule that fired, in firing order.
    pub rules_applied: Vec<String>,
}

impl XuankongPlate {
    /// Stars of `palace` (1..=9).
    pub fn palace(&self, palace: u8) -> Option<&PalaceStars> {
        self.palaces.get(usize::from(palace.checked_sub(1)?))
    }

    /// Palace of the facing mountain.
    pub fn facing_palace(&self) -> u8 {
        self.facing.facing.palace()
    }

    /// Palace of the sitting mountain.
    pub fn sitting_palace(&self) -> u8 {
        self.facing.sitting.palace()
    }

    pub fn mountain_stars(&self) -> [u8; 9] {
        self.palaces.map(|p| p.mountain)
    }

    pub fn facing_stars(&self) -> [u8; 9] {
        self.palaces.map(|p| p.facing)
    }

    pub fn period_stars(&self) -> [u8; 9] {
        self.palaces.map(|p| p.period)
    }
}

fn push_rule(rules: &mut Vec<String>, rule: &str) {
    if !rules.iter().any(|r| r == rule) {
        rules.push(rule.to_string());
    }
}

/// Mountain that decides a layer's polarity: same 元龙 position in the
/// home palace of the origin star. Star 5 borrows the period's palace; in
/// period 5 the layer's own mountain is used.
fn lookup_mountain(origin_star: u8, period: Period, layer_mountain: Mountain) -> Mountain {
    let home = if origin_star == CENTER {
        period.number()
    } else {
        origin_star
    };
    Mountain::in_palace(home, layer_mountain.yuan_long()).unwrap_or(layer_mountain)
}

fn fly_layer(
    period_chart: &[u8; 9],
    period: Period,
    facing: &FacingResolution,
    layer_mountain: Mountain,
    config: &XuankongConfig,
    rules: &mut Vec<String>,
) -> StarLayer {
    let origin_palace = layer_mountain.palace();
    let origin_star = period_chart[usize::from(origin_palace - 1)];
    let lookup = lookup_mountain(origin_star, period, layer_mountain);
    let flight = lookup.flight();
    let mut center = origin_star;
    let mut replaced = false;

    if is_five_center(origin_star) {
        push_rule(rules, RULE_FIVE_CENTER);
    }
    if should_replace_combined(facing, config.replace_on_combined_direction) {
        center = replacement_star(lookup);
        replaced = true;
        push_rule(rules, RULE_REPLACEMENT);
    }
    if should_replace_fuyin(center, flight, config.replace_on_fuyin) {
        center = replacement_star(lookup);
        replaced = true;
        push_rule(rules, RULE_FUYIN_REPLACEMENT);
    }

    tracing::debug!(
        mountain = %layer_mountain,
        origin_palace,
        origin_star,
        lookup = %lookup,
        center,
        flight = flight.name(),
        replaced,
        "flew star layer"
    );

    StarLayer {
        origin_palace,
        origin_star,
        lookup_mountain: lookup,
        center,
        flight,
        replaced,
    }
}

/// Build the plate for a period and a resolved facing.
pub fn build_plate(period: Period, facing: FacingResolution, config: &XuankongConfig) -> XuankongPlate {
    let mut rules = Vec::new();
    if facing.is_combined() {
        push_rule(&mut rules, RULE_COMBINED_DIRECTION);
    }

    let period_chart = fly(period.number(), Flight::Forward);
    let mut mountain_layer =
        fly_layer(&period_chart, period, &facing, facing.sitting, config, &mut rules);
    let mut facing_layer =
        fly_layer(&period_chart, period, &facing, facing.facing, config, &mut rules);

    // Checked once on the flown layers; a 替星 is never 5, so no 伏吟 can follow.
    let at_facing = usize::from(facing.facing.palace() - 1);
    if should_replace_he_shi(
        mountain_layer.stars()[at_facing],
        facing_layer.stars()[at_facing],
        config.replace_on_facing_he_shi,
    ) {
        for layer in [&mut mountain_layer, &mut facing_layer] {
            layer.center = replacement_star(layer.lookup_mountain);
            layer.replaced = true;
        }
        push_rule(&mut rules, RULE_HE_SHI_REPLACEMENT);
        tracing::debug!(
            mountain_center = mountain_layer.center,
            facing_center = facing_layer.center,
            "facing 合十 replacement"
        );
    }

    let mountain_stars = mountain_layer.stars();
    let facing_stars = facing_layer.stars();
    let palaces = ALL_PALACES.map(|p| {
        let i = usize::from(p - 1);
        PalaceStars {
            palace: p,
            mountain: mountain_stars[i],
            facing: facing_stars[i],
            period: period_chart[i],
        }
    });

    XuankongPlate {
        period,
        facing,
        mountain_layer,
        facing_layer,
        palaces,
        rules_applied: rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mountain::resolve_facing;

    fn plate(period: u8, degree: f64, config: &XuankongConfig) -> XuankongPlate {
        let facing = resolve_facing(degree, config.tolerance_degrees).unwrap();
        build_plate(Period::new(period).unwrap(), facing, config)
    }

    #[test]
    fn period_eight_zi_mountain() {
        // 子山午向, period 8: mountain 4 forward, facing 3 reverse.
        let p = plate(8, 180.0, &XuankongConfig::default());
        assert_eq!(p.mountain_layer.center, 4);
        assert_eq!(p.mountain_layer.flight, Flight::Forward);
        assert_eq!(p.facing_layer.center, 3);
        assert_eq!(p.facing_layer.flight, Flight::Reverse);
        let south = p.palace(9).unwrap();
        assert_eq!((south.mountain, south.facing, south.period), (8, 8, 3));
        assert!(p.rules_applied.is_empty());
    }

    #[test]
    fn period_column_is_the_period_chart() {
        let p = plate(8, 90.0, &XuankongConfig::default());
        assert_eq!(p.period_stars(), [4, 5, 6, 7, 8, 9, 1, 2, 3]);
        assert_eq!(p.palace(5).unwrap().mountain, p.mountain_layer.center);
        assert_eq!(p.palace(5).unwrap().facing, p.facing_layer.center);
    }

    #[test]
    fn five_in_center_is_recorded() {
        // 艮山坤向, period 8: the facing palace (2) holds period star 5.
        let p = plate(8, 225.0, &XuankongConfig::default());
        assert_eq!(p.facing_layer.origin_star, 5);
        assert_eq!(p.facing_layer.lookup_mountain, Mountain::Gen);
        assert_eq!(p.facing_layer.flight, Flight::Forward);
        assert_eq!(p.rules_applied, vec![RULE_FIVE_CENTER.to_string()]);
    }

    #[test]
    fn combined_direction_flags_without_replacing_by_default() {
        let p = plate(8, 187.5, &XuankongConfig::default());
        assert_eq!(p.rules_applied, vec![RULE_COMBINED_DIRECTION.to_string()]);
        assert!(!p.mountain_layer.replaced);
        assert!(!p.facing_layer.replaced);
    }

    #[test]
    fn combined_direction_replacement() {
        let config = XuankongConfig {
            replace_on_combined_direction: true,
            ..XuankongConfig::default()
        };
        let p = plate(8, 187.5, &config);
        assert!(p.rules_applied.iter().any(|r| r == RULE_REPLACEMENT));
        assert!(p.mountain_layer.replaced && p.facing_layer.replaced);
        assert_eq!(
            p.mountain_layer.center,
            replacement_star(p.mountain_layer.lookup_mountain)
        );
    }

    #[test]
    fn fuyin_layer_is_reflown_when_enabled() {
        let off = plate(8, 225.0, &XuankongConfig::default());
        assert_eq!(off.facing_layer.center, CENTER);
        assert_eq!(off.facing_stars(), ALL_PALACES);

        let config = XuankongConfig {
            replace_on_fuyin: true,
            ..XuankongConfig::default()
        };
        let on = plate(8, 225.0, &config);
        // 艮 carries 替星 7.
        assert_eq!(on.facing_layer.center, 7);
        assert_eq!(on.facing_layer.flight, Flight::Forward);
        assert!(on.facing_layer.replaced);
        assert!(on.rules_applied.iter().any(|r| r == RULE_FUYIN_REPLACEMENT));
        assert_eq!(on.mountain_layer, off.mountain_layer);
    }

    #[test]
    fn facing_he_shi_reflies_both_layers() {
        // 艮山坤向, period 8: the facing palace holds mountain 8 and facing 2.
        let off = plate(8, 225.0, &XuankongConfig::default());
        let south_west = off.palace(2).unwrap();
        assert_eq!((south_west.mountain, south_west.facing), (8, 2));
        assert!(off.rules_applied.iter().all(|r| r != RULE_HE_SHI_REPLACEMENT));

        let config = XuankongConfig {
            replace_on_facing_he_shi: true,
            ..XuankongConfig::default()
        };
        let on = plate(8, 225.0, &config);
        assert!(on.rules_applied.iter().any(|r| r == RULE_HE_SHI_REPLACEMENT));
        // 坤 and 艮 carry 替星 2 and 7; flights are kept.
        assert_eq!(on.mountain_layer.center, 2);
        assert_eq!(on.facing_layer.center, 7);
        assert_eq!(on.facing_layer.flight, off.facing_layer.flight);
        assert!(on.mountain_layer.replaced && on.facing_layer.replaced);
    }

    #[test]
    fn facing_he_shi_needs_the_pair() {
        // 子山午向, period 8: the facing palace holds 8 and 8.
        let config = XuankongConfig {
            replace_on_facing_he_shi: true,
            ..XuankongConfig::default()
        };
        let p = plate(8, 180.0, &config);
        assert!(p.rules_applied.is_empty());
        assert!(!p.mountain_layer.replaced && !p.facing_layer.replaced);
    }
}
