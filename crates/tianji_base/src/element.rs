//! The five elements (五行) and yin/yang polarity.
//!
//! Elements are ordered along the generating cycle: Wood → Fire → Earth →
//! Metal → Water → Wood. With that ordering, `a` generates `a + 1` and
//! controls `a + 2` (mod 5), so every relation reduces to a distance.

use serde::{Deserialize, Serialize};

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Chinese name (阳 / 阴).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yang => "阳",
            Self::Yin => "阴",
        }
    }

    /// Polarity of the n-th item of an alternating yang-first cycle.
    pub const fn from_parity(index: u8) -> Self {
        if index % 2 == 0 { Self::Yang } else { Self::Yin }
    }
}

/// The five elements in generating-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

/// How one element stands to another along the two cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRelation {
    /// Same element.
    Same,
    /// Self generates other (我生).
    Generates,
    /// Self controls other (我克).
    Controls,
    /// Other controls self (克我).
    ControlledBy,
    /// Other generates self (生我).
    GeneratedBy,
}

impl Element {
    /// 0-based index (Wood = 0 .. Water = 4).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Element from a raw index; wraps modulo 5.
    pub const fn from_index(i: u8) -> Self {
        ALL_ELEMENTS[(i % 5) as usize]
    }

    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// The element this one generates.
    pub const fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element this one controls.
    pub const fn controls(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The element that generates this one.
    pub const fn generated_by(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The element that controls this one.
    pub const fn controlled_by(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Generating-cycle distance from `self` to `other`, in 0..5.
    pub const fn distance_to(self, other: Self) -> u8 {
        (other.index() + 5 - self.index()) % 5
    }

    /// Relation of `other` as seen from `self`.
    pub const fn relation_to(self, other: Self) -> ElementRelation {
        match self.distance_to(other) {
            0 => ElementRelation::Same,
            1 => ElementRelation::Generates,
            2 => ElementRelation::Controls,
            3 => ElementRelation::ControlledBy,
            _ => ElementRelation::GeneratedBy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generating_cycle_closes() {
        let mut e = Element::Wood;
        for _ in 0..5 {
            e = e.generates();
        }
        assert_eq!(e, Element::Wood);
        assert_eq!(Element::Water.generates(), Element::Wood);
    }

    #[test]
    fn controlling_pairs() {
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Metal.controls(), Element::Wood);
        assert_eq!(Element::Fire.controlled_by(), Element::Water);
        assert_eq!(Element::Earth.generated_by(), Element::Fire);
    }

    #[test]
    fn relations_are_consistent_with_helpers() {
        for a in ALL_ELEMENTS {
            assert_eq!(a.relation_to(a), ElementRelation::Same);
            assert_eq!(a.relation_to(a.generates()), ElementRelation::Generates);
            assert_eq!(a.relation_to(a.controls()), ElementRelation::Controls);
            assert_eq!(a.relation_to(a.controlled_by()), ElementRelation::ControlledBy);
            assert_eq!(a.relation_to(a.generated_by()), ElementRelation::GeneratedBy);
        }
    }

    #[test]
    fn polarity_alternates() {
        assert_eq!(Polarity::from_parity(0), Polarity::Yang);
        assert_eq!(Polarity::from_parity(7), Polarity::Yin);
    }
}
