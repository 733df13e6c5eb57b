//! Ten gods (十神): how a stem relates to the day master.
//!
//! The label is a pure function of (element distance, polarity match):
//!
//! | distance | relation        | same polarity | opposite |
//! |----------|-----------------|---------------|----------|
//! | 0        | same element    | 比肩          | 劫财     |
//! | 1        | DM generates    | 食神          | 伤官     |
//! | 2        | DM controls     | 偏财          | 正财     |
//! | 3        | controls DM     | 七杀 (偏官)   | 正官     |
//! | 4        | generates DM    | 偏印          | 正印     |

use serde::{Deserialize, Serialize};

use crate::stem::Stem;

/// The ten relational categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum TenGod {
    BiJian,
    JieCai,
    ShiShen,
    ShangGuan,
    PianCai,
    ZhengCai,
    QiSha,
    ZhengGuan,
    PianYin,
    ZhengYin,
}

/// All ten gods in table order.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::BiJian,
    TenGod::JieCai,
    TenGod::ShiShen,
    TenGod::ShangGuan,
    TenGod::PianCai,
    TenGod::ZhengCai,
    TenGod::QiSha,
    TenGod::ZhengGuan,
    TenGod::PianYin,
    TenGod::ZhengYin,
];

/// The five pairs the ten gods fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenGodFamily {
    /// 比劫: same element.
    Companion,
    /// 食伤: element the day master generates.
    Output,
    /// 财: element the day master controls.
    Wealth,
    /// 官杀: element controlling the day master.
    Officer,
    /// 印: element generating the day master.
    Resource,
}

/// All five families in table order.
pub const ALL_TEN_GOD_FAMILIES: [TenGodFamily; 5] = [
    TenGodFamily::Companion,
    TenGodFamily::Output,
    TenGodFamily::Wealth,
    TenGodFamily::Officer,
    TenGodFamily::Resource,
];

impl TenGodFamily {
    /// Family at a generating-cycle distance from the day master.
    pub const fn from_distance(d: u8) -> Self {
        ALL_TEN_GOD_FAMILIES[(d % 5) as usize]
    }

    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "比劫",
            Self::Output => "食伤",
            Self::Wealth => "财星",
            Self::Officer => "官杀",
            Self::Resource => "印星",
        }
    }
}

impl TenGod {
    /// Label of `other` relative to `day_master`.
    pub const fn between(day_master: Stem, other: Stem) -> Self {
        let distance = day_master.element().distance_to(other.element());
        let opposite = (day_master.index() + other.index()) % 2;
        ALL_TEN_GODS[(distance * 2 + opposite) as usize]
    }

    /// 0-based table index.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Chinese name. 七杀 is also called 偏官; see [`TenGod::alias`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::BiJian => "比肩",
            Self::JieCai => "劫财",
            Self::ShiShen => "食神",
            Self::ShangGuan => "伤官",
            Self::PianCai => "偏财",
            Self::ZhengCai => "正财",
            Self::QiSha => "七杀",
            Self::ZhengGuan => "正官",
            Self::PianYin => "偏印",
            Self::ZhengYin => "正印",
        }
    }

    /// Alternative name, where one is in common use.
    pub const fn alias(self) -> Option<&'static str> {
        match self {
            Self::QiSha => Some("偏官"),
            Self::PianYin => Some("枭神"),
            _ => None,
        }
    }

    /// Family the label belongs to.
    pub const fn family(self) -> TenGodFamily {
        TenGodFamily::from_distance(self.index() / 2)
    }

    /// True for the same-polarity member of the pair.
    pub const fn is_same_polarity(self) -> bool {
        self.index() % 2 == 0
    }
}

impl std::fmt::Display for TenGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::ALL_STEMS;

    #[test]
    fn jia_day_master_row() {
        let dm = Stem::Jia;
        let expected = [
            (Stem::Jia, TenGod::BiJian),
            (Stem::Yi, TenGod::JieCai),
            (Stem::Bing, TenGod::ShiShen),
            (Stem::Ding, TenGod::ShangGuan),
            (Stem::Wu, TenGod::PianCai),
            (Stem::Ji, TenGod::ZhengCai),
            (Stem::Geng, TenGod::QiSha),
            (Stem::Xin, TenGod::ZhengGuan),
            (Stem::Ren, TenGod::PianYin),
            (Stem::Gui, TenGod::ZhengYin),
        ];
        for (other, god) in expected {
            assert_eq!(TenGod::between(dm, other), god, "甲 vs {other}");
        }
    }

    #[test]
    fn yin_day_master_spot_checks() {
        // 乙 sees 甲 as 劫财, 庚 as 正官, 壬 as 正印.
        assert_eq!(TenGod::between(Stem::Yi, Stem::Jia), TenGod::JieCai);
        assert_eq!(TenGod::between(Stem::Yi, Stem::Geng), TenGod::ZhengGuan);
        assert_eq!(TenGod::between(Stem::Yi, Stem::Ren), TenGod::ZhengYin);
        // 癸 sees 戊 as 正官, 丙 as 正财.
        assert_eq!(TenGod::between(Stem::Gui, Stem::Wu), TenGod::ZhengGuan);
        assert_eq!(TenGod::between(Stem::Gui, Stem::Bing), TenGod::ZhengCai);
    }

    #[test]
    fn every_row_is_a_permutation() {
        for dm in ALL_STEMS {
            let mut seen: Vec<TenGod> = ALL_STEMS.iter().map(|s| TenGod::between(dm, *s)).collect();
            seen.sort();
            assert_eq!(seen, ALL_TEN_GODS.to_vec(), "day master {dm}");
        }
    }

    #[test]
    fn families() {
        assert_eq!(TenGod::ShangGuan.family(), TenGodFamily::Output);
        assert_eq!(TenGod::QiSha.family(), TenGodFamily::Officer);
        assert_eq!(TenGod::ZhengYin.family(), TenGodFamily::Resource);
        assert_eq!(TenGod::QiSha.alias(), Some("偏官"));
    }
}
