//! The twelve earthly branches (地支) and their hidden stems (藏干).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};
use crate::error::BaseError;
use crate::stem::Stem;

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All twelve branches in cycle order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const ANIMAL_NAMES: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

/// Rank of a hidden stem inside its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QiRank {
    /// 本气
    Main,
    /// 中气
    Middle,
    /// 余气
    Residual,
}

impl QiRank {
    /// Rank from position in the hidden-stem list.
    pub const fn from_position(i: usize) -> Self {
        match i {
            0 => Self::Main,
            1 => Self::Middle,
            _ => Self::Residual,
        }
    }

    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Main => "本气",
            Self::Middle => "中气",
            Self::Residual => "余气",
        }
    }
}

use Stem::*;

/// Hidden stems per branch, main qi first.
const HIDDEN_STEMS: [&[Stem]; 12] = [
    &[Gui],
    &[Ji, Gui, Xin],
    &[Jia, Bing, Wu],
    &[Yi],
    &[Wu, Yi, Gui],
    &[Bing, Wu, Geng],
    &[Ding, Ji],
    &[Ji, Ding, Yi],
    &[Geng, Ren, Wu],
    &[Xin],
    &[Wu, Xin, Ding],
    &[Ren, Jia],
];

impl Branch {
    /// 0-based index (子 = 0 .. 亥 = 11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch from a raw index; wraps modulo 12.
    pub const fn from_index(i: u8) -> Self {
        ALL_BRANCHES[(i % 12) as usize]
    }

    /// Branch from a signed cycle position; wraps in both directions.
    pub fn from_cycle(i: i64) -> Self {
        ALL_BRANCHES[i.rem_euclid(12) as usize]
    }

    /// Branch governing a civil hour (0..=23). 23:00 already belongs to 子.
    pub const fn from_hour(hour: u32) -> Self {
        ALL_BRANCHES[(((hour + 1) / 2) % 12) as usize]
    }

    /// Chinese character.
    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self as usize]
    }

    /// Zodiac animal (生肖).
    pub const fn animal(self) -> &'static str {
        ANIMAL_NAMES[self as usize]
    }

    /// Element of the branch itself.
    pub const fn element(self) -> Element {
        BRANCH_ELEMENTS[self as usize]
    }

    /// Yin/yang polarity, yang-first along the cycle.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_parity(self.index())
    }

    /// Hidden stems, main qi first.
    pub const fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[self as usize]
    }

    /// Main-qi hidden stem (本气).
    pub const fn main_stem(self) -> Stem {
        HIDDEN_STEMS[self as usize][0]
    }

    /// Hidden stems paired with their rank.
    pub fn ranked_hidden_stems(self) -> impl Iterator<Item = (Stem, QiRank)> {
        self.hidden_stems()
            .iter()
            .enumerate()
            .map(|(i, s)| (*s, QiRank::from_position(i)))
    }

    /// First civil hour of the branch's two-hour span (子 starts at 23).
    pub const fn start_hour(self) -> u32 {
        (self.index() as u32 * 2 + 23) % 24
    }

    /// The branch `n` steps further along the cycle.
    pub fn offset(self, n: i64) -> Self {
        Self::from_cycle(i64::from(self.index()) + n)
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BRANCH_NAMES
            .iter()
            .position(|n| *n == s.trim())
            .map(|i| ALL_BRANCHES[i])
            .ok_or_else(|| BaseError::UnknownName {
                kind: "branch",
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_branches() {
        assert_eq!(Branch::from_hour(23), Branch::Zi);
        assert_eq!(Branch::from_hour(0), Branch::Zi);
        assert_eq!(Branch::from_hour(1), Branch::Chou);
        assert_eq!(Branch::from_hour(12), Branch::Wu);
        assert_eq!(Branch::from_hour(22), Branch::Hai);
    }

    #[test]
    fn start_hours() {
        assert_eq!(Branch::Zi.start_hour(), 23);
        assert_eq!(Branch::Chou.start_hour(), 1);
        assert_eq!(Branch::Hai.start_hour(), 21);
        for b in ALL_BRANCHES {
            assert_eq!(Branch::from_hour(b.start_hour()), b);
        }
    }

    #[test]
    fn main_qi_matches_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(b.main_stem().element(), b.element(), "{b}");
        }
    }

    #[test]
    fn hidden_stem_counts() {
        let total: usize = ALL_BRANCHES.iter().map(|b| b.hidden_stems().len()).sum();
        assert_eq!(total, 28);
        assert_eq!(Branch::Yin.hidden_stems(), &[Stem::Jia, Stem::Bing, Stem::Wu]);
        let ranks: Vec<QiRank> = Branch::Chou.ranked_hidden_stems().map(|(_, r)| r).collect();
        assert_eq!(ranks, vec![QiRank::Main, QiRank::Middle, QiRank::Residual]);
    }

    #[test]
    fn animals_and_names() {
        assert_eq!(Branch::Chen.animal(), "龙");
        assert_eq!("酉".parse::<Branch>().unwrap(), Branch::You);
        assert!("甲".parse::<Branch>().is_err());
    }
}
