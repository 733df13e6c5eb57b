//! Nayin (纳音): the element label shared by each consecutive pair of the
//! 60-term cycle.

use serde::Serialize;

use crate::element::Element;

/// Nayin label of a sexagenary pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Nayin {
    /// Three-character name, e.g. 海中金.
    pub name: &'static str,
    /// Element the name resolves to.
    pub element: Element,
}

const NAYIN_TABLE: [(&str, Element); 30] = [
    ("海中金", Element::Metal),
    ("炉中火", Element::Fire),
    ("大林木", Element::Wood),
    ("路旁土", Element::Earth),
    ("剑锋金", Element::Metal),
    ("山头火", Element::Fire),
    ("涧下水", Element::Water),
    ("城头土", Element::Earth),
    ("白蜡金", Element::Metal),
    ("杨柳木", Element::Wood),
    ("泉中水", Element::Water),
    ("屋上土", Element::Earth),
    ("霹雳火", Element::Fire),
    ("松柏木", Element::Wood),
    ("长流水", Element::Water),
    ("砂石金", Element::Metal),
    ("山下火", Element::Fire),
    ("平地木", Element::Wood),
    ("壁上土", Element::Earth),
    ("金箔金", Element::Metal),
    ("覆灯火", Element::Fire),
    ("天河水", Element::Water),
    ("大驿土", Element::Earth),
    ("钗钏金", Element::Metal),
    ("桑柘木", Element::Wood),
    ("大溪水", Element::Water),
    ("沙中土", Element::Earth),
    ("天上火", Element::Fire),
    ("石榴木", Element::Wood),
    ("大海水", Element::Water),
];

/// Nayin for a sexagenary index (0..60); wraps.
pub const fn nayin_for_index(index: u8) -> Nayin {
    let (name, element) = NAYIN_TABLE[((index % 60) / 2) as usize];
    Nayin { name, element }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_share_a_label() {
        for i in (0..60).step_by(2) {
            assert_eq!(nayin_for_index(i), nayin_for_index(i + 1));
        }
    }

    #[test]
    fn known_labels() {
        assert_eq!(nayin_for_index(0).name, "海中金");
        // 戊午 (54) → 天上火
        assert_eq!(nayin_for_index(54).name, "天上火");
        assert_eq!(nayin_for_index(59).element, Element::Water);
    }

    #[test]
    fn each_element_appears_six_times() {
        for e in crate::element::ALL_ELEMENTS {
            let n = NAYIN_TABLE.iter().filter(|(_, el)| *el == e).count();
            assert_eq!(n, 6, "{e:?}");
        }
    }
}
