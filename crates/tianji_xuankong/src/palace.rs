//! The nine palaces of the Luoshu grid and the flight path between them.
//!
//! Palaces are numbered by their Luoshu home star:
//!
//! ```text
//!   4 SE   9 S    2 SW
//!   3 E    5 C    7 W
//!   8 NE   1 N    6 NW
//! ```
//!
//! Stars fly 5 → 6 → 7 → 8 → 9 → 1 → 2 → 3 → 4; a palace's step along that
//! path is `(palace - 5) mod 9`.

use serde::{Deserialize, Serialize};

/// Palace numbers in flight order.
pub const FLIGHT_PATH: [u8; 9] = [5, 6, 7, 8, 9, 1, 2, 3, 4];

/// Palace numbers in ascending order.
pub const ALL_PALACES: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// The centre palace.
pub const CENTER: u8 = 5;

const TRIGRAMS: [&str; 9] = ["坎", "坤", "震", "巽", "中", "乾", "兑", "艮", "离"];

const DIRECTIONS: [&str; 9] = ["北", "西南", "东", "东南", "中", "西北", "西", "东北", "南"];

/// Flying direction of a star layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flight {
    /// 顺飞: along the path.
    Forward,
    /// 逆飞: against the path.
    Reverse,
}

impl Flight {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "顺飞",
            Self::Reverse => "逆飞",
        }
    }
}

/// Step of a palace along the flight path (centre = 0).
pub const fn flight_step(palace: u8) -> u8 {
    (palace + 4) % 9
}

/// Trigram name of a palace (`中` for the centre).
pub fn trigram(palace: u8) -> &'static str {
    TRIGRAMS[usize::from(palace.clamp(1, 9) - 1)]
}

/// Compass direction of a palace.
pub fn direction(palace: u8) -> &'static str {
    DIRECTIONS[usize::from(palace.clamp(1, 9) - 1)]
}

/// `东北(艮)` style label; the centre is `中宫`.
pub fn label(palace: u8) -> String {
    if palace == CENTER {
        "中宫".to_string()
    } else {
        format!("{}({})", direction(palace), trigram(palace))
    }
}

/// Palace across the centre.
pub const fn opposite(palace: u8) -> u8 {
    10 - palace
}

/// Fly `center` through the nine palaces. Index `p - 1` holds the star in
/// palace `p`.
pub fn fly(center: u8, flight: Flight) -> [u8; 9] {
    let c = i32::from(center) - 1;
    let mut out = [0u8; 9];
    for p in ALL_PALACES {
        let step = i32::from(flight_step(p));
        let delta = match flight {
            Flight::Forward => step,
            Flight::Reverse => -step,
        };
        out[usize::from(p - 1)] = ((c + delta).rem_euclid(9) + 1) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luoshu_is_five_forward() {
        assert_eq!(fly(5, Flight::Forward), ALL_PALACES);
    }

    #[test]
    fn reverse_five_is_opposite() {
        let r = fly(5, Flight::Reverse);
        for p in ALL_PALACES {
            assert_eq!(r[usize::from(p - 1)], opposite(p));
        }
    }

    #[test]
    fn period_eight_chart() {
        // 8 in the centre: 9 NW, 1 W, 2 NE, 3 S, 4 N, 5 SW, 6 E, 7 SE.
        assert_eq!(fly(8, Flight::Forward), [4, 5, 6, 7, 8, 9, 1, 2, 3]);
    }

    #[test]
    fn flight_path_steps() {
        for (i, p) in FLIGHT_PATH.iter().enumerate() {
            assert_eq!(usize::from(flight_step(*p)), i);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(label(8), "东北(艮)");
        assert_eq!(label(5), "中宫");
        assert_eq!(label(9), "南(离)");
    }
}
