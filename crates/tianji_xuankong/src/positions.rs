//! Auxiliary positions keyed by period: 文昌位 and 财位.

use serde::Serialize;

use crate::palace;
use crate::period::Period;

/// Palace of star 4 in each period chart (periods 1..=9).
const WENCHANG_PALACE: [u8; 9] = [8, 7, 6, 5, 4, 3, 2, 1, 9];

/// Palace of star 8 in each period chart; period 8 uses the 生气 star 9.
const CAIWEI_PALACE: [u8; 9] = [3, 2, 1, 9, 8, 7, 6, 6, 4];

/// A labelled palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub palace: u8,
    pub label: String,
}

impl Position {
    fn at(palace: u8) -> Self {
        Self {
            palace,
            label: palace::label(palace),
        }
    }
}

/// 文昌位 (study position).
pub fn wenchang(period: Period) -> Position {
    Position::at(WENCHANG_PALACE[usize::from(period.number() - 1)])
}

/// 财位 (wealth position).
pub fn caiwei(period: Period) -> Position {
    Position::at(CAIWEI_PALACE[usize::from(period.number() - 1)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palace::{Flight, fly};

    fn palace_of(star: u8, period: u8) -> u8 {
        let chart = fly(period, Flight::Forward);
        chart.iter().position(|s| *s == star).unwrap() as u8 + 1
    }

    #[test]
    fn tables_follow_period_charts() {
        for n in 1..=9u8 {
            let period = Period::new(n).unwrap();
            assert_eq!(wenchang(period).palace, palace_of(4, n), "文昌 period {n}");
            let wealth_star = if n == 8 { 9 } else { 8 };
            assert_eq!(caiwei(period).palace, palace_of(wealth_star, n), "财位 period {n}");
        }
    }

    #[test]
    fn period_nine_labels() {
        let p = Period::new(9).unwrap();
        assert_eq!(wenchang(p).label, "南(离)");
        assert_eq!(caiwei(p).label, "东南(巽)");
    }
}
