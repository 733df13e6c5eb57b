//! Four-pillar (BaZi) charts.
//!
//! This crate provides:
//! - Birth input validation and resolution (civil/true solar time, jie month)
//! - Year, month, day and hour pillars with hidden stems and nayin
//! - Weighted five-element tally, ten-god profile, day-master strength
//! - Favorable/unfavorable element summary and template interpretation
//! - Luck-pillar (大运) sequence with age/year lookup
//!
//! All computation is pure; identical input yields identical output.

pub mod analysis;
pub mod boundary;
pub mod chart;
pub mod config;
pub mod dayun;
pub mod error;
pub mod input;
pub mod interpretation;
pub mod pillars;
pub mod resolver;

pub use analysis::{
    DayMasterStrength, ElementBalance, ElementTally, StemSource, StrengthLevel, TenGodEntry,
    TenGodProfile, WeightedStem, day_master_strength, element_balance, tally_elements,
    ten_god_profile, weighted_stems,
};
pub use boundary::{BoundaryMarkers, DayBoundary, UncertaintyLevel};
pub use chart::{BaziChart, compute_chart};
pub use config::{BaziConfig, LuckAnchor, WeightingPolicy, YearBoundary, ZiHourPolicy};
pub use dayun::{LuckDirection, LuckPillar, LuckPillars, StartAge, luck_direction, luck_pillars};
pub use error::BaziError;
pub use input::{BirthDate, BirthInput, CalendarKind, Gender, RawBirth};
pub use interpretation::{Interpretation, interpret};
pub use pillars::{FourPillars, Pillar, PillarPosition, four_pillars};
pub use resolver::{ResolvedBirth, resolve};
