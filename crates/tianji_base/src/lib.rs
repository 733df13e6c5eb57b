//! Cyclic primitives of Chinese calendrics.
//!
//! This crate provides:
//! - The five elements and their generating/controlling relations
//! - The 10 heavenly stems and 12 earthly branches, with hidden stems
//! - The 60-term sexagenary cycle with its parity invariant
//! - Nayin labels and the ten-god relation table
//!
//! Everything is constant-table dispatch over small integer indices.

pub mod branch;
pub mod element;
pub mod error;
pub mod nayin;
pub mod sexagenary;
pub mod stem;
pub mod ten_god;

pub use branch::{ALL_BRANCHES, Branch, QiRank};
pub use element::{ALL_ELEMENTS, Element, ElementRelation, Polarity};
pub use error::BaseError;
pub use nayin::{Nayin, nayin_for_index};
pub use sexagenary::{DAY_CYCLE_JDN_OFFSET, Sexagenary};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{ALL_TEN_GOD_FAMILIES, ALL_TEN_GODS, TenGod, TenGodFamily};
