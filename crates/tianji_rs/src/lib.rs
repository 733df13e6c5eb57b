//! Cached engine facade for tianji charts.
//!
//! Validates requests, computes BaZi and Xuankong reports, and memoizes them
//! by the SHA-256 of a canonical request encoding.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tianji_rs::*;
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! let report = engine.xuankong(&XuankongRequest::new("2010-06-01", 180.0))?;
//! println!("{} {:?}", report.facing_label, report.geju.types);
//! ```

pub mod cache;
pub mod canonical;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod request;

pub use cache::{CacheStats, ResultCache};
pub use canonical::{canonical_bazi, canonical_xuankong, sha256_hex};
pub use config::{CacheConfig, EngineConfig};
pub use engine::Engine;
pub use error::EngineError;
pub use report::{ALGORITHM_VERSION, BaziReport, ReportMeta, SCHEMA_VERSION, XuankongReport};
pub use request::{BaziRequest, Facing, XuankongRequest};

// Re-export the domain types callers need to build requests and read reports.
pub use tianji_bazi::{
    BaziConfig, CalendarKind, FourPillars, Gender, LuckAnchor, UncertaintyLevel, WeightingPolicy,
    YearBoundary, ZiHourPolicy,
};
pub use tianji_xuankong::{
    EvaluationProfile, GejuKind, HeadingMeasurement, Period, XuankongConfig,
};
