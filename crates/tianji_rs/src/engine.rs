//! The cached engine.

use std::sync::Arc;

use tianji_xuankong::{
    HeadingMeasurement, compute_chart as compute_plate_chart, compute_chart_from_heading,
};

use crate::cache::{CacheStats, ResultCache};
use crate::canonical::{
    QUALITY_DECIMALS, canonical_bazi, canonical_xuankong, normalize_birth, normalize_facing,
    round_to, sha256_hex,
};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::report::{BaziReport, XuankongReport};
use crate::request::{BaziRequest, Facing, XuankongRequest};

/// Computes BaZi and Xuankong reports, memoizing each pipeline in its own
/// cache. `Send + Sync`; share it behind an `Arc`.
pub struct Engine {
    config: EngineConfig,
    bazi_cache: ResultCache<BaziReport>,
    xuankong_cache: ResultCache<XuankongReport>,
}

impl Engine {
    /// Validate `config` and build caches from its `[cache]` section.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let (bazi_cache, xuankong_cache) = if config.cache.enabled {
            (
                ResultCache::new(config.cache.ttl()),
                ResultCache::new(config.cache.ttl()),
            )
        } else {
            (ResultCache::disabled(), ResultCache::disabled())
        };
        Ok(Self::with_caches(config, bazi_cache, xuankong_cache))
    }

    /// Use caller-built caches. `config` is assumed valid.
    pub fn with_caches(
        config: EngineConfig,
        bazi_cache: ResultCache<BaziReport>,
        xuankong_cache: ResultCache<XuankongReport>,
    ) -> Self {
        Self {
            config,
            bazi_cache,
            xuankong_cache,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bazi(&self, request: &BaziRequest) -> Result<Arc<BaziReport>, EngineError> {
        let config = request.config.as_ref().unwrap_or(&self.config.bazi);
        config.validate()?;
        let input = normalize_birth(request.to_input()?);
        let hash = sha256_hex(&canonical_bazi(&input, config)?);
        tracing::debug!(hash = %hash, "bazi request");

        self.bazi_cache.get_or_try_insert_with(&hash, || {
            let chart = tianji_bazi::compute_chart(&input, config)?;
            tracing::info!(
                pillars = %chart.pillars.summary(),
                uncertainty = ?chart.markers.uncertainty_level,
                "bazi report computed"
            );
            Ok(BaziReport::from_chart(chart, hash.clone()))
        })
    }

    pub fn xuankong(&self, request: &XuankongRequest) -> Result<Arc<XuankongReport>, EngineError> {
        let config = request.config.as_ref().unwrap_or(&self.config.xuankong);
        config.validate()?;
        let build_date = request.parse_build_date()?;
        let (degrees, quality) = match &request.facing {
            Facing::Degrees(d) => {
                if !d.is_finite() {
                    return Err(EngineError::Validation {
                        field: "facing_degrees",
                        reason: "must be a finite number".into(),
                    });
                }
                (normalize_facing(*d), None)
            }
            Facing::Heading(h) => {
                h.validate()?;
                let quality = round_to(h.quality, QUALITY_DECIMALS);
                (normalize_facing(h.true_facing()), Some(quality))
            }
        };
        let hash = sha256_hex(&canonical_xuankong(build_date, degrees, quality, config)?);
        tracing::debug!(hash = %hash, "xuankong request");

        self.xuankong_cache.get_or_try_insert_with(&hash, || {
            // Declination is already folded into `degrees`.
            let chart = match quality {
                None => compute_plate_chart(build_date, degrees, config)?,
                Some(quality) => {
                    let heading = HeadingMeasurement {
                        facing_degrees: degrees,
                        declination_degrees: 0.0,
                        quality,
                    };
                    compute_chart_from_heading(build_date, &heading, config)?
                }
            };
            tracing::info!(
                period = chart.period.number(),
                facing = %chart.facing_label,
                patterns = ?chart.geju.types,
                "xuankong report computed"
            );
            Ok(XuankongReport::from_chart(chart, hash.clone()))
        })
    }

    pub fn bazi_cache_stats(&self) -> CacheStats {
        self.bazi_cache.stats()
    }

    pub fn xuankong_cache_stats(&self) -> CacheStats {
        self.xuankong_cache.stats()
    }

    pub fn clear_caches(&self) {
        self.bazi_cache.clear();
        self.xuankong_cache.clear();
    }
}
