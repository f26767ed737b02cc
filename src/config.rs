//! Pipeline tuning knobs.
//!
//! Every threshold here was tuned empirically against the Natural Earth
//! 1:10m land set and a 1/4° global grid. Retune them together when the land
//! dataset changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub crossing: CrossingConfig,
    pub detour: DetourConfig,
    pub sanitize: SanitizeConfig,
    pub cache: CacheConfig,
    /// Densify cap for every output segment.
    pub max_segment_km: f64,
    /// Avoid-land budget before densification.
    pub first_pass_iterations: usize,
    /// Avoid-land budget after densification and sanitizing.
    pub second_pass_iterations: usize,
    /// The graph's first/last point is replaced by the exact requested
    /// endpoint within this distance, and the endpoint is added as a new
    /// vertex beyond it.
    pub endpoint_tolerance_m: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            crossing: CrossingConfig::default(),
            detour: DetourConfig::default(),
            sanitize: SanitizeConfig::default(),
            cache: CacheConfig::default(),
            max_segment_km: 75.0,
            first_pass_iterations: 8,
            second_pass_iterations: 5,
            endpoint_tolerance_m: 1_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingConfig {
    /// Interior samples taken along a checked segment.
    pub sample_count: usize,
    /// Consecutive land samples needed to report a crossing.
    pub consecutive_land_samples: usize,
    /// First sample index used when the start point is on land.
    pub land_start_skip: usize,
    /// Fraction of the samples kept when the end point is on land.
    pub land_end_fraction: f64,
    /// Segments shorter than this are never checked.
    pub micro_segment_m: f64,
    /// Segments up to this length with a land endpoint are trusted
    /// (canal and strait transits).
    pub canal_segment_m: f64,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            sample_count: 30,
            consecutive_land_samples: 2,
            land_start_skip: 3,
            land_end_fraction: 0.75,
            micro_segment_m: 1_000.0,
            canal_segment_m: 20_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetourConfig {
    /// Positions along the segment where offset waypoints are tried.
    pub fractions: Vec<f64>,
    /// Segments shorter than this use `short_offsets_km`.
    pub short_segment_m: f64,
    pub short_offsets_km: Vec<f64>,
    pub long_offsets_km: Vec<f64>,
    /// Routing-graph sub-routes longer than this multiple of the direct
    /// distance are rejected as circumnavigations.
    pub circumnavigation_factor: f64,
}

impl Default for DetourConfig {
    fn default() -> Self {
        Self {
            fractions: vec![0.5, 0.33, 0.67],
            short_segment_m: 100_000.0,
            short_offsets_km: vec![10.0, 20.0, 30.0, 50.0],
            long_offsets_km: vec![50.0, 100.0, 150.0, 200.0],
            circumnavigation_factor: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Coastal clips are snapped to water found within this radius.
    pub tight_snap_radius_deg: f64,
    /// Lattice step of the tight snap (one coarse grid cell).
    pub snap_step_deg: f64,
    /// Land points with water within this radius are kept as passage nodes.
    pub passage_radius_deg: f64,
    /// Radius and lattice step of the fine itinerary snap.
    pub fine_snap_radius_deg: f64,
    pub fine_snap_step_deg: f64,
    /// Retry radius of the itinerary snap when the fine radius finds nothing.
    pub fine_snap_wide_radius_deg: f64,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            tight_snap_radius_deg: 0.3,
            snap_step_deg: 0.25,
            passage_radius_deg: 1.5,
            fine_snap_radius_deg: 0.15,
            fine_snap_step_deg: 0.01,
            fine_snap_wide_radius_deg: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Decimal places kept when building cache keys (4 ≈ 11 m).
    pub precision_decimals: u32,
    /// Maximum number of cached legs.
    pub capacity: usize,
    /// Entries older than this are recomputed. `None` keeps them until
    /// evicted.
    pub ttl_secs: Option<u64>,
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            precision_decimals: 4,
            capacity: 1024,
            ttl_secs: Some(24 * 3600),
        }
    }
}
