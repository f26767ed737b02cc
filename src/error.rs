//! Error types for routing, land data and route planning.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of the external maritime routing graph service.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("routing service request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("routing service timed out")]
    Timeout,

    #[error("routing service responded with HTTP {0}")]
    Status(u16),

    #[error("routing service found no route: {0}")]
    NoRoute(String),

    #[error("routing service returned an empty geometry")]
    EmptyGeometry,
}

impl From<reqwest::Error> for RouterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RouterError::Timeout
        } else {
            RouterError::Http(err)
        }
    }
}

/// Failure while loading a land classification dataset.
#[derive(Debug, Error)]
pub enum LandDataError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shapefile error: {0}")]
    Shapefile(String),

    #[error("invalid land grid: {0}")]
    InvalidGrid(String),

    #[error("land grid raster: {0}")]
    Image(#[from] image::ImageError),
}

impl From<shapefile::Error> for LandDataError {
    fn from(err: shapefile::Error) -> Self {
        LandDataError::Shapefile(err.to_string())
    }
}

/// Hard failure of a route request. Degraded results are reported through
/// [`crate::pipeline::RouteDiagnostics`] instead.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Routing(#[from] RouterError),

    #[error("invalid coordinate ({lon}, {lat}): longitude must be in [-180, 180], latitude in [-90, 90]")]
    InvalidCoordinate { lon: f64, lat: f64 },
}
