//! OSRM HTTP adapter for a maritime routing graph.
//!
//! Speaks the OSRM `route/v1` API against a graph built with a ship profile
//! (or any service exposing the same endpoint) and returns the full route
//! geometry as a [`Polyline`].

use serde::Deserialize;
use tracing::debug;

use crate::error::RouterError;
use crate::geodesy::wrap_longitude;
use crate::polyline::{Polyline, Waypoint};
use crate::traits::MaritimeRouter;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "ship".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmRouter {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmRouter {
    pub fn new(config: OsrmConfig) -> Result<Self, RouterError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn url(&self, from: Waypoint, to: Waypoint) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            wrap_longitude(from.lon),
            from.lat,
            wrap_longitude(to.lon),
            to.lat
        )
    }
}

impl MaritimeRouter for OsrmRouter {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        let url = self.url(from, to);
        debug!(%url, "requesting route");

        let response = self.client.get(url).send()?;
        let status = response.status();
        // OSRM reports NoRoute/NoSegment as a JSON body on a 400.
        let body = match response.json::<OsrmRouteResponse>() {
            Ok(body) => body,
            Err(_) if !status.is_success() => return Err(RouterError::Status(status.as_u16())),
            Err(err) => return Err(err.into()),
        };

        if body.code != "Ok" {
            return Err(RouterError::NoRoute(body.message.unwrap_or(body.code)));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouterError::NoRoute("response contained no routes".to_string()))?;

        let points: Vec<Waypoint> = route
            .geometry
            .coordinates
            .into_iter()
            .filter(|coord| coord.len() >= 2)
            .map(|coord| Waypoint::new(coord[0], coord[1]))
            .collect();

        if points.is_empty() {
            return Err(RouterError::EmptyGeometry);
        }

        Ok(Polyline::new(points))
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<Vec<f64>>,
}
