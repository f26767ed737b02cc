//! sea-route-planner
//!
//! Land-avoiding maritime routes: a routing graph proposes a polyline, and the
//! pipeline repairs every segment that crosses land before returning it.

pub mod traits;
pub mod error;
pub mod config;
pub mod polyline;
pub mod geodesy;
pub mod mask;
pub mod polygons;
pub mod land;
pub mod land_data;
pub mod crossing;
pub mod detour;
pub mod avoid;
pub mod densify;
pub mod sanitize;
pub mod cache;
pub mod pipeline;
pub mod export;
pub mod osrm;
pub mod direct;

pub use config::PipelineConfig;
pub use error::{LandDataError, PlanError, RouterError};
pub use land::LandOracle;
pub use pipeline::{PlannedRoute, RouteDiagnostics, RoutePlanner};
pub use polyline::{Polyline, Waypoint};
pub use traits::{LandSource, MaritimeRouter};
