//! Ports and offshore waypoints of a French round-the-world itinerary.
//!
//! Coordinates are in decimal degrees, WGS84.

use sea_route_planner::Waypoint;

/// A named stop.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
}

impl Stop {
    pub const fn new(name: &'static str, lon: f64, lat: f64) -> Self {
        Self { name, lon, lat }
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.lon, self.lat)
    }
}

// ============================================================================
// Atlantic and Mediterranean
// ============================================================================

pub const LA_ROCHELLE: Stop = Stop::new("La Rochelle", -1.152, 46.1591);
pub const AJACCIO: Stop = Stop::new("Ajaccio (Corse)", 8.7386, 41.9192);
pub const CANARIES: Stop = Stop::new("Iles Canari", -15.181, 29.325);
pub const CAPE_VERDE: Stop = Stop::new("Point intermédiaire Cap Verde", -24.531, 13.919);
pub const FORT_DE_FRANCE: Stop = Stop::new("Fort-de-France (Martinique)", -61.0731, 14.6037);

// ============================================================================
// Pacific (either side of the antimeridian)
// ============================================================================

pub const PAPEETE: Stop = Stop::new("Papeete (Polynésie française)", -149.5585, -17.5516);
pub const MATA_UTU: Stop = Stop::new("Mata-Utu (Wallis-et-Futuna)", -176.1736, -13.2825);
pub const NOUMEA: Stop = Stop::new("Nouméa (Nouvelle-Calédonie)", 166.4572, -22.2758);

pub const ATLANTIC_CROSSING: &[Stop] = &[LA_ROCHELLE, CANARIES, CAPE_VERDE, FORT_DE_FRANCE];

pub const PACIFIC_CROSSING: &[Stop] = &[PAPEETE, MATA_UTU, NOUMEA];

pub fn waypoints(stops: &[Stop]) -> Vec<Waypoint> {
    stops.iter().map(Stop::waypoint).collect()
}
