//! Land dataset locations and loading.
//!
//! Expected layout under the data root:
//!
//! ```text
//! <data_root>/land_mask.pbm          coarse global grid (P4 bitmap)
//! <data_root>/ne_10m_land.shp        Natural Earth 1:10m land
//! <data_root>/ne_10m_minor_islands.shp
//! ```
//!
//! Missing or unreadable files are logged and skipped. The resulting oracle
//! may be partially or fully unavailable; that is a valid outcome, not an
//! error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::land::LandOracle;
use crate::mask::LandGrid;
use crate::polygons::PolygonIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandDataConfig {
    pub data_root: PathBuf,
    /// Coarse grid file name, relative to `data_root`.
    pub grid_file: String,
    /// Polygon shapefiles, relative to `data_root`.
    pub polygon_files: Vec<String>,
}

impl Default for LandDataConfig {
    fn default() -> Self {
        Self::new("land-data")
    }
}

impl LandDataConfig {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            grid_file: "land_mask.pbm".to_string(),
            polygon_files: vec![
                "ne_10m_land.shp".to_string(),
                "ne_10m_minor_islands.shp".to_string(),
            ],
        }
    }

    fn resolved_root(&self) -> PathBuf {
        if self.data_root.is_absolute() {
            self.data_root.clone()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&self.data_root))
                .unwrap_or_else(|_| self.data_root.clone())
        }
    }

    pub fn grid_path(&self) -> PathBuf {
        self.resolved_root().join(&self.grid_file)
    }

    pub fn polygon_paths(&self) -> Vec<PathBuf> {
        let root = self.resolved_root();
        self.polygon_files.iter().map(|name| root.join(name)).collect()
    }
}

impl LandOracle {
    /// Builds an oracle from whatever land data exists under the configured
    /// root.
    pub fn load(config: &LandDataConfig) -> Self {
        let mut oracle = LandOracle::unavailable();

        let grid_path = config.grid_path();
        if let Some(grid) = load_grid(&grid_path) {
            info!(
                path = %grid_path.display(),
                width = grid.width(),
                height = grid.height(),
                "loaded coarse land grid"
            );
            oracle = oracle.with_coarse(grid);
        }

        let mut polygons = Vec::new();
        for path in config.polygon_paths() {
            if !path.exists() {
                warn!(path = %path.display(), "land polygon file not found, skipping");
                continue;
            }
            match PolygonIndex::read_shapefile(&path) {
                Ok(read) => {
                    info!(path = %path.display(), polygons = read.len(), "loaded land polygons");
                    polygons.extend(read);
                }
                Err(err) => warn!(path = %path.display(), "failed to read land polygons: {}", err),
            }
        }
        let index = PolygonIndex::new(polygons);
        if !index.is_empty() {
            oracle = oracle.with_fine(index);
        }

        if !oracle.is_available() {
            warn!(
                root = %config.resolved_root().display(),
                "no land data available, land avoidance disabled"
            );
        }
        oracle
    }
}

fn load_grid(path: &Path) -> Option<LandGrid> {
    if !path.exists() {
        warn!(path = %path.display(), "land grid file not found, skipping");
        return None;
    }
    match LandGrid::load(path) {
        Ok(grid) => Some(grid),
        Err(err) => {
            warn!(path = %path.display(), "failed to load land grid: {}", err);
            None
        }
    }
}
