//! High-resolution land polygon index.
//!
//! Catches the small islands and archipelagos that fall between the cells of
//! the coarse [`crate::mask::LandGrid`]. Polygon bounding boxes live in an
//! R-tree; candidates are confirmed with an exact point/polygon intersection
//! test, so a point on a coastline counts as land.

use std::path::Path;

use geo::{BoundingRect, Coord, Intersects, LineString, Point, Polygon};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};
use shapefile::{PolygonRing, Reader, Shape};

use crate::error::LandDataError;
use crate::geodesy::wrap_longitude;
use crate::traits::LandSource;

/// Spatial index over land polygons in `(lon, lat)` degrees.
#[derive(Debug, Clone, Default)]
pub struct PolygonIndex {
    polygons: Vec<Polygon<f64>>,
    tree: RTree<GeomWithData<Rectangle<Point<f64>>, usize>>,
}

impl PolygonIndex {
    /// Creates an index from polygons. Degenerate polygons are skipped.
    pub fn new(polygons: impl IntoIterator<Item = Polygon<f64>>) -> Self {
        let polygons: Vec<Polygon<f64>> = polygons
            .into_iter()
            .filter(|polygon| polygon.exterior().0.len() >= 4)
            .collect();

        let entries = polygons
            .iter()
            .enumerate()
            .filter_map(|(idx, polygon)| {
                let rect = polygon.bounding_rect()?;
                let envelope = AABB::from_corners(
                    Point::new(rect.min().x, rect.min().y),
                    Point::new(rect.max().x, rect.max().y),
                );
                Some(GeomWithData::new(Rectangle::from_aabb(envelope), idx))
            })
            .collect();

        Self {
            polygons,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Appends every polygon of an ESRI shapefile.
    ///
    /// Outer rings start a new polygon; inner rings become holes of the most
    /// recent outer ring.
    pub fn read_shapefile(path: &Path) -> Result<Vec<Polygon<f64>>, LandDataError> {
        let mut reader = Reader::from_path(path)?;
        let mut polygons = Vec::new();

        for result in reader.iter_shapes_and_records() {
            let (shape, _record) = result?;
            let Shape::Polygon(polygon) = shape else {
                continue;
            };

            let mut exterior: Option<LineString<f64>> = None;
            let mut holes: Vec<LineString<f64>> = Vec::new();
            for ring in polygon.rings() {
                let line = LineString::from(
                    ring.points()
                        .iter()
                        .map(|p| Coord { x: p.x, y: p.y })
                        .collect::<Vec<_>>(),
                );
                match ring {
                    PolygonRing::Outer(_) => {
                        if let Some(outer) = exterior.take() {
                            polygons.push(Polygon::new(outer, std::mem::take(&mut holes)));
                        }
                        exterior = Some(line);
                    }
                    PolygonRing::Inner(_) => holes.push(line),
                }
            }
            if let Some(outer) = exterior {
                polygons.push(Polygon::new(outer, holes));
            }
        }

        Ok(polygons)
    }

    /// Loads and indexes the given shapefiles.
    pub fn load(paths: &[&Path]) -> Result<Self, LandDataError> {
        let mut polygons = Vec::new();
        for path in paths {
            polygons.extend(Self::read_shapefile(path)?);
        }
        Ok(Self::new(polygons))
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl LandSource for PolygonIndex {
    fn is_land(&self, lat: f64, lon: f64) -> bool {
        let point = Point::new(wrap_longitude(lon), lat);
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point(point))
            .any(|entry| self.polygons[entry.data].intersects(&point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(min_lon: f64, min_lat: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: min_lon, y: min_lat),
            (x: min_lon + size, y: min_lat),
            (x: min_lon + size, y: min_lat + size),
            (x: min_lon, y: min_lat + size),
            (x: min_lon, y: min_lat),
        ]
    }

    #[test]
    fn test_point_inside_small_island() {
        // A ~2 km island the coarse grid would miss
        let index = PolygonIndex::new(vec![square(97.5, 1.0, 0.02)]);
        assert_eq!(index.len(), 1);
        assert!(index.is_land(1.01, 97.51));
        assert!(!index.is_land(1.05, 97.51));
    }

    #[test]
    fn test_boundary_counts_as_land() {
        let index = PolygonIndex::new(vec![square(0.0, 0.0, 1.0)]);
        assert!(index.is_land(0.0, 0.5));
        assert!(index.is_land(1.0, 1.0));
    }

    #[test]
    fn test_hole_is_water() {
        let outer = square(0.0, 0.0, 4.0).exterior().clone();
        let lake = square(1.0, 1.0, 2.0).exterior().clone();
        let index = PolygonIndex::new(vec![Polygon::new(outer, vec![lake])]);
        assert!(index.is_land(0.5, 0.5));
        assert!(!index.is_land(2.0, 2.0));
    }

    #[test]
    fn test_longitude_is_wrapped_before_lookup() {
        let index = PolygonIndex::new(vec![square(-179.5, -17.0, 0.5)]);
        assert!(index.is_land(-16.8, 180.75));
    }

    #[test]
    fn test_empty_index_is_all_water() {
        let index = PolygonIndex::default();
        assert!(index.is_empty());
        assert!(!index.is_land(0.0, 0.0));
    }

    #[test]
    fn test_degenerate_polygons_are_skipped() {
        let sliver = Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]), vec![]);
        let index = PolygonIndex::new(vec![sliver, square(5.0, 5.0, 1.0)]);
        assert_eq!(index.len(), 1);
        assert!(index.is_land(5.5, 5.5));
    }
}
