//! Coarse global land grid.
//!
//! An equirectangular bitmask covering the whole globe: row 0 is the band
//! just south of 90°N, column 0 the band just east of 180°W. Fast enough to
//! query thousands of times per route; too coarse to see small islands, which
//! is what [`crate::polygons::PolygonIndex`] is for.
//!
//! On disk the grid is usually a binary PBM (`P4`) raster where a set bit
//! means land. Any grayscale raster `image` decodes works too: dark is land.

use std::io::Cursor;
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{GrayImage, ImageEncoder, ImageFormat, ImageReader, Luma};

use crate::error::LandDataError;
use crate::geodesy::wrap_longitude;
use crate::traits::LandSource;

/// Luma value of a land cell. PBM black (a set bit) decodes to 0.
const LAND: u8 = 0;
const WATER: u8 = 255;

#[derive(Debug, Clone)]
pub struct LandGrid {
    /// Row 0 is the northernmost band. Dark pixels are land.
    image: GrayImage,
}

impl LandGrid {
    /// Builds a grid with `cells_per_degree` resolution by evaluating
    /// `is_land` at each cell centre.
    pub fn from_fn<F>(cells_per_degree: u32, is_land: F) -> Self
    where
        F: Fn(f64, f64) -> bool,
    {
        let cells_per_degree = cells_per_degree.max(1);
        let cell = 1.0 / cells_per_degree as f64;
        let image = GrayImage::from_fn(360 * cells_per_degree, 180 * cells_per_degree, |col, row| {
            let lat = 90.0 - (row as f64 + 0.5) * cell;
            let lon = -180.0 + (col as f64 + 0.5) * cell;
            Luma([if is_land(lat, lon) { LAND } else { WATER }])
        });
        Self { image }
    }

    /// Loads a land raster in any format `image` can decode. A PBM bitmap is
    /// the usual choice: set bits are land.
    pub fn load(path: &Path) -> Result<Self, LandDataError> {
        let reader = ImageReader::open(path).map_err(|source| LandDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = reader.with_guessed_format().map_err(|source| LandDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_image(decoded.decode()?.to_luma8())
    }

    /// Parses a PBM raster from memory.
    pub fn from_pbm(bytes: &[u8]) -> Result<Self, LandDataError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Pnm)?;
        Self::from_image(decoded.to_luma8())
    }

    /// Wraps a grayscale raster covering the whole globe.
    pub fn from_image(image: GrayImage) -> Result<Self, LandDataError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(LandDataError::InvalidGrid("empty raster".to_string()));
        }
        Ok(Self { image })
    }

    /// Serializes the grid as a binary PBM (`P4`) bitmap.
    pub fn to_pbm(&self) -> Result<Vec<u8>, LandDataError> {
        // The bitmap encoder takes samples in 0..=1 and writes 0 as a set bit.
        let samples: Vec<u8> = self.image.as_raw().iter().map(|&luma| u8::from(luma > 127)).collect();
        let mut out = Vec::new();
        PnmEncoder::new(Cursor::new(&mut out))
            .with_subtype(PnmSubtype::Bitmap(SampleEncoding::Binary))
            .write_image(
                &samples,
                self.image.width(),
                self.image.height(),
                image::ExtendedColorType::L8,
            )?;
        Ok(out)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Cell size in degrees of longitude.
    pub fn cell_size_deg(&self) -> f64 {
        360.0 / self.width() as f64
    }

    fn cell_index(&self, lat: f64, lon: f64) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        let lon = wrap_longitude(lon);
        let lat = lat.clamp(-90.0, 90.0);
        let col = ((lon + 180.0) / 360.0 * width as f64).floor() as u32;
        let row = ((90.0 - lat) / 180.0 * height as f64).floor() as u32;
        (col.min(width - 1), row.min(height - 1))
    }
}

impl LandSource for LandGrid {
    fn is_land(&self, lat: f64, lon: f64) -> bool {
        let (col, row) = self.cell_index(lat, lon);
        self.image.get_pixel(col, row)[0] <= 127
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_grid() -> LandGrid {
        // Land between 10°E..20°E and 40°N..50°N, 4 cells per degree
        LandGrid::from_fn(4, |lat, lon| (10.0..20.0).contains(&lon) && (40.0..50.0).contains(&lat))
    }

    #[test]
    fn test_from_fn_classifies_cells() {
        let grid = box_grid();
        assert_eq!(grid.width(), 1440);
        assert_eq!(grid.height(), 720);
        assert!((grid.cell_size_deg() - 0.25).abs() < 1e-12);
        assert!(grid.is_land(45.0, 15.0));
        assert!(!grid.is_land(45.0, 25.0));
        assert!(!grid.is_land(-45.0, 15.0));
    }

    #[test]
    fn test_longitude_is_wrapped() {
        let grid = box_grid();
        assert!(grid.is_land(45.0, 15.0 + 360.0));
        assert!(grid.is_land(45.0, 15.0 - 360.0));
    }

    #[test]
    fn test_poles_and_edges_do_not_panic() {
        let grid = box_grid();
        assert!(!grid.is_land(90.0, 180.0));
        assert!(!grid.is_land(-90.0, -180.0));
        assert!(!grid.is_land(95.0, 0.0));
    }

    #[test]
    fn test_pbm_roundtrip_preserves_classification() {
        let grid = box_grid();
        let parsed = LandGrid::from_pbm(&grid.to_pbm().expect("encode pbm")).expect("parse pbm");
        assert_eq!(parsed.width(), grid.width());
        for (lat, lon) in [(45.0, 15.0), (45.0, 25.0), (40.1, 10.1), (39.9, 10.1)] {
            assert_eq!(parsed.is_land(lat, lon), grid.is_land(lat, lon));
        }
    }

    #[test]
    fn test_pbm_header_with_comment() {
        let mut bytes = b"P4\n# land mask\n8 2\n".to_vec();
        bytes.extend_from_slice(&[0b1000_0000, 0b0000_0001]);
        let grid = LandGrid::from_pbm(&bytes).expect("parse pbm");
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 2);
        // Row 0 covers 0..90°N, column 0 covers 180°W..135°W
        assert!(grid.is_land(45.0, -170.0));
        assert!(!grid.is_land(45.0, -100.0));
        // Row 1, column 7 is land: 135°E..180°E south of the equator
        assert!(grid.is_land(-45.0, 170.0));
    }

    #[test]
    fn test_pbm_rejects_bad_input() {
        assert!(LandGrid::from_pbm(b"P9\n2 2\n\x00").is_err());
        assert!(LandGrid::from_pbm(b"P4\n16 16\n\x00").is_err());
        assert!(LandGrid::from_pbm(b"").is_err());
    }

    #[test]
    fn test_pbm_with_huge_dimensions_is_an_error() {
        let result = LandGrid::from_pbm(b"P4\n4294967295 4294967295\n\x00\x00");
        assert!(result.is_err());
        let result = LandGrid::from_pbm(b"P4\n18446744073709551615 2\n\x00");
        assert!(result.is_err());
    }

    #[test]
    fn test_png_raster_is_accepted() {
        let dir = std::env::temp_dir().join(format!("sea-route-mask-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("land_mask.png");
        // Western hemisphere land, eastern hemisphere water
        GrayImage::from_fn(4, 2, |col, _| Luma([if col < 2 { 0 } else { 255 }]))
            .save(&path)
            .expect("write png");

        let grid = LandGrid::load(&path).expect("load png");
        assert!(grid.is_land(10.0, -90.0));
        assert!(!grid.is_land(10.0, 90.0));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
