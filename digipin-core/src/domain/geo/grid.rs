// digipin-core/src/domain/geo/grid.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::geo::Coordinate;

/// Cells per degree. 10 000 gives cells of 1e-4 degree.
pub const SCALE: f64 = 10_000.0;

/// Edge of the square boundary reported around an encoded coordinate.
/// Independent of [`SCALE`].
pub const CELL_EDGE_DEGREES: f64 = 0.000036;

/// Nominal precision advertised with every code. Not recomputed per latitude.
pub const PRECISION_METERS: u32 = 4;

pub const CODE_PREFIX: &str = "DP";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBoundary {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GridBoundary {
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&coordinate.latitude)
            && (self.lon_min..=self.lon_max).contains(&coordinate.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub code: String,
    pub boundary: GridBoundary,
    pub precision_meters: u32,
}

/// Wire shape of a generated code, as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigipinResponse {
    pub digipin: String,
    pub latitude: f64,
    pub longitude: f64,
    pub grid_boundaries: GridBoundary,
    pub precision_meters: u32,
    pub timestamp: DateTime<Utc>,
}

impl DigipinResponse {
    pub fn from_cell(coordinate: Coordinate, cell: GridCell, timestamp: DateTime<Utc>) -> Self {
        Self {
            digipin: cell.code,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            grid_boundaries: cell.boundary,
            precision_meters: cell.precision_meters,
            timestamp,
        }
    }
}

/// Deterministic placeholder grid coder.
///
/// The code concatenates the floor-quantized latitude and longitude cell
/// indices in upper-case hex behind a fixed prefix. There is no collision
/// guarantee across the coordinate space, only determinism.
pub struct GridCoder;

impl GridCoder {
    /// Encodes a coordinate. Out-of-range input is rejected here too, even
    /// though callers are expected to validate user input first.
    pub fn encode(coordinate: Coordinate) -> Result<GridCell, DomainError> {
        coordinate.ensure_valid()?;

        let lat_cell = ((coordinate.latitude + 90.0) * SCALE).floor() as u64;
        let lon_cell = ((coordinate.longitude + 180.0) * SCALE).floor() as u64;

        Ok(GridCell {
            code: format!("{CODE_PREFIX}{lat_cell:X}{lon_cell:X}"),
            boundary: Self::boundary_around(coordinate),
            precision_meters: PRECISION_METERS,
        })
    }

    /// Square of [`CELL_EDGE_DEGREES`] centred on the input, not on the cell.
    pub fn boundary_around(coordinate: Coordinate) -> GridBoundary {
        let half = CELL_EDGE_DEGREES / 2.0;
        GridBoundary {
            lat_min: coordinate.latitude - half,
            lat_max: coordinate.latitude + half,
            lon_min: coordinate.longitude - half,
            lon_max: coordinate.longitude + half,
        }
    }
}
