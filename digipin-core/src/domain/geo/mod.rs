// digipin-core/src/domain/geo/mod.rs

pub mod coordinate;
pub mod grid;

pub use coordinate::Coordinate;
pub use grid::{DigipinResponse, GridBoundary, GridCell, GridCoder};
