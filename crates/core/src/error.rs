use crate::world::grid::TilePoint;
use thiserror::Error;
use validator::ValidationErrors;

/// Everything that can go wrong in world generation. Neither variant is
/// transient, so there's never a reason to retry: both indicate that the
/// caller (or the biome table) needs fixing.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Sea level or temperature outside [0,1], an empty grid, or some other
    /// config field out of its range. Rejected before any generation happens.
    #[error("invalid world parameters: {0}")]
    InvalidParameters(#[from] ValidationErrors),

    /// A tile's climate fell into a gap in the biome table. This is a bug in
    /// the table, and we refuse to guess a biome for the tile.
    #[error(
        "no biome matches tile {position} \
        (height={height}, temperature={temperature}, salinity={salinity})"
    )]
    BiomeClassification {
        position: TilePoint,
        height: f64,
        temperature: f64,
        salinity: f64,
    },
}
