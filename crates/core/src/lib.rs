//! Saltmap is a tile-based 2D world generator. A world is a grid of tiles,
//! each with a height, temperature and salinity. Land tiles are grouped into
//! continents, salt spreads from the sea onto nearby land, and every tile gets
//! a biome and a settlement suitability score. This crate contains all the
//! generation logic. Presentation is up to the caller.
//!
//! ```
//! use saltmap::{World, WorldConfig};
//!
//! let config = WorldConfig {
//!     width: 32,
//!     height: 32,
//!     ..WorldConfig::default()
//! };
//! let mut world = World::new(config).unwrap();
//! println!("{} continents", world.continents().len());
//!
//! // Flood the world a bit and try again
//! world.set_sea_level(0.8).unwrap();
//! world.generate().unwrap();
//! ```
//!
//! See [WorldConfig] for details on how the world generation can be customized.

mod config;
mod error;
mod util;
mod world;

pub use crate::{
    config::{AutomatonConfig, NoiseLayerConfig, Seed, WorldConfig},
    error::WorldError,
    util::{
        range::{NumRange, RangeValue},
        truncate,
    },
    world::{
        biome::{Biome, BiomeId, BiomeTable},
        continent::{Continent, ContinentId},
        generate::noise::{octave_noise, NoiseSource, SimplexNoise},
        grid::{DirectionValues, TileDirection, TileGrid, TilePoint},
        tile::Tile,
        World,
    },
};
