mod continent;
mod field;
pub mod noise;
mod salinity;

use crate::{
    config::WorldConfig,
    error::WorldError,
    timed,
    world::{
        biome::BiomeTable,
        continent::Continent,
        generate::{
            continent::ContinentGenerator, field::FieldGenerator,
            noise::NoiseSource, salinity::SalinityGenerator,
        },
        grid::{CenterDistance, TileGrid},
        tile::Tile,
    },
};
use anyhow::Context;
use std::fmt::Debug;

/// Everything one generation pass reads and writes. This borrows the pieces
/// of a [World](crate::World) that generation needs, and the fields are
/// public so that generators can borrow several of them at once.
///
/// Generators that need to read neighbors while writing a tile compute the
/// new value from immutable reads first, then write it in a separate step.
/// That's simpler (and faster) than any sort of shared-mutability trickery.
pub(crate) struct WorldBuilder<'a> {
    /// Please **do not mutate the config**. It's a reference for a reason.
    pub config: &'a WorldConfig,
    pub noise: &'a dyn NoiseSource,
    pub biomes: &'a BiomeTable,
    pub center_distance: CenterDistance,

    /// The grid being generated. Tiles are rewritten in place, but can never
    /// be added, removed or moved.
    pub tiles: &'a mut TileGrid<Tile>,

    /// Continents, sorted largest first. Populated by [ContinentGenerator].
    pub continents: &'a mut Vec<Continent>,

    /// Storage indexes of every land tile, in scan order. Collected by
    /// [FieldGenerator] and consumed by [ContinentGenerator].
    pub land: Vec<usize>,
}

impl<'a> WorldBuilder<'a> {
    pub fn new(
        config: &'a WorldConfig,
        noise: &'a dyn NoiseSource,
        biomes: &'a BiomeTable,
        tiles: &'a mut TileGrid<Tile>,
        continents: &'a mut Vec<Continent>,
    ) -> Self {
        // Nothing from a previous pass can leak into this one
        continents.clear();
        Self {
            config,
            noise,
            biomes,
            center_distance: CenterDistance::new(config.width, config.height),
            tiles,
            continents,
            land: Vec::new(),
        }
    }

    /// Regenerate the whole world by running each generation step in order.
    /// The order is very important!
    pub fn generate_world(mut self) -> anyhow::Result<()> {
        self.apply_generator(FieldGenerator)?;
        self.apply_generator(ContinentGenerator)?;
        self.apply_generator(SalinityGenerator)?;
        Ok(())
    }

    /// A helper to run a generation step on this builder.
    fn apply_generator(
        &mut self,
        generator: impl Debug + Generate,
    ) -> anyhow::Result<()> {
        timed!(&format!("{:?}", generator), generator.generate(self))
            .with_context(|| format!("error in {:?}", generator))
    }
}

/// A single step of world generation. Each step reads what earlier steps
/// produced and adds more, until the world is complete.
trait Generate {
    /// Apply this step to the world. Steps can rewrite tiles but never add,
    /// remove or move them. Any error here means a bug (e.g. in the biome
    /// table), not bad input, since input is validated up front.
    fn generate(&self, world: &mut WorldBuilder) -> Result<(), WorldError>;
}
