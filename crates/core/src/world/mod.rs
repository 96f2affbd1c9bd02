pub mod biome;
pub mod continent;
pub(crate) mod generate;
pub mod grid;
pub mod tile;

use crate::{
    config::WorldConfig,
    error::WorldError,
    timed,
    world::{
        biome::{Biome, BiomeId, BiomeTable},
        continent::{Continent, ContinentId},
        generate::{
            noise::{NoiseSource, SimplexNoise},
            WorldBuilder,
        },
        grid::{TileGrid, TilePoint},
        tile::Tile,
    },
};
use anyhow::Context;
use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use validator::Validate;

/// A generated world: a grid of tiles plus everything derived from them
/// (continents, biomes). The world owns its tiles outright. Tiles refer back
/// to world-level data only through plain IDs ([BiomeId], [ContinentId]),
/// which resolve through this struct.
///
/// Every call to [World::generate] rebuilds the whole grid from a new noise
/// seed. Nothing (continents, biomes, salinity) carries over from the
/// previous pass.
#[derive(Debug)]
pub struct World {
    /// Parameters for generation. Only changes through the mutators, which
    /// validate before committing.
    config: WorldConfig,

    /// Seed stream, seeded from the config seed. Each generation pass draws
    /// its noise seed from here.
    rng: Pcg64,

    noise: Box<dyn NoiseSource>,

    /// Seed the noise source was given for the current tiles
    noise_seed: u32,

    /// Rules for classifying tiles. Rebuilt whenever sea level changes.
    biomes: BiomeTable,

    tiles: TileGrid<Tile>,

    /// Sorted by size, largest first
    continents: Vec<Continent>,
}

impl World {
    /// Create and generate a world with the default noise source (OpenSimplex).
    /// Returns an error if the config is invalid.
    pub fn new(config: WorldConfig) -> anyhow::Result<Self> {
        Self::with_noise(config, SimplexNoise::default())
    }

    /// Create and generate a world with a custom noise source. The source
    /// gets reseeded before every generation pass.
    pub fn with_noise(
        config: WorldConfig,
        noise: impl NoiseSource + 'static,
    ) -> anyhow::Result<Self> {
        info!("Creating world with config {:#?}", config);
        config
            .validate()
            .map_err(WorldError::from)
            .context("invalid config")?;

        let mut world = Self {
            rng: Pcg64::seed_from_u64(config.seed.to_u64()),
            noise: Box::new(noise),
            noise_seed: 0,
            biomes: BiomeTable::new(config.sea_level),
            tiles: TileGrid::new(config.width, config.height, Tile::new),
            continents: Vec::new(),
            config,
        };
        world.generate()?;
        Ok(world)
    }

    /// Regenerate the entire world from a fresh noise seed, drawn from the
    /// world's seed stream. This could take a while for big worlds.
    pub fn generate(&mut self) -> anyhow::Result<()> {
        let seed = self.rng.gen::<u32>();
        self.generate_from_seed(seed)
    }

    /// Regenerate the entire world from a specific noise seed. With the same
    /// config (and noise source), the same seed always produces the same
    /// tiles.
    pub fn generate_from_seed(&mut self, seed: u32) -> anyhow::Result<()> {
        info!("Generating world with noise seed {}", seed);
        self.noise.reseed(seed);
        self.noise_seed = seed;

        let builder = WorldBuilder::new(
            &self.config,
            self.noise.as_ref(),
            &self.biomes,
            &mut self.tiles,
            &mut self.continents,
        );
        timed!(
            "World generation",
            log::Level::Info,
            builder.generate_world()
        )
    }

    /// Rebuild the biome table from the current sea level. Sea level changes
    /// do this already, so this is only needed to reset the table.
    pub fn make_biomes(&mut self) {
        self.biomes = BiomeTable::new(self.config.sea_level);
    }

    /// Change the sea level and rebuild the biome table to match. Tiles are
    /// left as they are until the next [World::generate]. Returns an error
    /// (and changes nothing) if the level is outside [0,1].
    pub fn set_sea_level(&mut self, sea_level: f64) -> anyhow::Result<()> {
        self.update_config(|config| config.sea_level = sea_level)?;
        self.make_biomes();
        Ok(())
    }

    /// Change the global temperature. Takes effect on the next
    /// [World::generate]. Returns an error (and changes nothing) if the
    /// temperature is outside [0,1].
    pub fn set_global_temperature(
        &mut self,
        global_temperature: f64,
    ) -> anyhow::Result<()> {
        self.update_config(|config| {
            config.global_temperature = global_temperature
        })
    }

    /// Apply a change to a copy of the config, and only keep it if the copy
    /// is still valid
    fn update_config(
        &mut self,
        update: impl FnOnce(&mut WorldConfig),
    ) -> anyhow::Result<()> {
        let mut config = self.config.clone();
        update(&mut config);
        config
            .validate()
            .map_err(WorldError::from)
            .context("invalid config")?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn width(&self) -> u16 {
        self.tiles.width()
    }

    pub fn height(&self) -> u16 {
        self.tiles.height()
    }

    pub fn sea_level(&self) -> f64 {
        self.config.sea_level
    }

    pub fn global_temperature(&self) -> f64 {
        self.config.global_temperature
    }

    /// The noise seed that the current tiles were generated from
    pub fn noise_seed(&self) -> u32 {
        self.noise_seed
    }

    pub fn tiles(&self) -> &TileGrid<Tile> {
        &self.tiles
    }

    /// Get a single tile, or `None` if the point is off the grid
    pub fn tile(&self, point: TilePoint) -> Option<&Tile> {
        self.tiles.get(point)
    }

    /// All continents, largest first. A continent's rank is its position in
    /// this list, plus one.
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.continents.get(id.index())
    }

    pub fn biomes(&self) -> &BiomeTable {
        &self.biomes
    }

    /// Resolve a tile's biome ID to the biome itself
    pub fn biome_of(&self, tile: &Tile) -> &Biome {
        &self.biomes[tile.biome()]
    }

    /// Is this tile at or above sea level?
    pub fn is_land(&self, tile: &Tile) -> bool {
        tile.height() >= self.config.sea_level
    }

    /// Number of tiles at or above sea level. After generation, this is equal
    /// to the total size of all continents. A sea level change isn't
    /// reflected in the continents until the next [World::generate].
    pub fn land_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| self.is_land(tile)).count()
    }

    /// Number of tiles in each biome, in biome table order. Biomes with no
    /// tiles are included with a count of zero.
    pub fn biome_counts(&self) -> Vec<(BiomeId, usize)> {
        let mut counts = vec![0; self.biomes.len()];
        for tile in self.tiles.iter() {
            counts[tile.biome().index()] += 1;
        }
        self.biomes.iter().map(|(id, _)| id).zip(counts).collect()
    }
}
