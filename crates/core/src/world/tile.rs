use crate::{
    error::WorldError,
    util::{range::NumRange, truncate},
    world::{
        biome::{BiomeId, BiomeTable},
        continent::{Continent, ContinentId},
        generate::noise::NoiseLayer,
        grid::{CenterDistance, DirectionValues, TilePoint},
    },
};

/// A single cell of the world. Tiles are created once per world and then
/// rewritten in place by every generation pass. They can't be modified from
/// outside the crate.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Location of this tile in the grid. Every tile has a unique position,
    /// and it never changes.
    position: TilePoint,

    /// Terrain height, in [0,1]. Truncated to 3 decimal digits.
    height: f64,

    /// Climate temperature, in [0,1]. Truncated to 3 decimal digits.
    temperature: f64,

    /// Salt content, in [0,1]. Water starts fully salty and salt spreads
    /// onto nearby land during the automaton rounds.
    salinity: f64,

    /// Index into the world's biome table
    biome: BiomeId,

    /// The continent this tile belongs to. Always `None` for water.
    continent: Option<ContinentId>,

    /// How hospitable this tile is for settlement, in [0,1]
    suitability: f64,

    /// Salinity computed during the stage half of an automaton round. Only
    /// populated between the stage and commit passes.
    staged_salinity: Option<f64>,

    /// Did the most recent automaton commit change this tile's salinity?
    changed: bool,

    /// For each direction, is there a land/water boundary on that side?
    borders: DirectionValues<bool>,

    /// Did the last border computation change any border?
    borders_changed: bool,
}

/// World-level inputs to tile generation. Tiles get this passed in rather
/// than holding a reference back to their world.
#[derive(Copy, Clone, Debug)]
pub(crate) struct TileEnv<'a> {
    pub sea_level: f64,
    pub global_temperature: f64,
    pub elevation: NoiseLayer<'a>,
    pub temperature: NoiseLayer<'a>,
    pub center_distance: CenterDistance,
    pub biomes: &'a BiomeTable,
}

impl Tile {
    /// Share of height that comes from noise. The rest comes from the
    /// center falloff, which pushes land towards the middle of the map.
    const HEIGHT_NOISE_WEIGHT: f64 = 0.6;
    const HEIGHT_FALLOFF_WEIGHT: f64 = 0.4;
    const HEIGHT_FALLOFF_EXPONENT: i32 = 3;
    /// Maximum amount that local noise adds to temperature
    const TEMPERATURE_NOISE_WEIGHT: f64 = 0.5;
    /// Temperature lost per unit of height above sea level (gained below)
    const TEMPERATURE_LAPSE_RATE: f64 = 2.5;
    /// Temperature that people find most comfortable
    const IDEAL_TEMPERATURE: f64 = 0.4;

    pub(crate) fn new(position: TilePoint) -> Self {
        Self {
            position,
            height: 0.0,
            temperature: 0.0,
            salinity: 0.0,
            biome: BiomeId::default(),
            continent: None,
            suitability: 0.0,
            staged_salinity: None,
            changed: false,
            borders: DirectionValues::default(),
            borders_changed: false,
        }
    }

    pub fn position(&self) -> TilePoint {
        self.position
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn salinity(&self) -> f64 {
        self.salinity
    }

    /// Index of this tile's biome. Resolve it with
    /// [World::biome_of](crate::World::biome_of).
    pub fn biome(&self) -> BiomeId {
        self.biome
    }

    pub fn continent(&self) -> Option<ContinentId> {
        self.continent
    }

    pub fn suitability(&self) -> f64 {
        self.suitability
    }

    /// Did salinity change in the last automaton round? Useful for redrawing
    /// only what moved.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Land/water boundaries on each side of the tile. All `false` if border
    /// computation is disabled in the config.
    pub fn borders(&self) -> &DirectionValues<bool> {
        &self.borders
    }

    pub fn borders_changed(&self) -> bool {
        self.borders_changed
    }

    /// Synthesize height, temperature and starting salinity from scratch, then
    /// classify. Continent membership is wiped, so suitability is zero until
    /// continents are reassigned and [Self::refresh] runs.
    pub(crate) fn generate(&mut self, env: &TileEnv) -> Result<(), WorldError> {
        let unit = NumRange::normal_range();
        self.continent = None;
        self.staged_salinity = None;
        self.changed = false;

        let falloff = (1.0 - env.center_distance.normalized(self.position))
            .powi(Self::HEIGHT_FALLOFF_EXPONENT);
        let height = env.elevation.get(self.position)
            * Self::HEIGHT_NOISE_WEIGHT
            + falloff * Self::HEIGHT_FALLOFF_WEIGHT;
        self.height = truncate(unit.clamp(height));

        let temperature = env.global_temperature
            + env.temperature.get(self.position)
                * Self::TEMPERATURE_NOISE_WEIGHT
            - (self.height - env.sea_level) * Self::TEMPERATURE_LAPSE_RATE;
        self.temperature = truncate(unit.clamp(temperature));

        self.salinity = if self.height < env.sea_level { 1.0 } else { 0.0 };

        self.refresh(env.biomes, &[])
    }

    /// Recompute the fields derived from height/temperature/salinity and
    /// continent membership: biome and suitability. `continents` must be
    /// sorted largest first, i.e. the world's continent list.
    pub(crate) fn refresh(
        &mut self,
        biomes: &BiomeTable,
        continents: &[Continent],
    ) -> Result<(), WorldError> {
        self.biome = biomes
            .classify(self.height, self.temperature, self.salinity)
            .ok_or(WorldError::BiomeClassification {
                position: self.position,
                height: self.height,
                temperature: self.temperature,
                salinity: self.salinity,
            })?;

        let continent_size = self
            .continent
            .and_then(|id| continents.get(id.index()))
            .map(Continent::len);
        let largest_size = continents.first().map_or(0, Continent::len);
        self.suitability = Self::calculate_suitability(
            continent_size,
            largest_size,
            self.salinity,
            self.temperature,
        );
        Ok(())
    }

    /// Suitability for settlement. Water (no continent) is never suitable.
    /// Land starts at 0.5, gains up to 0.5 for being on a big continent, and
    /// loses its salinity and its distance from the ideal temperature.
    pub(crate) fn calculate_suitability(
        continent_size: Option<usize>,
        largest_size: usize,
        salinity: f64,
        temperature: f64,
    ) -> f64 {
        match continent_size {
            None => 0.0,
            Some(size) => {
                let size_ratio = size as f64 / largest_size.max(1) as f64;
                let suitability = 0.5 + 0.5 * size_ratio
                    - salinity
                    - (temperature - Self::IDEAL_TEMPERATURE).abs();
                suitability.max(0.0)
            }
        }
    }

    pub(crate) fn set_continent(&mut self, continent: ContinentId) {
        self.continent = Some(continent);
    }

    /// Hold a new salinity value until the next [Self::commit_salinity]
    pub(crate) fn stage_salinity(&mut self, salinity: f64) {
        self.staged_salinity = Some(salinity);
    }

    /// Apply the staged salinity, if any. Returns whether the value changed.
    pub(crate) fn commit_salinity(&mut self) -> bool {
        self.changed = match self.staged_salinity.take() {
            Some(staged) if staged != self.salinity => {
                self.salinity = staged;
                true
            }
            _ => false,
        };
        self.changed
    }

    pub(crate) fn set_borders(&mut self, borders: DirectionValues<bool>) {
        self.borders_changed = borders != self.borders;
        self.borders = borders;
    }

    /// Build a tile with hand-picked field values
    #[cfg(test)]
    pub(crate) fn with_fields(
        position: TilePoint,
        height: f64,
        temperature: f64,
        salinity: f64,
    ) -> Self {
        Self {
            height,
            temperature,
            salinity,
            ..Self::new(position)
        }
    }
}
