mod seed;

pub use seed::Seed;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration that defines a world. Two worlds built from the same config
/// will produce the same sequence of generated maps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the world's seed stream. Every call to
    /// [World::generate](crate::World::generate) draws a fresh noise seed
    /// from an RNG initialized with this value. See [Seed] for the accepted
    /// input formats.
    pub seed: Seed,

    /// Number of tile columns.
    #[validate(range(min = 1))]
    pub width: u16,

    /// Number of tile rows.
    #[validate(range(min = 1))]
    pub height: u16,

    /// Tiles with height at or above this value are land, everything below
    /// is water. Changing this requires the biome table to be rebuilt, which
    /// [World::set_sea_level](crate::World::set_sea_level) does for you.
    #[validate(
        range(min = 0.0, max = 1.0),
        custom = "validate_finite"
    )]
    pub sea_level: f64,

    /// Baseline temperature added to every tile before local noise and
    /// altitude adjustments.
    #[validate(
        range(min = 0.0, max = 1.0),
        custom = "validate_finite"
    )]
    pub global_temperature: f64,

    /// Compute land/water border flags for each tile on the final automaton
    /// round. Renderers that don't draw coastlines can turn this off.
    pub borders: bool,

    // Tables have to come after plain values, for TOML
    /// Noise layer that drives tile height
    #[validate]
    pub elevation: NoiseLayerConfig,

    /// Noise layer that drives local temperature variation
    #[validate]
    pub temperature: NoiseLayerConfig,

    /// Config for the salt diffusion automaton
    #[validate]
    pub automaton: AutomatonConfig,
}

/// Config for one octave-noise layer. Tile positions are divided by `scale`
/// before sampling, then `octaves` samples are stacked. See
/// [octave_noise](crate::octave_noise) for how the octaves are combined.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct NoiseLayerConfig {
    /// Divisor applied to tile coordinates before sampling. Bigger values
    /// mean smoother, larger features. Anything below one tile would sample
    /// finer than the grid can show.
    #[validate(range(min = 1.0), custom = "validate_finite")]
    pub scale: f64,

    /// Number of samples to stack. Each extra octave samples at double the
    /// coordinate divisor, with half the weight of the one before it.
    #[validate(range(min = 1, max = 16))]
    pub octaves: usize,
}

/// Config for the cellular automaton that spreads salt from the sea inland.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Number of whole-grid rounds to run. Derived fields (biome,
    /// suitability, borders) are only recomputed on the last round, so this
    /// must be at least one.
    #[validate(range(min = 1))]
    pub rounds: usize,

    /// Fraction of each neighbor's salinity that a tile absorbs per round
    #[validate(
        range(min = 0.0, max = 1.0),
        custom = "validate_finite"
    )]
    pub neighbor_share: f64,
}

/// Range checks let NaN through, since every comparison with NaN is false
fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl WorldConfig {
    /// Value for [NoiseLayerConfig::scale] in the default height layer
    pub const DEFAULT_ELEVATION_SCALE: f64 = 16.0;
    /// Value for [NoiseLayerConfig::scale] in the default temperature layer
    pub const DEFAULT_TEMPERATURE_SCALE: f64 = 128.0;
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            // Danger! This means the default will vary between calls!
            seed: Seed::Int(rand::random()),

            width: 240,
            height: 240,
            sea_level: 0.7,
            global_temperature: 0.5,
            elevation: NoiseLayerConfig {
                scale: Self::DEFAULT_ELEVATION_SCALE,
                octaves: 4,
            },
            temperature: NoiseLayerConfig {
                scale: Self::DEFAULT_TEMPERATURE_SCALE,
                octaves: 1,
            },
            automaton: AutomatonConfig::default(),
            borders: true,
        }
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            neighbor_share: 0.2,
        }
    }
}
