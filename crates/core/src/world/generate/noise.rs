use crate::{
    config::NoiseLayerConfig, util::range::NumRange, world::grid::TilePoint,
};
use noise::{NoiseFn, OpenSimplex, Seedable};
use std::fmt::Debug;

/// A seedable 2D noise function. This is the only source of spatial variation
/// in generation, so swapping it out (e.g. with a hand-built field in tests)
/// gives full control over the generated terrain.
pub trait NoiseSource: Debug {
    /// Sample the noise field. Output should be in [-1,1]; anything outside
    /// that is clamped by the consumers anyway.
    fn sample(&self, x: f64, y: f64) -> f64;

    /// Replace the seed. Two sources of the same type with the same seed must
    /// produce identical samples.
    fn reseed(&mut self, seed: u32);
}

/// The default noise source: 2D OpenSimplex gradient noise.
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    noise_fn: OpenSimplex,
}

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise_fn: OpenSimplex::default().set_seed(seed),
        }
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise_fn.get([x, y])
    }

    fn reseed(&mut self, seed: u32) {
        self.noise_fn = OpenSimplex::default().set_seed(seed);
    }
}

/// The output range of a [NoiseSource], and of [octave_noise]
const NOISE_OUTPUT_RANGE: NumRange<f64> = NumRange::new(-1.0, 1.0);

/// Stack `octaves` samples of the source at one coordinate. Octave `i`
/// samples at the coordinate divided by `2^i`, and its sample is also divided
/// by `2^i`. So the first octave samples at the given coordinate with full
/// weight, and each one after is coarser *and* quieter. The sum is clamped to
/// [-1,1].
pub fn octave_noise(
    source: &dyn NoiseSource,
    x: f64,
    y: f64,
    octaves: usize,
) -> f64 {
    let mut value = 0.0;
    let mut divisor = 1.0;
    for _ in 0..octaves {
        value += source.sample(x / divisor, y / divisor) / divisor;
        divisor *= 2.0;
    }
    NOISE_OUTPUT_RANGE.clamp(value)
}

/// A noise source bound to a layer config, which makes it easy to pass in a
/// [TilePoint] and get out a normalized value.
#[derive(Copy, Clone, Debug)]
pub struct NoiseLayer<'a> {
    source: &'a dyn NoiseSource,
    config: NoiseLayerConfig,
    /// Added to every position before scaling. Layers that share a source use
    /// different offsets so they read unrelated regions of the same field.
    offset: (f64, f64),
}

impl<'a> NoiseLayer<'a> {
    pub fn new(source: &'a dyn NoiseSource, config: NoiseLayerConfig) -> Self {
        Self {
            source,
            config,
            offset: (0.0, 0.0),
        }
    }

    /// Shift all inputs to this layer by a fixed amount (in tiles)
    pub fn with_offset(self, x: f64, y: f64) -> Self {
        Self {
            offset: (x, y),
            ..self
        }
    }

    /// Get the layer's value for a tile, mapped from [-1,1] to [0,1]
    pub fn get(&self, point: TilePoint) -> f64 {
        let x = (point.x as f64 + self.offset.0) / self.config.scale;
        let y = (point.y as f64 + self.offset.1) / self.config.scale;
        let raw = octave_noise(self.source, x, y, self.config.octaves);
        NOISE_OUTPUT_RANGE.value(raw).normalize().inner()
    }
}
