//! Helpers shared between integration tests

#![allow(dead_code)]

use saltmap::{
    AutomatonConfig, NoiseLayerConfig, NoiseSource, TilePoint, WorldConfig,
};
use std::collections::HashSet;

/// Elevation scale that [MaskNoise] expects
pub const MASK_SCALE: f64 = 16.0;

/// A noise source that paints an exact land mask. Sampling at a tile's
/// elevation coordinate returns +1 if that tile is in the mask and -1
/// otherwise. With [mask_config], that puts masked tiles at height ≥ 0.6 and
/// everything else at height ≤ 0.4.
///
/// Any coordinate that isn't a whole tile (e.g. the temperature layer, which
/// uses a much bigger scale) returns -1.
#[derive(Clone, Debug)]
pub struct MaskNoise {
    land: HashSet<(i32, i32)>,
}

impl MaskNoise {
    pub fn new(land: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self {
            land: land.into_iter().collect(),
        }
    }

    /// Build a mask from rows of text, where `#` is land
    pub fn parse(rows: &[&str]) -> Self {
        Self::new(rows.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|(_, c)| *c == '#')
                .map(move |(x, _)| (x as i32, y as i32))
        }))
    }

    pub fn contains(&self, point: TilePoint) -> bool {
        self.land.contains(&(point.x, point.y))
    }
}

impl NoiseSource for MaskNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let (x, y) = (x * MASK_SCALE, y * MASK_SCALE);
        let whole = x.fract() == 0.0 && y.fract() == 0.0;
        if whole && self.land.contains(&(x as i32, y as i32)) {
            1.0
        } else {
            -1.0
        }
    }

    // The mask doesn't change with the seed
    fn reseed(&mut self, _: u32) {}
}

/// Config that pairs with [MaskNoise]: sea level 0.5, a single elevation
/// octave at the mask's scale, and a temperature scale that never lines up
/// with whole tiles.
pub fn mask_config(width: u16, height: u16) -> WorldConfig {
    WorldConfig {
        seed: 0.into(),
        width,
        height,
        sea_level: 0.5,
        global_temperature: 0.5,
        elevation: NoiseLayerConfig {
            scale: MASK_SCALE,
            octaves: 1,
        },
        temperature: NoiseLayerConfig {
            scale: 1000.0,
            octaves: 1,
        },
        automaton: AutomatonConfig::default(),
        borders: true,
    }
}
