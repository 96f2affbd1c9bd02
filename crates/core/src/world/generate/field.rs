use crate::{
    error::WorldError,
    world::{
        generate::{noise::NoiseLayer, Generate, WorldBuilder},
        tile::TileEnv,
    },
};
use log::debug;

/// Synthesizes height, temperature and starting salinity for every tile, and
/// collects the land tiles for continent assembly.
#[derive(Debug)]
pub struct FieldGenerator;

impl Generate for FieldGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> Result<(), WorldError> {
        let config = world.config;
        // Temperature reads a far-away patch of the same noise field, so it
        // doesn't just mirror the height map
        let env = TileEnv {
            sea_level: config.sea_level,
            global_temperature: config.global_temperature,
            elevation: NoiseLayer::new(world.noise, config.elevation),
            temperature: NoiseLayer::new(world.noise, config.temperature)
                .with_offset(
                    2.0 * config.width as f64,
                    2.0 * config.height as f64,
                ),
            center_distance: world.center_distance,
            biomes: world.biomes,
        };

        world.land.clear();
        for index in 0..world.tiles.len() {
            let tile = &mut world.tiles[index];
            tile.generate(&env)?;
            if tile.height() >= config.sea_level {
                world.land.push(index);
            }
        }

        debug!(
            "Generated {} tiles, {} are land",
            world.tiles.len(),
            world.land.len()
        );
        Ok(())
    }
}
