use crate::{
    error::WorldError,
    world::{
        generate::{Generate, WorldBuilder},
        grid::{DirectionValues, TileGrid},
        tile::Tile,
    },
};
use log::debug;

/// Diffuses salt from water onto nearby land, over a fixed number of rounds.
/// Each round is double-buffered: every tile stages its new value from the
/// pre-round grid, then every tile commits. That way the result doesn't depend
/// on scan direction.
///
/// Biomes and suitability depend on salinity, so they're recomputed after the
/// last round (along with land/water borders).
#[derive(Debug)]
pub struct SalinityGenerator;

impl Generate for SalinityGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> Result<(), WorldError> {
        let automaton = &world.config.automaton;
        for round in 1..=automaton.rounds {
            stage_round(world.tiles, automaton.neighbor_share);
            let changed = commit_round(world.tiles);
            debug!("Salinity round {}: {} tiles changed", round, changed);
        }
        finish(world)
    }
}

/// Stage a new salinity for every tile, reading only committed values
fn stage_round(tiles: &mut TileGrid<Tile>, neighbor_share: f64) {
    for index in 0..tiles.len() {
        let salinity = staged_salinity(tiles, index, neighbor_share);
        tiles[index].stage_salinity(salinity);
    }
}

/// Compute the next salinity of one tile: its current value, plus a share
/// of each neighbor's, capped at 1.0.
fn staged_salinity(
    tiles: &TileGrid<Tile>,
    index: usize,
    neighbor_share: f64,
) -> f64 {
    let tile = &tiles[index];
    let mut salinity = tile.salinity();
    for (_, neighbor) in tiles.neighbors(tile.position()) {
        // Saturated, nothing left to add
        if salinity >= 1.0 {
            break;
        }
        salinity = (salinity + neighbor.salinity() * neighbor_share).min(1.0);
    }
    salinity
}

/// Apply every staged value. Returns the number of tiles that changed.
fn commit_round(tiles: &mut TileGrid<Tile>) -> usize {
    tiles
        .iter_mut()
        .map(Tile::commit_salinity)
        .filter(|changed| *changed)
        .count()
}

/// Recompute everything derived from salinity, now that it's settled
fn finish(world: &mut WorldBuilder) -> Result<(), WorldError> {
    let sea_level = world.config.sea_level;
    let continents = world.continents.as_slice();
    for index in 0..world.tiles.len() {
        if world.config.borders {
            let borders = calculate_borders(world.tiles, index, sea_level);
            world.tiles[index].set_borders(borders);
        }
        world.tiles[index].refresh(world.biomes, continents)?;
    }
    Ok(())
}

/// For each side of a tile, is there a land/water boundary? Sides on the edge
/// of the grid never have a border.
fn calculate_borders(
    tiles: &TileGrid<Tile>,
    index: usize,
    sea_level: f64,
) -> DirectionValues<bool> {
    let tile = &tiles[index];
    let submerged = tile.height() < sea_level;
    let mut borders = DirectionValues::default();
    for (dir, neighbor) in tiles.neighbors(tile.position()) {
        borders[dir] = submerged != (neighbor.height() < sea_level);
    }
    borders
}
