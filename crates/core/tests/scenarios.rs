//! End-to-end scenarios on hand-painted terrain

mod common;

use assert_approx_eq::assert_approx_eq;
use common::{mask_config, MaskNoise};
use saltmap::{AutomatonConfig, TileDirection, TilePoint, World, WorldConfig};

/// 4x4 grid with the center 2x2 block as land
fn center_block(rounds: usize) -> World {
    let noise = MaskNoise::parse(&[
        "....", //
        ".##.", //
        ".##.", //
        "....", //
    ]);
    let config = WorldConfig {
        automaton: AutomatonConfig {
            rounds,
            ..Default::default()
        },
        ..mask_config(4, 4)
    };
    World::with_noise(config, noise).unwrap()
}

fn is_center(point: TilePoint) -> bool {
    (1..=2).contains(&point.x) && (1..=2).contains(&point.y)
}

#[test]
fn test_center_block_continent() {
    let world = center_block(3);

    assert_eq!(world.continents().len(), 1);
    let continent = &world.continents()[0];
    assert_eq!(continent.name(), "Continent 1");
    assert_eq!(continent.rank(), 1);
    assert_eq!(continent.len(), 4);
    assert!(continent.tiles().iter().all(|point| is_center(*point)));

    for tile in world.tiles().iter() {
        if is_center(tile.position()) {
            assert_eq!(tile.continent(), Some(continent.id()));
            assert!(tile.height() >= 0.5);
            assert!(!world.biome_of(tile).is_water);
        } else {
            assert_eq!(tile.continent(), None);
            assert_eq!(tile.salinity(), 1.0);
            assert_eq!(tile.suitability(), 0.0);
            assert!(world.biome_of(tile).is_water);
        }
    }
}

#[test]
fn test_center_block_salinity() {
    // Two rounds: 0.0 -> 0.4 -> 0.96
    let world = center_block(2);
    for point in world.continents()[0].tiles() {
        let salinity = world.tile(*point).unwrap().salinity();
        assert_approx_eq!(salinity, 0.96);
        assert!(salinity > 0.0 && salinity < 1.0);
    }

    // The third round saturates every center tile, since each one has two
    // water neighbors
    let world = center_block(3);
    for point in world.continents()[0].tiles() {
        let salinity = world.tile(*point).unwrap().salinity();
        assert!(salinity > 0.0);
        assert!(salinity <= 1.0);
    }
}

#[test]
fn test_center_block_borders() {
    let world = center_block(3);
    let tile = world.tile(TilePoint::new(1, 1)).unwrap();
    assert!(tile.borders_changed());
    assert!(!tile.borders()[TileDirection::East]);
    assert!(tile.borders()[TileDirection::North]);
    assert!(tile.borders()[TileDirection::West]);
    assert!(!tile.borders()[TileDirection::South]);

    // Borders are optional
    let noise = MaskNoise::parse(&["....", ".##.", ".##.", "...."]);
    let config = WorldConfig {
        borders: false,
        ..mask_config(4, 4)
    };
    let world = World::with_noise(config, noise).unwrap();
    for tile in world.tiles().iter() {
        assert!(tile.borders().iter().all(|(_, border)| !border));
    }
}

#[test]
fn test_isolated_tile() {
    let noise = MaskNoise::parse(&[
        "........", //
        ".####...", //
        ".####...", //
        ".####...", //
        ".####...", //
        "........", //
        "......#.", //
        "........", //
    ]);
    let world = World::with_noise(mask_config(8, 8), noise).unwrap();

    let continents = world.continents();
    assert_eq!(continents.len(), 2);
    assert_eq!(continents[0].len(), 16);
    assert_eq!(continents[1].len(), 1);
    assert_eq!(continents[1].name(), "Continent 2");
    assert_eq!(continents[1].tiles(), &[TilePoint::new(6, 6)]);

    // Only a sixteenth of the continent-size bonus, and the full salinity and
    // temperature penalties
    let tile = world.tile(TilePoint::new(6, 6)).unwrap();
    assert_eq!(tile.continent(), Some(continents[1].id()));
    let expected = (0.5 + 0.5 / 16.0
        - tile.salinity()
        - (tile.temperature() - 0.4).abs())
    .max(0.0);
    assert_approx_eq!(tile.suitability(), expected);

    // The same climate on the biggest continent would score higher, unless
    // both bottom out at zero
    let on_largest = (1.0 - tile.salinity() - (tile.temperature() - 0.4).abs())
        .max(0.0);
    assert!(tile.suitability() <= on_largest);
}

#[test]
fn test_equal_continents_keep_discovery_order() {
    // Two 2-tile islands. The left one is found first in scan order.
    let noise = MaskNoise::parse(&[
        ".....", //
        ".#.#.", //
        ".#.#.", //
        ".....", //
    ]);
    let world = World::with_noise(mask_config(5, 4), noise).unwrap();
    let continents = world.continents();
    assert_eq!(continents.len(), 2);
    assert_eq!(
        continents[0].tiles(),
        &[TilePoint::new(1, 1), TilePoint::new(1, 2)]
    );
    assert_eq!(
        continents[1].tiles(),
        &[TilePoint::new(3, 1), TilePoint::new(3, 2)]
    );
}

#[test]
fn test_sea_level_change() {
    let config = WorldConfig {
        seed: 1234.into(),
        width: 48,
        height: 48,
        sea_level: 0.3,
        ..Default::default()
    };
    let mut world = World::new(config).unwrap();
    let seed = world.noise_seed();
    let low_land = world.land_tile_count();

    world.set_sea_level(0.6).unwrap();
    world.make_biomes();
    world.generate_from_seed(seed).unwrap();

    // Same noise, higher water
    assert!(world.land_tile_count() <= low_land);
    let coastal = world.biomes().find("Coastal Waters").unwrap();
    assert_approx_eq!(world.biomes()[coastal].height.start, 0.48);
    assert_approx_eq!(world.biomes()[coastal].height.end, 0.6);

    let continent_total: usize =
        world.continents().iter().map(|c| c.len()).sum();
    assert_eq!(continent_total, world.land_tile_count());
    for tile in world.tiles().iter() {
        let land = tile.height() >= 0.6;
        assert_eq!(tile.continent().is_some(), land);
        assert_eq!(!world.biome_of(tile).is_water, land);
        assert_eq!(
            world.biomes().classify(
                tile.height(),
                tile.temperature(),
                tile.salinity()
            ),
            Some(tile.biome())
        );
    }
}
