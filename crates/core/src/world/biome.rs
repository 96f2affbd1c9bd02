use derive_more::Display;
use std::ops::{Index, Range};

/// Index of a biome within a [BiomeTable]. Only meaningful for the table that
/// produced it.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash)]
pub struct BiomeId(usize);

impl BiomeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single classification rule. A tile falls in this biome if its height and
/// temperature are in the (half-open) ranges, and its salinity is strictly
/// below `max_salinity` (if there is one).
#[derive(Clone, Debug, PartialEq)]
pub struct Biome {
    pub name: String,
    pub height: Range<f64>,
    pub temperature: Range<f64>,
    pub max_salinity: Option<f64>,
    /// Is this biome under water? Informational only, classification doesn't
    /// look at it.
    pub is_water: bool,
    /// Renderers can draw this biome as a plain background instead of
    /// drawing each tile. Informational only.
    pub is_background: bool,
}

impl Biome {
    pub fn new(
        name: impl Into<String>,
        height: Range<f64>,
        temperature: Range<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            height,
            temperature,
            max_salinity: None,
            is_water: false,
            is_background: false,
        }
    }

    /// Exclude tiles with salinity at or above the given value
    pub fn max_salinity(self, max_salinity: f64) -> Self {
        Self {
            max_salinity: Some(max_salinity),
            ..self
        }
    }

    pub fn water(self) -> Self {
        Self {
            is_water: true,
            ..self
        }
    }

    pub fn background(self) -> Self {
        Self {
            is_background: true,
            ..self
        }
    }

    /// Does a tile with these values fall in this biome?
    pub fn matches(&self, height: f64, temperature: f64, salinity: f64) -> bool {
        self.height.contains(&height)
            && self.temperature.contains(&temperature)
            && self.max_salinity.map_or(true, |max| salinity < max)
    }
}

/// An ordered list of biome rules. Classification picks the **first** rule
/// that matches, so more specific rules need to come before the catch-alls.
///
/// The table depends on sea level, so it has to be rebuilt whenever sea level
/// changes. A table built for one sea level must never classify tiles for
/// another.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeTable {
    biomes: Vec<Biome>,
}

impl BiomeTable {
    /// Salt-sensitive vegetation can't grow at or above this salinity. This is
    /// what puts beaches along coastlines.
    pub const VEGETATION_MAX_SALINITY: f64 = 0.3;
    /// Water below this fraction of sea level is open ocean, above it is
    /// coastal water
    pub const DEEP_WATER_FRACTION: f64 = 0.8;
    /// Exclusive upper bound for the ranges that should have no upper bound.
    /// Anything above 1.0 works, since all tile values are capped at 1.0.
    const UNBOUNDED: f64 = 1.1;

    /// Build the standard table for a sea level. Every (height, temperature,
    /// salinity) in [0,1]³ matches at least one rule, for any sea level in
    /// [0,1].
    pub fn new(sea_level: f64) -> Self {
        let deep = sea_level * Self::DEEP_WATER_FRACTION;
        let land = sea_level..Self::UNBOUNDED;
        let any_temperature = 0.0..Self::UNBOUNDED;
        Self::from_biomes(vec![
            Biome::new("Ocean", 0.0..deep, any_temperature.clone())
                .water()
                .background(),
            Biome::new(
                "Coastal Waters",
                deep..sea_level,
                any_temperature.clone(),
            )
            .water(),
            Biome::new("Grass", land.clone(), 0.2..0.6)
                .max_salinity(Self::VEGETATION_MAX_SALINITY),
            Biome::new("Snow", land.clone(), 0.0..0.05),
            Biome::new("Tundra", land.clone(), 0.05..0.2),
            Biome::new("Desert", land.clone(), 0.6..Self::UNBOUNDED)
                .max_salinity(Self::VEGETATION_MAX_SALINITY),
            // Catch-all for salty land that didn't fit anywhere above
            Biome::new("Beach", land, any_temperature),
        ])
    }

    /// Build a table from an arbitrary list of rules. Nothing checks that the
    /// rules cover every input; gaps turn into classification errors during
    /// generation.
    pub fn from_biomes(biomes: Vec<Biome>) -> Self {
        Self { biomes }
    }

    /// Find the first biome that matches the given values. `None` means the
    /// table has a gap.
    pub fn classify(
        &self,
        height: f64,
        temperature: f64,
        salinity: f64,
    ) -> Option<BiomeId> {
        self.biomes
            .iter()
            .position(|biome| biome.matches(height, temperature, salinity))
            .map(BiomeId)
    }

    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id.0)
    }

    /// All biomes in rule order, with their IDs
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &Biome)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, biome)| (BiomeId(i), biome))
    }

    /// Look up a biome by name
    pub fn find(&self, name: &str) -> Option<BiomeId> {
        self.biomes
            .iter()
            .position(|biome| biome.name == name)
            .map(BiomeId)
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Index<BiomeId> for BiomeTable {
    type Output = Biome;

    fn index(&self, id: BiomeId) -> &Biome {
        &self.biomes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(table: &BiomeTable, h: f64, t: f64, s: f64) -> &str {
        &table[table.classify(h, t, s).unwrap()].name
    }

    #[test]
    fn test_water() {
        let table = BiomeTable::new(0.5);
        assert_eq!(name(&table, 0.0, 0.5, 1.0), "Ocean");
        assert_eq!(name(&table, 0.399, 0.5, 1.0), "Ocean");
        assert_eq!(name(&table, 0.4, 0.5, 1.0), "Coastal Waters");
        assert_eq!(name(&table, 0.499, 1.0, 1.0), "Coastal Waters");
        assert!(table[table.find("Ocean").unwrap()].is_background);
        assert!(table[table.find("Coastal Waters").unwrap()].is_water);
    }

    #[test]
    fn test_land_by_temperature() {
        let table = BiomeTable::new(0.5);
        assert_eq!(name(&table, 0.5, 0.0, 0.0), "Snow");
        assert_eq!(name(&table, 0.7, 0.1, 0.0), "Tundra");
        assert_eq!(name(&table, 0.7, 0.4, 0.0), "Grass");
        assert_eq!(name(&table, 1.0, 0.6, 0.0), "Desert");
        assert_eq!(name(&table, 1.0, 1.0, 0.0), "Desert");
    }

    #[test]
    fn test_salinity_makes_beaches() {
        let table = BiomeTable::new(0.5);
        assert_eq!(name(&table, 0.7, 0.4, 0.299), "Grass");
        // Bound is exclusive
        assert_eq!(name(&table, 0.7, 0.4, 0.3), "Beach");
        assert_eq!(name(&table, 0.7, 0.8, 1.0), "Beach");
        // Cold biomes don't care about salt
        assert_eq!(name(&table, 0.7, 0.1, 1.0), "Tundra");
    }

    #[test]
    fn test_first_match_wins() {
        let table = BiomeTable::from_biomes(vec![
            Biome::new("First", 0.0..1.0, 0.0..1.0),
            Biome::new("Second", 0.0..1.0, 0.0..1.0),
        ]);
        assert_eq!(name(&table, 0.5, 0.5, 0.5), "First");
    }

    #[test]
    fn test_gap() {
        let table = BiomeTable::from_biomes(vec![Biome::new(
            "Lowlands",
            0.0..0.5,
            0.0..1.1,
        )]);
        assert_eq!(table.classify(0.75, 0.5, 0.0), None);
    }

    /// Every value combination should classify, for any sea level
    #[test]
    fn test_coverage() {
        let steps: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
        for &sea_level in &[0.0, 0.3, 0.5, 0.7, 1.0] {
            let table = BiomeTable::new(sea_level);
            for &height in &steps {
                for &temperature in &steps {
                    for &salinity in &[0.0, 0.299, 0.3, 1.0] {
                        assert!(
                            table
                                .classify(height, temperature, salinity)
                                .is_some(),
                            "no biome for sea_level={} h={} t={} s={}",
                            sea_level,
                            height,
                            temperature,
                            salinity
                        );
                    }
                }
            }
        }
    }
}
