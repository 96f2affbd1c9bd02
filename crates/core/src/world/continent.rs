use crate::world::grid::TilePoint;
use derive_more::Display;

/// Identifies a continent within its world. IDs are assigned by size rank, so
/// `ContinentId` 0 is always the biggest continent. They're only valid until
/// the next generation pass.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub struct ContinentId(usize);

impl ContinentId {
    pub(crate) fn from_rank_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the continent in the world's size-ordered list
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based display rank. The biggest continent is rank 1.
    pub fn rank(self) -> usize {
        self.0 + 1
    }
}

/// A maximal group of 4-connected land tiles. Every land tile belongs to
/// exactly one continent. The continent owns the authoritative membership
/// list; tiles only carry the [ContinentId].
#[derive(Clone, Debug, PartialEq)]
pub struct Continent {
    id: ContinentId,
    name: String,
    /// Member positions, in the order flood fill reached them
    tiles: Vec<TilePoint>,
}

impl Continent {
    pub(crate) fn new(id: ContinentId, tiles: Vec<TilePoint>) -> Self {
        Self {
            id,
            name: format!("Continent {}", id.rank()),
            tiles,
        }
    }

    pub fn id(&self) -> ContinentId {
        self.id
    }

    pub fn rank(&self) -> usize {
        self.id.rank()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tiles(&self) -> &[TilePoint] {
        &self.tiles
    }

    /// Number of member tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
