//! Basic types and data structures for the square tile grid.
//!
//! Positions are integer `(x, y)` pairs with `0 <= x < width` and
//! `0 <= y < height`. `y` grows downward, so "north" is `-y`. Adjacency is
//! 4-connected, and neighbors are **always** visited in [TileDirection]
//! order. Flood fill and the salt automaton both rely on that order being
//! fixed.

use derive_more::{Add, Display};
use nalgebra::Point2;
use std::ops::{Index, IndexMut};
use strum::{EnumIter, IntoEnumIterator};

/// A position in the grid. Coordinates are signed so that neighbor math near
/// the edges doesn't underflow; out-of-bounds points simply don't resolve to
/// a tile.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Add)]
#[display(fmt = "({}, {})", x, y)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Get the point one step away in the given direction. The result may be
    /// outside the grid.
    pub fn step(self, direction: TileDirection) -> Self {
        self + direction.offset()
    }

    /// All 4 adjacent points, in [TileDirection] order. Some may be outside
    /// the grid.
    pub fn adjacents(self) -> impl Iterator<Item = (TileDirection, TilePoint)> {
        TileDirection::iter().map(move |dir| (dir, self.step(dir)))
    }

    /// Convert to a float point for distance math
    pub fn to_point2(self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }
}

/// The 4 directions a tile can share a side in. **The declaration order here
/// is load-bearing**: it's the iteration order for every neighbor scan.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, EnumIter)]
pub enum TileDirection {
    East,
    North,
    West,
    South,
}

impl TileDirection {
    /// Get a vector offset that would move a point one tile in this direction
    pub fn offset(self) -> TilePoint {
        match self {
            Self::East => TilePoint::new(1, 0),
            Self::North => TilePoint::new(0, -1),
            Self::West => TilePoint::new(-1, 0),
            Self::South => TilePoint::new(0, 1),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::East => 0,
            Self::North => 1,
            Self::West => 2,
            Self::South => 3,
        }
    }
}

/// One value per [TileDirection].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionValues<T>([T; 4]);

impl<T> DirectionValues<T> {
    /// Iterate over `(direction, value)` pairs in direction order
    pub fn iter(&self) -> impl Iterator<Item = (TileDirection, &T)> {
        TileDirection::iter().zip(self.0.iter())
    }
}

impl<T> Index<TileDirection> for DirectionValues<T> {
    type Output = T;

    fn index(&self, direction: TileDirection) -> &T {
        &self.0[direction.index()]
    }
}

impl<T> IndexMut<TileDirection> for DirectionValues<T> {
    fn index_mut(&mut self, direction: TileDirection) -> &mut T {
        &mut self.0[direction.index()]
    }
}

/// A full grid of values, one per position. Storage is flat, ordered
/// `x` outer and `y` inner. That's also the **scan order**: every whole-grid
/// pass in generation walks tiles in storage order.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid<T> {
    width: u16,
    height: u16,
    values: Vec<T>,
}

impl<T> TileGrid<T> {
    /// Initialize a new grid, calling `initializer` once per position in scan
    /// order.
    pub fn new(
        width: u16,
        height: u16,
        initializer: impl Fn(TilePoint) -> T,
    ) -> Self {
        let values = Self::scan(width, height).map(initializer).collect();
        Self {
            width,
            height,
            values,
        }
    }

    fn scan(width: u16, height: u16) -> impl Iterator<Item = TilePoint> {
        (0..width as i32).flat_map(move |x| {
            (0..height as i32).map(move |y| TilePoint::new(x, y))
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of positions in the grid
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Does this point fall inside the grid?
    pub fn contains(&self, point: TilePoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < self.width as i32
            && point.y < self.height as i32
    }

    /// Get the storage index for a point, or `None` if it's out of bounds
    pub fn index_of(&self, point: TilePoint) -> Option<usize> {
        if self.contains(point) {
            Some(point.x as usize * self.height as usize + point.y as usize)
        } else {
            None
        }
    }

    /// Get the point stored at an index. Panics if the index is out of
    /// bounds.
    pub fn point_at(&self, index: usize) -> TilePoint {
        assert!(index < self.len(), "index {} out of bounds", index);
        let height = self.height as usize;
        TilePoint::new((index / height) as i32, (index % height) as i32)
    }

    pub fn get(&self, point: TilePoint) -> Option<&T> {
        self.index_of(point).map(|index| &self.values[index])
    }

    pub fn get_mut(&mut self, point: TilePoint) -> Option<&mut T> {
        self.index_of(point).map(move |index| &mut self.values[index])
    }

    /// Every point in the grid, in scan order
    pub fn points(&self) -> impl Iterator<Item = TilePoint> {
        Self::scan(self.width, self.height)
    }

    /// Every value in the grid, in scan order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut()
    }

    /// In-bounds neighbors of a point, in [TileDirection] order
    pub fn neighbors(
        &self,
        point: TilePoint,
    ) -> impl Iterator<Item = (TileDirection, &T)> {
        point
            .adjacents()
            .filter_map(move |(dir, adj)| self.get(adj).map(|v| (dir, v)))
    }
}

/// Measures how far tiles are from the middle of the grid. Distances are
/// squared and normalized so that a corner of the grid is at 1.0 and the
/// center is at 0.0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CenterDistance {
    center: Point2<f64>,
    max_distance_squared: f64,
}

impl CenterDistance {
    pub fn new(width: u16, height: u16) -> Self {
        let center = Point2::new(width as f64 * 0.5, height as f64 * 0.5);
        Self {
            center,
            max_distance_squared: nalgebra::distance_squared(
                &Point2::origin(),
                &center,
            ),
        }
    }

    /// Squared distance from the center, divided by the squared distance from
    /// the center to a corner
    pub fn normalized(&self, point: TilePoint) -> f64 {
        nalgebra::distance_squared(&point.to_point2(), &self.center)
            / self.max_distance_squared
    }
}

impl<T> Index<usize> for TileGrid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> IndexMut<usize> for TileGrid<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}
