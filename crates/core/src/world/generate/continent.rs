use crate::{
    error::WorldError,
    world::{
        continent::{Continent, ContinentId},
        generate::{Generate, WorldBuilder},
        grid::TileGrid,
    },
};
use log::debug;
use std::collections::VecDeque;

/// Groups land tiles into continents (maximal 4-connected components), then
/// ranks them by size.
#[derive(Debug)]
pub struct ContinentGenerator;

impl Generate for ContinentGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> Result<(), WorldError> {
        let mut groups = find_clusters(world.tiles, &world.land);

        // Biggest first. The sort is stable, so equal sizes stay in the order
        // they were discovered in.
        groups.sort_by(|a, b| b.len().cmp(&a.len()));

        for (rank_index, members) in groups.into_iter().enumerate() {
            let id = ContinentId::from_rank_index(rank_index);
            for &index in &members {
                world.tiles[index].set_continent(id);
            }
            let points = members
                .into_iter()
                .map(|index| world.tiles.point_at(index))
                .collect();
            world.continents.push(Continent::new(id, points));
        }

        debug!(
            "Found {} continents, largest has {} tiles",
            world.continents.len(),
            world.continents.first().map_or(0, Continent::len)
        );
        Ok(())
    }
}

/// Flood fill state of a single tile
#[derive(Copy, Clone, Debug, PartialEq)]
enum Mark {
    /// Not a candidate at all
    Excluded,
    /// A candidate that no cluster has reached yet
    Unchecked,
    /// Already claimed by a cluster (possibly still waiting in the queue)
    Assigned,
}

/// Partition `candidates` (storage indexes in `grid`) into clusters of
/// 4-adjacent tiles. Clusters come out in discovery order: each new cluster
/// starts at the first candidate (in the given order) that no earlier cluster
/// reached. Within a cluster, members are in BFS order, expanding neighbors in
/// direction order.
///
/// This uses an explicit queue rather than recursion, because a single
/// continent can easily be big enough to blow the stack.
pub(crate) fn find_clusters<T>(
    grid: &TileGrid<T>,
    candidates: &[usize],
) -> Vec<Vec<usize>> {
    let mut marks = vec![Mark::Excluded; grid.len()];
    for &index in candidates {
        marks[index] = Mark::Unchecked;
    }

    let mut clusters = Vec::new();
    let mut bfs_queue: VecDeque<usize> = VecDeque::new();
    for &first in candidates {
        if marks[first] != Mark::Unchecked {
            continue;
        }

        let mut cluster = Vec::new();
        marks[first] = Mark::Assigned;
        bfs_queue.push_back(first);
        while let Some(index) = bfs_queue.pop_front() {
            cluster.push(index);
            for (_, adj) in grid.point_at(index).adjacents() {
                if let Some(adj_index) = grid.index_of(adj) {
                    if marks[adj_index] == Mark::Unchecked {
                        marks[adj_index] = Mark::Assigned;
                        bfs_queue.push_back(adj_index);
                    }
                }
            }
        }
        clusters.push(cluster);
    }
    clusters
}
