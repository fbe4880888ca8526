//! Cavern region analysis via flood fill.
//!
//! A region is a maximal 4-connected set of Floor tiles. Regions are
//! reported in first-encounter (row-major) order; the cavern connector
//! chains consecutive entries of that ordering, so it is part of the
//! observable behavior and must not be changed.

use std::collections::VecDeque;

use crate::tilemap::{TileState, Tilemap};

/// Region identifier (index into the discovery-ordered region list).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

/// A connected cavern: its member tiles and derived geometry.
///
/// Transient: built by one [`find_regions`] call and discarded once the
/// caller has read what it needs.
#[derive(Clone, Debug)]
pub struct Region {
    pub id: RegionId,
    pub tiles: Vec<(usize, usize)>,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Region {
    fn new(id: RegionId, x: usize, y: usize) -> Self {
        Self {
            id,
            tiles: Vec::new(),
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn add_tile(&mut self, x: usize, y: usize) {
        self.tiles.push((x, y));
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Integer midpoint of the bounding box. Not guaranteed to be a Floor
    /// tile itself (e.g. an L-shaped cavern).
    pub fn center(&self) -> (usize, usize) {
        ((self.min_x + self.max_x) / 2, (self.min_y + self.max_y) / 2)
    }
}

/// Find all Floor regions, in row-major discovery order.
///
/// Scans every cell; each unvisited Floor cell seeds a 4-connected flood
/// fill with an explicit frontier (no recursion, so stack depth stays
/// bounded on large maps). The visited grid is owned by this call and
/// dropped with it.
pub fn find_regions(map: &Tilemap<TileState>) -> Vec<Region> {
    let mut visited = Tilemap::new_with(map.width, map.height, false);
    let mut regions = Vec::new();

    for y in 0..map.height {
        for x in 0..map.width {
            if *visited.get(x, y) || *map.get(x, y) != TileState::Floor {
                continue;
            }

            let mut region = Region::new(RegionId(regions.len() as u32), x, y);
            let mut frontier = VecDeque::new();

            frontier.push_back((x, y));
            visited.set(x, y, true);

            while let Some((cx, cy)) = frontier.pop_front() {
                region.add_tile(cx, cy);

                for (nx, ny) in map.neighbors(cx, cy) {
                    if !*visited.get(nx, ny) && *map.get(nx, ny) == TileState::Floor {
                        visited.set(nx, ny, true);
                        frontier.push_back((nx, ny));
                    }
                }
            }

            regions.push(region);
        }
    }

    regions
}

/// Summary of a region list, for progress reporting.
#[derive(Clone, Debug, Default)]
pub struct RegionStats {
    pub count: usize,
    pub floor_tiles: usize,
    pub smallest: usize,
    pub largest: usize,
}

pub fn region_stats(regions: &[Region]) -> RegionStats {
    let mut stats = RegionStats::default();
    stats.count = regions.len();

    for region in regions {
        let size = region.size();
        stats.floor_tiles += size;
        stats.largest = stats.largest.max(size);
        stats.smallest = if stats.smallest == 0 {
            size
        } else {
            stats.smallest.min(size)
        };
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from_rows(rows: &[&str]) -> Tilemap<TileState> {
        let height = rows.len();
        let width = rows[0].len();
        let mut map = Tilemap::new_with(width, height, TileState::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '.' {
                    map.set(x, y, TileState::Floor);
                }
            }
        }
        map
    }

    #[test]
    fn test_all_wall_has_no_regions() {
        let map = Tilemap::new_with(6, 6, TileState::Wall);
        assert!(find_regions(&map).is_empty());
    }

    #[test]
    fn test_discovery_order_is_row_major() {
        let map = map_from_rows(&[
            "#####",
            "#.#.#",
            "#####",
            "#..##",
            "#####",
        ]);
        let regions = find_regions(&map);

        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].tiles[0], (1, 1));
        assert_eq!(regions[1].tiles[0], (3, 1));
        assert_eq!(regions[2].tiles[0], (1, 3));
        assert_eq!(regions[2].size(), 2);
    }

    #[test]
    fn test_diagonal_floors_are_separate_regions() {
        let map = map_from_rows(&[
            "####",
            "#.##",
            "##.#",
            "####",
        ]);
        // 4-connectivity: diagonals do not join
        assert_eq!(find_regions(&map).len(), 2);
    }

    #[test]
    fn test_bounds_and_center() {
        let map = map_from_rows(&[
            "#######",
            "#...###",
            "#...###",
            "#######",
        ]);
        let regions = find_regions(&map);
        assert_eq!(regions.len(), 1);

        let region = &regions[0];
        assert_eq!((region.min_x, region.min_y), (1, 1));
        assert_eq!((region.max_x, region.max_y), (3, 2));
        assert_eq!(region.center(), (2, 1));
        assert_eq!(region.size(), 6);
    }

    #[test]
    fn test_center_may_not_be_floor() {
        // L-shaped cavern whose bounding-box midpoint lands on a wall
        let map = map_from_rows(&[
            "#####",
            "#...#",
            "#.###",
            "#.###",
            "#####",
        ]);
        let regions = find_regions(&map);
        assert_eq!(regions.len(), 1);
        let (cx, cy) = regions[0].center();
        assert_eq!((cx, cy), (2, 2));
        assert_eq!(*map.get(cx, cy), TileState::Wall);
    }

    #[test]
    fn test_stats() {
        let map = map_from_rows(&[
            "#####",
            "#.#.#",
            "#.###",
            "#####",
        ]);
        let regions = find_regions(&map);
        let stats = region_stats(&regions);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.floor_tiles, 3);
        assert_eq!(stats.largest, 2);
        assert_eq!(stats.smallest, 1);
    }
}
