//! 2D tile grid container and tile classification.
//!
//! The grid does not wrap in either axis: the outermost ring is a hard
//! boundary, and neighbor queries simply omit out-of-range cells.

/// A cell's classification from the generator's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TileState {
    #[default]
    Wall,
    Floor,
}

impl TileState {
    pub fn is_solid(&self) -> bool {
        matches!(self, TileState::Wall)
    }
}

/// Integer tile codes used when flattening the map for external consumers.
///
/// The defaults index into a 30-column roguelike dungeon spritesheet;
/// callers with a different tileset supply their own pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TileCodes {
    pub wall: i32,
    pub floor: i32,
}

impl Default for TileCodes {
    fn default() -> Self {
        Self {
            wall: 30 * 11 + 24,
            floor: 30 * 2 + 19,
        }
    }
}

impl TileCodes {
    pub fn encode(&self, state: TileState) -> i32 {
        match state {
            TileState::Wall => self.wall,
            TileState::Floor => self.floor,
        }
    }

    /// Anything that is not the floor code reads back as Wall; external
    /// tilesets carry more codes than the generator has classes.
    pub fn decode(&self, code: i32) -> TileState {
        if code == self.floor {
            TileState::Floor
        } else {
            TileState::Wall
        }
    }
}

/// A 2D grid addressed by (x, y) with x in [0, width) and y in [0, height).
#[derive(Clone)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Row-major view of the underlying buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// 4-connected neighbors (left, right, up, down), in-bounds only.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);

        if x > 0 {
            result.push((x - 1, y));
        }
        if x < self.width - 1 {
            result.push((x + 1, y));
        }
        if y > 0 {
            result.push((x, y - 1));
        }
        if y < self.height - 1 {
            result.push((x, y + 1));
        }

        result
    }

    /// 8-connected neighbors (including diagonals), in-bounds only.
    pub fn neighbors_8(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);

        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if self.in_bounds(nx, ny) {
                    result.push((nx as usize, ny as usize));
                }
            }
        }

        result
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

impl Tilemap<TileState> {
    /// Solidity query for collision resolution. Out-of-bounds counts as
    /// solid so bodies cannot escape the map.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.get(x as usize, y as usize).is_solid()
    }

    /// Tile lookup by world position (pixels or world units), given the
    /// side length of one tile. Out of bounds yields None.
    pub fn tile_at_world(&self, world_x: f32, world_y: f32, tile_size: f32) -> Option<TileState> {
        let tx = (world_x / tile_size) as i32;
        let ty = (world_y / tile_size) as i32;
        if !self.in_bounds(tx, ty) {
            return None;
        }
        Some(*self.get(tx as usize, ty as usize))
    }
}
