//! Cave map generation strategies and post-processing pipeline.
//!
//! A [`CaveGenerator`] owns the tile grid and a seeded RNG stream. The
//! caller picks one generation strategy to seed the grid, then applies
//! pipeline stages (smoothing, pruning, connecting, entrance carving) in
//! whatever order fits the map. The RNG stream is seeded once at
//! construction and never reset, so stage order affects the exact output
//! of the stochastic strategies; that is intentional and documented
//! rather than hidden.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::noise::value_noise;
use crate::regions::find_regions;
use crate::tilemap::{TileCodes, TileState, Tilemap};

/// Tunnel thickness range for the random-walk strategy, drawn once per walk.
const TUNNEL_WIDTH_MIN: i32 = 8;
const TUNNEL_WIDTH_MAX: i32 = 16;

/// Corridor width used when chaining cavern regions together.
const CONNECTION_WIDTH: i32 = 20;

/// Errors from the generator. The core is a closed numeric algorithm with
/// no I/O, so everything here is a caller mistake, not a runtime fault.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Tuning for the top-center entrance carver.
///
/// The depth threshold and density test are tuned for tall maps (the
/// defaults assume several hundred rows below the entrance); shorter maps
/// should lower `depth_threshold` or the corridor will carve straight to
/// the bottom.
#[derive(Clone, Copy, Debug)]
pub struct EntranceConfig {
    /// Row of the chamber center, a small offset from the top edge.
    pub top_y: usize,
    /// Rows below `top_y` before the carver starts probing for open space.
    /// Above this depth it always carves, whatever it meets.
    pub depth_threshold: usize,
    /// Radius of the square density window sampled around the carve point.
    pub density_radius: i32,
    /// Carving stops once the window holds strictly more Floor cells than
    /// this. A heuristic "met existing open space" test, not a
    /// reachability proof.
    pub min_floor_neighbors: usize,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            top_y: 5,
            depth_threshold: 200,
            density_radius: 2,
            min_floor_neighbors: 8,
        }
    }
}

/// Procedural cave map generator.
///
/// Single-threaded and synchronous: each stage is a sequential full-grid
/// pass that runs to completion before the caller proceeds.
pub struct CaveGenerator {
    map: Tilemap<TileState>,
    rng: ChaCha8Rng,
    seed: u64,
    codes: TileCodes,
}

impl CaveGenerator {
    /// Allocate an all-Wall map and seed the RNG stream.
    ///
    /// Width and height must both be at least 3: the neighbor-counting
    /// passes need a 1-cell border plus at least one interior cell.
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self, GeneratorError> {
        if width < 3 || height < 3 {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "map must be at least 3x3, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            map: Tilemap::new_with(width, height, TileState::Wall),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            codes: TileCodes::default(),
        })
    }

    pub fn width(&self) -> usize {
        self.map.width
    }

    pub fn height(&self) -> usize {
        self.map.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn map(&self) -> &Tilemap<TileState> {
        &self.map
    }

    pub fn tile_codes(&self) -> TileCodes {
        self.codes
    }

    pub fn set_tile_codes(&mut self, codes: TileCodes) {
        self.codes = codes;
    }

    /// Cellular-automata strategy: random fill, then relaxation.
    ///
    /// The initial fill covers every cell, border included. Each iteration
    /// then rewrites only the interior from the previous iteration's
    /// buffer: a cell becomes Wall iff at least 5 of its 8 Moore neighbors
    /// were Wall. The border ring keeps whatever the initial fill gave it.
    pub fn generate_cellular_automata(
        &mut self,
        fill_probability: f32,
        iterations: usize,
    ) -> Result<(), GeneratorError> {
        if !(0.0..=1.0).contains(&fill_probability) {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "fill_probability must be in [0, 1], got {}",
                fill_probability
            )));
        }

        for y in 0..self.map.height {
            for x in 0..self.map.width {
                let state = if self.rng.gen::<f32>() < fill_probability {
                    TileState::Wall
                } else {
                    TileState::Floor
                };
                self.map.set(x, y, state);
            }
        }

        for _ in 0..iterations {
            let prev = self.map.clone();

            for y in 1..self.map.height - 1 {
                for x in 1..self.map.width - 1 {
                    let mut wall_count = 0;
                    for ny in y - 1..=y + 1 {
                        for nx in x - 1..=x + 1 {
                            if nx == x && ny == y {
                                continue;
                            }
                            if *prev.get(nx, ny) == TileState::Wall {
                                wall_count += 1;
                            }
                        }
                    }

                    let state = if wall_count >= 5 {
                        TileState::Wall
                    } else {
                        TileState::Floor
                    };
                    self.map.set(x, y, state);
                }
            }
        }

        Ok(())
    }

    /// Value-noise strategy: threshold a smooth noise field.
    ///
    /// Samples the deterministic lattice noise at (x*scale, y*scale) using
    /// the constructor seed; a cell becomes Wall iff the blended value
    /// exceeds the threshold. Consumes no RNG draws.
    pub fn generate_value_noise(
        &mut self,
        scale: f32,
        threshold: f32,
    ) -> Result<(), GeneratorError> {
        if scale <= 0.0 {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "scale must be positive, got {}",
                scale
            )));
        }
        if !(0.0..1.0).contains(&threshold) {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "threshold must be in [0, 1), got {}",
                threshold
            )));
        }

        let noise_seed = self.seed as i32;
        for y in 0..self.map.height {
            for x in 0..self.map.width {
                let value = value_noise(x as f32 * scale, y as f32 * scale, noise_seed);
                let state = if value > threshold {
                    TileState::Wall
                } else {
                    TileState::Floor
                };
                self.map.set(x, y, state);
            }
        }

        Ok(())
    }

    /// Random-walk tunneler strategy.
    ///
    /// Resets the map to all Wall, then carves `walks` tunnels. Each walk
    /// starts at a random interior cell with a thickness drawn once from
    /// [8, 16]; every step carves a square block of that thickness
    /// (clamped to the interior) and moves one cell in a uniformly random
    /// cardinal direction, clamped to stay interior.
    pub fn generate_random_walk(&mut self, walks: usize, walk_length: usize) {
        let width = self.map.width as i32;
        let height = self.map.height as i32;

        self.map.fill(TileState::Wall);

        for _ in 0..walks {
            let mut x = self.rng.gen_range(1..=width - 2);
            let mut y = self.rng.gen_range(1..=height - 2);
            let thickness = self.rng.gen_range(TUNNEL_WIDTH_MIN..=TUNNEL_WIDTH_MAX);
            let half = thickness / 2;

            for _ in 0..walk_length {
                for wy in -half..=half {
                    for wx in -half..=half {
                        let cx = x + wx;
                        let cy = y + wy;
                        if cx >= 1 && cx < width - 1 && cy >= 1 && cy < height - 1 {
                            self.map.set(cx as usize, cy as usize, TileState::Floor);
                        }
                    }
                }

                // 0=up, 1=down, 2=left, 3=right
                match self.rng.gen_range(0..4) {
                    0 => y = (y - 1).max(1),
                    1 => y = (y + 1).min(height - 2),
                    2 => x = (x - 1).max(1),
                    _ => x = (x + 1).min(width - 2),
                }
            }
        }
    }

    /// Majority-rule smoothing over the 8-neighborhood.
    ///
    /// Each pass rewrites the interior from the previous pass's buffer: a
    /// cell becomes Floor iff strictly more of its 8 neighbors are Floor
    /// than not (ties favor Wall). Distinct from the CA rule, which uses a
    /// fixed wall-count threshold.
    pub fn smooth_map(&mut self, iterations: usize) {
        for _ in 0..iterations {
            let prev = self.map.clone();

            for y in 1..self.map.height - 1 {
                for x in 1..self.map.width - 1 {
                    let mut floor_count = 0;
                    let mut wall_count = 0;
                    for ny in y - 1..=y + 1 {
                        for nx in x - 1..=x + 1 {
                            if nx == x && ny == y {
                                continue;
                            }
                            if *prev.get(nx, ny) == TileState::Floor {
                                floor_count += 1;
                            } else {
                                wall_count += 1;
                            }
                        }
                    }

                    let state = if floor_count > wall_count {
                        TileState::Floor
                    } else {
                        TileState::Wall
                    };
                    self.map.set(x, y, state);
                }
            }
        }
    }

    /// Convert every cavern smaller than `min_size` back to Wall.
    ///
    /// One pass suffices: pruning only shrinks the floor set, never merges
    /// regions, so it cannot create new undersized fragments.
    pub fn fill_small_caverns(&mut self, min_size: usize) {
        for region in find_regions(&self.map) {
            if region.size() < min_size {
                for &(x, y) in &region.tiles {
                    self.map.set(x, y, TileState::Wall);
                }
            }
        }
    }

    /// Chain all caverns together with wide L-shaped corridors.
    ///
    /// Consecutive regions in discovery order are joined: a horizontal
    /// span at the first center's row, then a vertical span at the second
    /// center's column, both 20 tiles wide and clamped to the interior.
    /// Chaining by discovery order (not proximity) can carve longer
    /// corridors than strictly needed, but guarantees every region is
    /// reachable from the chain.
    pub fn connect_all_caverns(&mut self) {
        let centers: Vec<(usize, usize)> =
            find_regions(&self.map).iter().map(|r| r.center()).collect();

        for pair in centers.windows(2) {
            let (x1, y1) = (pair[0].0 as i32, pair[0].1 as i32);
            let (x2, y2) = (pair[1].0 as i32, pair[1].1 as i32);
            let half = CONNECTION_WIDTH / 2;

            for x in x1.min(x2)..=x1.max(x2) {
                for wy in -half..=half {
                    self.carve_interior(x, y1 + wy);
                }
            }

            for y in y1.min(y2)..=y1.max(y2) {
                for wx in -half..=half {
                    self.carve_interior(x2 + wx, y);
                }
            }
        }
    }

    /// Carve the default top-center entrance.
    pub fn ensure_top_center_entrance(&mut self) -> Option<usize> {
        self.ensure_entrance_with(&EntranceConfig::default())
    }

    /// Carve a 5x5 entrance chamber at (width/2, top_y) and a 3-wide
    /// corridor downward from it.
    ///
    /// Above the depth threshold the corridor always carves. Past it, the
    /// local floor density around the carve point is sampled every cell;
    /// once the window holds more than `min_floor_neighbors` Floor tiles
    /// the corridor is considered to have met open space and stops.
    ///
    /// Returns the depth below `top_y` at which the corridor met existing
    /// floor, or None if it carved all the way down.
    pub fn ensure_entrance_with(&mut self, config: &EntranceConfig) -> Option<usize> {
        let center_x = (self.map.width / 2) as i32;
        let top_y = config.top_y as i32;
        let height = self.map.height as i32;

        for y in top_y - 2..=top_y + 2 {
            for x in center_x - 2..=center_x + 2 {
                self.carve_interior(x, y);
            }
        }

        for y in top_y + 3..height - 1 {
            for x in center_x - 1..=center_x + 1 {
                self.carve_interior(x, y);

                if y > top_y + config.depth_threshold as i32
                    && self.floor_density(x, y, config.density_radius) > config.min_floor_neighbors
                {
                    return Some((y - top_y) as usize);
                }
            }
        }

        None
    }

    /// Count Floor tiles in the square window of the given radius around
    /// (x, y), clipped to the map bounds.
    fn floor_density(&self, x: i32, y: i32, radius: i32) -> usize {
        let mut floors = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let nx = x + dx;
                let ny = y + dy;
                if self.map.in_bounds(nx, ny)
                    && *self.map.get(nx as usize, ny as usize) == TileState::Floor
                {
                    floors += 1;
                }
            }
        }
        floors
    }

    fn carve_interior(&mut self, x: i32, y: i32) {
        if x >= 1
            && x < self.map.width as i32 - 1
            && y >= 1
            && y < self.map.height as i32 - 1
        {
            self.map.set(x as usize, y as usize, TileState::Floor);
        }
    }

    /// Point query for a single tile; None when out of bounds.
    pub fn tile(&self, x: usize, y: usize) -> Option<TileState> {
        if x < self.map.width && y < self.map.height {
            Some(*self.map.get(x, y))
        } else {
            None
        }
    }

    /// Solidity query for the physics collaborator (out of bounds is solid).
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.map.is_solid(x, y)
    }

    /// Flatten the map to row-major tile codes, length width*height.
    pub fn map_flat(&self) -> Vec<i32> {
        self.map
            .as_slice()
            .iter()
            .map(|&state| self.codes.encode(state))
            .collect()
    }

    /// Replace the map from a row-major flat array of tile codes.
    ///
    /// The floor code decodes to Floor; any other value decodes to Wall.
    pub fn load_map_from_flat(&mut self, data: &[i32]) -> Result<(), GeneratorError> {
        let expected = self.map.width * self.map.height;
        if data.len() != expected {
            return Err(GeneratorError::InvalidInput(format!(
                "flat map has {} tiles, expected {} ({}x{})",
                data.len(),
                expected,
                self.map.width,
                self.map.height
            )));
        }

        for (idx, &code) in data.iter().enumerate() {
            let x = idx % self.map.width;
            let y = idx / self.map.width;
            self.map.set(x, y, self.codes.decode(code));
        }

        Ok(())
    }
}
