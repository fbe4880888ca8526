//! ASCII rendering and export for cave maps.
//!
//! Handy for eyeballing a generated map in the terminal or diffing two
//! runs without opening an image viewer.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::tilemap::{TileState, Tilemap};

/// Character for a tile state.
pub fn tile_char(state: TileState) -> char {
    match state {
        TileState::Wall => '#',
        TileState::Floor => '.',
    }
}

/// Render the map as newline-separated rows.
pub fn render_map(map: &Tilemap<TileState>) -> String {
    let mut out = String::with_capacity((map.width + 1) * map.height);

    for y in 0..map.height {
        for x in 0..map.width {
            out.push(tile_char(*map.get(x, y)));
        }
        out.push('\n');
    }

    out
}

/// Write the map to a text file with a small header.
pub fn export_ascii(map: &Tilemap<TileState>, seed: u64, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "Cave map {}x{}", map.width, map.height)?;
    writeln!(file, "Seed: {}", seed)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    file.write_all(render_map(map).as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shape() {
        let mut map = Tilemap::new_with(3, 2, TileState::Wall);
        map.set(1, 0, TileState::Floor);

        let text = render_map(&map);
        assert_eq!(text, "#.#\n###\n");
    }
}
