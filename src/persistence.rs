//! Map save/load as a JSON document.
//!
//! The document carries the seed and dimensions alongside the flat tile
//! codes, so a saved map can be reloaded directly or regenerated from
//! scratch by external tools.

use std::fs;
use std::io;
use std::path::Path;

use crate::tilemap::TileCodes;

const SAVE_VERSION: u32 = 1;

/// On-disk map format.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MapDocument {
    /// Format version for forward compatibility
    pub version: u32,
    pub width: usize,
    pub height: usize,
    /// Seed the map was generated from
    pub seed: u64,
    pub tile_codes: TileCodes,
    /// Row-major tile codes, length width*height
    pub tiles: Vec<i32>,
}

impl MapDocument {
    pub fn new(width: usize, height: usize, seed: u64, tile_codes: TileCodes, tiles: Vec<i32>) -> Self {
        Self {
            version: SAVE_VERSION,
            width,
            height,
            seed,
            tile_codes,
            tiles,
        }
    }
}

/// Save a map document as JSON.
pub fn save_map(doc: &MapDocument, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string(doc).map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Serialization failed: {}", e))
    })?;
    fs::write(path, json)
}

/// Load a map document from JSON, validating shape and version.
pub fn load_map(path: &Path) -> io::Result<MapDocument> {
    let json = fs::read_to_string(path)?;

    let doc: MapDocument = serde_json::from_str(&json).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Deserialization failed: {}", e))
    })?;

    if doc.version > SAVE_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unsupported map version {}", doc.version),
        ));
    }
    if doc.tiles.len() != doc.width * doc.height {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Map has {} tiles, expected {}x{}",
                doc.tiles.len(),
                doc.width,
                doc.height
            ),
        ));
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join("cave_generator_test_map.json");

        let codes = TileCodes::default();
        let tiles = vec![codes.wall, codes.floor, codes.wall, codes.floor, codes.wall, codes.floor];
        let doc = MapDocument::new(3, 2, 42, codes, tiles.clone());

        save_map(&doc, &path).unwrap();
        let loaded = load_map(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.width, 3);
        assert_eq!(loaded.height, 2);
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.tiles, tiles);
    }

    #[test]
    fn test_load_rejects_bad_shape() {
        let dir = std::env::temp_dir();
        let path = dir.join("cave_generator_test_bad_map.json");

        let doc = MapDocument {
            version: SAVE_VERSION,
            width: 4,
            height: 4,
            seed: 0,
            tile_codes: TileCodes::default(),
            tiles: vec![0; 3],
        };
        std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

        let result = load_map(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
