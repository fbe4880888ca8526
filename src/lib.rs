//! Procedural cave map generation library
//!
//! Re-exports modules for use by the binary and external consumers.

pub mod ascii;
pub mod export;
pub mod generator;
pub mod noise;
pub mod persistence;
pub mod regions;
pub mod tilemap;

pub use generator::{CaveGenerator, EntranceConfig, GeneratorError};
pub use tilemap::{TileCodes, TileState, Tilemap};
