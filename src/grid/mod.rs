//! The tile grid: bounded map, tick loop and the host-facing surface.

#[allow(clippy::module_inception)]
mod grid;
mod tiles;

pub use grid::{Command, Grid, GridEvent, TileMap, SPEED};
pub use tiles::{CocoonInfo, MushroomKind, Tile};
