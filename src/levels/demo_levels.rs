//! Built-in levels
//!
//! Each generator lays tiles onto a 16x9 grid and places the spawn.
//! Hue constants are positions on the color wheel.

use glam::IVec2;

use crate::direction::{LEFT, RIGHT, UP};
use crate::grid::{Grid, MushroomKind, Tile};

const POPPY: f32 = 0.02;
const DANDELION: f32 = 0.14;
const CORNFLOWER: f32 = 0.6;
const VIOLET: f32 = 0.78;

fn grass(grid: &mut Grid, x: i32, y: i32) {
    grid.set_tile(x, y, Some(Tile::Grass { flower: None }));
}

fn flower(grid: &mut Grid, x: i32, y: i32, hue: f32) {
    grid.set_tile(x, y, Some(Tile::Flower { hue }));
}

/// Open meadow: a ring of grass, a few flowers, no hazards.
pub fn generate_tutorial_meadow(grid: &mut Grid) {
    for x in 3..13 {
        grass(grid, x, 2);
        grass(grid, x, 6);
    }
    for y in 3..6 {
        grass(grid, 3, y);
        grass(grid, 12, y);
    }
    flower(grid, 5, 2, POPPY);
    flower(grid, 10, 6, DANDELION);
    flower(grid, 12, 4, CORNFLOWER);
    grid.add_caterpillar(IVec2::new(7, 4), RIGHT);
}

/// A river splits the meadow; wing mushrooms grow on the near bank.
pub fn generate_pond(grid: &mut Grid) {
    for y in 0..9 {
        grid.set_tile(7, y, Some(Tile::Water));
        grid.set_tile(8, y, Some(Tile::Water));
    }
    for y in 2..7 {
        grass(grid, 3, y);
        grass(grid, 12, y);
    }
    grid.set_tile(5, 3, Some(Tile::Mushroom(MushroomKind::Wing)));
    grid.set_tile(5, 5, Some(Tile::Mushroom(MushroomKind::Wing)));
    flower(grid, 12, 3, CORNFLOWER);
    flower(grid, 12, 5, VIOLET);
    flower(grid, 3, 4, DANDELION);
    grid.add_caterpillar(IVec2::new(2, 4), RIGHT);
}

/// Boulders wall off the flowers; two strength mushrooms are needed
/// to smash through, and naps are part of the bargain.
pub fn generate_boulder_field(grid: &mut Grid) {
    for y in 1..8 {
        grid.set_tile(9, y, Some(Tile::Boulder));
    }
    for x in 2..7 {
        grass(grid, x, 2);
        grass(grid, x, 6);
    }
    grid.set_tile(4, 4, Some(Tile::Mushroom(MushroomKind::Strength)));
    grid.set_tile(6, 4, Some(Tile::Mushroom(MushroomKind::Strength)));
    grid.set_tile(2, 4, Some(Tile::Apple));
    flower(grid, 12, 3, POPPY);
    flower(grid, 12, 4, VIOLET);
    flower(grid, 12, 5, DANDELION);
    grid.add_caterpillar(IVec2::new(1, 4), RIGHT);
}

/// Pads, a launcher over an abyss, and trophies that bite back.
pub fn generate_gauntlet(grid: &mut Grid) {
    for x in 1..15 {
        grass(grid, x, 1);
    }
    grid.set_tile(3, 4, Some(Tile::ArrowPad { direction: UP }));
    grid.set_tile(7, 4, Some(Tile::Launcher { direction: RIGHT }));
    grid.set_tile(8, 4, Some(Tile::Abyss));
    grid.set_tile(12, 4, Some(Tile::ArrowPad { direction: LEFT }));
    grid.set_tile(5, 7, Some(Tile::Diamond));
    grid.set_tile(10, 7, Some(Tile::Star));
    grid.set_tile(14, 7, Some(Tile::Key { level: 5 }));
    grid.set_tile(2, 7, Some(Tile::Mushroom(MushroomKind::Sleep)));
    flower(grid, 1, 4, POPPY);
    flower(grid, 14, 1, CORNFLOWER);
    grid.add_caterpillar(IVec2::new(1, 2), RIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::Egg;

    #[test]
    fn test_pond_has_a_crossable_river() {
        let mut grid = Grid::new(16, 9, 5);
        grid.load_level(crate::levels::LevelManager::new().level(1), Egg::default());
        // Two water columns and at least one wing mushroom.
        assert!(grid.tile_at(7, 4).is_water());
        assert!(grid.tile_at(8, 4).is_water());
        assert_eq!(
            grid.tile_at(5, 3),
            Tile::Mushroom(MushroomKind::Wing)
        );
    }

    #[test]
    fn test_gauntlet_key_unlocks_a_later_level() {
        let mut grid = Grid::new(16, 9, 5);
        grid.load_level(crate::levels::LevelManager::new().level(3), Egg::default());
        match grid.tile_at(14, 7) {
            Tile::Key { level } => assert_eq!(level, 5),
            other => panic!("expected a key, got {:?}", other),
        }
    }
}
