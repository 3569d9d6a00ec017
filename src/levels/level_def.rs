//! Level definition and management

use crate::grid::Grid;

/// A level definition with metadata and generator function
pub struct LevelDef {
    pub id: usize,
    pub name: &'static str,
    pub description: &'static str,
    /// Whether grass keeps sprouting flowers during play.
    pub autogrow_flowers: bool,
    pub generator: fn(&mut Grid),
}

/// Manages level selection and switching
pub struct LevelManager {
    levels: Vec<LevelDef>,
    current_level: usize,
}

impl LevelManager {
    /// Create a new level manager with all built-in levels
    pub fn new() -> Self {
        use super::demo_levels::*;

        let levels = vec![
            LevelDef {
                id: 0,
                name: "Tutorial Meadow",
                description: "Grass, flowers, and nothing that bites",
                autogrow_flowers: true,
                generator: generate_tutorial_meadow,
            },
            LevelDef {
                id: 1,
                name: "The Pond",
                description: "Wing mushrooms make short crossings possible",
                autogrow_flowers: false,
                generator: generate_pond,
            },
            LevelDef {
                id: 2,
                name: "Boulder Field",
                description: "Strength mushrooms move mountains, eventually",
                autogrow_flowers: false,
                generator: generate_boulder_field,
            },
            LevelDef {
                id: 3,
                name: "The Gauntlet",
                description: "Pads, launchers, and things you should not touch",
                autogrow_flowers: false,
                generator: generate_gauntlet,
            },
        ];

        Self {
            levels,
            current_level: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    /// Level definition by id; out-of-range ids fall back to the
    /// tutorial.
    pub fn level(&self, id: usize) -> &LevelDef {
        self.levels.get(id).unwrap_or(&self.levels[0])
    }

    pub fn current(&self) -> &LevelDef {
        self.level(self.current_level)
    }

    pub fn select(&mut self, id: usize) {
        if id < self.levels.len() {
            self.current_level = id;
        }
    }
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new()
    }
}
