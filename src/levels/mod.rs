//! Level definitions and management

mod demo_levels;
mod level_def;

pub use level_def::{LevelDef, LevelManager};
