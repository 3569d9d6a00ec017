//! # Chrysalis - caterpillar grid automaton and butterfly genetics
//!
//! The simulation core of a 2D arcade game: a caterpillar crawls a tile
//! grid, eating flowers to collect their hues, avoiding hazards, and
//! finally cocooning into a butterfly whose wing colors are inherited
//! from its parents and the hues it ate along the way.
//!
//! Rendering, input plumbing and asset loading are left to the host; the
//! crate exposes a frame-driven [`grid::Grid`] that is ticked with a
//! delta time and drained of [`grid::GridEvent`]s.

pub mod caterpillar;
pub mod direction;
pub mod genetics;
pub mod grid;
pub mod hue;
pub mod levels;
pub mod state;

/// Common imports for internal use
pub mod prelude {
    pub use crate::caterpillar::{Caterpillar, Cocoon, Fate, Items, Segment};
    pub use crate::genetics::{Butterfly, Egg, WING_PATCH_COUNT};
    pub use crate::grid::{Command, Grid, GridEvent, MushroomKind, Tile};
    pub use crate::levels::{LevelDef, LevelManager};
    pub use crate::state::GameState;
    pub use glam::IVec2;
}
