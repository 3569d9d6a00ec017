//! Axis-aligned travel directions and their display angles
//!
//! Directions are plain [`IVec2`] unit vectors so that tile coordinates
//! and headings share one vocabulary. Launch tiles double a direction
//! for a single step, which is why the angle lookup keeps an `atan2`
//! fallback for non-canonical vectors.

use glam::IVec2;

pub const UP: IVec2 = IVec2::new(0, 1);
pub const DOWN: IVec2 = IVec2::new(0, -1);
pub const LEFT: IVec2 = IVec2::new(-1, 0);
pub const RIGHT: IVec2 = IVec2::new(1, 0);

/// The four canonical directions, clockwise from up.
pub const DIRECTIONS: [IVec2; 4] = [UP, RIGHT, DOWN, LEFT];

/// Display angle in degrees, clockwise, with up at 0.
///
/// Canonical directions use the exact table; scaled (launched) vectors
/// fall back to trigonometry.
pub fn direction_angle(dir: IVec2) -> f32 {
    match (dir.x, dir.y) {
        (0, 1) => 0.0,
        (1, 0) => 90.0,
        (0, -1) => 180.0,
        (-1, 0) => -90.0,
        _ => (dir.x as f32).atan2(dir.y as f32).to_degrees(),
    }
}

/// The two directions perpendicular to `dir`, in a fixed order.
/// Callers that need an unbiased pick shuffle the result.
pub fn perpendiculars(dir: IVec2) -> [IVec2; 2] {
    [IVec2::new(-dir.y, dir.x), IVec2::new(dir.y, -dir.x)]
}

/// Whether `dir` is one of the four canonical unit vectors.
pub fn is_canonical(dir: IVec2) -> bool {
    DIRECTIONS.contains(&dir)
}
