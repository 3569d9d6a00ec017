//! One body unit of the caterpillar
//!
//! A segment remembers where it is, where it came from and which way it
//! faces; hosts interpolate between the two with the caterpillar's
//! intra-cell fraction `t` when drawing.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::direction::direction_angle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub pos: IVec2,
    pub direction: IVec2,
    pub from_pos: IVec2,
    pub from_direction: IVec2,
    /// Display angle the segment is turning away from, unwrapped so the
    /// turn animation never spins the long way around.
    pub from_angle: f32,
    /// Freshly grown tail segment, still scaling in.
    pub fresh_end: bool,
    /// Invisible bridge segment inserted behind a launched head; never
    /// drawn and never collided with.
    pub phantom: bool,
}

impl Segment {
    /// The spawn segment, placed as if it had just stepped into `pos`.
    pub fn initial(pos: IVec2, direction: IVec2) -> Self {
        Self::new(pos, direction, pos - direction, direction)
    }

    fn new(pos: IVec2, direction: IVec2, from_pos: IVec2, from_direction: IVec2) -> Self {
        let mut seg = Self {
            pos,
            direction,
            from_pos,
            from_direction,
            from_angle: direction_angle(from_direction),
            fresh_end: false,
            phantom: false,
        };
        seg.adjust_from_angle();
        seg
    }

    /// The segment one step ahead of this one in `direction`.
    /// `direction` may be a doubled launch vector.
    pub fn grow_head(&self, direction: IVec2) -> Self {
        Self::new(self.pos + direction, direction, self.pos, self.direction)
    }

    /// Re-aim this segment without moving it.
    pub fn look(&mut self, direction: IVec2) {
        self.direction = direction;
        self.adjust_from_angle();
    }

    fn adjust_from_angle(&mut self) {
        let to = direction_angle(self.direction);
        while self.from_angle + 180.0 < to {
            self.from_angle += 360.0;
        }
        while self.from_angle - 180.0 > to {
            self.from_angle -= 360.0;
        }
    }

    /// Interpolated cell position at intra-cell fraction `t`.
    pub fn position_at(&self, t: f32) -> Vec2 {
        self.from_pos.as_vec2().lerp(self.pos.as_vec2(), t)
    }

    /// Interpolated display angle at intra-cell fraction `t`.
    pub fn angle_at(&self, t: f32) -> f32 {
        self.from_angle + (direction_angle(self.direction) - self.from_angle) * t
    }
}
