//! The caterpillar: body segments, the locomotion state machine, and
//! the cocoon transition that resolves it into a butterfly.

mod cocoon;
mod segment;

#[allow(clippy::module_inception)]
mod caterpillar;

pub use caterpillar::{
    Caterpillar, Fate, Items, BOULDER_CRASH_MESSAGES, CRASH_MESSAGES, DIAMOND_CRASH_MESSAGES,
    DROWN_MESSAGES, EDGE_CRASH_MESSAGES, FALL_MESSAGES, KEY_CRASH_MESSAGES, STAR_CRASH_MESSAGES,
    UNSAIL_MESSAGES,
};
pub use cocoon::{Cocoon, CocoonResult, COCOON_DURATION};
pub use segment::Segment;
