//! Tile variants and their behavior
//!
//! A closed enum with one match arm per operation, replacing dynamic
//! dispatch: `is_edge` (impassable heading), `enter` (effect on the
//! caterpillar, reports growth), `attempt_turn` (turn permission),
//! `launch`, `is_water`, `grow_flower` and `cocoon_info`.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::caterpillar::{
    Caterpillar, Fate, Items, BOULDER_CRASH_MESSAGES, DIAMOND_CRASH_MESSAGES, DROWN_MESSAGES,
    EDGE_CRASH_MESSAGES, FALL_MESSAGES, KEY_CRASH_MESSAGES, STAR_CRASH_MESSAGES,
};

use super::GridEvent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MushroomKind {
    /// Grants one water crossing.
    Wing,
    /// Only good for a nap.
    Sleep,
    /// Primes, then grants, boulder-smashing strength.
    Strength,
}

/// One grid cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    /// Immutable sentinel for everything outside the grid.
    Edge,
    /// Grass may host a flower; entering then eats the flower first.
    Grass { flower: Option<f32> },
    Flower { hue: f32 },
    Water,
    Abyss,
    Boulder,
    Mushroom(MushroomKind),
    Diamond,
    Apple,
    Star,
    ArrowPad { direction: IVec2 },
    Launcher { direction: IVec2 },
    Key { level: usize },
}

/// Decorative hint plus score fold reported at cocoon time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CocoonInfo {
    pub bonus: i32,
    pub unlock_level: Option<usize>,
}

impl CocoonInfo {
    const NOTHING: Self = Self {
        bonus: 0,
        unlock_level: None,
    };

    fn bonus(bonus: i32) -> Self {
        Self {
            bonus,
            unlock_level: None,
        }
    }
}

impl Tile {
    /// Whether this tile is an impassable heading for the caterpillar.
    /// Direction-dependent for pads: a pad is a wall when approached
    /// against its arrow.
    pub fn is_edge(&self, caterpillar: &Caterpillar) -> bool {
        match self {
            Tile::Edge => true,
            Tile::ArrowPad { direction } | Tile::Launcher { direction } => {
                caterpillar.direction() == -*direction
            }
            _ => false,
        }
    }

    /// Turn permission gate for the tile under the head. Pads accept
    /// only their own direction; everything else allows any turn.
    pub fn attempt_turn(&self, _caterpillar: &Caterpillar, new_direction: IVec2) -> bool {
        match self {
            Tile::ArrowPad { direction } | Tile::Launcher { direction } => {
                new_direction == *direction
            }
            _ => true,
        }
    }

    /// Whether leaving this tile doubles the travel vector.
    pub fn launches(&self) -> bool {
        matches!(self, Tile::Launcher { .. })
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Tile::Water)
    }

    /// Attach a flower to a bare grass tile. Only grass grows flowers.
    pub fn grow_flower(&mut self, hue: f32) -> bool {
        if let Tile::Grass { flower: flower @ None } = self {
            *flower = Some(hue);
            true
        } else {
            false
        }
    }

    /// Score and unlock contribution when a cocoon encloses this tile.
    pub fn cocoon_info(&self) -> CocoonInfo {
        match self {
            Tile::Empty | Tile::Edge | Tile::Water | Tile::Abyss => CocoonInfo::NOTHING,
            Tile::Grass { flower: None } => CocoonInfo::bonus(5),
            Tile::Grass { flower: Some(_) } | Tile::Flower { .. } => CocoonInfo::bonus(30),
            Tile::Boulder => CocoonInfo::bonus(-25),
            Tile::Mushroom(_) => CocoonInfo::bonus(20),
            Tile::Apple => CocoonInfo::bonus(50),
            Tile::Star => CocoonInfo::bonus(100),
            Tile::Diamond => CocoonInfo::bonus(200),
            Tile::ArrowPad { .. } | Tile::Launcher { .. } => CocoonInfo::NOTHING,
            Tile::Key { level } => CocoonInfo {
                bonus: 75,
                unlock_level: Some(*level),
            },
        }
    }

    /// Apply this tile's entry effect to the caterpillar.
    ///
    /// Returns `(grow, consumed)`: whether the body grows a segment,
    /// and whether the tile is removed from the grid. The tile value
    /// itself may also mutate in place (grass losing its flower).
    pub fn enter(
        &mut self,
        pos: IVec2,
        caterpillar: &mut Caterpillar,
        events: &mut Vec<GridEvent>,
        rng: &mut impl Rng,
    ) -> (bool, bool) {
        match *self {
            Tile::Empty => (false, false),
            Tile::Edge => {
                caterpillar.die(Fate::Crash, EDGE_CRASH_MESSAGES, events, rng);
                (false, false)
            }
            Tile::Grass { flower: Some(hue) } => {
                // The flower is the prize; the grass cell survives.
                caterpillar.collect_hue(hue);
                events.push(GridEvent::Score {
                    amount: 100,
                    x: pos.x,
                    y: pos.y,
                });
                *self = Tile::Grass { flower: None };
                (true, false)
            }
            Tile::Grass { flower: None } => {
                events.push(GridEvent::Score {
                    amount: 10,
                    x: pos.x,
                    y: pos.y,
                });
                (true, true)
            }
            Tile::Flower { hue } => {
                caterpillar.collect_hue(hue);
                events.push(GridEvent::Score {
                    amount: 100,
                    x: pos.x,
                    y: pos.y,
                });
                (true, true)
            }
            Tile::Water => {
                if caterpillar.is_swimming() {
                    (false, false)
                } else if caterpillar.use_item(Items::MUSHROOM_W) {
                    caterpillar.set_swimming(true);
                    events.push(GridEvent::Label {
                        text: "setting sail!".to_string(),
                        x: pos.x,
                        y: pos.y,
                    });
                    (false, false)
                } else {
                    caterpillar.die(Fate::Drown, DROWN_MESSAGES, events, rng);
                    (false, false)
                }
            }
            Tile::Abyss => {
                caterpillar.die(Fate::Fall, FALL_MESSAGES, events, rng);
                (false, false)
            }
            Tile::Boulder => {
                if caterpillar.use_item(Items::MUSHROOM_S) {
                    events.push(GridEvent::Label {
                        text: "*smash*".to_string(),
                        x: pos.x,
                        y: pos.y,
                    });
                    events.push(GridEvent::Score {
                        amount: 50,
                        x: pos.x,
                        y: pos.y,
                    });
                    (false, true)
                } else {
                    caterpillar.die(Fate::Crash, BOULDER_CRASH_MESSAGES, events, rng);
                    (false, false)
                }
            }
            Tile::Mushroom(MushroomKind::Wing) => {
                caterpillar.collect(Items::MUSHROOM_W);
                events.push(GridEvent::Score {
                    amount: 20,
                    x: pos.x,
                    y: pos.y,
                });
                (false, true)
            }
            Tile::Mushroom(MushroomKind::Sleep) => {
                caterpillar.pause("zzz");
                (false, true)
            }
            Tile::Mushroom(MushroomKind::Strength) => {
                // The first one only primes the body for strength; the
                // digestion knocks the caterpillar out either way once.
                if caterpillar.items().contains(Items::BOULDER) {
                    caterpillar.collect(Items::MUSHROOM_S);
                } else {
                    caterpillar.collect(Items::BOULDER);
                    caterpillar.pause("urp");
                }
                events.push(GridEvent::Score {
                    amount: 20,
                    x: pos.x,
                    y: pos.y,
                });
                (false, true)
            }
            Tile::Diamond => {
                caterpillar.die(Fate::Crash, DIAMOND_CRASH_MESSAGES, events, rng);
                (false, false)
            }
            Tile::Apple => {
                caterpillar.collect(Items::APPLE);
                events.push(GridEvent::Score {
                    amount: 50,
                    x: pos.x,
                    y: pos.y,
                });
                (false, true)
            }
            Tile::Star => {
                // Touching the star is fatal but still counts as having
                // reached it; the tag survives into the achievements.
                caterpillar.collect(Items::STAR);
                caterpillar.die(Fate::Crash, STAR_CRASH_MESSAGES, events, rng);
                (false, false)
            }
            Tile::ArrowPad { .. } | Tile::Launcher { .. } => (false, false),
            Tile::Key { .. } => {
                caterpillar.die(Fate::Crash, KEY_CRASH_MESSAGES, events, rng);
                (false, false)
            }
        }
    }
}
