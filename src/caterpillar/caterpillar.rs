//! The caterpillar locomotion state machine
//!
//! Holds the ordered body (head is the back of the deque, tail the
//! front) and drives per-tick advancement, turning constraints, tile
//! entry, self-collision and fate resolution. The grid owns the
//! caterpillar and passes its tile map, event sink and RNG into every
//! tick; there is no back-pointer.

use std::collections::VecDeque;

use bitflags::bitflags;
use glam::IVec2;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::{perpendiculars, RIGHT};
use crate::genetics::{Butterfly, Egg};
use crate::grid::{GridEvent, Tile, TileMap};
use crate::hue::encode_hue;

use super::Segment;

/// Intra-cell ceiling while idle or freshly fated.
const IDLE_CEILING: f32 = 0.5;
/// Intra-cell ceiling while napping after a mushroom.
const PAUSE_CEILING: f32 = 0.9;
/// Seconds of post-fate animation during which a drowning or falling
/// body keeps retiring segments before it disappears outright.
const DECAY_WINDOW: f32 = 1.5;

/// Terminal cause of a run ending. `Cocooning` is the happy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fate {
    Cocooning,
    Crash,
    Drown,
    Fall,
    Unsail,
}

impl Fate {
    /// Drowning, falling and unsailing keep the body drifting forward
    /// through the decay window; every other fate freezes it.
    pub fn keeps_moving(self) -> bool {
        matches!(self, Fate::Drown | Fate::Fall | Fate::Unsail)
    }
}

bitflags! {
    /// Item tags in the caterpillar's inventory.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Items: u8 {
        /// Wing mushroom: one water crossing.
        const MUSHROOM_W = 1 << 0;
        /// Strength mushroom, fully active: smashes one boulder.
        const MUSHROOM_S = 1 << 1;
        const APPLE = 1 << 2;
        /// Boulder readiness, primed by the first strength mushroom.
        const BOULDER = 1 << 3;
        const STAR = 1 << 4;
        /// Derived from holding both STAR and APPLE.
        const AMPERSAND = 1 << 5;
    }
}

pub const DROWN_MESSAGES: &str = "\
Caterpillars can't swim.
Glub glub.
That water was deeper than it looked.";

pub const FALL_MESSAGES: &str = "\
The bottom of that pit is a long way down.
One wrong step...
Nothing but air below.";

pub const UNSAIL_MESSAGES: &str = "\
The sail collapsed mid-crossing.
No part of you was left ashore.
The bridge of bodies gave way.";

pub const CRASH_MESSAGES: &str = "\
Ouch.
That was a wall.
Watch where you're crawling!";

pub const BOULDER_CRASH_MESSAGES: &str = "\
Boulders don't move for caterpillars.
Splat.
Maybe eat a strength mushroom first?";

pub const DIAMOND_CRASH_MESSAGES: &str = "\
Diamonds are forever. You aren't.
Too hard to chew.
Sparkly, sharp, and very solid.";

pub const STAR_CRASH_MESSAGES: &str = "\
You can't eat a star.
Too bright! Too pointy!
Stars belong in the sky.";

pub const KEY_CRASH_MESSAGES: &str = "\
The key was heavier than it looked.
Locked out, knocked out.
Keys are for butterflies.";

pub const EDGE_CRASH_MESSAGES: &str = "\
The world ends here.
There is nothing beyond the meadow.
You hit the edge of everything.";

/// The player-controlled caterpillar.
#[derive(Debug, Clone)]
pub struct Caterpillar {
    body: VecDeque<Segment>,
    direction: IVec2,
    fate: Option<Fate>,
    moving: bool,
    paused: bool,
    pause_label: Option<String>,
    swimming: bool,
    visible: bool,
    cocooned: bool,
    items: Items,
    /// Codec characters of every flower hue eaten, in order.
    collected_hues: String,
    egg: Egg,
    /// Intra-cell interpolation fraction.
    t: f32,
    /// Time since a fate was set.
    ct: f32,
}

impl Caterpillar {
    pub fn new(egg: Egg, pos: IVec2, direction: IVec2) -> Self {
        let mut body = VecDeque::new();
        body.push_back(Segment::initial(pos, direction));
        Self {
            body,
            direction,
            fate: None,
            moving: true,
            paused: false,
            pause_label: None,
            swimming: false,
            visible: true,
            cocooned: false,
            items: Items::empty(),
            collected_hues: String::new(),
            egg,
            t: 0.0,
            ct: 0.0,
        }
    }

    /// Spawn in the middle of a `width` x `height` grid, like the
    /// tutorial does when a level gives no explicit spawn.
    pub fn centered(egg: Egg, width: i32, height: i32) -> Self {
        Self::new(egg, IVec2::new(width / 2, height / 2), RIGHT)
    }

    // --- accessors ---------------------------------------------------

    pub fn direction(&self) -> IVec2 {
        self.direction
    }

    pub fn fate(&self) -> Option<Fate> {
        self.fate
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause_label(&self) -> Option<&str> {
        self.pause_label.as_deref()
    }

    pub fn is_swimming(&self) -> bool {
        self.swimming
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True once the cocooning animation ceiling has been reached and
    /// the grid should take this caterpillar into a cocoon.
    pub fn is_cocooned(&self) -> bool {
        self.cocooned
    }

    pub fn items(&self) -> Items {
        self.items
    }

    pub fn collected_hues(&self) -> &str {
        &self.collected_hues
    }

    pub fn egg(&self) -> &Egg {
        &self.egg
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn ct(&self) -> f32 {
        self.ct
    }

    pub fn head(&self) -> Option<&Segment> {
        self.body.back()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    /// Number of visible body segments.
    pub fn len(&self) -> usize {
        self.body.iter().filter(|s| !s.phantom).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- inventory ---------------------------------------------------

    /// Add an item tag. Holding both star and apple derives the
    /// ampersand, idempotently.
    pub fn collect(&mut self, item: Items) {
        self.items.insert(item);
        if self.items.contains(Items::STAR | Items::APPLE) {
            self.items.insert(Items::AMPERSAND);
        }
    }

    /// Remove an item tag if held; reports whether it was.
    pub fn use_item(&mut self, item: Items) -> bool {
        if self.items.contains(item) {
            self.items.remove(item);
            true
        } else {
            false
        }
    }

    /// Record a flower hue for the genetics hand-off.
    pub fn collect_hue(&mut self, hue: f32) {
        self.collected_hues.push(encode_hue(Some(hue)));
    }

    // --- state transitions -------------------------------------------

    /// Fall asleep with an utterance label the host may emit while the
    /// nap lasts. A nap ends on a non-reversal turn or a go command.
    pub fn pause(&mut self, label: &str) {
        self.paused = true;
        self.pause_label = Some(label.to_string());
    }

    pub fn wake(&mut self) {
        self.paused = false;
        self.pause_label = None;
    }

    pub(crate) fn set_swimming(&mut self, swimming: bool) {
        self.swimming = swimming;
    }

    /// Set a fate and announce it with one random line from the given
    /// newline-delimited message pool. A no-op if already fated.
    pub fn die(
        &mut self,
        fate: Fate,
        messages: &str,
        events: &mut Vec<GridEvent>,
        rng: &mut impl Rng,
    ) {
        if self.fate.is_some() {
            return;
        }
        self.fate = Some(fate);
        self.ct = 0.0;
        if !fate.keeps_moving() {
            self.moving = false;
        }
        let lines: Vec<&str> = messages.lines().collect();
        let message = lines
            .choose(rng)
            .copied()
            .unwrap_or("The end.")
            .to_string();
        log::info!("caterpillar fate {:?}: {}", fate, message);
        events.push(GridEvent::GameOver { message });
    }

    /// Player-commanded turn. Rejected while fated or swimming; vetoed
    /// by the tile under the head; 180-degree reversal is only allowed
    /// at body length 1. A non-reversal turn wakes a napping
    /// caterpillar. Returns whether the turn happened.
    pub fn turn(&mut self, direction: IVec2, under: Tile) -> bool {
        if self.fate.is_some() || self.swimming {
            return false;
        }
        let Some(head) = self.body.back() else {
            return false;
        };
        let reversal = direction == -head.from_direction;
        if self.paused && !reversal {
            self.wake();
        }
        if reversal && self.len() > 1 {
            return false;
        }
        if !under.attempt_turn(self, direction) {
            return false;
        }
        self.steer(direction);
        true
    }

    /// Turn without player-command gating; used by edge avoidance.
    fn steer(&mut self, direction: IVec2) {
        self.direction = direction;
        if let Some(head) = self.body.back_mut() {
            head.look(direction);
        }
    }

    /// Advance simulated time. Whole-cell steps fire before the
    /// fractional update and their side effects land in chronological
    /// order; a fate transition consumes the rest of the tick.
    pub fn tick(
        &mut self,
        dt: f32,
        map: &mut TileMap,
        events: &mut Vec<GridEvent>,
        rng: &mut impl Rng,
    ) {
        match self.fate {
            Some(Fate::Cocooning) => {
                self.ct += dt;
                self.t += dt;
                if self.t > IDLE_CEILING {
                    self.t = IDLE_CEILING;
                    self.cocooned = true;
                }
            }
            Some(fate) if fate.keeps_moving() => {
                self.ct += dt;
                if self.ct < DECAY_WINDOW {
                    let mut dt = dt;
                    while self.t + dt > 1.0 {
                        dt -= 1.0;
                        self.shrink_step();
                    }
                    self.t += dt;
                } else if self.visible {
                    self.body.clear();
                    self.visible = false;
                }
            }
            Some(_) => {
                self.ct += dt;
                self.t = (self.t + dt).min(IDLE_CEILING);
            }
            None => {
                if self.paused {
                    self.t = (self.t + dt).min(PAUSE_CEILING);
                } else if !self.moving {
                    self.t = (self.t + dt).min(IDLE_CEILING);
                } else {
                    let mut dt = dt;
                    while self.t + dt > 1.0 {
                        dt -= 1.0;
                        self.step(map, events, rng);
                        if self.fate.is_some() || !self.moving || self.paused {
                            self.t = 0.0;
                            return;
                        }
                    }
                    self.t += dt;
                }
            }
        }
    }

    /// One whole-cell step: resolve the destination, dodge edges once,
    /// detect self-collision, enter the tile and settle the tail.
    pub fn step(&mut self, map: &mut TileMap, events: &mut Vec<GridEvent>, rng: &mut impl Rng) {
        self.step_inner(map, events, rng, 0);
    }

    fn step_inner(
        &mut self,
        map: &mut TileMap,
        events: &mut Vec<GridEvent>,
        rng: &mut impl Rng,
        depth: u8,
    ) {
        if self.fate.is_some() {
            return;
        }
        let Some(&head) = self.body.back() else {
            return;
        };
        let under = map.tile(head.pos);
        let launched = under.launches();
        let step_dir = if launched {
            self.direction * 2
        } else {
            self.direction
        };
        let target = head.pos + step_dir;

        // Dodge a dead-end heading by turning to a random passable
        // perpendicular. One retry level only; with nowhere to go the
        // step proceeds into the edge and the tile settles our fate.
        if depth == 0 && map.tile(target).is_edge(self) {
            let mut options = perpendiculars(self.direction);
            options.shuffle(rng);
            for alt in options {
                if !map.tile(head.pos + alt).is_edge(self) && under.attempt_turn(self, alt) {
                    self.steer(alt);
                    return self.step_inner(map, events, rng, depth + 1);
                }
            }
        }

        let mut new_head = head.grow_head(step_dir);

        // Running into our own body starts the cocoon. The head curls
        // to follow the segment it met, and this step's tile effects
        // are skipped.
        let mut freshly_cocooning = false;
        for seg in &self.body {
            if !seg.phantom && seg.pos == new_head.pos {
                new_head.look(seg.direction);
                self.fate = Some(Fate::Cocooning);
                self.moving = false;
                self.ct = 0.0;
                freshly_cocooning = true;
                log::debug!("self-collision at {:?}, cocooning", new_head.pos);
                break;
            }
        }

        if launched {
            // Invisible bridge segment keeps the body contiguous over
            // the jumped cell.
            let mut bridge = head.grow_head(self.direction);
            bridge.phantom = true;
            self.body.push_back(bridge);
        }
        self.body.push_back(new_head);

        if freshly_cocooning {
            return;
        }

        if self.swimming && !map.tile(target).is_water() {
            self.swimming = false;
        }

        let grow = map.enter(target, self, events, rng);
        if grow {
            if let Some(tail) = self.body.front_mut() {
                tail.fresh_end = true;
            }
        } else {
            self.body.pop_front();
        }

        // A sail only holds while some part of the body touches land.
        if self.swimming
            && self
                .body
                .iter()
                .all(|seg| seg.phantom || map.tile(seg.pos).is_water())
        {
            self.die(Fate::Unsail, UNSAIL_MESSAGES, events, rng);
        }
    }

    /// Post-fate step while drowning or falling: the head keeps
    /// drifting forward while the tail pulls in faster, shrinking the
    /// body one segment per crossing. No tile effects apply.
    fn shrink_step(&mut self) {
        if let Some(&head) = self.body.back() {
            self.body.push_back(head.grow_head(self.direction));
        }
        self.body.pop_front();
        self.body.pop_front();
        if self.body.is_empty() {
            self.visible = false;
        }
    }

    /// Hand the collected hues to the egg and resolve the butterfly.
    pub fn make_butterfly(&self, rng: &mut impl Rng) -> Butterfly {
        self.egg.make_butterfly(&self.collected_hues, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{DOWN, LEFT, UP};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn rng() -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(12345)
    }

    fn setup(width: i32, height: i32) -> (TileMap, Vec<GridEvent>, Xoshiro256StarStar) {
        (TileMap::new(width, height), Vec::new(), rng())
    }

    fn walk(cat: &mut Caterpillar, map: &mut TileMap, steps: usize) {
        let mut events = Vec::new();
        let mut r = rng();
        for _ in 0..steps {
            cat.step(map, &mut events, &mut r);
        }
    }

    #[test]
    fn test_step_moves_head_one_cell() {
        let (mut map, mut events, mut r) = setup(9, 9);
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.head().unwrap().pos, IVec2::new(5, 4));
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn test_flower_grows_body_and_collects_hue() {
        let (mut map, mut events, mut r) = setup(5, 5);
        map.set(IVec2::new(3, 2), Some(Tile::Flower { hue: 0.4 }));
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(2, 2), RIGHT);
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.head().unwrap().pos, IVec2::new(3, 2));
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.collected_hues().len(), 1);
        assert_eq!(map.tile(IVec2::new(3, 2)), Tile::Empty);
    }

    #[test]
    fn test_reversal_locked_above_length_one() {
        let (mut map, _, _) = setup(9, 9);
        map.set(IVec2::new(5, 4), Some(Tile::Grass { flower: None }));
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        walk(&mut cat, &mut map, 1);
        assert_eq!(cat.len(), 2);
        assert!(!cat.turn(LEFT, Tile::Empty));
        assert!(cat.turn(UP, Tile::Empty));
    }

    #[test]
    fn test_length_one_may_reverse() {
        let (_, _, _) = setup(9, 9);
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        assert_eq!(cat.len(), 1);
        assert!(cat.turn(LEFT, Tile::Empty));
        assert_eq!(cat.direction(), LEFT);
    }

    #[test]
    fn test_arrow_pad_vetoes_turns() {
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        let pad = Tile::ArrowPad { direction: UP };
        assert!(!cat.turn(DOWN, pad));
        assert!(cat.turn(UP, pad));
    }

    #[test]
    fn test_turn_rejected_when_fated() {
        let (_, mut events, mut r) = setup(9, 9);
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.die(Fate::Crash, CRASH_MESSAGES, &mut events, &mut r);
        assert!(!cat.turn(UP, Tile::Empty));
    }

    #[test]
    fn test_turn_wakes_paused_caterpillar() {
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        // Grow to length 2 so a reversal would be locked.
        let (mut map, _, _) = setup(9, 9);
        map.set(IVec2::new(5, 4), Some(Tile::Grass { flower: None }));
        walk(&mut cat, &mut map, 1);
        cat.pause("zzz");
        assert!(cat.turn(UP, Tile::Empty));
        assert!(!cat.is_paused());
    }

    #[test]
    fn test_self_collision_sets_cocooning() {
        let (mut map, mut events, mut r) = setup(11, 11);
        // Grow a long body on grass, then loop it into itself.
        for x in 3..=7 {
            map.set(IVec2::new(x, 5), Some(Tile::Grass { flower: None }));
        }
        for y in 6..=7 {
            map.set(IVec2::new(7, y), Some(Tile::Grass { flower: None }));
        }
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(2, 5), RIGHT);
        for _ in 0..5 {
            cat.step(&mut map, &mut events, &mut r);
        }
        assert!(cat.len() >= 5);
        cat.turn(UP, Tile::Empty);
        cat.step(&mut map, &mut events, &mut r);
        cat.step(&mut map, &mut events, &mut r);
        cat.turn(LEFT, Tile::Empty);
        cat.step(&mut map, &mut events, &mut r);
        cat.turn(DOWN, Tile::Empty);
        cat.step(&mut map, &mut events, &mut r);
        cat.turn(RIGHT, Tile::Empty);
        // Steps back onto its own body.
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.fate(), Some(Fate::Cocooning));
        assert!(!cat.is_moving());
        let head = cat.head().unwrap().pos;
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.head().unwrap().pos, head, "no steps after cocooning");
    }

    #[test]
    fn test_cocooning_reaches_cocooned_at_ceiling() {
        let (mut map, mut events, mut r) = setup(9, 9);
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.fate = Some(Fate::Cocooning);
        cat.moving = false;
        cat.t = 0.0;
        cat.tick(0.6, &mut map, &mut events, &mut r);
        assert!(cat.is_cocooned());
        assert_eq!(cat.t(), 0.5);
    }

    #[test]
    fn test_edge_avoidance_turns_within_one_retry() {
        let (mut map, mut events, mut r) = setup(9, 9);
        // Head right next to the right boundary, both perpendiculars
        // open: the step must land somewhere passable.
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(8, 4), RIGHT);
        cat.step(&mut map, &mut events, &mut r);
        let head = cat.head().unwrap().pos;
        assert!(map.in_bounds(head), "head ended out of bounds: {:?}", head);
        assert_ne!(head, IVec2::new(9, 4));
        assert!(cat.fate().is_none());
    }

    #[test]
    fn test_cornered_caterpillar_crashes_into_edge() {
        let (mut map, mut events, mut r) = setup(9, 9);
        // Wall off both perpendiculars with boulders in the corner.
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(8, 0), RIGHT);
        map.set(IVec2::new(8, 1), Some(Tile::Boulder));
        // Below is out of bounds, above is a boulder; straight ahead is
        // the edge. Boulders are not edges, so the dodge turns into one.
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.fate(), Some(Fate::Crash));
    }

    #[test]
    fn test_drown_keeps_moving_then_decays() {
        let (mut map, mut events, mut r) = setup(9, 9);
        map.set(IVec2::new(5, 4), Some(Tile::Water));
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.fate(), Some(Fate::Drown));
        assert!(cat.is_moving(), "drown keeps the body drifting");
        // Decay window: segments retire, then the body vanishes.
        for _ in 0..40 {
            cat.tick(0.1, &mut map, &mut events, &mut r);
        }
        assert_eq!(cat.len(), 0);
        assert!(!cat.is_visible());
    }

    #[test]
    fn test_decay_window_drifts_the_head_forward() {
        let (mut map, mut events, mut r) = setup(12, 9);
        map.set(IVec2::new(3, 4), Some(Tile::Grass { flower: None }));
        map.set(IVec2::new(4, 4), Some(Tile::Grass { flower: None }));
        map.set(IVec2::new(5, 4), Some(Tile::Water));
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(2, 4), RIGHT);
        for _ in 0..3 {
            cat.step(&mut map, &mut events, &mut r);
        }
        assert_eq!(cat.fate(), Some(Fate::Drown));
        assert_eq!(cat.len(), 3);
        // One crossing inside the decay window: the head advances a
        // cell while the body shrinks by one.
        cat.tick(1.2, &mut map, &mut events, &mut r);
        assert_eq!(cat.head().unwrap().pos, IVec2::new(6, 4));
        assert_eq!(cat.len(), 2);
        // Past the window everything collapses.
        cat.tick(1.0, &mut map, &mut events, &mut r);
        assert_eq!(cat.len(), 0);
        assert!(!cat.is_visible());
    }

    #[test]
    fn test_launcher_doubles_step_and_bridges_gap() {
        let (mut map, mut events, mut r) = setup(9, 9);
        map.set(IVec2::new(4, 4), Some(Tile::Launcher { direction: RIGHT }));
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.step(&mut map, &mut events, &mut r);
        assert_eq!(cat.head().unwrap().pos, IVec2::new(6, 4));
        // The bridge segment exists but is phantom: not part of the
        // visible length and not a collision target.
        assert_eq!(cat.len(), 1);
        assert!(cat.segments().any(|s| s.phantom));
    }

    #[test]
    fn test_ampersand_derived_from_star_and_apple() {
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(0, 0), RIGHT);
        cat.collect(Items::STAR);
        assert!(!cat.items().contains(Items::AMPERSAND));
        cat.collect(Items::APPLE);
        assert!(cat.items().contains(Items::AMPERSAND));
        // Idempotent.
        cat.collect(Items::APPLE);
        assert!(cat.items().contains(Items::AMPERSAND));
    }

    #[test]
    fn test_die_is_terminal_and_picks_a_message() {
        let (_, mut events, mut r) = setup(9, 9);
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.die(Fate::Crash, CRASH_MESSAGES, &mut events, &mut r);
        cat.die(Fate::Drown, DROWN_MESSAGES, &mut events, &mut r);
        assert_eq!(cat.fate(), Some(Fate::Crash));
        assert_eq!(events.len(), 1);
        match &events[0] {
            GridEvent::GameOver { message } => {
                assert!(CRASH_MESSAGES.lines().any(|l| l == message));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_tick_accumulates_steps_in_order() {
        let (mut map, mut events, mut r) = setup(20, 9);
        for x in 5..=7 {
            map.set(IVec2::new(x, 4), Some(Tile::Grass { flower: None }));
        }
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        // 2.5 cells worth of time: exactly two whole steps fire.
        cat.tick(2.5, &mut map, &mut events, &mut r);
        assert_eq!(cat.head().unwrap().pos, IVec2::new(6, 4));
        assert_eq!(cat.len(), 3);
        assert!((cat.t() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_paused_tick_caps_at_pause_ceiling() {
        let (mut map, mut events, mut r) = setup(9, 9);
        let mut cat = Caterpillar::new(Egg::default(), IVec2::new(4, 4), RIGHT);
        cat.pause("zzz");
        cat.tick(5.0, &mut map, &mut events, &mut r);
        assert_eq!(cat.t(), 0.9);
        assert_eq!(cat.head().unwrap().pos, IVec2::new(4, 4));
    }
}
