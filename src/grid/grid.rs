//! Grid: bounded 2D tile lookup, the live caterpillar, and the tick loop
//!
//! The grid owns the caterpillar, the optional cocoon, the seedable RNG
//! and an event queue the host drains each frame. Tile lookups outside
//! the bounds resolve to the immutable [`Tile::Edge`] sentinel, never an
//! error.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::caterpillar::{Caterpillar, Cocoon, Items};
use crate::genetics::{Butterfly, Egg};
use crate::levels::LevelDef;

use super::Tile;

/// Simulated cells per second of real time.
pub const SPEED: f32 = 2.0;

/// Seconds between spontaneous flower growth attempts.
const AUTOGROW_INTERVAL: f32 = 4.0;

/// Seconds between utterances of a napping caterpillar's label.
const UTTERANCE_INTERVAL: f32 = 1.0;

/// Player commands, already decoded from raw input by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(IVec2),
    /// Wake up and get crawling.
    Go,
}

/// Feedback for the host, drained with [`Grid::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    Score { amount: i32, x: i32, y: i32 },
    Label { text: String, x: i32, y: i32 },
    GameOver { message: String },
    /// The round is over and the grid can be torn down.
    Done,
    LevelComplete {
        score: i32,
        items: Items,
        butterfly: Butterfly,
        unlocked_levels: Vec<usize>,
    },
}

/// Sparse, bounded tile storage.
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: ahash::HashMap<IVec2, Tile>,
}

impl TileMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: ahash::HashMap::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Tile at `pos`: [`Tile::Edge`] outside the bounds, [`Tile::Empty`]
    /// for vacant cells.
    pub fn tile(&self, pos: IVec2) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Edge;
        }
        self.tiles.get(&pos).copied().unwrap_or(Tile::Empty)
    }

    /// Place or clear a tile. Writes outside the bounds are ignored.
    pub fn set(&mut self, pos: IVec2, tile: Option<Tile>) {
        if !self.in_bounds(pos) {
            return;
        }
        match tile {
            Some(t) => {
                self.tiles.insert(pos, t);
            }
            None => {
                self.tiles.remove(&pos);
            }
        }
    }

    /// Coordinates of every tile matching the predicate.
    pub fn find(&self, mut pred: impl FnMut(&Tile) -> bool) -> Vec<IVec2> {
        let mut found: Vec<IVec2> = self
            .tiles
            .iter()
            .filter(|(_, t)| pred(t))
            .map(|(&p, _)| p)
            .collect();
        found.sort_by_key(|p| (p.y, p.x));
        found
    }

    /// Run the destination tile's entry effect and settle the cell:
    /// consumed tiles vanish, mutated ones are written back. Returns
    /// whether the caterpillar grows.
    pub fn enter(
        &mut self,
        pos: IVec2,
        caterpillar: &mut Caterpillar,
        events: &mut Vec<super::GridEvent>,
        rng: &mut impl Rng,
    ) -> bool {
        let mut tile = self.tile(pos);
        let (grow, consumed) = tile.enter(pos, caterpillar, events, rng);
        if consumed {
            self.set(pos, None);
        } else if self.in_bounds(pos) && tile != Tile::Empty {
            self.set(pos, Some(tile));
        }
        grow
    }
}

/// The playing field for one round.
pub struct Grid {
    map: TileMap,
    caterpillar: Option<Caterpillar>,
    cocoon: Option<Cocoon>,
    events: Vec<GridEvent>,
    rng: Xoshiro256StarStar,
    score: i32,
    level: usize,
    pending_egg: Option<Egg>,
    autogrow_flowers: bool,
    autogrow_timer: f32,
    utterance_timer: f32,
    done: bool,
}

impl Grid {
    pub const DEFAULT_WIDTH: i32 = 16;
    pub const DEFAULT_HEIGHT: i32 = 9;

    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        Self {
            map: TileMap::new(width, height),
            caterpillar: None,
            cocoon: None,
            events: Vec::new(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            score: 0,
            level: 0,
            pending_egg: None,
            autogrow_flowers: true,
            autogrow_timer: 0.0,
            utterance_timer: 0.0,
            done: false,
        }
    }

    /// Build the playing field from a level definition, spawning the
    /// caterpillar with the given genetic payload.
    pub fn load_level(&mut self, def: &LevelDef, egg: Egg) {
        log::info!("loading level {} ({})", def.id, def.name);
        self.map = TileMap::new(self.map.width, self.map.height);
        self.caterpillar = None;
        self.cocoon = None;
        self.score = 0;
        self.done = false;
        self.level = def.id;
        self.pending_egg = Some(egg);
        (def.generator)(self);
        self.autogrow_flowers = def.autogrow_flowers;
        if self.caterpillar.is_none() {
            // Levels without an explicit spawn start in the middle.
            let egg = self.pending_egg.take().unwrap_or_default();
            self.caterpillar = Some(Caterpillar::centered(
                egg,
                self.map.width,
                self.map.height,
            ));
        }
    }

    /// Spawn the caterpillar; called by level generators.
    pub fn add_caterpillar(&mut self, pos: IVec2, direction: IVec2) {
        let egg = self.pending_egg.take().unwrap_or_default();
        self.caterpillar = Some(Caterpillar::new(egg, pos, direction));
    }

    // --- host-facing surface -----------------------------------------

    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.map.tile(IVec2::new(x, y))
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Option<Tile>) {
        self.map.set(IVec2::new(x, y), tile);
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn caterpillar(&self) -> Option<&Caterpillar> {
        self.caterpillar.as_ref()
    }

    pub fn cocoon(&self) -> Option<&Cocoon> {
        self.cocoon.as_ref()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn add_label(&mut self, text: impl Into<String>, x: i32, y: i32) {
        self.events.push(GridEvent::Label {
            text: text.into(),
            x,
            y,
        });
    }

    pub fn add_score(&mut self, amount: i32, x: i32, y: i32) {
        self.score += amount;
        self.events.push(GridEvent::Score { amount, x, y });
    }

    /// Take all events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Decode a player command. Invalid commands (turning while fated,
    /// against a pad, or into the body) are silently dropped; player
    /// input always races the simulation.
    pub fn handle_command(&mut self, command: Command) {
        let Some(cat) = self.caterpillar.as_mut() else {
            return;
        };
        match command {
            Command::Turn(direction) => {
                if !crate::direction::is_canonical(direction) {
                    return;
                }
                let under = match cat.head() {
                    Some(head) => self.map.tile(head.pos),
                    None => Tile::Empty,
                };
                cat.turn(direction, under);
            }
            Command::Go => {
                if cat.fate().is_none() {
                    cat.wake();
                }
            }
        }
    }

    /// Advance the simulation by `dt` seconds of real time.
    ///
    /// Any number of whole-cell steps may fire inside one tick; their
    /// side effects land in strict chronological order before the
    /// fractional remainder is applied.
    pub fn tick(&mut self, dt: f32) {
        let mut gained = 0;
        let mut settle_cocoon = false;
        {
            let Self {
                map,
                caterpillar,
                cocoon,
                events,
                rng,
                ..
            } = self;
            if let Some(cat) = caterpillar {
                let before = events.len();
                cat.tick(dt * SPEED, map, events, rng);
                // Fold the scores the tiles just emitted into the total.
                gained = events[before..]
                    .iter()
                    .map(|e| match e {
                        GridEvent::Score { amount, .. } => *amount,
                        _ => 0,
                    })
                    .sum();
                settle_cocoon = cat.is_cocooned() && cocoon.is_none();
            }
        }
        self.score += gained;
        if settle_cocoon {
            self.add_cocoon();
        }

        self.tick_cocoon(dt);
        self.tick_autogrow(dt);
        self.tick_utterance(dt);
    }

    /// Move the settled caterpillar into a cocoon. Invoked by the tick
    /// loop when the cocooning animation reaches its ceiling.
    pub fn add_cocoon(&mut self) {
        if let Some(cat) = self.caterpillar.take() {
            log::info!("caterpillar cocooned with {} hues", cat.collected_hues().len());
            self.cocoon = Some(Cocoon::new(cat));
        }
    }

    fn tick_cocoon(&mut self, dt: f32) {
        let Some(cocoon) = self.cocoon.as_mut() else {
            return;
        };
        cocoon.tick(dt);
        if !cocoon.is_ready() {
            return;
        }
        let result = cocoon.resolve(&mut self.map, &mut self.rng);
        self.score += result.bonus;
        if result.bonus != 0 {
            self.events.push(GridEvent::Score {
                amount: result.bonus,
                x: self.map.width / 2,
                y: self.map.height / 2,
            });
        }
        self.events.push(GridEvent::LevelComplete {
            score: self.score,
            items: result.items,
            butterfly: result.butterfly,
            unlocked_levels: result.unlocked_levels,
        });
        self.events.push(GridEvent::Done);
        self.done = true;
    }

    /// Spontaneous flower growth on a random bare grass tile.
    fn tick_autogrow(&mut self, dt: f32) {
        if !self.autogrow_flowers || self.done {
            return;
        }
        self.autogrow_timer += dt;
        if self.autogrow_timer < AUTOGROW_INTERVAL {
            return;
        }
        self.autogrow_timer = 0.0;
        let bare = self
            .map
            .find(|t| matches!(t, Tile::Grass { flower: None }));
        if bare.is_empty() {
            return;
        }
        let pos = bare[self.rng.random_range(0..bare.len())];
        let hue: f32 = self.rng.random();
        let mut tile = self.map.tile(pos);
        if tile.grow_flower(hue) {
            self.map.set(pos, Some(tile));
            log::debug!("flower grew at {:?}", pos);
        }
    }

    /// A napping caterpillar mumbles its label now and then.
    fn tick_utterance(&mut self, dt: f32) {
        let Some(cat) = self.caterpillar.as_ref() else {
            return;
        };
        if !cat.is_paused() {
            self.utterance_timer = 0.0;
            return;
        }
        self.utterance_timer += dt;
        if self.utterance_timer >= UTTERANCE_INTERVAL {
            self.utterance_timer = 0.0;
            if let (Some(label), Some(head)) = (cat.pause_label(), cat.head()) {
                let (x, y) = (head.pos.x, head.pos.y);
                let text = label.to_string();
                self.events.push(GridEvent::Label { text, x, y });
            }
        }
    }
}
