//! The cocoon: terminal transition from caterpillar to butterfly
//!
//! Created by the grid once a cocooning caterpillar settles. The coil
//! the body closed around is scan-filled to find every enclosed cell;
//! tiles inside contribute their cocoon bonus (and keys their level
//! unlocks) when the cocoon resolves into a butterfly. The weaving
//! animation itself is the host's concern.

use glam::IVec2;
use rand::Rng;

use crate::genetics::Butterfly;
use crate::grid::TileMap;

use super::{Caterpillar, Items};

/// Seconds from cocoon creation to butterfly resolution.
pub const COCOON_DURATION: f32 = 3.0;

const UP_BIT: u8 = 1;
const DOWN_BIT: u8 = 2;
const LEFT_BIT: u8 = 4;
const RIGHT_BIT: u8 = 8;

fn dir_bit(dir: IVec2) -> u8 {
    match (dir.signum().x, dir.signum().y) {
        (0, 1) => UP_BIT,
        (0, -1) => DOWN_BIT,
        (-1, 0) => LEFT_BIT,
        (1, 0) => RIGHT_BIT,
        _ => 0,
    }
}

/// What resolving a cocoon yields.
#[derive(Debug, Clone)]
pub struct CocoonResult {
    /// Score bonus folded from every tile the coil enclosed.
    pub bonus: i32,
    /// Levels unlocked by enclosed keys.
    pub unlocked_levels: Vec<usize>,
    /// The caterpillar's item tags at cocoon time.
    pub items: Items,
    pub butterfly: Butterfly,
}

/// A settled cocoon, waiting out its transformation.
#[derive(Debug, Clone)]
pub struct Cocoon {
    caterpillar: Caterpillar,
    covered: Vec<IVec2>,
    t: f32,
    resolved: bool,
}

impl Cocoon {
    pub fn new(caterpillar: Caterpillar) -> Self {
        let covered = coil_cells(&caterpillar);
        log::debug!("cocoon covers {} cells", covered.len());
        Self {
            caterpillar,
            covered,
            t: 0.0,
            resolved: false,
        }
    }

    /// Every cell the coil boundary or interior touches, in row order.
    pub fn covered_cells(&self) -> &[IVec2] {
        &self.covered
    }

    pub fn caterpillar(&self) -> &Caterpillar {
        &self.caterpillar
    }

    pub fn tick(&mut self, dt: f32) {
        self.t += dt;
    }

    /// Whether the transformation time has elapsed and the cocoon has
    /// not resolved yet.
    pub fn is_ready(&self) -> bool {
        self.t >= COCOON_DURATION && !self.resolved
    }

    /// Consume the enclosed tiles, fold their bonuses, and resolve the
    /// butterfly. Call once, when [`Cocoon::is_ready`].
    pub fn resolve(&mut self, map: &mut TileMap, rng: &mut impl Rng) -> CocoonResult {
        self.resolved = true;
        let mut bonus = 0;
        let mut unlocked_levels = Vec::new();
        for &pos in &self.covered {
            let info = map.tile(pos).cocoon_info();
            bonus += info.bonus;
            if let Some(level) = info.unlock_level {
                unlocked_levels.push(level);
            }
            if map.in_bounds(pos) {
                map.set(pos, None);
            }
        }
        let butterfly = self.caterpillar.make_butterfly(rng);
        log::info!(
            "cocoon resolved: bonus {}, unlocks {:?}, gene {:?}",
            bonus,
            unlocked_levels,
            butterfly.gene()
        );
        CocoonResult {
            bonus,
            unlocked_levels,
            items: self.caterpillar.items(),
            butterfly,
        }
    }
}

/// Cells covered by the closed coil of the body: the loop boundary from
/// the first visit of the collision cell onward, plus the scan-filled
/// interior. Falls back to the whole body when the coil never closed.
fn coil_cells(caterpillar: &Caterpillar) -> Vec<IVec2> {
    let Some(head) = caterpillar.head() else {
        return Vec::new();
    };
    let head_pos = head.pos;

    let mut cells: ahash::HashMap<IVec2, u8> = ahash::HashMap::default();
    let mut cocooning = false;
    for seg in caterpillar.segments() {
        if cocooning && !seg.phantom {
            let entry = cells.entry(seg.pos).or_insert(0);
            *entry |= dir_bit(seg.direction) | dir_bit(-seg.from_direction);
        }
        if seg.pos == head_pos {
            cocooning = true;
        }
    }
    if cells.is_empty() {
        for seg in caterpillar.segments().filter(|s| !s.phantom) {
            let entry = cells.entry(seg.pos).or_insert(0);
            *entry |= dir_bit(seg.direction) | dir_bit(-seg.from_direction);
        }
    }
    if cells.is_empty() {
        return Vec::new();
    }

    let min_x = cells.keys().map(|p| p.x).min().unwrap_or(0);
    let max_x = cells.keys().map(|p| p.x).max().unwrap_or(0);
    let min_y = cells.keys().map(|p| p.y).min().unwrap_or(0);
    let max_y = cells.keys().map(|p| p.y).max().unwrap_or(0);

    // Scan-line fill: vertical crossings toggle interior parity, and
    // cells passed while the parity is odd belong to the interior.
    for y in min_y..=max_y {
        let mut filling = 0u8;
        for x in min_x..=max_x {
            let pos = IVec2::new(x, y);
            if let Some(d) = cells.get_mut(&pos) {
                filling ^= *d & (UP_BIT | DOWN_BIT);
                *d |= filling;
            } else if filling != 0 {
                cells.insert(pos, UP_BIT | DOWN_BIT);
            }
        }
    }

    let mut covered: Vec<IVec2> = cells.into_keys().collect();
    covered.sort_by_key(|p| (p.y, p.x));
    covered
}
