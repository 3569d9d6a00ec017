//! Persisted game state
//!
//! Broods of eggs, the butterfly collection, level access and
//! achievements. Saved as RON; a missing file yields a fresh state.
//! The restock rule guarantees there is always something to hatch,
//! so the grid can always be handed an egg.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::caterpillar::Items;
use crate::genetics::{Butterfly, Egg};

/// Number of level slots tracked for accessibility.
pub const LEVEL_SLOTS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Clutches of eggs, oldest brood first.
    pub broods: Vec<Vec<Egg>>,
    pub in_tutorial: bool,
    pub butterflies: Vec<Butterfly>,
    pub accessible_levels: Vec<bool>,
    pub last_level: usize,
    /// Item tag names earned per level.
    pub level_achievements: BTreeMap<usize, Vec<String>>,
    pub best_scores: BTreeMap<usize, i32>,
}

impl Default for GameState {
    fn default() -> Self {
        let mut accessible_levels = vec![false; LEVEL_SLOTS];
        accessible_levels[0] = true;
        Self {
            broods: Vec::new(),
            in_tutorial: true,
            butterflies: Vec::new(),
            accessible_levels,
            last_level: 0,
            level_achievements: BTreeMap::new(),
            best_scores: BTreeMap::new(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.adjust();
        state
    }

    /// Load from disk; a missing file starts a fresh state. Corrupt
    /// files are an error for the host to surface.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no save at {:?}, starting fresh", path);
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read save file {:?}", path))?;
        let mut state: GameState =
            ron::from_str(&text).context("failed to parse save file")?;
        state.adjust();
        Ok(state)
    }

    /// Save to disk. Atomic write: temp file, then rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = ron::ser::to_string_pretty(self, Default::default())
            .context("failed to serialize game state")?;
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, text).context("failed to write save temp file")?;
        std::fs::rename(&temp_path, path).context("failed to rename save file")?;
        log::info!("saved game state to {:?}", path);
        Ok(())
    }

    /// Total eggs across all broods, stopping early at `max`.
    pub fn count_eggs(&self, max: Option<usize>) -> usize {
        let mut count = 0;
        for brood in &self.broods {
            count += brood.len();
            if let Some(max) = max {
                if count >= max {
                    return count;
                }
            }
        }
        count
    }

    /// The player is nearly out of genetic material.
    pub fn is_emergency(&self) -> bool {
        self.count_eggs(Some(2)) + self.butterflies.len() < 1
    }

    /// Restock rule: keep at least a default egg and butterfly around
    /// so a new round can always start. Re-enters the tutorial when it
    /// fires.
    pub fn adjust(&mut self) {
        if self.count_eggs(Some(2)) + self.butterflies.len() < 2 {
            self.broods.push(vec![Egg::default()]);
            self.butterflies.push(Butterfly::default());
            self.in_tutorial = true;
        }
    }

    /// Take an egg for the next round, newest brood first.
    pub fn choose_egg(&mut self) -> Egg {
        self.adjust();
        let mut taken = None;
        for brood in self.broods.iter_mut().rev() {
            if let Some(egg) = brood.pop() {
                taken = Some(egg);
                break;
            }
        }
        self.broods.retain(|b| !b.is_empty());
        // adjust() guarantees a brood; still, never fail here.
        taken.unwrap_or_default()
    }

    /// Lay a new brood from a pair of parent butterflies.
    pub fn lay_brood(&mut self, parents: Vec<Butterfly>, clutch_size: usize) {
        let brood = (0..clutch_size)
            .map(|_| Egg::new(parents.clone()))
            .collect();
        self.broods.push(brood);
    }

    /// Record the outcome of a finished round.
    pub fn level_completed(
        &mut self,
        level: usize,
        score: i32,
        items: Items,
        butterfly: Option<Butterfly>,
        unlocked_levels: &[usize],
    ) {
        let best = self.best_scores.entry(level).or_insert(0);
        *best = (*best).max(score);

        let names = self.level_achievements.entry(level).or_default();
        for (name, _) in items.iter_names() {
            let name = name.to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names.sort();

        for &unlocked in unlocked_levels {
            if unlocked < self.accessible_levels.len() {
                self.accessible_levels[unlocked] = true;
            }
        }

        if let Some(butterfly) = butterfly {
            self.butterflies.push(butterfly);
        }
        self.last_level = level;
        self.in_tutorial = false;
        self.adjust();
    }
}
