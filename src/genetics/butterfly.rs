//! Butterfly wing gene
//!
//! Immutable once created; persisted across game sessions as the raw
//! codec string, one character per wing patch.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hue::{self, NO_HUE};

/// Number of colorable patches on a butterfly wing, and therefore the
/// fixed length of every wing gene.
pub const WING_PATCH_COUNT: usize = 16;

/// Errors when parsing a persisted wing gene.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneError {
    #[error("wing gene must be {WING_PATCH_COUNT} patches long, got {0}")]
    BadLength(usize),
    #[error("wing gene contains non-encodable character {0:?}")]
    BadSymbol(char),
}

/// A butterfly: one fixed-length wing hue sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Butterfly {
    hues: String,
}

impl Butterfly {
    /// Parse a persisted gene string, validating length and symbols.
    pub fn from_gene(gene: &str) -> Result<Self, GeneError> {
        let len = gene.chars().count();
        if len != WING_PATCH_COUNT {
            return Err(GeneError::BadLength(len));
        }
        for c in gene.chars() {
            if c != NO_HUE && !('!'..='~').contains(&c) {
                return Err(GeneError::BadSymbol(c));
            }
        }
        Ok(Self {
            hues: gene.to_string(),
        })
    }

    /// Wrap an offspring gene produced by the genetics algorithm.
    /// The length invariant is the caller's responsibility.
    pub(crate) fn from_raw(hues: String) -> Self {
        debug_assert_eq!(hues.chars().count(), WING_PATCH_COUNT);
        Self { hues }
    }

    /// A butterfly with random wing hues, drawn with [`hue::random_hue`].
    pub fn random(rng: &mut impl Rng) -> Self {
        let hues = (0..WING_PATCH_COUNT).map(|_| hue::random_hue(rng)).collect();
        Self { hues }
    }

    /// The raw gene string.
    pub fn gene(&self) -> &str {
        &self.hues
    }

    /// Hue character of one wing patch.
    pub fn patch(&self, index: usize) -> char {
        self.hues.chars().nth(index).unwrap_or(NO_HUE)
    }

    /// RGB colors for every wing patch at the game's wing saturation.
    pub fn patch_colors(&self) -> Vec<(u8, u8, u8)> {
        self.hues.chars().map(|c| hue::hue_color(c, 0.9)).collect()
    }
}

impl Default for Butterfly {
    /// An unpainted butterfly: every patch is the no-hue sentinel.
    fn default() -> Self {
        Self {
            hues: NO_HUE.to_string().repeat(WING_PATCH_COUNT),
        }
    }
}

impl TryFrom<String> for Butterfly {
    type Error = GeneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_gene(&value)
    }
}

impl From<Butterfly> for String {
    fn from(value: Butterfly) -> Self {
        value.hues
    }
}
