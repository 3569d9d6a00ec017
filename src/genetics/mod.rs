//! Butterfly genetics
//!
//! A butterfly's wing pattern is a fixed-length sequence of hue
//! characters, one per wing patch. An [`Egg`] carries the parent genes
//! and blends them with the hues a caterpillar collected into the gene
//! of the next butterfly.

mod butterfly;
mod egg;

pub use butterfly::{Butterfly, GeneError, WING_PATCH_COUNT};
pub use egg::Egg;
