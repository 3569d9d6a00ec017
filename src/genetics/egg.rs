//! Egg: a genetic payload not yet resolved into a butterfly
//!
//! Holds zero or more parent wing genes. [`Egg::make_butterfly`] blends
//! them with the hues a caterpillar collected during its run.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genetics::{Butterfly, WING_PATCH_COUNT};
use crate::hue::{self, NO_HUE};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Egg {
    parents: Vec<Butterfly>,
}

impl Egg {
    pub fn new(parents: Vec<Butterfly>) -> Self {
        Self { parents }
    }

    pub fn parents(&self) -> &[Butterfly] {
        &self.parents
    }

    /// Resolve the egg into a butterfly.
    ///
    /// `collected` is the codec string of hues the caterpillar ate,
    /// in collection order. The blend works in two stages:
    ///
    /// 1. The circular mean of all collected hues. The sin/cos
    ///    accumulators are seeded with one extra zero term; that shrinks
    ///    the resultant vector by `count/(count+1)` without turning it,
    ///    and leaves the empty case well-defined. A zero resultant
    ///    vector means "no hue".
    /// 2. Per-patch inheritance: each patch is forced to the mean hue
    ///    with probability `3/(2*WING_PATCH_COUNT)`; otherwise up to
    ///    three random parent draws are made, where a drawn sentinel has
    ///    a 50% chance of being replaced by the mean hue (ending the
    ///    draws) and any painted hue ends the draws immediately. The
    ///    last draw stands if all three fall through.
    ///
    /// With no parents the whole gene is the mean hue. Pure in its
    /// inputs apart from the supplied generator.
    pub fn make_butterfly(&self, collected: &str, rng: &mut impl Rng) -> Butterfly {
        let mut sins = vec![0.0f64];
        let mut coss = vec![0.0f64];
        for c in collected.chars() {
            if let Some(h) = hue::decode_hue(c) {
                let angle = h as f64 * TAU;
                sins.push(angle.sin());
                coss.push(angle.cos());
            }
        }
        let y = sins.iter().sum::<f64>() / sins.len() as f64;
        let x = coss.iter().sum::<f64>() / coss.len() as f64;
        let mean_hue = if y == 0.0 && x == 0.0 {
            NO_HUE
        } else {
            hue::encode_hue(Some((y.atan2(x) / TAU) as f32))
        };

        let parent_genes: Vec<Vec<char>> = self
            .parents
            .iter()
            .map(|p| p.gene().chars().collect())
            .collect();
        for gene in &parent_genes {
            assert_eq!(gene.len(), WING_PATCH_COUNT, "parent gene length mismatch");
        }

        let offspring: String = if parent_genes.is_empty() {
            std::iter::repeat(mean_hue).take(WING_PATCH_COUNT).collect()
        } else {
            let mut out = String::with_capacity(WING_PATCH_COUNT);
            for i in 0..WING_PATCH_COUNT {
                let chosen = if rng.random_range(0..WING_PATCH_COUNT * 2) < 3 {
                    mean_hue
                } else {
                    let mut chosen = NO_HUE;
                    for _ in 0..3 {
                        chosen = parent_genes[rng.random_range(0..parent_genes.len())][i];
                        if chosen == NO_HUE {
                            if rng.random_range(0..2) == 1 {
                                chosen = mean_hue;
                                break;
                            }
                        } else {
                            break;
                        }
                    }
                    chosen
                };
                out.push(chosen);
            }
            while out.chars().count() < WING_PATCH_COUNT {
                out.push(mean_hue);
            }
            out
        };

        assert_eq!(
            offspring.chars().count(),
            WING_PATCH_COUNT,
            "offspring gene length mismatch"
        );
        Butterfly::from_raw(offspring)
    }
}
