#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rejection-sampling generator that scatters iris centers across the rounded mask.
//!
//! This is the only system that consumes true randomness. The random source is
//! injected by the caller so tests and replays can seed it, while the default
//! entry point draws from the thread-local generator for visual variety
//! between sessions.

use iris_reveal_core::{CornerRadius, Iris, TuningError, MAX_CORNER_RADIUS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Placement knobs controlling spacing, weights, and reveal staggering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTuning {
    /// Minimum distance between accepted centers; raising it spreads irises apart.
    pub min_spacing: f64,
    /// Distance added to the corner radius to keep centers away from the mask edge.
    pub edge_padding: f64,
    /// Total candidate draws shared by every slot before falling back to the center.
    pub attempt_budget: u32,
    /// Lower bound of the uniformly drawn radius weight; must be non-negative.
    ///
    /// Only placed irises draw from this range. Fallback irises always carry a
    /// weight of exactly 1, even when the range excludes it.
    pub weight_min: f64,
    /// Upper bound of the uniformly drawn radius weight.
    pub weight_max: f64,
    /// Delay added per pattern index to stagger the reveal.
    pub delay_step: f64,
    /// Exclusive upper bound of the random delay jitter.
    pub delay_jitter: f64,
}

impl Default for PatternTuning {
    fn default() -> Self {
        Self {
            min_spacing: 0.3,
            edge_padding: 0.1,
            attempt_budget: 100,
            weight_min: 0.8,
            weight_max: 1.2,
            delay_step: 0.15,
            delay_jitter: 0.1,
        }
    }
}

impl PatternTuning {
    /// Checks that every range is finite, ordered, and non-negative.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !is_non_negative(self.min_spacing) {
            return Err(TuningError::InvalidSpacing {
                spacing: self.min_spacing,
            });
        }

        if !is_non_negative(self.edge_padding) {
            return Err(TuningError::InvalidPadding {
                padding: self.edge_padding,
            });
        }

        if !is_non_negative(self.weight_min)
            || !self.weight_max.is_finite()
            || self.weight_min > self.weight_max
        {
            return Err(TuningError::InvalidWeightRange {
                min: self.weight_min,
                max: self.weight_max,
            });
        }

        if !is_non_negative(self.delay_step) || !is_non_negative(self.delay_jitter) {
            return Err(TuningError::InvalidDelay {
                step: self.delay_step,
                jitter: self.delay_jitter,
            });
        }

        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Pattern generator that places irises by bounded rejection sampling.
#[derive(Clone, Debug, Default)]
pub struct PatternGenerator {
    tuning: PatternTuning,
}

impl PatternGenerator {
    /// Creates a generator with the default placement knobs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator from a custom tuning surface.
    pub fn with_tuning(tuning: PatternTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self { tuning })
    }

    /// Generates exactly `n` irises inside the rounded mask.
    ///
    /// Candidates are drawn uniformly from the square inset by the corner
    /// radius plus padding and kept only when they clear every accepted
    /// center by the minimum spacing. Slots left once the attempt budget is
    /// spent are filled with fallback irises at the mask center.
    ///
    /// When the corner radius plus padding exceeds half the square, the
    /// candidate window collapses onto the center point. The first iris
    /// accepted there still draws a random weight and jitter, yet sits on the
    /// fallback center; every later slot becomes a fallback.
    pub fn generate<R>(&self, n: usize, corner_radius: f64, rng: &mut R) -> Vec<Iris>
    where
        R: Rng + ?Sized,
    {
        let corner_radius = CornerRadius::new(corner_radius);
        let margin = corner_radius.get() + self.tuning.edge_padding;
        let (low, high) = if margin <= MAX_CORNER_RADIUS {
            (margin, 1.0 - margin)
        } else {
            (MAX_CORNER_RADIUS, MAX_CORNER_RADIUS)
        };
        let span = high - low;

        let mut irises = Vec::with_capacity(n);
        let mut attempts = 0;

        while irises.len() < n && attempts < self.tuning.attempt_budget {
            attempts += 1;

            let x = low + rng.gen::<f64>() * span;
            let y = low + rng.gen::<f64>() * span;
            if !corner_radius.contains(x, y) || !self.is_spaced(x, y, &irises) {
                continue;
            }

            let index = irises.len();
            let weight = rng.gen_range(self.tuning.weight_min..=self.tuning.weight_max);
            let jitter = if self.tuning.delay_jitter > 0.0 {
                rng.gen_range(0.0..self.tuning.delay_jitter)
            } else {
                0.0
            };
            let delay = index as f64 * self.tuning.delay_step + jitter;
            irises.push(Iris::new(x, y, weight, delay));
        }

        let placed = irises.len();
        if placed < n {
            debug!(
                requested = n,
                placed,
                attempts,
                "placement budget exhausted, filling with fallback irises"
            );
        }

        irises.extend(
            (placed..n).map(|index| Iris::fallback(index as f64 * self.tuning.delay_step)),
        );
        irises
    }

    fn is_spaced(&self, x: f64, y: f64, placed: &[Iris]) -> bool {
        let min_sq = self.tuning.min_spacing * self.tuning.min_spacing;
        placed
            .iter()
            .all(|iris| iris.distance_squared_to(x, y) >= min_sq)
    }
}

/// Generates exactly `n` irises using the thread-local random generator.
#[must_use]
pub fn generate_pattern(n: usize, corner_radius: f64) -> Vec<Iris> {
    PatternGenerator::new().generate(n, corner_radius, &mut rand::thread_rng())
}

/// Generates exactly `n` irises from a ChaCha stream seeded with `seed`.
///
/// Identical seeds always reproduce the same pattern.
#[must_use]
pub fn generate_pattern_seeded(n: usize, corner_radius: f64, seed: u64) -> Vec<Iris> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    PatternGenerator::new().generate(n, corner_radius, &mut rng)
}
