#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic estimator for the fraction of the rounded mask covered by a pattern.
//!
//! Samples come from a fixed Halton point set instead of a pseudo-random
//! generator, so identical inputs always yield bit-identical estimates. The
//! calibration system relies on that to make its bisection reproducible.

mod halton;

use iris_reveal_core::{point_covered_by_irises, CornerRadius, Iris, TuningError};
use serde::{Deserialize, Serialize};

/// Sampling parameters for the coverage estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageTuning {
    /// Number of Halton points evaluated per estimate; more points lower the noise floor.
    pub sample_count: usize,
    /// Halton base driving the horizontal coordinate.
    pub x_base: u32,
    /// Halton base driving the vertical coordinate; must differ from `x_base`.
    pub y_base: u32,
}

impl Default for CoverageTuning {
    fn default() -> Self {
        Self {
            sample_count: 2_000,
            x_base: 2,
            y_base: 3,
        }
    }
}

impl CoverageTuning {
    /// Checks that the tuning yields a usable point set.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.sample_count == 0 {
            return Err(TuningError::ZeroSamples);
        }

        for base in [self.x_base, self.y_base] {
            if base < 2 {
                return Err(TuningError::InvalidHaltonBase { base });
            }
        }

        if self.x_base == self.y_base {
            return Err(TuningError::RepeatedHaltonBase { base: self.x_base });
        }

        Ok(())
    }
}

/// Raw sample counts gathered for a single estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSample {
    /// Samples that landed inside the rounded mask.
    pub valid_points: usize,
    /// Mask samples that were also covered by the pattern.
    pub covered_points: usize,
}

impl CoverageSample {
    /// Covered share of the mask samples, or zero when no sample hit the mask.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.valid_points == 0 {
            return 0.0;
        }
        self.covered_points as f64 / self.valid_points as f64
    }
}

/// Coverage estimator that owns its pre-generated Halton point set.
#[derive(Clone, Debug)]
pub struct CoverageEstimator {
    points: Vec<(f64, f64)>,
}

impl Default for CoverageEstimator {
    fn default() -> Self {
        Self::build(CoverageTuning::default())
    }
}

impl CoverageEstimator {
    /// Creates an estimator with the default sampling parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an estimator from a custom tuning surface.
    pub fn with_tuning(tuning: CoverageTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning))
    }

    fn build(tuning: CoverageTuning) -> Self {
        let points = halton::halton_points(tuning.sample_count, tuning.x_base, tuning.y_base);
        Self { points }
    }

    /// Estimates the covered fraction of the rounded mask, in `[0, 1]`.
    #[must_use]
    pub fn estimate(&self, irises: &[Iris], scale: f64, corner_radius: f64) -> f64 {
        self.sample(irises, scale, CornerRadius::new(corner_radius))
            .fraction()
    }

    /// Counts mask samples and covered samples for the pattern at the given scale.
    ///
    /// Samples outside the rounded mask never contribute to either count.
    #[must_use]
    pub fn sample(
        &self,
        irises: &[Iris],
        scale: f64,
        corner_radius: CornerRadius,
    ) -> CoverageSample {
        let mut sample = CoverageSample::default();
        let may_cover = !irises.is_empty() && scale > 0.0;

        for &(x, y) in &self.points {
            if !corner_radius.contains(x, y) {
                continue;
            }

            sample.valid_points += 1;
            if may_cover && point_covered_by_irises(x, y, irises, scale) {
                sample.covered_points += 1;
            }
        }

        sample
    }
}

/// Estimates the covered fraction of the rounded mask using the default sampling parameters.
#[must_use]
pub fn coverage(irises: &[Iris], scale: f64, corner_radius: f64) -> f64 {
    CoverageEstimator::new().estimate(irises, scale, corner_radius)
}
