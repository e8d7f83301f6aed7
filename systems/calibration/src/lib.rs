#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that searches for the scale at which a pattern reaches a target coverage.
//!
//! Coverage has no closed form once irises overlap each other and clip
//! against the rounded corners, so the calibrator bisects over the scale
//! using the deterministic estimator as its objective. The search is total:
//! degenerate inputs short-circuit to sentinel scales and an exhausted
//! iteration budget still yields the midpoint of the remaining bracket.

use iris_reveal_core::{CornerRadius, Iris, TuningError, FULL_COVERAGE_SCALE};
use iris_reveal_system_coverage::CoverageEstimator;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Bisection parameters for the scale calibrator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationTuning {
    /// Maximum number of bisection steps before settling on the bracket midpoint.
    pub max_iterations: u32,
    /// Coverage error below which an evaluated scale is accepted immediately.
    pub tolerance: f64,
    /// Upper end of the search bracket, returned outright for targets of one or more.
    pub full_coverage_scale: f64,
}

impl Default for CalibrationTuning {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            tolerance: 0.005,
            full_coverage_scale: FULL_COVERAGE_SCALE,
        }
    }
}

impl CalibrationTuning {
    /// Checks that the tuning describes a terminating, well-formed search.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_iterations == 0 {
            return Err(TuningError::ZeroIterations);
        }

        if !(self.tolerance >= 0.0) || !self.tolerance.is_finite() {
            return Err(TuningError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }

        if !(self.full_coverage_scale > 0.0) || !self.full_coverage_scale.is_finite() {
            return Err(TuningError::InvalidScaleCeiling {
                scale: self.full_coverage_scale,
            });
        }

        Ok(())
    }
}

/// Describes how a calibration arrived at its scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalibrationOutcome {
    /// The pattern was empty, so no scale can reveal anything.
    NoIrises,
    /// The target asked for no coverage at all.
    EmptyTarget,
    /// The target asked for full coverage, so the sentinel scale was returned.
    FullTarget,
    /// An evaluated scale landed within tolerance of the target.
    Converged,
    /// The iteration budget ran out; the scale is the final bracket midpoint.
    Exhausted,
}

/// Result of a single calibration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Scale to apply to every iris weight.
    pub scale: f64,
    /// Estimated coverage at `scale`.
    pub coverage: f64,
    /// Number of bisection steps evaluated.
    pub iterations: u32,
    /// How the search terminated.
    pub outcome: CalibrationOutcome,
}

impl Calibration {
    fn short_circuit(scale: f64, coverage: f64, outcome: CalibrationOutcome) -> Self {
        Self {
            scale,
            coverage,
            iterations: 0,
            outcome,
        }
    }
}

/// Scale calibrator that reuses a single coverage estimator across searches.
#[derive(Clone, Debug, Default)]
pub struct ScaleCalibrator {
    estimator: CoverageEstimator,
    tuning: CalibrationTuning,
}

impl ScaleCalibrator {
    /// Creates a calibrator with default estimator and bisection parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calibrator from a custom estimator and tuning surface.
    pub fn with_tuning(
        estimator: CoverageEstimator,
        tuning: CalibrationTuning,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self { estimator, tuning })
    }

    /// Finds the scale at which the pattern covers `target_coverage` of the rounded mask.
    ///
    /// Targets at or below zero (including NaN) yield a zero scale; targets at
    /// or above one yield the full coverage sentinel without searching.
    #[must_use]
    pub fn calibrate(
        &self,
        irises: &[Iris],
        target_coverage: f64,
        corner_radius: f64,
    ) -> Calibration {
        let corner_radius = CornerRadius::new(corner_radius);

        if irises.is_empty() {
            return Calibration::short_circuit(0.0, 0.0, CalibrationOutcome::NoIrises);
        }

        if !(target_coverage > 0.0) {
            return Calibration::short_circuit(0.0, 0.0, CalibrationOutcome::EmptyTarget);
        }

        if target_coverage >= 1.0 {
            let scale = self.tuning.full_coverage_scale;
            let coverage = self.coverage_at(irises, scale, corner_radius);
            return Calibration::short_circuit(scale, coverage, CalibrationOutcome::FullTarget);
        }

        let mut low = 0.0;
        let mut high = self.tuning.full_coverage_scale;

        for iteration in 1..=self.tuning.max_iterations {
            let mid = (low + high) / 2.0;
            let coverage = self.coverage_at(irises, mid, corner_radius);
            trace!(iteration, low, high, mid, coverage, "bisection step");

            if (coverage - target_coverage).abs() < self.tuning.tolerance {
                debug!(
                    scale = mid,
                    coverage,
                    target_coverage,
                    iteration,
                    "calibration converged"
                );
                return Calibration {
                    scale: mid,
                    coverage,
                    iterations: iteration,
                    outcome: CalibrationOutcome::Converged,
                };
            }

            if coverage < target_coverage {
                low = mid;
            } else {
                high = mid;
            }
        }

        let scale = (low + high) / 2.0;
        let coverage = self.coverage_at(irises, scale, corner_radius);
        debug!(
            scale,
            coverage,
            target_coverage,
            iterations = self.tuning.max_iterations,
            "calibration exhausted its iteration budget"
        );
        Calibration {
            scale,
            coverage,
            iterations: self.tuning.max_iterations,
            outcome: CalibrationOutcome::Exhausted,
        }
    }

    fn coverage_at(&self, irises: &[Iris], scale: f64, corner_radius: CornerRadius) -> f64 {
        self.estimator.sample(irises, scale, corner_radius).fraction()
    }
}

/// Finds the scale at which the pattern covers `target_coverage` of the rounded mask.
#[must_use]
pub fn calibrate_scale(irises: &[Iris], target_coverage: f64, corner_radius: f64) -> f64 {
    ScaleCalibrator::new()
        .calibrate(irises, target_coverage, corner_radius)
        .scale
}

#[cfg(test)]
mod tests {
    use super::{CalibrationOutcome, CalibrationTuning, ScaleCalibrator};
    use iris_reveal_core::{Iris, TuningError, DEFAULT_CORNER_RADIUS};
    use iris_reveal_system_coverage::CoverageEstimator;

    fn centered() -> Vec<Iris> {
        vec![Iris::new(0.5, 0.5, 1.0, 0.0)]
    }

    #[test]
    fn default_tuning_is_valid() {
        assert_eq!(CalibrationTuning::default().validate(), Ok(()));
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let no_steps = CalibrationTuning {
            max_iterations: 0,
            ..CalibrationTuning::default()
        };
        assert_eq!(no_steps.validate(), Err(TuningError::ZeroIterations));

        let negative = CalibrationTuning {
            tolerance: -0.1,
            ..CalibrationTuning::default()
        };
        assert_eq!(
            negative.validate(),
            Err(TuningError::InvalidTolerance { tolerance: -0.1 })
        );

        let flat = CalibrationTuning {
            full_coverage_scale: 0.0,
            ..CalibrationTuning::default()
        };
        assert!(ScaleCalibrator::with_tuning(CoverageEstimator::new(), flat).is_err());
    }

    #[test]
    fn short_circuits_report_zero_iterations() {
        let calibrator = ScaleCalibrator::new();

        let none = calibrator.calibrate(&[], 0.5, DEFAULT_CORNER_RADIUS);
        assert_eq!(none.outcome, CalibrationOutcome::NoIrises);
        assert_eq!(none.iterations, 0);

        let empty = calibrator.calibrate(&centered(), f64::NAN, DEFAULT_CORNER_RADIUS);
        assert_eq!(empty.outcome, CalibrationOutcome::EmptyTarget);
        assert_eq!(empty.scale, 0.0);

        let full = calibrator.calibrate(&centered(), 1.5, DEFAULT_CORNER_RADIUS);
        assert_eq!(full.outcome, CalibrationOutcome::FullTarget);
        assert_eq!(full.scale, 2.0);
        assert_eq!(full.iterations, 0);
        assert!(full.coverage > 0.95);
    }

    #[test]
    fn zero_tolerance_exhausts_budget() {
        let tuning = CalibrationTuning {
            tolerance: 0.0,
            ..CalibrationTuning::default()
        };
        let calibrator =
            ScaleCalibrator::with_tuning(CoverageEstimator::new(), tuning).expect("valid tuning");
        let result = calibrator.calibrate(&centered(), 0.5, DEFAULT_CORNER_RADIUS);
        assert_eq!(result.outcome, CalibrationOutcome::Exhausted);
        assert_eq!(result.iterations, 20);
        assert!((result.coverage - 0.5).abs() < 0.05, "{}", result.coverage);
    }
}
