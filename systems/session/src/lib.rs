#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that prepares everything the renderer needs for one reveal.

use iris_reveal_core::{Iris, EFFECTIVELY_FULL_COVERAGE};
use iris_reveal_system_calibration::{CalibrationOutcome, ScaleCalibrator};
use iris_reveal_system_pattern::PatternGenerator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pattern and calibrated scale handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealPlan {
    /// Irises in reveal order.
    pub irises: Vec<Iris>,
    /// Scale applied to every iris weight.
    pub scale: f64,
    /// Estimated coverage reached at `scale`.
    pub coverage: f64,
    /// How the calibration terminated.
    pub outcome: CalibrationOutcome,
}

impl RevealPlan {
    /// Effective radius of each iris, in pattern order.
    pub fn effective_radii(&self) -> impl Iterator<Item = f64> + '_ {
        self.irises
            .iter()
            .map(|iris| iris.effective_radius(self.scale))
    }

    /// Reports whether the plan reveals the whole mask for practical purposes.
    #[must_use]
    pub fn is_effectively_full(&self) -> bool {
        self.coverage >= EFFECTIVELY_FULL_COVERAGE
    }
}

/// Combines pattern generation with scale calibration.
#[derive(Clone, Debug, Default)]
pub struct RevealSession {
    generator: PatternGenerator,
    calibrator: ScaleCalibrator,
}

impl RevealSession {
    /// Creates a session with default generator and calibrator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from preconfigured systems.
    #[must_use]
    pub fn from_parts(generator: PatternGenerator, calibrator: ScaleCalibrator) -> Self {
        Self {
            generator,
            calibrator,
        }
    }

    /// Generates `n` irises and calibrates them to `target_coverage`.
    pub fn plan<R>(
        &self,
        n: usize,
        target_coverage: f64,
        corner_radius: f64,
        rng: &mut R,
    ) -> RevealPlan
    where
        R: Rng + ?Sized,
    {
        let irises = self.generator.generate(n, corner_radius, rng);
        let calibration = self
            .calibrator
            .calibrate(&irises, target_coverage, corner_radius);
        debug!(
            irises = irises.len(),
            scale = calibration.scale,
            coverage = calibration.coverage,
            outcome = ?calibration.outcome,
            "reveal planned"
        );

        RevealPlan {
            irises,
            scale: calibration.scale,
            coverage: calibration.coverage,
            outcome: calibration.outcome,
        }
    }
}

/// Plans a reveal using the thread-local random generator.
#[must_use]
pub fn plan_reveal(n: usize, target_coverage: f64, corner_radius: f64) -> RevealPlan {
    RevealSession::new().plan(n, target_coverage, corner_radius, &mut rand::thread_rng())
}
