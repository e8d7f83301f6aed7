#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the iris reveal engine.
//!
//! This crate defines the value types that flow between the pure systems and
//! the external renderer. Every coordinate lives in the normalized unit square
//! `[0, 1] x [0, 1]`, masked by a rounded rectangle whose corner radius is
//! captured by [`CornerRadius`]. Reveal zones are described by [`Iris`]
//! records; a pattern is simply an ordered slice of them. The leaf geometry
//! predicates that every system builds on live in [`geometry`].

pub mod geometry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use geometry::{point_covered_by_irises, point_in_rounded_rect};

/// Largest corner radius accepted by the rounded-rectangle mask.
pub const MAX_CORNER_RADIUS: f64 = 0.5;

/// Corner radius of the standard reveal container (16 units of border radius on a 240 unit box).
///
/// Provided as a convenience for callers; no operation reads it implicitly.
pub const DEFAULT_CORNER_RADIUS: f64 = 0.0667;

/// Scale sentinel that guarantees full coverage of the mask.
pub const FULL_COVERAGE_SCALE: f64 = 2.0;

/// Coverage fraction at or above which a reveal is considered complete.
pub const EFFECTIVELY_FULL_COVERAGE: f64 = 0.95;

/// Horizontal coordinate of the fallback iris center.
pub const FALLBACK_CENTER_X: f64 = 0.5;

/// Vertical coordinate of the fallback iris center.
pub const FALLBACK_CENTER_Y: f64 = 0.5;

/// Circular reveal zone positioned inside the unit square.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Iris {
    center_x: f64,
    center_y: f64,
    weight: f64,
    delay: f64,
}

impl Iris {
    /// Creates a new iris from its normalized center, radius weight, and animation delay.
    #[must_use]
    pub const fn new(center_x: f64, center_y: f64, weight: f64, delay: f64) -> Self {
        Self {
            center_x,
            center_y,
            weight,
            delay,
        }
    }

    /// Creates the iris used when no spaced position could be found.
    #[must_use]
    pub const fn fallback(delay: f64) -> Self {
        Self::new(FALLBACK_CENTER_X, FALLBACK_CENTER_Y, 1.0, delay)
    }

    /// Normalized horizontal coordinate of the center.
    #[must_use]
    pub const fn center_x(&self) -> f64 {
        self.center_x
    }

    /// Normalized vertical coordinate of the center.
    #[must_use]
    pub const fn center_y(&self) -> f64 {
        self.center_y
    }

    /// Radius multiplier applied on top of the shared scale.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Opaque animation timing value owned by the renderer.
    #[must_use]
    pub const fn delay(&self) -> f64 {
        self.delay
    }

    /// Radius of the iris once the shared scale is applied.
    #[must_use]
    pub fn effective_radius(&self, scale: f64) -> f64 {
        scale * self.weight
    }

    /// Squared distance from the center to `(x, y)`.
    #[must_use]
    pub fn distance_squared_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy
    }

    /// Euclidean distance between the centers of two irises.
    #[must_use]
    pub fn distance_to(&self, other: &Iris) -> f64 {
        self.distance_squared_to(other.center_x, other.center_y).sqrt()
    }

    /// Reports whether the iris sits exactly on the fallback center.
    #[must_use]
    pub fn is_fallback_center(&self) -> bool {
        self.center_x == FALLBACK_CENTER_X && self.center_y == FALLBACK_CENTER_Y
    }
}

/// Corner radius of the rounded-rectangle mask, clamped to `[0, 0.5]`.
///
/// Construction never fails: values above the limit are clamped, negative
/// values become zero, and NaN is treated as a square mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct CornerRadius(f64);

impl CornerRadius {
    /// Square mask without any rounding.
    pub const SQUARE: Self = Self(0.0);

    /// Creates a corner radius, clamping the value into the supported domain.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::SQUARE;
        }
        Self(value.clamp(0.0, MAX_CORNER_RADIUS))
    }

    /// Retrieves the clamped radius.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }
}

impl From<f64> for CornerRadius {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<CornerRadius> for f64 {
    fn from(radius: CornerRadius) -> Self {
        radius.get()
    }
}

/// Reasons a tuning surface is rejected before it can be used.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum TuningError {
    /// The estimator was configured without any sample points.
    #[error("coverage estimation requires at least one sample point")]
    ZeroSamples,
    /// A Halton base below two never advances past zero.
    #[error("halton base {base} must be at least 2")]
    InvalidHaltonBase {
        /// Offending base.
        base: u32,
    },
    /// Both axes share a base, collapsing samples onto the diagonal.
    #[error("halton bases must differ between axes, both are {base}")]
    RepeatedHaltonBase {
        /// Base shared by both axes.
        base: u32,
    },
    /// The calibrator was configured without any bisection steps.
    #[error("calibration requires at least one bisection iteration")]
    ZeroIterations,
    /// Tolerance is negative or not a number.
    #[error("calibration tolerance {tolerance} must be a finite non-negative value")]
    InvalidTolerance {
        /// Offending tolerance.
        tolerance: f64,
    },
    /// Upper search bound is non-positive or not finite.
    #[error("full coverage scale {scale} must be finite and positive")]
    InvalidScaleCeiling {
        /// Offending scale.
        scale: f64,
    },
    /// Minimum spacing between iris centers is negative or not finite.
    #[error("minimum spacing {spacing} must be finite and non-negative")]
    InvalidSpacing {
        /// Offending spacing.
        spacing: f64,
    },
    /// Edge padding added to the corner radius is negative or not finite.
    #[error("edge padding {padding} must be finite and non-negative")]
    InvalidPadding {
        /// Offending padding.
        padding: f64,
    },
    /// Weight bounds are inverted, negative, or not finite.
    #[error("weight range [{min}, {max}] must be finite, non-negative, and ordered")]
    InvalidWeightRange {
        /// Lower weight bound.
        min: f64,
        /// Upper weight bound.
        max: f64,
    },
    /// Delay step or jitter is negative or not finite.
    #[error("delay step {step} and jitter {jitter} must be finite and non-negative")]
    InvalidDelay {
        /// Delay added per pattern index.
        step: f64,
        /// Upper bound of the random delay jitter.
        jitter: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::{CornerRadius, Iris, TuningError, MAX_CORNER_RADIUS};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn iris_round_trips_through_bincode() {
        assert_round_trip(&Iris::new(0.25, 0.75, 1.1, 0.3));
    }

    #[test]
    fn corner_radius_is_clamped_on_deserialize() {
        let bytes = bincode::serialize(&0.9_f64).expect("serialize");
        let restored: CornerRadius = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored.get(), MAX_CORNER_RADIUS);
    }

    #[test]
    fn corner_radius_clamps_out_of_range_values() {
        assert_eq!(CornerRadius::new(-0.2).get(), 0.0);
        assert_eq!(CornerRadius::new(0.7).get(), MAX_CORNER_RADIUS);
        assert_eq!(CornerRadius::new(f64::NAN), CornerRadius::SQUARE);
        assert_eq!(CornerRadius::new(0.125).get(), 0.125);
    }

    #[test]
    fn fallback_iris_sits_on_center() {
        let iris = Iris::fallback(0.45);
        assert!(iris.is_fallback_center());
        assert_eq!(iris.weight(), 1.0);
        assert_eq!(iris.delay(), 0.45);
        assert!(!Iris::new(0.5, 0.49, 1.0, 0.0).is_fallback_center());
    }

    #[test]
    fn effective_radius_scales_weight() {
        let iris = Iris::new(0.5, 0.5, 1.2, 0.0);
        assert!((iris.effective_radius(0.5) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Iris::new(0.2, 0.2, 1.0, 0.0);
        let b = Iris::new(0.5, 0.6, 1.0, 0.0);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn squared_distance_matches_distance() {
        let iris = Iris::new(0.2, 0.2, 1.0, 0.0);
        assert!((iris.distance_squared_to(0.5, 0.6) - 0.25).abs() < 1e-12);
        assert_eq!(iris.distance_squared_to(0.2, 0.2), 0.0);
    }

    #[test]
    fn tuning_errors_render_offending_values() {
        let error = TuningError::InvalidHaltonBase { base: 1 };
        assert_eq!(error.to_string(), "halton base 1 must be at least 2");
    }
}
