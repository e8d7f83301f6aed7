//! Leaf predicates over the normalized unit square.
//!
//! Both predicates are total: out-of-range or NaN inputs simply answer
//! `false` instead of panicking.

use crate::{CornerRadius, Iris};

/// Reports whether `(x, y)` lies inside the rounded rectangle with the given corner radius.
///
/// The radius is clamped to `[0, 0.5]` before use.
#[must_use]
pub fn point_in_rounded_rect(x: f64, y: f64, corner_radius: f64) -> bool {
    CornerRadius::new(corner_radius).contains(x, y)
}

/// Reports whether `(x, y)` is covered by at least one iris at the given scale.
///
/// An empty pattern or a scale that is not strictly positive never covers anything.
#[must_use]
pub fn point_covered_by_irises(x: f64, y: f64, irises: &[Iris], scale: f64) -> bool {
    if !(scale > 0.0) {
        return false;
    }

    irises.iter().any(|iris| iris.covers(x, y, scale))
}

impl CornerRadius {
    /// Reports whether `(x, y)` lies inside the rounded rectangle masked by this radius.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
            return false;
        }

        let radius = self.get();
        let far = 1.0 - radius;
        let in_vertical_band = x >= radius && x <= far;
        let in_horizontal_band = y >= radius && y <= far;
        if in_vertical_band || in_horizontal_band {
            return true;
        }

        let arc_x = if x < radius { radius } else { far };
        let arc_y = if y < radius { radius } else { far };
        let dx = x - arc_x;
        let dy = y - arc_y;
        dx * dx + dy * dy <= radius * radius
    }
}

impl Iris {
    /// Reports whether `(x, y)` falls within this iris at the given scale.
    #[must_use]
    pub fn covers(&self, x: f64, y: f64, scale: f64) -> bool {
        let radius = self.effective_radius(scale);
        self.distance_squared_to(x, y) <= radius * radius
    }
}

#[cfg(test)]
mod tests {
    use super::{point_covered_by_irises, point_in_rounded_rect};
    use crate::Iris;

    #[test]
    fn center_is_inside_for_every_radius() {
        for step in 0..=10 {
            let radius = f64::from(step) * 0.05;
            assert!(point_in_rounded_rect(0.5, 0.5, radius), "radius {radius}");
        }
    }

    #[test]
    fn points_outside_unit_square_are_rejected() {
        assert!(!point_in_rounded_rect(-0.01, 0.5, 0.0));
        assert!(!point_in_rounded_rect(0.5, 1.01, 0.0));
        assert!(!point_in_rounded_rect(f64::NAN, 0.5, 0.1));
        assert!(!point_in_rounded_rect(0.5, f64::INFINITY, 0.1));
    }

    #[test]
    fn true_corner_is_cut_by_rounding() {
        assert!(!point_in_rounded_rect(0.01, 0.01, 0.1));
        assert!(point_in_rounded_rect(0.08, 0.08, 0.1));
        assert!(!point_in_rounded_rect(0.99, 0.01, 0.1));
        assert!(!point_in_rounded_rect(0.01, 0.99, 0.1));
        assert!(!point_in_rounded_rect(0.99, 0.99, 0.1));
    }

    #[test]
    fn band_edges_are_inside() {
        assert!(point_in_rounded_rect(0.0, 0.5, 0.2));
        assert!(point_in_rounded_rect(0.5, 1.0, 0.2));
        assert!(point_in_rounded_rect(0.2, 0.0, 0.2));
    }

    #[test]
    fn square_mask_keeps_every_corner() {
        assert!(point_in_rounded_rect(0.0, 0.0, 0.0));
        assert!(point_in_rounded_rect(1.0, 1.0, 0.0));
    }

    #[test]
    fn oversized_radius_is_clamped_to_a_disk() {
        assert!(!point_in_rounded_rect(0.05, 0.05, 3.0));
        assert!(point_in_rounded_rect(0.5, 0.0, 3.0));
    }

    #[test]
    fn covered_when_any_iris_reaches_point() {
        let irises = [
            Iris::new(0.2, 0.2, 1.0, 0.0),
            Iris::new(0.8, 0.8, 1.0, 0.0),
        ];
        assert!(point_covered_by_irises(0.85, 0.8, &irises, 0.1));
        assert!(!point_covered_by_irises(0.5, 0.5, &irises, 0.1));
    }

    #[test]
    fn weight_stretches_radius() {
        let irises = [Iris::new(0.5, 0.5, 1.2, 0.0)];
        assert!(point_covered_by_irises(0.5, 0.615, &irises, 0.1));
        assert!(!point_covered_by_irises(0.5, 0.625, &irises, 0.1));
    }

    #[test]
    fn empty_pattern_and_non_positive_scale_cover_nothing() {
        let irises = [Iris::new(0.5, 0.5, 1.0, 0.0)];
        assert!(!point_covered_by_irises(0.5, 0.5, &[], 1.0));
        assert!(!point_covered_by_irises(0.5, 0.5, &irises, 0.0));
        assert!(!point_covered_by_irises(0.5, 0.5, &irises, -1.0));
        assert!(!point_covered_by_irises(0.5, 0.5, &irises, f64::NAN));
    }
}
