use glam::DVec2;
use std::cmp::Ordering;
use std::f64::consts::TAU;

pub type Point = DVec2;

pub fn points_equal(a: Point, b: Point, eps: f64) -> bool {
	a.abs_diff_eq(b, eps)
}

/// Strict total order on raw coordinates, x first. Used wherever a sort must be deterministic.
pub fn cmp_points(a: Point, b: Point) -> Ordering {
	a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Anticlockwise angle needed to rotate `from` onto `to`, in `[0, 2π)`.
pub fn anticlockwise_angle(from: DVec2, to: DVec2) -> f64 {
	let angle = to.y.atan2(to.x) - from.y.atan2(from.x);
	if angle < 0. { angle + TAU } else { angle }
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::{FRAC_PI_2, PI};

	#[test]
	fn anticlockwise_angle_range() {
		assert!((anticlockwise_angle(DVec2::X, DVec2::Y) - FRAC_PI_2).abs() < 1e-12);
		assert!((anticlockwise_angle(DVec2::Y, DVec2::X) - 3. * FRAC_PI_2).abs() < 1e-12);
		assert!((anticlockwise_angle(DVec2::X, DVec2::NEG_X) - PI).abs() < 1e-12);
		assert_eq!(anticlockwise_angle(DVec2::X, DVec2::X), 0.);
	}

	#[test]
	fn lexicographic_order() {
		assert_eq!(cmp_points(DVec2::new(0., 5.), DVec2::new(1., 0.)), Ordering::Less);
		assert_eq!(cmp_points(DVec2::new(1., 1.), DVec2::new(1., 0.)), Ordering::Greater);
		assert_eq!(cmp_points(DVec2::new(1., 1.), DVec2::new(1., 1.)), Ordering::Equal);
	}
}
