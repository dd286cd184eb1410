/// Tolerances used throughout the Boolean pipeline.
///
/// `point` is an absolute per-coordinate distance: two points closer than this on both axes are the same point.
/// `angle` is the resolution of the face tracer's turn comparisons, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Epsilons {
	pub point: f64,
	pub angle: f64,
}

impl Default for Epsilons {
	fn default() -> Self {
		EPS
	}
}

pub const EPS: Epsilons = Epsilons {
	point: 1e-6,
	angle: 1e-9,
};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_eps() {
		assert_eq!(Epsilons::default(), EPS);
		assert_eq!(Epsilons::default(), Epsilons { point: 1e-6, angle: 1e-9 });
	}
}
