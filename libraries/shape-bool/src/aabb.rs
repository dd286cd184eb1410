use glam::{BVec2, DVec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	min: DVec2,
	max: DVec2,
}

impl Default for Aabb {
	fn default() -> Self {
		Self {
			min: DVec2::INFINITY,
			max: DVec2::NEG_INFINITY,
		}
	}
}

impl Aabb {
	pub const fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
		Aabb {
			min: DVec2::new(left, bottom),
			max: DVec2::new(right, top),
		}
	}

	pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Self {
		points.into_iter().fold(Aabb::default(), |bounding_box, point| bounding_box.extend(point))
	}

	#[inline]
	pub fn min(&self) -> DVec2 {
		self.min
	}
	#[inline]
	pub fn max(&self) -> DVec2 {
		self.max
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y
	}

	#[inline]
	pub fn extend(&self, point: DVec2) -> Aabb {
		Aabb {
			min: self.min.min(point),
			max: self.max.max(point),
		}
	}

	#[inline]
	pub fn merge(&self, other: &Aabb) -> Aabb {
		Aabb {
			min: self.min.min(other.min),
			max: self.max.max(other.max),
		}
	}

	#[inline]
	pub fn expand(&self, padding: f64) -> Aabb {
		Aabb {
			min: self.min - DVec2::splat(padding),
			max: self.max + DVec2::splat(padding),
		}
	}

	#[inline]
	pub fn overlaps(&self, other: &Aabb) -> bool {
		(self.min.cmple(other.max) & other.min.cmple(self.max)) == BVec2::TRUE
	}

	#[inline]
	pub fn contains_point(&self, point: DVec2) -> bool {
		(self.min.cmple(point) & point.cmple(self.max)) == BVec2::TRUE
	}

	pub fn max_extent(&self) -> f64 {
		if self.is_empty() { 0. } else { (self.max - self.min).max_element() }
	}

	pub fn diagonal(&self) -> f64 {
		if self.is_empty() { 0. } else { (self.max - self.min).length() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overlap_includes_touching_boxes() {
		let a = Aabb::new(0., 0., 1., 1.);
		assert!(a.overlaps(&Aabb::new(1., 1., 2., 2.)));
		assert!(a.overlaps(&Aabb::new(0.25, 0.25, 0.5, 0.5)));
		assert!(!a.overlaps(&Aabb::new(1.5, 0., 2., 1.)));
	}

	#[test]
	fn empty_box_grows_from_points() {
		assert!(Aabb::default().is_empty());
		let bounding_box = Aabb::from_points([DVec2::new(2., -1.), DVec2::new(-3., 4.)]);
		assert_eq!(bounding_box, Aabb::new(-3., -1., 2., 4.));
		assert_eq!(bounding_box.max_extent(), 5.);
		assert!(bounding_box.contains_point(DVec2::ZERO));
	}
}
