use crate::aabb::Aabb;
use crate::point::{Point, anticlockwise_angle, cmp_points, points_equal};
use glam::DVec2;
use std::cmp::Ordering;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
	Anticlockwise,
	Clockwise,
}

impl Orientation {
	pub fn reverse(self) -> Self {
		match self {
			Orientation::Anticlockwise => Orientation::Clockwise,
			Orientation::Clockwise => Orientation::Anticlockwise,
		}
	}

	/// `1` for anticlockwise, `-1` for clockwise.
	pub fn sign(self) -> f64 {
		match self {
			Orientation::Anticlockwise => 1.,
			Orientation::Clockwise => -1.,
		}
	}
}

/// A directed boundary primitive.
///
/// A circular arc whose start and end coincide exactly is a full circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeElement {
	LineSegment { start: Point, end: Point },
	CircularArc { start: Point, end: Point, center: Point, orientation: Orientation },
}

impl ShapeElement {
	pub fn line(start: Point, end: Point) -> Self {
		ShapeElement::LineSegment { start, end }
	}

	pub fn arc(start: Point, end: Point, center: Point, orientation: Orientation) -> Self {
		ShapeElement::CircularArc { start, end, center, orientation }
	}

	#[inline]
	pub fn start(&self) -> Point {
		match *self {
			ShapeElement::LineSegment { start, .. } | ShapeElement::CircularArc { start, .. } => start,
		}
	}

	#[inline]
	pub fn end(&self) -> Point {
		match *self {
			ShapeElement::LineSegment { end, .. } | ShapeElement::CircularArc { end, .. } => end,
		}
	}

	pub fn center(&self) -> Option<Point> {
		match *self {
			ShapeElement::LineSegment { .. } => None,
			ShapeElement::CircularArc { center, .. } => Some(center),
		}
	}

	pub fn reverse(&self) -> Self {
		match *self {
			ShapeElement::LineSegment { start, end } => ShapeElement::LineSegment { start: end, end: start },
			ShapeElement::CircularArc { start, end, center, orientation } => ShapeElement::CircularArc {
				start: end,
				end: start,
				center,
				orientation: orientation.reverse(),
			},
		}
	}

	pub fn is_full_circle(&self) -> bool {
		matches!(*self, ShapeElement::CircularArc { start, end, .. } if start == end)
	}

	pub fn radius(&self) -> f64 {
		match *self {
			ShapeElement::LineSegment { .. } => f64::INFINITY,
			ShapeElement::CircularArc { start, center, .. } => (start - center).length(),
		}
	}

	/// Angle swept from the start of the arc to `point`, measured along the arc's orientation, in `[0, 2π)`.
	/// `point` is assumed to lie on the supporting circle. Zero for line segments.
	fn angle_from_start(&self, point: Point) -> f64 {
		match *self {
			ShapeElement::LineSegment { .. } => 0.,
			ShapeElement::CircularArc { start, center, orientation, .. } => match orientation {
				Orientation::Anticlockwise => anticlockwise_angle(start - center, point - center),
				Orientation::Clockwise => anticlockwise_angle(point - center, start - center),
			},
		}
	}

	/// Signed swept angle: positive for anticlockwise arcs, negative for clockwise ones, `±2π` for full circles.
	pub fn sweep(&self) -> f64 {
		match *self {
			ShapeElement::LineSegment { .. } => 0.,
			ShapeElement::CircularArc { end, orientation, .. } => {
				let angle = if self.is_full_circle() { TAU } else { self.angle_from_start(end) };
				orientation.sign() * angle
			}
		}
	}

	pub fn length(&self) -> f64 {
		match *self {
			ShapeElement::LineSegment { start, end } => (end - start).length(),
			ShapeElement::CircularArc { .. } => self.radius() * self.sweep().abs(),
		}
	}

	/// Distance travelled along the element from its start to the projection of `point`.
	pub fn param_of(&self, point: Point) -> f64 {
		match *self {
			ShapeElement::LineSegment { start, end } => {
				let direction = end - start;
				let length = direction.length();
				if length == 0. { 0. } else { (point - start).dot(direction) / length }
			}
			ShapeElement::CircularArc { .. } => self.radius() * self.angle_from_start(point),
		}
	}

	pub fn middle(&self) -> Point {
		match *self {
			ShapeElement::LineSegment { start, end } => start.lerp(end, 0.5),
			ShapeElement::CircularArc { start, center, .. } => center + DVec2::from_angle(self.sweep() / 2.).rotate(start - center),
		}
	}

	/// Direction of travel when leaving the start point.
	pub fn start_direction(&self) -> DVec2 {
		self.direction_at(self.start())
	}

	/// Direction of travel when arriving at the end point.
	pub fn end_direction(&self) -> DVec2 {
		self.direction_at(self.end())
	}

	/// Direction of travel at `point`, which must lie on the element. Not normalized.
	pub fn direction_at(&self, point: Point) -> DVec2 {
		match *self {
			ShapeElement::LineSegment { start, end } => end - start,
			ShapeElement::CircularArc { center, orientation, .. } => orientation.sign() * (point - center).perp(),
		}
	}

	/// Signed curvature when leaving the start point; positive when bending left.
	pub fn start_curvature(&self) -> f64 {
		match *self {
			ShapeElement::LineSegment { .. } => 0.,
			ShapeElement::CircularArc { orientation, .. } => {
				let radius = self.radius();
				if radius == 0. { 0. } else { orientation.sign() / radius }
			}
		}
	}

	/// Whether `point`, assumed to lie on the supporting circle, falls within the arc's sweep.
	/// Endpoints are matched with tolerance. Always true for full circles and line segments.
	pub(crate) fn sweep_contains(&self, point: Point, eps: f64) -> bool {
		match *self {
			ShapeElement::LineSegment { .. } => true,
			ShapeElement::CircularArc { start, end, .. } => {
				if self.is_full_circle() || points_equal(point, start, eps) || points_equal(point, end, eps) {
					return true;
				}
				self.angle_from_start(point) <= self.angle_from_start(end)
			}
		}
	}

	pub fn contains_point(&self, point: Point, eps: f64) -> bool {
		match *self {
			ShapeElement::LineSegment { start, end } => {
				let direction = end - start;
				let length_squared = direction.length_squared();
				let closest = if length_squared == 0. {
					start
				} else {
					start + direction * ((point - start).dot(direction) / length_squared).clamp(0., 1.)
				};
				points_equal(closest, point, eps)
			}
			ShapeElement::CircularArc { center, .. } => ((point - center).length() - self.radius()).abs() <= eps && self.sweep_contains(point, eps),
		}
	}

	pub fn bounding_box(&self) -> Aabb {
		match *self {
			ShapeElement::LineSegment { start, end } => Aabb::from_points([start, end]),
			ShapeElement::CircularArc { start, end, center, .. } => {
				let radius = self.radius();
				let extremes = [DVec2::X, DVec2::Y, DVec2::NEG_X, DVec2::NEG_Y].map(|axis| center + axis * radius);
				let mut bounding_box = Aabb::from_points([start, end]);
				for extreme in extremes {
					if self.is_full_circle() || self.angle_from_start(extreme) <= self.angle_from_start(end) {
						bounding_box = bounding_box.extend(extreme);
					}
				}
				bounding_box
			}
		}
	}

	/// A zero-length line segment, or an arc whose endpoints nearly (but not exactly) coincide or whose radius vanishes.
	pub fn is_degenerate(&self, eps: f64) -> bool {
		match *self {
			ShapeElement::LineSegment { start, end } => points_equal(start, end, eps),
			ShapeElement::CircularArc { start, end, .. } => self.radius() <= eps || (start != end && points_equal(start, end, eps)),
		}
	}

	/// Cuts the element at `point`, which must lie on it.
	pub fn split(&self, point: Point) -> (ShapeElement, ShapeElement) {
		match *self {
			ShapeElement::LineSegment { start, end } => (ShapeElement::line(start, point), ShapeElement::line(point, end)),
			ShapeElement::CircularArc { start, end, center, orientation } => (ShapeElement::arc(start, point, center, orientation), ShapeElement::arc(point, end, center, orientation)),
		}
	}

	pub fn approx_eq(&self, other: &ShapeElement, eps: f64) -> bool {
		match (*self, *other) {
			(ShapeElement::LineSegment { start: start0, end: end0 }, ShapeElement::LineSegment { start: start1, end: end1 }) => points_equal(start0, start1, eps) && points_equal(end0, end1, eps),
			(
				ShapeElement::CircularArc {
					start: start0,
					end: end0,
					center: center0,
					orientation: orientation0,
				},
				ShapeElement::CircularArc {
					start: start1,
					end: end1,
					center: center1,
					orientation: orientation1,
				},
			) => orientation0 == orientation1 && points_equal(start0, start1, eps) && points_equal(end0, end1, eps) && points_equal(center0, center1, eps),
			_ => false,
		}
	}
}

/// Strict total order on the raw geometry of elements: kind, start, end, center, orientation.
pub fn cmp_elements(a: &ShapeElement, b: &ShapeElement) -> Ordering {
	match (*a, *b) {
		(ShapeElement::LineSegment { .. }, ShapeElement::CircularArc { .. }) => Ordering::Less,
		(ShapeElement::CircularArc { .. }, ShapeElement::LineSegment { .. }) => Ordering::Greater,
		(ShapeElement::LineSegment { start: start0, end: end0 }, ShapeElement::LineSegment { start: start1, end: end1 }) => cmp_points(start0, start1).then_with(|| cmp_points(end0, end1)),
		(
			ShapeElement::CircularArc {
				start: start0,
				end: end0,
				center: center0,
				orientation: orientation0,
			},
			ShapeElement::CircularArc {
				start: start1,
				end: end1,
				center: center1,
				orientation: orientation1,
			},
		) => cmp_points(start0, start1)
			.then_with(|| cmp_points(end0, end1))
			.then_with(|| cmp_points(center0, center1))
			.then_with(|| orientation0.cmp(&orientation1)),
	}
}
