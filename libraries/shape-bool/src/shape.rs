use crate::aabb::Aabb;
use crate::element::{Orientation, ShapeElement};
use crate::point::{Point, points_equal};
use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// A closed loop of elements, each ending where the next one starts.
pub type Shape = Vec<ShapeElement>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeWithHoles {
	pub shape: Shape,
	pub holes: Vec<Shape>,
}

impl ShapeWithHoles {
	pub fn new(shape: Shape, holes: Vec<Shape>) -> Self {
		ShapeWithHoles { shape, holes }
	}

	pub fn bounding_box(&self) -> Aabb {
		shape_bounding_box(&self.shape)
	}

	/// Inside the outer loop and outside every hole, by nonzero winding.
	/// Points on the boundary may be reported either way.
	pub fn contains_point(&self, point: Point) -> bool {
		winding_number(&self.shape, point) != 0 && self.holes.iter().all(|hole| winding_number(hole, point) == 0)
	}

	pub fn area(&self) -> f64 {
		signed_area(&self.shape).abs() - self.holes.iter().map(|hole| signed_area(hole).abs()).sum::<f64>()
	}
}

impl From<Shape> for ShapeWithHoles {
	fn from(shape: Shape) -> Self {
		ShapeWithHoles { shape, holes: Vec::new() }
	}
}

/// A corner of a shape under construction. If `arc` is set, the boundary leaves this vertex along a
/// circular arc with the given center and orientation instead of a straight line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeVertex {
	pub point: Point,
	pub arc: Option<(Point, Orientation)>,
}

impl ShapeVertex {
	pub fn line(point: Point) -> Self {
		ShapeVertex { point, arc: None }
	}

	pub fn arc(point: Point, center: Point, orientation: Orientation) -> Self {
		ShapeVertex { point, arc: Some((center, orientation)) }
	}
}

/// Closes the vertex list into a loop. A single arc vertex yields a full circle.
pub fn build_shape(vertices: &[ShapeVertex]) -> Shape {
	vertices
		.iter()
		.enumerate()
		.map(|(i, vertex)| {
			let next = vertices[(i + 1) % vertices.len()].point;
			match vertex.arc {
				Some((center, orientation)) => ShapeElement::arc(vertex.point, next, center, orientation),
				None => ShapeElement::line(vertex.point, next),
			}
		})
		.collect()
}

pub fn polygon(points: &[Point]) -> Shape {
	build_shape(&points.iter().copied().map(ShapeVertex::line).collect::<Vec<_>>())
}

/// Anticlockwise full circle starting at its rightmost point.
pub fn circle(center: Point, radius: f64) -> Shape {
	let start = center + DVec2::new(radius, 0.);
	vec![ShapeElement::arc(start, start, center, Orientation::Anticlockwise)]
}

pub fn shape_vertices(shape: &[ShapeElement]) -> Vec<Point> {
	shape.iter().map(ShapeElement::start).collect()
}

pub fn shape_is_closed(shape: &[ShapeElement], eps: f64) -> bool {
	!shape.is_empty() && shape.iter().zip(shape.iter().cycle().skip(1)).all(|(element, next)| points_equal(element.end(), next.start(), eps))
}

pub fn reverse_shape(shape: &[ShapeElement]) -> Shape {
	shape.iter().rev().map(ShapeElement::reverse).collect()
}

pub fn shape_bounding_box(shape: &[ShapeElement]) -> Aabb {
	shape.iter().fold(Aabb::default(), |bounding_box, element| bounding_box.merge(&element.bounding_box()))
}

/// Shoelace area with the circular segment of every arc added in, positive for anticlockwise loops.
pub fn signed_area(shape: &[ShapeElement]) -> f64 {
	shape
		.iter()
		.map(|element| {
			let chord = element.start().perp_dot(element.end()) / 2.;
			match element {
				ShapeElement::LineSegment { .. } => chord,
				ShapeElement::CircularArc { .. } => {
					let radius = element.radius();
					let sweep = element.sweep();
					chord + radius * radius / 2. * (sweep - sweep.sin())
				}
			}
		})
		.sum()
}

pub fn is_counter_clockwise(shape: &[ShapeElement]) -> bool {
	signed_area(shape) > 0.
}

/// Number of anticlockwise turns the loop makes around `point`.
pub fn winding_number(shape: &[ShapeElement], point: Point) -> i32 {
	let total: f64 = shape.iter().map(|element| winding_angle(element, point)).sum();
	(total / TAU).round() as i32
}

/// Angle subtended at `point` while travelling along the element.
///
/// For an arc this is the angle of its chord, plus a full turn when `point` lies in the circular segment
/// enclosed between the arc and the chord. A point on the chord itself sees a half turn in the arc's direction.
fn winding_angle(element: &ShapeElement, point: Point) -> f64 {
	let to_start = element.start() - point;
	let to_end = element.end() - point;
	let chord_angle = to_start.perp_dot(to_end).atan2(to_start.dot(to_end));

	match *element {
		ShapeElement::LineSegment { .. } => chord_angle,
		ShapeElement::CircularArc { start, end, center, orientation } => {
			if (point - center).length() >= element.radius() {
				return chord_angle;
			}
			let in_segment = if element.is_full_circle() {
				true
			} else {
				let chord = end - start;
				let side = chord.perp_dot(point - start);
				if side == 0. {
					return orientation.sign() * PI;
				}
				let arc_side = chord.perp_dot(element.middle() - start);
				side.signum() == arc_side.signum()
			};
			if in_segment { chord_angle + orientation.sign() * TAU } else { chord_angle }
		}
	}
}

fn same_full_circle(a: &ShapeElement, b: &ShapeElement, eps: f64) -> bool {
	match (*a, *b) {
		(ShapeElement::CircularArc { center: center0, orientation: orientation0, .. }, ShapeElement::CircularArc { center: center1, orientation: orientation1, .. }) => {
			a.is_full_circle() && b.is_full_circle() && orientation0 == orientation1 && points_equal(center0, center1, eps) && (a.radius() - b.radius()).abs() <= eps
		}
		_ => false,
	}
}

/// Tolerant equality of two loops up to the choice of starting element.
pub fn loops_equal(a: &[ShapeElement], b: &[ShapeElement], eps: f64) -> bool {
	if a.len() != b.len() {
		return false;
	}
	if a.is_empty() {
		return true;
	}
	(0..b.len()).any(|offset| a.iter().zip(b.iter().cycle().skip(offset)).all(|(x, y)| x.approx_eq(y, eps) || same_full_circle(x, y, eps)))
}

/// Tolerant equality of two shapes up to rotation of every loop and permutation of the holes.
pub fn equal(a: &ShapeWithHoles, b: &ShapeWithHoles, eps: f64) -> bool {
	if !loops_equal(&a.shape, &b.shape, eps) || a.holes.len() != b.holes.len() {
		return false;
	}
	let mut matched = vec![false; b.holes.len()];
	a.holes.iter().all(|hole| {
		let Some(index) = (0..b.holes.len()).find(|&i| !matched[i] && loops_equal(hole, &b.holes[i], eps)) else {
			return false;
		};
		matched[index] = true;
		true
	})
}
