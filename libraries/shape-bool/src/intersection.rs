use crate::element::ShapeElement;
use crate::epsilons::Epsilons;
use crate::point::{Point, cmp_points, points_equal};
use glam::DVec2;

const COLLINEAR_EPS: f64 = f64::EPSILON * 64.;

/// Everything two elements have in common.
///
/// Improper intersections coincide with an endpoint of one of the elements; proper ones are interior to both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementIntersections {
	pub overlapping_parts: Vec<ShapeElement>,
	pub improper_intersections: Vec<Point>,
	pub proper_intersections: Vec<Point>,
}

impl ElementIntersections {
	pub fn is_empty(&self) -> bool {
		self.overlapping_parts.is_empty() && self.improper_intersections.is_empty() && self.proper_intersections.is_empty()
	}

	/// Every point where the elements must be cut: overlap endpoints first, then improper and proper intersections.
	pub fn points(&self) -> Vec<Point> {
		let mut points = Vec::with_capacity(2 * self.overlapping_parts.len() + self.improper_intersections.len() + self.proper_intersections.len());
		for part in &self.overlapping_parts {
			points.push(part.start());
			points.push(part.end());
		}
		points.extend_from_slice(&self.improper_intersections);
		points.extend_from_slice(&self.proper_intersections);
		points
	}

	fn push(&mut self, point: Point, element0: &ShapeElement, element1: &ShapeElement, eps: f64) {
		let endpoints = [element0.start(), element0.end(), element1.start(), element1.end()];
		let (point, improper) = match endpoints.into_iter().find(|&endpoint| points_equal(endpoint, point, eps)) {
			Some(endpoint) => (endpoint, true),
			None => (point, false),
		};
		if self.improper_intersections.iter().chain(&self.proper_intersections).any(|&existing| points_equal(existing, point, eps)) {
			return;
		}
		if improper {
			self.improper_intersections.push(point);
		} else {
			self.proper_intersections.push(point);
		}
	}
}

/// Parameters `(s, t)` of the crossing of two non-parallel line segments, if both lie in `[-eps, 1 + eps]`.
pub fn line_segment_intersection([p1, p2]: [Point; 2], [p3, p4]: [Point; 2], eps: f64) -> Option<(f64, f64)> {
	// https://en.wikipedia.org/wiki/Intersection_(geometry)#Two_line_segments

	let a = p2 - p1;
	let b = p3 - p4;
	let c = p3 - p1;

	let denom = a.x * b.y - a.y * b.x;

	if denom.abs() < COLLINEAR_EPS * a.length() * b.length() {
		return None;
	}

	let s = (c.x * b.y - c.y * b.x) / denom;
	let t = (a.x * c.y - a.y * c.x) / denom;

	if (-eps..=1. + eps).contains(&s) && (-eps..=1. + eps).contains(&t) { Some((s, t)) } else { None }
}

pub fn compute_intersections(element0: &ShapeElement, element1: &ShapeElement, eps: &Epsilons) -> ElementIntersections {
	let mut output = ElementIntersections::default();
	if element0.is_degenerate(eps.point) || element1.is_degenerate(eps.point) {
		return output;
	}
	if !element0.bounding_box().expand(eps.point).overlaps(&element1.bounding_box()) {
		return output;
	}

	match (*element0, *element1) {
		(ShapeElement::LineSegment { start: start0, end: end0 }, ShapeElement::LineSegment { start: start1, end: end1 }) => {
			let direction = end0 - start0;
			let length = direction.length();
			let distance_to_line = |point: Point| direction.perp_dot(point - start0).abs() / length;

			if distance_to_line(start1) <= eps.point && distance_to_line(end1) <= eps.point {
				collinear_intersections(element0, element1, eps, &mut output);
			} else {
				let slack = eps.point / length.min((end1 - start1).length());
				if let Some((s, _)) = line_segment_intersection([start0, end0], [start1, end1], slack) {
					let point = start0.lerp(end0, s.clamp(0., 1.));
					if element1.contains_point(point, eps.point) {
						output.push(point, element0, element1, eps.point);
					}
				}
			}
		}
		(ShapeElement::LineSegment { start, end }, ShapeElement::CircularArc { .. }) => {
			for point in line_circle_points(start, end, element1, eps) {
				output.push(point, element0, element1, eps.point);
			}
		}
		(ShapeElement::CircularArc { .. }, ShapeElement::LineSegment { start, end }) => {
			for point in line_circle_points(start, end, element0, eps) {
				output.push(point, element0, element1, eps.point);
			}
		}
		(ShapeElement::CircularArc { center: center0, .. }, ShapeElement::CircularArc { center: center1, .. }) => {
			let (radius0, radius1) = (element0.radius(), element1.radius());
			if points_equal(center0, center1, eps.point) && (radius0 - radius1).abs() <= eps.point {
				collinear_intersections(element0, element1, eps, &mut output);
			} else {
				for point in circle_circle_points(center0, radius0, center1, radius1, eps.point) {
					if element0.sweep_contains(point, eps.point) && element1.sweep_contains(point, eps.point) {
						output.push(point, element0, element1, eps.point);
					}
				}
			}
		}
	}

	output
}

/// Elements lying on the same line or circle: shared endpoints are the cut points, and the pieces of
/// `element0` between consecutive cut points that also lie on `element1` are the overlapping parts.
fn collinear_intersections(element0: &ShapeElement, element1: &ShapeElement, eps: &Epsilons, output: &mut ElementIntersections) {
	let mut cuts: Vec<Point> = [element1.start(), element1.end(), element0.start(), element0.end()]
		.into_iter()
		.filter(|&point| element0.contains_point(point, eps.point) && element1.contains_point(point, eps.point))
		.collect();
	cuts.sort_by(|&a, &b| element0.param_of(a).total_cmp(&element0.param_of(b)).then_with(|| cmp_points(a, b)));
	cuts.dedup_by(|a, b| points_equal(*a, *b, eps.point));

	let mut remaining = *element0;
	for &cut in &cuts {
		if points_equal(cut, remaining.start(), eps.point) || points_equal(cut, remaining.end(), eps.point) {
			continue;
		}
		let (piece, rest) = remaining.split(cut);
		push_overlap(piece, element1, eps, output);
		remaining = rest;
	}
	push_overlap(remaining, element1, eps, output);

	if output.overlapping_parts.is_empty() {
		for cut in cuts {
			output.push(cut, element0, element1, eps.point);
		}
	}
}

fn push_overlap(piece: ShapeElement, other: &ShapeElement, eps: &Epsilons, output: &mut ElementIntersections) {
	if !piece.is_degenerate(eps.point) && other.contains_point(piece.middle(), eps.point) {
		output.overlapping_parts.push(piece);
	}
}

fn line_circle_points(start: Point, end: Point, arc: &ShapeElement, eps: &Epsilons) -> Vec<Point> {
	let Some(center) = arc.center() else { return Vec::new() };
	let radius = arc.radius();
	let direction = end - start;
	let length_squared = direction.length_squared();
	let length = length_squared.sqrt();

	let foot = start + direction * ((center - start).dot(direction) / length_squared);
	let distance = (center - foot).length();
	if distance > radius + eps.point {
		return Vec::new();
	}

	let candidates = if (distance - radius).abs() <= eps.point {
		vec![foot]
	} else {
		let offset = direction / length * (radius * radius - distance * distance).sqrt();
		vec![foot - offset, foot + offset]
	};

	let slack = eps.point / length;
	candidates
		.into_iter()
		.filter(|&point| {
			let t = (point - start).dot(direction) / length_squared;
			(-slack..=1. + slack).contains(&t) && arc.sweep_contains(point, eps.point)
		})
		.map(|point| {
			let t = (point - start).dot(direction) / length_squared;
			if t < 0. || t > 1. { start.lerp(end, t.clamp(0., 1.)) } else { point }
		})
		.collect()
}

fn circle_circle_points(center0: Point, radius0: f64, center1: Point, radius1: f64, eps: f64) -> Vec<Point> {
	let delta = center1 - center0;
	let distance = delta.length();
	if distance == 0. || distance > radius0 + radius1 + eps || distance < (radius0 - radius1).abs() - eps {
		return Vec::new();
	}

	let unit = delta / distance;
	let along = (distance * distance + radius0 * radius0 - radius1 * radius1) / (2. * distance);
	let middle = center0 + unit * along;
	let height_squared = radius0 * radius0 - along * along;

	let tangent = (distance - (radius0 + radius1)).abs() <= eps || (distance - (radius0 - radius1).abs()).abs() <= eps;
	if tangent || height_squared <= 0. {
		return vec![middle];
	}

	let offset: DVec2 = unit.perp() * height_squared.sqrt();
	vec![middle - offset, middle + offset]
}
