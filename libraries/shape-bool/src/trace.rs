use crate::bit_vec::BitVec;
use crate::element::{ShapeElement, cmp_elements};
use crate::epsilons::Epsilons;
use crate::error::BooleanError;
use crate::graph::PlanarGraph;
use crate::point::{Point, anticlockwise_angle, cmp_points, points_equal};
use crate::shape::Shape;
use crate::split::SplittedElement;
use glam::DVec2;
use std::f64::consts::TAU;

/// A closed walk through the split elements. Bounded faces run anticlockwise, with the face on their left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
	pub elements: Vec<usize>,
	/// Bit `s` is set when an element of shape `s` lies on the face in its original direction.
	pub flags: BitVec,
}

impl Face {
	pub fn shape(&self, elements: &[SplittedElement]) -> Shape {
		self.elements.iter().map(|&id| elements[id].element).collect()
	}
}

/// Walks the faces of one component's planar graph by always taking the sharpest left turn.
pub struct FaceTracer<'a> {
	elements: &'a [SplittedElement],
	graph: &'a PlanarGraph,
	reverses: Vec<Option<usize>>,
	component: usize,
	eps: &'a Epsilons,
}

impl<'a> FaceTracer<'a> {
	/// `elements` must be sorted and deduplicated as returned by [`crate::split::dedup_elements`].
	pub fn new(elements: &'a [SplittedElement], graph: &'a PlanarGraph, component: usize, eps: &'a Epsilons) -> Self {
		let reverses = elements
			.iter()
			.map(|element| {
				let reverse = element.element.reverse();
				elements.binary_search_by(|other| cmp_elements(&other.element, &reverse)).ok()
			})
			.collect();
		FaceTracer {
			elements,
			graph,
			reverses,
			component,
			eps,
		}
	}

	fn degenerate(&self, element: usize, steps: usize) -> BooleanError {
		log::warn!("Face trace from split element {element} of component {} failed after {steps} steps", self.component);
		BooleanError::DegenerateArrangement {
			component: self.component,
			element,
			steps,
		}
	}

	/// The element following `current` on the face to its left, or `None` at a node without successors.
	///
	/// Candidates are ranked by the anticlockwise angle from their start tangent to the reversed end tangent of
	/// `current`. Near-equal angles prefer the candidate bending further left. At a cusp a candidate bending further
	/// left than the way back along `current` lies outside the face and is ranked last. Remaining ties go to the lowest id. The reverse of `current` is only taken at a dead end.
	pub fn next_element(&self, current: usize) -> Option<usize> {
		let successors = self.graph.successors_of_end(current);
		let incoming = -self.elements[current].element.end_direction();
		let incoming_curvature = self.elements[current].element.reverse().start_curvature();
		let own_reverse = self.reverses[current];

		let mut best: Option<(f64, f64, usize)> = None;
		for &candidate in successors {
			if Some(candidate) == own_reverse {
				continue;
			}
			let element = &self.elements[candidate].element;
			let curvature = element.start_curvature();
			let mut angle = anticlockwise_angle(element.start_direction(), incoming);
			if angle >= TAU - self.eps.angle {
				angle = 0.;
			}
			if angle <= self.eps.angle && curvature > incoming_curvature {
				angle = TAU;
			}

			let better = match best {
				None => true,
				Some((best_angle, _, _)) if (angle - best_angle).abs() > self.eps.angle => angle < best_angle,
				Some((_, best_curvature, _)) => curvature > best_curvature,
			};
			if better {
				best = Some((angle, curvature, candidate));
			}
		}

		best.map(|(_, _, candidate)| candidate).or_else(|| own_reverse.filter(|reverse| successors.contains(reverse)))
	}

	/// Follows `next_element` from `start`, marking elements visited, until it reaches a visited element.
	/// That element must be `start`.
	fn trace_cycle(&self, start: usize, visited: &mut BitVec) -> Result<Vec<usize>, BooleanError> {
		let cap = 2 * self.elements.len();
		let mut cycle = vec![start];
		visited.set(start);
		let mut current = start;

		loop {
			let next = self.next_element(current).ok_or_else(|| self.degenerate(start, cycle.len()))?;
			if visited.get(next) {
				if next != start {
					return Err(self.degenerate(start, cycle.len()));
				}
				return Ok(cycle);
			}
			if cycle.len() >= cap {
				return Err(self.degenerate(start, cycle.len()));
			}
			visited.set(next);
			cycle.push(next);
			current = next;
		}
	}

	/// The element on the boundary of the unbounded face at the leftmost point of the arrangement, running with the
	/// unbounded face on its left.
	pub fn outline_start(&self) -> Option<usize> {
		let eps = self.eps.point;
		let leftmost: Vec<Point> = self.elements.iter().map(|element| leftmost_point(&element.element, eps)).collect();
		let extreme = leftmost.iter().copied().min_by(|&a, &b| cmp_points(a, b))?;

		let mut best: Option<(f64, f64, usize)> = None;
		for (id, element) in self.elements.iter().enumerate() {
			let element = &element.element;
			if !points_equal(leftmost[id], extreme, eps) {
				continue;
			}
			let direction = if points_equal(element.start(), extreme, eps) {
				element.start_direction()
			} else if element.center().is_some() && !points_equal(element.end(), extreme, eps) {
				element.direction_at(leftmost[id])
			} else {
				continue;
			};
			let angle = direction.y.atan2(direction.x);
			let curvature = element.start_curvature();

			let better = match best {
				None => true,
				Some((best_angle, _, _)) if (angle - best_angle).abs() > self.eps.angle => angle > best_angle,
				Some((_, best_curvature, _)) => curvature > best_curvature,
			};
			if better {
				best = Some((angle, curvature, id));
			}
		}
		best.map(|(_, _, id)| id)
	}

	/// The clockwise boundary of the unbounded face. Its elements are marked visited.
	pub fn trace_outline(&self, visited: &mut BitVec) -> Result<Option<Vec<usize>>, BooleanError> {
		let Some(start) = self.outline_start() else { return Ok(None) };
		let outline = self.trace_cycle(start, visited)?;
		log::trace!("Outline of component {} has {} elements", self.component, outline.len());
		Ok(Some(outline))
	}

	/// Every face through an element not yet visited, started from the lowest unvisited id.
	pub fn trace_faces(&self, visited: &mut BitVec, shape_count: usize) -> Result<Vec<Face>, BooleanError> {
		let mut faces = Vec::new();
		for start in 0..self.elements.len() {
			if visited.get(start) {
				continue;
			}
			let elements = self.trace_cycle(start, visited)?;
			let mut flags = BitVec::new(shape_count);
			for &id in &elements {
				let element = &self.elements[id];
				if element.original_direction && element.shape_id < shape_count {
					flags.set(element.shape_id);
				}
			}
			faces.push(Face { elements, flags });
		}
		log::trace!("Component {} has {} faces", self.component, faces.len());
		Ok(faces)
	}
}

/// Lexicographically smallest point of an element, arcs included.
fn leftmost_point(element: &ShapeElement, eps: f64) -> Point {
	let endpoint = if cmp_points(element.start(), element.end()).is_le() { element.start() } else { element.end() };
	if let Some(center) = element.center() {
		let extreme = center - DVec2::new(element.radius(), 0.);
		if extreme.x < endpoint.x && element.sweep_contains(extreme, eps) {
			return extreme;
		}
	}
	endpoint
}
