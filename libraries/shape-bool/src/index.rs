use crate::aabb::Aabb;
use crate::bit_vec::BitVec;
use crate::element::ShapeElement;
use crate::epsilons::Epsilons;
use crate::intersection::{ElementIntersections, compute_intersections};
use crate::point::Point;
use crate::shape::ShapeWithHoles;
use glam::{DVec2, IVec2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Uniform spatial hash over bounding boxes.
pub(crate) struct Grid {
	cell_factor: f64,
	cells: FxHashMap<IVec2, SmallVec<[usize; 6]>>,
}

impl Grid {
	pub(crate) fn new(cell_size: f64, entries: usize) -> Self {
		Grid {
			cell_factor: cell_size.recip(),
			cells: FxHashMap::with_capacity_and_hasher(entries, Default::default()),
		}
	}

	pub(crate) fn insert(&mut self, bounding_box: &Aabb, index: usize) {
		let min_cell = self.point_to_cell(bounding_box.min());
		let max_cell = self.point_to_cell(bounding_box.max());

		for i in min_cell.x..=max_cell.x {
			for j in min_cell.y..=max_cell.y {
				self.cells.entry((i, j).into()).or_default().push(index);
			}
		}
	}

	pub(crate) fn query(&self, bounding_box: &Aabb, result: &mut BitVec) {
		let min_cell = self.point_to_cell(bounding_box.min());
		let max_cell = self.point_to_cell(bounding_box.max());

		for i in min_cell.x..=max_cell.x {
			for j in min_cell.y..=max_cell.y {
				if let Some(indices) = self.cells.get(&(i, j).into()) {
					for &index in indices {
						result.set(index);
					}
				}
			}
		}
	}

	fn point_to_cell(&self, point: DVec2) -> IVec2 {
		(point * self.cell_factor).floor().as_ivec2()
	}
}

/// Enumerates pairs of elements that touch, cross or overlap.
pub struct ElementIndex<'a> {
	elements: &'a [ShapeElement],
	bounding_boxes: Vec<Aabb>,
	grid: Grid,
}

impl<'a> ElementIndex<'a> {
	pub fn new(elements: &'a [ShapeElement], eps: &Epsilons) -> Self {
		let bounding_boxes: Vec<Aabb> = elements.iter().map(|element| element.bounding_box().expand(eps.point)).collect();
		let total = bounding_boxes.iter().fold(Aabb::default(), |total, bounding_box| total.merge(bounding_box));
		let extent = total.max_extent();
		let cell_size = if extent > 0. { extent / (elements.len() as f64).sqrt().max(1.) } else { 1. };

		let mut grid = Grid::new(cell_size, elements.len());
		for (index, bounding_box) in bounding_boxes.iter().enumerate() {
			grid.insert(bounding_box, index);
		}

		ElementIndex { elements, bounding_boxes, grid }
	}

	/// Every pair `(i, j)` with `i < j` whose elements have something in common, in ascending order.
	pub fn intersecting_pairs(&self, eps: &Epsilons) -> Vec<(usize, usize, ElementIntersections)> {
		let mut pairs = Vec::new();
		let mut candidates = BitVec::new(self.elements.len());

		for (i, element) in self.elements.iter().enumerate() {
			candidates.clear();
			self.grid.query(&self.bounding_boxes[i], &mut candidates);

			for j in candidates.iter_set_bits().filter(|&j| j > i) {
				if !self.bounding_boxes[i].overlaps(&self.bounding_boxes[j]) {
					continue;
				}
				let intersections = compute_intersections(element, &self.elements[j], eps);
				if !intersections.is_empty() {
					pairs.push((i, j, intersections));
				}
			}
		}

		pairs
	}
}

/// Containment queries against the operands of a Boolean operation.
pub struct ShapeIndex<'a> {
	shapes: &'a [ShapeWithHoles],
	bounding_boxes: Vec<Aabb>,
}

impl<'a> ShapeIndex<'a> {
	pub fn new(shapes: &'a [ShapeWithHoles]) -> Self {
		ShapeIndex {
			shapes,
			bounding_boxes: shapes.iter().map(ShapeWithHoles::bounding_box).collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.shapes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shapes.is_empty()
	}

	/// Ids of the shapes containing `point`, ascending.
	pub fn point_inside_any(&self, point: Point) -> Vec<usize> {
		(0..self.shapes.len())
			.filter(|&id| self.bounding_boxes[id].contains_point(point) && self.shapes[id].contains_point(point))
			.collect()
	}

	/// Ids of the shapes containing the interior of `face`, which must be a face of `arrangement`.
	pub fn face_inside_any(&self, face: &[ShapeElement], arrangement: &[ShapeElement], eps: &Epsilons) -> Vec<usize> {
		match representative_point(face, arrangement, eps) {
			Some(point) => self.point_inside_any(point),
			None => Vec::new(),
		}
	}
}

/// A point strictly inside the face traced by `face` (the face lies to the left of its elements).
///
/// Starts at the middle of the longest element and moves along its left normal by half the distance to the
/// nearest element of the arrangement in that direction.
pub fn representative_point(face: &[ShapeElement], arrangement: &[ShapeElement], eps: &Epsilons) -> Option<Point> {
	let longest = face.iter().max_by(|a, b| a.length().total_cmp(&b.length()))?;
	let origin = longest.middle();
	let normal = longest.direction_at(origin).normalize_or_zero().perp();
	if normal == DVec2::ZERO {
		return None;
	}

	let nearest = arrangement
		.iter()
		.flat_map(|element| ray_hits(origin, normal, element, eps.point))
		.fold(f64::INFINITY, f64::min);
	let distance = if nearest.is_finite() { nearest / 2. } else { longest.length() / 2. };

	Some(origin + normal * distance)
}

/// Distances along the unit `direction` at which a ray from `origin` crosses `element`, ignoring hits closer than `eps`.
pub(crate) fn ray_hits(origin: Point, direction: DVec2, element: &ShapeElement, eps: f64) -> SmallVec<[f64; 2]> {
	let mut hits = SmallVec::new();
	match *element {
		ShapeElement::LineSegment { start, end } => {
			let along = end - start;
			let denom = direction.perp_dot(along);
			if denom.abs() <= f64::EPSILON * along.length() {
				return hits;
			}
			let t = (start - origin).perp_dot(along) / denom;
			let u = (start - origin).perp_dot(direction) / denom;
			if t > eps && (0. ..=1.).contains(&u) {
				hits.push(t);
			}
		}
		ShapeElement::CircularArc { center, .. } => {
			let radius = element.radius();
			let offset = origin - center;
			let half_b = direction.dot(offset);
			let c = offset.length_squared() - radius * radius;
			let discriminant = half_b * half_b - c;
			if discriminant < 0. {
				return hits;
			}
			let root = discriminant.sqrt();
			for t in [-half_b - root, -half_b + root] {
				if t > eps && element.sweep_contains(origin + direction * t, eps) {
					hits.push(t);
				}
			}
		}
	}
	hits
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::EPS;
	use crate::shape::{circle, polygon, reverse_shape};

	fn square(x: f64, y: f64, size: f64) -> Vec<ShapeElement> {
		polygon(&[DVec2::new(x, y), DVec2::new(x + size, y), DVec2::new(x + size, y + size), DVec2::new(x, y + size)])
	}

	#[test]
	fn pairs_are_ascending_and_include_crossings() {
		let mut elements = square(0., 0., 2.);
		elements.extend(square(1., 1., 2.));
		let index = ElementIndex::new(&elements, &EPS);
		let pairs = index.intersecting_pairs(&EPS);

		assert!(pairs.iter().all(|(i, j, _)| i < j));
		assert!(pairs.windows(2).all(|w| (w[0].0, w[0].1) < (w[1].0, w[1].1)));
		// Right edge of the first square crosses the bottom edge of the second at (2, 1)
		let crossing = pairs.iter().find(|(i, j, _)| (*i, *j) == (1, 4)).map(|(_, _, intersections)| intersections.points());
		assert_eq!(crossing, Some(vec![DVec2::new(2., 1.)]));
		// Adjacent edges of one loop touch at their shared corner
		assert!(pairs.iter().any(|(i, j, _)| (*i, *j) == (0, 1)));
		// Far-apart edges never pair
		assert!(!pairs.iter().any(|(i, j, _)| (*i, *j) == (3, 5)));
	}

	#[test]
	fn point_containment() {
		let shapes = vec![
			ShapeWithHoles::new(square(0., 0., 4.), vec![reverse_shape(&square(1., 1., 1.))]),
			ShapeWithHoles::from(square(3., 3., 2.)),
			ShapeWithHoles::from(circle(DVec2::new(10., 0.), 1.)),
		];
		let index = ShapeIndex::new(&shapes);
		assert_eq!(index.point_inside_any(DVec2::new(3.5, 3.5)), vec![0, 1]);
		assert_eq!(index.point_inside_any(DVec2::new(1.5, 1.5)), Vec::<usize>::new());
		assert_eq!(index.point_inside_any(DVec2::new(10.2, 0.3)), vec![2]);
	}

	#[test]
	fn representative_point_is_inside_the_face() {
		let face = square(0., 0., 2.);
		let point = representative_point(&face, &face, &EPS);
		assert_eq!(point, Some(DVec2::new(1., 1.)));

		let disc = circle(DVec2::ZERO, 1.);
		let point = representative_point(&disc, &disc, &EPS).unwrap_or(DVec2::INFINITY);
		assert!(point.length() < 1.);

		// The hole's top edge is closer than the far side of the outer face
		let outer = polygon(&[DVec2::new(0., 0.), DVec2::new(4., 0.), DVec2::new(4., 2.), DVec2::new(0., 2.)]);
		let mut arrangement = outer.clone();
		arrangement.extend(reverse_shape(&square(1.5, 0.5, 1.)));
		let point = representative_point(&outer, &arrangement, &EPS);
		assert_eq!(point, Some(DVec2::new(2., 1.75)));
	}
}
