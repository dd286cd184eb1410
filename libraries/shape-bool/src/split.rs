use crate::element::{ShapeElement, cmp_elements};
use crate::point::{Point, cmp_points, points_equal};
use std::cmp::Ordering;

/// A piece of an input element between two consecutive cut points, in one of its two directions.
#[derive(Clone, Copy, Debug)]
pub struct SplittedElement {
	pub element: ShapeElement,
	pub shape_id: usize,
	/// Whether the piece runs the same way as the input element it was cut from.
	pub original_direction: bool,
}

// Identity is the geometry alone, so both directions of shared boundary collapse under sort + dedup.
impl PartialEq for SplittedElement {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for SplittedElement {}

impl PartialOrd for SplittedElement {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for SplittedElement {
	fn cmp(&self, other: &Self) -> Ordering {
		cmp_elements(&self.element, &other.element)
	}
}

/// Cuts every element at its cut points and emits each piece twice, forward and reversed.
///
/// Cut points are visited in order of distance along the element, ties broken by coordinates. Points coinciding
/// with the start or end of what remains are skipped, and degenerate pieces are dropped.
pub fn split_elements(elements: &[ShapeElement], owners: &[usize], cut_points: &[Vec<Point>], eps: f64) -> Vec<SplittedElement> {
	let mut output = Vec::with_capacity(elements.len() * 2);

	for (e, element) in elements.iter().enumerate() {
		let mut cuts = cut_points.get(e).cloned().unwrap_or_default();
		cuts.sort_by(|&a, &b| element.param_of(a).total_cmp(&element.param_of(b)).then_with(|| cmp_points(a, b)));

		let mut pieces = Vec::with_capacity(cuts.len() + 1);
		let mut remaining = *element;
		for cut in cuts {
			if points_equal(cut, remaining.start(), eps) || points_equal(cut, remaining.end(), eps) {
				continue;
			}
			let (piece, rest) = remaining.split(cut);
			pieces.push(piece);
			remaining = rest;
		}
		pieces.push(remaining);

		for piece in pieces {
			if !piece.is_full_circle() && piece.is_degenerate(eps) {
				continue;
			}
			output.push(SplittedElement {
				element: piece,
				shape_id: owners[e],
				original_direction: true,
			});
			output.push(SplittedElement {
				element: piece.reverse(),
				shape_id: owners[e],
				original_direction: false,
			});
		}
	}

	output
}

/// Sorts by geometry and keeps one copy of each: a forward piece wins over a reverse one, then the lower shape id.
pub fn dedup_elements(mut elements: Vec<SplittedElement>) -> Vec<SplittedElement> {
	elements.sort_by(|a, b| a.cmp(b).then(b.original_direction.cmp(&a.original_direction)).then(a.shape_id.cmp(&b.shape_id)));
	elements.dedup();
	elements
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Orientation;
	use glam::DVec2;
	use std::f64::consts::TAU;

	#[test]
	fn pieces_cover_the_element() {
		let line = ShapeElement::line(DVec2::new(0., 0.), DVec2::new(4., 0.));
		let cuts = vec![vec![DVec2::new(3., 0.), DVec2::new(1., 0.), DVec2::new(4., 0.), DVec2::new(1., 0.)]];
		let pieces = split_elements(&[line], &[7], &cuts, 1e-9);

		let forward: Vec<ShapeElement> = pieces.iter().filter(|piece| piece.original_direction).map(|piece| piece.element).collect();
		assert_eq!(
			forward,
			vec![
				ShapeElement::line(DVec2::new(0., 0.), DVec2::new(1., 0.)),
				ShapeElement::line(DVec2::new(1., 0.), DVec2::new(3., 0.)),
				ShapeElement::line(DVec2::new(3., 0.), DVec2::new(4., 0.)),
			]
		);
		assert_eq!(pieces.len(), 6);
		assert!(pieces.iter().all(|piece| piece.shape_id == 7));
		let total: f64 = forward.iter().map(ShapeElement::length).sum();
		assert_eq!(total, line.length());
	}

	#[test]
	fn every_piece_has_its_reverse() {
		let elements = [
			ShapeElement::line(DVec2::new(-2., -1.), DVec2::new(2., -1.)),
			ShapeElement::arc(DVec2::new(1., 0.), DVec2::new(1., 0.), DVec2::ZERO, Orientation::Anticlockwise),
			ShapeElement::arc(DVec2::new(0., -2.), DVec2::new(0., 2.), DVec2::ZERO, Orientation::Clockwise),
		];
		let cuts = vec![vec![DVec2::new(0., -1.), DVec2::new(1.5, -1.)], vec![DVec2::new(0., 1.), DVec2::new(-1., 0.)], vec![DVec2::new(-2., 0.)]];
		let pieces = split_elements(&elements, &[0, 1, 2], &cuts, 1e-9);
		assert_eq!(pieces.len(), 2 * (3 + 3 + 2));

		for piece in &pieces {
			assert_eq!(piece.element.reverse().reverse(), piece.element);
			let twin = pieces.iter().filter(|other| other.element == piece.element.reverse()).collect::<Vec<_>>();
			assert_eq!(twin.len(), 1, "{piece:?}");
			assert_eq!(twin[0].shape_id, piece.shape_id);
			assert_ne!(twin[0].original_direction, piece.original_direction);
		}
	}

	#[test]
	fn long_arcs_are_cut_in_travel_order() {
		// Three quarters of a circle: the cut past the half-way point must come last
		let arc = ShapeElement::arc(DVec2::new(1., 0.), DVec2::new(0., -1.), DVec2::ZERO, Orientation::Anticlockwise);
		let cuts = vec![vec![DVec2::new(-1., 0.), DVec2::new(0., 1.)]];
		let pieces = split_elements(&[arc], &[0], &cuts, 1e-9);
		let forward: Vec<ShapeElement> = pieces.iter().filter(|piece| piece.original_direction).map(|piece| piece.element).collect();

		assert_eq!(forward.len(), 3);
		assert_eq!(forward[0].end(), DVec2::new(0., 1.));
		assert_eq!(forward[1].end(), DVec2::new(-1., 0.));
		let sweep: f64 = forward.iter().map(ShapeElement::sweep).sum();
		assert!((sweep - 0.75 * TAU).abs() < 1e-12);
	}

	#[test]
	fn full_circle_without_cuts_survives() {
		let circle = ShapeElement::arc(DVec2::new(1., 0.), DVec2::new(1., 0.), DVec2::ZERO, Orientation::Anticlockwise);
		let pieces = split_elements(&[circle], &[0], &[vec![DVec2::new(1., 0.)]], 1e-9);
		assert_eq!(pieces.len(), 2);
		assert!(pieces[0].element.is_full_circle());
	}

	#[test]
	fn shared_edges_keep_forward_copies() {
		let a = ShapeElement::line(DVec2::new(0., 0.), DVec2::new(1., 0.));
		// Shape 1 runs along the same edge the other way
		let pieces = split_elements(&[a, a.reverse()], &[0, 1], &[vec![], vec![]], 1e-9);
		let deduped = dedup_elements(pieces);

		assert_eq!(deduped.len(), 2);
		assert!(deduped.iter().all(|piece| piece.original_direction));
		assert_eq!(deduped[0].element, a);
		assert_eq!(deduped[0].shape_id, 0);
		assert_eq!(deduped[1].shape_id, 1);
	}

	#[test]
	fn identical_edges_keep_the_lower_shape() {
		let a = ShapeElement::line(DVec2::new(0., 0.), DVec2::new(1., 0.));
		let deduped = dedup_elements(split_elements(&[a, a], &[3, 2], &[vec![], vec![]], 1e-9));
		assert_eq!(deduped.len(), 2);
		assert_eq!((deduped[0].shape_id, deduped[0].original_direction), (2, true));
		assert_eq!((deduped[1].shape_id, deduped[1].original_direction), (2, false));
	}
}
