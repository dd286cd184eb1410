use crate::component::ComponentMap;
use crate::element::ShapeElement;
use crate::point::{Point, cmp_points};
use glam::DVec2;

/// Where a point taking part in equalization lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointSlot {
	Start(usize),
	End(usize),
	Center(usize),
	/// The `k`-th cut point of element `e`.
	Intersection(usize, usize),
}

/// Replaces every point by the lexicographically smallest member of its cluster, where a cluster is the transitive
/// closure of "closer than `eps` on both axes". Output has the same length and order as the input.
///
/// Cluster representatives are pairwise farther apart than `eps`, so applying this twice changes nothing.
pub fn equalize_points(points: &[Point], eps: f64) -> Vec<Point> {
	let mut order: Vec<usize> = (0..points.len()).collect();
	order.sort_by(|&a, &b| cmp_points(points[a], points[b]).then(a.cmp(&b)));

	let mut clusters = ComponentMap::new(points.len());
	for (position, &i) in order.iter().enumerate() {
		for &j in &order[position + 1..] {
			if points[j].x - points[i].x > eps {
				break;
			}
			if (points[j].y - points[i].y).abs() <= eps {
				clusters.merge(i, j);
			}
		}
	}

	// `order` is sorted, so the first member seen of each cluster is its smallest
	let mut representatives: Vec<Option<Point>> = vec![None; points.len()];
	for &i in &order {
		// Adding zero turns -0.0 into 0.0
		representatives[clusters.component_of(i)].get_or_insert(points[i] + DVec2::ZERO);
	}

	(0..points.len()).map(|i| representatives[clusters.component_of(i)].unwrap_or(points[i])).collect()
}

fn slot_mut<'a>(elements: &'a mut [ShapeElement], cut_points: &'a mut [Vec<Point>], slot: PointSlot) -> Option<&'a mut Point> {
	match slot {
		PointSlot::Start(e) => match &mut elements[e] {
			ShapeElement::LineSegment { start, .. } | ShapeElement::CircularArc { start, .. } => Some(start),
		},
		PointSlot::End(e) => match &mut elements[e] {
			ShapeElement::LineSegment { end, .. } | ShapeElement::CircularArc { end, .. } => Some(end),
		},
		PointSlot::Center(e) => match &mut elements[e] {
			ShapeElement::CircularArc { center, .. } => Some(center),
			ShapeElement::LineSegment { .. } => None,
		},
		PointSlot::Intersection(e, k) => cut_points.get_mut(e)?.get_mut(k),
	}
}

/// Equalizes the endpoints, arc centers and cut points of `elements` in place.
///
/// Full circles stay full circles: their start and end sit in the same cluster.
pub fn equalize_elements(elements: &mut [ShapeElement], cut_points: &mut [Vec<Point>], eps: f64) {
	let mut slots = Vec::new();
	let mut points = Vec::new();
	for (e, element) in elements.iter().enumerate() {
		slots.push(PointSlot::Start(e));
		points.push(element.start());
		slots.push(PointSlot::End(e));
		points.push(element.end());
		if let Some(center) = element.center() {
			slots.push(PointSlot::Center(e));
			points.push(center);
		}
		if let Some(cuts) = cut_points.get(e) {
			for (k, &point) in cuts.iter().enumerate() {
				slots.push(PointSlot::Intersection(e, k));
				points.push(point);
			}
		}
	}

	let equalized = equalize_points(&points, eps);
	let mut moved = 0;
	for (slot, point) in slots.into_iter().zip(equalized) {
		if let Some(target) = slot_mut(elements, cut_points, slot) {
			if *target != point {
				moved += 1;
			}
			*target = point;
		}
	}
	log::trace!("Equalized {} points, {moved} moved", points.len());
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Orientation;
	use pretty_assertions::assert_eq;

	#[test]
	fn clusters_collapse_to_smallest_point() {
		let points = [DVec2::new(1., 1.), DVec2::new(1. + 1e-7, 1. - 1e-7), DVec2::new(5., 5.), DVec2::new(1. - 5e-7, 1.)];
		let equalized = equalize_points(&points, 1e-6);
		assert_eq!(equalized, vec![DVec2::new(1. - 5e-7, 1.), DVec2::new(1. - 5e-7, 1.), DVec2::new(5., 5.), DVec2::new(1. - 5e-7, 1.)]);
	}

	#[test]
	fn clustering_is_transitive() {
		let points = [DVec2::new(0., 0.), DVec2::new(0.8e-6, 0.), DVec2::new(1.6e-6, 0.)];
		let equalized = equalize_points(&points, 1e-6);
		assert!(equalized.iter().all(|&point| point == DVec2::ZERO));
	}

	#[test]
	fn points_close_in_x_but_not_y_stay_apart() {
		let points = [DVec2::new(0., 0.), DVec2::new(0., 1.), DVec2::new(1e-7, 2e-7)];
		let equalized = equalize_points(&points, 1e-6);
		assert_eq!(equalized, vec![DVec2::ZERO, DVec2::new(0., 1.), DVec2::ZERO]);
	}

	#[test]
	fn equalization_is_idempotent() {
		let points: Vec<Point> = (0..40).map(|i| DVec2::new((i % 7) as f64 * 4e-7, (i / 7) as f64 * 0.5 + (i % 3) as f64 * 3e-7)).collect();
		let once = equalize_points(&points, 1e-6);
		let twice = equalize_points(&once, 1e-6);
		assert_eq!(once, twice);
	}

	#[test]
	fn negative_zero_is_normalized() {
		let equalized = equalize_points(&[DVec2::new(-0., -0.)], 1e-6);
		assert!(equalized[0].x.is_sign_positive() && equalized[0].y.is_sign_positive());
	}

	#[test]
	fn elements_and_cut_points_are_written_back() {
		let mut elements = [
			ShapeElement::line(DVec2::new(0., 0.), DVec2::new(2., 1e-8)),
			ShapeElement::arc(DVec2::new(2., 0.), DVec2::new(2., 0.), DVec2::new(1e-8, 0.), Orientation::Anticlockwise),
		];
		let mut cut_points = vec![vec![DVec2::new(1., 1e-8)], vec![]];
		equalize_elements(&mut elements, &mut cut_points, 1e-6);

		assert_eq!(elements[0].end(), DVec2::new(2., 0.));
		assert_eq!(elements[1].center(), Some(DVec2::ZERO));
		assert!(elements[1].is_full_circle());
		assert_eq!(cut_points[0], vec![DVec2::new(1., 1e-8)]);
	}
}
