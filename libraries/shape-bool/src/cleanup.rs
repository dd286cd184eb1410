use crate::element::ShapeElement;
use crate::index::ray_hits;
use crate::point::{Point, points_equal};
use crate::shape::{Shape, ShapeWithHoles, is_counter_clockwise, reverse_shape, shape_bounding_box};
use glam::DVec2;

/// Drops elements whose endpoints coincide within `eps`. Full circles are kept.
pub fn remove_duplicate_vertices(shape: Shape, eps: f64) -> Shape {
	shape.into_iter().filter(|element| element.is_full_circle() || !element.is_degenerate(eps)).collect()
}

fn merge_elements(a: &ShapeElement, b: &ShapeElement, eps: f64) -> Option<ShapeElement> {
	if a.is_full_circle() || b.is_full_circle() {
		return None;
	}
	match (*a, *b) {
		(ShapeElement::LineSegment { start, end: joint }, ShapeElement::LineSegment { end, .. }) => {
			let merged = ShapeElement::line(start, end);
			((joint - start).dot(end - joint) > 0. && merged.contains_point(joint, eps)).then_some(merged)
		}
		(
			ShapeElement::CircularArc {
				start,
				center: center0,
				orientation: orientation0,
				..
			},
			ShapeElement::CircularArc {
				end,
				center: center1,
				orientation: orientation1,
				..
			},
		) => {
			if orientation0 != orientation1 || !points_equal(center0, center1, eps) || (a.radius() - b.radius()).abs() > eps {
				return None;
			}
			// A loop made of one circle closes exactly at its start
			let end = if points_equal(start, end, eps) { start } else { end };
			Some(ShapeElement::arc(start, end, center0, orientation0))
		}
		_ => None,
	}
}

/// Merges consecutive collinear line segments running the same way, and consecutive arcs of the same circle
/// and orientation. The loop is treated cyclically.
pub fn remove_collinear_vertices(shape: Shape, eps: f64) -> Shape {
	let mut result: Shape = Vec::with_capacity(shape.len());
	for element in shape {
		match result.last().and_then(|last| merge_elements(last, &element, eps)) {
			Some(merged) => {
				result.pop();
				result.push(merged);
			}
			None => result.push(element),
		}
	}

	while result.len() > 1 {
		let (Some(last), Some(first)) = (result.last(), result.first()) else { break };
		let Some(merged) = merge_elements(last, first, eps) else { break };
		result[0] = merged;
		result.pop();
	}

	result
}

/// Rightmost point of a loop, lowest on ties, with the index of the element it lies on.
fn rightmost_point(shape: &[ShapeElement], eps: f64) -> Option<(usize, Point)> {
	let mut candidates = Vec::with_capacity(shape.len() * 2);
	for (index, element) in shape.iter().enumerate() {
		candidates.push((index, element.start()));
		if let Some(center) = element.center() {
			let extreme = center + DVec2::new(element.radius(), 0.);
			if element.sweep_contains(extreme, eps) {
				candidates.push((index, extreme));
			}
		}
	}
	candidates
		.into_iter()
		.max_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then_with(|| b.y.total_cmp(&a.y)))
}

/// Rotates (splitting if needed) a loop so that it starts at `point`, which lies on element `index`.
fn start_loop_at(mut shape: Shape, index: usize, point: Point, eps: f64) -> Shape {
	let element = shape[index];
	let len = shape.len();
	if points_equal(element.start(), point, eps) {
		shape.rotate_left(index);
		return shape;
	}
	if points_equal(element.end(), point, eps) {
		shape.rotate_left((index + 1) % len);
		return shape;
	}
	let (first, second) = element.split(point);
	shape[index] = first;
	shape.insert(index + 1, second);
	shape.rotate_left(index + 1);
	shape
}

/// Joins the holes of a shape into its outer loop with pairs of opposite bridge segments, yielding a single
/// weakly simple loop. The outer loop is made anticlockwise and the holes clockwise first.
///
/// Holes are bridged rightmost first: from the rightmost point of the hole, a horizontal ray towards +x finds the
/// nearest crossing with the loop built so far. Holes that no ray can reach are dropped.
pub fn flatten_holes(shape: ShapeWithHoles, eps: f64) -> Shape {
	let mut result = if is_counter_clockwise(&shape.shape) { shape.shape } else { reverse_shape(&shape.shape) };

	let mut holes: Vec<Shape> = shape
		.holes
		.into_iter()
		.filter(|hole| !hole.is_empty())
		.map(|hole| if is_counter_clockwise(&hole) { reverse_shape(&hole) } else { hole })
		.collect();
	holes.sort_by(|a, b| shape_bounding_box(b).max().x.total_cmp(&shape_bounding_box(a).max().x));

	for hole in holes {
		let Some((hole_index, bridge_end)) = rightmost_point(&hole, eps) else { continue };

		let crossing = result
			.iter()
			.enumerate()
			.flat_map(|(index, element)| ray_hits(bridge_end, DVec2::X, element, eps).into_iter().map(move |t| (index, t)))
			.min_by(|(_, a), (_, b)| a.total_cmp(b));
		let Some((index, distance)) = crossing else {
			log::debug!("Dropping hole at {bridge_end:?}: no boundary to its right");
			continue;
		};

		let element = result[index];
		let mut bridge_start = bridge_end + DVec2::new(distance, 0.);
		let (before, after) = if points_equal(bridge_start, element.start(), eps) {
			bridge_start = element.start();
			(None, Some(element))
		} else if points_equal(bridge_start, element.end(), eps) {
			bridge_start = element.end();
			(Some(element), None)
		} else {
			let (first, second) = element.split(bridge_start);
			(Some(first), Some(second))
		};

		let hole = start_loop_at(hole, hole_index, bridge_end, eps);
		let mut flattened = Vec::with_capacity(result.len() + hole.len() + 3);
		flattened.extend_from_slice(&result[..index]);
		flattened.extend(before);
		flattened.push(ShapeElement::line(bridge_start, bridge_end));
		flattened.extend(hole);
		flattened.push(ShapeElement::line(bridge_end, bridge_start));
		flattened.extend(after);
		flattened.extend_from_slice(&result[index + 1..]);
		result = flattened;
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Orientation;
	use crate::shape::{ShapeVertex, build_shape, circle, polygon, shape_is_closed, signed_area};
	use std::f64::consts::PI;

	fn square(x: f64, y: f64, size: f64) -> Shape {
		polygon(&[DVec2::new(x, y), DVec2::new(x + size, y), DVec2::new(x + size, y + size), DVec2::new(x, y + size)])
	}

	#[test]
	fn duplicate_vertices_are_dropped() {
		let shape = polygon(&[DVec2::new(0., 0.), DVec2::new(1., 0.), DVec2::new(1., 0.), DVec2::new(1., 1.)]);
		let cleaned = remove_duplicate_vertices(shape, 1e-9);
		assert_eq!(cleaned.len(), 3);
		assert!(shape_is_closed(&cleaned, 1e-9));
		assert_eq!(remove_duplicate_vertices(circle(DVec2::ZERO, 1.), 1e-9).len(), 1);
	}

	#[test]
	fn collinear_lines_merge_cyclically() {
		let shape = polygon(&[
			DVec2::new(1., 0.),
			DVec2::new(2., 0.),
			DVec2::new(2., 1.),
			DVec2::new(2., 2.),
			DVec2::new(0., 2.),
			DVec2::new(0., 0.),
		]);
		let cleaned = remove_collinear_vertices(shape, 1e-9);
		assert_eq!(cleaned.len(), 4);
		assert!(shape_is_closed(&cleaned, 1e-9));
		assert_eq!(signed_area(&cleaned), 4.);
		assert_eq!(cleaned[0], ShapeElement::line(DVec2::new(0., 0.), DVec2::new(2., 0.)));
	}

	#[test]
	fn spikes_are_not_merged() {
		let shape = polygon(&[DVec2::new(0., 0.), DVec2::new(2., 0.), DVec2::new(1., 0.), DVec2::new(1., 1.)]);
		assert_eq!(remove_collinear_vertices(shape, 1e-9).len(), 4);
	}

	#[test]
	fn arcs_of_one_circle_collapse() {
		let quarter = |x: f64, y: f64| ShapeVertex::arc(DVec2::new(x, y), DVec2::ZERO, Orientation::Anticlockwise);
		let shape = build_shape(&[quarter(1., 0.), quarter(0., 1.), quarter(-1., 0.), quarter(0., -1.)]);
		let cleaned = remove_collinear_vertices(shape, 1e-9);
		assert_eq!(cleaned.len(), 1);
		assert!(cleaned[0].is_full_circle());
		assert!((signed_area(&cleaned) - PI).abs() < 1e-9);

		let half = build_shape(&[quarter(1., 0.), quarter(0., 1.), ShapeVertex::line(DVec2::new(-1., 0.))]);
		let cleaned = remove_collinear_vertices(half, 1e-9);
		assert_eq!(cleaned.len(), 2);
		assert!((cleaned[0].sweep() - PI).abs() < 1e-9);
	}

	#[test]
	fn loops_restart_at_a_point() {
		let shape = square(0., 0., 2.);
		// At the end of the last element, at a start, and inside an element
		let wrapped = start_loop_at(shape.clone(), 3, DVec2::new(0., 0.), 1e-9);
		assert_eq!(wrapped, shape);
		let at_start = start_loop_at(shape.clone(), 2, DVec2::new(2., 2.), 1e-9);
		assert_eq!(at_start[0].start(), DVec2::new(2., 2.));
		let inside = start_loop_at(shape, 1, DVec2::new(2., 0.5), 1e-9);
		assert_eq!(inside.len(), 5);
		assert_eq!(inside[0], ShapeElement::line(DVec2::new(2., 0.5), DVec2::new(2., 2.)));
		assert_eq!(inside[4], ShapeElement::line(DVec2::new(2., 0.), DVec2::new(2., 0.5)));
		assert!(shape_is_closed(&inside, 1e-9));
	}

	#[test]
	fn holes_are_bridged_into_the_outer_loop() {
		let shape = ShapeWithHoles::new(reverse_shape(&square(0., 0., 4.)), vec![square(1., 1., 1.)]);
		let flattened = flatten_holes(shape, 1e-9);

		assert!(shape_is_closed(&flattened, 1e-9));
		assert_eq!(signed_area(&flattened), 15.);
		// Four outer edges with the right edge split, two bridges, four hole edges
		assert_eq!(flattened.len(), 11);
		assert!(flattened.contains(&ShapeElement::line(DVec2::new(4., 1.), DVec2::new(2., 1.))));
		assert!(flattened.contains(&ShapeElement::line(DVec2::new(2., 1.), DVec2::new(4., 1.))));
	}

	#[test]
	fn nested_holes_bridge_rightmost_first() {
		let holes = vec![square(1., 1., 1.), circle(DVec2::new(5., 2.), 0.5)];
		let shape = ShapeWithHoles::new(polygon(&[DVec2::new(0., 0.), DVec2::new(8., 0.), DVec2::new(8., 4.), DVec2::new(0., 4.)]), holes);
		let flattened = flatten_holes(shape, 1e-9);

		assert!(shape_is_closed(&flattened, 1e-9));
		assert!((signed_area(&flattened) - (32. - 1. - PI * 0.25)).abs() < 1e-9);
		// The circle hole is bridged from its rightmost point
		assert!(flattened.contains(&ShapeElement::line(DVec2::new(8., 2.), DVec2::new(5.5, 2.))));
	}
}
