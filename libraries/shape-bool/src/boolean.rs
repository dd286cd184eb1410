use crate::bit_vec::BitVec;
use crate::classify::accept_face;
use crate::cleanup::{remove_collinear_vertices, remove_duplicate_vertices};
use crate::component::{ComponentMap, merge_nested, merge_touching};
use crate::element::ShapeElement;
use crate::epsilons::{EPS, Epsilons};
use crate::equalize::equalize_elements;
use crate::error::BooleanError;
use crate::graph::build_graph;
use crate::index::{ElementIndex, ShapeIndex};
use crate::shape::{Shape, ShapeWithHoles, is_counter_clockwise, reverse_shape, signed_area, winding_number};
use crate::split::{SplittedElement, dedup_elements, split_elements};
use crate::trace::FaceTracer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanOperation {
	Union,
	Intersection,
	/// The first shape minus all the others.
	Difference,
	/// Regions covered by exactly one shape.
	SymmetricDifference,
}

pub fn compute_union(shapes: &[ShapeWithHoles]) -> Result<Vec<ShapeWithHoles>, BooleanError> {
	boolean_operation(shapes, BooleanOperation::Union, &EPS)
}

pub fn compute_intersection(shapes: &[ShapeWithHoles]) -> Result<Vec<ShapeWithHoles>, BooleanError> {
	boolean_operation(shapes, BooleanOperation::Intersection, &EPS)
}

pub fn compute_difference(shape: &ShapeWithHoles, subtracted: &[ShapeWithHoles]) -> Result<Vec<ShapeWithHoles>, BooleanError> {
	let shapes: Vec<ShapeWithHoles> = std::iter::once(shape).chain(subtracted).cloned().collect();
	boolean_operation(&shapes, BooleanOperation::Difference, &EPS)
}

pub fn compute_symmetric_difference(a: &ShapeWithHoles, b: &ShapeWithHoles) -> Result<Vec<ShapeWithHoles>, BooleanError> {
	boolean_operation(&[a.clone(), b.clone()], BooleanOperation::SymmetricDifference, &EPS)
}

/// Outer loop anticlockwise, holes clockwise, degenerate elements and empty holes dropped.
fn normalize(shape: &ShapeWithHoles, eps: &Epsilons) -> ShapeWithHoles {
	let outer = remove_duplicate_vertices(shape.shape.clone(), eps.point);
	let outer = if signed_area(&outer) < 0. { reverse_shape(&outer) } else { outer };
	let holes = shape
		.holes
		.iter()
		.map(|hole| remove_duplicate_vertices(hole.clone(), eps.point))
		.filter(|hole| !hole.is_empty())
		.map(|hole| if signed_area(&hole) > 0. { reverse_shape(&hole) } else { hole })
		.collect();
	ShapeWithHoles::new(outer, holes)
}

fn clean(shape: Shape, eps: &Epsilons) -> Shape {
	remove_collinear_vertices(remove_duplicate_vertices(shape, eps.point), eps.point)
}

/// Computes `operation` over `shapes`. Output outer loops run anticlockwise and holes clockwise.
///
/// Shapes are grouped into components of touching or nested shapes, and each component is evaluated on its own.
/// An intersection of more than one component is empty, and a difference only looks at the component of the first
/// shape.
pub fn boolean_operation(shapes: &[ShapeWithHoles], operation: BooleanOperation, eps: &Epsilons) -> Result<Vec<ShapeWithHoles>, BooleanError> {
	let shapes: Vec<ShapeWithHoles> = shapes.iter().map(|shape| normalize(shape, eps)).collect();
	if shapes.is_empty() {
		return Ok(Vec::new());
	}

	let mut elements: Vec<ShapeElement> = Vec::new();
	let mut owners: Vec<usize> = Vec::new();
	for (id, shape) in shapes.iter().enumerate() {
		for element in shape.shape.iter().chain(shape.holes.iter().flatten()) {
			elements.push(*element);
			owners.push(id);
		}
	}

	let pairs = ElementIndex::new(&elements, eps).intersecting_pairs(eps);
	let mut cut_points = vec![Vec::new(); elements.len()];
	for (i, j, intersections) in &pairs {
		let points = intersections.points();
		cut_points[*i].extend_from_slice(&points);
		cut_points[*j].extend(points);
	}
	equalize_elements(&mut elements, &mut cut_points, eps.point);

	let shape_index = ShapeIndex::new(&shapes);
	let mut components = ComponentMap::new(shapes.len());
	merge_touching(&mut components, &owners, &pairs);
	merge_nested(&mut components, &shapes, &shape_index);

	let labels = match operation {
		BooleanOperation::Difference => vec![components.component_of(0)],
		BooleanOperation::Intersection if components.components().len() > 1 => {
			log::debug!("Intersection of {} disjoint components is empty", components.components().len());
			return Ok(Vec::new());
		}
		_ => components.components(),
	};
	log::debug!("{operation:?} of {} shapes: {} elements, {} intersecting pairs, {} components", shapes.len(), elements.len(), pairs.len(), labels.len());

	let split = split_elements(&elements, &owners, &cut_points, eps.point);
	let mut result = Vec::new();
	for label in labels {
		let component_elements = dedup_elements(split.iter().filter(|element| components.component_of(element.shape_id) == label).copied().collect());
		if component_elements.is_empty() {
			continue;
		}
		result.extend(evaluate_component(&component_elements, label, operation, &shape_index, eps)?);
	}

	log::debug!("{operation:?} produced {} shapes", result.len());
	Ok(result)
}

fn evaluate_component(elements: &[SplittedElement], component: usize, operation: BooleanOperation, shapes: &ShapeIndex, eps: &Epsilons) -> Result<Vec<ShapeWithHoles>, BooleanError> {
	let graph = build_graph(elements, eps.point);
	let tracer = FaceTracer::new(elements, &graph, component, eps);
	let mut visited = BitVec::new(elements.len());
	let outline = tracer.trace_outline(&mut visited)?;
	let faces = tracer.trace_faces(&mut visited, shapes.len())?;

	let arrangement: Vec<ShapeElement> = elements.iter().map(|element| element.element).collect();
	let mut accepted = Vec::new();
	for face in &faces {
		let face_shape = face.shape(elements);
		if accept_face(operation, face, &face_shape, &arrangement, shapes, eps) {
			let cleaned = clean(face_shape, eps);
			if !cleaned.is_empty() {
				accepted.push(cleaned);
			}
		}
	}
	log::debug!("Component {component}: {} of {} faces accepted", accepted.len(), faces.len());

	if operation != BooleanOperation::Union {
		return Ok(assemble(accepted));
	}

	let Some(outline) = outline else { return Ok(Vec::new()) };
	let outline: Shape = outline.iter().map(|&id| elements[id].element).collect();
	let holes = accepted.into_iter().filter(|face| is_counter_clockwise(face)).map(|face| reverse_shape(&face)).collect();
	Ok(vec![ShapeWithHoles::new(clean(reverse_shape(&outline), eps), holes)])
}

/// Anticlockwise loops become shapes. Clockwise loops come from boundaries nested inside a face without touching it,
/// and become holes of the smallest shape around them.
fn assemble(loops: Vec<Shape>) -> Vec<ShapeWithHoles> {
	let (outers, holes): (Vec<Shape>, Vec<Shape>) = loops.into_iter().partition(|shape| is_counter_clockwise(shape));
	let areas: Vec<f64> = outers.iter().map(|shape| signed_area(shape)).collect();
	let mut result: Vec<ShapeWithHoles> = outers.into_iter().map(ShapeWithHoles::from).collect();

	for hole in holes {
		let Some(probe) = hole.first().map(ShapeElement::middle) else { continue };
		let container = (0..result.len())
			.filter(|&i| winding_number(&result[i].shape, probe) != 0)
			.min_by(|&a, &b| areas[a].total_cmp(&areas[b]));
		match container {
			Some(i) => result[i].holes.push(hole),
			None => log::warn!("Dropping a hole at {probe:?} outside every result shape"),
		}
	}

	result
}
