use crate::bit_vec::BitVec;
use crate::boolean::BooleanOperation;
use crate::element::ShapeElement;
use crate::epsilons::Epsilons;
use crate::index::ShapeIndex;
use crate::trace::Face;

/// Decision from the per-shape flags of a face alone. A set flag means the face lies inside that shape.
pub fn fast_path(operation: BooleanOperation, flags: &BitVec) -> Option<bool> {
	match operation {
		BooleanOperation::Union => flags.any().then_some(false),
		BooleanOperation::Intersection => flags.all().then_some(true),
		BooleanOperation::Difference => flags.iter_set_bits().any(|shape| shape >= 1).then_some(false),
		BooleanOperation::SymmetricDifference => (flags.count_ones() >= 2).then_some(false),
	}
}

/// Decision from the ascending ids of the shapes containing the face.
pub fn exact(operation: BooleanOperation, containing: &[usize], shape_count: usize) -> bool {
	match operation {
		BooleanOperation::Union => containing.is_empty(),
		BooleanOperation::Intersection => shape_count > 0 && containing.len() == shape_count,
		BooleanOperation::Difference => containing == [0],
		BooleanOperation::SymmetricDifference => containing.len() == 1,
	}
}

/// Whether `face` belongs to the result. For a union, accepted faces are holes.
pub fn accept_face(operation: BooleanOperation, face: &Face, face_shape: &[ShapeElement], arrangement: &[ShapeElement], shapes: &ShapeIndex, eps: &Epsilons) -> bool {
	if let Some(decision) = fast_path(operation, &face.flags) {
		log::trace!("Face of {} elements decided by flags: {decision}", face.elements.len());
		return decision;
	}
	let containing = shapes.face_inside_any(face_shape, arrangement, eps);
	let decision = exact(operation, &containing, shapes.len());
	log::trace!("Face of {} elements inside {containing:?}: {decision}", face.elements.len());
	decision
}

#[cfg(test)]
mod tests {
	use super::*;

	fn flags(len: usize, set: &[usize]) -> BitVec {
		let mut flags = BitVec::new(len);
		for &shape in set {
			flags.set(shape);
		}
		flags
	}

	#[test]
	fn flags_only_decide_safe_cases() {
		assert_eq!(fast_path(BooleanOperation::Union, &flags(2, &[1])), Some(false));
		assert_eq!(fast_path(BooleanOperation::Union, &flags(2, &[])), None);
		assert_eq!(fast_path(BooleanOperation::Intersection, &flags(2, &[0, 1])), Some(true));
		assert_eq!(fast_path(BooleanOperation::Intersection, &flags(2, &[0])), None);
		assert_eq!(fast_path(BooleanOperation::Difference, &flags(3, &[0])), None);
		assert_eq!(fast_path(BooleanOperation::Difference, &flags(3, &[2])), Some(false));
		assert_eq!(fast_path(BooleanOperation::SymmetricDifference, &flags(2, &[0, 1])), Some(false));
		assert_eq!(fast_path(BooleanOperation::SymmetricDifference, &flags(2, &[1])), None);
	}

	#[test]
	fn containment_decides_the_rest() {
		assert!(exact(BooleanOperation::Union, &[], 2));
		assert!(!exact(BooleanOperation::Union, &[0], 2));
		assert!(exact(BooleanOperation::Intersection, &[0, 1], 2));
		assert!(!exact(BooleanOperation::Intersection, &[1], 2));
		assert!(exact(BooleanOperation::Difference, &[0], 3));
		assert!(!exact(BooleanOperation::Difference, &[0, 2], 3));
		assert!(!exact(BooleanOperation::Difference, &[1], 3));
		assert!(exact(BooleanOperation::SymmetricDifference, &[1], 2));
		assert!(!exact(BooleanOperation::SymmetricDifference, &[0, 1], 2));
		assert!(!exact(BooleanOperation::SymmetricDifference, &[], 2));
	}
}
