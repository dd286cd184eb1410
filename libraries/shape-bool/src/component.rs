use crate::index::ShapeIndex;
use crate::intersection::ElementIntersections;
use crate::shape::ShapeWithHoles;

/// Disjoint sets over the ids `0..len`, stored as flat label and member arrays.
///
/// Merging relabels every member of the smaller group, so `component_of` is a single lookup.
/// Member lists stay sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentMap {
	labels: Vec<usize>,
	groups: Vec<Vec<usize>>,
}

impl ComponentMap {
	pub fn new(len: usize) -> Self {
		ComponentMap {
			labels: (0..len).collect(),
			groups: (0..len).map(|id| vec![id]).collect(),
		}
	}

	/// Number of members, not of components.
	pub fn len(&self) -> usize {
		self.labels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	#[inline]
	pub fn component_of(&self, id: usize) -> usize {
		self.labels[id]
	}

	pub fn members(&self, component: usize) -> &[usize] {
		&self.groups[component]
	}

	/// Joins the components of `a` and `b`. Returns false if they were already joined.
	pub fn merge(&mut self, a: usize, b: usize) -> bool {
		let (component_a, component_b) = (self.labels[a], self.labels[b]);
		if component_a == component_b {
			return false;
		}
		let (keep, absorb) = if self.groups[component_a].len() >= self.groups[component_b].len() {
			(component_a, component_b)
		} else {
			(component_b, component_a)
		};

		let moved = std::mem::take(&mut self.groups[absorb]);
		for &member in &moved {
			self.labels[member] = keep;
		}
		self.groups[keep].extend(moved);
		self.groups[keep].sort_unstable();
		true
	}

	/// Distinct component labels, ordered by their smallest member.
	pub fn components(&self) -> Vec<usize> {
		let mut components: Vec<usize> = (0..self.groups.len()).filter(|&label| !self.groups[label].is_empty()).collect();
		components.sort_unstable_by_key(|&label| self.groups[label][0]);
		components
	}
}

/// Joins the owners of every pair of elements that touch, cross or overlap.
pub fn merge_touching(components: &mut ComponentMap, owners: &[usize], pairs: &[(usize, usize, ElementIntersections)]) {
	for &(i, j, _) in pairs {
		components.merge(owners[i], owners[j]);
	}
}

/// Joins components whose boundaries are disjoint but where one lies inside a shape of the other.
///
/// Each component is tested once, through the first vertex of the outer loop of its smallest member.
pub fn merge_nested(components: &mut ComponentMap, shapes: &[ShapeWithHoles], index: &ShapeIndex) {
	for label in components.components() {
		let Some(&first) = components.members(label).first() else { continue };
		let Some(element) = shapes[first].shape.first() else { continue };

		for container in index.point_inside_any(element.start()) {
			if components.component_of(container) != components.component_of(first) {
				log::trace!("Shape {first} lies inside shape {container}");
				components.merge(first, container);
			}
		}
	}
}
