use crate::point::{Point, cmp_points, points_equal};
use crate::split::SplittedElement;
use smallvec::SmallVec;

/// The split element with the same id, seen as an arc of the graph between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphArc {
	pub source: usize,
	pub target: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub point: Point,
	/// Ids of the elements leaving this node, ascending.
	pub successors: SmallVec<[usize; 4]>,
}

/// Adjacency of the split elements of one component. Nodes are coincident endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanarGraph {
	pub arcs: Vec<GraphArc>,
	pub nodes: Vec<GraphNode>,
}

impl PlanarGraph {
	pub fn successors_of_end(&self, element: usize) -> &[usize] {
		&self.nodes[self.arcs[element].target].successors
	}
}

pub fn build_graph(elements: &[SplittedElement], eps: f64) -> PlanarGraph {
	let mut markers: Vec<(Point, usize, bool)> = Vec::with_capacity(elements.len() * 2);
	for (id, element) in elements.iter().enumerate() {
		markers.push((element.element.start(), id, true));
		markers.push((element.element.end(), id, false));
	}
	markers.sort_by(|a, b| cmp_points(a.0, b.0).then(a.1.cmp(&b.1)).then(b.2.cmp(&a.2)));

	let mut graph = PlanarGraph {
		arcs: vec![GraphArc { source: 0, target: 0 }; elements.len()],
		nodes: Vec::new(),
	};
	for (point, id, is_start) in markers {
		if graph.nodes.last().is_none_or(|node| !points_equal(node.point, point, eps)) {
			graph.nodes.push(GraphNode { point, successors: SmallVec::new() });
		}
		let node = graph.nodes.len() - 1;
		if is_start {
			graph.arcs[id].source = node;
			graph.nodes[node].successors.push(id);
		} else {
			graph.arcs[id].target = node;
		}
	}

	log::trace!("Built graph with {} nodes and {} arcs", graph.nodes.len(), graph.arcs.len());
	graph
}
