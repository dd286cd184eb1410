mod aabb;
mod bit_vec;
mod boolean;
mod classify;
mod cleanup;
mod component;
mod element;
mod epsilons;
mod equalize;
mod error;
mod graph;
mod index;
mod intersection;
mod point;
mod shape;
mod split;
mod trace;

pub use aabb::Aabb;
pub use bit_vec::BitVec;
pub use boolean::{BooleanOperation, boolean_operation, compute_difference, compute_intersection, compute_symmetric_difference, compute_union};
pub use cleanup::{flatten_holes, remove_collinear_vertices, remove_duplicate_vertices};
pub use component::ComponentMap;
pub use element::{Orientation, ShapeElement, cmp_elements};
pub use epsilons::{EPS, Epsilons};
pub use equalize::{PointSlot, equalize_points};
pub use error::BooleanError;
pub use graph::{GraphArc, GraphNode, PlanarGraph, build_graph};
pub use index::{ElementIndex, ShapeIndex, representative_point};
pub use intersection::{ElementIntersections, compute_intersections};
pub use point::{Point, cmp_points, points_equal};
pub use shape::{
	Shape, ShapeVertex, ShapeWithHoles, build_shape, circle, equal, is_counter_clockwise, loops_equal, polygon, reverse_shape, shape_bounding_box, shape_is_closed, shape_vertices, signed_area,
	winding_number,
};
pub use split::{SplittedElement, dedup_elements, split_elements};
pub use trace::{Face, FaceTracer};
