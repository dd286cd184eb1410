use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BooleanError {
	/// A face walk did not close. The arrangement of the component has no consistent closed walk from `element`,
	/// typically because an intersection was missed or an input loop is not closed.
	#[error("Degenerate arrangement in component {component}: the trace starting at split element {element} did not close after {steps} steps")]
	DegenerateArrangement { component: usize, element: usize, steps: usize },
}
