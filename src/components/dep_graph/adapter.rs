//! Output boundary toward the rendering collaborator.
//!
//! The simulation never touches a drawing surface; it snapshots positions
//! into a [`Frame`] once per tick and hands it to whatever [`RenderAdapter`]
//! the host wired up.

/// Per-tick view of one node.
#[derive(Clone, Copy, Debug)]
pub struct NodeSprite<'a> {
	/// Entity name, doubles as the on-canvas label.
	pub name: &'a str,
	/// World-space x position.
	pub x: f64,
	/// World-space y position.
	pub y: f64,
	/// Dependency-only targets carry a different visual weight.
	pub is_dependency_target: bool,
	/// Navigation path when the node has a detail page.
	pub detail_url: Option<&'a str>,
}

/// Per-tick view of one edge, endpoints resolved to current positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
	/// Source endpoint x.
	pub x1: f64,
	/// Source endpoint y.
	pub y1: f64,
	/// Target endpoint x.
	pub x2: f64,
	/// Target endpoint y.
	pub y2: f64,
}

/// One tick's worth of drawable state.
#[derive(Clone, Debug, Default)]
pub struct Frame<'a> {
	/// All nodes with their current positions.
	pub nodes: Vec<NodeSprite<'a>>,
	/// All edges with endpoint positions resolved.
	pub edges: Vec<EdgeSegment>,
}

/// Consumes frames and draws them.
///
/// Implementations pick the technology; the host calls this once per
/// animation frame with the latest simulation output.
pub trait RenderAdapter {
	/// Draw one frame.
	fn render_frame(&mut self, frame: &Frame<'_>);
}
