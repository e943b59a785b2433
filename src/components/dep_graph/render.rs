//! Canvas rendering for the dependency graph.
//!
//! One pass for edges, one for nodes, one for labels. Frames arrive in
//! world space with the origin at the canvas center; this renderer owns the
//! translation and nothing else about the coordinate system.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::adapter::{Frame, RenderAdapter};

const BACKGROUND_FILL: &str = "#10141a";
const EDGE_STROKE: &str = "rgba(144, 164, 174, 0.45)";
/// Fill for nodes backed by an assessment record.
const RECORD_FILL: &str = "#1976d2";
/// Fill for nodes that only ever appear as a dependency of something else.
const TARGET_FILL: &str = "#c62828";
const LABEL_FILL: &str = "rgba(255, 255, 255, 0.85)";
const LABEL_FONT: &str = "11px sans-serif";
const EDGE_WIDTH: f64 = 1.5;

/// On-canvas node radius, also used by the host for cursor affordance.
pub const NODE_RADIUS: f64 = 6.0;

/// Draws frames onto a 2d canvas context.
pub struct CanvasRenderer {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl CanvasRenderer {
	/// Wrap an acquired 2d context with its drawing dimensions.
	pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
		Self { ctx, width, height }
	}
}

impl RenderAdapter for CanvasRenderer {
	fn render_frame(&mut self, frame: &Frame<'_>) {
		let ctx = &self.ctx;

		ctx.set_fill_style_str(BACKGROUND_FILL);
		ctx.fill_rect(0.0, 0.0, self.width, self.height);

		ctx.save();
		let _ = ctx.translate(self.width / 2.0, self.height / 2.0);

		ctx.set_stroke_style_str(EDGE_STROKE);
		ctx.set_line_width(EDGE_WIDTH);
		for edge in &frame.edges {
			ctx.begin_path();
			ctx.move_to(edge.x1, edge.y1);
			ctx.line_to(edge.x2, edge.y2);
			ctx.stroke();
		}

		for node in &frame.nodes {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(if node.is_dependency_target {
				TARGET_FILL
			} else {
				RECORD_FILL
			});
			ctx.fill();
		}

		ctx.set_fill_style_str(LABEL_FILL);
		ctx.set_font(LABEL_FONT);
		for node in &frame.nodes {
			let _ = ctx.fill_text(node.name, node.x + NODE_RADIUS + 4.0, node.y + 3.0);
		}

		ctx.restore();
	}
}
