//! Iterative force-directed layout.
//!
//! Runs a d3-style simulation over the node arena: pairwise repulsion, link
//! springs toward a rest length, and a weak per-axis pull toward the origin,
//! all scaled by a decaying "alpha" energy scalar. The engine keeps no
//! scheduler of its own: the host loop advances it one [`step`] at a time,
//! which also makes it steppable synchronously in tests.
//!
//! [`step`]: Simulation::step

use std::f64::consts::TAU;

use super::adapter::{EdgeSegment, Frame, NodeSprite};
use super::graph::DependencyGraph;

/// Radius of the deterministic circle nodes are seeded on.
const SEED_RADIUS: f64 = 100.0;

/// Squared distance floor for force computation, keeps coincident nodes
/// from producing unbounded forces.
const MIN_DISTANCE_SQ: f64 = 1.0;

/// Tunable force and decay constants.
#[derive(Clone, Debug)]
pub struct SimulationParams {
	/// Pairwise charge strength; negative values repel.
	pub repulsion: f64,
	/// Rest length of the link springs, in world units.
	pub link_distance: f64,
	/// Stiffness applied to link displacement.
	pub link_strength: f64,
	/// Per-axis pull toward the origin.
	pub center_strength: f64,
	/// Alpha floor below which the simulation idles.
	pub alpha_min: f64,
	/// Per-step interpolation factor toward the alpha target.
	pub alpha_decay: f64,
	/// Fraction of velocity shed each step.
	pub velocity_decay: f64,
}

impl Default for SimulationParams {
	fn default() -> Self {
		Self {
			repulsion: -250.0,
			link_distance: 60.0,
			link_strength: 0.7,
			center_strength: 0.05,
			alpha_min: 0.001,
			// Reaches the floor in roughly 300 steps from alpha = 1.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			velocity_decay: 0.4,
		}
	}
}

/// Force simulation driving node positions.
///
/// Owns the graph for its lifetime; a rebuilt graph gets a fresh simulation.
pub struct Simulation {
	graph: DependencyGraph,
	params: SimulationParams,
	alpha: f64,
	alpha_target: f64,
}

impl Simulation {
	/// Take ownership of a freshly built graph and seed initial positions.
	pub fn new(graph: DependencyGraph) -> Self {
		Self::with_params(graph, SimulationParams::default())
	}

	/// As [`new`](Self::new), with explicit tuning.
	pub fn with_params(mut graph: DependencyGraph, params: SimulationParams) -> Self {
		let count = graph.nodes().len().max(1);
		for (i, node) in graph.nodes_mut().iter_mut().enumerate() {
			let angle = i as f64 * TAU / count as f64;
			node.x = SEED_RADIUS * angle.cos();
			node.y = SEED_RADIUS * angle.sin();
		}
		Self {
			graph,
			params,
			alpha: 1.0,
			alpha_target: 0.0,
		}
	}

	/// Borrow the underlying graph.
	pub fn graph(&self) -> &DependencyGraph {
		&self.graph
	}

	/// Current simulation heat.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Set the value alpha converges toward. Raising it above the floor
	/// re-energizes an idle simulation.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	/// Pin a node to a fixed position. Pinned nodes still exert and receive
	/// forces but skip free integration.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(node) = self.graph.nodes_mut().get_mut(index) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	/// Release a pinned node back to free movement.
	pub fn unpin(&mut self, index: usize) {
		if let Some(node) = self.graph.nodes_mut().get_mut(index) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Hit-test a world-space point against node positions. Ties go to the
	/// highest arena index, matching draw order.
	pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
		let r_sq = radius * radius;
		let mut found = None;
		for (i, node) in self.graph.nodes().iter().enumerate() {
			let (dx, dy) = (node.x - x, node.y - y);
			if dx * dx + dy * dy < r_sq {
				found = Some(i);
			}
		}
		found
	}

	/// Advance one tick.
	///
	/// Returns `false` without touching positions once alpha has decayed to
	/// the floor and nothing re-energized it.
	pub fn step(&mut self) -> bool {
		let p = &self.params;
		if self.alpha < p.alpha_min && self.alpha_target < p.alpha_min {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.apply_repulsion();
		self.apply_links();
		self.apply_centering();
		self.integrate();
		true
	}

	/// Snapshot current positions for the render adapter.
	pub fn frame(&self) -> Frame<'_> {
		let nodes = self.graph.nodes();
		Frame {
			nodes: nodes
				.iter()
				.map(|n| NodeSprite {
					name: &n.name,
					x: n.x,
					y: n.y,
					is_dependency_target: n.is_dependency_target,
					detail_url: n.detail_url.as_deref(),
				})
				.collect(),
			edges: self
				.graph
				.edges()
				.iter()
				.map(|e| EdgeSegment {
					x1: nodes[e.source].x,
					y1: nodes[e.source].y,
					x2: nodes[e.target].x,
					y2: nodes[e.target].y,
				})
				.collect(),
		}
	}

	fn apply_repulsion(&mut self) {
		let strength = self.params.repulsion * self.alpha;
		let nodes = self.graph.nodes_mut();
		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let dx = nodes[j].x - nodes[i].x;
				let dy = nodes[j].y - nodes[i].y;
				let d_sq = (dx * dx + dy * dy).max(MIN_DISTANCE_SQ);
				let f = strength / d_sq;
				nodes[i].vx += dx * f;
				nodes[i].vy += dy * f;
				nodes[j].vx -= dx * f;
				nodes[j].vy -= dy * f;
			}
		}
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		let rest = self.params.link_distance;
		let strength = self.params.link_strength;
		let (nodes, edges) = self.graph.parts_mut();
		for edge in edges {
			let dx = nodes[edge.target].x - nodes[edge.source].x;
			let dy = nodes[edge.target].y - nodes[edge.source].y;
			let d = (dx * dx + dy * dy).max(MIN_DISTANCE_SQ).sqrt();
			let f = (d - rest) / d * strength * alpha;
			// Displacement split evenly between the two endpoints.
			let (fx, fy) = (dx * f * 0.5, dy * f * 0.5);
			nodes[edge.target].vx -= fx;
			nodes[edge.target].vy -= fy;
			nodes[edge.source].vx += fx;
			nodes[edge.source].vy += fy;
		}
	}

	fn apply_centering(&mut self) {
		let pull = self.params.center_strength * self.alpha;
		for node in self.graph.nodes_mut() {
			node.vx -= node.x * pull;
			node.vy -= node.y * pull;
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.params.velocity_decay;
		for node in self.graph.nodes_mut() {
			if let (Some(fx), Some(fy)) = (node.fx, node.fy) {
				node.x = fx;
				node.y = fy;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= keep;
			node.vy *= keep;
			node.x += node.vx;
			node.y += node.vy;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::DependencyRecord;
	use super::*;

	fn record(name: &str, deps: &[&str]) -> DependencyRecord {
		DependencyRecord {
			name: name.to_string(),
			dependencies: deps.iter().map(|d| d.to_string()).collect(),
		}
	}

	fn sim(records: &[DependencyRecord]) -> Simulation {
		Simulation::new(DependencyGraph::from_records(records).unwrap())
	}

	fn distance(sim: &Simulation, a: usize, b: usize) -> f64 {
		let nodes = sim.graph().nodes();
		let (dx, dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
		(dx * dx + dy * dy).sqrt()
	}

	#[test]
	fn alpha_decays_monotonically_to_the_floor() {
		let mut sim = sim(&[record("A", &["B"]), record("B", &[])]);
		let mut previous = sim.alpha();
		let mut steps = 0;
		while sim.step() {
			assert!(sim.alpha() <= previous, "alpha rose without re-energizing");
			previous = sim.alpha();
			steps += 1;
			assert!(steps < 400, "alpha never reached the floor");
		}
		assert!(sim.alpha() < 0.001);
	}

	#[test]
	fn idle_simulation_reports_inactive() {
		let mut sim = sim(&[record("A", &[])]);
		while sim.step() {}
		assert!(!sim.step());
		assert!(!sim.step());
	}

	#[test]
	fn raising_alpha_target_reenergizes() {
		let mut sim = sim(&[record("A", &["B"]), record("B", &[])]);
		while sim.step() {}

		sim.set_alpha_target(0.3);
		assert!(sim.step());
		let early = sim.alpha();
		for _ in 0..50 {
			sim.step();
		}
		assert!(sim.alpha() > early, "alpha should climb toward the target");
	}

	#[test]
	fn unconnected_nodes_separate() {
		// Start the two nodes almost on top of each other via pinning.
		let mut sim = sim(&[record("A", &[]), record("B", &[])]);
		sim.pin(0, -2.0, 0.0);
		sim.pin(1, 2.0, 0.0);
		sim.step();
		sim.unpin(0);
		sim.unpin(1);

		let before = distance(&sim, 0, 1);
		for _ in 0..30 {
			sim.step();
		}
		assert!(distance(&sim, 0, 1) > before);
	}

	#[test]
	fn linked_nodes_pull_toward_rest_length() {
		// Push the two endpoints far apart, then let the spring act.
		let mut sim = sim(&[record("A", &["B"]), record("B", &[])]);
		{
			// Rebuild positions well past the rest length via pinning.
			sim.pin(0, -400.0, 0.0);
			sim.pin(1, 400.0, 0.0);
			sim.step();
			sim.unpin(0);
			sim.unpin(1);
		}
		let before = distance(&sim, 0, 1);
		for _ in 0..50 {
			sim.step();
		}
		assert!(distance(&sim, 0, 1) < before);
	}

	#[test]
	fn centering_keeps_the_layout_near_the_origin() {
		let mut sim = sim(&[
			record("A", &["B"]),
			record("B", &["C"]),
			record("C", &[]),
			record("D", &[]),
		]);
		for _ in 0..300 {
			sim.step();
		}
		let nodes = sim.graph().nodes();
		let cx = nodes.iter().map(|n| n.x).sum::<f64>() / nodes.len() as f64;
		let cy = nodes.iter().map(|n| n.y).sum::<f64>() / nodes.len() as f64;
		assert!(cx.abs() < 50.0, "centroid x drifted: {cx}");
		assert!(cy.abs() < 50.0, "centroid y drifted: {cy}");
	}

	#[test]
	fn pinned_node_tracks_pin_exactly() {
		let mut sim = sim(&[record("A", &["B"]), record("B", &[])]);
		sim.pin(0, 42.0, -17.0);
		for _ in 0..10 {
			sim.step();
			let node = &sim.graph().nodes()[0];
			assert_eq!(node.x, 42.0);
			assert_eq!(node.y, -17.0);
		}
	}

	#[test]
	fn unpinned_node_moves_again() {
		let mut sim = sim(&[record("A", &["B"]), record("B", &[])]);
		sim.pin(0, 42.0, -17.0);
		sim.step();
		sim.unpin(0);
		sim.set_alpha_target(0.3);
		for _ in 0..10 {
			sim.step();
		}
		let node = &sim.graph().nodes()[0];
		assert!(node.x != 42.0 || node.y != -17.0);
	}

	#[test]
	fn frame_resolves_edge_endpoints() {
		let mut sim = sim(&[record("A", &["B"]), record("B", &[])]);
		sim.step();
		let frame = sim.frame();
		assert_eq!(frame.nodes.len(), 2);
		assert_eq!(frame.edges.len(), 1);

		let edge = frame.edges[0];
		assert_eq!(edge.x1, frame.nodes[0].x);
		assert_eq!(edge.y1, frame.nodes[0].y);
		assert_eq!(edge.x2, frame.nodes[1].x);
		assert_eq!(edge.y2, frame.nodes[1].y);
	}

	#[test]
	fn frame_carries_node_metadata() {
		let sim = sim(&[record("A", &["B"]), record("B", &[])]);
		let frame = sim.frame();
		assert_eq!(frame.nodes[0].name, "A");
		assert!(!frame.nodes[0].is_dependency_target);
		assert_eq!(frame.nodes[0].detail_url, Some("/assessment/A"));
		assert!(frame.nodes[1].is_dependency_target);
	}

	#[test]
	fn hit_test_finds_nearby_node() {
		let mut sim = sim(&[record("A", &[])]);
		sim.pin(0, 10.0, 10.0);
		sim.step();
		assert_eq!(sim.node_at(12.0, 9.0, 12.0), Some(0));
		assert_eq!(sim.node_at(100.0, 100.0, 12.0), None);
	}
}
