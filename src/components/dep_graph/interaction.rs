//! Pointer gesture handling: drag-to-pin and click-to-navigate.
//!
//! Gestures cycle FREE → DRAGGING → FREE per node. A press pins the node and
//! may re-energize the cooling simulation; releasing the pointer frees it
//! again. A gesture that never moved resolves as a tap instead; drag and
//! click are mutually exclusive.

use super::simulation::Simulation;

/// Alpha target applied while a drag is in progress.
const DRAG_ALPHA_TARGET: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default)]
struct DragState {
	node: Option<usize>,
	moved: bool,
}

/// Translates pointer gestures into simulation state changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionController {
	drag: DragState,
}

impl InteractionController {
	/// Begin dragging `node`: pin it where it stands and, if the simulation
	/// has cooled below the drag target, re-energize it.
	pub fn drag_start(&mut self, sim: &mut Simulation, node: usize) {
		if sim.alpha() < DRAG_ALPHA_TARGET {
			sim.set_alpha_target(DRAG_ALPHA_TARGET);
		}
		if let Some(n) = sim.graph().nodes().get(node) {
			let (x, y) = (n.x, n.y);
			sim.pin(node, x, y);
			self.drag = DragState {
				node: Some(node),
				moved: false,
			};
		}
	}

	/// Follow the pointer while dragging. No-op outside a gesture.
	pub fn drag_move(&mut self, sim: &mut Simulation, x: f64, y: f64) {
		let Some(node) = self.drag.node else {
			return;
		};
		self.drag.moved = true;
		sim.pin(node, x, y);
	}

	/// End the gesture: release the pin and let alpha decay freely again.
	///
	/// Returns the node as a tap candidate when the pointer never moved; a
	/// completed drag never doubles as a click.
	pub fn drag_end(&mut self, sim: &mut Simulation) -> Option<usize> {
		let state = std::mem::take(&mut self.drag);
		let node = state.node?;
		sim.unpin(node);
		sim.set_alpha_target(0.0);
		(!state.moved).then_some(node)
	}

	/// Resolve a tap on `node` to its navigation target.
	///
	/// Yields nothing for nodes without a detail page or while a drag is
	/// still active.
	pub fn click<'a>(&self, sim: &'a Simulation, node: usize) -> Option<&'a str> {
		if self.drag.node.is_some() {
			return None;
		}
		sim.graph().nodes().get(node)?.detail_url.as_deref()
	}

	/// Whether a drag gesture is in progress.
	pub fn dragging(&self) -> bool {
		self.drag.node.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::super::graph::DependencyGraph;
	use super::super::types::DependencyRecord;
	use super::*;

	fn sim() -> Simulation {
		let records = [
			DependencyRecord {
				name: "A".to_string(),
				dependencies: vec!["B".to_string()],
			},
			DependencyRecord {
				name: "B".to_string(),
				dependencies: vec![],
			},
		];
		Simulation::new(DependencyGraph::from_records(&records).unwrap())
	}

	#[test]
	fn press_pins_at_current_position() {
		let mut sim = sim();
		let mut ctrl = InteractionController::default();
		let (x, y) = {
			let n = &sim.graph().nodes()[0];
			(n.x, n.y)
		};

		ctrl.drag_start(&mut sim, 0);
		assert!(ctrl.dragging());
		assert_eq!(sim.graph().nodes()[0].fx, Some(x));
		assert_eq!(sim.graph().nodes()[0].fy, Some(y));
	}

	#[test]
	fn press_reheats_a_cooled_simulation() {
		let mut sim = sim();
		let mut ctrl = InteractionController::default();
		while sim.step() {}
		assert!(!sim.step());

		ctrl.drag_start(&mut sim, 0);
		assert!(sim.step(), "drag start should resume ticking");
	}

	#[test]
	fn dragged_node_follows_the_pointer_exactly() {
		let mut sim = sim();
		let mut ctrl = InteractionController::default();

		ctrl.drag_start(&mut sim, 0);
		ctrl.drag_move(&mut sim, 33.0, -8.0);
		for _ in 0..5 {
			sim.step();
			let n = &sim.graph().nodes()[0];
			assert_eq!((n.x, n.y), (33.0, -8.0));
		}
	}

	#[test]
	fn release_frees_the_node_and_drops_the_target() {
		let mut sim = sim();
		let mut ctrl = InteractionController::default();

		ctrl.drag_start(&mut sim, 0);
		ctrl.drag_move(&mut sim, 10.0, 10.0);
		let tap = ctrl.drag_end(&mut sim);

		assert_eq!(tap, None, "a moved gesture is a drag, not a click");
		assert!(!ctrl.dragging());
		assert_eq!(sim.graph().nodes()[0].fx, None);
		assert_eq!(sim.graph().nodes()[0].fy, None);
	}

	#[test]
	fn moveless_gesture_resolves_as_tap() {
		let mut sim = sim();
		let mut ctrl = InteractionController::default();

		ctrl.drag_start(&mut sim, 0);
		assert_eq!(ctrl.drag_end(&mut sim), Some(0));
	}

	#[test]
	fn click_yields_detail_url_only_when_present() {
		let mut sim = sim();
		let mut ctrl = InteractionController::default();

		assert_eq!(ctrl.click(&sim, 0), Some("/assessment/A"));
		// B exists, so it is navigable too; a node index out of range is not.
		assert_eq!(ctrl.click(&sim, 1), Some("/assessment/B"));
		assert_eq!(ctrl.click(&sim, 99), None);

		ctrl.drag_start(&mut sim, 0);
		assert_eq!(ctrl.click(&sim, 0), None, "no navigation mid-drag");
	}
}
