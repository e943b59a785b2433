//! Dependency graph construction.
//!
//! Transforms flat records into an arena of uniquely named nodes plus a list
//! of directed index edges, the shape the simulation and renderer both
//! traverse. Names referenced only inside dependency lists still get an
//! arena entry; names backed by a record of their own also get a detail URL.

use std::collections::HashMap;

use serde_json::Value;

use super::error::DataShapeError;
use super::types::DependencyRecord;

/// Base path detail URLs are built from.
const DETAIL_BASE_PATH: &str = "/assessment/";

/// One graph vertex.
///
/// Position, velocity, and the pin override are owned by the simulation;
/// the builder leaves them zeroed.
#[derive(Clone, Debug)]
pub struct GraphNode {
	/// Unique entity name, stable across rebuilds.
	pub name: String,
	/// True when at least one edge points at this node.
	pub is_dependency_target: bool,
	/// Detail page path, present only for nodes backed by a record.
	pub detail_url: Option<String>,
	/// Current x position.
	pub x: f64,
	/// Current y position.
	pub y: f64,
	/// Current x velocity.
	pub vx: f64,
	/// Current y velocity.
	pub vy: f64,
	/// Pinned x coordinate, set while the node is dragged.
	pub fx: Option<f64>,
	/// Pinned y coordinate, set while the node is dragged.
	pub fy: Option<f64>,
}

impl GraphNode {
	fn named(name: &str) -> Self {
		Self {
			name: name.to_string(),
			is_dependency_target: false,
			detail_url: None,
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
		}
	}
}

/// Directed edge between arena indices, dependent → dependency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Arena index of the depending node.
	pub source: usize,
	/// Arena index of the depended-upon node.
	pub target: usize,
}

/// Node arena plus directed edges, ready for simulation.
#[derive(Clone, Debug)]
pub struct DependencyGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
}

impl DependencyGraph {
	/// Build from loosely typed JSON values, validating each record's shape.
	///
	/// All-or-nothing: the first malformed record aborts the build.
	pub fn from_json(values: &[Value]) -> Result<Self, DataShapeError> {
		let records = values
			.iter()
			.enumerate()
			.map(|(i, value)| DependencyRecord::from_value(i, value))
			.collect::<Result<Vec<_>, _>>()?;
		Self::from_records(&records)
	}

	/// Build from typed records.
	///
	/// One node per distinct name, whether it appears as a record's own name
	/// or inside a dependency list; one edge per `(record, dependency)` pair,
	/// multiplicity preserved.
	pub fn from_records(records: &[DependencyRecord]) -> Result<Self, DataShapeError> {
		let mut nodes: Vec<GraphNode> = Vec::new();
		let mut index: HashMap<String, usize> = HashMap::new();
		let mut edges: Vec<GraphEdge> = Vec::new();

		for record in records {
			let source = intern(&mut nodes, &mut index, &record.name);
			nodes[source].detail_url = Some(format!("{DETAIL_BASE_PATH}{}", record.name));
			for dep in &record.dependencies {
				let target = intern(&mut nodes, &mut index, dep);
				edges.push(GraphEdge { source, target });
			}
		}

		for edge in &edges {
			nodes[edge.target].is_dependency_target = true;
		}

		// Interning guarantees resolvable endpoints; a dangling edge here is
		// a builder bug and must surface, not be dropped.
		if let Some((i, _)) = edges
			.iter()
			.enumerate()
			.find(|(_, e)| e.source >= nodes.len() || e.target >= nodes.len())
		{
			return Err(DataShapeError::new(
				i,
				"edge endpoint does not resolve to a node",
			));
		}

		Ok(Self { nodes, edges })
	}

	/// Node arena, indexed by [`GraphEdge`] endpoints.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Directed edges over the arena.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub(super) fn nodes_mut(&mut self) -> &mut [GraphNode] {
		&mut self.nodes
	}

	pub(super) fn parts_mut(&mut self) -> (&mut [GraphNode], &[GraphEdge]) {
		(&mut self.nodes, &self.edges)
	}
}

fn intern(nodes: &mut Vec<GraphNode>, index: &mut HashMap<String, usize>, name: &str) -> usize {
	if let Some(&i) = index.get(name) {
		return i;
	}
	let i = nodes.len();
	nodes.push(GraphNode::named(name));
	index.insert(name.to_string(), i);
	i
}
