//! Live node/edge collections behind the research map.
//!
//! Two writers feed this state. Upstream, a fresh projection replaces
//! everything. Downstream, the canvas reports small edits (drag, delete,
//! connect) that patch the live collections until the next replacement.

use super::graph::{EdgeKind, Graph, GraphEdge, GraphNode, Position};
use crate::error::GraphEditError;

/// One interactive edit reported by the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphChange {
	/// A node was dragged to a new position.
	NodeMoved {
		/// Node id.
		id: String,
		/// New position in graph space.
		position: Position,
	},
	/// Nodes were deleted. Incident edges go with them.
	NodesRemoved(Vec<String>),
	/// A node was created on the canvas.
	NodeAdded(GraphNode),
	/// The user connected two nodes.
	EdgeAdded {
		/// Source node id.
		source: String,
		/// Target node id.
		target: String,
	},
	/// Edges were deleted.
	EdgesRemoved(Vec<String>),
}

/// Owner of the live graph.
#[derive(Clone, Debug, Default)]
pub struct GraphViewState {
	graph: Graph,
	/// Next suffix for user-drawn edge ids. Never reset, so `link-<n>`
	/// ids stay unique across replacements.
	next_link: u64,
}

impl GraphViewState {
	/// Empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Swap in a fresh projection, discarding any interactive edits.
	pub fn replace(&mut self, graph: Graph) {
		debug_assert!(graph.has_unique_node_ids(), "projection produced duplicate node ids");
		debug_assert!(
			graph.dangling_edges().next().is_none(),
			"projection produced dangling edges"
		);
		log::debug!(
			"Replacing view-state with {} nodes and {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		self.graph = graph;
	}

	/// Apply one edit. On error nothing changes.
	pub fn apply(&mut self, change: GraphChange) -> Result<(), GraphEditError> {
		match change {
			GraphChange::NodeMoved { id, position } => {
				let node = self
					.graph
					.nodes
					.iter_mut()
					.find(|n| n.id == id)
					.ok_or(GraphEditError::UnknownNode(id))?;
				node.position = position;
			}
			GraphChange::NodesRemoved(ids) => {
				self.graph.nodes.retain(|n| !ids.contains(&n.id));
				self.graph
					.edges
					.retain(|e| !ids.iter().any(|id| e.touches(id)));
			}
			GraphChange::NodeAdded(node) => {
				if self.graph.contains_node(&node.id) {
					return Err(GraphEditError::DuplicateNode(node.id));
				}
				self.graph.nodes.push(node);
			}
			GraphChange::EdgeAdded { source, target } => {
				self.connect(source, target)?;
			}
			GraphChange::EdgesRemoved(ids) => {
				self.graph.edges.retain(|e| !ids.contains(&e.id));
			}
		}
		Ok(())
	}

	/// Apply a change-set in order. Rejected changes are logged and
	/// skipped; returns how many were applied.
	pub fn apply_all(&mut self, changes: impl IntoIterator<Item = GraphChange>) -> usize {
		let mut applied = 0;
		for change in changes {
			match self.apply(change) {
				Ok(()) => applied += 1,
				Err(err) => log::warn!("Dropped graph edit: {err}"),
			}
		}
		applied
	}

	fn connect(&mut self, source: String, target: String) -> Result<(), GraphEditError> {
		for id in [&source, &target] {
			if !self.graph.contains_node(id) {
				return Err(GraphEditError::UnknownNode(id.clone()));
			}
		}
		if source == target {
			return Err(GraphEditError::SelfLoop(source));
		}
		if self
			.graph
			.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
		{
			return Err(GraphEditError::DuplicateEdge {
				from: source,
				to: target,
			});
		}
		let id = self.next_link_id();
		self.graph.edges.push(GraphEdge {
			id,
			source,
			target,
			kind: EdgeKind::Link,
		});
		Ok(())
	}

	fn next_link_id(&mut self) -> String {
		loop {
			let id = format!("link-{}", self.next_link);
			self.next_link += 1;
			if !self.graph.edges.iter().any(|e| e.id == id) {
				return id;
			}
		}
	}

	/// Immutable copy of the live graph.
	pub fn snapshot(&self) -> Graph {
		self.graph.clone()
	}

	/// Live nodes.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.graph.nodes
	}

	/// Live edges.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.graph.edges
	}

	/// Find a live node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.graph.node(id)
	}
}
