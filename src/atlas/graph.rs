//! Node/edge data shared by the projector, the view-state and the renderer.

use serde::{Deserialize, Serialize};

/// What a node stands for. Only documents and sections are projected today;
/// concepts and keywords stay representable for future extraction passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// An uploaded document.
	Document,
	/// A section inside a document.
	Section,
	/// A concept extracted across documents.
	Concept,
	/// A keyword extracted from a section.
	Keyword,
}

impl NodeKind {
	/// Fill color used when drawing nodes of this kind.
	pub fn color(self) -> &'static str {
		match self {
			NodeKind::Document => "#3b82f6",
			NodeKind::Section => "#10b981",
			NodeKind::Concept => "#8b5cf6",
			NodeKind::Keyword => "#f97316",
		}
	}

	/// Radius in graph units.
	pub fn radius(self) -> f64 {
		match self {
			NodeKind::Document => 20.0,
			NodeKind::Section => 16.0,
			NodeKind::Concept => 18.0,
			NodeKind::Keyword => 12.0,
		}
	}
}

/// Relation carried by an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
	/// Document to one of its sections. Drawn as a smooth-step connector.
	Contains,
	/// Connection drawn by the user on the canvas.
	Link,
}

/// A point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Position {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A positioned node on the research map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique id, namespaced by kind (`doc-0`, `section-0-1`).
	pub id: String,
	/// Node kind.
	pub kind: NodeKind,
	/// Position in graph space.
	pub position: Position,
	/// Display label.
	pub label: String,
	/// Hover text.
	pub summary: Option<String>,
	/// Semantic vector, carried through untouched.
	pub embedding: Option<Vec<f32>>,
	/// Fill color.
	pub color: String,
	/// Radius in graph units.
	pub radius: f64,
}

impl GraphNode {
	/// Build a node with the kind's default color and radius.
	pub fn new(
		id: impl Into<String>,
		kind: NodeKind,
		position: Position,
		label: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			kind,
			position,
			label: label.into(),
			summary: None,
			embedding: None,
			color: kind.color().to_string(),
			radius: kind.radius(),
		}
	}

	/// Set the hover text.
	pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
		self.summary = Some(summary.into());
		self
	}

	/// Attach an embedding.
	pub fn with_embedding(mut self, embedding: Option<Vec<f32>>) -> Self {
		self.embedding = embedding;
		self
	}
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Unique id.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relation.
	pub kind: EdgeKind,
}

impl GraphEdge {
	/// Whether `node_id` is one of the endpoints.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// An immutable node/edge snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	/// Nodes in projection order.
	pub nodes: Vec<GraphNode>,
	/// Edges in projection order.
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	/// Find a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether a node with `id` exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Edges whose source or target is missing from `nodes`.
	pub fn dangling_edges(&self) -> impl Iterator<Item = &GraphEdge> {
		self.edges
			.iter()
			.filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
	}

	/// True when no node id appears twice.
	pub fn has_unique_node_ids(&self) -> bool {
		let mut seen = std::collections::HashSet::new();
		self.nodes.iter().all(|n| seen.insert(n.id.as_str()))
	}
}
