//! Session-wide research-map state: the uploaded corpus, the live graph and
//! the selection, with one entry point for canvas events.

use serde::Serialize;

use super::document::{DocumentRecord, UploadOutcome};
use super::graph::{GraphEdge, GraphNode, Position};
use super::layout::LayoutStrategy;
use super::projector::project_with;
use super::selection::SelectionSet;
use super::view_state::{GraphChange, GraphViewState};
use crate::error::GraphEditError;

/// Interaction reported by the render surface.
#[derive(Clone, Debug, PartialEq)]
pub enum AtlasEvent {
	/// A node was dropped at a new position.
	NodeMoved {
		/// Node id.
		id: String,
		/// Drop position in graph space.
		position: Position,
	},
	/// Nodes were deleted.
	NodesRemoved(Vec<String>),
	/// Two nodes were connected.
	EdgeAdded {
		/// Source node id.
		source: String,
		/// Target node id.
		target: String,
	},
	/// A node was clicked.
	NodeClicked(String),
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderFrame {
	/// Live nodes.
	pub nodes: Vec<GraphNode>,
	/// Live edges.
	pub edges: Vec<GraphEdge>,
	/// Selected node ids, possibly including removed nodes.
	pub selection: SelectionSet,
}

/// Owner of the corpus, view-state and selection for one browser session.
#[derive(Clone, Debug, Default)]
pub struct AtlasSession {
	documents: Vec<DocumentRecord>,
	view: GraphViewState,
	selection: SelectionSet,
	layout: LayoutStrategy,
	query: String,
}

impl AtlasSession {
	/// Empty session with the indexed layout.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty session using `layout` for every projection.
	pub fn with_layout(layout: LayoutStrategy) -> Self {
		Self {
			layout,
			..Self::default()
		}
	}

	/// Record a finished upload and re-project the corpus.
	pub fn add_document(
		&mut self,
		file_name: impl Into<String>,
		byte_size: u64,
		outcome: UploadOutcome,
	) -> &DocumentRecord {
		let index = self.documents.len();
		let record = DocumentRecord::from_upload(index, file_name, byte_size, outcome);
		self.ingest(record)
	}

	/// Append a prebuilt record (its id is reassigned to the upload index)
	/// and re-project the corpus.
	pub fn ingest(&mut self, mut record: DocumentRecord) -> &DocumentRecord {
		record.id = self.documents.len().to_string();
		log::info!("Ingested document {} ({})", record.id, record.title);
		self.documents.push(record);
		self.resync();
		&self.documents[self.documents.len() - 1]
	}

	fn resync(&mut self) {
		self.view.replace(project_with(&self.documents, &self.layout));
	}

	/// Route a canvas event. Clicks only touch the selection; everything
	/// else patches the live graph.
	pub fn handle(&mut self, event: AtlasEvent) -> Result<(), GraphEditError> {
		let change = match event {
			AtlasEvent::NodeClicked(id) => {
				self.selection.toggle(&id);
				return Ok(());
			}
			AtlasEvent::NodeMoved { id, position } => GraphChange::NodeMoved { id, position },
			AtlasEvent::NodesRemoved(ids) => GraphChange::NodesRemoved(ids),
			AtlasEvent::EdgeAdded { source, target } => GraphChange::EdgeAdded { source, target },
		};
		self.view.apply(change)
	}

	/// Accept a search query. Queries do not filter the map yet.
	pub fn search(&mut self, query: &str) {
		log::debug!("Search query: {query:?}");
		self.query = query.to_string();
	}

	/// Last query passed to [`AtlasSession::search`].
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Deselect everything.
	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Snapshot for the renderer.
	pub fn frame(&self) -> RenderFrame {
		RenderFrame {
			nodes: self.view.nodes().to_vec(),
			edges: self.view.edges().to_vec(),
			selection: self.selection.clone(),
		}
	}

	/// Uploaded documents in upload order.
	pub fn documents(&self) -> &[DocumentRecord] {
		&self.documents
	}

	/// Current selection.
	pub fn selection(&self) -> &SelectionSet {
		&self.selection
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atlas::document::SectionRecord;
	use crate::atlas::graph::NodeKind;
	use crate::atlas::projector::project;
	use crate::error::UploadError;

	fn completed(summary: &str) -> UploadOutcome {
		UploadOutcome::Completed {
			summary: Some(summary.into()),
		}
	}

	#[test]
	fn uploads_append_documents_in_order() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 10, completed("first"));
		session.add_document("b.pdf", 20, completed("second"));

		let frame = session.frame();
		let ids: Vec<_> = frame.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["doc-0", "doc-1"]);
		assert_eq!(frame.nodes[1].position, Position::new(300.0, 100.0));
		assert_eq!(session.documents()[1].id, "1");
	}

	#[test]
	fn failed_upload_still_renders_a_node() {
		let mut session = AtlasSession::new();
		let record = session.add_document("paper.pdf", 1, UploadError::Status(500).into());
		assert!(record.summary.contains("500"));

		let frame = session.frame();
		assert_eq!(frame.nodes.len(), 1);
		assert_eq!(frame.nodes[0].kind, NodeKind::Document);
		assert!(frame.edges.is_empty());
	}

	#[test]
	fn clicks_route_to_selection_only() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 1, completed("a"));
		let graph_before = (session.frame().nodes, session.frame().edges);

		assert!(session.frame().selection.is_empty());
		session.handle(AtlasEvent::NodeClicked("doc-0".into())).unwrap();
		assert!(session.selection().contains("doc-0"));
		assert_eq!(session.selection().len(), 1);
		session.handle(AtlasEvent::NodeClicked("doc-0".into())).unwrap();
		assert!(session.selection().is_empty());

		assert_eq!((session.frame().nodes, session.frame().edges), graph_before);
	}

	#[test]
	fn selection_survives_node_removal() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 1, completed("a"));
		session.handle(AtlasEvent::NodeClicked("doc-0".into())).unwrap();
		session
			.handle(AtlasEvent::NodesRemoved(vec!["doc-0".into()]))
			.unwrap();

		let frame = session.frame();
		assert!(frame.nodes.is_empty());
		assert!(frame.selection.contains("doc-0"));

		session.clear_selection();
		assert!(session.selection().is_empty());
	}

	#[test]
	fn new_upload_discards_pending_edits() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 1, completed("a"));
		session
			.handle(AtlasEvent::NodeMoved {
				id: "doc-0".into(),
				position: Position::new(5.0, 5.0),
			})
			.unwrap();
		session.add_document("b.pdf", 1, completed("b"));

		let expected = project(session.documents());
		let frame = session.frame();
		assert_eq!(frame.nodes, expected.nodes);
		assert_eq!(frame.edges, expected.edges);
	}

	#[test]
	fn rejected_connect_is_reported() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 1, completed("a"));
		let result = session.handle(AtlasEvent::EdgeAdded {
			source: "doc-0".into(),
			target: "doc-1".into(),
		});
		assert_eq!(result, Err(GraphEditError::UnknownNode("doc-1".into())));
		assert!(session.frame().edges.is_empty());
	}

	#[test]
	fn ingest_reassigns_ids_and_projects_sections() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 1, completed("a"));
		let sections = ["Intro", "Results"]
			.iter()
			.enumerate()
			.map(|(j, t)| SectionRecord {
				id: j.to_string(),
				title: t.to_string(),
				content: String::new(),
				embedding: None,
			})
			.collect();
		let record = session.ingest(DocumentRecord {
			id: "ignored".into(),
			title: "b.pdf".into(),
			summary: "b".into(),
			byte_size: 0,
			sections,
		});
		assert_eq!(record.id, "1");
		let frame = session.frame();
		assert!(frame.nodes.iter().any(|n| n.id == "section-1-1"));
		assert_eq!(frame.edges.len(), 2);
	}

	#[test]
	fn search_is_accepted_without_effect() {
		let mut session = AtlasSession::new();
		session.add_document("a.pdf", 1, completed("a"));
		let before = session.frame();
		session.search("maps");
		assert_eq!(session.query(), "maps");
		assert_eq!(session.frame(), before);
	}
}
