//! Documents to research-map graph.
//!
//! Projection is a pure function of document order: the same input always
//! yields the same ids and bit-identical positions, so replacing the live
//! graph with a fresh projection of an unchanged corpus is a no-op.

use super::document::DocumentRecord;
use super::graph::{EdgeKind, Graph, GraphEdge, GraphNode, NodeKind, Position};
use super::layout::{self, LayoutStrategy};

const ORIGIN_X: f64 = 100.0;
const DOCUMENT_Y: f64 = 100.0;
const DOCUMENT_SPACING: f64 = 200.0;
const SECTION_SPREAD: f64 = 150.0;
const SECTION_Y: f64 = 250.0;
const SECTION_SPACING: f64 = 100.0;

/// Id of the `index`-th document node.
pub fn document_node_id(index: usize) -> String {
	format!("doc-{index}")
}

/// Id of section `section` of document `doc`.
pub fn section_node_id(doc: usize, section: usize) -> String {
	format!("section-{doc}-{section}")
}

/// Id of the edge from document `doc` to its section `section`.
pub fn section_edge_id(doc: usize, section: usize) -> String {
	format!("edge-{doc}-{section}")
}

/// Position of the `index`-th document, left to right in upload order.
pub fn document_position(index: usize) -> Position {
	Position::new(ORIGIN_X + index as f64 * DOCUMENT_SPACING, DOCUMENT_Y)
}

/// Position of section `section` fanned out below document `doc`.
pub fn section_position(doc: usize, section: usize) -> Position {
	Position::new(
		ORIGIN_X + doc as f64 * DOCUMENT_SPACING + (section as f64 - 1.0) * SECTION_SPREAD,
		SECTION_Y + section as f64 * SECTION_SPACING,
	)
}

/// Project documents with the index-based layout.
pub fn project(documents: &[DocumentRecord]) -> Graph {
	let mut graph = Graph::default();

	for (i, doc) in documents.iter().enumerate() {
		let doc_id = document_node_id(i);
		graph.nodes.push(
			GraphNode::new(doc_id.clone(), NodeKind::Document, document_position(i), &doc.title)
				.with_summary(&doc.summary),
		);

		// A lone section repeats the document summary.
		if doc.sections.len() <= 1 {
			continue;
		}

		for (j, section) in doc.sections.iter().enumerate() {
			if section.title.is_empty() || section.title == doc.title {
				continue;
			}
			let section_id = section_node_id(i, j);
			graph.nodes.push(
				GraphNode::new(
					section_id.clone(),
					NodeKind::Section,
					section_position(i, j),
					&section.title,
				)
				.with_summary(&section.content)
				.with_embedding(section.embedding.clone()),
			);
			graph.edges.push(GraphEdge {
				id: section_edge_id(i, j),
				source: doc_id.clone(),
				target: section_id,
				kind: EdgeKind::Contains,
			});
		}
	}

	log::debug!(
		"Projected {} documents into {} nodes and {} edges",
		documents.len(),
		graph.nodes.len(),
		graph.edges.len()
	);
	graph
}

/// Project documents, then apply `strategy` to the positions.
pub fn project_with(documents: &[DocumentRecord], strategy: &LayoutStrategy) -> Graph {
	let mut graph = project(documents);
	layout::apply(&mut graph, strategy);
	graph
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::atlas::document::SectionRecord;

	fn section(id: &str, title: &str) -> SectionRecord {
		SectionRecord {
			id: id.into(),
			title: title.into(),
			content: format!("{title} body"),
			embedding: None,
		}
	}

	fn doc(index: usize, title: &str, sections: Vec<SectionRecord>) -> DocumentRecord {
		DocumentRecord {
			id: index.to_string(),
			title: title.into(),
			summary: format!("{title} summary"),
			byte_size: 0,
			sections,
		}
	}

	fn node_ids(graph: &Graph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn empty_corpus_projects_empty_graph() {
		assert_eq!(project(&[]), Graph::default());
	}

	#[test]
	fn document_without_sections_is_a_single_node() {
		let graph = project(&[doc(0, "A", vec![])]);
		assert_eq!(node_ids(&graph), vec!["doc-0"]);
		assert!(graph.edges.is_empty());
		let node = &graph.nodes[0];
		assert_eq!(node.kind, NodeKind::Document);
		assert_eq!(node.position, Position::new(100.0, 100.0));
		assert_eq!(node.color, "#3b82f6");
		assert_eq!(node.radius, 20.0);
		assert_eq!(node.summary.as_deref(), Some("A summary"));
	}

	#[test]
	fn single_section_is_suppressed() {
		let graph = project(&[doc(0, "A", vec![section("s0", "Intro")])]);
		assert_eq!(node_ids(&graph), vec!["doc-0"]);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn duplicate_title_section_is_suppressed() {
		let graph = project(&[doc(0, "A", vec![section("s0", "A"), section("s1", "Intro")])]);
		assert_eq!(node_ids(&graph), vec!["doc-0", "section-0-1"]);
		assert_eq!(graph.edges.len(), 1);
		let edge = &graph.edges[0];
		assert_eq!(edge.id, "edge-0-1");
		assert_eq!(edge.source, "doc-0");
		assert_eq!(edge.target, "section-0-1");
		assert_eq!(edge.kind, EdgeKind::Contains);

		let intro = graph.node("section-0-1").unwrap();
		assert_eq!(intro.position, Position::new(100.0, 350.0));
		assert_eq!(intro.summary.as_deref(), Some("Intro body"));
		assert_eq!(intro.color, "#10b981");
		assert_eq!(intro.radius, 16.0);
	}

	#[test]
	fn empty_section_title_is_suppressed() {
		let graph = project(&[doc(0, "A", vec![section("s0", ""), section("s1", "Methods")])]);
		assert_eq!(node_ids(&graph), vec!["doc-0", "section-0-1"]);
	}

	#[test]
	fn two_documents_fan_out_their_own_sections() {
		let docs = vec![
			doc(0, "A", vec![section("a0", "Intro"), section("a1", "Results")]),
			doc(1, "B", vec![section("b0", "Background"), section("b1", "Discussion")]),
		];
		let graph = project(&docs);

		assert_eq!(
			node_ids(&graph),
			vec!["doc-0", "section-0-0", "section-0-1", "doc-1", "section-1-0", "section-1-1"]
		);
		assert_eq!(graph.node("doc-0").unwrap().position, Position::new(100.0, 100.0));
		assert_eq!(graph.node("doc-1").unwrap().position, Position::new(300.0, 100.0));
		assert_eq!(graph.node("section-0-0").unwrap().position, Position::new(-50.0, 250.0));
		assert_eq!(graph.node("section-1-1").unwrap().position, Position::new(300.0, 350.0));

		assert_eq!(graph.edges.len(), 4);
		for edge in &graph.edges {
			let doc_index = edge.source.trim_start_matches("doc-");
			assert!(edge.target.starts_with(&format!("section-{doc_index}-")));
		}
		assert_eq!(graph.dangling_edges().count(), 0);
	}

	#[test]
	fn embeddings_are_carried_through() {
		let mut with_vec = section("a1", "Results");
		with_vec.embedding = Some(vec![0.25, -1.0, 3.5]);
		let graph = project(&[doc(0, "A", vec![section("a0", "Intro"), with_vec])]);
		assert_eq!(
			graph.node("section-0-1").unwrap().embedding,
			Some(vec![0.25, -1.0, 3.5])
		);
	}

	#[test]
	fn projection_is_deterministic() {
		let docs = vec![
			doc(0, "A", vec![section("a0", "Intro"), section("a1", "Results")]),
			doc(1, "B", vec![]),
			doc(2, "C", vec![section("c0", "C"), section("c1", "Scope"), section("c2", "")]),
		];
		let first = project(&docs);
		let second = project(&docs);
		assert_eq!(first, second);
		for (a, b) in first.nodes.iter().zip(&second.nodes) {
			assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
			assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
		}
	}

	#[test]
	fn indexed_strategy_matches_plain_projection() {
		let docs = vec![doc(0, "A", vec![section("a0", "Intro"), section("a1", "Results")])];
		assert_eq!(project_with(&docs, &LayoutStrategy::Indexed), project(&docs));
	}

	fn arb_section() -> impl Strategy<Value = SectionRecord> {
		(
			prop::sample::select(vec!["", "A", "B", "Intro", "Results"]),
			"[a-z ]{0,16}",
			prop::option::of(prop::collection::vec(-1.0f32..1.0, 0..4)),
		)
			.prop_map(|(title, content, embedding)| SectionRecord {
				id: String::new(),
				title: title.to_string(),
				content,
				embedding,
			})
	}

	fn arb_corpus() -> impl Strategy<Value = Vec<DocumentRecord>> {
		prop::collection::vec(
			(
				prop::sample::select(vec!["A", "B", "C"]),
				prop::collection::vec(arb_section(), 0..4),
			),
			0..6,
		)
		.prop_map(|docs| {
			docs.into_iter()
				.enumerate()
				.map(|(i, (title, sections))| doc(i, title, sections))
				.collect()
		})
	}

	proptest! {
		#[test]
		fn any_corpus_projects_identically_twice(docs in arb_corpus()) {
			let first = project(&docs);
			let second = project(&docs);
			prop_assert_eq!(&first, &second);
			for (a, b) in first.nodes.iter().zip(&second.nodes) {
				prop_assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
				prop_assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
			}
		}

		#[test]
		fn any_corpus_projects_a_consistent_graph(docs in arb_corpus()) {
			let graph = project(&docs);
			prop_assert!(graph.has_unique_node_ids());
			prop_assert_eq!(graph.dangling_edges().count(), 0);
			let documents = graph.nodes.iter().filter(|n| n.kind == NodeKind::Document).count();
			prop_assert_eq!(documents, docs.len());
			for (i, d) in docs.iter().enumerate() {
				if d.sections.len() <= 1 {
					let prefix = format!("section-{i}-");
					prop_assert!(!graph.nodes.iter().any(|n| n.id.starts_with(&prefix)));
				}
			}
		}
	}
}
