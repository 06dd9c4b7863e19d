//! Optional force-directed relaxation of a projected graph.
//!
//! The simulation runs a fixed number of steps with a fixed time step and
//! no randomness, so a relaxed projection stays deterministic. Document
//! nodes are anchored at their indexed positions and keep upload order.

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use serde::{Deserialize, Serialize};

use super::graph::{Graph, NodeKind};

const STEP: f32 = 0.016;

/// How node positions are computed after projection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutStrategy {
	/// Positions follow document and section indices.
	#[default]
	Indexed,
	/// Indexed positions relaxed by `iterations` force-directed steps.
	Relaxed {
		/// Number of simulation steps.
		iterations: u32,
	},
}

/// Rewrite node positions according to `strategy`.
pub fn apply(graph: &mut Graph, strategy: &LayoutStrategy) {
	match strategy {
		LayoutStrategy::Indexed => {}
		LayoutStrategy::Relaxed { iterations } => relax(graph, *iterations),
	}
}

fn relax(graph: &mut Graph, iterations: u32) {
	if graph.nodes.is_empty() || iterations == 0 {
		return;
	}

	let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});

	let mut indices = Vec::with_capacity(graph.nodes.len());
	for (i, node) in graph.nodes.iter().enumerate() {
		let idx = sim.add_node(NodeData {
			x: node.position.x as f32,
			y: node.position.y as f32,
			mass: node.radius as f32 / 2.0,
			is_anchor: node.kind == NodeKind::Document,
			user_data: i,
		});
		indices.push((node.id.as_str(), idx));
	}

	for edge in &graph.edges {
		let find = |id: &str| indices.iter().find(|(n, _)| *n == id).map(|(_, idx)| *idx);
		if let (Some(src), Some(tgt)) = (find(&edge.source), find(&edge.target)) {
			sim.add_edge(src, tgt, EdgeData::default());
		}
	}

	for _ in 0..iterations {
		sim.update(STEP);
	}

	let mut relaxed = vec![None; graph.nodes.len()];
	sim.visit_nodes(|node| {
		relaxed[node.data.user_data] = Some((node.x() as f64, node.y() as f64));
	});
	for (node, pos) in graph.nodes.iter_mut().zip(relaxed) {
		if let Some((x, y)) = pos {
			node.position.x = x;
			node.position.y = y;
		}
	}
	log::debug!("Relaxed {} nodes over {iterations} steps", graph.nodes.len());
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atlas::document::{DocumentRecord, SectionRecord};
	use crate::atlas::projector::project;

	fn corpus() -> Vec<DocumentRecord> {
		let sections = ["Intro", "Methods", "Results"]
			.iter()
			.enumerate()
			.map(|(j, t)| SectionRecord {
				id: j.to_string(),
				title: t.to_string(),
				content: String::new(),
				embedding: None,
			})
			.collect::<Vec<_>>();
		vec![
			DocumentRecord {
				id: "0".into(),
				title: "A".into(),
				summary: "a".into(),
				byte_size: 0,
				sections: sections.clone(),
			},
			DocumentRecord {
				id: "1".into(),
				title: "B".into(),
				summary: "b".into(),
				byte_size: 0,
				sections,
			},
		]
	}

	#[test]
	fn relaxed_layout_is_deterministic() {
		let strategy = LayoutStrategy::Relaxed { iterations: 50 };
		let mut first = project(&corpus());
		let mut second = project(&corpus());
		apply(&mut first, &strategy);
		apply(&mut second, &strategy);
		assert_eq!(first, second);
	}

	#[test]
	fn relaxed_layout_keeps_ids_edges_and_document_anchors() {
		let indexed = project(&corpus());
		let mut relaxed = indexed.clone();
		apply(&mut relaxed, &LayoutStrategy::Relaxed { iterations: 50 });

		assert_eq!(relaxed.edges, indexed.edges);
		for (before, after) in indexed.nodes.iter().zip(&relaxed.nodes) {
			assert_eq!(before.id, after.id);
			if before.kind == NodeKind::Document {
				assert_eq!(before.position, after.position);
			}
		}
	}

	#[test]
	fn zero_iterations_leave_positions_alone() {
		let indexed = project(&corpus());
		let mut relaxed = indexed.clone();
		apply(&mut relaxed, &LayoutStrategy::Relaxed { iterations: 0 });
		assert_eq!(relaxed, indexed);
	}
}
