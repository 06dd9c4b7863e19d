use std::collections::HashSet;

use crate::atlas::{AtlasEvent, GraphNode, Position, RenderFrame};

pub const HIT_MARGIN: f64 = 4.0;
/// Screen pixels a press may travel and still count as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub preview: Position,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Shift-drag from a node draws a pending connection.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	pub source: Option<String>,
	pub cursor: Position,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<String>,
	pub neighbors: HashSet<String>,
	pub highlight_t: f64,
}

pub struct MapState {
	pub frame: RenderFrame,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: ConnectState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	fitted: bool,
}

impl MapState {
	pub fn new(frame: RenderFrame, width: f64, height: f64) -> Self {
		let mut state = Self {
			frame: RenderFrame::default(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			fitted: false,
		};
		state.set_frame(frame);
		state
	}

	/// Swap in a new frame. The first non-empty frame is fitted to the view.
	pub fn set_frame(&mut self, frame: RenderFrame) {
		self.frame = frame;
		if let Some(id) = &self.drag.node_id {
			if self.node(id).is_none() {
				self.drag = DragState::default();
			}
		}
		let hovered = self.hover.node.take();
		let hovered = hovered.filter(|id| self.node(id).is_some());
		self.hover.neighbors.clear();
		self.set_hover(hovered);
		if !self.fitted && !self.frame.nodes.is_empty() {
			self.fit_view();
			self.fitted = true;
		}
	}

	pub fn fit_view(&mut self) {
		let Some(first) = self.frame.nodes.first() else {
			return;
		};
		let (mut min_x, mut min_y) = (first.position.x, first.position.y);
		let (mut max_x, mut max_y) = (min_x, min_y);
		for node in &self.frame.nodes {
			min_x = min_x.min(node.position.x - node.radius);
			min_y = min_y.min(node.position.y - node.radius);
			max_x = max_x.max(node.position.x + node.radius);
			max_y = max_y.max(node.position.y + node.radius);
		}
		let padding = 60.0;
		let (w, h) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let k = ((self.width - padding) / w)
			.min((self.height - padding) / h)
			.clamp(0.1, 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + w / 2.0) * k,
			y: self.height / 2.0 - (min_y + h / 2.0) * k,
			k,
		};
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.frame.nodes.iter().find(|n| n.id == id)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the cursor. Later nodes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.screen_to_graph(sx, sy);
		self.frame
			.nodes
			.iter()
			.rev()
			.find(|node| {
				let (dx, dy) = (node.position.x - p.x, node.position.y - p.y);
				(dx * dx + dy * dy).sqrt() < node.radius + HIT_MARGIN
			})
			.map(|node| node.id.clone())
	}

	/// Where a node is drawn this frame, including an uncommitted drag.
	pub fn display_position(&self, node: &GraphNode) -> Position {
		match &self.drag.node_id {
			Some(dragged) if *dragged == node.id && self.drag.moved => self.drag.preview,
			_ => node.position,
		}
	}

	pub fn press(&mut self, sx: f64, sy: f64, shift: bool) {
		match self.node_at_position(sx, sy) {
			Some(id) if shift => {
				self.connect.source = Some(id);
				self.connect.cursor = self.screen_to_graph(sx, sy);
			}
			Some(id) => {
				let start = self.node(&id).map(|n| n.position).unwrap_or_default();
				self.drag = DragState {
					node_id: Some(id),
					start_x: sx,
					start_y: sy,
					node_start: start,
					preview: start,
					moved: false,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.node_id.is_none() {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}

		if self.connect.source.is_some() {
			self.connect.cursor = self.screen_to_graph(sx, sy);
		} else if self.drag.node_id.is_some() {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
				self.drag.moved = true;
			}
			self.drag.preview = Position::new(
				self.drag.node_start.x + dx / self.transform.k,
				self.drag.node_start.y + dy / self.transform.k,
			);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// End the current gesture and report what it meant.
	pub fn release(&mut self, sx: f64, sy: f64) -> Option<AtlasEvent> {
		self.pan.active = false;

		if let Some(source) = self.connect.source.take() {
			return self
				.node_at_position(sx, sy)
				.map(|target| AtlasEvent::EdgeAdded { source, target });
		}

		let drag = std::mem::take(&mut self.drag);
		let id = drag.node_id?;
		if drag.moved {
			let position = drag.preview;
			// Keep the dropped position until the next frame confirms it.
			if let Some(node) = self.frame.nodes.iter_mut().find(|n| n.id == id) {
				node.position = position;
			}
			Some(AtlasEvent::NodeMoved { id, position })
		} else {
			Some(AtlasEvent::NodeClicked(id))
		}
	}

	pub fn cancel(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.connect.source = None;
		self.set_hover(None);
	}

	/// Nodes a delete key press should remove: the selected nodes still on
	/// the map, or else the hovered node.
	pub fn deletion_targets(&self) -> Vec<String> {
		let selected: Vec<String> = self
			.frame
			.nodes
			.iter()
			.filter(|n| self.frame.selection.contains(&n.id))
			.map(|n| n.id.clone())
			.collect();
		if !selected.is_empty() {
			return selected;
		}
		self.hover.node.iter().cloned().collect()
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		if self.hover.node == node {
			return;
		}
		self.hover.neighbors.clear();
		if let Some(id) = &node {
			for edge in &self.frame.edges {
				if &edge.source == id {
					self.hover.neighbors.insert(edge.target.clone());
				} else if &edge.target == id {
					self.hover.neighbors.insert(edge.source.clone());
				}
			}
		}
		self.hover.node = node;
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.hover.node.as_deref() == Some(id)
	}

	pub fn is_highlighted(&self, id: &str) -> bool {
		self.is_hovered(id) || self.hover.neighbors.contains(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.highlight_t > 0.0
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 6.0 * dt;
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn zoom(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}
