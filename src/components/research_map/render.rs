use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::MapState;
use crate::atlas::{EdgeKind, GraphEdge, GraphNode, NodeKind, Position};

const BACKGROUND: &str = "#1a1a2e";
const SELECTED_BORDER: &str = "#f59e0b";
const BORDER: &str = "#374151";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	for edge in &state.frame.edges {
		draw_edge(state, ctx, edge);
	}
	draw_pending_connection(state, ctx);
	for node in &state.frame.nodes {
		draw_node(state, ctx, node);
	}
	if let Some(node) = state.hover.node.as_deref().and_then(|id| state.node(id)) {
		draw_tooltip(state, ctx, node);
	}
	ctx.restore();
}

fn endpoints<'a>(
	state: &'a MapState,
	edge: &GraphEdge,
) -> Option<(&'a GraphNode, &'a GraphNode)> {
	Some((state.node(&edge.source)?, state.node(&edge.target)?))
}

fn draw_edge(state: &MapState, ctx: &CanvasRenderingContext2d, edge: &GraphEdge) {
	let Some((from, to)) = endpoints(state, edge) else {
		return;
	};
	let (a, b) = (state.display_position(from), state.display_position(to));
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let highlighted = state.is_highlighted(&from.id) && state.is_highlighted(&to.id);
	let alpha = match (state.has_active_highlight(), highlighted) {
		(false, _) => 0.6,
		(true, true) => 0.6 + 0.3 * t,
		(true, false) => 0.6 - 0.45 * t,
	};

	ctx.set_line_width(1.5 / k);
	match edge.kind {
		EdgeKind::Contains => {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
			ctx.set_stroke_style_str(&format!("rgba(148, 163, 184, {alpha})"));
			// Smooth-step: down from the parent, across, down into the child.
			let (start_y, end_y) = (a.y + from.radius, b.y - to.radius);
			let mid_y = (start_y + end_y) / 2.0;
			let r = 8.0_f64.min((b.x - a.x).abs() / 2.0).min((end_y - start_y).abs() / 2.0);
			let dir = if b.x >= a.x { 1.0 } else { -1.0 };
			ctx.begin_path();
			ctx.move_to(a.x, start_y);
			if r > 0.5 {
				let _ = ctx.arc_to(a.x, mid_y, a.x + dir * r, mid_y, r);
				let _ = ctx.arc_to(b.x, mid_y, b.x, mid_y + r, r);
			} else {
				ctx.line_to(a.x, mid_y);
				ctx.line_to(b.x, mid_y);
			}
			ctx.line_to(b.x, end_y);
			ctx.stroke();
		}
		EdgeKind::Link => {
			let (dash, gap) = (8.0 / k, 4.0 / k);
			ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {alpha})"));
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(-(state.flow_time * 30.0) % (dash + gap));
			draw_arrow(ctx, a, b, from.radius, to.radius, k, alpha);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_arrow(
	ctx: &CanvasRenderingContext2d,
	a: Position,
	b: Position,
	from_radius: f64,
	to_radius: f64,
	k: f64,
	alpha: f64,
) {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let arrow_size = 8.0 / k;
	let (ux, uy) = (dx / dist, dy / dist);
	ctx.begin_path();
	ctx.move_to(a.x + ux * from_radius, a.y + uy * from_radius);
	ctx.line_to(
		b.x - ux * (to_radius + arrow_size),
		b.y - uy * (to_radius + arrow_size),
	);
	ctx.stroke();

	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", (alpha + 0.2).min(1.0)));
	let (tip_x, tip_y) = (b.x - ux * to_radius, b.y - uy * to_radius);
	let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
	let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_pending_connection(state: &MapState, ctx: &CanvasRenderingContext2d) {
	let Some(source) = state.connect.source.as_deref().and_then(|id| state.node(id)) else {
		return;
	};
	let k = state.transform.k;
	ctx.set_stroke_style_str("rgba(245, 158, 11, 0.8)");
	ctx.set_line_width(1.5 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(4.0 / k),
		&JsValue::from_f64(4.0 / k),
	));
	draw_arrow(
		ctx,
		state.display_position(source),
		state.connect.cursor,
		source.radius,
		0.0,
		k,
		0.6,
	);
}

fn draw_node(state: &MapState, ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	let Position { x, y } = state.display_position(node);
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let dimmed = state.has_active_highlight() && !state.is_highlighted(&node.id);
	let radius = if state.is_hovered(&node.id) {
		node.radius * (1.0 + 0.2 * t)
	} else {
		node.radius
	};
	let selected = state.frame.selection.contains(&node.id);

	if selected {
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, radius * 2.0) {
			let _ = gradient.add_color_stop(0.0, "rgba(245, 158, 11, 0.35)");
			let _ = gradient.add_color_stop(1.0, "rgba(245, 158, 11, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius * 2.0, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	ctx.set_global_alpha(if dimmed { 1.0 - 0.7 * t } else { 1.0 });
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.color);
	ctx.fill();
	let (border, border_width) = if selected {
		(SELECTED_BORDER, 3.0)
	} else {
		(BORDER, 2.0)
	};
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(border_width / k.max(0.5));
	ctx.stroke();

	// Initial inside the disc, full label beside it.
	let initial = node
		.label
		.chars()
		.next()
		.map(|c| c.to_uppercase().to_string())
		.unwrap_or_default();
	ctx.set_fill_style_str("white");
	ctx.set_font("bold 12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&initial, x, y);
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
	ctx.set_font(&format!("{}px sans-serif", label_size(node.kind) / k.max(0.5)));
	let _ = ctx.fill_text(&node.label, x + radius + 4.0, y + 4.0);
	ctx.set_global_alpha(1.0);
}

fn label_size(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Document | NodeKind::Concept => 12.0,
		NodeKind::Section | NodeKind::Keyword => 10.0,
	}
}

fn draw_tooltip(state: &MapState, ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	let text = node.summary.as_deref().unwrap_or(&node.label);
	if text.is_empty() {
		return;
	}
	let line: String = if text.chars().count() > 80 {
		text.chars().take(77).chain("...".chars()).collect()
	} else {
		text.to_string()
	};
	let Position { x, y } = state.display_position(node);
	let k = state.transform.k;
	let font_size = 11.0 / k;
	ctx.set_font(&format!("{font_size}px sans-serif"));
	let width = ctx.measure_text(&line).map(|m| m.width()).unwrap_or(0.0);
	let (pad, top) = (6.0 / k, y + node.radius + 8.0 / k);
	ctx.set_global_alpha(ease_out_cubic(state.hover.highlight_t));
	ctx.set_fill_style_str("rgba(15, 23, 42, 0.9)");
	ctx.fill_rect(x - width / 2.0 - pad, top, width + 2.0 * pad, font_size + 2.0 * pad);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(&line, x - width / 2.0, top + pad + font_size * 0.85);
	ctx.set_global_alpha(1.0);
}
