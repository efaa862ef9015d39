use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::catalog::IconRef;
use super::connect::ConnectionState;
use super::geometry::{
	HANDLE_RADIUS, REMOVE_RADIUS, connect_handle_center, edge_curves, graph_bounds,
	remove_button_center,
};
use super::state::CanvasState;
use super::types::{GraphData, Node, Point, Size};
use crate::i18n::{Msg, t};
use crate::theme::ThemeTokens;

const GRID_SPACING: f64 = 20.0;
const CORNER_RADIUS: f64 = 12.0;
const MINIMAP_SIZE: Size = Size::new(180.0, 120.0);
const MINIMAP_MARGIN: f64 = 12.0;

pub fn render(state: &CanvasState, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(tokens.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, tokens, ctx);

	state.store().with_graph(|graph| {
		draw_edges(state, graph, tokens, ctx);
		for node in &graph.nodes {
			draw_node(state, node, tokens, ctx);
		}
		if graph.nodes.is_empty() {
			draw_empty_hint(state, tokens, ctx);
		}
		if state.config.show_minimap && !graph.nodes.is_empty() {
			draw_minimap(state, graph, tokens, ctx);
		}
	});

	if state.connection.is_connecting() {
		draw_banner(state, tokens, ctx, t(state.locale, Msg::ConnectingHint));
	}
	if state.hover.drop_target {
		draw_drop_outline(state, tokens, ctx);
	}
}

/// Pixel-space box `(x, y, w, h)` of a node, with the RTL mirror applied.
pub fn pixel_box(state: &CanvasState, node: &Node) -> (f64, f64, f64, f64) {
	let size = state.config.node_size;
	let a = state.to_pixel(node.position);
	let b = state.to_pixel(node.position.offset(size.width, size.height));
	(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
}

fn draw_grid(state: &CanvasState, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d) {
	let step = GRID_SPACING * state.transform.k;
	if step < 6.0 {
		return;
	}
	let (ox, oy) = (
		state.transform.x.rem_euclid(step),
		state.transform.y.rem_euclid(step),
	);
	let dot = (1.0 * state.transform.k).max(0.75);
	ctx.set_fill_style_str(tokens.grid);
	let mut y = oy;
	while y < state.height {
		let mut x = ox;
		while x < state.width {
			let px = if state.rtl() { state.width - x } else { x };
			ctx.fill_rect(px - dot / 2.0, y - dot / 2.0, dot, dot);
			x += step;
		}
		y += step;
	}
}

fn draw_edges(
	state: &CanvasState,
	graph: &GraphData,
	tokens: &ThemeTokens,
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.transform.k;
	let (dash, gap) = (6.0 * k, 10.0 * k);
	let dash_offset = -(state.flow_time * 40.0) % (dash + gap);

	for (_, curve) in edge_curves(graph, state.config.node_size) {
		let c = curve.map(|p| state.to_pixel(p));
		let trace = || {
			ctx.begin_path();
			ctx.move_to(c.from.x, c.from.y);
			ctx.bezier_curve_to(c.c1.x, c.c1.y, c.c2.x, c.c2.y, c.to.x, c.to.y);
		};

		let gradient = ctx.create_linear_gradient(c.from.x, c.from.y, c.to.x, c.to.y);
		let _ = gradient.add_color_stop(0.0, tokens.edge_from);
		let _ = gradient.add_color_stop(1.0, tokens.edge_to);
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(2.0 * k);
		trace();
		ctx.stroke();

		ctx.set_stroke_style_str(tokens.flow);
		ctx.set_line_width(1.5 * k);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);
		trace();
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn circle(ctx: &CanvasRenderingContext2d, center: Point, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
}

fn draw_node(state: &CanvasState, node: &Node, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let size = state.config.node_size;
	let (x, y, w, h) = pixel_box(state, node);
	let selected = state.selected.as_ref() == Some(&node.id);
	let hovered = state.hover.node.as_ref() == Some(&node.id);
	let pending = state.connection.pending_source() == Some(&node.id);

	rounded_rect(ctx, x, y, w, h, CORNER_RADIUS * k);
	ctx.set_fill_style_str(tokens.node_fill);
	ctx.fill();
	ctx.set_line_width(if selected { 2.0 * k } else { 1.0 * k });
	ctx.set_stroke_style_str(if selected {
		tokens.node_selected
	} else {
		tokens.node_border
	});
	ctx.stroke();

	if pending {
		let pulse = 0.5 + 0.5 * (state.flow_time * 4.0).sin();
		rounded_rect(ctx, x - 4.0 * k, y - 4.0 * k, w + 8.0 * k, h + 8.0 * k, (CORNER_RADIUS + 4.0) * k);
		ctx.set_global_alpha(0.4 + 0.6 * pulse);
		ctx.set_stroke_style_str(tokens.primary);
		ctx.set_line_width(2.0 * k);
		ctx.stroke();
		ctx.set_global_alpha(1.0);
	}

	// Icon tile sits on the leading edge in the reading direction.
	let tile = 32.0 * k;
	let pad = 12.0 * k;
	let tile_x = if state.rtl() { x + w - pad - tile } else { x + pad };
	let tile_y = y + (h - tile) / 2.0;
	rounded_rect(ctx, tile_x, tile_y, tile, tile, 8.0 * k);
	ctx.set_global_alpha(0.2);
	ctx.set_fill_style_str(&node.accent);
	ctx.fill();
	ctx.set_global_alpha(1.0);

	ctx.set_fill_style_str(&node.accent);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font(&format!("{}px sans-serif", 16.0 * k));
	let _ = ctx.fill_text(
		IconRef::for_kind(node.kind).glyph(),
		tile_x + tile / 2.0,
		tile_y + tile / 2.0,
	);

	ctx.set_fill_style_str(tokens.text);
	ctx.set_font(&format!("500 {}px sans-serif", 13.0 * k));
	let gap = 10.0 * k;
	let (label_x, align) = if state.rtl() {
		(tile_x - gap, "right")
	} else {
		(tile_x + tile + gap, "left")
	};
	ctx.set_text_align(align);
	let label = if node.label.is_empty() {
		t(state.locale, Msg::UnknownLabel)
	} else {
		node.label.as_str()
	};
	let _ = ctx.fill_text_with_max_width(label, label_x, y + h / 2.0, w - tile - pad * 2.0 - gap);

	let handle = state.to_pixel(connect_handle_center(node, size));
	circle(ctx, handle, HANDLE_RADIUS * k);
	ctx.set_fill_style_str(if pending { tokens.primary } else { node.accent.as_str() });
	ctx.fill();
	ctx.set_stroke_style_str(tokens.background);
	ctx.set_line_width(2.0 * k);
	ctx.stroke();

	if hovered || selected {
		let remove = state.to_pixel(remove_button_center(node, size));
		circle(ctx, remove, REMOVE_RADIUS * k);
		ctx.set_fill_style_str(tokens.danger);
		ctx.fill();
		ctx.set_fill_style_str("#ffffff");
		ctx.set_text_align("center");
		ctx.set_font(&format!("bold {}px sans-serif", 12.0 * k));
		let _ = ctx.fill_text("×", remove.x, remove.y);
	}
}

fn draw_empty_hint(state: &CanvasState, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(tokens.muted_text);
	ctx.set_font("500 15px sans-serif");
	let _ = ctx.fill_text(t(state.locale, Msg::DropHint), cx, cy - 10.0);
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(t(state.locale, Msg::DropHintSub), cx, cy + 12.0);
}

fn draw_banner(state: &CanvasState, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d, text: &str) {
	let (w, h) = ((state.width - 32.0).min(460.0), 32.0);
	let (x, y) = ((state.width - w) / 2.0, 12.0);
	rounded_rect(ctx, x, y, w, h, h / 2.0);
	ctx.set_fill_style_str(tokens.primary);
	ctx.fill();
	ctx.set_fill_style_str("#ffffff");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text_with_max_width(text, state.width / 2.0, y + h / 2.0, w - 24.0);
}

fn draw_drop_outline(state: &CanvasState, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(tokens.primary);
	ctx.set_line_width(2.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(8.0),
		&JsValue::from_f64(6.0),
	));
	rounded_rect(ctx, 4.0, 4.0, state.width - 8.0, state.height - 8.0, CORNER_RADIUS);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Where the minimap sits on the canvas and how graph space maps into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimapLayout {
	pub origin: Point,
	pub scale: f64,
	/// Graph-space point drawn at `origin`.
	pub graph_origin: Point,
}

impl MinimapLayout {
	/// Fit both the nodes and the visible area into the minimap frame.
	pub fn compute(state: &CanvasState, graph: &GraphData) -> Option<Self> {
		let (nodes_min, nodes_max) = graph_bounds(graph, state.config.node_size)?;
		let (view_min, view_max) = state.visible_bounds();
		let min = Point::new(nodes_min.x.min(view_min.x), nodes_min.y.min(view_min.y));
		let max = Point::new(nodes_max.x.max(view_max.x), nodes_max.y.max(view_max.y));
		let scale = (MINIMAP_SIZE.width / (max.x - min.x)).min(MINIMAP_SIZE.height / (max.y - min.y));
		let right = state.width - MINIMAP_MARGIN - MINIMAP_SIZE.width;
		let origin = Point::new(
			if state.rtl() { MINIMAP_MARGIN } else { right },
			state.height - MINIMAP_MARGIN - MINIMAP_SIZE.height,
		);
		Some(Self {
			origin,
			scale,
			graph_origin: min,
		})
	}

	/// Graph point to minimap pixel. Mirrored inside the frame in RTL.
	pub fn project(&self, p: Point, rtl: bool) -> Point {
		let dx = (p.x - self.graph_origin.x) * self.scale;
		let x = if rtl {
			self.origin.x + MINIMAP_SIZE.width - dx
		} else {
			self.origin.x + dx
		};
		Point::new(x, self.origin.y + (p.y - self.graph_origin.y) * self.scale)
	}
}

fn draw_minimap(state: &CanvasState, graph: &GraphData, tokens: &ThemeTokens, ctx: &CanvasRenderingContext2d) {
	let Some(layout) = MinimapLayout::compute(state, graph) else {
		return;
	};
	let rtl = state.rtl();
	rounded_rect(
		ctx,
		layout.origin.x - 4.0,
		layout.origin.y - 4.0,
		MINIMAP_SIZE.width + 8.0,
		MINIMAP_SIZE.height + 8.0,
		8.0,
	);
	ctx.set_fill_style_str(tokens.background);
	ctx.fill();
	ctx.set_stroke_style_str(tokens.node_border);
	ctx.set_line_width(1.0);
	ctx.stroke();

	let size = state.config.node_size;
	for node in &graph.nodes {
		let a = layout.project(node.position, rtl);
		let b = layout.project(node.position.offset(size.width, size.height), rtl);
		ctx.set_fill_style_str(&node.accent);
		ctx.fill_rect(a.x.min(b.x), a.y, (b.x - a.x).abs().max(2.0), (b.y - a.y).max(2.0));
	}

	let (view_min, view_max) = state.visible_bounds();
	let a = layout.project(view_min, rtl);
	let b = layout.project(view_max, rtl);
	ctx.set_stroke_style_str(tokens.primary);
	ctx.stroke_rect(a.x.min(b.x), a.y, (b.x - a.x).abs(), b.y - a.y);

	if let ConnectionState::Connecting(source) = &state.connection {
		if let Some(node) = graph.node(source) {
			let p = layout.project(connect_handle_center(node, size), rtl);
			circle(ctx, p, 3.0);
			ctx.set_fill_style_str(tokens.primary);
			ctx.fill();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_canvas::catalog::CatalogKind;
	use crate::components::workflow_canvas::config::CanvasConfig;
	use crate::components::workflow_canvas::store::GraphStore;
	use crate::i18n::Locale;

	fn state_with_node(at: Point) -> (CanvasState, Node) {
		let store = GraphStore::new();
		let mut state = CanvasState::new(store, CanvasConfig::full_screen(), 800.0, 600.0);
		let id = state.place_at(CatalogKind::Cloud, at).unwrap();
		let node = state.store().node(&id).unwrap();
		(state, node)
	}

	#[test]
	fn pixel_box_is_mirrored_in_rtl() {
		let (mut state, node) = state_with_node(Point::new(100.0, 100.0));
		assert_eq!(pixel_box(&state, &node), (100.0, 100.0, 150.0, 56.0));
		state.locale = Locale::Ar;
		assert_eq!(pixel_box(&state, &node), (550.0, 100.0, 150.0, 56.0));
	}

	#[test]
	fn pixel_box_scales_with_zoom() {
		let (mut state, node) = state_with_node(Point::new(100.0, 100.0));
		state.transform.k = 2.0;
		state.transform.x = -50.0;
		assert_eq!(pixel_box(&state, &node), (150.0, 200.0, 300.0, 112.0));
	}

	#[test]
	fn minimap_contains_nodes_and_viewport() {
		let (state, _) = state_with_node(Point::new(300.0, 200.0));
		let layout = state.store().with_graph(|g| MinimapLayout::compute(&state, g)).unwrap();
		let (min, max) = state.visible_bounds();
		let a = layout.project(min, false);
		let b = layout.project(max, false);
		assert!(a.x >= layout.origin.x - 1e-9 && a.y >= layout.origin.y - 1e-9);
		assert!(b.x <= layout.origin.x + MINIMAP_SIZE.width + 1e-9);
		assert!(b.y <= layout.origin.y + MINIMAP_SIZE.height + 1e-9);
	}

	#[test]
	fn minimap_moves_to_the_left_in_rtl() {
		let (mut state, _) = state_with_node(Point::new(300.0, 200.0));
		state.locale = Locale::Ar;
		let layout = state.store().with_graph(|g| MinimapLayout::compute(&state, g)).unwrap();
		assert_eq!(layout.origin.x, MINIMAP_MARGIN);
	}

	#[test]
	fn empty_board_has_no_minimap() {
		let state = CanvasState::new(GraphStore::new(), CanvasConfig::full_screen(), 800.0, 600.0);
		assert!(state.store().with_graph(|g| MinimapLayout::compute(&state, g)).is_none());
	}
}
