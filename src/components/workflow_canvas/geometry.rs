//! Pure coordinate math: pointer mapping, placement clamps and edge curves.

use super::types::{EdgeId, GraphData, Node, Point, Size};

/// Canvas bounding box in client (viewport) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl CanvasRect {
	pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width,
			height,
		}
	}

	pub fn right(&self) -> f64 {
		self.left + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.top + self.height
	}

	pub fn contains(&self, client: Point) -> bool {
		client.x >= self.left
			&& client.x <= self.right()
			&& client.y >= self.top
			&& client.y <= self.bottom()
	}
}

/// Map a client point into canvas-local space.
///
/// In right-to-left layouts x is the distance from the canvas's right edge,
/// so local x always grows in the reading direction.
pub fn to_canvas_local(client: Point, rect: &CanvasRect, rtl: bool) -> Point {
	let x = if rtl {
		rect.right() - client.x
	} else {
		client.x - rect.left
	};
	Point::new(x, client.y - rect.top)
}

/// Clamp a new node's origin so `footprint` stays inside `[min, max]`.
///
/// When the area is narrower than the footprint the lower bound wins.
pub fn clamp_placement(p: Point, min: Point, max: Point, footprint: Size, inset: f64) -> Point {
	let clamp = |v: f64, lo: f64, hi: f64| v.min(hi).max(lo);
	Point::new(
		clamp(p.x, min.x + inset, max.x - footprint.width),
		clamp(p.y, min.y + inset, max.y - footprint.height),
	)
}

/// Repositioning only bounds the top/left side.
pub fn clamp_reposition(p: Point, min_position: f64) -> Point {
	Point::new(p.x.max(min_position), p.y.max(min_position))
}

pub fn source_anchor(node: &Node, size: Size) -> Point {
	node.position.offset(size.width, size.height / 2.0)
}

pub fn target_anchor(node: &Node, size: Size) -> Point {
	node.position.offset(0.0, size.height / 2.0)
}

/// Cubic bezier between two anchors with horizontal tangents at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCurve {
	pub from: Point,
	pub c1: Point,
	pub c2: Point,
	pub to: Point,
}

impl EdgeCurve {
	pub fn between(from: Point, to: Point) -> Self {
		let mid_x = (from.x + to.x) / 2.0;
		Self {
			from,
			c1: Point::new(mid_x, from.y),
			c2: Point::new(mid_x, to.y),
			to,
		}
	}

	pub fn to_svg_path(&self) -> String {
		format!(
			"M {} {} C {} {}, {} {}, {} {}",
			self.from.x, self.from.y, self.c1.x, self.c1.y, self.c2.x, self.c2.y, self.to.x, self.to.y
		)
	}

	pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
		Self {
			from: f(self.from),
			c1: f(self.c1),
			c2: f(self.c2),
			to: f(self.to),
		}
	}
}

pub fn edge_curve(source: &Node, target: &Node, size: Size) -> EdgeCurve {
	EdgeCurve::between(source_anchor(source, size), target_anchor(target, size))
}

/// Curves for every edge whose endpoints both exist; dangling edges are skipped.
pub fn edge_curves(graph: &GraphData, size: Size) -> Vec<(EdgeId, EdgeCurve)> {
	graph
		.edges
		.iter()
		.filter_map(|edge| {
			let source = graph.node(&edge.source)?;
			let target = graph.node(&edge.target)?;
			Some((edge.id.clone(), edge_curve(source, target, size)))
		})
		.collect()
}

/// Which part of a node box a point falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePart {
	Body,
	ConnectHandle,
	RemoveButton,
}

pub const HANDLE_RADIUS: f64 = 8.0;
pub const REMOVE_RADIUS: f64 = 10.0;

pub fn connect_handle_center(node: &Node, size: Size) -> Point {
	source_anchor(node, size)
}

pub fn remove_button_center(node: &Node, size: Size) -> Point {
	node.position.offset(size.width, 0.0)
}

/// Hit-test one node in graph space. Buttons win over the body.
pub fn hit_node(node: &Node, size: Size, p: Point) -> Option<NodePart> {
	if p.distance_to(remove_button_center(node, size)) <= REMOVE_RADIUS {
		return Some(NodePart::RemoveButton);
	}
	if p.distance_to(connect_handle_center(node, size)) <= HANDLE_RADIUS {
		return Some(NodePart::ConnectHandle);
	}
	let (x, y) = (node.position.x, node.position.y);
	let inside = p.x >= x && p.x <= x + size.width && p.y >= y && p.y <= y + size.height;
	inside.then_some(NodePart::Body)
}

/// Bounding box `(min, max)` of all node boxes, or `None` for an empty board.
pub fn graph_bounds(graph: &GraphData, size: Size) -> Option<(Point, Point)> {
	let mut nodes = graph.nodes.iter();
	let first = nodes.next()?;
	let init = (first.position, first.position.offset(size.width, size.height));
	Some(nodes.fold(init, |(min, max), n| {
		(
			Point::new(min.x.min(n.position.x), min.y.min(n.position.y)),
			Point::new(
				max.x.max(n.position.x + size.width),
				max.y.max(n.position.y + size.height),
			),
		)
	}))
}
