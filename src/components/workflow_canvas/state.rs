use log::{debug, info};

use super::catalog::{self, CatalogKind};
use super::config::CanvasConfig;
use super::connect::{ConnectOutcome, ConnectionState};
use super::geometry::{
	CanvasRect, NodePart, clamp_placement, clamp_reposition, graph_bounds, hit_node,
	to_canvas_local,
};
use super::ids::IdGenerator;
use super::store::GraphStore;
use super::types::{Node, NodeId, Point};
use crate::i18n::{Locale, t};

const FIT_PADDING: f64 = 40.0;

/// Pan offset `(x, y)` and zoom `k`, mapping graph space into canvas-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, p: Point) -> Point {
		Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	/// Zoom by `factor`, keeping the graph point under `anchor` fixed.
	pub fn zoom_at(&mut self, anchor: Point, factor: f64, min: f64, max: f64) {
		let new_k = (self.k * factor).clamp(min, max);
		let ratio = new_k / self.k;
		self.x = anchor.x - (anchor.x - self.x) * ratio;
		self.y = anchor.y - (anchor.y - self.y) * ratio;
		self.k = new_k;
	}
}

/// The pointer gesture in flight. Points are canvas-local.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	/// Pressed on a node body; not yet past the drag threshold.
	PressNode {
		node: NodeId,
		start: Point,
		node_start: Point,
	},
	DragNode {
		node: NodeId,
		start: Point,
		node_start: Point,
	},
	Pan {
		start: Point,
		transform_start: (f64, f64),
		moved: bool,
	},
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub part: Option<NodePart>,
	/// A palette item is being dragged over the canvas.
	pub drop_target: bool,
}

/// Interaction state of one mounted canvas over the shared store.
pub struct CanvasState {
	store: GraphStore,
	ids: IdGenerator,
	pub config: CanvasConfig,
	pub transform: ViewTransform,
	pub gesture: Gesture,
	pub connection: ConnectionState,
	pub selected: Option<NodeId>,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub locale: Locale,
	pub flow_time: f64,
}

impl CanvasState {
	pub fn new(store: GraphStore, config: CanvasConfig, width: f64, height: f64) -> Self {
		Self {
			store,
			ids: IdGenerator::new(),
			config,
			transform: ViewTransform::default(),
			gesture: Gesture::Idle,
			connection: ConnectionState::Idle,
			selected: None,
			hover: HoverState::default(),
			width,
			height,
			locale: Locale::default(),
			flow_time: 0.0,
		}
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn rtl(&self) -> bool {
		self.locale.is_rtl()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	/// Graph point to canvas pixel, applying the RTL mirror.
	pub fn to_pixel(&self, p: Point) -> Point {
		let local = self.transform.graph_to_screen(p);
		if self.rtl() {
			Point::new(self.width - local.x, local.y)
		} else {
			local
		}
	}

	/// Graph-space rectangle currently visible.
	pub fn visible_bounds(&self) -> (Point, Point) {
		(
			self.transform.screen_to_graph(Point::new(0.0, 0.0)),
			self.transform
				.screen_to_graph(Point::new(self.width, self.height)),
		)
	}

	/// Topmost node under a canvas-local point, and the part that was hit.
	pub fn node_at(&self, local: Point) -> Option<(NodeId, NodePart)> {
		let g = self.transform.screen_to_graph(local);
		let size = self.config.node_size;
		self.store.with_graph(|graph| {
			graph
				.nodes
				.iter()
				.rev()
				.find_map(|n| hit_node(n, size, g).map(|part| (n.id.clone(), part)))
		})
	}

	/// Drop a palette item released at `client`. Abandoned outside the canvas.
	pub fn place_item(&mut self, kind: CatalogKind, client: Point, rect: &CanvasRect) -> Option<NodeId> {
		if !rect.contains(client) {
			debug!("drop at ({}, {}) is outside the canvas", client.x, client.y);
			return None;
		}
		let local = to_canvas_local(client, rect, self.rtl());
		self.place_at(kind, local)
	}

	/// Create a node of `kind` whose origin lands at a canvas-local point.
	pub fn place_at(&mut self, kind: CatalogKind, local: Point) -> Option<NodeId> {
		let item = catalog::lookup(kind)?;
		let (min, max) = self.visible_bounds();
		let position = clamp_placement(
			self.transform.screen_to_graph(local),
			min,
			max,
			self.config.placement_footprint,
			self.config.placement_inset,
		);
		let store = &self.store;
		let id = self.ids.node_id(|candidate| store.contains_node(candidate));
		let node = Node {
			id: id.clone(),
			kind,
			position,
			label: t(self.locale, item.label).to_owned(),
			accent: item.accent.to_owned(),
		};
		if !self.store.add_node(node) {
			return None;
		}
		info!("placed {} at ({:.0}, {:.0})", kind.key(), position.x, position.y);
		Some(id)
	}

	pub fn pointer_down(&mut self, local: Point) {
		match self.node_at(local) {
			Some((id, NodePart::RemoveButton)) => {
				self.remove_node(&id);
			}
			Some((id, NodePart::ConnectHandle)) => {
				self.connect_gesture(&id);
			}
			Some((id, NodePart::Body)) => {
				let Some(node) = self.store.node(&id) else {
					return;
				};
				self.gesture = Gesture::PressNode {
					node: id,
					start: local,
					node_start: node.position,
				};
			}
			None => {
				self.gesture = Gesture::Pan {
					start: local,
					transform_start: (self.transform.x, self.transform.y),
					moved: false,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, local: Point) {
		let threshold = self.config.drag_threshold;
		match self.gesture.clone() {
			Gesture::Idle => {
				let hit = self.node_at(local);
				self.hover.part = hit.as_ref().map(|(_, part)| *part);
				self.hover.node = hit.map(|(id, _)| id);
			}
			Gesture::PressNode {
				node,
				start,
				node_start,
			} => {
				if local.distance_to(start) > threshold {
					self.drag_to(&node, start, node_start, local);
					self.gesture = Gesture::DragNode {
						node,
						start,
						node_start,
					};
				}
			}
			Gesture::DragNode {
				node,
				start,
				node_start,
			} => self.drag_to(&node, start, node_start, local),
			Gesture::Pan {
				start,
				transform_start,
				moved,
			} => {
				self.transform.x = transform_start.0 + (local.x - start.x);
				self.transform.y = transform_start.1 + (local.y - start.y);
				self.gesture = Gesture::Pan {
					start,
					transform_start,
					moved: moved || local.distance_to(start) > threshold,
				};
			}
		}
	}

	fn drag_to(&mut self, node: &NodeId, start: Point, node_start: Point, local: Point) {
		let k = self.transform.k;
		let moved = node_start.offset((local.x - start.x) / k, (local.y - start.y) / k);
		self.store
			.move_node(node, clamp_reposition(moved, self.config.min_position));
	}

	pub fn pointer_up(&mut self) {
		match std::mem::take(&mut self.gesture) {
			Gesture::PressNode { node, .. } => self.click_node(&node),
			Gesture::DragNode { node, .. } => debug!("finished dragging {node}"),
			Gesture::Pan { moved: false, .. } => self.click_background(),
			Gesture::Pan { .. } | Gesture::Idle => {}
		}
	}

	pub fn pointer_leave(&mut self) {
		self.gesture = Gesture::Idle;
		self.hover.node = None;
		self.hover.part = None;
	}

	/// Plain click on a node body: select it, and finish a pending connection.
	pub fn click_node(&mut self, id: &NodeId) {
		self.selected = Some(id.clone());
		if self
			.connection
			.pending_source()
			.is_some_and(|source| source != id)
		{
			self.connect_gesture(id);
		}
	}

	pub fn connect_gesture(&mut self, id: &NodeId) -> ConnectOutcome {
		let outcome = self.connection.gesture(id, &self.store, &mut self.ids);
		debug!("connect gesture on {id}: {outcome:?}");
		outcome
	}

	pub fn click_background(&mut self) {
		self.connection.cancel();
		self.selected = None;
	}

	pub fn double_click(&mut self, local: Point) {
		if let Some((id, NodePart::Body)) = self.node_at(local) {
			self.remove_node(&id);
		}
	}

	pub fn remove_node(&mut self, id: &NodeId) -> bool {
		if !self.store.remove_node(id) {
			return false;
		}
		if self.selected.as_ref() == Some(id) {
			self.selected = None;
		}
		if self.hover.node.as_ref() == Some(id) {
			self.hover.node = None;
			self.hover.part = None;
		}
		self.connection.forget(id);
		info!("removed {id}");
		true
	}

	/// Empty the board and drop every bit of view-local interaction state.
	pub fn clear_board(&mut self) {
		self.store.clear();
		self.connection = ConnectionState::Idle;
		self.selected = None;
		self.gesture = Gesture::Idle;
		self.hover = HoverState::default();
	}

	pub fn wheel(&mut self, local: Point, delta_y: f64) {
		let step = self.config.zoom_step;
		let factor = if delta_y > 0.0 { 1.0 / step } else { step };
		self.zoom_about(local, factor);
	}

	pub fn zoom_in(&mut self) {
		let center = Point::new(self.width / 2.0, self.height / 2.0);
		self.zoom_about(center, self.config.zoom_step);
	}

	pub fn zoom_out(&mut self) {
		let center = Point::new(self.width / 2.0, self.height / 2.0);
		self.zoom_about(center, 1.0 / self.config.zoom_step);
	}

	fn zoom_about(&mut self, anchor: Point, factor: f64) {
		let (min, max) = (self.config.min_zoom, self.config.max_zoom);
		self.transform.zoom_at(anchor, factor, min, max);
	}

	/// Frame every node, never zooming in past 1:1.
	pub fn fit_view(&mut self) {
		let bounds = self
			.store
			.with_graph(|graph| graph_bounds(graph, self.config.node_size));
		let Some((min, max)) = bounds else {
			self.transform = ViewTransform::default();
			return;
		};
		let (cw, ch) = (max.x - min.x, max.y - min.y);
		let k = ((self.width - 2.0 * FIT_PADDING) / cw)
			.min((self.height - 2.0 * FIT_PADDING) / ch)
			.min(1.0)
			.max(self.config.min_zoom);
		self.transform = ViewTransform {
			x: (self.width - cw * k) / 2.0 - min.x * k,
			y: (self.height - ch * k) / 2.0 - min.y * k,
			k,
		};
	}
}
