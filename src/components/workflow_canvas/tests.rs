//! End-to-end editing sessions and randomized invariant checks.

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;

use super::catalog::{CATALOG, CatalogKind};
use super::config::CanvasConfig;
use super::connect::ConnectionState;
use super::geometry::{CanvasRect, edge_curves};
use super::ids::IdGenerator;
use super::persist::testing::{ManualTimer, MemorySlot};
use super::persist::{GraphSync, decode};
use super::session::GraphSession;
use super::state::CanvasState;
use super::store::GraphStore;
use super::types::{GraphData, NodeId, Point};
use crate::i18n::Locale;

const RECT: CanvasRect = CanvasRect {
	left: 50.0,
	top: 50.0,
	width: 800.0,
	height: 600.0,
};

fn canvas(store: GraphStore) -> CanvasState {
	CanvasState::new(store, CanvasConfig::default(), RECT.width, RECT.height)
}

fn handle_of(state: &CanvasState, id: &NodeId) -> Point {
	state.store().node(id).unwrap().position.offset(150.0, 28.0)
}

fn body_of(state: &CanvasState, id: &NodeId) -> Point {
	state.store().node(id).unwrap().position.offset(10.0, 10.0)
}

fn click_handle(state: &mut CanvasState, id: &NodeId) {
	let at = handle_of(state, id);
	state.pointer_down(at);
	state.pointer_up();
}

#[test]
fn build_a_small_pipeline() {
	let mut state = canvas(GraphStore::new());
	let api = state
		.place_item(CatalogKind::Api, Point::new(120.0, 120.0), &RECT)
		.unwrap();
	let ai = state
		.place_item(CatalogKind::Ai, Point::new(420.0, 120.0), &RECT)
		.unwrap();
	let db = state
		.place_item(CatalogKind::Database, Point::new(420.0, 400.0), &RECT)
		.unwrap();

	for (a, b) in [(&api, &ai), (&ai, &db)] {
		click_handle(&mut state, a);
		click_handle(&mut state, b);
	}
	assert_eq!(state.store().edge_count(), 2);

	let curves = state
		.store()
		.with_graph(|g| edge_curves(g, state.config.node_size));
	let api_node = state.store().node(&api).unwrap();
	assert_eq!(curves[0].1.from, api_node.position.offset(150.0, 28.0));
	assert_eq!(
		curves[0].1.to_svg_path(),
		format!(
			"M {} {} C {} {}, {} {}, {} {}",
			220.0, 98.0, 295.0, 98.0, 295.0, 98.0, 370.0, 98.0
		)
	);

	state.remove_node(&ai);
	assert_eq!(state.store().node_count(), 2);
	assert_eq!(state.store().edge_count(), 0);
	assert!(state.store().contains_node(&db));
}

#[test]
fn two_views_share_one_graph() {
	let store = GraphStore::new();
	let mut embedded = canvas(store.clone());
	let mut full = CanvasState::new(store.clone(), CanvasConfig::full_screen(), 1280.0, 720.0);

	let a = embedded
		.place_item(CatalogKind::Cloud, Point::new(200.0, 200.0), &RECT)
		.unwrap();
	let b = full.place_at(CatalogKind::Server, Point::new(600.0, 300.0)).unwrap();
	click_handle(&mut full, &a);
	click_handle(&mut full, &b);

	assert_eq!(embedded.store().edge_count(), 1);
	// Connection state is per view.
	assert_eq!(embedded.connection, ConnectionState::Idle);

	embedded.clear_board();
	assert!(full.store().snapshot().is_empty());
}

#[test]
fn edits_survive_a_route_change() {
	let slot = MemorySlot::default();
	let config = CanvasConfig::default();

	let first = {
		let store = GraphStore::new();
		let sync = GraphSync::attach(
			store.clone(),
			Box::new(slot.clone()),
			Box::new(ManualTimer::default()),
			config.persist_debounce,
		);
		GraphSession::new(store, sync)
	};
	first.mount();
	let mut state = canvas(first.store());
	state.locale = Locale::Ar;
	let id = state
		.place_item(CatalogKind::Automation, Point::new(700.0, 300.0), &RECT)
		.unwrap();
	first.unmount();
	drop(state);
	drop(first);

	let saved = decode(slot.value.borrow().as_deref().unwrap()).unwrap();
	assert_eq!(saved.nodes.len(), 1);
	assert_eq!(saved.nodes[0].id, id);

	let second = {
		let store = GraphStore::new();
		let sync = GraphSync::attach(
			store.clone(),
			Box::new(slot.clone()),
			Box::new(ManualTimer::default()),
			Duration::from_millis(300),
		);
		GraphSession::new(store, sync)
	};
	second.mount();
	assert_eq!(second.store().snapshot(), saved);
}

#[test]
fn zoomed_and_panned_drops_stay_visible() {
	let mut state = canvas(GraphStore::new());
	state.transform.k = 0.5;
	state.transform.x = -300.0;
	let id = state
		.place_item(CatalogKind::Container, Point::new(849.0, 649.0), &RECT)
		.unwrap();
	let (min, max) = state.visible_bounds();
	let p = state.store().node(&id).unwrap().position;
	assert!(p.x >= min.x && p.x + 150.0 <= max.x);
	assert!(p.y >= min.y && p.y + 80.0 <= max.y);
}

#[derive(Clone, Debug)]
enum Op {
	Place(usize, f64, f64),
	Connect(usize, usize),
	Remove(usize),
	Drag(usize, f64, f64),
	Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
	prop_oneof![
		4 => (0..CATALOG.len(), 0.0f64..800.0, 0.0f64..600.0)
			.prop_map(|(k, x, y)| Op::Place(k, x, y)),
		4 => (0..16usize, 0..16usize).prop_map(|(a, b)| Op::Connect(a, b)),
		1 => (0..16usize).prop_map(Op::Remove),
		2 => (0..16usize, -300.0f64..300.0, -300.0f64..300.0)
			.prop_map(|(i, dx, dy)| Op::Drag(i, dx, dy)),
		1 => Just(Op::Clear),
	]
}

fn nth_node(state: &CanvasState, i: usize) -> Option<NodeId> {
	let nodes = state.store().nodes();
	(!nodes.is_empty()).then(|| nodes[i % nodes.len()].id.clone())
}

fn apply(state: &mut CanvasState, op: &Op) {
	match *op {
		Op::Place(k, x, y) => {
			state.place_at(CATALOG[k].kind, Point::new(x, y));
		}
		Op::Connect(a, b) => {
			if let (Some(a), Some(b)) = (nth_node(state, a), nth_node(state, b)) {
				state.connect_gesture(&a);
				state.connect_gesture(&b);
			}
		}
		Op::Remove(i) => {
			if let Some(id) = nth_node(state, i) {
				state.remove_node(&id);
			}
		}
		Op::Drag(i, dx, dy) => {
			if let Some(id) = nth_node(state, i) {
				let start = body_of(state, &id);
				state.pointer_down(start);
				state.pointer_move(start.offset(dx, dy));
				state.pointer_up();
			}
		}
		Op::Clear => state.clear_board(),
	}
}

fn check_invariants(graph: &GraphData) -> Result<(), TestCaseError> {
	let ids: HashSet<&NodeId> = graph.nodes.iter().map(|n| &n.id).collect();
	prop_assert_eq!(ids.len(), graph.nodes.len());

	let mut pairs = HashSet::new();
	for edge in &graph.edges {
		prop_assert!(ids.contains(&edge.source) && ids.contains(&edge.target));
		prop_assert_ne!(&edge.source, &edge.target);
		let pair = if edge.source < edge.target {
			(&edge.source, &edge.target)
		} else {
			(&edge.target, &edge.source)
		};
		prop_assert!(pairs.insert(pair), "duplicate edge between {:?}", pair);
	}

	for node in &graph.nodes {
		prop_assert!(node.position.x >= 20.0 && node.position.y >= 20.0);
	}
	Ok(())
}

proptest! {
	#[test]
	fn graph_invariants_hold_under_any_edit_sequence(ops in prop::collection::vec(op_strategy(), 1..60)) {
		let mut state = canvas(GraphStore::new());
		for op in &ops {
			apply(&mut state, op);
			state.store().with_graph(check_invariants)?;
		}
	}

	#[test]
	fn drops_inside_the_canvas_always_fit(
		x in 50.0f64..=850.0,
		y in 50.0f64..=650.0,
		rtl in any::<bool>(),
	) {
		let mut state = canvas(GraphStore::new());
		if rtl {
			state.locale = Locale::Ar;
		}
		let id = state.place_item(CatalogKind::Security, Point::new(x, y), &RECT).unwrap();
		let p = state.store().node(&id).unwrap().position;
		prop_assert!((20.0..=650.0).contains(&p.x));
		prop_assert!((20.0..=520.0).contains(&p.y));
	}

	#[test]
	fn curves_track_node_positions(
		sx in 20.0f64..2000.0, sy in 20.0f64..2000.0,
		tx in 20.0f64..2000.0, ty in 20.0f64..2000.0,
	) {
		let mut state = canvas(GraphStore::new());
		let a = state.place_at(CatalogKind::Cloud, Point::new(100.0, 100.0)).unwrap();
		let b = state.place_at(CatalogKind::Api, Point::new(400.0, 100.0)).unwrap();
		state.connect_gesture(&a);
		state.connect_gesture(&b);
		state.store().move_node(&a, Point::new(sx, sy));
		state.store().move_node(&b, Point::new(tx, ty));

		let curve = state.store().with_graph(|g| edge_curves(g, state.config.node_size))[0].1;
		prop_assert_eq!(curve.from, Point::new(sx + 150.0, sy + 28.0));
		prop_assert_eq!(curve.to, Point::new(tx, ty + 28.0));
		let mid = (curve.from.x + curve.to.x) / 2.0;
		prop_assert_eq!(curve.c1, Point::new(mid, curve.from.y));
		prop_assert_eq!(curve.c2, Point::new(mid, curve.to.y));
	}

	#[test]
	fn generated_ids_never_collide(seed in any::<u64>(), count in 1usize..300) {
		let mut ids = IdGenerator::with_seed(seed);
		let mut seen = HashSet::new();
		for _ in 0..count {
			let id = ids.node_id(|candidate| seen.contains(candidate));
			prop_assert!(seen.insert(id));
		}
	}
}
