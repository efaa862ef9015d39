//! The shared node/edge collections behind every diagram view.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;

use super::types::{Edge, EdgeId, GraphData, Node, NodeId, Point};

/// What a mutation changed. Subscribers receive it after the write is applied.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphChange {
	NodesReplaced,
	EdgesReplaced,
	Cleared,
	Hydrated,
	NodeAdded(NodeId),
	NodeRemoved(NodeId),
	NodeMoved(NodeId),
	EdgeAdded(EdgeId),
	EdgeRemoved(EdgeId),
}

type Listener = Rc<dyn Fn(&GraphChange)>;

#[derive(Default)]
struct Listeners {
	next_id: Cell<u64>,
	entries: RefCell<Vec<(u64, Listener)>>,
}

/// Cheaply cloneable handle to one graph. Clones share state.
#[derive(Clone, Default)]
pub struct GraphStore {
	graph: Rc<RefCell<GraphData>>,
	listeners: Rc<Listeners>,
}

/// Keeps a listener registered until dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
	id: u64,
	listeners: Weak<Listeners>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(listeners) = self.listeners.upgrade() {
			listeners.entries.borrow_mut().retain(|(id, _)| *id != self.id);
		}
	}
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe(&self, listener: impl Fn(&GraphChange) + 'static) -> Subscription {
		let id = self.listeners.next_id.get();
		self.listeners.next_id.set(id + 1);
		self.listeners
			.entries
			.borrow_mut()
			.push((id, Rc::new(listener)));
		Subscription {
			id,
			listeners: Rc::downgrade(&self.listeners),
		}
	}

	fn notify(&self, change: GraphChange) {
		// Snapshot the list so listeners may subscribe, unsubscribe or read.
		let listeners: Vec<Listener> = self
			.listeners
			.entries
			.borrow()
			.iter()
			.map(|(_, l)| l.clone())
			.collect();
		for listener in listeners {
			listener(&change);
		}
	}

	pub fn with_graph<R>(&self, f: impl FnOnce(&GraphData) -> R) -> R {
		f(&self.graph.borrow())
	}

	pub fn nodes(&self) -> Vec<Node> {
		self.graph.borrow().nodes.clone()
	}

	pub fn edges(&self) -> Vec<Edge> {
		self.graph.borrow().edges.clone()
	}

	pub fn snapshot(&self) -> GraphData {
		self.graph.borrow().clone()
	}

	pub fn node(&self, id: &NodeId) -> Option<Node> {
		self.graph.borrow().node(id).cloned()
	}

	pub fn node_count(&self) -> usize {
		self.graph.borrow().nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.graph.borrow().edges.len()
	}

	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.graph.borrow().node(id).is_some()
	}

	pub fn contains_edge(&self, id: &EdgeId) -> bool {
		self.graph.borrow().edges.iter().any(|e| &e.id == id)
	}

	/// True if an edge joins `a` and `b` in either direction.
	pub fn are_connected(&self, a: &NodeId, b: &NodeId) -> bool {
		self.graph.borrow().edges.iter().any(|e| e.joins(a, b))
	}

	pub fn replace_nodes(&self, nodes: Vec<Node>) {
		self.graph.borrow_mut().nodes = nodes;
		self.notify(GraphChange::NodesReplaced);
	}

	pub fn replace_edges(&self, edges: Vec<Edge>) {
		self.graph.borrow_mut().edges = edges;
		self.notify(GraphChange::EdgesReplaced);
	}

	/// Replace the nodes with a function of the previous collection.
	///
	/// `f` sees a copy, so it may itself write to the store.
	pub fn update_nodes(&self, f: impl FnOnce(&[Node]) -> Vec<Node>) {
		let previous = self.nodes();
		self.replace_nodes(f(&previous));
	}

	/// Replace the edges with a function of the previous collection.
	pub fn update_edges(&self, f: impl FnOnce(&[Edge]) -> Vec<Edge>) {
		let previous = self.edges();
		self.replace_edges(f(&previous));
	}

	/// Empty both collections in one write. A no-op on an empty board.
	pub fn clear(&self) {
		{
			let mut graph = self.graph.borrow_mut();
			if graph.is_empty() {
				return;
			}
			*graph = GraphData::default();
		}
		debug!("graph cleared");
		self.notify(GraphChange::Cleared);
	}

	/// Swap in a persisted graph without treating it as a local edit.
	pub fn hydrate(&self, data: GraphData) {
		*self.graph.borrow_mut() = data;
		self.notify(GraphChange::Hydrated);
	}

	/// Append a node. Refuses ids already present.
	pub fn add_node(&self, node: Node) -> bool {
		{
			let mut graph = self.graph.borrow_mut();
			if graph.node(&node.id).is_some() {
				debug!("refusing duplicate node id {}", node.id);
				return false;
			}
			graph.nodes.push(node.clone());
		}
		self.notify(GraphChange::NodeAdded(node.id));
		true
	}

	/// Remove a node and every edge touching it.
	pub fn remove_node(&self, id: &NodeId) -> bool {
		{
			let mut graph = self.graph.borrow_mut();
			let before = graph.nodes.len();
			graph.nodes.retain(|n| &n.id != id);
			if graph.nodes.len() == before {
				return false;
			}
			graph.edges.retain(|e| !e.touches(id));
		}
		self.notify(GraphChange::NodeRemoved(id.clone()));
		true
	}

	pub fn move_node(&self, id: &NodeId, position: Point) -> bool {
		{
			let mut graph = self.graph.borrow_mut();
			let Some(node) = graph.nodes.iter_mut().find(|n| &n.id == id) else {
				return false;
			};
			if node.position == position {
				return true;
			}
			node.position = position;
		}
		self.notify(GraphChange::NodeMoved(id.clone()));
		true
	}

	/// Append an edge if both endpoints exist, differ, and are not yet joined.
	pub fn add_edge(&self, edge: Edge) -> bool {
		{
			let mut graph = self.graph.borrow_mut();
			if edge.source == edge.target {
				return false;
			}
			if graph.node(&edge.source).is_none() || graph.node(&edge.target).is_none() {
				debug!("refusing edge {} with a missing endpoint", edge.id);
				return false;
			}
			if graph
				.edges
				.iter()
				.any(|e| e.id == edge.id || e.joins(&edge.source, &edge.target))
			{
				return false;
			}
			graph.edges.push(edge.clone());
		}
		self.notify(GraphChange::EdgeAdded(edge.id));
		true
	}

	pub fn remove_edge(&self, id: &EdgeId) -> bool {
		{
			let mut graph = self.graph.borrow_mut();
			let before = graph.edges.len();
			graph.edges.retain(|e| &e.id != id);
			if graph.edges.len() == before {
				return false;
			}
		}
		self.notify(GraphChange::EdgeRemoved(id.clone()));
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow_canvas::catalog::CatalogKind;

	fn node(id: &str) -> Node {
		Node {
			id: NodeId::new(id),
			kind: CatalogKind::Cloud,
			position: Point::new(40.0, 40.0),
			label: "Cloud Service".into(),
			accent: "#3B82F6".into(),
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> Edge {
		Edge {
			id: EdgeId::new(id),
			source: NodeId::new(source),
			target: NodeId::new(target),
		}
	}

	fn recorder(store: &GraphStore) -> (Rc<RefCell<Vec<GraphChange>>>, Subscription) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let sink = log.clone();
		let sub = store.subscribe(move |change| sink.borrow_mut().push(change.clone()));
		(log, sub)
	}

	#[test]
	fn removing_a_node_cascades_to_its_edges() {
		let store = GraphStore::new();
		for id in ["x", "y", "z"] {
			assert!(store.add_node(node(id)));
		}
		assert!(store.add_edge(edge("e1", "x", "y")));
		assert!(store.add_edge(edge("e2", "y", "z")));

		assert!(store.remove_node(&NodeId::new("x")));

		assert!(!store.contains_node(&NodeId::new("x")));
		assert_eq!(store.edges(), vec![edge("e2", "y", "z")]);
		assert!(!store.remove_node(&NodeId::new("x")));
	}

	#[test]
	fn edges_need_distinct_existing_unjoined_endpoints() {
		let store = GraphStore::new();
		store.add_node(node("a"));
		store.add_node(node("b"));

		assert!(!store.add_edge(edge("self", "a", "a")));
		assert!(!store.add_edge(edge("dangling", "a", "ghost")));
		assert!(store.add_edge(edge("ab", "a", "b")));
		assert!(!store.add_edge(edge("ba", "b", "a")));
		assert!(store.are_connected(&NodeId::new("b"), &NodeId::new("a")));
		assert_eq!(store.edge_count(), 1);
	}

	#[test]
	fn duplicate_node_ids_are_refused() {
		let store = GraphStore::new();
		assert!(store.add_node(node("a")));
		assert!(!store.add_node(node("a")));
		assert_eq!(store.node_count(), 1);
	}

	#[test]
	fn clear_is_one_atomic_notification() {
		let store = GraphStore::new();
		store.add_node(node("a"));
		store.add_node(node("b"));
		store.add_edge(edge("ab", "a", "b"));

		let observed = Rc::new(RefCell::new(Vec::new()));
		let (sink, reader) = (observed.clone(), store.clone());
		let _sub = store.subscribe(move |change| {
			sink.borrow_mut()
				.push((change.clone(), reader.node_count(), reader.edge_count()));
		});

		store.clear();
		assert_eq!(*observed.borrow(), vec![(GraphChange::Cleared, 0, 0)]);
	}

	#[test]
	fn clearing_an_empty_board_changes_nothing() {
		let store = GraphStore::new();
		let (log, _sub) = recorder(&store);
		store.clear();
		assert!(store.snapshot().is_empty());
		assert!(log.borrow().is_empty());
	}

	#[test]
	fn update_forms_see_the_previous_collection() {
		let store = GraphStore::new();
		store.replace_nodes(vec![node("a"), node("b")]);
		store.update_nodes(|prev| prev.iter().filter(|n| n.id.as_str() != "a").cloned().collect());
		assert_eq!(store.nodes(), vec![node("b")]);

		store.replace_edges(vec![edge("e", "b", "q")]);
		store.update_edges(|prev| {
			let mut next = prev.to_vec();
			next.push(edge("f", "q", "b"));
			next
		});
		assert_eq!(store.edge_count(), 2);
	}

	#[test]
	fn moving_updates_only_the_position() {
		let store = GraphStore::new();
		store.add_node(node("a"));
		let (log, _sub) = recorder(&store);

		assert!(store.move_node(&NodeId::new("a"), Point::new(90.0, 70.0)));
		assert!(!store.move_node(&NodeId::new("ghost"), Point::new(1.0, 1.0)));

		let moved = store.node(&NodeId::new("a")).unwrap();
		assert_eq!(moved.position, Point::new(90.0, 70.0));
		assert_eq!(moved.label, "Cloud Service");
		assert_eq!(*log.borrow(), vec![GraphChange::NodeMoved(NodeId::new("a"))]);
	}

	#[test]
	fn dropped_subscriptions_stop_listening() {
		let store = GraphStore::new();
		let (log, sub) = recorder(&store);
		store.add_node(node("a"));
		drop(sub);
		store.add_node(node("b"));
		assert_eq!(*log.borrow(), vec![GraphChange::NodeAdded(NodeId::new("a"))]);
	}

	#[test]
	fn edges_can_be_removed_individually() {
		let store = GraphStore::new();
		store.add_node(node("a"));
		store.add_node(node("b"));
		store.add_edge(edge("ab", "a", "b"));
		assert!(store.remove_edge(&EdgeId::new("ab")));
		assert!(!store.contains_edge(&EdgeId::new("ab")));
		assert_eq!(store.node_count(), 2);
		assert!(!store.remove_edge(&EdgeId::new("ab")));
	}

	#[test]
	fn update_forms_allow_writes_from_the_transform() {
		let store = GraphStore::new();
		store.add_node(node("a"));
		store.add_node(node("b"));
		store.add_edge(edge("e", "a", "b"));

		store.update_nodes(|nodes| {
			store.replace_edges(Vec::new());
			nodes.iter().filter(|n| n.id.as_str() != "b").cloned().collect()
		});
		assert_eq!(store.node_count(), 1);
		assert_eq!(store.edge_count(), 0);

		store.update_edges(|edges| {
			store.add_node(node("c"));
			edges.to_vec()
		});
		assert!(store.contains_node(&NodeId::new("c")));
	}
}
