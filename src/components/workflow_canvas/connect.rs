//! Two-click connection gesture.

use log::debug;

use super::ids::IdGenerator;
use super::store::GraphStore;
use super::types::{Edge, EdgeId, NodeId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
	#[default]
	Idle,
	Connecting(NodeId),
}

/// Result of one connect gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
	/// The node became the pending source.
	Started(NodeId),
	/// Same node clicked twice, or the pending source vanished.
	Cancelled,
	Created(EdgeId),
	/// The pair was already joined; nothing was added.
	Duplicate,
}

impl ConnectionState {
	pub fn pending_source(&self) -> Option<&NodeId> {
		match self {
			ConnectionState::Idle => None,
			ConnectionState::Connecting(id) => Some(id),
		}
	}

	pub fn is_connecting(&self) -> bool {
		matches!(self, ConnectionState::Connecting(_))
	}

	/// Apply a connect gesture on `node`. Always ends in `Idle` unless it
	/// starts a new pending connection.
	pub fn gesture(&mut self, node: &NodeId, store: &GraphStore, ids: &mut IdGenerator) -> ConnectOutcome {
		let source = match std::mem::take(self) {
			ConnectionState::Idle => {
				*self = ConnectionState::Connecting(node.clone());
				return ConnectOutcome::Started(node.clone());
			}
			ConnectionState::Connecting(source) => source,
		};

		if &source == node {
			return ConnectOutcome::Cancelled;
		}
		if store.are_connected(&source, node) {
			debug!("{source} and {node} are already connected");
			return ConnectOutcome::Duplicate;
		}

		let id = ids.edge_id(|candidate| store.contains_edge(candidate));
		let edge = Edge {
			id: id.clone(),
			source,
			target: node.clone(),
		};
		if store.add_edge(edge) {
			ConnectOutcome::Created(id)
		} else {
			ConnectOutcome::Cancelled
		}
	}

	/// Drop a pending connection. Returns whether one was pending.
	pub fn cancel(&mut self) -> bool {
		std::mem::take(self).is_connecting()
	}

	/// Reset if `removed` was the pending source.
	pub fn forget(&mut self, removed: &NodeId) {
		if self.pending_source() == Some(removed) {
			*self = ConnectionState::Idle;
		}
	}
}
