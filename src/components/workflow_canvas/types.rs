use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogKind;

/// A point in canvas or graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}

	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

macro_rules! string_id {
	($ty:ident) => {
		impl $ty {
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $ty {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}
	};
}

string_id!(NodeId);
string_id!(EdgeId);

/// A placed diagram element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	pub kind: CatalogKind,
	pub position: Point,
	pub label: String,
	pub accent: String,
}

/// A link between two nodes. Stored directed, drawn undirected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
}

impl Edge {
	pub fn touches(&self, node: &NodeId) -> bool {
		&self.source == node || &self.target == node
	}

	/// True when this edge joins `a` and `b` in either direction.
	pub fn joins(&self, a: &NodeId, b: &NodeId) -> bool {
		(&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl GraphData {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| &n.id == id)
	}
}
