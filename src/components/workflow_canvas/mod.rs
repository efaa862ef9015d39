//! Drag-and-drop node/edge diagram editor backed by one shared graph store.

mod catalog;
mod component;
mod config;
mod connect;
mod error;
mod geometry;
mod ids;
mod palette;
mod persist;
mod render;
mod session;
mod state;
mod store;
mod types;
mod view;

#[cfg(test)]
mod tests;

pub use catalog::CatalogKind;
pub use config::CanvasConfig;
pub use error::PersistError;
pub use session::{GraphSession, SessionContext};
pub use store::{GraphChange, GraphStore, Subscription};
pub use types::{Edge, EdgeId, GraphData, Node, NodeId, Point};
pub use view::{DiagramView, Variant};
