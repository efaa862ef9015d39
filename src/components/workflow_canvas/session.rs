use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use super::config::CanvasConfig;
use super::persist::{BrowserSessionSlot, BrowserTimer, GraphSync};
use super::store::GraphStore;

/// The one diagram shared by every mounted view, plus its session mirror.
pub struct GraphSession {
	store: GraphStore,
	sync: Rc<GraphSync>,
	hydrated: Cell<bool>,
}

impl GraphSession {
	pub fn new(store: GraphStore, sync: Rc<GraphSync>) -> Self {
		Self {
			store,
			sync,
			hydrated: Cell::new(false),
		}
	}

	/// A session mirrored into `window.sessionStorage`.
	pub fn in_browser(config: &CanvasConfig) -> Self {
		let store = GraphStore::new();
		let sync = GraphSync::attach(
			store.clone(),
			Box::new(BrowserSessionSlot::new(config.storage_key.clone())),
			Box::new(BrowserTimer::default()),
			config.persist_debounce,
		);
		Self::new(store, sync)
	}

	pub fn store(&self) -> GraphStore {
		self.store.clone()
	}

	/// Called when a diagram view mounts. Hydrates only the first time.
	pub fn mount(&self) {
		if self.hydrated.replace(true) {
			return;
		}
		if let Err(err) = self.sync.hydrate() {
			warn!("starting with an empty board: {err}");
		}
	}

	/// Called when a diagram view unmounts so a pending write is not lost.
	pub fn unmount(&self) {
		self.sync.flush_logged();
	}
}

/// `Send` handle to the session for Leptos context.
#[derive(Clone, Copy)]
pub struct SessionContext(StoredValue<GraphSession, LocalStorage>);

impl SessionContext {
	pub fn provide(session: GraphSession) -> Self {
		let ctx = Self(StoredValue::new_local(session));
		provide_context(ctx);
		ctx
	}

	pub fn store(&self) -> Option<GraphStore> {
		self.0.try_with_value(GraphSession::store)
	}

	pub fn mount(&self) {
		self.0.try_with_value(GraphSession::mount);
	}

	pub fn unmount(&self) {
		self.0.try_with_value(GraphSession::unmount);
	}
}

pub fn use_graph_session() -> SessionContext {
	expect_context::<SessionContext>()
}
