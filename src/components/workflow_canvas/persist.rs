//! Mirrors the graph into a session-scoped storage slot.
//!
//! Writes are trailing-debounced: each store change marks the mirror dirty and
//! restarts a timer, so a burst of edits (a drag, say) lands as one write.
//! Nothing here ever blocks or rejects an in-memory edit.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::error::PersistError;
use super::store::{GraphChange, GraphStore, Subscription};
use super::types::{Edge, GraphData, Node};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct PersistedGraphRef<'a> {
	version: u32,
	nodes: &'a [Node],
	edges: &'a [Edge],
}

#[derive(Deserialize)]
struct PersistedGraph {
	version: u32,
	#[serde(default)]
	nodes: Vec<Node>,
	#[serde(default)]
	edges: Vec<Edge>,
}

pub fn encode(graph: &GraphData) -> Result<String, PersistError> {
	serde_json::to_string(&PersistedGraphRef {
		version: FORMAT_VERSION,
		nodes: &graph.nodes,
		edges: &graph.edges,
	})
	.map_err(PersistError::Encode)
}

pub fn decode(payload: &str) -> Result<GraphData, PersistError> {
	let persisted: PersistedGraph = serde_json::from_str(payload).map_err(PersistError::Decode)?;
	if persisted.version != FORMAT_VERSION {
		return Err(PersistError::UnsupportedVersion(persisted.version));
	}
	Ok(GraphData {
		nodes: persisted.nodes,
		edges: persisted.edges,
	})
}

/// A single key/value slot that outlives the current view.
pub trait SessionSlot {
	fn load(&self) -> Result<Option<String>, PersistError>;
	fn save(&self, payload: &str) -> Result<(), PersistError>;
}

/// `window.sessionStorage` under one fixed key.
pub struct BrowserSessionSlot {
	key: String,
}

impl BrowserSessionSlot {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into() }
	}

	fn storage() -> Result<web_sys::Storage, PersistError> {
		let window =
			web_sys::window().ok_or_else(|| PersistError::Unavailable("no window".into()))?;
		window
			.session_storage()
			.map_err(|err| PersistError::Unavailable(format!("{err:?}")))?
			.ok_or_else(|| PersistError::Unavailable("sessionStorage is disabled".into()))
	}
}

impl SessionSlot for BrowserSessionSlot {
	fn load(&self) -> Result<Option<String>, PersistError> {
		Self::storage()?
			.get_item(&self.key)
			.map_err(|err| PersistError::Read(format!("{err:?}")))
	}

	fn save(&self, payload: &str) -> Result<(), PersistError> {
		Self::storage()?
			.set_item(&self.key, payload)
			.map_err(|err| PersistError::Write(format!("{err:?}")))
	}
}

/// Restartable one-shot timer driving the trailing flush.
pub trait FlushTimer {
	/// Replace any pending callback with `flush`, due after `delay`.
	fn schedule(&mut self, delay: Duration, flush: Box<dyn FnOnce()>);
	fn cancel(&mut self);
}

/// `setTimeout`-backed timer.
#[derive(Default)]
pub struct BrowserTimer {
	handle: Option<TimeoutHandle>,
}

impl FlushTimer for BrowserTimer {
	fn schedule(&mut self, delay: Duration, flush: Box<dyn FnOnce()>) {
		self.cancel();
		match set_timeout_with_handle(flush, delay) {
			Ok(handle) => self.handle = Some(handle),
			Err(err) => warn!("could not schedule graph flush: {err:?}"),
		}
	}

	fn cancel(&mut self) {
		if let Some(handle) = self.handle.take() {
			handle.clear();
		}
	}
}

pub struct GraphSync {
	store: GraphStore,
	slot: Box<dyn SessionSlot>,
	timer: RefCell<Box<dyn FlushTimer>>,
	delay: Duration,
	dirty: Cell<bool>,
	_subscription: RefCell<Option<Subscription>>,
}

impl GraphSync {
	/// Start mirroring `store` into `slot`.
	pub fn attach(
		store: GraphStore,
		slot: Box<dyn SessionSlot>,
		timer: Box<dyn FlushTimer>,
		delay: Duration,
	) -> Rc<Self> {
		let sync = Rc::new(Self {
			store: store.clone(),
			slot,
			timer: RefCell::new(timer),
			delay,
			dirty: Cell::new(false),
			_subscription: RefCell::new(None),
		});
		let weak = Rc::downgrade(&sync);
		let subscription = store.subscribe(move |change| {
			if let Some(sync) = weak.upgrade() {
				sync.on_change(change);
			}
		});
		*sync._subscription.borrow_mut() = Some(subscription);
		sync
	}

	fn on_change(self: &Rc<Self>, change: &GraphChange) {
		// Hydration writes back exactly what the slot already holds.
		if *change == GraphChange::Hydrated {
			return;
		}
		self.dirty.set(true);
		let weak = Rc::downgrade(self);
		self.timer.borrow_mut().schedule(
			self.delay,
			Box::new(move || {
				if let Some(sync) = weak.upgrade() {
					sync.flush_logged();
				}
			}),
		);
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty.get()
	}

	/// Write now if anything changed since the last write.
	///
	/// A failed write leaves the mirror dirty, so the next flush retries.
	pub fn flush(&self) -> Result<bool, PersistError> {
		self.timer.borrow_mut().cancel();
		if !self.dirty.get() {
			return Ok(false);
		}
		let payload = self.store.with_graph(encode)?;
		self.slot.save(&payload)?;
		self.dirty.set(false);
		debug!("persisted graph ({} bytes)", payload.len());
		Ok(true)
	}

	pub fn flush_logged(&self) {
		if let Err(err) = self.flush() {
			warn!("graph not persisted, keeping in-memory copy: {err}");
		}
	}

	/// Load the slot into the store. `Ok(false)` when the slot is empty.
	pub fn hydrate(&self) -> Result<bool, PersistError> {
		let Some(payload) = self.slot.load()? else {
			return Ok(false);
		};
		let graph = decode(&payload)?;
		info!(
			"restored {} nodes and {} edges from session",
			graph.nodes.len(),
			graph.edges.len()
		);
		self.store.hydrate(graph);
		Ok(true)
	}
}

impl Drop for GraphSync {
	fn drop(&mut self) {
		self.timer.get_mut().cancel();
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;

	/// In-memory slot that counts writes and can be told to fail.
	#[derive(Clone, Default)]
	pub struct MemorySlot {
		pub value: Rc<RefCell<Option<String>>>,
		pub writes: Rc<Cell<usize>>,
		pub fail_writes: Rc<Cell<bool>>,
	}

	impl SessionSlot for MemorySlot {
		fn load(&self) -> Result<Option<String>, PersistError> {
			Ok(self.value.borrow().clone())
		}

		fn save(&self, payload: &str) -> Result<(), PersistError> {
			if self.fail_writes.get() {
				return Err(PersistError::Write("quota exceeded".into()));
			}
			self.writes.set(self.writes.get() + 1);
			*self.value.borrow_mut() = Some(payload.to_owned());
			Ok(())
		}
	}

	/// Timer fired by hand; holds at most one pending callback.
	#[derive(Clone, Default)]
	pub struct ManualTimer {
		pending: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
		pub scheduled: Rc<Cell<usize>>,
	}

	impl ManualTimer {
		pub fn is_pending(&self) -> bool {
			self.pending.borrow().is_some()
		}

		pub fn fire(&self) {
			let pending = self.pending.borrow_mut().take();
			if let Some(flush) = pending {
				flush();
			}
		}
	}

	impl FlushTimer for ManualTimer {
		fn schedule(&mut self, _delay: Duration, flush: Box<dyn FnOnce()>) {
			self.scheduled.set(self.scheduled.get() + 1);
			*self.pending.borrow_mut() = Some(flush);
		}

		fn cancel(&mut self) {
			self.pending.borrow_mut().take();
		}
	}
}
