use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, DragEvent, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::catalog::CatalogKind;
use super::geometry::{CanvasRect, to_canvas_local};
use super::palette::DRAG_MIME;
use super::render;
use super::state::CanvasState;
use super::types::Point;
use crate::i18n::use_locale;
use crate::theme::use_theme;

const FRAME_DT: f64 = 0.016;

/// `Copy` handle to a view's [`CanvasState`], shared by the canvas and the
/// surrounding controls. Calls after disposal are ignored.
#[derive(Clone, Copy)]
pub struct CanvasHandle(StoredValue<CanvasState, LocalStorage>);

impl CanvasHandle {
	pub fn new(state: CanvasState) -> Self {
		Self(StoredValue::new_local(state))
	}

	pub fn update<R>(&self, f: impl FnOnce(&mut CanvasState) -> R) -> Option<R> {
		self.0.try_update_value(f)
	}
}

fn canvas_rect(canvas: &HtmlCanvasElement) -> CanvasRect {
	let rect = canvas.get_bounding_client_rect();
	CanvasRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Match the backing store to the parent box. Returns the new size.
fn sync_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0));
	if canvas.width() != w as u32 {
		canvas.set_width(w as u32);
	}
	if canvas.height() != h as u32 {
		canvas.set_height(h as u32);
	}
	(w, h)
}

/// Self-rescheduling frame callback. The callback owns a clone of the loop,
/// so the cycle is only broken by [`FrameLoop::stop`].
struct FrameLoop<T> {
	callback: Rc<RefCell<Option<T>>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl<T> Clone for FrameLoop<T> {
	fn clone(&self) -> Self {
		Self {
			callback: self.callback.clone(),
			pending: self.pending.clone(),
		}
	}
}

impl<T> FrameLoop<T> {
	fn new() -> Self {
		Self {
			callback: Rc::new(RefCell::new(None)),
			pending: Rc::new(Cell::new(None)),
		}
	}

	fn start(&self, callback: T) {
		*self.callback.borrow_mut() = Some(callback);
	}

	/// Queue the callback for the next frame, if it is still installed.
	fn request(&self, schedule: impl FnOnce(&T) -> Option<i32>) {
		if let Some(cb) = self.callback.borrow().as_ref() {
			self.pending.set(schedule(cb));
		}
	}

	/// Cancel the queued frame and drop the callback. False if already stopped.
	fn stop(&self, cancel: impl FnOnce(i32)) -> bool {
		if let Some(id) = self.pending.take() {
			cancel(id);
		}
		self.callback.borrow_mut().take().is_some()
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

fn cancel_frame(id: i32) {
	if let Some(window) = web_sys::window() {
		let _ = window.cancel_animation_frame(id);
	}
}

/// The drawing surface. Sizes itself to its parent element.
#[component]
pub fn WorkflowCanvas(handle: CanvasHandle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let locale = use_locale();
	let theme = use_theme();
	let frames = FrameLoop::<Closure<dyn FnMut()>>::new();

	let cleanup = StoredValue::new_local(frames.clone());
	on_cleanup(move || {
		if cleanup.try_with_value(|frames| frames.stop(cancel_frame)) == Some(true) {
			debug!("frame loop released");
		}
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			warn!("2d canvas context unavailable");
			return;
		};

		// A re-run replaces the loop rather than stacking a second one.
		frames.stop(cancel_frame);
		let inner = frames.clone();
		frames.start(Closure::new(move || {
			// Stop once the view has been torn down.
			if !canvas.is_connected() {
				debug!("canvas detached, stopping frame loop");
				return;
			}
			let (w, h) = sync_size(&canvas);
			let tokens = theme.try_get_untracked().unwrap_or_default().tokens();
			let locale = locale.try_get_untracked().unwrap_or_default();
			let painted = handle.update(|s| {
				s.locale = locale;
				s.resize(w, h);
				s.tick(FRAME_DT);
				render::render(s, tokens, &ctx);
			});
			if painted.is_some() {
				inner.request(request_frame);
			}
		}));
		frames.request(request_frame);
	});

	// Runs `f` with the event point mapped into canvas-local space.
	let at_pointer = move |ev: &MouseEvent, f: &dyn Fn(&mut CanvasState, Point)| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let rect = canvas_rect(&canvas);
		let client = client_point(ev);
		handle.update(|s| {
			let local = to_canvas_local(client, &rect, s.rtl());
			f(s, local);
		});
	};

	let on_mousedown = move |ev: MouseEvent| at_pointer(&ev, &|s, p| s.pointer_down(p));
	let on_mousemove = move |ev: MouseEvent| at_pointer(&ev, &|s, p| s.pointer_move(p));
	let on_mouseup = move |_: MouseEvent| {
		handle.update(CanvasState::pointer_up);
	};
	let on_mouseleave = move |_: MouseEvent| {
		handle.update(CanvasState::pointer_leave);
	};
	let on_dblclick = move |ev: MouseEvent| at_pointer(&ev, &|s, p| s.double_click(p));
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let delta = ev.delta_y();
		at_pointer(&ev, &|s, p| s.wheel(p, delta));
	};

	let on_dragover = move |ev: DragEvent| {
		// Required for the drop event to fire.
		ev.prevent_default();
		if let Some(dt) = ev.data_transfer() {
			dt.set_drop_effect("copy");
		}
		handle.update(|s| s.hover.drop_target = true);
	};
	let on_dragleave = move |_: DragEvent| {
		handle.update(|s| s.hover.drop_target = false);
	};
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		handle.update(|s| s.hover.drop_target = false);
		let Some(key) = ev.data_transfer().and_then(|dt| dt.get_data(DRAG_MIME).ok()) else {
			return;
		};
		if key.is_empty() {
			debug!("drop without a palette payload");
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let rect = canvas_rect(&canvas);
		let client = client_point(&ev);
		let kind = CatalogKind::from_key(&key);
		handle.update(|s| {
			s.place_item(kind, client, &rect);
		});
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="workflow-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			on:dragover=on_dragover
			on:dragleave=on_dragleave
			on:drop=on_drop
			style="display: block; cursor: default;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stopping_the_frame_loop_releases_its_callback() {
		let frames: FrameLoop<Box<dyn FnMut()>> = FrameLoop::new();
		let inner = frames.clone();
		frames.start(Box::new(move || inner.request(|_| None)));
		assert_eq!(Rc::strong_count(&frames.callback), 2);

		frames.request(|_| Some(7));
		let mut cancelled = None;
		assert!(frames.stop(|id| cancelled = Some(id)));
		assert_eq!(cancelled, Some(7));
		assert_eq!(Rc::strong_count(&frames.callback), 1);

		assert!(!frames.stop(|_| panic!("no frame is queued")));
		frames.request(|_| panic!("a stopped loop never reschedules"));
	}
}
