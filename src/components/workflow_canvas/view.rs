use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use web_sys::MouseEvent;

use super::component::{CanvasHandle, WorkflowCanvas};
use super::config::CanvasConfig;
use super::palette::Palette;
use super::session::use_graph_session;
use super::state::CanvasState;
use super::store::GraphStore;
use crate::i18n::{Msg, t, use_locale};

/// How a diagram view is embedded in the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
	/// Inside the landing page, with an expand button.
	#[default]
	Embedded,
	/// The dedicated editor route, with a back button and minimap.
	FullScreen,
}

impl Variant {
	fn config(self) -> CanvasConfig {
		match self {
			Variant::Embedded => CanvasConfig::default(),
			Variant::FullScreen => CanvasConfig::full_screen(),
		}
	}

	fn class(self) -> &'static str {
		match self {
			Variant::Embedded => "diagram-view embedded",
			Variant::FullScreen => "diagram-view full-screen",
		}
	}
}

fn counts_of(store: &GraphStore) -> (usize, usize) {
	(store.node_count(), store.edge_count())
}

/// Palette, canvas and controls over the shared session graph.
///
/// Mounting hydrates the session on first use; unmounting flushes any
/// pending write so navigating between views keeps the board.
#[component]
pub fn DiagramView(#[prop(optional)] variant: Variant) -> impl IntoView {
	let session = use_graph_session();
	let locale = use_locale();
	let navigate = use_navigate();

	session.mount();
	on_cleanup(move || session.unmount());

	let store = session.store().unwrap_or_default();
	let counts = RwSignal::new(counts_of(&store));
	let subscription = store.subscribe({
		let store = store.clone();
		move |_| {
			let next = counts_of(&store);
			if counts.try_get_untracked() != Some(next) {
				counts.try_set(next);
			}
		}
	});
	// Dropped, and so unsubscribed, with this view's owner.
	let _subscription = StoredValue::new_local(subscription);

	let handle = CanvasHandle::new(CanvasState::new(store, variant.config(), 0.0, 0.0));

	let nav_button = match variant {
		Variant::Embedded => {
			let expand = move |_: MouseEvent| {
				navigate(
					&format!("/{}/workflow-demo", locale.get_untracked().tag()),
					Default::default(),
				)
			};
			view! {
				<button class="btn btn-primary" on:click=expand>
					{move || t(locale.get(), Msg::Expand)}
				</button>
			}
			.into_any()
		}
		Variant::FullScreen => {
			let back = move |_: MouseEvent| navigate(&format!("/{}", locale.get_untracked().tag()), Default::default());
			view! {
				<button class="btn" on:click=back>
					{move || t(locale.get(), Msg::BackToHome)}
				</button>
			}
			.into_any()
		}
	};

	view! {
		<div class=variant.class()>
			<header class="diagram-toolbar">
				<div class="diagram-heading">
					<h2>{move || t(locale.get(), Msg::WorkflowTitle)}</h2>
					<p>{move || t(locale.get(), Msg::WorkflowSubtitle)}</p>
				</div>
				<div class="diagram-stats">
					<span class="stat">
						<strong>{move || counts.get().0}</strong>
						" "
						{move || t(locale.get(), Msg::Nodes)}
					</span>
					<span class="stat">
						<strong>{move || counts.get().1}</strong>
						" "
						{move || t(locale.get(), Msg::Connections)}
					</span>
				</div>
				<div class="diagram-actions">
					<button
						class="btn btn-icon"
						title=move || t(locale.get(), Msg::ZoomOut)
						on:click=move |_| {
							handle.update(CanvasState::zoom_out);
						}
					>
						"−"
					</button>
					<button
						class="btn btn-icon"
						title=move || t(locale.get(), Msg::ZoomIn)
						on:click=move |_| {
							handle.update(CanvasState::zoom_in);
						}
					>
						"+"
					</button>
					<button
						class="btn btn-icon"
						title=move || t(locale.get(), Msg::FitView)
						on:click=move |_| {
							handle.update(CanvasState::fit_view);
						}
					>
						"⤢"
					</button>
					<button
						class="btn btn-danger"
						disabled=move || counts.get() == (0, 0)
						on:click=move |_| {
							handle.update(CanvasState::clear_board);
						}
					>
						{move || t(locale.get(), Msg::ClearAll)}
					</button>
					{nav_button}
				</div>
			</header>
			<div class="diagram-body">
				<Palette />
				<div class="canvas-host">
					<WorkflowCanvas handle=handle />
				</div>
			</div>
			<footer class="diagram-help">
				{move || t(locale.get(), Msg::ConnectHelp)}
				" · "
				{move || t(locale.get(), Msg::RemoveHelp)}
			</footer>
		</div>
	}
}
