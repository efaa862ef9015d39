//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod i18n;
mod pages;
mod theme;

pub use crate::components::workflow_canvas::{
	CanvasConfig, CatalogKind, Edge, EdgeId, GraphChange, GraphData, GraphStore, Node, NodeId,
	PersistError, Point, Subscription,
};
use crate::components::workflow_canvas::{GraphSession, SessionContext};
use crate::i18n::Locale;
use crate::theme::Theme;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::workflow::Workflow;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the landing page, the full-screen editor and a 404.
///
/// Every diagram view under the router shares one session-backed graph.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let locale = RwSignal::new(Locale::default());
	let theme = RwSignal::new(Theme::default());
	provide_context(locale);
	provide_context(theme);
	SessionContext::provide(GraphSession::in_browser(&CanvasConfig::default()));

	view! {
		<Html
			attr:lang=move || locale.get().tag()
			attr:dir=move || locale.get().dir()
			attr:data-theme=move || theme.get().name()
		/>

		// sets the document title
		<Title text="Workflow Canvas" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/:locale") view=Home />
				<Route path=path!("/:locale/workflow-demo") view=Workflow />
			</Routes>
		</Router>
	}
}
