use leptos::prelude::*;

use super::header::SiteHeader;
use super::{Page, sync_route_locale};
use crate::components::workflow_canvas::{DiagramView, Variant};

/// Full-screen editor route.
#[component]
pub fn Workflow() -> impl IntoView {
	sync_route_locale();

	view! {
		<div class="page workflow">
			<SiteHeader page=Page::Workflow />
			<main class="workflow-main">
				<DiagramView variant=Variant::FullScreen />
			</main>
		</div>
	}
}
