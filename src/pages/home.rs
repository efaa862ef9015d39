use leptos::prelude::*;

use super::header::SiteHeader;
use super::{Page, sync_route_locale};
use crate::components::workflow_canvas::{DiagramView, Variant};
use crate::i18n::{Msg, t, use_locale};

/// Landing page with the embedded diagram widget.
#[component]
pub fn Home() -> impl IntoView {
	sync_route_locale();
	let locale = use_locale();

	view! {
		<div class="page home">
			<SiteHeader page=Page::Home />
			<section class="hero">
				<div class="hero-copy">
					<h1>{move || t(locale.get(), Msg::HeroTitle)}</h1>
					<p class="subtitle">{move || t(locale.get(), Msg::HeroSubtitle)}</p>
				</div>
				<div class="hero-widget">
					<DiagramView variant=Variant::Embedded />
				</div>
			</section>
		</div>
	}
}
