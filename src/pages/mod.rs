pub mod home;
pub mod not_found;
pub mod workflow;

mod header;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::i18n::{Locale, use_locale};

/// Routed pages that carry a locale prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
	Home,
	Workflow,
}

impl Page {
	pub fn path(self, locale: Locale) -> String {
		match self {
			Page::Home => format!("/{}", locale.tag()),
			Page::Workflow => format!("/{}/workflow-demo", locale.tag()),
		}
	}
}

/// Keep the locale context in step with the `:locale` route segment.
fn sync_route_locale() {
	let params = use_params_map();
	let locale = use_locale();
	Effect::new(move |_| {
		let next = params
			.with(|p| p.get("locale"))
			.map(|tag| Locale::from_tag(&tag))
			.unwrap_or_default();
		if locale.get_untracked() != next {
			locale.set(next);
		}
	});
}
