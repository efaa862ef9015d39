use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use web_sys::MouseEvent;

use super::Page;
use crate::i18n::{Msg, t, use_locale};
use crate::theme::{Theme, use_theme};

/// Brand, language switch and theme toggle.
#[component]
pub fn SiteHeader(page: Page) -> impl IntoView {
	let locale = use_locale();
	let theme = use_theme();
	let navigate = use_navigate();

	let switch_language = move |_: MouseEvent| {
		let next = locale.get_untracked().toggled();
		navigate(&page.path(next), Default::default());
	};

	view! {
		<header class="site-header">
			<a class="brand" href=move || Page::Home.path(locale.get())>
				"Workflow Canvas"
			</a>
			<nav class="site-actions">
				<button class="btn btn-ghost" on:click=switch_language>
					{move || t(locale.get(), Msg::SwitchLanguage)}
				</button>
				<button
					class="btn btn-ghost"
					title=move || t(locale.get(), Msg::ToggleTheme)
					on:click=move |_| theme.update(|th| *th = th.toggled())
				>
					{move || if theme.get() == Theme::Dark { "☾" } else { "☀" }}
				</button>
			</nav>
		</header>
	}
}
