use leptos::prelude::*;

use crate::i18n::{Msg, t, use_locale};

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	let locale = use_locale();

	view! {
		<div class="page not-found">
			<h1>{move || t(locale.get(), Msg::NotFoundTitle)}</h1>
			<p>{move || t(locale.get(), Msg::NotFoundBody)}</p>
			<a class="btn btn-primary" href="/">{move || t(locale.get(), Msg::BackToHome)}</a>
		</div>
	}
}
