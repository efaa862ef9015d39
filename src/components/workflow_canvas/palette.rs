use leptos::prelude::*;
use log::debug;
use web_sys::DragEvent;

use super::catalog::{Category, CatalogItem, in_category};
use crate::i18n::{Msg, t, use_locale};

/// `DataTransfer` type carrying the dragged catalog key.
pub const DRAG_MIME: &str = "application/x-workflow-node";

/// Draggable catalog, grouped by category.
#[component]
pub fn Palette() -> impl IntoView {
	let locale = use_locale();

	view! {
		<aside class="palette">
			<h3 class="palette-title">{move || t(locale.get(), Msg::PaletteTitle)}</h3>
			<p class="palette-hint">{move || t(locale.get(), Msg::PaletteHint)}</p>
			{Category::ALL
				.into_iter()
				.map(|category| {
					view! {
						<section class="palette-group">
							<h4>{move || t(locale.get(), category.title())}</h4>
							{in_category(category)
								.map(|item| view! { <PaletteEntry item=item /> })
								.collect_view()}
						</section>
					}
				})
				.collect_view()}
		</aside>
	}
}

#[component]
fn PaletteEntry(item: &'static CatalogItem) -> impl IntoView {
	let locale = use_locale();
	let kind = item.kind;

	let on_dragstart = move |ev: DragEvent| {
		let Some(dt) = ev.data_transfer() else {
			return;
		};
		if dt.set_data(DRAG_MIME, kind.key()).is_ok() {
			dt.set_effect_allowed("copy");
			debug!("dragging {}", kind.key());
		}
	};

	view! {
		<div
			class="palette-item"
			draggable="true"
			on:dragstart=on_dragstart
			style=format!("--accent: {}", item.accent)
		>
			<span class="palette-icon">{item.icon.glyph()}</span>
			<span class="palette-text">
				<span class="palette-label">{move || t(locale.get(), item.label)}</span>
				<span class="palette-description">{move || t(locale.get(), item.description)}</span>
			</span>
		</div>
	}
}
