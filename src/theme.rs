//! Light/dark color tokens shared by the page chrome and the canvas painter.

use leptos::prelude::*;

/// Page color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	Light,
	#[default]
	Dark,
}

/// Colors the canvas painter needs. All values are CSS color strings.
#[derive(Clone, Copy, Debug)]
pub struct ThemeTokens {
	pub background: &'static str,
	pub grid: &'static str,
	pub node_fill: &'static str,
	pub node_border: &'static str,
	pub node_selected: &'static str,
	pub text: &'static str,
	pub muted_text: &'static str,
	pub edge_from: &'static str,
	pub edge_to: &'static str,
	pub flow: &'static str,
	pub primary: &'static str,
	pub danger: &'static str,
}

const DARK: ThemeTokens = ThemeTokens {
	background: "#0b1020",
	grid: "rgba(255, 255, 255, 0.04)",
	node_fill: "rgba(255, 255, 255, 0.08)",
	node_border: "rgba(255, 255, 255, 0.16)",
	node_selected: "rgba(255, 255, 255, 0.6)",
	text: "#ffffff",
	muted_text: "rgba(255, 255, 255, 0.45)",
	edge_from: "rgba(156, 76, 157, 0.85)",
	edge_to: "rgba(59, 130, 246, 0.85)",
	flow: "rgba(255, 255, 255, 0.7)",
	primary: "#9C4C9D",
	danger: "rgba(239, 68, 68, 0.9)",
};

const LIGHT: ThemeTokens = ThemeTokens {
	background: "#f8fafc",
	grid: "rgba(15, 23, 42, 0.06)",
	node_fill: "#ffffff",
	node_border: "rgba(15, 23, 42, 0.14)",
	node_selected: "rgba(15, 23, 42, 0.55)",
	text: "#0f172a",
	muted_text: "rgba(15, 23, 42, 0.45)",
	edge_from: "rgba(156, 76, 157, 0.9)",
	edge_to: "rgba(37, 99, 235, 0.9)",
	flow: "rgba(255, 255, 255, 0.9)",
	primary: "#9C4C9D",
	danger: "rgba(220, 38, 38, 0.9)",
};

impl Theme {
	pub fn tokens(self) -> &'static ThemeTokens {
		match self {
			Theme::Light => &LIGHT,
			Theme::Dark => &DARK,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}
}

/// The active theme, provided at the app root.
pub fn use_theme() -> RwSignal<Theme> {
	expect_context::<RwSignal<Theme>>()
}
