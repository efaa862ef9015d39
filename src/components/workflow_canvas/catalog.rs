//! The fixed set of components a visitor can place on the board.

use serde::{Deserialize, Serialize};

use crate::i18n::Msg;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
	Cloud,
	Database,
	Ai,
	Api,
	Server,
	Security,
	Automation,
	Container,
	/// A kind this build does not know, e.g. from an older persisted graph.
	#[serde(other)]
	Unknown,
}

impl CatalogKind {
	pub fn key(self) -> &'static str {
		match self {
			CatalogKind::Cloud => "cloud",
			CatalogKind::Database => "database",
			CatalogKind::Ai => "ai",
			CatalogKind::Api => "api",
			CatalogKind::Server => "server",
			CatalogKind::Security => "security",
			CatalogKind::Automation => "automation",
			CatalogKind::Container => "container",
			CatalogKind::Unknown => "unknown",
		}
	}

	pub fn from_key(key: &str) -> Self {
		CATALOG
			.iter()
			.map(|item| item.kind)
			.find(|kind| kind.key() == key)
			.unwrap_or(CatalogKind::Unknown)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
	Services,
	Infrastructure,
	Connections,
}

impl Category {
	pub const ALL: [Category; 3] = [
		Category::Services,
		Category::Infrastructure,
		Category::Connections,
	];

	pub fn title(self) -> Msg {
		match self {
			Category::Services => Msg::CategoryServices,
			Category::Infrastructure => Msg::CategoryInfrastructure,
			Category::Connections => Msg::CategoryConnections,
		}
	}
}

/// Icon shown in the palette and on node tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconRef {
	Cloud,
	Database,
	Cpu,
	Globe,
	Server,
	Shield,
	Zap,
	Box,
	Generic,
}

impl IconRef {
	pub fn for_kind(kind: CatalogKind) -> Self {
		match kind {
			CatalogKind::Cloud => IconRef::Cloud,
			CatalogKind::Database => IconRef::Database,
			CatalogKind::Ai => IconRef::Cpu,
			CatalogKind::Api => IconRef::Globe,
			CatalogKind::Server => IconRef::Server,
			CatalogKind::Security => IconRef::Shield,
			CatalogKind::Automation => IconRef::Zap,
			CatalogKind::Container => IconRef::Box,
			CatalogKind::Unknown => IconRef::Generic,
		}
	}

	/// Single-glyph rendering, usable both in DOM text and `fill_text`.
	pub fn glyph(self) -> &'static str {
		match self {
			IconRef::Cloud => "☁",
			IconRef::Database => "⛁",
			IconRef::Cpu => "◈",
			IconRef::Globe => "◍",
			IconRef::Server => "▤",
			IconRef::Shield => "⛨",
			IconRef::Zap => "ϟ",
			IconRef::Box => "▣",
			IconRef::Generic => "◻",
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct CatalogItem {
	pub kind: CatalogKind,
	pub label: Msg,
	pub description: Msg,
	pub icon: IconRef,
	pub accent: &'static str,
	pub category: Category,
}

const fn item(
	kind: CatalogKind,
	label: Msg,
	description: Msg,
	icon: IconRef,
	accent: &'static str,
	category: Category,
) -> CatalogItem {
	CatalogItem {
		kind,
		label,
		description,
		icon,
		accent,
		category,
	}
}

pub const CATALOG: &[CatalogItem] = &[
	item(
		CatalogKind::Cloud,
		Msg::CloudLabel,
		Msg::CloudDescription,
		IconRef::Cloud,
		"#3B82F6",
		Category::Services,
	),
	item(
		CatalogKind::Database,
		Msg::DatabaseLabel,
		Msg::DatabaseDescription,
		IconRef::Database,
		"#10B981",
		Category::Infrastructure,
	),
	item(
		CatalogKind::Ai,
		Msg::AiLabel,
		Msg::AiDescription,
		IconRef::Cpu,
		"#8B5CF6",
		Category::Services,
	),
	item(
		CatalogKind::Api,
		Msg::ApiLabel,
		Msg::ApiDescription,
		IconRef::Globe,
		"#F59E0B",
		Category::Connections,
	),
	item(
		CatalogKind::Server,
		Msg::ServerLabel,
		Msg::ServerDescription,
		IconRef::Server,
		"#EF4444",
		Category::Infrastructure,
	),
	item(
		CatalogKind::Security,
		Msg::SecurityLabel,
		Msg::SecurityDescription,
		IconRef::Shield,
		"#EC4899",
		Category::Services,
	),
	item(
		CatalogKind::Automation,
		Msg::AutomationLabel,
		Msg::AutomationDescription,
		IconRef::Zap,
		"#14B8A6",
		Category::Services,
	),
	item(
		CatalogKind::Container,
		Msg::ContainerLabel,
		Msg::ContainerDescription,
		IconRef::Box,
		"#6366F1",
		Category::Infrastructure,
	),
];

pub fn lookup(kind: CatalogKind) -> Option<&'static CatalogItem> {
	CATALOG.iter().find(|item| item.kind == kind)
}

pub fn in_category(category: Category) -> impl Iterator<Item = &'static CatalogItem> {
	CATALOG.iter().filter(move |item| item.category == category)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_catalog_kind_round_trips_through_its_key() {
		for item in CATALOG {
			assert_eq!(CatalogKind::from_key(item.kind.key()), item.kind);
			assert_eq!(IconRef::for_kind(item.kind), item.icon);
		}
	}

	#[test]
	fn unknown_keys_fall_back_to_generic_icon() {
		let kind = CatalogKind::from_key("mainframe");
		assert_eq!(kind, CatalogKind::Unknown);
		assert_eq!(IconRef::for_kind(kind), IconRef::Generic);
		assert!(lookup(kind).is_none());

		let parsed: CatalogKind = serde_json::from_str("\"mainframe\"").unwrap();
		assert_eq!(parsed, CatalogKind::Unknown);
	}

	#[test]
	fn categories_partition_the_catalog() {
		let total: usize = Category::ALL.iter().map(|c| in_category(*c).count()).sum();
		assert_eq!(total, CATALOG.len());
		assert_eq!(in_category(Category::Connections).count(), 1);
		assert_eq!(lookup(CatalogKind::Database).map(|i| i.category), Some(Category::Infrastructure));
	}
}
