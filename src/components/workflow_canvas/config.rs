use std::time::Duration;

use super::types::Size;

/// Tunables for the diagram editor. `Default` matches the shipped widget.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
	/// Rendered node box; anchors sit on its left/right middles.
	pub node_size: Size,
	/// Area a freshly dropped node must fit into, measured from its origin.
	pub placement_footprint: Size,
	/// Minimum distance of a dropped node from the top/left edges.
	pub placement_inset: f64,
	/// Lower bound for both coordinates while dragging an existing node.
	pub min_position: f64,
	/// Pointer travel (screen px) before a press on a node becomes a drag.
	pub drag_threshold: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub zoom_step: f64,
	pub persist_debounce: Duration,
	pub storage_key: String,
	pub show_minimap: bool,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			node_size: Size::new(150.0, 56.0),
			placement_footprint: Size::new(150.0, 80.0),
			placement_inset: 20.0,
			min_position: 20.0,
			drag_threshold: 5.0,
			min_zoom: 0.25,
			max_zoom: 2.5,
			zoom_step: 1.2,
			persist_debounce: Duration::from_millis(300),
			storage_key: "workflow-canvas:graph".into(),
			show_minimap: false,
		}
	}
}

impl CanvasConfig {
	/// Defaults for the full-screen editor.
	pub fn full_screen() -> Self {
		Self {
			show_minimap: true,
			..Self::default()
		}
	}
}
