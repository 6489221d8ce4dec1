//! Sunburst state shared between the component, the animation loop and the renderer.
//!
//! Bundles the laid-out hierarchy with the zoom controller, the configuration
//! and per-node colors. Created once when the component mounts, then mutated
//! by focus requests and animation ticks.

use super::error::SunburstError;
use super::hierarchy::Hierarchy;
use super::scale::SunburstConfig;
use super::theme::{Color, Theme};
use super::types::{NodeId, SunburstNode};
use super::zoom::{Frame, ZoomController};

/// Everything one mounted chart needs between frames.
pub struct SunburstState {
	/// Laid-out input tree.
	pub hierarchy: Hierarchy,
	/// Focus and transition state.
	pub zoom: ZoomController,
	/// Configuration fitted to the current viewport.
	pub config: SunburstConfig,
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	/// Node under the pointer.
	pub hovered: Option<NodeId>,
	/// Set when something other than a transition needs a redraw.
	pub dirty: bool,
	colors: Vec<Color>,
}

impl SunburstState {
	/// Lay out `data` and fit the chart into a `width` x `height` canvas.
	pub fn new(
		data: &SunburstNode,
		width: f64,
		height: f64,
		config: SunburstConfig,
		theme: &Theme,
	) -> Result<Self, SunburstError> {
		let hierarchy = Hierarchy::build(data)?;
		let zoom = ZoomController::new(&hierarchy);
		let colors = theme.assign_colors(&hierarchy);
		Ok(Self {
			hierarchy,
			zoom,
			config: config.for_viewport(width, height),
			width,
			height,
			hovered: None,
			dirty: true,
			colors,
		})
	}

	/// Zoom to `target`, or back to the root for `None`.
	pub fn focus_on(&mut self, target: Option<NodeId>, now: f64) -> Result<(), SunburstError> {
		self.zoom
			.request_focus(&self.hierarchy, target, now, &self.config)?;
		// The draw order and decoration change even if the domains do not.
		self.dirty = true;
		Ok(())
	}

	/// Advance the animation. Returns whether a redraw is needed.
	pub fn tick(&mut self, now: f64) -> bool {
		let moved = self.zoom.tick(now, &self.config);
		let redraw = moved || self.dirty;
		self.dirty = false;
		redraw
	}

	/// Geometry for the current view.
	pub fn frame(&self) -> Frame {
		self.zoom.frame(&self.hierarchy, &self.config)
	}

	/// Fill for `id`; mid gray for unknown ids.
	pub fn color(&self, id: NodeId) -> Color {
		self.colors
			.get(id.index())
			.copied()
			.unwrap_or(Color::rgb(128, 128, 128))
	}

	/// Chart center in canvas pixels.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Node under a canvas position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (cx, cy) = self.center();
		self.zoom
			.node_at(&self.hierarchy, &self.config, sx - cx, sy - cy)
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<NodeId>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	/// Tooltip for the hovered node.
	pub fn tooltip(&self) -> Option<String> {
		self.hovered.and_then(|id| self.hierarchy.tooltip(id))
	}

	/// Refit the chart to a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.config = self.config.clone().for_viewport(width, height);
		self.dirty = true;
	}
}
