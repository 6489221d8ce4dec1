//! Hierarchy data structures for input to the sunburst component.

use serde::Deserialize;

/// A node of the input hierarchy.
///
/// Internal nodes carry `children`; leaves carry a `size`. Child order is
/// significant: it determines the angular order of the slices.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SunburstNode {
	/// Display label. May be empty.
	#[serde(default)]
	pub name: String,
	/// Leaf weight. Ignored on nodes that have children.
	#[serde(default, alias = "value")]
	pub size: Option<f64>,
	/// Ordered children.
	#[serde(default)]
	pub children: Vec<SunburstNode>,
}

impl SunburstNode {
	/// Creates a weighted leaf.
	pub fn leaf(name: impl Into<String>, size: f64) -> Self {
		Self {
			name: name.into(),
			size: Some(size),
			children: Vec::new(),
		}
	}

	/// Creates an internal node from its children.
	pub fn branch(name: impl Into<String>, children: Vec<SunburstNode>) -> Self {
		Self {
			name: name.into(),
			size: None,
			children,
		}
	}
}

/// Canonical partition coordinates of a node.
///
/// `x0..x1` is the angular extent and `y0..y1` the radial band, both in the
/// unit interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutRect {
	/// Angular start in `[0, 1]`.
	pub x0: f64,
	/// Angular end in `[0, 1]`.
	pub x1: f64,
	/// Radial start in `[0, 1]`.
	pub y0: f64,
	/// Radial end in `[0, 1]`.
	pub y1: f64,
}

impl LayoutRect {
	/// Angular width in canonical units.
	pub fn width(&self) -> f64 {
		self.x1 - self.x0
	}
}

/// Index of a node inside a [`Hierarchy`](super::Hierarchy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// The root of every hierarchy.
	pub const ROOT: NodeId = NodeId(0);

	/// Position of the node in breadth-first order.
	pub fn index(self) -> usize {
		self.0
	}
}

impl std::fmt::Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}
