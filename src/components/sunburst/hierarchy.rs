//! Weighted hierarchy and its partition layout.
//!
//! The input tree is flattened breadth-first into an arena. Aggregate values
//! are summed bottom-up and every node receives a [`LayoutRect`] in the unit
//! square: the angular extent partitions the parent's extent proportionally to
//! value, the radial band is fixed per depth.

use std::collections::VecDeque;

use log::{debug, info};

use super::error::SunburstError;
use super::types::{LayoutRect, NodeId, SunburstNode};

/// A laid-out node.
#[derive(Clone, Debug)]
pub struct LayoutNode {
	/// Position in breadth-first order.
	pub id: NodeId,
	/// Display name; may be empty.
	pub name: String,
	/// Sum of leaf weights below (or at) this node.
	pub value: f64,
	/// Root is depth 0.
	pub depth: usize,
	/// `None` only for the root.
	pub parent: Option<NodeId>,
	/// Children in input order.
	pub children: Vec<NodeId>,
	/// Partition rectangle in the unit square.
	pub rect: LayoutRect,
}

impl LayoutNode {
	/// Whether the node has no children.
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}
}

/// Immutable, laid-out hierarchy. Nodes are stored in breadth-first order.
#[derive(Clone, Debug)]
pub struct Hierarchy {
	nodes: Vec<LayoutNode>,
	height: usize,
}

impl Hierarchy {
	/// Validates the tree, sums values and computes the partition layout.
	pub fn build(root: &SunburstNode) -> Result<Self, SunburstError> {
		let mut nodes: Vec<LayoutNode> = Vec::new();
		let mut weights: Vec<f64> = Vec::new();
		let mut queue: VecDeque<(&SunburstNode, Option<NodeId>, usize)> = VecDeque::new();
		queue.push_back((root, None, 0));

		while let Some((source, parent, depth)) = queue.pop_front() {
			let id = NodeId(nodes.len());
			let weight = if source.children.is_empty() {
				leaf_weight(source, || Self::path_to(&nodes, parent, &source.name))?
			} else {
				if source.size.is_some() {
					debug!(
						"imp-sunburst: ignoring size on internal node '{}'",
						source.name
					);
				}
				0.0
			};
			if let Some(parent) = parent {
				nodes[parent.0].children.push(id);
			}
			nodes.push(LayoutNode {
				id,
				name: source.name.clone(),
				value: 0.0,
				depth,
				parent,
				children: Vec::with_capacity(source.children.len()),
				rect: LayoutRect::default(),
			});
			weights.push(weight);
			for child in &source.children {
				queue.push_back((child, Some(id), depth + 1));
			}
		}

		let height = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
		let mut hierarchy = Self { nodes, height };
		hierarchy.sum(&weights);
		hierarchy.partition();

		info!(
			"imp-sunburst: laid out {} nodes over {} levels (total value {})",
			hierarchy.len(),
			hierarchy.height + 1,
			hierarchy.root().value
		);
		Ok(hierarchy)
	}

	/// Slash-joined names from the root down to a node that is not yet in the arena.
	fn path_to(nodes: &[LayoutNode], parent: Option<NodeId>, name: &str) -> String {
		let mut names = vec![name.to_string()];
		let mut cursor = parent;
		while let Some(id) = cursor {
			names.push(nodes[id.0].name.clone());
			cursor = nodes[id.0].parent;
		}
		names.reverse();
		names.join("/")
	}

	/// Breadth-first order puts every child after its parent, so a reverse
	/// sweep sees each subtree complete before it is added upward.
	fn sum(&mut self, weights: &[f64]) {
		for (node, &weight) in self.nodes.iter_mut().zip(weights) {
			node.value = weight;
		}
		for i in (1..self.nodes.len()).rev() {
			let value = self.nodes[i].value;
			if let Some(parent) = self.nodes[i].parent {
				self.nodes[parent.0].value += value;
			}
		}
	}

	fn partition(&mut self) {
		let levels = (self.height + 1) as f64;
		for i in 0..self.nodes.len() {
			let depth = self.nodes[i].depth as f64;
			let (x0, x1) = match self.nodes[i].parent {
				None => (0.0, 1.0),
				Some(_) => (self.nodes[i].rect.x0, self.nodes[i].rect.x1),
			};
			self.nodes[i].rect = LayoutRect {
				x0,
				x1,
				y0: depth / levels,
				y1: (depth + 1.0) / levels,
			};

			let value = self.nodes[i].value;
			let k = if value > 0.0 { (x1 - x0) / value } else { 0.0 };
			let mut cursor = x0;
			for c in 0..self.nodes[i].children.len() {
				let child = self.nodes[i].children[c].0;
				let start = cursor;
				cursor += self.nodes[child].value * k;
				self.nodes[child].rect.x0 = start;
				self.nodes[child].rect.x1 = cursor;
			}
			// The last child closes the span exactly despite rounding.
			if let Some(&last) = self.nodes[i].children.last() {
				if self.nodes[last.0].value > 0.0 {
					self.nodes[last.0].rect.x1 = x1;
				}
			}
		}
	}

	/// The root node.
	pub fn root(&self) -> &LayoutNode {
		&self.nodes[0]
	}

	/// `None` for ids from another hierarchy.
	pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
		self.nodes.get(id.0)
	}

	/// Whether `id` names a node of this hierarchy.
	pub fn contains(&self, id: NodeId) -> bool {
		id.0 < self.nodes.len()
	}

	/// Number of nodes, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always false: a hierarchy has at least its root.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Depth of the deepest node (0 for a lone root).
	pub fn height(&self) -> usize {
		self.height
	}

	/// All nodes in breadth-first order.
	pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> {
		self.nodes.iter()
	}

	/// The node itself followed by its ancestors up to the root.
	pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &LayoutNode> {
		let mut cursor = self.get(id);
		std::iter::from_fn(move || {
			let node = cursor?;
			cursor = node.parent.and_then(|p| self.get(p));
			Some(node)
		})
	}

	/// Hover text: name and value formatted with thousands separators.
	pub fn tooltip(&self, id: NodeId) -> Option<String> {
		self.get(id)
			.map(|node| format!("{}\n{}", node.name, format_value(node.value)))
	}
}

fn leaf_weight(
	source: &SunburstNode,
	path: impl FnOnce() -> String,
) -> Result<f64, SunburstError> {
	let invalid = |reason: &str| SunburstError::InvalidData {
		path: path(),
		reason: reason.to_string(),
	};
	match source.size {
		None => Err(invalid("node has neither children nor a size")),
		Some(w) if !w.is_finite() => Err(invalid("size is not a finite number")),
		Some(w) if w < 0.0 => Err(invalid("size is negative")),
		Some(w) => Ok(w),
	}
}

/// Rounds to an integer and groups digits by thousands (`1234567.4` → `1,234,567`).
pub fn format_value(value: f64) -> String {
	let rounded = value.round();
	let digits = format!("{}", rounded.abs() as u64);
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if rounded < 0.0 {
		out.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}
