//! Zoom transitions between focused nodes.
//!
//! A focus request captures the live domains, computes the domains that make
//! the target fill the chart and starts a timed transition. The host calls
//! [`ZoomController::tick`] once per animation frame with its clock; while the
//! transition runs the domains are interpolated and the host redraws from
//! [`ZoomController::frame`]. A new request supersedes the running transition
//! from wherever it currently is.

use log::debug;

use super::arc::ArcGeometry;
use super::error::SunburstError;
use super::hierarchy::Hierarchy;
use super::path::Path;
use super::scale::{CoordinateMapper, SunburstConfig, ViewDomains};
use super::types::NodeId;

/// An in-flight transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
	/// Domains when the request arrived.
	pub from: ViewDomains,
	/// Domains that frame the focus.
	pub to: ViewDomains,
	/// Host clock reading (ms) when the request arrived.
	pub start: f64,
	/// Milliseconds.
	pub duration: f64,
	/// Node being zoomed to.
	pub focus: NodeId,
}

impl Transition {
	/// Linear progress in `[0, 1]` at `now`.
	pub fn progress(&self, now: f64) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		((now - self.start) / self.duration).clamp(0.0, 1.0)
	}
}

/// Focus state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomState {
	/// Domains rest on `focus`.
	Idle {
		/// Node the view is framed on.
		focus: NodeId,
	},
	/// Domains are moving towards a new focus.
	Transitioning(Transition),
}

/// Outline circle shown around the whole chart for decorated focus depths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleDecoration {
	/// Pixels; always the live maximum radius.
	pub radius: f64,
}

/// Drawable geometry for one node in the current view.
#[derive(Clone, Debug)]
pub struct SliceGeometry {
	/// Position in breadth-first order.
	pub id: NodeId,
	/// Closed outline of the slice.
	pub wedge: Path,
	/// Mid-radius arc the label is laid along.
	pub label_guide: Path,
	/// Node name.
	pub label: String,
	/// Whether the label is estimated to fit.
	pub label_visible: bool,
}

/// Everything the host draws for one frame. Slices are in draw order:
/// later slices paint over earlier ones.
#[derive(Clone, Debug)]
pub struct Frame {
	/// One entry per node, in draw order.
	pub slices: Vec<SliceGeometry>,
	/// Outline circle, if the focus depth asks for one.
	pub decoration: Option<CircleDecoration>,
}

/// Owns the view state: live domains, focus, decoration and draw order.
#[derive(Clone, Debug)]
pub struct ZoomController {
	state: ZoomState,
	domains: ViewDomains,
	decorated: bool,
	draw_order: Vec<NodeId>,
}

impl ZoomController {
	/// Rest state: whole chart, root focused, breadth-first draw order.
	pub fn new(hierarchy: &Hierarchy) -> Self {
		Self {
			state: ZoomState::Idle {
				focus: NodeId::ROOT,
			},
			domains: ViewDomains::full(),
			decorated: false,
			draw_order: hierarchy.iter().map(|n| n.id).collect(),
		}
	}

	/// Current state machine state.
	pub fn state(&self) -> ZoomState {
		self.state
	}

	/// Live domains, possibly mid-transition.
	pub fn domains(&self) -> ViewDomains {
		self.domains
	}

	/// The requested focus (the target of a running transition).
	pub fn focus(&self) -> NodeId {
		match self.state {
			ZoomState::Idle { focus } => focus,
			ZoomState::Transitioning(t) => t.focus,
		}
	}

	/// Whether a transition is running.
	pub fn is_animating(&self) -> bool {
		matches!(self.state, ZoomState::Transitioning(_))
	}

	/// Outline for the current focus, sized from the live `config`.
	pub fn decoration(&self, config: &SunburstConfig) -> Option<CircleDecoration> {
		self.decorated.then(|| CircleDecoration {
			radius: config.max_radius(),
		})
	}

	/// Node ids in paint order, bottom first.
	pub fn draw_order(&self) -> &[NodeId] {
		&self.draw_order
	}

	/// Start zooming to `target`, or back to the root for `None`.
	pub fn request_focus(
		&mut self,
		hierarchy: &Hierarchy,
		target: Option<NodeId>,
		now: f64,
		config: &SunburstConfig,
	) -> Result<(), SunburstError> {
		let id = target.unwrap_or(NodeId::ROOT);
		let node = hierarchy.get(id).ok_or(SunburstError::InvalidTarget(id))?;

		let transition = Transition {
			from: self.domains,
			to: ViewDomains::focused_on(&node.rect),
			start: now,
			duration: config.transition_ms,
			focus: id,
		};
		debug!(
			"imp-sunburst: focus '{}' ({}) at depth {}, domains {:?} -> {:?}",
			node.name, id, node.depth, transition.from, transition.to
		);
		self.state = ZoomState::Transitioning(transition);

		self.promote(hierarchy, id);

		self.decorated = config.decoration_depth == Some(node.depth);
		Ok(())
	}

	/// Move `id` and then each of its ancestors to the end of the draw order.
	/// Returns whether the order changed; repeating a promotion is a no-op.
	pub fn promote(&mut self, hierarchy: &Hierarchy, id: NodeId) -> bool {
		let before = self.draw_order.clone();
		for node in hierarchy.ancestors(id) {
			if let Some(pos) = self.draw_order.iter().position(|&n| n == node.id) {
				let moved = self.draw_order.remove(pos);
				self.draw_order.push(moved);
			}
		}
		self.draw_order != before
	}

	/// Advance the transition to `now`. Returns whether the domains changed.
	pub fn tick(&mut self, now: f64, config: &SunburstConfig) -> bool {
		let ZoomState::Transitioning(transition) = self.state else {
			return false;
		};
		let t = transition.progress(now);
		let next = transition
			.from
			.interpolate(&transition.to, config.easing.apply(t));
		let changed = next != self.domains;
		self.domains = next;
		if t >= 1.0 {
			self.domains = transition.to;
			self.state = ZoomState::Idle {
				focus: transition.focus,
			};
			debug!("imp-sunburst: settled on {}", transition.focus);
		}
		changed
	}

	/// Scales for the live domains.
	pub fn mapper(&self, config: &SunburstConfig) -> CoordinateMapper {
		CoordinateMapper::new(&self.domains, config)
	}

	/// Geometry for every node at the live domains, in draw order.
	pub fn frame(&self, hierarchy: &Hierarchy, config: &SunburstConfig) -> Frame {
		let mapper = self.mapper(config);
		let geometry = ArcGeometry::new(&mapper, config.char_width);
		let slices = self
			.draw_order
			.iter()
			.filter_map(|&id| hierarchy.get(id))
			.map(|node| SliceGeometry {
				id: node.id,
				wedge: geometry.wedge_path(&node.rect),
				label_guide: geometry.label_guide_path(&node.rect),
				label: node.name.clone(),
				label_visible: geometry.label_fits(&node.rect, &node.name),
			})
			.collect();
		Frame {
			slices,
			decoration: self.decoration(config),
		}
	}

	/// Topmost node under a point relative to the chart center.
	pub fn node_at(
		&self,
		hierarchy: &Hierarchy,
		config: &SunburstConfig,
		x: f64,
		y: f64,
	) -> Option<NodeId> {
		let mapper = self.mapper(config);
		let geometry = ArcGeometry::new(&mapper, config.char_width);
		self.draw_order
			.iter()
			.rev()
			.filter_map(|&id| hierarchy.get(id))
			.find(|node| geometry.contains(&node.rect, x, y))
			.map(|node| node.id)
	}
}

#[cfg(test)]
mod tests {
	use super::super::scale::Easing;
	use super::super::types::SunburstNode;
	use super::*;

	fn hierarchy() -> Hierarchy {
		// root -> [A(30), B -> [C(70)]]
		let tree = SunburstNode::branch(
			"root",
			vec![
				SunburstNode::leaf("A", 30.0),
				SunburstNode::branch("B", vec![SunburstNode::leaf("C", 70.0)]),
			],
		);
		Hierarchy::build(&tree).unwrap()
	}

	fn linear() -> SunburstConfig {
		SunburstConfig {
			easing: Easing::Linear,
			transition_ms: 100.0,
			..SunburstConfig::default()
		}
	}

	const A: NodeId = NodeId(1);
	const B: NodeId = NodeId(2);
	const C: NodeId = NodeId(3);

	#[test]
	fn request_sets_target_domains() {
		let h = hierarchy();
		let config = linear();
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(B), 0.0, &config).unwrap();
		let ZoomState::Transitioning(t) = zoom.state() else {
			panic!("expected a transition");
		};
		assert_eq!(t.from, ViewDomains::full());
		assert!((t.to.angular[0] - 0.3).abs() < 1e-12);
		assert_eq!(t.to.angular[1], 1.0);
		assert_eq!(t.to.radial, [h.get(B).unwrap().rect.y0, 1.0]);
	}

	#[test]
	fn tick_interpolates_and_settles() {
		let h = hierarchy();
		let config = linear();
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(B), 1000.0, &config).unwrap();

		assert!(!zoom.tick(1000.0, &config));
		assert_eq!(zoom.domains(), ViewDomains::full());

		assert!(zoom.tick(1050.0, &config));
		assert!((zoom.domains().angular[0] - 0.15).abs() < 1e-12);
		assert!(zoom.is_animating());

		assert!(zoom.tick(1100.0, &config));
		assert_eq!(zoom.state(), ZoomState::Idle { focus: B });
		assert_eq!(zoom.domains(), ViewDomains::focused_on(&h.get(B).unwrap().rect));
		assert!(!zoom.tick(1200.0, &config));
	}

	#[test]
	fn new_request_supersedes_from_live_domains() {
		let h = hierarchy();
		let config = linear();
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(B), 0.0, &config).unwrap();
		zoom.tick(50.0, &config);
		let live = zoom.domains();

		zoom.request_focus(&h, None, 50.0, &config).unwrap();
		let ZoomState::Transitioning(t) = zoom.state() else {
			panic!("expected a transition");
		};
		assert_eq!(t.from, live);
		assert_eq!(t.to, ViewDomains::full());
		assert_eq!(zoom.focus(), NodeId::ROOT);
	}

	#[test]
	fn focused_child_fills_the_circle() {
		let h = hierarchy();
		let config = linear();
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(B), 0.0, &config).unwrap();
		zoom.tick(100.0, &config);
		let mapper = zoom.mapper(&config);
		let c = h.get(C).unwrap();
		assert_eq!(mapper.angle(c.rect.x0), 0.0);
		assert!((mapper.angle(c.rect.x1) - std::f64::consts::TAU).abs() < 1e-12);
		// A is outside the focused slice and collapses onto the boundary.
		let a = h.get(A).unwrap();
		assert_eq!(mapper.angle(a.rect.x0), mapper.angle(a.rect.x1));
	}

	#[test]
	fn stale_target_is_rejected() {
		let h = hierarchy();
		let mut zoom = ZoomController::new(&h);
		let err = zoom
			.request_focus(&h, Some(NodeId(42)), 0.0, &linear())
			.unwrap_err();
		assert_eq!(err, SunburstError::InvalidTarget(NodeId(42)));
		assert_eq!(zoom.state(), ZoomState::Idle { focus: NodeId::ROOT });
	}

	#[test]
	fn decoration_tracks_depth_two_focus() {
		let h = hierarchy();
		let config = linear();
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(C), 0.0, &config).unwrap();
		assert_eq!(
			zoom.decoration(&config),
			Some(CircleDecoration {
				radius: config.max_radius()
			})
		);
		zoom.request_focus(&h, Some(C), 10.0, &config).unwrap();
		assert!(zoom.frame(&h, &config).decoration.is_some());

		zoom.request_focus(&h, Some(B), 20.0, &config).unwrap();
		assert_eq!(zoom.decoration(&config), None);
		zoom.request_focus(&h, Some(C), 30.0, &config).unwrap();
		zoom.request_focus(&h, None, 40.0, &config).unwrap();
		assert_eq!(zoom.decoration(&config), None);
	}

	#[test]
	fn decoration_radius_uses_current_config() {
		let h = hierarchy();
		let config = linear();
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(C), 0.0, &config).unwrap();
		let smaller = config.clone().for_viewport(300.0, 200.0);
		assert_eq!(
			zoom.frame(&h, &smaller).decoration,
			Some(CircleDecoration { radius: 95.0 })
		);
	}

	#[test]
	fn decoration_can_be_disabled() {
		let h = hierarchy();
		let config = SunburstConfig {
			decoration_depth: None,
			..linear()
		};
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(C), 0.0, &config).unwrap();
		assert_eq!(zoom.decoration(&config), None);
	}

	#[test]
	fn promotion_moves_focus_chain_last_and_is_idempotent() {
		let h = hierarchy();
		let mut zoom = ZoomController::new(&h);
		assert_eq!(zoom.draw_order(), [NodeId::ROOT, A, B, C]);
		assert!(zoom.promote(&h, C));
		assert_eq!(zoom.draw_order(), [A, C, B, NodeId::ROOT]);
		assert!(!zoom.promote(&h, C));
		assert_eq!(zoom.draw_order(), [A, C, B, NodeId::ROOT]);
	}

	#[test]
	fn frame_follows_draw_order_and_hides_unfit_labels() {
		let tree = SunburstNode::branch(
			"root",
			vec![SunburstNode::leaf("", 0.0), SunburstNode::leaf("big", 10.0)],
		);
		let h = Hierarchy::build(&tree).unwrap();
		let config = linear();
		let zoom = ZoomController::new(&h);
		let frame = zoom.frame(&h, &config);
		assert_eq!(frame.slices.len(), 3);
		assert_eq!(frame.slices[1].label, "");
		assert!(!frame.slices[1].label_visible);
		assert!(frame.slices[2].label_visible);
		assert!(frame.decoration.is_none());
	}

	#[test]
	fn zero_duration_settles_on_first_tick() {
		let h = hierarchy();
		let config = SunburstConfig {
			transition_ms: 0.0,
			..linear()
		};
		let mut zoom = ZoomController::new(&h);
		zoom.request_focus(&h, Some(A), 5.0, &config).unwrap();
		assert!(zoom.tick(5.0, &config));
		assert_eq!(zoom.state(), ZoomState::Idle { focus: A });
	}

	#[test]
	fn hit_test_prefers_topmost_slice() {
		let h = hierarchy();
		let config = SunburstConfig::default();
		let zoom = ZoomController::new(&h);
		// Center of the chart is the root band.
		assert_eq!(zoom.node_at(&h, &config, 0.0, -50.0), Some(NodeId::ROOT));
		// Outer ring to the left (angle 3π/2) falls inside C.
		assert_eq!(zoom.node_at(&h, &config, -380.0, 0.0), Some(C));
		assert_eq!(zoom.node_at(&h, &config, 1000.0, 0.0), None);
	}
}
