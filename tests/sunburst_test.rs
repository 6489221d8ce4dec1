//! End-to-end tests for layout, zoom and per-frame geometry.

use std::f64::consts::TAU;

use imp_sunburst::components::sunburst::{
	ArcGeometry, CoordinateMapper, Easing, Hierarchy, LayoutRect, NodeId, SunburstConfig,
	SunburstError, SunburstNode, ViewDomains, ZoomController, ZoomState,
};
use rstest::{fixture, rstest};

const EPS: f64 = 1e-9;

fn id_of(h: &Hierarchy, name: &str) -> NodeId {
	h.iter().find(|n| n.name == name).unwrap().id
}

#[fixture]
fn flare() -> Hierarchy {
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

#[fixture]
fn config() -> SunburstConfig {
	SunburstConfig {
		chart_size: 610.0,
		transition_ms: 750.0,
		easing: Easing::Linear,
		..SunburstConfig::default()
	}
}

// ============================================================
// Layout
// ============================================================

#[rstest]
fn given_weighted_tree_when_laid_out_then_siblings_split_by_value(flare: Hierarchy) {
	let a = flare.get(id_of(&flare, "A")).unwrap();
	let b = flare.get(id_of(&flare, "B")).unwrap();
	assert!((a.rect.x1 - 0.3).abs() < EPS);
	assert!((b.rect.x0 - 0.3).abs() < EPS);
	assert_eq!(b.rect.x1, 1.0);
	assert_eq!(flare.root().rect.x0, 0.0);
	assert_eq!(flare.root().rect.x1, 1.0);
	assert_eq!(flare.root().rect.y0, 0.0);
}

#[rstest]
#[case::leaf_only(SunburstNode::leaf("solo", 5.0), 1)]
#[case::wide(
	SunburstNode::branch("r", (0..20).map(|i| SunburstNode::leaf(format!("n{i}"), i as f64)).collect()),
	21
)]
#[case::deep(
	(0..200).fold(SunburstNode::leaf("bottom", 1.0), |acc, i| SunburstNode::branch(format!("d{i}"), vec![acc])),
	201
)]
fn given_any_valid_tree_when_laid_out_then_bands_cover_unit_square(
	#[case] tree: SunburstNode,
	#[case] expected_len: usize,
) {
	let h = Hierarchy::build(&tree).unwrap();
	assert_eq!(h.len(), expected_len);
	let deepest = h.iter().map(|n| n.rect.y1).fold(0.0, f64::max);
	assert!((deepest - 1.0).abs() < EPS);
	for node in h.iter() {
		assert!(node.rect.x0 <= node.rect.x1);
		assert!(node.rect.y0 < node.rect.y1);
		if let Some(parent) = node.parent.and_then(|p| h.get(p)) {
			assert!(node.rect.x0 >= parent.rect.x0 - EPS);
			assert!(node.rect.x1 <= parent.rect.x1 + EPS);
			assert!((node.rect.y0 - parent.rect.y1).abs() < EPS);
		}
	}
}

#[rstest]
#[case::missing_size(SunburstNode::branch("r", vec![SunburstNode::branch("empty", vec![])]))]
#[case::negative(SunburstNode::branch("r", vec![SunburstNode::leaf("neg", -3.0)]))]
fn given_malformed_tree_when_laid_out_then_invalid_data(#[case] tree: SunburstNode) {
	assert!(matches!(
		Hierarchy::build(&tree),
		Err(SunburstError::InvalidData { .. })
	));
}

// ============================================================
// Zoom
// ============================================================

#[rstest]
fn given_focus_on_b_when_settled_then_c_fills_the_circle(
	flare: Hierarchy,
	config: SunburstConfig,
) {
	let b = id_of(&flare, "B");
	let c = flare.get(id_of(&flare, "C")).unwrap();
	let mut zoom = ZoomController::new(&flare);

	zoom.request_focus(&flare, Some(b), 0.0, &config).unwrap();
	zoom.tick(750.0, &config);

	let domains = zoom.domains();
	assert!((domains.angular[0] - 0.3).abs() < EPS);
	assert_eq!(domains.angular[1], 1.0);
	assert_eq!(domains.radial, [flare.get(b).unwrap().rect.y0, 1.0]);

	let mapper = zoom.mapper(&config);
	let bounds = ArcGeometry::new(&mapper, config.char_width).bounds(&c.rect);
	assert!(bounds.start_angle.abs() < EPS);
	assert!((bounds.end_angle - TAU).abs() < EPS);
	assert_eq!(zoom.state(), ZoomState::Idle { focus: b });
}

#[rstest]
fn given_transition_when_sampled_then_endpoints_are_exact(
	flare: Hierarchy,
	config: SunburstConfig,
) {
	let a = id_of(&flare, "A");
	let mut zoom = ZoomController::new(&flare);
	zoom.request_focus(&flare, Some(a), 100.0, &config).unwrap();

	zoom.tick(100.0, &config);
	assert_eq!(zoom.domains(), ViewDomains::full());

	zoom.tick(475.0, &config);
	let halfway = zoom.domains();
	assert!((halfway.angular[1] - 0.65).abs() < EPS);

	zoom.tick(10_000.0, &config);
	assert_eq!(
		zoom.domains(),
		ViewDomains::focused_on(&flare.get(a).unwrap().rect)
	);
}

#[rstest]
fn given_depth_two_focus_when_repeated_then_single_decoration(
	flare: Hierarchy,
	config: SunburstConfig,
) {
	let c = id_of(&flare, "C");
	let mut zoom = ZoomController::new(&flare);
	for t in 0..3 {
		zoom.request_focus(&flare, Some(c), t as f64, &config).unwrap();
		let frame = zoom.frame(&flare, &config);
		assert_eq!(frame.decoration.map(|d| d.radius), Some(300.0));
	}
	zoom.request_focus(&flare, None, 10.0, &config).unwrap();
	assert!(zoom.frame(&flare, &config).decoration.is_none());
}

#[rstest]
fn given_focus_when_framed_then_focus_chain_draws_last(
	flare: Hierarchy,
	config: SunburstConfig,
) {
	let c = id_of(&flare, "C");
	let mut zoom = ZoomController::new(&flare);
	zoom.request_focus(&flare, Some(c), 0.0, &config).unwrap();
	let frame = zoom.frame(&flare, &config);
	let names: Vec<_> = frame.slices.iter().map(|s| s.label.as_str()).collect();
	assert_eq!(names, ["A", "C", "B", "root"]);
}

// ============================================================
// Labels
// ============================================================

#[rstest]
#[case::empty_label("", false)]
#[case::short_label("ab", false)]
#[case::long_label("a considerably longer label", false)]
fn given_zero_width_slice_when_fitting_label_then_never_fits(
	config: SunburstConfig,
	#[case] label: &str,
	#[case] expected: bool,
) {
	let mapper = CoordinateMapper::new(&ViewDomains::full(), &config);
	let rect = LayoutRect {
		x0: 0.5,
		x1: 0.5,
		y0: 0.5,
		y1: 1.0,
	};
	assert_eq!(
		ArcGeometry::new(&mapper, config.char_width).label_fits(&rect, label),
		expected
	);
}

#[rstest]
fn given_empty_zero_weight_leaf_when_framed_then_wedge_present_and_label_hidden(
	config: SunburstConfig,
) {
	let tree = SunburstNode::branch(
		"root",
		vec![SunburstNode::leaf("", 0.0), SunburstNode::leaf("data", 4.0)],
	);
	let h = Hierarchy::build(&tree).unwrap();
	let zoom = ZoomController::new(&h);
	let frame = zoom.frame(&h, &config);
	let empty = frame.slices.iter().find(|s| s.label.is_empty()).unwrap();
	assert!(!empty.wedge.is_empty());
	assert!(!empty.label_visible);
	assert!(!empty.wedge.to_svg().contains("NaN"));
}
