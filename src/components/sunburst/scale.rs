//! Scales and configuration mapping canonical layout space to pixels.
//!
//! # Coordinate Spaces
//!
//! - **Canonical space**: the unit square produced by the partition layout.
//!   `x` runs around the circle, `y` runs outward by depth.
//! - **Screen space**: radians and pixel radii around the chart center.
//!
//! The two scales of a [`CoordinateMapper`] connect the spaces. Their domains
//! are the only view state that changes while zooming; ranges are fixed by the
//! configuration.
//!
//! # Scale Shapes
//!
//! - Angular: linear, clamped to `[0, 2π]`, so nodes outside the focused
//!   slice collapse onto the boundary angle.
//! - Radial: square root, so band *areas* rather than band widths stay equal.
//!   The range starts at a small dead zone so the center never shrinks to a
//!   point.

use std::f64::consts::TAU;

use serde::Deserialize;

use super::types::LayoutRect;

/// Shapes the transition progress before domains are interpolated.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
	/// Progress equals elapsed fraction.
	Linear,
	/// Symmetric cubic ease-in-out.
	#[default]
	CubicInOut,
}

impl Easing {
	/// Map linear progress `t` in `[0, 1]` to eased progress. Endpoints are exact.
	pub fn apply(&self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Easing::Linear => t,
			Easing::CubicInOut => {
				let t2 = t * 2.0;
				if t2 <= 1.0 {
					t2 * t2 * t2 / 2.0
				} else {
					let u = t2 - 2.0;
					(u * u * u + 2.0) / 2.0
				}
			}
		}
	}
}

/// Complete configuration for the sunburst core.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunburstConfig {
	/// Side of the square the chart is fitted into, in pixels.
	pub chart_size: f64,
	/// Gap between the outermost ring and the chart edge, in pixels.
	pub margin: f64,
	/// Inner dead zone as a fraction of the outer radius.
	pub dead_zone: f64,
	/// Estimated label width per character, in pixels.
	pub char_width: f64,
	/// Zoom transition length in milliseconds.
	pub transition_ms: f64,
	/// Easing applied to transition progress.
	pub easing: Easing,
	/// Focus depth that shows the outline circle. `None` disables it.
	pub decoration_depth: Option<usize>,
}

impl Default for SunburstConfig {
	fn default() -> Self {
		Self {
			chart_size: 800.0,
			margin: 5.0,
			dead_zone: 0.1,
			char_width: 6.0,
			transition_ms: 750.0,
			easing: Easing::CubicInOut,
			decoration_depth: Some(2),
		}
	}
}

impl SunburstConfig {
	/// Fit the chart to a viewport, keeping every other setting.
	pub fn for_viewport(self, width: f64, height: f64) -> Self {
		Self {
			chart_size: width.min(height),
			..self
		}
	}

	/// Outer radius of the chart in pixels. Never negative.
	pub fn max_radius(&self) -> f64 {
		(self.chart_size / 2.0 - self.margin).max(0.0)
	}

	/// Inner radius the canonical `y = 0` maps to at rest.
	pub fn min_radius(&self) -> f64 {
		self.max_radius() * self.dead_zone.clamp(0.0, 1.0)
	}
}

/// The two scale domains. This is the entire animated view state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewDomains {
	/// Visible slice of the `x` axis.
	pub angular: [f64; 2],
	/// Visible slice of the `y` axis; the upper bound stays 1.
	pub radial: [f64; 2],
}

impl Default for ViewDomains {
	fn default() -> Self {
		Self::full()
	}
}

impl ViewDomains {
	/// Unzoomed view of the whole chart.
	pub const fn full() -> Self {
		Self {
			angular: [0.0, 1.0],
			radial: [0.0, 1.0],
		}
	}

	/// Domains that make `rect` and its descendants fill the chart.
	/// The radial upper bound stays at 1 so descendants remain visible.
	pub fn focused_on(rect: &LayoutRect) -> Self {
		Self {
			angular: [rect.x0, rect.x1],
			radial: [rect.y0, 1.0],
		}
	}

	/// Component-wise linear interpolation. `t = 0` and `t = 1` return the
	/// endpoints exactly.
	pub fn interpolate(&self, to: &ViewDomains, t: f64) -> Self {
		if t <= 0.0 {
			return *self;
		}
		if t >= 1.0 {
			return *to;
		}
		let lerp = |a: f64, b: f64| a + (b - a) * t;
		Self {
			angular: [
				lerp(self.angular[0], to.angular[0]),
				lerp(self.angular[1], to.angular[1]),
			],
			radial: [
				lerp(self.radial[0], to.radial[0]),
				lerp(self.radial[1], to.radial[1]),
			],
		}
	}
}

/// Normalize `x` within `[a, b]`. A collapsed domain maps to the midpoint.
fn normalize(a: f64, b: f64, x: f64) -> f64 {
	let span = b - a;
	if span != 0.0 { (x - a) / span } else { 0.5 }
}

/// Linear scale from a mutable domain onto a fixed range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	/// Input interval.
	pub domain: [f64; 2],
	/// Output interval.
	pub range: [f64; 2],
	/// Clamp outputs to the range.
	pub clamp: bool,
}

impl LinearScale {
	/// Map `x` from the domain onto the range.
	pub fn apply(&self, x: f64) -> f64 {
		let mut t = normalize(self.domain[0], self.domain[1], x);
		if self.clamp {
			t = t.clamp(0.0, 1.0);
		}
		self.range[0] + (self.range[1] - self.range[0]) * t
	}
}

/// Square-root scale: linear in `sqrt(x)`. Not clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	/// Input interval.
	pub domain: [f64; 2],
	/// Output range; not clamped.
	pub range: [f64; 2],
}

impl SqrtScale {
	/// Map `y` by square root from the domain onto the range.
	pub fn apply(&self, y: f64) -> f64 {
		let t = normalize(
			signed_sqrt(self.domain[0]),
			signed_sqrt(self.domain[1]),
			signed_sqrt(y),
		);
		self.range[0] + (self.range[1] - self.range[0]) * t
	}
}

fn signed_sqrt(x: f64) -> f64 {
	if x < 0.0 { -(-x).sqrt() } else { x.sqrt() }
}

/// Angular and radial scales for one view snapshot.
///
/// Create this once per frame from the current [`ViewDomains`] and pass it to
/// geometry functions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
	/// Layout `x` to radians.
	pub angular: LinearScale,
	/// Layout `y` to pixels.
	pub radial: SqrtScale,
}

impl CoordinateMapper {
	/// Scales for `domains` at the chart size in `config`.
	pub fn new(domains: &ViewDomains, config: &SunburstConfig) -> Self {
		Self {
			angular: LinearScale {
				domain: domains.angular,
				range: [0.0, TAU],
				clamp: true,
			},
			radial: SqrtScale {
				domain: domains.radial,
				range: [config.min_radius(), config.max_radius()],
			},
		}
	}

	/// Canonical angular position to radians, clockwise from 12 o'clock.
	pub fn angle(&self, x: f64) -> f64 {
		self.angular.apply(x)
	}

	/// Canonical radial position to a pixel radius. May be negative while
	/// zooming; callers clamp.
	pub fn radius(&self, y: f64) -> f64 {
		self.radial.apply(y)
	}
}
