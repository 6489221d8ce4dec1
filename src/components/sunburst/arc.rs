//! Slice geometry: wedge outlines, label guides, label fitting and hit tests.
//!
//! Angles coming out of the [`CoordinateMapper`] are measured clockwise from
//! 12 o'clock. Paths are emitted in canvas convention (from 3 o'clock), so
//! every angle is shifted by a quarter turn on the way out.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::path::Path;
use super::scale::CoordinateMapper;
use super::types::LayoutRect;

const EPSILON: f64 = 1e-12;

/// Screen-space extent of one slice for the current view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceBounds {
	/// Radians, clockwise from 12 o'clock.
	pub start_angle: f64,
	/// End angle; never less than `start_angle`.
	pub end_angle: f64,
	/// Clamped to be non-negative.
	pub inner_radius: f64,
	/// Outer radius in pixels.
	pub outer_radius: f64,
}

impl SliceBounds {
	/// Angular width in radians.
	pub fn span(&self) -> f64 {
		self.end_angle - self.start_angle
	}
}

/// Geometry for one view snapshot.
#[derive(Clone, Copy, Debug)]
pub struct ArcGeometry<'a> {
	mapper: &'a CoordinateMapper,
	char_width: f64,
}

impl<'a> ArcGeometry<'a> {
	/// Geometry over `mapper`, with `char_width` pixels per label character.
	pub fn new(mapper: &'a CoordinateMapper, char_width: f64) -> Self {
		Self { mapper, char_width }
	}

	/// Map a layout rectangle through the current scales.
	pub fn bounds(&self, rect: &LayoutRect) -> SliceBounds {
		SliceBounds {
			start_angle: self.mapper.angle(rect.x0),
			end_angle: self.mapper.angle(rect.x1),
			inner_radius: self.mapper.radius(rect.y0).max(0.0),
			outer_radius: self.mapper.radius(rect.y1).max(0.0),
		}
	}

	/// Closed outline of the slice for fill and stroke.
	pub fn wedge_path(&self, rect: &LayoutRect) -> Path {
		let b = self.bounds(rect);
		let (mut r0, mut r1) = (b.inner_radius, b.outer_radius);
		if r1 < r0 {
			std::mem::swap(&mut r0, &mut r1);
		}
		let a0 = b.start_angle - FRAC_PI_2;
		let a1 = b.end_angle - FRAC_PI_2;
		let clockwise = a1 > a0;
		let da = (a1 - a0).abs();

		let mut path = Path::new();
		if r1 <= EPSILON {
			path.move_to(0.0, 0.0);
		} else if da > TAU - EPSILON {
			// Full ring: outer circle plus an inner hole as a second subpath.
			path.move_to(r1 * a0.cos(), r1 * a0.sin());
			path.arc(0.0, 0.0, r1, a0, a1, !clockwise);
			if r0 > EPSILON {
				path.move_to(r0 * a1.cos(), r0 * a1.sin());
				path.arc(0.0, 0.0, r0, a1, a0, clockwise);
			}
		} else {
			path.move_to(r1 * a0.cos(), r1 * a0.sin());
			path.arc(0.0, 0.0, r1, a0, a1, !clockwise);
			if r0 > EPSILON {
				path.arc(0.0, 0.0, r0, a1, a0, clockwise);
			} else {
				path.line_to(0.0, 0.0);
			}
		}
		path.close_path();
		path
	}

	/// Arc at the band's mid radius that label text is laid along. In the
	/// lower half of the circle it runs anticlockwise so text stays upright.
	pub fn label_guide_path(&self, rect: &LayoutRect) -> Path {
		let (a0, a1, anticlockwise) = self.guide_angles(rect);
		let radius = self.guide_radius(rect);
		let mut path = Path::new();
		path.arc(0.0, 0.0, radius, a0, a1, anticlockwise);
		path
	}

	fn guide_angles(&self, rect: &LayoutRect) -> (f64, f64, bool) {
		let a0 = self.mapper.angle(rect.x0) - FRAC_PI_2;
		let a1 = self.mapper.angle(rect.x1) - FRAC_PI_2;
		let mid = (a0 + a1) / 2.0;
		let invert = mid > 0.0 && mid < PI;
		if invert { (a1, a0, true) } else { (a0, a1, false) }
	}

	fn guide_radius(&self, rect: &LayoutRect) -> f64 {
		((self.mapper.radius(rect.y0) + self.mapper.radius(rect.y1)) / 2.0).max(0.0)
	}

	/// Whether `label` is estimated to fit along the guide arc.
	///
	/// A slice with no canonical width never fits, whatever the label.
	pub fn label_fits(&self, rect: &LayoutRect, label: &str) -> bool {
		if rect.x1 == rect.x0 {
			return false;
		}
		let span = self.mapper.angle(rect.x1) - self.mapper.angle(rect.x0);
		let arc_length = self.guide_radius(rect) * span;
		if !arc_length.is_finite() {
			return false;
		}
		let estimated = label.chars().count() as f64 * self.char_width;
		estimated < arc_length
	}

	/// Whether a point, relative to the chart center in screen pixels, falls
	/// inside the slice.
	pub fn contains(&self, rect: &LayoutRect, x: f64, y: f64) -> bool {
		let b = self.bounds(rect);
		if b.span() <= 0.0 {
			return false;
		}
		let r = x.hypot(y);
		if r < b.inner_radius || r >= b.outer_radius {
			return false;
		}
		// Clockwise from 12 o'clock with y pointing down.
		let mut angle = x.atan2(-y);
		if angle < 0.0 {
			angle += TAU;
		}
		angle >= b.start_angle && angle < b.end_angle
	}
}
