//! Renderer-neutral path descriptions.
//!
//! Commands mirror the canvas path API (`moveTo`, `lineTo`, `arc`,
//! `closePath`) so the host can replay them directly; [`Path::to_svg`] turns
//! them into SVG path data for DOM hosts. Arc angles use canvas convention:
//! radians from the positive x axis, increasing clockwise on screen.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

const EPSILON: f64 = 1e-6;

/// A circular arc around `(cx, cy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
	/// Center x.
	pub cx: f64,
	/// Center y.
	pub cy: f64,
	/// Radius in pixels.
	pub radius: f64,
	/// Radians, canvas convention.
	pub start_angle: f64,
	/// End angle in radians.
	pub end_angle: f64,
	/// Draw direction, as in `CanvasRenderingContext2D.arc`.
	pub anticlockwise: bool,
}

impl ArcSegment {
	/// Swept angle in the drawing direction, normalized to `[0, 2π]`.
	pub fn sweep(&self) -> f64 {
		let mut da = if self.anticlockwise {
			self.start_angle - self.end_angle
		} else {
			self.end_angle - self.start_angle
		};
		if da < 0.0 {
			da = da % TAU + TAU;
		}
		da.min(TAU)
	}

	/// Arc length in pixels.
	pub fn length(&self) -> f64 {
		self.radius * self.sweep()
	}

	/// Point on the circle at `angle`.
	pub fn point_at(&self, angle: f64) -> (f64, f64) {
		(
			self.cx + self.radius * angle.cos(),
			self.cy + self.radius * angle.sin(),
		)
	}

	/// Point where the arc begins.
	pub fn start_point(&self) -> (f64, f64) {
		self.point_at(self.start_angle)
	}
}

/// One step of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
	/// Start a new subpath.
	MoveTo(f64, f64),
	/// Straight line to a point.
	LineTo(f64, f64),
	/// Circular arc, joined to the current point.
	Arc(ArcSegment),
	/// Line back to the subpath start.
	ClosePath,
}

/// An ordered list of path commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
	commands: Vec<PathCommand>,
	current: Option<(f64, f64)>,
	subpath_start: Option<(f64, f64)>,
}

impl Path {
	/// An empty path.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a new subpath at `(x, y)`.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.commands.push(PathCommand::MoveTo(x, y));
		self.current = Some((x, y));
		self.subpath_start = Some((x, y));
	}

	/// Straight line to `(x, y)`.
	pub fn line_to(&mut self, x: f64, y: f64) {
		self.commands.push(PathCommand::LineTo(x, y));
		self.current = Some((x, y));
	}

	/// Append a circular arc. Like the canvas API, the arc is joined to the
	/// current point with a straight line, or starts a new subpath if the path
	/// is empty. A zero radius or zero sweep adds only the joining point.
	pub fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
		let segment = ArcSegment {
			cx,
			cy,
			radius: radius.max(0.0),
			start_angle: start,
			end_angle: end,
			anticlockwise,
		};
		let (x0, y0) = segment.start_point();
		let current = self.current;
		match current {
			None => self.move_to(x0, y0),
			Some((x, y)) if (x - x0).abs() > EPSILON || (y - y0).abs() > EPSILON => {
				self.line_to(x0, y0)
			}
			Some(_) => {}
		}
		if segment.radius <= 0.0 || segment.sweep() <= EPSILON {
			return;
		}
		self.commands.push(PathCommand::Arc(segment));
		self.current = Some(if segment.sweep() >= TAU - EPSILON {
			(x0, y0)
		} else {
			segment.point_at(end)
		});
	}

	/// Close the current subpath. No-op on an empty path.
	pub fn close_path(&mut self) {
		if self.current.is_some() {
			self.commands.push(PathCommand::ClosePath);
			self.current = self.subpath_start;
		}
	}

	/// Commands in drawing order.
	pub fn commands(&self) -> &[PathCommand] {
		&self.commands
	}

	/// Whether no command was added.
	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// The first arc segment, if any. Label guides consist of exactly one.
	pub fn first_arc(&self) -> Option<&ArcSegment> {
		self.commands.iter().find_map(|c| match c {
			PathCommand::Arc(segment) => Some(segment),
			_ => None,
		})
	}

	/// SVG path data. Full circles are split into two half arcs because a
	/// single SVG arc cannot start and end at the same point.
	pub fn to_svg(&self) -> String {
		let mut out = String::new();
		for command in &self.commands {
			match *command {
				PathCommand::MoveTo(x, y) => {
					let _ = write!(out, "M{},{}", fmt(x), fmt(y));
				}
				PathCommand::LineTo(x, y) => {
					let _ = write!(out, "L{},{}", fmt(x), fmt(y));
				}
				PathCommand::ClosePath => out.push('Z'),
				PathCommand::Arc(segment) => {
					let r = fmt(segment.radius);
					let sweep_flag = if segment.anticlockwise { 0 } else { 1 };
					let da = segment.sweep();
					if da >= TAU - EPSILON {
						let (x0, y0) = segment.start_point();
						let (mx, my) = (2.0 * segment.cx - x0, 2.0 * segment.cy - y0);
						let _ = write!(
							out,
							"A{r},{r},0,1,{sweep_flag},{},{}A{r},{r},0,1,{sweep_flag},{},{}",
							fmt(mx),
							fmt(my),
							fmt(x0),
							fmt(y0)
						);
					} else {
						let (x1, y1) = segment.point_at(segment.end_angle);
						let large = if da >= PI { 1 } else { 0 };
						let _ = write!(
							out,
							"A{r},{r},0,{large},{sweep_flag},{},{}",
							fmt(x1),
							fmt(y1)
						);
					}
				}
			}
		}
		out
	}
}

/// Trim float noise so output stays compact and stable.
fn fmt(v: f64) -> String {
	let rounded = (v * 1e6).round() / 1e6;
	if rounded == 0.0 {
		"0".to_string()
	} else {
		format!("{}", rounded)
	}
}
