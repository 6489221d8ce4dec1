//! Canvas rendering for the sunburst.
//!
//! Draws one [`Frame`] in passes for correct stacking:
//! 1. Background (screen space)
//! 2. Slice fills and strokes in draw order (chart space, origin at center)
//! 3. Labels along their guide arcs, halos first
//! 4. The focus outline decoration

use std::f64::consts::{FRAC_PI_2, TAU};

use web_sys::CanvasRenderingContext2d;

use super::path::{ArcSegment, Path, PathCommand};
use super::state::SunburstState;
use super::theme::Theme;
use super::zoom::{CircleDecoration, Frame};

/// Renders the current view to the canvas.
pub fn render(state: &SunburstState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let frame = state.frame();

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let (cx, cy) = state.center();
	let _ = ctx.translate(cx, cy);

	draw_slices(state, ctx, theme, &frame);
	draw_labels(ctx, theme, &frame, state.config.char_width);
	if let Some(decoration) = frame.decoration {
		draw_decoration(ctx, theme, decoration);
	}

	ctx.restore();
}

/// Replays a path description onto the context's current path.
fn trace(ctx: &CanvasRenderingContext2d, path: &Path) {
	ctx.begin_path();
	for command in path.commands() {
		match *command {
			PathCommand::MoveTo(x, y) => ctx.move_to(x, y),
			PathCommand::LineTo(x, y) => ctx.line_to(x, y),
			PathCommand::Arc(segment) => {
				let _ = ctx.arc_with_anticlockwise(
					segment.cx,
					segment.cy,
					segment.radius,
					segment.start_angle,
					segment.end_angle,
					segment.anticlockwise,
				);
			}
			PathCommand::ClosePath => ctx.close_path(),
		}
	}
}

fn draw_slices(
	state: &SunburstState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	frame: &Frame,
) {
	ctx.set_stroke_style_str(&theme.slice.stroke.to_css());
	ctx.set_line_width(theme.slice.stroke_width);

	for slice in &frame.slices {
		let mut fill = state.color(slice.id);
		if state.hovered == Some(slice.id) {
			fill = Theme::lighten(fill, theme.slice.hover_lighten);
		}
		trace(ctx, &slice.wedge);
		ctx.set_fill_style_str(&fill.to_css());
		// Even-odd keeps the hole of a full ring open.
		ctx.fill_with_canvas_winding_rule(web_sys::CanvasWindingRule::Evenodd);
		ctx.stroke();
	}
}

fn draw_labels(ctx: &CanvasRenderingContext2d, theme: &Theme, frame: &Frame, char_width: f64) {
	ctx.set_font(theme.label.font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_line_join("round");

	for slice in frame.slices.iter().filter(|s| s.label_visible) {
		let Some(guide) = slice.label_guide.first_arc() else {
			continue;
		};
		let glyphs = layout_along(ctx, guide, &slice.label, char_width);

		ctx.set_stroke_style_str(&theme.label.halo.to_css());
		ctx.set_line_width(theme.label.halo_width);
		for glyph in &glyphs {
			with_glyph(ctx, glyph, |ctx, text| {
				let _ = ctx.stroke_text(text, 0.0, 0.0);
			});
		}

		ctx.set_fill_style_str(&theme.label.color.to_css());
		for glyph in &glyphs {
			with_glyph(ctx, glyph, |ctx, text| {
				let _ = ctx.fill_text(text, 0.0, 0.0);
			});
		}
	}
}

/// One character placed on a guide arc.
struct Glyph {
	text: String,
	x: f64,
	y: f64,
	rotation: f64,
}

/// Center the text on the arc and walk it character by character, rotating
/// each to the arc tangent.
fn layout_along(
	ctx: &CanvasRenderingContext2d,
	guide: &ArcSegment,
	label: &str,
	char_width: f64,
) -> Vec<Glyph> {
	if guide.radius <= 0.0 {
		return Vec::new();
	}
	let widths: Vec<f64> = label
		.chars()
		.map(|c| {
			ctx.measure_text(c.encode_utf8(&mut [0; 4]))
				.map(|m| m.width())
				.unwrap_or(char_width)
		})
		.collect();
	let total: f64 = widths.iter().sum();
	let direction = if guide.anticlockwise { -1.0 } else { 1.0 };
	let mut offset = (guide.length() - total) / 2.0;

	label
		.chars()
		.zip(widths)
		.map(|(c, w)| {
			let angle = guide.start_angle + direction * (offset + w / 2.0) / guide.radius;
			offset += w;
			let (x, y) = guide.point_at(angle);
			Glyph {
				text: c.to_string(),
				x,
				y,
				rotation: (angle + direction * FRAC_PI_2) % TAU,
			}
		})
		.collect()
}

fn with_glyph(
	ctx: &CanvasRenderingContext2d,
	glyph: &Glyph,
	draw: impl Fn(&CanvasRenderingContext2d, &str),
) {
	ctx.save();
	let _ = ctx.translate(glyph.x, glyph.y);
	let _ = ctx.rotate(glyph.rotation);
	draw(ctx, &glyph.text);
	ctx.restore();
}

fn draw_decoration(ctx: &CanvasRenderingContext2d, theme: &Theme, decoration: CircleDecoration) {
	ctx.begin_path();
	let _ = ctx.arc(0.0, 0.0, decoration.radius, 0.0, TAU);
	ctx.set_stroke_style_str(&theme.decoration.stroke.to_css());
	ctx.set_line_width(theme.decoration.stroke_width);
	ctx.stroke();
}
