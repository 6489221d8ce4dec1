//! Visual theming for the sunburst.
//!
//! Provides colors, the categorical palette for branches, the value ramp for
//! leaves, and label/decoration styles.

use std::collections::HashMap;

use super::hierarchy::Hierarchy;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parse `#RRGGBB`. Anything else yields mid gray.
	pub fn hex(s: &str) -> Self {
		let channel = |i: usize| {
			s.get(i..i + 2)
				.and_then(|h| u8::from_str_radix(h, 16).ok())
				.unwrap_or(128)
		};
		if s.starts_with('#') && s.len() == 7 {
			Color::rgb(channel(1), channel(3), channel(5))
		} else {
			Color::rgb(128, 128, 128)
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS color string: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Ordered colors for categorical assignment.
#[derive(Clone, Debug)]
pub struct Palette {
	/// Colors in assignment order.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Sunlight-style network colors: light, mid and dark ramps, each
	/// reversed so a light green leads.
	pub fn sunlight() -> Self {
		const LIGHT: [&str; 10] = [
			"#F2DA57", "#F6B656", "#E25A42", "#DCBDCF", "#B396AD", "#B0CBDB", "#33B6D0", "#7ABFCC",
			"#C8D7A1", "#A0B700",
		];
		const MID: [&str; 10] = [
			"#E3BA22", "#E58429", "#BD2D28", "#D15A86", "#8E6C8A", "#6B99A1", "#42A5B3", "#0F8C79",
			"#6BBBA1", "#5C8100",
		];
		const DARK: [&str; 10] = [
			"#B08B12", "#BA5F06", "#8C3B00", "#6D191B", "#842854", "#5F7186", "#193556", "#137B80",
			"#144847", "#254E00",
		];
		Self {
			colors: [LIGHT, MID, DARK]
				.iter()
				.flat_map(|ramp| ramp.iter().rev().map(|h| Color::hex(h)))
				.collect(),
		}
	}

	/// Muted slate blues and teals
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// Color at `index`, wrapping around.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Leaf fill as a function of value: `low` at zero, `high` at `max_value`.
#[derive(Clone, Debug)]
pub struct LeafRamp {
	/// Color at zero.
	pub low: Color,
	/// Color at `max_value`.
	pub high: Color,
	/// Values at or above this get `high`.
	pub max_value: f64,
}

impl LeafRamp {
	/// Fill for a leaf of `value`.
	pub fn color(&self, value: f64) -> Color {
		if self.max_value <= 0.0 {
			return self.high;
		}
		self.low.lerp(self.high, value / self.max_value)
	}
}

/// Slice outline and hover styling.
#[derive(Clone, Debug)]
pub struct SliceStyle {
	/// Stroke color.
	pub stroke: Color,
	/// Stroke width in pixels.
	pub stroke_width: f64,
	/// Fill lightening applied to the hovered slice (0.0 = none)
	pub hover_lighten: f64,
}

/// Curved label text styling.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// CSS font shorthand.
	pub font: &'static str,
	/// Text color.
	pub color: Color,
	/// Outline drawn under the text to keep it legible on any fill
	pub halo: Color,
	/// Halo line width in pixels.
	pub halo_width: f64,
}

/// Outline circle styling.
#[derive(Clone, Debug)]
pub struct DecorationStyle {
	/// Stroke color.
	pub stroke: Color,
	/// Stroke width in pixels.
	pub stroke_width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name used to select the theme from configuration.
	pub name: &'static str,
	/// Canvas background.
	pub background: Color,
	/// Slice styling.
	pub slice: SliceStyle,
	/// Label styling.
	pub label: LabelStyle,
	/// Decoration styling.
	pub decoration: DecorationStyle,
	/// Branch colors.
	pub palette: Palette,
	/// Leaf colors.
	pub leaves: LeafRamp,
}

impl Theme {
	/// Light page with the sunlight palette (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(255, 255, 255),
			slice: SliceStyle {
				stroke: Color::rgb(255, 255, 255),
				stroke_width: 1.0,
				hover_lighten: 0.15,
			},
			label: LabelStyle {
				font: "12px sans-serif",
				color: Color::rgb(0, 0, 0),
				halo: Color::hex("#E5E2E0"),
				halo_width: 12.0,
			},
			decoration: DecorationStyle {
				stroke: Color::rgb(0, 0, 0),
				stroke_width: 2.0,
			},
			palette: Palette::sunlight(),
			leaves: LeafRamp {
				low: Color::hex("#6eeb34"),
				high: Color::hex("#eb3434"),
				max_value: 4000.0,
			},
		}
	}

	/// Dark background with muted slate branches
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: Color::rgb(22, 27, 34),
			slice: SliceStyle {
				stroke: Color::rgb(22, 27, 34),
				stroke_width: 1.0,
				hover_lighten: 0.2,
			},
			label: LabelStyle {
				font: "12px sans-serif",
				color: Color::rgb(235, 240, 245),
				halo: Color::rgba(22, 27, 34, 0.8),
				halo_width: 6.0,
			},
			decoration: DecorationStyle {
				stroke: Color::rgba(140, 160, 180, 0.8),
				stroke_width: 2.0,
			},
			palette: Palette::slate(),
			leaves: LeafRamp {
				low: Color::rgb(100, 145, 135),
				high: Color::rgb(180, 120, 100),
				max_value: 4000.0,
			},
		}
	}

	/// Preset with the given [`name`](Theme::name), if any.
	pub fn named(name: &str) -> Option<Self> {
		[Self::default_theme(), Self::midnight()]
			.into_iter()
			.find(|theme| theme.name == name)
	}

	/// Fill color per node, indexed by [`NodeId::index`](super::NodeId::index).
	///
	/// Branches take palette colors by name in order of first appearance, so
	/// equal names share a color. Leaves are colored by value.
	pub fn assign_colors(&self, hierarchy: &Hierarchy) -> Vec<Color> {
		let mut by_name: HashMap<&str, usize> = HashMap::new();
		hierarchy
			.iter()
			.map(|node| {
				if node.is_leaf() {
					self.leaves.color(node.value)
				} else {
					let next = by_name.len();
					let slot = *by_name.entry(node.name.as_str()).or_insert(next);
					self.palette.get(slot)
				}
			})
			.collect()
	}

	/// Lighten a fill towards white by `factor` (0.0 = unchanged).
	pub fn lighten(color: Color, factor: f64) -> Color {
		color.lerp(Color::rgba(255, 255, 255, color.a), factor)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
