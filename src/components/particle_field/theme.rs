//! Colors and population settings for the particle backdrop.

use std::ops::Range;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Opacity in `[0, 1]`
	pub a: f64,
}

impl Color {
	/// Color from channels and opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS color string: hex when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Soft white used when no palette is configured.
pub const WHITE_GLOW: Color = Color::rgba(255, 255, 255, 0.7);

/// Particle population configuration.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Number of particles, kept constant across resizes
	pub count: usize,
	/// Colors picked uniformly per particle
	pub palette: Vec<Color>,
	/// Radius range in pixels (half-open)
	pub radius: Range<f64>,
	/// Per-axis speed bound in pixels per frame; velocities fall in `[-max, max)`
	pub max_speed: f64,
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self {
			count: 50,
			palette: vec![WHITE_GLOW],
			radius: 1.0..3.0,
			max_speed: 0.25,
		}
	}
}
