//! Canvas rendering for the particle backdrop.
//!
//! Drawing goes through the [`Surface`] trait so a frame can be replayed
//! against a recording surface in tests.

use std::f64::consts::PI;

use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::particles::{Bounds, Particle, ParticleField};

/// Shadow blur applied around every particle.
pub const GLOW_BLUR: f64 = 10.0;

/// A 2D drawing target.
pub trait Surface {
	/// Current drawable size.
	fn bounds(&self) -> Bounds;
	/// Resize the backing store and return the resulting bounds.
	fn fit_to(&self, width: f64, height: f64) -> Bounds;
	/// Erase the whole surface.
	fn clear(&self);
	/// Fill a circle whose glow matches its fill color.
	fn fill_glowing_circle(&self, x: f64, y: f64, radius: f64, color: &str, blur: f64);
}

/// [`Surface`] backed by an HTML canvas and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// `None` when the canvas has no 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		Some(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn bounds(&self) -> Bounds {
		Bounds::new(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn fit_to(&self, width: f64, height: f64) -> Bounds {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
		self.bounds()
	}

	fn clear(&self) {
		let Bounds { width, height } = self.bounds();
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_glowing_circle(&self, x: f64, y: f64, radius: f64, color: &str, blur: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.set_shadow_blur(blur);
		self.ctx.set_shadow_color(color);
		self.ctx.set_fill_style_str(color);
		self.ctx.fill();
	}
}

/// Draw one particle with its glow.
pub fn draw<S: Surface + ?Sized>(particle: &Particle, surface: &S) {
	surface.fill_glowing_circle(
		particle.x,
		particle.y,
		particle.radius,
		&particle.color.to_css(),
		GLOW_BLUR,
	);
}

/// Clear the surface, advance every particle one step and draw it.
pub fn render_frame<R: Rng, S: Surface + ?Sized>(field: &mut ParticleField<R>, surface: &S) {
	surface.clear();
	field.step();
	for p in field.particles() {
		draw(p, surface);
	}
}
