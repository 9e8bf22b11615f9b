//! Ambient particles drifting across the hero backdrop.

use rand::Rng;
use rand::seq::SliceRandom;

use super::theme::{Color, ParticleStyle, WHITE_GLOW};

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Horizontal extent
	pub width: f64,
	/// Vertical extent
	pub height: f64,
}

impl Bounds {
	/// Bounds of a `width` x `height` surface.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Whether `(x, y)` lies in `[0, width) x [0, height)`.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
	}
}

/// A single floating particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position
	pub x: f64,
	/// Vertical position
	pub y: f64,
	/// Radius in pixels
	pub radius: f64,
	/// Fill and glow color
	pub color: Color,
	/// Horizontal velocity in pixels per frame
	pub vx: f64,
	/// Vertical velocity in pixels per frame
	pub vy: f64,
}

impl Particle {
	/// Spawn a particle at a uniformly random position inside `bounds`.
	pub fn random<R: Rng>(rng: &mut R, bounds: Bounds, style: &ParticleStyle) -> Self {
		let speed = style.max_speed.abs();
		let velocity = |rng: &mut R| {
			if speed > 0.0 {
				rng.gen_range(-speed..speed)
			} else {
				0.0
			}
		};
		Self {
			x: sample(rng, bounds.width),
			y: sample(rng, bounds.height),
			radius: if style.radius.is_empty() {
				style.radius.start
			} else {
				rng.gen_range(style.radius.clone())
			},
			color: *style.palette.choose(rng).unwrap_or(&WHITE_GLOW),
			vx: velocity(rng),
			vy: velocity(rng),
		}
	}
}

fn sample<R: Rng>(rng: &mut R, extent: f64) -> f64 {
	if extent > 0.0 {
		rng.gen_range(0.0..extent)
	} else {
		0.0
	}
}

/// Fold `value` back into `[0, extent)`, re-entering from the opposite edge.
pub fn wrap(value: f64, extent: f64) -> f64 {
	if extent.is_nan() || extent <= 0.0 {
		return 0.0;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid rounds up to `extent` for tiny negative inputs.
	if wrapped < extent { wrapped } else { 0.0 }
}

/// Move a particle one frame along its velocity, wrapping at the edges.
pub fn advance(particle: Particle, bounds: Bounds) -> Particle {
	Particle {
		x: wrap(particle.x + particle.vx, bounds.width),
		y: wrap(particle.y + particle.vy, bounds.height),
		..particle
	}
}

/// A fixed-size particle population bound to a surface size.
pub struct ParticleField<R> {
	particles: Vec<Particle>,
	bounds: Bounds,
	style: ParticleStyle,
	rng: R,
}

impl<R: Rng> ParticleField<R> {
	/// Spawn a full population inside `bounds`.
	pub fn new(style: ParticleStyle, bounds: Bounds, rng: R) -> Self {
		let mut field = Self {
			particles: Vec::with_capacity(style.count),
			bounds,
			style,
			rng,
		};
		field.regenerate(bounds);
		field
	}

	/// Replace every particle with a fresh one inside `bounds`.
	///
	/// Old particles are discarded rather than rescaled so nothing is left
	/// stranded outside a shrunk surface.
	pub fn regenerate(&mut self, bounds: Bounds) {
		self.bounds = bounds;
		self.particles.clear();
		for _ in 0..self.style.count {
			let particle = Particle::random(&mut self.rng, bounds, &self.style);
			self.particles.push(particle);
		}
	}

	/// Advance every particle by one frame.
	pub fn step(&mut self) {
		let bounds = self.bounds;
		for p in &mut self.particles {
			*p = advance(*p, bounds);
		}
	}

	/// The current population.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Surface size the population was generated for.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}
}
