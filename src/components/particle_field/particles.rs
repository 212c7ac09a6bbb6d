//! Particles drifting across the page background.

use rand::Rng;

use super::theme::{Color, Palette};
use crate::config::FieldConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in canvas pixels.
	pub x: f64,
	/// Vertical position in canvas pixels.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Radius.
	pub size: f64,
	/// Fill colour; its alpha is the per-particle tint strength.
	pub color: Color,
	/// Overall opacity, fades by `fade_step` every frame.
	pub alpha: f64,
}

impl Particle {
	/// Create a particle with freshly randomised state.
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		palette: &Palette,
		config: &FieldConfig,
		width: f64,
		height: f64,
	) -> Self {
		let mut p = Particle {
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			size: config.size_min,
			color: palette.particle,
			alpha: config.alpha_min,
		};
		p.reset(rng, palette, config, width, height);
		p
	}

	/// Redraw every attribute from the construction ranges.
	pub fn reset<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		palette: &Palette,
		config: &FieldConfig,
		width: f64,
		height: f64,
	) {
		self.x = sample(rng, 0.0, width);
		self.y = sample(rng, 0.0, height);
		self.size = sample(rng, config.size_min, config.size_max);
		self.vx = sample(rng, -config.max_speed, config.max_speed);
		self.vy = sample(rng, -config.max_speed, config.max_speed);
		self.color = palette
			.particle
			.with_alpha(sample(rng, 0.0, config.color_alpha_max));
		self.alpha = sample(rng, config.alpha_min, config.alpha_max);
	}

	/// Advance one frame: move, bounce off the edges, fade, respawn when spent.
	///
	/// Returns `true` when the particle was respawned.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		palette: &Palette,
		config: &FieldConfig,
		width: f64,
		height: f64,
	) -> bool {
		self.x += self.vx;
		self.y += self.vy;

		// Axes are handled independently, a corner hit flips both.
		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
			self.x = self.x.clamp(0.0, width.max(0.0));
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
			self.y = self.y.clamp(0.0, height.max(0.0));
		}

		self.alpha -= config.fade_step;
		if self.alpha <= 0.0 {
			self.reset(rng, palette, config, width, height);
			return true;
		}
		false
	}

	/// Pull the particle inside a (possibly smaller) viewport.
	pub fn confine(&mut self, width: f64, height: f64) {
		self.x = self.x.clamp(0.0, width.max(0.0));
		self.y = self.y.clamp(0.0, height.max(0.0));
	}

	/// Euclidean distance between centres.
	pub fn distance_to(&self, other: &Particle) -> f64 {
		let dx = self.x - other.x;
		let dy = self.y - other.y;
		(dx * dx + dy * dy).sqrt()
	}
}

/// Uniform sample from `[low, high)`, tolerating an empty range (zero-sized canvas).
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
	if high > low {
		rng.gen_range(low..high)
	} else {
		low
	}
}
