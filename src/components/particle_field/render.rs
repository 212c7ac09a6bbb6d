//! Frame drawing for the particle field.
//!
//! Passes, back to front:
//! 1. Clear and paint the radial backdrop
//! 2. Particles (updated and drawn in the same sweep, see `ParticleField::on_frame`)
//! 3. Links between every pair closer than the link distance

use super::particles::Particle;
use super::surface::{ColorStop, RadialFill, Surface};
use super::theme::Palette;

/// Wipe the surface and paint the backdrop gradient.
pub fn draw_backdrop<S: Surface + ?Sized>(surface: &mut S, palette: &Palette) {
	let (w, h) = (surface.width(), surface.height());
	surface.clear_rect(0.0, 0.0, w, h);
	surface.fill_rect(0.0, 0.0, w, h, &backdrop_fill(w, h, palette));
}

/// Radial gradient centred on the viewport, reaching half the longer side.
pub fn backdrop_fill(width: f64, height: f64, palette: &Palette) -> RadialFill {
	let (cx, cy) = (width / 2.0, height / 2.0);
	RadialFill {
		inner: (cx, cy, 0.0),
		outer: (cx, cy, width.max(height) / 2.0),
		stops: vec![
			ColorStop {
				offset: 0.0,
				color: palette.backdrop_near,
			},
			ColorStop {
				offset: 1.0,
				color: palette.backdrop_far,
			},
		],
	}
}

/// Paint one particle at its own opacity.
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, p: &Particle) {
	surface.fill_circle(p.x, p.y, p.size, p.color, p.alpha);
}

/// Index pairs `(i, j)`, `i < j`, closer than `max_distance`.
pub fn linked_pairs(particles: &[Particle], max_distance: f64) -> Vec<(usize, usize)> {
	let mut pairs = Vec::new();
	for (i, a) in particles.iter().enumerate() {
		for (j, b) in particles.iter().enumerate().skip(i + 1) {
			if a.distance_to(b) < max_distance {
				pairs.push((i, j));
			}
		}
	}
	pairs
}

/// Stroke a line for every linked pair. Returns how many were drawn.
pub fn draw_links<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	palette: &Palette,
	max_distance: f64,
	line_width: f64,
) -> usize {
	let pairs = linked_pairs(particles, max_distance);
	for &(i, j) in &pairs {
		let (a, b) = (&particles[i], &particles[j]);
		surface.stroke_line((a.x, a.y), (b.x, b.y), palette.link, line_width);
	}
	pairs.len()
}
