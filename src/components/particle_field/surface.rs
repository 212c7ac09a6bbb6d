//! Drawing surface abstraction.
//!
//! The animator only talks to a [`Surface`]. [`CanvasSurface`] adapts an HTML
//! canvas with a 2d context; tests use a recording double.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// CSS class marking the canvas as visible.
pub const ACTIVE_CLASS: &str = "ativo";

/// A colour stop at `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
	/// Position along the gradient.
	pub offset: f64,
	/// Colour at `offset`.
	pub color: Color,
}

/// Radial gradient between two circles `(x, y, r)`, as in `createRadialGradient`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialFill {
	/// Start circle.
	pub inner: (f64, f64, f64),
	/// End circle.
	pub outer: (f64, f64, f64),
	/// Colour stops, in offset order.
	pub stops: Vec<ColorStop>,
}

/// Everything the particle field needs from a 2d drawing target.
pub trait Surface {
	fn width(&self) -> f64;
	fn height(&self) -> f64;
	fn resize(&mut self, width: f64, height: f64);
	/// Toggle the visual "active" styling.
	fn set_active(&mut self, active: bool);
	fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &RadialFill);
	/// Filled circle painted at `alpha` global opacity.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

/// [`Surface`] backed by a `<canvas>` element.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Returns `None` when the element has no 2d context.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self { canvas, ctx })
	}

	fn gradient(&self, fill: &RadialFill) -> Option<CanvasGradient> {
		let (inner, outer) = (fill.inner, fill.outer);
		let gradient = self
			.ctx
			.create_radial_gradient(inner.0, inner.1, inner.2, outer.0, outer.1, outer.2)
			.ok()?;
		for stop in &fill.stops {
			if let Err(e) = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css()) {
				log::warn!("folio-fx: bad gradient stop: {:?}", e);
			}
		}
		Some(gradient)
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.canvas.width() as f64
	}

	fn height(&self) -> f64 {
		self.canvas.height() as f64
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn set_active(&mut self, active: bool) {
		let _ = self
			.canvas
			.class_list()
			.toggle_with_force(ACTIVE_CLASS, active);
	}

	fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.clear_rect(x, y, w, h);
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &RadialFill) {
		let Some(gradient) = self.gradient(fill) else {
			return;
		};
		self.ctx.set_fill_style_canvas_gradient(&gradient);
		self.ctx.fill_rect(x, y, w, h);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.ctx.save();
		self.ctx.set_global_alpha(alpha);
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
		self.ctx.restore();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}
}
