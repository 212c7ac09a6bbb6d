//! Test doubles for the surface and frame scheduler seams.

use super::scheduler::{FrameHandle, FrameScheduler};
use super::surface::{RadialFill, Surface};
use super::theme::Color;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
	Clear,
	Rect(RadialFill),
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
		alpha: f64,
	},
	Line {
		from: (f64, f64),
		to: (f64, f64),
		color: Color,
		width: f64,
	},
}

/// Surface that records draw calls instead of painting.
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub width: f64,
	pub height: f64,
	pub active: bool,
	pub ops: Vec<Op>,
}

impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Default::default()
		}
	}

	pub fn circles(&self) -> impl Iterator<Item = &Op> {
		self.ops.iter().filter(|op| matches!(op, Op::Circle { .. }))
	}
}

impl Surface for RecordingSurface {
	fn width(&self) -> f64 {
		self.width
	}

	fn height(&self) -> f64 {
		self.height
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn set_active(&mut self, active: bool) {
		self.active = active;
	}

	fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
		self.ops.push(Op::Clear);
	}

	fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, fill: &RadialFill) {
		self.ops.push(Op::Rect(fill.clone()));
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.ops.push(Op::Circle {
			x,
			y,
			radius,
			color,
			alpha,
		});
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ops.push(Op::Line {
			from,
			to,
			color,
			width,
		});
	}
}

/// Scheduler that hands out sequential handles and lets the test fire them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
	next_id: i32,
	pub pending: Option<FrameHandle>,
	pub requested: usize,
	pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
	/// Take the pending request as if the host fired it.
	pub fn fire(&mut self) -> Option<FrameHandle> {
		self.pending.take()
	}
}

impl FrameScheduler for ManualScheduler {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		assert!(self.pending.is_none(), "two frames requested at once");
		self.next_id += 1;
		self.requested += 1;
		let handle = FrameHandle(self.next_id);
		self.pending = Some(handle);
		Some(handle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if self.pending == Some(handle) {
			self.pending = None;
		}
		self.cancelled.push(handle);
	}
}
