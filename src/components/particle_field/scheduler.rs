//! Frame scheduling seam.
//!
//! In the browser this is `requestAnimationFrame`; the callback itself is
//! owned by whoever drives the animator, the scheduler only arms and disarms it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Opaque id of a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// "Call me back before the next repaint", plus cancellation.
pub trait FrameScheduler {
	/// Arm the frame callback. `None` if the host refused.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Shared slot for the frame callback closure.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// [`FrameScheduler`] over `window.requestAnimationFrame`.
pub struct RafScheduler {
	window: Window,
	callback: FrameCallback,
}

impl RafScheduler {
	/// Arms whatever closure sits in `callback` at request time.
	pub fn new(window: Window, callback: FrameCallback) -> Self {
		Self { window, callback }
	}
}

impl FrameScheduler for RafScheduler {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		let slot = self.callback.borrow();
		let cb = slot.as_ref()?;
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(id) => Some(FrameHandle(id)),
			Err(e) => {
				log::warn!("folio-fx: requestAnimationFrame failed: {:?}", e);
				None
			}
		}
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}
}
