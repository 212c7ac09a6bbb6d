//! Leptos component wrapping the particle canvas.
//!
//! The component owns the animator and its two browser seams: a
//! [`CanvasSurface`] and a [`RafScheduler`]. The `requestAnimationFrame`
//! closure, the window resize listener and the delayed theme restart all
//! forward into the same [`FieldController`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::scheduler::{FrameCallback, RafScheduler};
use super::state::{ParticleField, RestartToken};
use super::surface::CanvasSurface;
use super::theme::ThemeMode;
use crate::config::FieldConfig;
use crate::dom::{self, Listener, TimeoutHandle};
use crate::teardown;

/// The animator bundled with the surface and scheduler it draws through.
pub struct FieldController {
	/// Animator state.
	pub field: ParticleField,
	surface: CanvasSurface,
	scheduler: RafScheduler,
	/// Timer that will deliver the pending theme restart.
	restart_timer: Option<TimeoutHandle>,
	_resize: Option<Listener>,
}

type SharedController = Rc<RefCell<Option<FieldController>>>;

impl FieldController {
	/// Body of the `requestAnimationFrame` callback.
	pub fn frame(&mut self) {
		self.field.on_frame(&mut self.surface, &mut self.scheduler);
	}

	/// Show or hide the field.
	pub fn set_enabled(&mut self, enabled: bool) {
		if !enabled {
			self.cancel_restart_timer();
		}
		self.field
			.set_enabled(enabled, &mut self.surface, &mut self.scheduler);
	}

	/// Follow a window resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.on_resize(width, height, &mut self.surface);
	}

	/// Returns the delay and token when a restart has to be scheduled.
	/// An older restart timer is cleared first.
	pub fn theme_changed(&mut self, theme: ThemeMode) -> Option<(u32, RestartToken)> {
		self.cancel_restart_timer();
		self.field
			.on_theme_change(theme, &mut self.surface, &mut self.scheduler)
			.map(|token| (self.field.restart_delay_ms(), token))
	}

	/// Remember the timer armed for the pending restart.
	pub fn arm_restart(&mut self, timer: Option<TimeoutHandle>) {
		self.cancel_restart_timer();
		self.restart_timer = timer;
	}

	/// Called by the restart timer.
	pub fn restart(&mut self, token: RestartToken) {
		self.restart_timer = None;
		self.field
			.on_restart(token, &mut self.surface, &mut self.scheduler);
	}

	/// Stop the loop and drop any pending restart.
	pub fn stop(&mut self) {
		self.cancel_restart_timer();
		self.field.stop(&mut self.surface, &mut self.scheduler);
	}

	fn cancel_restart_timer(&mut self) {
		if let Some(timer) = self.restart_timer.take() {
			dom::clear_timeout(timer);
		}
	}
}

/// Build the controller for a mounted canvas. `None` without a 2d context.
fn mount(
	canvas: HtmlCanvasElement,
	config: FieldConfig,
	theme: ThemeMode,
	controller: &SharedController,
	frame_cb: &FrameCallback,
) -> Option<FieldController> {
	let window = dom::window()?;
	let Some(mut surface) = CanvasSurface::new(canvas) else {
		log::debug!("folio-fx: canvas has no 2d context, particle field disabled");
		return None;
	};

	let mut field = ParticleField::new(config, theme);
	if let Some((w, h)) = dom::viewport_size() {
		field.on_resize(w, h, &mut surface);
	}

	let controller_frame = controller.clone();
	*frame_cb.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut c) = *controller_frame.borrow_mut() {
			c.frame();
		}
	}));

	let controller_resize = controller.clone();
	let resize = Listener::new(window.as_ref(), "resize", move |_| {
		let Some((w, h)) = dom::viewport_size() else {
			return;
		};
		if let Some(ref mut c) = *controller_resize.borrow_mut() {
			c.resize(w, h);
		}
	});

	Some(FieldController {
		field,
		surface,
		scheduler: RafScheduler::new(window, frame_cb.clone()),
		restart_timer: None,
		_resize: resize,
	})
}

/// Full-viewport background canvas of drifting, linked particles.
///
/// `enabled` shows or hides the field; a change of `theme` while it is
/// showing restarts it with the new palette after a short pause.
#[component]
pub fn ParticleCanvas(
	#[prop(into)] enabled: Signal<bool>,
	#[prop(into)] theme: Signal<ThemeMode>,
	#[prop(optional)] config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller: SharedController = Rc::new(RefCell::new(None));
	let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
	let (controller_init, controller_toggle, controller_theme) =
		(controller.clone(), controller.clone(), controller.clone());

	// The frame closure holds the controller and the scheduler holds the
	// closure; both sides are cleared here to break the cycle.
	let (controller_teardown, frame_cb_teardown) = (controller.clone(), frame_cb.clone());
	teardown::on_teardown(move || {
		if let Some(mut c) = controller_teardown.borrow_mut().take() {
			c.stop();
		}
		frame_cb_teardown.borrow_mut().take();
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if controller_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let built = mount(
			canvas,
			config.clone(),
			theme.get_untracked(),
			&controller_init,
			&frame_cb,
		);
		*controller_init.borrow_mut() = built;
		if enabled.get_untracked() {
			if let Some(ref mut c) = *controller_init.borrow_mut() {
				c.set_enabled(true);
			}
		}
	});

	Effect::new(move |_| {
		let on = enabled.get();
		if let Some(ref mut c) = *controller_toggle.borrow_mut() {
			if c.field.is_enabled() != on {
				c.set_enabled(on);
			}
		}
	});

	Effect::new(move |_| {
		let mode = theme.get();
		let scheduled = match *controller_theme.borrow_mut() {
			Some(ref mut c) => c.theme_changed(mode),
			None => None,
		};
		if let Some((ms, token)) = scheduled {
			let controller_restart = controller_theme.clone();
			let timer = dom::set_timeout(ms, move || {
				if let Some(ref mut c) = *controller_restart.borrow_mut() {
					c.restart(token);
				}
			});
			if let Some(ref mut c) = *controller_theme.borrow_mut() {
				c.arm_restart(timer);
			}
		}
	});

	view! { <canvas node_ref=canvas_ref id="particlesCanvas" class="particles-canvas" /> }
}
