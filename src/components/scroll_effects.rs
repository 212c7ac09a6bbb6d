//! Parallax on scroll and debounced fade-in reveal.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{self, Listener, TimeoutHandle};

/// Elements that drift with the page, and how fast.
pub const PARALLAX_SELECTOR: &str = ".hero, .sobre-imagem";
/// Elements faded in once scrolled into view.
pub const REVEAL_SELECTOR: &str = ".fade-in";
const HERO_CLASS: &str = "hero";
const HERO_SPEED: f64 = 0.5;
const DEFAULT_SPEED: f64 = 0.3;
/// An element is revealed once its top is this far inside the viewport.
pub const REVEAL_MARGIN: f64 = 150.0;
const REVEAL_DEBOUNCE_MS: u32 = 10;

/// Fraction of the scroll distance an element drifts by.
pub fn parallax_speed(is_hero: bool) -> f64 {
	if is_hero { HERO_SPEED } else { DEFAULT_SPEED }
}

/// CSS `transform` for an element drifting at `speed`.
pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
	format!("translateY({}px)", scroll_y * speed)
}

/// Whether an element whose top sits at `top` should be shown.
pub fn should_reveal(top: f64, viewport_height: f64) -> bool {
	top < viewport_height - REVEAL_MARGIN
}

fn apply_parallax(scroll_y: f64) {
	for el in dom::query_all(PARALLAX_SELECTOR) {
		let speed = parallax_speed(el.class_list().contains(HERO_CLASS));
		dom::set_style(&el, "transform", &parallax_transform(scroll_y, speed));
	}
}

fn reveal_visible() {
	let Some((_, viewport_height)) = dom::viewport_size() else {
		return;
	};
	for el in dom::query_all(REVEAL_SELECTOR) {
		if should_reveal(el.get_bounding_client_rect().top(), viewport_height) {
			dom::set_style(&el, "opacity", "1");
			dom::set_style(&el, "transform", "translateY(0)");
		}
	}
}

/// Listen for scrolls. The returned listener detaches when dropped.
pub fn install() -> Option<Listener> {
	let window = dom::window()?;
	let pending: Rc<Cell<Option<TimeoutHandle>>> = Rc::new(Cell::new(None));
	let scroll_window = window.clone();
	Listener::new(window.as_ref(), "scroll", move |_| {
		apply_parallax(scroll_window.page_y_offset().unwrap_or(0.0));

		if let Some(handle) = pending.take() {
			dom::clear_timeout(handle);
		}
		let pending_fire = pending.clone();
		pending.set(dom::set_timeout(REVEAL_DEBOUNCE_MS, move || {
			pending_fire.set(None);
			reveal_visible();
		}));
	})
}
