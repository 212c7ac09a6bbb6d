//! Small `web-sys` helpers shared by the page enhancers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

/// The global `window`, absent outside a browser.
pub fn window() -> Option<Window> {
	web_sys::window()
}

/// The page `document`.
pub fn document() -> Option<Document> {
	window()?.document()
}

/// `document.querySelector`, swallowing selector errors.
pub fn query(selector: &str) -> Option<Element> {
	document()?.query_selector(selector).ok().flatten()
}

/// `document.querySelectorAll` collected into `HtmlElement`s.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
	let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<HtmlElement>().ok())
		.collect()
}

/// Element by id, cast to `T`. `None` when missing or of another type.
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
	document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// `innerWidth` and `innerHeight`.
pub fn viewport_size() -> Option<(f64, f64)> {
	let window = window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Set one inline style property, ignoring failures.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
	let _ = el.style().set_property(property, value);
}

/// Handle of a pending `setTimeout`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeoutHandle(i32);

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Option<TimeoutHandle> {
	let cb = Closure::once_into_js(f);
	match window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
		cb.unchecked_ref(),
		ms as i32,
	) {
		Ok(id) => Some(TimeoutHandle(id)),
		Err(e) => {
			log::warn!("folio-fx: setTimeout failed: {:?}", e);
			None
		}
	}
}

/// Cancel a timer from [`set_timeout`].
pub fn clear_timeout(handle: TimeoutHandle) {
	if let Some(window) = window() {
		window.clear_timeout_with_handle(handle.0);
	}
}

/// Event listener that is removed again when dropped.
pub struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
	/// Attach `callback` for `event` on `target`. `None` if the browser refuses.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		callback: impl FnMut(web_sys::Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
		if let Err(e) =
			target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
		{
			log::warn!("folio-fx: cannot listen for {}: {:?}", event, e);
			return None;
		}
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Repeating `setInterval`, cleared when dropped.
pub struct Interval {
	id: i32,
	_callback: Closure<dyn FnMut()>,
}

impl Interval {
	/// Call `callback` every `ms` milliseconds until dropped.
	pub fn new(ms: u32, callback: impl FnMut() + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut()>::new(callback);
		let id = window()?
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				ms as i32,
			)
			.map_err(|e| log::warn!("folio-fx: setInterval failed: {:?}", e))
			.ok()?;
		Some(Self {
			id,
			_callback: callback,
		})
	}
}

impl Drop for Interval {
	fn drop(&mut self) {
		if let Some(window) = window() {
			window.clear_interval_with_handle(self.id);
		}
	}
}
