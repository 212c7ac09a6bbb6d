//! Mobile menu toggle and smooth in-page anchor scrolling.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, ScrollBehavior, ScrollToOptions};

use crate::dom::{self, Listener};

const MENU_TOGGLE: &str = ".menu-toggle";
const MENU: &str = ".nav-links";
const ANCHORS: &str = "a[href^=\"#\"]";
const OPEN_CLASS: &str = "active";
/// Height of the fixed header, kept clear above a scrolled-to section.
pub const HEADER_OFFSET: f64 = 80.0;

/// Id targeted by an in-page `href`. A bare `#` targets nothing.
pub fn anchor_target(href: &str) -> Option<&str> {
	href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that puts a section just below the header.
pub fn scroll_top_for(offset_top: f64) -> f64 {
	offset_top - HEADER_OFFSET
}

fn close_menu() {
	if let Some(menu) = dom::query(MENU) {
		let _ = menu.class_list().remove_1(OPEN_CLASS);
	}
}

fn scroll_to_section(id: &str) {
	let (Some(window), Some(target)) = (dom::window(), dom::by_id::<HtmlElement>(id)) else {
		return;
	};
	let options = ScrollToOptions::new();
	options.set_top(scroll_top_for(target.offset_top() as f64));
	options.set_behavior(ScrollBehavior::Smooth);
	window.scroll_to_with_scroll_to_options(&options);
}

fn is_inside(el: &Element, target: Option<&Node>) -> bool {
	let node: &Node = el.as_ref();
	node.contains(target)
}

/// Wire the menu and anchors. Dropping the listeners unhooks everything.
pub fn install() -> Vec<Listener> {
	let mut listeners = Vec::new();

	if let (Some(toggle), Some(menu)) = (dom::query(MENU_TOGGLE), dom::query(MENU)) {
		listeners.extend(Listener::new(toggle.as_ref(), "click", move |_| {
			let _ = menu.class_list().toggle(OPEN_CLASS);
		}));
	}

	for anchor in dom::query_all(ANCHORS) {
		let href = anchor.get_attribute("href").unwrap_or_default();
		listeners.extend(Listener::new(anchor.as_ref(), "click", move |ev| {
			ev.prevent_default();
			if let Some(id) = anchor_target(&href) {
				scroll_to_section(id);
				close_menu();
			}
		}));
	}

	if let Some(document) = dom::document() {
		listeners.extend(Listener::new(document.as_ref(), "click", |ev| {
			let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
			let (Some(menu), Some(toggle)) = (dom::query(MENU), dom::query(MENU_TOGGLE)) else {
				return;
			};
			if !is_inside(&menu, target.as_ref()) && !is_inside(&toggle, target.as_ref()) {
				let _ = menu.class_list().remove_1(OPEN_CLASS);
			}
		}));
	}

	log::debug!("folio-fx: navigation wired with {} listeners", listeners.len());
	listeners
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bare_hash_has_no_target() {
		assert_eq!(anchor_target("#"), None);
		assert_eq!(anchor_target("#sobre"), Some("sobre"));
		assert_eq!(anchor_target("/outra"), None);
	}

	#[test]
	fn header_is_left_clear() {
		assert_eq!(scroll_top_for(1200.0), 1120.0);
		assert_eq!(scroll_top_for(0.0), -80.0);
	}
}
