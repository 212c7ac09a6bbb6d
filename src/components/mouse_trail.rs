//! Cursor follower with a short trail of fading dots.
//!
//! [`TrailState`] is a time-driven model: pointer moves schedule a delayed hop
//! for each dot (dot `i` waits `i * 50ms`), and [`TrailState::tick`] applies
//! whatever is due. The component feeds it `mousemove` events and ticks it
//! from an interval while the effect is on.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use crate::dom::{self, Interval, Listener};
use crate::teardown;

/// Number of trailing dots.
pub const TRAIL_LEN: usize = 10;
const FOLLOWER_OFFSET: f64 = 10.0;
const DOT_OFFSET: f64 = 3.0;
const DOT_DELAY_MS: f64 = 50.0;
const DOT_VISIBLE_MS: f64 = 100.0;
const DOT_OPACITY: f64 = 0.3;
const TICK_MS: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hop {
	due: f64,
	x: f64,
	y: f64,
}

/// One trailing dot, in page pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrailDot {
	/// Left edge in viewport pixels.
	pub x: f64,
	/// Top edge in viewport pixels.
	pub y: f64,
	/// Current opacity, 0 when hidden.
	pub opacity: f64,
	hop: Option<Hop>,
	fade_at: Option<f64>,
}

/// Follower position and trailing dots over time.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailState {
	follower: Option<(f64, f64)>,
	dots: Vec<TrailDot>,
}

impl Default for TrailState {
	fn default() -> Self {
		Self {
			follower: None,
			dots: vec![TrailDot::default(); TRAIL_LEN],
		}
	}
}

impl TrailState {
	/// Follower top-left corner, once the pointer has moved.
	pub fn follower(&self) -> Option<(f64, f64)> {
		self.follower
	}

	/// Trailing dots, nearest first.
	pub fn dots(&self) -> &[TrailDot] {
		&self.dots
	}

	/// The follower jumps at once; each dot replaces its pending hop.
	pub fn pointer_moved(&mut self, x: f64, y: f64, now: f64) {
		self.follower = Some((x - FOLLOWER_OFFSET, y - FOLLOWER_OFFSET));
		for (i, dot) in self.dots.iter_mut().enumerate() {
			dot.hop = Some(Hop {
				due: now + i as f64 * DOT_DELAY_MS,
				x: x - DOT_OFFSET,
				y: y - DOT_OFFSET,
			});
		}
	}

	/// Apply due hops and fades. Returns whether anything visible changed.
	pub fn tick(&mut self, now: f64) -> bool {
		let mut changed = false;
		for dot in &mut self.dots {
			if let Some(hop) = dot.hop.filter(|h| h.due <= now) {
				dot.x = hop.x;
				dot.y = hop.y;
				dot.opacity = DOT_OPACITY;
				dot.fade_at = Some(hop.due + DOT_VISIBLE_MS);
				dot.hop = None;
				changed = true;
			}
			if dot.fade_at.is_some_and(|t| t <= now) {
				dot.opacity = 0.0;
				dot.fade_at = None;
				changed = true;
			}
		}
		changed
	}
}

/// Listeners and ticker alive while the trail is on.
struct TrailDriver {
	_mousemove: Option<Listener>,
	_ticker: Option<Interval>,
}

fn start_driver(state: Rc<RefCell<TrailState>>, view_state: RwSignal<TrailState>) -> Option<TrailDriver> {
	let document = dom::document()?;
	let state_move = state.clone();
	let mousemove = Listener::new(document.as_ref(), "mousemove", move |ev| {
		let Ok(ev) = ev.dyn_into::<MouseEvent>() else {
			return;
		};
		let mut s = state_move.borrow_mut();
		s.pointer_moved(ev.client_x() as f64, ev.client_y() as f64, js_sys::Date::now());
		view_state.set(s.clone());
	});
	let ticker = Interval::new(TICK_MS, move || {
		let mut s = state.borrow_mut();
		if s.tick(js_sys::Date::now()) {
			view_state.set(s.clone());
		}
	});
	Some(TrailDriver {
		_mousemove: mousemove,
		_ticker: ticker,
	})
}

fn px(v: f64) -> String {
	format!("{v}px")
}

/// Renders the follower and dots while `enabled` is set.
#[component]
pub fn MouseTrailLayer(#[prop(into)] enabled: Signal<bool>) -> impl IntoView {
	let view_state = RwSignal::new(TrailState::default());
	let driver: Rc<RefCell<Option<TrailDriver>>> = Rc::new(RefCell::new(None));

	let driver_teardown = driver.clone();
	teardown::on_teardown(move || {
		driver_teardown.borrow_mut().take();
	});

	Effect::new(move |_| {
		if enabled.get() {
			if driver.borrow().is_none() {
				let state = Rc::new(RefCell::new(TrailState::default()));
				*driver.borrow_mut() = start_driver(state, view_state);
			}
		} else {
			// Dropping the driver removes the listener and stops the ticker.
			driver.borrow_mut().take();
			view_state.set(TrailState::default());
		}
	});

	view! {
		<Show when=move || enabled.get()>
			<div
				class="efeito-mouse ativo"
				style:left=move || view_state.with(|s| s.follower().map(|f| px(f.0)).unwrap_or_default())
				style:top=move || view_state.with(|s| s.follower().map(|f| px(f.1)).unwrap_or_default())
			></div>
			{(0..TRAIL_LEN)
				.map(|i| {
					view! {
						<div
							class="rastro-mouse"
							style:left=move || view_state.with(|s| px(s.dots()[i].x))
							style:top=move || view_state.with(|s| px(s.dots()[i].y))
							style:opacity=move || view_state.with(|s| s.dots()[i].opacity.to_string())
						></div>
					}
				})
				.collect_view()}
		</Show>
	}
}
