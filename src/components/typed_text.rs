//! Typewriter reveal for the hero subtitle.

use std::rc::Rc;

use web_sys::HtmlElement;

use crate::config::TypedTextConfig;
use crate::dom;

/// Id of the element that receives the text.
pub const ELEMENT_ID: &str = "texto-digitacao";
const CARET_STYLE: &str = "2px solid var(--destaque)";

/// What the element should show at a given moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
	/// Text typed so far.
	pub shown: String,
	/// The caret border is still drawn.
	pub caret: bool,
}

/// Timeline of the typing animation, measured from installation.
#[derive(Clone, Debug)]
pub struct TypedText {
	chars: Vec<char>,
	start_delay: f64,
	interval: f64,
	linger: f64,
}

impl TypedText {
	/// Timeline for `config.text`.
	pub fn new(config: &TypedTextConfig) -> Self {
		Self {
			chars: config.text.chars().collect(),
			start_delay: config.start_delay_ms as f64,
			interval: config.char_interval_ms.max(1) as f64,
			linger: config.caret_linger_ms as f64,
		}
	}

	/// Characters visible `elapsed` ms in. The first one appears right at the start delay.
	fn typed(&self, elapsed: f64) -> usize {
		if elapsed < self.start_delay {
			return 0;
		}
		let steps = ((elapsed - self.start_delay) / self.interval).floor() as usize + 1;
		steps.min(self.chars.len())
	}

	fn caret_off_at(&self) -> f64 {
		self.start_delay + self.chars.len() as f64 * self.interval + self.linger
	}

	/// Text and caret state `elapsed` ms after installation.
	pub fn frame_at(&self, elapsed: f64) -> TypingFrame {
		TypingFrame {
			shown: self.chars[..self.typed(elapsed)].iter().collect(),
			caret: elapsed < self.caret_off_at(),
		}
	}

	/// When the frame next changes after `elapsed`, or `None` once finished.
	pub fn next_change(&self, elapsed: f64) -> Option<f64> {
		if elapsed < self.start_delay {
			return Some(self.start_delay);
		}
		let typed = self.typed(elapsed);
		if typed < self.chars.len() {
			return Some(self.start_delay + typed as f64 * self.interval);
		}
		let off = self.caret_off_at();
		(elapsed < off).then_some(off)
	}
}

fn render(el: &HtmlElement, frame: &TypingFrame) {
	el.set_text_content(Some(&frame.shown));
	if !frame.caret {
		dom::set_style(el, "border-right", "none");
		dom::set_style(el, "padding-right", "0");
	}
}

fn step(el: HtmlElement, typed: Rc<TypedText>, started: f64) {
	let elapsed = js_sys::Date::now() - started;
	render(&el, &typed.frame_at(elapsed));
	if let Some(next) = typed.next_change(elapsed) {
		let wait = (next - elapsed).max(0.0).ceil() as u32;
		dom::set_timeout(wait, move || step(el, typed, started));
	}
}

/// Start typing into `#texto-digitacao`. Does nothing if the element is absent.
pub fn install(config: &TypedTextConfig) {
	let Some(el) = dom::by_id::<HtmlElement>(ELEMENT_ID) else {
		return;
	};
	el.set_text_content(None);
	dom::set_style(&el, "border-right", CARET_STYLE);
	dom::set_style(&el, "padding-right", "5px");
	dom::set_style(&el, "display", "inline-block");

	step(el, Rc::new(TypedText::new(config)), js_sys::Date::now());
}
