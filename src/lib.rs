//! folio-fx: visual effects and page behaviour for a personal portfolio.
//!
//! The heart of the crate is an animated particle background drawn on a
//! canvas. Around it sit a theme toggle, a cursor trail, a typing effect
//! for the hero subtitle, scroll parallax, smooth anchor navigation and a
//! contact form with a mail-client fallback.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::HtmlScriptElement;

// Only needed to switch on its `js` backend for `rand` under wasm.
use getrandom as _;
#[cfg(test)]
use wasm_bindgen_test as _;

pub mod components;
pub mod config;
pub mod dom;
pub mod teardown;

use components::controls::EffectControls;
use components::mouse_trail::MouseTrailLayer;
use components::particle_field::{ParticleCanvas, ThemeMode};
use components::{contact_form, navigation, scroll_effects, theme_toggle, typed_text};
pub use config::SiteConfig;

const CONFIG_ELEMENT_ID: &str = "site-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("folio-fx: logging initialized");
}

/// Load overrides from a script element with id="site-config".
/// Falls back to the defaults when it is missing or malformed.
fn load_site_config() -> SiteConfig {
	let Some(script) = dom::by_id::<HtmlScriptElement>(CONFIG_ELEMENT_ID) else {
		return SiteConfig::default();
	};
	let json_text = script.text().unwrap_or_default();
	match SiteConfig::from_json(&json_text) {
		Ok(config) => {
			info!("folio-fx: loaded site config");
			config
		}
		Err(e) => {
			warn!("folio-fx: failed to parse site config: {}", e);
			SiteConfig::default()
		}
	}
}

/// Hook the plain-DOM enhancers into the page that is already there.
fn install_enhancers(config: &SiteConfig) {
	typed_text::install(&config.typed_text);
	teardown::keep_until_teardown(scroll_effects::install());
	teardown::keep_until_teardown(contact_form::install(config.contact.clone()));
	teardown::keep_until_teardown(navigation::install());
}

/// Run every registered cleanup: stops the animation, the cursor trail and
/// all page listeners.
#[wasm_bindgen]
pub fn destroy() {
	let count = teardown::run();
	info!("folio-fx: torn down ({} hooks)", count);
}

/// Main application component.
/// Reads the saved theme and site config, then renders the effect layers.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config();
	let theme = RwSignal::new(theme_toggle::load_theme());
	let particles_on = RwSignal::new(false);
	let trail_on = RwSignal::new(false);

	Effect::new(move |previous: Option<ThemeMode>| {
		let mode = theme.get();
		theme_toggle::apply_theme(mode);
		if theme_toggle::should_save(previous, mode) {
			theme_toggle::save_theme(mode);
		}
		mode
	});

	let enhancer_config = config.clone();
	Effect::new(move |installed: Option<()>| {
		if installed.is_none() {
			install_enhancers(&enhancer_config);
		}
	});

	let theme_signal: Signal<ThemeMode> = theme.into();
	view! {
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleCanvas enabled=particles_on theme=theme_signal config=config.field />
		<EffectControls theme=theme particles_on=particles_on trail_on=trail_on />
		<MouseTrailLayer enabled=trail_on />
	}
}
