//! Page configuration.
//!
//! Every field has a default matching the published portfolio, so the page
//! works with no configuration at all. A `<script id="site-config"
//! type="application/json">` element may override any subset of fields.

use serde::Deserialize;

/// Tuning for the particle field animation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles created on every start.
	pub count: usize,
	/// Pairs closer than this (in canvas pixels) are joined by a line.
	pub link_distance: f64,
	/// Alpha lost per frame.
	pub fade_step: f64,
	/// Velocity components are drawn from `[-max_speed, max_speed)`.
	pub max_speed: f64,
	/// Smallest particle radius.
	pub size_min: f64,
	/// Largest particle radius (exclusive).
	pub size_max: f64,
	/// Lowest starting opacity.
	pub alpha_min: f64,
	/// Highest starting opacity (exclusive).
	pub alpha_max: f64,
	/// Upper bound of the per-particle colour alpha.
	pub color_alpha_max: f64,
	/// Stroke width of link lines.
	pub link_width: f64,
	/// Pause between stop and restart when the theme changes.
	pub restart_delay_ms: u32,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			count: 50,
			link_distance: 100.0,
			fade_step: 0.002,
			max_speed: 0.5,
			size_min: 1.0,
			size_max: 4.0,
			alpha_min: 0.2,
			alpha_max: 0.7,
			color_alpha_max: 0.5,
			link_width: 0.5,
			restart_delay_ms: 100,
		}
	}
}

/// Contact form relay settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
	/// Relay endpoint without the recipient, e.g. `https://formsubmit.co/ajax`.
	pub endpoint: String,
	/// Address the relay delivers to and the fallback mails.
	pub recipient: String,
	/// `_subject` sent to the relay.
	pub relay_subject: String,
	/// Subject of the mail-client fallback.
	pub mailto_subject: String,
}

impl ContactConfig {
	/// Relay URL for the configured recipient.
	pub fn post_url(&self) -> String {
		format!("{}/{}", self.endpoint.trim_end_matches('/'), self.recipient)
	}
}

impl Default for ContactConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://formsubmit.co/ajax".into(),
			recipient: "matheussantosxx6@gmail.com".into(),
			relay_subject: "Novo contato do portfólio".into(),
			mailto_subject: "Contato Portfólio".into(),
		}
	}
}

/// Everything the page enhancer can be told from the outside.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
	/// Particle animation tuning.
	pub field: FieldConfig,
	/// Contact form relay.
	pub contact: ContactConfig,
	/// Header text revealed by the typing animation.
	pub typed_text: TypedTextConfig,
}

/// Typing animation text and timing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypedTextConfig {
	/// Text to type out.
	pub text: String,
	/// Pause before the first character.
	pub start_delay_ms: u32,
	/// Pause between characters.
	pub char_interval_ms: u32,
	/// How long the caret stays after the last character.
	pub caret_linger_ms: u32,
}

impl Default for TypedTextConfig {
	fn default() -> Self {
		Self {
			text: "Estudante de Análise e Desenvolvimento de SISTEMAS & Cibersegurança".into(),
			start_delay_ms: 1000,
			char_interval_ms: 60,
			caret_linger_ms: 500,
		}
	}
}

impl SiteConfig {
	/// Parse overrides; absent fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
