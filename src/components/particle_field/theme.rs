//! Colour theming for the particle field.
//!
//! The page has two modes, dark ("escuro") and light ("claro"). Each mode maps
//! to a [`Palette`] holding the particle hue, the backdrop gradient stops and
//! the link stroke.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with alpha in `[0, 1]`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Same hue, compared without alpha.
	pub fn same_rgb(self, other: Color) -> bool {
		self.r == other.r && self.g == other.g && self.b == other.b
	}

	/// Hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Light or dark page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	#[default]
	Dark,
	Light,
}

impl ThemeMode {
	/// Value stored under the `tema` key and written to `data-tema`.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Dark => "escuro",
			ThemeMode::Light => "claro",
		}
	}

	/// Anything other than an explicit `"claro"` means dark.
	pub fn from_stored(value: Option<&str>) -> Self {
		match value {
			Some("claro") => ThemeMode::Light,
			_ => ThemeMode::Dark,
		}
	}

	/// The other mode.
	pub fn toggle(self) -> Self {
		match self {
			ThemeMode::Dark => ThemeMode::Light,
			ThemeMode::Light => ThemeMode::Dark,
		}
	}

	/// Font Awesome class for the toggle button icon.
	pub fn icon_class(self) -> &'static str {
		match self {
			ThemeMode::Dark => "fas fa-moon",
			ThemeMode::Light => "fas fa-sun",
		}
	}

	/// Colours the particle field uses in this mode.
	pub fn palette(self) -> Palette {
		match self {
			ThemeMode::Dark => Palette::escuro(),
			ThemeMode::Light => Palette::claro(),
		}
	}
}

/// Colours used by one frame of the particle field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	/// Particle hue; alpha is randomised per particle.
	pub particle: Color,
	/// Backdrop gradient colour at the viewport centre.
	pub backdrop_near: Color,
	/// Backdrop gradient colour at the edge.
	pub backdrop_far: Color,
	/// Stroke for lines between nearby particles.
	pub link: Color,
}

impl Palette {
	/// Teal on deep navy.
	pub const fn escuro() -> Self {
		Self {
			particle: Color::rgb(15, 204, 206),
			backdrop_near: Color::rgba(26, 26, 46, 0.1),
			backdrop_far: Color::rgba(15, 204, 206, 0.05),
			link: Color::rgba(15, 204, 206, 0.1),
		}
	}

	/// Royal blue on pale grey.
	pub const fn claro() -> Self {
		Self {
			particle: Color::rgb(37, 99, 235),
			backdrop_near: Color::rgba(240, 242, 245, 0.1),
			backdrop_far: Color::rgba(37, 99, 235, 0.05),
			link: Color::rgba(37, 99, 235, 0.1),
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::escuro()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stored_value_defaults_to_dark() {
		assert_eq!(ThemeMode::from_stored(None), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_stored(Some("escuro")), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_stored(Some("light")), ThemeMode::Dark);
		assert_eq!(ThemeMode::from_stored(Some("claro")), ThemeMode::Light);
	}

	#[test]
	fn stored_value_round_trips() {
		for mode in [ThemeMode::Dark, ThemeMode::Light] {
			assert_eq!(ThemeMode::from_stored(Some(mode.as_str())), mode);
		}
	}

	#[test]
	fn toggle_flips_icon() {
		let mode = ThemeMode::Dark;
		assert_eq!(mode.icon_class(), "fas fa-moon");
		assert_eq!(mode.toggle().icon_class(), "fas fa-sun");
		assert_eq!(mode.toggle().toggle(), mode);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(15, 204, 206).to_css(), "#0fccce");
		assert_eq!(
			Palette::claro().link.to_css(),
			"rgba(37, 99, 235, 0.1)"
		);
	}
}
