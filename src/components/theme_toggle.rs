//! Theme persistence and application.
//!
//! The chosen mode lives in `localStorage` under `tema` and is mirrored on
//! `<html data-tema="…">` so the stylesheet can switch variables.

use web_sys::Storage;

use super::particle_field::theme::ThemeMode;
use crate::dom;

/// `localStorage` key holding the chosen mode.
pub const STORAGE_KEY: &str = "tema";
/// Attribute on `<html>` the stylesheet keys off.
pub const THEME_ATTRIBUTE: &str = "data-tema";

fn storage() -> Option<Storage> {
	dom::window()?.local_storage().ok().flatten()
}

/// Saved theme, dark when nothing (or nothing valid) was saved.
pub fn load_theme() -> ThemeMode {
	let saved = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
	ThemeMode::from_stored(saved.as_deref())
}

/// Mark the document with `mode` so the stylesheet switches variables.
pub fn apply_theme(mode: ThemeMode) {
	if let Some(root) = dom::document().and_then(|d| d.document_element()) {
		if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, mode.as_str()) {
			log::warn!("folio-fx: cannot set {}: {:?}", THEME_ATTRIBUTE, e);
		}
	}
}

/// Remember `mode` for the next visit.
pub fn save_theme(mode: ThemeMode) {
	match storage() {
		Some(s) => {
			let _ = s.set_item(STORAGE_KEY, mode.as_str());
		}
		None => log::debug!("folio-fx: no localStorage, theme not persisted"),
	}
}

/// Only a change away from the previously applied mode is saved. The mode
/// applied on page load came from storage (or the default) and is not written back.
pub fn should_save(previous: Option<ThemeMode>, current: ThemeMode) -> bool {
	previous.is_some_and(|p| p != current)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn initial_apply_is_not_saved() {
		assert!(!should_save(None, ThemeMode::Dark));
		assert!(!should_save(None, ThemeMode::Light));
	}

	#[test]
	fn toggles_are_saved() {
		assert!(should_save(Some(ThemeMode::Dark), ThemeMode::Light));
		assert!(should_save(Some(ThemeMode::Light), ThemeMode::Dark));
		assert!(!should_save(Some(ThemeMode::Light), ThemeMode::Light));
	}
}
