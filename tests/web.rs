//! Browser smoke tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use folio_fx::components::particle_field::ThemeMode;
use folio_fx::components::theme_toggle::{
	STORAGE_KEY, THEME_ATTRIBUTE, apply_theme, load_theme, save_theme,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn storage() -> web_sys::Storage {
	web_sys::window()
		.and_then(|w| w.local_storage().ok().flatten())
		.expect("localStorage available")
}

#[wasm_bindgen_test]
fn applying_marks_the_page_without_saving() {
	storage().remove_item(STORAGE_KEY).unwrap();
	apply_theme(ThemeMode::Light);

	let root = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.unwrap();
	assert_eq!(root.get_attribute(THEME_ATTRIBUTE).as_deref(), Some("claro"));
	assert_eq!(storage().get_item(STORAGE_KEY).unwrap(), None);
	assert_eq!(load_theme(), ThemeMode::Dark);
}

#[wasm_bindgen_test]
fn saved_theme_is_remembered() {
	save_theme(ThemeMode::Light);
	assert_eq!(storage().get_item(STORAGE_KEY).unwrap().as_deref(), Some("claro"));
	assert_eq!(load_theme(), ThemeMode::Light);

	save_theme(ThemeMode::Dark);
	assert_eq!(load_theme(), ThemeMode::Dark);
}

#[wasm_bindgen_test]
fn unknown_saved_value_means_dark() {
	storage().set_item(STORAGE_KEY, "sepia").unwrap();
	assert_eq!(load_theme(), ThemeMode::Dark);
	storage().remove_item(STORAGE_KEY).unwrap();
	assert_eq!(load_theme(), ThemeMode::Dark);
}
