//! Page enhancers, one module per feature.

pub mod contact_form;
pub mod controls;
pub mod mouse_trail;
pub mod navigation;
pub mod particle_field;
pub mod scroll_effects;
pub mod theme_toggle;
pub mod typed_text;
