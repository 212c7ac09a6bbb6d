//! Animated particle background.
//!
//! Draws a field of small, slowly fading particles on a full-viewport canvas
//! and joins every pair closer than a fixed distance with a faint line.
//! The animation itself is host-agnostic:
//! - [`ParticleField`] holds particles and the start/stop lifecycle
//! - [`Surface`] is what it draws on ([`CanvasSurface`] in the browser)
//! - [`FrameScheduler`] is what calls it back ([`RafScheduler`] in the browser)
//!
//! # Example
//!
//! ```ignore
//! use folio_fx::components::particle_field::{ParticleCanvas, ThemeMode};
//!
//! let on = RwSignal::new(true);
//! let theme = RwSignal::new(ThemeMode::Dark);
//! view! { <ParticleCanvas enabled=on theme=theme /> }
//! ```

mod component;
pub mod particles;
mod render;
pub mod scheduler;
mod state;
pub mod surface;
#[cfg(test)]
pub(crate) mod testing;
pub mod theme;

pub use component::{FieldController, ParticleCanvas};
pub use scheduler::{FrameScheduler, RafScheduler};
pub use state::{ParticleField, RestartToken};
pub use surface::{CanvasSurface, Surface};
pub use theme::{Palette, ThemeMode};
