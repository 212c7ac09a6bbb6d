//! Particle field animator state and lifecycle.
//!
//! [`ParticleField`] is a plain state machine. The host supplies a
//! [`Surface`] to draw on and a [`FrameScheduler`] to be called back by, and
//! forwards frame, resize, theme and restart events into it. Nothing here
//! touches the DOM directly, so the same code runs under `cargo test`.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::particles::Particle;
use super::render;
use super::scheduler::{FrameHandle, FrameScheduler};
use super::surface::Surface;
use super::theme::{Palette, ThemeMode};
use crate::config::FieldConfig;

/// Ties a delayed restart to the theme change that asked for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestartToken(u64);

/// Animated background of drifting, linked particles.
pub struct ParticleField {
	config: FieldConfig,
	theme: ThemeMode,
	palette: Palette,
	particles: Vec<Particle>,
	/// The frame loop is live.
	running: bool,
	/// The user wants the field shown.
	enabled: bool,
	pending_frame: Option<FrameHandle>,
	/// A theme change stopped the loop and is waiting for `on_restart` with this token.
	restart: Option<RestartToken>,
	restarts_issued: u64,
	/// Last viewport size reported by the host.
	viewport: Option<(f64, f64)>,
	rng: StdRng,
}

impl ParticleField {
	/// Stopped field seeded from system entropy.
	pub fn new(config: FieldConfig, theme: ThemeMode) -> Self {
		Self::with_rng(config, theme, StdRng::from_entropy())
	}

	/// Deterministic construction for tests and replays.
	pub fn with_rng(config: FieldConfig, theme: ThemeMode, rng: StdRng) -> Self {
		Self {
			particles: Vec::with_capacity(config.count),
			config,
			theme,
			palette: theme.palette(),
			running: false,
			enabled: false,
			pending_frame: None,
			restart: None,
			restarts_issued: 0,
			viewport: None,
			rng,
		}
	}

	/// Current particles, empty before the first start.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// The frame loop is live.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// The user wants the field shown.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Theme the next start will use.
	pub fn theme(&self) -> ThemeMode {
		self.theme
	}

	/// Frame request not yet delivered, if any.
	pub fn pending_frame(&self) -> Option<FrameHandle> {
		self.pending_frame
	}

	/// A theme change is waiting for its delayed restart.
	pub fn restart_pending(&self) -> bool {
		self.restart.is_some()
	}

	/// Delay the host must wait before calling [`Self::on_restart`].
	pub fn restart_delay_ms(&self) -> u32 {
		self.config.restart_delay_ms
	}

	/// Size the surface, light it up, seed fresh particles and draw the first frame.
	///
	/// A no-op while already running, so there is never a second loop.
	pub fn start<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		if self.running {
			return;
		}
		let (w, h) = self
			.viewport
			.unwrap_or_else(|| (surface.width(), surface.height()));
		surface.resize(w, h);
		surface.set_active(true);
		// Any restart still in flight is superseded by this start.
		self.restart = None;

		let Self {
			particles,
			rng,
			palette,
			config,
			..
		} = self;
		particles.clear();
		particles.extend((0..config.count).map(|_| Particle::spawn(rng, palette, config, w, h)));

		self.running = true;
		log::debug!(
			"folio-fx: particle field started ({} particles, {}x{}, {})",
			self.particles.len(),
			w,
			h,
			self.theme.as_str()
		);
		self.on_frame(surface, scheduler);
	}

	/// Remove the active styling and cancel the pending frame.
	///
	/// Safe to call any number of times. Particles are kept but no longer drawn.
	pub fn stop<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		surface.set_active(false);
		if let Some(handle) = self.pending_frame.take() {
			scheduler.cancel_frame(handle);
		}
		if self.running {
			log::debug!("folio-fx: particle field stopped");
		}
		self.running = false;
	}

	/// One display refresh: backdrop, update and draw particles, links, reschedule.
	pub fn on_frame<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		// The callback that brought us here is spent either way.
		self.pending_frame = None;
		if !self.running {
			return;
		}

		let (w, h) = (surface.width(), surface.height());
		render::draw_backdrop(surface, &self.palette);

		let Self {
			particles,
			rng,
			palette,
			config,
			..
		} = self;
		for p in particles.iter_mut() {
			p.step(rng, palette, config, w, h);
			render::draw_particle(surface, p);
		}
		render::draw_links(
			surface,
			particles,
			palette,
			config.link_distance,
			config.link_width,
		);

		self.pending_frame = scheduler.request_frame();
	}

	/// Track the viewport; resize the live surface and keep particles inside it.
	pub fn on_resize<S>(&mut self, width: f64, height: f64, surface: &mut S)
	where
		S: Surface + ?Sized,
	{
		self.viewport = Some((width, height));
		if !self.running {
			return;
		}
		surface.resize(width, height);
		for p in &mut self.particles {
			p.confine(width, height);
		}
	}

	/// User visibility toggle.
	pub fn set_enabled<S, F>(&mut self, enabled: bool, surface: &mut S, scheduler: &mut F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		self.enabled = enabled;
		if enabled {
			self.start(surface, scheduler);
		} else {
			self.restart = None;
			self.stop(surface, scheduler);
		}
	}

	/// Switch palettes. Live particles keep their colour; instead a running
	/// field is stopped and must be restarted after [`Self::restart_delay_ms`].
	///
	/// Returns the token the host must hand back to [`Self::on_restart`]
	/// once the delay has passed, or `None` when no restart is needed.
	/// A newer token invalidates every older one.
	pub fn on_theme_change<S, F>(
		&mut self,
		theme: ThemeMode,
		surface: &mut S,
		scheduler: &mut F,
	) -> Option<RestartToken>
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		if theme == self.theme {
			return None;
		}
		self.theme = theme;
		self.palette = theme.palette();
		if !self.running {
			return None;
		}
		self.stop(surface, scheduler);
		self.restarts_issued += 1;
		let token = RestartToken(self.restarts_issued);
		self.restart = Some(token);
		Some(token)
	}

	/// Delayed half of a theme change. Ignored if the user switched the field
	/// off in the meantime, or if `token` belongs to an older theme change.
	pub fn on_restart<S, F>(&mut self, token: RestartToken, surface: &mut S, scheduler: &mut F)
	where
		S: Surface + ?Sized,
		F: FrameScheduler + ?Sized,
	{
		if self.restart != Some(token) {
			log::debug!("folio-fx: dropping stale restart {:?}", token);
			return;
		}
		self.restart = None;
		if self.enabled {
			log::debug!("folio-fx: restarting particle field for {}", self.theme.as_str());
			self.start(surface, scheduler);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::testing::{ManualScheduler, Op, RecordingSurface};

	fn field(theme: ThemeMode) -> ParticleField {
		ParticleField::with_rng(FieldConfig::default(), theme, StdRng::seed_from_u64(42))
	}

	/// Fire `n` pending frames, as the browser would on repaint.
	fn pump(field: &mut ParticleField, surface: &mut RecordingSurface, sched: &mut ManualScheduler, n: usize) {
		for _ in 0..n {
			assert!(sched.fire().is_some(), "no frame pending");
			field.on_frame(surface, sched);
			assert_eq!(field.particles().len(), 50);
		}
	}

	#[test]
	fn start_seeds_fifty_and_schedules_one_frame() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		assert!(f.is_running());
		assert!(surface.active);
		assert_eq!(f.particles().len(), 50);
		assert_eq!(surface.circles().count(), 50);
		assert_eq!(sched.requested, 1);
		assert_eq!(f.pending_frame(), sched.pending);
	}

	#[test]
	fn start_twice_keeps_single_loop() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		f.start(&mut surface, &mut sched);
		assert_eq!(sched.requested, 1);
	}

	#[test]
	fn stop_is_idempotent() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		f.stop(&mut surface, &mut sched);
		let particles = f.particles().to_vec();
		f.stop(&mut surface, &mut sched);
		assert!(!f.is_running());
		assert!(!surface.active);
		assert_eq!(f.pending_frame(), None);
		assert_eq!(sched.pending, None);
		assert_eq!(sched.cancelled.len(), 1);
		assert_eq!(f.particles(), particles.as_slice());
	}

	#[test]
	fn stop_before_start_is_harmless() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.stop(&mut surface, &mut sched);
		assert!(!f.is_running());
		assert!(sched.cancelled.is_empty());
	}

	#[test]
	fn start_stop_start_rebuilds_fifty() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		f.stop(&mut surface, &mut sched);
		f.start(&mut surface, &mut sched);
		assert_eq!(f.particles().len(), 50);
		assert!(sched.pending.is_some());
	}

	#[test]
	fn stale_frame_after_stop_draws_nothing() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		f.stop(&mut surface, &mut sched);
		surface.ops.clear();
		f.on_frame(&mut surface, &mut sched);
		assert!(surface.ops.is_empty());
		assert_eq!(sched.pending, None);
	}

	#[test]
	fn toggle_on_five_frames_toggle_off() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(1.0, 1.0);
		let mut sched = ManualScheduler::default();
		f.on_resize(800.0, 600.0, &mut surface);
		f.set_enabled(true, &mut surface, &mut sched);
		assert_eq!((surface.width, surface.height), (800.0, 600.0));
		pump(&mut f, &mut surface, &mut sched, 5);
		f.set_enabled(false, &mut surface, &mut sched);

		assert_eq!(f.particles().len(), 50);
		assert_eq!(sched.pending, None);
		assert_eq!(f.pending_frame(), None);
		assert!(!surface.active);
		assert_eq!(sched.requested, 6);
	}

	#[test]
	fn frame_draws_backdrop_first_then_particles() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		assert_eq!(surface.ops[0], Op::Clear);
		assert!(matches!(surface.ops[1], Op::Rect(_)));
		assert!(matches!(surface.ops[2], Op::Circle { .. }));
	}

	#[test]
	fn theme_change_while_running_restarts_with_new_palette() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.set_enabled(true, &mut surface, &mut sched);
		pump(&mut f, &mut surface, &mut sched, 2);

		let token = f
			.on_theme_change(ThemeMode::Light, &mut surface, &mut sched)
			.expect("running field asks for a restart");
		assert!(f.restart_pending());
		assert_eq!(f.restart_delay_ms(), 100);
		assert!(!f.is_running());
		assert!(!surface.active);
		assert_eq!(sched.pending, None);
		// Stopped particles keep the old hue until the restart.
		assert!(f.particles()[0].color.same_rgb(Palette::escuro().particle));

		surface.ops.clear();
		f.on_restart(token, &mut surface, &mut sched);
		assert!(f.is_running());
		assert!(!f.restart_pending());
		assert!(surface.active);
		let light = Palette::claro();
		assert!(f.particles().iter().all(|p| p.color.same_rgb(light.particle)));
		for op in surface.circles() {
			if let Op::Circle { color, .. } = op {
				assert!(color.same_rgb(light.particle));
			}
		}
		assert!(matches!(
			&surface.ops[1],
			Op::Rect(fill) if *fill == render::backdrop_fill(800.0, 600.0, &light)
		));
	}

	#[test]
	fn theme_change_while_stopped_needs_no_restart() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		assert_eq!(f.on_theme_change(ThemeMode::Light, &mut surface, &mut sched), None);
		assert!(!f.restart_pending());
		assert_eq!(f.theme(), ThemeMode::Light);
		f.set_enabled(true, &mut surface, &mut sched);
		assert!(f.particles().iter().all(|p| p.color.same_rgb(Palette::claro().particle)));
	}

	#[test]
	fn switching_off_during_restart_delay_wins() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.set_enabled(true, &mut surface, &mut sched);
		let token = f
			.on_theme_change(ThemeMode::Light, &mut surface, &mut sched)
			.expect("restart requested");
		f.set_enabled(false, &mut surface, &mut sched);
		assert!(!f.restart_pending());
		f.on_restart(token, &mut surface, &mut sched);
		assert!(!f.is_running());
		assert_eq!(sched.pending, None);
	}

	#[test]
	fn older_restart_cannot_cut_a_newer_delay_short() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.set_enabled(true, &mut surface, &mut sched);
		let first = f
			.on_theme_change(ThemeMode::Light, &mut surface, &mut sched)
			.expect("first restart");
		f.set_enabled(false, &mut surface, &mut sched);
		f.set_enabled(true, &mut surface, &mut sched);
		let second = f
			.on_theme_change(ThemeMode::Dark, &mut surface, &mut sched)
			.expect("second restart");
		assert_ne!(first, second);

		// The first timer fires while the second delay is still running.
		f.on_restart(first, &mut surface, &mut sched);
		assert!(!f.is_running());
		assert!(f.restart_pending());
		assert_eq!(sched.pending, None);

		f.on_restart(second, &mut surface, &mut sched);
		assert!(f.is_running());
		assert!(f.particles().iter().all(|p| p.color.same_rgb(Palette::escuro().particle)));
	}

	#[test]
	fn enabling_during_delay_supersedes_the_restart() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.set_enabled(true, &mut surface, &mut sched);
		let token = f
			.on_theme_change(ThemeMode::Light, &mut surface, &mut sched)
			.expect("restart requested");
		f.start(&mut surface, &mut sched);
		assert!(!f.restart_pending());
		let requested = sched.requested;
		f.on_restart(token, &mut surface, &mut sched);
		assert_eq!(sched.requested, requested);
	}

	#[test]
	fn resize_while_running_confines_particles() {
		let mut f = field(ThemeMode::Dark);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		f.on_resize(200.0, 100.0, &mut surface);
		assert_eq!((surface.width, surface.height), (200.0, 100.0));
		for p in f.particles() {
			assert!(p.x <= 200.0 && p.y <= 100.0);
		}
		pump(&mut f, &mut surface, &mut sched, 3);
	}

	#[test]
	fn long_run_keeps_invariants() {
		let mut f = field(ThemeMode::Light);
		let mut surface = RecordingSurface::new(800.0, 600.0);
		let mut sched = ManualScheduler::default();
		f.start(&mut surface, &mut sched);
		for _ in 0..2_000 {
			surface.ops.clear();
			pump(&mut f, &mut surface, &mut sched, 1);
			for p in f.particles() {
				assert!((0.0..=0.7).contains(&p.alpha));
				assert!((0.0..=800.0).contains(&p.x));
				assert!((0.0..=600.0).contains(&p.y));
			}
		}
	}
}
