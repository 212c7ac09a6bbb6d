//! Floating buttons for the theme, particle field and mouse trail.

use leptos::prelude::*;

use super::particle_field::theme::ThemeMode;

/// Floating toggle buttons; each flips one of the given signals.
#[component]
pub fn EffectControls(
	theme: RwSignal<ThemeMode>,
	particles_on: RwSignal<bool>,
	trail_on: RwSignal<bool>,
) -> impl IntoView {
	view! {
		<div class="controles-efeitos">
			<button
				id="toggleTema"
				class="btn-controle"
				title="Alternar tema"
				on:click=move |_| theme.update(|t| *t = t.toggle())
			>
				<i class=move || theme.get().icon_class()></i>
			</button>
			<button
				id="toggleParticulas"
				class="btn-controle"
				class:ativo=move || particles_on.get()
				title="Partículas"
				on:click=move |_| particles_on.update(|on| *on = !*on)
			>
				<i class="fas fa-star"></i>
			</button>
			<button
				id="toggleMouse"
				class="btn-controle"
				class:ativo=move || trail_on.get()
				title="Rastro do mouse"
				on:click=move |_| trail_on.update(|on| *on = !*on)
			>
				<i class="fas fa-mouse-pointer"></i>
			</button>
		</div>
	}
}
