use leptos::prelude::*;

use crate::network::LayoutKind;
use crate::network::config::{SPACING_RANGE, SPACING_STEP};

/// Layout picker with a spacing slider.
#[component]
pub fn LayoutControls(
	initial_spacing: f64,
	#[prop(into)] on_apply: Callback<(LayoutKind, f64)>,
	physics: RwSignal<bool>,
) -> impl IntoView {
	let (kind, set_kind) = signal(LayoutKind::default());
	let (spacing, set_spacing) = signal(initial_spacing.clamp(SPACING_RANGE.0, SPACING_RANGE.1));

	let options = LayoutKind::ALL
		.into_iter()
		.map(|k| view! { <option value=k.as_str()>{k.display_name()}</option> })
		.collect_view();

	view! {
		<section class="panel layout-controls">
			<h3>"Layout Controls"</h3>
			<label for="layout-type">"Layout Type"</label>
			<select
				id="layout-type"
				prop:value=move || kind.get().as_str()
				on:change=move |ev| {
					if let Ok(k) = event_target_value(&ev).parse() {
						set_kind.set(k);
					}
				}
			>
				{options}
			</select>

			<div class="slider-label">
				<label for="spacing">"Node Spacing"</label>
				<span class="muted">{move || spacing.get()}</span>
			</div>
			<input
				id="spacing"
				type="range"
				min=SPACING_RANGE.0
				max=SPACING_RANGE.1
				step=SPACING_STEP
				prop:value=move || spacing.get().to_string()
				on:input=move |ev| {
					if let Ok(v) = event_target_value(&ev).parse::<f64>() {
						set_spacing.set(v);
					}
				}
			/>

			<button class="primary" on:click=move |_| on_apply.run((kind.get(), spacing.get()))>
				"Apply Layout"
			</button>
			<label class="toggle">
				<input
					type="checkbox"
					prop:checked=move || physics.get()
					on:change=move |ev| physics.set(event_target_checked(&ev))
				/>
				"Live physics"
			</label>
		</section>
	}
}
