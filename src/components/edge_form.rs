use leptos::prelude::*;

use crate::network::EdgeKind;

/// A link the user asked for.
#[derive(Clone, Debug)]
pub struct LinkRequest {
	pub source: String,
	pub target: String,
	pub kind: EdgeKind,
	pub label: Option<String>,
}

/// Source/target pickers for a new link. The target list never offers the
/// chosen source.
#[component]
pub fn EdgeForm(
	/// `(id, label)` of every node that can be linked.
	#[prop(into)]
	nodes: Signal<Vec<(String, String)>>,
	#[prop(into)] on_submit: Callback<LinkRequest>,
	#[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
	let (source, set_source) = signal(String::new());
	let (target, set_target) = signal(String::new());
	let (kind, set_kind) = signal(EdgeKind::Default);
	let (label, set_label) = signal(String::new());

	let submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let (source, target) = (source.get(), target.get());
		if source.is_empty() || target.is_empty() {
			return;
		}
		let label = label.get();
		on_submit.run(LinkRequest {
			source,
			target,
			kind: kind.get(),
			label: (!label.trim().is_empty()).then_some(label),
		});
	};

	let node_options = move |exclude: Option<String>| {
		nodes
			.get()
			.into_iter()
			.filter(|(id, _)| exclude.as_deref() != Some(id.as_str()))
			.map(|(id, label)| view! { <option value=id>{label}</option> })
			.collect_view()
	};
	let kind_options = EdgeKind::ALL
		.into_iter()
		.map(|k| view! { <option value=k.as_str()>{k.display_name()}</option> })
		.collect_view();

	view! {
		<div class="dialog-backdrop">
			<form class="dialog" on:submit=submit>
				<h3>"Create Link"</h3>
				<label for="link-source">"Source Node"</label>
				<select
					id="link-source"
					prop:value=move || source.get()
					on:change=move |ev| {
						let value = event_target_value(&ev);
						if target.get_untracked() == value {
							set_target.set(String::new());
						}
						set_source.set(value);
					}
				>
					<option value="" disabled=true>"Select source node"</option>
					{move || node_options(None)}
				</select>
				<label for="link-target">"Target Node"</label>
				<select
					id="link-target"
					prop:value=move || target.get()
					on:change=move |ev| set_target.set(event_target_value(&ev))
				>
					<option value="" disabled=true>"Select target node"</option>
					{move || node_options(Some(source.get()))}
				</select>
				<label for="link-kind">"Connection Type"</label>
				<select
					id="link-kind"
					prop:value=move || kind.get().as_str()
					on:change=move |ev| {
						if let Ok(k) = event_target_value(&ev).parse() {
							set_kind.set(k);
						}
					}
				>
					{kind_options}
				</select>
				<label for="link-label">"Label"</label>
				<input
					id="link-label"
					placeholder="Optional"
					prop:value=move || label.get()
					on:input=move |ev| set_label.set(event_target_value(&ev))
				/>
				<footer class="dialog-actions">
					<button type="button" on:click=move |_| on_cancel.run(())>"Cancel"</button>
					<button
						type="submit"
						class="primary"
						disabled=move || source.get().is_empty() || target.get().is_empty()
					>
						"Create Link"
					</button>
				</footer>
			</form>
		</div>
	}
}
