use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{DragState, ForceGraphState};
use crate::network::{Position, VisibleSubgraph};

type Shared<T> = Rc<RefCell<Option<T>>>;

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive canvas for the visible subgraph.
///
/// Dragging a node reports its new position through `on_node_moved`.
/// Clicking selects a node (or clears the selection on the background).
/// While `physics` is on the view relaxes under a spring simulation; when
/// it is switched off the relaxed positions go to `on_settled`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] view: Signal<VisibleSubgraph>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] physics: Signal<bool>,
	#[prop(into)] on_select: Callback<Option<String>>,
	#[prop(into)] on_node_moved: Callback<(String, Position)>,
	#[prop(into)] on_settled: Callback<Vec<(String, Position)>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.unchecked_into(),
			_ => {
				warn!("2d canvas context unavailable");
				return;
			}
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&view.get_untracked(), w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Reload whenever the visible subgraph changes.
	let state_view = state.clone();
	Effect::new(move |_| {
		let view = view.get();
		if let Some(ref mut s) = *state_view.borrow_mut() {
			s.load(&view);
		}
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let selected = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.selected = selected;
		}
	});

	let state_phys = state.clone();
	Effect::new(move |_| {
		let on = physics.get();
		let settled = match *state_phys.borrow_mut() {
			Some(ref mut s) if s.physics != on => {
				s.physics = on;
				(!on).then(|| s.positions())
			}
			_ => None,
		};
		// Run outside the borrow: the callback may reload the view.
		if let Some(positions) = settled {
			on_settled.run(positions);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				let start = s.node_position(idx).unwrap_or_default();
				s.drag = DragState {
					active: true,
					moved: false,
					node_idx: Some(idx),
					start_x: x,
					start_y: y,
					node_start_x: start.x as f32,
					node_start_y: start.y as f32,
				};
			} else {
				s.pan.active = true;
				s.pan.moved = false;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					if dx.abs() + dy.abs() > 1.0 {
						s.drag.moved = true;
					}
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				if (x - s.pan.start_x).abs() + (y - s.pan.start_y).abs() > 2.0 {
					s.pan.moved = true;
				}
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let outcome = match *state_mu.borrow_mut() {
			Some(ref mut s) => {
				let drag = std::mem::take(&mut s.drag);
				let panned = s.pan.active && s.pan.moved;
				s.pan.active = false;
				match drag.node_idx {
					Some(idx) if drag.moved => s
						.node_id(idx)
						.zip(s.node_position(idx))
						.map(|(id, p)| MouseUp::Moved(id.to_string(), p)),
					Some(idx) => s.node_id(idx).map(|id| MouseUp::Clicked(Some(id.to_string()))),
					None if panned => None,
					None => Some(MouseUp::Clicked(None)),
				}
			}
			None => None,
		};
		match outcome {
			Some(MouseUp::Moved(id, position)) => on_node_moved.run((id, position)),
			Some(MouseUp::Clicked(id)) => on_select.run(id),
			None => {}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag = DragState::default();
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	let state_fit = state.clone();
	let on_fit = move |_| {
		if let Some(ref mut s) = *state_fit.borrow_mut() {
			s.fit_view();
		}
	};

	view! {
		<div class="graph-canvas-wrapper">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<button class="fit-view" title="Fit view" on:click=on_fit>"Fit"</button>
		</div>
	}
}

enum MouseUp {
	Moved(String, Position),
	Clicked(Option<String>),
}
