use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#f8fafc";
const LABEL_COLOR: &str = "30, 41, 59";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, arrow_size) = (5.0 / k.max(0.5), 6.0 / k.max(0.5));
	let t = ease_out_cubic(state.hover.highlight_t);
	let highlighting = state.has_active_highlight();

	state.graph.visit_edges(|n1, n2, edge| {
		let info = &edge.user_data;
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		if dist < r1 + r2 + 0.001 {
			return;
		}

		// Highlighted edges brighten towards full opacity, the rest fade.
		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		let alpha = match (highlighting, is_highlighted) {
			(false, _) => info.opacity,
			(true, true) => info.opacity + (0.9 - info.opacity) * t,
			(true, false) => info.opacity * (1.0 - 0.6 * t),
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&info.color);
		ctx.set_line_width(info.width);
		if info.dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(dash),
			));
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&info.color);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(&format!("rgba({LABEL_COLOR}, {})", alpha.max(0.6)));
			ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
		}
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let highlighted = has_highlight && state.is_highlighted(idx);
		let hovered = has_highlight && state.is_hovered(idx);

		let (alpha, radius) = if !has_highlight {
			(info.opacity, info.radius)
		} else if hovered {
			(1.0, info.radius * (1.0 + 0.2 * t))
		} else if highlighted {
			(1.0, info.radius * (1.0 + 0.1 * t))
		} else {
			(info.opacity * (1.0 - 0.6 * t), info.radius)
		};

		if hovered && t > 0.01 {
			let glow = radius * (1.3 + 0.5 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, glow) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(99, 102, 241, {})", 0.35 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(99, 102, 241, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		let border = if state.is_selected(idx) {
			Some(("#0f172a", 3.0))
		} else if info.central {
			Some(("rgba(255, 255, 255, 0.6)", 2.0))
		} else {
			None
		};
		if let Some((color, width)) = border {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(width / k);
			ctx.stroke();
		}

		// Hubs and hovered nodes always show their label; satellites only
		// once zoomed in.
		if info.central || hovered || k >= 1.2 {
			let size = if info.central { 13.0 } else { 10.0 };
			ctx.set_fill_style_str(&format!("rgba({LABEL_COLOR}, {})", alpha.max(0.5)));
			ctx.set_font(&format!("{}px sans-serif", size / k.max(0.5)));
			let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
		}
	});
}
