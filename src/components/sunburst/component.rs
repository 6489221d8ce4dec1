//! Leptos component wrapping the sunburst canvas.
//!
//! The component creates an HTML canvas element and wires up click and hover
//! handlers. An animation loop runs via `requestAnimationFrame`, advancing the
//! zoom transition with the page clock and redrawing only when the view
//! changed.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::scale::SunburstConfig;
use super::state::SunburstState;
use super::theme::Theme;
use super::types::SunburstNode;

/// Bundles sunburst state with its theme.
struct SunburstContext {
	state: SunburstState,
	theme: Theme,
}

/// Milliseconds from the page's high resolution clock.
fn now() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

fn viewport(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dimension(window.inner_width(), 800.0),
		dimension(window.inner_height(), 600.0),
	)
}

fn event_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders a zoomable sunburst on a canvas element.
///
/// Pass the hierarchy via the reactive `data` signal. Clicking a slice zooms
/// into it; clicking outside every slice zooms back out to the root. The
/// component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
#[component]
pub fn SunburstCanvas(
	#[prop(into)] data: Signal<SunburstNode>,
	#[prop(default = SunburstConfig::default())] config: SunburstConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = Theme::default())] theme: Theme,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<SunburstContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport(&window)
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("imp-sunburst: canvas 2d context unavailable");
				return;
			}
		};

		let state = match SunburstState::new(&data.get(), w, h, config.clone(), &theme) {
			Ok(state) => state,
			Err(e) => {
				error!("imp-sunburst: {}", e);
				return;
			}
		};
		*context_init.borrow_mut() = Some(SunburstContext {
			state,
			theme: theme.clone(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.tick(now()) {
					render::render(&c.state, &ctx, &c.theme);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = event_position(&canvas, &ev);

		if let Some(ref mut c) = *context_click.borrow_mut() {
			// Empty space resets to the root.
			let target = c.state.node_at_position(x, y);
			if let Err(e) = c.state.focus_on(target, now()) {
				warn!("imp-sunburst: {}", e);
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = event_position(&canvas, &ev);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let hovered = c.state.node_at_position(x, y);
			if c.state.set_hover(hovered) {
				c.state.dirty = true;
				canvas.set_title(&c.state.tooltip().unwrap_or_default());
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			if c.state.set_hover(None) {
				c.state.dirty = true;
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="sunburst-canvas"
			on:click=on_click
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}
