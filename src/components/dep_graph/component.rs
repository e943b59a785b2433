//! Leptos component hosting the dependency graph canvas.
//!
//! Owns the animation loop and the pointer wiring: each frame advances the
//! simulation one step and hands the resulting positions to the renderer;
//! mouse events feed the interaction controller. The loop stops when the
//! component is torn down.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::adapter::RenderAdapter;
use super::graph::DependencyGraph;
use super::interaction::InteractionController;
use super::render::CanvasRenderer;
use super::simulation::Simulation;

/// World-space radius used for node hit testing. A little larger than the
/// drawn radius so nodes are easy to grab.
const HIT_RADIUS: f64 = 12.0;

/// Live state shared between the animation loop and the event handlers.
struct GraphContext {
	sim: Simulation,
	controller: InteractionController,
	renderer: CanvasRenderer,
	width: f64,
	height: f64,
}

impl GraphContext {
	/// Convert canvas-local pointer coordinates into world space.
	fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.width / 2.0, sy - self.height / 2.0)
	}

	fn hovered_cursor(&self, sx: f64, sy: f64) -> &'static str {
		let (wx, wy) = self.to_world(sx, sy);
		let clickable = self
			.sim
			.node_at(wx, wy, HIT_RADIUS)
			.and_then(|i| self.sim.graph().nodes()[i].detail_url.as_deref())
			.is_some();
		if clickable { "pointer" } else { "grab" }
	}
}

/// Renders an interactive dependency graph on a canvas element.
///
/// The signal carries a validated [`DependencyGraph`]; every change discards
/// the running simulation and starts a fresh one. The component sizes itself
/// to its parent container unless explicit `width`/`height` are given.
#[component]
pub fn DepGraphCanvas(
	/// Graph to lay out.
	#[prop(into)]
	graph: Signal<DependencyGraph>,
	/// Invoked with the detail path of a clicked node.
	#[prop(into)]
	on_navigate: Callback<String>,
	/// Explicit canvas width, overriding parent-based sizing.
	#[prop(default = None)]
	width: Option<f64>,
	/// Explicit canvas height, overriding parent-based sizing.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running = Arc::new(AtomicBool::new(true));
	let (context_init, animate_init, running_init) =
		(context.clone(), animate.clone(), running.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		// Wholesale rebuild: a new graph gets a fresh simulation, nothing
		// carries over from the previous one.
		*context_init.borrow_mut() = Some(GraphContext {
			sim: Simulation::new(graph.get()),
			controller: InteractionController::default(),
			renderer: CanvasRenderer::new(ctx, w, h),
			width: w,
			height: h,
		});

		if animate_init.borrow().is_some() {
			return;
		}
		let (context_anim, animate_inner, running_anim) = (
			context_init.clone(),
			animate_init.clone(),
			running_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.sim.step();
				let frame = c.sim.frame();
				c.renderer.render_frame(&frame);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let running_cleanup = running.clone();
	on_cleanup(move || running_cleanup.store(false, Ordering::Relaxed));

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let (wx, wy) = c.to_world(x, y);
			if let Some(idx) = c.sim.node_at(wx, wy, HIT_RADIUS) {
				c.controller.drag_start(&mut c.sim, idx);
				let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", "grabbing");
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.controller.dragging() {
				let (wx, wy) = c.to_world(x, y);
				c.controller.drag_move(&mut c.sim, wx, wy);
			} else {
				let _ = web_sys::HtmlElement::style(&canvas)
					.set_property("cursor", c.hovered_cursor(x, y));
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if let Some(idx) = c.controller.drag_end(&mut c.sim) {
				if let Some(url) = c.controller.click(&c.sim, idx) {
					on_navigate.run(url.to_string());
				}
			}
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", "grab");
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			// Leaving the canvas cancels the gesture; never navigate here.
			let _ = c.controller.drag_end(&mut c.sim);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="dep-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
