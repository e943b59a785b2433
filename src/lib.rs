//! audit-graph: interactive dependency graph for assessment dashboards.
//!
//! Fetches `{name, dependencies[]}` records from a JSON endpoint, builds a
//! node/edge graph, lays it out with a force simulation, and renders it on
//! a canvas with drag-to-pin and click-to-navigate interaction.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, debug, error, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::dep_graph::{
	DataShapeError, DepGraphCanvas, DependencyGraph, DependencyRecord, FetchError,
};

use components::dep_graph::{FetchGeneration, fetch_records};

/// Fallback records endpoint when the host page does not provide one.
const DEFAULT_ENDPOINT: &str = "/data/dependencies.json";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("audit-graph: logging initialized");
}

/// Read the records endpoint from a script element with
/// id="dep-graph-endpoint", if the host page embeds one.
fn endpoint_from_dom() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("dep-graph-endpoint")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let url = script.text().ok()?;
	let url = url.trim().to_string();
	(!url.is_empty()).then_some(url)
}

/// What the graph page is currently showing.
#[derive(Clone)]
enum ViewState {
	Loading,
	Ready(DependencyGraph),
	Error(String),
}

/// Main application component.
/// Fetches the dependency records, builds the graph, and renders the
/// force-directed visualization, with an error state and manual retry.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let endpoint = endpoint_from_dom().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
	let state = RwSignal::new(ViewState::Loading);
	let generation = Arc::new(FetchGeneration::default());

	let load = {
		let endpoint = endpoint.clone();
		move || {
			let endpoint = endpoint.clone();
			let generation = generation.clone();
			let token = generation.begin();
			state.set(ViewState::Loading);
			spawn_local(async move {
				let result = fetch_records(&endpoint).await;
				if !generation.is_current(token) {
					debug!("audit-graph: discarding stale response for {endpoint}");
					return;
				}
				let built = result.map_err(|e| e.to_string()).and_then(|values| {
					DependencyGraph::from_json(&values).map_err(|e| e.to_string())
				});
				match built {
					Ok(graph) => {
						info!(
							"audit-graph: loaded {} nodes, {} edges",
							graph.nodes().len(),
							graph.edges().len()
						);
						state.set(ViewState::Ready(graph));
					}
					Err(message) => {
						error!("audit-graph: {message}");
						state.set(ViewState::Error(message));
					}
				}
			});
		}
	};
	load();

	let on_navigate = Callback::new(|url: String| {
		if let Some(window) = web_sys::window() {
			let _ = window.location().assign(&url);
		}
	});

	let retry = load.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Assessment Dependency Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="dep-graph-page">
			{move || match state.get() {
				ViewState::Loading => {
					view! { <p class="status">"Loading dependency data…"</p> }.into_any()
				}
				ViewState::Error(message) => {
					let retry = retry.clone();
					view! {
						<div class="status error">
							<p>{message}</p>
							<button on:click=move |_| retry()>"Retry"</button>
						</div>
					}
					.into_any()
				}
				ViewState::Ready(graph) => view! {
					<DepGraphCanvas
						graph=Signal::derive(move || graph.clone())
						on_navigate=on_navigate
					/>
				}
				.into_any(),
			}}
		</div>
	}
}
