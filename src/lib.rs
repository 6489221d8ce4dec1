//! imp-sunburst: Interactive zoomable sunburst visualization.
//!
//! This crate provides a WASM-based sunburst component that renders weighted
//! hierarchies as concentric rings with click-to-zoom transitions and curved
//! labels.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::sunburst::{
	SunburstCanvas, SunburstConfig, SunburstError, SunburstNode, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("imp-sunburst: logging initialized");
}

/// Parse the JSON text of the script element with the given id.
fn load_script_json<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("imp-sunburst: failed to parse #{}: {}", id, e);
			None
		}
	}
}

/// Page-level settings from id="sunburst-config": the chart configuration
/// plus the name of a theme preset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageConfig {
	#[serde(flatten)]
	chart: SunburstConfig,
	theme: Option<String>,
}

impl PageConfig {
	fn theme(&self) -> Theme {
		match self.theme.as_deref() {
			None => Theme::default(),
			Some(name) => Theme::named(name).unwrap_or_else(|| {
				warn!("imp-sunburst: unknown theme '{}', using default", name);
				Theme::default()
			}),
		}
	}
}

/// Load the hierarchy from a script element with id="sunburst-data".
/// Expected format: JSON with { name, children: [...] } or { name, size }.
fn load_sunburst_data() -> Option<SunburstNode> {
	let data = load_script_json::<SunburstNode>("sunburst-data")?;
	info!(
		"imp-sunburst: loaded '{}' with {} top-level children",
		data.name,
		data.children.len()
	);
	Some(data)
}

/// Main application component.
/// Loads the hierarchy and optional configuration from the DOM and renders
/// the sunburst.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_sunburst_data().unwrap_or_default();
	let page = load_script_json::<PageConfig>("sunburst-config").unwrap_or_default();
	let theme = page.theme();
	let config = page.chart;
	let data_signal = Signal::derive(move || data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Sunburst" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-sunburst">
			<SunburstCanvas data=data_signal config=config theme=theme fullscreen=true />
		</div>
	}
}
