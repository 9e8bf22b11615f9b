//! portfolio-fx: animated core of a single-page portfolio site.
//!
//! This crate provides WASM-based Leptos components for a scrolling portfolio
//! page: a particle backdrop on the hero canvas, a navbar that hides while
//! scrolling down, and a typewriter role headline.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// rand reaches getrandom on wasm32; this only enables its `js` backend.
use getrandom as _;

pub mod components;
pub mod config;
pub mod host;

pub use components::home::Home;
pub use components::navbar::{Navbar, VisibilityController, VisibilityState};
pub use components::particle_field::{ParticleBackground, ParticleSimulator};
pub use components::typewriter::{RoleCycler, Typewriter};
pub use config::SiteConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-fx: logging initialized");
}

/// Load site content from a script element with id="site-config".
fn load_site_config() -> Option<SiteConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(config::CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SiteConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"portfolio-fx: loaded config with {} roles, {} sections",
				config.roles.len(),
				config.sections.len()
			);
			Some(config)
		}
		Err(e) => {
			warn!("portfolio-fx: failed to parse site config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads site content from the DOM and composes the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config().unwrap_or_default();
	let links: Vec<(String, String)> = config
		.sections
		.iter()
		.map(|s| (s.id.clone(), s.title.clone()))
		.collect();
	let sections = config
		.sections
		.clone()
		.into_iter()
		.map(|section| {
			view! {
				<section id=section.id class="page-section">
					<h2>{section.title}</h2>
					<p>{section.body}</p>
				</section>
			}
		})
		.collect_view();
	let footer = config.footer.clone();
	let name = config.name.clone();
	let contact_href = config.contact_href.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=name.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Navbar brand=name links=links contact_href=contact_href />
		<main>
			<Home config=config />
			{sections}
		</main>
		<footer class="page-footer">{footer}</footer>
	}
}
