//! Leptos component wrapping the particle backdrop canvas.
//!
//! The component creates a canvas element and hands it to a
//! [`ParticleSimulator`], which sizes it to the viewport, regenerates the
//! particles on every window resize and redraws them each animation frame.
//! The simulator is unmounted when the component's owner is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use send_wrapper::SendWrapper;
use web_sys::HtmlCanvasElement;

use super::particles::ParticleField;
use super::render::{self, CanvasSurface, Surface};
use super::theme::ParticleStyle;
use crate::host::{Browser, Host};

/// Simulation state shared by the resize and frame callbacks.
struct Scene<S, R> {
	field: ParticleField<R>,
	surface: S,
}

impl<S: Surface, R: Rng> Scene<S, R> {
	fn on_resize(&mut self, (w, h): (f64, f64)) {
		let bounds = self.surface.fit_to(w, h);
		self.field.regenerate(bounds);
		debug!("portfolio-fx: particles regenerated for {}x{}", bounds.width, bounds.height);
	}

	fn render_frame(&mut self) {
		render::render_frame(&mut self.field, &self.surface);
	}
}

/// Drives the particle animation on one surface between `mount` and `unmount`.
pub struct ParticleSimulator<H: Host = Browser> {
	frames: Option<H::Frames>,
	resize: Option<H::Listener>,
}

impl ParticleSimulator {
	/// Size `canvas` to the viewport, spawn the particles and start the
	/// frame loop.
	///
	/// Returns `None`, with nothing left running, when the window or the 2D
	/// context is unavailable.
	pub fn mount(canvas: HtmlCanvasElement) -> Option<Self> {
		Self::mount_with_style(canvas, ParticleStyle::default())
	}

	/// [`ParticleSimulator::mount`] with a custom population.
	pub fn mount_with_style(canvas: HtmlCanvasElement, style: ParticleStyle) -> Option<Self> {
		let host = Browser::current()?;
		let surface = CanvasSurface::new(canvas)?;
		Self::attach(host, surface, style, StdRng::from_entropy())
	}
}

impl<H: Host> ParticleSimulator<H> {
	/// Mount on an arbitrary host and surface.
	///
	/// Fails without registering anything if the host reports no viewport or
	/// refuses the frame loop.
	pub fn attach<S, R>(host: H, surface: S, style: ParticleStyle, rng: R) -> Option<Self>
	where
		S: Surface + 'static,
		R: Rng + 'static,
	{
		let (w, h) = host.viewport_size()?;
		let bounds = surface.fit_to(w, h);
		let field = ParticleField::new(style, bounds, rng);
		let scene = Rc::new(RefCell::new(Scene { field, surface }));

		let scene_resize = scene.clone();
		let resize_host = host.clone();
		let resize = host.listen("resize", false, move || {
			if let Some(size) = resize_host.viewport_size() {
				scene_resize.borrow_mut().on_resize(size);
			}
		});

		let scene_frame = scene;
		let frames = host.frames(move || scene_frame.borrow_mut().render_frame())?;

		info!(
			"portfolio-fx: particle field mounted at {}x{}",
			bounds.width, bounds.height
		);
		Some(Self {
			frames: Some(frames),
			resize,
		})
	}

	/// Stop rendering and stop listening for resizes. Safe to call repeatedly.
	pub fn unmount(&mut self) {
		let was_mounted = self.is_mounted();
		self.frames.take();
		self.resize.take();
		if was_mounted {
			info!("portfolio-fx: particle field unmounted");
		}
	}

	/// Whether the frame loop is still owned by this simulator.
	pub fn is_mounted(&self) -> bool {
		self.frames.is_some()
	}
}

impl<H: Host> Drop for ParticleSimulator<H> {
	fn drop(&mut self) {
		self.unmount();
	}
}

/// Full-viewport canvas of drifting, glowing particles.
///
/// Intended as the first child of a positioned hero section; the canvas
/// ignores pointer events and sits beneath the content.
#[component]
pub fn ParticleBackground() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let simulator: Rc<RefCell<Option<ParticleSimulator>>> = Rc::new(RefCell::new(None));
	let simulator_init = simulator.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let mut slot = simulator_init.borrow_mut();
		if let Some(mut previous) = slot.take() {
			previous.unmount();
		}
		*slot = ParticleSimulator::mount(canvas);
		if slot.is_none() {
			debug!("portfolio-fx: canvas unavailable, particle field inactive");
		}
	});

	let simulator_cleanup = SendWrapper::new(simulator);
	on_cleanup(move || {
		if let Some(mut sim) = simulator_cleanup.borrow_mut().take() {
			sim.unmount();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; z-index: 0;"
		/>
	}
}
