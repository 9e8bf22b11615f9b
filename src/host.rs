//! Owned handles over browser scheduling and notification primitives.
//!
//! Each handle registers its callback on construction and releases the
//! registration when dropped, so a component tears down by dropping what it
//! holds. Constructors return `None` when the browser refuses the
//! registration; callers treat that as the feature being inactive.
//!
//! Components reach these primitives through the [`Host`] trait, which
//! [`Browser`] implements over the live `window`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, Element, EventTarget, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, Window,
};

/// Current viewport size in CSS pixels.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

/// Current vertical scroll offset, `0.0` if unavailable.
pub fn scroll_offset(window: &Window) -> f64 {
	window.scroll_y().unwrap_or(0.0)
}

/// A DOM event subscription, removed on drop.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl EventListener {
	/// Subscribe `callback` to `event` on `target`.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		callback: impl FnMut() + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut()>::new(callback);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	/// Like [`EventListener::new`], but registered as passive (for scroll).
	pub fn passive(
		target: &EventTarget,
		event: &'static str,
		callback: impl FnMut() + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut()>::new(callback);
		let options = AddEventListenerOptions::new();
		options.set_passive(true);
		target
			.add_event_listener_with_callback_and_add_event_listener_options(
				event,
				callback.as_ref().unchecked_ref(),
				&options,
			)
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// A one-shot delayed callback, cleared on drop if it has not fired.
pub struct Timeout {
	id: i32,
	_callback: Closure<dyn FnMut()>,
}

impl Timeout {
	/// Run `callback` once after `delay`.
	pub fn new(delay: Duration, callback: impl FnOnce() + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let callback = Closure::once(callback);
		let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
		let id = window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				millis,
			)
			.ok()?;
		Some(Self {
			id,
			_callback: callback,
		})
	}
}

impl Drop for Timeout {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			window.clear_timeout_with_handle(self.id);
		}
	}
}

#[derive(Default)]
struct FrameSlot {
	pending: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameSlot {
	fn request(&self) {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		// A refused request skips the frame; the loop simply stops.
		if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			self.pending.set(Some(id));
		}
	}

	fn cancel(&self) {
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		self.callback.borrow_mut().take();
	}
}

/// A self-rescheduling `requestAnimationFrame` loop.
///
/// The frame closure only holds a weak reference to its own slot, so stopping
/// (or dropping) the loop releases the closure and everything it captured.
pub struct FrameLoop {
	slot: Rc<FrameSlot>,
}

impl FrameLoop {
	/// Call `on_frame` once per display refresh until stopped.
	pub fn start(mut on_frame: impl FnMut() + 'static) -> Option<Self> {
		web_sys::window()?;
		let slot = Rc::new(FrameSlot::default());
		let weak = Rc::downgrade(&slot);
		*slot.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(slot) = weak.upgrade() else {
				return;
			};
			slot.pending.set(None);
			on_frame();
			slot.request();
		}));
		slot.request();
		slot.pending.get()?;
		Some(Self { slot })
	}

	/// Cancel the pending frame. Safe to call repeatedly.
	pub fn stop(&self) {
		self.slot.cancel();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Viewport intersection tracking for one element, disconnected on drop.
pub struct IntersectionWatch {
	observer: IntersectionObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl IntersectionWatch {
	/// Report enter (`true`) and exit (`false`) of `target` once at least
	/// `threshold` of it is visible.
	pub fn new(
		target: &Element,
		threshold: f64,
		mut on_change: impl FnMut(bool) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			for entry in entries.iter() {
				if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
					on_change(entry.is_intersecting());
				}
			}
		});
		let options = IntersectionObserverInit::new();
		options.set_threshold(&JsValue::from_f64(threshold));
		let observer =
			IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
				.ok()?;
		observer.observe(target);
		Some(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for IntersectionWatch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Scheduling and notification services the components register with.
///
/// Every registration is returned as an owned handle. Dropping the handle
/// releases the registration, after which its callback never runs.
pub trait Host: Clone + 'static {
	/// Event subscription handle.
	type Listener;
	/// Running frame loop handle.
	type Frames;
	/// Pending one-shot timer handle.
	type Timer;
	/// Intersection tracking handle.
	type Watch;

	/// Current viewport size in CSS pixels.
	fn viewport_size(&self) -> Option<(f64, f64)>;

	/// Current vertical scroll offset.
	fn scroll_offset(&self) -> f64;

	/// Subscribe to a window event; scroll-like events go in as `passive`.
	fn listen(
		&self,
		event: &'static str,
		passive: bool,
		callback: impl FnMut() + 'static,
	) -> Option<Self::Listener>;

	/// Run `on_frame` once per display refresh.
	fn frames(&self, on_frame: impl FnMut() + 'static) -> Option<Self::Frames>;

	/// Run `callback` once after `delay`.
	fn timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> Option<Self::Timer>;

	/// Report viewport enter/exit of the first element matching `selector`.
	/// `None` when nothing matches.
	fn watch_intersection(
		&self,
		selector: &str,
		threshold: f64,
		on_change: impl FnMut(bool) + 'static,
	) -> Option<Self::Watch>;
}

/// [`Host`] backed by the page's `window`.
#[derive(Clone, Debug)]
pub struct Browser {
	window: Window,
}

impl Browser {
	/// The current window, if running in a browser context.
	pub fn current() -> Option<Self> {
		web_sys::window().map(|window| Self { window })
	}
}

impl Host for Browser {
	type Listener = EventListener;
	type Frames = FrameLoop;
	type Timer = Timeout;
	type Watch = IntersectionWatch;

	fn viewport_size(&self) -> Option<(f64, f64)> {
		viewport_size(&self.window)
	}

	fn scroll_offset(&self) -> f64 {
		scroll_offset(&self.window)
	}

	fn listen(
		&self,
		event: &'static str,
		passive: bool,
		callback: impl FnMut() + 'static,
	) -> Option<EventListener> {
		if passive {
			EventListener::passive(&self.window, event, callback)
		} else {
			EventListener::new(&self.window, event, callback)
		}
	}

	fn frames(&self, on_frame: impl FnMut() + 'static) -> Option<FrameLoop> {
		FrameLoop::start(on_frame)
	}

	fn timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> Option<Timeout> {
		Timeout::new(delay, callback)
	}

	fn watch_intersection(
		&self,
		selector: &str,
		threshold: f64,
		on_change: impl FnMut(bool) + 'static,
	) -> Option<IntersectionWatch> {
		let target = self.window.document()?.query_selector(selector).ok()??;
		IntersectionWatch::new(&target, threshold, on_change)
	}
}
