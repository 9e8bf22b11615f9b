//! Mount/unmount lifecycle of the particle simulator and the navbar
//! controller on a recording host.
//!
//! [`FakeHost`] keeps every registration in a table and hands out handles
//! that remove their entry on drop, so a callback can only be delivered
//! while its handle is alive.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use portfolio_fx::components::navbar::{IDLE_HIDE_DELAY, VisibilityController};
use portfolio_fx::components::particle_field::{Bounds, ParticleSimulator, ParticleStyle, Surface};
use portfolio_fx::host::Host;
use rand::SeedableRng;
use rand::rngs::StdRng;

type Callback = Rc<RefCell<dyn FnMut()>>;
type Watcher = Rc<RefCell<dyn FnMut(bool)>>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	viewport: Option<(f64, f64)>,
	scroll: f64,
	home_selector: Option<String>,
	listeners: BTreeMap<u64, (&'static str, bool, Callback)>,
	frames: BTreeMap<u64, Callback>,
	timers: BTreeMap<u64, (Duration, Box<dyn FnOnce()>)>,
	watches: BTreeMap<u64, Watcher>,
}

impl Registry {
	fn id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	fn live(&self) -> usize {
		self.listeners.len() + self.frames.len() + self.timers.len() + self.watches.len()
	}
}

#[derive(Clone, Copy)]
enum Kind {
	Listener,
	Frames,
	Timer,
	Watch,
}

/// Registration handle; dropping it unregisters the callback.
struct Registration {
	id: u64,
	kind: Kind,
	registry: Weak<RefCell<Registry>>,
}

impl Drop for Registration {
	fn drop(&mut self) {
		let Some(registry) = self.registry.upgrade() else {
			return;
		};
		let mut r = registry.borrow_mut();
		match self.kind {
			Kind::Listener => drop(r.listeners.remove(&self.id)),
			Kind::Frames => drop(r.frames.remove(&self.id)),
			Kind::Timer => drop(r.timers.remove(&self.id)),
			Kind::Watch => drop(r.watches.remove(&self.id)),
		}
	}
}

#[derive(Clone, Default)]
struct FakeHost {
	registry: Rc<RefCell<Registry>>,
}

impl FakeHost {
	fn with_viewport(width: f64, height: f64) -> Self {
		let host = Self::default();
		host.registry.borrow_mut().viewport = Some((width, height));
		host
	}

	fn with_home(self, selector: &str) -> Self {
		self.registry.borrow_mut().home_selector = Some(selector.to_owned());
		self
	}

	fn register(&self, kind: Kind, insert: impl FnOnce(&mut Registry, u64)) -> Registration {
		let mut r = self.registry.borrow_mut();
		let id = r.id();
		insert(&mut *r, id);
		Registration {
			id,
			kind,
			registry: Rc::downgrade(&self.registry),
		}
	}

	fn live(&self) -> usize {
		self.registry.borrow().live()
	}

	fn pending_timers(&self) -> Vec<Duration> {
		self.registry.borrow().timers.values().map(|(d, _)| *d).collect()
	}

	fn run_frames(&self, count: usize) {
		for _ in 0..count {
			let frames: Vec<Callback> = self.registry.borrow().frames.values().cloned().collect();
			for frame in frames {
				(*frame.borrow_mut())();
			}
		}
	}

	fn dispatch(&self, event: &str) {
		let listeners: Vec<Callback> = self
			.registry
			.borrow()
			.listeners
			.values()
			.filter(|(name, _, _)| *name == event)
			.map(|(_, _, cb)| cb.clone())
			.collect();
		for cb in listeners {
			(*cb.borrow_mut())();
		}
	}

	fn resize(&self, width: f64, height: f64) {
		self.registry.borrow_mut().viewport = Some((width, height));
		self.dispatch("resize");
	}

	fn scroll_to(&self, offset: f64) {
		self.registry.borrow_mut().scroll = offset;
		self.dispatch("scroll");
	}

	fn set_home_visible(&self, visible: bool) {
		let watches: Vec<Watcher> = self.registry.borrow().watches.values().cloned().collect();
		for w in watches {
			(*w.borrow_mut())(visible);
		}
	}

	/// Fire every pending timer, as if its delay had elapsed.
	fn fire_timers(&self) {
		let due: Vec<_> = std::mem::take(&mut self.registry.borrow_mut().timers)
			.into_values()
			.collect();
		for (_, callback) in due {
			callback();
		}
	}

	fn is_passive(&self, event: &str) -> bool {
		self.registry
			.borrow()
			.listeners
			.values()
			.any(|(name, passive, _)| *name == event && *passive)
	}
}

impl Host for FakeHost {
	type Listener = Registration;
	type Frames = Registration;
	type Timer = Registration;
	type Watch = Registration;

	fn viewport_size(&self) -> Option<(f64, f64)> {
		self.registry.borrow().viewport
	}

	fn scroll_offset(&self) -> f64 {
		self.registry.borrow().scroll
	}

	fn listen(
		&self,
		event: &'static str,
		passive: bool,
		callback: impl FnMut() + 'static,
	) -> Option<Registration> {
		let callback: Callback = Rc::new(RefCell::new(callback));
		Some(self.register(Kind::Listener, |r, id| {
			r.listeners.insert(id, (event, passive, callback));
		}))
	}

	fn frames(&self, on_frame: impl FnMut() + 'static) -> Option<Registration> {
		let callback: Callback = Rc::new(RefCell::new(on_frame));
		Some(self.register(Kind::Frames, |r, id| {
			r.frames.insert(id, callback);
		}))
	}

	fn timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> Option<Registration> {
		Some(self.register(Kind::Timer, |r, id| {
			r.timers.insert(id, (delay, Box::new(callback)));
		}))
	}

	fn watch_intersection(
		&self,
		selector: &str,
		_threshold: f64,
		on_change: impl FnMut(bool) + 'static,
	) -> Option<Registration> {
		if self.registry.borrow().home_selector.as_deref() != Some(selector) {
			return None;
		}
		let watcher: Watcher = Rc::new(RefCell::new(on_change));
		Some(self.register(Kind::Watch, |r, id| {
			r.watches.insert(id, watcher);
		}))
	}
}

/// Surface that counts clears and remembers the last fitted size.
#[derive(Clone, Default)]
struct CountingSurface {
	bounds: Rc<Cell<Bounds>>,
	frames: Rc<Cell<usize>>,
	circles: Rc<Cell<usize>>,
}

impl Surface for CountingSurface {
	fn bounds(&self) -> Bounds {
		self.bounds.get()
	}

	fn fit_to(&self, width: f64, height: f64) -> Bounds {
		self.bounds.set(Bounds::new(width, height));
		self.bounds.get()
	}

	fn clear(&self) {
		self.frames.set(self.frames.get() + 1);
	}

	fn fill_glowing_circle(&self, _x: f64, _y: f64, _radius: f64, _color: &str, _blur: f64) {
		self.circles.set(self.circles.get() + 1);
	}
}

fn mount_simulator(host: &FakeHost, surface: &CountingSurface) -> ParticleSimulator<FakeHost> {
	ParticleSimulator::attach(
		host.clone(),
		surface.clone(),
		ParticleStyle::default(),
		StdRng::seed_from_u64(5),
	)
	.expect("viewport available")
}

#[test]
fn simulator_renders_every_frame_while_mounted() {
	let host = FakeHost::with_viewport(800.0, 600.0);
	let surface = CountingSurface::default();
	let sim = mount_simulator(&host, &surface);

	assert!(sim.is_mounted());
	assert_eq!(surface.bounds.get(), Bounds::new(800.0, 600.0));
	host.run_frames(3);
	assert_eq!(surface.frames.get(), 3);
	assert_eq!(surface.circles.get(), 150);
}

#[test]
fn simulator_refits_surface_on_resize() {
	let host = FakeHost::with_viewport(800.0, 600.0);
	let surface = CountingSurface::default();
	let _sim = mount_simulator(&host, &surface);

	host.resize(375.0, 812.0);

	assert_eq!(surface.bounds.get(), Bounds::new(375.0, 812.0));
	host.run_frames(1);
	assert_eq!(surface.circles.get(), 50);
}

#[test]
fn simulator_unmount_twice_stops_frames_and_resizes() {
	let host = FakeHost::with_viewport(800.0, 600.0);
	let surface = CountingSurface::default();
	let mut sim = mount_simulator(&host, &surface);
	host.run_frames(2);
	assert_eq!(host.live(), 2);

	sim.unmount();
	sim.unmount();

	assert!(!sim.is_mounted());
	assert_eq!(host.live(), 0);
	host.run_frames(5);
	host.resize(1024.0, 768.0);
	assert_eq!(surface.frames.get(), 2);
	assert_eq!(surface.bounds.get(), Bounds::new(800.0, 600.0));
}

#[test]
fn dropping_simulator_releases_the_scene() {
	let host = FakeHost::with_viewport(320.0, 240.0);
	let surface = CountingSurface::default();
	let sim = mount_simulator(&host, &surface);
	assert!(Rc::strong_count(&surface.frames) > 1);

	drop(sim);

	assert_eq!(host.live(), 0);
	assert_eq!(Rc::strong_count(&surface.frames), 1);
}

#[test]
fn simulator_without_viewport_registers_nothing() {
	let host = FakeHost::default();
	let surface = CountingSurface::default();

	let sim = ParticleSimulator::attach(
		host.clone(),
		surface.clone(),
		ParticleStyle::default(),
		StdRng::seed_from_u64(5),
	);

	assert!(sim.is_none());
	assert_eq!(host.live(), 0);
}

fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl Fn(bool) + 'static) {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = seen.clone();
	(seen, move |v| sink.borrow_mut().push(v))
}

#[test]
fn controller_publishes_scroll_and_idle_changes() {
	let host = FakeHost::with_viewport(800.0, 600.0).with_home("#home");
	let (seen, on_change) = recorder();
	let controller = VisibilityController::attach(host.clone(), "#home", on_change);
	assert!(host.is_passive("scroll"));

	host.scroll_to(100.0);
	assert!(!controller.visible());
	host.scroll_to(40.0);
	assert!(controller.visible());
	assert_eq!(host.pending_timers(), [IDLE_HIDE_DELAY]);
	host.fire_timers();

	assert!(!controller.visible());
	assert_eq!(*seen.borrow(), [true, false, true, false]);
}

#[test]
fn controller_stays_pinned_while_home_is_visible() {
	let host = FakeHost::with_viewport(800.0, 600.0).with_home("#home");
	let (_seen, on_change) = recorder();
	let controller = VisibilityController::attach(host.clone(), "#home", on_change);

	host.scroll_to(10.0);
	host.scroll_to(5.0);
	assert!(controller.has_pending_hide());
	host.set_home_visible(true);
	assert!(!controller.has_pending_hide());
	host.scroll_to(500.0);
	assert!(controller.visible());

	host.set_home_visible(false);
	host.scroll_to(900.0);
	assert!(!controller.visible());
}

#[test]
fn controller_without_home_region_follows_scroll_only() {
	let host = FakeHost::with_viewport(800.0, 600.0);
	let (_seen, on_change) = recorder();
	let controller = VisibilityController::attach(host.clone(), "#home", on_change);

	assert_eq!(host.live(), 1);
	host.set_home_visible(true);
	host.scroll_to(100.0);
	assert!(!controller.visible());
}

#[test]
fn controller_unmount_twice_silences_every_callback() {
	let host = FakeHost::with_viewport(800.0, 600.0).with_home("#home");
	let (seen, on_change) = recorder();
	let mut controller = VisibilityController::attach(host.clone(), "#home", on_change);
	host.scroll_to(100.0);
	host.scroll_to(20.0);
	assert_eq!(host.live(), 3);

	controller.unmount();
	controller.unmount();

	assert_eq!(host.live(), 0);
	assert!(!controller.has_pending_hide());
	let published = seen.borrow().len();
	host.scroll_to(500.0);
	host.set_home_visible(true);
	host.fire_timers();
	assert_eq!(seen.borrow().len(), published);
	assert!(controller.visible());
}

#[test]
fn dropping_controller_cancels_pending_idle_timer() {
	let host = FakeHost::with_viewport(800.0, 600.0);
	let (seen, on_change) = recorder();
	let controller = VisibilityController::attach(host.clone(), "#home", on_change);
	host.scroll_to(0.0);
	assert_eq!(host.pending_timers().len(), 1);

	drop(controller);

	assert_eq!(host.live(), 0);
	host.fire_timers();
	assert_eq!(*seen.borrow(), [true, true]);
}
