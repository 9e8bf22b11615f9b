//! Leptos navbar whose visibility follows scrolling.
//!
//! A [`VisibilityController`] subscribes to window scroll events and to the
//! viewport intersection of the home region, feeds them into
//! [`VisibilityState`], and publishes the resulting flag. The component
//! mirrors that flag into a signal and toggles a CSS class on the `<nav>`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use leptos::prelude::*;
use log::{debug, info};
use send_wrapper::SendWrapper;

use super::state::{HOME_VISIBILITY_THRESHOLD, VisibilityState};
use crate::components::home::HOME_ID;
use crate::host::{Browser, Host};

type SharedState<T> = Rc<RefCell<VisibilityState<T>>>;
type Publish = Rc<dyn Fn(bool)>;

/// Owns the scroll listener, the home-region observer and the idle timer.
pub struct VisibilityController<H: Host = Browser> {
	state: SharedState<H::Timer>,
	scroll: Option<H::Listener>,
	home: Option<H::Watch>,
}

impl VisibilityController {
	/// Start tracking in the browser. `on_change` receives the visibility
	/// after every event.
	///
	/// If nothing matches `home_selector` only scroll direction governs
	/// visibility. Returns `None` when there is no window.
	pub fn mount(home_selector: &str, on_change: impl Fn(bool) + 'static) -> Option<Self> {
		Some(Self::attach(Browser::current()?, home_selector, on_change))
	}
}

impl<H: Host> VisibilityController<H> {
	/// Start tracking on an arbitrary host.
	pub fn attach(host: H, home_selector: &str, on_change: impl Fn(bool) + 'static) -> Self {
		let state: SharedState<H::Timer> = Rc::new(RefCell::new(VisibilityState::new()));
		let publish: Publish = Rc::new(on_change);
		publish(state.borrow().visible());

		let home = {
			let (weak, publish) = (Rc::downgrade(&state), publish.clone());
			host.watch_intersection(home_selector, HOME_VISIBILITY_THRESHOLD, move |intersecting| {
				let Some(state) = weak.upgrade() else {
					return;
				};
				let visible = {
					let mut s = state.borrow_mut();
					s.on_home_intersection(intersecting);
					s.visible()
				};
				publish(visible);
			})
		};
		if home.is_none() {
			debug!("portfolio-fx: no {home_selector} region, navbar follows scroll only");
		}

		let weak = Rc::downgrade(&state);
		let scroll_host = host.clone();
		let scroll_publish = publish;
		let scroll = host.listen("scroll", true, move || {
			let Some(state) = weak.upgrade() else {
				return;
			};
			let offset = scroll_host.scroll_offset();
			let visible = {
				let mut s = state.borrow_mut();
				s.on_scroll(offset, |delay| {
					schedule_idle_hide(&scroll_host, &weak, &scroll_publish, delay)
				});
				s.visible()
			};
			scroll_publish(visible);
		});

		info!("portfolio-fx: navbar visibility controller mounted");
		Self {
			state,
			scroll,
			home,
		}
	}

	/// Current visibility.
	pub fn visible(&self) -> bool {
		self.state.borrow().visible()
	}

	/// Whether an idle-hide timer is pending.
	pub fn has_pending_hide(&self) -> bool {
		self.state.borrow().has_pending_hide()
	}

	/// Drop every listener, observer and pending timer. Safe to call repeatedly.
	pub fn unmount(&mut self) {
		let was_mounted = self.scroll.is_some() || self.home.is_some();
		self.scroll.take();
		self.home.take();
		self.state.borrow_mut().cancel_pending();
		if was_mounted {
			info!("portfolio-fx: navbar visibility controller unmounted");
		}
	}
}

impl<H: Host> Drop for VisibilityController<H> {
	fn drop(&mut self) {
		self.unmount();
	}
}

fn schedule_idle_hide<H: Host>(
	host: &H,
	state: &Weak<RefCell<VisibilityState<H::Timer>>>,
	publish: &Publish,
	delay: Duration,
) -> Option<H::Timer> {
	let (state, publish) = (state.clone(), publish.clone());
	host.timeout(delay, move || {
		let Some(state) = state.upgrade() else {
			return;
		};
		let visible = {
			let mut s = state.borrow_mut();
			s.on_idle_elapsed();
			s.visible()
		};
		publish(visible);
	})
}

/// CSS selector of the hero section rendered by `Home`.
fn default_home_selector() -> String {
	format!("#{HOME_ID}")
}

/// Fixed top bar that slides away while scrolling down.
///
/// `links` are `(anchor id, label)` pairs. The bar stays pinned while the
/// element matching `home_selector` (the hero section by default) is at least
/// 10% visible.
#[component]
pub fn Navbar(
	/// Text shown at the left of the bar.
	#[prop(into)]
	brand: String,
	/// In-page navigation entries.
	#[prop(default = Vec::new())]
	links: Vec<(String, String)>,
	/// Target of the contact button.
	#[prop(into, default = "#contact".to_string())]
	contact_href: String,
	/// Region that pins the bar while visible.
	#[prop(into, default = default_home_selector())]
	home_selector: String,
) -> impl IntoView {
	let visible = RwSignal::new(true);
	let controller: Rc<RefCell<Option<VisibilityController>>> = Rc::new(RefCell::new(None));
	let controller_init = controller.clone();

	Effect::new(move |_| {
		let mut slot = controller_init.borrow_mut();
		if slot.is_some() {
			return;
		}
		*slot = VisibilityController::mount(&home_selector, move |v| {
			if visible.get_untracked() != v {
				visible.set(v);
			}
		});
	});

	let controller_cleanup = SendWrapper::new(controller);
	on_cleanup(move || {
		if let Some(mut c) = controller_cleanup.borrow_mut().take() {
			c.unmount();
		}
	});

	let links = links
		.into_iter()
		.map(|(id, label)| {
			view! {
				<li>
					<a href=format!("#{id}")>{label}</a>
				</li>
			}
		})
		.collect_view();

	view! {
		<nav class=move || {
			if visible.get() { "navbar navbar--shown" } else { "navbar navbar--hidden" }
		}>
			<div class="navbar-brand">{brand}</div>
			<ul class="navbar-links">{links}</ul>
			<a class="navbar-contact" href=contact_href>
				"Reach Out"
			</a>
		</nav>
	}
}
