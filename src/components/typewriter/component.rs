//! Leptos headline that types and erases roles in turn.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use super::state::{RoleCycler, TYPE_DELAY};
use crate::host::Timeout;

/// Cycler plus the timeout that will run its next step.
struct Cycle {
	cycler: RoleCycler,
	pending: Option<Timeout>,
}

/// Schedule the next step of `cycle` after `delay`, replacing any pending one.
fn arm(cycle: &Rc<RefCell<Cycle>>, delay: Duration, text: RwSignal<String>) {
	let weak = Rc::downgrade(cycle);
	let timeout = Timeout::new(delay, move || {
		let Some(cycle) = weak.upgrade() else {
			return;
		};
		let (next, current) = {
			let mut c = cycle.borrow_mut();
			let next = c.cycler.step();
			(next, c.cycler.text().to_owned())
		};
		text.set(current);
		if let Some(next) = next {
			arm(&cycle, next, text);
		}
	});
	cycle.borrow_mut().pending = timeout;
}

/// Animated role headline with a blinking caret.
#[component]
pub fn Typewriter(
	/// Strings typed out in turn.
	#[prop(into)]
	roles: Vec<String>,
) -> impl IntoView {
	let text = RwSignal::new(String::new());
	let idle = roles.is_empty();
	let cycle = Rc::new(RefCell::new(Cycle {
		cycler: RoleCycler::new(roles),
		pending: None,
	}));
	if !idle {
		arm(&cycle, TYPE_DELAY, text);
	}

	let cycle_cleanup = SendWrapper::new(cycle);
	on_cleanup(move || {
		cycle_cleanup.borrow_mut().pending.take();
	});

	view! {
		<span class="typewriter">
			<span class="typewriter-text">{move || text.get()}</span>
			<span class="typewriter-caret" />
		</span>
	}
}
