//! Scroll-driven navbar visibility.
//!
//! The bar hides while the page scrolls down, reappears on any other scroll
//! and hides again once an idle timer elapses. While the home region is in
//! view the bar is pinned visible and scroll direction is ignored.
//!
//! The idle timer is represented by an owned handle `H`; replacing or
//! clearing `pending_hide` drops the handle, which is expected to cancel the
//! underlying timer.

use std::time::Duration;

/// Quiet period after an upward scroll before the bar hides again.
pub const IDLE_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Fraction of the home region that must be visible to pin the bar.
pub const HOME_VISIBILITY_THRESHOLD: f64 = 0.1;

/// Visibility of the overlay bar plus the inputs it is derived from.
#[derive(Debug)]
pub struct VisibilityState<H> {
	visible: bool,
	force_visible: bool,
	last_scroll_position: f64,
	pending_hide: Option<H>,
}

impl<H> Default for VisibilityState<H> {
	fn default() -> Self {
		Self {
			visible: true,
			force_visible: false,
			last_scroll_position: 0.0,
			pending_hide: None,
		}
	}
}

impl<H> VisibilityState<H> {
	/// Shown, not pinned, at offset zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the bar should currently be shown.
	pub fn visible(&self) -> bool {
		self.visible
	}

	/// Whether the home region currently pins the bar.
	pub fn force_visible(&self) -> bool {
		self.force_visible
	}

	/// Offset of the most recent scroll event.
	pub fn last_scroll_position(&self) -> f64 {
		self.last_scroll_position
	}

	/// Whether an idle timer is outstanding.
	pub fn has_pending_hide(&self) -> bool {
		self.pending_hide.is_some()
	}

	/// Home region entered (`true`) or left (`false`) the viewport.
	///
	/// Entering also drops any idle timer, since it could only hide a bar
	/// that must stay pinned.
	pub fn on_home_intersection(&mut self, intersecting: bool) {
		self.force_visible = intersecting;
		if intersecting {
			self.visible = true;
			self.pending_hide = None;
		}
	}

	/// Apply a scroll event at vertical `offset`.
	///
	/// `schedule_hide` is only called on the upward/stationary branch; the
	/// previous handle is dropped first, so at most one timer is live.
	/// Equal offsets count as upward.
	pub fn on_scroll(&mut self, offset: f64, schedule_hide: impl FnOnce(Duration) -> Option<H>) {
		if self.force_visible {
			self.visible = true;
		} else if offset > self.last_scroll_position {
			self.visible = false;
			self.pending_hide = None;
		} else {
			self.visible = true;
			self.pending_hide = None;
			self.pending_hide = schedule_hide(IDLE_HIDE_DELAY);
		}
		self.last_scroll_position = offset;
	}

	/// The idle timer fired.
	pub fn on_idle_elapsed(&mut self) {
		self.pending_hide = None;
		if !self.force_visible {
			self.visible = false;
		}
	}

	/// Drop the pending idle timer, if any.
	pub fn cancel_pending(&mut self) {
		self.pending_hide = None;
	}
}
