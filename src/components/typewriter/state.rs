//! Type/erase cycle over a list of role strings.

use std::time::Duration;

/// Delay between typed characters.
pub const TYPE_DELAY: Duration = Duration::from_millis(60);
/// Delay between erased characters.
pub const ERASE_DELAY: Duration = Duration::from_millis(40);
/// How long a fully typed role stays before erasing starts.
pub const HOLD_DELAY: Duration = Duration::from_millis(1200);

/// Cycles through roles, typing each one out and erasing it again.
#[derive(Clone, Debug)]
pub struct RoleCycler {
	roles: Vec<String>,
	index: usize,
	shown: usize,
	deleting: bool,
}

impl RoleCycler {
	/// Start before the first character of the first role.
	pub fn new(roles: Vec<String>) -> Self {
		Self {
			roles,
			index: 0,
			shown: 0,
			deleting: false,
		}
	}

	/// Index of the role currently being typed or erased.
	pub fn role_index(&self) -> usize {
		self.index
	}

	/// Whether the current role is being erased.
	pub fn is_deleting(&self) -> bool {
		self.deleting
	}

	/// The visible prefix of the current role.
	pub fn text(&self) -> &str {
		let Some(role) = self.roles.get(self.index) else {
			return "";
		};
		match role.char_indices().nth(self.shown) {
			Some((end, _)) => &role[..end],
			None => role,
		}
	}

	/// Advance one tick and return the delay before the next one.
	///
	/// `None` when there are no roles; nothing will ever change.
	pub fn step(&mut self) -> Option<Duration> {
		let len = self.roles.get(self.index)?.chars().count();

		if self.deleting {
			self.shown = self.shown.saturating_sub(1);
			if self.shown > 0 {
				return Some(ERASE_DELAY);
			}
			self.deleting = false;
			self.index = (self.index + 1) % self.roles.len();
			Some(TYPE_DELAY)
		} else {
			self.shown = (self.shown + 1).min(len);
			if self.shown < len {
				return Some(TYPE_DELAY);
			}
			self.deleting = true;
			Some(HOLD_DELAY)
		}
	}
}
