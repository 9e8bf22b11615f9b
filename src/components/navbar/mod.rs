//! Overlay navbar with scroll-reactive visibility.

mod component;
pub mod state;

pub use component::{Navbar, VisibilityController};
pub use state::{HOME_VISIBILITY_THRESHOLD, IDLE_HIDE_DELAY, VisibilityState};
