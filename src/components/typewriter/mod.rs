//! Typewriter effect for the hero headline.

mod component;
pub mod state;

pub use component::Typewriter;
pub use state::{ERASE_DELAY, HOLD_DELAY, RoleCycler, TYPE_DELAY};
