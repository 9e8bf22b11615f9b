//! Page components.

pub mod home;
pub mod navbar;
pub mod particle_field;
pub mod typewriter;
