//! Particle backdrop for the hero section.
//!
//! Renders a fixed population of small glowing particles on a full-viewport
//! canvas:
//! - Uniformly random positions, radii and slow velocities
//! - Wrap-around motion at the surface edges
//! - Full regeneration whenever the window is resized
//! - Deterministic teardown of the frame loop and resize listener
//!
//! # Example
//!
//! ```ignore
//! view! {
//!     <section id="home" style="position: relative;">
//!         <ParticleBackground />
//!     </section>
//! }
//! ```

mod component;
pub mod particles;
pub mod render;
pub mod theme;

pub use component::{ParticleBackground, ParticleSimulator};
pub use particles::{Bounds, Particle, ParticleField, advance};
pub use render::{Surface, draw, render_frame};
pub use theme::{Color, ParticleStyle};
