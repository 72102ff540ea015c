//! Scene construction and painting
//!
//! The registry is turned into a [`Scene`] by [`RenderSurface::redraw`];
//! [`painter::paint`] hands that scene to egui_plot each frame. The
//! [`AnimationSurface`] serves the frame-driven simulation view.

pub mod animation;
pub mod painter;
pub mod projection;
pub mod scene;
pub mod strategy;
pub mod surface;

pub use animation::{AnimationSurface, StopToken};
pub use projection::Projection;
pub use scene::{LegendEntry, Primitive, Scene};
pub use surface::RenderSurface;
