//! GraphOxide: incremental plot composition
//!
//! Data lines and model curves are collected in a [`registry::PlotRegistry`]
//! and rendered into a retained [`render::Scene`] under a Cartesian or polar
//! projection. [`render::AnimationSurface`] drives frame-by-frame
//! simulations on the same primitives.

pub mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod models;
pub mod palette;
pub mod registry;
pub mod render;
pub mod state;
pub mod ui;
