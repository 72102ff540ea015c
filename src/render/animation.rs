//! Animation surface for fast-changing point clouds
//!
//! The axes and gridlines are built once in [`AnimationSurface::new`]. Each
//! frame only replaces the layer of moving bodies.

use super::projection::nice_step;
use super::scene::Primitive;
use crate::constants::animation::{CIRCLE_SEGMENTS, MINOR_DIVISIONS};
use crate::error::{PlotError, Result};
use eframe::egui::Color32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared flag that ends a frame loop
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Jet-style colormap: dark blue at 0, through cyan, yellow, to dark red at 1
pub fn jet(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let channel = |offset: f64| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    Color32::from_rgb(channel(3.0), channel(2.0), channel(1.0))
}

fn body_color() -> Color32 {
    Color32::from_rgb(0x0d, 0x00, 0xc9)
}

pub struct AnimationSurface {
    half_extent: f64,
    background: Vec<Primitive>,
    background_builds: usize,
    bodies: Vec<Primitive>,
    frames: u64,
}

impl AnimationSurface {
    /// Square view over `[-half_extent, half_extent]` on both axes
    pub fn new(half_extent: f64) -> Self {
        let half_extent = if half_extent.is_finite() && half_extent > 0.0 {
            half_extent
        } else {
            1.0
        };
        Self {
            half_extent,
            background: build_background(half_extent),
            background_builds: 1,
            bodies: Vec::new(),
            frames: 0,
        }
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn background(&self) -> &[Primitive] {
        &self.background
    }

    /// How many times the static layer has been built
    pub fn background_builds(&self) -> usize {
        self.background_builds
    }

    pub fn bodies(&self) -> &[Primitive] {
        &self.bodies
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Background followed by the current bodies
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.background.iter().chain(&self.bodies)
    }

    /// Replace the moving layer with one disc per body
    pub fn process_frame(&mut self, positions: &[[f64; 2]], radii: &[f64]) -> Result<()> {
        self.draw_bodies(positions, radii, None)
    }

    /// Like [`Self::process_frame`], colouring each body by `color_indices`
    /// in `[0, 1]` through [`jet`]
    pub fn process_frame_colored(
        &mut self,
        positions: &[[f64; 2]],
        radii: &[f64],
        color_indices: &[f64],
    ) -> Result<()> {
        if color_indices.len() != positions.len() {
            return Err(PlotError::ColorIndexMismatch {
                positions: positions.len(),
                colors: color_indices.len(),
            });
        }
        self.draw_bodies(positions, radii, Some(color_indices))
    }

    fn draw_bodies(
        &mut self,
        positions: &[[f64; 2]],
        radii: &[f64],
        color_indices: Option<&[f64]>,
    ) -> Result<()> {
        profiling::scope!("AnimationSurface::process_frame");

        if positions.len() != radii.len() {
            return Err(PlotError::FrameMismatch {
                positions: positions.len(),
                radii: radii.len(),
            });
        }

        self.bodies.clear();
        for (i, (&[x, y], &radius)) in positions.iter().zip(radii).enumerate() {
            let fill = color_indices.map_or_else(body_color, |indices| jet(indices[i]));
            self.bodies.push(Primitive::Polygon {
                points: circle(x, y, radius),
                fill,
            });
        }
        self.frames += 1;
        Ok(())
    }
}

fn circle(cx: f64, cy: f64, radius: f64) -> Vec<[f64; 2]> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            [cx + radius * angle.cos(), cy + radius * angle.sin()]
        })
        .collect()
}

fn build_background(half_extent: f64) -> Vec<Primitive> {
    let major = nice_step(half_extent / 2.0);
    let minor = major / MINOR_DIVISIONS as f64;
    let major_color = Color32::from_rgba_unmultiplied(128, 128, 128, 110);
    let minor_color = Color32::from_rgba_unmultiplied(128, 128, 128, 40);

    let mut primitives = Vec::new();
    let steps = (half_extent / minor).floor() as i64;
    for k in -steps..=steps {
        let offset = k as f64 * minor;
        let (color, width) = if k % MINOR_DIVISIONS as i64 == 0 {
            (major_color, 1.0)
        } else {
            (minor_color, 0.5)
        };
        for points in [
            vec![[offset, -half_extent], [offset, half_extent]],
            vec![[-half_extent, offset], [half_extent, offset]],
        ] {
            primitives.push(Primitive::Polyline {
                name: None,
                points,
                color,
                width,
            });
        }
    }

    let h = half_extent;
    primitives.push(Primitive::Polyline {
        name: None,
        points: vec![[-h, -h], [h, -h], [h, h], [-h, h], [-h, -h]],
        color: Color32::from_gray(160),
        width: 1.5,
    });
    primitives
}

/// Cooperative frame loop.
///
/// Calls `next_frame` until it returns `None` or `stop` is triggered,
/// sleeping `pause` between frames. A frame that fails ends the loop with
/// that error. Returns the number of frames run.
pub fn run<F>(stop: &StopToken, pause: Duration, mut next_frame: F) -> Result<u64>
where
    F: FnMut() -> Option<Result<()>>,
{
    let mut frames = 0;
    while !stop.is_stopped() {
        match next_frame() {
            Some(result) => result?,
            None => break,
        }
        frames += 1;
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
    log::debug!("frame loop ended after {} frames", frames);
    Ok(frames)
}
