//! Cartesian and polar projections
//!
//! Data is always stored in its own units. Under [`Projection::Polar`] x is
//! an angle in degrees measured clockwise from due north and y is the radius;
//! the conversion happens only when primitives are built.

use super::scene::Primitive;
use crate::constants::polar::{RING_COUNT, RING_SEGMENTS, SPOKE_STEP_DEG};
use crate::data::stats::format_significant;
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Cartesian,
    Polar,
}

impl Projection {
    pub fn name(&self) -> &'static str {
        match self {
            Projection::Cartesian => "Cartesian",
            Projection::Polar => "Polar",
        }
    }

    /// Map a data point to plot coordinates
    pub fn project(&self, x: f64, y: f64) -> [f64; 2] {
        match self {
            Projection::Cartesian => [x, y],
            Projection::Polar => {
                let theta = x.to_radians();
                [y * theta.sin(), y * theta.cos()]
            }
        }
    }

    pub fn project_all(&self, xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| self.project(x, y))
            .collect()
    }
}

/// Round `raw` up to 1, 2 or 5 times a power of ten
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn grid_color() -> Color32 {
    Color32::from_rgba_unmultiplied(128, 128, 128, 90)
}

fn label_color() -> Color32 {
    Color32::from_gray(140)
}

/// Rings at nice radial steps covering `max_radius`, plus labelled spokes
/// every 15 degrees
pub fn polar_grid(max_radius: f64) -> Vec<Primitive> {
    let step = nice_step(max_radius / RING_COUNT as f64);
    let rings = ((max_radius / step).ceil() as usize).max(1);
    let outer = step * rings as f64;
    let polar = Projection::Polar;

    let mut primitives = Vec::new();

    for ring in 1..=rings {
        let radius = step * ring as f64;
        let points = (0..=RING_SEGMENTS)
            .map(|i| polar.project(360.0 * i as f64 / RING_SEGMENTS as f64, radius))
            .collect();
        primitives.push(Primitive::Polyline {
            name: None,
            points,
            color: grid_color(),
            width: 1.0,
        });
        primitives.push(Primitive::Text {
            position: polar.project(SPOKE_STEP_DEG / 2.0, radius),
            text: format_significant(radius, 6),
            color: label_color(),
        });
    }

    let spokes = (360.0 / SPOKE_STEP_DEG).round() as usize;
    for spoke in 0..spokes {
        let angle = SPOKE_STEP_DEG * spoke as f64;
        primitives.push(Primitive::Polyline {
            name: None,
            points: vec![[0.0, 0.0], polar.project(angle, outer)],
            color: grid_color(),
            width: 1.0,
        });
        primitives.push(Primitive::Text {
            position: polar.project(angle, outer * 1.08),
            text: format!("{}°", angle),
            color: label_color(),
        });
    }

    primitives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn test_polar_orientation() {
        let polar = Projection::Polar;
        assert!(close(polar.project(0.0, 1.0), [0.0, 1.0]));
        assert!(close(polar.project(90.0, 1.0), [1.0, 0.0]));
        assert!(close(polar.project(180.0, 2.0), [0.0, -2.0]));
        assert!(close(polar.project(270.0, 1.0), [-1.0, 0.0]));
    }

    #[test]
    fn test_cartesian_identity() {
        assert_eq!(Projection::Cartesian.project(3.5, -2.0), [3.5, -2.0]);
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.8), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn test_polar_grid_layout() {
        let grid = polar_grid(10.0);
        let spokes = grid
            .iter()
            .filter(|p| matches!(p, Primitive::Polyline { points, .. } if points.len() == 2))
            .count();
        let rings = grid
            .iter()
            .filter(|p| matches!(p, Primitive::Polyline { points, .. } if points.len() > 2))
            .count();
        assert_eq!(spokes, 24);
        // step 2 covers radius 10 in 5 rings
        assert_eq!(rings, 5);

        let labels: Vec<&str> = grid
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"0°"));
        assert!(labels.contains(&"345°"));
        assert!(labels.contains(&"10.0"));
    }
}
