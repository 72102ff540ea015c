use super::projection::{polar_grid, Projection};
use super::scene::{Primitive, Scene};
use super::strategy::{render_data_line, render_model_line};
use crate::config::EngineConfig;
use crate::error::PlotError;
use crate::registry::{LineEntry, PlotRegistry};

/// Owns the scene for the main plot and rebuilds it from the registry
pub struct RenderSurface {
    scene: Scene,
    projection: Projection,
    config: EngineConfig,
}

impl RenderSurface {
    pub fn new(projection: Projection, config: EngineConfig) -> Self {
        Self {
            scene: Scene::default(),
            projection,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clear the scene and draw every entry in draw order.
    ///
    /// Statistics that could not be computed come back as warnings; the
    /// affected entries are drawn without their overlays.
    pub fn redraw(&mut self, registry: &PlotRegistry) -> Vec<PlotError> {
        profiling::scope!("RenderSurface::redraw");

        self.scene.clear();
        let mut warnings = Vec::new();

        for (index, entry) in registry.draw_order() {
            match entry {
                LineEntry::Data(line) => {
                    let line_warnings =
                        render_data_line(line, self.projection, &self.config, &mut self.scene);
                    for warning in &line_warnings {
                        log::warn!("line {} '{}': {}", index, line.label, warning);
                    }
                    warnings.extend(line_warnings);
                }
                LineEntry::Model(line) => match registry.model_range() {
                    Some(range) => render_model_line(
                        line,
                        range,
                        self.projection,
                        &self.config,
                        &mut self.scene,
                    ),
                    None => log::debug!("skipping model '{}' until a range exists", line.label),
                },
            }
        }

        if self.projection == Projection::Polar {
            let radius = max_radius(self.scene.primitives());
            self.scene.prepend(polar_grid(radius));
        }

        log::trace!(
            "redraw {} produced {} primitives",
            self.scene.generation(),
            self.scene.primitives().len()
        );
        warnings
    }
}

/// Furthest plotted point from the origin, 1.0 for an empty plot
fn max_radius(primitives: &[Primitive]) -> f64 {
    let radius = primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Polyline { points, .. } | Primitive::Markers { points, .. } => {
                Some(points)
            }
            Primitive::Polygon { .. } | Primitive::Text { .. } => None,
        })
        .flatten()
        .map(|[x, y]| x.hypot(*y))
        .fold(0.0, f64::max);
    if radius > 0.0 { radius } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::models::Model;
    use crate::registry::{DataLineOptions, RenderStrategy};
    use eframe::egui::Color32;

    fn series(xs: &[f64], ys: &[f64]) -> Series {
        Series::from_sections(vec![xs.to_vec()], vec![ys.to_vec()]).unwrap()
    }

    fn surface(projection: Projection) -> RenderSurface {
        RenderSurface::new(projection, EngineConfig::default())
    }

    #[test]
    fn test_legend_follows_draw_order() {
        let mut registry = PlotRegistry::default();
        registry.add_data_line(series(&[0.0, 1.0], &[0.0, 1.0]), DataLineOptions::new("first"), None);
        registry.add_data_line(
            series(&[0.0, 2.0], &[1.0, 0.0]),
            DataLineOptions::new("second").with_strategy(RenderStrategy::Line),
            None,
        );

        let mut surface = surface(Projection::Cartesian);
        assert!(surface.redraw(&registry).is_empty());
        let labels: Vec<&str> = surface.scene().legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);

        registry.move_line(0, crate::registry::Direction::Down);
        surface.redraw(&registry);
        let labels: Vec<&str> = surface.scene().legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["second", "first"]);
    }

    #[test]
    fn test_legend_matches_named_primitives() {
        let mut registry = PlotRegistry::default();
        registry.add_data_line(
            series(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 2.0, 5.0]),
            DataLineOptions::new("scatter")
                .with_best_fit(true)
                .with_correlation(true),
            None,
        );
        registry.add_data_line(
            series(&[0.0, 4.0], &[2.0, 2.5]),
            DataLineOptions::new("line").with_strategy(RenderStrategy::Line),
            None,
        );
        registry.add_model_line(Model::Quadratic, vec![1.0, 0.0, 0.0], None).unwrap();

        for projection in [Projection::Cartesian, Projection::Polar] {
            let mut surface = surface(projection);
            assert!(surface.redraw(&registry).is_empty());

            let mut named: Vec<(&str, Color32)> = Vec::new();
            for primitive in surface.scene().primitives() {
                let color = match primitive {
                    Primitive::Polyline { color, .. } | Primitive::Markers { color, .. } => *color,
                    Primitive::Polygon { .. } | Primitive::Text { .. } => continue,
                };
                if let Some(name) = primitive.name() {
                    if !named.iter().any(|(n, _)| *n == name) {
                        named.push((name, color));
                    }
                }
            }

            let legend: Vec<(&str, Color32)> = surface
                .scene()
                .legend()
                .iter()
                .map(|e| (e.label.as_str(), e.color))
                .collect();
            assert_eq!(legend, named);
            assert_eq!(legend.len(), 4);
        }
    }

    #[test]
    fn test_redraw_is_deterministic() {
        let mut registry = PlotRegistry::default();
        registry.add_data_line(
            series(&[0.0, 1.0, 2.0], &[1.0, 3.0, 2.0]),
            DataLineOptions::new("d").with_best_fit(true),
            None,
        );
        let mut surface = surface(Projection::Cartesian);
        surface.redraw(&registry);
        let first = surface.scene().primitives().to_vec();
        let generation = surface.scene().generation();

        surface.redraw(&registry);
        assert_eq!(surface.scene().primitives(), first.as_slice());
        assert_eq!(surface.scene().generation(), generation + 1);
    }

    #[test]
    fn test_model_waits_for_range() {
        let mut registry = PlotRegistry::default();
        registry.add_model_line(Model::Linear, vec![1.0, 0.0], None).unwrap();

        let mut surface = surface(Projection::Cartesian);
        surface.redraw(&registry);
        assert!(surface.scene().is_empty());

        registry.add_data_line(series(&[-1.0, 1.0], &[0.0, 0.0]), DataLineOptions::new("d"), None);
        surface.redraw(&registry);
        let model_points: usize = surface
            .scene()
            .primitives()
            .iter()
            .filter(|p| p.name() == Some("y = 1.0x + 0.0"))
            .map(Primitive::point_count)
            .sum();
        assert_eq!(model_points, EngineConfig::default().model_samples);
    }

    #[test]
    fn test_degenerate_statistics_are_warnings() {
        let mut registry = PlotRegistry::default();
        registry.add_data_line(
            series(&[2.0, 2.0], &[1.0, 5.0]),
            DataLineOptions::new("flat").with_best_fit(true),
            None,
        );
        let mut surface = surface(Projection::Cartesian);
        let warnings = surface.redraw(&registry);
        assert_eq!(warnings.len(), 1);
        assert_eq!(surface.scene().legend().len(), 1);
    }

    #[test]
    fn test_polar_adds_grid_underneath() {
        let mut registry = PlotRegistry::default();
        registry.add_data_line(series(&[0.0, 90.0], &[3.0, 4.0]), DataLineOptions::new("d"), None);

        let mut surface = surface(Projection::Polar);
        surface.redraw(&registry);
        let primitives = surface.scene().primitives();
        assert!(primitives.len() > 1);
        assert!(matches!(
            primitives.last(),
            Some(Primitive::Markers { points, .. }) if (points[1][0] - 4.0).abs() < 1e-9
        ));
        assert!(primitives[0].name().is_none());
    }

    #[test]
    fn test_empty_registry_clears_scene() {
        let mut registry = PlotRegistry::default();
        registry.add_data_line(series(&[0.0], &[0.0]), DataLineOptions::new("d"), None);
        let mut surface = surface(Projection::Cartesian);
        surface.redraw(&registry);
        assert!(!surface.scene().is_empty());

        registry.clear();
        surface.redraw(&registry);
        assert!(surface.scene().is_empty());
        assert!(surface.scene().legend().is_empty());
    }
}
