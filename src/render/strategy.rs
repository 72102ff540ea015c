//! Per-entry render strategies
//!
//! Each function turns one registry entry into primitives and legend entries
//! on a [`Scene`]. Statistics failures are returned to the caller; the entry
//! itself is still drawn.

use super::projection::Projection;
use super::scene::{Primitive, Scene};
use crate::config::EngineConfig;
use crate::constants::plot::{CORRELATION_DIGITS, FIT_LABEL_DIGITS, LINE_WIDTH};
use crate::constants::scatter::MARKER_RADIUS;
use crate::data::stats::{best_fit, correlation};
use crate::data::{smooth, Series};
use crate::error::{PlotError, Result};
use crate::models::linspace;
use crate::registry::{AxisRange, DataLine, ModelLine, RenderStrategy};

/// Draw a data line with its optional overlays. Returns statistics warnings.
pub fn render_data_line(
    line: &DataLine,
    projection: Projection,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Vec<PlotError> {
    let mut warnings = Vec::new();

    let smoothed;
    let series = match line.strategy {
        RenderStrategy::SmoothedLine => match smooth(&line.series, &config.smoothing) {
            Ok(series) => {
                smoothed = series;
                &smoothed
            }
            Err(e) => {
                warnings.push(e);
                &line.series
            }
        },
        RenderStrategy::Scatter | RenderStrategy::Line => &line.series,
    };

    let xs = series.flat_x();
    let ys = series.flat_y();

    let mut label = line.label.clone();
    if line.show_correlation {
        match correlation(&xs, &ys) {
            Ok(stats) => label.push_str(&stats.annotation(CORRELATION_DIGITS)),
            Err(e) => warnings.push(e),
        }
    }

    let primary = line.colors.primary_color();
    match line.strategy {
        RenderStrategy::Scatter => {
            let color = primary.gamma_multiply(config.scatter.alpha_for(xs.len()));
            scene.push(Primitive::Markers {
                name: Some(label.clone()),
                points: projection.project_all(&xs, &ys),
                color,
                radius: MARKER_RADIUS,
            });
            scene.add_legend(label, color);
        }
        RenderStrategy::Line | RenderStrategy::SmoothedLine => {
            scene.extend(sections_as_polylines(series, &label, primary, projection));
            scene.add_legend(label, primary);
        }
    }

    if line.show_best_fit {
        if let Err(e) = overlay_best_fit(line, &xs, &ys, projection, config, scene) {
            warnings.push(e);
        }
    }

    warnings
}

/// One polyline per section, all under the same legend name
fn sections_as_polylines(
    series: &Series,
    label: &str,
    color: eframe::egui::Color32,
    projection: Projection,
) -> Vec<Primitive> {
    series
        .sections()
        .map(|(xs, ys)| Primitive::Polyline {
            name: Some(label.to_string()),
            points: projection.project_all(xs, ys),
            color,
            width: LINE_WIDTH,
        })
        .collect()
}

fn overlay_best_fit(
    line: &DataLine,
    xs: &[f64],
    ys: &[f64],
    projection: Projection,
    config: &EngineConfig,
    scene: &mut Scene,
) -> Result<()> {
    let fit = best_fit(xs, ys)?;
    let (min, max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));

    // A straight line bends under the polar mapping, so sample it densely
    let fit_xs = match projection {
        Projection::Cartesian => vec![min, max],
        Projection::Polar => linspace(min, max, config.polar_fit_samples),
    };
    let points = fit_xs
        .iter()
        .map(|&x| projection.project(x, fit.at(x)))
        .collect();

    let label = fit.label(FIT_LABEL_DIGITS);
    let color = line.colors.secondary_color();
    scene.push(Primitive::Polyline {
        name: Some(label.clone()),
        points,
        color,
        width: LINE_WIDTH,
    });
    scene.add_legend(label, color);
    Ok(())
}

/// Draw a model curve over `range`, breaking it wherever it is not finite
pub fn render_model_line(
    line: &ModelLine,
    range: AxisRange,
    projection: Projection,
    config: &EngineConfig,
    scene: &mut Scene,
) {
    let (xs, ys) = line.generate(range.min, range.max, config.model_samples);
    let color = line.colors.primary_color();

    let mut run: Vec<[f64; 2]> = Vec::new();
    let mut runs = Vec::new();
    for (&x, &y) in xs.iter().zip(&ys) {
        if y.is_finite() {
            run.push(projection.project(x, y));
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }

    for points in runs {
        scene.push(Primitive::Polyline {
            name: Some(line.label.clone()),
            points,
            color,
            width: LINE_WIDTH,
        });
    }
    scene.add_legend(line.label.clone(), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Model;
    use crate::palette::ColorPair;

    fn data_line(xs: Vec<Vec<f64>>, ys: Vec<Vec<f64>>, strategy: RenderStrategy) -> DataLine {
        DataLine {
            series: Series::from_sections(xs, ys).unwrap(),
            label: "data".to_string(),
            strategy,
            show_best_fit: false,
            show_correlation: false,
            colors: ColorPair::new("#0d00c9", "#084eff").unwrap(),
        }
    }

    #[test]
    fn test_line_keeps_sections_apart() {
        let line = data_line(
            vec![vec![0.0, 1.0], vec![5.0, 6.0, 7.0]],
            vec![vec![0.0, 1.0], vec![5.0, 6.0, 7.0]],
            RenderStrategy::Line,
        );
        let mut scene = Scene::default();
        let warnings =
            render_data_line(&line, Projection::Cartesian, &EngineConfig::default(), &mut scene);
        assert!(warnings.is_empty());

        let counts: Vec<usize> = scene.primitives().iter().map(Primitive::point_count).collect();
        assert_eq!(counts, vec![2, 3]);
        assert_eq!(scene.legend().len(), 1);
    }

    #[test]
    fn test_scatter_alpha_falls_with_density() {
        let config = EngineConfig::default();
        let alpha = |n: usize| {
            let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let line = data_line(vec![xs.clone()], vec![xs], RenderStrategy::Scatter);
            let mut scene = Scene::default();
            render_data_line(&line, Projection::Cartesian, &config, &mut scene);
            match &scene.primitives()[0] {
                Primitive::Markers { color, .. } => color.a(),
                other => panic!("unexpected primitive {:?}", other),
            }
        };
        let sparse = alpha(10);
        let dense = alpha(100);
        let very_dense = alpha(400);
        assert_eq!(sparse, 255);
        assert!(dense < sparse);
        assert!(very_dense < dense);
    }

    #[test]
    fn test_best_fit_and_correlation_overlays() {
        let mut line = data_line(
            vec![vec![0.0, 1.0, 2.0, 3.0]],
            vec![vec![3.0, 5.0, 7.0, 9.0]],
            RenderStrategy::Scatter,
        );
        line.show_best_fit = true;
        line.show_correlation = true;

        let mut scene = Scene::default();
        let warnings =
            render_data_line(&line, Projection::Cartesian, &EngineConfig::default(), &mut scene);
        assert!(warnings.is_empty());

        let legend: Vec<&str> = scene.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(legend.len(), 2);
        assert!(legend[0].starts_with("data\nr = 1.0, p = "));
        assert_eq!(legend[1], "y = 2.0x + 3.0");

        match &scene.primitives()[1] {
            Primitive::Polyline { points, .. } => {
                assert_eq!(points.len(), 2);
                assert!((points[0][1] - 3.0).abs() < 1e-9);
                assert!((points[1][1] - 9.0).abs() < 1e-9);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_polar_best_fit_is_sampled() {
        let mut line = data_line(
            vec![vec![0.0, 90.0, 180.0]],
            vec![vec![1.0, 2.0, 3.0]],
            RenderStrategy::Scatter,
        );
        line.show_best_fit = true;
        let config = EngineConfig::default();

        let mut scene = Scene::default();
        render_data_line(&line, Projection::Polar, &config, &mut scene);
        assert_eq!(scene.primitives()[1].point_count(), config.polar_fit_samples);
    }

    #[test]
    fn test_degenerate_fit_still_draws_points() {
        let mut line = data_line(
            vec![vec![1.0, 1.0, 1.0]],
            vec![vec![1.0, 2.0, 3.0]],
            RenderStrategy::Scatter,
        );
        line.show_best_fit = true;
        line.show_correlation = true;

        let mut scene = Scene::default();
        let warnings =
            render_data_line(&line, Projection::Cartesian, &EngineConfig::default(), &mut scene);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| matches!(w, PlotError::DegenerateFit)));
        assert_eq!(scene.primitives().len(), 1);
        assert_eq!(scene.legend()[0].label, "data");
    }

    #[test]
    fn test_model_curve_breaks_at_non_finite() {
        let line = ModelLine {
            label: "curve".to_string(),
            model: Model::Exponential,
            parameters: vec![1.0, 0.0, 0.0],
            colors: ColorPair::new("#000000", "#242424").unwrap(),
        };
        let config = EngineConfig {
            model_samples: 5,
            ..EngineConfig::default()
        };
        let mut scene = Scene::default();
        // 0^x is infinite for negative x
        let range = AxisRange::new(-2.0, 2.0).unwrap();
        render_model_line(&line, range, Projection::Cartesian, &config, &mut scene);

        let total: usize = scene.primitives().iter().map(Primitive::point_count).sum();
        assert_eq!(total, 3);
        assert_eq!(scene.legend().len(), 1);
    }
}
