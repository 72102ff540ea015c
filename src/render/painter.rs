//! Hands scene primitives to egui_plot

use super::scene::Primitive;
use eframe::egui::Stroke;
use egui_plot::{Line, MarkerShape, PlotPoint, PlotUi, Points, Polygon, Text};

/// Paint primitives in order; later primitives draw over earlier ones.
/// Unnamed primitives stay out of the legend.
pub fn paint<'a>(plot_ui: &mut PlotUi, primitives: impl IntoIterator<Item = &'a Primitive>) {
    profiling::scope!("paint");

    for primitive in primitives {
        match primitive {
            Primitive::Polyline {
                name,
                points,
                color,
                width,
            } => {
                plot_ui.line(
                    Line::new(name.clone().unwrap_or_default(), points.clone())
                        .color(*color)
                        .width(*width),
                );
            }
            Primitive::Markers {
                name,
                points,
                color,
                radius,
            } => {
                plot_ui.points(
                    Points::new(name.clone().unwrap_or_default(), points.clone())
                        .shape(MarkerShape::Cross)
                        .radius(*radius)
                        .color(*color),
                );
            }
            Primitive::Polygon { points, fill } => {
                plot_ui.polygon(
                    Polygon::new("", points.clone())
                        .fill_color(*fill)
                        .stroke(Stroke::new(1.0, *fill)),
                );
            }
            Primitive::Text {
                position,
                text,
                color,
            } => {
                plot_ui.text(
                    Text::new("", PlotPoint::new(position[0], position[1]), text.as_str())
                        .color(*color),
                );
            }
        }
    }
}
