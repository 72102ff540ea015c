//! Retained list of drawing primitives
//!
//! A [`Scene`] is what a redraw produces: plain data in plot coordinates that
//! the painter hands to egui_plot each frame. Keeping it separate from the
//! widget makes redraws deterministic and testable without a window.

use eframe::egui::Color32;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Connected line. Primitives sharing a `name` share one legend entry.
    Polyline {
        name: Option<String>,
        points: Vec<[f64; 2]>,
        color: Color32,
        width: f32,
    },
    /// Cross markers
    Markers {
        name: Option<String>,
        points: Vec<[f64; 2]>,
        color: Color32,
        radius: f32,
    },
    /// Filled closed shape
    Polygon {
        points: Vec<[f64; 2]>,
        fill: Color32,
    },
    Text {
        position: [f64; 2],
        text: String,
        color: Color32,
    },
}

impl Primitive {
    /// Number of vertices, zero for text
    pub fn point_count(&self) -> usize {
        match self {
            Primitive::Polyline { points, .. }
            | Primitive::Markers { points, .. }
            | Primitive::Polygon { points, .. } => points.len(),
            Primitive::Text { .. } => 0,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Primitive::Polyline { name, .. } | Primitive::Markers { name, .. } => name.as_deref(),
            Primitive::Polygon { .. } | Primitive::Text { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    legend: Vec<LegendEntry>,
    generation: u64,
}

impl Scene {
    /// Drop all primitives and legend entries and start a new generation
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.legend.clear();
        self.generation += 1;
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    /// Insert primitives underneath everything already in the scene
    pub fn prepend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.splice(0..0, primitives);
    }

    pub fn add_legend(&mut self, label: impl Into<String>, color: Color32) {
        self.legend.push(LegendEntry {
            label: label.into(),
            color,
        });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Legend in draw order. The on-screen legend is built by egui_plot from
    /// primitive names, and each entry here matches the first primitive
    /// carrying that name.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Number of times the scene has been cleared
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
