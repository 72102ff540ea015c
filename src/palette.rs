//! Line colours
//!
//! Every line carries a primary colour (points, data lines, model curves) and
//! a secondary colour (line of best fit). New lines take the next pair from
//! the palette through an explicit [`PaletteCursor`].

use crate::error::{PlotError, Result};
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// Which colour of a pair to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Primary,
    Secondary,
}

/// A validated `(primary, secondary)` hex colour pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct ColorPair {
    primary: String,
    secondary: String,
}

impl ColorPair {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Result<Self> {
        let primary = normalize_hex(primary.into())?;
        let secondary = normalize_hex(secondary.into())?;
        Ok(Self { primary, secondary })
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    pub fn get(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Primary => &self.primary,
            ColorSlot::Secondary => &self.secondary,
        }
    }

    /// Replace one colour, leaving the other untouched
    pub fn set(&mut self, slot: ColorSlot, hex: &str) -> Result<()> {
        let hex = normalize_hex(hex.to_string())?;
        match slot {
            ColorSlot::Primary => self.primary = hex,
            ColorSlot::Secondary => self.secondary = hex,
        }
        Ok(())
    }

    pub fn primary_color(&self) -> Color32 {
        parse_hex(&self.primary)
    }

    pub fn secondary_color(&self) -> Color32 {
        parse_hex(&self.secondary)
    }
}

impl TryFrom<(String, String)> for ColorPair {
    type Error = PlotError;

    fn try_from((primary, secondary): (String, String)) -> Result<Self> {
        ColorPair::new(primary, secondary)
    }
}

impl From<ColorPair> for (String, String) {
    fn from(pair: ColorPair) -> Self {
        (pair.primary, pair.secondary)
    }
}

fn normalize_hex(hex: String) -> Result<String> {
    let trimmed = hex.trim();
    match Color32::from_hex(trimmed) {
        Ok(_) => Ok(trimmed.to_ascii_lowercase()),
        Err(_) => Err(PlotError::InvalidColor(hex)),
    }
}

// Only called on strings that already passed `normalize_hex`.
fn parse_hex(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

/// Format a colour as `#rrggbb`, dropping alpha
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Ordered list of colour pairs consumed round-robin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPalette")]
pub struct Palette {
    pairs: Vec<ColorPair>,
}

#[derive(Deserialize)]
struct RawPalette {
    pairs: Vec<ColorPair>,
}

impl From<RawPalette> for Palette {
    fn from(raw: RawPalette) -> Self {
        Palette::new(raw.pairs)
    }
}

impl Palette {
    /// Build a palette; an empty list falls back to the default palette
    pub fn new(pairs: Vec<ColorPair>) -> Self {
        if pairs.is_empty() {
            Self::default()
        } else {
            Self { pairs }
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> &ColorPair {
        &self.pairs[index % self.pairs.len()]
    }
}

const DEFAULT_PAIRS: [(&str, &str); 12] = [
    ("#0d00c9", "#084eff"), // Blue
    ("#9c0505", "#ed2828"), // Red
    ("#005201", "#009402"), // Green
    ("#b89000", "#edbc09"), // Yellow
    ("#4f008c", "#7400cc"), // Purple
    ("#006ea6", "#008fd6"), // Light Blue
    ("#91017e", "#d104b6"), // Magenta
    ("#04b506", "#0af20d"), // Light Green
    ("#000000", "#242424"), // Black
    ("#d45998", "#ff7dc0"), // Pink
    ("#ad4200", "#ff6200"), // Orange
    ("#4f4f4f", "#828282"), // Grey
];

impl Default for Palette {
    fn default() -> Self {
        let pairs = DEFAULT_PAIRS
            .iter()
            .map(|(primary, secondary)| ColorPair {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
            })
            .collect();
        Self { pairs }
    }
}

/// Position in the palette for the next automatic colour pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteCursor(usize);

impl PaletteCursor {
    pub fn position(&self) -> usize {
        self.0
    }

    /// Take the current pair and advance
    pub fn next_pair(&mut self, palette: &Palette) -> ColorPair {
        let pair = palette.get(self.0).clone();
        self.0 = (self.0 + 1) % palette.len();
        pair
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
