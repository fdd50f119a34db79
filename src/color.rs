use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: cluster id → Color32
// ---------------------------------------------------------------------------

/// Maps the clusters of one label vector to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<i64, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the cluster ids of one label vector.
    pub fn new(clusters: &BTreeSet<i64>) -> Self {
        let palette = generate_palette(clusters.len());
        let mapping: BTreeMap<i64, Color32> = clusters.iter().copied().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given cluster.
    pub fn color_for(&self, cluster: i64) -> Color32 {
        self.mapping
            .get(&cluster)
            .copied()
            .unwrap_or(self.default_color)
    }
}
