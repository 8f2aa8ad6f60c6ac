use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{SolarClass, SolarDataset, SolarRecord};

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

/// Fixed marker colour per solar class.
pub fn solar_class_color(class: SolarClass) -> Color32 {
    match class {
        SolarClass::High => Color32::from_rgb(0xe7, 0x4c, 0x3c),
        SolarClass::Medium => Color32::from_rgb(0xf3, 0x9c, 0x12),
        SolarClass::Low => Color32::from_rgb(0xf1, 0xc4, 0x0f),
        SolarClass::Unknown => UNKNOWN_COLOR,
    }
}

const UNKNOWN_COLOR: Color32 = Color32::from_rgb(0x95, 0xa5, 0xa6);

// ---------------------------------------------------------------------------
// Color mapping: record → Color32
// ---------------------------------------------------------------------------

/// Which record attribute drives marker colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBy {
    #[default]
    SolarClass,
    Region,
}

impl ColorBy {
    pub const ALL: [ColorBy; 2] = [ColorBy::SolarClass, ColorBy::Region];

    pub fn label(&self) -> &'static str {
        match self {
            ColorBy::SolarClass => "Solar class",
            ColorBy::Region => "Region",
        }
    }
}

/// Maps the values of the chosen attribute to marker colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub color_by: ColorBy,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(ColorBy::SolarClass, &SolarDataset::default())
    }
}

impl ColorMap {
    /// Build a colour map for `color_by` over the dataset's values.
    pub fn new(color_by: ColorBy, dataset: &SolarDataset) -> Self {
        let mapping: BTreeMap<String, Color32> = match color_by {
            ColorBy::SolarClass => SolarClass::ALL
                .into_iter()
                .map(|c| (c.to_string(), solar_class_color(c)))
                .collect(),
            ColorBy::Region => {
                let palette = generate_palette(dataset.regions.len());
                dataset
                    .regions
                    .iter()
                    .zip(palette)
                    .map(|(region, c)| (region.clone(), c))
                    .collect()
            }
        };

        ColorMap {
            color_by,
            mapping,
            default_color: UNKNOWN_COLOR,
        }
    }

    /// Look up the colour for a record.
    pub fn color_for(&self, record: &SolarRecord) -> Color32 {
        let key = match self.color_by {
            ColorBy::SolarClass => record.solar_class.as_str(),
            ColorBy::Region => record.region.as_str(),
        };
        self.mapping
            .get(key)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.clone(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    #[test]
    fn test_palette_size_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_solar_class_colors() {
        let map = ColorMap::default();
        let high = record("A", SolarClass::High, 3.0);
        let unknown = record("B", SolarClass::Unknown, 3.0);
        assert_eq!(map.color_for(&high), Color32::from_rgb(0xe7, 0x4c, 0x3c));
        assert_eq!(map.color_for(&unknown), Color32::from_rgb(0x95, 0xa5, 0xa6));
        assert_eq!(map.legend_entries().len(), 4);
    }

    #[test]
    fn test_region_colors() {
        let mut a = record("A", SolarClass::High, 3.0);
        a.region = "North".to_string();
        let mut b = record("B", SolarClass::High, 3.0);
        b.region = "South".to_string();
        let ds = SolarDataset::from_records(vec![a.clone(), b.clone()]);

        let map = ColorMap::new(ColorBy::Region, &ds);
        assert_eq!(map.legend_entries().len(), 2);
        assert_ne!(map.color_for(&a), map.color_for(&b));

        let mut stranger = record("C", SolarClass::High, 3.0);
        stranger.region = "Elsewhere".to_string();
        assert_eq!(map.color_for(&stranger), UNKNOWN_COLOR);
    }
}
