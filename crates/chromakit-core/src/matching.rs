//! Nearest entries of a caller-supplied named-color catalog.

use palette::color_difference::Ciede2000;
use palette::{FromColor, Lab, Srgb};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ColorError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub color: Color,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// How catalog distance is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance on 8-bit RGB.
    #[default]
    Rgb,
    /// CIEDE2000 ΔE on CIE Lab (D65).
    Ciede2000,
}

impl DistanceMetric {
    pub fn distance(self, a: Color, b: Color) -> f64 {
        match self {
            Self::Rgb => f64::from(a.distance_squared(b)).sqrt(),
            Self::Ciede2000 => f64::from(to_lab(a).difference(to_lab(b))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwatchMatch<'a> {
    pub entry: &'a CatalogEntry,
    pub distance: f64,
}

/// Closest entry by RGB distance. Ties go to the earlier entry.
///
/// # Errors
/// [`ColorError::EmptyCatalog`] when `catalog` is empty.
pub fn nearest(color: Color, catalog: &[CatalogEntry]) -> Result<&CatalogEntry> {
    let mut best: Option<(&CatalogEntry, u32)> = None;
    for entry in catalog {
        let d = color.distance_squared(entry.color);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((entry, d));
        }
    }
    best.map(|(entry, _)| entry).ok_or(ColorError::EmptyCatalog)
}

/// The `n` closest entries under `metric`, closest first.
///
/// Equal distances keep catalog order.
///
/// # Errors
/// [`ColorError::EmptyCatalog`] when `catalog` is empty.
pub fn nearest_n(
    color: Color,
    catalog: &[CatalogEntry],
    n: usize,
    metric: DistanceMetric,
) -> Result<Vec<SwatchMatch<'_>>> {
    if catalog.is_empty() {
        return Err(ColorError::EmptyCatalog);
    }
    let mut matches: Vec<SwatchMatch<'_>> = catalog
        .iter()
        .map(|entry| SwatchMatch {
            entry,
            distance: metric.distance(color, entry.color),
        })
        .collect();
    matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    matches.truncate(n);
    Ok(matches)
}

fn to_lab(color: Color) -> Lab {
    let srgb: Srgb<f32> = Srgb::new(color.r, color.g, color.b).into_format();
    Lab::from_color(srgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("Black", Color::BLACK),
            CatalogEntry::new("White", Color::WHITE),
            CatalogEntry::new("Red", Color::new(255, 0, 0)),
            CatalogEntry::new("Crimson", Color::new(220, 20, 60)),
            CatalogEntry::new("Navy", Color::new(0, 0, 128)),
        ]
    }

    #[test]
    fn test_nearest_exact_hit() {
        let cat = catalog();
        assert_eq!(nearest(Color::new(0, 0, 128), &cat).unwrap().name, "Navy");
    }

    #[test]
    fn test_nearest_tie_goes_to_first() {
        let cat = vec![
            CatalogEntry::new("Low", Color::new(10, 10, 10)),
            CatalogEntry::new("High", Color::new(30, 30, 30)),
        ];
        assert_eq!(nearest(Color::new(20, 20, 20), &cat).unwrap().name, "Low");
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(nearest(Color::BLACK, &[]), Err(ColorError::EmptyCatalog));
        assert!(matches!(
            nearest_n(Color::BLACK, &[], 3, DistanceMetric::Rgb),
            Err(ColorError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_nearest_n_orders_by_distance() {
        let cat = catalog();
        let matches = nearest_n(Color::new(240, 10, 30), &cat, 2, DistanceMetric::Rgb).unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.entry.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Crimson"]);
        assert!(matches[0].distance <= matches[1].distance);
    }

    #[test]
    fn test_nearest_n_larger_than_catalog() {
        let cat = catalog();
        let matches = nearest_n(Color::BLACK, &cat, 50, DistanceMetric::Ciede2000).unwrap();
        assert_eq!(matches.len(), cat.len());
        assert_eq!(matches[0].entry.name, "Black");
        assert!(matches[0].distance.abs() < EPSILON);
    }

    #[test]
    fn test_ciede2000_black_white() {
        let d = DistanceMetric::Ciede2000.distance(Color::BLACK, Color::WHITE);
        assert!((d - 100.0).abs() < 0.01, "{d}");
    }
}
