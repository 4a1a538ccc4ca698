//! Wrap material → surface shading mapping.
//!
//! Pure translation from an abstract [`WrapMaterial`] record (or none) plus
//! the panel's interaction flags into the parameters the rasterizer shades
//! with. Every branch keys off the material category; malformed numeric
//! fields fall back to category defaults here so degenerate catalog records
//! never reach the rasterizer.

use crate::catalog::{MaterialCategory, WrapMaterial};
use glam::Vec3;

/// Neutral body color shown before any material is applied.
const DEFAULT_BODY_COLOR: Vec3 = Vec3::new(0.62, 0.64, 0.66);
/// PPF reads as clear film over paint; its own color never shows.
const PPF_FILM_COLOR: Vec3 = Vec3::new(0.9, 0.9, 0.92);

/// Emissive overlay for the selected panel.
const SELECTED_EMISSIVE: Vec3 = Vec3::new(0.05, 0.12, 0.45);
/// Weaker, darker overlay for the hovered panel.
const HOVERED_EMISSIVE: Vec3 = Vec3::new(0.02, 0.05, 0.2);

/// Renderer-native description of one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceShading {
    pub base_color: Vec3,
    /// Off-angle color for color-shift films.
    pub shift_color: Option<Vec3>,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    /// Multiplier on environment reflections.
    pub env_strength: f32,
    pub emissive: Vec3,
    pub opacity: f32,
}

impl SurfaceShading {
    /// Shading of a panel that never had a material applied.
    pub fn neutral() -> Self {
        Self {
            base_color: DEFAULT_BODY_COLOR,
            shift_color: None,
            roughness: 0.4,
            metalness: 0.6,
            clearcoat: 0.4,
            clearcoat_roughness: 0.1,
            env_strength: 1.0,
            emissive: Vec3::ZERO,
            opacity: 1.0,
        }
    }

    /// Flat-tinted trim (wheels, glass).
    pub fn trim(tint: Vec3, roughness: f32) -> Self {
        Self {
            base_color: tint,
            shift_color: None,
            roughness,
            metalness: 0.2,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            env_strength: 0.6,
            emissive: Vec3::ZERO,
            opacity: 1.0,
        }
    }
}

/// Clamp a catalog value to 0-1, substituting `fallback` when the record
/// carries garbage (NaN/infinite).
fn sane01(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn sane01_opt(value: Option<f32>, fallback: f32) -> f32 {
    value.map_or(fallback, |v| sane01(v, fallback))
}

/// Environment multipliers may exceed 1; only garbage is replaced.
fn sane_mult(value: Option<f32>, fallback: f32) -> f32 {
    value.map_or(fallback, |v| {
        if v.is_finite() {
            v.clamp(0.0, 4.0)
        } else {
            fallback
        }
    })
}

fn color(rgb: [f32; 3]) -> Vec3 {
    Vec3::new(
        sane01(rgb[0], 0.5),
        sane01(rgb[1], 0.5),
        sane01(rgb[2], 0.5),
    )
}

/// Resolve one surface's shading. `None` yields the neutral default.
/// Selection always beats hover: a selected panel keeps the selection
/// overlay no matter what the pointer does.
pub fn resolve(material: Option<&WrapMaterial>, selected: bool, hovered: bool) -> SurfaceShading {
    let mut shading = match material {
        Some(material) => resolve_material(material),
        None => SurfaceShading::neutral(),
    };
    if selected {
        shading.emissive += SELECTED_EMISSIVE;
    } else if hovered {
        shading.emissive += HOVERED_EMISSIVE;
    }
    shading
}

fn resolve_material(material: &WrapMaterial) -> SurfaceShading {
    let base_color = color(material.color);
    match material.category {
        // Standard films: parameters come from the record; clearcoat is
        // defaulted per finish when the record omits it.
        MaterialCategory::Gloss => SurfaceShading {
            base_color,
            shift_color: None,
            roughness: sane01(material.roughness, 0.1),
            metalness: sane01(material.metalness, 0.1),
            clearcoat: sane01_opt(material.clearcoat, 1.0),
            clearcoat_roughness: sane01_opt(material.clearcoat_roughness, 0.05),
            env_strength: sane_mult(material.env_reflectivity, 1.0),
            emissive: Vec3::ZERO,
            opacity: 1.0,
        },
        MaterialCategory::Satin => SurfaceShading {
            base_color,
            shift_color: None,
            roughness: sane01(material.roughness, 0.4),
            metalness: sane01(material.metalness, 0.2),
            clearcoat: sane01_opt(material.clearcoat, 0.5),
            clearcoat_roughness: sane01_opt(material.clearcoat_roughness, 0.2),
            env_strength: sane_mult(material.env_reflectivity, 1.0),
            emissive: Vec3::ZERO,
            opacity: 1.0,
        },
        MaterialCategory::Matte => SurfaceShading {
            base_color,
            shift_color: None,
            roughness: sane01(material.roughness, 0.8),
            metalness: sane01(material.metalness, 0.0),
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            env_strength: sane_mult(material.env_reflectivity, 0.5),
            emissive: Vec3::ZERO,
            opacity: 1.0,
        },
        // Mirror film: the record's roughness is ignored beyond a floor.
        MaterialCategory::Chrome => SurfaceShading {
            base_color,
            shift_color: None,
            roughness: sane01(material.roughness, 0.02).min(0.05),
            metalness: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            env_strength: sane_mult(material.env_reflectivity, 1.0).max(1.0) * 1.5,
            emissive: Vec3::ZERO,
            opacity: 1.0,
        },
        MaterialCategory::Carbon => SurfaceShading {
            base_color,
            shift_color: None,
            roughness: sane01(material.roughness, 0.35).max(0.25),
            metalness: sane01(material.metalness, 0.05).min(0.1),
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            env_strength: sane_mult(material.env_reflectivity, 0.7),
            emissive: Vec3::ZERO,
            opacity: 1.0,
        },
        MaterialCategory::ColorShift => SurfaceShading {
            base_color,
            shift_color: Some(material.secondary_color.map_or(base_color, color)),
            roughness: sane01(material.roughness, 0.12).min(0.3),
            metalness: sane01(material.metalness, 0.5),
            clearcoat: sane01_opt(material.clearcoat, 0.8),
            clearcoat_roughness: sane01_opt(material.clearcoat_roughness, 0.08),
            env_strength: sane_mult(material.env_reflectivity, 1.0).max(1.0) * 1.25,
            emissive: Vec3::ZERO,
            opacity: 1.0,
        },
        // Clear film over existing paint: fixed neutral color, thin
        // clearcoat, mostly transmissive.
        MaterialCategory::Ppf => SurfaceShading {
            base_color: PPF_FILM_COLOR,
            shift_color: None,
            roughness: sane01(material.roughness, 0.08),
            metalness: 0.0,
            clearcoat: 0.3,
            clearcoat_roughness: 0.05,
            env_strength: sane_mult(material.env_reflectivity, 0.8),
            emissive: Vec3::ZERO,
            opacity: sane01_opt(material.ppf_opacity, 0.15),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(category: MaterialCategory) -> WrapMaterial {
        WrapMaterial {
            id: "test".into(),
            name: "Test".into(),
            brand: "Test".into(),
            category,
            color: [0.8, 0.1, 0.1],
            secondary_color: None,
            roughness: 0.5,
            metalness: 0.5,
            clearcoat: None,
            clearcoat_roughness: None,
            env_reflectivity: None,
            ppf_opacity: None,
        }
    }

    #[test]
    fn no_material_yields_the_neutral_default() {
        let shading = resolve(None, false, false);
        assert_eq!(shading, SurfaceShading::neutral());
    }

    #[test]
    fn chrome_is_distinct_from_matte() {
        let chrome = resolve(Some(&material(MaterialCategory::Chrome)), false, false);
        let matte = resolve(Some(&material(MaterialCategory::Matte)), false, false);
        assert!(chrome.roughness <= 0.05);
        assert!((chrome.metalness - 1.0).abs() < 1e-6);
        assert!(matte.roughness > chrome.roughness);
        assert!(matte.metalness < chrome.metalness);
        assert!(chrome.env_strength > matte.env_strength);
    }

    #[test]
    fn gloss_defaults_a_strong_clearcoat() {
        let gloss = resolve(Some(&material(MaterialCategory::Gloss)), false, false);
        assert!((gloss.clearcoat - 1.0).abs() < 1e-6);
        let matte = resolve(Some(&material(MaterialCategory::Matte)), false, false);
        assert_eq!(matte.clearcoat, 0.0);
    }

    #[test]
    fn record_clearcoat_overrides_the_default() {
        let mut record = material(MaterialCategory::Gloss);
        record.clearcoat = Some(0.3);
        let shading = resolve(Some(&record), false, false);
        assert!((shading.clearcoat - 0.3).abs() < 1e-6);
    }

    #[test]
    fn ppf_ignores_its_own_color_and_defaults_opacity_low() {
        let mut record = material(MaterialCategory::Ppf);
        record.color = [1.0, 0.0, 0.0];
        let shading = resolve(Some(&record), false, false);
        assert_eq!(shading.base_color, PPF_FILM_COLOR);
        assert!(shading.opacity < 0.5);
    }

    #[test]
    fn color_shift_falls_back_to_primary_without_secondary() {
        let mut record = material(MaterialCategory::ColorShift);
        let plain = resolve(Some(&record), false, false);
        assert_eq!(plain.shift_color, Some(plain.base_color));
        record.secondary_color = Some([0.0, 0.8, 0.2]);
        let shifted = resolve(Some(&record), false, false);
        assert_ne!(shifted.shift_color, Some(shifted.base_color));
    }

    #[test]
    fn selection_beats_hover() {
        let record = material(MaterialCategory::Gloss);
        let selected = resolve(Some(&record), true, false);
        let both = resolve(Some(&record), true, true);
        let hovered = resolve(Some(&record), false, true);
        let plain = resolve(Some(&record), false, false);
        assert_eq!(selected.emissive, both.emissive);
        assert!(hovered.emissive.length() < selected.emissive.length());
        assert!(hovered.emissive.length() > 0.0);
        assert_eq!(plain.emissive, Vec3::ZERO);
    }

    #[test]
    fn garbage_numerics_fall_back_to_category_defaults() {
        let mut record = material(MaterialCategory::Gloss);
        record.roughness = f32::NAN;
        record.metalness = f32::INFINITY;
        record.color = [f32::NAN, 2.0, -1.0];
        let shading = resolve(Some(&record), false, false);
        assert!((shading.roughness - 0.1).abs() < 1e-6);
        assert!((shading.metalness - 0.1).abs() < 1e-6);
        assert!(shading.base_color.is_finite());
        assert!(shading.base_color.max_element() <= 1.0);
        assert!(shading.base_color.min_element() >= 0.0);
    }
}
