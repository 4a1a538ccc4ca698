//! Wrap material catalog.
//!
//! Materials arrive as already-validated records from the host (the shop's
//! product catalog); this module only parses them and answers lookups.
//! Numeric fields are sanitized at shading time, not here, so a degenerate
//! record can never fail catalog loading.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Finish category of a wrap film. Shading behavior is entirely determined
/// by this category plus the numeric fields on [`WrapMaterial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Gloss,
    Matte,
    Satin,
    Chrome,
    Carbon,
    ColorShift,
    Ppf,
}

impl MaterialCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gloss => "Gloss",
            Self::Matte => "Matte",
            Self::Satin => "Satin",
            Self::Chrome => "Chrome",
            Self::Carbon => "Carbon Fiber",
            Self::ColorShift => "Color Shift",
            Self::Ppf => "Paint Protection Film",
        }
    }
}

/// One wrap film finish, renderer-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapMaterial {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: MaterialCategory,
    /// Primary color, linear RGB 0-1.
    pub color: [f32; 3],
    /// Second color for color-shift films (viewed off-angle).
    #[serde(default)]
    pub secondary_color: Option<[f32; 3]>,
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default)]
    pub metalness: f32,
    #[serde(default)]
    pub clearcoat: Option<f32>,
    #[serde(default)]
    pub clearcoat_roughness: Option<f32>,
    /// Multiplier on environment reflections.
    #[serde(default)]
    pub env_reflectivity: Option<f32>,
    /// Film opacity for PPF materials.
    #[serde(default)]
    pub ppf_opacity: Option<f32>,
}

fn default_roughness() -> f32 {
    0.5
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The set of wrap materials offered to the configurator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialCatalog {
    materials: Vec<WrapMaterial>,
}

impl MaterialCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The catalog embedded in the binary, used when the host supplies none.
    pub fn built_in() -> Self {
        const BUILT_IN: &str = include_str!("../../assets/catalog.json");
        match Self::from_json_str(BUILT_IN) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("Built-in catalog failed to parse: {err}");
                Self::default()
            }
        }
    }

    pub fn materials(&self) -> &[WrapMaterial] {
        &self.materials
    }

    pub fn find(&self, id: &str) -> Option<&WrapMaterial> {
        self.materials.iter().find(|material| material.id == id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_catalog_parses() {
        let catalog = MaterialCatalog::built_in();
        assert!(!catalog.is_empty());
        // Every category the renderer branches on should be represented.
        for category in [
            MaterialCategory::Gloss,
            MaterialCategory::Matte,
            MaterialCategory::Satin,
            MaterialCategory::Chrome,
            MaterialCategory::Carbon,
            MaterialCategory::ColorShift,
            MaterialCategory::Ppf,
        ] {
            assert!(
                catalog
                    .materials()
                    .iter()
                    .any(|material| material.category == category),
                "missing category {category:?}"
            );
        }
    }

    #[test]
    fn find_returns_matching_record() {
        let catalog = MaterialCatalog::built_in();
        let first = &catalog.materials()[0];
        let found = catalog.find(&first.id).unwrap();
        assert_eq!(found.id, first.id);
        assert!(catalog.find("no-such-material").is_none());
    }

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{
            "materials": [{
                "id": "m1",
                "name": "Test Gloss",
                "brand": "Test",
                "category": "gloss",
                "color": [1.0, 0.0, 0.0]
            }]
        }"#;
        let catalog = MaterialCatalog::from_json_str(json).unwrap();
        let material = &catalog.materials()[0];
        assert_eq!(material.category, MaterialCategory::Gloss);
        assert!(material.secondary_color.is_none());
        assert!(material.clearcoat.is_none());
        assert!(material.ppf_opacity.is_none());
        assert_eq!(material.metalness, 0.0);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let json = r#"{
            "materials": [{
                "id": "m1",
                "name": "Bad",
                "brand": "Test",
                "category": "velvet",
                "color": [1.0, 0.0, 0.0]
            }]
        }"#;
        assert!(MaterialCatalog::from_json_str(json).is_err());
    }
}
