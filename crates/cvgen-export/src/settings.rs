use cvgen_core::geometry::PageGeometry;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Capture at twice the surface resolution; screen-resolution captures print soft.
pub const DEFAULT_SCALE_FACTOR: f32 = 2.0;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

pub const DEFAULT_MAX_SECTION_ENTRIES: usize = 50;

/// Tunables for one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Rasterization scale relative to the surface's pixel size. Must be >= 1.
    pub scale_factor: f32,

    /// JPEG quality (1..=100) for page images embedded in the PDF.
    pub jpeg_quality: u8,

    /// Physical page the bitmap is sliced into.
    pub geometry: PageGeometry,

    /// PDF `/Title`.
    pub title: String,

    /// PDF `/Creator`.
    pub creator: String,

    /// Upper bound on entries rendered per structured section.
    pub max_section_entries: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            geometry: PageGeometry::A4,
            title: "Curriculum Vitae".to_string(),
            creator: "cvgen".to_string(),
            max_section_entries: DEFAULT_MAX_SECTION_ENTRIES,
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.scale_factor.is_finite() || self.scale_factor < 1.0 {
            return Err(ExportError::InvalidSettings(format!(
                "scale factor must be >= 1, got {}",
                self.scale_factor
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ExportError::InvalidSettings(format!(
                "JPEG quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.max_section_entries == 0 {
            return Err(ExportError::InvalidSettings(
                "max_section_entries must be at least 1".to_string(),
            ));
        }
        self.geometry.validate()?;
        Ok(())
    }
}
