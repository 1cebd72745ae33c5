//! Physical page geometry.
//!
//! Pixel rows per page are derived by holding the bitmap width fixed and
//! scaling by the paper's aspect ratio, so slicing is coupled to exactly one
//! physical aspect ratio.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const POINTS_PER_INCH: f64 = 72.0;
const MM_PER_INCH: f64 = 25.4;
const MICROMETERS_PER_MM: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Paper width in millimeters.
    pub paper_width_mm: f64,
    /// Paper height in millimeters.
    pub paper_height_mm: f64,
}

impl PageGeometry {
    /// ISO 216 A4, 210mm x 297mm.
    pub const A4: Self = Self {
        paper_width_mm: 210.0,
        paper_height_mm: 297.0,
    };

    /// US Letter, 8.5in x 11in.
    pub const LETTER: Self = Self {
        paper_width_mm: 215.9,
        paper_height_mm: 279.4,
    };

    pub fn a4() -> Self {
        Self::A4
    }

    pub fn letter() -> Self {
        Self::LETTER
    }

    pub fn custom(paper_width_mm: f64, paper_height_mm: f64) -> Result<Self, CoreError> {
        let geometry = Self {
            paper_width_mm,
            paper_height_mm,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        for (label, value) in [
            ("width", self.paper_width_mm),
            ("height", self.paper_height_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidGeometry(format!(
                    "paper {label} must be a positive length, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Number of bitmap rows that make up one physical page for a bitmap of
    /// the given pixel width: `floor(width * paper_height / paper_width)`.
    ///
    /// Paper sizes are taken in whole micrometers and the ratio is applied in
    /// integer arithmetic, so presets such as Letter (215.9mm x 279.4mm, an
    /// exact 17:22) never lose a row to binary rounding.
    pub fn page_height_pixels(&self, bitmap_width: u32) -> u32 {
        let width_um = micrometers(self.paper_width_mm).max(1);
        let height_um = micrometers(self.paper_height_mm);
        let rows = u128::from(bitmap_width) * u128::from(height_um) / u128::from(width_um);
        u32::try_from(rows).unwrap_or(u32::MAX)
    }

    pub fn width_pt(&self) -> f32 {
        mm_to_pt(self.paper_width_mm)
    }

    pub fn height_pt(&self) -> f32 {
        mm_to_pt(self.paper_height_mm)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

fn micrometers(mm: f64) -> u64 {
    (mm.max(0.0) * MICROMETERS_PER_MM).round() as u64
}

pub fn mm_to_pt(mm: f64) -> f32 {
    (mm.max(0.0) * POINTS_PER_INCH / MM_PER_INCH) as f32
}
