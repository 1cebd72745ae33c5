use serde::{Deserialize, Serialize};

/// Styling for the structured (DOCX) export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Calibri", "Times New Roman").
    pub body_font: String,

    /// Font for the name and section headings.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Name heading size in points.
    pub heading1_size: usize,

    /// Section heading size in points.
    pub heading2_size: usize,

    /// Entry heading size in points.
    pub heading3_size: usize,

    /// Page margin in inches (applied uniformly).
    pub margin_inches: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            heading1_size: 20,
            heading2_size: 14,
            heading3_size: 12,
            margin_inches: 0.8,
        }
    }
}

impl DocumentStyles {
    /// Margin in twentieths of a point, the unit OOXML section properties use.
    pub fn margin_twips(&self) -> i32 {
        (self.margin_inches.max(0.0) * 1440.0).round() as i32
    }
}
