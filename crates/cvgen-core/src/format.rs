use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Output format selected by the export trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Rasterized pages, one full-bleed image per PDF page.
    ImagePdf,
    /// Word-processor document built from the data model.
    Structured,
    /// Markdown outline built from the data model.
    Outline,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImagePdf => "image-pdf",
            Self::Structured => "structured",
            Self::Outline => "outline",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::ImagePdf => "pdf",
            Self::Structured => "docx",
            Self::Outline => "md",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::ImagePdf => "application/pdf",
            Self::Structured => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Outline => "text/markdown; charset=utf-8",
        }
    }

    /// Whether this format is produced from a captured surface rather than
    /// directly from the data model.
    pub fn needs_surface(self) -> bool {
        matches!(self, Self::ImagePdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image-pdf" | "pdf" => Ok(Self::ImagePdf),
            "structured" | "docx" => Ok(Self::Structured),
            "outline" | "md" | "markdown" => Ok(Self::Outline),
            other => Err(CoreError::UnknownFormat(other.to_string())),
        }
    }
}
