//! cvgen-export
//!
//! CV export pipeline: capture a rendered surface, slice it into page bands,
//! assemble an image PDF; or build a DOCX / Markdown outline straight from
//! the data model.

pub mod docx;
pub mod error;
pub mod orchestrate;
pub mod outline;
pub mod pdf;
pub mod persist;
pub mod raster;
pub mod render;
pub mod settings;
pub mod slice;
pub mod styles;
pub mod surface;

pub use error::ExportError;
pub use orchestrate::{ExportDocument, ExportRequest, ExportStage, Exporter};
pub use settings::ExportSettings;
