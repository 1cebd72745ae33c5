//! Export orchestration.
//!
//! `Idle → Capturing → Slicing → Assembling → Done`, with `Failed` reachable
//! from every step. One export runs at a time per [`Exporter`]; a second
//! request while one is in flight is rejected with
//! [`ExportError::ExportInProgress`]. Dropping the export future abandons the
//! run: the stage moves to `Failed`, the surface borrow ends and the slot is
//! freed.

use cvgen_core::filenames;
use cvgen_core::format::ExportFormat;
use cvgen_core::models::CvData;
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::Instrument;
use uuid::Uuid;

use crate::docx::assemble_structured;
use crate::error::ExportError;
use crate::pdf::{ImagePdfWriter, assemble};
use crate::raster::{Rasterizer, SurfaceRasterizer};
use crate::render::render_outline;
use crate::settings::ExportSettings;
use crate::slice::slice;
use crate::styles::DocumentStyles;
use crate::surface::RenderableSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStage {
    Idle,
    Capturing,
    Slicing,
    Assembling,
    Done,
    Failed,
}

impl ExportStage {
    /// `Done` or `Failed`. A subscriber can stop watching once seen.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// The finished artifact. Persisting or delivering it is up to the caller.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub filename: String,
    pub content_type: &'static str,
    /// Physical pages, for image PDFs.
    pub page_count: Option<usize>,
    pub bytes: Vec<u8>,
}

pub struct ExportRequest<'a> {
    /// The rendered template. Required for [`ExportFormat::ImagePdf`].
    pub surface: Option<&'a dyn RenderableSurface>,
    pub data: &'a CvData,
    pub format: ExportFormat,
    /// Result of the caller's capability check (subscription, premium).
    pub can_export: bool,
}

pub struct Exporter<R = SurfaceRasterizer> {
    rasterizer: R,
    settings: ExportSettings,
    styles: DocumentStyles,
    outline_template: Option<String>,
    slot: Mutex<()>,
    stage: watch::Sender<ExportStage>,
}

impl Exporter<SurfaceRasterizer> {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_rasterizer(SurfaceRasterizer, settings)
    }
}

impl<R: Rasterizer> Exporter<R> {
    pub fn with_rasterizer(rasterizer: R, settings: ExportSettings) -> Self {
        let (stage, _) = watch::channel(ExportStage::Idle);
        Self {
            rasterizer,
            settings,
            styles: DocumentStyles::default(),
            outline_template: None,
            slot: Mutex::new(()),
            stage,
        }
    }

    pub fn styles(mut self, styles: DocumentStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn outline_template(mut self, template: impl Into<String>) -> Self {
        self.outline_template = Some(template.into());
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn stage(&self) -> ExportStage {
        *self.stage.borrow()
    }

    /// Follow stage transitions, e.g. to drive a progress indicator.
    pub fn subscribe(&self) -> watch::Receiver<ExportStage> {
        self.stage.subscribe()
    }

    /// Run one export, naming the artifact with today's local date.
    pub async fn export(&self, request: ExportRequest<'_>) -> Result<ExportDocument, ExportError> {
        self.export_on(request, jiff::Zoned::now().date()).await
    }

    /// Run one export, naming the artifact with `date`.
    pub async fn export_on(
        &self,
        request: ExportRequest<'_>,
        date: jiff::civil::Date,
    ) -> Result<ExportDocument, ExportError> {
        let _slot = self.slot.try_lock().map_err(|_| {
            tracing::warn!("export rejected, another export is in flight");
            ExportError::ExportInProgress
        })?;

        let export_id = Uuid::new_v4();
        let span = tracing::info_span!("export", %export_id, format = %request.format);
        let mut tracker = StageTracker::start(&self.stage);

        let result = self.run(request, date, &mut tracker).instrument(span.clone()).await;

        span.in_scope(|| match &result {
            Ok(doc) => {
                tracker.advance(ExportStage::Done);
                tracing::info!(
                    filename = %doc.filename,
                    bytes = doc.bytes.len(),
                    pages = doc.page_count,
                    "export complete"
                );
            }
            Err(e) => {
                tracker.advance(ExportStage::Failed);
                if e.is_internal() {
                    tracing::error!(error = %e, "export failed");
                } else {
                    tracing::warn!(error = %e, "export failed");
                }
            }
        });
        result
    }

    async fn run(
        &self,
        request: ExportRequest<'_>,
        date: jiff::civil::Date,
        tracker: &mut StageTracker<'_>,
    ) -> Result<ExportDocument, ExportError> {
        if !request.can_export {
            return Err(ExportError::AccessDenied);
        }
        self.settings.validate()?;

        let data = request.data;
        let format = request.format;

        let surface = if format.needs_surface() {
            Some(request.surface.ok_or(ExportError::NoTemplateSelected)?)
        } else {
            None
        };
        if data.is_empty() {
            return Err(ExportError::EmptyCvData);
        }

        let (bytes, page_count, filename) = match format {
            ExportFormat::ImagePdf => {
                let surface = surface.ok_or(ExportError::NoTemplateSelected)?;

                tracker.advance(ExportStage::Capturing);
                let bitmap = self
                    .rasterizer
                    .rasterize(surface, self.settings.scale_factor)
                    .await?;

                tracker.advance(ExportStage::Slicing);
                let bands = slice(bitmap, &self.settings.geometry)?;
                let pages = bands.len();

                tracker.advance(ExportStage::Assembling);
                let bytes = assemble(ImagePdfWriter::new(), bands, &self.settings)?;
                let filename = filenames::image_pdf(&data.display_name(), date);
                (bytes, Some(pages), filename)
            }
            ExportFormat::Structured => {
                tracker.advance(ExportStage::Assembling);
                let bytes =
                    assemble_structured(data, &self.styles, self.settings.max_section_entries)?;
                let filename =
                    filenames::structured(&data.personal.first_name, &data.personal.last_name);
                (bytes, None, filename)
            }
            ExportFormat::Outline => {
                tracker.advance(ExportStage::Assembling);
                let text = render_outline(
                    data,
                    self.outline_template.as_deref(),
                    self.settings.max_section_entries,
                )?;
                let filename =
                    filenames::outline(&data.personal.first_name, &data.personal.last_name);
                (text.into_bytes(), None, filename)
            }
        };

        Ok(ExportDocument {
            format,
            filename,
            content_type: format.content_type(),
            page_count,
            bytes,
        })
    }
}

/// Publishes stage transitions. If dropped before reaching a terminal stage
/// (the export future was abandoned) it publishes `Failed`.
struct StageTracker<'a> {
    tx: &'a watch::Sender<ExportStage>,
    settled: bool,
}

impl<'a> StageTracker<'a> {
    fn start(tx: &'a watch::Sender<ExportStage>) -> Self {
        tx.send_replace(ExportStage::Idle);
        Self { tx, settled: false }
    }

    fn advance(&mut self, stage: ExportStage) {
        tracing::debug!(stage = ?stage, "export stage");
        self.tx.send_replace(stage);
        self.settled = stage.is_terminal();
    }
}

impl Drop for StageTracker<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("export abandoned before completion");
            self.tx.send_replace(ExportStage::Failed);
        }
    }
}
