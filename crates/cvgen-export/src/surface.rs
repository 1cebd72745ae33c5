//! The renderable surface: a rendered document instance of known pixel size
//! that can be captured as a bitmap.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::ExportError;
use crate::raster::scaled_dimension;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One impl per capture backend. Owned by the UI layer; the pipeline only
/// borrows it for the duration of a capture.
pub trait RenderableSurface: Send + Sync {
    fn pixel_width(&self) -> u32;

    fn pixel_height(&self) -> u32;

    /// Resolves once all asynchronous content (images, fonts) has loaded.
    fn settled(&self) -> BoxFuture<'_, Result<(), ExportError>>;

    /// Capture the surface at `scale`. The returned image must measure
    /// `pixel_width * scale` by `pixel_height * scale`, rounded.
    fn capture(&self, scale: f32) -> BoxFuture<'_, Result<RgbaImage, ExportError>>;
}

/// A surface backed by an already-rendered image, e.g. a PNG screenshot of
/// the filled-in template. Always settled.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn open(path: &Path) -> Result<Self, ExportError> {
        let image = image::open(path).map_err(|e| {
            ExportError::InvalidSurface(format!("failed to load {}: {e}", path.display()))
        })?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "loaded surface image"
        );
        Ok(Self::new(image.to_rgba8()))
    }
}

impl RenderableSurface for ImageSurface {
    fn pixel_width(&self) -> u32 {
        self.image.width()
    }

    fn pixel_height(&self) -> u32 {
        self.image.height()
    }

    fn settled(&self) -> BoxFuture<'_, Result<(), ExportError>> {
        Box::pin(async { Ok(()) })
    }

    fn capture(&self, scale: f32) -> BoxFuture<'_, Result<RgbaImage, ExportError>> {
        Box::pin(async move {
            let width = scaled_dimension(self.image.width(), scale);
            let height = scaled_dimension(self.image.height(), scale);
            if (width, height) == self.image.dimensions() {
                return Ok(self.image.clone());
            }
            Ok(imageops::resize(&self.image, width, height, FilterType::Lanczos3))
        })
    }
}
