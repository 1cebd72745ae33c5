//! Surface rasterization.
//!
//! Produces one opaque full-height [`Bitmap`] per export. The bitmap is the
//! largest allocation in the pipeline; it is moved into the slicer and
//! dropped as soon as the last band has been copied out.

use image::{Rgb, RgbImage, RgbaImage};

use crate::error::ExportError;
use crate::surface::{BoxFuture, RenderableSurface};

/// An immutable, fully opaque RGB capture of a surface.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: RgbImage,
}

impl Bitmap {
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    /// Composite `rgba` over opaque white.
    pub fn flatten(rgba: &RgbaImage) -> Self {
        let mut image = RgbImage::new(rgba.width(), rgba.height());
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            image.put_pixel(x, y, Rgb([over_white(r, a), over_white(g, a), over_white(b, a)]));
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u16::from(channel), u16::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// `px * scale`, rounded to the nearest pixel.
pub fn scaled_dimension(px: u32, scale: f32) -> u32 {
    (f64::from(px) * f64::from(scale)).round() as u32
}

/// Captures a [`RenderableSurface`] into a [`Bitmap`].
pub trait Rasterizer: Send + Sync {
    fn rasterize<'a>(
        &'a self,
        surface: &'a dyn RenderableSurface,
        scale: f32,
    ) -> BoxFuture<'a, Result<Bitmap, ExportError>>;
}

/// Waits for the surface to settle, captures it and flattens the capture
/// onto white.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceRasterizer;

impl Rasterizer for SurfaceRasterizer {
    fn rasterize<'a>(
        &'a self,
        surface: &'a dyn RenderableSurface,
        scale: f32,
    ) -> BoxFuture<'a, Result<Bitmap, ExportError>> {
        Box::pin(async move {
            let (width, height) = (surface.pixel_width(), surface.pixel_height());
            if width == 0 || height == 0 {
                return Err(ExportError::InvalidSurface(format!(
                    "surface has zero size ({width}x{height})"
                )));
            }
            if !scale.is_finite() || scale < 1.0 {
                return Err(ExportError::InvalidSettings(format!(
                    "scale factor must be >= 1, got {scale}"
                )));
            }

            surface.settled().await?;
            tracing::debug!(width, height, scale, "surface settled, capturing");

            let captured = surface.capture(scale).await?;
            let expected = (scaled_dimension(width, scale), scaled_dimension(height, scale));
            if captured.dimensions() != expected {
                return Err(ExportError::Encoding(format!(
                    "capture is {}x{}, expected {}x{}",
                    captured.width(),
                    captured.height(),
                    expected.0,
                    expected.1
                )));
            }

            let bitmap = Bitmap::flatten(&captured);
            tracing::debug!(
                width = bitmap.width(),
                height = bitmap.height(),
                "surface rasterized"
            );
            Ok(bitmap)
        })
    }
}
