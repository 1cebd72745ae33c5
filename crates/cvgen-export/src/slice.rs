//! Page slicing.
//!
//! A page is `floor(width * paper_height / paper_width)` rows tall. The bitmap
//! is walked top to bottom in page-height steps; the last band holds whatever
//! remains and is never empty. Pixels are copied, not resampled: width
//! scaling belongs to the PDF assembler alone.

use cvgen_core::geometry::PageGeometry;
use image::RgbImage;
use image::imageops;

use crate::error::ExportError;
use crate::raster::Bitmap;

/// Row range of one band within the source bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSpan {
    pub source_y_offset: u32,
    pub height_pixels: u32,
}

/// One page-sized vertical slice of the source bitmap.
#[derive(Debug, Clone)]
pub struct PageBand {
    pub source_y_offset: u32,
    pub height_pixels: u32,
    pixels: RgbImage,
}

impl PageBand {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Partition `bitmap_height` rows into contiguous spans of at most
/// `page_height` rows.
///
/// Yields `ceil(bitmap_height / page_height)` spans whose heights sum to
/// `bitmap_height`. Returns no spans when either input is zero.
pub fn plan_bands(bitmap_height: u32, page_height: u32) -> Vec<BandSpan> {
    if page_height == 0 {
        return Vec::new();
    }

    let mut spans = Vec::with_capacity(bitmap_height.div_ceil(page_height) as usize);
    let mut y = 0;
    while y < bitmap_height {
        let height_pixels = page_height.min(bitmap_height - y);
        spans.push(BandSpan {
            source_y_offset: y,
            height_pixels,
        });
        y += height_pixels;
    }
    spans
}

/// Slice `bitmap` into page bands for `geometry`.
///
/// Takes the bitmap by value: the full-resolution buffer is released before
/// this returns, leaving only the bands alive.
pub fn slice(bitmap: Bitmap, geometry: &PageGeometry) -> Result<Vec<PageBand>, ExportError> {
    geometry.validate()?;

    let page_height = geometry.page_height_pixels(bitmap.width());
    if page_height == 0 {
        return Err(ExportError::InvalidSurface(format!(
            "bitmap is {}px wide, too narrow for one page row",
            bitmap.width()
        )));
    }

    let spans = plan_bands(bitmap.height(), page_height);
    if spans.is_empty() {
        tracing::error!(
            width = bitmap.width(),
            height = bitmap.height(),
            "slicing produced no bands"
        );
        return Err(ExportError::EmptyDocument);
    }

    let source = bitmap.into_image();
    let width = source.width();
    let bands = spans
        .iter()
        .map(|span| PageBand {
            source_y_offset: span.source_y_offset,
            height_pixels: span.height_pixels,
            pixels: imageops::crop_imm(&source, 0, span.source_y_offset, width, span.height_pixels)
                .to_image(),
        })
        .collect::<Vec<_>>();
    drop(source);

    tracing::debug!(bands = bands.len(), page_height, "bitmap sliced");
    Ok(bands)
}
