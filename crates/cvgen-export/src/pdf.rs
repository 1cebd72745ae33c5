//! PDF assembly.
//!
//! Each page band becomes one page of the configured paper size carrying a
//! single JPEG image anchored at the top-left corner. The image's pixel
//! width maps exactly onto the paper width; since the band height was
//! derived from the same ratio, the scale is uniform.

use cvgen_core::geometry::PageGeometry;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::ExportError;
use crate::settings::ExportSettings;
use crate::slice::PageBand;

const IMAGE_NAME: &[u8] = b"Im1";

/// A JPEG-encoded band and where it lands on its page, in points.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub jpeg: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub display_width_pt: f32,
    pub display_height_pt: f32,
}

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
}

/// Page sink for the assembler. Pages are added strictly in document order.
pub trait PdfWriter {
    fn add_page(
        &mut self,
        page_width_pt: f32,
        page_height_pt: f32,
        image: PlacedImage,
    ) -> Result<(), ExportError>;

    fn page_count(&self) -> usize;

    fn finish(self, info: &DocumentInfo) -> Result<Vec<u8>, ExportError>;
}

/// Assemble `bands` into a PDF with `writer`, one page per band, in order.
pub fn assemble<W: PdfWriter>(
    mut writer: W,
    bands: Vec<PageBand>,
    settings: &ExportSettings,
) -> Result<Vec<u8>, ExportError> {
    if bands.is_empty() {
        tracing::error!("assembler received no page bands");
        return Err(ExportError::EmptyDocument);
    }

    let geometry = &settings.geometry;
    let (page_width_pt, page_height_pt) = (geometry.width_pt(), geometry.height_pt());

    for band in bands {
        let placed = place_band(&band, geometry, settings.jpeg_quality)?;
        writer.add_page(page_width_pt, page_height_pt, placed)?;
    }

    let info = DocumentInfo {
        title: settings.title.clone(),
        creator: settings.creator.clone(),
    };
    let pages = writer.page_count();
    let bytes = writer.finish(&info)?;
    tracing::debug!(pages, bytes = bytes.len(), "pdf assembled");
    Ok(bytes)
}

/// Assemble with the built-in [`ImagePdfWriter`].
pub fn assemble_pdf(bands: Vec<PageBand>, settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    assemble(ImagePdfWriter::new(), bands, settings)
}

fn place_band(
    band: &PageBand,
    geometry: &PageGeometry,
    quality: u8,
) -> Result<PlacedImage, ExportError> {
    let scale = geometry.width_pt() / band.width() as f32;
    Ok(PlacedImage {
        jpeg: encode_jpeg(band.pixels(), quality)?,
        pixel_width: band.width(),
        pixel_height: band.height_pixels,
        display_width_pt: geometry.width_pt(),
        display_height_pt: band.height_pixels as f32 * scale,
    })
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(image)
        .map_err(|e| ExportError::Encoding(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

/// [`PdfWriter`] backed by `pdf-writer`, embedding JPEG data untouched
/// through `DCTDecode`.
pub struct ImagePdfWriter {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    page_ids: Vec<Ref>,
}

impl ImagePdfWriter {
    pub fn new() -> Self {
        let mut writer = Self {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            page_ids: Vec::new(),
        };
        writer.catalog_id = writer.alloc();
        writer.pages_id = writer.alloc();
        writer
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }
}

impl Default for ImagePdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter for ImagePdfWriter {
    fn add_page(
        &mut self,
        page_width_pt: f32,
        page_height_pt: f32,
        image: PlacedImage,
    ) -> Result<(), ExportError> {
        let page_id = self.alloc();
        let content_id = self.alloc();
        let image_id = self.alloc();

        {
            let mut xobj = self.pdf.image_xobject(image_id, &image.jpeg);
            xobj.filter(Filter::DctDecode);
            xobj.width(image.pixel_width as i32);
            xobj.height(image.pixel_height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }

        // PDF y grows upwards; pin the image's top edge to the top of the page.
        let mut content = Content::new();
        content.save_state();
        content.transform([
            image.display_width_pt,
            0.0,
            0.0,
            image.display_height_pt,
            0.0,
            page_height_pt - image.display_height_pt,
        ]);
        content.x_object(Name(IMAGE_NAME));
        content.restore_state();
        self.pdf.stream(content_id, &content.finish());

        {
            let mut page = self.pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, page_width_pt, page_height_pt))
                .parent(self.pages_id)
                .contents(content_id);
            page.resources().x_objects().pair(Name(IMAGE_NAME), image_id);
        }

        self.page_ids.push(page_id);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finish(mut self, info: &DocumentInfo) -> Result<Vec<u8>, ExportError> {
        if self.page_ids.is_empty() {
            return Err(ExportError::EmptyDocument);
        }

        let info_id = self.alloc();
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_ids.iter().copied())
            .count(self.page_ids.len() as i32);
        self.pdf
            .document_info(info_id)
            .title(TextStr(&info.title))
            .creator(TextStr(&info.creator));

        Ok(self.pdf.finish())
    }
}
