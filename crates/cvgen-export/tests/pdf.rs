use cvgen_core::geometry::PageGeometry;
use cvgen_export::error::ExportError;
use cvgen_export::pdf::{
    DocumentInfo, ImagePdfWriter, PdfWriter, PlacedImage, assemble, assemble_pdf, encode_jpeg,
};
use cvgen_export::raster::Bitmap;
use cvgen_export::settings::ExportSettings;
use cvgen_export::slice::{PageBand, slice};
use image::{Rgb, RgbImage};

fn bands(width: u32, height: u32) -> Vec<PageBand> {
    let bitmap = Bitmap::from_rgb(RgbImage::from_fn(width, height, |_, y| {
        Rgb([(y % 256) as u8, 128, 64])
    }));
    slice(bitmap, &PageGeometry::A4).unwrap()
}

fn page_count(pdf: &[u8]) -> usize {
    lopdf::Document::load_mem(pdf).unwrap().get_pages().len()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[derive(Default)]
struct RecordingWriter {
    pages: Vec<(f32, f32, PlacedImage)>,
}

impl PdfWriter for RecordingWriter {
    fn add_page(&mut self, w: f32, h: f32, image: PlacedImage) -> Result<(), ExportError> {
        self.pages.push((w, h, image));
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(self, _info: &DocumentInfo) -> Result<Vec<u8>, ExportError> {
        let summary = self
            .pages
            .iter()
            .map(|(_, _, img)| {
                format!(
                    "{}x{}@{:.1}",
                    img.pixel_width, img.pixel_height, img.display_height_pt
                )
            })
            .collect::<Vec<_>>()
            .join(";");
        Ok(summary.into_bytes())
    }
}

#[test]
fn one_pdf_page_per_band() {
    let settings = ExportSettings::default();
    let pdf = assemble_pdf(bands(200, 1000), &settings).unwrap();
    // 200 * 297 / 210 = 282 rows per page → ceil(1000 / 282) = 4
    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(page_count(&pdf), 4);
}

#[test]
fn single_band_gives_single_page_without_leading_blank() {
    let settings = ExportSettings::default();
    let pdf = assemble_pdf(bands(200, 100), &settings).unwrap();
    assert_eq!(page_count(&pdf), 1);
}

#[test]
fn pages_use_paper_size_in_points() {
    let settings = ExportSettings::default();
    let pdf = assemble_pdf(bands(200, 300), &settings).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();

    for (_, page_id) in doc.get_pages() {
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.2756).abs() < 0.01);
        assert!((height - 841.8898).abs() < 0.01);
    }
}

#[test]
fn letter_geometry_changes_page_size() {
    let settings = ExportSettings {
        geometry: PageGeometry::LETTER,
        ..Default::default()
    };
    let bitmap = Bitmap::from_rgb(RgbImage::new(100, 100));
    let pdf = assemble_pdf(slice(bitmap, &settings.geometry).unwrap(), &settings).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    assert!((media_box[2].as_float().unwrap() - 612.0).abs() < 0.01);
}

#[test]
fn metadata_is_written() {
    let settings = ExportSettings {
        title: "Jean Dupont CV".to_string(),
        creator: "cvgen test".to_string(),
        ..Default::default()
    };
    let pdf = assemble_pdf(bands(100, 100), &settings).unwrap();
    assert!(contains(&pdf, b"(Jean Dupont CV)"));
    assert!(contains(&pdf, b"(cvgen test)"));
}

#[test]
fn zero_bands_is_an_error() {
    let err = assemble_pdf(Vec::new(), &ExportSettings::default()).unwrap_err();
    assert!(matches!(err, ExportError::EmptyDocument));
}

#[test]
fn finishing_an_empty_writer_is_an_error() {
    let info = DocumentInfo {
        title: "t".to_string(),
        creator: "c".to_string(),
    };
    assert!(matches!(
        ImagePdfWriter::new().finish(&info),
        Err(ExportError::EmptyDocument)
    ));
}

#[test]
fn bands_are_placed_in_order_with_uniform_scale() {
    let settings = ExportSettings::default();
    let out = assemble(RecordingWriter::default(), bands(210, 700), &settings).unwrap();
    let summary = String::from_utf8(out).unwrap();

    // 297 rows per page; a full band spans the full page height, the
    // 106-row remainder spans 106 / 297 of it.
    let full = PageGeometry::A4.height_pt();
    let short = 106.0 * PageGeometry::A4.width_pt() / 210.0;
    assert_eq!(
        summary,
        format!("210x297@{full:.1};210x297@{full:.1};210x106@{short:.1}")
    );
}

#[test]
fn jpeg_quality_trades_size_for_fidelity() {
    let image = RgbImage::from_fn(256, 256, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
    let high = encode_jpeg(&image, 95).unwrap();
    let low = encode_jpeg(&image, 30).unwrap();
    assert!(high.starts_with(&[0xFF, 0xD8]));
    assert!(high.len() > low.len());
}
