use std::io::Cursor;

use cvgen_core::models::CvData;
use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType,
};

use crate::error::ExportError;
use crate::outline::{Block, build_outline};
use crate::styles::DocumentStyles;

/// Build a DOCX document directly from `data`.
///
/// Section layout and omission rules come from [`build_outline`]; no bitmap
/// is involved and the word processor handles pagination.
pub fn assemble_structured(
    data: &CvData,
    styles: &DocumentStyles,
    max_entries: usize,
) -> Result<Vec<u8>, ExportError> {
    generate_docx(&build_outline(data, max_entries), styles)
}

/// Render outline blocks as a DOCX document.
///
/// - `Heading` 1/2/3 → DOCX Heading 1/2/3
/// - `Detail` → italic paragraph
/// - `Bullet` → bullet list item (prefixed with bullet character)
/// - `Paragraph` → normal paragraph; embedded newlines become line breaks
pub fn generate_docx(blocks: &[Block], styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let margin = styles.margin_twips();
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    for block in blocks {
        let paragraph = match block {
            Block::Heading { level, text } => {
                heading_paragraph(text, &format!("Heading{}", (*level).clamp(1, 3)), styles)
            }
            Block::Detail { text } => detail_paragraph(text, styles),
            Block::Bullet { text } => bullet_paragraph(text, styles),
            Block::Paragraph { text } => body_paragraph(text, styles),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Encoding(format!("DOCX packing failed: {e}")))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn detail_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run(text, styles).italic())
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run("\u{2022} ", styles))
        .add_run(body_run(text, styles))
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for (i, line) in text.lines().enumerate() {
        let mut run = Run::new();
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        para = para.add_run(
            run.add_text(line)
                .fonts(RunFonts::new().ascii(&styles.body_font))
                .size(styles.body_size * 2),
        );
    }
    para
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .fonts(RunFonts::new().ascii(&styles.body_font))
        .size(styles.body_size * 2)
}
