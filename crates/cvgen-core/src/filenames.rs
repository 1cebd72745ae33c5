//! Artifact naming conventions.
//!
//! Pure string functions. Image exports are named by a slug of the subject's
//! display name and the export date; data-model exports follow
//! `CV_<first>_<last>.<ext>`.

use jiff::civil::Date;

use crate::format::ExportFormat;

const SLUG_SEPARATOR: char = '-';

/// Lowercase `input` and collapse every run of non-alphanumeric characters
/// into a single separator. Leading and trailing separators are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

pub fn image_pdf(display_name: &str, date: Date) -> String {
    let slug = slugify(&format!("{display_name} {date}"));
    if slugify(display_name).is_empty() {
        format!("cv-{slug}.pdf")
    } else {
        format!("{slug}.pdf")
    }
}

pub fn structured(first_name: &str, last_name: &str) -> String {
    data_export(first_name, last_name, ExportFormat::Structured)
}

pub fn outline(first_name: &str, last_name: &str) -> String {
    data_export(first_name, last_name, ExportFormat::Outline)
}

fn data_export(first_name: &str, last_name: &str, format: ExportFormat) -> String {
    let mut stem = String::from("CV");
    for part in [first_name, last_name] {
        let part = name_component(part);
        if !part.is_empty() {
            stem.push('_');
            stem.push_str(&part);
        }
    }
    format!("{stem}.{}", format.extension())
}

/// Keep letters, digits and hyphens; inner whitespace becomes a hyphen.
fn name_component(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
