//! Structured outline of a CV, built straight from the data model.
//!
//! Sections appear in a fixed order: name/title/contact, summary,
//! experience, education, skills, languages, certifications, projects.
//! A section whose entries are all unlabeled (or that has none) is left out
//! entirely, heading included. Free text is carried verbatim.

use cvgen_core::models::{CvData, Labeled};
use serde::Serialize;

pub const SUMMARY: &str = "Summary";
pub const EXPERIENCE: &str = "Experience";
pub const EDUCATION: &str = "Education";
pub const SKILLS: &str = "Skills";
pub const LANGUAGES: &str = "Languages";
pub const CERTIFICATIONS: &str = "Certifications";
pub const PROJECTS: &str = "Projects";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Level 1 is the subject's name, 2 a section, 3 an entry.
    Heading { level: u8, text: String },
    /// Secondary line: headline, contact details, dates, places.
    Detail { text: String },
    Paragraph { text: String },
    Bullet { text: String },
}

impl Block {
    fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    fn detail(text: impl Into<String>) -> Self {
        Self::Detail { text: text.into() }
    }

    fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    fn bullet(text: impl Into<String>) -> Self {
        Self::Bullet { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Heading { text, .. }
            | Self::Detail { text }
            | Self::Paragraph { text }
            | Self::Bullet { text } => text,
        }
    }
}

/// Build the outline for `data`, keeping at most `max_entries` labeled
/// entries per section.
pub fn build_outline(data: &CvData, max_entries: usize) -> Vec<Block> {
    let mut blocks = Vec::new();

    header(data, &mut blocks);

    if !data.summary.trim().is_empty() {
        blocks.push(Block::heading(2, SUMMARY));
        blocks.push(Block::paragraph(data.summary.clone()));
    }

    section(&mut blocks, EXPERIENCE, &data.experiences, max_entries, |exp, out| {
        let title = join_present(&[exp.position.trim(), exp.company.trim()], " | ");
        out.push(Block::heading(3, title));
        let detail = join_present(&[exp.period().as_str(), exp.location.trim()], " | ");
        if !detail.is_empty() {
            out.push(Block::detail(detail));
        }
        if !exp.description.trim().is_empty() {
            out.push(Block::paragraph(exp.description.clone()));
        }
        out.extend(bullets(&exp.achievements));
    });

    section(&mut blocks, EDUCATION, &data.education, max_entries, |edu, out| {
        out.push(Block::heading(3, edu.label().trim()));
        let institution = if edu.degree.trim().is_empty() {
            ""
        } else {
            edu.institution.trim()
        };
        let detail = join_present(
            &[institution, edu.period().as_str(), edu.location.trim()],
            " | ",
        );
        if !detail.is_empty() {
            out.push(Block::detail(detail));
        }
        if !edu.description.trim().is_empty() {
            out.push(Block::paragraph(edu.description.clone()));
        }
    });

    section(&mut blocks, SKILLS, &data.skills, max_entries, |skill, out| {
        out.push(Block::bullet(with_qualifier(&skill.name, &skill.level)));
    });

    section(&mut blocks, LANGUAGES, &data.languages, max_entries, |lang, out| {
        out.push(Block::bullet(with_qualifier(&lang.name, &lang.level)));
    });

    section(
        &mut blocks,
        CERTIFICATIONS,
        &data.certifications,
        max_entries,
        |cert, out| {
            let name = join_present(&[cert.name.trim(), cert.issuer.trim()], ", ");
            out.push(Block::bullet(with_qualifier(&name, &cert.date)));
        },
    );

    section(&mut blocks, PROJECTS, &data.projects, max_entries, |project, out| {
        out.push(Block::heading(3, project.name.trim()));
        if !project.link.trim().is_empty() {
            out.push(Block::detail(project.link.trim()));
        }
        if !project.description.trim().is_empty() {
            out.push(Block::paragraph(project.description.clone()));
        }
        out.extend(bullets(&project.technologies));
    });

    blocks
}

fn header(data: &CvData, blocks: &mut Vec<Block>) {
    let name = data.display_name();
    if !name.is_empty() {
        blocks.push(Block::heading(1, name));
    }

    let p = &data.personal;
    if !p.title.trim().is_empty() {
        blocks.push(Block::detail(p.title.trim()));
    }

    let contact = join_present(
        &[
            p.email.trim(),
            p.phone.trim(),
            p.address.trim(),
            p.linkedin.trim(),
            p.website.trim(),
        ],
        " | ",
    );
    if !contact.is_empty() {
        blocks.push(Block::detail(contact));
    }
}

fn section<T: Labeled>(
    blocks: &mut Vec<Block>,
    heading: &str,
    entries: &[T],
    max_entries: usize,
    mut render: impl FnMut(&T, &mut Vec<Block>),
) {
    let mut labeled = entries.iter().filter(|e| e.has_label()).take(max_entries).peekable();
    if labeled.peek().is_none() {
        return;
    }

    blocks.push(Block::heading(2, heading));
    for entry in labeled {
        render(entry, blocks);
    }
}

fn bullets(items: &[String]) -> impl Iterator<Item = Block> + '_ {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(Block::bullet)
}

fn with_qualifier(name: &str, qualifier: &str) -> String {
    let (name, qualifier) = (name.trim(), qualifier.trim());
    if qualifier.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({qualifier})")
    }
}

fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
