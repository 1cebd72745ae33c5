use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The user-entered CV content. Read-only input to the data-model exports.
///
/// Every field defaults to empty so partially filled forms deserialize; a
/// missing optional value renders as nothing, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct CvData {
    pub personal: PersonalInfo,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    /// Professional headline shown under the name.
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Experience {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Skill {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

/// A list entry's display label. Entries whose label is blank are skipped
/// by the exporters.
pub trait Labeled {
    fn label(&self) -> &str;

    fn has_label(&self) -> bool {
        !self.label().trim().is_empty()
    }
}

impl Labeled for Experience {
    fn label(&self) -> &str {
        if self.position.trim().is_empty() {
            &self.company
        } else {
            &self.position
        }
    }
}

impl Labeled for Education {
    fn label(&self) -> &str {
        if self.degree.trim().is_empty() {
            &self.institution
        } else {
            &self.degree
        }
    }
}

impl Labeled for Skill {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for Language {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for Certification {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for Project {
    fn label(&self) -> &str {
        &self.name
    }
}

impl CvData {
    /// "First Last", trimmed. Empty when neither name is set.
    pub fn display_name(&self) -> String {
        let first = self.personal.first_name.trim();
        let last = self.personal.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }

    /// True when there is nothing to export: no name, no summary and no
    /// labeled entry in any section.
    pub fn is_empty(&self) -> bool {
        self.display_name().is_empty()
            && self.summary.trim().is_empty()
            && !self.experiences.iter().any(Labeled::has_label)
            && !self.education.iter().any(Labeled::has_label)
            && !self.skills.iter().any(Labeled::has_label)
            && !self.languages.iter().any(Labeled::has_label)
            && !self.certifications.iter().any(Labeled::has_label)
            && !self.projects.iter().any(Labeled::has_label)
    }

    pub fn from_json(json: &str) -> Result<Self, crate::error::CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Experience {
    /// "start - end", with "Present" for a current position. Empty when no
    /// dates are set.
    pub fn period(&self) -> String {
        let end = if self.current {
            "Present"
        } else {
            self.end_date.trim()
        };
        format_period(self.start_date.trim(), end)
    }
}

impl Education {
    pub fn period(&self) -> String {
        format_period(self.start_date.trim(), self.end_date.trim())
    }
}

fn format_period(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}
