use cvgen_core::format::ExportFormat;
use cvgen_core::models::{CvData, Experience, Labeled, Skill};

#[test]
fn partial_json_fills_defaults() {
    let cv = CvData::from_json(r#"{"personal": {"first_name": "Jean"}, "skills": [{"name": "Rust"}]}"#)
        .unwrap();
    assert_eq!(cv.personal.first_name, "Jean");
    assert_eq!(cv.personal.last_name, "");
    assert_eq!(cv.skills.len(), 1);
    assert!(cv.experiences.is_empty());
}

#[test]
fn display_name_handles_missing_parts() {
    let mut cv = CvData::default();
    assert_eq!(cv.display_name(), "");
    cv.personal.last_name = " Dupont ".to_string();
    assert_eq!(cv.display_name(), "Dupont");
    cv.personal.first_name = "Jean".to_string();
    assert_eq!(cv.display_name(), "Jean Dupont");
}

#[test]
fn unlabeled_entries_do_not_count_as_content() {
    let mut cv = CvData::default();
    cv.skills.push(Skill::default());
    assert!(cv.is_empty());

    cv.skills.push(Skill {
        name: "Rust".to_string(),
        level: String::new(),
    });
    assert!(!cv.is_empty());
}

#[test]
fn experience_label_falls_back_to_company() {
    let exp = Experience {
        company: "Acme".to_string(),
        ..Default::default()
    };
    assert_eq!(exp.label(), "Acme");
    assert!(exp.has_label());
}

#[test]
fn current_experience_period_ends_with_present() {
    let exp = Experience {
        start_date: "2021".to_string(),
        end_date: "2023".to_string(),
        current: true,
        ..Default::default()
    };
    assert_eq!(exp.period(), "2021 - Present");
}

#[test]
fn format_parses_aliases() {
    assert_eq!("image-pdf".parse::<ExportFormat>().unwrap(), ExportFormat::ImagePdf);
    assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Structured);
    assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Outline);
    assert!("html".parse::<ExportFormat>().is_err());
}

#[test]
fn format_serializes_kebab_case() {
    let json = serde_json::to_string(&ExportFormat::ImagePdf).unwrap();
    assert_eq!(json, "\"image-pdf\"");
}
