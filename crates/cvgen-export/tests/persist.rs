use cvgen_core::format::ExportFormat;
use cvgen_export::ExportDocument;
use cvgen_export::persist::write_atomic;

fn document(filename: &str, bytes: &[u8]) -> ExportDocument {
    ExportDocument {
        format: ExportFormat::Outline,
        filename: filename.to_string(),
        content_type: ExportFormat::Outline.content_type(),
        page_count: None,
        bytes: bytes.to_vec(),
    }
}

#[test]
fn writes_under_final_name_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_atomic(dir.path(), &document("CV_Jean_Dupont.md", b"# Jean")).unwrap();

    assert_eq!(path, dir.path().join("CV_Jean_Dupont.md"));
    assert_eq!(std::fs::read(&path).unwrap(), b"# Jean");
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn creates_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("exports").join("2026");
    let path = write_atomic(&nested, &document("cv.pdf", b"%PDF-")).unwrap();
    assert!(path.exists());
}

#[test]
fn replaces_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    write_atomic(dir.path(), &document("cv.md", b"old")).unwrap();
    let path = write_atomic(dir.path(), &document("cv.md", b"new")).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"new");
}

#[test]
fn failed_write_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    // A directory already occupies the final name, so the rename fails.
    std::fs::create_dir(dir.path().join("cv.md")).unwrap();
    std::fs::write(dir.path().join("cv.md").join("keep"), b"x").unwrap();

    assert!(write_atomic(dir.path(), &document("cv.md", b"data")).is_err());
    assert!(!dir.path().join(".cv.md.tmp").exists());
}
