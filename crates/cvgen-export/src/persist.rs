use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::orchestrate::ExportDocument;

/// Write `document` into `dir` under its own filename.
///
/// The bytes go to a hidden temporary sibling first and are renamed into
/// place, so a failed write never leaves a partial file under the final
/// name. Returns the final path.
pub fn write_atomic(dir: &Path, document: &ExportDocument) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(&document.filename);
    let tmp_path = dir.join(format!(".{}.tmp", document.filename));

    if let Err(e) = std::fs::write(&tmp_path, &document.bytes)
        .and_then(|()| std::fs::rename(&tmp_path, &path))
    {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::info!(
        path = %path.display(),
        bytes = document.bytes.len(),
        "export written"
    );
    Ok(path)
}
