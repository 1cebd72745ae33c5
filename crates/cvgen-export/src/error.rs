use cvgen_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("no template selected")]
    NoTemplateSelected,

    #[error("document produced no pages")]
    EmptyDocument,

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("CV data has no content to export")]
    EmptyCvData,

    #[error("export is not available for this account")]
    AccessDenied,

    #[error("an export is already in progress for this document")]
    ExportInProgress,

    #[error("invalid export settings: {0}")]
    InvalidSettings(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encoding(e.to_string())
    }
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::Template(format_err_chain(&e))
    }
}

impl From<CoreError> for ExportError {
    fn from(e: CoreError) -> Self {
        ExportError::InvalidSettings(e.to_string())
    }
}

impl ExportError {
    /// The message shown to the person who triggered the export.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoTemplateSelected => "Choose a template before downloading your CV.",
            Self::EmptyCvData => "Fill in your CV before downloading it.",
            Self::AccessDenied => "Downloading your CV requires an active subscription.",
            Self::ExportInProgress => "Your CV is already being prepared.",
            Self::InvalidSurface(_) => "Your CV preview is not ready yet. Please wait a moment.",
            Self::Encoding(_) | Self::Io(_) => "Export failed, please retry.",
            Self::EmptyDocument | Self::InvalidSettings(_) | Self::Template(_) => {
                "Something went wrong while exporting your CV."
            }
        }
    }

    /// Whether a manual retry by the caller can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Encoding(_) | Self::Io(_) | Self::ExportInProgress
        )
    }

    /// Failures that indicate a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::EmptyDocument | Self::InvalidSettings(_) | Self::Template(_)
        )
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// Tera reports the failing template at the top level and the actual cause
/// further down the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
