// src/error.rs
use thiserror::Error;

/// Failures surfaced to the user as notices. None of them stop the editor.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("Malformed import file: {0}")]
    MalformedImportFile(#[from] serde_json::Error),

    #[error("Failed to persist document to slot '{key}': {source}")]
    PersistenceWriteFailure {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF export failed: {0:#}")]
    ExportRenderFailure(anyhow::Error),
}

impl CvError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedImportFile(_) => "MALFORMED_IMPORT_FILE",
            Self::PersistenceWriteFailure { .. } => "PERSISTENCE_WRITE_FAILURE",
            Self::ExportRenderFailure(_) => "EXPORT_RENDER_FAILURE",
        }
    }

    /// Persistence failures only warn; the other two block until acknowledged.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::PersistenceWriteFailure { .. })
    }
}
