// src/export/mod.rs
//! Export pipeline: rendered preview -> PDF bytes, plus artifact naming and writing

pub mod rasterizer;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::core::FsOps;
use crate::error::CvError;
use crate::preview::RenderedCv;
use crate::utils::sanitize_file_stem;

pub use rasterizer::{Rasterizer, TypstRasterizer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    Letter,
    A4,
}

impl PageFormat {
    pub fn typst_paper(&self) -> &'static str {
        match self {
            Self::Letter => "us-letter",
            Self::A4 => "a4",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Layout handed to the rasterizer. Presentational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    pub format: PageFormat,
    pub margin_inches: f32,
    pub orientation: Orientation,
    /// Append `_YYYY-MM-DD` to the PDF file name
    pub date_suffix: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            format: PageFormat::Letter,
            margin_inches: 0.5,
            orientation: Orientation::Portrait,
            date_suffix: false,
        }
    }
}

/// A finished download: file name plus content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write into `dir` through a temporary file, so a failed write leaves no partial file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        FsOps::ensure_dir_exists(dir)?;

        let target = dir.join(&self.file_name);
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(&self.bytes)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        tmp.persist(&target)
            .with_context(|| format!("Failed to move artifact into {}", target.display()))?;

        info!("Written {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

pub fn json_file_name(name_hint: &str) -> String {
    format!("{}_data.json", sanitize_file_stem(name_hint))
}

pub fn pdf_file_name(name_hint: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{}_Resume_{}.pdf",
            sanitize_file_stem(name_hint),
            date.format("%Y-%m-%d")
        ),
        None => format!("{}_Resume.pdf", sanitize_file_stem(name_hint)),
    }
}

pub struct ExportPipeline<R> {
    rasterizer: R,
    options: PdfOptions,
}

impl<R: Rasterizer> ExportPipeline<R> {
    pub fn new(rasterizer: R, options: PdfOptions) -> Self {
        Self { rasterizer, options }
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Rasterize the rendered preview. `name_hint` is the person's name or "CV".
    pub async fn export_pdf(
        &self,
        surface: &RenderedCv,
        name_hint: &str,
        today: NaiveDate,
    ) -> Result<Artifact, CvError> {
        let date = self.options.date_suffix.then_some(today);
        let file_name = pdf_file_name(name_hint, date);

        match self.rasterizer.rasterize(surface, &self.options).await {
            Ok(bytes) => {
                info!("Rendered {} ({} bytes)", file_name, bytes.len());
                Ok(Artifact { file_name, bytes })
            }
            Err(e) => {
                error!("PDF export of {} failed: {:#}", file_name, e);
                Err(CvError::ExportRenderFailure(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Rasterizer double that returns fixed bytes or a fixed failure
    pub struct FakeRasterizer {
        pub fail_with: Option<String>,
        pub calls: AtomicUsize,
    }

    impl FakeRasterizer {
        pub fn ok() -> Self {
            Self { fail_with: None, calls: AtomicUsize::new(0) }
        }

        pub fn failing(message: &str) -> Self {
            Self { fail_with: Some(message.to_string()), calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Rasterizer for FakeRasterizer {
        async fn rasterize(&self, surface: &RenderedCv, _: &PdfOptions) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => anyhow::bail!("{}", message),
                None => Ok(format!("%PDF-fake {}", surface.header.name).into_bytes()),
            }
        }
    }
}
