// src/export/rasterizer.rs
use anyhow::{Context, Result};
use std::future::Future;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

use super::PdfOptions;
use crate::photo::{decode_data_url, InlineImage};
use crate::preview::{to_typst, RenderedCv};

/// External collaborator turning a rendered surface into PDF bytes
pub trait Rasterizer {
    fn rasterize(
        &self,
        surface: &RenderedCv,
        options: &PdfOptions,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Decoded photo, or `None` (with a warning) when Typst could not place it
fn embeddable_photo(data_url: &str) -> Option<InlineImage> {
    match decode_data_url(data_url) {
        Ok(image) if image.kind.typst_embeddable() => Some(image),
        Ok(image) => {
            warn!("Skipping profile photo in PDF: {} is not supported", image.kind.mime());
            None
        }
        Err(e) => {
            warn!("Skipping profile photo in PDF: {:#}", e);
            None
        }
    }
}

/// Compiles the Typst surface with the `typst` CLI in a throwaway workspace
pub struct TypstRasterizer {
    binary: PathBuf,
}

impl TypstRasterizer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TypstRasterizer {
    fn default() -> Self {
        Self::new("typst")
    }
}

impl Rasterizer for TypstRasterizer {
    async fn rasterize(&self, surface: &RenderedCv, options: &PdfOptions) -> Result<Vec<u8>> {
        let workspace = tempfile::Builder::new()
            .prefix("cv-builder-")
            .tempdir()
            .context("Failed to create temporary workspace")?;

        let photo_file = match surface.header.photo.as_deref().and_then(embeddable_photo) {
            Some(image) => {
                let name = format!("profile.{}", image.kind.extension());
                tokio::fs::write(workspace.path().join(&name), &image.bytes)
                    .await
                    .context("Failed to write profile photo to workspace")?;
                Some(name)
            }
            None => None,
        };

        let markup = to_typst(surface, options, photo_file.as_deref());
        tokio::fs::write(workspace.path().join("main.typ"), markup)
            .await
            .context("Failed to write main.typ")?;

        debug!(
            "Running {} compile in {}",
            self.binary.display(),
            workspace.path().display()
        );

        let output = Command::new(&self.binary)
            .arg("compile")
            .arg("main.typ")
            .arg("out.pdf")
            .current_dir(workspace.path())
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Typst compilation failed: {}", stderr.trim());
        }

        tokio::fs::read(workspace.path().join("out.pdf"))
            .await
            .context("Failed to read generated PDF")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Labels;
    use crate::preview::render;
    use crate::types::CvDocument;

    #[test]
    fn test_unsupported_photo_is_skipped() {
        use crate::photo::{encode_data_url, ImageKind};

        let bmp = encode_data_url(ImageKind::Bmp, b"BM\0\0");
        assert!(embeddable_photo(&bmp).is_none());
        assert!(embeddable_photo("data:image/png;base64,!!!").is_none());

        let gif = encode_data_url(ImageKind::Gif, b"GIF89a");
        let image = embeddable_photo(&gif).unwrap();
        assert_eq!(image.kind, ImageKind::Gif);
        assert_eq!(image.bytes, b"GIF89a");
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let rasterizer = TypstRasterizer::new("/nonexistent/bin/typst");
        let surface = render(&CvDocument::default(), &Labels::english());

        let err = rasterizer
            .rasterize(&surface, &PdfOptions::default())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to execute"));
    }

    #[tokio::test]
    async fn test_failing_binary_reports_status() {
        // `false` exits non-zero without reading its arguments
        let rasterizer = TypstRasterizer::new("false");
        let surface = render(&CvDocument::default(), &Labels::english());

        let err = rasterizer
            .rasterize(&surface, &PdfOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Typst compilation failed"));
    }
}
