// src/photo.rs
//! Profile photo ingestion: image file -> inline `data:` URL and back

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use tracing::{info, warn};

use crate::core::FsOps;
use crate::utils::get_file_extension;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
    Bmp,
}

impl ImageKind {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Bmp => "bmp",
        }
    }

    /// Formats the Typst compiler can place on a page
    pub fn typst_embeddable(&self) -> bool {
        matches!(self, Self::Png | Self::Jpeg | Self::Gif | Self::Svg)
    }

    fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/svg+xml" => Some(Self::Svg),
            "image/bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "svg" => Some(Self::Svg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Identify the image from its leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(JPEG_SIGNATURE) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if bytes.starts_with(b"BM") {
            Some(Self::Bmp)
        } else {
            None
        }
    }
}

/// An inline image split back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

pub fn encode_data_url(kind: ImageKind, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        kind.mime(),
        general_purpose::STANDARD.encode(bytes)
    )
}

pub fn decode_data_url(data_url: &str) -> Result<InlineImage> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| anyhow::anyhow!("Profile photo is not a data URL"))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| anyhow::anyhow!("Profile photo is not base64 encoded"))?;
    let kind = ImageKind::from_mime(&mime.to_lowercase())
        .ok_or_else(|| anyhow::anyhow!("Unsupported photo type: {}", mime))?;
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .context("Profile photo payload is not valid base64")?;

    Ok(InlineImage { kind, bytes })
}

/// Read an image file and return it as an inline `data:` URL.
///
/// Only the "is this an image" filter of a picker is applied; size and
/// dimensions are not checked.
pub fn ingest(path: &Path) -> Result<String> {
    let bytes = FsOps::read_bytes_safe(path)?;

    let from_extension = get_file_extension(path).and_then(|ext| ImageKind::from_extension(&ext));
    let kind = match (ImageKind::sniff(&bytes), from_extension) {
        (Some(sniffed), Some(declared)) if sniffed != declared => {
            warn!(
                "Photo {} looks like {} despite its extension",
                path.display(),
                sniffed.mime()
            );
            sniffed
        }
        (Some(sniffed), _) => sniffed,
        (None, Some(declared)) => declared,
        (None, None) => anyhow::bail!(
            "Not an image file: {}. Use PNG, JPEG, GIF, WebP, SVG or BMP",
            path.display()
        ),
    };

    info!("Ingested profile photo {} ({})", path.display(), kind.mime());
    Ok(encode_data_url(kind, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    #[test]
    fn test_sniff() {
        assert_eq!(ImageKind::sniff(TINY_PNG), Some(ImageKind::Png));
        assert_eq!(ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(b"GIF89a...."), Some(ImageKind::Gif));
        assert_eq!(ImageKind::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(ImageKind::sniff(b"hello"), None);
    }

    #[test]
    fn test_typst_embeddable_kinds() {
        assert!(ImageKind::Png.typst_embeddable());
        assert!(ImageKind::Svg.typst_embeddable());
        assert!(!ImageKind::Bmp.typst_embeddable());
        assert!(!ImageKind::Webp.typst_embeddable());
    }

    #[test]
    fn test_data_url_round_trip() {
        let url = encode_data_url(ImageKind::Png, TINY_PNG);
        assert!(url.starts_with("data:image/png;base64,"));

        let image = decode_data_url(&url).unwrap();
        assert_eq!(image.kind, ImageKind::Png);
        assert_eq!(image.bytes, TINY_PNG);
    }

    #[test]
    fn test_decode_rejects_non_data_url() {
        assert!(decode_data_url("https://example.org/me.png").is_err());
        assert!(decode_data_url("data:text/plain;base64,aGk=").is_err());
    }

    #[test]
    fn test_ingest_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.png");
        std::fs::write(&path, TINY_PNG).unwrap();

        let url = ingest(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_ingest_trusts_content_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.jpg");
        std::fs::write(&path, TINY_PNG).unwrap();

        let url = ingest(&path).unwrap();
        assert!(url.starts_with("data:image/png;"));
    }

    #[test]
    fn test_ingest_svg_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.svg");
        std::fs::write(&path, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();

        let url = ingest(&path).unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_ingest_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just text").unwrap();

        assert!(ingest(&path).is_err());
    }

    #[test]
    fn test_ingest_missing_file() {
        assert!(ingest(Path::new("/definitely/not/here.png")).is_err());
    }
}
