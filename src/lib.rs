// src/lib.rs
//! Résumé builder: a structured CV document, section editors over it,
//! a live preview, durable storage and PDF/JSON export.

pub mod cli;
pub mod core;
pub mod editors;
pub mod error;
pub mod export;
pub mod labels;
pub mod logging;
pub mod photo;
pub mod preview;
pub mod shell;
pub mod storage;
pub mod types;
pub mod utils;

pub use error::CvError;
pub use labels::{Labels, Locale};
pub use preview::{render, RenderedCv};
pub use shell::{Edit, Notice, NoticeLevel, Shell};
pub use types::CvDocument;
