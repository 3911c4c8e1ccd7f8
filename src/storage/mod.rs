// src/storage/mod.rs
//! Persistence adapter: durable slot plus JSON file export/import

pub mod slot;

use tracing::{debug, error, info, warn};

use crate::error::CvError;
use crate::export::{json_file_name, Artifact};
use crate::types::CvDocument;

pub use slot::{DurableSlot, FileSlot, MemorySlot};

pub const DEFAULT_SLOT_KEY: &str = "cv-builder-data";

pub struct Persistence<S> {
    slot: S,
    key: String,
}

fn parse_document(bytes: &[u8]) -> Result<CvDocument, serde_json::Error> {
    let mut doc: CvDocument = serde_json::from_slice(bytes)?;
    let repaired = doc.normalize_ids();
    if repaired > 0 {
        warn!("Assigned fresh ids to {} entries with missing or duplicate ids", repaired);
    }
    Ok(doc)
}

impl<S: DurableSlot> Persistence<S> {
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Stored document, or the empty one when the slot is absent or unreadable.
    pub fn load(&self) -> CvDocument {
        let content = match self.slot.read(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                info!("No stored document under '{}', starting empty", self.key);
                return CvDocument::default();
            }
            Err(e) => {
                warn!("Failed to read slot '{}': {}. Starting empty", self.key, e);
                return CvDocument::default();
            }
        };

        match parse_document(content.as_bytes()) {
            Ok(doc) => {
                debug!("Loaded document from slot '{}'", self.key);
                doc
            }
            Err(e) => {
                warn!("Stored document in '{}' is unparsable: {}. Starting empty", self.key, e);
                self.back_up(&content);
                CvDocument::default()
            }
        }
    }

    /// Key holding the last unreadable content, kept before any save overwrites it
    pub fn backup_key(&self) -> String {
        format!("{}.bak", self.key)
    }

    fn back_up(&self, content: &str) {
        let backup_key = self.backup_key();
        match self.slot.write(&backup_key, content) {
            Ok(()) => warn!("Copied unreadable document from '{}' to '{}'", self.key, backup_key),
            Err(e) => error!("Failed to back up unreadable document to '{}': {}", backup_key, e),
        }
    }

    /// Overwrite the slot with the whole document.
    pub fn save(&self, doc: &CvDocument) -> Result<(), CvError> {
        let write = serde_json::to_string(doc)
            .map_err(std::io::Error::from)
            .and_then(|content| self.slot.write(&self.key, &content));

        write.map_err(|source| {
            warn!("Failed to persist document to '{}': {}", self.key, source);
            CvError::PersistenceWriteFailure {
                key: self.key.clone(),
                source,
            }
        })
    }
}

/// Pretty-printed document, named after the person
pub fn export_json(doc: &CvDocument) -> Artifact {
    // Plain data with string keys; serialization cannot fail
    let bytes = serde_json::to_vec_pretty(doc).unwrap_or_default();
    Artifact {
        file_name: json_file_name(doc.file_stem()),
        bytes,
    }
}

/// Parse a user-supplied file. The caller keeps its current document on error.
pub fn import_json(bytes: &[u8]) -> Result<CvDocument, CvError> {
    parse_document(bytes).map_err(|e| {
        error!("Rejected import file: {}", e);
        CvError::MalformedImportFile(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Certificate, Language, PersonalInfo, Proficiency, Skill, SkillCategory, SkillLevel, WorkExperience};

    fn sample() -> CvDocument {
        CvDocument {
            personal_info: PersonalInfo {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                profile_photo: Some("data:image/png;base64,AAAA".into()),
                ..Default::default()
            },
            summary: "Engineer".into(),
            work_experience: vec![WorkExperience {
                id: "w1".into(),
                company: "Acme".into(),
                start_date: "2021-03".into(),
                current: true,
                responsibilities: vec!["".into(), "Led team".into()],
                achievements: vec!["".into()],
                ..Default::default()
            }],
            skills: vec![Skill {
                id: "s1".into(),
                name: "Rust".into(),
                category: SkillCategory::Technical,
                level: SkillLevel::Expert,
            }],
            certificates: vec![Certificate {
                id: "c1".into(),
                name: "CKA".into(),
                url: Some("https://example.org".into()),
                ..Default::default()
            }],
            languages: vec![Language {
                id: "l1".into(),
                name: "English".into(),
                proficiency: Proficiency::Native,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_load_empty_slot_gives_default() {
        let persistence = Persistence::new(MemorySlot::new(), DEFAULT_SLOT_KEY);
        assert_eq!(persistence.load(), CvDocument::default());
    }

    #[test]
    fn test_load_garbage_gives_default() {
        let persistence = Persistence::new(MemorySlot::with_entry(DEFAULT_SLOT_KEY, "{not json"), DEFAULT_SLOT_KEY);
        assert_eq!(persistence.load(), CvDocument::default());
    }

    #[test]
    fn test_load_garbage_is_backed_up_before_overwrite() {
        let persistence = Persistence::new(MemorySlot::with_entry(DEFAULT_SLOT_KEY, r#"{"skills": "Rust"}"#), DEFAULT_SLOT_KEY);
        let doc = persistence.load();
        persistence.save(&doc).unwrap();

        let backup = persistence.slot().read(&persistence.backup_key()).unwrap();
        assert_eq!(backup.as_deref(), Some(r#"{"skills": "Rust"}"#));
    }

    #[test]
    fn test_load_keeps_document_with_unknown_level_or_null_date() {
        let stored = r#"{
          "personalInfo": {"name": "Jane Doe", "phone": "", "email": "", "address": "", "linkedin": "", "github": ""},
          "summary": "Ten years of work",
          "skills": [{"id": "s1", "name": "Rust", "category": "technical", "level": "master"}],
          "education": [{"id": "e1", "school": "MIT", "degree": "BSc", "startDate": "2010-09", "endDate": null, "certifications": [""]}]
        }"#;
        let persistence = Persistence::new(MemorySlot::with_entry(DEFAULT_SLOT_KEY, stored), DEFAULT_SLOT_KEY);

        let doc = persistence.load();
        assert_eq!(doc.personal_info.name, "Jane Doe");
        assert_eq!(doc.summary, "Ten years of work");
        assert_eq!(doc.skills[0].name, "Rust");
        assert_eq!(doc.skills[0].level, SkillLevel::Intermediate);
        assert_eq!(doc.education[0].school, "MIT");
        assert_eq!(doc.education[0].end_date, "");
        assert_eq!(persistence.slot().read(&persistence.backup_key()).unwrap(), None);

        persistence.save(&doc).unwrap();
        assert_eq!(persistence.load().personal_info.name, "Jane Doe");
    }

    #[test]
    fn test_save_then_load() {
        let persistence = Persistence::new(MemorySlot::new(), DEFAULT_SLOT_KEY);
        persistence.save(&sample()).unwrap();
        assert_eq!(persistence.load(), sample());
    }

    #[test]
    fn test_save_failure_is_persistence_write_failure() {
        let persistence = Persistence::new(MemorySlot::failing(), DEFAULT_SLOT_KEY);
        let err = persistence.save(&sample()).unwrap_err();
        assert_eq!(err.code(), "PERSISTENCE_WRITE_FAILURE");
        assert!(!err.is_blocking());
    }

    #[test]
    fn test_file_slot_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = Persistence::new(FileSlot::new(dir.path()), DEFAULT_SLOT_KEY);
        persistence.save(&sample()).unwrap();

        let reopened = Persistence::new(FileSlot::new(dir.path()), DEFAULT_SLOT_KEY);
        assert_eq!(reopened.load(), sample());
    }

    #[test]
    fn test_export_import_round_trip() {
        let artifact = export_json(&sample());
        assert_eq!(artifact.file_name, "Jane Doe_data.json");
        assert!(String::from_utf8(artifact.bytes.clone()).unwrap().contains("\n  \"personalInfo\""));

        let imported = import_json(&artifact.bytes).unwrap();
        assert_eq!(imported, sample());
    }

    #[test]
    fn test_export_name_falls_back_to_cv() {
        assert_eq!(export_json(&CvDocument::default()).file_name, "CV_data.json");
    }

    #[test]
    fn test_import_invalid_json_is_malformed() {
        let err = import_json(b"this is not json").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_IMPORT_FILE");
    }

    #[test]
    fn test_import_wrong_shape_is_malformed() {
        assert!(import_json(b"[1, 2, 3]").is_err());
        assert!(import_json(br#"{"workExperience": "not a list"}"#).is_err());
    }

    #[test]
    fn test_import_file_with_millisecond_ids() {
        let file = br#"{
          "personalInfo": {"name": "Ali", "phone": "", "email": "", "address": "", "linkedin": "", "github": ""},
          "summary": "",
          "workExperience": [{"id": "1700000000000", "company": "X", "position": "Dev",
            "startDate": "2020-01", "endDate": "", "current": true,
            "responsibilities": [""], "achievements": [""]}],
          "education": [], "skills": [], "certificates": [], "languages": []
        }"#;
        let doc = import_json(file).unwrap();
        assert_eq!(doc.personal_info.name, "Ali");
        assert_eq!(doc.work_experience[0].id, "1700000000000");
        assert!(doc.work_experience[0].current);
    }
}
