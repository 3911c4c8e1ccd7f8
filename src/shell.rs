// src/shell.rs
//! The application root: owns the one document and routes every change
//! through an editor, then the durable slot.

use anyhow::Result;
use chrono::{DateTime, Duration, Local, Utc};
use std::path::Path;
use tracing::{debug, info};

use crate::editors::{
    CertificateEdit, CertificatesEditor, EducationEdit, EducationEditor, LanguageEdit,
    LanguagesEditor, PersonalInfoEdit, PersonalInfoEditor, Section, SectionEditor, SkillEdit,
    SkillsEditor, SummaryEdit, SummaryEditor, WorkExperienceEdit, WorkExperienceEditor,
};
use crate::error::CvError;
use crate::export::{Artifact, ExportPipeline, Rasterizer};
use crate::labels::Labels;
use crate::photo;
use crate::preview::{render, RenderedCv};
use crate::storage::{self, DurableSlot, Persistence};
use crate::types::CvDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    PersonalInfo(PersonalInfoEdit),
    Summary(SummaryEdit),
    WorkExperience(WorkExperienceEdit),
    Education(EducationEdit),
    Skills(SkillEdit),
    Certificates(CertificateEdit),
    Languages(LanguageEdit),
}

impl Edit {
    pub fn section(&self) -> Section {
        match self {
            Self::PersonalInfo(_) => Section::PersonalInfo,
            Self::Summary(_) => Section::Summary,
            Self::WorkExperience(_) => Section::WorkExperience,
            Self::Education(_) => Section::Education,
            Self::Skills(_) => Section::Skills,
            Self::Certificates(_) => Section::Certificates,
            Self::Languages(_) => Section::Languages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational; editing continues normally
    Warning,
    /// Needs the user's acknowledgement
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub code: &'static str,
    pub message: String,
}

impl From<&CvError> for Notice {
    fn from(err: &CvError) -> Self {
        let level = if err.is_blocking() {
            NoticeLevel::Blocking
        } else {
            NoticeLevel::Warning
        };
        let message = match err {
            CvError::MalformedImportFile(_) => {
                "Error loading file. Please make sure it's a valid CV data file.".to_string()
            }
            other => other.to_string(),
        };
        Self {
            level,
            code: err.code(),
            message,
        }
    }
}

pub struct Shell<S, R> {
    document: CvDocument,
    active: Section,
    persistence: Persistence<S>,
    pipeline: ExportPipeline<R>,
    labels: Labels,
    notices: Vec<Notice>,
    saved_at: Option<DateTime<Utc>>,
    saved_hold: Duration,
}

impl<S: DurableSlot, R: Rasterizer> Shell<S, R> {
    /// Start a session from whatever the durable slot holds.
    pub fn open(persistence: Persistence<S>, pipeline: ExportPipeline<R>, labels: Labels) -> Self {
        let document = persistence.load();
        Self {
            document,
            active: Section::default(),
            persistence,
            pipeline,
            labels,
            notices: Vec::new(),
            saved_at: None,
            saved_hold: Duration::milliseconds(1000),
        }
    }

    pub fn with_saved_hold(mut self, hold: Duration) -> Self {
        self.saved_hold = hold;
        self
    }

    pub fn document(&self) -> &CvDocument {
        &self.document
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn pipeline(&self) -> &ExportPipeline<R> {
        &self.pipeline
    }

    pub fn active_section(&self) -> Section {
        self.active
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn has_blocking_notice(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Blocking)
    }

    // ===== Editing =====

    /// Apply one edit in its section and save. Returns whether the document changed.
    pub fn apply(&mut self, edit: Edit) -> bool {
        self.active = edit.section();

        let changed = match edit {
            Edit::PersonalInfo(edit) => self.apply_section::<PersonalInfoEditor>(edit),
            Edit::Summary(edit) => self.apply_section::<SummaryEditor>(edit),
            Edit::WorkExperience(edit) => self.apply_section::<WorkExperienceEditor>(edit),
            Edit::Education(edit) => self.apply_section::<EducationEditor>(edit),
            Edit::Skills(edit) => self.apply_section::<SkillsEditor>(edit),
            Edit::Certificates(edit) => self.apply_section::<CertificatesEditor>(edit),
            Edit::Languages(edit) => self.apply_section::<LanguagesEditor>(edit),
        };

        if changed {
            self.persist();
        } else {
            debug!("Edit in {} left the document unchanged", self.active);
        }
        changed
    }

    fn apply_section<E: SectionEditor>(&mut self, edit: E::Edit) -> bool {
        let current = E::slice(&self.document);
        let next = E::apply(current, edit);
        if &next == current {
            return false;
        }
        let doc = std::mem::take(&mut self.document);
        self.document = E::replace(doc, next);
        true
    }

    /// Read an image file and store it as the profile photo.
    pub fn attach_photo(&mut self, path: &Path) -> Result<()> {
        let data_url = photo::ingest(path)?;
        self.apply(Edit::PersonalInfo(PersonalInfoEdit::SetPhoto(data_url)));
        Ok(())
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.document) {
            Ok(()) => self.mark_saved(Utc::now()),
            Err(e) => self.notify(&e),
        }
    }

    fn notify(&mut self, err: &CvError) {
        self.notices.push(Notice::from(err));
    }

    // ===== Navigation and preview =====

    pub fn select(&mut self, section: Section) {
        self.active = section;
    }

    /// Form view of the active section
    pub fn active_view(&self) -> String {
        self.view(self.active)
    }

    pub fn view(&self, section: Section) -> String {
        let doc = &self.document;
        let labels = &self.labels;
        match section {
            Section::PersonalInfo => PersonalInfoEditor::view(PersonalInfoEditor::slice(doc), labels),
            Section::Summary => SummaryEditor::view(SummaryEditor::slice(doc), labels),
            Section::WorkExperience => {
                WorkExperienceEditor::view(WorkExperienceEditor::slice(doc), labels)
            }
            Section::Education => EducationEditor::view(EducationEditor::slice(doc), labels),
            Section::Skills => SkillsEditor::view(SkillsEditor::slice(doc), labels),
            Section::Certificates => {
                CertificatesEditor::view(CertificatesEditor::slice(doc), labels)
            }
            Section::Languages => LanguagesEditor::view(LanguagesEditor::slice(doc), labels),
        }
    }

    pub fn preview(&self) -> RenderedCv {
        render(&self.document, &self.labels)
    }

    // ===== Files =====

    pub fn export_json(&self) -> Artifact {
        storage::export_json(&self.document)
    }

    /// Replace the whole document with the file's content. On a malformed
    /// file the current document stays and a blocking notice is recorded.
    pub fn import_json(&mut self, bytes: &[u8]) -> bool {
        match storage::import_json(bytes) {
            Ok(doc) => {
                info!("Imported document ({} bytes)", bytes.len());
                self.document = doc;
                self.persist();
                true
            }
            Err(e) => {
                self.notify(&e);
                false
            }
        }
    }

    /// Rasterize the current preview. `None` means a blocking notice was recorded.
    pub async fn export_pdf(&mut self) -> Option<Artifact> {
        let surface = self.preview();
        let today = Local::now().date_naive();
        match self
            .pipeline
            .export_pdf(&surface, self.document.file_stem(), today)
            .await
        {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                self.notify(&e);
                None
            }
        }
    }

    // ===== Saved indicator =====

    pub fn mark_saved(&mut self, at: DateTime<Utc>) {
        self.saved_at = Some(at);
    }

    pub fn saved_indicator_visible(&self, now: DateTime<Utc>) -> bool {
        self.saved_at
            .is_some_and(|at| now >= at && now - at < self.saved_hold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::test_support::last_id;
    use crate::editors::{PersonalField, SkillPatch, WorkExperiencePatch, WorkList};
    use crate::export::test_support::FakeRasterizer;
    use crate::export::PdfOptions;
    use crate::preview::SectionBody;
    use crate::storage::MemorySlot;
    use crate::types::{SkillCategory, SkillLevel};

    fn shell_with(slot: MemorySlot, rasterizer: FakeRasterizer) -> Shell<MemorySlot, FakeRasterizer> {
        Shell::open(
            Persistence::new(slot, "cv-builder-data"),
            ExportPipeline::new(rasterizer, PdfOptions::default()),
            Labels::english(),
        )
    }

    fn shell() -> Shell<MemorySlot, FakeRasterizer> {
        shell_with(MemorySlot::new(), FakeRasterizer::ok())
    }

    fn set_name(shell: &mut Shell<MemorySlot, FakeRasterizer>, name: &str) {
        shell.apply(Edit::PersonalInfo(PersonalInfoEdit::Set {
            field: PersonalField::Name,
            value: name.to_string(),
        }));
    }

    #[test]
    fn test_empty_session_preview() {
        let shell = shell();
        let cv = shell.preview();
        assert_eq!(cv.header.name, "Your Name");
        assert!(cv.sections.is_empty());
        assert_eq!(shell.active_section(), Section::PersonalInfo);
    }

    #[test]
    fn test_apply_saves_every_change() {
        let mut shell = shell();
        set_name(&mut shell, "Jane Doe");

        let stored = shell.persistence().slot().read("cv-builder-data").unwrap().unwrap();
        assert!(stored.contains("Jane Doe"));
        assert!(shell.notices().is_empty());
        assert!(shell.saved_indicator_visible(Utc::now()));
    }

    #[test]
    fn test_unchanged_edit_is_not_saved() {
        let mut shell = shell();
        let changed = shell.apply(Edit::WorkExperience(WorkExperienceEdit::Remove {
            id: "missing".into(),
        }));
        assert!(!changed);
        assert_eq!(shell.persistence().slot().read("cv-builder-data").unwrap(), None);
    }

    #[test]
    fn test_session_resumes_from_slot() {
        let mut first = shell();
        set_name(&mut first, "Jane Doe");
        let stored = first.persistence().slot().read("cv-builder-data").unwrap().unwrap();

        let second = shell_with(MemorySlot::with_entry("cv-builder-data", &stored), FakeRasterizer::ok());
        assert_eq!(second.document().personal_info.name, "Jane Doe");
    }

    #[test]
    fn test_current_job_renders_present() {
        let mut shell = shell();
        shell.apply(Edit::WorkExperience(WorkExperienceEdit::Add));
        let id = last_id(&shell.document().work_experience);
        shell.apply(Edit::WorkExperience(WorkExperienceEdit::Update {
            id,
            patch: WorkExperiencePatch {
                company: Some("Acme".into()),
                start_date: Some("2021-03".into()),
                current: Some(true),
                ..Default::default()
            },
        }));

        let cv = shell.preview();
        let section = cv.section(Section::WorkExperience).unwrap();
        match &section.body {
            SectionBody::Timeline(entries) => assert_eq!(entries[0].dates, "Mar 2021 - Present"),
            other => panic!("unexpected body: {:?}", other),
        }
        assert_eq!(shell.active_section(), Section::WorkExperience);
    }

    #[test]
    fn test_blank_items_hidden_but_kept() {
        let mut shell = shell();
        shell.apply(Edit::WorkExperience(WorkExperienceEdit::Add));
        let id = last_id(&shell.document().work_experience);
        shell.apply(Edit::WorkExperience(WorkExperienceEdit::AddItem {
            id: id.clone(),
            list: WorkList::Responsibilities,
        }));
        shell.apply(Edit::WorkExperience(WorkExperienceEdit::UpdateItem {
            id,
            list: WorkList::Responsibilities,
            index: 1,
            value: "Led team".into(),
        }));

        let before = shell.document().clone();
        let cv = shell.preview();
        assert_eq!(shell.document(), &before);
        assert_eq!(shell.document().work_experience[0].responsibilities, vec!["", "Led team"]);

        match &cv.section(Section::WorkExperience).unwrap().body {
            SectionBody::Timeline(entries) => {
                assert_eq!(entries[0].lists.len(), 1);
                assert_eq!(entries[0].lists[0].items, vec!["Led team"]);
            }
            other => panic!("unexpected body: {:?}", other),
        }
        assert!(shell.active_view().contains("[0]"));
    }

    #[test]
    fn test_skill_categories_never_mix() {
        let mut shell = shell();
        shell.apply(Edit::Skills(SkillEdit::Add { category: SkillCategory::Soft }));
        let id = last_id(&shell.document().skills);
        shell.apply(Edit::Skills(SkillEdit::Update {
            id,
            patch: SkillPatch {
                name: Some("Mentoring".into()),
                level: Some(SkillLevel::Expert),
                ..Default::default()
            },
        }));

        match &shell.preview().section(Section::Skills).unwrap().body {
            SectionBody::SkillGroups(groups) => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].category, SkillCategory::Soft);
                assert_eq!(groups[0].skills[0].label, "Mentoring");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_persistence_failure_is_a_warning() {
        let mut shell = shell_with(MemorySlot::failing(), FakeRasterizer::ok());
        assert!(shell.apply(Edit::Summary(SummaryEdit::Set("Hello".into()))));

        assert_eq!(shell.document().summary, "Hello");
        assert_eq!(shell.notices().len(), 1);
        assert_eq!(shell.notices()[0].level, NoticeLevel::Warning);
        assert_eq!(shell.notices()[0].code, "PERSISTENCE_WRITE_FAILURE");
        assert!(!shell.has_blocking_notice());
        assert!(!shell.saved_indicator_visible(Utc::now()));
    }

    #[test]
    fn test_import_invalid_json_keeps_document() {
        let mut shell = shell();
        set_name(&mut shell, "Jane Doe");
        let before = shell.document().clone();

        assert!(!shell.import_json(b"{ definitely not json"));
        assert_eq!(shell.document(), &before);

        let notice = &shell.notices()[0];
        assert_eq!(notice.level, NoticeLevel::Blocking);
        assert_eq!(notice.code, "MALFORMED_IMPORT_FILE");
        assert_eq!(notice.message, "Error loading file. Please make sure it's a valid CV data file.");
    }

    #[test]
    fn test_export_import_round_trip_replaces_document() {
        let mut source = shell();
        set_name(&mut source, "Jane Doe");
        source.apply(Edit::Languages(LanguageEdit::Add));
        let artifact = source.export_json();
        assert_eq!(artifact.file_name, "Jane Doe_data.json");

        let mut target = shell();
        target.apply(Edit::Summary(SummaryEdit::Set("to be replaced".into())));
        assert!(target.import_json(&artifact.bytes));
        assert_eq!(target.document(), source.document());

        let stored = target.persistence().slot().read("cv-builder-data").unwrap().unwrap();
        assert!(stored.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_export_pdf_success() {
        let mut shell = shell();
        set_name(&mut shell, "Jane Doe");

        let artifact = shell.export_pdf().await.unwrap();
        assert_eq!(artifact.file_name, "Jane Doe_Resume.pdf");
        assert_eq!(artifact.bytes, b"%PDF-fake Jane Doe".to_vec());
        assert!(shell.notices().is_empty());

        shell.export_pdf().await.unwrap();
        assert_eq!(shell.pipeline().rasterizer().calls(), 2);
    }

    #[tokio::test]
    async fn test_export_pdf_failure_is_blocking_and_keeps_document() {
        let mut shell = shell_with(MemorySlot::new(), FakeRasterizer::failing("collaborator rejected"));
        set_name(&mut shell, "Jane Doe");
        let before = shell.document().clone();

        assert!(shell.export_pdf().await.is_none());
        assert_eq!(shell.pipeline().rasterizer().calls(), 1);
        assert_eq!(shell.document(), &before);
        assert!(shell.has_blocking_notice());

        let notices = shell.take_notices();
        assert_eq!(notices[0].code, "EXPORT_RENDER_FAILURE");
        assert!(notices[0].message.contains("collaborator rejected"));
        assert!(shell.notices().is_empty());
    }

    #[test]
    fn test_select_changes_active_view() {
        let mut shell = shell();
        assert!(shell.active_view().contains("Full Name *"));
        shell.select(Section::Summary);
        assert_eq!(shell.active_section(), Section::Summary);
        assert_eq!(shell.active_view(), shell.view(Section::Summary));
    }

    #[test]
    fn test_saved_indicator_expires() {
        let mut shell = shell().with_saved_hold(Duration::milliseconds(1000));
        let at = Utc::now();
        assert!(!shell.saved_indicator_visible(at));

        shell.mark_saved(at);
        assert!(shell.saved_indicator_visible(at + Duration::milliseconds(999)));
        assert!(!shell.saved_indicator_visible(at + Duration::milliseconds(1000)));
    }

    #[test]
    fn test_attach_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.gif");
        std::fs::write(&path, b"GIF89a\x01\x00\x01\x00").unwrap();

        let mut shell = shell();
        shell.attach_photo(&path).unwrap();
        let photo = shell.document().personal_info.profile_photo.clone().unwrap();
        assert!(photo.starts_with("data:image/gif;base64,"));
        assert_eq!(shell.preview().header.photo, Some(photo));

        assert!(shell.attach_photo(&dir.path().join("missing.png")).is_err());
    }
}
