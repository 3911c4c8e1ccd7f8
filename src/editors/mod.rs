// src/editors/mod.rs
//! Section editors: create/update/delete over one slice of the document.
//!
//! Every operation is a pure function from the current slice to the next
//! one. The shell moves the result into a fresh `CvDocument`.

pub mod certificates;
pub mod education;
pub mod languages;
pub mod personal_info;
pub mod skills;
pub mod summary;
pub mod work_experience;

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::labels::Labels;
use crate::types::{fresh_id, CvDocument, Identified};

pub use certificates::{CertificateEdit, CertificatePatch, CertificatesEditor};
pub use education::{EducationEdit, EducationEditor, EducationPatch};
pub use languages::{LanguageEdit, LanguagePatch, LanguagesEditor};
pub use personal_info::{PersonalField, PersonalInfoEdit, PersonalInfoEditor};
pub use skills::{SkillEdit, SkillPatch, SkillsEditor};
pub use summary::{SummaryEdit, SummaryEditor};
pub use work_experience::{WorkExperienceEdit, WorkExperienceEditor, WorkExperiencePatch, WorkList};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    PersonalInfo,
    Summary,
    WorkExperience,
    Education,
    Skills,
    Certificates,
    Languages,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::PersonalInfo,
        Section::Summary,
        Section::WorkExperience,
        Section::Education,
        Section::Skills,
        Section::Certificates,
        Section::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal",
            Self::Summary => "summary",
            Self::WorkExperience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Certificates => "certificates",
            Self::Languages => "languages",
        }
    }

    pub fn title<'a>(&self, labels: &'a Labels) -> &'a str {
        match self {
            Self::PersonalInfo => &labels.personal_info,
            Self::Summary => &labels.summary,
            Self::WorkExperience => &labels.work_experience,
            Self::Education => &labels.education,
            Self::Skills => &labels.skills,
            Self::Certificates => &labels.certificates,
            Self::Languages => &labels.languages,
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|section| section.as_str() == wanted)
            .copied()
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(Section::as_str).collect();
                format!("Unknown section: '{}'. Allowed: {}", s, allowed.join(", "))
            })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editor per section: read its slice, compute the replacement, put it back.
pub trait SectionEditor {
    type Slice: Clone + PartialEq;
    type Edit;

    const SECTION: Section;

    fn slice(doc: &CvDocument) -> &Self::Slice;

    fn apply(slice: &Self::Slice, edit: Self::Edit) -> Self::Slice;

    /// Build the next document, moving every untouched slice out of `doc`.
    fn replace(doc: CvDocument, slice: Self::Slice) -> CvDocument;

    /// Form view of the slice: one line per stored input, blank rows included.
    fn view(slice: &Self::Slice, labels: &Labels) -> String;
}

// ===== Keyed list operations =====

/// A list entry that can absorb a partial update.
pub trait Patchable: Identified + Clone {
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

pub fn add_entry<T: Identified + Clone>(list: &[T], mut entry: T) -> Vec<T> {
    entry.set_id(fresh_id(list));
    let mut next = list.to_vec();
    next.push(entry);
    next
}

pub fn update_entry<T: Patchable>(list: &[T], id: &str, patch: T::Patch) -> Vec<T> {
    let mut next = list.to_vec();
    if let Some(entry) = next.iter_mut().find(|entry| entry.id() == id) {
        entry.merge(patch);
    }
    next
}

pub fn remove_entry<T: Identified + Clone>(list: &[T], id: &str) -> Vec<T> {
    list.iter().filter(|entry| entry.id() != id).cloned().collect()
}

// ===== Nested text lists =====

/// Entries owning one or more repeatable text lists.
pub trait ItemLists: Identified + Clone {
    type List: Copy;

    fn items_mut(&mut self, list: Self::List) -> &mut Vec<String>;
}

fn with_items<T: ItemLists>(
    list: &[T],
    id: &str,
    which: T::List,
    change: impl FnOnce(&mut Vec<String>),
) -> Vec<T> {
    let mut next = list.to_vec();
    if let Some(entry) = next.iter_mut().find(|entry| entry.id() == id) {
        change(entry.items_mut(which));
    }
    next
}

pub fn add_item<T: ItemLists>(list: &[T], id: &str, which: T::List) -> Vec<T> {
    with_items(list, id, which, |items| items.push(String::new()))
}

pub fn update_item<T: ItemLists>(
    list: &[T],
    id: &str,
    which: T::List,
    index: usize,
    value: String,
) -> Vec<T> {
    with_items(list, id, which, |items| {
        if let Some(slot) = items.get_mut(index) {
            *slot = value;
        }
    })
}

/// Refused when the list would become empty.
pub fn remove_item<T: ItemLists>(list: &[T], id: &str, which: T::List, index: usize) -> Vec<T> {
    with_items(list, id, which, |items| {
        if items.len() > 1 && index < items.len() {
            items.remove(index);
        }
    })
}

// ===== View helpers =====

pub(crate) fn caption(label: &str, required: bool) -> String {
    if required {
        format!("{} *", label)
    } else {
        label.to_string()
    }
}

pub(crate) fn field_line(out: &mut String, label: &str, required: bool, value: &str) {
    let _ = writeln!(out, "  {:<22} {}", caption(label, required), value);
}

pub(crate) fn item_lines(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "  {}", title);
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(out, "    [{}] {}", index, item);
    }
}

pub(crate) fn entry_header(out: &mut String, position: usize, id: &str) {
    let _ = writeln!(out, "#{} ({})", position + 1, id);
}
