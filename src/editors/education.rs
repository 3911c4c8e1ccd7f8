// src/editors/education.rs
use std::fmt::Write;

use super::{
    add_entry, add_item, entry_header, field_line, item_lines, remove_entry, remove_item,
    update_entry, update_item, ItemLists, Patchable, Section, SectionEditor,
};
use crate::labels::Labels;
use crate::types::{CvDocument, Education};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationPatch {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationEdit {
    Add,
    Update { id: String, patch: EducationPatch },
    Remove { id: String },
    AddCertification { id: String },
    UpdateCertification { id: String, index: usize, value: String },
    RemoveCertification { id: String, index: usize },
}

/// Education has a single nested list.
#[derive(Debug, Clone, Copy)]
pub struct Certifications;

impl Patchable for Education {
    type Patch = EducationPatch;

    fn merge(&mut self, patch: EducationPatch) {
        if let Some(school) = patch.school {
            self.school = school;
        }
        if let Some(degree) = patch.degree {
            self.degree = degree;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
    }
}

impl ItemLists for Education {
    type List = Certifications;

    fn items_mut(&mut self, _: Certifications) -> &mut Vec<String> {
        &mut self.certifications
    }
}

pub struct EducationEditor;

impl EducationEditor {
    pub fn new_entry() -> Education {
        Education {
            certifications: vec![String::new()],
            ..Default::default()
        }
    }
}

impl SectionEditor for EducationEditor {
    type Slice = Vec<Education>;
    type Edit = EducationEdit;

    const SECTION: Section = Section::Education;

    fn slice(doc: &CvDocument) -> &Vec<Education> {
        &doc.education
    }

    fn apply(slice: &Vec<Education>, edit: EducationEdit) -> Vec<Education> {
        match edit {
            EducationEdit::Add => add_entry(slice, Self::new_entry()),
            EducationEdit::Update { id, patch } => update_entry(slice, &id, patch),
            EducationEdit::Remove { id } => remove_entry(slice, &id),
            EducationEdit::AddCertification { id } => add_item(slice, &id, Certifications),
            EducationEdit::UpdateCertification { id, index, value } => {
                update_item(slice, &id, Certifications, index, value)
            }
            EducationEdit::RemoveCertification { id, index } => {
                remove_item(slice, &id, Certifications, index)
            }
        }
    }

    fn replace(doc: CvDocument, education: Vec<Education>) -> CvDocument {
        CvDocument { education, ..doc }
    }

    fn view(slice: &Vec<Education>, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.education);

        for (position, edu) in slice.iter().enumerate() {
            entry_header(&mut out, position, &edu.id);
            field_line(&mut out, "School", true, &edu.school);
            field_line(&mut out, "Degree", true, &edu.degree);
            field_line(&mut out, "Start date", true, &edu.start_date);
            field_line(&mut out, "End date", false, &edu.end_date);
            item_lines(&mut out, &labels.honors, &edu.certifications);
        }

        out
    }
}
