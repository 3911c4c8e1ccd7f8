// src/editors/work_experience.rs
use std::fmt::Write;
use std::str::FromStr;

use super::{
    add_entry, add_item, entry_header, field_line, item_lines, remove_entry, remove_item,
    update_entry, update_item, ItemLists, Patchable, Section, SectionEditor,
};
use crate::labels::Labels;
use crate::types::{CvDocument, WorkExperience};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkList {
    Responsibilities,
    Achievements,
}

impl FromStr for WorkList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "responsibilities" | "responsibility" => Ok(Self::Responsibilities),
            "achievements" | "achievement" => Ok(Self::Achievements),
            other => Err(format!(
                "Unknown list: '{}'. Allowed: responsibilities, achievements",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkExperienceEdit {
    Add,
    Update { id: String, patch: WorkExperiencePatch },
    Remove { id: String },
    AddItem { id: String, list: WorkList },
    UpdateItem { id: String, list: WorkList, index: usize, value: String },
    RemoveItem { id: String, list: WorkList, index: usize },
}

impl Patchable for WorkExperience {
    type Patch = WorkExperiencePatch;

    fn merge(&mut self, patch: WorkExperiencePatch) {
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(current) = patch.current {
            self.current = current;
        }
        // An ongoing position has no end date
        if self.current {
            self.end_date.clear();
        }
    }
}

impl ItemLists for WorkExperience {
    type List = WorkList;

    fn items_mut(&mut self, list: WorkList) -> &mut Vec<String> {
        match list {
            WorkList::Responsibilities => &mut self.responsibilities,
            WorkList::Achievements => &mut self.achievements,
        }
    }
}

pub struct WorkExperienceEditor;

impl WorkExperienceEditor {
    pub fn new_entry() -> WorkExperience {
        WorkExperience {
            responsibilities: vec![String::new()],
            achievements: vec![String::new()],
            ..Default::default()
        }
    }
}

impl SectionEditor for WorkExperienceEditor {
    type Slice = Vec<WorkExperience>;
    type Edit = WorkExperienceEdit;

    const SECTION: Section = Section::WorkExperience;

    fn slice(doc: &CvDocument) -> &Vec<WorkExperience> {
        &doc.work_experience
    }

    fn apply(slice: &Vec<WorkExperience>, edit: WorkExperienceEdit) -> Vec<WorkExperience> {
        match edit {
            WorkExperienceEdit::Add => add_entry(slice, Self::new_entry()),
            WorkExperienceEdit::Update { id, patch } => update_entry(slice, &id, patch),
            WorkExperienceEdit::Remove { id } => remove_entry(slice, &id),
            WorkExperienceEdit::AddItem { id, list } => add_item(slice, &id, list),
            WorkExperienceEdit::UpdateItem { id, list, index, value } => {
                update_item(slice, &id, list, index, value)
            }
            WorkExperienceEdit::RemoveItem { id, list, index } => {
                remove_item(slice, &id, list, index)
            }
        }
    }

    fn replace(doc: CvDocument, work_experience: Vec<WorkExperience>) -> CvDocument {
        CvDocument {
            work_experience,
            ..doc
        }
    }

    fn view(slice: &Vec<WorkExperience>, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.work_experience);

        for (position, exp) in slice.iter().enumerate() {
            entry_header(&mut out, position, &exp.id);
            field_line(&mut out, "Company", true, &exp.company);
            field_line(&mut out, "Position", true, &exp.position);
            field_line(&mut out, "Start date", true, &exp.start_date);
            let end = if exp.current { "(disabled)" } else { exp.end_date.as_str() };
            field_line(&mut out, "End date", false, end);
            field_line(&mut out, "Currently working here", false, if exp.current { "yes" } else { "no" });
            item_lines(&mut out, &labels.responsibilities, &exp.responsibilities);
            item_lines(&mut out, &labels.achievements, &exp.achievements);
        }

        out
    }
}
