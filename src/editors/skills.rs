// src/editors/skills.rs
use std::fmt::Write;

use super::{add_entry, field_line, remove_entry, update_entry, Patchable, Section, SectionEditor};
use crate::labels::Labels;
use crate::types::{CvDocument, Skill, SkillCategory, SkillLevel};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEdit {
    Add { category: SkillCategory },
    Update { id: String, patch: SkillPatch },
    Remove { id: String },
}

impl Patchable for Skill {
    type Patch = SkillPatch;

    fn merge(&mut self, patch: SkillPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

pub struct SkillsEditor;

impl SectionEditor for SkillsEditor {
    type Slice = Vec<Skill>;
    type Edit = SkillEdit;

    const SECTION: Section = Section::Skills;

    fn slice(doc: &CvDocument) -> &Vec<Skill> {
        &doc.skills
    }

    fn apply(slice: &Vec<Skill>, edit: SkillEdit) -> Vec<Skill> {
        match edit {
            SkillEdit::Add { category } => add_entry(
                slice,
                Skill {
                    category,
                    level: SkillLevel::Intermediate,
                    ..Default::default()
                },
            ),
            SkillEdit::Update { id, patch } => update_entry(slice, &id, patch),
            SkillEdit::Remove { id } => remove_entry(slice, &id),
        }
    }

    fn replace(doc: CvDocument, skills: Vec<Skill>) -> CvDocument {
        CvDocument { skills, ..doc }
    }

    fn view(slice: &Vec<Skill>, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.skills);

        for category in SkillCategory::ALL {
            let _ = writeln!(out, "{}", labels.skill_group(category));
            let group: Vec<&Skill> = slice.iter().filter(|s| s.category == category).collect();
            if group.is_empty() {
                let _ = writeln!(out, "  (none)");
            }
            for skill in group {
                let _ = writeln!(out, "- ({})", skill.id);
                field_line(&mut out, "Name", true, &skill.name);
                field_line(&mut out, "Level", false, labels.level(skill.level));
            }
        }

        out
    }
}
