// src/editors/languages.rs
use std::fmt::Write;

use super::{add_entry, entry_header, field_line, remove_entry, update_entry, Patchable, Section, SectionEditor};
use crate::labels::Labels;
use crate::types::{CvDocument, Language, Proficiency};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub proficiency: Option<Proficiency>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageEdit {
    Add,
    Update { id: String, patch: LanguagePatch },
    Remove { id: String },
}

impl Patchable for Language {
    type Patch = LanguagePatch;

    fn merge(&mut self, patch: LanguagePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(proficiency) = patch.proficiency {
            self.proficiency = proficiency;
        }
    }
}

pub struct LanguagesEditor;

impl SectionEditor for LanguagesEditor {
    type Slice = Vec<Language>;
    type Edit = LanguageEdit;

    const SECTION: Section = Section::Languages;

    fn slice(doc: &CvDocument) -> &Vec<Language> {
        &doc.languages
    }

    fn apply(slice: &Vec<Language>, edit: LanguageEdit) -> Vec<Language> {
        match edit {
            LanguageEdit::Add => add_entry(
                slice,
                Language {
                    proficiency: Proficiency::Conversational,
                    ..Default::default()
                },
            ),
            LanguageEdit::Update { id, patch } => update_entry(slice, &id, patch),
            LanguageEdit::Remove { id } => remove_entry(slice, &id),
        }
    }

    fn replace(doc: CvDocument, languages: Vec<Language>) -> CvDocument {
        CvDocument { languages, ..doc }
    }

    fn view(slice: &Vec<Language>, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.languages);

        for (position, language) in slice.iter().enumerate() {
            entry_header(&mut out, position, &language.id);
            field_line(&mut out, "Language", true, &language.name);
            field_line(&mut out, "Proficiency", false, labels.proficiency(language.proficiency));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::test_support::{ids, last_id};

    #[test]
    fn test_add_defaults_to_conversational() {
        let list = LanguagesEditor::apply(&Vec::new(), LanguageEdit::Add);
        assert_eq!(list[0].proficiency, Proficiency::Conversational);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut list = Vec::new();
        for _ in 0..20 {
            list = LanguagesEditor::apply(&list, LanguageEdit::Add);
        }
        let mut all = ids(&list);
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn test_update_and_remove() {
        let list = LanguagesEditor::apply(&Vec::new(), LanguageEdit::Add);
        let list = LanguagesEditor::apply(&list, LanguageEdit::Add);
        let id = last_id(&list);

        let next = LanguagesEditor::apply(
            &list,
            LanguageEdit::Update {
                id: id.clone(),
                patch: LanguagePatch {
                    name: Some("Azerbaijani".into()),
                    proficiency: Some(Proficiency::Native),
                },
            },
        );
        assert_eq!(next[1].name, "Azerbaijani");
        assert_eq!(next[1].proficiency, Proficiency::Native);
        assert_eq!(next[0], list[0]);

        let next = LanguagesEditor::apply(&next, LanguageEdit::Remove { id });
        assert_eq!(next, vec![list[0].clone()]);
    }

    #[test]
    fn test_view_uses_localized_proficiency() {
        let list = LanguagesEditor::apply(&Vec::new(), LanguageEdit::Add);
        let view = LanguagesEditor::view(&list, &Labels::azerbaijani());
        assert!(view.contains("Danışıq"));
        assert!(view.starts_with("Dillər"));
    }
}
