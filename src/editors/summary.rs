// src/editors/summary.rs
use std::fmt::Write;

use super::{Section, SectionEditor};
use crate::labels::Labels;
use crate::types::CvDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEdit {
    Set(String),
}

pub struct SummaryEditor;

impl SectionEditor for SummaryEditor {
    type Slice = String;
    type Edit = SummaryEdit;

    const SECTION: Section = Section::Summary;

    fn slice(doc: &CvDocument) -> &String {
        &doc.summary
    }

    fn apply(_: &String, edit: SummaryEdit) -> String {
        match edit {
            SummaryEdit::Set(text) => text,
        }
    }

    fn replace(doc: CvDocument, summary: String) -> CvDocument {
        CvDocument { summary, ..doc }
    }

    fn view(slice: &String, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.summary);
        let _ = writeln!(out, "  Write a brief professional summary (2-3 sentences)");
        for line in slice.lines() {
            let _ = writeln!(out, "  | {}", line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_summary() {
        let next = SummaryEditor::apply(&"old".to_string(), SummaryEdit::Set("new text".into()));
        assert_eq!(next, "new text");
    }

    #[test]
    fn test_replace_moves_other_slices() {
        let mut doc = CvDocument::default();
        doc.personal_info.name = "Jane".into();
        let next = SummaryEditor::replace(doc, "Summary".into());
        assert_eq!(next.summary, "Summary");
        assert_eq!(next.personal_info.name, "Jane");
    }
}
