// src/editors/certificates.rs
use std::fmt::Write;

use super::{
    add_entry, entry_header, field_line, remove_entry, update_entry, Patchable, Section,
    SectionEditor,
};
use crate::labels::Labels;
use crate::types::{Certificate, CvDocument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificatePatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    /// `Some(None)` clears the link
    pub url: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateEdit {
    Add,
    Update { id: String, patch: CertificatePatch },
    Remove { id: String },
}

impl Patchable for Certificate {
    type Patch = CertificatePatch;

    fn merge(&mut self, patch: CertificatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(issuer) = patch.issuer {
            self.issuer = issuer;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
    }
}

pub struct CertificatesEditor;

impl SectionEditor for CertificatesEditor {
    type Slice = Vec<Certificate>;
    type Edit = CertificateEdit;

    const SECTION: Section = Section::Certificates;

    fn slice(doc: &CvDocument) -> &Vec<Certificate> {
        &doc.certificates
    }

    fn apply(slice: &Vec<Certificate>, edit: CertificateEdit) -> Vec<Certificate> {
        match edit {
            CertificateEdit::Add => add_entry(slice, Certificate::default()),
            CertificateEdit::Update { id, patch } => update_entry(slice, &id, patch),
            CertificateEdit::Remove { id } => remove_entry(slice, &id),
        }
    }

    fn replace(doc: CvDocument, certificates: Vec<Certificate>) -> CvDocument {
        CvDocument { certificates, ..doc }
    }

    fn view(slice: &Vec<Certificate>, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.certificates);

        for (position, cert) in slice.iter().enumerate() {
            entry_header(&mut out, position, &cert.id);
            field_line(&mut out, "Name", true, &cert.name);
            field_line(&mut out, "Issuer", true, &cert.issuer);
            field_line(&mut out, "Date", false, &cert.date);
            field_line(&mut out, "URL", false, cert.url.as_deref().unwrap_or_default());
        }

        out
    }
}
