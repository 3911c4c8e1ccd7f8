// src/editors/personal_info.rs
use std::fmt::Write;
use std::str::FromStr;

use super::{field_line, Section, SectionEditor};
use crate::labels::Labels;
use crate::types::{CvDocument, PersonalInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    Name,
    Phone,
    Email,
    Address,
    Linkedin,
    Github,
}

impl PersonalField {
    pub const ALL: [PersonalField; 6] = [
        PersonalField::Name,
        PersonalField::Phone,
        PersonalField::Email,
        PersonalField::Address,
        PersonalField::Linkedin,
        PersonalField::Github,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
        }
    }

    fn caption(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Phone => "Phone Number",
            Self::Email => "Email Address",
            Self::Address => "Address",
            Self::Linkedin => "LinkedIn Profile",
            Self::Github => "GitHub Profile",
        }
    }

    /// Advisory only; nothing rejects an empty value
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Name | Self::Phone | Self::Email)
    }

    fn get<'a>(&self, info: &'a PersonalInfo) -> &'a str {
        match self {
            Self::Name => &info.name,
            Self::Phone => &info.phone,
            Self::Email => &info.email,
            Self::Address => &info.address,
            Self::Linkedin => &info.linkedin,
            Self::Github => &info.github,
        }
    }

    fn slot<'a>(&self, info: &'a mut PersonalInfo) -> &'a mut String {
        match self {
            Self::Name => &mut info.name,
            Self::Phone => &mut info.phone,
            Self::Email => &mut info.email,
            Self::Address => &mut info.address,
            Self::Linkedin => &mut info.linkedin,
            Self::Github => &mut info.github,
        }
    }
}

impl FromStr for PersonalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|field| field.as_str() == wanted)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown field: '{}'. Allowed: name, phone, email, address, linkedin, github",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalInfoEdit {
    Set { field: PersonalField, value: String },
    /// Inline-encoded image, see `photo::ingest`
    SetPhoto(String),
    ClearPhoto,
}

pub struct PersonalInfoEditor;

impl SectionEditor for PersonalInfoEditor {
    type Slice = PersonalInfo;
    type Edit = PersonalInfoEdit;

    const SECTION: Section = Section::PersonalInfo;

    fn slice(doc: &CvDocument) -> &PersonalInfo {
        &doc.personal_info
    }

    fn apply(slice: &PersonalInfo, edit: PersonalInfoEdit) -> PersonalInfo {
        let mut next = slice.clone();
        match edit {
            PersonalInfoEdit::Set { field, value } => *field.slot(&mut next) = value,
            PersonalInfoEdit::SetPhoto(data_url) => next.profile_photo = Some(data_url),
            PersonalInfoEdit::ClearPhoto => next.profile_photo = None,
        }
        next
    }

    fn replace(doc: CvDocument, personal_info: PersonalInfo) -> CvDocument {
        CvDocument { personal_info, ..doc }
    }

    fn view(slice: &PersonalInfo, labels: &Labels) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", labels.personal_info);

        let photo = match &slice.profile_photo {
            Some(data_url) => format!("(inline image, {} bytes)", data_url.len()),
            None => "(none)".to_string(),
        };
        field_line(&mut out, "Profile Photo", false, &photo);

        for field in PersonalField::ALL {
            field_line(&mut out, field.caption(), field.is_required(), field.get(slice));
        }

        out
    }
}
