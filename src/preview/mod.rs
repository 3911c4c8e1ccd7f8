// src/preview/mod.rs
//! Preview renderer: a pure mapping from the document to a displayable CV.
//!
//! `render` never mutates the document. Blank sub-list items are dropped
//! here and only here; the stored lists keep them.

pub mod text;
pub mod typst;

use crate::editors::Section;
use crate::labels::Labels;
use crate::types::{CvDocument, SkillCategory};
use crate::utils::format_month_year;

pub use text::to_text;
pub use typst::to_typst;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCv {
    pub header: Header,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub photo: Option<String>,
    /// Email, phone and address, in that order, when present
    pub contacts: Vec<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub kind: Section,
    pub title: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Paragraph(String),
    Timeline(Vec<TimelineEntry>),
    SkillGroups(Vec<SkillGroup>),
    Dated(Vec<DatedItem>),
    Pairs(Vec<Pair>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub title: String,
    pub organization: String,
    pub dates: String,
    pub lists: Vec<BulletList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletList {
    pub heading: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub title: String,
    pub skills: Vec<Pair>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedItem {
    pub title: String,
    pub subtitle: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub label: String,
    pub value: String,
}

impl RenderedCv {
    pub fn section(&self, kind: Section) -> Option<&RenderedSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

/// Items with whitespace-only text are left out; an empty result drops the list.
fn bullets(heading: &str, items: &[String]) -> Option<BulletList> {
    let kept: Vec<String> = items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .cloned()
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(BulletList {
            heading: heading.to_string(),
            items: kept,
        })
    }
}

fn date_range(start: &str, end: &str, labels: &Labels) -> String {
    format!("{} - {}", format_month_year(start, labels), end)
}

fn header(doc: &CvDocument, labels: &Labels) -> Header {
    let info = &doc.personal_info;

    let contacts = [&info.email, &info.phone, &info.address]
        .into_iter()
        .filter(|value| !value.is_empty())
        .cloned()
        .collect();

    let links = [(&labels.linkedin, &info.linkedin), (&labels.github, &info.github)]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .map(|(label, url)| Link {
            label: label.clone(),
            url: url.clone(),
        })
        .collect();

    Header {
        name: if info.name.is_empty() {
            labels.placeholder_name.clone()
        } else {
            info.name.clone()
        },
        photo: info.profile_photo.clone().filter(|photo| !photo.is_empty()),
        contacts,
        links,
    }
}

fn section(kind: Section, labels: &Labels, body: SectionBody) -> RenderedSection {
    RenderedSection {
        kind,
        title: kind.title(labels).to_string(),
        body,
    }
}

pub fn render(doc: &CvDocument, labels: &Labels) -> RenderedCv {
    let mut sections = Vec::new();

    if !doc.summary.is_empty() {
        sections.push(section(
            Section::Summary,
            labels,
            SectionBody::Paragraph(doc.summary.clone()),
        ));
    }

    if !doc.work_experience.is_empty() {
        let entries = doc
            .work_experience
            .iter()
            .map(|exp| {
                let end = if exp.current {
                    labels.present.clone()
                } else {
                    format_month_year(&exp.end_date, labels)
                };
                TimelineEntry {
                    title: exp.position.clone(),
                    organization: exp.company.clone(),
                    dates: date_range(&exp.start_date, &end, labels),
                    lists: [
                        bullets(&labels.responsibilities, &exp.responsibilities),
                        bullets(&labels.achievements, &exp.achievements),
                    ]
                    .into_iter()
                    .flatten()
                    .collect(),
                }
            })
            .collect();
        sections.push(section(Section::WorkExperience, labels, SectionBody::Timeline(entries)));
    }

    if !doc.education.is_empty() {
        let entries = doc
            .education
            .iter()
            .map(|edu| TimelineEntry {
                title: edu.degree.clone(),
                organization: edu.school.clone(),
                dates: date_range(&edu.start_date, &format_month_year(&edu.end_date, labels), labels),
                lists: bullets(&labels.honors, &edu.certifications).into_iter().collect(),
            })
            .collect();
        sections.push(section(Section::Education, labels, SectionBody::Timeline(entries)));
    }

    if !doc.skills.is_empty() {
        let groups = SkillCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let skills: Vec<Pair> = doc
                    .skills
                    .iter()
                    .filter(|skill| skill.category == category)
                    .map(|skill| Pair {
                        label: skill.name.clone(),
                        value: labels.level(skill.level).to_string(),
                    })
                    .collect();
                (!skills.is_empty()).then(|| SkillGroup {
                    category,
                    title: labels.skill_group(category).to_string(),
                    skills,
                })
            })
            .collect();
        sections.push(section(Section::Skills, labels, SectionBody::SkillGroups(groups)));
    }

    if !doc.certificates.is_empty() {
        let items = doc
            .certificates
            .iter()
            .map(|cert| DatedItem {
                title: cert.name.clone(),
                subtitle: cert.issuer.clone(),
                date: format_month_year(&cert.date, labels),
            })
            .collect();
        sections.push(section(Section::Certificates, labels, SectionBody::Dated(items)));
    }

    if !doc.languages.is_empty() {
        let pairs = doc
            .languages
            .iter()
            .map(|language| Pair {
                label: language.name.clone(),
                value: labels.proficiency(language.proficiency).to_string(),
            })
            .collect();
        sections.push(section(Section::Languages, labels, SectionBody::Pairs(pairs)));
    }

    RenderedCv {
        header: header(doc, labels),
        sections,
    }
}
