// src/preview/text.rs
//! Plain-text surface for terminal previews

use std::fmt::Write;

use super::{RenderedCv, SectionBody};

pub fn to_text(cv: &RenderedCv) -> String {
    let mut out = String::new();
    let header = &cv.header;

    let _ = writeln!(out, "{}", header.name.to_uppercase());
    if header.photo.is_some() {
        let _ = writeln!(out, "[photo]");
    }
    if !header.contacts.is_empty() {
        let _ = writeln!(out, "{}", header.contacts.join(" | "));
    }
    if !header.links.is_empty() {
        let links: Vec<String> = header
            .links
            .iter()
            .map(|link| format!("{}: {}", link.label, link.url))
            .collect();
        let _ = writeln!(out, "{}", links.join(" | "));
    }

    for section in &cv.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", section.title);

        match &section.body {
            SectionBody::Paragraph(text) => {
                let _ = writeln!(out, "{}", text);
            }
            SectionBody::Timeline(entries) => {
                for entry in entries {
                    let _ = writeln!(out, "{}  ({})", entry.title, entry.dates);
                    let _ = writeln!(out, "{}", entry.organization);
                    for list in &entry.lists {
                        let _ = writeln!(out, "  {}", list.heading);
                        for item in &list.items {
                            let _ = writeln!(out, "    * {}", item);
                        }
                    }
                }
            }
            SectionBody::SkillGroups(groups) => {
                for group in groups {
                    let _ = writeln!(out, "{}", group.title);
                    for skill in &group.skills {
                        let _ = writeln!(out, "  {:<30} {}", skill.label, skill.value);
                    }
                }
            }
            SectionBody::Dated(items) => {
                for item in items {
                    let _ = writeln!(out, "{}  ({})", item.title, item.date);
                    let _ = writeln!(out, "  {}", item.subtitle);
                }
            }
            SectionBody::Pairs(pairs) => {
                for pair in pairs {
                    let _ = writeln!(out, "{:<32} {}", pair.label, pair.value);
                }
            }
        }
    }

    out
}
