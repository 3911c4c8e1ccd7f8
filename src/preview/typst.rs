// src/preview/typst.rs
//! Printable surface: Typst markup for the rasterizer.
//!
//! All user text is emitted as Typst string literals, so only `\`, `"` and
//! control characters need escaping.

use std::fmt::Write;

use super::{RenderedCv, SectionBody};
use crate::export::{Orientation, PdfOptions};

/// Escape `value` as a Typst string literal, quotes included
pub fn lit(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `photo_file` is the workspace-relative image path, when one was written.
pub fn to_typst(cv: &RenderedCv, options: &PdfOptions, photo_file: Option<&str>) -> String {
    let mut out = String::new();
    let header = &cv.header;

    let _ = writeln!(out, "#set document(title: {})", lit(&header.name));
    let _ = writeln!(
        out,
        "#set page(paper: {}, margin: {}in, flipped: {})",
        lit(options.format.typst_paper()),
        options.margin_inches,
        options.orientation == Orientation::Landscape
    );
    let _ = writeln!(out, "#set text(size: 10pt)");
    let _ = writeln!(out, "#set list(indent: 0.6em)");
    let _ = writeln!(out);

    // Header
    let mut header_lines = vec![format!(
        "text(size: 22pt, weight: \"bold\", {})",
        lit(&header.name)
    )];
    if !header.contacts.is_empty() {
        header_lines.push(format!("text(size: 9pt, {})", lit(&header.contacts.join("  |  "))));
    }
    if !header.links.is_empty() {
        let links: Vec<String> = header
            .links
            .iter()
            .map(|link| format!("link({}, {})", lit(&link.url), lit(&link.label)))
            .collect();
        header_lines.push(format!("text(size: 9pt, {})", links.join(" + \"  |  \" + ")));
    }
    let header_stack = format!("stack(spacing: 6pt, {})", header_lines.join(", "));

    match photo_file {
        Some(file) => {
            let _ = writeln!(
                out,
                "#grid(columns: (auto, 1fr), gutter: 14pt, align: horizon, box(clip: true, radius: 50%, image({}, width: 2.6cm, height: 2.6cm, fit: \"cover\")), {})",
                lit(file),
                header_stack
            );
        }
        None => {
            let _ = writeln!(out, "#{}", header_stack);
        }
    }
    let _ = writeln!(out, "#line(length: 100%, stroke: 0.6pt)");

    for section in &cv.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "#heading(level: 2, {})", lit(&section.title));

        match &section.body {
            SectionBody::Paragraph(text) => {
                let _ = writeln!(out, "#par(justify: true, {})", lit(text));
            }
            SectionBody::Timeline(entries) => {
                for entry in entries {
                    let _ = writeln!(
                        out,
                        "#grid(columns: (1fr, auto), stack(spacing: 4pt, strong({}), {}), text(size: 9pt, {}))",
                        lit(&entry.title),
                        lit(&entry.organization),
                        lit(&entry.dates)
                    );
                    for list in &entry.lists {
                        let items: Vec<String> = list.items.iter().map(|item| lit(item)).collect();
                        let _ = writeln!(out, "#text(weight: \"semibold\", size: 9pt, {})", lit(&list.heading));
                        let _ = writeln!(out, "#list({})", items.join(", "));
                    }
                    let _ = writeln!(out, "#v(6pt)");
                }
            }
            SectionBody::SkillGroups(groups) => {
                for group in groups {
                    let _ = writeln!(out, "#strong({})", lit(&group.title));
                    let cells: Vec<String> = group
                        .skills
                        .iter()
                        .map(|skill| format!("{}, text(size: 9pt, {})", lit(&skill.label), lit(&skill.value)))
                        .collect();
                    let _ = writeln!(out, "#grid(columns: (1fr, auto), row-gutter: 4pt, {})", cells.join(", "));
                }
            }
            SectionBody::Dated(items) => {
                for item in items {
                    let _ = writeln!(
                        out,
                        "#grid(columns: (1fr, auto), stack(spacing: 4pt, strong({}), {}), text(size: 9pt, {}))",
                        lit(&item.title),
                        lit(&item.subtitle),
                        lit(&item.date)
                    );
                }
            }
            SectionBody::Pairs(pairs) => {
                let cells: Vec<String> = pairs
                    .iter()
                    .map(|pair| format!("{}, text(size: 9pt, {})", lit(&pair.label), lit(&pair.value)))
                    .collect();
                let _ = writeln!(out, "#grid(columns: (1fr, auto), row-gutter: 4pt, {})", cells.join(", "));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PageFormat;
    use crate::labels::Labels;
    use crate::preview::render;
    use crate::types::CvDocument;

    #[test]
    fn test_lit_escapes() {
        assert_eq!(lit("plain"), "\"plain\"");
        assert_eq!(lit("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(lit("a\\b\nc"), "\"a\\\\b\\nc\"");
        assert_eq!(lit("#*_$"), "\"#*_$\"");
    }

    #[test]
    fn test_page_settings_follow_options() {
        let options = PdfOptions {
            format: PageFormat::A4,
            margin_inches: 0.75,
            ..Default::default()
        };
        let markup = to_typst(&render(&CvDocument::default(), &Labels::english()), &options, None);
        assert!(markup.contains("#set page(paper: \"a4\", margin: 0.75in, flipped: false)"));
        assert!(markup.contains("\"Your Name\""));
        assert!(!markup.contains("image("));
        assert!(!markup.contains("#heading"));
    }

    #[test]
    fn test_photo_and_sections_emitted() {
        let mut doc = CvDocument::default();
        doc.summary = "Ships \"things\"".into();
        let markup = to_typst(
            &render(&doc, &Labels::english()),
            &PdfOptions::default(),
            Some("profile.png"),
        );
        assert!(markup.contains("image(\"profile.png\""));
        assert!(markup.contains("#heading(level: 2, \"Professional Summary\")"));
        assert!(markup.contains("#par(justify: true, \"Ships \\\"things\\\"\")"));
    }
}
