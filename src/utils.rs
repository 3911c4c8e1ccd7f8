// src/utils.rs
use chrono::{Datelike, NaiveDate};
use std::path::Path;

use crate::labels::Labels;

/// Parse "YYYY-MM" or "YYYY-MM-DD" into (year, month)
pub fn parse_year_month(date: &str) -> Option<(i32, u32)> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d"))
        .ok()
        .map(|d| (d.year(), d.month()))
}

/// "2021-03" -> "Mar 2021". Empty input stays empty; unparsable input is shown as typed.
pub fn format_month_year(date: &str, labels: &Labels) -> String {
    if date.trim().is_empty() {
        return String::new();
    }

    match parse_year_month(date) {
        Some((year, month)) => format!("{} {:04}", labels.month(month), year),
        None => date.trim().to_string(),
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Keep the name readable but safe to use as a single path component
pub fn sanitize_file_stem(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "CV".to_string()
    } else {
        cleaned
    }
}
