// src/labels.rs
//! Display strings for the preview and the editor views, per locale

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::core::FsOps;
use crate::types::{Proficiency, SkillCategory, SkillLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Az,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Az => "az",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "az" | "azerbaijani" | "azərbaycan" => Ok(Self::Az),
            other => Err(format!("Unsupported locale: {}. Use en or az", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLabels {
    pub beginner: String,
    pub intermediate: String,
    pub advanced: String,
    pub expert: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyLabels {
    pub basic: String,
    pub conversational: String,
    pub fluent: String,
    pub native: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub placeholder_name: String,
    pub present: String,
    pub summary: String,
    pub work_experience: String,
    pub education: String,
    pub skills: String,
    pub certificates: String,
    pub languages: String,
    pub responsibilities: String,
    pub achievements: String,
    pub honors: String,
    pub technical_skills: String,
    pub soft_skills: String,
    pub linkedin: String,
    pub github: String,
    pub personal_info: String,
    pub months: [String; 12],
    pub levels: LevelLabels,
    pub proficiencies: ProficiencyLabels,
}

fn strings<const N: usize>(values: [&str; N]) -> [String; N] {
    values.map(str::to_string)
}

impl Labels {
    pub fn english() -> Self {
        Self {
            placeholder_name: "Your Name".into(),
            present: "Present".into(),
            summary: "Professional Summary".into(),
            work_experience: "Work Experience".into(),
            education: "Education".into(),
            skills: "Skills".into(),
            certificates: "Certificates & Courses".into(),
            languages: "Languages".into(),
            responsibilities: "Key Responsibilities:".into(),
            achievements: "Key Achievements:".into(),
            honors: "Honors & Certifications:".into(),
            technical_skills: "Technical Skills".into(),
            soft_skills: "Soft Skills".into(),
            linkedin: "LinkedIn".into(),
            github: "GitHub".into(),
            personal_info: "Personal Information".into(),
            months: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            levels: LevelLabels {
                beginner: "Beginner".into(),
                intermediate: "Intermediate".into(),
                advanced: "Advanced".into(),
                expert: "Expert".into(),
            },
            proficiencies: ProficiencyLabels {
                basic: "Basic".into(),
                conversational: "Conversational".into(),
                fluent: "Fluent".into(),
                native: "Native".into(),
            },
        }
    }

    pub fn azerbaijani() -> Self {
        Self {
            placeholder_name: "Adınız".into(),
            present: "Hazırda".into(),
            summary: "Peşəkar xülasə".into(),
            work_experience: "İş təcrübəsi".into(),
            education: "Təhsil".into(),
            skills: "Bacarıqlar".into(),
            certificates: "Sertifikatlar və kurslar".into(),
            languages: "Dillər".into(),
            responsibilities: "Əsas Məsuliyyətlər:".into(),
            achievements: "Əsas Nailiyyətlər:".into(),
            honors: "Mükafatlar və sertifikatlar:".into(),
            technical_skills: "Texniki bacarıqlar".into(),
            soft_skills: "Şəxsi bacarıqlar".into(),
            linkedin: "LinkedIn".into(),
            github: "GitHub".into(),
            personal_info: "Şəxsi məlumatlar".into(),
            months: strings([
                "Yan", "Fev", "Mar", "Apr", "May", "İyn", "İyl", "Avq", "Sen", "Okt", "Noy", "Dek",
            ]),
            levels: LevelLabels {
                beginner: "Başlanğıc".into(),
                intermediate: "Orta".into(),
                advanced: "Təkmil".into(),
                expert: "Ekspert".into(),
            },
            proficiencies: ProficiencyLabels {
                basic: "Əsas".into(),
                conversational: "Danışıq".into(),
                fluent: "Sərbəst".into(),
                native: "Ana dili".into(),
            },
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::english(),
            Locale::Az => Self::azerbaijani(),
        }
    }

    /// Built-in table for `locale`, with any keys from the TOML file at `path` laid over it.
    pub fn load(locale: Locale, path: Option<&Path>) -> Result<Self> {
        let base = Self::for_locale(locale);
        let Some(path) = path else {
            return Ok(base);
        };

        let content = FsOps::read_file_safe(path)?;
        let labels = base
            .with_overrides(&content)
            .with_context(|| format!("Failed to parse label table: {}", path.display()))?;

        info!("Loaded label overrides from {}", path.display());
        Ok(labels)
    }

    /// Merge a (possibly partial) TOML label table over `self`.
    pub fn with_overrides(&self, toml_content: &str) -> Result<Self> {
        let overrides: toml::Table = toml::from_str(toml_content)?;
        let mut merged = toml::Table::try_from(self)?;
        merge_tables(&mut merged, overrides);
        Ok(merged.try_into()?)
    }

    pub fn month(&self, month: u32) -> &str {
        self.months
            .get(month.saturating_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn level(&self, level: SkillLevel) -> &str {
        match level {
            SkillLevel::Beginner => &self.levels.beginner,
            SkillLevel::Intermediate => &self.levels.intermediate,
            SkillLevel::Advanced => &self.levels.advanced,
            SkillLevel::Expert => &self.levels.expert,
        }
    }

    pub fn proficiency(&self, proficiency: Proficiency) -> &str {
        match proficiency {
            Proficiency::Basic => &self.proficiencies.basic,
            Proficiency::Conversational => &self.proficiencies.conversational,
            Proficiency::Fluent => &self.proficiencies.fluent,
            Proficiency::Native => &self.proficiencies.native,
        }
    }

    pub fn skill_group(&self, category: SkillCategory) -> &str {
        match category {
            SkillCategory::Technical => &self.technical_skills,
            SkillCategory::Soft => &self.soft_skills,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested)
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
