// src/types/cv_data.rs
//! CV document model shared by the editors, the renderer and persistence

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

// ===== Lenient reading =====
//
// Stored documents may come from older or hand-edited files. A `null` or an
// unknown discriminant costs that one field its value, never the document.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

// ===== Aggregate Root =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "null_as_default")]
    pub certificates: Vec<Certificate>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub github: String,
    /// Inline `data:` URL of the uploaded photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current: bool,
    #[serde(deserialize_with = "string_items")]
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "string_items")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub school: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "string_items")]
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issuer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub proficiency: Proficiency,
}

// ===== Discriminants =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Basic,
    #[default]
    Conversational,
    Fluent,
    Native,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 2] = [SkillCategory::Technical, SkillCategory::Soft];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Soft => "soft",
        }
    }
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl Proficiency {
    pub const ALL: [Proficiency; 4] = [
        Proficiency::Basic,
        Proficiency::Conversational,
        Proficiency::Fluent,
        Proficiency::Native,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Conversational => "conversational",
            Self::Fluent => "fluent",
            Self::Native => "native",
        }
    }
}

fn parse_variant<T: Copy>(
    input: &str,
    all: &[T],
    as_str: fn(&T) -> &'static str,
    kind: &str,
) -> Result<T, String> {
    let wanted = input.trim().to_lowercase();
    all.iter()
        .find(|v| as_str(v) == wanted)
        .copied()
        .ok_or_else(|| {
            let allowed: Vec<&str> = all.iter().map(as_str).collect();
            format!("Unknown {}: '{}'. Allowed: {}", kind, input, allowed.join(", "))
        })
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "skill category")
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "skill level")
    }
}

impl FromStr for Proficiency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::ALL, Self::as_str, "proficiency")
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! forgiving_deserialize {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = Option::<String>::deserialize(deserializer)?;
                    let parsed = raw.and_then(|value| match value.parse::<$ty>() {
                        Ok(variant) => Some(variant),
                        Err(e) => {
                            warn!("{}. Using the default", e);
                            None
                        }
                    });
                    Ok(parsed.unwrap_or_default())
                }
            }
        )+
    };
}

forgiving_deserialize!(SkillCategory, SkillLevel, Proficiency);

// ===== Identity =====

/// Implemented by every record that lives in a keyed list.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )+
    };
}

identified!(WorkExperience, Education, Skill, Certificate, Language);

/// Generate an id that is not yet used in `list`.
pub fn fresh_id<T: Identified>(list: &[T]) -> String {
    loop {
        let candidate = uuid::Uuid::new_v4().simple().to_string();
        if !list.iter().any(|entry| entry.id() == candidate) {
            return candidate;
        }
    }
}

fn repair_ids<T: Identified>(list: &mut [T]) -> usize {
    let mut seen: HashSet<String> = HashSet::new();
    let mut repaired = 0;

    for index in 0..list.len() {
        let id = list[index].id().to_string();
        if id.is_empty() || seen.contains(&id) {
            let replacement = fresh_id(list);
            seen.insert(replacement.clone());
            list[index].set_id(replacement);
            repaired += 1;
        } else {
            seen.insert(id);
        }
    }

    repaired
}

impl CvDocument {
    /// Give every entry with an empty or duplicated id a fresh one.
    /// Returns the number of ids that were replaced.
    pub fn normalize_ids(&mut self) -> usize {
        repair_ids(&mut self.work_experience)
            + repair_ids(&mut self.education)
            + repair_ids(&mut self.skills)
            + repair_ids(&mut self.certificates)
            + repair_ids(&mut self.languages)
    }

    /// Display name used for exported file names
    pub fn file_stem(&self) -> &str {
        if self.personal_info.name.is_empty() {
            "CV"
        } else {
            &self.personal_info.name
        }
    }
}
