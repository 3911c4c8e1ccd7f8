pub mod cv_data;

pub use cv_data::{
    fresh_id, Certificate, CvDocument, Education, Identified, Language, PersonalInfo,
    Proficiency, Skill, SkillCategory, SkillLevel, WorkExperience,
};
