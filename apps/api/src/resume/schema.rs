//! Response schema for `POST /api/upload`, with the boundary validation step.
//!
//! Parsed output is validated before it leaves the server; a mismatch means the
//! heuristics produced something the schema does not allow and is reported as
//! a server error rather than returned partially.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_CONFIDENCE: u8 = 100;
pub const MAX_SECTION_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceValue {
    pub value: String,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsValue {
    pub value: Vec<String>,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceValue {
    pub text: String,
    pub years: u32,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationValue {
    pub text: String,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsValue {
    pub text: String,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: ConfidenceValue,
    pub email: ConfidenceValue,
    pub phone: ConfidenceValue,
    pub skills: SkillsValue,
    pub work_experience: ExperienceValue,
    pub education: EducationValue,
    pub projects: ProjectsValue,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field '{field}' has confidence {confidence}, expected 0-100")]
    ConfidenceOutOfRange { field: &'static str, confidence: u8 },

    #[error("field '{field}' text is {len} characters, over the section limit")]
    TextTooLong { field: &'static str, len: usize },

    #[error("skills list contains an empty entry")]
    EmptySkill,
}

impl ParsedResume {
    /// Checks every field against the declared schema. Returns the first violation.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let confidences = [
            ("name", self.name.confidence),
            ("email", self.email.confidence),
            ("phone", self.phone.confidence),
            ("skills", self.skills.confidence),
            ("work_experience", self.work_experience.confidence),
            ("education", self.education.confidence),
            ("projects", self.projects.confidence),
        ];
        for (field, confidence) in confidences {
            if confidence > MAX_CONFIDENCE {
                return Err(SchemaError::ConfidenceOutOfRange { field, confidence });
            }
        }

        let texts = [
            ("work_experience", &self.work_experience.text),
            ("education", &self.education.text),
            ("projects", &self.projects.text),
        ];
        for (field, text) in texts {
            let len = text.chars().count();
            if len > MAX_SECTION_CHARS {
                return Err(SchemaError::TextTooLong { field, len });
            }
        }

        if self.skills.value.iter().any(|s| s.trim().is_empty()) {
            return Err(SchemaError::EmptySkill);
        }

        Ok(())
    }
}
