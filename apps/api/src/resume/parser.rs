//! Field Parser: regex and line heuristics that turn résumé text into a `ParsedResume`.
//!
//! Every field is computed independently from the full text. Confidence values
//! are fixed per field and outcome.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resume::schema::{
    ConfidenceValue, EducationValue, ExperienceValue, ParsedResume, ProjectsValue, SkillsValue,
    MAX_SECTION_CHARS,
};
use crate::resume::sections::{
    estimate_years, extract_section, truncate_chars, EDUCATION_KEYWORDS, EXPERIENCE_KEYWORDS,
    PROJECT_KEYWORDS,
};

pub const EMAIL_FOUND: u8 = 100;
pub const PHONE_FOUND: u8 = 95;
pub const NAME_SHORT_LINE: u8 = 85;
pub const NAME_LONG_LINE: u8 = 40;
pub const SKILLS_MANY: u8 = 90;
pub const SKILLS_FEW: u8 = 50;
pub const EXPERIENCE_WITH_YEARS: u8 = 90;
pub const EXPERIENCE_WITHOUT_YEARS: u8 = 50;
pub const EDUCATION_WITH_DEGREE: u8 = 85;
pub const EDUCATION_WITHOUT_DEGREE: u8 = 40;
pub const PROJECTS_FOUND: u8 = 70;
pub const NOT_FOUND: u8 = 0;

/// Names longer than this many whitespace tokens are more likely a sentence.
const MAX_NAME_TOKENS: usize = 3;
/// Skill matches needed (exclusive) for the high skills confidence.
const MANY_SKILLS_THRESHOLD: usize = 2;
const MIN_PROJECTS_LEN: usize = 20;

pub const KNOWN_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "Go",
    "Rust",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "FastAPI",
    "Spring Boot",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Git",
    "Linux",
    "Machine Learning",
    "Deep Learning",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Data Analysis",
    "REST API",
    "System Design",
];

pub const DEGREE_KEYWORDS: &[&str] = &[
    "B.TECH",
    "M.TECH",
    "B.SC",
    "BACHELOR",
    "MASTER",
    "UNIVERSITY",
    "COLLEGE",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Indian mobile number: optional +91, first digit 6-9, ten digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+91[\s-]?|\b)[6-9]\d{9}\b").expect("valid phone regex"));

/// One matcher per known skill. `\b` cannot anchor names ending in symbols
/// (`C++`, `C#`), so word edges are spelled out as non-word characters.
static SKILL_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    KNOWN_SKILLS
        .iter()
        .map(|skill| {
            let pattern = format!(r"(?i)(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(skill));
            (*skill, Regex::new(&pattern).expect("valid skill regex"))
        })
        .collect()
});

pub fn parse_resume(text: &str) -> ParsedResume {
    ParsedResume {
        name: parse_name(text),
        email: parse_email(text),
        phone: parse_phone(text),
        skills: parse_skills(text),
        work_experience: parse_experience(text),
        education: parse_education(text),
        projects: parse_projects(text),
    }
}

pub fn parse_email(text: &str) -> ConfidenceValue {
    first_match(&EMAIL_RE, text, EMAIL_FOUND)
}

pub fn parse_phone(text: &str) -> ConfidenceValue {
    first_match(&PHONE_RE, text, PHONE_FOUND)
}

fn first_match(re: &Regex, text: &str, found: u8) -> ConfidenceValue {
    match re.find(text) {
        Some(m) => ConfidenceValue {
            value: m.as_str().to_string(),
            confidence: found,
        },
        None => ConfidenceValue {
            value: String::new(),
            confidence: NOT_FOUND,
        },
    }
}

/// First non-empty line. Short lines (≤3 tokens) are likely a name.
pub fn parse_name(text: &str) -> ConfidenceValue {
    let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return ConfidenceValue {
            value: String::new(),
            confidence: NOT_FOUND,
        };
    };

    let confidence = if line.split_whitespace().count() <= MAX_NAME_TOKENS {
        NAME_SHORT_LINE
    } else {
        NAME_LONG_LINE
    };

    ConfidenceValue {
        value: line.to_string(),
        confidence,
    }
}

pub fn parse_skills(text: &str) -> SkillsValue {
    let value: Vec<String> = SKILL_RES
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| skill.to_string())
        .collect();

    let confidence = if value.len() > MANY_SKILLS_THRESHOLD {
        SKILLS_MANY
    } else {
        SKILLS_FEW
    };

    SkillsValue { value, confidence }
}

pub fn parse_experience(text: &str) -> ExperienceValue {
    let section = extract_section(text, EXPERIENCE_KEYWORDS);
    let years = estimate_years(&section);

    let confidence = match (section.is_empty(), years) {
        (true, _) => NOT_FOUND,
        (false, 0) => EXPERIENCE_WITHOUT_YEARS,
        (false, _) => EXPERIENCE_WITH_YEARS,
    };

    ExperienceValue {
        text: truncate_chars(&section, MAX_SECTION_CHARS),
        years,
        confidence,
    }
}

pub fn parse_education(text: &str) -> EducationValue {
    let section = extract_section(text, EDUCATION_KEYWORDS);
    let upper = section.to_uppercase();

    let confidence = if DEGREE_KEYWORDS.iter().any(|k| upper.contains(k)) {
        EDUCATION_WITH_DEGREE
    } else if !section.is_empty() {
        EDUCATION_WITHOUT_DEGREE
    } else {
        NOT_FOUND
    };

    EducationValue {
        text: truncate_chars(&section, MAX_SECTION_CHARS),
        confidence,
    }
}

pub fn parse_projects(text: &str) -> ProjectsValue {
    let section = extract_section(text, PROJECT_KEYWORDS);

    let confidence = if section.chars().count() > MIN_PROJECTS_LEN {
        PROJECTS_FOUND
    } else {
        NOT_FOUND
    };

    ProjectsValue {
        text: truncate_chars(&section, MAX_SECTION_CHARS),
        confidence,
    }
}
