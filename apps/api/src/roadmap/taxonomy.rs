//! Skill Taxonomy: static prerequisite graph backing the roadmap generator.
//!
//! Read-only table built at compile time. Skills not listed here are
//! synthesized with `SkillProfile::unknown`.

use serde::Serialize;

/// A single entry in the static skill taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecord {
    pub name: &'static str,
    pub category: &'static str,
    pub difficulty: &'static str,
    pub time_months: f64,
    pub prereqs: &'static [&'static str],
    pub completion_rate_percentage: u8,
}

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_DIFFICULTY: &str = "Unknown";
pub const DEFAULT_TIME_MONTHS: f64 = 1.0;

pub static SKILL_TAXONOMY: &[SkillRecord] = &[
    SkillRecord {
        name: "HTML",
        category: "Frontend",
        difficulty: "Easy",
        time_months: 0.5,
        prereqs: &[],
        completion_rate_percentage: 95,
    },
    SkillRecord {
        name: "JavaScript",
        category: "Frontend",
        difficulty: "Medium",
        time_months: 1.5,
        prereqs: &["HTML"],
        completion_rate_percentage: 82,
    },
    SkillRecord {
        name: "React",
        category: "Frontend",
        difficulty: "Hard",
        time_months: 2.0,
        prereqs: &["JavaScript"],
        completion_rate_percentage: 70,
    },
    SkillRecord {
        name: "Python",
        category: "Backend",
        difficulty: "Easy",
        time_months: 1.0,
        prereqs: &[],
        completion_rate_percentage: 88,
    },
    SkillRecord {
        name: "FastAPI",
        category: "Backend",
        difficulty: "Medium",
        time_months: 1.0,
        prereqs: &["Python"],
        completion_rate_percentage: 75,
    },
    SkillRecord {
        name: "Docker",
        category: "DevOps",
        difficulty: "Medium",
        time_months: 1.0,
        prereqs: &["Linux Basics"],
        completion_rate_percentage: 65,
    },
    SkillRecord {
        name: "Kubernetes",
        category: "DevOps",
        difficulty: "Hard",
        time_months: 2.5,
        prereqs: &["Docker"],
        completion_rate_percentage: 45,
    },
    SkillRecord {
        name: "System Design",
        category: "Architecture",
        difficulty: "Expert",
        time_months: 3.0,
        prereqs: &["Backend", "Database"],
        completion_rate_percentage: 30,
    },
];

/// Exact, case-sensitive lookup by skill name.
pub fn lookup(name: &str) -> Option<&'static SkillRecord> {
    SKILL_TAXONOMY.iter().find(|r| r.name == name)
}

/// A missing skill enriched with scheduling metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillProfile {
    pub skill: String,
    pub category: &'static str,
    pub difficulty: &'static str,
    pub time_months: f64,
    pub prereqs: &'static [&'static str],
}

impl SkillProfile {
    pub fn unknown(skill: &str) -> Self {
        Self {
            skill: skill.to_string(),
            category: DEFAULT_CATEGORY,
            difficulty: DEFAULT_DIFFICULTY,
            time_months: DEFAULT_TIME_MONTHS,
            prereqs: &[],
        }
    }
}

/// Returns the taxonomy profile for `skill`, or the General/Unknown default.
pub fn enrich(skill: &str) -> SkillProfile {
    match lookup(skill) {
        Some(record) => SkillProfile {
            skill: skill.to_string(),
            category: record.category,
            difficulty: record.difficulty,
            time_months: record.time_months,
            prereqs: record.prereqs,
        },
        None => SkillProfile::unknown(skill),
    }
}
