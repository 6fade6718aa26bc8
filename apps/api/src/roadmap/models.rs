use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub current_role: String,
    pub current_skills: Vec<String>,
    pub experience_years: i64,
    pub education: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRole {
    pub title: String,
    pub required_skills: Vec<String>,
    pub typical_experience: String,
}

/// Body of `POST /api/skills/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPathRequest {
    pub candidate: Candidate,
    pub target_role: TargetRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_gap_percentage: f64,
    pub readiness_score: f64,
    pub estimated_learning_time_months: f64,
}

/// One batch of skills whose prerequisites are satisfied by earlier phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    /// 1-based, monotonic.
    pub phase: u32,
    pub duration_months: f64,
    pub focus: String,
    pub skills_to_learn: Vec<String>,
    pub priority: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTransitions {
    pub success_rate: String,
    pub avg_transition_time_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapResponse {
    pub analysis: Analysis,
    pub learning_roadmap: Vec<RoadmapPhase>,
    pub recommended_resources: Vec<String>,
    pub similar_transitions: SimilarTransitions,
}
