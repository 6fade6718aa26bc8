//! Roadmap Generator: gap analysis plus layered scheduling over the skill taxonomy.
//!
//! Algorithm:
//! 1. matching = target ∩ current, missing = target − current (target order)
//! 2. Enrich each missing skill from the taxonomy (or General/Unknown default)
//! 3. Repeatedly split pending skills into ready (prereqs completed) and blocked.
//!    When nothing is ready, the first blocked skill is forced through so every
//!    iteration schedules at least one skill.
//! 4. Each round becomes one `RoadmapPhase`; its skills join the completed set.

use std::collections::HashSet;

use crate::roadmap::models::{
    Analysis, RoadmapPhase, RoadmapResponse, SimilarTransitions,
};
use crate::roadmap::taxonomy::{enrich, SkillProfile};

pub const PRIORITY_FIRST_PHASE: &str = "High";
pub const PRIORITY_LATER_PHASE: &str = "Medium";

pub const RECOMMENDED_RESOURCES: &[&str] = &[
    "Official Documentation",
    "Udemy: Full Stack Bootcamp",
    "FreeCodeCamp",
];

const MOCK_SUCCESS_RATE: &str = "75%";
const MOCK_TRANSITION_FACTOR: f64 = 1.2;

/// Result of comparing a candidate's skills with a role's required skills.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGap {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    /// Unrounded, 0.0 when the target is empty.
    pub gap_percentage: f64,
}

pub fn analyze_gap(current_skills: &[String], target_skills: &[String]) -> SkillGap {
    let current: HashSet<&str> = current_skills.iter().map(String::as_str).collect();
    let target = dedup_preserving_order(target_skills);

    let (matching, missing): (Vec<String>, Vec<String>) = target
        .into_iter()
        .partition(|skill| current.contains(skill.as_str()));

    let total_target = matching.len() + missing.len();
    let gap_percentage = if total_target > 0 {
        missing.len() as f64 / total_target as f64 * 100.0
    } else {
        0.0
    };

    SkillGap {
        matching,
        missing,
        gap_percentage,
    }
}

/// Builds the phased roadmap for `missing`, treating `current_skills` as already learned.
pub fn build_phases(current_skills: &[String], missing: &[String]) -> Vec<RoadmapPhase> {
    let mut completed: HashSet<String> = current_skills.iter().cloned().collect();
    let mut pending: Vec<SkillProfile> = missing.iter().map(|s| enrich(s)).collect();
    let mut phases = Vec::new();
    let mut phase_num: u32 = 1;

    while !pending.is_empty() {
        let (mut ready, mut blocked): (Vec<SkillProfile>, Vec<SkillProfile>) = pending
            .into_iter()
            .partition(|item| item.prereqs.iter().all(|p| completed.contains(*p)));

        if ready.is_empty() && !blocked.is_empty() {
            // Cycle or prerequisite outside current ∪ target: force the first one through.
            ready.push(blocked.remove(0));
        }

        let phase = build_phase(phase_num, &ready);
        completed.extend(phase.skills_to_learn.iter().cloned());
        phases.push(phase);

        phase_num += 1;
        pending = blocked;
    }

    phases
}

pub fn generate_roadmap(current_skills: &[String], target_skills: &[String]) -> RoadmapResponse {
    let gap = analyze_gap(current_skills, target_skills);
    let learning_roadmap = build_phases(current_skills, &gap.missing);

    let total_duration: f64 = learning_roadmap.iter().map(|p| p.duration_months).sum();
    let readiness_score = (100.0 - gap.gap_percentage).max(0.0);

    RoadmapResponse {
        analysis: Analysis {
            matching_skills: gap.matching,
            missing_skills: gap.missing,
            skill_gap_percentage: round1(gap.gap_percentage),
            readiness_score: round1(readiness_score),
            estimated_learning_time_months: total_duration,
        },
        learning_roadmap,
        recommended_resources: RECOMMENDED_RESOURCES
            .iter()
            .map(|r| r.to_string())
            .collect(),
        similar_transitions: SimilarTransitions {
            success_rate: MOCK_SUCCESS_RATE.to_string(),
            avg_transition_time_months: round1(total_duration * MOCK_TRANSITION_FACTOR),
        },
    }
}

fn build_phase(phase_num: u32, items: &[SkillProfile]) -> RoadmapPhase {
    let focus = dominant_category(items);
    let focus_label = if phase_num == 1 {
        format!("{focus} Foundations")
    } else {
        format!("Advanced {focus}")
    };
    let priority = if phase_num == 1 {
        PRIORITY_FIRST_PHASE
    } else {
        PRIORITY_LATER_PHASE
    };

    RoadmapPhase {
        phase: phase_num,
        duration_months: items.iter().map(|i| i.time_months).sum(),
        focus: focus_label,
        skills_to_learn: items.iter().map(|i| i.skill.clone()).collect(),
        priority: priority.to_string(),
        reasoning: format!("Critical for {focus} mastery"),
    }
}

/// Most frequent category; ties go to the category seen first.
fn dominant_category(items: &[SkillProfile]) -> &'static str {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(c, _)| *c == item.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.category, 1)),
        }
    }

    let mut best: Option<(&'static str, usize)> = None;
    for (category, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((category, n));
        }
    }
    best.map(|(c, _)| c).unwrap_or("General Skills")
}

fn dedup_preserving_order(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

/// One decimal, ties to even.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
