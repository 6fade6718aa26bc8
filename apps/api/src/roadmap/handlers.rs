use axum::{extract::rejection::JsonRejection, Json};
use tracing::info;

use crate::errors::AppError;
use crate::roadmap::generator::generate_roadmap;
use crate::roadmap::models::{CareerPathRequest, RoadmapResponse};

/// POST /api/skills/analyze
pub async fn handle_analyze(
    payload: Result<Json<CareerPathRequest>, JsonRejection>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let Json(req) = payload?;

    let response = generate_roadmap(
        &req.candidate.current_skills,
        &req.target_role.required_skills,
    );

    info!(
        "Roadmap for '{}' -> '{}': {} missing skills over {} phases",
        req.candidate.current_role,
        req.target_role.title,
        response.analysis.missing_skills.len(),
        response.learning_roadmap.len()
    );

    Ok(Json(response))
}
