//! Public course endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::{CourseResponse, Lesson};
use crate::AppState;

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /api/course
pub async fn get_course(State(state): State<AppState>) -> Json<CourseResponse> {
    let catalog = &state.catalog;
    Json(CourseResponse {
        version: catalog.version().to_string(),
        lesson_count: catalog.flat().len(),
        tiers: catalog.course().clone(),
    })
}

/// GET /api/lessons/:id
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Json<Lesson>> {
    state
        .catalog
        .lesson(&lesson_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {}", lesson_id)))
}
