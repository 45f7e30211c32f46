//! Lesson play endpoints: start, check answers, complete

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use leshono_core::{grade, FlatEntry};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// Lesson on the path, or 404
fn path_entry<'a>(state: &'a AppState, lesson_id: &str) -> Result<&'a FlatEntry> {
    state
        .catalog
        .flat()
        .entry(lesson_id)
        .ok_or_else(|| ApiError::NotFound(format!("Lesson {}", lesson_id)))
}

fn ensure_unlocked(state: &AppState, progress: &LearnerProgress, lesson_id: &str) -> Result<()> {
    if progress.is_unlocked(state.catalog.flat(), lesson_id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("Lesson {} is locked", lesson_id)))
    }
}

/// POST /api/lessons/:id/start
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(lesson_id): Path<String>,
) -> Result<Json<StartLessonResponse>> {
    let entry = path_entry(&state, &lesson_id)?;
    let (progress, ()) = state
        .db
        .update_progress(auth.device_id, |progress| {
            ensure_unlocked(&state, progress, &lesson_id)?;
            progress.start_lesson(&lesson_id);
            Ok(())
        })
        .await?;

    Ok(Json(StartLessonResponse {
        lesson: entry.lesson.clone(),
        hearts: progress.hearts,
    }))
}

/// POST /api/lessons/:id/check
pub async fn check(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(lesson_id): Path<String>,
    Json(request): Json<CheckAnswerRequest>,
) -> Result<Json<CheckAnswerResponse>> {
    let entry = path_entry(&state, &lesson_id)?;
    let exercise = entry
        .lesson
        .exercises
        .get(request.exercise_index)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Lesson {} has no exercise {}",
                lesson_id, request.exercise_index
            ))
        })?;

    let verdict = grade(exercise, &request.response);
    let (_, hearts) = state
        .db
        .update_progress(auth.device_id, |progress| {
            ensure_unlocked(&state, progress, &lesson_id)?;
            Ok(progress.record_answer(verdict.correct))
        })
        .await?;

    tracing::debug!(
        lesson_id = %lesson_id,
        prompt = exercise.prompt().unwrap_or("match pairs"),
        correct = verdict.correct,
        "answer checked"
    );

    Ok(Json(CheckAnswerResponse {
        correct: verdict.correct,
        expected: verdict.expected,
        typed_normalized: verdict.comparison.map(|c| c.typed_normalized),
        hearts,
    }))
}

/// POST /api/lessons/:id/complete
pub async fn complete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(lesson_id): Path<String>,
) -> Result<Json<CompleteLessonResponse>> {
    path_entry(&state, &lesson_id)?;
    let today = Utc::now().date_naive();
    let (progress, completion) = state
        .db
        .update_progress(auth.device_id, |progress| {
            ensure_unlocked(&state, progress, &lesson_id)?;
            progress
                .complete_lesson(state.catalog.flat(), &lesson_id, today)
                .ok_or_else(|| ApiError::NotFound(format!("Lesson {}", lesson_id)))
        })
        .await?;

    tracing::info!(
        device_id = %auth.device_id,
        lesson_id = %lesson_id,
        xp_gained = completion.xp_gained,
        "lesson completed"
    );

    Ok(Json(CompleteLessonResponse {
        xp_gained: completion.xp_gained,
        total_xp: progress.xp,
        daily_xp: progress.daily_xp,
        streak: progress.streak,
        level: progress.level(),
        next_lesson: completion.next_lesson,
    }))
}
