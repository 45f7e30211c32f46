//! Learner path and progress endpoints

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use leshono_core::FlatCourse;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// Path entries with completion and unlock flags
pub fn build_path(flat: &FlatCourse, progress: &LearnerProgress) -> Vec<PathLesson> {
    flat.sequence
        .iter()
        .enumerate()
        .map(|(position, entry)| PathLesson {
            position,
            tier_id: entry.tier_id,
            unit_id: entry.unit.id.clone(),
            unit_title: entry.unit.title.clone(),
            lesson_id: entry.lesson.id.clone(),
            title: entry.lesson.title.clone(),
            xp_value: entry.lesson.xp_value,
            completed: progress.is_complete(&entry.lesson.id),
            unlocked: flat.is_unlocked_at(position, |id| progress.is_complete(id)),
        })
        .collect()
}

/// Summary with the daily counter rolled to today
pub fn summarize(flat: &FlatCourse, progress: &LearnerProgress) -> ProgressResponse {
    let mut progress = progress.clone();
    progress.roll_day(Utc::now().date_naive());

    ProgressResponse {
        xp: progress.xp,
        level: progress.level(),
        level_progress: progress.level_progress(),
        streak: progress.streak,
        daily_goal: progress.daily_goal,
        daily_xp: progress.daily_xp,
        daily_goal_met: progress.daily_goal_met(),
        hearts: progress.hearts,
        completed_count: progress.completed.len(),
        active_lesson: progress.active_lesson.clone(),
        tiers: progress.tier_progress(flat),
    }
}

/// GET /api/path
pub async fn path(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<PathResponse>> {
    let progress = state.db.get_progress(auth.device_id).await?;
    let flat = state.catalog.flat();

    // Before any lesson is started the first one is active
    let active_lesson = progress
        .active_lesson
        .clone()
        .or_else(|| flat.sequence.first().map(|e| e.lesson.id.clone()));

    Ok(Json(PathResponse {
        lessons: build_path(flat, &progress),
        active_lesson,
    }))
}

/// GET /api/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<ProgressResponse>> {
    let progress = state.db.get_progress(auth.device_id).await?;
    Ok(Json(summarize(state.catalog.flat(), &progress)))
}

/// PUT /api/progress/goal
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Json(request): Json<UpdateGoalRequest>,
) -> Result<Json<ProgressResponse>> {
    let (progress, ()) = state
        .db
        .update_progress(auth.device_id, |progress| {
            progress.set_daily_goal(request.daily_goal)?;
            Ok(())
        })
        .await?;

    Ok(Json(summarize(state.catalog.flat(), &progress)))
}

/// POST /api/progress/reset
pub async fn reset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<ProgressResponse>> {
    let (progress, ()) = state
        .db
        .update_progress(auth.device_id, |progress| {
            progress.reset();
            Ok(())
        })
        .await?;

    tracing::info!(device_id = %auth.device_id, "progress reset");

    Ok(Json(summarize(state.catalog.flat(), &progress)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseCatalog;
    use leshono_core::ContentRules;

    fn catalog() -> CourseCatalog {
        let document = r#"{"lessons":[
            {"id":"1.1.1","title":"One"},
            {"id":"1.1.2","title":"Two"}
        ]}"#;
        CourseCatalog::from_json(document, &ContentRules::default(), Some(1)).unwrap()
    }

    #[test]
    fn test_build_path_flags() {
        let catalog = catalog();
        let mut progress = LearnerProgress::new();
        progress.completed.insert("unit:1.1".to_string());

        let path = build_path(catalog.flat(), &progress);
        let ids: Vec<&str> = path.iter().map(|p| p.lesson_id.as_str()).collect();
        assert_eq!(ids, vec!["unit:1.1", "1.1.1", "1.1.2", "review:1.1"]);
        assert!(path[0].completed && path[0].unlocked);
        assert!(!path[1].completed && path[1].unlocked);
        assert!(!path[2].unlocked);
        assert_eq!(path[3].position, 3);
    }

    #[test]
    fn test_summarize() {
        let catalog = catalog();
        let mut progress = LearnerProgress::new();
        progress.xp = 130;
        let summary = summarize(catalog.flat(), &progress);
        assert_eq!(summary.level, 2);
        assert_eq!(summary.level_progress, 30);
        assert_eq!(summary.tiers.len(), 5);
        assert_eq!(summary.tiers[0].total, 4);
        assert!(!summary.daily_goal_met);
    }
}
