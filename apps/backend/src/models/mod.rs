//! Database models and API types

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub use leshono_core::{Course, ExerciseResponse, LearnerProgress, Lesson, TierKey, TierProgress};

// === Database Entity Types ===

/// Device registration info
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Learner progress row
#[derive(Debug, Clone, FromRow)]
pub struct DbProgress {
    pub device_id: Uuid,
    pub xp: i32,
    pub streak: i32,
    pub completed: Vec<String>,
    pub daily_goal: i32,
    pub daily_xp: i32,
    pub last_active_day: Option<NaiveDate>,
    pub hearts: i16,
    pub active_lesson: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl DbProgress {
    /// Convert to the core progress state
    pub fn to_progress(&self) -> LearnerProgress {
        LearnerProgress {
            xp: u32::try_from(self.xp).unwrap_or_default(),
            streak: u32::try_from(self.streak).unwrap_or_default(),
            completed: self.completed.iter().cloned().collect::<BTreeSet<_>>(),
            daily_goal: u32::try_from(self.daily_goal)
                .unwrap_or(leshono_core::progress::DEFAULT_DAILY_GOAL),
            daily_xp: u32::try_from(self.daily_xp).unwrap_or_default(),
            last_active_day: self.last_active_day,
            hearts: u8::try_from(self.hearts).unwrap_or_default(),
            active_lesson: self.active_lesson.clone(),
        }
    }
}

// === Device API Types ===

/// Device registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRegisterRequest {
    pub name: Option<String>,
}

/// Device registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRegisterResponse {
    pub device_id: Uuid,
    pub token: String,
}

/// Device status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatusResponse {
    pub device_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// === Course API Types ===

/// Course structure with its version
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub version: String,
    pub lesson_count: usize,
    pub tiers: Course,
}

/// One lesson on the learner's path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathLesson {
    pub position: usize,
    pub tier_id: TierKey,
    pub unit_id: String,
    pub unit_title: String,
    pub lesson_id: String,
    pub title: String,
    pub xp_value: u32,
    pub completed: bool,
    pub unlocked: bool,
}

/// The learner's path through the course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    pub lessons: Vec<PathLesson>,
    pub active_lesson: Option<String>,
}

// === Lesson Play Types ===

/// Lesson start response
#[derive(Debug, Clone, Serialize)]
pub struct StartLessonResponse {
    pub lesson: Lesson,
    pub hearts: u8,
}

/// Answer check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAnswerRequest {
    pub exercise_index: usize,
    pub response: ExerciseResponse,
}

/// Answer check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAnswerResponse {
    pub correct: bool,
    pub expected: String,
    /// Typed answer as it was compared, for typed and arranged exercises
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_normalized: Option<String>,
    pub hearts: u8,
}

/// Lesson completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteLessonResponse {
    pub xp_gained: u32,
    pub total_xp: u32,
    pub daily_xp: u32,
    pub streak: u32,
    pub level: u32,
    pub next_lesson: Option<String>,
}

// === Progress API Types ===

/// Progress summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub xp: u32,
    pub level: u32,
    pub level_progress: u32,
    pub streak: u32,
    pub daily_goal: u32,
    pub daily_xp: u32,
    pub daily_goal_met: bool,
    pub hearts: u8,
    pub completed_count: usize,
    pub active_lesson: Option<String>,
    pub tiers: Vec<TierProgress>,
}

/// Daily goal update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub daily_goal: u32,
}
