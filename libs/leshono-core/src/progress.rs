//! Learner progress: completion, xp, streak, daily goal and hearts.
//!
//! Pure state. Callers pass the current day so the rules stay testable and
//! persistence stays with the host.

use crate::error::{CourseError, Result};
use crate::flatten::FlatCourse;
use crate::types::TierKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_HEARTS: u8 = 5;
pub const DEFAULT_DAILY_GOAL: u32 = 20;
pub const XP_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerProgress {
    pub xp: u32,
    /// Consecutive days with at least one completed lesson.
    pub streak: u32,
    pub completed: BTreeSet<String>,
    pub daily_goal: u32,
    pub daily_xp: u32,
    pub last_active_day: Option<NaiveDate>,
    pub hearts: u8,
    pub active_lesson: Option<String>,
}

impl Default for LearnerProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            streak: 0,
            completed: BTreeSet::new(),
            daily_goal: DEFAULT_DAILY_GOAL,
            daily_xp: 0,
            last_active_day: None,
            hearts: MAX_HEARTS,
            active_lesson: None,
        }
    }
}

/// Result of completing a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub xp_gained: u32,
    pub next_lesson: Option<String>,
}

/// Completion of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress {
    pub tier: TierKey,
    pub title: String,
    pub total: usize,
    pub done: usize,
    /// Rounded percentage; 0 for a tier without lessons.
    pub percent: u32,
}

impl LearnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self, lesson_id: &str) -> bool {
        self.completed.contains(lesson_id)
    }

    pub fn is_unlocked(&self, flat: &FlatCourse, lesson_id: &str) -> bool {
        flat.is_unlocked(lesson_id, |id| self.is_complete(id))
    }

    /// Make `lesson_id` the active lesson with full hearts.
    pub fn start_lesson(&mut self, lesson_id: &str) {
        self.active_lesson = Some(lesson_id.to_string());
        self.hearts = MAX_HEARTS;
    }

    /// Apply an answer and return the hearts left.
    pub fn record_answer(&mut self, correct: bool) -> u8 {
        if !correct {
            self.hearts = self.hearts.saturating_sub(1);
        }
        self.hearts
    }

    /// Mark a lesson complete and award its xp.
    ///
    /// Replaying a completed lesson awards xp again. Returns `None` for a
    /// lesson the course does not contain.
    pub fn complete_lesson(
        &mut self,
        flat: &FlatCourse,
        lesson_id: &str,
        today: NaiveDate,
    ) -> Option<Completion> {
        let entry = flat.entry(lesson_id)?;
        let xp_gained = entry.lesson.xp_value;

        self.roll_day(today);
        self.streak = match self.last_active_day {
            Some(day) if day == today => self.streak.max(1),
            Some(day) if day.succ_opt() == Some(today) => self.streak + 1,
            _ => 1,
        };
        self.last_active_day = Some(today);

        self.completed.insert(lesson_id.to_string());
        self.xp += xp_gained;
        self.daily_xp += xp_gained;

        let next_lesson = flat.next_after(lesson_id).map(|e| e.lesson.id.clone());
        self.active_lesson = next_lesson.clone();

        tracing::debug!(lesson_id, xp_gained, streak = self.streak, "lesson completed");

        Some(Completion {
            xp_gained,
            next_lesson,
        })
    }

    /// Reset the daily counter when `today` is a new day.
    pub fn roll_day(&mut self, today: NaiveDate) {
        if self.last_active_day != Some(today) {
            self.daily_xp = 0;
        }
    }

    pub fn daily_goal_met(&self) -> bool {
        self.daily_xp >= self.daily_goal
    }

    pub fn level(&self) -> u32 {
        self.xp / XP_PER_LEVEL + 1
    }

    /// Xp into the current level.
    pub fn level_progress(&self) -> u32 {
        self.xp % XP_PER_LEVEL
    }

    pub fn tier_progress(&self, flat: &FlatCourse) -> Vec<TierProgress> {
        TierKey::ALL
            .into_iter()
            .map(|tier| {
                let entries = flat.sequence.iter().filter(|e| e.tier_id == tier);
                let (total, done) = entries.fold((0, 0), |(total, done), e| {
                    (total + 1, done + usize::from(self.is_complete(&e.lesson.id)))
                });
                let percent = if total == 0 {
                    0
                } else {
                    (done as f64 * 100.0 / total as f64).round() as u32
                };
                TierProgress {
                    tier,
                    title: tier.title().to_string(),
                    total,
                    done,
                    percent,
                }
            })
            .collect()
    }

    pub fn set_daily_goal(&mut self, goal: u32) -> Result<()> {
        if goal == 0 {
            return Err(CourseError::InvalidGoal);
        }
        self.daily_goal = goal;
        Ok(())
    }

    /// Forget everything except the daily goal.
    pub fn reset(&mut self) {
        *self = Self {
            daily_goal: self.daily_goal,
            ..Self::default()
        };
    }
}
