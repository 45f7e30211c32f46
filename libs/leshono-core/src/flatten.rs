//! Linear lesson order across tiers and units.

use crate::types::{Course, Lesson, LessonMap, TierKey, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One lesson in play order, with the unit and tier it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatEntry {
    pub tier_id: TierKey,
    pub unit: Unit,
    pub lesson: Lesson,
}

/// The course in play order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCourse {
    pub sequence: Vec<FlatEntry>,
    /// Position of each lesson id in `sequence`. A repeated id maps to its
    /// last position.
    pub index_by_lesson_id: HashMap<String, usize>,
}

/// Flatten tiers, then units, then unit lessons into one sequence.
///
/// Lesson ids a unit names but the map lacks become placeholder lessons.
pub fn flatten(course: &Course, lessons: &LessonMap) -> FlatCourse {
    let mut sequence = Vec::new();
    let mut index_by_lesson_id = HashMap::new();

    for (tier_id, tier) in course.tiers() {
        for unit in &tier.units {
            for lesson_id in &unit.lessons {
                let lesson = match lessons.get(lesson_id) {
                    Some(lesson) => lesson.clone(),
                    None => {
                        tracing::debug!(lesson_id = %lesson_id, "substituting placeholder lesson");
                        Lesson::placeholder(lesson_id)
                    }
                };
                index_by_lesson_id.insert(lesson_id.clone(), sequence.len());
                sequence.push(FlatEntry {
                    tier_id,
                    unit: unit.clone(),
                    lesson,
                });
            }
        }
    }

    FlatCourse {
        sequence,
        index_by_lesson_id,
    }
}

impl FlatCourse {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn position(&self, lesson_id: &str) -> Option<usize> {
        self.index_by_lesson_id.get(lesson_id).copied()
    }

    pub fn entry(&self, lesson_id: &str) -> Option<&FlatEntry> {
        self.position(lesson_id).and_then(|i| self.sequence.get(i))
    }

    /// The entry following `lesson_id`, if any.
    pub fn next_after(&self, lesson_id: &str) -> Option<&FlatEntry> {
        self.position(lesson_id).and_then(|i| self.sequence.get(i + 1))
    }

    /// Whether the lesson at `position` is playable: the first lesson always
    /// is, any other once its predecessor is complete.
    pub fn is_unlocked_at<F>(&self, position: usize, is_complete: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match position {
            0 => !self.sequence.is_empty(),
            i => self
                .sequence
                .get(i)
                .and(self.sequence.get(i - 1))
                .map_or(false, |prev| is_complete(&prev.lesson.id)),
        }
    }

    /// Unknown lesson ids are locked.
    pub fn is_unlocked<F>(&self, lesson_id: &str, is_complete: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.position(lesson_id)
            .map_or(false, |i| self.is_unlocked_at(i, is_complete))
    }
}
