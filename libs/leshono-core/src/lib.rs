//! Course runner core shared by the server and any client shell.
//!
//! Provides:
//! - Course builder turning a scraped textbook document into tiers, units and lessons
//! - Exercise generation from vocabulary and alphabet tables
//! - Answer normalization, matching and grading
//! - Flat lesson order with unlock rules and learner progress

pub mod builder;
pub mod document;
pub mod error;
pub mod exercises;
pub mod extract;
pub mod flatten;
pub mod ids;
pub mod matching;
pub mod normalize;
pub mod progress;
pub mod rules;
pub mod types;

pub use builder::{build_course, BuiltCourse, CourseBuilder};
pub use document::{Block, CourseDocument, RawLessonDocument};
pub use error::{CourseError, Result};
pub use exercises::{
    comprehension_exercises, generate_alphabet_exercises, generate_exercises_from_vocab,
};
pub use flatten::{flatten, FlatCourse, FlatEntry};
pub use matching::{compare_answers, grade, matches, ExerciseResponse, MatchResult, Verdict};
pub use normalize::normalize;
pub use progress::{Completion, LearnerProgress, TierProgress};
pub use rules::{ContentRules, GeneratorRules};
pub use types::{
    AlphabetRow, Course, DialogueLine, Exercise, ExerciseKind, Lesson, LessonIntro, LessonMap,
    Tier, TierKey, Unit, VocabRow,
};
