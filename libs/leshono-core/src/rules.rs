//! Tunable heuristics for classifying scraped content.
//!
//! The upstream pages are uncontrolled, so classification is pattern based.
//! Defaults are the values the course was tuned against; hosts can override
//! any subset from JSON.

use crate::error::{CourseError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Content classification and lesson sizing rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRules {
    /// Unit titles matching this are alphabet units.
    pub alphabet_unit_pattern: String,
    /// Paragraphs matching this are media instructions, not content.
    pub instructional_pattern: String,
    /// Alphabet rows needed before a page counts as an alphabet page.
    pub alphabet_page_min_rows: usize,
    /// Longest letter cell (in chars) accepted as an alphabet letter.
    pub max_letter_chars: usize,
    /// Alphabet rows kept per page.
    pub max_alphabet_rows: usize,
    /// First-cell values that are never alphabet rows (compared lower-case).
    pub alphabet_noise: Vec<String>,
    /// Joined row texts that are table captions, not vocabulary.
    pub vocab_caption_rows: Vec<String>,
    /// Vocabulary rows shown in a lesson intro.
    pub intro_vocab_cap: usize,
    /// Paragraphs joined into a lesson description.
    pub paragraph_limit: usize,
    pub unit_exercise_count: usize,
    pub unit_alphabet_exercise_count: usize,
    pub review_exercise_count: usize,
    pub lesson_exercise_count: usize,
    pub lesson_alphabet_exercise_count: usize,
    pub unit_xp: u32,
    pub review_xp: u32,
    pub lesson_xp: u32,
    pub generator: GeneratorRules,
}

impl Default for ContentRules {
    fn default() -> Self {
        Self {
            alphabet_unit_pattern: "(?i)alphabet|olafbe".to_string(),
            instructional_pattern: "(?i)video-?clip|watch this video|listen to".to_string(),
            alphabet_page_min_rows: 6,
            max_letter_chars: 6,
            max_alphabet_rows: 40,
            alphabet_noise: vec!["surayt in syriac script".to_string()],
            vocab_caption_rows: vec!["vocabulary".to_string(), "exercises".to_string()],
            intro_vocab_cap: 20,
            paragraph_limit: 3,
            unit_exercise_count: 10,
            unit_alphabet_exercise_count: 14,
            review_exercise_count: 16,
            lesson_exercise_count: 10,
            lesson_alphabet_exercise_count: 14,
            unit_xp: 10,
            review_xp: 15,
            lesson_xp: 10,
            generator: GeneratorRules::default(),
        }
    }
}

/// Shape of generated exercise sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorRules {
    /// Rows considered for the opening match exercise.
    pub match_source_rows: usize,
    /// Pairs in a match exercise.
    pub match_pair_limit: usize,
    /// Pairs needed before a match exercise is emitted.
    pub match_min_pairs: usize,
    /// Options in a select exercise, including the answer.
    pub select_options: usize,
    /// Chance a generated true/false statement shows the right value.
    pub true_probability: f64,
    /// Vocabulary rows a single set draws from.
    pub vocab_pool_cap: usize,
    pub max_select: usize,
    pub max_type: usize,
    pub max_fill: usize,
    pub max_true_false: usize,
    pub max_arrange: usize,
}

impl Default for GeneratorRules {
    fn default() -> Self {
        Self {
            match_source_rows: 8,
            match_pair_limit: 6,
            match_min_pairs: 3,
            select_options: 4,
            true_probability: 0.6,
            vocab_pool_cap: 18,
            max_select: 3,
            max_type: 3,
            max_fill: 2,
            max_true_false: 3,
            max_arrange: 2,
        }
    }
}

impl ContentRules {
    /// Parse rules from JSON. Missing fields keep their defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(CourseError::InvalidRules)
    }

    /// Compile the patterns for use by the builder.
    pub fn compile(&self) -> Result<Classifier<'_>> {
        let alphabet_unit = Regex::new(&self.alphabet_unit_pattern).map_err(|source| {
            CourseError::InvalidPattern {
                field: "alphabet_unit_pattern",
                source,
            }
        })?;
        let instructional = Regex::new(&self.instructional_pattern).map_err(|source| {
            CourseError::InvalidPattern {
                field: "instructional_pattern",
                source,
            }
        })?;

        Ok(Classifier {
            rules: self,
            alphabet_unit,
            instructional,
        })
    }
}

/// Rules with compiled patterns.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    pub rules: &'a ContentRules,
    alphabet_unit: Regex,
    instructional: Regex,
}

impl Classifier<'_> {
    pub fn is_alphabet_unit(&self, title: &str) -> bool {
        self.alphabet_unit.is_match(title)
    }

    pub fn is_instructional(&self, paragraph: &str) -> bool {
        self.instructional.is_match(paragraph)
    }
}
