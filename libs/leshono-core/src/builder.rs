//! Build the tiered course and its lessons from a scraped document.
//!
//! Units are the two-segment ids (`1.2`) that have deeper pages under them.
//! Each unit becomes `[unit:<id>, sub-stages..., review:<id>]`, where the two
//! checkpoint lessons are synthesized from the unit's tables.

use crate::document::{Block, CourseDocument, RawLessonDocument};
use crate::error::Result;
use crate::exercises::{
    comprehension_exercises, generate_alphabet_exercises_with, generate_exercises_from_vocab_with,
};
use crate::extract::{
    extract_alphabet_rows, extract_vocab_rows, first_paragraph, split_title, take_paragraphs,
};
use crate::ids::{
    depth, review_checkpoint_id, sort_ids, tier_for_id, unit_checkpoint_id, unit_prefix,
};
use crate::rules::{Classifier, ContentRules};
use crate::types::{AlphabetRow, Course, Exercise, Lesson, LessonIntro, LessonMap, Unit, VocabRow};
use rand::Rng;
use std::collections::HashMap;

const UNIT_FALLBACK_DESCRIPTION: &str = "Practice with short steps";
const ALPHABET_UNIT_INTRO: &str =
    "In this unit you will learn the Syriac letters (Serto script) and practice recognizing and matching them.";
const VOCAB_UNIT_INTRO: &str =
    "In this unit you will learn key words and practice them with short exercises.";
const UNIT_GRAMMAR_NOTE: &str = "Learn → Practice → Review";
const REVIEW_INTRO: &str = "Quick review to lock in what you learned in this unit.";
const ALPHABET_PAGE_INTRO: &str =
    "Learn these letters, then practice matching and recognizing them.";
const LESSON_FALLBACK_INTRO: &str = "Learn the key points, then practice.";

/// Output of [`build_course`].
#[derive(Debug, Clone)]
pub struct BuiltCourse {
    pub course: Course,
    pub lessons: LessonMap,
}

/// Build a course with the given rules.
///
/// Only invalid rule patterns fail; content gaps degrade to empty fields.
pub fn build_course<R: Rng + ?Sized>(
    document: &CourseDocument,
    rules: &ContentRules,
    rng: &mut R,
) -> Result<BuiltCourse> {
    let builder = CourseBuilder::new(rules)?;
    Ok(builder.build(document, rng))
}

/// Tables extracted from one page.
#[derive(Debug, Default)]
struct PageRows {
    alphabet: Vec<AlphabetRow>,
    vocab: Vec<VocabRow>,
}

/// Course builder holding compiled content rules.
pub struct CourseBuilder<'a> {
    classifier: Classifier<'a>,
}

impl<'a> CourseBuilder<'a> {
    pub fn new(rules: &'a ContentRules) -> Result<Self> {
        Ok(Self {
            classifier: rules.compile()?,
        })
    }

    fn rules(&self) -> &ContentRules {
        self.classifier.rules
    }

    pub fn build<R: Rng + ?Sized>(&self, document: &CourseDocument, rng: &mut R) -> BuiltCourse {
        let mut pages: HashMap<&str, &RawLessonDocument> = HashMap::new();
        for page in &document.lessons {
            pages.insert(page.id.as_str(), page);
        }

        let mut all_ids: Vec<String> = pages.keys().map(|id| id.to_string()).collect();
        sort_ids(&mut all_ids);

        let rows: HashMap<&str, PageRows> = pages
            .iter()
            .map(|(id, page)| {
                let rows = PageRows {
                    alphabet: extract_alphabet_rows(&page.blocks, self.rules()),
                    vocab: extract_vocab_rows(&page.blocks, self.rules()),
                };
                (*id, rows)
            })
            .collect();

        let mut unit_ids: Vec<String> = Vec::new();
        for id in &all_ids {
            if let Some(unit_id) = unit_prefix(id) {
                if !unit_ids.contains(&unit_id) {
                    unit_ids.push(unit_id);
                }
            }
        }

        let mut course = Course::new();
        let mut lessons = LessonMap::new();

        for unit_id in &unit_ids {
            let prefix = format!("{}.", unit_id);
            let sub_ids: Vec<&String> =
                all_ids.iter().filter(|id| id.starts_with(&prefix)).collect();
            if sub_ids.is_empty() {
                tracing::debug!(unit_id = %unit_id, "skipping unit without sub-stages");
                continue;
            }

            let page = pages.get(unit_id.as_str()).copied();
            let (unit, unit_lesson, review_lesson) =
                self.build_unit(unit_id, page, &sub_ids, &rows, rng);

            lessons.insert(unit_lesson.id.clone(), unit_lesson);
            lessons.insert(review_lesson.id.clone(), review_lesson);
            course.tier_mut(tier_for_id(unit_id)).units.push(unit);
        }

        for id in all_ids.iter().filter(|id| depth(id) >= 3) {
            let Some(page) = pages.get(id.as_str()) else {
                continue;
            };
            let page_rows = rows.get(id.as_str());
            let lesson = self.build_lesson(page, page_rows, rng);
            lessons.insert(id.clone(), lesson);
        }

        tracing::info!(
            units = course.unit_count(),
            lessons = lessons.len(),
            "built course"
        );

        BuiltCourse { course, lessons }
    }

    fn build_unit<R: Rng + ?Sized>(
        &self,
        unit_id: &str,
        page: Option<&RawLessonDocument>,
        sub_ids: &[&String],
        rows: &HashMap<&str, PageRows>,
        rng: &mut R,
    ) -> (Unit, Lesson, Lesson) {
        let rules = self.rules();
        let empty: &[Block] = &[];
        let blocks = page.map_or(empty, |p| p.blocks.as_slice());

        let raw_title = page
            .map(|p| p.title.trim())
            .filter(|t| !t.is_empty())
            .map_or_else(|| format!("Unit {}", unit_id), str::to_string);
        let parts = split_title(&raw_title);
        let title = if parts.title.is_empty() {
            raw_title.clone()
        } else {
            parts.title.clone()
        };
        let tier = tier_for_id(unit_id);
        let is_alphabet_unit = self.classifier.is_alphabet_unit(&title);

        let mut kept_ids: Vec<String> = Vec::new();
        let mut pooled_vocab: Vec<VocabRow> = Vec::new();
        let mut pooled_alphabet: Vec<AlphabetRow> = Vec::new();
        for sub_id in sub_ids {
            let sub_rows = rows.get(sub_id.as_str());
            if let Some(sub_rows) = sub_rows {
                pooled_vocab.extend(sub_rows.vocab.iter().cloned());
                pooled_alphabet.extend(sub_rows.alphabet.iter().cloned());
            }

            let has_content =
                sub_rows.map_or(true, |r| !r.alphabet.is_empty() || !r.vocab.is_empty());
            if is_alphabet_unit && !has_content {
                tracing::debug!(
                    unit_id = %unit_id,
                    sub_id = %sub_id,
                    "dropping intro page from alphabet unit"
                );
                continue;
            }
            kept_ids.push(sub_id.to_string());
        }

        let unit_checkpoint = unit_checkpoint_id(unit_id);
        let review_checkpoint = review_checkpoint_id(unit_id);

        let mut lesson_ids = Vec::with_capacity(kept_ids.len() + 2);
        lesson_ids.push(unit_checkpoint.clone());
        lesson_ids.extend(kept_ids);
        lesson_ids.push(review_checkpoint.clone());

        let unit = Unit {
            id: unit_id.to_string(),
            title: title.clone(),
            localized_label: parts.localized_label.unwrap_or_default(),
            color: tier.color().to_string(),
            description: first_paragraph(blocks)
                .unwrap_or_else(|| UNIT_FALLBACK_DESCRIPTION.to_string()),
            lessons: lesson_ids,
        };

        let use_alphabet = is_alphabet_unit && !pooled_alphabet.is_empty();
        let page_vocab = page
            .and_then(|p| rows.get(p.id.as_str()))
            .map(|r| r.vocab.as_slice())
            .unwrap_or_default();
        let checkpoint_vocab: &[VocabRow] = if page_vocab.is_empty() {
            &pooled_vocab
        } else {
            page_vocab
        };

        let unit_intro_vocab = if use_alphabet {
            self.alphabet_display(&pooled_alphabet)
        } else {
            self.capped_vocab(checkpoint_vocab)
        };
        let unit_description = if is_alphabet_unit {
            ALPHABET_UNIT_INTRO.to_string()
        } else {
            let paragraphs = take_paragraphs(blocks, &self.classifier, rules.paragraph_limit);
            if paragraphs.is_empty() {
                VOCAB_UNIT_INTRO.to_string()
            } else {
                paragraphs.join(" ")
            }
        };
        let unit_exercises = if use_alphabet {
            self.alphabet_exercises(&pooled_alphabet, rules.unit_alphabet_exercise_count, rng)
        } else {
            self.vocab_exercises(checkpoint_vocab, rules.unit_exercise_count, rng)
        };

        let unit_lesson = Lesson {
            id: unit_checkpoint,
            title: format!("{} — Unit", title),
            xp_value: rules.unit_xp,
            intro: LessonIntro {
                title: title.clone(),
                description: unit_description,
                vocab: unit_intro_vocab,
                grammar_note: Some(UNIT_GRAMMAR_NOTE.to_string()),
                ..Default::default()
            },
            exercises: unit_exercises,
        };

        let (review_vocab, review_exercises) = if use_alphabet {
            (
                self.alphabet_display(&pooled_alphabet),
                self.alphabet_exercises(&pooled_alphabet, rules.review_exercise_count, rng),
            )
        } else {
            (
                self.capped_vocab(&pooled_vocab),
                self.vocab_exercises(&pooled_vocab, rules.review_exercise_count, rng),
            )
        };

        let review_lesson = Lesson {
            id: review_checkpoint,
            title: format!("{} — Review", title),
            xp_value: rules.review_xp,
            intro: LessonIntro {
                title: "Review".to_string(),
                description: REVIEW_INTRO.to_string(),
                vocab: review_vocab,
                ..Default::default()
            },
            exercises: review_exercises,
        };

        (unit, unit_lesson, review_lesson)
    }

    fn build_lesson<R: Rng + ?Sized>(
        &self,
        page: &RawLessonDocument,
        page_rows: Option<&PageRows>,
        rng: &mut R,
    ) -> Lesson {
        let rules = self.rules();
        let empty = PageRows::default();
        let page_rows = page_rows.unwrap_or(&empty);

        let title = split_title(&page.title).title;
        let title = if title.is_empty() {
            format!("Lesson {}", page.id)
        } else {
            title
        };

        let paragraphs = take_paragraphs(&page.blocks, &self.classifier, rules.paragraph_limit);
        let is_alphabet_page = page_rows.alphabet.len() >= rules.alphabet_page_min_rows;

        let description = if !paragraphs.is_empty() {
            paragraphs.join(" ")
        } else if is_alphabet_page {
            ALPHABET_PAGE_INTRO.to_string()
        } else {
            LESSON_FALLBACK_INTRO.to_string()
        };

        let (vocab, exercises) = if is_alphabet_page {
            (
                self.alphabet_display(&page_rows.alphabet),
                self.alphabet_exercises(
                    &page_rows.alphabet,
                    rules.lesson_alphabet_exercise_count,
                    rng,
                ),
            )
        } else if !page_rows.vocab.is_empty() {
            (
                self.capped_vocab(&page_rows.vocab),
                self.vocab_exercises(&page_rows.vocab, rules.lesson_exercise_count, rng),
            )
        } else if !paragraphs.is_empty() {
            (Vec::new(), comprehension_exercises(rng))
        } else {
            (Vec::new(), Vec::new())
        };

        Lesson {
            id: page.id.clone(),
            title: title.clone(),
            xp_value: rules.lesson_xp,
            intro: LessonIntro {
                title,
                description,
                vocab,
                ..Default::default()
            },
            exercises,
        }
    }

    fn alphabet_display(&self, rows: &[AlphabetRow]) -> Vec<VocabRow> {
        rows.iter()
            .take(self.rules().intro_vocab_cap)
            .map(AlphabetRow::to_vocab)
            .collect()
    }

    fn capped_vocab(&self, rows: &[VocabRow]) -> Vec<VocabRow> {
        rows.iter().take(self.rules().intro_vocab_cap).cloned().collect()
    }

    fn alphabet_exercises<R: Rng + ?Sized>(
        &self,
        rows: &[AlphabetRow],
        count: usize,
        rng: &mut R,
    ) -> Vec<Exercise> {
        generate_alphabet_exercises_with(&self.rules().generator, rows, count, rng)
    }

    fn vocab_exercises<R: Rng + ?Sized>(
        &self,
        rows: &[VocabRow],
        count: usize,
        rng: &mut R,
    ) -> Vec<Exercise> {
        generate_exercises_from_vocab_with(&self.rules().generator, rows, count, rng)
    }
}
