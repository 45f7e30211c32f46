//! Exercise generation from vocabulary and alphabet tables.
//!
//! Structure is deterministic (which kinds appear and in what order); option
//! order and distractors come from the caller's random source. Pass a seeded
//! RNG for reproducible sets.

use crate::normalize::looks_syriac;
use crate::rules::GeneratorRules;
use crate::types::{AlphabetRow, Exercise, ExerciseKind, VocabRow};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Generate alphabet drills with the default rules.
pub fn generate_alphabet_exercises<R: Rng + ?Sized>(
    rows: &[AlphabetRow],
    count: usize,
    rng: &mut R,
) -> Vec<Exercise> {
    generate_alphabet_exercises_with(&GeneratorRules::default(), rows, count, rng)
}

/// Generate vocabulary exercises with the default rules.
pub fn generate_exercises_from_vocab<R: Rng + ?Sized>(
    vocab: &[VocabRow],
    count: usize,
    rng: &mut R,
) -> Vec<Exercise> {
    generate_exercises_from_vocab_with(&GeneratorRules::default(), vocab, count, rng)
}

/// Alphabet drills: one match warm-up, then select, type and true/false
/// passes over the rows until `count` is reached.
pub fn generate_alphabet_exercises_with<R: Rng + ?Sized>(
    rules: &GeneratorRules,
    rows: &[AlphabetRow],
    count: usize,
    rng: &mut R,
) -> Vec<Exercise> {
    let rows: Vec<&AlphabetRow> = rows
        .iter()
        .filter(|row| !row.name.is_empty() && !row.letter.is_empty())
        .collect();
    if rows.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    let letters: Vec<&str> = rows.iter().map(|row| row.letter.as_str()).collect();

    let pairs: Vec<(String, String)> = rows
        .iter()
        .take(rules.match_source_rows)
        .map(|row| (row.name.clone(), row.letter.clone()))
        .collect();
    if pairs.len() >= rules.match_min_pairs {
        out.push(match_exercise(pairs, rules.match_pair_limit));
    }

    for row in &rows {
        if out.len() >= count {
            break;
        }
        let prompt = match row.sound_value() {
            Some(sound) => format!("Select the Syriac letter for: {} ({})", row.name, sound),
            None => format!("Select the Syriac letter for: {}", row.name),
        };
        out.push(Exercise::Select {
            prompt,
            options: options_with_distractors(&row.letter, &letters, rules.select_options, rng),
            answer: row.letter.clone(),
            alternates: Vec::new(),
        });
    }

    for row in &rows {
        if out.len() >= count {
            break;
        }
        out.push(Exercise::Type {
            prompt: format!("Type the letter name for: {}", row.letter),
            answer: row.name.clone(),
            alternates: vec![row.name.clone()],
        });
    }

    for row in &rows {
        if out.len() >= count {
            break;
        }
        let shown = shown_value(&row.letter, &letters, rules.true_probability, rng);
        out.push(Exercise::TrueFalse {
            prompt: format!("{} is written as {}.", row.name, shown),
            answer: shown == row.letter,
        });
    }

    out.truncate(count);
    out
}

/// Vocabulary exercises: a match warm-up when enough Syriac forms exist,
/// then one pass rotating through kinds under per-kind caps, then select
/// backfill until `count` is reached.
pub fn generate_exercises_from_vocab_with<R: Rng + ?Sized>(
    rules: &GeneratorRules,
    vocab: &[VocabRow],
    count: usize,
    rng: &mut R,
) -> Vec<Exercise> {
    let items: Vec<&VocabRow> = vocab
        .iter()
        .filter(|row| !row.latin.is_empty() && !row.meaning.is_empty())
        .collect();
    if items.is_empty() || count == 0 {
        return Vec::new();
    }

    let latin_pool: Vec<&str> = items.iter().map(|row| row.latin.as_str()).collect();
    let meaning_pool: Vec<&str> = items.iter().map(|row| row.meaning.as_str()).collect();
    let take: Vec<&VocabRow> = items.iter().copied().take(rules.vocab_pool_cap).collect();

    let mut out = Vec::new();

    let syriac_pairs: Vec<(String, String)> = take
        .iter()
        .filter_map(|row| match &row.syriac {
            Some(syriac) if looks_syriac(syriac) => Some((row.latin.clone(), syriac.clone())),
            _ => None,
        })
        .take(rules.match_source_rows)
        .collect();
    if syriac_pairs.len() >= rules.match_min_pairs {
        out.push(match_exercise(syriac_pairs, rules.match_pair_limit));
    }

    let caps = [
        (ExerciseKind::Select, rules.max_select),
        (ExerciseKind::Type, rules.max_type),
        (ExerciseKind::Fill, rules.max_fill),
        (ExerciseKind::TrueFalse, rules.max_true_false),
        (ExerciseKind::Arrange, rules.max_arrange),
    ];
    let mut emitted: HashMap<ExerciseKind, usize> = HashMap::new();

    let mut rotated = take.clone();
    rotated.shuffle(rng);

    for row in rotated {
        if out.len() >= count {
            break;
        }
        let next_kind = caps
            .iter()
            .find(|(kind, cap)| emitted.get(kind).copied().unwrap_or(0) < *cap)
            .map(|(kind, _)| *kind);
        let Some(kind) = next_kind else {
            break;
        };

        let exercise = match kind {
            ExerciseKind::Select => vocab_select(row, &latin_pool, rules, rng),
            ExerciseKind::Type => Exercise::Type {
                prompt: format!("Type the Turoyo word for: \"{}\"", row.meaning),
                answer: row.latin.clone(),
                alternates: vec![row.latin.clone()],
            },
            ExerciseKind::Fill => Exercise::Fill {
                prompt: format!("Fill the blank: ___ = {}", row.meaning),
                answer: row.latin.clone(),
                alternates: vec![row.latin.clone()],
            },
            ExerciseKind::TrueFalse => {
                let shown = shown_value(&row.meaning, &meaning_pool, rules.true_probability, rng);
                Exercise::TrueFalse {
                    prompt: format!("\"{}\" means \"{}\".", row.latin, shown),
                    answer: shown == row.meaning,
                }
            }
            ExerciseKind::Arrange => arrange_exercise(row, rng),
            ExerciseKind::Match => continue,
        };
        *emitted.entry(kind).or_insert(0) += 1;
        out.push(exercise);
    }

    while out.len() < count {
        let Some(row) = take.choose(rng) else {
            break;
        };
        out.push(vocab_select(row, &latin_pool, rules, rng));
    }

    out.truncate(count);
    out
}

/// Three short comprehension questions for pages without tables.
pub fn comprehension_exercises<R: Rng + ?Sized>(rng: &mut R) -> Vec<Exercise> {
    let mut options: Vec<String> = ["Syriac", "Latin", "English", "Swedish"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    options.shuffle(rng);

    vec![
        Exercise::TrueFalse {
            prompt: "This lesson uses both Syriac script and Latin transliteration.".to_string(),
            answer: true,
        },
        Exercise::Select {
            prompt: "Which script is read right-to-left?".to_string(),
            options,
            answer: "Syriac".to_string(),
            alternates: Vec::new(),
        },
        Exercise::TrueFalse {
            prompt: "Latin transliteration is read right-to-left.".to_string(),
            answer: false,
        },
    ]
}

fn match_exercise(mut pairs: Vec<(String, String)>, limit: usize) -> Exercise {
    pairs.truncate(limit);
    Exercise::Match { pairs }
}

fn vocab_select<R: Rng + ?Sized>(
    row: &VocabRow,
    latin_pool: &[&str],
    rules: &GeneratorRules,
    rng: &mut R,
) -> Exercise {
    Exercise::Select {
        prompt: format!("Choose the Turoyo word for: \"{}\"", row.meaning),
        options: options_with_distractors(&row.latin, latin_pool, rules.select_options, rng),
        answer: row.latin.clone(),
        alternates: vec![row.latin.clone()],
    }
}

fn arrange_exercise<R: Rng + ?Sized>(row: &VocabRow, rng: &mut R) -> Exercise {
    let tokens: Vec<String> = [row.latin.as_str(), "="]
        .into_iter()
        .chain(row.meaning.split_whitespace())
        .map(str::to_string)
        .collect();
    let answer = tokens.join(" ");
    let mut word_bank = tokens;
    word_bank.shuffle(rng);

    Exercise::Arrange {
        prompt: "Arrange:".to_string(),
        word_bank,
        answer: answer.clone(),
        alternates: vec![answer],
    }
}

/// The correct value plus up to `total - 1` distinct distractors, shuffled.
///
/// Fewer distinct pool values than `total` gives fewer options.
fn options_with_distractors<R: Rng + ?Sized>(
    correct: &str,
    pool: &[&str],
    total: usize,
    rng: &mut R,
) -> Vec<String> {
    let candidates = distinct_others(correct, pool);
    let mut options = vec![correct.to_string()];
    options.extend(
        candidates
            .choose_multiple(rng, total.saturating_sub(1))
            .map(|s| s.to_string()),
    );
    options.shuffle(rng);
    options
}

/// The correct value with `true_probability`, otherwise a different pool
/// value if one exists.
fn shown_value<R: Rng + ?Sized>(
    correct: &str,
    pool: &[&str],
    true_probability: f64,
    rng: &mut R,
) -> String {
    if rng.gen_bool(true_probability.clamp(0.0, 1.0)) {
        return correct.to_string();
    }
    distinct_others(correct, pool)
        .choose(rng)
        .map_or_else(|| correct.to_string(), |s| s.to_string())
}

fn distinct_others<'a>(correct: &str, pool: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::new();
    for value in pool {
        if *value != correct && !out.contains(value) {
            out.push(*value);
        }
    }
    out
}
