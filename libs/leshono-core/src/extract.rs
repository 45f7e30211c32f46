//! Pull structured rows and text out of loosely structured page blocks.

use crate::document::Block;
use crate::normalize::looks_syriac;
use crate::rules::{Classifier, ContentRules};
use crate::types::{AlphabetRow, VocabRow};
use std::collections::HashSet;

/// Page title split on `|`: display title and optional Syriac label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    pub title: String,
    pub localized_label: Option<String>,
}

/// Split a pipe-delimited page title.
///
/// The first segment is the display title; the first segment containing
/// Syriac script, if any, is the localized label.
pub fn split_title(raw: &str) -> TitleParts {
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    TitleParts {
        title: parts.first().copied().unwrap_or_default().to_string(),
        localized_label: parts
            .iter()
            .find(|part| looks_syriac(part))
            .map(|part| part.to_string()),
    }
}

/// Up to `limit` content paragraphs, skipping empty and instructional ones.
pub fn take_paragraphs(blocks: &[Block], classifier: &Classifier<'_>, limit: usize) -> Vec<String> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Paragraph { text } => Some(text.trim()),
            _ => None,
        })
        .filter(|text| !text.is_empty() && !classifier.is_instructional(text))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// First non-empty paragraph, instructional or not.
pub fn first_paragraph(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Paragraph { text } if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}

fn row_cells(block: &Block) -> Option<Vec<&str>> {
    match block {
        Block::TableRow { cells } => Some(
            cells
                .iter()
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

/// Rows shaped like `[name, sound, letter]` where the letter is a short
/// Syriac string.
pub fn extract_alphabet_rows(blocks: &[Block], rules: &ContentRules) -> Vec<AlphabetRow> {
    let mut rows = Vec::new();
    let mut seen_header = false;

    for cells in blocks.iter().filter_map(row_cells) {
        if cells.len() < 3 {
            continue;
        }
        let (name, sound, letter) = (cells[0], cells[1], cells[2]);

        if !seen_header
            && name.eq_ignore_ascii_case("name")
            && sound.to_lowercase().contains("sound")
            && (letter.eq_ignore_ascii_case("letter") || looks_syriac(letter))
        {
            seen_header = true;
            continue;
        }

        if !looks_syriac(letter) || letter.chars().count() > rules.max_letter_chars {
            continue;
        }
        let lowered = name.to_lowercase();
        if rules.alphabet_noise.iter().any(|noise| *noise == lowered) {
            continue;
        }

        rows.push(AlphabetRow::new(name, sound, letter));
        if rows.len() >= rules.max_alphabet_rows {
            break;
        }
    }

    rows
}

/// Rows shaped like `[latin, meaning, syriac]`, deduplicated in order.
pub fn extract_vocab_rows(blocks: &[Block], rules: &ContentRules) -> Vec<VocabRow> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for cells in blocks.iter().filter_map(row_cells) {
        if cells.len() < 3 {
            continue;
        }
        let joined = cells.join(" ").to_lowercase();
        if rules.vocab_caption_rows.iter().any(|caption| *caption == joined) {
            continue;
        }

        let (latin, meaning, syriac) = (cells[0], cells[1], cells[2]);
        if latin.eq_ignore_ascii_case("name") && meaning.to_lowercase().contains("sound") {
            continue;
        }

        let row = VocabRow::new(latin, meaning, Some(syriac));
        if seen.insert(row.clone()) {
            rows.push(row);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alphabet_blocks() -> Vec<Block> {
        vec![
            Block::paragraph("The Syriac alphabet has 22 letters."),
            Block::table_row(["Name", "Sound (value)", "Letter"]),
            Block::table_row(["olaf", "-", "ܐ"]),
            Block::table_row(["beth", "b", "ܒ"]),
            Block::table_row(["gomal", "g", "ܓ"]),
            Block::table_row(["Surayt in Syriac script", "x", "ܣܘܪܝܬ"]),
            Block::table_row(["long", "x", "ܐܒܓܕܗܘܙ"]),
            Block::table_row(["latin", "x", "abc"]),
        ]
    }

    #[test]
    fn split_pipe_title() {
        assert_eq!(
            split_title("The alphabet | ܐܠܦܒܝܬ | 1.1"),
            TitleParts {
                title: "The alphabet".to_string(),
                localized_label: Some("ܐܠܦܒܝܬ".to_string()),
            }
        );
        assert_eq!(split_title("Family").localized_label, None);
        assert_eq!(split_title("").title, "");
    }

    #[test]
    fn alphabet_rows_skip_header_noise_and_long_cells() {
        let rows = extract_alphabet_rows(&alphabet_blocks(), &ContentRules::default());
        assert_eq!(
            rows,
            vec![
                AlphabetRow::new("olaf", "-", "ܐ"),
                AlphabetRow::new("beth", "b", "ܒ"),
                AlphabetRow::new("gomal", "g", "ܓ"),
            ]
        );
    }

    #[test]
    fn alphabet_rows_capped() {
        let rules = ContentRules {
            max_alphabet_rows: 2,
            ..Default::default()
        };
        assert_eq!(extract_alphabet_rows(&alphabet_blocks(), &rules).len(), 2);
    }

    #[test]
    fn vocab_rows_dedupe_and_skip_captions() {
        let blocks = vec![
            Block::table_row(["Vocabulary"]),
            Block::table_row(["Name", "Sound", "Letter"]),
            Block::table_row(["bayto", "house", "ܒܰܝܬܐ"]),
            Block::table_row(["bayto", "house", "ܒܰܝܬܐ"]),
            Block::table_row(["emo", "mother", "ܐܶܡܐ", "extra"]),
            Block::table_row(["only", "two"]),
            Block::table_row(["", "blank", "cells", ""]),
            Block::paragraph("not a row"),
        ];
        let rows = extract_vocab_rows(&blocks, &ContentRules::default());
        assert_eq!(
            rows,
            vec![
                VocabRow::new("bayto", "house", Some("ܒܰܝܬܐ")),
                VocabRow::new("emo", "mother", Some("ܐܶܡܐ")),
            ]
        );
    }

    #[test]
    fn paragraphs_skip_instructions() {
        let rules = ContentRules::default();
        let classifier = rules.compile().unwrap();
        let blocks = vec![
            Block::paragraph("  "),
            Block::paragraph("Watch this video about greetings."),
            Block::paragraph("First."),
            Block::table_row(["a", "b", "c"]),
            Block::paragraph("Second."),
            Block::paragraph("Listen to the audio."),
            Block::paragraph("Third."),
            Block::paragraph("Fourth."),
        ];
        assert_eq!(
            take_paragraphs(&blocks, &classifier, 3),
            vec!["First.", "Second.", "Third."]
        );
        assert_eq!(
            first_paragraph(&blocks).as_deref(),
            Some("Watch this video about greetings.")
        );
    }
}
