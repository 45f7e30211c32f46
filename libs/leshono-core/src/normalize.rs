//! Canonical form for learner input and reference answers.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Transliteration letters folded to plain ASCII before comparison.
const DIGRAPHS: &[(char, &str)] = &[
    ('š', "sh"),
    ('ṣ', "s"),
    ('ṭ', "t"),
    ('ḏ', "d"),
    ('ḥ', "h"),
    ('ġ', "g"),
];

/// Glottal and apostrophe marks dropped entirely.
const DROPPED_MARKS: &[char] = &['ʿ', '’', '\''];

/// First and last code points of the Syriac block.
const SYRIAC_BLOCK: (char, char) = ('\u{0700}', '\u{074F}');

/// Normalize text for answer comparison.
///
/// Lower-cases, folds transliteration letters (`š` → `sh`, `ṭ` → `t`, ...),
/// strips remaining diacritics, drops apostrophe-like marks and collapses
/// whitespace. Never fails; normalizing twice gives the same result.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    // Compose first so precomposed transliteration letters are seen whole
    // even if the input arrived decomposed.
    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.trim().nfc() {
        match DIGRAPHS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => folded.push_str(to),
            None => folded.push(c),
        }
    }

    // Compatibility forms such as `ℌ` decompose to upper case letters.
    let stripped: String = folded
        .nfkd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c) && !DROPPED_MARKS.contains(c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether text contains at least one Syriac character.
pub fn looks_syriac(text: &str) -> bool {
    text.chars()
        .any(|c| (SYRIAC_BLOCK.0..=SYRIAC_BLOCK.1).contains(&c))
}
