//! Test fixtures and factory functions for creating test data.

use serde_json::json;

use leshono_core::ContentRules;
use leshono_server::catalog::CourseCatalog;

/// Seed used for the sample catalog's exercises.
pub const SAMPLE_SEED: u64 = 7;

/// A small two-unit course: an alphabet unit and a vocabulary unit.
///
/// Path order:
/// `unit:1.1, 1.1.2, review:1.1, unit:1.2, 1.2.1, review:1.2`
/// (`1.1.1` has no tables, so the alphabet unit drops it from the path).
pub fn sample_document() -> serde_json::Value {
    let letters = [
        ("olaf", "-", "ܐ"),
        ("beth", "b", "ܒ"),
        ("gomal", "g", "ܓ"),
        ("dolath", "d", "ܕ"),
        ("he", "h", "ܗ"),
        ("waw", "w", "ܘ"),
    ];
    let mut alphabet_blocks =
        vec![json!({"type": "table_row", "cells": ["Name", "Sound", "Letter"]})];
    alphabet_blocks.extend(
        letters
            .iter()
            .map(|(n, s, l)| json!({"type": "table_row", "cells": [n, s, l]})),
    );

    json!({
        "name": "Leshono",
        "lessons": [
            {"id": "1.1", "title": "The alphabet | ܐܠܦܒܝܬ", "blocks": [
                {"type": "paragraph", "text": "Syriac is written from right to left."}
            ]},
            {"id": "1.1.1", "title": "Two alphabets", "blocks": [
                {"type": "paragraph", "text": "Surayt can be written in two scripts."}
            ]},
            {"id": "1.1.2", "title": "Letters", "blocks": alphabet_blocks},
            {"id": "1.2", "title": "Family", "blocks": [
                {"type": "paragraph", "text": "Talking about the family."}
            ]},
            {"id": "1.2.1", "title": "At home", "blocks": [
                {"type": "table_row", "cells": ["bayto", "house", "ܒܰܝܬܐ"]},
                {"type": "table_row", "cells": ["emo", "mother", "ܐܶܡܐ"]},
                {"type": "table_row", "cells": ["babo", "father", "ܒܰܒܐ"]}
            ]}
        ]
    })
}

pub fn sample_document_json() -> String {
    sample_document().to_string()
}

pub fn sample_catalog() -> CourseCatalog {
    CourseCatalog::from_json(
        &sample_document_json(),
        &ContentRules::default(),
        Some(SAMPLE_SEED),
    )
    .expect("sample document builds")
}

/// Create a device registration request body.
pub fn device_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create an answer check request body.
pub fn check_request(exercise_index: usize, response: serde_json::Value) -> serde_json::Value {
    json!({
        "exercise_index": exercise_index,
        "response": response,
    })
}

/// Create a daily goal update request body.
pub fn goal_request(daily_goal: u32) -> serde_json::Value {
    json!({ "daily_goal": daily_goal })
}
